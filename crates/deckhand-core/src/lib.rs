pub mod build;
pub mod config;
pub mod dev;
pub mod error;
pub mod io;
pub mod paths;
pub mod runner;
pub mod site;
pub mod slides;
pub mod title;

pub use error::{DeckError, Result};
