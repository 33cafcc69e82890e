//! Dev server planning: one live-reloading server per deck on sequential ports.

use crate::error::{DeckError, Result};
use crate::slides::{SlideCollection, SlideEntry};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DevInstance {
    pub entry: SlideEntry,
    pub port: u16,
    pub url: String,
}

impl DevInstance {
    /// Arguments appended to the configured dev command.
    pub fn args(&self) -> Vec<String> {
        vec![
            self.entry.file.clone(),
            "--port".to_string(),
            self.port.to_string(),
        ]
    }
}

/// Assign `base_port + i` to the i-th deck in collection order.
pub fn plan(collection: &SlideCollection, base_port: u16) -> Result<Vec<DevInstance>> {
    if collection.is_empty() {
        return Err(DeckError::NoSlides);
    }
    let last = u32::from(base_port) + collection.len() as u32 - 1;
    if base_port == 0 || last > u32::from(u16::MAX) {
        return Err(DeckError::PortRange {
            base: base_port,
            count: collection.len(),
        });
    }
    Ok(collection
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            // Range checked above.
            let port = base_port + i as u16;
            DevInstance {
                entry: entry.clone(),
                port,
                url: format!("http://localhost:{port}"),
            }
        })
        .collect())
}
