//! JSON export of the resolved deck.

use log::debug;

use super::{Error, Exporter};
use crate::deck::Deck;

/// Serializes the deck as pretty-printed JSON.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonExporter;

impl JsonExporter {
    pub fn new() -> Self {
        Self
    }
}

impl Exporter for JsonExporter {
    fn render(&self, deck: &Deck) -> Result<String, Error> {
        let json =
            serde_json::to_string_pretty(deck).map_err(|err| Error::Render(err.to_string()))?;
        debug!(bytes = json.len(); "JSON document rendered");
        Ok(json)
    }
}
