//! Serialization utilities
//!
//! Encodes tracked events for transport as JSON or MessagePack.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Available serialization formats
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum Format {
    /// JSON format - more human-readable, compatible with browsers
    #[default]
    Json,
    /// MessagePack format - more efficient binary format
    MessagePack,
}

impl Format {
    /// Short name of the format
    pub fn name(&self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::MessagePack => "messagepack",
        }
    }
}

/// Serialize data according to the specified format
pub fn serialize<T: Serialize>(data: &T, format: Format) -> Result<Vec<u8>> {
    match format {
        Format::Json => Ok(serde_json::to_vec(data)?),
        // Named encoding keeps struct fields as map keys, so payload maps decode as maps
        Format::MessagePack => Ok(rmp_serde::to_vec_named(data)?),
    }
}

/// Deserialize data encoded with [`serialize`]
pub fn deserialize<T: DeserializeOwned>(bytes: &[u8], format: Format) -> Result<T> {
    match format {
        Format::Json => Ok(serde_json::from_slice(bytes)?),
        Format::MessagePack => Ok(rmp_serde::from_slice(bytes)?),
    }
}
