//! Wire encodings.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::core::CodecError;

/// How events are framed on a connection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Codec {
    /// UTF-8 JSON text, for browsers.
    #[default]
    Json,
    /// Compact `bincode`, for native clients.
    Binary,
}

impl Codec {
    pub fn encode<T: Serialize>(self, value: &T) -> Result<Vec<u8>, CodecError> {
        Ok(match self {
            Codec::Json => serde_json::to_vec(value)?,
            Codec::Binary => bincode::serialize(value)?,
        })
    }

    pub fn decode<T: DeserializeOwned>(self, bytes: &[u8]) -> Result<T, CodecError> {
        Ok(match self {
            Codec::Json => serde_json::from_slice(bytes)?,
            Codec::Binary => bincode::deserialize(bytes)?,
        })
    }
}
