use crate::utils::error::{Result, ServiceError};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Raw byte width of a store-assigned identifier.
pub const RAW_LEN: usize = 12;
/// Length of the canonical string form.
pub const ENCODED_LEN: usize = 2 * RAW_LEN;

/// Store-native document identifier.
///
/// The canonical external form is 24 lowercase hexadecimal characters;
/// `decode` only accepts strings that `encode` can reproduce byte for byte.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocId([u8; RAW_LEN]);

impl DocId {
    pub fn from_bytes(bytes: [u8; RAW_LEN]) -> Self {
        Self(bytes)
    }

    pub fn encode(&self) -> String {
        hex::encode(self.0)
    }

    pub fn decode(value: &str) -> Result<Self> {
        if value.is_empty() {
            return Err(invalid(value, "identifier is empty"));
        }
        if value.len() != ENCODED_LEN {
            return Err(invalid(
                value,
                &format!(
                    "expected {} hexadecimal characters, got {}",
                    ENCODED_LEN,
                    value.len()
                ),
            ));
        }
        if !value
            .bytes()
            .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
        {
            return Err(invalid(value, "expected lowercase hexadecimal characters"));
        }

        let mut bytes = [0u8; RAW_LEN];
        hex::decode_to_slice(value, &mut bytes).map_err(|e| invalid(value, &e.to_string()))?;
        Ok(Self(bytes))
    }

    /// The store's extended wire form, `{"$oid": "<hex>"}`.
    pub fn to_native_json(&self) -> serde_json::Value {
        serde_json::json!({ "$oid": self.encode() })
    }
}

fn invalid(value: &str, reason: &str) -> ServiceError {
    ServiceError::InvalidIdentifier {
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

impl fmt::Display for DocId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl fmt::Debug for DocId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DocId({})", self.encode())
    }
}

impl FromStr for DocId {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self> {
        Self::decode(s)
    }
}

impl Serialize for DocId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.encode())
    }
}

/// Identifiers arrive either as plain strings or in the store's extended
/// form; both decode to the same value.
#[derive(Deserialize)]
#[serde(untagged)]
enum IdRepr {
    Native {
        #[serde(rename = "$oid")]
        oid: String,
    },
    Plain(String),
}

impl<'de> Deserialize<'de> for DocId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = match IdRepr::deserialize(deserializer)? {
            IdRepr::Native { oid } => oid,
            IdRepr::Plain(s) => s,
        };
        DocId::decode(&value).map_err(D::Error::custom)
    }
}
