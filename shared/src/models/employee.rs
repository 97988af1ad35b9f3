//! Employee Model

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Employee entity
///
/// `id` is assigned by the remote service and stays `None` for a record that
/// has not been created yet; it is omitted from serialized payloads so a
/// create request carries no id field at all.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone_number: String,
    /// Ordered address list; order is display order, duplicates permitted.
    #[serde(default)]
    pub addresses: Vec<Address>,
}

/// Address entry (embedded in Employee)
///
/// No identity of its own; its position in the parent list is its existence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default)]
    pub street_name: String,
    #[serde(default)]
    pub postal_code: String,
    #[serde(default)]
    pub apartment_number: ApartmentNumber,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub country: String,
}

/// Apartment number field.
///
/// The service schema leaves the wire type ambiguous (string or number), so
/// decoding accepts both and normalizes numbers to their decimal string
/// form. Encoding always emits a string; apartment identifiers are not
/// arithmetic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApartmentNumber(String);

impl ApartmentNumber {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ApartmentNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ApartmentNumber {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ApartmentNumber {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<i64> for ApartmentNumber {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

impl Serialize for ApartmentNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ApartmentNumber {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Number(i64),
            Text(String),
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Number(n) => Self(n.to_string()),
            Repr::Text(s) => Self(s),
        })
    }
}
