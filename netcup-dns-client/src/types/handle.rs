use serde::{Deserialize, Serialize};

use crate::utils::wire;

/// Free-form extra attribute of a contact handle (registry specific).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionalHandleAttribute {
    #[serde(default, deserialize_with = "wire::string")]
    pub item: String,
    #[serde(default, deserialize_with = "wire::string")]
    pub value: String,
}

/// A contact handle (owner, admin, tech, zone, billing, onsite).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandleObject {
    #[serde(
        default,
        deserialize_with = "wire::opt_u64",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<u64>,
    /// `organisation` or `person`.
    #[serde(rename = "type", default, deserialize_with = "wire::string")]
    pub handle_type: String,
    #[serde(default, deserialize_with = "wire::string")]
    pub name: String,
    #[serde(
        default,
        deserialize_with = "wire::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub organisation: Option<String>,
    #[serde(default, deserialize_with = "wire::string")]
    pub street: String,
    #[serde(default, deserialize_with = "wire::string")]
    pub postalcode: String,
    #[serde(default, deserialize_with = "wire::string")]
    pub city: String,
    /// ISO 3166 ALPHA-2, e.g. `CH`.
    #[serde(default, deserialize_with = "wire::string")]
    pub countrycode: String,
    #[serde(default, deserialize_with = "wire::string")]
    pub telephone: String,
    #[serde(default, deserialize_with = "wire::string")]
    pub email: String,
    #[serde(
        default,
        deserialize_with = "wire::one_or_many",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub optionalhandleattributes: Vec<OptionalHandleAttribute>,
    /// Handle is used by at least one domain.
    #[serde(
        default,
        deserialize_with = "wire::opt_bool",
        skip_serializing_if = "Option::is_none"
    )]
    pub assignedtodomain: Option<bool>,
}

impl HandleObject {
    pub fn attribute(&self, item: &str) -> Option<&str> {
        self.optionalhandleattributes
            .iter()
            .find(|a| a.item == item)
            .map(|a| a.value.as_str())
    }
}
