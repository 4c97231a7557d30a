use serde::{Deserialize, Serialize};

use super::slots::{DnssecSlots, SlotSet};
use crate::utils::wire;

/// Which kind of DNSSEC material a registry expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DnssecType {
    Unknown,
    Digest,
    Publickey,
    Unavailable,
    Other(String),
}

impl From<String> for DnssecType {
    fn from(raw: String) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "unknown" => Self::Unknown,
            "digest" => Self::Digest,
            "publickey" => Self::Publickey,
            "unavailable" => Self::Unavailable,
            _ => Self::Other(raw),
        }
    }
}

impl From<DnssecType> for String {
    fn from(t: DnssecType) -> Self {
        match t {
            DnssecType::Unknown => "unknown".into(),
            DnssecType::Digest => "digest".into(),
            DnssecType::Publickey => "publickey".into(),
            DnssecType::Unavailable => "unavailable".into(),
            DnssecType::Other(raw) => raw,
        }
    }
}

/// One DNSKEY or DS entry.
///
/// `flags` is the DNSKEY flag value (e.g. 257) for public keys and the
/// digest type for digest entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DnssecEntry {
    pub dnssectype: DnssecType,
    /// Base64 public key, or the DS digest.
    #[serde(default, deserialize_with = "wire::string")]
    pub publickey: String,
    #[serde(
        default,
        deserialize_with = "wire::opt_i64",
        skip_serializing_if = "Option::is_none"
    )]
    pub flags: Option<i64>,
    #[serde(
        default,
        deserialize_with = "wire::opt_u32",
        skip_serializing_if = "Option::is_none"
    )]
    pub algorithm: Option<u32>,
    #[serde(
        default,
        deserialize_with = "wire::opt_u32",
        skip_serializing_if = "Option::is_none"
    )]
    pub keytag: Option<u32>,
}

/// Up to 18 DNSSEC entries in slots `dnssecentry1..20` (no 8, no 15).
pub type DnssecEntries = SlotSet<DnssecEntry, DnssecSlots, 18>;
