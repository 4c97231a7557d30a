use std::fmt;

use serde::{Deserialize, Serialize};

use crate::utils::wire;

/// Record type of a [`DnsRecord`].
///
/// Types the control panel offers are named variants; anything else is kept
/// verbatim in [`RecordType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RecordType {
    A,
    Aaaa,
    Mx,
    Cname,
    Caa,
    Srv,
    Txt,
    Tlsa,
    Ns,
    Ds,
    Openpgpkey,
    Smimea,
    Sshfp,
    Other(String),
}

impl RecordType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Mx => "MX",
            Self::Cname => "CNAME",
            Self::Caa => "CAA",
            Self::Srv => "SRV",
            Self::Txt => "TXT",
            Self::Tlsa => "TLSA",
            Self::Ns => "NS",
            Self::Ds => "DS",
            Self::Openpgpkey => "OPENPGPKEY",
            Self::Smimea => "SMIMEA",
            Self::Sshfp => "SSHFP",
            Self::Other(raw) => raw,
        }
    }

    /// Whether the service requires `priority` for this type.
    pub fn requires_priority(&self) -> bool {
        matches!(self, Self::Mx | Self::Srv)
    }
}

impl From<String> for RecordType {
    fn from(raw: String) -> Self {
        match raw.to_uppercase().as_str() {
            "A" => Self::A,
            "AAAA" => Self::Aaaa,
            "MX" => Self::Mx,
            "CNAME" => Self::Cname,
            "CAA" => Self::Caa,
            "SRV" => Self::Srv,
            "TXT" => Self::Txt,
            "TLSA" => Self::Tlsa,
            "NS" => Self::Ns,
            "DS" => Self::Ds,
            "OPENPGPKEY" => Self::Openpgpkey,
            "SMIMEA" => Self::Smimea,
            "SSHFP" => Self::Sshfp,
            _ => Self::Other(raw),
        }
    }
}

impl From<&str> for RecordType {
    fn from(raw: &str) -> Self {
        Self::from(raw.to_string())
    }
}

impl From<RecordType> for String {
    fn from(t: RecordType) -> Self {
        match t {
            RecordType::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One resource record of a zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DnsRecord {
    /// Record id; empty for records that do not exist yet.
    #[serde(
        default,
        deserialize_with = "wire::string",
        skip_serializing_if = "String::is_empty"
    )]
    pub id: String,
    /// Host name relative to the zone, `@` for the apex.
    #[serde(default, deserialize_with = "wire::string")]
    pub hostname: String,
    #[serde(rename = "type")]
    pub record_type: RecordType,
    /// Required for MX records.
    #[serde(
        default,
        deserialize_with = "wire::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub priority: Option<String>,
    #[serde(default, deserialize_with = "wire::string")]
    pub destination: String,
    /// Delete this record when the set is submitted.
    #[serde(default, deserialize_with = "wire::bool_or_false")]
    pub deleterecord: bool,
    /// Read only; the service ignores it on input.
    #[serde(
        default,
        deserialize_with = "wire::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub state: Option<String>,
}

impl DnsRecord {
    /// A new record (empty id).
    pub fn new(
        hostname: impl Into<String>,
        record_type: impl Into<RecordType>,
        destination: impl Into<String>,
    ) -> Self {
        Self {
            id: String::new(),
            hostname: hostname.into(),
            record_type: record_type.into(),
            priority: None,
            destination: destination.into(),
            deleterecord: false,
            state: None,
        }
    }

    #[must_use]
    pub fn with_priority(mut self, priority: impl ToString) -> Self {
        self.priority = Some(priority.to_string());
        self
    }

    /// Flag this record for deletion on the next update.
    #[must_use]
    pub fn marked_for_deletion(mut self) -> Self {
        self.deleterecord = true;
        self
    }

    pub fn is_new(&self) -> bool {
        self.id.trim().is_empty()
    }
}

/// Batch of records submitted in one update.
///
/// Records not contained in an update stay untouched unless they are
/// included with `deleterecord` set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DnsRecordSet {
    #[serde(default, deserialize_with = "wire::one_or_many")]
    pub dnsrecords: Vec<DnsRecord>,
}

impl DnsRecordSet {
    pub fn new(records: Vec<DnsRecord>) -> Self {
        Self {
            dnsrecords: records,
        }
    }

    pub fn len(&self) -> usize {
        self.dnsrecords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dnsrecords.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DnsRecord> {
        self.dnsrecords.iter()
    }
}

impl From<Vec<DnsRecord>> for DnsRecordSet {
    fn from(records: Vec<DnsRecord>) -> Self {
        Self::new(records)
    }
}

impl FromIterator<DnsRecord> for DnsRecordSet {
    fn from_iter<I: IntoIterator<Item = DnsRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a DnsRecordSet {
    type Item = &'a DnsRecord;
    type IntoIter = std::slice::Iter<'a, DnsRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Zone level settings.
///
/// Recommended ranges from the service documentation: ttl 3600–172800,
/// refresh 3600–14400, retry 900–3600, expire 592200–1776600 (seconds).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DnsZone {
    #[serde(default, deserialize_with = "wire::string")]
    pub name: String,
    #[serde(
        default,
        deserialize_with = "wire::opt_u32",
        skip_serializing_if = "Option::is_none"
    )]
    pub ttl: Option<u32>,
    /// Read only.
    #[serde(
        default,
        deserialize_with = "wire::opt_u64",
        skip_serializing_if = "Option::is_none"
    )]
    pub serial: Option<u64>,
    #[serde(
        default,
        deserialize_with = "wire::opt_u32",
        skip_serializing_if = "Option::is_none"
    )]
    pub refresh: Option<u32>,
    #[serde(
        default,
        deserialize_with = "wire::opt_u32",
        skip_serializing_if = "Option::is_none"
    )]
    pub retry: Option<u32>,
    #[serde(
        default,
        deserialize_with = "wire::opt_u32",
        skip_serializing_if = "Option::is_none"
    )]
    pub expire: Option<u32>,
    /// DNSSEC active in the nameserver. Can be enabled once every 24 hours.
    #[serde(
        default,
        deserialize_with = "wire::opt_bool",
        skip_serializing_if = "Option::is_none"
    )]
    pub dnssecstatus: Option<bool>,
}
