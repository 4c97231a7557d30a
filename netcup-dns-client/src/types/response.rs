use std::fmt;

use chrono::NaiveDateTime;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::dns::{DnsRecordSet, DnsZone};
use crate::error::{Error, Result};
use crate::utils::{datetime, wire};

/// Processing state reported in a [`ResponseMessage`].
///
/// Values outside the documented set are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ResponseStatus {
    Error,
    Started,
    Pending,
    Warning,
    Success,
    Unknown(String),
}

impl ResponseStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Error => "error",
            Self::Started => "started",
            Self::Pending => "pending",
            Self::Warning => "warning",
            Self::Success => "success",
            Self::Unknown(raw) => raw,
        }
    }
}

impl Default for ResponseStatus {
    fn default() -> Self {
        Self::Unknown(String::new())
    }
}

impl From<String> for ResponseStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "error" => Self::Error,
            "started" => Self::Started,
            "pending" => Self::Pending,
            "warning" => Self::Warning,
            "success" => Self::Success,
            _ => Self::Unknown(raw),
        }
    }
}

impl From<ResponseStatus> for String {
    fn from(status: ResponseStatus) -> Self {
        match status {
            ResponseStatus::Unknown(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ResponseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `status` as text; nil and empty decode as [`ResponseStatus::default`].
fn status_text<'de, D>(deserializer: D) -> std::result::Result<ResponseStatus, D::Error>
where
    D: serde::Deserializer<'de>,
{
    wire::string(deserializer).map(ResponseStatus::from)
}

/// Envelope returned by every operation.
///
/// `responsedata` depends on the action: a [`SessionObject`] after `login`,
/// a [`DnsRecordSet`] after `infoDnsRecords`, and so on. It is kept as an
/// untyped tree; use [`ResponseMessage::data`] or one of the shortcuts to
/// decode it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseMessage {
    #[serde(default, deserialize_with = "wire::string")]
    pub serverrequestid: String,
    #[serde(default, deserialize_with = "wire::string")]
    pub clientrequestid: String,
    /// Name of the called function.
    #[serde(default, deserialize_with = "wire::string")]
    pub action: String,
    #[serde(default, deserialize_with = "status_text")]
    pub status: ResponseStatus,
    /// e.g. 2011
    #[serde(default, deserialize_with = "wire::u32_or_zero")]
    pub statuscode: u32,
    #[serde(default, deserialize_with = "wire::string")]
    pub shortmessage: String,
    #[serde(default, deserialize_with = "wire::string")]
    pub longmessage: String,
    #[serde(default)]
    pub responsedata: Value,
}

impl ResponseMessage {
    pub fn status(&self) -> &ResponseStatus {
        &self.status
    }

    pub fn is_success(&self) -> bool {
        self.status == ResponseStatus::Success
    }

    /// Decode `responsedata` into `T`.
    pub fn data<T: DeserializeOwned>(&self) -> Result<T> {
        T::deserialize(&self.responsedata).map_err(|e| self.payload_error(e))
    }

    /// Turn an in-band `error` status into [`Error::Api`].
    ///
    /// `warning`, `pending` and `started` pass through.
    pub fn ensure_success(self) -> Result<Self> {
        if self.status == ResponseStatus::Error {
            return Err(Error::Api {
                action: self.action,
                status: self.status.to_string(),
                statuscode: self.statuscode,
                message: if self.longmessage.is_empty() {
                    self.shortmessage
                } else {
                    self.longmessage
                },
            });
        }
        Ok(self)
    }

    /// Session id from a `login` response.
    pub fn session_id(&self) -> Result<String> {
        let session: SessionObject = self.data()?;
        if session.apisessionid.is_empty() {
            return Err(self.payload_error("apisessionid is empty"));
        }
        Ok(session.apisessionid)
    }

    pub fn dns_records(&self) -> Result<DnsRecordSet> {
        self.data()
    }

    pub fn dns_zone(&self) -> Result<DnsZone> {
        self.data()
    }

    /// Messages of a `poll` response; a single message may arrive unwrapped.
    pub fn poll_messages(&self) -> Result<Vec<PollObject>> {
        wire::one_or_many(&self.responsedata).map_err(|e| self.payload_error(e))
    }

    fn payload_error(&self, detail: impl fmt::Display) -> Error {
        Error::Payload {
            action: self.action.clone(),
            detail: detail.to_string(),
        }
    }
}

/// Result of `login`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionObject {
    #[serde(default, deserialize_with = "wire::string")]
    pub apisessionid: String,
}

/// One message returned by `poll`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PollObject {
    #[serde(
        default,
        deserialize_with = "wire::opt_u64",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<u64>,
    #[serde(default, deserialize_with = "wire::string")]
    pub action: String,
    #[serde(default, deserialize_with = "status_text")]
    pub status: ResponseStatus,
    #[serde(default, deserialize_with = "wire::u32_or_zero")]
    pub statuscode: u32,
    #[serde(default, deserialize_with = "wire::string")]
    pub shortmessage: String,
    #[serde(default, deserialize_with = "wire::string")]
    pub longmessage: String,
    #[serde(default, deserialize_with = "wire::string")]
    pub apikey: String,
    #[serde(default, deserialize_with = "wire::string")]
    pub serverrequestid: String,
    #[serde(default, deserialize_with = "wire::string")]
    pub clientrequestid: String,
    #[serde(
        default,
        deserialize_with = "wire::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub requestdatetime: Option<String>,
    #[serde(
        default,
        deserialize_with = "wire::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub domainorhandle: Option<String>,
    #[serde(
        default,
        deserialize_with = "wire::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub messageformat: Option<String>,
    #[serde(default, deserialize_with = "wire::string")]
    pub apisessionid: String,
}

impl PollObject {
    pub fn requested_at(&self) -> Option<NaiveDateTime> {
        self.requestdatetime
            .as_deref()
            .and_then(datetime::parse_datetime)
    }
}

/// Client side request id echoed back in `clientrequestid`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientRequestId(String);

impl ClientRequestId {
    /// Random alphanumeric id (v4 UUID without hyphens).
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ClientRequestId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ClientRequestId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for ClientRequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
