//! Client configuration and credentials.

use std::fmt;
use std::time::Duration;

use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::utils::log_sanitizer::mask_secret;

/// Service description published by netcup.
pub const DEFAULT_WSDL_URI: &str =
    "https://ccp.netcup.net/run/webservice/servers/endpoint.php?WSDL";

/// 默认连接超时（秒）
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// 默认请求超时（秒）
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

pub const ENV_CUSTOMER_NUMBER: &str = "NETCUP_CUSTOMER_NUMBER";
pub const ENV_API_KEY: &str = "NETCUP_API_KEY";
pub const ENV_API_PASSWORD: &str = "NETCUP_API_PASSWORD";

/// Where and how the HTTP transport talks to the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Service description URI. Calls go to this URI without its query.
    pub wsdl_uri: String,
    /// Call endpoint, overrides the one derived from `wsdl_uri`.
    pub endpoint: Option<String>,
    /// Namespace of the operation element; defaults to the endpoint.
    pub namespace: Option<String>,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            wsdl_uri: DEFAULT_WSDL_URI.to_string(),
            endpoint: None,
            namespace: None,
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    pub fn new(wsdl_uri: impl Into<String>) -> Self {
        Self {
            wsdl_uri: wsdl_uri.into(),
            ..Default::default()
        }
    }

    /// Resolved call endpoint.
    pub fn endpoint(&self) -> Result<String> {
        if let Some(endpoint) = &self.endpoint {
            return parse_http_url(endpoint).map(|url| url.to_string());
        }
        let mut url = parse_http_url(&self.wsdl_uri)?;
        url.set_query(None);
        url.set_fragment(None);
        Ok(url.to_string())
    }

    /// Resolved operation namespace.
    pub fn namespace(&self) -> Result<String> {
        match &self.namespace {
            Some(ns) if !ns.trim().is_empty() => Ok(ns.clone()),
            Some(_) => Err(Error::Config("namespace must not be empty".to_string())),
            None => self.endpoint(),
        }
    }
}

fn parse_http_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).map_err(|e| Error::Config(format!("invalid URL '{raw}': {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(Error::Config(format!(
            "unsupported URL scheme '{other}' in '{raw}'"
        ))),
    }
}

/// API credentials of a customer account.
///
/// The API key and password are created in the customer control panel.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub customernumber: u64,
    pub apikey: String,
    pub apipassword: String,
}

impl Credentials {
    pub fn new(
        customernumber: u64,
        apikey: impl Into<String>,
        apipassword: impl Into<String>,
    ) -> Self {
        Self {
            customernumber,
            apikey: apikey.into(),
            apipassword: apipassword.into(),
        }
    }

    /// Read `NETCUP_CUSTOMER_NUMBER`, `NETCUP_API_KEY` and `NETCUP_API_PASSWORD`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let require = |name: &str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| Error::Config(format!("{name} is not set")))
        };

        let raw_number = require(ENV_CUSTOMER_NUMBER)?;
        let customernumber = raw_number.trim().parse().map_err(|e| {
            Error::Config(format!(
                "{ENV_CUSTOMER_NUMBER} must be a number, got '{raw_number}': {e}"
            ))
        })?;

        Ok(Self {
            customernumber,
            apikey: require(ENV_API_KEY)?,
            apipassword: require(ENV_API_PASSWORD)?,
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("customernumber", &self.customernumber)
            .field("apikey", &mask_secret(&self.apikey))
            .field("apipassword", &"***")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn endpoint_strips_wsdl_query() {
        let config = ClientConfig::default();
        assert_eq!(
            config.endpoint().unwrap(),
            "https://ccp.netcup.net/run/webservice/servers/endpoint.php"
        );
        assert_eq!(config.namespace().unwrap(), config.endpoint().unwrap());
    }

    #[test]
    fn endpoint_and_namespace_overrides() {
        let config = ClientConfig {
            endpoint: Some("http://127.0.0.1:8080/soap".into()),
            namespace: Some("urn:netcup".into()),
            ..Default::default()
        };
        assert_eq!(config.endpoint().unwrap(), "http://127.0.0.1:8080/soap");
        assert_eq!(config.namespace().unwrap(), "urn:netcup");
    }

    #[test]
    fn rejects_invalid_urls() {
        assert!(matches!(
            ClientConfig::new("not a url").endpoint(),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            ClientConfig::new("ftp://example.com/x?WSDL").endpoint(),
            Err(Error::Config(_))
        ));
        let empty_ns = ClientConfig {
            namespace: Some(" ".into()),
            ..Default::default()
        };
        assert!(empty_ns.namespace().is_err());
    }

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn credentials_from_lookup() {
        let creds = Credentials::from_lookup(lookup(&[
            (ENV_CUSTOMER_NUMBER, "12345"),
            (ENV_API_KEY, "apikey123"),
            (ENV_API_PASSWORD, "pw"),
        ]))
        .unwrap();
        assert_eq!(creds, Credentials::new(12345, "apikey123", "pw"));
    }

    #[test]
    fn credentials_missing_or_invalid() {
        let only_number = lookup(&[(ENV_CUSTOMER_NUMBER, "12345")]);
        let err = Credentials::from_lookup(only_number).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid configuration: NETCUP_API_KEY is not set"
        );

        let err = Credentials::from_lookup(lookup(&[
            (ENV_CUSTOMER_NUMBER, "abc"),
            (ENV_API_KEY, "k"),
            (ENV_API_PASSWORD, "p"),
        ]))
        .unwrap_err();
        assert!(matches!(err, Error::Config(msg) if msg.starts_with("NETCUP_CUSTOMER_NUMBER")));
    }

    #[test]
    fn debug_hides_secrets() {
        let creds = Credentials::new(12345, "apikey123", "secret-password");
        let rendered = format!("{creds:?}");
        assert!(rendered.contains("12345"));
        assert!(!rendered.contains("apikey123"));
        assert!(!rendered.contains("secret-password"));
    }
}
