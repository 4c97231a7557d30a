//! # netcup-dns-client
//!
//! Typed async client for the netcup domain reselling / DNS web service
//! (SOAP 1.1, RPC style).
//!
//! ## Operations
//!
//! | Method | Remote operation | Arguments (wire order) |
//! |--------|------------------|------------------------|
//! | [`NetcupClient::login`] | `login` | customernumber, apikey, apipassword, clientrequestid |
//! | [`NetcupClient::logout`] | `logout` | customernumber, apikey, apisessionid, clientrequestid |
//! | [`NetcupClient::info_dns_records`] | `infoDnsRecords` | domainname, customernumber, apikey, apisessionid, clientrequestid |
//! | [`NetcupClient::update_dns_records`] | `updateDnsRecords` | domainname, customernumber, apikey, apisessionid, clientrequestid, dnsrecordset |
//! | [`NetcupClient::info_dns_zone`] | `infoDnsZone` | domainname, customernumber, apikey, apisessionid, clientrequestid |
//! | [`NetcupClient::update_dns_zone`] | `updateDnsZone` | domainname, customernumber, apikey, apisessionid, clientrequestid, dnszone |
//! | [`NetcupClient::poll`] | `poll` | messagecount, customernumber, apikey, apisessionid, clientrequestid |
//!
//! Every operation returns a [`ResponseMessage`]. An in-band `error` status is
//! *not* an `Err`; call [`ResponseMessage::ensure_success`] to turn it into
//! one.
//!
//! ## Feature Flags
//!
//! - **`native-tls`** *(default)*: Use the platform's native TLS implementation.
//! - **`rustls`**: Use rustls.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use netcup_dns_client::{Credentials, DnsRecord, DnsRecordSet, NetcupClient, RecordType};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = NetcupClient::builder().build()?;
//!     let creds = Credentials::from_env()?;
//!
//!     // 1. Log in, keep the session id
//!     let session = client
//!         .login(creds.customernumber, &creds.apikey, &creds.apipassword, None)
//!         .await?
//!         .ensure_success()?
//!         .session_id()?;
//!
//!     // 2. Add a record
//!     let set: DnsRecordSet = vec![DnsRecord::new("www", RecordType::A, "192.0.2.1")].into();
//!     client
//!         .update_dns_records("example.com", creds.customernumber, &creds.apikey, &session, None, &set)
//!         .await?
//!         .ensure_success()?;
//!
//!     // 3. Log out
//!     client
//!         .logout(creds.customernumber, &creds.apikey, &session, None)
//!         .await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Remote operations fail only with [`RemoteCallError`], which carries the
//! fault code and message and keeps the [`TransportFault`] as its source:
//!
//! - [`TransportFault::Fault`]: the service answered with a SOAP fault (e.g. `4013`)
//! - [`TransportFault::Network`] / [`TransportFault::Timeout`]: the request did not complete
//! - [`TransportFault::Http`]: non-success HTTP status without a fault body
//! - [`TransportFault::Malformed`]: the response could not be decoded
//!
//! Calls are made exactly once; nothing is retried.
//!
//! ## Testing
//!
//! [`SoapTransport`] is the seam for tests: build the client with
//! [`NetcupClientBuilder::transport`] and a stub that records the calls.

mod client;
mod config;
mod error;
mod gateway;
mod soap;
mod traits;
mod types;
mod utils;

// Re-export client
pub use client::{NetcupClient, NetcupClientBuilder, methods, params};

// Re-export configuration
pub use config::{ClientConfig, Credentials, DEFAULT_WSDL_URI};
pub use config::{ENV_API_KEY, ENV_API_PASSWORD, ENV_CUSTOMER_NUMBER};

// Re-export error types
pub use error::{Error, RemoteCallError, Result, TransportFault};

pub use gateway::SoapGateway;

// Re-export transport layer
pub use soap::{HttpSoapTransport, decode_response, encode_request};
pub use traits::{SoapParam, SoapTransport};

// Re-export types
pub use types::{
    ClientRequestId, ContactEntries, DnsRecord, DnsRecordSet, DnsZone, DnssecEntries, DnssecEntry,
    DnssecSlots, DnssecType, DomainObject, HandleObject, NameserverEntries, NameserverEntry,
    NameserverSlots, OptionalHandleAttribute, PollObject, RecordType, RegistryContacts,
    ResponseMessage, ResponseStatus, SessionObject, SlotError, SlotLayout, SlotSet,
    TopLevelDomainObject,
};

// Re-export utils module
pub use utils::datetime;
