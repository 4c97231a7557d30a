//! Typed operations of the netcup domain web service.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::{RemoteCallError, Result, TransportFault};
use crate::gateway::SoapGateway;
use crate::soap::HttpSoapTransport;
use crate::traits::{SoapParam, SoapTransport};
use crate::types::{DnsRecordSet, DnsZone, ResponseMessage};

/// Remote operation names.
pub mod methods {
    pub const LOGIN: &str = "login";
    pub const LOGOUT: &str = "logout";
    pub const INFO_DNS_RECORDS: &str = "infoDnsRecords";
    pub const UPDATE_DNS_RECORDS: &str = "updateDnsRecords";
    pub const INFO_DNS_ZONE: &str = "infoDnsZone";
    pub const UPDATE_DNS_ZONE: &str = "updateDnsZone";
    pub const POLL: &str = "poll";
}

/// Ordered argument lists of the remote operations.
///
/// The order is the wire contract. An omitted `clientrequestid` is sent as
/// nil, never dropped, so later arguments keep their position.
pub mod params {
    use serde_json::Value;

    use crate::error::TransportFault;
    use crate::traits::SoapParam;
    use crate::types::{DnsRecordSet, DnsZone};

    fn request_id(clientrequestid: Option<&str>) -> SoapParam {
        let value = clientrequestid.map_or(Value::Null, Value::from);
        SoapParam::new("clientrequestid", value)
    }

    pub fn login(
        customernumber: u64,
        apikey: &str,
        apipassword: &str,
        clientrequestid: Option<&str>,
    ) -> Vec<SoapParam> {
        vec![
            SoapParam::new("customernumber", customernumber),
            SoapParam::new("apikey", apikey),
            SoapParam::new("apipassword", apipassword),
            request_id(clientrequestid),
        ]
    }

    pub fn logout(
        customernumber: u64,
        apikey: &str,
        apisessionid: &str,
        clientrequestid: Option<&str>,
    ) -> Vec<SoapParam> {
        vec![
            SoapParam::new("customernumber", customernumber),
            SoapParam::new("apikey", apikey),
            SoapParam::new("apisessionid", apisessionid),
            request_id(clientrequestid),
        ]
    }

    fn domain_call(
        domainname: &str,
        customernumber: u64,
        apikey: &str,
        apisessionid: &str,
        clientrequestid: Option<&str>,
    ) -> Vec<SoapParam> {
        vec![
            SoapParam::new("domainname", domainname),
            SoapParam::new("customernumber", customernumber),
            SoapParam::new("apikey", apikey),
            SoapParam::new("apisessionid", apisessionid),
            request_id(clientrequestid),
        ]
    }

    pub fn info_dns_records(
        domainname: &str,
        customernumber: u64,
        apikey: &str,
        apisessionid: &str,
        clientrequestid: Option<&str>,
    ) -> Vec<SoapParam> {
        domain_call(
            domainname,
            customernumber,
            apikey,
            apisessionid,
            clientrequestid,
        )
    }

    pub fn update_dns_records(
        domainname: &str,
        customernumber: u64,
        apikey: &str,
        apisessionid: &str,
        clientrequestid: Option<&str>,
        dnsrecordset: &DnsRecordSet,
    ) -> Result<Vec<SoapParam>, TransportFault> {
        let mut params = domain_call(
            domainname,
            customernumber,
            apikey,
            apisessionid,
            clientrequestid,
        );
        params.push(SoapParam::encode("dnsrecordset", dnsrecordset)?);
        Ok(params)
    }

    pub fn info_dns_zone(
        domainname: &str,
        customernumber: u64,
        apikey: &str,
        apisessionid: &str,
        clientrequestid: Option<&str>,
    ) -> Vec<SoapParam> {
        domain_call(
            domainname,
            customernumber,
            apikey,
            apisessionid,
            clientrequestid,
        )
    }

    pub fn update_dns_zone(
        domainname: &str,
        customernumber: u64,
        apikey: &str,
        apisessionid: &str,
        clientrequestid: Option<&str>,
        dnszone: &DnsZone,
    ) -> Result<Vec<SoapParam>, TransportFault> {
        let mut params = domain_call(
            domainname,
            customernumber,
            apikey,
            apisessionid,
            clientrequestid,
        );
        params.push(SoapParam::encode("dnszone", dnszone)?);
        Ok(params)
    }

    pub fn poll(
        messagecount: u32,
        customernumber: u64,
        apikey: &str,
        apisessionid: &str,
        clientrequestid: Option<&str>,
    ) -> Vec<SoapParam> {
        vec![
            SoapParam::new("messagecount", messagecount),
            SoapParam::new("customernumber", customernumber),
            SoapParam::new("apikey", apikey),
            SoapParam::new("apisessionid", apisessionid),
            request_id(clientrequestid),
        ]
    }
}

/// Client for the netcup domain web service.
///
/// The transport is created once in [`NetcupClientBuilder::build`] and shared
/// by all clones. The client never stores a session: `login` returns the
/// session id in its response data and the caller passes it on.
///
/// ```rust,no_run
/// use netcup_dns_client::{Credentials, NetcupClient};
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let client = NetcupClient::builder().build()?;
/// let creds = Credentials::from_env()?;
///
/// let login = client
///     .login(creds.customernumber, &creds.apikey, &creds.apipassword, None)
///     .await?
///     .ensure_success()?;
/// let session = login.session_id()?;
///
/// let records = client
///     .info_dns_records("example.com", creds.customernumber, &creds.apikey, &session, None)
///     .await?
///     .dns_records()?;
/// for record in &records {
///     println!("{} {} {}", record.hostname, record.record_type, record.destination);
/// }
///
/// client
///     .logout(creds.customernumber, &creds.apikey, &session, None)
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct NetcupClient {
    gateway: SoapGateway,
}

/// Builder for [`NetcupClient`].
pub struct NetcupClientBuilder {
    config: ClientConfig,
    transport: Option<Arc<dyn SoapTransport>>,
}

impl NetcupClientBuilder {
    fn new() -> Self {
        Self {
            config: ClientConfig::default(),
            transport: None,
        }
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Service description URI (default: netcup's public endpoint).
    pub fn wsdl_uri(mut self, uri: impl Into<String>) -> Self {
        self.config.wsdl_uri = uri.into();
        self
    }

    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.config.endpoint = Some(endpoint.into());
        self
    }

    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.config.namespace = Some(namespace.into());
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout = timeout;
        self
    }

    /// Use a custom transport instead of HTTP. The configuration is ignored.
    pub fn transport(mut self, transport: Arc<dyn SoapTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn build(self) -> Result<NetcupClient> {
        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(HttpSoapTransport::new(&self.config)?),
        };
        Ok(NetcupClient::with_transport(transport))
    }
}

impl NetcupClient {
    pub fn builder() -> NetcupClientBuilder {
        NetcupClientBuilder::new()
    }

    pub fn with_transport(transport: Arc<dyn SoapTransport>) -> Self {
        Self {
            gateway: SoapGateway::new(transport),
        }
    }

    pub fn gateway(&self) -> &SoapGateway {
        &self.gateway
    }

    async fn invoke(
        &self,
        method: &str,
        params: Vec<SoapParam>,
    ) -> std::result::Result<ResponseMessage, RemoteCallError> {
        let value = self.gateway.call(method, params).await?;
        decode_envelope(method, value)
    }

    /// Create an API session. The id is in `responsedata.apisessionid`.
    pub async fn login(
        &self,
        customernumber: u64,
        apikey: &str,
        apipassword: &str,
        clientrequestid: Option<&str>,
    ) -> std::result::Result<ResponseMessage, RemoteCallError> {
        self.invoke(
            methods::LOGIN,
            params::login(customernumber, apikey, apipassword, clientrequestid),
        )
        .await
    }

    /// End an API session.
    pub async fn logout(
        &self,
        customernumber: u64,
        apikey: &str,
        apisessionid: &str,
        clientrequestid: Option<&str>,
    ) -> std::result::Result<ResponseMessage, RemoteCallError> {
        self.invoke(
            methods::LOGOUT,
            params::logout(customernumber, apikey, apisessionid, clientrequestid),
        )
        .await
    }

    /// All records of a zone.
    pub async fn info_dns_records(
        &self,
        domainname: &str,
        customernumber: u64,
        apikey: &str,
        apisessionid: &str,
        clientrequestid: Option<&str>,
    ) -> std::result::Result<ResponseMessage, RemoteCallError> {
        self.invoke(
            methods::INFO_DNS_RECORDS,
            params::info_dns_records(
                domainname,
                customernumber,
                apikey,
                apisessionid,
                clientrequestid,
            ),
        )
        .await
    }

    /// Create, change or delete records. Records missing from the set stay
    /// as they are.
    pub async fn update_dns_records(
        &self,
        domainname: &str,
        customernumber: u64,
        apikey: &str,
        apisessionid: &str,
        clientrequestid: Option<&str>,
        dnsrecordset: &DnsRecordSet,
    ) -> std::result::Result<ResponseMessage, RemoteCallError> {
        let params = params::update_dns_records(
            domainname,
            customernumber,
            apikey,
            apisessionid,
            clientrequestid,
            dnsrecordset,
        )?;
        self.invoke(methods::UPDATE_DNS_RECORDS, params).await
    }

    pub async fn info_dns_zone(
        &self,
        domainname: &str,
        customernumber: u64,
        apikey: &str,
        apisessionid: &str,
        clientrequestid: Option<&str>,
    ) -> std::result::Result<ResponseMessage, RemoteCallError> {
        self.invoke(
            methods::INFO_DNS_ZONE,
            params::info_dns_zone(
                domainname,
                customernumber,
                apikey,
                apisessionid,
                clientrequestid,
            ),
        )
        .await
    }

    pub async fn update_dns_zone(
        &self,
        domainname: &str,
        customernumber: u64,
        apikey: &str,
        apisessionid: &str,
        clientrequestid: Option<&str>,
        dnszone: &DnsZone,
    ) -> std::result::Result<ResponseMessage, RemoteCallError> {
        let params = params::update_dns_zone(
            domainname,
            customernumber,
            apikey,
            apisessionid,
            clientrequestid,
            dnszone,
        )?;
        self.invoke(methods::UPDATE_DNS_ZONE, params).await
    }

    /// Fetch up to `messagecount` messages about asynchronous jobs.
    pub async fn poll(
        &self,
        messagecount: u32,
        customernumber: u64,
        apikey: &str,
        apisessionid: &str,
        clientrequestid: Option<&str>,
    ) -> std::result::Result<ResponseMessage, RemoteCallError> {
        self.invoke(
            methods::POLL,
            params::poll(
                messagecount,
                customernumber,
                apikey,
                apisessionid,
                clientrequestid,
            ),
        )
        .await
    }
}

/// Fields every response message carries.
const ENVELOPE_FIELDS: [&str; 2] = ["action", "status"];

fn decode_envelope(
    method: &str,
    value: Value,
) -> std::result::Result<ResponseMessage, RemoteCallError> {
    let malformed = |detail: String| {
        log::error!("[netcup] {method} returned no response message: {detail}");
        RemoteCallError::from(TransportFault::Malformed {
            detail: format!("{method}: not a response message: {detail}"),
        })
    };

    // 所有字段都有默认值，必须先确认结构
    match &value {
        Value::Object(fields) => {
            if let Some(missing) = ENVELOPE_FIELDS.iter().find(|f| !fields.contains_key(**f)) {
                return Err(malformed(format!("missing field '{missing}'")));
            }
        }
        other => return Err(malformed(format!("expected an object, got {other}"))),
    }

    serde_json::from_value(value).map_err(|e| malformed(e.to_string()))
}
