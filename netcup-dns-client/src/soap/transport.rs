//! HTTP transport: one POST per call, no retries.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;

use super::decode::decode_response;
use super::envelope::encode_request;
use crate::config::ClientConfig;
use crate::error::{Error, Result, TransportFault};
use crate::traits::{SoapParam, SoapTransport};
use crate::utils::log_sanitizer::{redact_xml, truncate_for_log};

const CONTENT_TYPE_XML: &str = "text/xml; charset=utf-8";

/// Redacted and truncated form of a request or response body.
fn loggable(xml: &str) -> String {
    truncate_for_log(&redact_xml(xml))
}

/// 创建带超时配置的 HTTP Client
pub(crate) fn create_http_client(config: &ClientConfig) -> Result<Client> {
    Client::builder()
        .connect_timeout(config.connect_timeout)
        .timeout(config.request_timeout)
        .build()
        .map_err(|e| Error::Config(format!("failed to create HTTP client: {e}")))
}

/// [`SoapTransport`] speaking SOAP 1.1 over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpSoapTransport {
    client: Client,
    endpoint: String,
    namespace: String,
}

impl HttpSoapTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Ok(Self {
            client: create_http_client(config)?,
            endpoint: config.endpoint()?,
            namespace: config.namespace()?,
        })
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    fn soap_action(&self, method: &str) -> String {
        format!("\"{}#{method}\"", self.namespace)
    }

    /// Send the envelope, return status code and body text.
    async fn execute(
        &self,
        method: &str,
        body: String,
    ) -> std::result::Result<(u16, String), TransportFault> {
        log::debug!("[soap] POST {} ({method})", self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, CONTENT_TYPE_XML)
            .header("SOAPAction", self.soap_action(method))
            .body(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TransportFault::Timeout {
                        detail: e.to_string(),
                    }
                } else {
                    TransportFault::Network {
                        detail: e.to_string(),
                    }
                }
            })?;

        let status_code = response.status().as_u16();
        log::debug!("[soap] Response Status: {status_code}");

        let response_text = response.text().await.map_err(|e| {
            if e.is_timeout() {
                TransportFault::Timeout {
                    detail: e.to_string(),
                }
            } else {
                TransportFault::Network {
                    detail: format!("Failed to read response body: {e}"),
                }
            }
        })?;

        log::debug!("[soap] Response Body: {}", loggable(&response_text));

        Ok((status_code, response_text))
    }
}

#[async_trait]
impl SoapTransport for HttpSoapTransport {
    async fn call(
        &self,
        method: &str,
        params: &[SoapParam],
    ) -> std::result::Result<Value, TransportFault> {
        let envelope = encode_request(&self.namespace, method, params)?;
        log::trace!("[soap] Request: {}", loggable(&envelope));

        let (status, text) = self.execute(method, envelope).await?;
        let success = (200..300).contains(&status);

        // 无论 HTTP 状态码如何，SOAP Fault 优先
        match decode_response(&text) {
            Ok(value) if success => Ok(value),
            Err(fault @ TransportFault::Fault { .. }) => Err(fault),
            Err(e) if success => {
                log::error!("[soap] Undecodable response: {e}");
                Err(e)
            }
            Ok(_) | Err(_) => Err(TransportFault::Http {
                status,
                body: loggable(&text),
            }),
        }
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}
