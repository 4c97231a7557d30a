use std::sync::Arc;

use serde_json::Value;

use crate::error::RemoteCallError;
use crate::traits::{SoapParam, SoapTransport};
use crate::utils::log_sanitizer::describe_params;

/// Single entry point for remote calls.
///
/// Holds the transport created when the client was built and forwards every
/// call to it unchanged. Method name and arity are not checked locally; the
/// service reports those. Failures come back as [`RemoteCallError`] with the
/// transport fault kept as the cause. One attempt per call.
#[derive(Clone)]
pub struct SoapGateway {
    transport: Arc<dyn SoapTransport>,
}

impl SoapGateway {
    pub fn new(transport: Arc<dyn SoapTransport>) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &Arc<dyn SoapTransport> {
        &self.transport
    }

    pub async fn call(
        &self,
        method: &str,
        params: Vec<SoapParam>,
    ) -> Result<Value, RemoteCallError> {
        log::debug!(
            "[netcup] {method} -> {} ({})",
            self.transport.endpoint(),
            describe_params(&params)
        );

        match self.transport.call(method, &params).await {
            Ok(value) => Ok(value),
            Err(fault) => {
                if fault.is_remote() {
                    log::warn!("[netcup] {method} failed: {fault}");
                } else {
                    log::error!("[netcup] {method} failed: {fault}");
                }
                Err(RemoteCallError::from(fault))
            }
        }
    }
}

impl std::fmt::Debug for SoapGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SoapGateway")
            .field("endpoint", &self.transport.endpoint())
            .finish()
    }
}
