use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::error::TransportFault;

/// One positional argument of a remote call.
///
/// The name is the parameter name of the remote operation. The RPC envelope
/// needs it to build the element, and logging needs it to redact secrets.
/// The position in the argument list is the only thing that determines
/// parameter order.
#[derive(Debug, Clone, PartialEq)]
pub struct SoapParam {
    /// Remote parameter name, e.g. `customernumber`.
    pub name: String,
    /// Argument value; `Value::Null` for omitted optional arguments.
    pub value: Value,
}

impl SoapParam {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// 将结构体参数序列化为值树
    pub fn encode<T: Serialize>(
        name: impl Into<String>,
        value: &T,
    ) -> Result<Self, TransportFault> {
        let name = name.into();
        let value = serde_json::to_value(value).map_err(|e| TransportFault::Encoding {
            detail: format!("argument '{name}': {e}"),
        })?;
        Ok(Self { name, value })
    }
}

/// Sends one remote procedure call and returns its decoded return value.
///
/// Implementations own serialization, the wire protocol and the connection.
/// Every failure must be reported as a [`TransportFault`]; the gateway turns
/// it into a [`RemoteCallError`](crate::RemoteCallError). Implementations
/// must not retry.
#[async_trait]
pub trait SoapTransport: Send + Sync {
    /// Invoke `method` with `params` in the given order.
    async fn call(&self, method: &str, params: &[SoapParam]) -> Result<Value, TransportFault>;

    /// Where calls go, for logging.
    fn endpoint(&self) -> &str {
        "<custom transport>"
    }
}
