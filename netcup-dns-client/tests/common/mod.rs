//! 共享测试工具和辅助函数

#![allow(dead_code)]

use std::collections::VecDeque;
use std::env;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use netcup_dns_client::{Credentials, NetcupClient, SoapParam, SoapTransport, TransportFault};
use serde_json::{Value, json};

/// 跳过测试的宏（当环境变量缺失时）
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("跳过测试: 缺少环境变量 {}", $var);
                return;
            }
        )+
    };
}

/// 断言 `Option` 为 `Some`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_some {
    ($expr:expr $(,)?) => {{
        let opt = $expr;
        assert!(opt.is_some(), "expected Some(..), got None");
        let Some(val) = opt else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let opt = $expr;
        assert!(opt.is_some(), "{}", format_args!($($msg)+));
        let Some(val) = opt else {
            return;
        };
        val
    }};
}

/// 断言 `Result` 为 `Ok`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// One call as seen by the stub.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: String,
    pub params: Vec<SoapParam>,
}

impl RecordedCall {
    pub fn names(&self) -> Vec<&str> {
        self.params.iter().map(|p| p.name.as_str()).collect()
    }

    pub fn values(&self) -> Vec<Value> {
        self.params.iter().map(|p| p.value.clone()).collect()
    }
}

/// Transport that records every call and answers from a queue.
///
/// When the queue is empty it answers with [`success_envelope`].
#[derive(Default)]
pub struct StubTransport {
    calls: Mutex<Vec<RecordedCall>>,
    replies: Mutex<VecDeque<Result<Value, TransportFault>>>,
}

impl StubTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn reply(&self, reply: Result<Value, TransportFault>) {
        if let Ok(mut replies) = self.replies.lock() {
            replies.push_back(reply);
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn last_call(&self) -> Option<RecordedCall> {
        self.calls().pop()
    }
}

#[async_trait]
impl SoapTransport for StubTransport {
    async fn call(&self, method: &str, params: &[SoapParam]) -> Result<Value, TransportFault> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(RecordedCall {
                method: method.to_string(),
                params: params.to_vec(),
            });
        }
        let next = self.replies.lock().ok().and_then(|mut r| r.pop_front());
        next.unwrap_or_else(|| Ok(success_envelope(method, Value::Null)))
    }

    fn endpoint(&self) -> &str {
        "stub://netcup"
    }
}

/// Client wired to a fresh stub.
pub fn stub_client() -> (NetcupClient, Arc<StubTransport>) {
    let stub = StubTransport::new();
    let client = NetcupClient::builder()
        .transport(stub.clone())
        .build()
        .unwrap_or_else(|e| panic!("building a stub client cannot fail: {e}"));
    (client, stub)
}

/// Response envelope with status `success` and code 2000.
pub fn success_envelope(action: &str, responsedata: Value) -> Value {
    json!({
        "serverrequestid": "srv-0001",
        "clientrequestid": "",
        "action": action,
        "status": "success",
        "statuscode": 2000,
        "shortmessage": format!("{action} successful"),
        "longmessage": "",
        "responsedata": responsedata
    })
}

/// 集成测试上下文 - 凭证和测试域名
pub struct LiveContext {
    pub client: NetcupClient,
    pub credentials: Credentials,
    pub domain: String,
}

impl LiveContext {
    pub fn from_env() -> Option<Self> {
        let credentials = Credentials::from_env().ok()?;
        let domain = env::var("TEST_DOMAIN").ok()?;
        let client = NetcupClient::builder().build().ok()?;
        Some(Self {
            client,
            credentials,
            domain,
        })
    }

    /// 登录并返回 session id
    pub async fn login(&self) -> Option<String> {
        let response = self
            .client
            .login(
                self.credentials.customernumber,
                &self.credentials.apikey,
                &self.credentials.apipassword,
                None,
            )
            .await
            .ok()?;
        response.session_id().ok()
    }

    pub async fn logout(&self, session: &str) {
        let _ = self
            .client
            .logout(
                self.credentials.customernumber,
                &self.credentials.apikey,
                session,
                None,
            )
            .await;
    }
}

/// 生成唯一的测试记录名称
pub fn generate_test_record_name() -> String {
    let uuid = uuid::Uuid::new_v4();
    format!("_test-{}", &uuid.to_string()[..8])
}
