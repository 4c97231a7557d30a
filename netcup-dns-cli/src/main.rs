//! `netcup-dns` command line entry point
//!
//! Logs in, runs one DNS operation, logs out and prints the response
//! envelope as JSON on stdout. Logs go to stderr (`RUST_LOG` controls the
//! level).

mod commands;

use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use netcup_dns_client::{
    ClientRequestId, DEFAULT_WSDL_URI, ENV_API_KEY, ENV_API_PASSWORD, ENV_CUSTOMER_NUMBER,
    NetcupClient, ResponseMessage,
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use commands::{Command, Session};

#[derive(Parser, Debug)]
#[command(author, version, about, rename_all = "kebab-case")]
struct Cli {
    /// netcup customer number
    #[arg(long, env = ENV_CUSTOMER_NUMBER, value_name = "NUMBER")]
    customer_number: u64,
    /// API key from the customer control panel
    #[arg(long, env = ENV_API_KEY, value_name = "KEY", hide_env_values = true)]
    api_key: String,
    /// API password from the customer control panel
    #[arg(
        long,
        env = ENV_API_PASSWORD,
        value_name = "PASSWORD",
        hide_env_values = true
    )]
    api_password: String,
    /// Service description URI
    #[arg(
        long,
        env = "NETCUP_WSDL_URI",
        value_name = "URL",
        default_value = DEFAULT_WSDL_URI
    )]
    wsdl_uri: String,
    /// Call endpoint (defaults to the service description URI without query)
    #[arg(long, env = "NETCUP_ENDPOINT", value_name = "URL")]
    endpoint: Option<String>,
    /// Request timeout in seconds
    #[arg(long, value_name = "SECS", default_value_t = 30)]
    timeout: u64,
    /// Client request id sent with every call (random if omitted)
    #[arg(long, value_name = "ID")]
    client_request_id: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> ExitCode {
    // 日志输出到 stderr，stdout 只输出 JSON
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time()
                .with_ansi(false),
        )
        .with(filter)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(response) => {
            if response.is_success() {
                ExitCode::SUCCESS
            } else {
                tracing::warn!(
                    "{} finished with status {} ({})",
                    response.action,
                    response.status,
                    response.statuscode
                );
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ResponseMessage> {
    let mut builder = NetcupClient::builder()
        .wsdl_uri(&cli.wsdl_uri)
        .request_timeout(Duration::from_secs(cli.timeout));
    if let Some(endpoint) = &cli.endpoint {
        builder = builder.endpoint(endpoint);
    }
    let client = builder.build().context("failed to create client")?;

    let request_id = cli
        .client_request_id
        .map_or_else(ClientRequestId::generate, ClientRequestId::from);
    tracing::info!("client request id: {request_id}");

    let login = client
        .login(
            cli.customer_number,
            &cli.api_key,
            &cli.api_password,
            Some(request_id.as_str()),
        )
        .await
        .context("login failed")?
        .ensure_success()
        .context("login rejected")?;
    let session = Session {
        client: &client,
        customernumber: cli.customer_number,
        apikey: &cli.api_key,
        apisessionid: login.session_id().context("login returned no session")?,
        clientrequestid: request_id.as_str(),
    };

    // 无论操作是否成功都要登出
    let outcome = cli.command.execute(&session).await;
    match session.logout().await {
        Ok(response) if !response.is_success() => tracing::warn!(
            "logout finished with status {}: {}",
            response.status,
            response.shortmessage
        ),
        Ok(_) => tracing::info!("logged out"),
        Err(e) => tracing::warn!("logout failed: {e}"),
    }

    let response = outcome?;
    println!(
        "{}",
        serde_json::to_string_pretty(&response).context("failed to render response")?
    );
    Ok(response)
}
