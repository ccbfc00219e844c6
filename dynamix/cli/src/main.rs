//! dynamix CLI - send a request to a dynamically built path and pretty-print the response

mod segments;

use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use dynamix_lib::logging::{LogSettings, ResponseLogger};
use dynamix_lib::{
    AsyncClient, Auth, ClientConfig, ClientType, Credentials, DynamixError, HttpMethod,
    Overrides, RequestOptions, Response, SegmentFormat, SyncClient, TransportConfig,
};
use thiserror::Error;

use segments::{SegmentToken, build_path, header_pair, key_value};

#[derive(Parser, Debug)]
#[command(name = "dynamix")]
#[command(about = "Send HTTP requests to chained dynamic paths", long_about = None)]
struct Cli {
    /// Base URL every path is appended to
    #[arg(value_name = "BASE_URL")]
    base_url: String,

    /// Path segments: NAME, NAME=VALUE, NAME@FORMAT or NAME@FORMAT=VALUE
    #[arg(value_name = "SEGMENT", value_parser = SegmentToken::parse)]
    segments: Vec<SegmentToken>,

    /// HTTP method
    #[arg(short = 'X', long, default_value = "GET", value_parser = parse_method)]
    method: HttpMethod,

    /// Default segment case format (unknown values fall back to kebab)
    #[arg(long, default_value = "kebab")]
    format: String,

    /// Render segment RAW as LITERAL (repeatable: --override user_id=userID)
    #[arg(long = "override", value_name = "RAW=LITERAL", value_parser = key_value)]
    overrides: Vec<(String, String)>,

    /// Query parameter (repeatable)
    #[arg(short = 'q', long = "query", value_name = "KEY=VALUE", value_parser = key_value)]
    query: Vec<(String, String)>,

    /// Request header (repeatable)
    #[arg(short = 'H', long = "header", value_name = "NAME:VALUE", value_parser = header_pair)]
    headers: Vec<(String, String)>,

    /// JSON request body
    #[arg(long, value_name = "JSON", conflicts_with = "data")]
    json: Option<String>,

    /// Raw request body
    #[arg(long, value_name = "TEXT")]
    data: Option<String>,

    /// Bearer token
    #[arg(long, env = "DYNAMIX_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// API key
    #[arg(long, env = "DYNAMIX_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Header carrying the API key [default: X-API-Key]
    #[arg(long)]
    api_key_header: Option<String>,

    /// Basic auth username
    #[arg(long, env = "DYNAMIX_USERNAME")]
    username: Option<String>,

    /// Basic auth password
    #[arg(long, env = "DYNAMIX_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Skip TLS certificate verification
    #[arg(long)]
    insecure: bool,

    /// Client flavor: sync or async (unknown values fall back to sync)
    #[arg(long, default_value = "sync")]
    client: String,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', action = clap::ArgAction::Count)]
    log_verbosity: u8,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    /// YAML file with log settings (overrides -v)
    #[arg(long, value_name = "FILE")]
    log_config: Option<String>,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("Invalid --json body: {0}")]
    JsonBody(#[from] serde_json::Error),

    #[error("Failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),

    #[error(transparent)]
    Dynamix(#[from] DynamixError),
}

impl From<dynamix_lib::PathError> for CliError {
    fn from(err: dynamix_lib::PathError) -> Self {
        Self::Dynamix(err.into())
    }
}

impl CliError {
    /// The error response, when the server answered with an error status.
    fn response(&self) -> Option<&Response> {
        match self {
            Self::Dynamix(DynamixError::Client(err)) => err.response(),
            _ => None,
        }
    }
}

fn parse_method(raw: &str) -> Result<HttpMethod, String> {
    raw.parse()
        .map_err(|_| format!("unsupported HTTP method '{raw}'"))
}

/// Initialize tracing from `--log-config`, or from `-v` and `--json-logs`
fn init_tracing(cli: &Cli) {
    let settings = match &cli.log_config {
        Some(path) => match LogSettings::from_yaml_file(path) {
            Ok(settings) => settings,
            Err(e) => {
                eprintln!("Warning: {e}; falling back to -v settings");
                LogSettings::from_verbosity(cli.log_verbosity).json(cli.json_logs)
            }
        },
        None => LogSettings::from_verbosity(cli.log_verbosity).json(cli.json_logs),
    };

    if let Err(e) = settings.install() {
        eprintln!("Warning: {e}");
    }
}

fn client_config(cli: &Cli) -> Result<ClientConfig, CliError> {
    let credentials = Credentials {
        token: cli.token.clone(),
        api_key: cli.api_key.clone(),
        username: cli.username.clone(),
        password: cli.password.clone(),
        api_key_header: cli.api_key_header.clone(),
        ..Credentials::default()
    };

    let mut transport = TransportConfig::new().accept_invalid_certs(cli.insecure);
    if let Some(secs) = cli.timeout {
        transport = transport.timeout(Some(Duration::from_secs(secs)));
    }
    if let Some(auth) = Auth::from_credentials(credentials) {
        transport = transport.auth(auth);
    }

    let overrides: Overrides = cli.overrides.iter().cloned().collect();
    Ok(ClientConfig::new(&cli.base_url)?
        .segment_format(SegmentFormat::parse_or_default(&cli.format))
        .overrides(overrides)
        .transport(transport))
}

fn request_options(cli: &Cli) -> Result<RequestOptions, CliError> {
    let mut options = RequestOptions::new();
    for (key, value) in &cli.query {
        options = options.query(key.as_str(), value);
    }
    for (name, value) in &cli.headers {
        options = options.header(name.as_str(), value.as_str());
    }
    if let Some(raw) = &cli.json {
        let body: serde_json::Value = serde_json::from_str(raw)?;
        options = options.json(body);
    }
    if let Some(data) = &cli.data {
        options = options.body(data.clone());
    }
    Ok(options)
}

fn run_sync(cli: &Cli, config: ClientConfig, options: RequestOptions) -> Result<Response, CliError> {
    let client = SyncClient::from_config(config)?;
    let path = build_path(client.root().path(), &cli.segments)?;
    let response = client.route(path).request(cli.method, options)?;
    client.close();
    Ok(response)
}

fn run_async(cli: &Cli, config: ClientConfig, options: RequestOptions) -> Result<Response, CliError> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async {
        let client = AsyncClient::from_config(config)?;
        let path = build_path(client.root().path(), &cli.segments)?;
        let response = client.route(path).request(cli.method, options).await?;
        client.close().await;
        Ok::<_, CliError>(response)
    })
}

/// Status line, then the body rendered through the formatter registry.
fn print_response(response: &Response) {
    println!("{:?} {}", response.version(), response.status());
    if response.bytes().is_empty() {
        return;
    }
    let content_type = response.content_type().unwrap_or_default().to_ascii_lowercase();
    let body = ResponseLogger::default().format_body(&content_type, response.bytes(), None);
    println!("{body}");
}

fn run(cli: &Cli) -> Result<Response, CliError> {
    let config = client_config(cli)?;
    let options = request_options(cli)?;
    let client_type = ClientType::parse_or_default(&cli.client);
    tracing::info!(%client_type, method = %cli.method, base_url = %cli.base_url, "Sending request");

    match client_type {
        ClientType::Sync => run_sync(cli, config, options),
        ClientType::Async => run_async(cli, config, options),
    }
}

fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(&cli);

    match run(&cli) {
        Ok(response) => {
            print_response(&response);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            if let Some(response) = e.response() {
                eprintln!("{}", response.text());
            }
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_segments_and_options() {
        let cli = Cli::try_parse_from([
            "dynamix",
            "http://x",
            "users",
            "user_id=john",
            "-X",
            "post",
            "-q",
            "page=2",
            "-H",
            "Accept: application/json",
            "--override",
            "user_id=userID",
            "--client",
            "async",
        ])
        .unwrap();

        assert_eq!(cli.method, HttpMethod::Post);
        assert_eq!(cli.segments.len(), 2);
        assert_eq!(cli.query, [("page".to_string(), "2".to_string())]);
        assert_eq!(cli.headers[0].1, "application/json");
        assert_eq!(ClientType::parse_or_default(&cli.client), ClientType::Async);
    }

    #[test]
    fn test_request_options_reject_bad_json() {
        let cli = Cli::try_parse_from(["dynamix", "http://x", "--json", "{nope"]).unwrap();
        assert!(matches!(request_options(&cli), Err(CliError::JsonBody(_))));
    }

    #[test]
    fn test_json_and_data_conflict() {
        let parsed = Cli::try_parse_from(["dynamix", "http://x", "--json", "{}", "--data", "x"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_client_config_uses_lossy_format() {
        let cli = Cli::try_parse_from(["dynamix", "http://x", "--format", "shouty"]).unwrap();
        let config = client_config(&cli).unwrap();
        assert_eq!(config.default_segment_format(), SegmentFormat::Kebab);
    }
}
