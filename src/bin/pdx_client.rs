//! `pdx-client`: fetch one client-credentials token, make one authenticated PDX call, print the
//! answer.
//!
//! Every connection setting can come from a flag, a `PDX_*` environment variable, or a TOML file
//! passed with `--config`, in that order of precedence.
//!
//! ```bash
//! pdx-client --config pdx.toml country FR
//! PDX_CLIENT_SECRET=... pdx-client --config pdx.toml add-measurements \
//!     --member-uid 1234 --connection-id 1234-45678 --member-key ABC measurements.json
//! pdx-client --config pdx.toml call post /identify --body '{"connection_nid":"1"}'
//! ```

// std
use std::path::PathBuf;
// crates.io
use clap::{ArgAction, Args, Parser, Subcommand};
use color_eyre::{
	Result,
	eyre::{WrapErr, eyre},
};
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};
// self
use pdx_client::{
	api::ApiRequest,
	auth::Secret,
	client::PdxClient,
	config::{ClientConfig, ClientParts},
	http::Method,
	resource::{self, IdentifyRequest, Measurement, MemberConnection},
	url::Url,
};

/// One token, one authenticated call against a personal-data-store API.
#[derive(Debug, Parser)]
#[command(name = "pdx-client", author, version, about, long_about = None)]
struct Cli {
	#[command(flatten)]
	connection: ConnectionArgs,

	/// Increase log verbosity (stderr); repeat for trace output
	#[arg(long, short = 'v', global = true, action = ArgAction::Count)]
	verbose: u8,

	#[command(subcommand)]
	command: Command,
}

#[derive(Debug, Args)]
struct ConnectionArgs {
	/// TOML file supplying fallbacks for every connection setting
	#[arg(long, env = "PDX_CONFIG", global = true, value_name = "FILE")]
	config: Option<PathBuf>,

	/// OAuth2 token endpoint URL [fallback: PDX_TOKEN_ENDPOINT]
	#[arg(long, global = true)]
	token_endpoint: Option<String>,

	/// OAuth client identifier [fallback: PDX_CLIENT_ID]
	#[arg(long, global = true)]
	client_id: Option<String>,

	/// OAuth client secret [fallback: PDX_CLIENT_SECRET]
	#[arg(long, global = true)]
	client_secret: Option<String>,

	/// Scope string for the token request; defaults to the subcommand's scope [fallback: PDX_SCOPE]
	#[arg(long, global = true)]
	scope: Option<String>,

	/// Base URL of the PDX API [fallback: PDX_API_BASE]
	#[arg(long, global = true)]
	api_base: Option<String>,

	/// Timeout in seconds for the token request and the API call [fallback: PDX_TIMEOUT_SECS]
	#[arg(long, global = true)]
	timeout_secs: Option<u64>,
}
impl ConnectionArgs {
	fn resolve(self, default_scope: &str) -> Result<ClientParts> {
		let flags = ClientConfig {
			token_endpoint: self.token_endpoint,
			client_id: self.client_id,
			client_secret: self.client_secret.map(Secret::from),
			scope: self.scope,
			api_base: self.api_base,
			timeout_secs: self.timeout_secs,
		};
		let merged = flags.or(ClientConfig::from_env()?);
		let merged = match self.config {
			Some(path) => merged.or(ClientConfig::load(path)?),
			None => merged,
		};

		Ok(merged.into_parts(default_scope)?)
	}
}

#[derive(Debug, Subcommand)]
enum Command {
	/// Append measurement records to a member's data store
	AddMeasurements {
		/// Member identifier (`uid`)
		#[arg(long, env = "PDX_MEMBER_UID")]
		member_uid: String,

		/// Connection identifier (`con_id`)
		#[arg(long, env = "PDX_CONNECTION_ID")]
		connection_id: String,

		/// Member key sent in the `Connection-Token` header
		#[arg(long, env = "PDX_MEMBER_KEY", hide_env_values = true)]
		member_key: String,

		/// JSON file holding an array of measurement records
		#[arg(value_name = "FILE")]
		measurements: PathBuf,
	},
	/// Start the member-linking handshake for a connection
	Identify {
		/// Connection node identifier
		#[arg(long)]
		connection_nid: String,

		/// Connection token; only its SHA-512 digest is sent
		#[arg(long, env = "PDX_CONNECTION_TOKEN", hide_env_values = true)]
		connection_token: String,

		/// URL the member is sent back to
		#[arg(long)]
		return_to: String,

		/// Linking token from a previous handshake
		#[arg(long)]
		linking_token: Option<String>,
	},
	/// Look up a country record
	Country {
		/// Country code
		code: String,

		/// Value of the `X-Mrd-Scopes` header
		#[arg(long, default_value = resource::COUNTRIES_SCOPE)]
		scopes: String,
	},
	/// Issue an arbitrary authenticated request
	Call {
		/// HTTP method
		method: Method,

		/// Path relative to the API base, or an absolute URL
		path: String,

		/// Query pair, `key=value`; repeatable
		#[arg(long = "query", short = 'q', value_name = "KEY=VALUE", action = ArgAction::Append)]
		query: Vec<String>,

		/// Header, `Name: value`; repeatable
		#[arg(long = "header", short = 'H', value_name = "NAME: VALUE", action = ArgAction::Append)]
		header: Vec<String>,

		/// JSON request body
		#[arg(long)]
		body: Option<String>,
	},
}
impl Command {
	fn default_scope(&self) -> &'static str {
		match self {
			Command::AddMeasurements { .. } => resource::ADD_MEASUREMENTS_SCOPE,
			Command::Identify { .. } => resource::IDENTIFY_SCOPE,
			Command::Country { .. } => resource::COUNTRIES_SCOPE,
			Command::Call { .. } => "",
		}
	}

	fn into_request(self, api_base: &Url) -> Result<ApiRequest> {
		let request = match self {
			Command::AddMeasurements { member_uid, connection_id, member_key, measurements } => {
				let raw = std::fs::read(&measurements).wrap_err_with(|| {
					format!("Failed to read measurements from `{}`.", measurements.display())
				})?;
				let records =
					serde_json::from_slice::<Vec<Measurement>>(&raw).wrap_err_with(|| {
						format!("`{}` is not a JSON array of measurements.", measurements.display())
					})?;
				let connection = MemberConnection::new(member_uid, connection_id, member_key);

				resource::add_measurements(api_base, &connection, &records)?
			},
			Command::Identify { connection_nid, connection_token, return_to, linking_token } => {
				let mut payload =
					IdentifyRequest::new(connection_nid, &connection_token, return_to);

				if let Some(linking_token) = linking_token {
					payload = payload.with_linking_token(linking_token);
				}

				resource::identify(api_base, &payload)?
			},
			Command::Country { code, scopes } => resource::country(api_base, &code, &scopes)?,
			Command::Call { method, path, query, header, body } => {
				let mut request = ApiRequest::new(method, resolve_path(api_base, &path)?);

				for pair in query {
					let (key, value) = pair
						.split_once('=')
						.ok_or_else(|| eyre!("Query `{pair}` is not in `key=value` form."))?;

					request = request.query(key, value);
				}
				for line in header {
					let (name, value) = line
						.split_once(':')
						.ok_or_else(|| eyre!("Header `{line}` is not in `Name: value` form."))?;

					request = request.header(name.trim(), value.trim());
				}
				if let Some(body) = body {
					let payload = serde_json::from_str::<serde_json::Value>(&body)
						.wrap_err("Request body is not valid JSON.")?;

					request = request.json(&payload)?;
				}

				request
			},
		};

		Ok(request)
	}
}

fn resolve_path(api_base: &Url, path: &str) -> Result<Url> {
	if path.starts_with("http://") || path.starts_with("https://") {
		return Ok(Url::parse(path)?);
	}

	let segments = path.split('/').filter(|segment| !segment.is_empty()).collect::<Vec<_>>();

	Ok(resource::endpoint(api_base, &segments)?)
}

fn init_tracing(verbose: u8) {
	let filter = match verbose {
		0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
		1 => EnvFilter::new("pdx_client=debug"),
		_ => EnvFilter::new("trace"),
	};
	let span_events = if verbose > 0 { FmtSpan::CLOSE } else { FmtSpan::NONE };

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_span_events(span_events)
		.with_writer(std::io::stderr)
		.init();
}

fn main() -> Result<()> {
	color_eyre::install()?;

	let Cli { connection, verbose, command } = Cli::parse();

	init_tracing(verbose);

	let ClientParts { credentials, api_base, timeout } =
		connection.resolve(command.default_scope())?;
	let request = command.into_request(&api_base)?;
	let client = PdxClient::new(credentials).with_timeout(timeout);
	let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
	let response = runtime.block_on(client.execute(request))?;

	println!("{}", response.render());

	Ok(())
}
