//! Layered client configuration: TOML file, `PDX_*` environment variables, CLI flags.
//!
//! Every field is optional at load time so sources can be merged with [`ClientConfig::or`];
//! [`ClientConfig::into_parts`] enforces which settings are required.

// std
use std::path::Path;
// self
use crate::{
	_prelude::*,
	auth::{Credentials, Secret},
	error::ConfigError,
	http::DEFAULT_TIMEOUT,
};

/// Environment variable names read by [`ClientConfig::from_env`].
pub mod env {
	/// Token endpoint URL.
	pub const TOKEN_ENDPOINT: &str = "PDX_TOKEN_ENDPOINT";
	/// OAuth client identifier.
	pub const CLIENT_ID: &str = "PDX_CLIENT_ID";
	/// OAuth client secret.
	pub const CLIENT_SECRET: &str = "PDX_CLIENT_SECRET";
	/// Space-separated scope string.
	pub const SCOPE: &str = "PDX_SCOPE";
	/// Base URL of the PDX API.
	pub const API_BASE: &str = "PDX_API_BASE";
	/// Per-request timeout in seconds.
	pub const TIMEOUT_SECS: &str = "PDX_TIMEOUT_SECS";
}

/// Partially specified client settings from one configuration source.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientConfig {
	/// OAuth2 token endpoint.
	pub token_endpoint: Option<String>,
	/// OAuth client identifier.
	pub client_id: Option<String>,
	/// OAuth client secret.
	pub client_secret: Option<Secret>,
	/// Space-separated scope string; the operation's default applies when unset.
	pub scope: Option<String>,
	/// Base URL resource paths are resolved against.
	pub api_base: Option<String>,
	/// Per-request timeout in seconds.
	pub timeout_secs: Option<u64>,
}
impl ClientConfig {
	/// Parses a TOML document.
	pub fn from_toml_str(source: &str) -> Result<Self, toml::de::Error> {
		toml::from_str(source)
	}

	/// Reads and parses the TOML file at `path`.
	pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let path = path.as_ref();
		let source = std::fs::read_to_string(path)
			.map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;

		Self::from_toml_str(&source)
			.map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
	}

	/// Reads the `PDX_*` environment variables.
	pub fn from_env() -> Result<Self, ConfigError> {
		Self::from_vars(|name| std::env::var(name).ok())
	}

	/// Builds a config from any variable lookup; empty values count as unset.
	pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let var = |name: &str| lookup(name).filter(|value: &String| !value.is_empty());
		let timeout_secs = var(env::TIMEOUT_SECS)
			.map(|value| {
				value.trim().parse::<u64>().map_err(|_| ConfigError::InvalidTimeout { value })
			})
			.transpose()?;

		Ok(Self {
			token_endpoint: var(env::TOKEN_ENDPOINT),
			client_id: var(env::CLIENT_ID),
			client_secret: var(env::CLIENT_SECRET).map(Secret::from),
			scope: var(env::SCOPE),
			api_base: var(env::API_BASE),
			timeout_secs,
		})
	}

	/// Fills every unset field from `fallback`.
	pub fn or(self, fallback: Self) -> Self {
		Self {
			token_endpoint: self.token_endpoint.or(fallback.token_endpoint),
			client_id: self.client_id.or(fallback.client_id),
			client_secret: self.client_secret.or(fallback.client_secret),
			scope: self.scope.or(fallback.scope),
			api_base: self.api_base.or(fallback.api_base),
			timeout_secs: self.timeout_secs.or(fallback.timeout_secs),
		}
	}

	/// Validates the merged settings.
	///
	/// `default_scope` applies when no source set a scope.
	pub fn into_parts(self, default_scope: &str) -> Result<ClientParts, ConfigError> {
		let token_endpoint = parse_url("token_endpoint", self.token_endpoint)?;
		let api_base = parse_url("api_base", self.api_base)?;

		if api_base.cannot_be_a_base() {
			return Err(ConfigError::CannotBeABase { url: api_base.to_string() });
		}

		let client_id = self.client_id.ok_or(ConfigError::Missing { field: "client_id" })?;
		let client_secret =
			self.client_secret.ok_or(ConfigError::Missing { field: "client_secret" })?;
		let timeout = match self.timeout_secs {
			Some(0) => return Err(ConfigError::InvalidTimeout { value: "0".into() }),
			Some(secs) => Duration::from_secs(secs),
			None => DEFAULT_TIMEOUT,
		};
		let scope = self.scope.unwrap_or_else(|| default_scope.to_owned());

		Ok(ClientParts {
			credentials: Credentials::new(client_id, client_secret, scope, token_endpoint),
			api_base,
			timeout,
		})
	}
}

/// Validated settings ready to build a [`crate::client::PdxClient`].
#[derive(Clone, Debug)]
pub struct ClientParts {
	/// Token request credentials.
	pub credentials: Credentials,
	/// Base URL resource paths are resolved against.
	pub api_base: Url,
	/// Timeout for both the token request and the API call.
	pub timeout: Duration,
}

fn parse_url(field: &'static str, value: Option<String>) -> Result<Url, ConfigError> {
	let value = value.ok_or(ConfigError::Missing { field })?;

	Url::parse(value.trim()).map_err(|source| ConfigError::InvalidUrl { field, source })
}
