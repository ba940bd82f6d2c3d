//! Client-level error types shared by the token provider, the API invoker, and configuration.

// std
use std::path::PathBuf;
// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Token acquisition failed.
	#[error(transparent)]
	Auth(#[from] AuthError),
	/// The authenticated call failed.
	#[error(transparent)]
	Api(#[from] ApiError),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
}
impl Error {
	/// HTTP status returned by the remote side, when it answered at all.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Auth(AuthError::Status { status, .. })
			| Self::Api(ApiError::Status { status, .. }) => Some(*status),
			_ => None,
		}
	}
}

/// Failures raised while obtaining an access token.
#[derive(Debug, ThisError)]
pub enum AuthError {
	/// Token endpoint unreachable (DNS, TCP, TLS, timeout).
	#[error("Network error occurred while calling the token endpoint.")]
	Transport {
		/// Transport-specific failure.
		#[source]
		source: BoxError,
	},
	/// Token endpoint answered outside the 2xx range.
	#[error("Token endpoint returned HTTP {status}: {body}")]
	Status {
		/// HTTP status code.
		status: u16,
		/// Raw response body, decoded lossily as UTF-8.
		body: String,
	},
	/// Token endpoint answered 2xx with a body that is not the expected JSON.
	#[error("Token endpoint returned malformed JSON: {body}")]
	MalformedResponse {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// Raw response body, decoded lossily as UTF-8.
		body: String,
	},
	/// Token endpoint answered 2xx JSON without a usable `access_token`.
	#[error("Token endpoint response has no usable access_token: {body}")]
	MissingAccessToken {
		/// Raw response body, decoded lossily as UTF-8.
		body: String,
	},
}
impl AuthError {
	/// Wraps a transport-specific network error.
	pub fn transport(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Transport { source: Box::new(src) }
	}
}

/// Failures raised by authenticated API calls.
#[derive(Debug, ThisError)]
pub enum ApiError {
	/// Target endpoint unreachable (DNS, TCP, TLS, timeout).
	#[error("Network error occurred while calling the target endpoint.")]
	Transport {
		/// Transport-specific failure.
		#[source]
		source: BoxError,
	},
	/// Target endpoint answered outside the 2xx range.
	#[error("Target endpoint returned HTTP {status}: {body}")]
	Status {
		/// HTTP status code.
		status: u16,
		/// Raw response body, decoded lossily as UTF-8.
		body: String,
	},
	/// Request payload could not be serialized.
	#[error("Request body could not be encoded as JSON.")]
	EncodeBody {
		/// Underlying serializer failure.
		#[source]
		source: serde_json::Error,
	},
	/// Response body does not match the requested type.
	#[error("Response body could not be decoded: {body}")]
	Decode {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// Raw response body, decoded lossily as UTF-8.
		body: String,
	},
}
impl ApiError {
	/// Wraps a transport-specific network error.
	pub fn transport(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Transport { source: Box::new(src) }
	}
}

/// Configuration and validation failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// A required setting was not supplied by any source.
	#[error("Missing required setting `{field}`.")]
	Missing {
		/// Setting name.
		field: &'static str,
	},
	/// A URL setting cannot be parsed.
	#[error("Setting `{field}` is not a valid URL.")]
	InvalidUrl {
		/// Setting name.
		field: &'static str,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// A URL cannot carry path segments (e.g. `mailto:`).
	#[error("URL `{url}` cannot be used as an API base.")]
	CannotBeABase {
		/// Offending URL.
		url: String,
	},
	/// Timeout setting is zero or not a number.
	#[error("Timeout must be a positive number of seconds, got `{value}`.")]
	InvalidTimeout {
		/// Raw value as supplied.
		value: String,
	},
	/// Config file could not be read.
	#[error("Failed to read config file `{}`.", .path.display())]
	ReadFile {
		/// File path.
		path: PathBuf,
		/// Underlying I/O failure.
		#[source]
		source: std::io::Error,
	},
	/// Config file is not valid TOML for [`crate::config::ClientConfig`].
	#[error("Failed to parse config file `{}`.", .path.display())]
	ParseFile {
		/// File path.
		path: PathBuf,
		/// Underlying TOML failure.
		#[source]
		source: toml::de::Error,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn status_errors_embed_code_and_body() {
		let err: Error =
			AuthError::Status { status: 401, body: "{\"error\":\"invalid_client\"}".into() }.into();

		assert_eq!(err.status(), Some(401));
		assert_eq!(
			err.to_string(),
			"Token endpoint returned HTTP 401: {\"error\":\"invalid_client\"}"
		);

		let err: Error = ApiError::Status { status: 500, body: "boom".into() }.into();

		assert_eq!(err.status(), Some(500));
		assert!(err.to_string().contains("500"));
		assert!(err.to_string().contains("boom"));
	}

	#[test]
	fn config_errors_have_no_status() {
		let err: Error = ConfigError::Missing { field: "client_id" }.into();

		assert_eq!(err.status(), None);
		assert_eq!(err.to_string(), "Missing required setting `client_id`.");
	}
}
