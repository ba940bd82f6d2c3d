//! Resource response model and rendering.

// crates.io
use serde::de::DeserializeOwned;
use serde_json::Value;
// self
use crate::{_prelude::*, error::ApiError, http::HttpResponse};

/// Immutable result of one authenticated request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ApiResponse {
	/// HTTP status code.
	pub status: u16,
	/// Response headers keyed by lowercase name.
	pub headers: BTreeMap<String, String>,
	/// Raw response body, exactly as received.
	pub body: Vec<u8>,
}
impl ApiResponse {
	/// Returns true for statuses in `[200, 300)`.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}

	/// Returns a header value by case-insensitive name.
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
	}

	/// Returns the body decoded lossily as UTF-8.
	pub fn text(&self) -> String {
		String::from_utf8_lossy(&self.body).into_owned()
	}

	/// Decodes the body into `T`, reporting the JSON path of the first mismatch.
	pub fn json<T>(&self) -> Result<T, ApiError>
	where
		T: DeserializeOwned,
	{
		let mut deserializer = serde_json::Deserializer::from_slice(&self.body);

		serde_path_to_error::deserialize(&mut deserializer)
			.map_err(|source| ApiError::Decode { source, body: self.text() })
	}

	/// Renders the body for display: pretty JSON when it parses, raw text otherwise.
	pub fn render(&self) -> String {
		pretty_json(&self.body).unwrap_or_else(|| self.text())
	}
}
impl From<HttpResponse> for ApiResponse {
	fn from(response: HttpResponse) -> Self {
		let HttpResponse { status, headers, body } = response;

		Self { status, headers, body }
	}
}

/// Pretty-prints `body` with 2-space indentation if it is valid JSON.
///
/// Object keys keep the order the server sent them in. Slashes and non-ASCII characters are
/// emitted verbatim. Indentation is fixed at two spaces to match the output of the reference
/// scripts (`json.dumps(indent=2)`); four-space layouts are not produced.
pub fn pretty_json(body: &[u8]) -> Option<String> {
	let value = serde_json::from_slice::<Value>(body).ok()?;

	serde_json::to_string_pretty(&value).ok()
}
