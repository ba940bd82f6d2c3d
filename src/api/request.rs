//! Resource request model.

// self
use crate::{_prelude::*, api::query, error::ApiError, http::Method};

const JSON_CONTENT_TYPE: &str = "application/json";

/// One authenticated request against a PDX resource endpoint.
///
/// The bearer token is not part of the request; [`crate::api::ApiInvoker::call`] adds it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiRequest {
	/// Request method.
	pub method: Method,
	/// Resource URL; may already carry a query string.
	pub url: Url,
	/// Query pairs appended at dispatch time, in insertion order.
	pub query: Vec<(String, String)>,
	/// Caller-supplied headers, in insertion order.
	pub headers: Vec<(String, String)>,
	/// Raw request body.
	pub body: Option<Vec<u8>>,
}
impl ApiRequest {
	/// Creates a request without query, headers, or body.
	pub fn new(method: Method, url: Url) -> Self {
		Self { method, url, query: Vec::new(), headers: Vec::new(), body: None }
	}

	/// Shorthand for a `GET` request.
	pub fn get(url: Url) -> Self {
		Self::new(Method::Get, url)
	}

	/// Shorthand for a `POST` request.
	pub fn post(url: Url) -> Self {
		Self::new(Method::Post, url)
	}

	/// Appends a query pair.
	pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.query.push((key.into(), value.into()));

		self
	}

	/// Appends a header pair.
	pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.headers.push((name.into(), value.into()));

		self
	}

	/// Sets a raw body; the caller is responsible for the matching `Content-Type`.
	pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
		self.body = Some(body.into());

		self
	}

	/// Serializes `payload` as the JSON body and sets `Content-Type: application/json`.
	///
	/// `serde_json` never escapes `/`, so URLs embedded in payloads stay readable on the wire.
	pub fn json<T>(self, payload: &T) -> Result<Self, ApiError>
	where
		T: ?Sized + Serialize,
	{
		let body = serde_json::to_vec(payload).map_err(|source| ApiError::EncodeBody { source })?;
		let mut request = self.body(body);

		request.headers.retain(|(name, _)| !name.eq_ignore_ascii_case("content-type"));

		Ok(request.header("Content-Type", JSON_CONTENT_TYPE))
	}

	/// Returns the URL with [`ApiRequest::query`] pairs appended.
	pub fn resolved_url(&self) -> Url {
		query::append_query(&self.url, self.query.iter().map(|(key, value)| (key, value)))
	}
}
