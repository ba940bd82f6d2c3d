//! Grant flows that obtain PDX access tokens.

mod client_credentials;

pub use client_credentials::*;

// self
use crate::{
	_prelude::*,
	http::{DEFAULT_TIMEOUT, HttpTransport},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

/// Acquires bearer tokens from an OAuth 2.0 client-credentials endpoint.
///
/// The provider is stateless apart from its transport handle: every call to
/// [`TokenProvider::fetch_token`] performs exactly one token request, with no caching and no
/// retry.
pub struct TokenProvider<C>
where
	C: ?Sized + HttpTransport,
{
	/// HTTP transport used for token requests.
	pub http_client: Arc<C>,
	/// Per-request timeout.
	pub timeout: Duration,
}
impl<C> TokenProvider<C>
where
	C: ?Sized + HttpTransport,
{
	/// Creates a provider that reuses the caller-provided transport.
	pub fn with_http_client(http_client: impl Into<Arc<C>>) -> Self {
		Self { http_client: http_client.into(), timeout: DEFAULT_TIMEOUT }
	}

	/// Overrides the per-request timeout (defaults to 60 seconds).
	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;

		self
	}
}
#[cfg(feature = "reqwest")]
impl TokenProvider<ReqwestHttpClient> {
	/// Creates a provider backed by a default reqwest client.
	pub fn new() -> Self {
		Self::with_http_client(ReqwestHttpClient::default())
	}
}
#[cfg(feature = "reqwest")]
impl Default for TokenProvider<ReqwestHttpClient> {
	fn default() -> Self {
		Self::new()
	}
}
impl<C> Clone for TokenProvider<C>
where
	C: ?Sized + HttpTransport,
{
	fn clone(&self) -> Self {
		Self { http_client: Arc::clone(&self.http_client), timeout: self.timeout }
	}
}
impl<C> Debug for TokenProvider<C>
where
	C: ?Sized + HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenProvider").field("timeout", &self.timeout).finish()
	}
}
