//! Token-then-call facade over [`TokenProvider`] and [`ApiInvoker`].

// self
use crate::{
	_prelude::*,
	api::{ApiInvoker, ApiRequest, ApiResponse},
	auth::Credentials,
	flows::TokenProvider,
	http::HttpTransport,
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport.
pub type ReqwestPdxClient = PdxClient<ReqwestHttpClient>;

/// Pairs one credential set with a token provider and an API invoker sharing a transport.
///
/// Every [`PdxClient::execute`] fetches a fresh token and spends it on that single request;
/// tokens are never cached or reused.
pub struct PdxClient<C>
where
	C: ?Sized + HttpTransport,
{
	/// Client credentials used for every token request.
	pub credentials: Credentials,
	/// Token acquisition component.
	pub token_provider: TokenProvider<C>,
	/// Authenticated call component.
	pub invoker: ApiInvoker<C>,
}
impl<C> PdxClient<C>
where
	C: ?Sized + HttpTransport,
{
	/// Creates a client whose provider and invoker share `http_client`.
	pub fn with_http_client(credentials: Credentials, http_client: impl Into<Arc<C>>) -> Self {
		let http_client = http_client.into();

		Self {
			credentials,
			token_provider: TokenProvider::with_http_client(Arc::clone(&http_client)),
			invoker: ApiInvoker::with_http_client(http_client),
		}
	}

	/// Applies `timeout` to both the token request and the API call.
	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.token_provider.timeout = timeout;
		self.invoker.timeout = timeout;

		self
	}

	/// Fetches a token, then issues `request` with it.
	///
	/// Fails with [`Error::Auth`] before any resource request is sent when the token cannot be
	/// obtained, or with [`Error::Api`] when the call itself fails.
	pub async fn execute(&self, request: ApiRequest) -> Result<ApiResponse> {
		let token = self.token_provider.fetch_token(&self.credentials).await?;

		Ok(self.invoker.call(token, request).await?)
	}
}
#[cfg(feature = "reqwest")]
impl PdxClient<ReqwestHttpClient> {
	/// Creates a client backed by a default reqwest transport.
	pub fn new(credentials: Credentials) -> Self {
		Self::with_http_client(credentials, ReqwestHttpClient::default())
	}
}
impl<C> Debug for PdxClient<C>
where
	C: ?Sized + HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("PdxClient")
			.field("credentials", &self.credentials)
			.field("timeout", &self.invoker.timeout)
			.finish()
	}
}
