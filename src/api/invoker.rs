//! Single-shot authenticated calls.
//!
//! [`ApiInvoker::call`] consumes an [`AccessToken`], resolves the request's query pairs, sets
//! `Authorization: Bearer <token>` ahead of the caller's headers, and dispatches once. A status
//! outside `[200, 300)` becomes [`ApiError::Status`] with the raw body attached.

// self
use crate::{
	_prelude::*,
	api::{ApiRequest, ApiResponse},
	auth::AccessToken,
	error::ApiError,
	http::{DEFAULT_TIMEOUT, HttpRequest, HttpTransport},
	obs::{CallKind, CallSpan},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

/// Issues authenticated requests against resource endpoints.
pub struct ApiInvoker<C>
where
	C: ?Sized + HttpTransport,
{
	/// HTTP transport used for resource requests.
	pub http_client: Arc<C>,
	/// Per-request timeout.
	pub timeout: Duration,
}
impl<C> ApiInvoker<C>
where
	C: ?Sized + HttpTransport,
{
	/// Creates an invoker that reuses the caller-provided transport.
	pub fn with_http_client(http_client: impl Into<Arc<C>>) -> Self {
		Self { http_client: http_client.into(), timeout: DEFAULT_TIMEOUT }
	}

	/// Overrides the per-request timeout (defaults to 60 seconds).
	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;

		self
	}

	/// Spends `token` on exactly one request and returns the response unchanged.
	pub async fn call(
		&self,
		token: AccessToken,
		request: ApiRequest,
	) -> Result<ApiResponse, ApiError> {
		let span = CallSpan::new(CallKind::Api, "call");
		let result = span
			.instrument(async {
				let request = authorize(token, request, self.timeout);
				let response =
					self.http_client.execute(request).await.map_err(ApiError::transport)?;

				span.record_status(response.status);

				if !response.is_success() {
					return Err(ApiError::Status { status: response.status, body: response.text() });
				}

				Ok(ApiResponse::from(response))
			})
			.await;

		span.finish(result.is_ok());

		result
	}
}
#[cfg(feature = "reqwest")]
impl ApiInvoker<ReqwestHttpClient> {
	/// Creates an invoker backed by a default reqwest client.
	pub fn new() -> Self {
		Self::with_http_client(ReqwestHttpClient::default())
	}
}
#[cfg(feature = "reqwest")]
impl Default for ApiInvoker<ReqwestHttpClient> {
	fn default() -> Self {
		Self::new()
	}
}
impl<C> Clone for ApiInvoker<C>
where
	C: ?Sized + HttpTransport,
{
	fn clone(&self) -> Self {
		Self { http_client: Arc::clone(&self.http_client), timeout: self.timeout }
	}
}
impl<C> Debug for ApiInvoker<C>
where
	C: ?Sized + HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ApiInvoker").field("timeout", &self.timeout).finish()
	}
}

/// Turns an [`ApiRequest`] into a transport request carrying the bearer token.
///
/// Caller-supplied `Authorization` headers are dropped so the token always wins.
pub(crate) fn authorize(
	token: AccessToken,
	request: ApiRequest,
	timeout: Duration,
) -> HttpRequest {
	let url = request.resolved_url();
	let ApiRequest { method, headers, body, .. } = request;
	let mut prepared =
		HttpRequest::new(method, url).header("Authorization", token.bearer()).timeout(timeout);

	for (name, value) in headers {
		if name.eq_ignore_ascii_case("authorization") {
			continue;
		}

		prepared = prepared.header(name, value);
	}
	if let Some(body) = body {
		prepared = prepared.body(body);
	}

	prepared
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{_preludet::*, http::Method};

	fn measurements_request() -> ApiRequest {
		ApiRequest::post(
			Url::parse("https://api.example.com/api/pds/add-measurements")
				.expect("Failed to parse test URL."),
		)
		.query("uid", "1234")
		.query("con_id", "1234-45678")
		.header("Connection-Token", "member-key")
		.header("Authorization", "Basic should-be-dropped")
		.body(b"[]".to_vec())
	}

	#[test]
	fn authorize_sets_bearer_and_keeps_caller_headers() {
		let prepared =
			authorize(AccessToken::new("tok123"), measurements_request(), Duration::from_secs(60));

		assert_eq!(prepared.method, Method::Post);
		assert_eq!(
			prepared.url.as_str(),
			"https://api.example.com/api/pds/add-measurements?uid=1234&con_id=1234-45678"
		);
		assert_eq!(
			prepared.headers,
			vec![
				("Authorization".to_owned(), "Bearer tok123".to_owned()),
				("Connection-Token".to_owned(), "member-key".to_owned()),
			]
		);
		assert_eq!(prepared.body.as_deref(), Some(b"[]".as_slice()));
		assert_eq!(prepared.timeout, Some(Duration::from_secs(60)));
	}

	#[tokio::test]
	async fn call_returns_success_bodies_unchanged() {
		for status in [200, 201, 204, 299] {
			let body = "{\"result\":\"ok\",\"link\":\"https://example.com/x\"}";
			let transport = RecordingTransport::replying([json_response(status, body)]);
			let invoker = <ApiInvoker<RecordingTransport>>::with_http_client(transport);
			let response = invoker
				.call(AccessToken::new("tok123"), measurements_request())
				.await
				.expect("2xx responses must succeed.");

			assert_eq!(response.status, status);
			assert_eq!(response.body, body.as_bytes());
		}
	}

	#[tokio::test]
	async fn call_fails_outside_success_range() {
		for status in [199, 300, 400, 404, 500, 503] {
			let canned = json_response(status, "upstream said no");
			let transport = RecordingTransport::replying([canned]);
			let invoker = <ApiInvoker<RecordingTransport>>::with_http_client(transport);
			let err = invoker
				.call(AccessToken::new("tok123"), measurements_request())
				.await
				.expect_err("Non-2xx responses must fail.");
			let message = err.to_string();

			assert!(matches!(err, ApiError::Status { status: s, .. } if s == status));
			assert!(message.contains(&status.to_string()), "Missing status in {message}.");
			assert!(message.contains("upstream said no"), "Missing body in {message}.");
		}
	}

	#[tokio::test]
	async fn call_maps_transport_failures() {
		let invoker =
			<ApiInvoker<RecordingTransport>>::with_http_client(RecordingTransport::default());
		let err = invoker
			.call(AccessToken::new("tok123"), measurements_request())
			.await
			.expect_err("An exhausted transport must fail.");

		assert!(matches!(err, ApiError::Transport { .. }));
	}
}
