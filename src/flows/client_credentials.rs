//! Client Credentials grant: one form-encoded POST, one bearer token.
//!
//! The request carries `grant_type=client_credentials` plus the configured scope, and
//! authenticates with the percent-encoded Basic credential from [`crate::auth::basic`]. Any
//! non-2xx answer is surfaced with its raw body so operators can see what the endpoint said.

// crates.io
use serde_json::{Map, Value};
// self
use crate::{
	_prelude::*,
	auth::{AccessToken, Credentials},
	encoding,
	error::AuthError,
	flows::TokenProvider,
	http::{HttpRequest, HttpResponse, HttpTransport, Method},
	obs::{CallKind, CallSpan},
};

const GRANT_TYPE: &str = "client_credentials";
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Fields read from a token endpoint response; everything else is ignored.
#[derive(Debug, Deserialize)]
struct TokenEndpointResponse {
	access_token: Option<String>,
}

impl<C> TokenProvider<C>
where
	C: ?Sized + HttpTransport,
{
	/// Performs the `client_credentials` grant and returns the issued access token.
	pub async fn fetch_token(&self, credentials: &Credentials) -> Result<AccessToken, AuthError> {
		let span = CallSpan::new(CallKind::Token, "fetch_token");
		let result = span
			.instrument(async {
				let request = token_request(credentials, self.timeout);
				let response =
					self.http_client.execute(request).await.map_err(AuthError::transport)?;

				span.record_status(response.status);

				parse_token_response(response)
			})
			.await;

		span.finish(result.is_ok());

		result
	}
}

/// Builds the token endpoint request for `credentials`.
pub(crate) fn token_request(credentials: &Credentials, timeout: Duration) -> HttpRequest {
	let mut form = vec![("grant_type", GRANT_TYPE)];

	if !credentials.scope.is_empty() {
		form.push(("scope", credentials.scope.as_str()));
	}

	HttpRequest::new(Method::Post, credentials.token_endpoint.clone())
		.header("Content-Type", FORM_CONTENT_TYPE)
		.header("Accept", "application/json")
		.header("Authorization", credentials.basic_authorization())
		.body(encoding::form_encode(form))
		.timeout(timeout)
}

/// Extracts the access token from a token endpoint response.
pub(crate) fn parse_token_response(response: HttpResponse) -> Result<AccessToken, AuthError> {
	if !response.is_success() {
		return Err(AuthError::Status { status: response.status, body: response.text() });
	}

	let malformed = |source| AuthError::MalformedResponse { source, body: response.text() };
	// Derived struct impls also accept sequences, so require an object first.
	let mut deserializer = serde_json::Deserializer::from_slice(&response.body);
	let object: Map<String, Value> =
		serde_path_to_error::deserialize(&mut deserializer).map_err(malformed)?;
	let payload: TokenEndpointResponse =
		serde_path_to_error::deserialize(Value::Object(object)).map_err(malformed)?;

	match payload.access_token {
		Some(token) if !token.trim().is_empty() => Ok(AccessToken::new(token)),
		_ => Err(AuthError::MissingAccessToken { body: response.text() }),
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::_preludet::*;

	fn credentials(scope: &str) -> Credentials {
		Credentials::new(
			"abcd1234-abcd-1234-abcd-123456abcdef",
			"CHANGEME",
			scope,
			Url::parse("https://op.example.com/oauth2/token")
				.expect("Failed to parse token endpoint URL."),
		)
	}

	#[test]
	fn token_request_uses_form_body_and_basic_auth() {
		let request = token_request(&credentials("mydex:pdx"), Duration::from_secs(20));

		assert_eq!(request.method, Method::Post);
		assert_eq!(request.url.as_str(), "https://op.example.com/oauth2/token");
		assert_eq!(request.header_value("content-type"), Some(FORM_CONTENT_TYPE));
		assert_eq!(
			request.header_value("authorization"),
			Some("Basic YWJjZDEyMzQtYWJjZC0xMjM0LWFiY2QtMTIzNDU2YWJjZGVmOkNIQU5HRU1F")
		);
		assert_eq!(
			request.body.as_deref(),
			Some(b"grant_type=client_credentials&scope=mydex%3Apdx".as_slice())
		);
		assert_eq!(request.timeout, Some(Duration::from_secs(20)));
	}

	#[test]
	fn empty_scope_is_omitted() {
		let request = token_request(&credentials(""), Duration::from_secs(60));

		assert_eq!(request.body.as_deref(), Some(b"grant_type=client_credentials".as_slice()));
	}

	#[test]
	fn parse_accepts_access_token() {
		let token = parse_token_response(json_response(
			200,
			"{\"access_token\":\"tok123\",\"token_type\":\"bearer\",\"expires_in\":3600}",
		))
		.expect("A 200 response with access_token should parse.");

		assert_eq!(token.expose(), "tok123");
	}

	#[test]
	fn parse_rejects_non_success_with_status_and_body() {
		let err = parse_token_response(json_response(401, "{\"error\":\"invalid_client\"}"))
			.expect_err("A 401 response must fail.");
		let message = err.to_string();

		assert!(matches!(err, AuthError::Status { status: 401, .. }));
		assert!(message.contains("401"), "Message should carry the status: {message}.");
		assert!(
			message.contains("{\"error\":\"invalid_client\"}"),
			"Message should carry the raw body: {message}."
		);
	}

	#[test]
	fn parse_rejects_missing_or_empty_token() {
		for body in ["{}", "{\"access_token\":null}", "{\"access_token\":\"  \"}"] {
			let err = parse_token_response(json_response(200, body))
				.expect_err("Responses without a usable token must fail.");

			assert!(
				matches!(err, AuthError::MissingAccessToken { .. }),
				"Body {body} produced {err:?}."
			);
		}
	}

	#[test]
	fn parse_rejects_malformed_json() {
		let err = parse_token_response(json_response(200, "<html>gateway</html>"))
			.expect_err("Non-JSON bodies must fail.");

		match err {
			AuthError::MalformedResponse { body, .. } => assert_eq!(body, "<html>gateway</html>"),
			other => panic!("Unexpected error variant: {other:?}."),
		}

		let err = parse_token_response(json_response(200, "{\"access_token\":42}"))
			.expect_err("Non-string tokens must fail.");

		match err {
			AuthError::MalformedResponse { source, .. } =>
				assert_eq!(source.path().to_string(), "access_token"),
			other => panic!("Unexpected error variant: {other:?}."),
		}
	}

	#[test]
	fn parse_rejects_non_object_bodies() {
		for body in ["[\"tok123\"]", "\"tok123\"", "null"] {
			let err = parse_token_response(json_response(200, body))
				.expect_err("Only JSON objects can carry an access token.");

			assert!(
				matches!(&err, AuthError::MalformedResponse { body: raw, .. } if raw == body),
				"Body {body} produced {err:?}."
			);
		}
	}

	#[tokio::test]
	async fn fetch_token_dispatches_one_request() {
		let canned = json_response(200, "{\"access_token\":\"tok123\"}");
		let transport = Arc::new(RecordingTransport::replying([canned]));
		let provider = <TokenProvider<RecordingTransport>>::with_http_client(transport.clone());
		let token = provider
			.fetch_token(&credentials("mydex:pdx"))
			.await
			.expect("Token fetch should succeed against the canned response.");

		assert_eq!(token.expose(), "tok123");
		assert_eq!(transport.requests().len(), 1);
	}

	#[tokio::test]
	async fn fetch_token_maps_transport_failures() {
		let provider =
			<TokenProvider<RecordingTransport>>::with_http_client(RecordingTransport::default());
		let err = provider
			.fetch_token(&credentials("mydex:pdx"))
			.await
			.expect_err("An exhausted transport must surface as a transport failure.");

		assert!(matches!(err, AuthError::Transport { .. }));
	}
}
