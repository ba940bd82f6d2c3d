//! `identify`: start the member-linking handshake for a connection.

// crates.io
use sha2::{Digest, Sha512};
// self
use crate::{_prelude::*, api::ApiRequest, resource};

/// Scope the token request must carry for [`identify`].
pub const IDENTIFY_SCOPE: &str = "mydex:pdx";

/// JSON payload for `POST {api_base}/identify`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentifyRequest {
	/// Connection node identifier.
	pub connection_nid: String,
	/// Lowercase hex SHA-512 digest of the connection token.
	pub connection_token_hash: String,
	/// Where the member is sent once the handshake completes; sent verbatim.
	pub return_to: String,
	/// Linking token issued by a previous handshake, if any.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub linking_token: Option<String>,
}
impl IdentifyRequest {
	/// Builds a payload, hashing `connection_token` so the raw token never leaves the process.
	pub fn new(
		connection_nid: impl Into<String>,
		connection_token: &str,
		return_to: impl Into<String>,
	) -> Self {
		Self {
			connection_nid: connection_nid.into(),
			connection_token_hash: hash_connection_token(connection_token),
			return_to: return_to.into(),
			linking_token: None,
		}
	}

	/// Attaches a linking token.
	pub fn with_linking_token(mut self, linking_token: impl Into<String>) -> Self {
		self.linking_token = Some(linking_token.into());

		self
	}
}

/// Returns the lowercase hex SHA-512 digest of `connection_token`.
pub fn hash_connection_token(connection_token: &str) -> String {
	format!("{:x}", Sha512::digest(connection_token.as_bytes()))
}

/// Builds `POST {api_base}/identify` carrying `payload` as JSON.
pub fn identify(api_base: &Url, payload: &IdentifyRequest) -> Result<ApiRequest> {
	let url = resource::endpoint(api_base, &["identify"])?;

	Ok(ApiRequest::post(url).json(payload)?)
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::http::Method;

	#[test]
	fn connection_token_hash_is_lowercase_hex_sha512() {
		assert_eq!(
			hash_connection_token("abcdefghijklmnopqrstuvwxyz123456789"),
			"21ccb4a5be8ed466b65eb73cf0695881888a9391cf10b18bc321207bd9fd6e55\
			 fa8f2e80c2f931fc42a84df00c6125a0773aa7395ad54ad84973271c92c5e3f5"
		);
		assert_eq!(hash_connection_token("connection-token").len(), 128);
	}

	#[test]
	fn identify_posts_hashed_payload() {
		let base = Url::parse("https://sbx-api.example.org/").expect("Failed to parse base URL.");
		let payload =
			IdentifyRequest::new("12345", "connection-token", "https://partner.example.com/done");
		let request = identify(&base, &payload).expect("Identify request should build.");

		assert_eq!(request.method, Method::Post);
		assert_eq!(request.resolved_url().as_str(), "https://sbx-api.example.org/identify");

		let body: serde_json::Value = serde_json::from_slice(
			request.body.as_deref().expect("Identify request should carry a body."),
		)
		.expect("Identify body should be JSON.");

		assert_eq!(
			body,
			serde_json::json!({
				"connection_nid": "12345",
				"connection_token_hash": "1a9cd749790039002ec939d4b3b439b991a078c2230d323bb71ee3184c546bbff7c8ece37eb75e805409d930624e068c4a6e42b99e98bef752d3c37d58dd7fd9",
				"return_to": "https://partner.example.com/done"
			}),
			"Absent linking tokens must be omitted, not sent as null."
		);
	}

	#[test]
	fn linking_token_is_sent_when_present() {
		let base = Url::parse("https://sbx-api.example.org").expect("Failed to parse base URL.");
		let payload =
			IdentifyRequest::new("12345", "connection-token", "https://partner.example.com")
				.with_linking_token("link-1");
		let request = identify(&base, &payload).expect("Identify request should build.");
		let body: IdentifyRequest = serde_json::from_slice(
			request.body.as_deref().expect("Identify request should carry a body."),
		)
		.expect("Identify body should decode.");

		assert_eq!(body.linking_token.as_deref(), Some("link-1"));
		assert_eq!(body.return_to, "https://partner.example.com");
	}
}
