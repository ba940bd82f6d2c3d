//! HTTP Basic credentials in the shape the PDX token endpoint expects.
//!
//! The client id and secret are percent-encoded one by one before they are joined with `:` and
//! base64-encoded, so a colon inside either value can never split the pair. Plain RFC 7617
//! Basic auth skips the percent-encoding step; the token endpoint expects it, so keep it.

// crates.io
use base64::{Engine, engine::general_purpose::STANDARD};
// self
use crate::encoding;

/// Returns `base64(percent(client_id) + ":" + percent(client_secret))`.
pub fn basic_credential(client_id: &str, client_secret: &str) -> String {
	let id = encoding::percent_encode(client_id);
	let secret = encoding::percent_encode(client_secret);

	STANDARD.encode(format!("{id}:{secret}"))
}

/// Returns the full `Authorization` header value (`Basic <credential>`).
pub fn basic_authorization(client_id: &str, client_secret: &str) -> String {
	format!("Basic {}", basic_credential(client_id, client_secret))
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn decode(credential: &str) -> String {
		let bytes = STANDARD.decode(credential).expect("Credential should be valid base64.");

		String::from_utf8(bytes).expect("Credential should decode to UTF-8.")
	}

	#[test]
	fn credential_matches_reference_values() {
		assert_eq!(
			basic_credential("abcd1234-abcd-1234-abcd-123456abcdef", "CHANGEME"),
			"YWJjZDEyMzQtYWJjZC0xMjM0LWFiY2QtMTIzNDU2YWJjZGVmOkNIQU5HRU1F"
		);
		assert_eq!(
			basic_credential("client:id", "s3cr et/~*"),
			"Y2xpZW50JTNBaWQ6czNjciUyMGV0JTJGfiUyQQ=="
		);
		assert_eq!(basic_authorization("client-id", "secret"), "Basic Y2xpZW50LWlkOnNlY3JldA==");
	}

	#[test]
	fn credential_decodes_to_encoded_pair() {
		let pairs = [
			("plain", "secret"),
			("with:colon", "and:another"),
			("spaces in id", "spaces in secret"),
			("unicode-é", "日本語"),
			("", ""),
			("a+b=c&d", "%already%25encoded"),
		];

		for (id, secret) in pairs {
			let decoded = decode(&basic_credential(id, secret));
			let expected =
				format!("{}:{}", encoding::percent_encode(id), encoding::percent_encode(secret));

			assert_eq!(decoded, expected, "Pair ({id:?}, {secret:?}) should round-trip.");
			assert_eq!(
				decoded.matches(':').count(),
				1,
				"Exactly one literal colon must separate the encoded pair."
			);
		}
	}
}
