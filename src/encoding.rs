//! Percent- and form-encoding helpers shared by Basic auth, query strings, and token requests.

// crates.io
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use url::form_urlencoded::Serializer;

/// Everything except the RFC 3986 unreserved characters (`A-Z a-z 0-9 - . _ ~`).
const RFC3986_ENCODE_SET: &AsciiSet =
	&NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_').remove(b'~');

/// Percent-encodes a single component, keeping only RFC 3986 unreserved characters literal.
///
/// Spaces become `%20` (never `+`), and multi-byte UTF-8 sequences are encoded byte by byte.
pub fn percent_encode(value: &str) -> String {
	utf8_percent_encode(value, RFC3986_ENCODE_SET).to_string()
}

/// Serializes pairs as an `application/x-www-form-urlencoded` body.
pub fn form_encode<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> String {
	let mut serializer = Serializer::new(String::new());

	for (key, value) in pairs {
		serializer.append_pair(key, value);
	}

	serializer.finish()
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn percent_encode_keeps_only_unreserved_characters() {
		assert_eq!(percent_encode("abcXYZ019-._~"), "abcXYZ019-._~");
		assert_eq!(percent_encode("client:id"), "client%3Aid");
		assert_eq!(percent_encode("s3cr et/~*"), "s3cr%20et%2F~%2A");
		assert_eq!(percent_encode("a b&c=d/é"), "a%20b%26c%3Dd%2F%C3%A9");
		assert_eq!(percent_encode(""), "");
	}

	#[test]
	fn form_encode_matches_token_request_layout() {
		assert_eq!(
			form_encode([
				("grant_type", "client_credentials"),
				("scope", "mydex:pdx post:/api/pds/add-measurements"),
			]),
			"grant_type=client_credentials&scope=mydex%3Apdx+post%3A%2Fapi%2Fpds%2Fadd-measurements"
		);
	}
}
