//! Access tokens issued by the client-credentials grant.

// self
use crate::{_prelude::*, auth::Secret};

/// Bearer token obtained from the token endpoint.
///
/// The type is intentionally not `Clone`: [`ApiInvoker::call`](crate::api::ApiInvoker::call)
/// takes it by value, so each token authorizes exactly one downstream request.
#[derive(PartialEq, Eq)]
pub struct AccessToken(Secret);
impl AccessToken {
	/// Wraps a token value returned by the token endpoint.
	pub fn new(value: impl Into<String>) -> Self {
		Self(Secret::new(value))
	}

	/// Returns the raw token. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		self.0.expose()
	}

	/// Formats the `Authorization` header value.
	pub fn bearer(&self) -> String {
		format!("Bearer {}", self.expose())
	}
}
impl Debug for AccessToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("AccessToken").field(&"<redacted>").finish()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn bearer_header_carries_raw_token() {
		let token = AccessToken::new("tok123");

		assert_eq!(token.bearer(), "Bearer tok123");
		assert_eq!(format!("{token:?}"), "AccessToken(\"<redacted>\")");
	}
}
