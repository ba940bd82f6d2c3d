//! Client credentials for the OAuth 2.0 client-credentials grant.

// self
use crate::{
	_prelude::*,
	auth::{Secret, basic},
};

/// Immutable client credentials supplied at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
	/// OAuth 2.0 client identifier.
	pub client_id: String,
	/// OAuth 2.0 client secret.
	pub client_secret: Secret,
	/// Space-delimited scope string sent verbatim in the token request.
	pub scope: String,
	/// Token endpoint URL.
	pub token_endpoint: Url,
}
impl Credentials {
	/// Creates a credential set.
	pub fn new(
		client_id: impl Into<String>,
		client_secret: impl Into<Secret>,
		scope: impl Into<String>,
		token_endpoint: Url,
	) -> Self {
		Self {
			client_id: client_id.into(),
			client_secret: client_secret.into(),
			scope: scope.into(),
			token_endpoint,
		}
	}

	/// Returns a copy with a different scope, keeping id, secret, and endpoint.
	pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
		self.scope = scope.into();

		self
	}

	/// Formats the `Authorization: Basic ...` value for the token request.
	pub fn basic_authorization(&self) -> String {
		basic::basic_authorization(&self.client_id, self.client_secret.expose())
	}
}
