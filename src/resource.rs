//! Typed request builders for the PDX resources the client knows about.
//!
//! Each builder takes the API base URL and returns a ready [`crate::api::ApiRequest`]; the
//! matching `*_SCOPE` constant is the scope the token request should ask for.

pub mod countries;
pub mod identify;
pub mod measurements;

pub use countries::*;
pub use identify::*;
pub use measurements::*;

// self
use crate::{_prelude::*, error::ConfigError};

/// Appends `segments` to the path of `api_base`, percent-encoding each segment.
///
/// A trailing slash on the base is ignored, so `https://h/v1` and `https://h/v1/` both resolve
/// `["identify"]` to `https://h/v1/identify`.
pub fn endpoint(api_base: &Url, segments: &[&str]) -> Result<Url, ConfigError> {
	let mut url = api_base.clone();

	url.set_query(None);
	url.set_fragment(None);
	url.path_segments_mut()
		.map_err(|_| ConfigError::CannotBeABase { url: api_base.to_string() })?
		.pop_if_empty()
		.extend(segments);

	Ok(url)
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn endpoint_appends_segments_regardless_of_trailing_slash() {
		for base in ["https://api.example.com", "https://api.example.com/"] {
			let base = Url::parse(base).expect("Failed to parse base URL.");

			assert_eq!(
				endpoint(&base, &["api", "pds", "add-measurements"])
					.expect("Endpoint should resolve.")
					.as_str(),
				"https://api.example.com/api/pds/add-measurements"
			);
		}

		let nested = Url::parse("https://api.example.com/v1/").expect("Failed to parse base URL.");

		assert_eq!(
			endpoint(&nested, &["countries", "FR"]).expect("Endpoint should resolve.").as_str(),
			"https://api.example.com/v1/countries/FR"
		);
	}

	#[test]
	fn endpoint_rejects_opaque_urls() {
		let opaque = Url::parse("mailto:ops@example.com").expect("Failed to parse opaque URL.");

		assert!(matches!(endpoint(&opaque, &["identify"]), Err(ConfigError::CannotBeABase { .. })));
	}
}
