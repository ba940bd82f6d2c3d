//! `countries`: look up a country record by code.

// self
use crate::{_prelude::*, api::ApiRequest, resource};

/// Scope the token request must carry for [`country`].
pub const COUNTRIES_SCOPE: &str = "countries";
/// Header listing the scopes the caller wants applied to the lookup.
pub const SCOPES_HEADER: &str = "X-Mrd-Scopes";

/// Builds `GET {api_base}/countries/{code}` with `scopes` in the `X-Mrd-Scopes` header.
pub fn country(api_base: &Url, code: &str, scopes: &str) -> Result<ApiRequest> {
	let url = resource::endpoint(api_base, &["countries", code])?;

	Ok(ApiRequest::get(url).header(SCOPES_HEADER, scopes))
}
