//! Query-string assembly for resource URLs.

// self
use crate::{_prelude::*, encoding};

/// Returns `url` with `pairs` appended to its query string.
///
/// Keys and values are percent-encoded with RFC 3986 rules. Pairs are joined to an existing,
/// non-empty query with `&`; a URL without one gains a `?`. An empty `pairs` leaves the URL
/// untouched.
pub fn append_query<K, V>(url: &Url, pairs: impl IntoIterator<Item = (K, V)>) -> Url
where
	K: AsRef<str>,
	V: AsRef<str>,
{
	let encoded = pairs
		.into_iter()
		.map(|(key, value)| {
			format!(
				"{}={}",
				encoding::percent_encode(key.as_ref()),
				encoding::percent_encode(value.as_ref())
			)
		})
		.collect::<Vec<_>>()
		.join("&");
	let mut resolved = url.clone();

	if encoded.is_empty() {
		return resolved;
	}

	let query = match url.query().map(|existing| existing.trim_end_matches('&')) {
		Some(existing) if !existing.is_empty() => format!("{existing}&{encoded}"),
		_ => encoded,
	};

	resolved.set_query(Some(&query));

	resolved
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn url(value: &str) -> Url {
		Url::parse(value).expect("Failed to parse test URL.")
	}

	#[test]
	fn appends_with_question_mark_when_no_query() {
		let resolved = append_query(
			&url("https://api.example.com/api/pds/add-measurements"),
			[("uid", "1234"), ("con_id", "1234-45678")],
		);

		assert_eq!(
			resolved.as_str(),
			"https://api.example.com/api/pds/add-measurements?uid=1234&con_id=1234-45678"
		);
	}

	#[test]
	fn appends_with_ampersand_after_existing_query() {
		let resolved = append_query(&url("https://api.example.com/items?page=2"), [("q", "a b")]);

		assert_eq!(resolved.as_str(), "https://api.example.com/items?page=2&q=a%20b");

		let resolved = append_query(&url("https://api.example.com/items?page=2&"), [("q", "x")]);

		assert_eq!(resolved.as_str(), "https://api.example.com/items?page=2&q=x");
	}

	#[test]
	fn separator_rule_holds_across_inputs() {
		let bases = [
			("https://api.example.com/", false),
			("https://api.example.com/path", false),
			("https://api.example.com/path?", false),
			("https://api.example.com/path?a=1", true),
			("https://api.example.com/path?a=1&b=2#frag", true),
		];

		for (base, has_query) in bases {
			let resolved = append_query(&url(base), [("k", "v")]);
			let rendered = resolved.as_str();
			let expected = if has_query { "&k=v" } else { "?k=v" };

			assert!(rendered.contains(expected), "{base} resolved to {rendered}.");
			assert_eq!(rendered.matches('?').count(), 1, "{base} resolved to {rendered}.");
		}
	}

	#[test]
	fn reserved_characters_are_percent_encoded() {
		let resolved = append_query(
			&url("https://api.example.com/search"),
			[("redirect", "https://example.com/a?b=c"), ("name", "é&=")],
		);

		assert_eq!(
			resolved.query(),
			Some("redirect=https%3A%2F%2Fexample.com%2Fa%3Fb%3Dc&name=%C3%A9%26%3D")
		);
	}

	#[test]
	fn empty_pairs_leave_url_untouched() {
		let original = url("https://api.example.com/identify");
		let resolved = append_query(&original, std::iter::empty::<(&str, &str)>());

		assert_eq!(resolved, original);
	}
}
