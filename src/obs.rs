//! Spans and counters for the two outbound requests of a run.
//!
//! Every request runs inside a [`CallSpan`], which remembers the HTTP status once one arrives and
//! reports the finished call in a single [`CallSpan::finish`].
//!
//! - With `tracing`, the span is `pdx_client.call` with `call`, `stage`, and `status` fields, and
//!   `finish` emits a debug event carrying the result.
//! - With `metrics`, `finish` increments `pdx_client_call_total` labeled by `call`, `status`
//!   (see [`status_class`]), and `ok`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Which request of a run is being observed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallKind {
	/// Client-credentials token request.
	Token,
	/// Authenticated resource request.
	Api,
}
impl CallKind {
	/// Label used for the `call` span field and metric label.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallKind::Token => "token",
			CallKind::Api => "api",
		}
	}
}
impl Display for CallKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Collapses a status code into its class (`2xx`, `4xx`, ...).
///
/// `None` means the remote side never answered and maps to `unreachable`.
pub const fn status_class(status: Option<u16>) -> &'static str {
	match status {
		None => "unreachable",
		Some(100..=199) => "1xx",
		Some(200..=299) => "2xx",
		Some(300..=399) => "3xx",
		Some(400..=499) => "4xx",
		Some(500..=599) => "5xx",
		Some(_) => "other",
	}
}
