// self
use crate::obs::CallKind;

/// Counts one finished call in `pdx_client_call_total`.
///
/// A no-op unless the `metrics` feature is enabled.
pub fn record_call(kind: CallKind, status: Option<u16>, ok: bool) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"pdx_client_call_total",
			"call" => kind.as_str(),
			"status" => crate::obs::status_class(status),
			"ok" => if ok { "true" } else { "false" }
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, status, ok);
	}
}
