// std
use std::sync::atomic::{AtomicU16, Ordering};
// self
use crate::{
	_prelude::*,
	obs::{self, CallKind},
};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedCall<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedCall<F> = F;

/// Observation scope for one outbound request.
#[derive(Debug)]
pub struct CallSpan {
	kind: CallKind,
	// 0 until the remote side answers.
	status: AtomicU16,
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl CallSpan {
	/// Opens a span for a `kind` request issued from `stage`.
	pub fn new(kind: CallKind, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!(
				"pdx_client.call",
				call = kind.as_str(),
				stage,
				status = tracing::field::Empty
			);

			Self { kind, status: AtomicU16::new(0), span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = stage;

			Self { kind, status: AtomicU16::new(0) }
		}
	}

	/// Records the HTTP status once the remote side has answered.
	pub fn record_status(&self, status: u16) {
		self.status.store(status, Ordering::Relaxed);

		#[cfg(feature = "tracing")]
		{
			self.span.record("status", status);
		}
	}

	/// Status recorded by [`CallSpan::record_status`], if any.
	pub fn status(&self) -> Option<u16> {
		match self.status.load(Ordering::Relaxed) {
			0 => None,
			status => Some(status),
		}
	}

	/// Reports the finished call to the enabled backends.
	pub fn finish(&self, ok: bool) {
		let status = self.status();

		obs::record_call(self.kind, status, ok);

		#[cfg(feature = "tracing")]
		{
			tracing::debug!(
				parent: &self.span,
				status = obs::status_class(status),
				ok,
				"Call finished."
			);
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedCall<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}
