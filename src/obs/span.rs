// self
use crate::{_prelude::*, obs::FlowKind, sources::Platform, store::StoreError};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedFlow<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedFlow<F> = F;

/// A span builder used by auth flows and data fetches.
#[derive(Clone, Debug)]
pub struct FlowSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl FlowSpan {
	/// Creates a new span tagged with the provided flow kind + stage.
	pub fn new(kind: FlowKind, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("campaign_pulse.flow", flow = kind.as_str(), stage);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (kind, stage);

			Self {}
		}
	}

	/// Creates a span for one backend proxy request.
	pub fn fetch(platform: Platform, query: &str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span =
				tracing::debug_span!("campaign_pulse.fetch", platform = platform.as_str(), query);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (platform, query);

			Self {}
		}
	}

	/// Enters the span for synchronous sections.
	pub fn entered(self) -> FlowSpanGuard {
		#[cfg(feature = "tracing")]
		{
			FlowSpanGuard { guard: self.span.entered() }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = self;

			FlowSpanGuard {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedFlow<Fut>
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

/// RAII guard returned by [`FlowSpan::entered`].
pub struct FlowSpanGuard {
	#[cfg(feature = "tracing")]
	#[allow(dead_code)]
	guard: tracing::span::EnteredSpan,
}
impl Debug for FlowSpanGuard {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("FlowSpanGuard(..)")
	}
}

/// Reports a persisted session payload that failed to deserialize and was ignored.
pub(crate) fn warn_discarded_session(key: &str, error: &serde_json::Error) {
	#[cfg(feature = "tracing")]
	tracing::warn!(key, %error, "Discarding malformed persisted session.");
	#[cfg(not(feature = "tracing"))]
	let _ = (key, error);
}

/// Reports a storage failure that a flow absorbed instead of raising.
pub(crate) fn warn_storage_failure(stage: &'static str, error: &StoreError) {
	#[cfg(feature = "tracing")]
	tracing::warn!(stage, %error, "Session storage failed; continuing without it.");
	#[cfg(not(feature = "tracing"))]
	let _ = (stage, error);
}

/// Reports a failed fetch that was replaced by its fallback snapshot.
pub(crate) fn warn_fallback(platform: Platform, error: &Error) {
	#[cfg(feature = "tracing")]
	tracing::warn!(platform = platform.as_str(), %error, "Serving fallback snapshot.");
	#[cfg(not(feature = "tracing"))]
	let _ = (platform, error);
}

/// Reports a failed fetch that has no fallback and will surface as the hook error.
pub(crate) fn warn_fetch_failed(platform: Platform, error: &Error) {
	#[cfg(feature = "tracing")]
	tracing::warn!(platform = platform.as_str(), %error, "Fetch failed without fallback.");
	#[cfg(not(feature = "tracing"))]
	let _ = (platform, error);
}

/// Reports a popup message dropped because of its origin.
pub(crate) fn debug_foreign_message(origin: &str) {
	#[cfg(feature = "tracing")]
	tracing::debug!(origin, "Ignoring popup message from a foreign origin.");
	#[cfg(not(feature = "tracing"))]
	let _ = origin;
}

/// Reports an auth phase transition.
pub(crate) fn debug_transition(from: &'static str, to: &'static str) {
	#[cfg(feature = "tracing")]
	tracing::debug!(from, to, "Auth phase changed.");
	#[cfg(not(feature = "tracing"))]
	let _ = (from, to);
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn flow_span_guard_exists_with_or_without_tracing() {
		let _guard = FlowSpan::new(FlowKind::PasswordLogin, "test").entered();
		let _fetch = FlowSpan::fetch(Platform::Sales, "type=sales").entered();
	}

	#[tokio::test]
	async fn instrument_wraps_future() {
		let span = FlowSpan::new(FlowKind::Restore, "instrument_wraps_future");
		let value = span.instrument(async { 42 }).await;

		assert_eq!(value, 42);
	}
}
