// self
use crate::{
	obs::{FetchOutcome, FlowKind, FlowOutcome},
	sources::Platform,
};

/// Records a flow outcome via the global metrics recorder (when enabled).
pub fn record_flow_outcome(kind: FlowKind, outcome: FlowOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"campaign_pulse_flow_total",
			"flow" => kind.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, outcome);
	}
}

/// Records how one hook call settled via the global metrics recorder (when enabled).
pub fn record_fetch_outcome(platform: Platform, outcome: FetchOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"campaign_pulse_fetch_total",
			"platform" => platform.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (platform, outcome);
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn recorders_noop_without_metrics() {
		record_flow_outcome(FlowKind::FederatedLogin, FlowOutcome::Failure);
		record_fetch_outcome(Platform::Email, FetchOutcome::Fallback);
	}
}
