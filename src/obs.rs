//! Optional observability helpers for auth flows and data fetches.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `campaign_pulse.flow` (fields `flow` and
//!   `stage`) and `campaign_pulse.fetch` (fields `platform` and `query`), plus `warn!` events
//!   whenever a failure is absorbed (fallback substitution, discarded session payloads,
//!   storage errors during restore or logout).
//! - Enable `metrics` to increment `campaign_pulse_flow_total` (labels `flow` + `outcome`) and
//!   `campaign_pulse_fetch_total` (labels `platform` + `outcome`).

mod counter;
mod span;

pub use counter::*;
pub use span::*;

// self
use crate::_prelude::*;

/// Auth flow kinds observed by the controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowKind {
	/// Startup restore of the persisted session.
	Restore,
	/// Email + password sign-in.
	PasswordLogin,
	/// Identity-provider sign-in.
	FederatedLogin,
	/// Sign-out.
	Logout,
}
impl FlowKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowKind::Restore => "restore",
			FlowKind::PasswordLogin => "password_login",
			FlowKind::FederatedLogin => "federated_login",
			FlowKind::Logout => "logout",
		}
	}
}
impl Display for FlowKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each flow attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowOutcome {
	/// Entry to a flow.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl FlowOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowOutcome::Attempt => "attempt",
			FlowOutcome::Success => "success",
			FlowOutcome::Failure => "failure",
		}
	}
}
impl Display for FlowOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// How a single hook call settled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FetchOutcome {
	/// Live data from the backend proxy.
	Live,
	/// The call failed and its fallback snapshot was substituted.
	Fallback,
	/// The call failed with no fallback configured.
	Failed,
	/// Fallback data was served without touching the network.
	Offline,
}
impl FetchOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FetchOutcome::Live => "live",
			FetchOutcome::Fallback => "fallback",
			FetchOutcome::Failed => "failed",
			FetchOutcome::Offline => "offline",
		}
	}
}
impl Display for FetchOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
