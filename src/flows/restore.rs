//! Session restore run once at startup.

// std
use std::sync::atomic::Ordering;
// self
use crate::{
	_prelude::*,
	auth::{AuthPhase, SessionState, UserRecord},
	flows::{self, AuthController},
	identity,
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
};

impl AuthController {
	/// Restores the persisted session and leaves the `Restoring` phase.
	///
	/// Only the first call does any work; later calls return the current session. Missing,
	/// corrupt, or unreadable session data yields an anonymous session. When the page just
	/// came back from the identity provider the pending redirect sign-in is completed here,
	/// and its failure is kept for [`take_redirect_error`](Self::take_redirect_error).
	pub fn restore(&self) -> SessionState {
		if self.restored.swap(true, Ordering::SeqCst) {
			return self.session();
		}

		let _span = FlowSpan::new(FlowKind::Restore, "load").entered();

		obs::record_flow_outcome(FlowKind::Restore, FlowOutcome::Attempt);

		let next = match self.store.load() {
			Ok(Some(user)) => AuthPhase::Authenticated(user),
			Ok(None) => AuthPhase::Anonymous,
			Err(e) => {
				obs::warn_storage_failure("restore", &e);

				AuthPhase::Anonymous
			},
		};

		self.transition(next);
		obs::record_flow_outcome(FlowKind::Restore, FlowOutcome::Success);

		if let Some(Err(e)) = self.resume_redirect() {
			*self.redirect_error.lock() = Some(e);
		}

		self.session()
	}

	/// Takes the failure of a redirect sign-in completed during [`restore`](Self::restore).
	pub fn take_redirect_error(&self) -> Option<AuthError> {
		self.redirect_error.lock().take()
	}

	fn resume_redirect(&self) -> Option<Result<UserRecord, AuthError>> {
		let resumed = match self.transport.resume() {
			Ok(Some(resumed)) => resumed,
			Ok(None) => return None,
			Err(e) => return Some(Err(e)),
		};
		let _span = FlowSpan::new(FlowKind::FederatedLogin, "resume").entered();

		obs::record_flow_outcome(FlowKind::FederatedLogin, FlowOutcome::Attempt);

		let result = identity::complete_authorization(
			&resumed.pending,
			&resumed.response,
			self.descriptor.provider,
		)
		.and_then(|user| self.establish(user));

		flows::record(FlowKind::FederatedLogin, &result);

		Some(result)
	}
}
