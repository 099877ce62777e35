//! The auth controller: session restore, password and federated sign-in, and sign-out.
//!
//! One [`AuthController`] is built at startup and shared by reference. It is the only
//! writer of the persisted session and publishes every phase change on a
//! [`tokio::sync::watch`] channel.

pub mod federated;
pub mod password;
pub mod restore;

pub use password::*;

// std
use std::sync::atomic::AtomicBool;
// crates.io
use tokio::sync::watch;
// self
use crate::{
	_prelude::*,
	auth::{AuthPhase, ClientId, SessionState, UserRecord},
	identity::IdentityProviderDescriptor,
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
	store::SessionStore,
	transport::LoginTransport,
};

/// Result of a federated sign-in attempt that did not fail.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoginOutcome {
	/// The provider answered and the user is signed in.
	Authenticated(UserRecord),
	/// The page is navigating to the provider; the session is established on return.
	Redirecting,
}

/// Owns the session lifecycle.
pub struct AuthController {
	store: SessionStore,
	transport: Arc<dyn LoginTransport>,
	descriptor: IdentityProviderDescriptor,
	client_id: Option<ClientId>,
	redirect_uri: Url,
	verifier: Arc<dyn CredentialVerifier>,
	phase: watch::Sender<AuthPhase>,
	restored: AtomicBool,
	redirect_error: Mutex<Option<AuthError>>,
}
impl AuthController {
	/// Creates a controller in the `Restoring` phase.
	///
	/// Federated sign-in stays unavailable until a client id is set with
	/// [`with_client_id`](Self::with_client_id). Password sign-in uses [`DemoVerifier`]
	/// unless another verifier is installed.
	pub fn new(
		store: SessionStore,
		transport: Arc<dyn LoginTransport>,
		descriptor: IdentityProviderDescriptor,
		redirect_uri: Url,
	) -> Self {
		Self {
			store,
			transport,
			descriptor,
			client_id: None,
			redirect_uri,
			verifier: Arc::new(DemoVerifier),
			phase: watch::Sender::new(AuthPhase::Restoring),
			restored: AtomicBool::new(false),
			redirect_error: Mutex::new(None),
		}
	}

	/// Sets the identity-provider client id.
	pub fn with_client_id(mut self, client_id: ClientId) -> Self {
		self.client_id = Some(client_id);

		self
	}

	/// Replaces the password verifier.
	pub fn with_verifier(mut self, verifier: Arc<dyn CredentialVerifier>) -> Self {
		self.verifier = verifier;

		self
	}

	/// Current session view.
	pub fn session(&self) -> SessionState {
		SessionState::from(&*self.phase.borrow())
	}

	/// Current phase.
	pub fn phase(&self) -> AuthPhase {
		self.phase.borrow().clone()
	}

	/// Subscribes to phase changes.
	pub fn subscribe(&self) -> watch::Receiver<AuthPhase> {
		self.phase.subscribe()
	}

	/// Signs out. Storage failures are logged, never raised, and calling this twice is
	/// harmless.
	pub fn logout(&self) {
		let _span = FlowSpan::new(FlowKind::Logout, "logout").entered();

		if let Err(e) = self.store.clear() {
			obs::warn_storage_failure("logout", &e);
		}

		self.transition(AuthPhase::Anonymous);
		obs::record_flow_outcome(FlowKind::Logout, FlowOutcome::Success);
	}

	/// Persists `user` and moves to `Authenticated`.
	fn establish(&self, user: UserRecord) -> Result<UserRecord, AuthError> {
		self.store.save(&user)?;
		self.transition(AuthPhase::Authenticated(user.clone()));

		Ok(user)
	}

	fn transition(&self, next: AuthPhase) {
		let to = next.as_str();
		let from = self.phase.send_replace(next);

		obs::debug_transition(from.as_str(), to);
	}
}
impl Debug for AuthController {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AuthController")
			.field("store", &self.store)
			.field("transport", &self.transport.kind())
			.field("provider", &self.descriptor.provider)
			.field("client_id_set", &self.client_id.is_some())
			.field("phase", &self.phase.borrow().as_str())
			.finish()
	}
}

fn record<T>(kind: FlowKind, result: &Result<T, AuthError>) {
	let outcome = if result.is_ok() { FlowOutcome::Success } else { FlowOutcome::Failure };

	obs::record_flow_outcome(kind, outcome);
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{
		store::MemoryBackend,
		transport::{Delivery, TransportFuture, TransportKind},
	};

	struct Unused;
	impl LoginTransport for Unused {
		fn kind(&self) -> TransportKind {
			TransportKind::Popup
		}

		fn deliver<'a>(
			&'a self,
			_request: &'a crate::identity::AuthorizationRequest,
		) -> TransportFuture<'a> {
			Box::pin(async { Ok(Delivery::Navigated) })
		}
	}

	#[test]
	fn subscribers_see_every_transition() {
		let controller = AuthController::new(
			SessionStore::new(Arc::new(MemoryBackend::default())),
			Arc::new(Unused),
			IdentityProviderDescriptor::google().expect("Google descriptor should build."),
			Url::parse("http://localhost:3000/authentication/sign-in")
				.expect("Redirect fixture should parse."),
		);
		let mut rx = controller.subscribe();

		assert_eq!(controller.phase(), AuthPhase::Restoring);
		assert!(controller.session().loading);

		controller.logout();

		assert!(rx.has_changed().expect("Sender is alive."));
		assert_eq!(*rx.borrow_and_update(), AuthPhase::Anonymous);
		assert!(!controller.session().loading);
	}
}
