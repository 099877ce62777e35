//! Federated (identity provider) sign-in.

// self
use crate::{
	_prelude::*,
	flows::{self, AuthController, LoginOutcome},
	identity,
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
	transport::Delivery,
};

impl AuthController {
	/// Starts a sign-in with the configured identity provider.
	///
	/// With the popup transport this resolves once the provider answered and the session is
	/// persisted. With the redirect transport it resolves to [`LoginOutcome::Redirecting`]
	/// and the sign-in is completed by [`restore`](Self::restore) after the page returns.
	/// Failures leave the current session untouched.
	pub async fn login_with_federated_provider(&self) -> Result<LoginOutcome, AuthError> {
		let span = FlowSpan::new(FlowKind::FederatedLogin, self.transport.kind().as_str());

		obs::record_flow_outcome(FlowKind::FederatedLogin, FlowOutcome::Attempt);

		let result = span.instrument(self.federated_login()).await;

		flows::record(FlowKind::FederatedLogin, &result);

		result
	}

	async fn federated_login(&self) -> Result<LoginOutcome, AuthError> {
		let client_id =
			self.client_id.as_ref().ok_or(AuthError::NotConfigured { what: "Google client id" })?;
		let request =
			identity::build_authorization_request(&self.descriptor, client_id, &self.redirect_uri);

		match self.transport.deliver(&request).await? {
			Delivery::Navigated => Ok(LoginOutcome::Redirecting),
			Delivery::Response(response) => {
				let user = identity::complete_authorization(
					request.pending(),
					&response,
					self.descriptor.provider,
				)?;

				self.establish(user).map(LoginOutcome::Authenticated)
			},
		}
	}
}
