//! Implicit-flow authorization request building.

// crates.io
use rand::{Rng, distr::Alphanumeric};
// self
use crate::{
	_prelude::*,
	auth::{ClientId, IdentityProvider},
	identity::IdentityProviderDescriptor,
};

const STATE_LEN: usize = 32;
const NONCE_LEN: usize = 16;
const RESPONSE_TYPE: &str = "token id_token";

/// Values that must survive until the provider answers, used to verify the response.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingAuthorization {
	/// Opaque anti-CSRF value echoed back by the provider.
	pub state: String,
	/// Replay guard the provider embeds in the identity token.
	pub nonce: String,
}
impl PendingAuthorization {
	/// Validates the `state` returned with the provider response.
	pub fn validate_state(&self, returned: Option<&str>) -> Result<(), AuthError> {
		match returned {
			Some(state) if state == self.state => Ok(()),
			_ => Err(AuthError::StateMismatch),
		}
	}
}
impl Debug for PendingAuthorization {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("PendingAuthorization")
			.field("state", &self.state)
			.field("nonce", &"<redacted>")
			.finish()
	}
}

/// Implicit-flow authorization request returned by [`build_authorization_request`].
#[derive(Clone, Debug)]
pub struct AuthorizationRequest {
	/// Provider the request targets.
	pub provider: IdentityProvider,
	/// Redirect URI the provider returns to.
	pub redirect_uri: Url,
	/// Fully formed authorization URL to open in the page or a popup.
	pub authorize_url: Url,
	pending: PendingAuthorization,
}
impl AuthorizationRequest {
	/// Opaque state value that must round-trip through the provider.
	pub fn state(&self) -> &str {
		&self.pending.state
	}

	/// Nonce embedded in the authorization URL.
	pub fn nonce(&self) -> &str {
		&self.pending.nonce
	}

	/// The state + nonce pair needed to verify the response.
	pub fn pending(&self) -> &PendingAuthorization {
		&self.pending
	}

	/// Validates the returned `state` parameter.
	pub fn validate_state(&self, returned: Option<&str>) -> Result<(), AuthError> {
		self.pending.validate_state(returned)
	}
}

/// Builds an authorization request with a fresh state and nonce.
pub fn build_authorization_request(
	descriptor: &IdentityProviderDescriptor,
	client_id: &ClientId,
	redirect_uri: &Url,
) -> AuthorizationRequest {
	let pending = PendingAuthorization {
		state: random_string(STATE_LEN),
		nonce: random_string(NONCE_LEN),
	};
	let authorize_url = build_authorize_url(descriptor, client_id, redirect_uri, &pending);

	AuthorizationRequest {
		provider: descriptor.provider,
		redirect_uri: redirect_uri.clone(),
		authorize_url,
		pending,
	}
}

fn build_authorize_url(
	descriptor: &IdentityProviderDescriptor,
	client_id: &ClientId,
	redirect_uri: &Url,
	pending: &PendingAuthorization,
) -> Url {
	let mut url = descriptor.authorization_endpoint.clone();
	let mut pairs = url.query_pairs_mut();

	pairs.append_pair("client_id", client_id);
	pairs.append_pair("redirect_uri", redirect_uri.as_str());
	pairs.append_pair("response_type", RESPONSE_TYPE);
	pairs.append_pair("scope", &descriptor.scope_param());

	if descriptor.include_granted_scopes {
		pairs.append_pair("include_granted_scopes", "true");
	}

	pairs.append_pair("state", &pending.state);
	pairs.append_pair("nonce", &pending.nonce);

	drop(pairs);

	url
}

fn random_string(len: usize) -> String {
	rand::rng().sample_iter(Alphanumeric).take(len).map(char::from).collect()
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn request() -> AuthorizationRequest {
		let descriptor =
			IdentityProviderDescriptor::google().expect("Google descriptor should build.");
		let client_id =
			ClientId::new("client-123.apps.example.com").expect("Client id should be valid.");
		let redirect = Url::parse("https://dash.example.com/authentication/sign-in")
			.expect("Redirect fixture should parse.");

		build_authorization_request(&descriptor, &client_id, &redirect)
	}

	#[test]
	fn authorize_url_carries_implicit_flow_parameters() {
		let request = request();
		let pairs: HashMap<_, _> = request.authorize_url.query_pairs().into_owned().collect();

		assert_eq!(request.authorize_url.host_str(), Some("accounts.google.com"));
		assert_eq!(pairs.get("client_id"), Some(&"client-123.apps.example.com".into()));
		assert_eq!(
			pairs.get("redirect_uri"),
			Some(&"https://dash.example.com/authentication/sign-in".into())
		);
		assert_eq!(pairs.get("response_type"), Some(&"token id_token".into()));
		assert_eq!(pairs.get("scope"), Some(&"openid profile email".into()));
		assert_eq!(pairs.get("include_granted_scopes"), Some(&"true".into()));
		assert_eq!(pairs.get("state").map(String::as_str), Some(request.state()));
		assert_eq!(pairs.get("nonce").map(String::as_str), Some(request.nonce()));
		assert_eq!(request.state().len(), STATE_LEN);
		assert_eq!(request.nonce().len(), NONCE_LEN);
	}

	#[test]
	fn every_request_gets_fresh_state_and_nonce() {
		let first = request();
		let second = request();

		assert_ne!(first.state(), second.state());
		assert_ne!(first.nonce(), second.nonce());
	}

	#[test]
	fn state_validation_rejects_missing_and_mismatching_values() {
		let pending = PendingAuthorization { state: "abc".into(), nonce: "n".into() };

		assert!(pending.validate_state(Some("abc")).is_ok());
		assert!(matches!(pending.validate_state(Some("xyz")), Err(AuthError::StateMismatch)));
		assert!(matches!(pending.validate_state(None), Err(AuthError::StateMismatch)));
	}
}
