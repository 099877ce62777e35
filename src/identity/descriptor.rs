//! Identity provider descriptor consumed by the authorization request builder.

/// Builder API for assembling identity provider descriptors.
pub mod builder;

pub use builder::*;

// self
use crate::{_prelude::*, auth::IdentityProvider};

/// Google's OAuth 2.0 authorization endpoint.
pub const GOOGLE_AUTHORIZATION_ENDPOINT: &str = "https://accounts.google.com/o/oauth2/v2/auth";
/// Scopes requested for a Google sign-in.
pub const GOOGLE_SCOPES: [&str; 3] = ["openid", "profile", "email"];

/// Immutable, validated description of an OAuth 2.0 implicit-flow identity provider.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityProviderDescriptor {
	/// Provider tag stamped onto user records created through it.
	pub provider: IdentityProvider,
	/// HTTPS authorization endpoint the user is sent to.
	pub authorization_endpoint: Url,
	/// Scopes requested in every authorization request.
	pub scopes: Vec<String>,
	/// Whether to ask the provider to include previously granted scopes.
	pub include_granted_scopes: bool,
}
impl IdentityProviderDescriptor {
	/// Creates a new builder for the provided identity provider.
	pub fn builder(provider: IdentityProvider) -> IdentityProviderDescriptorBuilder {
		IdentityProviderDescriptorBuilder::new(provider)
	}

	/// Descriptor for Google sign-in with the `openid profile email` scopes.
	pub fn google() -> Result<Self, DescriptorError> {
		let endpoint = Url::parse(GOOGLE_AUTHORIZATION_ENDPOINT)
			.map_err(|source| DescriptorError::InvalidEndpoint { source })?;

		Self::builder(IdentityProvider::Google)
			.authorization_endpoint(endpoint)
			.scopes(GOOGLE_SCOPES)
			.include_granted_scopes(true)
			.build()
	}

	/// Scopes joined with spaces, as sent in the `scope` parameter.
	pub fn scope_param(&self) -> String {
		self.scopes.join(" ")
	}
}
