// self
use crate::{_prelude::*, auth::IdentityProvider, identity::IdentityProviderDescriptor};

/// Errors raised while constructing or validating descriptors.
#[derive(Debug, PartialEq, Eq, ThisError)]
pub enum DescriptorError {
	/// Authorization endpoint is required.
	#[error("Missing authorization endpoint.")]
	MissingAuthorizationEndpoint,
	/// Authorization endpoint failed to parse.
	#[error("Authorization endpoint is not a valid URL.")]
	InvalidEndpoint {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Endpoints must use HTTPS.
	#[error("The authorization endpoint must use HTTPS: {url}.")]
	InsecureEndpoint {
		/// Endpoint URL that failed validation.
		url: String,
	},
	/// At least one scope must be requested.
	#[error("Descriptor must request at least one scope.")]
	NoScopes,
	/// Scopes cannot be empty or contain whitespace.
	#[error("Scope `{scope}` is empty or contains whitespace.")]
	InvalidScope {
		/// The offending scope string.
		scope: String,
	},
}

/// Builder for [`IdentityProviderDescriptor`] values.
#[derive(Debug)]
pub struct IdentityProviderDescriptorBuilder {
	/// Provider tag for the descriptor being constructed.
	pub provider: IdentityProvider,
	/// Authorization endpoint.
	pub authorization_endpoint: Option<Url>,
	/// Requested scopes, in request order.
	pub scopes: Vec<String>,
	/// Whether to send `include_granted_scopes=true`.
	pub include_granted_scopes: bool,
}
impl IdentityProviderDescriptorBuilder {
	/// Creates a new builder seeded with the provided provider tag.
	pub fn new(provider: IdentityProvider) -> Self {
		Self {
			provider,
			authorization_endpoint: None,
			scopes: Vec::new(),
			include_granted_scopes: false,
		}
	}

	/// Sets the authorization endpoint.
	pub fn authorization_endpoint(mut self, url: Url) -> Self {
		self.authorization_endpoint = Some(url);

		self
	}

	/// Appends a single scope; duplicates are ignored.
	pub fn scope(mut self, scope: impl Into<String>) -> Self {
		let scope = scope.into();

		if !self.scopes.contains(&scope) {
			self.scopes.push(scope);
		}

		self
	}

	/// Appends multiple scopes; duplicates are ignored.
	pub fn scopes<I, S>(self, scopes: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		scopes.into_iter().fold(self, |builder, scope| builder.scope(scope))
	}

	/// Toggles `include_granted_scopes`.
	pub fn include_granted_scopes(mut self, include: bool) -> Self {
		self.include_granted_scopes = include;

		self
	}

	/// Consumes the builder and validates the resulting descriptor.
	pub fn build(self) -> Result<IdentityProviderDescriptor, DescriptorError> {
		let authorization_endpoint =
			self.authorization_endpoint.ok_or(DescriptorError::MissingAuthorizationEndpoint)?;
		let descriptor = IdentityProviderDescriptor {
			provider: self.provider,
			authorization_endpoint,
			scopes: self.scopes,
			include_granted_scopes: self.include_granted_scopes,
		};

		descriptor.validate()?;

		Ok(descriptor)
	}
}

impl IdentityProviderDescriptor {
	fn validate(&self) -> Result<(), DescriptorError> {
		if self.authorization_endpoint.scheme() != "https" {
			return Err(DescriptorError::InsecureEndpoint {
				url: self.authorization_endpoint.to_string(),
			});
		}
		if self.scopes.is_empty() {
			return Err(DescriptorError::NoScopes);
		}
		if let Some(bad) =
			self.scopes.iter().find(|s| s.is_empty() || s.chars().any(char::is_whitespace))
		{
			return Err(DescriptorError::InvalidScope { scope: bad.clone() });
		}

		Ok(())
	}
}
