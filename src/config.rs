//! Deployment configuration for the dashboard core.

// std
use std::time::Duration as StdDuration;
// self
use crate::{
	_prelude::*,
	auth::ClientId,
	error::ConfigError,
	transport::{DEFAULT_POPUP_TIMEOUT, TransportKind},
};

/// Backend proxy used when nothing is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";
/// Application origin used when nothing is configured.
pub const DEFAULT_APP_ORIGIN: &str = "http://localhost:3000";
/// Path of the sign-in view, used to derive the redirect URI.
pub const SIGN_IN_PATH: &str = "/authentication/sign-in";

/// Environment variable holding the backend proxy base URL.
pub const API_BASE_URL_ENV: &str = "CAMPAIGN_PULSE_API_BASE_URL";
/// Environment variable holding the identity-provider client id.
pub const GOOGLE_CLIENT_ID_ENV: &str = "CAMPAIGN_PULSE_GOOGLE_CLIENT_ID";
/// Environment variable holding the identity-provider redirect URI.
pub const REDIRECT_URI_ENV: &str = "CAMPAIGN_PULSE_REDIRECT_URI";
/// Environment variable holding the application origin.
pub const APP_ORIGIN_ENV: &str = "CAMPAIGN_PULSE_APP_ORIGIN";
/// Environment variable toggling fallback-only data.
pub const USE_MOCK_DATA_ENV: &str = "CAMPAIGN_PULSE_USE_MOCK_DATA";
/// Environment variable selecting the login transport.
pub const LOGIN_TRANSPORT_ENV: &str = "CAMPAIGN_PULSE_LOGIN_TRANSPORT";

/// Recognized configuration options.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardConfig {
	/// Base URL of the backend proxy; requests go to `{base}/api/{platform}`.
	pub api_base_url: Url,
	/// Identity-provider client id; federated login is unavailable without it.
	#[serde(default)]
	pub google_client_id: Option<ClientId>,
	/// Explicit redirect URI registered with the provider.
	#[serde(default)]
	pub redirect_uri: Option<Url>,
	/// Origin of the application; popup messages from anywhere else are ignored.
	pub app_origin: Url,
	/// Serve fallback snapshots without touching the network.
	#[serde(default)]
	pub use_fallback_data: bool,
	/// Delivery strategy for federated login.
	#[serde(default)]
	pub login_transport: TransportKind,
	/// How long a popup login may take.
	#[serde(default = "default_popup_timeout")]
	pub popup_timeout: StdDuration,
}
impl DashboardConfig {
	/// Creates a configuration with every optional setting at its default.
	pub fn new(api_base_url: Url, app_origin: Url) -> Result<Self, ConfigError> {
		if api_base_url.cannot_be_a_base() {
			return Err(ConfigError::UnsupportedBaseUrl { url: api_base_url.into() });
		}

		Ok(Self {
			api_base_url,
			google_client_id: None,
			redirect_uri: None,
			app_origin,
			use_fallback_data: false,
			login_transport: TransportKind::default(),
			popup_timeout: DEFAULT_POPUP_TIMEOUT,
		})
	}

	/// Reads the configuration from the process environment.
	pub fn from_env() -> Result<Self, ConfigError> {
		Self::from_lookup(|key| std::env::var(key).ok())
	}

	/// Reads the configuration through `lookup`; empty values count as unset.
	pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let get = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());
		let api_base_url = parse_url(
			API_BASE_URL_ENV,
			get(API_BASE_URL_ENV).as_deref().unwrap_or(DEFAULT_API_BASE_URL),
		)?;
		let app_origin =
			parse_url(APP_ORIGIN_ENV, get(APP_ORIGIN_ENV).as_deref().unwrap_or(DEFAULT_APP_ORIGIN))?;
		let mut config = Self::new(api_base_url, app_origin)?;

		if let Some(raw) = get(GOOGLE_CLIENT_ID_ENV) {
			config.google_client_id = Some(ClientId::new(raw).map_err(|source| {
				ConfigError::InvalidIdentifier { key: GOOGLE_CLIENT_ID_ENV, source }
			})?);
		}
		if let Some(raw) = get(REDIRECT_URI_ENV) {
			config.redirect_uri = Some(parse_url(REDIRECT_URI_ENV, &raw)?);
		}
		if let Some(raw) = get(USE_MOCK_DATA_ENV) {
			config.use_fallback_data = parse_flag(USE_MOCK_DATA_ENV, &raw)?;
		}
		if let Some(raw) = get(LOGIN_TRANSPORT_ENV) {
			config.login_transport = raw.parse()?;
		}

		Ok(config)
	}

	/// Sets the identity-provider client id.
	pub fn with_google_client_id(mut self, client_id: ClientId) -> Self {
		self.google_client_id = Some(client_id);

		self
	}

	/// Sets an explicit redirect URI.
	pub fn with_redirect_uri(mut self, redirect_uri: Url) -> Self {
		self.redirect_uri = Some(redirect_uri);

		self
	}

	/// Toggles fallback-only data.
	pub fn with_use_fallback_data(mut self, enabled: bool) -> Self {
		self.use_fallback_data = enabled;

		self
	}

	/// Selects the federated login delivery strategy.
	pub fn with_login_transport(mut self, transport: TransportKind) -> Self {
		self.login_transport = transport;

		self
	}

	/// Overrides the popup wait.
	pub fn with_popup_timeout(mut self, timeout: StdDuration) -> Self {
		self.popup_timeout = timeout;

		self
	}

	/// Redirect URI sent to the provider: the configured one, else the sign-in view on the
	/// application origin.
	pub fn resolve_redirect_uri(&self) -> Result<Url, ConfigError> {
		match &self.redirect_uri {
			Some(uri) => Ok(uri.clone()),
			None => self
				.app_origin
				.join(SIGN_IN_PATH)
				.map_err(|source| ConfigError::InvalidUrl { key: APP_ORIGIN_ENV, source }),
		}
	}
}

fn default_popup_timeout() -> StdDuration {
	DEFAULT_POPUP_TIMEOUT
}

fn parse_url(key: &'static str, raw: &str) -> Result<Url, ConfigError> {
	Url::parse(raw).map_err(|source| ConfigError::InvalidUrl { key, source })
}

fn parse_flag(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
	match raw.to_ascii_lowercase().as_str() {
		"1" | "true" | "yes" | "on" => Ok(true),
		"0" | "false" | "no" | "off" => Ok(false),
		_ => Err(ConfigError::InvalidFlag { key, value: raw.to_owned() }),
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
		let map: HashMap<String, String> =
			pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();

		move |key| map.get(key).cloned()
	}

	#[test]
	fn empty_environment_yields_local_defaults() {
		let config = DashboardConfig::from_lookup(lookup(&[])).expect("Defaults should load.");

		assert_eq!(config.api_base_url.as_str(), "http://localhost:3000/");
		assert_eq!(config.google_client_id, None);
		assert!(!config.use_fallback_data);
		assert_eq!(config.login_transport, TransportKind::Popup);
		assert_eq!(config.popup_timeout, StdDuration::from_secs(300));
		assert_eq!(
			config.resolve_redirect_uri().expect("Redirect should resolve.").as_str(),
			"http://localhost:3000/authentication/sign-in"
		);
	}

	#[test]
	fn recognized_variables_are_applied() {
		let config = DashboardConfig::from_lookup(lookup(&[
			(API_BASE_URL_ENV, "https://proxy.example.com"),
			(GOOGLE_CLIENT_ID_ENV, "abc.apps.googleusercontent.com"),
			(REDIRECT_URI_ENV, "https://dash.example.com/callback"),
			(APP_ORIGIN_ENV, "https://dash.example.com"),
			(USE_MOCK_DATA_ENV, "TRUE"),
			(LOGIN_TRANSPORT_ENV, "redirect"),
		]))
		.expect("Configuration should load.");

		assert_eq!(config.api_base_url.host_str(), Some("proxy.example.com"));
		assert_eq!(config.google_client_id.as_deref(), Some("abc.apps.googleusercontent.com"));
		assert!(config.use_fallback_data);
		assert_eq!(config.login_transport, TransportKind::Redirect);
		assert_eq!(
			config.resolve_redirect_uri().expect("Redirect should resolve.").as_str(),
			"https://dash.example.com/callback"
		);
	}

	#[test]
	fn invalid_values_are_rejected() {
		assert!(matches!(
			DashboardConfig::from_lookup(lookup(&[(USE_MOCK_DATA_ENV, "maybe")])),
			Err(ConfigError::InvalidFlag { key: USE_MOCK_DATA_ENV, .. })
		));
		assert!(matches!(
			DashboardConfig::from_lookup(lookup(&[(API_BASE_URL_ENV, "not a url")])),
			Err(ConfigError::InvalidUrl { key: API_BASE_URL_ENV, .. })
		));
		assert!(matches!(
			DashboardConfig::from_lookup(lookup(&[(API_BASE_URL_ENV, "mailto:ops@example.com")])),
			Err(ConfigError::UnsupportedBaseUrl { .. })
		));
		assert!(matches!(
			DashboardConfig::from_lookup(lookup(&[(LOGIN_TRANSPORT_ENV, "iframe")])),
			Err(ConfigError::UnknownTransport { .. })
		));
		assert!(matches!(
			DashboardConfig::from_lookup(lookup(&[(GOOGLE_CLIENT_ID_ENV, "has space")])),
			Err(ConfigError::InvalidIdentifier { key: GOOGLE_CLIENT_ID_ENV, .. })
		));
	}

	#[test]
	fn blank_values_count_as_unset() {
		let config = DashboardConfig::from_lookup(lookup(&[
			(GOOGLE_CLIENT_ID_ENV, "  "),
			(USE_MOCK_DATA_ENV, ""),
		]))
		.expect("Blank values should be ignored.");

		assert_eq!(config.google_client_id, None);
		assert!(!config.use_fallback_data);
	}
}
