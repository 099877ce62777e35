//! Application root: one explicitly constructed instance owning the auth controller and
//! the platform adapters.

// self
use crate::{
	_prelude::*,
	auth::{Access, SessionState},
	config::DashboardConfig,
	error::ConfigError,
	flows::AuthController,
	hooks::{CampaignFallbacks, CampaignHook, MarketingFallbacks, MarketingHook},
	http::ApiHttpClient,
	identity::IdentityProviderDescriptor,
	sources::{AnalyticsSource, EmailSource, ProxyClient, SalesQuery, SalesSource, SocialSource},
	store::{SessionBackend, SessionStore},
	transport::{
		LoginTransport, PageLocation, PopupHost, PopupTransport, RedirectTransport, TransportKind,
	},
};

/// Page-level capabilities the login transports are built from.
#[derive(Clone)]
pub struct LoginHost {
	/// Address bar of the current page.
	pub page: Arc<dyn PageLocation>,
	/// Opener for sign-in popups.
	pub popups: Arc<dyn PopupHost>,
}
impl LoginHost {
	/// Builds the transport selected by `config.login_transport`.
	///
	/// The redirect transport keeps its pending request in `backend`.
	pub fn transport(
		&self,
		config: &DashboardConfig,
		backend: Arc<dyn SessionBackend>,
	) -> Arc<dyn LoginTransport> {
		match config.login_transport {
			TransportKind::Redirect => Arc::new(RedirectTransport::new(self.page.clone(), backend)),
			TransportKind::Popup => Arc::new(
				PopupTransport::new(self.popups.clone(), &config.app_origin)
					.with_timeout(config.popup_timeout),
			),
		}
	}
}
impl Debug for LoginHost {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("LoginHost").finish_non_exhaustive()
	}
}

/// The dashboard core, passed by reference to every view.
#[derive(Debug)]
pub struct Dashboard {
	config: DashboardConfig,
	auth: AuthController,
	email: EmailSource,
	social: SocialSource,
	analytics: AnalyticsSource,
	sales: SalesSource,
}
impl Dashboard {
	/// Wires every component from `config` and restores the persisted session.
	pub fn bootstrap(
		config: DashboardConfig,
		backend: Arc<dyn SessionBackend>,
		http: Arc<dyn ApiHttpClient>,
		transport: Arc<dyn LoginTransport>,
	) -> Result<Self, ConfigError> {
		let proxy = ProxyClient::new(http, config.api_base_url.clone())?;
		let mut auth = AuthController::new(
			SessionStore::new(backend),
			transport,
			IdentityProviderDescriptor::google()?,
			config.resolve_redirect_uri()?,
		);

		if let Some(client_id) = config.google_client_id.clone() {
			auth = auth.with_client_id(client_id);
		}

		auth.restore();

		Ok(Self {
			email: EmailSource::new(proxy.clone()),
			social: SocialSource::new(proxy.clone()),
			analytics: AnalyticsSource::new(proxy.clone()),
			sales: SalesSource::new(proxy),
			config,
			auth,
		})
	}

	/// Wires the dashboard with the transport chosen by the configuration.
	pub fn bootstrap_with_host(
		config: DashboardConfig,
		backend: Arc<dyn SessionBackend>,
		http: Arc<dyn ApiHttpClient>,
		host: &LoginHost,
	) -> Result<Self, ConfigError> {
		let transport = host.transport(&config, backend.clone());

		Self::bootstrap(config, backend, http, transport)
	}

	/// Configuration the dashboard was built with.
	pub fn config(&self) -> &DashboardConfig {
		&self.config
	}

	/// The auth controller.
	pub fn auth(&self) -> &AuthController {
		&self.auth
	}

	/// Current session view.
	pub fn session(&self) -> SessionState {
		self.auth.session()
	}

	/// Routing decision for protected views.
	pub fn access(&self) -> Access {
		self.auth.session().access()
	}

	/// Email + social hook with the default fallbacks.
	pub fn marketing_hook(&self) -> MarketingHook {
		MarketingHook::new(
			self.email.clone(),
			self.social.clone(),
			MarketingFallbacks::default(),
			self.config.use_fallback_data,
		)
	}

	/// Sales + analytics hook for `query` with the default fallbacks.
	pub fn campaign_hook(&self, query: SalesQuery) -> CampaignHook {
		CampaignHook::new(
			self.sales.clone(),
			self.analytics.clone(),
			query,
			CampaignFallbacks::default(),
			self.config.use_fallback_data,
		)
	}

	/// Email adapter.
	pub fn email(&self) -> &EmailSource {
		&self.email
	}

	/// Social adapter.
	pub fn social(&self) -> &SocialSource {
		&self.social
	}

	/// Analytics adapter.
	pub fn analytics(&self) -> &AnalyticsSource {
		&self.analytics
	}

	/// Sales adapter.
	pub fn sales(&self) -> &SalesSource {
		&self.sales
	}
}
