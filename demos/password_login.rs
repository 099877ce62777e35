//! Demonstrates the password sign-in lifecycle: restore, login, a second restore from the
//! persisted record, and logout.

// std
use std::sync::Arc;
// crates.io
use color_eyre::Result;
use url::Url;
// self
use campaign_pulse::{
	config::DashboardConfig,
	dashboard::Dashboard,
	http::ReqwestHttpClient,
	store::{MemoryBackend, SessionBackend},
	transport::{PageLocation, RedirectTransport},
};

struct ConsolePage;
impl PageLocation for ConsolePage {
	fn navigate(&self, url: &Url) {
		println!("Navigating to {url}.");
	}

	fn fragment(&self) -> Option<String> {
		None
	}

	fn scrub_fragment(&self) {}
}

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let backend: Arc<dyn SessionBackend> = Arc::new(MemoryBackend::default());
	let config = DashboardConfig::from_lookup(|_| None)?.with_use_fallback_data(true);
	let transport = Arc::new(RedirectTransport::new(Arc::new(ConsolePage), backend.clone()));
	let dashboard = Dashboard::bootstrap(
		config.clone(),
		backend.clone(),
		Arc::new(ReqwestHttpClient::default()),
		transport.clone(),
	)?;

	println!("After restore: {:?}.", dashboard.access());

	let user = dashboard.auth().login_with_password("jane@x.com", "hunter2").await?;

	println!("Signed in as {} ({}).", user.name, user.id);

	let reloaded = Dashboard::bootstrap(
		config,
		backend,
		Arc::new(ReqwestHttpClient::default()),
		transport,
	)?;

	println!("Reloaded session: {}.", serde_json::to_string(&reloaded.session())?);

	reloaded.auth().logout();
	reloaded.auth().logout();

	println!("After logout: {:?}.", reloaded.access());

	Ok(())
}
