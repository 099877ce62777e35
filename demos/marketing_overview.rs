//! Demonstrates the marketing hook against a mocked backend proxy where the social
//! platform is down, so its slot is served from the fallback snapshot.

// std
use std::sync::Arc;
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use url::Url;
// self
use campaign_pulse::{
	config::DashboardConfig,
	dashboard::Dashboard,
	http::ReqwestHttpClient,
	store::{MemoryBackend, SessionBackend},
	transport::{PageLocation, RedirectTransport},
};

struct StaticPage;
impl PageLocation for StaticPage {
	fn navigate(&self, _url: &Url) {}

	fn fragment(&self) -> Option<String> {
		None
	}

	fn scrub_fragment(&self) {}
}

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let email_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/mailchimp").query_param("type", "overview");
			then.status(200).header("content-type", "application/json").body(
				r#"{"totalSubscribers":1200,"totalCampaigns":14,"totalLists":3,"avgOpenRate":31.4,"avgClickRate":4.1}"#,
			);
		})
		.await;
	let social_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/facebook");
			then.status(502).body("upstream unavailable");
		})
		.await;
	let backend: Arc<dyn SessionBackend> = Arc::new(MemoryBackend::default());
	let config = DashboardConfig::new(Url::parse(&server.base_url())?, Url::parse(&server.base_url())?)?;
	let dashboard = Dashboard::bootstrap(
		config,
		backend.clone(),
		Arc::new(ReqwestHttpClient::default()),
		Arc::new(RedirectTransport::new(Arc::new(StaticPage), backend)),
	)?;
	let hook = dashboard.marketing_hook();
	let data = hook.load().await;

	println!("{}", serde_json::to_string_pretty(&data)?);

	email_mock.assert_async().await;
	social_mock.assert_async().await;

	Ok(())
}
