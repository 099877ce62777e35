//! Web analytics adapter (`/api/google-analytics`).

// self
use crate::{
	_prelude::*,
	snapshot::AnalyticsSnapshot,
	sources::{Platform, ProxyClient},
};

/// Web analytics adapter.
#[derive(Clone, Debug)]
pub struct AnalyticsSource {
	client: ProxyClient,
}
impl AnalyticsSource {
	/// Creates the adapter over a shared proxy client.
	pub fn new(client: ProxyClient) -> Self {
		Self { client }
	}

	/// Site totals (`type=overview`).
	pub async fn get_overview(&self) -> Result<AnalyticsSnapshot> {
		self.client.fetch(Platform::Analytics, &[("type", "overview")]).await
	}

	/// Per-campaign traffic (`type=campaigns`).
	pub async fn get_campaigns(&self) -> Result<AnalyticsSnapshot> {
		self.client.fetch(Platform::Analytics, &[("type", "campaigns")]).await
	}
}
