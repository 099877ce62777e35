//! Social ad adapter (`/api/facebook`).

// self
use crate::{
	_prelude::*,
	snapshot::SocialSnapshot,
	sources::{Platform, ProxyClient},
};

/// Reporting window used when none is given.
pub const DEFAULT_DATE_RANGE: &str = "yesterday";

/// Social ad adapter.
#[derive(Clone, Debug)]
pub struct SocialSource {
	client: ProxyClient,
}
impl SocialSource {
	/// Creates the adapter over a shared proxy client.
	pub fn new(client: ProxyClient) -> Self {
		Self { client }
	}

	/// Spend and reach summary (`type=overview`).
	pub async fn get_overview(&self) -> Result<SocialSnapshot> {
		self.client.fetch(Platform::Social, &[("type", "overview")]).await
	}

	/// Campaign list (`type=campaigns`).
	pub async fn get_campaigns(&self) -> Result<SocialSnapshot> {
		self.client.fetch(Platform::Social, &[("type", "campaigns")]).await
	}

	/// Insight rows for a reporting window such as `yesterday` or `last_7d`.
	///
	/// `None` asks for [`DEFAULT_DATE_RANGE`].
	pub async fn get_insights(&self, date_range: Option<&str>) -> Result<SocialSnapshot> {
		let date_range = date_range.unwrap_or(DEFAULT_DATE_RANGE);

		self.client.fetch(Platform::Social, &[("date_range", date_range)]).await
	}
}
