//! Email campaign adapter (`/api/mailchimp`).

// self
use crate::{
	_prelude::*,
	snapshot::EmailSnapshot,
	sources::{Platform, ProxyClient},
};

/// Email campaign adapter.
#[derive(Clone, Debug)]
pub struct EmailSource {
	client: ProxyClient,
}
impl EmailSource {
	/// Creates the adapter over a shared proxy client.
	pub fn new(client: ProxyClient) -> Self {
		Self { client }
	}

	/// Account totals (`type=overview`).
	pub async fn get_overview(&self) -> Result<EmailSnapshot> {
		self.client.fetch(Platform::Email, &[("type", "overview")]).await
	}

	/// Recent campaigns (`type=campaigns`).
	pub async fn get_campaigns(&self) -> Result<EmailSnapshot> {
		self.client.fetch(Platform::Email, &[("type", "campaigns")]).await
	}

	/// Audiences (`type=lists`).
	pub async fn get_lists(&self) -> Result<EmailSnapshot> {
		self.client.fetch(Platform::Email, &[("type", "lists")]).await
	}
}
