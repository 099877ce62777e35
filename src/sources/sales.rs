//! Sales tracker adapter (`/api/google-sheets`).

// self
use crate::{
	_prelude::*,
	snapshot::SalesSnapshot,
	sources::{Platform, ProxyClient},
};

/// Which sales view to request.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SalesQuery {
	/// Tracker totals (`type=overview`).
	Overview,
	/// Visit-level sales view (`type=sales`).
	#[default]
	Sales,
	/// A specific sheet and cell range (`sheetId=…&range=…`).
	Sheet {
		/// Spreadsheet id.
		sheet_id: String,
		/// A1-notation range.
		range: String,
	},
}

/// Sales tracker adapter.
#[derive(Clone, Debug)]
pub struct SalesSource {
	client: ProxyClient,
}
impl SalesSource {
	/// Creates the adapter over a shared proxy client.
	pub fn new(client: ProxyClient) -> Self {
		Self { client }
	}

	/// Tracker totals (`type=overview`).
	pub async fn get_overview(&self) -> Result<SalesSnapshot> {
		self.client.fetch(Platform::Sales, &[("type", "overview")]).await
	}

	/// Visit-level sales view (`type=sales`).
	pub async fn get_sales(&self) -> Result<SalesSnapshot> {
		self.client.fetch(Platform::Sales, &[("type", "sales")]).await
	}

	/// A specific sheet and range.
	pub async fn get_sales_data(&self, sheet_id: &str, range: &str) -> Result<SalesSnapshot> {
		self.client.fetch(Platform::Sales, &[("sheetId", sheet_id), ("range", range)]).await
	}

	/// Dispatches `query` to the matching call.
	pub async fn query(&self, query: &SalesQuery) -> Result<SalesSnapshot> {
		match query {
			SalesQuery::Overview => self.get_overview().await,
			SalesQuery::Sales => self.get_sales().await,
			SalesQuery::Sheet { sheet_id, range } => self.get_sales_data(sheet_id, range).await,
		}
	}
}
