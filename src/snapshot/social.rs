//! Social ad platform snapshot.

// self
use crate::{
	_prelude::*,
	snapshot::{Schema, de},
};

/// Spend and reach totals.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialSummary {
	/// Amount spent.
	#[serde(default, deserialize_with = "de::metric")]
	pub total_spend: f64,
	/// Impressions served.
	#[serde(default, deserialize_with = "de::count")]
	pub total_impressions: u64,
	/// Clicks received.
	#[serde(default, deserialize_with = "de::count")]
	pub total_clicks: u64,
	/// Average cost per thousand impressions.
	#[serde(default, deserialize_with = "de::metric")]
	pub avg_cpm: f64,
	/// Average click-through rate, in percent.
	#[serde(default, deserialize_with = "de::metric")]
	pub avg_ctr: f64,
}
impl SocialSummary {
	/// Rolls daily insight rows up into a summary.
	pub fn from_insights(insights: &[SocialInsight]) -> Self {
		let total_spend = insights.iter().map(|i| i.spend).sum::<f64>();
		let total_impressions = insights.iter().map(|i| i.impressions).sum::<u64>();
		let total_clicks = insights.iter().map(|i| i.clicks).sum::<u64>();
		let (avg_cpm, avg_ctr) = match total_impressions {
			0 => (0., 0.),
			n => (total_spend / n as f64 * 1_000., total_clicks as f64 / n as f64 * 100.),
		};

		Self { total_spend, total_impressions, total_clicks, avg_cpm, avg_ctr }
	}
}

/// One reporting row.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SocialInsight {
	/// First day covered.
	#[serde(default, deserialize_with = "de::text")]
	pub date_start: String,
	/// Last day covered.
	#[serde(default, deserialize_with = "de::text")]
	pub date_stop: String,
	/// Amount spent.
	#[serde(default, deserialize_with = "de::metric")]
	pub spend: f64,
	/// Impressions served.
	#[serde(default, deserialize_with = "de::count")]
	pub impressions: u64,
	/// Clicks received.
	#[serde(default, deserialize_with = "de::count")]
	pub clicks: u64,
	/// Cost per thousand impressions.
	#[serde(default, deserialize_with = "de::metric")]
	pub cpm: f64,
	/// Click-through rate, in percent.
	#[serde(default, deserialize_with = "de::metric")]
	pub ctr: f64,
}

/// One ad campaign.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SocialCampaign {
	/// Platform campaign id.
	#[serde(default, deserialize_with = "de::text")]
	pub id: String,
	/// Campaign name.
	#[serde(default, deserialize_with = "de::text")]
	pub name: String,
	/// Delivery status, e.g. `ACTIVE` or `PAUSED`.
	#[serde(default, deserialize_with = "de::text")]
	pub status: String,
	/// Daily budget, if set.
	#[serde(default, deserialize_with = "de::optional_metric")]
	pub daily_budget: Option<f64>,
	/// Lifetime budget, if set.
	#[serde(default, deserialize_with = "de::optional_metric")]
	pub lifetime_budget: Option<f64>,
}
impl SocialCampaign {
	/// Returns `true` while the campaign is delivering.
	pub fn is_active(&self) -> bool {
		self.status.eq_ignore_ascii_case("ACTIVE")
	}
}

/// Social ad platform snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialSnapshot {
	/// Totals for the reporting window.
	pub summary: SocialSummary,
	/// Reporting rows.
	#[serde(rename = "data")]
	pub insights: Vec<SocialInsight>,
	/// Campaigns.
	pub campaigns: Vec<SocialCampaign>,
	/// When the data was produced.
	#[serde(serialize_with = "de::rfc3339", deserialize_with = "de::rfc3339_strict")]
	pub last_updated: OffsetDateTime,
}
impl Schema for SocialSnapshot {
	type Wire = SocialWire;

	fn from_wire(wire: Self::Wire, fetched_at: OffsetDateTime) -> Self {
		Self {
			summary: wire.summary.unwrap_or_else(|| SocialSummary::from_insights(&wire.data)),
			insights: wire.data,
			campaigns: wire.campaigns,
			last_updated: wire.last_updated.unwrap_or(fetched_at),
		}
	}
}

/// Insight rows arrive under `data`; the summary is derived from them when absent.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SocialWire {
	#[serde(default)]
	summary: Option<SocialSummary>,
	#[serde(default, deserialize_with = "de::nullable")]
	data: Vec<SocialInsight>,
	#[serde(default, deserialize_with = "de::nullable")]
	campaigns: Vec<SocialCampaign>,
	#[serde(default, deserialize_with = "de::timestamp")]
	last_updated: Option<OffsetDateTime>,
}
