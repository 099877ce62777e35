//! Email campaign platform snapshot.

// self
use crate::{
	_prelude::*,
	snapshot::{Schema, de},
};

/// Account-level email totals.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailOverview {
	/// Subscribers across every audience.
	#[serde(default, deserialize_with = "de::count")]
	pub total_subscribers: u64,
	/// Campaigns sent.
	#[serde(default, deserialize_with = "de::count")]
	pub total_campaigns: u64,
	/// Audiences (lists).
	#[serde(default, deserialize_with = "de::count")]
	pub total_lists: u64,
	/// Average open rate, in percent.
	#[serde(default, deserialize_with = "de::metric")]
	pub avg_open_rate: f64,
	/// Average click rate, in percent.
	#[serde(default, deserialize_with = "de::metric")]
	pub avg_click_rate: f64,
}

/// Campaign settings relevant to the dashboard.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignSettings {
	/// Subject line.
	#[serde(default)]
	pub subject_line: Option<String>,
	/// Internal campaign title.
	#[serde(default)]
	pub title: Option<String>,
}

/// Open statistics of one campaign.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OpenStats {
	/// Unique opens.
	#[serde(default, deserialize_with = "de::count")]
	pub unique_opens: u64,
	/// Open rate as a fraction (`0.28` is 28 %).
	#[serde(default, deserialize_with = "de::metric")]
	pub open_rate: f64,
}

/// Click statistics of one campaign.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClickStats {
	/// Unique clicks.
	#[serde(default, deserialize_with = "de::count")]
	pub unique_clicks: u64,
	/// Click rate as a fraction.
	#[serde(default, deserialize_with = "de::metric")]
	pub click_rate: f64,
}

/// Delivery report of one campaign.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
	/// Emails delivered.
	#[serde(default, deserialize_with = "de::count")]
	pub emails_sent: u64,
	/// Open statistics.
	#[serde(default, deserialize_with = "de::nullable")]
	pub opens: OpenStats,
	/// Click statistics.
	#[serde(default, deserialize_with = "de::nullable")]
	pub clicks: ClickStats,
}

/// One sent campaign.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EmailCampaign {
	/// Platform campaign id.
	#[serde(default, deserialize_with = "de::text")]
	pub id: String,
	/// Campaign settings.
	#[serde(default, deserialize_with = "de::nullable")]
	pub settings: CampaignSettings,
	/// Send time as reported by the platform.
	#[serde(default)]
	pub send_time: Option<String>,
	/// Delivery report.
	#[serde(default, deserialize_with = "de::nullable")]
	pub report_summary: ReportSummary,
}
impl EmailCampaign {
	/// Subject line, or `"Untitled"` when the platform has none.
	pub fn subject(&self) -> &str {
		self.settings.subject_line.as_deref().filter(|s| !s.is_empty()).unwrap_or("Untitled")
	}
}

/// Per-audience statistics.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ListStats {
	/// Members of the audience.
	#[serde(default, deserialize_with = "de::count")]
	pub member_count: u64,
	/// Average open rate, in percent.
	#[serde(default, deserialize_with = "de::metric")]
	pub open_rate: f64,
	/// Average click rate, in percent.
	#[serde(default, deserialize_with = "de::metric")]
	pub click_rate: f64,
}

/// One audience.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EmailList {
	/// Platform list id.
	#[serde(default, deserialize_with = "de::text")]
	pub id: String,
	/// Audience name.
	#[serde(default, deserialize_with = "de::text")]
	pub name: String,
	/// Audience statistics.
	#[serde(default, deserialize_with = "de::nullable")]
	pub stats: ListStats,
}

/// Sums across every campaign in a snapshot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CampaignTotals {
	/// Emails delivered.
	pub emails_sent: u64,
	/// Unique opens.
	pub unique_opens: u64,
	/// Unique clicks.
	pub unique_clicks: u64,
}

/// Email campaign platform snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailSnapshot {
	/// Account totals.
	pub overview: EmailOverview,
	/// Recent campaigns.
	pub campaigns: Vec<EmailCampaign>,
	/// Audiences.
	pub lists: Vec<EmailList>,
	/// When the data was produced.
	#[serde(serialize_with = "de::rfc3339", deserialize_with = "de::rfc3339_strict")]
	pub last_updated: OffsetDateTime,
}
impl EmailSnapshot {
	/// Sums delivery, open and click counts across [`campaigns`](Self::campaigns).
	pub fn campaign_totals(&self) -> CampaignTotals {
		self.campaigns.iter().fold(CampaignTotals::default(), |acc, c| CampaignTotals {
			emails_sent: acc.emails_sent + c.report_summary.emails_sent,
			unique_opens: acc.unique_opens + c.report_summary.opens.unique_opens,
			unique_clicks: acc.unique_clicks + c.report_summary.clicks.unique_clicks,
		})
	}
}
impl Schema for EmailSnapshot {
	type Wire = EmailWire;

	fn from_wire(wire: Self::Wire, fetched_at: OffsetDateTime) -> Self {
		Self {
			overview: wire.overview.unwrap_or(wire.flat),
			campaigns: wire.campaigns,
			lists: wire.lists,
			last_updated: wire.last_updated.unwrap_or(fetched_at),
		}
	}
}

/// Accepts totals either nested under `overview` or at the top level.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EmailWire {
	#[serde(default)]
	overview: Option<EmailOverview>,
	#[serde(flatten)]
	flat: EmailOverview,
	#[serde(default, deserialize_with = "de::nullable")]
	campaigns: Vec<EmailCampaign>,
	#[serde(default, deserialize_with = "de::nullable")]
	lists: Vec<EmailList>,
	#[serde(default, deserialize_with = "de::timestamp")]
	last_updated: Option<OffsetDateTime>,
}
