//! Web analytics platform snapshot.

// self
use crate::{
	_prelude::*,
	snapshot::{Schema, de},
};

/// Traffic attributed to one campaign.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsCampaign {
	/// Campaign name.
	#[serde(default, deserialize_with = "de::text")]
	pub name: String,
	/// Traffic source.
	#[serde(default)]
	pub source: Option<String>,
	/// Traffic medium.
	#[serde(default)]
	pub medium: Option<String>,
	/// Sessions.
	#[serde(default, deserialize_with = "de::count")]
	pub sessions: u64,
	/// Users.
	#[serde(default, deserialize_with = "de::count")]
	pub users: u64,
	/// Conversions.
	#[serde(default, deserialize_with = "de::count")]
	pub conversions: u64,
}

/// Web analytics platform snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSnapshot {
	/// Sessions.
	pub sessions: u64,
	/// Users.
	pub users: u64,
	/// Conversions.
	pub conversions: u64,
	/// Conversions per session, in percent.
	pub conversion_rate: f64,
	/// Average session duration, in seconds.
	pub avg_session_duration: f64,
	/// Page views.
	pub page_views: u64,
	/// Bounce rate, in percent.
	pub bounce_rate: f64,
	/// Per-campaign traffic.
	pub campaigns: Vec<AnalyticsCampaign>,
	/// When the data was produced.
	#[serde(serialize_with = "de::rfc3339", deserialize_with = "de::rfc3339_strict")]
	pub last_updated: OffsetDateTime,
}
impl Schema for AnalyticsSnapshot {
	type Wire = AnalyticsWire;

	fn from_wire(wire: Self::Wire, fetched_at: OffsetDateTime) -> Self {
		let nested = wire.overview.unwrap_or_default();
		let prefer = |nested: u64, flat: u64| if nested > 0 { nested } else { flat };
		let sessions = prefer(nested.total_sessions, wire.sessions);
		let conversions = prefer(nested.total_conversions, wire.conversions);
		let conversion_rate = if wire.conversion_rate > 0. {
			wire.conversion_rate
		} else if sessions > 0 {
			conversions as f64 / sessions as f64 * 100.
		} else {
			0.
		};

		Self {
			sessions,
			users: prefer(nested.total_users, wire.users),
			conversions,
			conversion_rate,
			avg_session_duration: wire.avg_session_duration,
			page_views: prefer(wire.page_views, nested.total_page_views),
			bounce_rate: wire.bounce_rate,
			campaigns: wire.campaigns,
			last_updated: wire.last_updated.unwrap_or(fetched_at),
		}
	}
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AnalyticsOverviewWire {
	#[serde(default, deserialize_with = "de::count")]
	total_sessions: u64,
	#[serde(default, deserialize_with = "de::count")]
	total_users: u64,
	#[serde(default, deserialize_with = "de::count")]
	total_conversions: u64,
	#[serde(default, deserialize_with = "de::count")]
	total_page_views: u64,
}

/// Totals arrive either nested as `overview.total*` or flat.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AnalyticsWire {
	#[serde(default)]
	overview: Option<AnalyticsOverviewWire>,
	#[serde(default, deserialize_with = "de::count")]
	sessions: u64,
	#[serde(default, deserialize_with = "de::count")]
	users: u64,
	#[serde(default, deserialize_with = "de::count")]
	conversions: u64,
	#[serde(default, deserialize_with = "de::metric")]
	conversion_rate: f64,
	#[serde(default, deserialize_with = "de::metric")]
	avg_session_duration: f64,
	#[serde(default, deserialize_with = "de::count")]
	page_views: u64,
	#[serde(default, deserialize_with = "de::metric")]
	bounce_rate: f64,
	#[serde(default, deserialize_with = "de::nullable")]
	campaigns: Vec<AnalyticsCampaign>,
	#[serde(default, deserialize_with = "de::timestamp")]
	last_updated: Option<OffsetDateTime>,
}
