//! Spreadsheet-backed sales tracker snapshot.

// self
use crate::{
	_prelude::*,
	snapshot::{Schema, de},
};

/// Visit share of one territory.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Territory {
	/// Territory name.
	#[serde(default, deserialize_with = "de::text")]
	pub territory: String,
	/// Visits in the territory.
	#[serde(default, deserialize_with = "de::count")]
	pub visits: u64,
	/// Share of all visits, in percent.
	#[serde(default, deserialize_with = "de::metric")]
	pub percentage: f64,
}

/// A frequently visited account.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessRelationship {
	/// Business name.
	#[serde(default, deserialize_with = "de::text")]
	pub business: String,
	/// Visits to the business.
	#[serde(default, deserialize_with = "de::count")]
	pub visits: u64,
}

/// Qualitative ratings computed by the tracker.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesPerformance {
	/// Overall rating.
	#[serde(default, deserialize_with = "de::text")]
	pub rating: String,
	/// Return-on-investment rating.
	#[serde(default, deserialize_with = "de::text")]
	pub roi_rating: String,
	/// Efficiency rating.
	#[serde(default, deserialize_with = "de::text")]
	pub efficiency_rating: String,
}

/// Spreadsheet-backed sales tracker snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesSnapshot {
	/// Field visits in the window.
	pub total_visits: u64,
	/// Average visits per day.
	pub avg_visits_per_day: f64,
	/// Cost per visit.
	pub cost_per_visit: f64,
	/// Efficiency score.
	pub efficiency_score: f64,
	/// Human-readable reporting window.
	pub time_range: String,
	/// Visits per territory.
	pub territory_distribution: Vec<Territory>,
	/// Most visited accounts.
	pub top_business_relationships: Vec<BusinessRelationship>,
	/// Tracker ratings.
	pub performance: SalesPerformance,
	/// When the data was produced.
	#[serde(serialize_with = "de::rfc3339", deserialize_with = "de::rfc3339_strict")]
	pub last_updated: OffsetDateTime,
}
impl SalesSnapshot {
	/// Estimated spend attributable to `territory`, using the snapshot's cost per visit.
	pub fn territory_cost(&self, territory: &Territory) -> f64 {
		territory.visits as f64 * self.cost_per_visit
	}
}
impl Schema for SalesSnapshot {
	type Wire = SalesWire;

	fn from_wire(wire: Self::Wire, fetched_at: OffsetDateTime) -> Self {
		Self {
			total_visits: wire.total_visits,
			avg_visits_per_day: wire.avg_visits_per_day,
			cost_per_visit: wire.cost_per_visit,
			efficiency_score: wire.efficiency_score,
			time_range: wire.time_range,
			territory_distribution: wire.territory_distribution,
			top_business_relationships: wire.top_business_relationships,
			performance: wire.performance,
			last_updated: wire.last_updated.unwrap_or(fetched_at),
		}
	}
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SalesWire {
	#[serde(default, deserialize_with = "de::count")]
	total_visits: u64,
	#[serde(default, deserialize_with = "de::metric")]
	avg_visits_per_day: f64,
	#[serde(default, deserialize_with = "de::metric")]
	cost_per_visit: f64,
	#[serde(default, deserialize_with = "de::metric")]
	efficiency_score: f64,
	#[serde(default, deserialize_with = "de::text")]
	time_range: String,
	#[serde(default, deserialize_with = "de::nullable")]
	territory_distribution: Vec<Territory>,
	#[serde(default, deserialize_with = "de::nullable")]
	top_business_relationships: Vec<BusinessRelationship>,
	#[serde(default, deserialize_with = "de::nullable")]
	performance: SalesPerformance,
	#[serde(default, deserialize_with = "de::timestamp")]
	last_updated: Option<OffsetDateTime>,
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn tracker_payload_parses_with_defaults() {
		let wire: SalesWire = serde_json::from_value(serde_json::json!({
			"totalVisits": "128",
			"avgVisitsPerDay": 4.1,
			"costPerVisit": "12.5",
			"territoryDistribution": [
				{ "territory": "North", "visits": 80, "percentage": 62.5 },
				{ "territory": "South", "visits": "48", "percentage": "37.5" },
			],
			"topBusinessRelationships": null,
			"performance": { "rating": "Good" },
		}))
		.expect("Fixture should parse.");
		let snapshot = SalesSnapshot::from_wire(wire, OffsetDateTime::UNIX_EPOCH);

		assert_eq!(snapshot.total_visits, 128);
		assert_eq!(snapshot.territory_distribution[1].visits, 48);
		assert!(snapshot.top_business_relationships.is_empty());
		assert_eq!(snapshot.performance.rating, "Good");
		assert_eq!(snapshot.performance.roi_rating, "");
		assert_eq!(snapshot.efficiency_score, 0.);
		assert_eq!(snapshot.territory_cost(&snapshot.territory_distribution[0]), 1_000.);
	}
}
