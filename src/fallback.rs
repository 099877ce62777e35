//! Static fallback snapshots served when live data is disabled or a fetch fails.
//!
//! Timestamps are fixed so fallback output is deterministic.

// crates.io
use time::macros::datetime;
// self
use crate::{_prelude::*, snapshot::*};

const FIXTURE_TIME: OffsetDateTime = datetime!(2025-06-23 00:00 UTC);

/// Email fallback: 534 subscribers over 8 campaigns at a 28.5 % open rate.
pub fn email() -> EmailSnapshot {
	EmailSnapshot {
		overview: EmailOverview {
			total_subscribers: 534,
			total_campaigns: 8,
			total_lists: 2,
			avg_open_rate: 28.5,
			avg_click_rate: 3.2,
		},
		campaigns: vec![
			email_campaign("mc001", "June Product Update", 298, 0.312, 11, 0.037),
			email_campaign("mc002", "Summer Sale Announcement", 236, 0.254, 6, 0.025),
		],
		lists: vec![
			EmailList {
				id: "list001".into(),
				name: "Newsletter".into(),
				stats: ListStats { member_count: 412, open_rate: 29.1, click_rate: 3.4 },
			},
			EmailList {
				id: "list002".into(),
				name: "Customers".into(),
				stats: ListStats { member_count: 122, open_rate: 26.4, click_rate: 2.6 },
			},
		],
		last_updated: FIXTURE_TIME,
	}
}

/// Social fallback: one day of spend across two campaigns.
pub fn social() -> SocialSnapshot {
	SocialSnapshot {
		summary: SocialSummary {
			total_spend: 245.67,
			total_impressions: 12_450,
			total_clicks: 245,
			avg_cpm: 19.73,
			avg_ctr: 1.97,
		},
		insights: vec![SocialInsight {
			date_start: "2025-06-23".into(),
			date_stop: "2025-06-23".into(),
			spend: 245.67,
			impressions: 12_450,
			clicks: 245,
			cpm: 19.73,
			ctr: 1.97,
		}],
		campaigns: vec![
			SocialCampaign {
				id: "fb001".into(),
				name: "Summer Campaign 2025".into(),
				status: "ACTIVE".into(),
				daily_budget: Some(50.),
				lifetime_budget: None,
			},
			SocialCampaign {
				id: "fb002".into(),
				name: "Brand Awareness Q2 2025".into(),
				status: "PAUSED".into(),
				daily_budget: Some(75.),
				lifetime_budget: None,
			},
		],
		last_updated: FIXTURE_TIME,
	}
}

/// Analytics fallback.
pub fn analytics() -> AnalyticsSnapshot {
	AnalyticsSnapshot {
		sessions: 2_847,
		users: 2_156,
		conversions: 89,
		conversion_rate: 3.13,
		avg_session_duration: 150.,
		page_views: 8_542,
		bounce_rate: 35.,
		campaigns: vec![
			AnalyticsCampaign {
				name: "summer_2025".into(),
				source: Some("facebook".into()),
				medium: Some("cpc".into()),
				sessions: 1_204,
				users: 987,
				conversions: 41,
			},
			AnalyticsCampaign {
				name: "june_newsletter".into(),
				source: Some("mailchimp".into()),
				medium: Some("email".into()),
				sessions: 611,
				users: 540,
				conversions: 23,
			},
		],
		last_updated: FIXTURE_TIME,
	}
}

/// Sales tracker fallback.
pub fn sales() -> SalesSnapshot {
	SalesSnapshot {
		total_visits: 156,
		avg_visits_per_day: 5.2,
		cost_per_visit: 12.75,
		efficiency_score: 87.5,
		time_range: "Last 30 days".into(),
		territory_distribution: vec![
			Territory { territory: "North".into(), visits: 62, percentage: 39.7 },
			Territory { territory: "Central".into(), visits: 54, percentage: 34.6 },
			Territory { territory: "South".into(), visits: 40, percentage: 25.7 },
		],
		top_business_relationships: vec![
			BusinessRelationship { business: "Harbor Foods".into(), visits: 14 },
			BusinessRelationship { business: "Northside Hardware".into(), visits: 11 },
			BusinessRelationship { business: "Lakeview Clinic".into(), visits: 9 },
		],
		performance: SalesPerformance {
			rating: "Excellent".into(),
			roi_rating: "High".into(),
			efficiency_rating: "Above Average".into(),
		},
		last_updated: FIXTURE_TIME,
	}
}

fn email_campaign(
	id: &str,
	subject: &str,
	emails_sent: u64,
	open_rate: f64,
	unique_clicks: u64,
	click_rate: f64,
) -> EmailCampaign {
	EmailCampaign {
		id: id.into(),
		settings: CampaignSettings { subject_line: Some(subject.into()), title: None },
		send_time: Some("2025-06-20T15:00:00Z".into()),
		report_summary: ReportSummary {
			emails_sent,
			opens: OpenStats { unique_opens: (emails_sent as f64 * open_rate).round() as u64, open_rate },
			clicks: ClickStats { unique_clicks, click_rate },
		},
	}
}
