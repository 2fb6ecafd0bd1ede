use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use tryon_core::FeedbackEntry;

/// Feedback as submitted by a customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FeedbackSubmission {
    #[serde(alias = "tryon_id", alias = "try_on_id")]
    pub try_on_id: String,
    /// Star rating, 1 to 5.
    pub rating: u8,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default, alias = "customer_name")]
    pub customer_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FeedbackReceipt {
    pub success: bool,
    pub serial_number: u64,
}

/// One feedback row in the summary listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FeedbackItem {
    pub try_on_id: String,
    pub serial_number: u64,
    pub rating: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

/// Feedback count and mean rating for one UTC calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct DailyStat {
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = Date))]
    pub date: NaiveDate,
    pub count: u64,
    /// Mean rating rounded to two decimals.
    pub average_rating: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FeedbackSummary {
    /// All feedback, newest first.
    pub feedback: Vec<FeedbackItem>,
    pub total: u64,
    /// Per-day statistics, newest day first.
    pub daily_stats: Vec<DailyStat>,
}

/// Build the summary view over every stored feedback entry.
pub fn summarize(entries: Vec<FeedbackEntry>) -> FeedbackSummary {
    let mut feedback: Vec<FeedbackItem> = entries
        .into_iter()
        .map(|entry| FeedbackItem {
            try_on_id: entry.try_on_id,
            serial_number: entry.feedback.serial_number,
            rating: entry.feedback.rating,
            comment: entry.feedback.comment,
            customer_name: entry.feedback.customer_name,
            submitted_at: entry.feedback.submitted_at,
        })
        .collect();
    feedback.sort_by(|a, b| {
        b.submitted_at
            .cmp(&a.submitted_at)
            .then(b.serial_number.cmp(&a.serial_number))
    });

    let mut days: BTreeMap<NaiveDate, (u64, u64)> = BTreeMap::new();
    for item in &feedback {
        let day = days.entry(item.submitted_at.date_naive()).or_default();
        day.0 += 1;
        day.1 += u64::from(item.rating);
    }
    let daily_stats = days
        .into_iter()
        .rev()
        .map(|(date, (count, rating_sum))| DailyStat {
            date,
            count,
            average_rating: round2(ratio(rating_sum, count)),
        })
        .collect();

    FeedbackSummary {
        total: feedback.len() as u64,
        feedback,
        daily_stats,
    }
}

#[allow(clippy::cast_precision_loss)]
fn ratio(sum: u64, count: u64) -> f64 {
    sum as f64 / count as f64
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
