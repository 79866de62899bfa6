use chrono::{DateTime, Local, NaiveDate, TimeZone};
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Unknown,
    Authenticated(User),
    Unauthenticated,
}

impl SessionState {
    pub fn user(&self) -> Option<&User> {
        match self {
            SessionState::Authenticated(user) => Some(user),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingPayment {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub title: String,
    pub amount: u64,
    #[serde(deserialize_with = "deserialize_due_date")]
    pub due_date: NaiveDate,
}

/// Body for creating a payment; the server assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPayment {
    pub title: String,
    pub amount: u64,
    pub due_date: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub amount: u64,
    pub category: String,
    pub date: NaiveDate,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MonthlyStat {
    pub month: String,
    #[serde(default)]
    pub income: i64,
    #[serde(default)]
    pub expenses: i64,
}

/// Already-aggregated snapshot owned by the balance store.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSummary {
    #[serde(default)]
    pub income: i64,
    #[serde(default)]
    pub expenses: i64,
    #[serde(default)]
    pub monthly_stats: Vec<MonthlyStat>,
}

impl FinancialSummary {
    pub fn balance(&self) -> i64 {
        self.income - self.expenses
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlayKind {
    #[default]
    None,
    TransactionForm,
    PaymentForm,
}

impl OverlayKind {
    pub fn title(self) -> &'static str {
        match self {
            OverlayKind::None => "",
            OverlayKind::TransactionForm => "Add Transaction",
            OverlayKind::PaymentForm => "Add Upcoming Payment",
        }
    }
}

/// Calendar date of a due date as the viewer sees it. Full timestamps
/// ("2024-05-01T00:00:00.000Z") are shifted into `zone` first; plain
/// `YYYY-MM-DD` dates are taken as-is.
pub fn parse_due_date<Tz: TimeZone>(raw: &str, zone: &Tz) -> Result<NaiveDate, chrono::ParseError> {
    let raw = raw.trim();
    match DateTime::parse_from_rfc3339(raw) {
        Ok(instant) => Ok(instant.with_timezone(zone).date_naive()),
        Err(_) => NaiveDate::parse_from_str(raw, "%Y-%m-%d"),
    }
}

fn deserialize_due_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_due_date(&raw, &Local).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn payment_reads_mongo_style_id_and_timestamp() {
        let raw = r#"{"_id":"p1","title":"Rent","amount":1500000,"dueDate":"2024-05-01T12:00:00.000Z"}"#;
        let payment: UpcomingPayment = serde_json::from_str(raw).expect("valid payment");
        assert_eq!(payment.id, "p1");
        assert_eq!(payment.amount, 1_500_000);
        let local = DateTime::parse_from_rfc3339("2024-05-01T12:00:00.000Z")
            .expect("timestamp")
            .with_timezone(&Local)
            .date_naive();
        assert_eq!(payment.due_date, local);
    }

    #[test]
    fn timestamp_due_date_uses_viewer_zone() {
        let jakarta = FixedOffset::east_opt(7 * 3600).expect("offset");
        let new_york = FixedOffset::west_opt(4 * 3600).expect("offset");
        let utc = FixedOffset::east_opt(0).expect("offset");

        let late_evening_utc = "2024-04-30T20:00:00.000Z";
        assert_eq!(
            parse_due_date(late_evening_utc, &jakarta),
            Ok(NaiveDate::from_ymd_opt(2024, 5, 1).expect("date"))
        );
        assert_eq!(
            parse_due_date(late_evening_utc, &utc),
            Ok(NaiveDate::from_ymd_opt(2024, 4, 30).expect("date"))
        );
        assert_eq!(
            parse_due_date("2024-05-01T00:00:00.000Z", &new_york),
            Ok(NaiveDate::from_ymd_opt(2024, 4, 30).expect("date"))
        );
    }

    #[test]
    fn plain_due_date_ignores_zone() {
        let jakarta = FixedOffset::east_opt(7 * 3600).expect("offset");
        assert_eq!(
            parse_due_date(" 2024-06-15 ", &jakarta),
            Ok(NaiveDate::from_ymd_opt(2024, 6, 15).expect("date"))
        );
        assert!(parse_due_date("15/06/2024", &jakarta).is_err());
    }

    #[test]
    fn payment_accepts_plain_id_and_date() {
        let raw = r#"{"id":"p2","title":"Internet","amount":350000,"dueDate":"2024-06-15"}"#;
        let payment: UpcomingPayment = serde_json::from_str(raw).expect("valid payment");
        assert_eq!(payment.id, "p2");
        assert_eq!(payment.due_date, NaiveDate::from_ymd_opt(2024, 6, 15).expect("date"));
    }

    #[test]
    fn negative_amount_is_rejected() {
        let raw = r#"{"id":"p3","title":"Refund","amount":-5,"dueDate":"2024-06-15"}"#;
        assert!(serde_json::from_str::<UpcomingPayment>(raw).is_err());
    }

    #[test]
    fn summary_defaults_missing_fields() {
        let summary: FinancialSummary =
            serde_json::from_str(r#"{"income":900,"monthlyStats":[{"month":"Jan","income":900}]}"#)
                .expect("valid summary");
        assert_eq!(summary.expenses, 0);
        assert_eq!(summary.balance(), 900);
        assert_eq!(summary.monthly_stats[0].expenses, 0);
    }

    #[test]
    fn new_transaction_uses_type_key() {
        let tx = NewTransaction {
            kind: TransactionType::Expense,
            amount: 25_000,
            category: "Food".into(),
            date: NaiveDate::from_ymd_opt(2024, 5, 2).expect("date"),
            description: "Lunch".into(),
        };
        let json = serde_json::to_value(&tx).expect("serializable");
        assert_eq!(json["type"], "expense");
        assert_eq!(json["date"], "2024-05-02");
    }
}
