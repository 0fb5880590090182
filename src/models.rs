use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

pub const DAYS_IN_WEEK: usize = 7;
pub const MONTHS_IN_YEAR: usize = 12;

/// Month number (1..=12) to totals for that month.
pub type MonthStats = BTreeMap<u32, BucketTotals>;

/// Full financial state as returned by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default, deserialize_with = "lenient_total")]
    pub balance: f64,
    #[serde(default, deserialize_with = "lenient_total")]
    pub savings: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub incomes: Vec<Transaction>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub expenses: Vec<Transaction>,
    #[serde(default, deserialize_with = "numeric_keys")]
    pub yearly_stats: BTreeMap<i32, MonthStats>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub weekly_stats: WeeklyStats,
    /// Server fields the client does not interpret, kept so the held
    /// snapshot is exactly what the server sent.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            balance: 0.0,
            savings: 0.0,
            incomes: Vec::new(),
            expenses: Vec::new(),
            yearly_stats: BTreeMap::new(),
            weekly_stats: WeeklyStats::default(),
            extra: Map::new(),
        }
    }
}

/// A stored income or expense.
///
/// Stored entries are decoded leniently: the server keeps whatever it was
/// sent, so a missing amount reads as zero and a bad date is kept as text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(default, deserialize_with = "lenient_total")]
    pub amount: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub note: String,
    #[serde(default, deserialize_with = "lenient_date")]
    pub date: TransactionDate,
}

/// Calendar date of a transaction, or the raw text when the server holds
/// something that is not a `YYYY-MM-DD` date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TransactionDate {
    Day(NaiveDate),
    Raw(String),
}

impl TransactionDate {
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Day(date) => Some(*date),
            Self::Raw(_) => None,
        }
    }
}

impl Default for TransactionDate {
    fn default() -> Self {
        Self::Raw(String::new())
    }
}

impl From<NaiveDate> for TransactionDate {
    fn from(date: NaiveDate) -> Self {
        Self::Day(date)
    }
}

impl fmt::Display for TransactionDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Day(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Self::Raw(raw) => f.write_str(raw),
        }
    }
}

/// Income and expense totals of one bucket (a weekday or a month).
///
/// Either side may be missing or malformed in the server payload; the
/// accessors read those as zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct BucketTotals {
    #[serde(default, deserialize_with = "lenient_amount")]
    pub incomes: Option<f64>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub expenses: Option<f64>,
}

impl BucketTotals {
    pub fn zero() -> Self {
        Self {
            incomes: Some(0.0),
            expenses: Some(0.0),
        }
    }

    pub fn income(&self) -> f64 {
        self.incomes.unwrap_or(0.0)
    }

    pub fn expense(&self) -> f64 {
        self.expenses.unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyStats {
    /// Index 0 is the first day of the tracked week.
    #[serde(default)]
    pub days: Option<Vec<BucketTotals>>,
    #[serde(default)]
    pub start_date: Option<String>,
}

impl Default for WeeklyStats {
    fn default() -> Self {
        Self {
            days: Some(vec![BucketTotals::zero(); DAYS_IN_WEEK]),
            start_date: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn endpoint(self) -> &'static str {
        match self {
            Self::Income => crate::api::ADD_INCOME_PATH,
            Self::Expense => crate::api::ADD_EXPENSE_PATH,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SavingsUpdate {
    pub amount: f64,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Year and month keys arrive as JSON strings. Keys that are not numbers
/// are dropped rather than failing the whole snapshot.
fn numeric_keys<'de, D>(deserializer: D) -> Result<BTreeMap<i32, MonthStats>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: BTreeMap<String, Option<BTreeMap<String, BucketTotals>>> =
        null_as_default(deserializer)?;
    let years = raw
        .into_iter()
        .filter_map(|(year, months)| {
            let year = year.trim().parse::<i32>().ok()?;
            let months = months
                .unwrap_or_default()
                .into_iter()
                .filter_map(|(month, totals)| Some((month.trim().parse::<u32>().ok()?, totals)))
                .collect();
            Some((year, months))
        })
        .collect();
    Ok(years)
}

fn lenient_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.as_f64()).filter(|v| v.is_finite()))
}

fn lenient_date<'de, D>(deserializer: D) -> Result<TransactionDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(raw)) => raw,
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    };
    Ok(match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
        Ok(date) => TransactionDate::Day(date),
        Err(_) => TransactionDate::Raw(raw),
    })
}

fn lenient_total<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_amount(deserializer)?.unwrap_or(0.0))
}
