use crate::models::{BucketTotals, DAYS_IN_WEEK, MONTHS_IN_YEAR, Snapshot};
use chrono::{Datelike, Local};
use serde::Serialize;
use std::str::FromStr;

/// Language of the fixed chart labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    Russian,
    English,
}

impl Locale {
    pub fn month_labels(self) -> [&'static str; MONTHS_IN_YEAR] {
        match self {
            Self::Russian => [
                "Янв", "Фев", "Мар", "Апр", "Май", "Июн", "Июл", "Авг", "Сен", "Окт", "Ноя", "Дек",
            ],
            Self::English => [
                "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
            ],
        }
    }

    /// Index 0 is the first day of the tracked week (Monday).
    pub fn weekday_labels(self) -> [&'static str; DAYS_IN_WEEK] {
        match self {
            Self::Russian => ["Пн", "Вт", "Ср", "Чт", "Пт", "Сб", "Вс"],
            Self::English => ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"],
        }
    }

    pub fn unknown_date(self) -> &'static str {
        match self {
            Self::Russian => "не определено",
            Self::English => "unknown",
        }
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "ru" | "russian" => Ok(Self::Russian),
            "en" | "english" => Ok(Self::English),
            other => Err(format!("unsupported locale '{other}', expected 'ru' or 'en'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearlySeries {
    pub year: i32,
    pub months: [&'static str; MONTHS_IN_YEAR],
    pub income_series: [f64; MONTHS_IN_YEAR],
    pub expense_series: [f64; MONTHS_IN_YEAR],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklySeries {
    pub days: [&'static str; DAYS_IN_WEEK],
    pub income_series: [f64; DAYS_IN_WEEK],
    pub expense_series: [f64; DAYS_IN_WEEK],
    pub start_date_label: String,
}

/// Turns a snapshot into fixed-shape chart series.
///
/// Projection never fails: any bucket missing from the snapshot reads as
/// zero, so it is safe to call on the default snapshot before the first load.
#[derive(Debug, Clone, Copy, Default)]
pub struct ViewProjector {
    locale: Locale,
}

impl ViewProjector {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn project_yearly(&self, snapshot: &Snapshot, year: i32) -> YearlySeries {
        let months = snapshot.yearly_stats.get(&year);
        let mut income_series = [0.0; MONTHS_IN_YEAR];
        let mut expense_series = [0.0; MONTHS_IN_YEAR];

        for (index, month) in (1..=MONTHS_IN_YEAR as u32).enumerate() {
            let bucket = months.and_then(|months| months.get(&month));
            income_series[index] = bucket.map_or(0.0, BucketTotals::income);
            expense_series[index] = bucket.map_or(0.0, BucketTotals::expense);
        }

        YearlySeries {
            year,
            months: self.locale.month_labels(),
            income_series,
            expense_series,
        }
    }

    pub fn project_weekly(&self, snapshot: &Snapshot) -> WeeklySeries {
        let weekly = &snapshot.weekly_stats;
        let days = weekly.days.as_deref().unwrap_or_default();
        let mut income_series = [0.0; DAYS_IN_WEEK];
        let mut expense_series = [0.0; DAYS_IN_WEEK];

        for index in 0..DAYS_IN_WEEK {
            let bucket = days.get(index);
            income_series[index] = bucket.map_or(0.0, BucketTotals::income);
            expense_series[index] = bucket.map_or(0.0, BucketTotals::expense);
        }

        let start_date_label = weekly
            .start_date
            .as_deref()
            .map(str::trim)
            .filter(|date| !date.is_empty())
            .unwrap_or(self.locale.unknown_date())
            .to_string();

        WeeklySeries {
            days: self.locale.weekday_labels(),
            income_series,
            expense_series,
            start_date_label,
        }
    }
}

/// Calendar year of the local clock, for callers picking which year to project.
pub fn current_year() -> i32 {
    Local::now().year()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WeeklyStats;
    use serde_json::json;
    use std::collections::BTreeMap;

    fn march_2024() -> Snapshot {
        serde_json::from_value(json!({
            "incomes": [],
            "yearly_stats": { "2024": { "3": { "incomes": 500, "expenses": 200 } } }
        }))
        .unwrap()
    }

    #[test]
    fn yearly_fills_single_month() {
        let series = ViewProjector::default().project_yearly(&march_2024(), 2024);
        assert_eq!(series.year, 2024);
        assert_eq!(series.income_series[2], 500.0);
        assert_eq!(series.expense_series[2], 200.0);
        for index in (0..MONTHS_IN_YEAR).filter(|index| *index != 2) {
            assert_eq!(series.income_series[index], 0.0);
            assert_eq!(series.expense_series[index], 0.0);
        }
    }

    #[test]
    fn yearly_missing_year_is_all_zeros() {
        let projector = ViewProjector::new(Locale::English);
        let series = projector.project_yearly(&march_2024(), 2023);
        assert_eq!(series.income_series, [0.0; MONTHS_IN_YEAR]);
        assert_eq!(series.expense_series, [0.0; MONTHS_IN_YEAR]);
        assert_eq!(series.months, Locale::English.month_labels());
        assert_eq!(series.months[0], "Jan");
        assert_eq!(series.months[11], "Dec");
    }

    #[test]
    fn yearly_missing_field_reads_zero() {
        let snapshot: Snapshot = serde_json::from_value(json!({
            "yearly_stats": { "2024": { "1": { "incomes": 10 }, "2": { "expenses": 4 } } }
        }))
        .unwrap();

        let series = ViewProjector::default().project_yearly(&snapshot, 2024);
        assert_eq!(series.income_series[0], 10.0);
        assert_eq!(series.expense_series[0], 0.0);
        assert_eq!(series.income_series[1], 0.0);
        assert_eq!(series.expense_series[1], 4.0);
    }

    #[test]
    fn weekly_on_default_snapshot() {
        let series = ViewProjector::default().project_weekly(&Snapshot::default());
        assert_eq!(series.income_series, [0.0; DAYS_IN_WEEK]);
        assert_eq!(series.expense_series, [0.0; DAYS_IN_WEEK]);
        assert_eq!(series.start_date_label, "не определено");
        assert_eq!(series.days[0], "Пн");
        assert_eq!(series.days[6], "Вс");
    }

    #[test]
    fn weekly_without_days_is_all_zeros() {
        let mut snapshot = Snapshot::default();
        snapshot.weekly_stats = WeeklyStats {
            days: None,
            start_date: Some("2024-03-04".to_string()),
        };

        let series = ViewProjector::default().project_weekly(&snapshot);
        assert_eq!(series.income_series, [0.0; DAYS_IN_WEEK]);
        assert_eq!(series.start_date_label, "2024-03-04");
    }

    #[test]
    fn weekly_pads_short_and_truncates_long_days() {
        let day = |incomes| BucketTotals {
            incomes: Some(incomes),
            expenses: Some(1.0),
        };
        let mut snapshot = Snapshot::default();

        snapshot.weekly_stats.days = Some(vec![day(5.0), day(6.0)]);
        let series = ViewProjector::default().project_weekly(&snapshot);
        assert_eq!(series.income_series, [5.0, 6.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(series.expense_series, [1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0]);

        snapshot.weekly_stats.days = Some((0..9).map(|i| day(i as f64)).collect());
        let series = ViewProjector::default().project_weekly(&snapshot);
        assert_eq!(series.income_series, [0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn blank_start_date_uses_placeholder() {
        let mut snapshot = Snapshot::default();
        snapshot.weekly_stats.start_date = Some("  ".to_string());
        let series = ViewProjector::new(Locale::English).project_weekly(&snapshot);
        assert_eq!(series.start_date_label, "unknown");
    }

    #[test]
    fn projection_does_not_depend_on_transactions() {
        let mut snapshot = march_2024();
        let before = ViewProjector::default().project_yearly(&snapshot, 2024);
        snapshot.yearly_stats.insert(2025, BTreeMap::new());
        snapshot.balance = 999.0;
        let after = ViewProjector::default().project_yearly(&snapshot, 2024);
        assert_eq!(before, after);
    }

    #[test]
    fn parses_locale_names() {
        assert_eq!("ru".parse::<Locale>(), Ok(Locale::Russian));
        assert_eq!("English".parse::<Locale>(), Ok(Locale::English));
        assert!("de".parse::<Locale>().is_err());
    }
}
