use crate::models::{Snapshot, Transaction};
use crate::projector::{Locale, WeeklySeries, YearlySeries};
use std::fmt::Write;

const BAR_WIDTH: usize = 24;
const CURRENCY: &str = "₽";

pub fn render_dashboard(
    snapshot: &Snapshot,
    weekly: &WeeklySeries,
    yearly: &YearlySeries,
    locale: Locale,
) -> String {
    let text = Text::for_locale(locale);
    let mut out = SUMMARY_TEMPLATE
        .replace("{{BALANCE_LABEL}}", text.balance)
        .replace("{{BALANCE}}", &format_amount(snapshot.balance))
        .replace("{{SAVINGS_LABEL}}", text.savings)
        .replace("{{SAVINGS}}", &format_amount(snapshot.savings));

    out.push_str(&render_list(text.incomes, &snapshot.incomes));
    out.push_str(&render_list(text.expenses, &snapshot.expenses));

    let weekly_title = format!(
        "{} ({}: {})",
        text.weekly_title, text.week_start, weekly.start_date_label
    );
    out.push_str(&render_chart(
        &weekly_title,
        &weekly.days,
        &weekly.income_series,
        &weekly.expense_series,
    ));

    let yearly_title = format!("{} {}", text.yearly_title, yearly.year);
    out.push_str(&render_chart(
        &yearly_title,
        &yearly.months,
        &yearly.income_series,
        &yearly.expense_series,
    ));
    out
}

pub fn render_list(title: &str, transactions: &[Transaction]) -> String {
    let mut out = format!("\n{title}\n");
    if transactions.is_empty() {
        out.push_str("  -\n");
    }
    for transaction in transactions {
        let _ = writeln!(
            out,
            "  {} - {}  {}",
            transaction.note,
            format_amount(transaction.amount),
            transaction.date
        );
    }
    out
}

/// Draws grouped income/expense bars, scaled to the largest value in the chart.
pub fn render_chart(title: &str, labels: &[&str], incomes: &[f64], expenses: &[f64]) -> String {
    let peak = incomes
        .iter()
        .chain(expenses)
        .copied()
        .filter(|value| value.is_finite())
        .fold(0.0_f64, f64::max);

    let mut out = format!("\n{title}\n");
    for (index, label) in labels.iter().enumerate() {
        let income = incomes.get(index).copied().unwrap_or(0.0);
        let expense = expenses.get(index).copied().unwrap_or(0.0);
        let _ = writeln!(
            out,
            "  {label:<4} + {:<width$} {:>12}",
            bar(income, peak, '#'),
            format_amount(income),
            width = BAR_WIDTH
        );
        let _ = writeln!(
            out,
            "  {:<4} - {:<width$} {:>12}",
            "",
            bar(expense, peak, '='),
            format_amount(expense),
            width = BAR_WIDTH
        );
    }
    out
}

pub fn format_amount(amount: f64) -> String {
    format!("{amount:.2} {CURRENCY}")
}

fn bar(value: f64, peak: f64, fill: char) -> String {
    if peak <= 0.0 || !value.is_finite() || value <= 0.0 {
        return String::new();
    }
    let len = ((value / peak) * BAR_WIDTH as f64).round() as usize;
    std::iter::repeat_n(fill, len.clamp(1, BAR_WIDTH)).collect()
}

struct Text {
    balance: &'static str,
    savings: &'static str,
    incomes: &'static str,
    expenses: &'static str,
    weekly_title: &'static str,
    week_start: &'static str,
    yearly_title: &'static str,
}

impl Text {
    fn for_locale(locale: Locale) -> Self {
        match locale {
            Locale::Russian => Self {
                balance: "Баланс",
                savings: "Накопления",
                incomes: "Доходы",
                expenses: "Расходы",
                weekly_title: "Доходы и расходы за неделю",
                week_start: "начало недели",
                yearly_title: "Доходы и расходы за",
            },
            Locale::English => Self {
                balance: "Balance",
                savings: "Savings",
                incomes: "Incomes",
                expenses: "Expenses",
                weekly_title: "Incomes and expenses this week",
                week_start: "week of",
                yearly_title: "Incomes and expenses for",
            },
        }
    }
}

const SUMMARY_TEMPLATE: &str = "{{BALANCE_LABEL}}: {{BALANCE}}\n{{SAVINGS_LABEL}}: {{SAVINGS}}\n";
