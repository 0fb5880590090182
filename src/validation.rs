use crate::errors::ValidationError;
use crate::models::Transaction;
use chrono::NaiveDate;

/// Checks raw form input for a new income or expense.
///
/// `today` becomes the transaction date; callers pass the local date.
pub fn validate_transaction(
    raw_amount: &str,
    raw_note: &str,
    today: NaiveDate,
) -> Result<Transaction, ValidationError> {
    let amount = parse_finite(raw_amount)
        .filter(|amount| *amount > 0.0)
        .ok_or(ValidationError::InvalidAmount)?;

    let note = raw_note.trim();
    if note.is_empty() {
        return Err(ValidationError::EmptyNote);
    }

    Ok(Transaction {
        amount,
        note: note.to_string(),
        date: today.into(),
    })
}

/// Re-checks a transaction built outside [`validate_transaction`] before it
/// is sent: positive finite amount, non-blank note, calendar date.
pub fn check_transaction(transaction: &Transaction) -> Result<(), ValidationError> {
    if !(transaction.amount.is_finite() && transaction.amount > 0.0) {
        return Err(ValidationError::InvalidAmount);
    }
    if transaction.note.trim().is_empty() {
        return Err(ValidationError::EmptyNote);
    }
    if transaction.date.as_date().is_none() {
        return Err(ValidationError::InvalidDate);
    }
    Ok(())
}

/// Savings may be set to any finite value, zero and negatives included.
pub fn validate_savings_amount(raw: &str) -> Result<f64, ValidationError> {
    parse_finite(raw).ok_or(ValidationError::NotANumber)
}

fn parse_finite(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}
