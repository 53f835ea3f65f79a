use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::money::Money;

/// One signed adjustment to a loan's balance. Positive deltas increase what is
/// owed, negative deltas are repayments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub delta: Money,
    pub date: NaiveDate,
    pub explanation: String,
}

impl Transaction {
    pub fn new(delta: Money, date: NaiveDate) -> Self {
        Self {
            delta,
            date,
            explanation: describe(delta, date),
        }
    }

    pub fn increase(amount: Money, date: NaiveDate) -> Self {
        Self::new(amount.abs(), date)
    }

    pub fn repayment(amount: Money, date: NaiveDate) -> Self {
        Self::new(-amount.abs(), date)
    }

    pub fn is_repayment(&self) -> bool {
        self.delta.is_negative()
    }

    /// Keeps the direction of the original transaction but swaps its magnitude
    /// and, optionally, its date.
    pub fn amended(&self, magnitude: Money, date: Option<NaiveDate>) -> Self {
        let date = date.unwrap_or(self.date);
        if self.is_repayment() {
            Self::repayment(magnitude, date)
        } else {
            Self::increase(magnitude, date)
        }
    }
}

fn describe(delta: Money, date: NaiveDate) -> String {
    if delta.is_negative() {
        format!("Repaid {} on {}", delta.abs(), date.format("%Y-%m-%d"))
    } else {
        format!("Increased by {} on {}", delta, date.format("%Y-%m-%d"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn explanation_follows_direction() {
        let repaid = Transaction::repayment(Money::from_cents(2000), day(2));
        assert_eq!(repaid.delta, Money::from_cents(-2000));
        assert_eq!(repaid.explanation, "Repaid 20.00 on 2024-03-02");

        let increased = Transaction::increase(Money::from_cents(1000), day(1));
        assert_eq!(increased.explanation, "Increased by 10.00 on 2024-03-01");
    }

    #[test]
    fn amended_keeps_sign_and_regenerates_text() {
        let repaid = Transaction::repayment(Money::from_cents(2000), day(2));
        let amended = repaid.amended(Money::from_cents(500), Some(day(9)));
        assert_eq!(amended.delta, Money::from_cents(-500));
        assert_eq!(amended.explanation, "Repaid 5.00 on 2024-03-09");

        let kept_date = repaid.amended(Money::from_cents(100), None);
        assert_eq!(kept_date.date, day(2));
    }
}
