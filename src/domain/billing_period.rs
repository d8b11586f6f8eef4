use crate::domain::month::Month;
use crate::domain::validation_error::ValidationError;

/// Inclusive month range a summary is computed over.
///
/// `from > to` is not rejected: such a period simply overlaps nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BillingPeriod {
    pub from: Month,
    pub to: Month,
}

impl BillingPeriod {
    pub fn parse(from: &str, to: &str) -> Result<BillingPeriod, ValidationError> {
        let from = Month::parse(from).map_err(|_| ValidationError::InvalidFrom)?;
        let to = Month::parse(to).map_err(|_| ValidationError::InvalidTo)?;

        Ok(Self { from, to })
    }

    /// Number of whole months a subscription running from `start` to `end` is billed for
    /// inside this period. An open-ended subscription runs through `to`.
    pub fn billed_months(&self, start: Month, end: Option<Month>) -> i64 {
        let active_start = start.max(self.from);
        let active_end = end.unwrap_or(self.to).min(self.to);

        if active_end < active_start {
            return 0;
        }

        active_start.months_until(active_end) + 1
    }

    /// Amount owed for one subscription: every month it touches is billed in full.
    pub fn charge(&self, price: i64, start: Month, end: Option<Month>) -> i64 {
        self.billed_months(start, end).saturating_mul(price)
    }
}
