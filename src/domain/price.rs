use crate::domain::validation_error::ValidationError;

/// Monthly cost in minor currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct Price(i64);

impl Price {
    pub fn parse(amount: i64) -> Result<Price, ValidationError> {
        if amount < 0 {
            return Err(ValidationError::InvalidPrice);
        }

        Ok(Self(amount))
    }

    pub fn amount(&self) -> i64 {
        self.0
    }
}
