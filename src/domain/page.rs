use crate::domain::validation_error::ValidationError;

pub const DEFAULT_LIMIT: i64 = 20;
pub const MAX_LIMIT: i64 = 1000;

/// A `LIMIT`/`OFFSET` window. Only constructible within bounds, so the repository never
/// sees a zero, negative or oversized limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    limit: i64,
    offset: i64,
}

impl Page {
    pub fn new(limit: i64, offset: i64) -> Result<Page, ValidationError> {
        if !(1..=MAX_LIMIT).contains(&limit) {
            return Err(ValidationError::InvalidLimit);
        }

        if offset < 0 {
            return Err(ValidationError::InvalidOffset);
        }

        Ok(Self { limit, offset })
    }

    /// Parses raw query string values, falling back to the defaults when a value is absent.
    pub fn parse(limit: Option<&str>, offset: Option<&str>) -> Result<Page, ValidationError> {
        let limit = match limit.filter(|value| !value.is_empty()) {
            Some(value) => value
                .parse::<i64>()
                .map_err(|_| ValidationError::InvalidLimit)?,
            None => DEFAULT_LIMIT,
        };
        let offset = match offset.filter(|value| !value.is_empty()) {
            Some(value) => value
                .parse::<i64>()
                .map_err(|_| ValidationError::InvalidOffset)?,
            None => 0,
        };

        Self::new(limit, offset)
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }

    pub fn offset(&self) -> i64 {
        self.offset
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}
