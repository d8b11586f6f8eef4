use uuid::Uuid;

use crate::domain::validation_error::ValidationError;

/// Optional equality predicates shared by listing and summary queries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubscriptionFilter {
    pub user_id: Option<Uuid>,
    pub service_name: Option<String>,
}

impl SubscriptionFilter {
    /// Empty values are treated as absent.
    pub fn parse(
        user_id: Option<&str>,
        service_name: Option<&str>,
    ) -> Result<SubscriptionFilter, ValidationError> {
        let user_id = user_id
            .filter(|value| !value.is_empty())
            .map(|value| {
                Uuid::parse_str(value).map_err(|_| ValidationError::InvalidUserIdFilter)
            })
            .transpose()?;
        let service_name = service_name
            .filter(|value| !value.is_empty())
            .map(String::from);

        Ok(Self {
            user_id,
            service_name,
        })
    }
}
