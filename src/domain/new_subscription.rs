use serde::Deserialize;
use uuid::Uuid;

use crate::domain::month::Month;
use crate::domain::price::Price;
use crate::domain::service_name::ServiceName;
use crate::domain::validation_error::{InvalidEndReason, ValidationError};

/// Validated fields of a subscription, shared by create and full-replace update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubscription {
    pub user_id: Uuid,
    pub service_name: ServiceName,
    pub price: Price,
    pub start: Month,
    pub end: Option<Month>,
}

#[derive(Deserialize, Debug)]
pub struct SubscriptionBody {
    pub user_id: String,
    pub service_name: String,
    pub price: i64,
    pub start: String,
    pub end: Option<String>,
}

impl TryFrom<SubscriptionBody> for NewSubscription {
    type Error = ValidationError;

    fn try_from(body: SubscriptionBody) -> Result<Self, Self::Error> {
        let user_id = Uuid::parse_str(&body.user_id).map_err(|_| ValidationError::InvalidUserId)?;
        let service_name = ServiceName::parse(body.service_name)?;
        let price = Price::parse(body.price)?;
        let start = Month::parse(&body.start).map_err(|_| ValidationError::InvalidStart)?;
        let end = match body.end.as_deref() {
            None | Some("") => None,
            Some(token) => {
                let end = Month::parse(token).map_err(|_| InvalidEndReason::Malformed)?;

                if end < start {
                    return Err(InvalidEndReason::BeforeStart.into());
                }

                Some(end)
            }
        };

        Ok(NewSubscription {
            user_id,
            service_name,
            price,
            start,
            end,
        })
    }
}
