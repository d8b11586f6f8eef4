use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::month::Month;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Subscription {
    pub id: Uuid,
    pub user_id: Uuid,
    pub service_name: String,
    pub price: i64,
    pub start_date: Month,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<Month>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
