use actix_web::{
    web::{self, Query},
    HttpResponse,
};
use serde::{Deserialize, Serialize};

use crate::{
    domain::{billing_period::BillingPeriod, subscription_filter::SubscriptionFilter},
    repository::SubscriptionRepository,
    routes::error::SubscriptionError,
};

#[derive(Deserialize, Debug)]
pub struct SummaryParameters {
    pub from: Option<String>,
    pub to: Option<String>,
    pub user_id: Option<String>,
    pub service_name: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct SummaryResult {
    pub total: i64,
}

#[tracing::instrument(name = "Summarizing subscription costs handler", skip(repository))]
pub async fn handle_subscriptions_summary(
    parameters: Query<SummaryParameters>,
    repository: web::Data<SubscriptionRepository>,
) -> Result<HttpResponse, SubscriptionError> {
    let period = BillingPeriod::parse(
        parameters.from.as_deref().unwrap_or_default(),
        parameters.to.as_deref().unwrap_or_default(),
    )?;
    let filter = SubscriptionFilter::parse(
        parameters.user_id.as_deref(),
        parameters.service_name.as_deref(),
    )?;
    let total = repository
        .summary(period, &filter)
        .await
        .map_err(|err| SubscriptionError::from_repository(err, "failed to get summary"))?;

    Ok(HttpResponse::Ok().json(SummaryResult { total }))
}
