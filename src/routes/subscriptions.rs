use actix_web::{
    web::{self, Query},
    HttpResponse,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    domain::{
        new_subscription::{NewSubscription, SubscriptionBody},
        page::Page,
        subscription_filter::SubscriptionFilter,
        validation_error::ValidationError,
    },
    repository::SubscriptionRepository,
    routes::error::SubscriptionError,
};

#[derive(Deserialize, Debug)]
pub struct ListParameters {
    pub user_id: Option<String>,
    pub service_name: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

#[tracing::instrument(
    name = "Creating a new subscription handler",
    skip(body, repository),
    fields(
        user_id = %body.user_id,
        service_name = %body.service_name
    )
)]
pub async fn handle_create_subscription(
    body: web::Json<SubscriptionBody>,
    repository: web::Data<SubscriptionRepository>,
) -> Result<HttpResponse, SubscriptionError> {
    let new_subscription: NewSubscription = body.into_inner().try_into()?;
    let subscription = repository
        .create(&new_subscription)
        .await
        .map_err(|err| SubscriptionError::from_repository(err, "failed to create subscription"))?;

    Ok(HttpResponse::Created().json(subscription))
}

#[tracing::instrument(name = "Listing subscriptions handler", skip(repository))]
pub async fn handle_list_subscriptions(
    parameters: Query<ListParameters>,
    repository: web::Data<SubscriptionRepository>,
) -> Result<HttpResponse, SubscriptionError> {
    let filter = SubscriptionFilter::parse(
        parameters.user_id.as_deref(),
        parameters.service_name.as_deref(),
    )?;
    let page = Page::parse(parameters.limit.as_deref(), parameters.offset.as_deref())?;
    let subscriptions = repository
        .list(&filter, page)
        .await
        .map_err(|err| SubscriptionError::from_repository(err, "failed to list subscriptions"))?;

    Ok(HttpResponse::Ok().json(subscriptions))
}

#[tracing::instrument(name = "Getting a subscription handler", skip(repository))]
pub async fn handle_get_subscription(
    path: web::Path<String>,
    repository: web::Data<SubscriptionRepository>,
) -> Result<HttpResponse, SubscriptionError> {
    let id = parse_id(&path)?;
    let subscription = repository
        .get_by_id(id)
        .await
        .map_err(|err| SubscriptionError::from_repository(err, "failed to get subscription"))?;

    Ok(HttpResponse::Ok().json(subscription))
}

#[tracing::instrument(
    name = "Replacing a subscription handler",
    skip(body, repository),
    fields(
        user_id = %body.user_id,
        service_name = %body.service_name
    )
)]
pub async fn handle_update_subscription(
    path: web::Path<String>,
    body: web::Json<SubscriptionBody>,
    repository: web::Data<SubscriptionRepository>,
) -> Result<HttpResponse, SubscriptionError> {
    let id = parse_id(&path)?;
    let new_subscription: NewSubscription = body.into_inner().try_into()?;
    let subscription = repository
        .update_by_id(id, &new_subscription)
        .await
        .map_err(|err| SubscriptionError::from_repository(err, "failed to update subscription"))?;

    Ok(HttpResponse::Ok().json(subscription))
}

#[tracing::instrument(name = "Deleting a subscription handler", skip(repository))]
pub async fn handle_delete_subscription(
    path: web::Path<String>,
    repository: web::Data<SubscriptionRepository>,
) -> Result<HttpResponse, SubscriptionError> {
    let id = parse_id(&path)?;

    repository
        .delete_by_id(id)
        .await
        .map_err(|err| SubscriptionError::from_repository(err, "failed to delete subscription"))?;

    Ok(HttpResponse::NoContent().finish())
}

fn parse_id(raw: &str) -> Result<Uuid, ValidationError> {
    Uuid::parse_str(raw).map_err(|_| ValidationError::InvalidId)
}
