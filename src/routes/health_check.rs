use actix_web::{web, HttpRequest, HttpResponse, Responder};

use crate::repository::SubscriptionRepository;

/// Endpoint used by clients to know if the server is working
#[tracing::instrument(name = "Health Check handler")]
pub async fn health_check(_: HttpRequest) -> impl Responder {
    HttpResponse::Ok()
}

/// Same as `health_check`, but also requires a round trip to the database
#[tracing::instrument(name = "Database Health Check handler", skip(repository))]
pub async fn db_health_check(repository: web::Data<SubscriptionRepository>) -> HttpResponse {
    match repository.ping().await {
        Ok(()) => HttpResponse::Ok().finish(),
        Err(err) => {
            tracing::error!("Database health check failed: {:?}", err);
            HttpResponse::ServiceUnavailable().finish()
        }
    }
}
