use actix_web::dev::Server;
use actix_web::{web, App, HttpResponse, HttpServer, Route};
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

use crate::config::{DatabaseSettings, Settings};
use crate::repository::SubscriptionRepository;
use crate::routes::{
    db_health_check, handle_create_subscription, handle_delete_subscription,
    handle_get_subscription, handle_list_subscriptions, handle_subscriptions_summary,
    handle_update_subscription, health_check, SubscriptionError,
};

pub struct Application {
    pub port: u16,
    pub server: Server,
}

impl Application {
    pub async fn build(config: Settings) -> Result<Self, std::io::Error> {
        let db_pool = get_connection_db_pool(&config.database);
        let repository = SubscriptionRepository::new(db_pool, config.get_request_deadline());

        let listener = TcpListener::bind(config.get_address())?;
        let port = listener.local_addr()?.port();
        let server = run(listener, repository, config.get_shutdown_timeout())?;

        Ok(Self { port, server })
    }

    pub fn get_port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stop(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub fn run(
    listener: TcpListener,
    repository: SubscriptionRepository,
    shutdown_timeout_seconds: u64,
) -> Result<Server, std::io::Error> {
    let repository = web::Data::new(repository);

    let server = HttpServer::new(move || {
        // Malformed bodies get the same JSON error shape as every other failure
        let json_config = web::JsonConfig::default().error_handler(|err, _req| {
            SubscriptionError::MalformedBody(err.to_string()).into()
        });
        let query_config = web::QueryConfig::default().error_handler(|err, _req| {
            SubscriptionError::MalformedQuery(err.to_string()).into()
        });

        // App is where your application logic lives: routing, middlewares, request handler, etc
        App::new()
            // 'wrap' method adds a middleware to the App. This specific middleware provide incoming
            // request logger
            .wrap(TracingLogger::default())
            .app_data(json_config)
            .app_data(query_config)
            .service(
                web::resource("/health_check")
                    .route(web::get().to(health_check))
                    .default_service(method_not_allowed("GET")),
            )
            .service(
                web::resource("/health_check/db")
                    .route(web::get().to(db_health_check))
                    .default_service(method_not_allowed("GET")),
            )
            .service(
                web::resource("/subscriptions")
                    .route(web::post().to(handle_create_subscription))
                    .route(web::get().to(handle_list_subscriptions))
                    .default_service(method_not_allowed("GET, POST")),
            )
            // Registered before "/subscriptions/{id}" so "summary" is not taken for an id
            .service(
                web::resource("/subscriptions/summary")
                    .route(web::get().to(handle_subscriptions_summary))
                    .default_service(method_not_allowed("GET")),
            )
            .service(
                web::resource("/subscriptions/{id}")
                    .route(web::get().to(handle_get_subscription))
                    .route(web::put().to(handle_update_subscription))
                    .route(web::delete().to(handle_delete_subscription))
                    .default_service(method_not_allowed("GET, PUT, DELETE")),
            )
            .default_service(web::to(|| async {
                Err::<HttpResponse, _>(SubscriptionError::NotFound)
            }))
            .app_data(repository.clone())
    })
    .shutdown_timeout(shutdown_timeout_seconds)
    .listen(listener)?
    .run();

    Ok(server)
}

// Fallback of a resource for every method it has no route for
fn method_not_allowed(allowed: &'static str) -> Route {
    web::to(move || async move {
        Err::<HttpResponse, _>(SubscriptionError::MethodNotAllowed(allowed))
    })
}

pub fn get_connection_db_pool(config: &DatabaseSettings) -> Pool<Postgres> {
    PgPoolOptions::new()
        .max_connections(config.get_max_connections())
        .acquire_timeout(std::time::Duration::from_secs(2))
        .connect_lazy_with(config.get_db_options())
}
