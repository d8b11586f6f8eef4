use reqwest::Response;
use sqlx::{migrate, Connection, Executor, PgConnection, PgPool};
use uuid::Uuid;

use subscriptions_service::{
    config::{get_configuration, DatabaseSettings, Settings},
    domain::subscription::Subscription,
    startup::{get_connection_db_pool, Application},
};

pub struct TestApp {
    pub config: Settings,
    pub address: String,
    pub db_pool: PgPool,
    pub http_client: reqwest::Client,
}

impl TestApp {
    pub async fn spawn_app() -> TestApp {
        let mut config = get_configuration().expect("Missing configuration file.");
        let db_test_name = format!("db_{}", Uuid::new_v4().to_string().replace('-', "_"));

        // We are using port 0 as way to define a different port per each test. Port 0 is a special case that operating systems
        // take into account: when port is 0, the OS will search for the first available port
        config.set_app_port(0);

        let db_pool = configure_db(&mut config.database, db_test_name).await;

        let application = Application::build(config.clone())
            .await
            .expect("Failed to build application.");

        let address = format!("http://127.0.0.1:{}", application.get_port());

        tokio::spawn(application.run_until_stop());

        TestApp {
            address,
            config,
            db_pool,
            http_client: reqwest::Client::new(),
        }
    }

    pub async fn post_subscription(&self, body: &serde_json::Value) -> Response {
        self.http_client
            .post(&format!("{}/subscriptions", self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn put_subscription(&self, id: &str, body: &serde_json::Value) -> Response {
        self.http_client
            .put(&format!("{}/subscriptions/{}", self.address, id))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get_subscription(&self, id: &str) -> Response {
        self.http_client
            .get(&format!("{}/subscriptions/{}", self.address, id))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn delete_subscription(&self, id: &str) -> Response {
        self.http_client
            .delete(&format!("{}/subscriptions/{}", self.address, id))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn list_subscriptions(&self, query: &[(&str, &str)]) -> Response {
        self.http_client
            .get(&format!("{}/subscriptions", self.address))
            .query(query)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get_summary(&self, query: &[(&str, &str)]) -> Response {
        self.http_client
            .get(&format!("{}/subscriptions/summary", self.address))
            .query(query)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    /// Creates a subscription through the API and returns what the server stored.
    pub async fn create_subscription(&self, body: serde_json::Value) -> Subscription {
        let response = self.post_subscription(&body).await;

        assert_eq!(201, response.status().as_u16(), "Body was {}", body);

        response
            .json()
            .await
            .expect("Failed to parse created subscription.")
    }
}

pub fn subscription_body(
    user_id: Uuid,
    service_name: &str,
    price: i64,
    start: &str,
    end: Option<&str>,
) -> serde_json::Value {
    let mut body = serde_json::json!({
        "user_id": user_id.to_string(),
        "service_name": service_name,
        "price": price,
        "start": start,
    });

    if let Some(end) = end {
        body["end"] = serde_json::Value::from(end);
    }

    body
}

async fn configure_db(db_config: &mut DatabaseSettings, db_test_name: String) -> PgPool {
    // Create database
    let mut connection = PgConnection::connect_with(&db_config.get_server_options())
        .await
        .expect("Failed to connect to Postgres.");

    connection
        .execute(&*format!(r#"CREATE DATABASE "{}";"#, db_test_name))
        .await
        .expect("Failed to create database.");

    connection
        .close()
        .await
        .expect("Failed to close connection.");

    // Execute migrations
    db_config.set_name(db_test_name);

    let db_pool = get_connection_db_pool(db_config);

    migrate!("./migrations")
        .run(&db_pool)
        .await
        .expect("Failed to run migrations.");

    println!("Database {} created!!", db_config.get_name());

    db_pool
}
