use subscriptions_service::config::get_configuration;
use subscriptions_service::startup::Application;
use subscriptions_service::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let config = get_configuration().expect("Missing configuration file.");
    let subscriber = get_subscriber(
        String::from("subscriptions_service"),
        config.get_log_level(),
    );

    init_subscriber(subscriber);

    let application = Application::build(config.clone()).await?;

    tracing::info!(
        "Server listening on {}:{}",
        config.application.get_host(),
        application.get_port()
    );

    application.run_until_stop().await?;

    tracing::info!("Server stopped");

    Ok(())
}
