use chrono::Utc;
use serde_json::Value;
use std::net::TcpListener;
use std::sync::Arc;
use zpages::configuration::get_configuration;
use zpages::health::{HealthChecker, StatusProvider};
use zpages::startup::run;
use zpages::telemetry::{get_subscriber, init_subscriber};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let subscriber = get_subscriber("zpages".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    let settings = get_configuration().expect("Failed to read configuration.");

    let aws = Arc::new(settings.aws_context());
    let drivers = settings.driver_set(&aws);
    tracing::info!(
        probes = drivers.len(),
        aws_region = %aws.region(),
        "Configured health probes"
    );

    // VERSION and ENV/ENVIRONMENT are added on every request
    let configured = settings.status.clone();
    let status = StatusProvider::producer(move || {
        let mut status = configured.clone();
        status.insert("Time".to_string(), Value::String(Utc::now().to_rfc3339()));
        status
    });
    let checker = HealthChecker::new(drivers).with_status(status);

    let address = format!("{}:{}", settings.app_host, settings.app_port);
    tracing::info!("Start server at {:?}", &address);
    let listener = TcpListener::bind(&address)?;

    run(listener, checker).await?.await
}
