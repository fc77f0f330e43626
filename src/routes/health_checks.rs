use crate::health::HealthChecker;
use crate::helpers::json_response;
use actix_web::{get, http::StatusCode, web, HttpResponse};

async fn up(checker: &HealthChecker) -> HttpResponse {
    let report = checker.check_all().await;
    let status = if report.healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    json_response(status, &report.results)
}

#[tracing::instrument(name = "Health check.", skip(checker))]
#[get("/healthz")]
pub async fn healthz(checker: web::Data<HealthChecker>) -> HttpResponse {
    up(checker.get_ref()).await
}

#[tracing::instrument(name = "Liveness check.", skip(checker))]
#[get("/livez")]
pub async fn livez(checker: web::Data<HealthChecker>) -> HttpResponse {
    up(checker.get_ref()).await
}

#[tracing::instrument(name = "Readiness check.", skip(checker))]
#[get("/readyz")]
pub async fn readyz(checker: web::Data<HealthChecker>) -> HttpResponse {
    up(checker.get_ref()).await
}
