use crate::health::HealthChecker;
use crate::helpers::json_response;
use actix_web::{get, http::StatusCode, web, HttpResponse};

#[tracing::instrument(name = "Status snapshot.", skip(checker))]
#[get("/statusz")]
pub async fn statusz(checker: web::Data<HealthChecker>) -> HttpResponse {
    json_response(StatusCode::OK, &checker.status())
}
