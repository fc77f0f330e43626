use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;

/// Serialises `body` with the given status.
///
/// A serialisation failure becomes a plain-text `500` carrying the error.
pub(crate) fn json_response<T>(status: StatusCode, body: &T) -> HttpResponse
where
    T: Serialize + ?Sized,
{
    match serde_json::to_string(body) {
        Ok(json) => HttpResponse::build(status)
            .content_type(ContentType::json())
            .body(json),
        Err(err) => {
            tracing::error!("Failed to serialise response: {:?}", err);
            HttpResponse::InternalServerError()
                .content_type(ContentType::plaintext())
                .body(err.to_string())
        }
    }
}
