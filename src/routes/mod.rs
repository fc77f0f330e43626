pub mod health_checks;
pub mod status;

pub use health_checks::*;
pub use status::*;

use actix_web::web;

/// Registers `/healthz`, `/livez`, `/readyz` and `/statusz`.
///
/// Handlers expect a `web::Data<HealthChecker>` in the app data. Mount the
/// routes at the root or inside any scope:
///
/// ```ignore
/// App::new()
///     .app_data(web::Data::new(checker))
///     .configure(zpages::routes::configure)
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(healthz)
        .service(livez)
        .service(readyz)
        .service(statusz);
}
