// Route exports
pub mod auth;
pub mod gifts;

use actix_web::web;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(gifts::configure)
            .configure(auth::configure),
    );
}
