//! HTTP inbound adapter exposing the `/api` REST endpoints.

pub mod accounts;
pub mod admin;
pub mod auth;
pub mod blood;
pub mod donor;
pub mod envelope;
pub mod error;
pub mod health;
pub mod inventory;
pub mod recipient;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;

/// Register every `/api` route together with the extractor configs that
/// fold malformed bodies and paths into the error envelope.
///
/// Callers still provide `web::Data<HttpState>` as app data.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
            .app_data(web::PathConfig::default().error_handler(error::path_error_handler))
            .service(accounts::register)
            .service(accounts::login)
            .service(donor::donate)
            .service(donor::history)
            .service(recipient::create_request)
            .service(recipient::list_requests)
            .service(admin::pending_requests)
            .service(admin::set_request_status)
            .service(admin::users)
            .service(admin::donations)
            .service(blood::availability)
            .service(blood::compatible)
            .service(inventory::list_inventory)
            .service(inventory::adjust_inventory),
    );
}
