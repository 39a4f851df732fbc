use crate::presentation::handlers::{
    ApiError, create_user, delete_user, get_user, health_check, list_users, login, update_user,
};
use actix_web::web;
use tracing::debug;

pub const API_SCOPE: &str = "/travel-journal";

/// Registers every route plus the extractor configs that turn malformed
/// bodies and ids into plain-text 400 responses.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        debug!(error = %err, "Rejected request body");
        ApiError::Validation(err.to_string()).into()
    }))
    .app_data(web::PathConfig::default().error_handler(|err, _req| {
        debug!(error = %err, "Rejected path parameter");
        ApiError::Validation(err.to_string()).into()
    }))
    .route("/health", web::get().to(health_check))
    .service(
        web::scope(API_SCOPE)
            .route("/users", web::get().to(list_users))
            .route("/login", web::post().to(login))
            .route("/user", web::post().to(create_user))
            .service(
                web::resource("/user/{id}")
                    .route(web::get().to(get_user))
                    .route(web::put().to(update_user))
                    .route(web::delete().to(delete_user)),
            ),
    );
}
