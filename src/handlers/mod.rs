pub mod employee;

use actix_web::web;

use crate::errors::AppError;

/// Mounts the `/api` route table. Bodies that fail to deserialize answer
/// with the same `{"error": ...}` shape as every other failure.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(web::JsonConfig::default().error_handler(|err, _req| {
                log::error!("Rejected request body: {}", err);
                AppError::BadRequest(err.to_string()).into()
            }))
            .service(
                web::resource("/employees")
                    .route(web::get().to(employee::get_employees))
                    .route(web::post().to(employee::create_employee)),
            )
            .service(
                web::resource("/employees/{id}")
                    .route(web::get().to(employee::get_employee))
                    .route(web::patch().to(employee::update_employee))
                    .route(web::delete().to(employee::delete_employee)),
            ),
    );
}
