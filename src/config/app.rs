use actix_web::web;
use log::info;

use crate::{
    api::{health_controller, person_controller},
    error::ServiceError,
};

/// Reject request bodies that cannot be read as a person payload before any
/// handler runs.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        ServiceError::malformed_body(err.to_string())
            .with_tag("payload")
            .into()
    })
}

pub fn config_services(cfg: &mut web::ServiceConfig) {
    info!("Configuring routes...");
    cfg.app_data(json_config())
        .service(health_controller::health)
        .service(
            web::scope("/api")
                .service(
                    web::resource("/persons")
                        .route(web::get().to(person_controller::find_all))
                        .route(web::head().to(person_controller::find_all))
                        .route(web::post().to(person_controller::insert))
                        .default_service(web::to(person_controller::unknown_endpoint)),
                )
                .service(
                    web::resource("/persons/{id}")
                        .route(web::get().to(person_controller::find_by_id))
                        .route(web::head().to(person_controller::find_by_id))
                        .route(web::put().to(person_controller::update))
                        .route(web::delete().to(person_controller::delete))
                        .default_service(web::to(person_controller::unknown_endpoint)),
                )
                .service(
                    web::resource("/info")
                        .route(web::get().to(person_controller::info))
                        .route(web::head().to(person_controller::info))
                        .default_service(web::to(person_controller::unknown_endpoint)),
                )
                .default_service(web::to(person_controller::unknown_endpoint)),
        );
}
