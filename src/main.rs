use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{http, web, App, HttpServer};
use log::{error, info};
use tracing_actix_web::TracingLogger;

use phonebook::{
    api::person_controller,
    config::{self, settings::{Settings, StoreBackend}},
    middleware::request_logger::RequestLogger,
    storage::{InMemoryPersonStore, PersonStore, RedisPersonStore},
    utils::logger::{init_logging, LogFormat},
};

fn build_store(settings: &Settings) -> std::io::Result<Arc<dyn PersonStore>> {
    match settings.backend {
        StoreBackend::Memory => {
            info!("Using in-memory person store");
            Ok(Arc::new(InMemoryPersonStore::new()))
        }
        StoreBackend::Redis => {
            let url = settings.redis_url.as_deref().unwrap_or_default();
            let pool = config::cache::init_redis_client(url, settings.redis_pool_size)
                .map_err(|e| std::io::Error::other(format!("redis unavailable: {}", e)))?;
            info!("Using redis person store");
            Ok(Arc::new(RedisPersonStore::new(pool)))
        }
    }
}

#[actix_rt::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    init_logging(LogFormat::from_env_or_default());

    let settings = Settings::from_env().map_err(|e| {
        error!("Invalid configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    })?;

    let store = web::Data::from(build_store(&settings)?);
    let (host, port) = settings.bind_address();

    info!("Server running on {}:{}", host, port);
    HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .send_wildcard()
                    .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
                    .allowed_header(http::header::CONTENT_TYPE)
                    .max_age(3600),
            )
            .wrap(RequestLogger)
            .wrap(TracingLogger::default())
            .app_data(store.clone())
            .configure(config::app::config_services)
            .default_service(web::to(person_controller::unknown_endpoint))
    })
    .bind((host, port))?
    .run()
    .await
}
