use actix_web::{get, web, HttpResponse};
use chrono::Utc;
use log::{error, info};
use serde::Serialize;
use tokio::time::{timeout, Duration};

use crate::storage::PersonStore;

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
enum Status {
    #[serde(rename = "healthy")]
    Healthy,
    #[serde(rename = "unhealthy")]
    Unhealthy,
}

#[derive(Serialize)]
struct StoreHealth {
    backend: &'static str,
    status: Status,
}

#[derive(Serialize)]
struct HealthResponse {
    status: Status,
    timestamp: String,
    store: StoreHealth,
}

/// Report whether the person store answers a ping within five seconds.
///
/// Responds 200 when the store is reachable and 503 otherwise; the body has
/// the same shape in both cases.
#[get("/health")]
pub async fn health(store: web::Data<dyn PersonStore>) -> HttpResponse {
    info!("Health check requested");

    let status = match timeout(Duration::from_secs(5), store.ping()).await {
        Ok(Ok(())) => Status::Healthy,
        Ok(Err(e)) => {
            error!("Store health check failed: {}", e);
            Status::Unhealthy
        }
        Err(_) => {
            error!("Store health check timeout");
            Status::Unhealthy
        }
    };

    let body = HealthResponse {
        status,
        timestamp: Utc::now().to_rfc3339(),
        store: StoreHealth {
            backend: store.backend(),
            status,
        },
    };

    match status {
        Status::Healthy => HttpResponse::Ok().json(body),
        Status::Unhealthy => HttpResponse::ServiceUnavailable().json(body),
    }
}
