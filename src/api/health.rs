use actix_web::{get, web, HttpResponse, Responder};
use chrono::Utc;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::DBPool;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub database: String,
    pub version: String,
}

/// Run `SELECT 1` against a pooled connection.
fn check_database(pool: &DBPool) -> &'static str {
    match pool.get() {
        Ok(mut conn) => match diesel::sql_query("SELECT 1").execute(&mut conn) {
            Ok(_) => "healthy",
            Err(_) => "unhealthy",
        },
        Err(_) => "unavailable",
    }
}

/// Returns 200 when the database answers, 503 otherwise
#[get("/health")]
pub async fn health_check(pool: web::Data<DBPool>) -> impl Responder {
    let db_status = web::block(move || check_database(&pool))
        .await
        .unwrap_or("unavailable");

    let response = HealthResponse {
        status: if db_status == "healthy" {
            "ok".to_string()
        } else {
            "degraded".to_string()
        },
        timestamp: Utc::now().to_rfc3339(),
        database: db_status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    if db_status == "healthy" {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}

/// Readiness check - returns 200 when service is ready to accept traffic
#[get("/ready")]
pub async fn readiness_check(pool: web::Data<DBPool>) -> impl Responder {
    let db_status = web::block(move || check_database(&pool))
        .await
        .unwrap_or("unavailable");

    match db_status {
        "healthy" => HttpResponse::Ok().json(serde_json::json!({
            "status": "ready",
            "timestamp": Utc::now().to_rfc3339()
        })),
        _ => HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "status": "not ready",
            "reason": format!("database {}", db_status)
        })),
    }
}

/// Liveness check - returns 200 as long as the service process is running
#[get("/live")]
pub async fn liveness_check() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "alive",
        "timestamp": Utc::now().to_rfc3339()
    }))
}
