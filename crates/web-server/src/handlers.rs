use axum::Json;
use serde::Serialize;

/// Response body for the service banner at `GET /`.
#[derive(Debug, Serialize)]
pub struct ApiStatus {
    pub status: &'static str,
    pub message: &'static str,
}

/// # GET /
pub async fn root() -> Json<ApiStatus> {
    Json(ApiStatus {
        status: "ok",
        message: "Todo API is running",
    })
}

/// Response body for the monitoring probe at `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
}

/// # GET /health
pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus { status: "healthy" })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn root_reports_the_running_banner() {
        let Json(body) = root().await;
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"status": "ok", "message": "Todo API is running"})
        );
    }

    #[tokio::test]
    async fn health_reports_healthy() {
        let Json(body) = health().await;
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value, serde_json::json!({"status": "healthy"}));
    }
}
