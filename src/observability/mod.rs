//! 可观测性模块
//!
//! 提供应用指标、健康检查和版本端点。

use axum::{Json, Router, response::IntoResponse, routing::get};

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

// ===== Simple Metrics (using atomics for zero-dep implementation) =====

/// 简单应用指标
#[derive(Clone, Debug, Default)]
pub struct AppMetrics {
    pub turns_total: Arc<AtomicU64>,
    pub generation_failures_total: Arc<AtomicU64>,
    pub sentiment_failures_total: Arc<AtomicU64>,
    pub users_registered_total: Arc<AtomicU64>,
    pub notes_recorded_total: Arc<AtomicU64>,
    pub sessions_active: Arc<AtomicUsize>,
}

impl AppMetrics {
    /// 记录完成的对话轮次
    pub fn record_turn(&self) {
        self.turns_total.fetch_add(1, Ordering::SeqCst);
    }

    /// 记录生成 API 失败
    pub fn record_generation_failure(&self) {
        self.generation_failures_total.fetch_add(1, Ordering::SeqCst);
    }

    /// 记录情感模型失败
    pub fn record_sentiment_failure(&self) {
        self.sentiment_failures_total.fetch_add(1, Ordering::SeqCst);
    }

    /// 记录用户注册
    pub fn record_registration(&self) {
        self.users_registered_total.fetch_add(1, Ordering::SeqCst);
    }

    /// 记录病历写入
    pub fn record_note(&self) {
        self.notes_recorded_total.fetch_add(1, Ordering::SeqCst);
    }

    /// 更新活跃会话数
    pub fn set_active_sessions(&self, count: usize) {
        self.sessions_active.store(count, Ordering::SeqCst);
    }

    /// 生成 Prometheus 格式指标
    pub fn gather(&self) -> String {
        format!(
            r#"# HELP turns_total Total chat turns completed
# TYPE turns_total counter
turns_total {}
# HELP generation_failures_total Failed generation API calls
# TYPE generation_failures_total counter
generation_failures_total {}
# HELP sentiment_failures_total Failed sentiment model calls
# TYPE sentiment_failures_total counter
sentiment_failures_total {}
# HELP users_registered_total Total registered users
# TYPE users_registered_total counter
users_registered_total {}
# HELP notes_recorded_total Medical notes recorded
# TYPE notes_recorded_total counter
notes_recorded_total {}
# HELP sessions_active Active login sessions
# TYPE sessions_active gauge
sessions_active {}
"#,
            self.turns_total.load(Ordering::SeqCst),
            self.generation_failures_total.load(Ordering::SeqCst),
            self.sentiment_failures_total.load(Ordering::SeqCst),
            self.users_registered_total.load(Ordering::SeqCst),
            self.notes_recorded_total.load(Ordering::SeqCst),
            self.sessions_active.load(Ordering::SeqCst),
        )
    }
}

// ===== Health Check =====

/// 健康检查状态
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: String,
    pub version: String,
    pub uptime_seconds: f64,
}

/// 应用状态（用于健康检查）
#[derive(Clone)]
pub struct ObservabilityState {
    pub metrics: AppMetrics,
    pub start_time: DateTime<Utc>,
    pub version: String,
}

impl ObservabilityState {
    pub fn new(version: String, metrics: AppMetrics) -> Self {
        Self {
            metrics,
            start_time: Utc::now(),
            version,
        }
    }

    /// 获取应用正常运行时间
    pub fn uptime_seconds(&self) -> f64 {
        (Utc::now() - self.start_time).num_seconds() as f64
    }
}

// ===== Health Check Handlers =====

/// 获取健康状态
pub async fn health_check(
    state: axum::extract::State<Arc<ObservabilityState>>,
) -> impl IntoResponse {
    let health_status = HealthStatus {
        status: "healthy".to_string(),
        timestamp: Utc::now().to_rfc3339(),
        version: state.version.clone(),
        uptime_seconds: state.uptime_seconds(),
    };

    (axum::http::StatusCode::OK, Json(health_status))
}

/// 简单存活检查
pub async fn liveness() -> impl IntoResponse {
    "OK"
}

/// Prometheus 指标端点
pub async fn metrics(state: axum::extract::State<Arc<ObservabilityState>>) -> impl IntoResponse {
    let output = state.metrics.gather();
    (axum::http::StatusCode::OK, output)
}

/// 版本信息端点
pub async fn version(state: axum::extract::State<Arc<ObservabilityState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "version": state.version,
        "uptime_seconds": state.uptime_seconds(),
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

/// 创建可观测性路由
pub fn create_observability_router(state: Arc<ObservabilityState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/live", get(liveness))
        .route("/metrics", get(metrics))
        .route("/version", get(version))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_counters() {
        let metrics = AppMetrics::default();
        metrics.record_turn();
        metrics.record_turn();
        metrics.record_generation_failure();
        metrics.set_active_sessions(3);

        let output = metrics.gather();
        assert!(output.contains("turns_total 2"));
        assert!(output.contains("generation_failures_total 1"));
        assert!(output.contains("sessions_active 3"));
    }

    #[test]
    fn test_metrics_shared_across_clones() {
        let metrics = AppMetrics::default();
        let clone = metrics.clone();
        clone.record_turn();
        assert!(metrics.gather().contains("turns_total 1"));
    }
}
