//! 会话 DTO
//!
//! 用于登录/登出和病历模式切换的请求响应序列化

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::session::UserSession;

/// 登录请求
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// 已注册的手机号
    pub mobile: String,
}

/// 病历记录模式切换请求
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportModeRequest {
    /// 是否开启
    pub enabled: bool,
}

/// 会话响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub session_id: String,
    pub mobile: String,
    pub report_mode: bool,
    pub started_at: DateTime<Utc>,
}

impl From<UserSession> for SessionResponse {
    fn from(session: UserSession) -> Self {
        Self {
            session_id: session.id,
            mobile: session.mobile,
            report_mode: session.report_mode,
            started_at: session.started_at,
        }
    }
}
