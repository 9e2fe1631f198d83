//! 用户会话数据模型
//!
//! 会话是显式传递的登录作用域对象：登录创建，退出删除，仅存于内存。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 用户会话
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSession {
    /// 会话唯一标识
    pub id: String,

    /// 档案身份键（手机号）
    pub mobile: String,

    /// 病历记录模式开关
    pub report_mode: bool,

    /// 登录时间
    pub started_at: DateTime<Utc>,
}

impl UserSession {
    /// 创建新会话
    pub fn new(mobile: &str) -> Self {
        Self {
            id: format!("sess_{}", Uuid::new_v4()),
            mobile: mobile.to_string(),
            report_mode: false,
            started_at: Utc::now(),
        }
    }
}
