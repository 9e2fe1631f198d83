//! Profile Routes
//!
//! 定义用户档案相关的 API 路由。

use crate::api::handlers::profile_handler::*;
use axum::{
    Router,
    routing::{get, post},
};

use crate::api::app_state::AppState;

/// 创建档案路由器
pub fn create_profile_router() -> Router<AppState> {
    Router::new()
        .route("/users", post(register_user))
        .route("/users", get(list_users))
        .route("/users/:mobile", get(get_user))
        .route("/users/:mobile/notes", post(append_note))
}
