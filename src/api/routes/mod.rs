//! 路由模块

pub mod chat_routes;
pub mod profile_routes;
pub mod session_routes;
