//! Handler 模块

pub mod chat_handler;
pub mod profile_handler;
pub mod session_handler;
