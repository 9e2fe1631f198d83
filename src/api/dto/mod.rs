//! DTO 模块

pub mod chat_dto;
pub mod profile_dto;
pub mod session_dto;
