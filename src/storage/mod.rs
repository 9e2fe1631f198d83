//! 存储模块
//!
//! 以身份键为单位的档案持久化，隐藏具体存储格式。

pub mod repository;

pub use repository::{JsonFileRepository, ProfileRepository};
