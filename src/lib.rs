//! Panacea - 个性化健康对话服务
//!
//! 将用户的健康问题路由到外部大语言模型，结合本地持久化的用户档案
//! 与情感分类信号，生成个性化的健康建议。

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod observability;
pub mod services;
pub mod storage;
