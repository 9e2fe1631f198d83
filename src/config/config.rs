use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// 服务地址
    pub host: String,
    /// 服务端口
    pub port: u16,
    /// 请求超时（秒）
    pub request_timeout: u64,
    /// 最大请求体大小（字节）
    pub max_request_size: usize,
}

/// 档案存储配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StorageConfig {
    /// 档案文件目录（每个用户一个 JSON 文件）
    pub data_dir: PathBuf,
}

/// 生成模型配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GenerationConfig {
    /// 后端类型: "gemini" 或 "canned"
    pub backend: String,
    /// 生成 API 基础地址
    pub base_url: String,
    /// API 密钥
    pub api_key: String,
    /// 模型名称
    pub model: String,
    /// 请求超时（秒）
    pub timeout: u64,
}

/// 情感分类模型配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SentimentConfig {
    /// 后端类型: "remote" 或 "lexicon"
    pub backend: String,
    /// 推理 API 基础地址
    pub base_url: String,
    /// API 密钥
    pub api_key: String,
    /// 模型名称
    pub model: String,
    /// 请求超时（秒）
    pub timeout: u64,
    /// 输入文本截断长度（字符）
    pub max_input_chars: usize,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别
    pub level: String,
    /// 日志文件路径（为空则只输出到控制台）
    pub log_dir: Option<PathBuf>,
}

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// 服务器配置
    pub server: ServerConfig,
    /// 档案存储配置
    pub storage: StorageConfig,
    /// 生成模型配置
    pub generation: GenerationConfig,
    /// 情感分类模型配置
    pub sentiment: SentimentConfig,
    /// 日志配置
    pub logging: LoggingConfig,
    /// 应用名称
    pub app_name: String,
    /// 环境
    pub environment: String,
}

impl AppConfig {
    /// 创建开发环境配置
    ///
    /// 开发环境默认使用离线后端（canned/lexicon），不依赖外部 API。
    pub fn development() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".into(),
                port: 8080,
                request_timeout: 30,
                max_request_size: 1024 * 1024,
            },
            storage: StorageConfig {
                data_dir: PathBuf::from("./data/profiles"),
            },
            generation: GenerationConfig {
                backend: "canned".into(),
                base_url: "https://generativelanguage.googleapis.com".into(),
                api_key: String::new(),
                model: "gemini-2.0-flash".into(),
                timeout: 30,
            },
            sentiment: SentimentConfig {
                backend: "lexicon".into(),
                base_url: "https://api-inference.huggingface.co".into(),
                api_key: String::new(),
                model: "distilbert-base-uncased-finetuned-sst-2-english".into(),
                timeout: 30,
                max_input_chars: 512,
            },
            logging: LoggingConfig {
                level: "debug".into(),
                log_dir: None,
            },
            app_name: "panacea".into(),
            environment: "development".into(),
        }
    }

    /// 创建生产环境配置
    pub fn production() -> Self {
        let mut config = Self::development();
        config.environment = "production".into();
        config.logging.level = "info".into();
        config.generation.backend = "gemini".into();
        config.sentiment.backend = "remote".into();
        config
    }
}
