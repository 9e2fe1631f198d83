use crate::config::config::AppConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::PathBuf;

/// 配置加载器
pub struct ConfigLoader;

impl ConfigLoader {
    /// 从默认路径加载配置
    ///
    /// 搜索路径：
    /// 1. 开发环境默认值
    /// 2. ./config.toml
    /// 3. 环境变量（PANACEA_ 前缀）
    pub fn load() -> Result<AppConfig, figment::Error> {
        let figment = Figment::from(Serialized::defaults(AppConfig::development()))
            .merge(Toml::file("config.toml"))
            .merge(Env::prefixed("PANACEA_").split("_").global());

        figment.extract()
    }

    /// 从指定路径加载配置
    pub fn load_from(path: PathBuf) -> Result<AppConfig, figment::Error> {
        let figment = Figment::from(Serialized::defaults(AppConfig::development()))
            .merge(Toml::file(path))
            .merge(Env::prefixed("PANACEA_").split("_").global());

        figment.extract()
    }

    /// 验证配置
    pub fn validate(config: &AppConfig) -> Result<(), ConfigValidationError> {
        if config.server.port == 0 {
            return Err(ConfigValidationError::InvalidPort);
        }

        if config.storage.data_dir.as_os_str().is_empty() {
            return Err(ConfigValidationError::MissingDataDir);
        }

        if config.generation.backend == "gemini" && config.generation.api_key.is_empty() {
            return Err(ConfigValidationError::MissingGenerationKey);
        }

        if config.sentiment.backend == "remote" && config.sentiment.base_url.is_empty() {
            return Err(ConfigValidationError::MissingSentimentUrl);
        }

        if config.sentiment.max_input_chars == 0 {
            return Err(ConfigValidationError::InvalidTruncation);
        }

        Ok(())
    }
}

/// 配置验证错误
#[derive(thiserror::Error, Debug)]
pub enum ConfigValidationError {
    #[error("服务端口无效，必须大于 0")]
    InvalidPort,

    #[error("档案存储目录未配置")]
    MissingDataDir,

    #[error("gemini 后端需要配置 API 密钥")]
    MissingGenerationKey,

    #[error("remote 情感后端需要配置推理服务地址")]
    MissingSentimentUrl,

    #[error("情感输入截断长度无效，必须大于 0")]
    InvalidTruncation,
}

/// 获取默认配置文件路径
pub fn default_config_path() -> PathBuf {
    PathBuf::from("config.toml")
}

/// 检查配置文件是否存在
pub fn config_exists() -> bool {
    default_config_path().exists()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_development() {
        let config = AppConfig::development();
        assert!(ConfigLoader::validate(&config).is_ok());
    }

    #[test]
    fn test_validate_rejects_gemini_without_key() {
        let mut config = AppConfig::development();
        config.generation.backend = "gemini".into();
        config.generation.api_key.clear();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigValidationError::MissingGenerationKey)
        ));
    }

    #[test]
    fn test_validate_rejects_zero_port() {
        let mut config = AppConfig::development();
        config.server.port = 0;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigValidationError::InvalidPort)
        ));
    }
}
