//! 情感分类服务
//!
//! 二分类（positive/negative）+ 置信度。remote 后端委托外部预训练
//! 分类模型；lexicon 后端为离线词表打分，用于开发和测试。

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::config::SentimentConfig;
use crate::error::{AppError, Result};
use crate::models::turn::{Polarity, Sentiment};

/// 情感分类模型 trait
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SentimentModel: Send + Sync {
    /// 对文本打分
    async fn score(&self, text: &str) -> Result<Sentiment>;
}

// ===== Lexicon backend =====

const POSITIVE_WORDS: &[&str] = &[
    "good", "great", "better", "happy", "glad", "thanks", "thank", "fine", "well", "improve",
    "recovered", "energetic", "relaxed", "love", "enjoy",
];

const NEGATIVE_WORDS: &[&str] = &[
    "bad", "worse", "pain", "hurt", "sick", "tired", "stress", "stressed", "anxious", "worried",
    "sad", "depressed", "can't", "cannot", "awful", "terrible", "weak",
];

/// 离线词表情感模型
///
/// 统计正负词频，置信度为多数词占比；无命中词时默认弱正面，
/// 与二分类模型对中性文本的行为一致。
#[derive(Debug, Clone, Default)]
pub struct LexiconSentimentModel;

impl LexiconSentimentModel {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SentimentModel for LexiconSentimentModel {
    async fn score(&self, text: &str) -> Result<Sentiment> {
        let text = text.to_lowercase();
        let positive = POSITIVE_WORDS.iter().filter(|w| text.contains(*w)).count();
        let negative = NEGATIVE_WORDS.iter().filter(|w| text.contains(*w)).count();
        let total = positive + negative;

        if total == 0 {
            return Ok(Sentiment {
                polarity: Polarity::Positive,
                confidence: 0.5,
            });
        }

        let (polarity, majority) = if negative > positive {
            (Polarity::Negative, negative)
        } else {
            (Polarity::Positive, positive)
        };

        Ok(Sentiment {
            polarity,
            confidence: majority as f32 / total as f32,
        })
    }
}

// ===== Remote backend =====

/// 远程推理服务返回的标签分数对
#[derive(Debug, Deserialize)]
struct RemoteLabelScore {
    label: String,
    score: f32,
}

/// 远程情感分类模型客户端
///
/// 对接 HuggingFace 推理接口形态的 SST-2 二分类模型。
pub struct RemoteSentimentModel {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    max_input_chars: usize,
}

impl RemoteSentimentModel {
    pub fn new(config: &SentimentConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            max_input_chars: config.max_input_chars,
        })
    }

    /// 截断输入，分类模型有输入长度上限
    fn truncate(&self, text: &str) -> String {
        text.chars().take(self.max_input_chars).collect()
    }
}

#[async_trait]
impl SentimentModel for RemoteSentimentModel {
    async fn score(&self, text: &str) -> Result<Sentiment> {
        let url = format!("{}/models/{}", self.base_url, self.model);

        let mut request = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "inputs": self.truncate(text) }));
        if !self.api_key.is_empty() {
            request = request.bearer_auth(&self.api_key);
        }

        let response = request.send().await?;

        if response.status().as_u16() == 429 {
            return Err(AppError::RateLimited);
        }
        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::ServiceUnavailable(format!(
                "情感模型调用失败: {}",
                error_text
            )));
        }

        let results: Vec<Vec<RemoteLabelScore>> = response.json().await?;
        let best = results
            .into_iter()
            .next()
            .unwrap_or_default()
            .into_iter()
            .max_by(|a, b| a.score.total_cmp(&b.score))
            .ok_or_else(|| {
                AppError::ServiceUnavailable("情感模型返回空结果".to_string())
            })?;

        let polarity = match best.label.to_uppercase().as_str() {
            "POSITIVE" => Polarity::Positive,
            "NEGATIVE" => Polarity::Negative,
            other => {
                return Err(AppError::ServiceUnavailable(format!(
                    "情感模型返回未知标签: {}",
                    other
                )));
            }
        };

        Ok(Sentiment {
            polarity,
            confidence: best.score,
        })
    }
}

/// 创建情感分类模型
pub fn create_sentiment_model(config: &SentimentConfig) -> Result<Box<dyn SentimentModel>> {
    match config.backend.as_str() {
        "remote" => {
            let model = RemoteSentimentModel::new(config)?;
            Ok(Box::new(model))
        }
        _ => Ok(Box::new(LexiconSentimentModel::new())),
    }
}
