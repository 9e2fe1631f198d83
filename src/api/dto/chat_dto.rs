//! 对话 DTO
//!
//! 用于对话 API 的请求和响应序列化

use serde::{Deserialize, Serialize};

use crate::models::turn::{Sentiment, Turn};

/// 对话请求
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// 用户消息
    pub message: String,

    /// 本轮是否记录到病历
    #[serde(default)]
    pub record: bool,
}

/// 情感分类响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentDto {
    pub label: String,
    pub confidence: f32,
}

impl From<Sentiment> for SentimentDto {
    fn from(sentiment: Sentiment) -> Self {
        Self {
            label: sentiment.polarity.to_string(),
            confidence: sentiment.confidence,
        }
    }
}

/// 对话响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub turn_id: String,
    pub reply: String,
    pub intent: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<SentimentDto>,

    pub recorded: bool,
}

impl From<Turn> for ChatResponse {
    fn from(turn: Turn) -> Self {
        Self {
            turn_id: turn.id,
            reply: turn.reply,
            intent: turn.intent.to_string(),
            sentiment: turn.sentiment.map(Into::into),
            recorded: turn.recorded,
        }
    }
}
