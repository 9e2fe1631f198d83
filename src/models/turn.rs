//! 对话轮次数据模型
//!
//! Turn 是临时实体：输入消息、推断出的意图与情感、生成的回复。
//! 除非用户选择记录到病历，一轮结束后即被丢弃。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// 意图类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntentLabel {
    /// 饮食营养
    #[serde(rename = "nutrition")]
    Nutrition,

    /// 症状咨询
    #[serde(rename = "symptoms")]
    Symptoms,

    /// 心理健康
    #[serde(rename = "mental_health")]
    MentalHealth,

    /// 运动健身
    #[serde(rename = "fitness")]
    Fitness,

    /// 通用咨询
    #[serde(rename = "general")]
    General,
}

impl fmt::Display for IntentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            IntentLabel::Nutrition => "nutrition",
            IntentLabel::Symptoms => "symptoms",
            IntentLabel::MentalHealth => "mental_health",
            IntentLabel::Fitness => "fitness",
            IntentLabel::General => "general",
        };
        write!(f, "{}", s)
    }
}

/// 情感极性（二分类）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Polarity {
    /// 正面
    #[serde(rename = "positive")]
    Positive,

    /// 负面
    #[serde(rename = "negative")]
    Negative,
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Polarity::Positive => write!(f, "positive"),
            Polarity::Negative => write!(f, "negative"),
        }
    }
}

/// 情感分类结果
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    /// 极性标签
    pub polarity: Polarity,

    /// 置信度 (0.0-1.0)
    pub confidence: f32,
}

impl Sentiment {
    /// 是否为高置信度负面情绪
    pub fn is_strongly_negative(&self) -> bool {
        self.polarity == Polarity::Negative && self.confidence > 0.7
    }
}

/// 对话轮次实体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    /// 轮次唯一标识
    pub id: String,

    /// 用户输入的原始消息
    pub message: String,

    /// 推断出的意图
    pub intent: IntentLabel,

    /// 情感分类结果（病历模式下不做情感分析）
    pub sentiment: Option<Sentiment>,

    /// 生成的回复
    pub reply: String,

    /// 是否已记录到病历
    pub recorded: bool,

    /// 创建时间
    pub created_at: DateTime<Utc>,
}

impl Turn {
    /// 创建新轮次
    pub fn new(
        message: &str,
        intent: IntentLabel,
        sentiment: Option<Sentiment>,
        reply: &str,
        recorded: bool,
    ) -> Self {
        Self {
            id: format!("turn_{}", Uuid::new_v4()),
            message: message.to_string(),
            intent,
            sentiment,
            reply: reply.to_string(),
            recorded,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_creation() {
        let turn = Turn::new(
            "I have a headache",
            IntentLabel::Symptoms,
            Some(Sentiment {
                polarity: Polarity::Negative,
                confidence: 0.9,
            }),
            "Rest and stay hydrated.",
            false,
        );

        assert!(turn.id.starts_with("turn_"));
        assert_eq!(turn.intent, IntentLabel::Symptoms);
        assert!(!turn.recorded);
    }

    #[test]
    fn test_strongly_negative_threshold() {
        let strong = Sentiment {
            polarity: Polarity::Negative,
            confidence: 0.9,
        };
        let mild = Sentiment {
            polarity: Polarity::Negative,
            confidence: 0.6,
        };
        let positive = Sentiment {
            polarity: Polarity::Positive,
            confidence: 0.99,
        };

        assert!(strong.is_strongly_negative());
        assert!(!mild.is_strongly_negative());
        assert!(!positive.is_strongly_negative());
    }

    #[test]
    fn test_intent_label_display() {
        assert_eq!(IntentLabel::MentalHealth.to_string(), "mental_health");
        assert_eq!(IntentLabel::General.to_string(), "general");
    }
}
