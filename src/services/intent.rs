//! 意图分类服务
//!
//! 基于有序关键词规则表的确定性分类：按固定优先级逐类匹配，
//! 命中即返回；全部未命中则归为通用咨询。不产生置信度。

use crate::models::turn::IntentLabel;

/// 有序规则表：优先级从上到下，关键词按子串匹配。
///
/// 子串语义是有意的：`depress` 可以命中 `depressed`，`vomit` 命中 `vomiting`。
const INTENT_RULES: &[(IntentLabel, &[&str])] = &[
    (
        IntentLabel::Nutrition,
        &[
            "diet",
            "nutrition",
            "food",
            "eat",
            "meal",
            "calorie",
            "sweet",
            "fries",
        ],
    ),
    (
        IntentLabel::Symptoms,
        &[
            "symptom",
            "pain",
            "hurt",
            "fever",
            "headache",
            "sick",
            "ache",
            "nausea",
            "vomit",
            "dizziness",
        ],
    ),
    (
        IntentLabel::MentalHealth,
        &[
            "stress",
            "anxiety",
            "mood",
            "feel",
            "emotional",
            "depress",
        ],
    ),
    (
        IntentLabel::Fitness,
        &["weight", "bmi", "exercise", "fitness", "workout"],
    ),
];

/// 意图分类器
#[derive(Debug, Clone, Default)]
pub struct IntentClassifier;

impl IntentClassifier {
    /// 创建分类器
    pub fn new() -> Self {
        Self
    }

    /// 对消息文本分类
    pub fn classify(&self, text: &str) -> IntentLabel {
        let text = text.to_lowercase();
        for (label, keywords) in INTENT_RULES {
            if keywords.iter().any(|kw| text.contains(kw)) {
                return *label;
            }
        }
        IntentLabel::General
    }
}
