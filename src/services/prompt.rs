//! 提示词组装服务
//!
//! 确定性字符串模板：档案信息、意图、情感信号、饮食上下文、
//! 免责声明指令，最后是用户消息。不做分块或相关性过滤。

use std::fmt::Write;

use crate::models::profile::{DietAnalysis, UserProfile};
use crate::models::turn::{IntentLabel, Polarity, Sentiment};

/// 免责声明指令，所有回复都要求带上
const DISCLAIMER_INSTRUCTION: &str = "IMPORTANT: Always include a disclaimer that this is not \
medical advice and the user should consult healthcare professionals. Be empathetic and \
practical in your response.";

/// 根据情感信号选择共情开场白
pub fn empathetic_opening(sentiment: &Sentiment) -> &'static str {
    if sentiment.is_strongly_negative() {
        "I understand this might be concerning. "
    } else if sentiment.polarity == Polarity::Negative {
        "I'm sorry to hear you're feeling this way. "
    } else {
        "Thank you for sharing. "
    }
}

/// 提示词组装器
#[derive(Debug, Clone, Default)]
pub struct PromptBuilder;

impl PromptBuilder {
    /// 创建组装器
    pub fn new() -> Self {
        Self
    }

    /// 组装一轮对话的提示词
    pub fn build(
        &self,
        profile: &UserProfile,
        intent: IntentLabel,
        sentiment: &Sentiment,
        diet: Option<&DietAnalysis>,
        message: &str,
    ) -> String {
        let mut prompt = String::new();

        prompt.push_str("User Profile:\n");
        let _ = writeln!(prompt, "- Name: {}", profile.name);
        let _ = writeln!(prompt, "- Age: {}", profile.age);
        let _ = writeln!(prompt, "- Gender: {:?}", profile.gender);
        let _ = writeln!(prompt, "- Country: {}", profile.country);
        let _ = writeln!(prompt, "- Height: {} cm", profile.height_cm);
        let _ = writeln!(prompt, "- Weight: {} kg", profile.weight_kg);
        if let Some(bmi) = profile.bmi() {
            let _ = writeln!(prompt, "- BMI: {:.1}", bmi);
        }

        let _ = writeln!(
            prompt,
            "\nDetected intent: {}\nUser sentiment: {} (confidence {:.2})",
            intent, sentiment.polarity, sentiment.confidence
        );

        if let Some(analysis) = diet {
            if !analysis.unhealthy_foods.is_empty() {
                let _ = writeln!(
                    prompt,
                    "\nDiet context: recent intake includes {}. Suggested alternatives: {}.",
                    analysis.unhealthy_foods.join(", "),
                    analysis.recommendations.join(", ")
                );
            }
        }

        prompt.push('\n');
        prompt.push_str(Self::intent_instructions(intent));
        prompt.push('\n');
        prompt.push_str(DISCLAIMER_INSTRUCTION);
        let _ = write!(prompt, "\n\nUser message: {}", message);

        prompt
    }

    fn intent_instructions(intent: IntentLabel) -> &'static str {
        match intent {
            IntentLabel::Nutrition => {
                "Please provide specific, practical nutrition advice. Focus on:\n\
                 1. Addressing the current diet issues\n\
                 2. Providing healthy alternatives\n\
                 3. Creating a balanced meal plan\n\
                 4. Considering the user's profile"
            }
            IntentLabel::Symptoms => {
                "The user is describing symptoms. Please provide:\n\
                 1. Possible common causes (but emphasize this is not a diagnosis)\n\
                 2. General self-care recommendations\n\
                 3. When to seek medical attention\n\
                 4. Important precautions"
            }
            IntentLabel::MentalHealth => {
                "The user is seeking mental health support. Provide supportive, practical \
                 advice for stress and anxiety management. Focus on breathing exercises, \
                 routine, sleep, and when to seek professional help. Be non-judgmental."
            }
            IntentLabel::Fitness => {
                "Provide personalized fitness advice considering the user's age, weight, \
                 and goals. Include practical exercise recommendations and safety precautions."
            }
            IntentLabel::General => {
                "Provide helpful, practical health advice. If the message is a greeting, \
                 respond appropriately."
            }
        }
    }
}
