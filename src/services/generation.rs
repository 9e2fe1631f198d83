//! 回复生成服务
//!
//! gemini 后端单次调用外部生成式 API，不做重试；canned 后端为
//! 离线建议表，按提示词中的关键词给出固定建议，用于开发和测试。

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::config::GenerationConfig;
use crate::error::{AppError, Result};

/// 生成模型 trait
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GenerationModel: Send + Sync {
    /// 根据提示词生成回复文本
    async fn generate(&self, prompt: &str) -> Result<String>;
}

// ===== Canned backend =====

/// 关键词 → 固定建议
const CANNED_ADVICE: &[(&str, &str)] = &[
    (
        "fever",
        "Rest, stay hydrated, and monitor your temperature. Consult a doctor if fever persists above 38°C for more than 3 days.",
    ),
    (
        "headache",
        "Rest in a quiet room, stay hydrated, and avoid bright screens. Seek medical advice if severe or accompanied by other symptoms.",
    ),
    (
        "cough",
        "Stay hydrated, use honey in warm water, and avoid irritants. See a doctor if accompanied by fever or breathing difficulties.",
    ),
    (
        "stomach",
        "Eat bland foods, avoid spicy or greasy meals, and stay hydrated. Seek medical attention if severe pain or vomiting persists.",
    ),
    (
        "nausea",
        "Sip clear fluids, eat small bland meals, and avoid strong odors. Seek help if unable to keep fluids down.",
    ),
    (
        "dizziness",
        "Sit or lie down immediately and rise slowly from a sitting position. Consult a doctor if frequent or severe.",
    ),
    (
        "stress",
        "Consider relaxation techniques, a regular routine, and adequate sleep. If feelings persist, speaking with a mental health professional can help.",
    ),
    (
        "diet",
        "Aim for balanced meals with vegetables, whole grains, and lean protein, and limit processed foods and sugary drinks.",
    ),
    (
        "exercise",
        "Regular moderate exercise such as walking or swimming is a good start. Increase intensity gradually and warm up first.",
    ),
];

const GENERAL_ADVICE: &str = "It's important to monitor how you feel and consult a healthcare \
professional if anything persists or worsens. Rest and stay hydrated in the meantime. \
This is general guidance, not medical advice.";

/// 离线建议表生成模型
#[derive(Debug, Clone, Default)]
pub struct CannedGenerationModel;

impl CannedGenerationModel {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl GenerationModel for CannedGenerationModel {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let prompt = prompt.to_lowercase();
        for (keyword, advice) in CANNED_ADVICE {
            if prompt.contains(keyword) {
                return Ok((*advice).to_string());
            }
        }
        Ok(GENERAL_ADVICE.to_string())
    }
}

// ===== Gemini backend =====

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: GeminiContent,
}

#[derive(Debug, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Deserialize)]
struct GeminiPart {
    #[serde(default)]
    text: String,
}

/// Gemini 生成模型客户端
pub struct GeminiGenerationModel {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GeminiGenerationModel {
    pub fn new(config: &GenerationConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        })
    }
}

#[async_trait]
impl GenerationModel for GeminiGenerationModel {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&serde_json::json!({
                "contents": [{ "parts": [{ "text": prompt }] }]
            }))
            .send()
            .await?;

        if response.status().as_u16() == 429 {
            return Err(AppError::RateLimited);
        }
        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::ServiceUnavailable(format!(
                "生成 API 调用失败: {}",
                error_text
            )));
        }

        let body: GeminiResponse = response.json().await?;
        let text = body
            .candidates
            .into_iter()
            .next()
            .map(|c| {
                c.content
                    .parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(AppError::ServiceUnavailable(
                "生成 API 返回空回复".to_string(),
            ));
        }

        Ok(text)
    }
}

/// 创建生成模型
pub fn create_generation_model(config: &GenerationConfig) -> Result<Box<dyn GenerationModel>> {
    match config.backend.as_str() {
        "gemini" => {
            let model = GeminiGenerationModel::new(config)?;
            Ok(Box::new(model))
        }
        _ => Ok(Box::new(CannedGenerationModel::new())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn gemini_config(base_url: &str) -> GenerationConfig {
        GenerationConfig {
            backend: "gemini".into(),
            base_url: base_url.into(),
            api_key: "test-key".into(),
            model: "gemini-2.0-flash".into(),
            timeout: 5,
        }
    }

    #[tokio::test]
    async fn test_canned_matches_keyword() {
        let model = CannedGenerationModel::new();
        let reply = model.generate("User reports a fever since Monday").await.unwrap();
        assert!(reply.contains("temperature"));
    }

    #[tokio::test]
    async fn test_canned_falls_back_to_general() {
        let model = CannedGenerationModel::new();
        let reply = model.generate("hello").await.unwrap();
        assert_eq!(reply, GENERAL_ADVICE);
    }

    #[tokio::test]
    async fn test_gemini_extracts_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-2.0-flash:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{
                    "content": { "parts": [{ "text": "Drink more water." }] }
                }]
            })))
            .mount(&server)
            .await;

        let model = GeminiGenerationModel::new(&gemini_config(&server.uri())).unwrap();
        let reply = model.generate("advice please").await.unwrap();
        assert_eq!(reply, "Drink more water.");
    }

    #[tokio::test]
    async fn test_gemini_maps_429_to_rate_limited() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let model = GeminiGenerationModel::new(&gemini_config(&server.uri())).unwrap();
        let err = model.generate("advice please").await.unwrap_err();
        assert!(matches!(err, AppError::RateLimited));
    }

    #[tokio::test]
    async fn test_gemini_maps_error_to_service_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .mount(&server)
            .await;

        let model = GeminiGenerationModel::new(&gemini_config(&server.uri())).unwrap();
        let err = model.generate("advice please").await.unwrap_err();
        assert!(matches!(err, AppError::ServiceUnavailable(_)));
    }

    #[tokio::test]
    async fn test_gemini_empty_candidates_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "candidates": [] })),
            )
            .mount(&server)
            .await;

        let model = GeminiGenerationModel::new(&gemini_config(&server.uri())).unwrap();
        let err = model.generate("advice please").await.unwrap_err();
        assert!(matches!(err, AppError::ServiceUnavailable(_)));
    }
}
