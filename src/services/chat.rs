//! 会话与对话编排服务
//!
//! SessionRegistry 管理登录作用域的会话对象；ChatService 按轮次编排
//! 意图分类 → 情感分析 → 提示词组装 → 回复生成 → 可选的病历记录。

use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::error::{AppError, Result};
use crate::models::session::UserSession;
use crate::models::turn::{IntentLabel, Turn};
use crate::observability::AppMetrics;
use crate::services::diet::DietAnalyzer;
use crate::services::generation::GenerationModel;
use crate::services::intent::IntentClassifier;
use crate::services::profile::ProfileService;
use crate::services::prompt::{PromptBuilder, empathetic_opening};
use crate::services::sentiment::SentimentModel;

/// 病历模式下的确认回复
const REPORT_MODE_ACK: &str =
    "✓ Added to your medical record. Continue providing information or turn off report mode.";

/// 会话注册表
///
/// 仅存于内存；进程退出即全部失效，不做持久化。
#[derive(Default)]
pub struct SessionRegistry {
    sessions: DashMap<String, UserSession>,
}

impl SessionRegistry {
    /// 创建注册表
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }

    /// 登录：为已验证存在的用户创建会话
    pub fn login(&self, mobile: &str) -> UserSession {
        let session = UserSession::new(mobile);
        self.sessions.insert(session.id.clone(), session.clone());
        info!("用户登录: {} (session {})", mobile, session.id);
        session
    }

    /// 获取会话
    pub fn get(&self, session_id: &str) -> Result<UserSession> {
        self.sessions
            .get(session_id)
            .map(|s| s.clone())
            .ok_or_else(|| AppError::NotFound(format!("会话不存在: {}", session_id)))
    }

    /// 切换病历记录模式
    pub fn set_report_mode(&self, session_id: &str, enabled: bool) -> Result<UserSession> {
        let mut entry = self
            .sessions
            .get_mut(session_id)
            .ok_or_else(|| AppError::NotFound(format!("会话不存在: {}", session_id)))?;
        entry.report_mode = enabled;
        Ok(entry.clone())
    }

    /// 退出登录；返回会话是否存在
    pub fn logout(&self, session_id: &str) -> bool {
        self.sessions.remove(session_id).is_some()
    }

    /// 当前活跃会话数
    pub fn active_count(&self) -> usize {
        self.sessions.len()
    }
}

/// 对话服务 trait
#[async_trait]
pub trait ChatService: Send + Sync {
    /// 处理一轮对话
    ///
    /// 会话对象由调用方显式传入。生成失败只中止本轮，档案保持不变。
    async fn chat(&self, session: &UserSession, message: &str, record: bool) -> Result<Turn>;
}

/// 对话服务实现
pub struct ChatServiceImpl {
    profile_service: Arc<dyn ProfileService>,
    sentiment_model: Arc<dyn SentimentModel>,
    generation_model: Arc<dyn GenerationModel>,
    classifier: IntentClassifier,
    prompt_builder: PromptBuilder,
    diet_analyzer: DietAnalyzer,
    metrics: AppMetrics,
}

impl ChatServiceImpl {
    /// 创建新的服务实例
    pub fn new(
        profile_service: Arc<dyn ProfileService>,
        sentiment_model: Arc<dyn SentimentModel>,
        generation_model: Arc<dyn GenerationModel>,
        metrics: AppMetrics,
    ) -> Self {
        Self {
            profile_service,
            sentiment_model,
            generation_model,
            classifier: IntentClassifier::new(),
            prompt_builder: PromptBuilder::new(),
            diet_analyzer: DietAnalyzer::new(),
            metrics,
        }
    }

    /// BMI 附注（营养类回复追加）
    fn bmi_suffix(bmi: Option<f32>) -> String {
        match bmi {
            Some(bmi) if bmi < 18.5 => format!(
                "\n\nYour BMI: {:.1} - Consider increasing nutrient-dense foods.",
                bmi
            ),
            Some(bmi) if bmi <= 25.0 => {
                format!("\n\nYour BMI: {:.1} - Great! Maintain your healthy weight.", bmi)
            }
            Some(bmi) => format!(
                "\n\nYour BMI: {:.1} - Consider portion control and increased activity.",
                bmi
            ),
            None => String::new(),
        }
    }
}

#[async_trait]
impl ChatService for ChatServiceImpl {
    async fn chat(&self, session: &UserSession, message: &str, record: bool) -> Result<Turn> {
        if message.trim().is_empty() {
            return Err(AppError::Validation("消息不能为空".to_string()));
        }

        let intent = self.classifier.classify(message);
        debug!("意图分类结果: {} -> {}", session.mobile, intent);

        // 病历记录模式：直接入档，不调用任何外部 API
        if session.report_mode {
            self.profile_service
                .append_note(&session.mobile, message)
                .await?;
            self.metrics.record_note();
            return Ok(Turn::new(message, intent, None, REPORT_MODE_ACK, true));
        }

        let sentiment = match self.sentiment_model.score(message).await {
            Ok(sentiment) => sentiment,
            Err(e) => {
                self.metrics.record_sentiment_failure();
                warn!("情感分析失败: {}", e);
                return Err(e);
            }
        };

        // 每轮只拿档案的只读副本
        let profile = self.profile_service.get(&session.mobile).await?;

        let diet_analysis = if intent == IntentLabel::Nutrition {
            Some(self.diet_analyzer.analyze(message))
        } else {
            None
        };

        let prompt = self.prompt_builder.build(
            &profile,
            intent,
            &sentiment,
            diet_analysis.as_ref(),
            message,
        );

        let generated = match self.generation_model.generate(&prompt).await {
            Ok(text) => text,
            Err(e) => {
                self.metrics.record_generation_failure();
                warn!("回复生成失败: {}", e);
                return Err(e);
            }
        };

        let mut reply = format!("{}{}", empathetic_opening(&sentiment), generated);
        if intent == IntentLabel::Nutrition {
            reply.push_str(&Self::bmi_suffix(profile.bmi()));
        }

        // 持久化放在生成成功之后：失败的轮次不改变档案
        if let Some(analysis) = diet_analysis {
            self.profile_service
                .append_diet_entry(&session.mobile, message, analysis)
                .await?;
        }

        let recorded = if record {
            self.profile_service
                .append_note(&session.mobile, message)
                .await?;
            self.metrics.record_note();
            true
        } else {
            false
        };

        self.metrics.record_turn();
        Ok(Turn::new(message, intent, Some(sentiment), &reply, recorded))
    }
}

/// 创建对话服务
pub fn create_chat_service(
    profile_service: Arc<dyn ProfileService>,
    sentiment_model: Arc<dyn SentimentModel>,
    generation_model: Arc<dyn GenerationModel>,
    metrics: AppMetrics,
) -> Box<dyn ChatService> {
    Box::new(ChatServiceImpl::new(
        profile_service,
        sentiment_model,
        generation_model,
        metrics,
    ))
}
