//! 服务模块

pub mod chat;
pub mod diet;
pub mod generation;
pub mod intent;
pub mod profile;
pub mod prompt;
pub mod sentiment;

pub use chat::{ChatService, SessionRegistry, create_chat_service};
pub use diet::DietAnalyzer;
pub use generation::{GenerationModel, create_generation_model};
pub use intent::IntentClassifier;
pub use profile::{ProfileService, RegisterProfile, create_profile_service};
pub use prompt::PromptBuilder;
pub use sentiment::{SentimentModel, create_sentiment_model};
