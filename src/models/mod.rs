//! 数据模型模块

pub mod profile;
pub mod session;
pub mod turn;

pub use profile::{DietAnalysis, DietEntry, Gender, MedicalNote, UserProfile};
pub use session::UserSession;
pub use turn::{IntentLabel, Polarity, Sentiment, Turn};
