//! 用户档案 DTO
//!
//! 用于档案 API 的请求和响应序列化

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::profile::{DietEntry, Gender, MedicalNote, UserProfile};

/// 注册请求
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterUserRequest {
    /// 手机号（唯一标识）
    pub mobile: String,

    /// 姓名
    pub name: String,

    /// 年龄
    pub age: u32,

    /// 性别
    pub gender: Gender,

    /// 国家
    pub country: String,

    /// 身高（厘米）
    pub height_cm: f32,

    /// 体重（公斤）
    pub weight_kg: f32,
}

/// 档案列表查询参数
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListUsersQuery {
    /// 每页条数
    #[serde(default = "default_limit")]
    pub limit: usize,

    /// 偏移量
    #[serde(default)]
    pub offset: usize,
}

fn default_limit() -> usize {
    50
}

/// 档案列表响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListUsersResponse {
    pub users: Vec<ProfileResponse>,
    pub total: u64,
}

/// 追加病历记录请求
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppendNoteRequest {
    /// 记录内容
    pub text: String,
}

/// 病历记录响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MedicalNoteDto {
    pub recorded_at: DateTime<Utc>,
    pub text: String,
}

impl From<&MedicalNote> for MedicalNoteDto {
    fn from(note: &MedicalNote) -> Self {
        Self {
            recorded_at: note.recorded_at,
            text: note.text.clone(),
        }
    }
}

/// 饮食历史响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DietEntryDto {
    pub recorded_at: DateTime<Utc>,
    pub description: String,
    pub unhealthy_foods: Vec<String>,
    pub recommendations: Vec<String>,
}

impl From<&DietEntry> for DietEntryDto {
    fn from(entry: &DietEntry) -> Self {
        Self {
            recorded_at: entry.recorded_at,
            description: entry.description.clone(),
            unhealthy_foods: entry.analysis.unhealthy_foods.clone(),
            recommendations: entry.analysis.recommendations.clone(),
        }
    }
}

/// 档案响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub mobile: String,
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    pub country: String,
    pub height_cm: f32,
    pub weight_kg: f32,

    /// 由身高体重派生
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bmi: Option<f32>,

    pub medical_notes: Vec<MedicalNoteDto>,
    pub diet_history: Vec<DietEntryDto>,
    pub registered_at: DateTime<Utc>,
}

impl From<UserProfile> for ProfileResponse {
    fn from(profile: UserProfile) -> Self {
        let bmi = profile.bmi();
        Self {
            bmi,
            medical_notes: profile.medical_notes.iter().map(Into::into).collect(),
            diet_history: profile.diet_history.iter().map(Into::into).collect(),
            mobile: profile.mobile,
            name: profile.name,
            age: profile.age,
            gender: profile.gender,
            country: profile.country,
            height_cm: profile.height_cm,
            weight_kg: profile.weight_kg,
            registered_at: profile.registered_at,
        }
    }
}
