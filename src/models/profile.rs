//! 用户健康档案数据模型
//!
//! 以手机号为唯一标识，存储注册时填写的人口学信息、
//! 逐条追加的病历记录和饮食历史。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 性别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    /// 男
    #[serde(rename = "male")]
    Male,

    /// 女
    #[serde(rename = "female")]
    Female,

    /// 其他
    #[serde(rename = "other")]
    Other,
}

/// 病历记录条目
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MedicalNote {
    /// 记录时间
    pub recorded_at: DateTime<Utc>,

    /// 记录内容
    pub text: String,
}

/// 饮食历史条目
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DietEntry {
    /// 记录时间
    pub recorded_at: DateTime<Utc>,

    /// 用户描述的饮食内容
    pub description: String,

    /// 饮食模式分析结果
    pub analysis: DietAnalysis,
}

/// 饮食模式分析结果
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DietAnalysis {
    /// 识别出的不健康食物
    pub unhealthy_foods: Vec<String>,

    /// 健康替代建议（最多三条）
    pub recommendations: Vec<String>,
}

/// 用户健康档案
///
/// 身份键唯一且稳定；除病历和饮食历史外，其余字段在注册时写入后不再变更。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    /// 手机号（唯一标识）
    pub mobile: String,

    /// === 人口学信息 ===
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

    /// === 可追加字段 ===
    /// 病历记录
    pub medical_notes: Vec<MedicalNote>,

    /// 饮食历史
    pub diet_history: Vec<DietEntry>,

    /// === 元数据 ===
    /// 注册时间
    pub registered_at: DateTime<Utc>,
}

impl UserProfile {
    /// 创建新档案
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        mobile: &str,
        name: &str,
        age: u32,
        gender: Gender,
        country: &str,
        height_cm: f32,
        weight_kg: f32,
    ) -> Self {
        Self {
            mobile: mobile.to_string(),
            name: name.to_string(),
            age,
            gender,
            country: country.to_string(),
            height_cm,
            weight_kg,
            medical_notes: Vec::new(),
            diet_history: Vec::new(),
            registered_at: Utc::now(),
        }
    }

    /// 追加一条病历记录
    pub fn append_note(&mut self, text: &str) {
        self.medical_notes.push(MedicalNote {
            recorded_at: Utc::now(),
            text: text.to_string(),
        });
    }

    /// 追加一条饮食历史
    pub fn append_diet_entry(&mut self, description: &str, analysis: DietAnalysis) {
        self.diet_history.push(DietEntry {
            recorded_at: Utc::now(),
            description: description.to_string(),
            analysis,
        });
    }

    /// 计算 BMI；身高无效时返回 None
    pub fn bmi(&self) -> Option<f32> {
        if self.height_cm <= 0.0 || self.weight_kg <= 0.0 {
            return None;
        }
        let height_m = self.height_cm / 100.0;
        Some(self.weight_kg / (height_m * height_m))
    }

    /// 最近的饮食记录（倒序，最多 count 条）
    pub fn recent_diet_entries(&self, count: usize) -> Vec<&DietEntry> {
        self.diet_history.iter().rev().take(count).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_profile() -> UserProfile {
        UserProfile::new("13800000000", "张三", 30, Gender::Male, "China", 175.0, 70.0)
    }

    #[test]
    fn test_profile_creation() {
        let profile = sample_profile();
        assert_eq!(profile.mobile, "13800000000");
        assert_eq!(profile.name, "张三");
        assert!(profile.medical_notes.is_empty());
        assert!(profile.diet_history.is_empty());
    }

    #[test]
    fn test_bmi_calculation() {
        let profile = sample_profile();
        let bmi = profile.bmi().unwrap();
        assert!((bmi - 22.86).abs() < 0.01);
    }

    #[test]
    fn test_bmi_invalid_height() {
        let mut profile = sample_profile();
        profile.height_cm = 0.0;
        assert!(profile.bmi().is_none());
    }

    #[test]
    fn test_append_note() {
        let mut profile = sample_profile();
        profile.append_note("近期服用降压药");
        profile.append_note("青霉素过敏");
        assert_eq!(profile.medical_notes.len(), 2);
        assert_eq!(profile.medical_notes[1].text, "青霉素过敏");
    }

    #[test]
    fn test_recent_diet_entries_order() {
        let mut profile = sample_profile();
        profile.append_diet_entry("breakfast", DietAnalysis::default());
        profile.append_diet_entry("lunch", DietAnalysis::default());
        profile.append_diet_entry("dinner", DietAnalysis::default());

        let recent = profile.recent_diet_entries(2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].description, "dinner");
        assert_eq!(recent[1].description, "lunch");
    }

    #[test]
    fn test_profile_roundtrip_after_appends() {
        let mut profile = sample_profile();
        profile.append_note("note 1");
        profile.append_note("note 2");
        profile.append_diet_entry("fried chicken", DietAnalysis::default());

        let json = serde_json::to_string_pretty(&profile).unwrap();
        let restored: UserProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.medical_notes.len(), 2);
        assert_eq!(restored.diet_history.len(), 1);
        assert_eq!(restored.mobile, profile.mobile);
    }
}
