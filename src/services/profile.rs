//! 档案服务
//!
//! 提供注册、查询和追加写入的业务逻辑。系统其余部分只通过这里
//! 拿到档案的只读副本。

use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use crate::error::{AppError, Result};
use crate::models::profile::{DietAnalysis, Gender, UserProfile};
use crate::storage::repository::ProfileRepository;

/// 注册请求参数
#[derive(Debug, Clone)]
pub struct RegisterProfile {
    pub mobile: String,
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    pub country: String,
    pub height_cm: f32,
    pub weight_kg: f32,
}

/// 档案服务 trait
#[async_trait]
pub trait ProfileService: Send + Sync {
    /// 注册新用户；手机号已存在时返回 DuplicateIdentity
    async fn register(&self, request: RegisterProfile) -> Result<UserProfile>;

    /// 根据手机号加载档案；不存在时返回 NotFound
    async fn get(&self, mobile: &str) -> Result<UserProfile>;

    /// 追加一条病历记录并整条覆写回存储
    async fn append_note(&self, mobile: &str, text: &str) -> Result<UserProfile>;

    /// 追加一条饮食历史并整条覆写回存储
    async fn append_diet_entry(
        &self,
        mobile: &str,
        description: &str,
        analysis: DietAnalysis,
    ) -> Result<UserProfile>;

    /// 分页列出档案（按注册时间排序）及总数
    async fn list(&self, limit: usize, offset: usize) -> Result<(Vec<UserProfile>, u64)>;
}

/// 档案服务实现
pub struct ProfileServiceImpl {
    repository: Arc<dyn ProfileRepository>,
}

impl ProfileServiceImpl {
    /// 创建新的服务实例
    pub fn new(repository: Arc<dyn ProfileRepository>) -> Self {
        Self { repository }
    }

    fn validate(request: &RegisterProfile) -> Result<()> {
        if request.mobile.len() < 6
            || !request
                .mobile
                .chars()
                .enumerate()
                .all(|(i, c)| c.is_ascii_digit() || (i == 0 && c == '+'))
        {
            return Err(AppError::Validation("手机号格式无效".to_string()));
        }
        if request.name.trim().is_empty() {
            return Err(AppError::Validation("姓名不能为空".to_string()));
        }
        if request.age == 0 || request.age > 120 {
            return Err(AppError::Validation("年龄超出有效范围".to_string()));
        }
        if !(50.0..=250.0).contains(&request.height_cm) {
            return Err(AppError::Validation("身高超出有效范围".to_string()));
        }
        if !(10.0..=300.0).contains(&request.weight_kg) {
            return Err(AppError::Validation("体重超出有效范围".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl ProfileService for ProfileServiceImpl {
    async fn register(&self, request: RegisterProfile) -> Result<UserProfile> {
        Self::validate(&request)?;

        let profile = UserProfile::new(
            &request.mobile,
            &request.name,
            request.age,
            request.gender,
            &request.country,
            request.height_cm,
            request.weight_kg,
        );

        let created = self.repository.create(&profile).await?;
        info!("用户注册成功: {}", created.mobile);
        Ok(created)
    }

    async fn get(&self, mobile: &str) -> Result<UserProfile> {
        self.repository
            .get(mobile)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("用户不存在: {}", mobile)))
    }

    async fn append_note(&self, mobile: &str, text: &str) -> Result<UserProfile> {
        if text.trim().is_empty() {
            return Err(AppError::Validation("病历内容不能为空".to_string()));
        }

        let mut profile = self.get(mobile).await?;
        profile.append_note(text);
        self.repository
            .update(mobile, &profile)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("用户不存在: {}", mobile)))
    }

    async fn append_diet_entry(
        &self,
        mobile: &str,
        description: &str,
        analysis: DietAnalysis,
    ) -> Result<UserProfile> {
        let mut profile = self.get(mobile).await?;
        profile.append_diet_entry(description, analysis);
        self.repository
            .update(mobile, &profile)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("用户不存在: {}", mobile)))
    }

    async fn list(&self, limit: usize, offset: usize) -> Result<(Vec<UserProfile>, u64)> {
        let profiles = self.repository.list(limit, offset).await?;
        let total = self.repository.count().await?;
        Ok((profiles, total))
    }
}

/// 创建档案服务
pub fn create_profile_service(repository: Arc<dyn ProfileRepository>) -> Box<dyn ProfileService> {
    Box::new(ProfileServiceImpl::new(repository))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::repository::JsonFileRepository;
    use tempfile::TempDir;

    fn sample_request(mobile: &str) -> RegisterProfile {
        RegisterProfile {
            mobile: mobile.to_string(),
            name: "Bob".to_string(),
            age: 45,
            gender: Gender::Male,
            country: "Germany".to_string(),
            height_cm: 180.0,
            weight_kg: 85.0,
        }
    }

    async fn service() -> (TempDir, ProfileServiceImpl) {
        let dir = TempDir::new().unwrap();
        let repo = JsonFileRepository::new(dir.path()).await.unwrap();
        (dir, ProfileServiceImpl::new(Arc::new(repo)))
    }

    #[tokio::test]
    async fn test_register_then_get_returns_same_fields() {
        let (_dir, service) = service().await;
        service.register(sample_request("4915200000001")).await.unwrap();

        let loaded = service.get("4915200000001").await.unwrap();
        assert_eq!(loaded.name, "Bob");
        assert_eq!(loaded.age, 45);
        assert_eq!(loaded.country, "Germany");
    }

    #[tokio::test]
    async fn test_register_twice_fails_with_duplicate_identity() {
        let (_dir, service) = service().await;
        service.register(sample_request("4915200000002")).await.unwrap();

        let err = service
            .register(sample_request("4915200000002"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::DuplicateIdentity(_)));
    }

    #[tokio::test]
    async fn test_get_unknown_fails_with_not_found() {
        let (_dir, service) = service().await;
        let err = service.get("0000000000").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_append_note_persists() {
        let (_dir, service) = service().await;
        service.register(sample_request("4915200000003")).await.unwrap();

        service
            .append_note("4915200000003", "high blood pressure")
            .await
            .unwrap();
        service
            .append_note("4915200000003", "on medication since May")
            .await
            .unwrap();

        let loaded = service.get("4915200000003").await.unwrap();
        assert_eq!(loaded.medical_notes.len(), 2);
        assert_eq!(loaded.medical_notes[0].text, "high blood pressure");
    }

    #[tokio::test]
    async fn test_register_rejects_invalid_mobile() {
        let (_dir, service) = service().await;
        let mut request = sample_request("not-a-number");
        request.mobile = "not-a-number".to_string();
        let err = service.register(request).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_register_accepts_plus_prefix() {
        let (_dir, service) = service().await;
        let request = sample_request("+4915200000004");
        assert!(service.register(request).await.is_ok());
    }

    #[tokio::test]
    async fn test_list_pages_by_registration_order() {
        let (_dir, service) = service().await;
        service.register(sample_request("4915200000010")).await.unwrap();
        service.register(sample_request("4915200000011")).await.unwrap();
        service.register(sample_request("4915200000012")).await.unwrap();

        let (page, total) = service.list(2, 0).await.unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(total, 3);

        let (rest, _) = service.list(10, 2).await.unwrap();
        assert_eq!(rest.len(), 1);
    }

    #[tokio::test]
    async fn test_append_empty_note_rejected() {
        let (_dir, service) = service().await;
        service.register(sample_request("4915200000005")).await.unwrap();
        let err = service.append_note("4915200000005", "  ").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
