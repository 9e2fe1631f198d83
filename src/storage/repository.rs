//! 档案仓储
//!
//! 提供用户健康档案的键值持久化服务。每个身份键对应一条完整记录，
//! 更新时整条覆写（最后写入者胜出）。

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::warn;

use crate::error::{AppError, Result};
use crate::models::profile::UserProfile;

/// 档案仓储 trait
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// 创建档案；身份键已存在时返回 DuplicateIdentity
    async fn create(&self, profile: &UserProfile) -> Result<UserProfile>;

    /// 根据身份键获取档案
    async fn get(&self, mobile: &str) -> Result<Option<UserProfile>>;

    /// 覆写档案（整条记录）
    async fn update(&self, mobile: &str, profile: &UserProfile) -> Result<Option<UserProfile>>;

    /// 检查身份键是否存在
    async fn exists(&self, mobile: &str) -> Result<bool>;

    /// 列出档案
    async fn list(&self, limit: usize, offset: usize) -> Result<Vec<UserProfile>>;

    /// 统计数量
    async fn count(&self) -> Result<u64>;
}

/// 基于 JSON 文件的仓储实现
///
/// 每个用户一个文件：`<data_dir>/<mobile>.json`，人类可读的格式。
/// 写入先落临时文件再重命名，避免半写状态。
#[derive(Clone)]
pub struct JsonFileRepository {
    data_dir: PathBuf,
}

impl JsonFileRepository {
    /// 创建仓储；目录不存在时自动创建
    pub async fn new(data_dir: impl AsRef<Path>) -> Result<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();
        fs::create_dir_all(&data_dir).await?;
        Ok(Self { data_dir })
    }

    fn record_path(&self, mobile: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", mobile))
    }

    async fn write_record(&self, profile: &UserProfile) -> Result<()> {
        let path = self.record_path(&profile.mobile);
        let tmp_path = self.data_dir.join(format!("{}.json.tmp", profile.mobile));

        let json = serde_json::to_string_pretty(profile)?;
        fs::write(&tmp_path, json.as_bytes()).await?;
        fs::rename(&tmp_path, &path)
            .await
            .map_err(|e| AppError::Storage(format!("提交档案文件失败: {}", e)))?;

        Ok(())
    }

    async fn read_record(&self, path: &Path) -> Result<Option<UserProfile>> {
        match fs::read_to_string(path).await {
            Ok(content) => {
                let profile = serde_json::from_str(&content)
                    .map_err(|e| AppError::Storage(format!("解析档案文件失败: {}", e)))?;
                Ok(Some(profile))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e.to_string())),
        }
    }
}

#[async_trait]
impl ProfileRepository for JsonFileRepository {
    async fn create(&self, profile: &UserProfile) -> Result<UserProfile> {
        if self.exists(&profile.mobile).await? {
            return Err(AppError::DuplicateIdentity(profile.mobile.clone()));
        }
        self.write_record(profile).await?;
        Ok(profile.clone())
    }

    async fn get(&self, mobile: &str) -> Result<Option<UserProfile>> {
        self.read_record(&self.record_path(mobile)).await
    }

    async fn update(&self, mobile: &str, profile: &UserProfile) -> Result<Option<UserProfile>> {
        if !self.exists(mobile).await? {
            return Ok(None);
        }
        self.write_record(profile).await?;
        Ok(Some(profile.clone()))
    }

    async fn exists(&self, mobile: &str) -> Result<bool> {
        Ok(fs::try_exists(self.record_path(mobile)).await?)
    }

    async fn list(&self, limit: usize, offset: usize) -> Result<Vec<UserProfile>> {
        let mut profiles = Vec::new();
        let mut entries = fs::read_dir(&self.data_dir).await?;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            match self.read_record(&path).await {
                Ok(Some(profile)) => profiles.push(profile),
                Ok(None) => {}
                Err(e) => warn!("跳过无法解析的档案文件 {:?}: {}", path, e),
            }
        }

        // 文件系统遍历无序，按注册时间排序保证分页稳定
        profiles.sort_by(|a, b| a.registered_at.cmp(&b.registered_at));
        Ok(profiles.into_iter().skip(offset).take(limit).collect())
    }

    async fn count(&self) -> Result<u64> {
        let mut count = 0u64;
        let mut entries = fs::read_dir(&self.data_dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            if entry.path().extension().and_then(|e| e.to_str()) == Some("json") {
                count += 1;
            }
        }
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::profile::Gender;
    use tempfile::TempDir;

    fn sample_profile(mobile: &str) -> UserProfile {
        UserProfile::new(mobile, "Alice", 28, Gender::Female, "UK", 165.0, 55.0)
    }

    async fn repo() -> (TempDir, JsonFileRepository) {
        let dir = TempDir::new().unwrap();
        let repo = JsonFileRepository::new(dir.path()).await.unwrap();
        (dir, repo)
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let (_dir, repo) = repo().await;
        let profile = sample_profile("13800000001");

        repo.create(&profile).await.unwrap();
        let loaded = repo.get("13800000001").await.unwrap().unwrap();
        assert_eq!(loaded.name, "Alice");
        assert_eq!(loaded.mobile, "13800000001");
    }

    #[tokio::test]
    async fn test_duplicate_create_fails() {
        let (_dir, repo) = repo().await;
        let profile = sample_profile("13800000002");

        repo.create(&profile).await.unwrap();
        let err = repo.create(&profile).await.unwrap_err();
        assert!(matches!(err, AppError::DuplicateIdentity(_)));
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let (_dir, repo) = repo().await;
        assert!(repo.get("00000000000").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_overwrites_whole_record() {
        let (_dir, repo) = repo().await;
        let mut profile = sample_profile("13800000003");
        repo.create(&profile).await.unwrap();

        profile.append_note("flu in 2024");
        profile.append_note("allergic to penicillin");
        repo.update(&profile.mobile, &profile).await.unwrap();

        let loaded = repo.get("13800000003").await.unwrap().unwrap();
        assert_eq!(loaded.medical_notes.len(), 2);
    }

    #[tokio::test]
    async fn test_update_missing_returns_none() {
        let (_dir, repo) = repo().await;
        let profile = sample_profile("13800000004");
        let result = repo.update("13800000004", &profile).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_profile_loadable_after_many_appends() {
        let (_dir, repo) = repo().await;
        let mut profile = sample_profile("13800000005");
        repo.create(&profile).await.unwrap();

        for i in 0..20 {
            profile.append_note(&format!("note {}", i));
            repo.update(&profile.mobile, &profile).await.unwrap();
        }

        let loaded = repo.get("13800000005").await.unwrap().unwrap();
        assert_eq!(loaded.medical_notes.len(), 20);
    }

    #[tokio::test]
    async fn test_list_and_count() {
        let (_dir, repo) = repo().await;
        repo.create(&sample_profile("13800000006")).await.unwrap();
        repo.create(&sample_profile("13800000007")).await.unwrap();
        repo.create(&sample_profile("13800000008")).await.unwrap();

        assert_eq!(repo.count().await.unwrap(), 3);
        let page = repo.list(2, 0).await.unwrap();
        assert_eq!(page.len(), 2);
        let rest = repo.list(10, 2).await.unwrap();
        assert_eq!(rest.len(), 1);
    }
}
