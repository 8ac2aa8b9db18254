// 内存存储实现 - 不触碰文件系统，用于测试和无文件系统的调用方

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::TraineeStore;
use crate::error::{NachweisError, NachweisResult};
use crate::models::Trainee;

#[derive(Debug, Default)]
pub struct InMemoryTraineeStore {
    files: RwLock<HashMap<PathBuf, Trainee>>,
}

impl InMemoryTraineeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 已保存的文件数
    pub async fn len(&self) -> usize {
        self.files.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.files.read().await.is_empty()
    }

    pub async fn contains(&self, path: &Path) -> bool {
        self.files.read().await.contains_key(path)
    }
}

fn not_found(path: &Path) -> NachweisError {
    NachweisError::io(
        path,
        io::Error::new(io::ErrorKind::NotFound, "no such trainee file"),
    )
}

#[async_trait]
impl TraineeStore for InMemoryTraineeStore {
    async fn save(&self, path: &Path, trainee: &Trainee) -> NachweisResult<()> {
        self.files
            .write()
            .await
            .insert(path.to_path_buf(), trainee.clone());
        Ok(())
    }

    async fn load(&self, path: &Path) -> NachweisResult<Trainee> {
        self.files
            .read()
            .await
            .get(path)
            .cloned()
            .ok_or_else(|| not_found(path))
    }

    async fn delete(&self, path: &Path) -> NachweisResult<()> {
        self.files
            .write()
            .await
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| not_found(path))
    }

    fn store_type(&self) -> &str {
        "memory"
    }
}
