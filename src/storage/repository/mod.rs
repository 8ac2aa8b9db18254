// Repository 抽象层 - 定义学员文件的持久化接口

pub mod memory;
pub mod xml;

use std::path::Path;

use async_trait::async_trait;

use crate::error::NachweisResult;
use crate::models::Trainee;

/// 学员持久化接口 - 所有存储实现必须实现此 trait
#[async_trait]
pub trait TraineeStore: Send + Sync {
    /// 将完整的学员对象图写入 path，覆盖已有内容
    async fn save(&self, path: &Path, trainee: &Trainee) -> NachweisResult<()>;

    /// 从 path 读取学员
    async fn load(&self, path: &Path) -> NachweisResult<Trainee>;

    /// 删除 path 上的文件，不存在时返回 IO 错误
    async fn delete(&self, path: &Path) -> NachweisResult<()>;

    /// 存储类型标识
    fn store_type(&self) -> &str;
}
