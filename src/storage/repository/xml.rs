// XML 文件存储实现

use std::path::Path;

use async_trait::async_trait;
use quick_xml::se::Serializer;
use serde::Serialize;
use tracing::{debug, info};

use super::TraineeStore;
use crate::error::{NachweisError, NachweisResult};
use crate::models::Trainee;

const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";
const ROOT_TAG: &str = "trainee";

/// 以 XML 文件保存学员
#[derive(Debug, Clone, Default)]
pub struct XmlTraineeStore;

impl XmlTraineeStore {
    pub fn new() -> Self {
        Self
    }

    /// 序列化为带缩进的 XML 文档
    pub fn to_xml(trainee: &Trainee) -> NachweisResult<String> {
        let mut body = String::new();
        let mut serializer = Serializer::with_root(&mut body, Some(ROOT_TAG))
            .map_err(|source| NachweisError::Serialize { source })?;
        serializer.indent(' ', 2);
        trainee
            .serialize(serializer)
            .map_err(|source| NachweisError::Serialize { source })?;

        let mut document = String::with_capacity(XML_DECLARATION.len() + body.len() + 1);
        document.push_str(XML_DECLARATION);
        document.push_str(&body);
        document.push('\n');
        Ok(document)
    }

    /// 从 XML 文本解析，path 仅用于错误信息
    pub fn from_xml(path: &Path, content: &str) -> NachweisResult<Trainee> {
        quick_xml::de::from_str(content).map_err(|source| NachweisError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[async_trait]
impl TraineeStore for XmlTraineeStore {
    async fn save(&self, path: &Path, trainee: &Trainee) -> NachweisResult<()> {
        let document = Self::to_xml(trainee)?;
        tokio::fs::write(path, document)
            .await
            .map_err(|e| NachweisError::io(path, e))?;

        info!("已保存学员 {} 到 {:?}", trainee.display_name(), path);
        Ok(())
    }

    async fn load(&self, path: &Path) -> NachweisResult<Trainee> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| NachweisError::io(path, e))?;

        let trainee = Self::from_xml(path, &content)?;
        info!(
            "已读取学员 {} ({} 个培训阶段) 自 {:?}",
            trainee.display_name(),
            trainee.training_periods.len(),
            path
        );
        Ok(trainee)
    }

    async fn delete(&self, path: &Path) -> NachweisResult<()> {
        tokio::fs::remove_file(path)
            .await
            .map_err(|e| NachweisError::io(path, e))?;

        debug!("已删除文件 {:?}", path);
        Ok(())
    }

    fn store_type(&self) -> &str {
        "xml"
    }
}
