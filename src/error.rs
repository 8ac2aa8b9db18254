//! 错误类型
//!
//! 逻辑层返回的所有错误都归入 `NachweisError`，由调用方通过
//! [`crate::report::ErrorReport`] 展示给用户

use std::path::PathBuf;

use thiserror::Error;

/// 逻辑层结果类型
pub type NachweisResult<T> = Result<T, NachweisError>;

/// 培训记录操作错误
#[derive(Debug, Error)]
pub enum NachweisError {
    /// 必填字段缺失或为空白
    #[error("{0}")]
    InvalidArgument(String),

    /// 日期不是工作日，或结束日期早于开始日期
    #[error("{0}")]
    IllegalDate(String),

    /// 文件读写 / 删除失败
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 文件内容无法解析
    #[error("cannot parse trainee file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: quick_xml::DeError,
    },

    /// 序列化失败
    #[error("cannot serialize trainee: {source}")]
    Serialize {
        #[source]
        source: quick_xml::DeError,
    },
}

impl NachweisError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn illegal_date(msg: impl Into<String>) -> Self {
        Self::IllegalDate(msg.into())
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// 错误类别名称，用于日志和展示
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidArgument(_) => "InvalidArgument",
            Self::IllegalDate(_) => "IllegalDate",
            Self::Io { .. } => "IO",
            Self::Parse { .. } => "Parse",
            Self::Serialize { .. } => "Serialize",
        }
    }
}
