// 错误展示 - 将错误转换为对话框所需的展示数据
//
// 渲染由界面层负责，这里只生成纯数据

use std::error::Error;

use serde::Serialize;

pub const REPORT_TITLE: &str = "Exception Dialog";
pub const REPORT_HEADER: &str = "An unexpected exception has occurred.";
pub const DETAIL_LABEL: &str = "The exception stacktrace was:";

/// 错误对话框的展示数据
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ErrorReport {
    pub title: String,
    pub header: String,
    /// 错误本身的信息
    pub summary: String,
    /// 可展开区域的标签
    pub detail_label: String,
    /// 完整错误链，每个原因一行
    pub detail: String,
}

impl ErrorReport {
    pub fn from_error(error: &(dyn Error + 'static)) -> Self {
        let mut detail = error.to_string();
        let mut source = error.source();
        while let Some(cause) = source {
            detail.push_str("\nCaused by: ");
            detail.push_str(&cause.to_string());
            source = cause.source();
        }

        Self {
            title: REPORT_TITLE.to_string(),
            header: REPORT_HEADER.to_string(),
            summary: error.to_string(),
            detail_label: DETAIL_LABEL.to_string(),
            detail,
        }
    }

    /// anyhow 错误保留其上下文链
    pub fn from_anyhow(error: &anyhow::Error) -> Self {
        let detail = error
            .chain()
            .map(|cause| cause.to_string())
            .collect::<Vec<_>>()
            .join("\nCaused by: ");

        Self {
            title: REPORT_TITLE.to_string(),
            header: REPORT_HEADER.to_string(),
            summary: error.to_string(),
            detail_label: DETAIL_LABEL.to_string(),
            detail,
        }
    }

    /// 纯文本形式，供终端输出
    pub fn to_text(&self) -> String {
        format!(
            "{}\n{}\n{}\n\n{}\n{}",
            self.title, self.header, self.summary, self.detail_label, self.detail
        )
    }
}
