//! 工具函数模块
//!
//! 目前只包含跨平台的文件系统路径

pub mod file_system;

// 重新导出常用函数
pub use file_system::*;
