//! 文件系统路径工具
//!
//! 提供跨平台的数据目录、日志目录和配置文件路径

use std::path::PathBuf;

const APP_DIR: &str = "ausbildungsnachweis";

/// 获取应用数据目录（跨平台）
///
/// - macOS: ~/Library/Application Support/ausbildungsnachweis
/// - Windows: %APPDATA%/ausbildungsnachweis
/// - Linux: ~/.local/share/ausbildungsnachweis
pub fn app_data_dir() -> PathBuf {
    if cfg!(target_os = "macos") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join("Library/Application Support").join(APP_DIR)
    } else if cfg!(target_os = "windows") {
        let appdata = std::env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(appdata).join(APP_DIR)
    } else {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(".local/share").join(APP_DIR)
    }
}

/// 获取日志目录路径（跨平台）
///
/// - macOS: ~/Library/Logs/ausbildungsnachweis
/// - 其他: <数据目录>/logs
pub fn log_dir() -> PathBuf {
    if cfg!(target_os = "macos") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join("Library/Logs").join(APP_DIR)
    } else {
        app_data_dir().join("logs")
    }
}

/// 默认配置文件路径
pub fn settings_path() -> PathBuf {
    app_data_dir().join("settings.json")
}
