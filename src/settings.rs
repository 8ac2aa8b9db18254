use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::calendar::HolidayCalendar;

/// 持久化的应用配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedAppConfig {
    /// 日志级别（trace/debug/info/warn/error）
    pub log_level: String,
    /// 是否排除德国全国法定节假日
    pub german_federal_holidays: bool,
    /// 额外的节假日（如州节日、企业休假）
    pub holidays: Vec<NaiveDate>,
}

impl Default for PersistedAppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            german_federal_holidays: true,
            holidays: Vec::new(),
        }
    }
}

impl PersistedAppConfig {
    /// 根据配置构建工作日日历
    pub fn calendar(&self) -> HolidayCalendar {
        let mut calendar = if self.german_federal_holidays {
            HolidayCalendar::with_german_federal_holidays()
        } else {
            HolidayCalendar::new()
        };
        calendar.extend(self.holidays.iter().copied());
        calendar
    }

    pub fn tracing_level(&self) -> tracing::Level {
        self.log_level.parse().unwrap_or(tracing::Level::INFO)
    }
}

/// 配置更新（仅覆盖提供的字段）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub log_level: Option<String>,
    pub german_federal_holidays: Option<bool>,
    pub holidays: Option<Vec<NaiveDate>>,
}

pub struct SettingsManager {
    path: PathBuf,
    data: RwLock<PersistedAppConfig>,
}

impl SettingsManager {
    pub async fn new(path: PathBuf) -> Result<Self> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("无法创建配置目录 {:?}", parent))?;
        }

        let initial = match tokio::fs::read(&path).await {
            Ok(bytes) if !bytes.is_empty() => serde_json::from_slice::<PersistedAppConfig>(&bytes)
                .unwrap_or_else(|e| {
                    tracing::warn!("配置文件 {:?} 无法解析，使用默认配置: {}", path, e);
                    PersistedAppConfig::default()
                }),
            Ok(_) => Self::write_defaults(&path).await?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("配置文件不存在，创建默认配置: {:?}", path);
                Self::write_defaults(&path).await?
            }
            Err(e) => {
                return Err(e).with_context(|| format!("无法读取配置文件 {:?}", path));
            }
        };

        Ok(Self {
            path,
            data: RwLock::new(initial),
        })
    }

    pub async fn get(&self) -> PersistedAppConfig {
        self.data.read().await.clone()
    }

    pub async fn update(&self, update: AppConfig) -> Result<PersistedAppConfig> {
        let mut config = self.data.write().await;

        if let Some(level) = update.log_level {
            config.log_level = level;
        }
        if let Some(enabled) = update.german_federal_holidays {
            config.german_federal_holidays = enabled;
        }
        if let Some(holidays) = update.holidays {
            config.holidays = holidays;
        }

        self.save(&config).await?;
        Ok(config.clone())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn write_defaults(path: &Path) -> Result<PersistedAppConfig> {
        let default = PersistedAppConfig::default();
        let json = serde_json::to_string_pretty(&default)?;
        tokio::fs::write(path, json)
            .await
            .with_context(|| format!("无法写入配置文件 {:?}", path))?;
        Ok(default)
    }

    async fn save(&self, config: &PersistedAppConfig) -> Result<()> {
        let json = serde_json::to_string_pretty(config)?;
        tokio::fs::write(&self.path, json)
            .await
            .with_context(|| format!("无法写入配置文件 {:?}", self.path))?;
        Ok(())
    }
}
