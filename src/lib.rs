// Ausbildungsnachweis - 培训记录管理主库

// 声明模块
pub mod actors;
pub mod calendar;
pub mod commands;
pub mod error;
pub mod logger;
pub mod logic;
pub mod models;
pub mod report;
pub mod settings;
pub mod storage;
pub mod utils;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::{debug, error};

// 导入必要的类型
use actors::SessionHandle;
use commands::Cli;
use logic::TraineeLogic;
use report::ErrorReport;
use settings::SettingsManager;
use storage::XmlTraineeStore;

pub use error::{NachweisError, NachweisResult};

/// 应用状态
///
/// 由顶层控制器持有：逻辑层门面（含会话Handle）和配置管理器
#[derive(Clone)]
pub struct AppState {
    pub logic: TraineeLogic,
    pub settings: Arc<SettingsManager>,
}

impl AppState {
    /// 读取配置，启动会话Actor，组装逻辑层
    pub async fn initialize(settings_path: PathBuf) -> Result<Self> {
        let settings = Arc::new(SettingsManager::new(settings_path).await?);
        let config = settings.get().await;
        debug!(
            "工作日日历: 联邦节假日={}, 额外节假日={}",
            config.german_federal_holidays,
            config.holidays.len()
        );

        let logic = TraineeLogic::new(
            Arc::new(XmlTraineeStore::new()),
            Arc::new(config.calendar()),
            SessionHandle::spawn(),
        );
        debug!(
            "存储类型: {}, 配置文件: {:?}",
            logic.store_type(),
            settings.path()
        );

        Ok(Self { logic, settings })
    }
}

/// 命令行入口：解析参数、初始化日志、执行命令
///
/// 返回进程退出码
pub async fn run() -> i32 {
    let cli = Cli::parse();
    let settings_path = cli.settings.clone().unwrap_or_else(utils::settings_path);

    let state = match AppState::initialize(settings_path).await {
        Ok(state) => state,
        Err(e) => {
            eprintln!("{}", ErrorReport::from_anyhow(&e).to_text());
            return 2;
        }
    };

    let level = state.settings.get().await.tracing_level();
    // guard 必须存活到命令结束
    let _guard = match logger::init(&utils::log_dir(), level) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("日志初始化失败: {:#}", e);
            None
        }
    };

    match cli.command.execute(&state).await {
        Ok(()) => 0,
        Err(e) => {
            match e.downcast_ref::<NachweisError>() {
                Some(cause) => error!(kind = cause.kind(), "命令执行失败: {:#}", e),
                None => error!("命令执行失败: {:#}", e),
            }
            eprintln!("{}", ErrorReport::from_anyhow(&e).to_text());
            1
        }
    }
}
