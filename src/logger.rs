// 日志初始化 - 同时输出到控制台和按天轮转的日志文件

use std::path::Path;

use anyhow::{Context, Result};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::time::LocalTime;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// 日志时间戳格式（本地时间，毫秒精度）
const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second].[subsecond digits:3]");

/// 初始化日志系统
///
/// 返回的 guard 必须在程序结束前一直持有，否则缓冲的日志会丢失
pub fn init(log_dir: &Path, level: tracing::Level) -> Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("无法创建日志目录 {:?}", log_dir))?;

    // 每天轮转
    let file_appender = tracing_appender::rolling::daily(log_dir, "ausbildungsnachweis.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // 控制台只输出 warn 及以上，文件按配置级别
    let writer = std::io::stderr
        .with_max_level(tracing::Level::WARN)
        .and(non_blocking);

    let timer = LocalTime::new(TIMESTAMP_FORMAT);

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(writer)
        .with_timer(timer)
        .with_ansi(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber).context("日志系统已初始化")?;

    tracing::debug!("日志文件位置: {:?}", log_dir);
    Ok(guard)
}
