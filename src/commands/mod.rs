// 命令行命令 - 逻辑层的一个非图形调用方
//
// 每个命令：读取文件 -> 调用 TraineeLogic -> 保存文件

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing::info;

use crate::models::{ActivityKind, Trainee};
use crate::settings::AppConfig;
use crate::AppState;

#[derive(Debug, Parser)]
#[command(name = "ausbildungsnachweis", version, about = "Ausbildungsnachweise verwalten")]
pub struct Cli {
    /// 配置文件路径（默认位于应用数据目录）
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// 创建新的学员文件
    New {
        #[arg(long)]
        file: PathBuf,
        #[arg(long)]
        family_name: String,
        #[arg(long)]
        given_names: String,
        #[arg(long)]
        begin: NaiveDate,
        #[arg(long)]
        end: NaiveDate,
        #[arg(long)]
        trainer: String,
        #[arg(long)]
        school: String,
        #[arg(long)]
        training: String,
    },

    /// 添加培训阶段
    AddPeriod {
        #[arg(long)]
        file: PathBuf,
        #[arg(long)]
        label: String,
        #[arg(long)]
        begin: NaiveDate,
        #[arg(long)]
        end: NaiveDate,
        #[arg(long)]
        school_class: String,
        #[arg(long)]
        class_teacher: String,
    },

    /// 移除培训阶段（从 0 开始的下标）
    RemovePeriod {
        #[arg(long)]
        file: PathBuf,
        #[arg(long)]
        period: usize,
    },

    /// 记录一条活动
    Log {
        #[arg(long)]
        file: PathBuf,
        #[arg(long)]
        period: usize,
        #[arg(long)]
        date: NaiveDate,
        /// company / school / instruction
        #[arg(long)]
        kind: ActivityKind,
        #[arg(long)]
        minutes: u32,
        description: String,
    },

    /// 显示学员概要
    Show {
        #[arg(long)]
        file: PathBuf,
    },

    /// 删除学员文件
    Delete {
        #[arg(long)]
        file: PathBuf,
    },

    /// 查看或修改配置，未给出的项保持不变
    Config {
        #[arg(long, value_parser = ["trace", "debug", "info", "warn", "error"])]
        log_level: Option<String>,
        /// 是否排除德国全国法定节假日
        #[arg(long)]
        german_federal_holidays: Option<bool>,
        /// 额外节假日，逗号分隔，替换原有列表
        #[arg(long, value_delimiter = ',')]
        holidays: Option<Vec<NaiveDate>>,
    },
}

impl Command {
    pub async fn execute(self, state: &AppState) -> Result<()> {
        let logic = &state.logic;

        match self {
            Command::New {
                file,
                family_name,
                given_names,
                begin,
                end,
                trainer,
                school,
                training,
            } => {
                let trainee = logic.create(
                    &family_name,
                    &given_names,
                    begin,
                    end,
                    &trainer,
                    &school,
                    &training,
                )?;
                logic.save_trainee(&file, &trainee).await?;
                info!("已创建学员文件 {:?}", file);
                println!("{}", summary(&trainee));
            }

            Command::AddPeriod {
                file,
                label,
                begin,
                end,
                school_class,
                class_teacher,
            } => {
                let mut trainee = logic.read_trainee(&file).await?;
                logic
                    .add_training_period(&label, begin, end, &school_class, &class_teacher, &mut trainee)
                    .await
                    .context("培训阶段无法添加")?;
                logic.save_trainee(&file, &trainee).await?;
                println!("{}", summary(&trainee));
            }

            Command::RemovePeriod { file, period } => {
                let mut trainee = logic.read_trainee(&file).await?;
                let removed = logic.remove_training_period(&mut trainee, period).await?;
                logic.save_trainee(&file, &trainee).await?;
                println!("removed period {}", removed.label);
            }

            Command::Log {
                file,
                period,
                date,
                kind,
                minutes,
                description,
            } => {
                let mut trainee = logic.read_trainee(&file).await?;
                logic
                    .record_activity(&mut trainee, period, date, kind, &description, minutes)
                    .await?;
                logic.save_trainee(&file, &trainee).await?;
                println!("{}", summary(&trainee));
            }

            Command::Show { file } => {
                let trainee = logic.read_trainee(&file).await?;
                println!("{}", summary(&trainee));
            }

            Command::Delete { file } => {
                logic.delete_trainee(&file).await?;
                println!("deleted {}", file.display());
            }

            Command::Config {
                log_level,
                german_federal_holidays,
                holidays,
            } => {
                let config = state
                    .settings
                    .update(AppConfig {
                        log_level,
                        german_federal_holidays,
                        holidays,
                    })
                    .await?;
                info!("配置已更新: {:?}", state.settings.path());
                println!("{}", state.settings.path().display());
                println!("{}", serde_json::to_string_pretty(&config)?);
            }
        }

        Ok(())
    }
}

/// 学员概要文本
pub fn summary(trainee: &Trainee) -> String {
    let mut out = format!(
        "{} - {} ({} bis {})\n  Betrieb: {}\n  Schule: {}",
        trainee.display_name(),
        trainee.training,
        trainee.begin,
        trainee.end,
        trainee.trainer,
        trainee.school
    );
    for (index, period) in trainee.training_periods.iter().enumerate() {
        out.push_str(&format!(
            "\n  [{}] {} {} - {} ({}, {}): {} Eintraege",
            index,
            period.label,
            period.begin,
            period.end,
            period.school_class,
            period.class_teacher,
            period.entry_count()
        ));
    }
    out
}
