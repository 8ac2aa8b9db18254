// 数据模型模块 - 培训记录的实体结构
//
// Trainee 拥有 TrainingPeriod，TrainingPeriod 拥有 DataMonth，
// DataMonth 拥有 DataWeek，DataWeek 保存该周的活动记录

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// 学员（Auszubildende/r）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trainee {
    /// 姓
    pub family_name: String,
    /// 名（可以有多个）
    pub given_names: String,
    /// 培训开始日期
    #[serde(
        serialize_with = "serialize_naive_date",
        deserialize_with = "deserialize_naive_date"
    )]
    pub begin: NaiveDate,
    /// 培训结束日期
    #[serde(
        serialize_with = "serialize_naive_date",
        deserialize_with = "deserialize_naive_date"
    )]
    pub end: NaiveDate,
    /// 培训企业 / 培训师
    pub trainer: String,
    /// 职业学校
    pub school: String,
    /// 培训职业
    pub training: String,
    /// 培训阶段（按添加顺序）
    #[serde(rename = "trainingPeriod", default)]
    pub training_periods: Vec<TrainingPeriod>,
}

impl Trainee {
    /// "姓, 名" 形式的显示名
    pub fn display_name(&self) -> String {
        format!("{}, {}", self.family_name, self.given_names)
    }

    /// 所有阶段中记录的活动总数
    pub fn entry_count(&self) -> usize {
        self.training_periods.iter().map(TrainingPeriod::entry_count).sum()
    }
}

/// 培训阶段（例如一个学校阶段或企业阶段）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingPeriod {
    pub label: String,
    #[serde(
        serialize_with = "serialize_naive_date",
        deserialize_with = "deserialize_naive_date"
    )]
    pub begin: NaiveDate,
    #[serde(
        serialize_with = "serialize_naive_date",
        deserialize_with = "deserialize_naive_date"
    )]
    pub end: NaiveDate,
    /// 班级
    pub school_class: String,
    /// 班主任
    pub class_teacher: String,
    #[serde(rename = "month", default)]
    pub months: Vec<DataMonth>,
}

impl TrainingPeriod {
    /// 日期是否落在阶段内（含首尾）
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.begin <= date && date <= self.end
    }

    /// 查找包含该日期的周
    pub fn week_for(&self, date: NaiveDate) -> Option<&DataWeek> {
        self.months
            .iter()
            .flat_map(|month| month.weeks.iter())
            .find(|week| week.contains(date))
    }

    /// 查找包含该日期的周（可变）
    pub fn week_for_mut(&mut self, date: NaiveDate) -> Option<&mut DataWeek> {
        self.months
            .iter_mut()
            .flat_map(|month| month.weeks.iter_mut())
            .find(|week| week.contains(date))
    }

    pub fn entry_count(&self) -> usize {
        self.months
            .iter()
            .flat_map(|month| month.weeks.iter())
            .map(|week| week.entries.len())
            .sum()
    }
}

/// 月份切片，首尾裁剪到所属阶段
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataMonth {
    #[serde(
        serialize_with = "serialize_naive_date",
        deserialize_with = "deserialize_naive_date"
    )]
    pub begin: NaiveDate,
    #[serde(
        serialize_with = "serialize_naive_date",
        deserialize_with = "deserialize_naive_date"
    )]
    pub end: NaiveDate,
    #[serde(rename = "week", default)]
    pub weeks: Vec<DataWeek>,
}

/// 周切片（周一至周日），首尾裁剪到所属月份
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataWeek {
    #[serde(
        serialize_with = "serialize_naive_date",
        deserialize_with = "deserialize_naive_date"
    )]
    pub begin: NaiveDate,
    #[serde(
        serialize_with = "serialize_naive_date",
        deserialize_with = "deserialize_naive_date"
    )]
    pub end: NaiveDate,
    #[serde(rename = "entry", default)]
    pub entries: Vec<ActivityEntry>,
}

impl DataWeek {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.begin <= date && date <= self.end
    }

    /// 本周记录的总分钟数
    pub fn total_minutes(&self) -> u32 {
        self.entries.iter().map(|entry| entry.minutes).sum()
    }
}

/// 单条活动记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
    #[serde(
        serialize_with = "serialize_naive_date",
        deserialize_with = "deserialize_naive_date"
    )]
    pub date: NaiveDate,
    pub kind: ActivityKind,
    pub description: String,
    /// 花费时间（分钟）
    pub minutes: u32,
}

/// 活动类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum ActivityKind {
    /// 企业内的工作
    Company,
    /// 职业学校课程
    School,
    /// 企业内培训 / 授课
    Instruction,
}

impl ActivityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Company => "company",
            Self::School => "school",
            Self::Instruction => "instruction",
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "company" | "betrieb" => Ok(Self::Company),
            "school" | "schule" => Ok(Self::School),
            "instruction" | "unterweisung" => Ok(Self::Instruction),
            other => Err(format!("unknown activity kind: {}", other)),
        }
    }
}

impl From<ActivityKind> for String {
    fn from(kind: ActivityKind) -> Self {
        kind.as_str().to_string()
    }
}

impl TryFrom<String> for ActivityKind {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// 生成 begin..=end 的月/周骨架，不含任何活动记录
pub fn month_skeleton(begin: NaiveDate, end: NaiveDate) -> Vec<DataMonth> {
    let mut months = Vec::new();
    let mut month_begin = begin;

    while month_begin <= end {
        let month_end = last_day_of_month(month_begin).min(end);
        months.push(DataMonth {
            begin: month_begin,
            end: month_end,
            weeks: week_skeleton(month_begin, month_end),
        });
        // 已到 NaiveDate::MAX
        let Some(next) = month_end.succ_opt() else {
            break;
        };
        month_begin = next;
    }

    months
}

fn week_skeleton(begin: NaiveDate, end: NaiveDate) -> Vec<DataWeek> {
    let mut weeks = Vec::new();
    let mut week_begin = begin;

    while week_begin <= end {
        // 到本周日为止
        let to_sunday = 6 - u64::from(week_begin.weekday().num_days_from_monday());
        let week_end = week_begin
            .checked_add_days(Days::new(to_sunday))
            .map_or(end, |sunday| sunday.min(end));
        weeks.push(DataWeek {
            begin: week_begin,
            end: week_end,
            entries: Vec::new(),
        });
        let Some(next) = week_end.succ_opt() else {
            break;
        };
        week_begin = next;
    }

    weeks
}

fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first| first.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}

// 自定义序列化：NaiveDate -> String (YYYY-MM-DD)
fn serialize_naive_date<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&date.format("%Y-%m-%d").to_string())
}

// 自定义反序列化：String (YYYY-MM-DD) -> NaiveDate
fn deserialize_naive_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(serde::de::Error::custom)
}
