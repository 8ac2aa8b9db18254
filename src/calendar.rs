// 工作日判定
//
// 逻辑层只依赖 WorkingDayPolicy，具体日历（地区、节假日）由外部注入

use std::collections::HashSet;

use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// 工作日判定策略
pub trait WorkingDayPolicy: Send + Sync {
    fn is_working_day(&self, date: NaiveDate) -> bool;
}

impl<F> WorkingDayPolicy for F
where
    F: Fn(NaiveDate) -> bool + Send + Sync,
{
    fn is_working_day(&self, date: NaiveDate) -> bool {
        self(date)
    }
}

/// 周一至周五，且不在节假日集合中
#[derive(Debug, Clone, Default)]
pub struct HolidayCalendar {
    holidays: HashSet<NaiveDate>,
    german_federal: bool,
}

impl HolidayCalendar {
    /// 只排除周末的日历
    pub fn new() -> Self {
        Self::default()
    }

    /// 额外排除德国全国法定节假日（任意年份）
    pub fn with_german_federal_holidays() -> Self {
        Self {
            german_federal: true,
            ..Self::default()
        }
    }

    /// 添加一个节假日
    pub fn configure_holiday(&mut self, date: NaiveDate) {
        tracing::debug!("配置节假日: {}", date);
        self.holidays.insert(date);
    }

    pub fn extend(&mut self, dates: impl IntoIterator<Item = NaiveDate>) {
        self.holidays.extend(dates);
    }

    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays.contains(&date)
            || (self.german_federal && german_federal_holidays(date.year()).contains(&date))
    }
}

impl WorkingDayPolicy for HolidayCalendar {
    fn is_working_day(&self, date: NaiveDate) -> bool {
        !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) && !self.is_holiday(date)
    }
}

/// 某年的德国全国法定节假日（不含各州特有节日）
pub fn german_federal_holidays(year: i32) -> Vec<NaiveDate> {
    let fixed = [(1, 1), (5, 1), (10, 3), (12, 25), (12, 26)];
    let mut dates: Vec<NaiveDate> = fixed
        .iter()
        .filter_map(|&(month, day)| NaiveDate::from_ymd_opt(year, month, day))
        .collect();

    if let Some(easter) = easter_sunday(year) {
        // 耶稣受难日、复活节星期一、耶稣升天节、圣灵降临节星期一
        dates.extend(
            [-2, 1, 39, 50]
                .into_iter()
                .filter_map(|offset| easter.checked_add_signed(Duration::days(offset))),
        );
    }

    dates.sort();
    dates
}

/// 格里高利历复活节（匿名算法）
fn easter_sunday(year: i32) -> Option<NaiveDate> {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;
    NaiveDate::from_ymd_opt(year, month as u32, day as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn weekends_are_not_working_days() {
        let calendar = HolidayCalendar::new();
        assert!(calendar.is_working_day(date(2023, 9, 1))); // 周五
        assert!(!calendar.is_working_day(date(2023, 9, 2))); // 周六
        assert!(!calendar.is_working_day(date(2023, 9, 3))); // 周日
        assert!(calendar.is_working_day(date(2026, 8, 31))); // 周一
    }

    #[test]
    fn configured_holidays_are_excluded() {
        let mut calendar = HolidayCalendar::new();
        calendar.configure_holiday(date(2024, 3, 8));
        assert!(!calendar.is_working_day(date(2024, 3, 8)));
        assert!(calendar.is_working_day(date(2024, 3, 7)));
    }

    #[test]
    fn easter_dates() {
        assert_eq!(easter_sunday(2023), Some(date(2023, 4, 9)));
        assert_eq!(easter_sunday(2024), Some(date(2024, 3, 31)));
        assert_eq!(easter_sunday(2025), Some(date(2025, 4, 20)));
    }

    #[test]
    fn federal_holidays_2024() {
        let holidays = german_federal_holidays(2024);
        assert_eq!(holidays.len(), 9);
        assert!(holidays.contains(&date(2024, 3, 29))); // Karfreitag
        assert!(holidays.contains(&date(2024, 4, 1))); // Ostermontag
        assert!(holidays.contains(&date(2024, 5, 9))); // Christi Himmelfahrt
        assert!(holidays.contains(&date(2024, 5, 20))); // Pfingstmontag
        assert!(holidays.contains(&date(2024, 10, 3)));

        let calendar = HolidayCalendar::with_german_federal_holidays();
        assert!(!calendar.is_working_day(date(2024, 10, 3)));
        assert!(calendar.is_working_day(date(2024, 10, 4)));
    }

    #[test]
    fn federal_calendar_handles_date_range_limits() {
        let calendar = HolidayCalendar::with_german_federal_holidays();
        assert!(calendar.is_working_day(NaiveDate::MAX));
        // 只要求不 panic
        let _ = calendar.is_working_day(NaiveDate::MIN);
    }

    #[test]
    fn closures_act_as_policies() {
        let everything = |_: NaiveDate| true;
        assert!(everything.is_working_day(date(2023, 9, 2)));
    }
}
