// 学员相关操作的门面
//
// 每个操作都是“先校验，后执行”：校验失败时不修改任何对象，
// 存储失败时不更新会话

use std::path::Path;
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{info, trace};

use super::training_period::TrainingPeriodLogic;
use super::validation::{require_path, require_text, require_working_range};
use crate::actors::SessionHandle;
use crate::calendar::WorkingDayPolicy;
use crate::error::{NachweisError, NachweisResult};
use crate::models::{ActivityEntry, ActivityKind, Trainee, TrainingPeriod};
use crate::storage::TraineeStore;

#[derive(Clone)]
pub struct TraineeLogic {
    store: Arc<dyn TraineeStore>,
    policy: Arc<dyn WorkingDayPolicy>,
    periods: TrainingPeriodLogic,
    session: SessionHandle,
}

impl TraineeLogic {
    pub fn new(
        store: Arc<dyn TraineeStore>,
        policy: Arc<dyn WorkingDayPolicy>,
        session: SessionHandle,
    ) -> Self {
        Self {
            store,
            periods: TrainingPeriodLogic::new(policy.clone()),
            policy,
            session,
        }
    }

    pub fn session(&self) -> &SessionHandle {
        &self.session
    }

    /// 当前使用的存储类型
    pub fn store_type(&self) -> &str {
        self.store.store_type()
    }

    /// 创建培训阶段并追加到学员
    ///
    /// 校验失败时学员保持不变
    #[allow(clippy::too_many_arguments)]
    pub async fn add_training_period(
        &self,
        label: &str,
        begin: NaiveDate,
        end: NaiveDate,
        school_class: &str,
        class_teacher: &str,
        trainee: &mut Trainee,
    ) -> NachweisResult<()> {
        let period = self
            .periods
            .create(label, begin, end, school_class, class_teacher)?;
        trainee.training_periods.push(period);
        self.session.set_modified(true).await;
        Ok(())
    }

    /// 创建新的学员，培训阶段列表为空
    ///
    /// # 错误
    /// - `InvalidArgument`: 任一字符串为空白
    /// - `IllegalDate`: begin/end 不是工作日，或 end 早于 begin
    #[allow(clippy::too_many_arguments)]
    pub fn create(
        &self,
        family_name: &str,
        given_names: &str,
        begin: NaiveDate,
        end: NaiveDate,
        trainer: &str,
        school: &str,
        training: &str,
    ) -> NachweisResult<Trainee> {
        trace!(
            "create(family_name: {}, given_names: {}, begin: {}, end: {}, trainer: {}, school: {}, training: {})",
            family_name,
            given_names,
            begin,
            end,
            trainer,
            school,
            training
        );

        let family_name = require_text("Family name", family_name)?;
        let given_names = require_text("Given names", given_names)?;
        let trainer = require_text("Trainer", trainer)?;
        let school = require_text("School", school)?;
        let training = require_text("Training", training)?;
        require_working_range(self.policy.as_ref(), begin, end)?;

        Ok(Trainee {
            family_name,
            given_names,
            begin,
            end,
            trainer,
            school,
            training,
            training_periods: Vec::new(),
        })
    }

    /// 删除学员文件；若为当前文件则清除会话中的当前文件
    pub async fn delete_trainee(&self, path: &Path) -> NachweisResult<()> {
        trace!("delete_trainee(path: {:?})", path);
        require_path(path)?;

        self.store.delete(path).await?;
        if self.session.clear_if_current(path).await {
            info!("已删除当前打开的文件 {:?}", path);
        }
        Ok(())
    }

    /// 读取学员，并记录为当前文件
    pub async fn read_trainee(&self, path: &Path) -> NachweisResult<Trainee> {
        trace!("read_trainee(path: {:?})", path);
        require_path(path)?;

        let trainee = self.store.load(path).await?;
        self.session.mark_persisted(path).await;
        Ok(trainee)
    }

    /// 保存学员，并记录为当前文件
    pub async fn save_trainee(&self, path: &Path, trainee: &Trainee) -> NachweisResult<()> {
        trace!("save_trainee(path: {:?}, trainee: {})", path, trainee.display_name());
        require_path(path)?;

        self.store.save(path, trainee).await?;
        self.session.mark_persisted(path).await;
        Ok(())
    }

    /// 移除指定下标的培训阶段
    pub async fn remove_training_period(
        &self,
        trainee: &mut Trainee,
        index: usize,
    ) -> NachweisResult<TrainingPeriod> {
        if index >= trainee.training_periods.len() {
            return Err(NachweisError::invalid_argument(format!(
                "No training period at index {} ({} present).",
                index,
                trainee.training_periods.len()
            )));
        }

        let removed = trainee.training_periods.remove(index);
        self.session.set_modified(true).await;
        Ok(removed)
    }

    /// 在培训阶段中记录一条活动，写入包含该日期的周
    ///
    /// # 错误
    /// - `InvalidArgument`: 阶段不存在、描述为空白或分钟数为 0
    /// - `IllegalDate`: 日期不在阶段内
    pub async fn record_activity(
        &self,
        trainee: &mut Trainee,
        period_index: usize,
        date: NaiveDate,
        kind: ActivityKind,
        description: &str,
        minutes: u32,
    ) -> NachweisResult<()> {
        let description = require_text("Description", description)?;
        if minutes == 0 {
            return Err(NachweisError::invalid_argument(
                "Minutes must be greater than zero.",
            ));
        }

        let period = trainee
            .training_periods
            .get_mut(period_index)
            .ok_or_else(|| {
                NachweisError::invalid_argument(format!(
                    "No training period at index {}.",
                    period_index
                ))
            })?;

        if !period.contains(date) {
            return Err(NachweisError::illegal_date(format!(
                "{} is outside of training period {} ({} - {})",
                date, period.label, period.begin, period.end
            )));
        }
        let week = period.week_for_mut(date).ok_or_else(|| {
            NachweisError::illegal_date(format!("No week of the period contains {}", date))
        })?;

        week.entries.push(ActivityEntry {
            date,
            kind,
            description,
            minutes,
        });
        self.session.set_modified(true).await;
        Ok(())
    }

    /// 关闭当前文件，重置会话
    pub async fn close(&self) {
        self.session.clear().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actors::Session;
    use crate::calendar::HolidayCalendar;
    use crate::storage::{InMemoryTraineeStore, XmlTraineeStore};
    use std::path::PathBuf;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn logic_with(store: Arc<dyn TraineeStore>) -> TraineeLogic {
        TraineeLogic::new(
            store,
            Arc::new(HolidayCalendar::new()),
            SessionHandle::spawn(),
        )
    }

    fn memory_logic() -> (TraineeLogic, Arc<InMemoryTraineeStore>) {
        let store = Arc::new(InMemoryTraineeStore::new());
        (logic_with(store.clone()), store)
    }

    fn max(logic: &TraineeLogic) -> Trainee {
        logic
            .create(
                "Mustermann",
                "Max",
                date(2023, 9, 1),
                date(2026, 8, 31),
                "Acme GmbH",
                "Berufsschule X",
                "Fachinformatiker",
            )
            .unwrap()
    }

    #[tokio::test]
    async fn create_returns_trainee_with_inputs() {
        let (logic, _) = memory_logic();
        let trainee = max(&logic);

        assert_eq!(trainee.family_name, "Mustermann");
        assert_eq!(trainee.given_names, "Max");
        assert_eq!(trainee.begin, date(2023, 9, 1));
        assert_eq!(trainee.end, date(2026, 8, 31));
        assert_eq!(trainee.trainer, "Acme GmbH");
        assert_eq!(trainee.school, "Berufsschule X");
        assert_eq!(trainee.training, "Fachinformatiker");
        assert!(trainee.training_periods.is_empty());
    }

    #[tokio::test]
    async fn create_rejects_blank_strings() {
        let (logic, _) = memory_logic();
        let begin = date(2023, 9, 1);
        let end = date(2026, 8, 31);
        let fields = ["Mustermann", "Max", "Acme GmbH", "Berufsschule X", "Fachinformatiker"];

        for blank in 0..fields.len() {
            let mut args = fields;
            args[blank] = "  ";
            let err = logic
                .create(args[0], args[1], begin, end, args[2], args[3], args[4])
                .unwrap_err();
            assert!(matches!(err, NachweisError::InvalidArgument(_)), "field {}", blank);
        }
    }

    #[tokio::test]
    async fn create_rejects_illegal_dates() {
        let (logic, _) = memory_logic();
        let create = |begin, end| {
            logic.create("Mustermann", "Max", begin, end, "Acme", "BS X", "FI")
        };

        // 周六开始
        assert!(matches!(
            create(date(2023, 9, 2), date(2026, 8, 31)),
            Err(NachweisError::IllegalDate(_))
        ));
        // 结束早于开始
        assert!(matches!(
            create(date(2026, 8, 31), date(2023, 9, 1)),
            Err(NachweisError::IllegalDate(_))
        ));
    }

    #[tokio::test]
    async fn add_training_period_appends_one_period() {
        let (logic, _) = memory_logic();
        let mut trainee = max(&logic);
        logic
            .add_training_period("P1", date(2023, 9, 4), date(2023, 9, 29), "10a", "Frau Muster", &mut trainee)
            .await
            .unwrap();
        let first = trainee.training_periods[0].clone();

        logic
            .add_training_period("P2", date(2023, 10, 2), date(2023, 10, 27), "10a", "Frau Muster", &mut trainee)
            .await
            .unwrap();

        assert_eq!(trainee.training_periods.len(), 2);
        assert_eq!(trainee.training_periods[0], first);
        assert_eq!(trainee.training_periods[1].label, "P2");
        assert!(logic.session().get().await.modified);
    }

    #[tokio::test]
    async fn add_training_period_with_invalid_range_changes_nothing() {
        let (logic, _) = memory_logic();
        let mut trainee = max(&logic);
        let before = trainee.clone();

        let err = logic
            .add_training_period("P1", date(2023, 9, 29), date(2023, 9, 4), "10a", "Frau Muster", &mut trainee)
            .await
            .unwrap_err();

        assert!(matches!(err, NachweisError::IllegalDate(_)));
        assert_eq!(trainee, before);
        assert!(!logic.session().get().await.modified);
    }

    #[tokio::test]
    async fn save_then_read_round_trips_through_xml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mustermann.xml");
        let logic = logic_with(Arc::new(XmlTraineeStore::new()));

        let mut trainee = max(&logic);
        logic
            .add_training_period("P1", date(2023, 9, 4), date(2023, 9, 29), "10a", "Frau Muster", &mut trainee)
            .await
            .unwrap();
        logic
            .record_activity(&mut trainee, 0, date(2023, 9, 6), ActivityKind::School, "SQL Grundlagen", 90)
            .await
            .unwrap();

        logic.save_trainee(&path, &trainee).await.unwrap();
        logic.close().await;
        let loaded = logic.read_trainee(&path).await.unwrap();

        assert_eq!(loaded, trainee);
        assert_eq!(
            logic.session().get().await,
            Session {
                current_file: Some(path.clone()),
                modified: false,
            }
        );
    }

    #[tokio::test]
    async fn failed_save_leaves_session_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let logic = logic_with(Arc::new(XmlTraineeStore::new()));
        let trainee = max(&logic);
        logic.session().set_modified(true).await;

        let missing_dir = dir.path().join("missing").join("max.xml");
        let err = logic.save_trainee(&missing_dir, &trainee).await.unwrap_err();

        assert!(matches!(err, NachweisError::Io { .. }));
        assert_eq!(
            logic.session().get().await,
            Session {
                current_file: None,
                modified: true,
            }
        );
    }

    #[tokio::test]
    async fn read_malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.xml");
        tokio::fs::write(&path, "<trainee><familyName>Muster").await.unwrap();
        let logic = logic_with(Arc::new(XmlTraineeStore::new()));

        let err = logic.read_trainee(&path).await.unwrap_err();
        assert!(matches!(err, NachweisError::Parse { .. }), "{:?}", err);
        assert_eq!(logic.session().get().await.current_file, None);
    }

    #[tokio::test]
    async fn delete_current_file_clears_session() {
        let (logic, store) = memory_logic();
        let trainee = max(&logic);
        let path = PathBuf::from("/data/max.xml");

        logic.save_trainee(&path, &trainee).await.unwrap();
        logic.delete_trainee(&path).await.unwrap();

        assert!(store.is_empty().await);
        assert_eq!(logic.session().get().await.current_file, None);
    }

    #[tokio::test]
    async fn delete_other_file_keeps_session() {
        let (logic, _) = memory_logic();
        let trainee = max(&logic);
        let current = PathBuf::from("/data/max.xml");
        let other = PathBuf::from("/data/erika.xml");

        logic.save_trainee(&other, &trainee).await.unwrap();
        logic.save_trainee(&current, &trainee).await.unwrap();
        logic.delete_trainee(&other).await.unwrap();

        assert_eq!(logic.session().get().await.current_file, Some(current));
    }

    #[tokio::test]
    async fn delete_missing_file_is_io_error() {
        let (logic, _) = memory_logic();
        let err = logic.delete_trainee(Path::new("/data/none.xml")).await.unwrap_err();
        assert!(matches!(err, NachweisError::Io { .. }));
    }

    #[tokio::test]
    async fn blank_paths_are_rejected() {
        let (logic, store) = memory_logic();
        let trainee = max(&logic);

        for result in [
            logic.save_trainee(Path::new(" "), &trainee).await.err(),
            logic.read_trainee(Path::new("")).await.err(),
            logic.delete_trainee(Path::new("")).await.err(),
        ] {
            assert!(matches!(result, Some(NachweisError::InvalidArgument(_))));
        }
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn record_activity_goes_into_matching_week() {
        let (logic, _) = memory_logic();
        let mut trainee = max(&logic);
        logic
            .add_training_period("P1", date(2023, 9, 4), date(2023, 9, 29), "10a", "Frau Muster", &mut trainee)
            .await
            .unwrap();

        logic
            .record_activity(&mut trainee, 0, date(2023, 9, 13), ActivityKind::Company, "Server aufgesetzt", 300)
            .await
            .unwrap();

        let period = &trainee.training_periods[0];
        let week = period.week_for(date(2023, 9, 13)).unwrap();
        assert_eq!(week.begin, date(2023, 9, 11));
        assert_eq!(week.entries.len(), 1);
        assert_eq!(week.total_minutes(), 300);
        assert_eq!(trainee.entry_count(), 1);
    }

    #[tokio::test]
    async fn record_activity_validates_before_mutating() {
        let (logic, _) = memory_logic();
        let mut trainee = max(&logic);
        logic
            .add_training_period("P1", date(2023, 9, 4), date(2023, 9, 29), "10a", "Frau Muster", &mut trainee)
            .await
            .unwrap();

        let outside = logic
            .record_activity(&mut trainee, 0, date(2023, 10, 2), ActivityKind::Company, "x", 60)
            .await
            .unwrap_err();
        assert!(matches!(outside, NachweisError::IllegalDate(_)));

        let no_period = logic
            .record_activity(&mut trainee, 3, date(2023, 9, 5), ActivityKind::Company, "x", 60)
            .await
            .unwrap_err();
        assert!(matches!(no_period, NachweisError::InvalidArgument(_)));

        let zero = logic
            .record_activity(&mut trainee, 0, date(2023, 9, 5), ActivityKind::Company, "x", 0)
            .await
            .unwrap_err();
        assert!(matches!(zero, NachweisError::InvalidArgument(_)));

        assert_eq!(trainee.entry_count(), 0);
    }

    #[tokio::test]
    async fn remove_training_period_by_index() {
        let (logic, _) = memory_logic();
        let mut trainee = max(&logic);
        logic
            .add_training_period("P1", date(2023, 9, 4), date(2023, 9, 29), "10a", "Frau Muster", &mut trainee)
            .await
            .unwrap();

        assert!(logic.remove_training_period(&mut trainee, 1).await.is_err());
        let removed = logic.remove_training_period(&mut trainee, 0).await.unwrap();
        assert_eq!(removed.label, "P1");
        assert!(trainee.training_periods.is_empty());
    }
}
