// 培训阶段的校验与创建

use std::sync::Arc;

use chrono::NaiveDate;

use super::validation::{require_text, require_working_range};
use crate::calendar::WorkingDayPolicy;
use crate::error::NachweisResult;
use crate::models::{month_skeleton, TrainingPeriod};

#[derive(Clone)]
pub struct TrainingPeriodLogic {
    policy: Arc<dyn WorkingDayPolicy>,
}

impl TrainingPeriodLogic {
    pub fn new(policy: Arc<dyn WorkingDayPolicy>) -> Self {
        Self { policy }
    }

    /// 创建新的培训阶段，并生成覆盖整个区间的月/周结构
    ///
    /// # 错误
    /// - `InvalidArgument`: label、school_class 或 class_teacher 为空白
    /// - `IllegalDate`: begin/end 不是工作日，或 end 早于 begin
    pub fn create(
        &self,
        label: &str,
        begin: NaiveDate,
        end: NaiveDate,
        school_class: &str,
        class_teacher: &str,
    ) -> NachweisResult<TrainingPeriod> {
        tracing::trace!(
            "create(label: {}, begin: {}, end: {}, school_class: {}, class_teacher: {})",
            label,
            begin,
            end,
            school_class,
            class_teacher
        );

        let label = require_text("Label", label)?;
        let school_class = require_text("School class", school_class)?;
        let class_teacher = require_text("Class teacher", class_teacher)?;
        require_working_range(self.policy.as_ref(), begin, end)?;

        Ok(TrainingPeriod {
            label,
            begin,
            end,
            school_class,
            class_teacher,
            months: month_skeleton(begin, end),
        })
    }
}
