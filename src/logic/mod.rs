// 逻辑层 - 校验输入、创建实体、委托存储

pub mod trainee;
pub mod training_period;
pub mod validation;

pub use trainee::TraineeLogic;
pub use training_period::TrainingPeriodLogic;
