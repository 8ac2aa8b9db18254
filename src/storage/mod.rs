// 存储模块 - 学员文件的持久化抽象层

pub mod repository;

pub use repository::memory::InMemoryTraineeStore;
pub use repository::xml::XmlTraineeStore;
pub use repository::TraineeStore;
