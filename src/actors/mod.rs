// Actor模块 - 使用Actor模式管理共享状态
//
// 用消息传递替代全局可变单例，所有状态修改在同一个任务中串行执行

pub mod session;

pub use session::{Session, SessionActor, SessionCommand, SessionHandle};
