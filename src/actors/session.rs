// Session Actor - 使用Actor模式管理当前文件和未保存标记
//
// 当前文件与 modified 标记只由 Actor 持有，所有读写经由 SessionHandle 串行化

use std::path::{Path, PathBuf};

use tokio::sync::{mpsc, oneshot};

/// 会话状态
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    /// 当前打开的文件
    pub current_file: Option<PathBuf>,
    /// 是否有未保存的修改
    pub modified: bool,
}

/// 会话命令
pub enum SessionCommand {
    /// 文件已读取或保存：设置当前文件并清除修改标记
    MarkPersisted {
        path: PathBuf,
    },

    /// 设置修改标记
    SetModified {
        modified: bool,
    },

    /// 若当前文件等于 path 则清除，回复是否清除
    ClearIfCurrent {
        path: PathBuf,
        reply: oneshot::Sender<bool>,
    },

    /// 重置会话
    Clear,

    /// 获取状态
    Get {
        reply: oneshot::Sender<Session>,
    },
}

/// 会话Actor
pub struct SessionActor {
    receiver: mpsc::Receiver<SessionCommand>,
    session: Session,
}

impl SessionActor {
    /// 创建新的Actor
    pub fn new() -> (Self, SessionHandle) {
        let (sender, receiver) = mpsc::channel(32);
        let actor = Self {
            receiver,
            session: Session::default(),
        };
        let handle = SessionHandle { sender };
        (actor, handle)
    }

    /// 运行Actor
    pub async fn run(mut self) {
        tracing::debug!("Session Actor 已启动");

        while let Some(cmd) = self.receiver.recv().await {
            match cmd {
                SessionCommand::MarkPersisted { path } => {
                    self.session.current_file = Some(path);
                    self.session.modified = false;
                }

                SessionCommand::SetModified { modified } => {
                    self.session.modified = modified;
                }

                SessionCommand::ClearIfCurrent { path, reply } => {
                    let cleared = self.session.current_file.as_deref() == Some(path.as_path());
                    if cleared {
                        self.session.current_file = None;
                    }
                    let _ = reply.send(cleared);
                }

                SessionCommand::Clear => {
                    self.session = Session::default();
                }

                SessionCommand::Get { reply } => {
                    let _ = reply.send(self.session.clone());
                }
            }
        }

        tracing::debug!("Session Actor 已停止");
    }
}

/// 会话Handle
#[derive(Clone)]
pub struct SessionHandle {
    sender: mpsc::Sender<SessionCommand>,
}

impl SessionHandle {
    /// 创建Actor并在后台运行，返回Handle
    pub fn spawn() -> Self {
        let (actor, handle) = SessionActor::new();
        tokio::spawn(actor.run());
        handle
    }

    async fn send(&self, cmd: SessionCommand) {
        if self.sender.send(cmd).await.is_err() {
            tracing::warn!("Session Actor 已停止，会话状态未更新");
        }
    }

    /// 记录已读取/保存的文件
    pub async fn mark_persisted(&self, path: &Path) {
        self.send(SessionCommand::MarkPersisted {
            path: path.to_path_buf(),
        })
        .await;
    }

    /// 设置修改标记
    pub async fn set_modified(&self, modified: bool) {
        self.send(SessionCommand::SetModified { modified }).await;
    }

    /// 当前文件等于 path 时清除它
    pub async fn clear_if_current(&self, path: &Path) -> bool {
        let (reply, rx) = oneshot::channel();
        let cmd = SessionCommand::ClearIfCurrent {
            path: path.to_path_buf(),
            reply,
        };
        if self.sender.send(cmd).await.is_err() {
            return false;
        }
        rx.await.unwrap_or(false)
    }

    /// 重置会话
    pub async fn clear(&self) {
        self.send(SessionCommand::Clear).await;
    }

    /// 获取会话状态
    pub async fn get(&self) -> Session {
        let (reply, rx) = oneshot::channel();
        self.sender.send(SessionCommand::Get { reply }).await.ok();
        rx.await.unwrap_or_default()
    }
}
