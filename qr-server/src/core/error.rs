use crate::store::StorageError;
use qr_client::ClientError;
use thiserror::Error;

/// 服务器启动/运行错误
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("本地存储错误: {0}")]
    Storage(#[from] StorageError),

    #[error("后端客户端错误: {0}")]
    Client(#[from] ClientError),

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("内部服务器错误: {0}")]
    Internal(#[from] anyhow::Error),
}

/// 服务器的 Result 类型别名
pub type Result<T> = std::result::Result<T, ServerError>;
