//! 游戏错误处理模块
//!
//! 处理游戏运行过程中可能出现的各种错误，包括存档系统、序列化、IO等错误。

use thiserror::Error;

/// 游戏运行过程中可能出现的错误类型
#[derive(Debug, Error)]
pub enum GameError {
    /// 存档系统错误
    #[error("Save system error: {0}")]
    SaveError(#[from] anyhow::Error),

    /// IO操作错误
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// 序列化错误
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// 反序列化错误
    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    /// 存档数据损坏
    #[error("Corrupted save data")]
    CorruptedSave,

    /// 存档版本过新，无法迁移
    #[error("Unsupported save version: {0}")]
    UnsupportedVersion(u32),

    /// 物品记录无法识别
    #[error("Unknown item type: {0}")]
    UnknownItemType(String),

    /// 用户输入错误
    #[error("Input error: {0}")]
    InputError(String),
}

impl From<serde_json::Error> for GameError {
    fn from(err: serde_json::Error) -> Self {
        // 整档解析失败通常意味着存档文件本身坏了
        if err.is_data() || err.is_syntax() {
            GameError::CorruptedSave
        } else {
            GameError::DeserializationError(err.to_string())
        }
    }
}

/// 处理游戏错误并转换为用户友好的消息
pub fn handle_error(error: &GameError) -> String {
    match error {
        GameError::CorruptedSave => "存档数据已损坏，无法加载".to_string(),
        GameError::UnsupportedVersion(v) => format!("存档版本过新: {}", v),
        GameError::IoError(e) => match e.kind() {
            std::io::ErrorKind::NotFound => "存档文件不存在".to_string(),
            std::io::ErrorKind::PermissionDenied => "没有权限访问存档文件".to_string(),
            _ => format!("IO错误: {}", e),
        },
        _ => error.to_string(),
    }
}
