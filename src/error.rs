//! 错误类型
//!
//! 单字段的解析错误 (单位无法识别、数值无法解析) 在抽取阶段被吸收为诊断信息，
//! 只有注册表不一致、覆盖值非法、运行假设非法等会终止一次对比。

use crate::models::UnitKind;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// 单位文本不属于该字段类别的任何已知别名
    #[error("unrecognized unit '{unit}' for {kind} value")]
    UnrecognizedUnit { unit: String, kind: UnitKind },

    /// 原始文本中读不出数值
    #[error("invalid number: '{0}'")]
    InvalidNumber(String),

    /// 两份规格书基于不同版本的字段注册表
    #[error("registry mismatch: option A uses '{a}', option B uses '{b}'")]
    RegistryMismatch { a: String, b: String },

    /// 计算所需的输入缺失 (只以诊断形式出现，不终止对比)
    #[error("missing required input: {0}")]
    MissingRequiredInput(String),

    #[error("unknown field: {0}")]
    UnknownField(String),

    #[error("duplicate field key: {0}")]
    DuplicateField(String),

    /// 人工修正值与字段类别不符
    #[error("override for '{key}' expects a {expected} value")]
    OverrideKindMismatch { key: String, expected: UnitKind },

    #[error("invalid assumption: {0}")]
    InvalidAssumption(String),

    #[error("invalid label pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("CSV export error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// 由调用方输入导致的错误 (HTTP 层映射为 400)
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::RegistryMismatch { .. }
                | Error::UnknownField(_)
                | Error::OverrideKindMismatch { .. }
                | Error::InvalidAssumption(_)
        )
    }
}
