use crate::error::{Error, Result};
use crate::models::{FieldDefinition, FieldRegistry, Unit, UnitKind};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 字段取值：数值 / 文本 / 缺失 (缺失是正常终态，不是错误)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Value {
    Numeric { value: f64, unit: Unit },
    Text { text: String },
    #[default]
    Absent,
}

impl Value {
    pub fn numeric(value: f64, unit: Unit) -> Self {
        Value::Numeric { value, unit }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Value::Text { text: text.into() }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Numeric { value, .. } => Some(*value),
            _ => None,
        }
    }

    pub fn unit(&self) -> Option<Unit> {
        match self {
            Value::Numeric { unit, .. } => Some(*unit),
            _ => None,
        }
    }

    /// 取值是否可以放进该类别的字段
    pub fn fits(&self, kind: UnitKind) -> bool {
        match self {
            Value::Absent => true,
            Value::Text { .. } => kind == UnitKind::Text,
            Value::Numeric { unit, .. } => unit.kind() == kind,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Numeric { value, unit: Unit::None } => write!(f, "{}", value),
            Value::Numeric { value, unit } => write!(f, "{} {}", value, unit),
            Value::Text { text } => f.write_str(text),
            Value::Absent => Ok(()),
        }
    }
}

/// 一次匹配命中 (临时结构，不持久化)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMatch {
    pub key: String,
    pub raw_text: String,
    pub source_line_index: usize,
    pub pattern_index: usize,
}

/// 一份规格书的结构化结果：注册表中每个字段恰好一个槽位
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Specification {
    registry_version: String,
    slots: IndexMap<String, Value>,
}

impl Specification {
    /// 按注册表顺序创建全部缺失的槽位
    pub fn empty(registry: &FieldRegistry) -> Self {
        Self::from_fn(registry, |_| Value::Absent)
    }

    /// 按注册表顺序逐字段取值，每个字段恰好一个槽位
    pub fn from_fn(
        registry: &FieldRegistry,
        mut value_of: impl FnMut(&FieldDefinition) -> Value,
    ) -> Self {
        let slots = registry
            .fields()
            .iter()
            .map(|f| (f.key.clone(), value_of(f)))
            .collect();
        Self {
            registry_version: registry.version().to_string(),
            slots,
        }
    }

    pub fn registry_version(&self) -> &str {
        &self.registry_version
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.slots.get(key)
    }

    pub fn number(&self, key: &str) -> Option<f64> {
        self.slots.get(key).and_then(Value::as_number)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.slots.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// 已有取值的字段数
    pub fn present_count(&self) -> usize {
        self.slots.values().filter(|v| !v.is_absent()).count()
    }

    /// 写入槽位；只接受已存在的键，不新增键
    pub fn insert(&mut self, key: &str, value: Value) -> Result<()> {
        match self.slots.get_mut(key) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(Error::UnknownField(key.to_string())),
        }
    }

    /// 应用人工修正：整体替换，不做合并
    pub fn apply_overrides(
        &mut self,
        registry: &FieldRegistry,
        overrides: &IndexMap<String, Value>,
    ) -> Result<usize> {
        for (key, value) in overrides {
            let field = registry
                .get(key)
                .ok_or_else(|| Error::UnknownField(key.clone()))?;
            if !value.fits(field.unit_kind) {
                return Err(Error::OverrideKindMismatch {
                    key: key.clone(),
                    expected: field.unit_kind,
                });
            }
        }
        for (key, value) in overrides {
            self.insert(key, value.clone())?;
        }
        Ok(overrides.len())
    }
}

/// 方案 A / 方案 B
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    A,
    B,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    UnrecognizedUnit,
    InvalidNumber,
    UnitMismatch,
    MissingRequiredInput,
}

/// 运行过程中收集的诊断信息，随结果一起返回
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub side: Option<Side>,
    pub key: Option<String>,
    pub kind: DiagnosticKind,
    pub message: String,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, key: Option<&str>, message: impl Into<String>) -> Self {
        Self {
            side: None,
            key: key.map(str::to_string),
            kind,
            message: message.into(),
        }
    }

    pub fn for_side(mut self, side: Side) -> Self {
        self.side = Some(side);
        self
    }

    /// 字段级错误转为诊断
    pub fn from_error(key: Option<&str>, err: &Error) -> Self {
        let kind = match err {
            Error::UnrecognizedUnit { .. } => DiagnosticKind::UnrecognizedUnit,
            Error::MissingRequiredInput(_) => DiagnosticKind::MissingRequiredInput,
            _ => DiagnosticKind::InvalidNumber,
        };
        Self::new(kind, key, err.to_string())
    }
}
