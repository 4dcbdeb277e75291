use crate::error::{Error, Result};
use crate::models::{Unit, UnitKind};
use regex::Regex;
use serde::Serialize;
use std::collections::HashSet;

/// 数值型取值: 数字 + 可选单位 (单位只取一个 token)
const NUMERIC_VALUE: &str = r"(?P<value>[+-]?\d[\d.,'\x{A0}\x{202F}]*(?:\s*[^\s\d:=][^\s]*)?)";
/// 文本型取值: 行内剩余部分
const TEXT_VALUE: &str = r"(?P<value>\S.*?)\s*$";

/// 标签匹配规则，按声明顺序依次尝试
#[derive(Debug, Clone)]
pub enum LabelPattern {
    /// 标签与取值在同一行；取命名分组 `value`，否则取第一个非空分组
    SameLine(Regex),
    /// 标签单独占一行，取值位于下一个非空行
    NextLine { label: Regex, value: Regex },
}

/// 字段定义 (进程启动时构建，之后只读)
#[derive(Debug, Clone)]
pub struct FieldDefinition {
    pub key: String,
    pub label: String,
    pub unit_kind: UnitKind,
    pub patterns: Vec<LabelPattern>,
    /// 文本字段的最大字符数
    pub max_chars: Option<usize>,
}

impl FieldDefinition {
    pub fn new(key: &str, label: &str, unit_kind: UnitKind) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            unit_kind,
            patterns: Vec::new(),
            max_chars: None,
        }
    }

    pub fn max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = Some(max_chars);
        self
    }

    /// 追加一条同行规则 (完整正则)
    pub fn same_line(mut self, pattern: &str) -> Result<Self> {
        self.patterns.push(LabelPattern::SameLine(Regex::new(pattern)?));
        Ok(self)
    }

    /// 追加一条跨行规则：`label` 为标签正则片段，取值格式由字段类别决定
    pub fn next_line(mut self, label: &str) -> Result<Self> {
        let label_re = Regex::new(&format!(r"(?i)^\s*(?:{label})\s*[:=]?\s*$"))?;
        let value_re = Regex::new(&format!(r"^\s*{}", self.value_pattern()))?;
        self.patterns.push(LabelPattern::NextLine {
            label: label_re,
            value: value_re,
        });
        Ok(self)
    }

    /// 通用兜底规则：行首标签 + 取值，以及标签/取值分行的版式
    pub fn labelled(self, label: &str) -> Result<Self> {
        let pattern = match self.unit_kind {
            UnitKind::Text => format!(r"(?i)^\s*(?:{label})\s*[:=]\s*{TEXT_VALUE}"),
            _ => format!(r"(?i)^\s*(?:{label})\s*[:=]?\s*{NUMERIC_VALUE}"),
        };
        self.same_line(&pattern)?.next_line(label)
    }

    /// 整行取值格式
    fn value_pattern(&self) -> String {
        match self.unit_kind {
            UnitKind::Text => TEXT_VALUE.to_string(),
            _ => format!(r"{NUMERIC_VALUE}\s*$"),
        }
    }

    pub fn canonical_unit(&self) -> Option<Unit> {
        self.unit_kind.canonical_unit()
    }
}

/// 字段注册表：有序、键唯一、带版本号
#[derive(Debug, Clone)]
pub struct FieldRegistry {
    version: String,
    fields: Vec<FieldDefinition>,
}

impl FieldRegistry {
    pub fn new(version: &str, fields: Vec<FieldDefinition>) -> Result<Self> {
        let mut seen = HashSet::new();
        for field in &fields {
            if !seen.insert(field.key.as_str()) {
                return Err(Error::DuplicateField(field.key.clone()));
            }
        }
        Ok(Self {
            version: version.to_string(),
            fields,
        })
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }

    pub fn get(&self, key: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.key == key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn summaries(&self) -> Vec<FieldSummary> {
        self.fields
            .iter()
            .map(|f| FieldSummary {
                key: f.key.clone(),
                label: f.label.clone(),
                unit_kind: f.unit_kind,
                unit: f.canonical_unit(),
                patterns: f.patterns.len(),
            })
            .collect()
    }
}

/// 注册表对外展示用的字段摘要
#[derive(Debug, Clone, Serialize)]
pub struct FieldSummary {
    pub key: String,
    pub label: String,
    pub unit_kind: UnitKind,
    pub unit: Option<Unit>,
    pub patterns: usize,
}
