use crate::models::{Diagnostic, Unit, Value};
use serde::{Deserialize, Serialize};

/// 字段在两侧的存在情况
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Presence {
    Both,
    OnlyA,
    OnlyB,
    Neither,
}

impl Presence {
    pub fn of(a: &Value, b: &Value) -> Self {
        match (a.is_absent(), b.is_absent()) {
            (false, false) => Presence::Both,
            (false, true) => Presence::OnlyA,
            (true, false) => Presence::OnlyB,
            (true, true) => Presence::Neither,
        }
    }
}

/// 对比表的一行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub key: String,
    pub label: String,
    pub value_a: Value,
    pub value_b: Value,
    pub presence: Presence,
    pub equal: bool,
    /// B - A，仅当两侧均为同单位数值时存在
    pub delta: Option<f64>,
    pub unit: Option<Unit>,
}

/// 对比结果：按注册表顺序的完整行集 + 诊断
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub rows: Vec<ComparisonRow>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Comparison {
    pub fn row(&self, key: &str) -> Option<&ComparisonRow> {
        self.rows.iter().find(|r| r.key == key)
    }

    /// 两侧都有取值但不相等的行
    pub fn differing(&self) -> impl Iterator<Item = &ComparisonRow> {
        self.rows
            .iter()
            .filter(|r| r.presence == Presence::Both && !r.equal)
    }
}
