use serde::{Deserialize, Serialize};
use std::fmt;

/// 字段的物理量类别，决定换算规则以及差值是否有意义
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitKind {
    Power,
    Flow,
    Pressure,
    Sound,
    Dimension,
    Weight,
    Ratio,
    Dimensionless,
    Temperature,
    Current,
    Percent,
    Text,
}

impl UnitKind {
    /// 该类别统一换算到的标准单位 (文本类没有单位)
    pub fn canonical_unit(self) -> Option<Unit> {
        match self {
            UnitKind::Power => Some(Unit::Kw),
            UnitKind::Flow => Some(Unit::Gpm),
            UnitKind::Pressure => Some(Unit::Kpa),
            UnitKind::Sound => Some(Unit::Dba),
            UnitKind::Dimension => Some(Unit::Mm),
            UnitKind::Weight => Some(Unit::Kg),
            UnitKind::Ratio => Some(Unit::KwPerKw),
            UnitKind::Dimensionless => Some(Unit::None),
            UnitKind::Temperature => Some(Unit::Celsius),
            UnitKind::Current => Some(Unit::Ampere),
            UnitKind::Percent => Some(Unit::Percent),
            UnitKind::Text => None,
        }
    }

    pub fn is_numeric(self) -> bool {
        self != UnitKind::Text
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UnitKind::Power => "power",
            UnitKind::Flow => "flow",
            UnitKind::Pressure => "pressure",
            UnitKind::Sound => "sound",
            UnitKind::Dimension => "dimension",
            UnitKind::Weight => "weight",
            UnitKind::Ratio => "ratio",
            UnitKind::Dimensionless => "dimensionless",
            UnitKind::Temperature => "temperature",
            UnitKind::Current => "current",
            UnitKind::Percent => "percent",
            UnitKind::Text => "text",
        };
        f.write_str(name)
    }
}

/// 标准单位标签
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    Kw,
    Gpm,
    Kpa,
    Dba,
    Mm,
    Kg,
    KwPerKw,
    None,
    Celsius,
    Ampere,
    Percent,
}

impl Unit {
    pub fn kind(self) -> UnitKind {
        match self {
            Unit::Kw => UnitKind::Power,
            Unit::Gpm => UnitKind::Flow,
            Unit::Kpa => UnitKind::Pressure,
            Unit::Dba => UnitKind::Sound,
            Unit::Mm => UnitKind::Dimension,
            Unit::Kg => UnitKind::Weight,
            Unit::KwPerKw => UnitKind::Ratio,
            Unit::None => UnitKind::Dimensionless,
            Unit::Celsius => UnitKind::Temperature,
            Unit::Ampere => UnitKind::Current,
            Unit::Percent => UnitKind::Percent,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Unit::Kw => "kW",
            Unit::Gpm => "gpm",
            Unit::Kpa => "kPa",
            Unit::Dba => "dBA",
            Unit::Mm => "mm",
            Unit::Kg => "kg",
            Unit::KwPerKw => "kW/kW",
            Unit::None => "",
            Unit::Celsius => "°C",
            Unit::Ampere => "A",
            Unit::Percent => "%",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
