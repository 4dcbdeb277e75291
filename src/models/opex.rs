use crate::error::{Error, Result};
use crate::models::Diagnostic;
use serde::{Deserialize, Serialize};

/// 运行成本计算输入 (全部可选；缺少 EFLH / 电价时不输出 OPEX)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OpexInputs {
    pub eflh_hours: Option<f64>,
    pub energy_rate: Option<f64>,
    pub capex_a: Option<f64>,
    pub capex_b: Option<f64>,
    pub analysis_years: Option<u32>,
    pub currency: Option<String>,
}

impl OpexInputs {
    /// 用 `defaults` 补齐本请求未给出的项
    pub fn or(self, defaults: &OpexInputs) -> OpexInputs {
        OpexInputs {
            eflh_hours: self.eflh_hours.or(defaults.eflh_hours),
            energy_rate: self.energy_rate.or(defaults.energy_rate),
            capex_a: self.capex_a.or(defaults.capex_a),
            capex_b: self.capex_b.or(defaults.capex_b),
            analysis_years: self.analysis_years.or(defaults.analysis_years),
            currency: self.currency.or_else(|| defaults.currency.clone()),
        }
    }

    /// 校验取值范围：EFLH、电价为正，CAPEX 非负，年限至少 1 年
    pub fn validate(&self) -> Result<()> {
        let positive = [("eflh_hours", self.eflh_hours), ("energy_rate", self.energy_rate)];
        for (name, value) in positive {
            if let Some(v) = value {
                if !v.is_finite() || v <= 0.0 {
                    return Err(Error::InvalidAssumption(format!(
                        "{} must be a positive number, got {}",
                        name, v
                    )));
                }
            }
        }

        let non_negative = [("capex_a", self.capex_a), ("capex_b", self.capex_b)];
        for (name, value) in non_negative {
            if let Some(v) = value {
                if !v.is_finite() || v < 0.0 {
                    return Err(Error::InvalidAssumption(format!(
                        "{} must be a non-negative number, got {}",
                        name, v
                    )));
                }
            }
        }

        if self.analysis_years == Some(0) {
            return Err(Error::InvalidAssumption(
                "analysis_years must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// 实际参与计算的假设
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpexAssumptions {
    pub eflh_hours: f64,
    pub energy_rate: f64,
    pub analysis_years: Option<u32>,
    pub currency: Option<String>,
}

/// 功率来源：铭牌输入功率，或由制冷量 / EER 推算
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerSource {
    Rated,
    CapacityOverEer,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpexResult {
    pub power_a: f64,
    pub power_b: f64,
    pub power_source_a: PowerSource,
    pub power_source_b: PowerSource,
    pub annual_energy_a: f64,
    pub annual_energy_b: f64,
    pub annual_cost_a: f64,
    pub annual_cost_b: f64,
    /// cost_B - cost_A
    pub annual_cost_delta: f64,
    /// cost_A - cost_B，正数表示 B 运行更便宜
    pub annual_savings: f64,
    pub period_cost_a: Option<f64>,
    pub period_cost_b: Option<f64>,
    pub assumptions: OpexAssumptions,
}

/// 回收期：年数 / 立即回收 / 不适用
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "years", rename_all = "snake_case")]
pub enum Payback {
    Years(f64),
    /// B 投资不高于 A 且运行更省
    Immediate,
    /// B 运行不比 A 省，无法回收
    NotApplicable,
}

impl Payback {
    pub fn years(&self) -> Option<f64> {
        match self {
            Payback::Years(y) => Some(*y),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaybackResult {
    /// capex_B - capex_A
    pub capex_delta: f64,
    pub annual_savings: f64,
    pub payback: Payback,
}

/// OPEX 计算输出；缺少输入时两项均为 None，原因记录在 diagnostics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct OpexOutcome {
    pub opex: Option<OpexResult>,
    pub payback: Option<PaybackResult>,
    pub diagnostics: Vec<Diagnostic>,
}
