//! 运行成本与简单回收期
//!
//! 年耗电 = 功率 × 等效满负荷小时；年电费 = 年耗电 × 电价。
//! 任一侧缺功率时整体不输出，不会用 0 代替。

use crate::error::Error;
use crate::models::{
    Diagnostic, OpexAssumptions, OpexInputs, OpexOutcome, OpexResult, Payback,
    PaybackResult, PowerSource, Side, Specification,
};
use crate::registry::keys;

/// 取用于 OPEX 的功率 (kW)：优先铭牌输入功率，否则 制冷量 / EER
pub fn power_of(spec: &Specification) -> Option<(f64, PowerSource)> {
    if let Some(power) = spec.number(keys::POWER_INPUT) {
        return Some((power, PowerSource::Rated));
    }
    let capacity = spec
        .number(keys::NET_CAPACITY)
        .or_else(|| spec.number(keys::GROSS_CAPACITY))?;
    let eer = spec
        .number(keys::NET_EER)
        .or_else(|| spec.number(keys::GROSS_EER))?;
    if eer <= 0.0 {
        return None;
    }
    Some((capacity / eer, PowerSource::CapacityOverEer))
}

fn missing(side: Option<Side>, message: &str) -> Diagnostic {
    tracing::warn!("OPEX skipped: {}", message);
    let diag = Diagnostic::from_error(None, &Error::MissingRequiredInput(message.to_string()));
    match side {
        Some(side) => diag.for_side(side),
        None => diag,
    }
}

/// 计算 OPEX 与回收期；输入已通过 `OpexInputs::validate`
pub fn calculate(a: &Specification, b: &Specification, inputs: &OpexInputs) -> OpexOutcome {
    let mut diagnostics = Vec::new();

    let (Some(eflh_hours), Some(energy_rate)) = (inputs.eflh_hours, inputs.energy_rate) else {
        diagnostics.push(missing(None, "eflh_hours and energy_rate are required"));
        return OpexOutcome {
            diagnostics,
            ..Default::default()
        };
    };

    let power_a = power_of(a);
    let power_b = power_of(b);
    if power_a.is_none() {
        diagnostics.push(missing(Some(Side::A), "no input power for option A"));
    }
    if power_b.is_none() {
        diagnostics.push(missing(Some(Side::B), "no input power for option B"));
    }
    let (Some((power_a, source_a)), Some((power_b, source_b))) = (power_a, power_b) else {
        return OpexOutcome {
            diagnostics,
            ..Default::default()
        };
    };

    let annual_energy_a = power_a * eflh_hours;
    let annual_energy_b = power_b * eflh_hours;
    let annual_cost_a = annual_energy_a * energy_rate;
    let annual_cost_b = annual_energy_b * energy_rate;
    let annual_savings = annual_cost_a - annual_cost_b;
    let years = inputs.analysis_years;

    let opex = OpexResult {
        power_a,
        power_b,
        power_source_a: source_a,
        power_source_b: source_b,
        annual_energy_a,
        annual_energy_b,
        annual_cost_a,
        annual_cost_b,
        annual_cost_delta: annual_cost_b - annual_cost_a,
        annual_savings,
        period_cost_a: years.map(|y| annual_cost_a * f64::from(y)),
        period_cost_b: years.map(|y| annual_cost_b * f64::from(y)),
        assumptions: OpexAssumptions {
            eflh_hours,
            energy_rate,
            analysis_years: years,
            currency: inputs.currency.clone(),
        },
    };

    let payback = match (inputs.capex_a, inputs.capex_b) {
        (Some(capex_a), Some(capex_b)) => Some(payback(capex_b - capex_a, annual_savings)),
        _ => None,
    };

    tracing::info!(
        "OPEX: annual cost A {:.2}, B {:.2}, delta {:.2}, payback {:?}",
        annual_cost_a,
        annual_cost_b,
        opex.annual_cost_delta,
        payback.as_ref().map(|p| p.payback)
    );

    OpexOutcome {
        opex: Some(opex),
        payback,
        diagnostics,
    }
}

/// 简单回收期 (不折现)
pub fn payback(capex_delta: f64, annual_savings: f64) -> PaybackResult {
    let payback = if annual_savings <= 0.0 {
        Payback::NotApplicable
    } else if capex_delta <= 0.0 {
        Payback::Immediate
    } else {
        Payback::Years(capex_delta / annual_savings)
    };
    PaybackResult {
        capex_delta,
        annual_savings,
        payback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DiagnosticKind, Unit, Value};
    use crate::registry::chiller_registry;

    fn spec_with(values: &[(&str, Value)]) -> Specification {
        let registry = chiller_registry().unwrap();
        let mut spec = Specification::empty(&registry);
        for (key, value) in values {
            spec.insert(key, value.clone()).unwrap();
        }
        spec
    }

    fn inputs() -> OpexInputs {
        OpexInputs {
            eflh_hours: Some(2000.0),
            energy_rate: Some(0.12),
            ..Default::default()
        }
    }

    #[test]
    fn annual_cost_delta() {
        let a = spec_with(&[(keys::POWER_INPUT, Value::numeric(100.0, Unit::Kw))]);
        let b = spec_with(&[(keys::POWER_INPUT, Value::numeric(90.0, Unit::Kw))]);
        let outcome = calculate(&a, &b, &inputs());
        let opex = outcome.opex.unwrap();

        assert!((opex.annual_cost_a - 24000.0).abs() < 1e-6);
        assert!((opex.annual_cost_b - 21600.0).abs() < 1e-6);
        assert!((opex.annual_cost_delta - -2400.0).abs() < 1e-6);
        assert_eq!(opex.annual_energy_a, 200_000.0);
        assert!(outcome.payback.is_none());
        assert!(outcome.diagnostics.is_empty());
    }

    #[test]
    fn payback_years_from_capex() {
        let result = payback(60000.0 - 50000.0, 24000.0 - 21600.0);
        let years = result.payback.years().unwrap();
        assert!((years - 4.1667).abs() < 1e-3);
        assert_eq!(result.capex_delta, 10000.0);
    }

    #[test]
    fn payback_through_calculate() {
        let a = spec_with(&[(keys::POWER_INPUT, Value::numeric(100.0, Unit::Kw))]);
        let b = spec_with(&[(keys::POWER_INPUT, Value::numeric(90.0, Unit::Kw))]);
        let inputs = OpexInputs {
            capex_a: Some(50000.0),
            capex_b: Some(60000.0),
            analysis_years: Some(10),
            ..inputs()
        };
        let outcome = calculate(&a, &b, &inputs);
        let payback = outcome.payback.unwrap();
        assert!((payback.payback.years().unwrap() - 4.1667).abs() < 1e-3);

        let opex = outcome.opex.unwrap();
        assert!((opex.period_cost_a.unwrap() - 240_000.0).abs() < 1e-6);
    }

    #[test]
    fn equal_running_cost_is_not_applicable() {
        let result = payback(10000.0, 0.0);
        assert_eq!(result.payback, Payback::NotApplicable);
        assert_eq!(result.payback.years(), None);

        let cheaper = payback(-10000.0, 0.0);
        assert_eq!(cheaper.payback, Payback::NotApplicable);
        assert_eq!(cheaper.payback.years(), None);
    }

    #[test]
    fn cheaper_to_buy_and_run_is_immediate() {
        assert_eq!(payback(-5000.0, 1200.0).payback, Payback::Immediate);
    }

    #[test]
    fn b_more_expensive_to_run_is_not_applicable() {
        assert_eq!(payback(10000.0, -2400.0).payback, Payback::NotApplicable);
    }

    #[test]
    fn missing_power_skips_opex_entirely() {
        let a = spec_with(&[(keys::POWER_INPUT, Value::numeric(100.0, Unit::Kw))]);
        let b = spec_with(&[]);
        let inputs = OpexInputs {
            capex_a: Some(1.0),
            capex_b: Some(2.0),
            ..inputs()
        };
        let outcome = calculate(&a, &b, &inputs);
        assert!(outcome.opex.is_none());
        assert!(outcome.payback.is_none());
        assert_eq!(outcome.diagnostics.len(), 1);
        assert_eq!(outcome.diagnostics[0].side, Some(Side::B));
        assert_eq!(
            outcome.diagnostics[0].kind,
            DiagnosticKind::MissingRequiredInput
        );
        assert_eq!(outcome.diagnostics[0].key, None);
        assert_eq!(
            outcome.diagnostics[0].message,
            "missing required input: no input power for option B"
        );
    }

    #[test]
    fn missing_rate_skips_opex() {
        let a = spec_with(&[(keys::POWER_INPUT, Value::numeric(100.0, Unit::Kw))]);
        let b = spec_with(&[(keys::POWER_INPUT, Value::numeric(90.0, Unit::Kw))]);
        let inputs = OpexInputs {
            eflh_hours: Some(2000.0),
            ..Default::default()
        };
        let outcome = calculate(&a, &b, &inputs);
        assert!(outcome.opex.is_none());
        assert_eq!(outcome.diagnostics.len(), 1);
    }

    #[test]
    fn power_falls_back_to_capacity_over_eer() {
        let spec = spec_with(&[
            (keys::NET_CAPACITY, Value::numeric(300.0, Unit::Kw)),
            (keys::GROSS_EER, Value::numeric(3.0, Unit::KwPerKw)),
        ]);
        assert_eq!(power_of(&spec), Some((100.0, PowerSource::CapacityOverEer)));

        let zero_eer = spec_with(&[
            (keys::NET_CAPACITY, Value::numeric(300.0, Unit::Kw)),
            (keys::NET_EER, Value::numeric(0.0, Unit::KwPerKw)),
        ]);
        assert_eq!(power_of(&zero_eer), None);
    }
}
