use crate::error::{Error, Result};
use crate::models::{
    Comparison, Diagnostic, OpexOutcome, Payback, ReportDocument, ReportHeader, Specification,
};
use std::io::Write;
use std::path::Path;

const EXTRACTION_NOTE: &str = "Values are extracted from datasheets automatically and may require \
verification. Manual corrections supplied with the request are reflected here.";

/// 组装报告：只做聚合，唯一的校验是两份规格书的注册表版本一致
pub fn assemble(
    header: ReportHeader,
    specification_a: Specification,
    specification_b: Specification,
    comparison: Comparison,
    opex: OpexOutcome,
    mut diagnostics: Vec<Diagnostic>,
) -> Result<ReportDocument> {
    if specification_a.registry_version() != specification_b.registry_version() {
        return Err(Error::RegistryMismatch {
            a: specification_a.registry_version().to_string(),
            b: specification_b.registry_version().to_string(),
        });
    }

    diagnostics.extend(comparison.diagnostics);
    diagnostics.extend(opex.diagnostics);

    Ok(ReportDocument {
        header,
        registry_version: specification_a.registry_version().to_string(),
        specification_a,
        specification_b,
        comparison: comparison.rows,
        opex: opex.opex,
        payback: opex.payback,
        diagnostics,
        notes: vec![EXTRACTION_NOTE.to_string()],
    })
}

fn opt_to_csv(val: Option<f64>) -> String {
    val.map(|v| v.to_string()).unwrap_or_default()
}

/// 对比表写为 CSV
pub fn write_comparison_csv<W: Write>(report: &ReportDocument, writer: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record([
        "Metric",
        "Key",
        report.header.option_a.as_str(),
        report.header.option_b.as_str(),
        "B - A",
        "Unit",
    ])?;

    for row in &report.comparison {
        writer.write_record([
            row.label.clone(),
            row.key.clone(),
            row.value_a.to_string(),
            row.value_b.to_string(),
            opt_to_csv(row.delta),
            row.unit.map(|u| u.to_string()).unwrap_or_default(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// OPEX / 回收期汇总写为 CSV；未计算 OPEX 时只输出表头
pub fn write_opex_csv<W: Write>(report: &ReportDocument, writer: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(["Item", "Option A", "Option B"])?;

    if let Some(opex) = &report.opex {
        let currency = report.header.currency.as_deref().unwrap_or("");
        let eflh = opex.assumptions.eflh_hours;
        let mut rows = vec![
            (
                "Power used (kW)".to_string(),
                opex.power_a.to_string(),
                opex.power_b.to_string(),
            ),
            (
                format!("Annual energy (kWh) @ {:.0} h/y", eflh),
                opex.annual_energy_a.to_string(),
                opex.annual_energy_b.to_string(),
            ),
            (
                format!("Annual energy cost ({})", currency),
                opex.annual_cost_a.to_string(),
                opex.annual_cost_b.to_string(),
            ),
        ];
        if let Some(years) = opex.assumptions.analysis_years {
            rows.push((
                format!("{}-year energy cost ({})", years, currency),
                opt_to_csv(opex.period_cost_a),
                opt_to_csv(opex.period_cost_b),
            ));
        }
        rows.push((
            format!("Annual savings (A - B) ({})", currency),
            String::new(),
            opex.annual_savings.to_string(),
        ));
        if let Some(payback) = &report.payback {
            rows.push((
                format!("CAPEX delta (B - A) ({})", currency),
                String::new(),
                payback.capex_delta.to_string(),
            ));
            let years = match payback.payback {
                Payback::Years(y) => format!("{:.2}", y),
                Payback::Immediate => "immediate".to_string(),
                Payback::NotApplicable => "n/a".to_string(),
            };
            rows.push(("Simple payback (years)".to_string(), String::new(), years));
        }

        for (item, a, b) in rows {
            writer.write_record([item, a, b])?;
        }
    }

    writer.flush()?;
    Ok(())
}

/// 导出对比表到 CSV 文件
pub fn export_to_csv(report: &ReportDocument, output_path: &Path) -> Result<()> {
    let file = std::fs::File::create(output_path)?;
    write_comparison_csv(report, file)
}
