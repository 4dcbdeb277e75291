use crate::models::{ComparisonRow, Diagnostic, OpexResult, PaybackResult, Specification};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 报告头信息 (由调用方提供)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportHeader {
    pub title: String,
    pub option_a: String,
    pub option_b: String,
    pub currency: Option<String>,
    pub generated_at: DateTime<Utc>,
}

/// 导出用报告文档：组装后不可变，交给外部渲染
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportDocument {
    pub header: ReportHeader,
    pub registry_version: String,
    pub specification_a: Specification,
    pub specification_b: Specification,
    pub comparison: Vec<ComparisonRow>,
    pub opex: Option<OpexResult>,
    pub payback: Option<PaybackResult>,
    pub diagnostics: Vec<Diagnostic>,
    pub notes: Vec<String>,
}
