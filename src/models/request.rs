use crate::models::{Diagnostic, OpexInputs, Specification, Value};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// 一份待解析文档：外部 PDF 转文本后的逐页文本行
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentInput {
    #[serde(default)]
    pub name: String,
    pub pages: Vec<Vec<String>>,
    /// 人工修正 (字段键 -> 修正值)，在抽取之后、对比之前整体替换
    #[serde(default)]
    pub overrides: IndexMap<String, Value>,
}

/// 对比请求
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompareRequest {
    #[serde(default)]
    pub title: Option<String>,
    pub option_a: DocumentInput,
    pub option_b: DocumentInput,
    #[serde(default)]
    pub opex: OpexInputs,
}

/// 单文档抽取结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extraction {
    pub specification: Specification,
    pub diagnostics: Vec<Diagnostic>,
}
