use crate::error::Result;
use crate::models::{
    CompareRequest, DocumentInput, Extraction, FieldRegistry, OpexInputs, ReportDocument,
    ReportHeader, Side,
};
use crate::service::{comparator, opex, report, FieldExtractor};
use chrono::Utc;
use std::sync::Arc;

const DEFAULT_TITLE: &str = "Chiller Datasheet Comparison Report";

/// 对比服务：抽取 -> 人工修正 -> 对比 -> OPEX -> 组装报告
pub struct ComparisonService {
    registry: Arc<FieldRegistry>,
    extractor: FieldExtractor,
    opex_defaults: OpexInputs,
}

impl ComparisonService {
    pub fn new(registry: Arc<FieldRegistry>, opex_defaults: OpexInputs) -> Self {
        Self {
            extractor: FieldExtractor::new(registry.clone()),
            registry,
            opex_defaults,
        }
    }

    pub fn registry(&self) -> &FieldRegistry {
        &self.registry
    }

    /// 单文档抽取并应用该文档的人工修正
    pub fn extract_document(&self, document: &DocumentInput) -> Result<Extraction> {
        let extraction = self.extractor.extract_pages(&document.pages);
        self.finish_extraction(document, extraction)
    }

    fn finish_extraction(
        &self,
        document: &DocumentInput,
        mut extraction: Extraction,
    ) -> Result<Extraction> {
        if !document.overrides.is_empty() {
            let applied = extraction
                .specification
                .apply_overrides(&self.registry, &document.overrides)?;
            tracing::info!("{}: applied {} manual corrections", document.name, applied);
        }
        Ok(extraction)
    }

    /// 完整对比流程
    pub fn compare(&self, request: CompareRequest) -> Result<ReportDocument> {
        let inputs = request.opex.or(&self.opex_defaults);
        inputs.validate()?;

        let name_a = display_name(&request.option_a, "Option A");
        let name_b = display_name(&request.option_b, "Option B");
        tracing::info!("开始对比: A = {}, B = {}", name_a, name_b);

        // 1. 两份文档并行抽取
        let (extraction_a, extraction_b) = self
            .extractor
            .extract_pair(&request.option_a.pages, &request.option_b.pages);

        // 2. 人工修正
        let extraction_a = self.finish_extraction(&request.option_a, extraction_a)?;
        let extraction_b = self.finish_extraction(&request.option_b, extraction_b)?;

        let mut diagnostics: Vec<_> = extraction_a
            .diagnostics
            .into_iter()
            .map(|d| d.for_side(Side::A))
            .collect();
        diagnostics.extend(
            extraction_b
                .diagnostics
                .into_iter()
                .map(|d| d.for_side(Side::B)),
        );

        // 3. 对比
        let spec_a = extraction_a.specification;
        let spec_b = extraction_b.specification;
        let comparison = comparator::compare(&self.registry, &spec_a, &spec_b)?;

        // 4. OPEX / 回收期
        let outcome = opex::calculate(&spec_a, &spec_b, &inputs);

        // 5. 组装
        let header = ReportHeader {
            title: request.title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            option_a: name_a,
            option_b: name_b,
            currency: inputs.currency.clone(),
            generated_at: Utc::now(),
        };
        let document = report::assemble(header, spec_a, spec_b, comparison, outcome, diagnostics)?;

        tracing::info!(
            "对比完成: {} 行, OPEX {}, 诊断 {} 条",
            document.comparison.len(),
            if document.opex.is_some() { "已计算" } else { "缺失" },
            document.diagnostics.len()
        );
        Ok(document)
    }
}

fn display_name(document: &DocumentInput, fallback: &str) -> String {
    if document.name.trim().is_empty() {
        fallback.to_string()
    } else {
        document.name.clone()
    }
}
