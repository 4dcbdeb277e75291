use crate::models::{
    Diagnostic, Extraction, FieldDefinition, FieldRegistry, RawMatch, Specification, UnitKind,
    Value,
};
use crate::service::{matcher, units};
use std::sync::Arc;

/// 规格抽取器：匹配 + 归一化，产出一份完整的 Specification
///
/// 单个字段解析失败只会让该字段缺失并记录诊断，不会中断整份文档。
#[derive(Debug, Clone)]
pub struct FieldExtractor {
    registry: Arc<FieldRegistry>,
}

impl FieldExtractor {
    pub fn new(registry: Arc<FieldRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &FieldRegistry {
        &self.registry
    }

    /// 按页输入：跳过空白页，各页首尾相接
    pub fn extract_pages(&self, pages: &[Vec<String>]) -> Extraction {
        let lines: Vec<&str> = pages
            .iter()
            .filter(|page| page.iter().any(|l| !l.trim().is_empty()))
            .flat_map(|page| page.iter().map(String::as_str))
            .collect();
        self.extract(lines.as_slice())
    }

    pub fn extract<S: AsRef<str>>(&self, lines: &[S]) -> Extraction {
        let mut diagnostics = Vec::new();

        // 命中按注册表顺序产出，与字段逐个对齐合并
        let mut matches = matcher::match_lines(&self.registry, lines).peekable();
        let specification = Specification::from_fn(&self.registry, |field| {
            match matches.next_if(|raw| raw.key == field.key) {
                Some(raw) => value_of(field, &raw, &mut diagnostics),
                None => Value::Absent,
            }
        });

        tracing::info!(
            "extracted {}/{} fields from {} lines, {} diagnostics",
            specification.present_count(),
            self.registry.len(),
            lines.len(),
            diagnostics.len()
        );

        Extraction {
            specification,
            diagnostics,
        }
    }

    /// 两份文档并行抽取 (互不共享可变状态)
    pub fn extract_pair(
        &self,
        pages_a: &[Vec<String>],
        pages_b: &[Vec<String>],
    ) -> (Extraction, Extraction) {
        rayon::join(|| self.extract_pages(pages_a), || self.extract_pages(pages_b))
    }
}

/// 单个命中转为取值；归一化失败记为缺失并追加诊断
fn value_of(field: &FieldDefinition, raw: &RawMatch, diagnostics: &mut Vec<Diagnostic>) -> Value {
    match field.unit_kind {
        UnitKind::Text => text_value(&raw.raw_text, field.max_chars),
        kind => match units::normalize(&raw.raw_text, kind) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(
                    "field {} (line {}): {}, recorded as absent",
                    field.key,
                    raw.source_line_index,
                    e
                );
                diagnostics.push(Diagnostic::from_error(Some(field.key.as_str()), &e));
                Value::Absent
            }
        },
    }
}

/// 文本字段：去空白、按字符截断，空串视为缺失
fn text_value(raw: &str, max_chars: Option<usize>) -> Value {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Value::Absent;
    }
    match max_chars {
        Some(limit) if trimmed.chars().count() > limit => {
            let cut: String = trimmed.chars().take(limit).collect();
            Value::text(cut.trim_end())
        }
        _ => Value::text(trimmed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DiagnosticKind, Unit};
    use crate::registry::chiller_registry;

    fn extractor() -> FieldExtractor {
        FieldExtractor::new(Arc::new(chiller_registry().unwrap()))
    }

    #[test]
    fn every_registry_key_has_exactly_one_slot() {
        let extractor = extractor();
        let lines = ["Net capacity 350.2 kW", "Refrigerant Type / charge R513A 96 kg"];
        let spec = extractor.extract(&lines).specification;

        assert_eq!(spec.len(), extractor.registry().len());
        for field in extractor.registry().fields() {
            assert!(spec.get(&field.key).is_some(), "missing slot {}", field.key);
        }
        assert_eq!(spec.get("net_capacity"), Some(&Value::numeric(350.2, Unit::Kw)));
        assert_eq!(spec.get("refrigerant"), Some(&Value::text("R513A")));
        assert_eq!(spec.get("sound_power"), Some(&Value::Absent));
    }

    #[test]
    fn slots_follow_registry_order_with_sparse_matches() {
        let extractor = extractor();
        let lines = [
            "Operating weight 2,450 kg",
            "Gross unit power 100.0 kW",
            "Model CGAF 090",
        ];
        let spec = extractor.extract(&lines).specification;

        let keys: Vec<&str> = spec.iter().map(|(key, _)| key).collect();
        let expected: Vec<&str> = extractor
            .registry()
            .fields()
            .iter()
            .map(|f| f.key.as_str())
            .collect();
        assert_eq!(keys, expected);
        assert_eq!(spec.present_count(), 3);
        assert_eq!(spec.get("model"), Some(&Value::text("CGAF 090")));
        assert_eq!(spec.number("power_input"), Some(100.0));
        assert_eq!(spec.number("operating_weight"), Some(2450.0));
    }

    #[test]
    fn unrecognized_unit_becomes_absent_with_diagnostic() {
        let extractor = extractor();
        let lines = ["Design flow: 12 furlongs", "Net capacity 350 kW"];
        let extraction = extractor.extract(&lines);

        assert_eq!(extraction.specification.get("design_flow"), Some(&Value::Absent));
        assert_eq!(
            extraction.specification.number("net_capacity"),
            Some(350.0)
        );
        assert_eq!(extraction.diagnostics.len(), 1);
        let diag = &extraction.diagnostics[0];
        assert_eq!(diag.kind, DiagnosticKind::UnrecognizedUnit);
        assert_eq!(diag.key.as_deref(), Some("design_flow"));
    }

    #[test]
    fn text_is_truncated_to_field_limit() {
        let registry = FieldRegistry::new(
            "test-v1",
            vec![FieldDefinition::new("model", "Model", UnitKind::Text)
                .labelled("Model")
                .unwrap()
                .max_chars(5)],
        )
        .unwrap();
        let extractor = FieldExtractor::new(Arc::new(registry));
        let spec = extractor.extract(&["Model: CGAF 090 XE"]).specification;
        assert_eq!(spec.get("model"), Some(&Value::text("CGAF")));
    }

    #[test]
    fn empty_pages_are_skipped() {
        let extractor = extractor();
        let pages = vec![
            vec!["   ".to_string()],
            vec!["Net capacity".to_string()],
            vec!["350 kW".to_string()],
        ];
        let spec = extractor.extract_pages(&pages).specification;
        assert_eq!(spec.number("net_capacity"), Some(350.0));
    }

    #[test]
    fn pair_extraction_is_independent() {
        let extractor = extractor();
        let a = vec![vec!["Total absorbed power 100 kW".to_string()]];
        let b = vec![vec!["Total absorbed power 90 kW".to_string()]];
        let (ea, eb) = extractor.extract_pair(&a, &b);
        assert_eq!(ea.specification.number("power_input"), Some(100.0));
        assert_eq!(eb.specification.number("power_input"), Some(90.0));
    }
}
