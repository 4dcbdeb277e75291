use crate::error::{Error, Result};
use crate::models::{
    Comparison, ComparisonRow, Diagnostic, DiagnosticKind, FieldRegistry, Presence,
    Specification, Value,
};

/// 逐字段对齐两份规格书，行序严格按注册表声明顺序
///
/// 两侧都缺失的字段同样保留一行，保证对比表形状固定。
pub fn compare(
    registry: &FieldRegistry,
    a: &Specification,
    b: &Specification,
) -> Result<Comparison> {
    ensure_registry(registry, a, b)?;

    let mut rows = Vec::with_capacity(registry.len());
    let mut diagnostics = Vec::new();

    for field in registry.fields() {
        let value_a = a.get(&field.key).cloned().unwrap_or_default();
        let value_b = b.get(&field.key).cloned().unwrap_or_default();

        let delta = match (&value_a, &value_b) {
            (
                Value::Numeric { value: va, unit: ua },
                Value::Numeric { value: vb, unit: ub },
            ) => {
                if ua == ub {
                    Some(vb - va)
                } else {
                    // 归一化之后同类别单位应当一致，出现说明注册表或换算表有缺陷
                    let message = format!(
                        "{}: option A in {} but option B in {}, no delta computed",
                        field.key, ua, ub
                    );
                    tracing::warn!("{}", message);
                    diagnostics.push(Diagnostic::new(
                        DiagnosticKind::UnitMismatch,
                        Some(&field.key),
                        message,
                    ));
                    None
                }
            }
            _ => None,
        };

        let presence = Presence::of(&value_a, &value_b);
        let equal = presence == Presence::Both && value_a == value_b;

        rows.push(ComparisonRow {
            key: field.key.clone(),
            label: field.label.clone(),
            value_a,
            value_b,
            presence,
            equal,
            delta,
            unit: field.canonical_unit(),
        });
    }

    tracing::info!(
        "compared {} fields: {} present on both sides, {} differ",
        rows.len(),
        rows.iter().filter(|r| r.presence == Presence::Both).count(),
        rows.iter()
            .filter(|r| r.presence == Presence::Both && !r.equal)
            .count()
    );

    Ok(Comparison { rows, diagnostics })
}

/// 两份规格书必须基于同一版本的注册表
pub fn ensure_registry(
    registry: &FieldRegistry,
    a: &Specification,
    b: &Specification,
) -> Result<()> {
    if a.registry_version() != b.registry_version() {
        return Err(Error::RegistryMismatch {
            a: a.registry_version().to_string(),
            b: b.registry_version().to_string(),
        });
    }
    if a.registry_version() != registry.version() {
        return Err(Error::RegistryMismatch {
            a: a.registry_version().to_string(),
            b: registry.version().to_string(),
        });
    }
    Ok(())
}
