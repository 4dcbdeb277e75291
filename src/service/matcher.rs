//! 标签规则匹配
//!
//! 对每个字段，按声明顺序尝试其规则，每条规则再按行序扫描；
//! 第一个命中的 (规则, 行) 组合胜出，之后的行和规则不再考虑。

use crate::models::{FieldDefinition, FieldRegistry, LabelPattern, RawMatch};
use regex::Captures;

/// 扫描一份文档的全部行，惰性产出每个字段至多一个命中
///
/// 每次调用互不影响，可对同一文档重复调用。
pub fn match_lines<'a, S: AsRef<str>>(
    registry: &'a FieldRegistry,
    lines: &'a [S],
) -> impl Iterator<Item = RawMatch> + 'a {
    registry
        .fields()
        .iter()
        .filter_map(move |field| match_field(field, lines))
}

/// 单字段匹配
pub fn match_field<S: AsRef<str>>(field: &FieldDefinition, lines: &[S]) -> Option<RawMatch> {
    for (pattern_index, pattern) in field.patterns.iter().enumerate() {
        for line_index in 0..lines.len() {
            let Some((raw_text, source_line_index)) = capture(pattern, lines, line_index) else {
                continue;
            };
            tracing::debug!(
                "field {} matched rule #{} at line {}: {:?}",
                field.key,
                pattern_index,
                source_line_index,
                raw_text
            );
            return Some(RawMatch {
                key: field.key.clone(),
                raw_text,
                source_line_index,
                pattern_index,
            });
        }
    }
    None
}

/// 在第 `index` 行尝试一条规则，返回 (取值文本, 取值所在行)
fn capture<S: AsRef<str>>(
    pattern: &LabelPattern,
    lines: &[S],
    index: usize,
) -> Option<(String, usize)> {
    let line = lines[index].as_ref();
    match pattern {
        LabelPattern::SameLine(re) => {
            let caps = re.captures(line)?;
            value_of(&caps).map(|v| (v, index))
        }
        LabelPattern::NextLine { label, value } => {
            if !label.is_match(line) {
                return None;
            }
            let (next_index, next_line) = lines
                .iter()
                .enumerate()
                .skip(index + 1)
                .map(|(i, l)| (i, l.as_ref()))
                .find(|(_, l)| !l.trim().is_empty())?;
            let caps = value.captures(next_line)?;
            value_of(&caps).map(|v| (v, next_index))
        }
    }
}

/// 命名分组 `value` 优先，否则取第一个非空分组 (兼容带分支的规则)
fn value_of(caps: &Captures<'_>) -> Option<String> {
    if let Some(m) = caps.name("value") {
        let text = m.as_str().trim();
        return (!text.is_empty()).then(|| text.to_string());
    }
    caps.iter()
        .skip(1)
        .flatten()
        .map(|m| m.as_str().trim())
        .find(|s| !s.is_empty())
        .map(str::to_string)
}
