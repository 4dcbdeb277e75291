//! 单位归一化
//!
//! 把 "1,250 gpm"、"120.5 kW"、"50 tons" 之类的原始文本转成
//! 标准单位下的数值。每个物理量类别只有一个标准单位，换算系数均为常量。

use crate::error::{Error, Result};
use crate::models::{UnitKind, Value};

/// 线性换算: canonical = raw * factor + offset
#[derive(Debug, Clone, Copy, PartialEq)]
struct Conversion {
    factor: f64,
    offset: f64,
}

const fn scale(factor: f64) -> Conversion {
    Conversion { factor, offset: 0.0 }
}

const KW_PER_TON: f64 = 3.516_852_842;
const KW_PER_BTUH: f64 = 0.000_293_071_07;

const POWER: &[(&str, Conversion)] = &[
    ("kw", scale(1.0)),
    ("kilowatt", scale(1.0)),
    ("kilowatts", scale(1.0)),
    ("w", scale(0.001)),
    ("watt", scale(0.001)),
    ("watts", scale(0.001)),
    ("mw", scale(1000.0)),
    ("hp", scale(0.745_699_872)),
    ("ton", scale(KW_PER_TON)),
    ("tons", scale(KW_PER_TON)),
    ("tr", scale(KW_PER_TON)),
    ("rt", scale(KW_PER_TON)),
    ("usrt", scale(KW_PER_TON)),
    ("btu/h", scale(KW_PER_BTUH)),
    ("btu/hr", scale(KW_PER_BTUH)),
    ("btuh", scale(KW_PER_BTUH)),
    ("mbh", scale(KW_PER_BTUH * 1000.0)),
];

const GPM_PER_LS: f64 = 15.850_323_141;

const FLOW: &[(&str, Conversion)] = &[
    ("gpm", scale(1.0)),
    ("usgpm", scale(1.0)),
    ("gal/min", scale(1.0)),
    ("l/s", scale(GPM_PER_LS)),
    ("l/sec", scale(GPM_PER_LS)),
    ("ls", scale(GPM_PER_LS)),
    ("l/min", scale(0.264_172_052)),
    ("lpm", scale(0.264_172_052)),
    ("m3/h", scale(4.402_867_539)),
    ("m3/hr", scale(4.402_867_539)),
    ("cmh", scale(4.402_867_539)),
    ("m3/s", scale(GPM_PER_LS * 1000.0)),
];

const PRESSURE: &[(&str, Conversion)] = &[
    ("kpa", scale(1.0)),
    ("pa", scale(0.001)),
    ("mbar", scale(0.1)),
    ("bar", scale(100.0)),
    ("psi", scale(6.894_757_293)),
    ("ftwg", scale(2.988_98)),
    ("fth2o", scale(2.988_98)),
    ("ftwc", scale(2.988_98)),
    ("mwg", scale(9.806_65)),
    ("mh2o", scale(9.806_65)),
    ("mwc", scale(9.806_65)),
    ("inwg", scale(0.249_089)),
    ("inh2o", scale(0.249_089)),
];

const SOUND: &[(&str, Conversion)] = &[("dba", scale(1.0)), ("db(a)", scale(1.0))];

const DIMENSION: &[(&str, Conversion)] = &[
    ("mm", scale(1.0)),
    ("cm", scale(10.0)),
    ("m", scale(1000.0)),
    ("in", scale(25.4)),
    ("inch", scale(25.4)),
    ("inches", scale(25.4)),
    ("\"", scale(25.4)),
    ("ft", scale(304.8)),
    ("feet", scale(304.8)),
];

const WEIGHT: &[(&str, Conversion)] = &[
    ("kg", scale(1.0)),
    ("kgs", scale(1.0)),
    ("g", scale(0.001)),
    ("t", scale(1000.0)),
    ("tonne", scale(1000.0)),
    ("tonnes", scale(1000.0)),
    ("lb", scale(0.453_592_37)),
    ("lbs", scale(0.453_592_37)),
    ("pound", scale(0.453_592_37)),
    ("pounds", scale(0.453_592_37)),
];

const RATIO: &[(&str, Conversion)] = &[
    ("", scale(1.0)),
    ("eer", scale(1.0)),
    ("cop", scale(1.0)),
    ("kw/kw", scale(1.0)),
    ("w/w", scale(1.0)),
    ("btu/wh", scale(0.293_071_07)),
];

const DIMENSIONLESS: &[(&str, Conversion)] = &[("", scale(1.0))];

const FAHRENHEIT: Conversion = Conversion {
    factor: 5.0 / 9.0,
    offset: -160.0 / 9.0,
};

const TEMPERATURE: &[(&str, Conversion)] = &[
    ("c", scale(1.0)),
    ("°c", scale(1.0)),
    ("degc", scale(1.0)),
    ("℃", scale(1.0)),
    ("celsius", scale(1.0)),
    ("f", FAHRENHEIT),
    ("°f", FAHRENHEIT),
    ("degf", FAHRENHEIT),
    ("℉", FAHRENHEIT),
    ("fahrenheit", FAHRENHEIT),
    ("k", Conversion { factor: 1.0, offset: -273.15 }),
];

const CURRENT: &[(&str, Conversion)] = &[
    ("a", scale(1.0)),
    ("amp", scale(1.0)),
    ("amps", scale(1.0)),
    ("ampere", scale(1.0)),
    ("amperes", scale(1.0)),
    ("ka", scale(1000.0)),
    ("ma", scale(0.001)),
];

const PERCENT: &[(&str, Conversion)] = &[
    ("%", scale(1.0)),
    ("pct", scale(1.0)),
    ("percent", scale(1.0)),
];

fn aliases(kind: UnitKind) -> &'static [(&'static str, Conversion)] {
    match kind {
        UnitKind::Power => POWER,
        UnitKind::Flow => FLOW,
        UnitKind::Pressure => PRESSURE,
        UnitKind::Sound => SOUND,
        UnitKind::Dimension => DIMENSION,
        UnitKind::Weight => WEIGHT,
        UnitKind::Ratio => RATIO,
        UnitKind::Dimensionless => DIMENSIONLESS,
        UnitKind::Temperature => TEMPERATURE,
        UnitKind::Current => CURRENT,
        UnitKind::Percent => PERCENT,
        UnitKind::Text => &[],
    }
}

/// 数字内部允许出现的分隔符
fn is_separator(c: char) -> bool {
    matches!(c, '.' | ',' | '\'' | '\u{A0}' | '\u{202F}')
}

/// 小写、去空白、统一几个常见的变体字符
fn unit_key(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            'º' | '˚' => '°',
            '³' => '3',
            _ => c,
        })
        .collect()
}

fn lookup(kind: UnitKind, unit_text: &str) -> Option<Conversion> {
    let table = aliases(kind);
    let find = |key: &str| table.iter().find(|(alias, _)| *alias == key).map(|(_, c)| *c);

    let full = unit_key(unit_text);
    if let Some(conversion) = find(&full) {
        return Some(conversion);
    }
    let first = unit_text.split_whitespace().next().map(unit_key)?;
    find(&first)
}

/// 拆出开头的数字部分，返回 (数字文本, 剩余的单位文本)
fn split_number(raw: &str) -> Result<(&str, &str)> {
    let s = raw.trim();
    let mut end = 0;
    let mut seen_digit = false;
    for (i, c) in s.char_indices() {
        let accepted = match c {
            '+' | '-' => i == 0,
            '0'..='9' => {
                seen_digit = true;
                true
            }
            c if is_separator(c) => seen_digit,
            _ => false,
        };
        if !accepted {
            break;
        }
        end = i + c.len_utf8();
    }
    if !seen_digit {
        return Err(Error::InvalidNumber(raw.to_string()));
    }

    // "12." 之类的尾部分隔符不属于数字
    let number = s[..end].trim_end_matches(is_separator);
    let unit = s[number.len()..].trim_start_matches(is_separator).trim();
    Ok((number, unit))
}

/// 按本地化习惯解析数字：
/// - 同时出现 `,` 和 `.` 时，靠后的一个是小数点
/// - 只有一个 `,` 且其后恰好三位数字时视为千分位，否则为小数逗号
/// - 多个 `.` 视为千分位
fn parse_localized(number: &str) -> Option<f64> {
    let negative = number.starts_with('-');
    let body: String = number
        .trim_start_matches(['+', '-'])
        .chars()
        .filter(|c| !matches!(c, '\'' | '\u{A0}' | '\u{202F}'))
        .collect();

    let last_dot = body.rfind('.');
    let last_comma = body.rfind(',');
    let normalized = match (last_dot, last_comma) {
        (None, None) => body,
        (Some(_), None) if body.matches('.').count() > 1 => body.replace('.', ""),
        (Some(_), None) => body,
        (None, Some(pos)) => {
            let grouped = body.len() - pos - 1 == 3;
            if body.matches(',').count() > 1 || grouped {
                body.replace(',', "")
            } else {
                body.replace(',', ".")
            }
        }
        (Some(dot), Some(comma)) if dot > comma => body.replace(',', ""),
        (Some(_), Some(_)) => body.replace('.', "").replace(',', "."),
    };

    let value: f64 = normalized.parse().ok()?;
    Some(if negative { -value } else { value })
}

/// 把原始文本归一化为字段类别的标准单位取值
pub fn normalize(raw: &str, kind: UnitKind) -> Result<Value> {
    let Some(unit) = kind.canonical_unit() else {
        return Ok(Value::text(raw.trim()));
    };

    let (number, unit_text) = split_number(raw)?;
    let value = parse_localized(number).ok_or_else(|| Error::InvalidNumber(raw.to_string()))?;
    let conversion = lookup(kind, unit_text).ok_or_else(|| Error::UnrecognizedUnit {
        unit: unit_text.to_string(),
        kind,
    })?;

    Ok(Value::numeric(value * conversion.factor + conversion.offset, unit))
}
