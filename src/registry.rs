//! 冷水机组规格书默认字段注册表
//!
//! 每个字段先放针对 Trane Select Assist "Product Report" 版式的规则，
//! 再放通用兜底规则 (行首标签 + 取值 / 标签与取值分行)。
//! 新增厂商版式时只需在对应字段上追加规则。

use crate::error::Result;
use crate::models::{FieldDefinition, FieldRegistry, UnitKind};

pub const REGISTRY_VERSION: &str = "chiller-v1";

/// 计算中直接引用的字段键
pub mod keys {
    pub const NET_CAPACITY: &str = "net_capacity";
    pub const GROSS_CAPACITY: &str = "gross_capacity";
    pub const POWER_INPUT: &str = "power_input";
    pub const NET_EER: &str = "net_eer";
    pub const GROSS_EER: &str = "gross_eer";
}

/// 构建默认注册表 (字段顺序即对比表行序)
pub fn chiller_registry() -> Result<FieldRegistry> {
    use UnitKind::*;

    let fields = vec![
        // 机组概况
        FieldDefinition::new("model", "Model", Text)
            .same_line(r"(?i)^\s*Model\s+(?P<value>[A-Z0-9][A-Z0-9\- ]*?)\s*$")?
            .max_chars(60),
        FieldDefinition::new("range", "Range / Series", Text)
            .same_line(r"(?i)^\s*Range\s+(?P<value>.+?)\s*$")?
            .labelled("Range|Series")?,
        FieldDefinition::new("chiller_model", "Chiller model", Text)
            .same_line(r"(?i)Chiller model\s+(?P<value>.+?)\s*$")?,
        FieldDefinition::new("unit_application", "Application", Text)
            .same_line(r"(?i)Unit Application\s+(?P<value>.+?)\s*$")?
            .labelled("Application")?,
        FieldDefinition::new("compressor_type", "Compressor type", Text)
            .same_line(r"(?i)Compressor type\s+(?P<value>.+?)\s*$")?,
        FieldDefinition::new("refrigerant", "Refrigerant", Text)
            .same_line(r"(?i)Refrigerant Type.*?\s(?P<value>R\d{3,4}[A-Za-z0-9]*)")?
            .labelled("Refrigerant")?,
        FieldDefinition::new("refrigerant_gwp", "Refrigerant GWP", Dimensionless)
            .same_line(r"(?i)Refrigerant GWP\s+(?P<value>\d+(?:\.\d+)?)")?
            .labelled("GWP")?,
        FieldDefinition::new("electrical_supply", "Electrical supply", Text)
            .same_line(r"(?i)Electrical supply\s+(?P<value>.+?)\s*$")?
            .labelled("Power supply|Electrical supply")?,
        // 工况
        FieldDefinition::new("design_ambient", "Design ambient (°C)", Temperature)
            .same_line(r"(?i)Outdoor air dry bulb temperature\s+(?P<value>-?\d+(?:\.\d+)?\s*°?C)")?
            .labelled("Design ambient(?: temperature)?|Ambient temperature")?,
        FieldDefinition::new("lwt", "LWT (°C)", Temperature)
            .same_line(r"(?i)Fluid leaving temperature\s+(?P<value>-?\d+(?:\.\d+)?\s*°?C)")?
            .labelled("Leaving (?:fluid|water) temperature|LWT")?,
        FieldDefinition::new("ewt", "EWT (°C)", Temperature)
            .same_line(r"(?i)Fluid entering temperature\s+(?P<value>-?\d+(?:\.\d+)?\s*°?C)")?
            .labelled("Entering (?:fluid|water) temperature|EWT")?,
        FieldDefinition::new("fluid", "Fluid", Text)
            .same_line(r"(?i)Fluid Type and concentration\s+(?P<value>[a-z][a-z ]*)")?,
        FieldDefinition::new("antifreeze", "Antifreeze (%)", Percent)
            .same_line(r"(?i)Fluid Type and concentration.*?/\s*(?P<value>\d+(?:\.\d+)?\s*%)")?
            .labelled("Antifreeze|Glycol concentration")?,
        FieldDefinition::new("elevation", "Elevation (mm)", Dimension)
            .same_line(r"(?i)Elevation\s+(?P<value>\d[\d.,]*\s*(?:m|ft))\b")?
            .labelled("Elevation|Altitude")?,
        // 性能
        FieldDefinition::new(keys::NET_CAPACITY, "Net capacity (kW)", Power)
            .same_line(r"(?i)Net capacity\s+(?P<value>\d[\d.,]*\s*kW)")?
            .labelled("Net (?:cooling )?capacity|Cooling capacity|Capacity")?,
        FieldDefinition::new(keys::GROSS_CAPACITY, "Gross capacity (kW)", Power)
            .same_line(r"(?i)Gross capacity\s+(?P<value>\d[\d.,]*\s*kW)")?
            .labelled("Gross (?:cooling )?capacity")?,
        FieldDefinition::new(keys::POWER_INPUT, "Power input (kW)", Power)
            .same_line(r"(?i)(?:Gross unit power|Total absorbed power)\s+(?P<value>\d[\d.,]*\s*kW)")?
            .labelled("Power input|Input power|Absorbed power|Rated input power")?,
        FieldDefinition::new(keys::NET_EER, "Net EER (kW/kW)", Ratio)
            .same_line(r"(?i)Net EER\s+(?P<value>\d+(?:[.,]\d+)?\s*EER)")?
            .labelled("Net EER")?,
        FieldDefinition::new(keys::GROSS_EER, "Gross EER (kW/kW)", Ratio)
            .same_line(r"(?i)Gross EER\s+(?P<value>\d+(?:[.,]\d+)?\s*EER)")?
            .labelled("Gross EER|EER")?,
        FieldDefinition::new("design_flow", "Design flow (gpm)", Flow)
            .same_line(r"(?i)Design flow rate\s+(?P<value>\d[\d.,]*\s*(?:L/s|gpm|m3/h|m³/h))")?
            .labelled("Design flow(?: rate)?|(?:Evaporator|Water) flow(?: rate)?")?,
        FieldDefinition::new("evap_pressure_drop", "Evap ΔP (kPa)", Pressure)
            .same_line(r"(?i)Evaporator Pressure drop \(Design\)\s+(?P<value>\d[\d.,]*\s*kPa)")?
            .labelled("Evaporator pressure drop|Water pressure drop")?,
        // 噪声
        FieldDefinition::new("sound_power", "Sound power (dBA)", Sound)
            .same_line(r"(?i)Outdoor sound power level.*?\s(?P<value>\d+(?:\.\d+)?\s*dBA)")?
            .labelled("Sound power(?: level)?")?,
        FieldDefinition::new("sound_pressure", "Sound pressure (dBA)", Sound)
            .same_line(r"(?i)Outdoor sound pressure level.*?\s(?P<value>\d+(?:\.\d+)?\s*dBA)")?
            .labelled("Sound pressure(?: level)?")?,
        // 部分负荷
        FieldDefinition::new("iplv_si", "IPLV.SI", Ratio)
            .same_line(r"(?i)IPLV\.SI\s+(?P<value>\d+(?:\.\d+)?)")?,
        FieldDefinition::new("nplv_si", "NPLV.SI", Ratio)
            .same_line(r"(?i)NPLV\.SI\s+(?P<value>\d+(?:\.\d+)?)")?,
        // 电气
        FieldDefinition::new("startup_current", "Start-up current (A)", Current)
            .same_line(r"(?i)Start-up current\s+(?P<value>\d[\d.,]*\s*A)\b")?
            .labelled("Start-?up current|Inrush current")?,
        FieldDefinition::new("running_current", "Running current (A)", Current)
            .same_line(r"(?i)^\s*(?:Running\s+)?Current\s+(?P<value>\d[\d.,]*\s*A)\b")?
            .labelled("Running current|RLA")?,
        FieldDefinition::new("max_amps", "Max amps (A)", Current)
            .same_line(r"(?i)Max amps\s+(\d[\d.,]*\s*A)\b|Maximum running current\s+(\d[\d.,]*\s*A)\b")?
            .labelled("Max(?:imum)? amps|Maximum current")?,
        FieldDefinition::new("max_power", "Max power (kW)", Power)
            .same_line(r"(?i)Maximum power at maximum current\s+(?P<value>\d[\d.,]*\s*kW)")?,
        FieldDefinition::new("cos_phi", "cos φ", Dimensionless)
            .same_line(r"(?i)Displacement power factor \(cos-phi\)\s+(?P<value>\d+(?:\.\d+)?)")?
            .labelled("Power factor|cos ?(?:phi|φ)")?,
        // 尺寸与重量
        FieldDefinition::new("length", "Length (mm)", Dimension)
            .same_line(r"(?i)^\s*Length\s+(?P<value>\d[\d.,]*\s*mm)")?
            .labelled("Length|Overall length")?,
        FieldDefinition::new("width", "Width (mm)", Dimension)
            .same_line(r"(?i)^\s*Width\s+(?P<value>\d[\d.,]*\s*mm)")?
            .labelled("Width|Overall width")?,
        FieldDefinition::new("height", "Height (mm)", Dimension)
            .same_line(r"(?i)^\s*Height\s+(?P<value>\d[\d.,]*\s*mm)")?
            .labelled("Height|Overall height")?,
        FieldDefinition::new("shipping_weight", "Shipping weight (kg)", Weight)
            .same_line(r"(?i)(?:Unit shipping weight|Shipping weight including packaging)\s+(?P<value>\d[\d.,]*\s*kg)")?
            .labelled("Shipping weight")?,
        FieldDefinition::new("operating_weight", "Operating weight (kg)", Weight)
            .same_line(r"(?i)Operating weight\s+(?P<value>\d[\d.,]*\s*kg)")?
            .labelled("Operating weight")?,
    ];

    FieldRegistry::new(REGISTRY_VERSION, fields)
}
