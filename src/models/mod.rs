pub mod comparison;
pub mod field;
pub mod opex;
pub mod report;
pub mod request;
pub mod spec;
pub mod unit;

pub use comparison::{Comparison, ComparisonRow, Presence};
pub use field::{FieldDefinition, FieldRegistry, FieldSummary, LabelPattern};
pub use opex::{
    OpexAssumptions, OpexInputs, OpexOutcome, OpexResult, Payback, PaybackResult, PowerSource,
};
pub use report::{ReportDocument, ReportHeader};
pub use request::{CompareRequest, DocumentInput, Extraction};
pub use spec::{Diagnostic, DiagnosticKind, RawMatch, Side, Specification, Value};
pub use unit::{Unit, UnitKind};
