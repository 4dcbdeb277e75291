pub mod comparator;
pub mod extractor;
pub mod matcher;
pub mod opex;
pub mod pipeline;
pub mod report;
pub mod units;

pub use extractor::FieldExtractor;
pub use pipeline::ComparisonService;
