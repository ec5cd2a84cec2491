//! Salary-at-30 analytics: record normalization, descriptive statistics,
//! correlation, regression and box-plot summaries for the dashboard.

pub mod data;
pub mod errors;
pub mod layout;
pub mod stats;

pub use data::loader::load_file;
pub use data::model::{
    CategoricalField, Education, Industry, Location, NormalizedRecord, NumericField, RawRecord,
    RawValue, SalaryDataset,
};
pub use errors::DatasetError;
