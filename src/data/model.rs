use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

// ---------------------------------------------------------------------------
// RawValue – a single cell of the source table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell exactly as read from the source file.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    /// Already list-shaped input (JSON arrays, Parquet list columns).
    List(Vec<String>),
    Null,
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::String(s) => write!(f, "{s}"),
            RawValue::Integer(i) => write!(f, "{i}"),
            RawValue::Float(v) => write!(f, "{v}"),
            RawValue::Bool(b) => write!(f, "{b}"),
            RawValue::List(items) => write!(f, "{items:?}"),
            RawValue::Null => write!(f, "<null>"),
        }
    }
}

/// One untyped source row: column_name → value. Missing columns are absent.
pub type RawRecord = BTreeMap<String, RawValue>;

/// Source column names, as they appear in the header row.
pub mod columns {
    pub const WORK_EXPERIENCE: &str = "Work_Experience";
    pub const GPA: &str = "GPA";
    pub const CERTIFICATIONS: &str = "Certifications";
    pub const SKILLS: &str = "Skills";
    pub const INTERNSHIPS: &str = "Internships";
    pub const JOB_CHANGES: &str = "Job_Changes";
    pub const NETWORKING_SCORE: &str = "Networking_Score";
    pub const SALARY_AT_30: &str = "Salary_at_30";

    pub const EDUCATION_HIGH_SCHOOL: &str = "Education_High School";
    pub const EDUCATION_MASTER: &str = "Education_Master";
    pub const EDUCATION_PHD: &str = "Education_PhD";

    pub const INDUSTRY_FINANCE: &str = "Industry_Finance";
    pub const INDUSTRY_HEALTHCARE: &str = "Industry_Healthcare";
    pub const INDUSTRY_RETAIL: &str = "Industry_Retail";
    pub const INDUSTRY_TECH: &str = "Industry_Tech";

    pub const LOCATION_CHICAGO: &str = "Location_Chicago";
    pub const LOCATION_LOS_ANGELES: &str = "Location_Los Angeles";
    pub const LOCATION_NEW_YORK: &str = "Location_New York";
    pub const LOCATION_SAN_FRANCISCO: &str = "Location_San Francisco";

    /// Every column the normalizer reads.
    pub const EXPECTED: [&str; 19] = [
        WORK_EXPERIENCE,
        GPA,
        CERTIFICATIONS,
        SKILLS,
        INTERNSHIPS,
        JOB_CHANGES,
        NETWORKING_SCORE,
        EDUCATION_HIGH_SCHOOL,
        EDUCATION_MASTER,
        EDUCATION_PHD,
        INDUSTRY_FINANCE,
        INDUSTRY_HEALTHCARE,
        INDUSTRY_RETAIL,
        INDUSTRY_TECH,
        LOCATION_CHICAGO,
        LOCATION_LOS_ANGELES,
        LOCATION_NEW_YORK,
        LOCATION_SAN_FRANCISCO,
        SALARY_AT_30,
    ];
}

// ---------------------------------------------------------------------------
// Categorical values
// ---------------------------------------------------------------------------

/// Highest education level, from the `Education_*` indicator family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Education {
    #[serde(rename = "High School")]
    HighSchool,
    Master,
    PhD,
}

impl Education {
    pub const ALL: [Education; 3] = [Education::HighSchool, Education::Master, Education::PhD];

    pub fn label(self) -> &'static str {
        match self {
            Education::HighSchool => "High School",
            Education::Master => "Master",
            Education::PhD => "PhD",
        }
    }
}

/// Employer industry, from the `Industry_*` indicator family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Industry {
    Finance,
    Healthcare,
    Retail,
    Tech,
}

impl Industry {
    pub const ALL: [Industry; 4] = [
        Industry::Finance,
        Industry::Healthcare,
        Industry::Retail,
        Industry::Tech,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Industry::Finance => "Finance",
            Industry::Healthcare => "Healthcare",
            Industry::Retail => "Retail",
            Industry::Tech => "Tech",
        }
    }
}

/// Work location, from the `Location_*` indicator family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Location {
    Chicago,
    #[serde(rename = "Los Angeles")]
    LosAngeles,
    #[serde(rename = "New York")]
    NewYork,
    #[serde(rename = "San Francisco")]
    SanFrancisco,
}

impl Location {
    pub const ALL: [Location; 4] = [
        Location::Chicago,
        Location::LosAngeles,
        Location::NewYork,
        Location::SanFrancisco,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Location::Chicago => "Chicago",
            Location::LosAngeles => "Los Angeles",
            Location::NewYork => "New York",
            Location::SanFrancisco => "San Francisco",
        }
    }
}

impl fmt::Display for Education {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for Industry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// NormalizedRecord – one individual, strongly typed
// ---------------------------------------------------------------------------

/// Which categorical fields were filled with their fixed default because no
/// indicator column was set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImputedCategories {
    pub education: bool,
    pub industry: bool,
    pub location: bool,
}

impl ImputedCategories {
    pub fn any(&self) -> bool {
        self.education || self.industry || self.location
    }
}

/// A single normalized row of the salary table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedRecord {
    pub work_experience: f64,
    pub gpa: f64,
    pub certifications: f64,
    pub internships: f64,
    pub job_changes: f64,
    pub networking_score: f64,
    pub salary_at_30: f64,
    pub education: Education,
    pub industry: Industry,
    pub location: Location,
    pub skills: Vec<String>,
    pub imputed: ImputedCategories,
}

// ---------------------------------------------------------------------------
// Field registry
// ---------------------------------------------------------------------------

/// The numeric fields of a [`NormalizedRecord`], in correlation-matrix order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum NumericField {
    WorkExperience,
    Gpa,
    Certifications,
    Internships,
    JobChanges,
    NetworkingScore,
    SalaryAt30,
}

impl NumericField {
    pub const ALL: [NumericField; 7] = [
        NumericField::WorkExperience,
        NumericField::Gpa,
        NumericField::Certifications,
        NumericField::Internships,
        NumericField::JobChanges,
        NumericField::NetworkingScore,
        NumericField::SalaryAt30,
    ];

    /// Name of the source column this field is read from.
    pub fn column(self) -> &'static str {
        match self {
            NumericField::WorkExperience => columns::WORK_EXPERIENCE,
            NumericField::Gpa => columns::GPA,
            NumericField::Certifications => columns::CERTIFICATIONS,
            NumericField::Internships => columns::INTERNSHIPS,
            NumericField::JobChanges => columns::JOB_CHANGES,
            NumericField::NetworkingScore => columns::NETWORKING_SCORE,
            NumericField::SalaryAt30 => columns::SALARY_AT_30,
        }
    }

    /// Short display label used on axes and heatmap rows.
    pub fn label(self) -> &'static str {
        match self {
            NumericField::WorkExperience => "Experience",
            NumericField::Gpa => "GPA",
            NumericField::Certifications => "Certifications",
            NumericField::Internships => "Internships",
            NumericField::JobChanges => "Job Changes",
            NumericField::NetworkingScore => "Networking",
            NumericField::SalaryAt30 => "Salary",
        }
    }

    pub fn value(self, record: &NormalizedRecord) -> f64 {
        match self {
            NumericField::WorkExperience => record.work_experience,
            NumericField::Gpa => record.gpa,
            NumericField::Certifications => record.certifications,
            NumericField::Internships => record.internships,
            NumericField::JobChanges => record.job_changes,
            NumericField::NetworkingScore => record.networking_score,
            NumericField::SalaryAt30 => record.salary_at_30,
        }
    }

    /// Collect this field across `records`, preserving order.
    pub fn values(self, records: &[NormalizedRecord]) -> Vec<f64> {
        records.iter().map(|r| self.value(r)).collect()
    }
}

/// The categorical fields of a [`NormalizedRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum CategoricalField {
    Education,
    Industry,
    Location,
}

impl CategoricalField {
    pub const ALL: [CategoricalField; 3] = [
        CategoricalField::Education,
        CategoricalField::Industry,
        CategoricalField::Location,
    ];

    pub fn label(self) -> &'static str {
        match self {
            CategoricalField::Education => "Education",
            CategoricalField::Industry => "Industry",
            CategoricalField::Location => "Location",
        }
    }

    /// The record's category label for this field.
    pub fn value(self, record: &NormalizedRecord) -> &'static str {
        match self {
            CategoricalField::Education => record.education.label(),
            CategoricalField::Industry => record.industry.label(),
            CategoricalField::Location => record.location.label(),
        }
    }

    /// Every label this field can take, in declaration order.
    pub fn domain(self) -> Vec<&'static str> {
        match self {
            CategoricalField::Education => Education::ALL.iter().map(|e| e.label()).collect(),
            CategoricalField::Industry => Industry::ALL.iter().map(|i| i.label()).collect(),
            CategoricalField::Location => Location::ALL.iter().map(|l| l.label()).collect(),
        }
    }
}

impl fmt::Display for NumericField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for CategoricalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// SalaryDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full normalized dataset with pre-computed category indices.
#[derive(Debug, Clone)]
pub struct SalaryDataset {
    /// All records, in source row order.
    pub records: Vec<NormalizedRecord>,
    /// File the dataset was loaded from, if any.
    pub source: Option<PathBuf>,
    /// For each categorical field the sorted set of observed labels.
    pub category_values: BTreeMap<CategoricalField, BTreeSet<&'static str>>,
}

impl SalaryDataset {
    /// Normalize raw rows and build category indices.
    pub fn from_raw(raw: &[RawRecord]) -> Self {
        Self::from_records(super::normalize::normalize_records(raw))
    }

    /// Build category indices from already-normalized records.
    pub fn from_records(records: Vec<NormalizedRecord>) -> Self {
        let mut category_values: BTreeMap<CategoricalField, BTreeSet<&'static str>> =
            BTreeMap::new();
        for record in &records {
            for field in CategoricalField::ALL {
                category_values
                    .entry(field)
                    .or_default()
                    .insert(field.value(record));
            }
        }
        SalaryDataset {
            records,
            source: None,
            category_values,
        }
    }

    pub fn with_source(mut self, path: impl Into<PathBuf>) -> Self {
        self.source = Some(path.into());
        self
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Count of records that needed at least one imputed category.
    pub fn imputed_count(&self) -> usize {
        self.records.iter().filter(|r| r.imputed.any()).count()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn record(salary: f64) -> NormalizedRecord {
        NormalizedRecord {
            work_experience: 0.0,
            gpa: 0.0,
            certifications: 0.0,
            internships: 0.0,
            job_changes: 0.0,
            networking_score: 0.0,
            salary_at_30: salary,
            education: Education::HighSchool,
            industry: Industry::Tech,
            location: Location::SanFrancisco,
            skills: Vec::new(),
            imputed: ImputedCategories::default(),
        }
    }

    #[test]
    fn numeric_registry_reads_matching_field() {
        let mut r = record(90_000.0);
        r.gpa = 3.5;
        r.job_changes = 2.0;
        assert_eq!(NumericField::Gpa.value(&r), 3.5);
        assert_eq!(NumericField::JobChanges.value(&r), 2.0);
        assert_eq!(NumericField::SalaryAt30.value(&r), 90_000.0);
        assert_eq!(NumericField::SalaryAt30.column(), "Salary_at_30");
    }

    #[test]
    fn categorical_registry_uses_labels() {
        let mut r = record(1.0);
        r.location = Location::NewYork;
        assert_eq!(CategoricalField::Location.value(&r), "New York");
        assert_eq!(
            CategoricalField::Education.domain(),
            vec!["High School", "Master", "PhD"]
        );
    }

    #[test]
    fn dataset_indexes_observed_categories() {
        let mut a = record(1.0);
        a.industry = Industry::Finance;
        let b = record(2.0);
        let ds = SalaryDataset::from_records(vec![a, b]);
        let industries = &ds.category_values[&CategoricalField::Industry];
        assert_eq!(
            industries.iter().copied().collect::<Vec<_>>(),
            vec!["Finance", "Tech"]
        );
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.imputed_count(), 0);
    }
}
