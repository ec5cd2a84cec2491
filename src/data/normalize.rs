use std::collections::BTreeMap;

use super::model::{
    columns, CategoricalField, Education, ImputedCategories, Industry, Location,
    NormalizedRecord, RawRecord, RawValue,
};

// ---------------------------------------------------------------------------
// Field coercion
// ---------------------------------------------------------------------------

/// Indicator coercion: `true` or any casing of the string `"true"`.
/// Every other value, including a missing one, is false.
pub fn coerce_bool(value: Option<&RawValue>) -> bool {
    match value {
        Some(RawValue::Bool(b)) => *b,
        Some(RawValue::String(s)) => s.eq_ignore_ascii_case("true"),
        _ => false,
    }
}

/// Numeric coercion with a lossy 0.0 fallback.
///
/// A missing, empty, unparsable or non-finite value becomes 0.0, which is
/// indistinguishable from a genuine zero. Booleans count as 1/0.
pub fn coerce_f64(value: Option<&RawValue>) -> f64 {
    let parsed = match value {
        Some(RawValue::Float(v)) => *v,
        Some(RawValue::Integer(i)) => *i as f64,
        Some(RawValue::Bool(b)) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Some(RawValue::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                0.0
            } else {
                trimmed.parse::<f64>().unwrap_or(0.0)
            }
        }
        Some(RawValue::List(_)) | Some(RawValue::Null) | None => 0.0,
    };
    // `str::parse` accepts "inf", "-infinity" and overflowing literals.
    if parsed.is_finite() {
        parsed
    } else {
        0.0
    }
}

/// Parse a skills cell such as `['Python', 'SQL']` into a list.
///
/// Single quotes are accepted as string delimiters. Any parse failure yields
/// an empty list; list-shaped input passes through unchanged.
pub fn parse_skills(value: Option<&RawValue>) -> Vec<String> {
    match value {
        Some(RawValue::List(items)) => items.clone(),
        Some(RawValue::String(s)) if !s.trim().is_empty() => {
            serde_json::from_str::<Vec<String>>(&s.replace('\'', "\"")).unwrap_or_default()
        }
        _ => Vec::new(),
    }
}

// ---------------------------------------------------------------------------
// Categorical resolution
// ---------------------------------------------------------------------------

/// First indicator found true wins; `None` when no indicator is set.
fn first_set<T: Copy>(row: &RawRecord, priority: &[(&str, T)]) -> Option<T> {
    priority
        .iter()
        .find(|(column, _)| coerce_bool(row.get(*column)))
        .map(|(_, value)| *value)
}

/// Education priority: PhD, Master, High School. Defaults to High School.
pub fn resolve_education(row: &RawRecord) -> (Education, bool) {
    let priority = [
        (columns::EDUCATION_PHD, Education::PhD),
        (columns::EDUCATION_MASTER, Education::Master),
        (columns::EDUCATION_HIGH_SCHOOL, Education::HighSchool),
    ];
    match first_set(row, &priority) {
        Some(education) => (education, false),
        None => (Education::HighSchool, true),
    }
}

/// Industry priority: Finance, Healthcare, Retail, Tech. Defaults to Tech.
pub fn resolve_industry(row: &RawRecord) -> (Industry, bool) {
    let priority = [
        (columns::INDUSTRY_FINANCE, Industry::Finance),
        (columns::INDUSTRY_HEALTHCARE, Industry::Healthcare),
        (columns::INDUSTRY_RETAIL, Industry::Retail),
        (columns::INDUSTRY_TECH, Industry::Tech),
    ];
    match first_set(row, &priority) {
        Some(industry) => (industry, false),
        None => (Industry::Tech, true),
    }
}

/// Location priority: Chicago, Los Angeles, New York, San Francisco.
/// Defaults to San Francisco.
pub fn resolve_location(row: &RawRecord) -> (Location, bool) {
    let priority = [
        (columns::LOCATION_CHICAGO, Location::Chicago),
        (columns::LOCATION_LOS_ANGELES, Location::LosAngeles),
        (columns::LOCATION_NEW_YORK, Location::NewYork),
        (columns::LOCATION_SAN_FRANCISCO, Location::SanFrancisco),
    ];
    match first_set(row, &priority) {
        Some(location) => (location, false),
        None => (Location::SanFrancisco, true),
    }
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Normalize one raw row. Never fails.
pub fn normalize_record(row: &RawRecord) -> NormalizedRecord {
    let (education, education_imputed) = resolve_education(row);
    let (industry, industry_imputed) = resolve_industry(row);
    let (location, location_imputed) = resolve_location(row);

    NormalizedRecord {
        work_experience: coerce_f64(row.get(columns::WORK_EXPERIENCE)),
        gpa: coerce_f64(row.get(columns::GPA)),
        certifications: coerce_f64(row.get(columns::CERTIFICATIONS)),
        internships: coerce_f64(row.get(columns::INTERNSHIPS)),
        job_changes: coerce_f64(row.get(columns::JOB_CHANGES)),
        networking_score: coerce_f64(row.get(columns::NETWORKING_SCORE)),
        salary_at_30: coerce_f64(row.get(columns::SALARY_AT_30)),
        education,
        industry,
        location,
        skills: parse_skills(row.get(columns::SKILLS)),
        imputed: ImputedCategories {
            education: education_imputed,
            industry: industry_imputed,
            location: location_imputed,
        },
    }
}

/// Normalize every raw row, preserving length and order.
pub fn normalize_records(rows: &[RawRecord]) -> Vec<NormalizedRecord> {
    let records: Vec<NormalizedRecord> = rows.iter().map(normalize_record).collect();

    let imputed = |pick: fn(&ImputedCategories) -> bool| {
        records.iter().filter(|r| pick(&r.imputed)).count()
    };
    let (education, industry, location) = (
        imputed(|i| i.education),
        imputed(|i| i.industry),
        imputed(|i| i.location),
    );
    if education + industry + location > 0 {
        log::warn!(
            "No indicator set, default category assigned: education={education}, \
             industry={industry}, location={location} (of {} rows)",
            records.len()
        );
    }

    if log::log_enabled!(log::Level::Debug) {
        for field in CategoricalField::ALL {
            let mut counts: BTreeMap<&'static str, usize> = BTreeMap::new();
            for record in &records {
                *counts.entry(field.value(record)).or_default() += 1;
            }
            log::debug!("{field} counts: {counts:?}");
        }
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, RawValue)]) -> RawRecord {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn s(v: &str) -> RawValue {
        RawValue::String(v.to_string())
    }

    #[test]
    fn bool_accepts_true_in_any_case() {
        assert!(coerce_bool(Some(&s("True"))));
        assert!(coerce_bool(Some(&s("TRUE"))));
        assert!(coerce_bool(Some(&RawValue::Bool(true))));
        assert!(!coerce_bool(Some(&s("False"))));
        assert!(!coerce_bool(Some(&s("1"))));
        assert!(!coerce_bool(Some(&RawValue::Integer(1))));
        assert!(!coerce_bool(Some(&RawValue::Null)));
        assert!(!coerce_bool(None));
    }

    #[test]
    fn numeric_falls_back_to_zero() {
        assert_eq!(coerce_f64(Some(&s(" 3.75 "))), 3.75);
        assert_eq!(coerce_f64(Some(&RawValue::Integer(4))), 4.0);
        assert_eq!(coerce_f64(Some(&s("n/a"))), 0.0);
        assert_eq!(coerce_f64(Some(&s(""))), 0.0);
        assert_eq!(coerce_f64(Some(&RawValue::Float(f64::NAN))), 0.0);
        assert_eq!(coerce_f64(None), 0.0);
    }

    #[test]
    fn numeric_rejects_infinite_values() {
        assert_eq!(coerce_f64(Some(&s("inf"))), 0.0);
        assert_eq!(coerce_f64(Some(&s("INF"))), 0.0);
        assert_eq!(coerce_f64(Some(&s("-infinity"))), 0.0);
        assert_eq!(coerce_f64(Some(&s("1e999"))), 0.0);
        assert_eq!(coerce_f64(Some(&RawValue::Float(f64::NEG_INFINITY))), 0.0);
        assert_eq!(coerce_f64(Some(&s("1e300"))), 1e300);
    }

    #[test]
    fn infinite_salary_cell_keeps_statistics_finite() {
        use crate::data::model::NumericField;
        use crate::stats::{compute_summary_statistics, pearson_correlation};

        let rows: Vec<RawRecord> = ["inf", "50000", "60000"]
            .iter()
            .map(|v| row(&[(columns::SALARY_AT_30, s(v))]))
            .collect();
        let records = normalize_records(&rows);
        let stats = compute_summary_statistics(&records, NumericField::SalaryAt30);
        assert_eq!(stats.mean, 110_000.0 / 3.0);
        assert_eq!(stats.max, 60_000.0);

        let salaries = NumericField::SalaryAt30.values(&records);
        assert!((pearson_correlation(&salaries, &salaries) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn skills_accept_both_quote_styles() {
        assert_eq!(
            parse_skills(Some(&s("['Python', 'SQL']"))),
            vec!["Python".to_string(), "SQL".to_string()]
        );
        assert_eq!(
            parse_skills(Some(&s(r#"["Excel"]"#))),
            vec!["Excel".to_string()]
        );
        assert!(parse_skills(Some(&s("Python, SQL"))).is_empty());
        assert!(parse_skills(Some(&s(""))).is_empty());
        assert!(parse_skills(None).is_empty());
    }

    #[test]
    fn skills_list_passes_through() {
        let list = RawValue::List(vec!["Go".into(), "Rust".into()]);
        assert_eq!(parse_skills(Some(&list)), vec!["Go", "Rust"]);
    }

    #[test]
    fn education_priority_prefers_phd() {
        let r = row(&[
            (columns::EDUCATION_PHD, s("True")),
            (columns::EDUCATION_MASTER, s("True")),
        ]);
        assert_eq!(resolve_education(&r), (Education::PhD, false));
    }

    #[test]
    fn industry_priority_prefers_finance() {
        let r = row(&[
            (columns::INDUSTRY_TECH, RawValue::Bool(true)),
            (columns::INDUSTRY_FINANCE, s("true")),
        ]);
        assert_eq!(resolve_industry(&r).0, Industry::Finance);
    }

    #[test]
    fn missing_indicators_use_defaults_and_flag_imputation() {
        let r = row(&[(columns::SALARY_AT_30, s("85000"))]);
        for _ in 0..3 {
            let n = normalize_record(&r);
            assert_eq!(n.education, Education::HighSchool);
            assert_eq!(n.industry, Industry::Tech);
            assert_eq!(n.location, Location::SanFrancisco);
            assert!(n.imputed.education && n.imputed.industry && n.imputed.location);
            assert_eq!(n.salary_at_30, 85_000.0);
        }
    }

    #[test]
    fn explicit_high_school_is_not_imputed() {
        let r = row(&[(columns::EDUCATION_HIGH_SCHOOL, s("True"))]);
        let n = normalize_record(&r);
        assert_eq!(n.education, Education::HighSchool);
        assert!(!n.imputed.education);
    }

    #[test]
    fn normalize_preserves_order_and_length() {
        let rows: Vec<RawRecord> = (0..5)
            .map(|i| row(&[(columns::GPA, RawValue::Integer(i))]))
            .collect();
        let out = normalize_records(&rows);
        assert_eq!(out.len(), 5);
        let gpas: Vec<f64> = out.iter().map(|r| r.gpa).collect();
        assert_eq!(gpas, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
    }
}
