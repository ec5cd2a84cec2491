use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::array::{ArrayRef, BooleanArray, Float64Array, Int64Array, ListBuilder, StringBuilder};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use tempfile::TempDir;

use salary_story::stats::compute_summary_statistics;
use salary_story::{
    load_file, CategoricalField, DatasetError, Education, Industry, Location, NumericField,
};

fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    let mut file = File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    path
}

const CSV: &str = "\
Work_Experience,GPA,Certifications,Skills,Internships,Job_Changes,Networking_Score,Education_High School,Education_Master,Education_PhD,Industry_Finance,Industry_Healthcare,Industry_Retail,Industry_Tech,Location_Chicago,Location_Los Angeles,Location_New York,Location_San Francisco,Salary_at_30
4,3.40,2,\"['Python', 'SQL']\",1,0,7,False,True,False,True,False,False,False,False,False,True,False,92000.0
7,3.10,0,[],2,3,5,False,False,True,False,False,False,True,True,False,False,False,120500.0
1,2.80,1,['Excel'],0,1,3,False,False,False,False,False,False,False,False,False,False,False,51000.0
";

#[test]
fn csv_file_is_normalized_in_row_order() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "salaries.csv", CSV);

    let dataset = load_file(&path).unwrap();
    assert_eq!(dataset.len(), 3);
    assert_eq!(dataset.source.as_deref(), Some(path.as_path()));

    let first = &dataset.records[0];
    assert_eq!(first.work_experience, 4.0);
    assert_eq!(first.gpa, 3.4);
    assert_eq!(first.skills, vec!["Python".to_string(), "SQL".to_string()]);
    assert_eq!(first.education, Education::Master);
    assert_eq!(first.industry, Industry::Finance);
    assert_eq!(first.location, Location::NewYork);
    assert!(!first.imputed.any());

    let second = &dataset.records[1];
    assert_eq!(second.education, Education::PhD);
    assert_eq!(second.industry, Industry::Tech);
    assert_eq!(second.location, Location::Chicago);
    assert!(second.skills.is_empty());

    // No indicator set at all: every category falls back to its default.
    let third = &dataset.records[2];
    assert_eq!(third.education, Education::HighSchool);
    assert_eq!(third.industry, Industry::Tech);
    assert_eq!(third.location, Location::SanFrancisco);
    assert!(third.imputed.education && third.imputed.industry && third.imputed.location);
    assert_eq!(dataset.imputed_count(), 1);

    let salaries: Vec<f64> = dataset.records.iter().map(|r| r.salary_at_30).collect();
    assert_eq!(salaries, vec![92_000.0, 120_500.0, 51_000.0]);

    let stats = compute_summary_statistics(&dataset.records, NumericField::SalaryAt30);
    assert_eq!(stats.count, 3);
    assert_eq!(stats.median, 92_000.0);

    let educations = &dataset.category_values[&CategoricalField::Education];
    assert_eq!(
        educations.iter().copied().collect::<Vec<_>>(),
        vec!["High School", "Master", "PhD"]
    );
}

#[test]
fn json_records_keep_native_types() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "salaries.json",
        r#"[
            {"Work_Experience": 5, "GPA": 3.9, "Skills": ["Cloud", "Leadership"],
             "Education_PhD": true, "Industry_Healthcare": true, "Location_Los Angeles": "true",
             "Salary_at_30": 101000.5},
            {"Work_Experience": null, "GPA": "3.2", "Skills": "['SQL']",
             "Education_Master": false, "Salary_at_30": 64000}
        ]"#,
    );

    let dataset = load_file(&path).unwrap();
    assert_eq!(dataset.len(), 2);

    let first = &dataset.records[0];
    assert_eq!(first.work_experience, 5.0);
    assert_eq!(first.skills, vec!["Cloud".to_string(), "Leadership".to_string()]);
    assert_eq!(first.education, Education::PhD);
    assert_eq!(first.industry, Industry::Healthcare);
    assert_eq!(first.location, Location::LosAngeles);
    assert_eq!(first.salary_at_30, 101_000.5);

    let second = &dataset.records[1];
    assert_eq!(second.work_experience, 0.0);
    assert_eq!(second.gpa, 3.2);
    assert_eq!(second.skills, vec!["SQL".to_string()]);
    assert_eq!(second.education, Education::HighSchool);
    assert!(second.imputed.education);
}

#[test]
fn header_only_csv_has_no_records() {
    let dir = TempDir::new().unwrap();
    let header = CSV.lines().next().unwrap();
    let path = write_file(&dir, "empty.csv", &format!("{header}\n"));

    let err = load_file(&path).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<DatasetError>(),
        Some(DatasetError::NoRecords)
    ));
}

#[test]
fn malformed_json_row_fails_whole_file() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "bad.json", r#"[{"GPA": 3.0}, 42]"#);

    let err = load_file(&path).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<DatasetError>(),
        Some(DatasetError::MalformedRow { row: 1, .. })
    ));
}

#[test]
fn unknown_extension_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "salaries.xlsx", "not a spreadsheet");

    let err = load_file(&path).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<DatasetError>(),
        Some(DatasetError::UnsupportedExtension(ext)) if ext == "xlsx"
    ));
}

fn write_parquet(path: &Path) {
    let mut skills = ListBuilder::new(StringBuilder::new());
    skills.values().append_value("Python");
    skills.append(true);
    skills.values().append_value("Excel");
    skills.values().append_value("SQL");
    skills.append(true);

    let schema = Arc::new(Schema::new(vec![
        Field::new("Work_Experience", DataType::Int64, false),
        Field::new("GPA", DataType::Float64, false),
        Field::new(
            "Skills",
            DataType::List(Arc::new(Field::new("item", DataType::Utf8, true))),
            false,
        ),
        Field::new("Industry_Retail", DataType::Boolean, false),
        Field::new("Salary_at_30", DataType::Float64, true),
    ]));
    let columns: Vec<ArrayRef> = vec![
        Arc::new(Int64Array::from(vec![3, 9])),
        Arc::new(Float64Array::from(vec![3.5, 2.9])),
        Arc::new(skills.finish()),
        Arc::new(BooleanArray::from(vec![true, false])),
        Arc::new(Float64Array::from(vec![Some(70_000.0), None])),
    ];
    let batch = RecordBatch::try_new(schema.clone(), columns).unwrap();

    let file = File::create(path).unwrap();
    let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();
}

#[test]
fn parquet_columns_are_read_as_raw_cells() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("salaries.parquet");
    write_parquet(&path);

    let dataset = load_file(&path).unwrap();
    assert_eq!(dataset.len(), 2);

    let first = &dataset.records[0];
    assert_eq!(first.work_experience, 3.0);
    assert_eq!(first.gpa, 3.5);
    assert_eq!(first.skills, vec!["Python".to_string()]);
    assert_eq!(first.industry, Industry::Retail);
    assert_eq!(first.salary_at_30, 70_000.0);

    let second = &dataset.records[1];
    assert_eq!(second.skills.len(), 2);
    assert_eq!(second.industry, Industry::Tech);
    assert!(second.imputed.industry);
    assert_eq!(second.salary_at_30, 0.0);
}
