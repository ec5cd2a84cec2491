use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, BooleanArray, Float64Array, Int64Array, ListBuilder, StringBuilder};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

const EDUCATION: [(&str, f64); 3] = [("High School", 0.0), ("Master", 9_000.0), ("PhD", 16_000.0)];
const INDUSTRY: [(&str, f64); 4] = [
    ("Finance", 12_000.0),
    ("Healthcare", 4_000.0),
    ("Retail", -8_000.0),
    ("Tech", 15_000.0),
];
const LOCATION: [(&str, f64); 4] = [
    ("Chicago", 0.0),
    ("Los Angeles", 6_000.0),
    ("New York", 10_000.0),
    ("San Francisco", 14_000.0),
];
const SKILLS: [&str; 8] = [
    "Python", "SQL", "Excel", "Java", "Communication", "Leadership", "Machine Learning", "Cloud",
];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_f64() * n as f64) as usize % n
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// One synthetic individual, already in source-table shape.
struct Row {
    work_experience: i64,
    gpa: f64,
    certifications: i64,
    skills: Vec<String>,
    internships: i64,
    job_changes: i64,
    networking_score: i64,
    education: usize,
    industry: usize,
    location: usize,
    salary_at_30: f64,
}

fn generate_row(rng: &mut SimpleRng) -> Row {
    let education = rng.below(EDUCATION.len());
    let industry = rng.below(INDUSTRY.len());
    let location = rng.below(LOCATION.len());

    let work_experience = rng.below(11) as i64;
    let gpa = (rng.gauss(3.1, 0.4).clamp(2.0, 4.0) * 100.0).round() / 100.0;
    let certifications = rng.below(6) as i64;
    let internships = rng.below(4) as i64;
    let job_changes = rng.below(5) as i64;
    let networking_score = 1 + rng.below(10) as i64;

    let n_skills = 1 + rng.below(4);
    let mut skills: Vec<String> = Vec::with_capacity(n_skills);
    while skills.len() < n_skills {
        let skill = SKILLS[rng.below(SKILLS.len())].to_string();
        if !skills.contains(&skill) {
            skills.push(skill);
        }
    }

    let salary_at_30 = 45_000.0
        + EDUCATION[education].1
        + INDUSTRY[industry].1
        + LOCATION[location].1
        + 2_800.0 * work_experience as f64
        + 6_000.0 * (gpa - 3.0)
        + 1_500.0 * certifications as f64
        + 900.0 * internships as f64
        - 700.0 * job_changes as f64
        + 650.0 * networking_score as f64
        + 650.0 * skills.len() as f64
        + rng.gauss(0.0, 6_000.0);

    Row {
        work_experience,
        gpa,
        certifications,
        skills,
        internships,
        job_changes,
        networking_score,
        education,
        industry,
        location,
        salary_at_30: salary_at_30.round(),
    }
}

fn indicator_columns() -> Vec<String> {
    let mut names = Vec::new();
    names.extend(EDUCATION.iter().map(|(l, _)| format!("Education_{l}")));
    names.extend(INDUSTRY.iter().map(|(l, _)| format!("Industry_{l}")));
    names.extend(LOCATION.iter().map(|(l, _)| format!("Location_{l}")));
    names
}

/// Indicator flags in `indicator_columns()` order.
fn indicators(row: &Row) -> Vec<bool> {
    let mut flags = Vec::new();
    flags.extend((0..EDUCATION.len()).map(|i| i == row.education));
    flags.extend((0..INDUSTRY.len()).map(|i| i == row.industry));
    flags.extend((0..LOCATION.len()).map(|i| i == row.location));
    flags
}

// ---------------------------------------------------------------------------
// Writers
// ---------------------------------------------------------------------------

fn write_csv(path: &Path, rows: &[Row]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;

    let mut header = vec![
        "Work_Experience".to_string(),
        "GPA".into(),
        "Certifications".into(),
        "Skills".into(),
        "Internships".into(),
        "Job_Changes".into(),
        "Networking_Score".into(),
    ];
    header.extend(indicator_columns());
    header.push("Salary_at_30".into());
    writer.write_record(&header).context("writing CSV header")?;

    for row in rows {
        let skills = row
            .skills
            .iter()
            .map(|s| format!("'{s}'"))
            .collect::<Vec<_>>()
            .join(", ");
        let mut record = vec![
            row.work_experience.to_string(),
            format!("{:.2}", row.gpa),
            row.certifications.to_string(),
            format!("[{skills}]"),
            row.internships.to_string(),
            row.job_changes.to_string(),
            row.networking_score.to_string(),
        ];
        record.extend(
            indicators(row)
                .into_iter()
                .map(|flag| (if flag { "True" } else { "False" }).to_string()),
        );
        record.push(format!("{:.1}", row.salary_at_30));
        writer.write_record(&record).context("writing CSV row")?;
    }

    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn write_parquet(path: &Path, rows: &[Row]) -> Result<()> {
    let ints = |f: fn(&Row) -> i64| -> ArrayRef {
        Arc::new(Int64Array::from(rows.iter().map(f).collect::<Vec<_>>()))
    };

    let mut skills_builder = ListBuilder::new(StringBuilder::new());
    for row in rows {
        for skill in &row.skills {
            skills_builder.values().append_value(skill);
        }
        skills_builder.append(true);
    }

    let mut fields = vec![
        Field::new("Work_Experience", DataType::Int64, false),
        Field::new("GPA", DataType::Float64, false),
        Field::new("Certifications", DataType::Int64, false),
        Field::new(
            "Skills",
            DataType::List(Arc::new(Field::new("item", DataType::Utf8, true))),
            false,
        ),
        Field::new("Internships", DataType::Int64, false),
        Field::new("Job_Changes", DataType::Int64, false),
        Field::new("Networking_Score", DataType::Int64, false),
    ];
    let mut columns: Vec<ArrayRef> = vec![
        ints(|r| r.work_experience),
        Arc::new(Float64Array::from(rows.iter().map(|r| r.gpa).collect::<Vec<_>>())),
        ints(|r| r.certifications),
        Arc::new(skills_builder.finish()),
        ints(|r| r.internships),
        ints(|r| r.job_changes),
        ints(|r| r.networking_score),
    ];

    let flags: Vec<Vec<bool>> = rows.iter().map(indicators).collect();
    for (k, name) in indicator_columns().into_iter().enumerate() {
        fields.push(Field::new(name, DataType::Boolean, false));
        columns.push(Arc::new(BooleanArray::from(
            flags.iter().map(|f| f[k]).collect::<Vec<_>>(),
        )));
    }

    fields.push(Field::new("Salary_at_30", DataType::Float64, false));
    columns.push(Arc::new(Float64Array::from(
        rows.iter().map(|r| r.salary_at_30).collect::<Vec<_>>(),
    )));

    let schema = Arc::new(Schema::new(fields));
    let batch = RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;

    let file = std::fs::File::create(path).context("creating output file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing record batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let output_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("sample_salaries.csv"));

    let mut rng = SimpleRng::new(42);
    let rows: Vec<Row> = (0..1000).map(|_| generate_row(&mut rng)).collect();

    let is_parquet = output_path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("parquet") || e.eq_ignore_ascii_case("pq"));

    if is_parquet {
        write_parquet(&output_path, &rows)?;
    } else {
        write_csv(&output_path, &rows)?;
    }

    log::info!("Wrote {} records to {}", rows.len(), output_path.display());
    println!("Wrote {} records to {}", rows.len(), output_path.display());
    Ok(())
}
