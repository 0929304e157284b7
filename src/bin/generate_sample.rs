use std::sync::Arc;

use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

const FIRST_NAMES: [&str; 8] = ["Amal", "Bhanu", "Chamari", "Dilan", "Eshani", "Farhan", "Gayan", "Hiruni"];
const LAST_NAMES: [&str; 5] = ["Perera", "Silva", "Fernando", "Jayasuriya", "Bandara"];

/// Subject name and maximum mark.
const SUBJECTS: [(&str, f64); 3] = [("Mathematics", 100.0), ("English", 50.0), ("Science", 75.0)];

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

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

/// One row of the sample marks sheet. `None` marks are written as "absent".
struct Candidate {
    index: i64,
    name: String,
    marks: Vec<Option<f64>>,
}

#[derive(Serialize)]
struct ExclusionRow {
    #[serde(rename = "Index Number")]
    index: i64,
    #[serde(rename = "Reason")]
    reason: &'static str,
}

fn main() -> anyhow::Result<()> {
    let mut rng = SimpleRng::new(42);

    let candidates: Vec<Candidate> = (0..40)
        .map(|i| {
            let name = format!("{} {}", rng.pick(&FIRST_NAMES), rng.pick(&LAST_NAMES));
            let ability = 0.15 + rng.next_f64() * 0.8;
            let marks = SUBJECTS
                .iter()
                .map(|&(_, max)| {
                    if rng.next_f64() < 0.05 {
                        None
                    } else {
                        let spread = (rng.next_f64() - 0.5) * 0.3;
                        Some(((ability + spread).clamp(0.0, 1.0) * max).round())
                    }
                })
                .collect();
            Candidate {
                index: 24001 + i,
                name,
                marks,
            }
        })
        .collect();

    write_marks_csv("sample_marks.csv", &candidates)?;
    write_marks_parquet("sample_marks.parquet", &candidates)?;

    let mut writer = csv::Writer::from_path("sample_exclusions.csv")?;
    for (index, reason) in [(24003, "Withdrawn"), (24017, "Medical deferral"), (24031, "Withdrawn")] {
        writer.serialize(ExclusionRow { index, reason })?;
    }
    writer.flush()?;

    println!(
        "Wrote {} candidates to sample_marks.csv / sample_marks.parquet and 3 exclusions to sample_exclusions.csv",
        candidates.len()
    );
    println!(
        "Max marks: {}",
        SUBJECTS
            .iter()
            .map(|(s, m)| format!("{s} {m}"))
            .collect::<Vec<_>>()
            .join(", ")
    );
    Ok(())
}

fn write_marks_csv(path: &str, candidates: &[Candidate]) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    let mut header = vec!["Index Number".to_string(), "Name".to_string()];
    header.extend(SUBJECTS.iter().map(|(s, _)| s.to_string()));
    writer.write_record(&header)?;

    for c in candidates {
        let mut record = vec![c.index.to_string(), c.name.clone()];
        record.extend(c.marks.iter().map(|m| match m {
            Some(v) => v.to_string(),
            None => "absent".to_string(),
        }));
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_marks_parquet(path: &str, candidates: &[Candidate]) -> anyhow::Result<()> {
    let mut fields = vec![
        Field::new("Index Number", DataType::Int64, false),
        Field::new("Name", DataType::Utf8, false),
    ];
    fields.extend(
        SUBJECTS
            .iter()
            .map(|(s, _)| Field::new(*s, DataType::Float64, true)),
    );
    let schema = Arc::new(Schema::new(fields));

    let mut columns: Vec<arrow::array::ArrayRef> = vec![
        Arc::new(Int64Array::from(
            candidates.iter().map(|c| c.index).collect::<Vec<_>>(),
        )),
        Arc::new(StringArray::from(
            candidates.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(),
        )),
    ];
    for subject in 0..SUBJECTS.len() {
        columns.push(Arc::new(Float64Array::from(
            candidates.iter().map(|c| c.marks[subject]).collect::<Vec<_>>(),
        )));
    }

    let batch = RecordBatch::try_new(schema.clone(), columns)?;
    let file = std::fs::File::create(path)?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}
