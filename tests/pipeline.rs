use std::path::Path;

use eligibility_processor::data::filter::{ExclusionSet, filter_excluded};
use eligibility_processor::data::loader::load_table;
use eligibility_processor::data::model::{CellValue, IndexKey, Table};
use eligibility_processor::data::params::ParameterEntry;
use eligibility_processor::data::score::Eligibility;
use eligibility_processor::{ExportOutcome, ProcessError, SchemaError, Session};

const MARKS: &str = "\
Index Number,Name,Math,English,Science
1042,Kamal,55,30,absent
1007,Nimal,100,50,75
1100,Sunil,,12,20
1013,Amara,80,25,60
1099,Ruwan,0,0,0
";

const EXCLUSIONS: &str = "\
Index Number,Reason
1013,Withdrawn
2000,Not in marks sheet
";

fn write(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

fn entries() -> Vec<ParameterEntry> {
    vec![
        ParameterEntry::new("Math", "2", "100"),
        ParameterEntry::new("English", "1", "50"),
        ParameterEntry::new("Science", "1.5", "75"),
    ]
}

fn scored_session(dir: &Path) -> Session {
    let marks = write(dir, "marks.csv", MARKS);
    let exclusions = write(dir, "exclusions.csv", EXCLUSIONS);

    let mut session = Session::new();
    session.load_marks(Some(&marks)).unwrap();
    session.load_exclusions(Some(&exclusions)).unwrap();
    session.filter().unwrap();
    session.score(&entries()).unwrap();
    session
}

#[test]
fn test_eligibility_list_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let session = scored_session(dir.path());
    let scored = session.scored().unwrap();

    let keys: Vec<String> = scored.records.iter().map(|r| r.key.to_string()).collect();
    assert_eq!(keys, vec!["1007", "1042", "1099", "1100"]);

    let nimal = &scored.records[0];
    assert_eq!(nimal.grade, 100.0);
    assert_eq!(nimal.eligibility, Eligibility::Eligible);

    // Science "absent" counts as 0: (0.55*2 + 0.6*1 + 0) / 4.5 * 100
    let kamal = &scored.records[1];
    assert!((kamal.grade - 1.7 / 4.5 * 100.0).abs() < 1e-9);
    assert_eq!(kamal.eligibility, Eligibility::NotEligible);

    let ruwan = &scored.records[2];
    assert_eq!(ruwan.grade, 0.0);
    assert_eq!(ruwan.eligibility, Eligibility::NotEligible);
}

#[test]
fn test_export_then_reimport_preserves_order_and_grades() {
    let dir = tempfile::tempdir().unwrap();
    let session = scored_session(dir.path());
    let scored = session.scored().unwrap();

    for name in ["list.xlsx", "list.csv", "list.json"] {
        let out = dir.path().join(name);
        assert_eq!(
            session.export(Some(&out)).unwrap(),
            ExportOutcome::Saved(out.clone())
        );

        let reloaded = load_table(&out).unwrap();
        assert_eq!(
            reloaded.headers,
            vec!["Index Number", "Name", "Math", "English", "Science", "Grade", "Eligibility"]
        );
        assert_eq!(reloaded.len(), scored.len());

        for (row, record) in reloaded.rows.iter().zip(&scored.records) {
            assert_eq!(IndexKey::from_cell(&row[0]).as_ref(), Some(&record.key));
            assert_eq!(row[5].as_f64(), Some(record.grade));
            let CellValue::String(label) = &row[6] else {
                panic!("eligibility should be text, got {:?}", row[6]);
            };
            assert_eq!(Eligibility::from_label(label), Some(record.eligibility));
        }
    }
}

#[test]
fn test_filter_output_is_exact_set_difference() {
    let dir = tempfile::tempdir().unwrap();
    let marks = load_table(&write(dir.path(), "marks.csv", MARKS)).unwrap();
    let all: Vec<IndexKey> = marks
        .rows
        .iter()
        .filter_map(|r| IndexKey::from_cell(&r[0]))
        .collect();

    // Every subset of the five candidates as an exclusion set.
    for mask in 0u32..(1 << all.len()) {
        let excluded: ExclusionSet = all
            .iter()
            .enumerate()
            .filter(|(i, _)| mask & (1 << i) != 0)
            .map(|(_, k)| k.clone())
            .collect();

        let filtered = filter_excluded(&marks, &excluded).unwrap();
        let expected: Vec<Vec<CellValue>> = marks
            .rows
            .iter()
            .zip(&all)
            .filter(|(_, k)| !excluded.contains(k))
            .map(|(r, _)| r.clone())
            .collect();

        assert_eq!(filtered.table.rows, expected);
        assert_eq!(filtered.excluded, excluded.len());
    }
}

#[test]
fn test_parquet_marks_with_csv_exclusions() {
    use std::sync::Arc;

    use arrow::array::{Float64Array, Int64Array, StringArray};
    use arrow::datatypes::{DataType, Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;

    let dir = tempfile::tempdir().unwrap();
    let marks = dir.path().join("marks.parquet");
    let schema = Arc::new(Schema::new(vec![
        Field::new("Index Number", DataType::Int64, false),
        Field::new("Name", DataType::Utf8, false),
        Field::new("Math", DataType::Float64, true),
    ]));
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from(vec![3, 1, 2])),
            Arc::new(StringArray::from(vec!["C", "A", "B"])),
            Arc::new(Float64Array::from(vec![Some(40.0), None, Some(39.0)])),
        ],
    )
    .unwrap();
    let mut writer = ArrowWriter::try_new(std::fs::File::create(&marks).unwrap(), schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();

    let exclusions = write(dir.path(), "ex.csv", "Index Number\n1\n");

    let mut session = Session::new();
    session.load_marks(Some(&marks)).unwrap();
    session.load_exclusions(Some(&exclusions)).unwrap();
    session.filter().unwrap();
    let scored = session
        .score(&[ParameterEntry::new("Math", "1", "100")])
        .unwrap();

    let result: Vec<(String, Eligibility)> = scored
        .records
        .iter()
        .map(|r| (r.key.to_string(), r.eligibility))
        .collect();
    assert_eq!(
        result,
        vec![
            ("2".to_string(), Eligibility::NotEligible),
            ("3".to_string(), Eligibility::Eligible),
        ]
    );
}

#[test]
fn test_zero_max_mark_is_rejected_before_scoring() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = scored_session(dir.path());

    let mut bad = entries();
    bad[1].max_mark = "0".to_string();
    let err = session.score(&bad).unwrap_err();
    let ProcessError::Parameters(errors) = err else {
        panic!("expected parameter errors, got {err}");
    };
    assert_eq!(errors.0.len(), 1);

    // The previous result is untouched.
    assert!(session.scored().is_some());
}

#[test]
fn test_duplicate_index_numbers_rejected() {
    let marks = Table::new(
        vec!["Index Number".into(), "Name".into()],
        vec![
            vec![CellValue::Integer(5), CellValue::String("A".into())],
            vec![CellValue::Float(5.0), CellValue::String("B".into())],
        ],
    );
    assert!(filter_excluded(&marks, &ExclusionSet::new()).is_err());
}

#[test]
fn test_repeated_subject_header_stops_at_filter() {
    let dir = tempfile::tempdir().unwrap();
    let marks = write(dir.path(), "marks.csv", "Index Number,Name,Math,Math\n1,Ann,50,60\n");
    let exclusions = write(dir.path(), "ex.csv", "Index Number\n");

    let mut session = Session::new();
    session.load_marks(Some(&marks)).unwrap();
    session.load_exclusions(Some(&exclusions)).unwrap();

    let err = session.filter().unwrap_err();
    assert!(
        matches!(&err, ProcessError::Schema(SchemaError::DuplicateColumn { name }) if name == "Math"),
        "unexpected error: {err}"
    );
    assert!(session.subjects().is_none());
}
