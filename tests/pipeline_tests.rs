use chrono::NaiveDate;
use usage_spiral::SpiralError;
use usage_spiral::data::{AppUsage, PipelineConfig, RawTable, build_dataset};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

fn split_column_usage_table() -> RawTable {
    RawTable::new([
        "App name",
        "Device",
        "September 1, 2025",
        "September 1, 2025.1",
        "September 2, 2025",
        "Total Usage (seconds)",
    ])
    .with_row(["App A", "Phone", "100", "50", "200", "350"])
    .with_row(["App B", "Phone", "0", "", "0", "0"])
}

#[test]
fn duplicate_suffixed_columns_merge_into_one_day() {
    let dataset = build_dataset(&split_column_usage_table(), None, &PipelineConfig::default())
        .expect("dataset");

    assert_eq!(dataset.len(), 2);

    let first = dataset.first();
    assert_eq!(first.date(), date(2025, 9, 1));
    assert_eq!(first.date_key(), "September 1, 2025");
    assert_eq!(first.total_usage_seconds(), 150);
    assert_eq!(first.apps(), &[AppUsage::new("App A", 150)]);
    assert_eq!(first.day_index(), 0);
    assert_eq!(first.week_number(), 0);

    let second = dataset.last();
    assert_eq!(second.date(), date(2025, 9, 2));
    assert_eq!(second.total_usage_seconds(), 200);
    assert_eq!(second.apps(), &[AppUsage::new("App A", 200)]);
    assert_eq!(second.day_index(), 1);
    assert_eq!(second.week_number(), 0);
}

#[test]
fn unlock_columns_for_the_same_date_are_summed() {
    let unlocks = RawTable::new([
        "Device",
        "September 1, 2025",
        "September 1, 2025.1",
        "Total Unlocks",
    ])
    .with_row(["Phone", "5", "3", "8"]);

    let dataset = build_dataset(
        &split_column_usage_table(),
        Some(&unlocks),
        &PipelineConfig::default(),
    )
    .expect("dataset");

    assert_eq!(dataset.first().unlock_count(), 8.0);
    // September 2 has no unlock column at all.
    assert_eq!(dataset.last().unlock_count(), 0.0);
}

#[test]
fn zero_usage_rows_count_toward_total_but_not_apps() {
    let usage = RawTable::new(["App name", "Device", "October 1, 2025"])
        .with_row(["Mail", "Phone", "30"])
        .with_row(["Maps", "Phone", "0"])
        .with_row(["Music", "Tablet", "90"])
        .with_row(["Notes", "Phone", "30"]);

    let dataset = build_dataset(&usage, None, &PipelineConfig::default()).expect("dataset");
    let day = dataset.first();

    assert_eq!(day.total_usage_seconds(), 150);
    assert_eq!(
        day.apps(),
        &[
            AppUsage::new("Music", 90),
            AppUsage::new("Mail", 30),
            AppUsage::new("Notes", 30),
        ]
    );
}

#[test]
fn all_zero_date_still_produces_a_record() {
    let usage = RawTable::new(["App name", "Device", "October 1, 2025", "October 2, 2025"])
        .with_row(["Mail", "Phone", "", "10"]);

    let dataset = build_dataset(&usage, None, &PipelineConfig::default()).expect("dataset");

    assert_eq!(dataset.len(), 2);
    assert_eq!(dataset.first().total_usage_seconds(), 0);
    assert!(dataset.first().apps().is_empty());
}

#[test]
fn unparsable_columns_are_excluded() {
    let usage = RawTable::new([
        "App name",
        "Device",
        "Oct 1, 2025",
        "October 2, 2025",
        "Notes",
    ])
    .with_row(["Mail", "Phone", "500", "10", "7"]);

    let dataset = build_dataset(&usage, None, &PipelineConfig::default()).expect("dataset");

    assert_eq!(dataset.len(), 1);
    assert_eq!(dataset.first().date(), date(2025, 10, 2));
    assert_eq!(dataset.first().total_usage_seconds(), 10);
}

#[test]
fn days_are_sorted_and_indexed_chronologically() {
    let usage = RawTable::new([
        "App name",
        "Device",
        "October 9, 2025",
        "September 29, 2025",
        "October 6, 2025",
        "October 5, 2025",
    ])
    .with_row(["Mail", "Phone", "1", "2", "3", "4"]);

    let dataset = build_dataset(&usage, None, &PipelineConfig::default()).expect("dataset");
    let dates: Vec<NaiveDate> = dataset.iter().map(|day| day.date()).collect();
    assert_eq!(
        dates,
        vec![
            date(2025, 9, 29),
            date(2025, 10, 5),
            date(2025, 10, 6),
            date(2025, 10, 9),
        ]
    );

    let indices: Vec<usize> = dataset.iter().map(|day| day.day_index()).collect();
    assert_eq!(indices, vec![0, 1, 2, 3]);

    let weeks: Vec<u32> = dataset.iter().map(|day| day.week_number()).collect();
    assert_eq!(weeks, vec![0, 0, 1, 1]);

    let weekdays: Vec<u8> = dataset.iter().map(|day| day.day_of_week()).collect();
    assert_eq!(weekdays, vec![0, 6, 0, 3]);
}

#[test]
fn end_date_cutoff_truncates_before_indexing() {
    let usage = RawTable::new([
        "App name",
        "Device",
        "November 3, 2025",
        "November 4, 2025",
        "November 5, 2025",
    ])
    .with_row(["Mail", "Phone", "1", "2", "3"]);
    let config = PipelineConfig::default().with_end_date_cutoff(date(2025, 11, 4));

    let dataset = build_dataset(&usage, None, &config).expect("dataset");

    assert_eq!(dataset.len(), 2);
    assert_eq!(dataset.last().date(), date(2025, 11, 4));
    assert_eq!(dataset.last().day_index(), 1);
}

#[test]
fn start_date_reindexes_from_first_kept_day() {
    let usage = RawTable::new([
        "App name",
        "Device",
        "November 1, 2025",
        "November 10, 2025",
    ])
    .with_row(["Mail", "Phone", "1", "2"]);
    let config = PipelineConfig::default().with_start_date(date(2025, 11, 2));

    let dataset = build_dataset(&usage, None, &config).expect("dataset");

    assert_eq!(dataset.len(), 1);
    assert_eq!(dataset.first().day_index(), 0);
    assert_eq!(dataset.first().week_number(), 0);
}

#[test]
fn nothing_left_after_filtering_is_an_empty_dataset_error() {
    let usage = RawTable::new(["App name", "Device", "November 5, 2025"])
        .with_row(["Mail", "Phone", "3"]);
    let config = PipelineConfig::default().with_end_date_cutoff(date(2025, 11, 4));

    let err = build_dataset(&usage, None, &config).expect_err("empty");
    assert!(matches!(err, SpiralError::EmptyDataset));

    let no_dates = RawTable::new(["App name", "Device"]).with_row(["Mail", "Phone"]);
    let err = build_dataset(&no_dates, None, &PipelineConfig::default()).expect_err("empty");
    assert!(matches!(err, SpiralError::EmptyDataset));
}

#[test]
fn csv_input_matches_in_memory_tables() {
    let csv = "App name,Device,\"September 1, 2025\",\"September 1, 2025.1\",\"September 2, 2025\",Total Usage (seconds)\n\
               App A,Phone,100,50,200,350\n\
               App B,Phone,0,,0,0\n";
    let table = RawTable::from_csv_reader(csv.as_bytes(), "inline").expect("csv");

    assert_eq!(table, split_column_usage_table());
}

#[test]
fn dataset_snapshot_serializes_records() {
    let dataset = build_dataset(&split_column_usage_table(), None, &PipelineConfig::default())
        .expect("dataset");

    let json = dataset.to_json_pretty().expect("json");
    let value: serde_json::Value = serde_json::from_str(&json).expect("parse");
    let records = value["records"].as_array().expect("records array");
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["date"], "2025-09-01");
    assert_eq!(records[0]["total_usage_seconds"], 150);
    assert_eq!(records[1]["day_index"], 1);
}
