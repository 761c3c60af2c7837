use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use usage_spiral::data::{
    PipelineConfig, RawTable, build_dataset, normalize_date_key, parse_date_key,
};

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).expect("valid date")
}

fn header_for(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

proptest! {
    #[test]
    fn suffix_does_not_change_parsed_date(
        year in 1000i32..=9998,
        ordinal in 0i64..366,
        suffix in proptest::option::of(1u8..10)
    ) {
        let start = NaiveDate::from_ymd_opt(year, 1, 1).expect("valid date");
        let date = start + Duration::days(ordinal);
        let key = header_for(date);
        let raw = match suffix {
            Some(n) => format!("{key}.{n}"),
            None => key.clone(),
        };

        prop_assert_eq!(normalize_date_key(&raw), key.as_str());
        prop_assert_eq!(parse_date_key(normalize_date_key(&raw)).expect("parse"), date);
    }

    #[test]
    fn dataset_invariants_hold_for_random_tables(
        // (day offset, duplicate column?) per date column
        columns in proptest::collection::vec((0i64..200, any::<bool>()), 1..12),
        usage in proptest::collection::vec(proptest::collection::vec(0u64..5_000, 24), 1..6)
    ) {
        let mut headers = vec!["App name".to_owned(), "Device".to_owned()];
        for (offset, duplicate) in &columns {
            let key = header_for(base_date() + Duration::days(*offset));
            if *duplicate {
                headers.push(format!("{key}.1"));
            } else {
                headers.push(key);
            }
        }
        // Column names must be distinct for a realistic export.
        let mut seen = std::collections::HashSet::new();
        prop_assume!(headers.iter().all(|header| seen.insert(header.clone())));

        let mut table = RawTable::new(headers.clone());
        for (row_index, row_usage) in usage.iter().enumerate() {
            let mut cells = vec![format!("App {row_index}"), "Phone".to_owned()];
            cells.extend(row_usage.iter().take(columns.len()).map(u64::to_string));
            table.push_row(cells);
        }

        let dataset = build_dataset(&table, None, &PipelineConfig::default()).expect("dataset");

        // Expected totals per normalized key straight from the table.
        let mut expected = std::collections::HashMap::<String, u64>::new();
        for row_usage in &usage {
            for (column, header) in headers.iter().skip(2).enumerate() {
                *expected.entry(normalize_date_key(header).to_owned()).or_default() +=
                    row_usage[column];
            }
        }
        prop_assert_eq!(dataset.len(), expected.len());

        let mut previous_week = 0;
        for (position, day) in dataset.iter().enumerate() {
            prop_assert_eq!(day.day_index(), position);
            prop_assert!(day.week_number() >= previous_week);
            previous_week = day.week_number();

            prop_assert_eq!(day.total_usage_seconds(), expected[day.date_key()]);
            let app_sum: u64 = day.apps().iter().map(|app| app.usage_seconds).sum();
            prop_assert_eq!(app_sum, day.total_usage_seconds());
            prop_assert!(day.apps().iter().all(|app| app.usage_seconds > 0));
            prop_assert!(day
                .apps()
                .windows(2)
                .all(|pair| pair[0].usage_seconds >= pair[1].usage_seconds));

            if position > 0 {
                prop_assert!(dataset.records()[position - 1].date() < day.date());
            }
        }
        prop_assert_eq!(dataset.first().week_number(), 0);
    }
}
