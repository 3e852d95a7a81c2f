//! Property tests: arbitrary lines never panic the reader or the parsers.

use std::path::Path;

use proptest::prelude::*;

use sales_ingest::{
    Column, RawRecord, parse_order_date, parse_quantity, parse_unit_price, read_extract_from,
};

fn read_lines(body: &str) -> Vec<RawRecord> {
    let input = format!("header\n{body}\n");
    read_extract_from(input.as_bytes(), Path::new("extract.tsv")).unwrap()
}

proptest! {
    #[test]
    fn test_any_line_reads_without_panicking(line in "[a-zA-Z0-9 ;.\t-]{0,120}") {
        let records = read_lines(&line);
        if line.is_empty() {
            prop_assert!(records.is_empty());
        } else {
            prop_assert_eq!(records.len(), 1);
            let record = &records[0];
            prop_assert_eq!(record.line(), 2);
            prop_assert_eq!(record.len(), line.split('\t').count());
            let _ = record.category_items();
            let _ = record.product_items();
            let _ = record.order_items();
        }
    }

    #[test]
    fn test_fields_match_trimmed_tab_split(line in "[a-zA-Z0-9 ;.\t-]{1,120}") {
        let records = read_lines(&line);
        let expected: Vec<&str> = line.split('\t').map(str::trim).collect();
        let record = &records[0];
        for (idx, column) in [Column::CustomerName, Column::Address, Column::City]
            .into_iter()
            .enumerate()
        {
            prop_assert_eq!(record.field(column), expected.get(idx).copied());
        }
    }

    #[test]
    fn test_zipped_lists_never_exceed_shortest(
        names in prop::collection::vec("[a-z]{1,6}", 0..6),
        quantities in prop::collection::vec(0i64..50, 0..6),
        dates in prop::collection::vec("20[0-9]{2}0[1-9]1[0-9]", 0..6),
    ) {
        let quantities: Vec<String> = quantities.iter().map(ToString::to_string).collect();
        let line = format!(
            "A B\taddr\tcity\tcountry\tregion\t{}\tcat\tdesc\t1.0\t{}\t{}",
            names.join(";"),
            quantities.join(";"),
            dates.join(";"),
        );
        let record = read_lines(&line).remove(0);
        let expected = record
            .list(Column::ProductNames)
            .len()
            .min(record.list(Column::Quantities).len())
            .min(record.list(Column::OrderDates).len());
        prop_assert_eq!(record.order_items().len(), expected);
    }

    #[test]
    fn test_value_parsers_never_panic(value in ".{0,24}") {
        let _ = parse_unit_price(&value);
        let _ = parse_quantity(&value);
        let _ = parse_order_date(&value);
    }

    #[test]
    fn test_valid_dates_round_trip_to_iso(year in 1990i32..2100, month in 1u32..=12, day in 1u32..=28) {
        let raw = format!("{year:04}{month:02}{day:02}");
        let parsed = parse_order_date(&raw).expect("valid date");
        prop_assert_eq!(
            parsed.format("%Y-%m-%d").to_string(),
            format!("{year:04}-{month:02}-{day:02}")
        );
    }
}
