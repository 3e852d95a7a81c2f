//! Customer, Product and OrderDetail stages.
//!
//! These stages resolve natural keys through lookups read from committed
//! tables. Anything that does not resolve is skipped and counted.

use std::collections::{BTreeMap, HashSet};

use tracing::debug;

use sales_ingest::{Column, RawRecord, parse_order_date, parse_quantity, parse_unit_price};
use sales_model::{CustomerName, CustomerRow, OrderDetailRow, ProductRow, SkipReason, StageReport};
use sales_store::LookupIndex;

use crate::dimensions::long_enough;

/// One row per distinct "First Last" name whose country resolves, sorted by
/// (first, last).
///
/// The last resolvable line for a name supplies its address, city and
/// country, so a customer who moved is counted under the newest country.
pub fn collect_customers(
    records: &[RawRecord],
    countries: &LookupIndex,
    report: &mut StageReport,
) -> Vec<CustomerRow> {
    let mut customers: BTreeMap<CustomerName, CustomerRow> = BTreeMap::new();
    for record in records {
        if !long_enough(record, report) {
            continue;
        }
        let full_name = record.field(Column::CustomerName).unwrap_or_default();
        let Some(name) = CustomerName::split(full_name) else {
            debug!(line = record.line(), "customer name without space skipped");
            report.skip(SkipReason::NameWithoutSpace);
            continue;
        };
        let country = record.field(Column::Country).unwrap_or_default();
        let Some(country_id) = countries.get(country) else {
            debug!(line = record.line(), "customer with unknown country skipped");
            report.skip(SkipReason::UnknownCountry);
            continue;
        };
        let row = CustomerRow {
            first_name: name.first.clone(),
            last_name: name.last.clone(),
            address: record.field(Column::Address).unwrap_or_default().to_string(),
            city: record.field(Column::City).unwrap_or_default().to_string(),
            country_id,
        };
        customers.insert(name, row);
    }
    customers.into_values().collect()
}

/// One row per distinct (name, category) product, stably sorted by name.
///
/// Products sharing a name keep the order they were first seen in, which
/// decides the key a name-only lookup resolves to. The first parseable price
/// seen wins. A bad element skips that product only; the rest of the line
/// still counts.
pub fn collect_products(
    records: &[RawRecord],
    categories: &LookupIndex,
    report: &mut StageReport,
) -> Vec<ProductRow> {
    let mut seen: HashSet<(String, i64)> = HashSet::new();
    let mut products = Vec::new();
    for record in records {
        if !long_enough(record, report) {
            continue;
        }
        for item in record.product_items() {
            if item.name.is_empty() {
                report.skip(SkipReason::MissingValue);
                continue;
            }
            let Some(unit_price) = parse_unit_price(item.unit_price) else {
                debug!(line = record.line(), product = item.name, "unparseable unit price");
                report.skip(SkipReason::InvalidPrice);
                continue;
            };
            let Some(category_id) = categories.get(item.category) else {
                debug!(line = record.line(), product = item.name, "unknown category");
                report.skip(SkipReason::UnknownCategory);
                continue;
            };
            if seen.insert((item.name.to_string(), category_id)) {
                products.push(ProductRow {
                    name: item.name.to_string(),
                    unit_price,
                    category_id,
                });
            }
        }
    }
    products.sort_by(|a, b| a.name.cmp(&b.name));
    products
}

/// One row per resolvable (product, quantity, date) element, in file order.
pub fn collect_order_details(
    records: &[RawRecord],
    customers: &LookupIndex,
    products: &LookupIndex,
    report: &mut StageReport,
) -> Vec<OrderDetailRow> {
    let mut rows = Vec::new();
    for record in records {
        if !long_enough(record, report) {
            continue;
        }
        let full_name = record.field(Column::CustomerName).unwrap_or_default();
        let Some(name) = CustomerName::split(full_name) else {
            report.skip(SkipReason::NameWithoutSpace);
            continue;
        };
        let Some(customer_id) = customers.get(&name.key()) else {
            debug!(line = record.line(), "order line for unknown customer skipped");
            report.skip(SkipReason::UnknownCustomer);
            continue;
        };

        for item in record.order_items() {
            let Some(product_id) = products.get(item.product) else {
                report.skip(SkipReason::UnknownProduct);
                continue;
            };
            let Some(quantity) = parse_quantity(item.quantity) else {
                report.skip(SkipReason::InvalidQuantity);
                continue;
            };
            let Some(order_date) = parse_order_date(item.order_date) else {
                debug!(line = record.line(), value = item.order_date, "unparseable order date");
                report.skip(SkipReason::InvalidDate);
                continue;
            };
            rows.push(OrderDetailRow {
                customer_id,
                product_id,
                order_date,
                quantity,
            });
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    use sales_ingest::read_extract_from;
    use sales_model::Table;

    /// Data lines behind a header, read the way the pipeline reads them.
    fn records(lines: &[&str]) -> Vec<RawRecord> {
        let text = format!("header\n{}\n", lines.join("\n"));
        read_extract_from(text.as_bytes(), Path::new("extract.tsv")).unwrap()
    }

    fn index(entries: &[(&str, i64)]) -> LookupIndex {
        entries
            .iter()
            .map(|(key, id)| ((*key).to_string(), *id))
            .collect()
    }

    #[test]
    fn test_customers_sorted_and_last_address_wins() {
        let records = records(&[
            "Zoe Adams\t1 Road\tLyon\tFrance\tEurope",
            "Jane Doe\t123 St\tParis\tFrance\tEurope",
            "Jane Doe\t9 Other\tNice\tFrance\tEurope",
            "Cher\tx\ty\tFrance\tEurope",
            "Ann Lee\tx\ty\tAtlantis\tOcean",
            "Bob Ray\tx\ty\tFrance",
        ]);
        let countries = index(&[("France", 1)]);
        let mut report = StageReport::new(Table::Customer);
        let rows = collect_customers(&records, &countries, &mut report);

        let names: Vec<(&str, &str)> = rows
            .iter()
            .map(|row| (row.first_name.as_str(), row.last_name.as_str()))
            .collect();
        assert_eq!(names, vec![("Jane", "Doe"), ("Zoe", "Adams")]);
        assert_eq!(rows[0].address, "9 Other");
        assert_eq!(rows[0].city, "Nice");
        assert_eq!(report.skipped(SkipReason::NameWithoutSpace), 1);
        assert_eq!(report.skipped(SkipReason::UnknownCountry), 1);
        assert_eq!(report.skipped(SkipReason::ShortLine), 1);
    }

    #[test]
    fn test_customer_keeps_last_resolvable_country() {
        let records = records(&[
            "Jane Doe\t123 St\tParis\tFrance\tEurope",
            "Jane Doe\t5 Calle\tMadrid\tSpain\tEurope",
            "Jane Doe\t1 Nowhere\tX\tAtlantis\tOcean",
        ]);
        let countries = index(&[("France", 1), ("Spain", 2)]);
        let mut report = StageReport::new(Table::Customer);
        let rows = collect_customers(&records, &countries, &mut report);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].country_id, 2);
        assert_eq!(rows[0].city, "Madrid");
        assert_eq!(report.skipped(SkipReason::UnknownCountry), 1);
    }

    #[test]
    fn test_same_product_under_two_categories_gives_two_rows() {
        let records = records(&[
            "A B\ta\tc\tX\tR\tWidget;Widget\tTools;Toys\td;e\t9.99;4.50",
            "C D\ta\tc\tX\tR\tWidget\tTools\td\t1.00",
        ]);
        let categories = index(&[("Tools", 1), ("Toys", 2)]);
        let mut report = StageReport::new(Table::Product);
        let rows = collect_products(&records, &categories, &mut report);

        assert_eq!(rows.len(), 2);
        assert_eq!((rows[0].category_id, rows[0].unit_price), (1, 9.99));
        assert_eq!((rows[1].category_id, rows[1].unit_price), (2, 4.5));
    }

    #[test]
    fn test_shared_product_name_keeps_first_seen_order() {
        let records = records(&[
            "Jane Doe\ta\tc\tX\tR\tWidget;Ball\tToys;Toys\td;d\t4.00;1.00",
            "John Roe\ta\tc\tX\tR\tWidget\tTools\td\t9.99",
        ]);
        let categories = index(&[("Tools", 1), ("Toys", 2)]);
        let mut report = StageReport::new(Table::Product);
        let rows = collect_products(&records, &categories, &mut report);

        let order: Vec<(&str, i64)> = rows
            .iter()
            .map(|row| (row.name.as_str(), row.category_id))
            .collect();
        assert_eq!(order, vec![("Ball", 2), ("Widget", 2), ("Widget", 1)]);
    }

    #[test]
    fn test_bad_price_skips_only_that_product() {
        let records = records(&[
            "A B\ta\tc\tX\tR\tGadget;Widget;Gizmo\tTools;Tools;Nope\td;d;d\tabc;2.5;1",
        ]);
        let categories = index(&[("Tools", 1)]);
        let mut report = StageReport::new(Table::Product);
        let rows = collect_products(&records, &categories, &mut report);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Widget");
        assert_eq!(report.skipped(SkipReason::InvalidPrice), 1);
        assert_eq!(report.skipped(SkipReason::UnknownCategory), 1);
    }

    #[test]
    fn test_order_details_skip_bad_elements_only() {
        let records = records(&[
            "Jane Doe\t1 St\tParis\tFrance\tEurope\tWidget;Gadget;Widget;Widget\tT;T;T;T\td;d;d;d\t1;1;1;1\t3;2;x;4\t20230115;20230116;20230117;2023011",
            "John Roe\t1 St\tParis\tFrance\tEurope\tWidget\tT\td\t1\t1\t20230101",
            "Jane Doe\t1 St\tParis\tFrance",
        ]);
        let customers = index(&[("Jane Doe", 1)]);
        let products = index(&[("Widget", 7)]);
        let mut report = StageReport::new(Table::OrderDetail);
        let rows = collect_order_details(&records, &customers, &products, &mut report);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].customer_id, 1);
        assert_eq!(rows[0].product_id, 7);
        assert_eq!(rows[0].quantity, 3);
        assert_eq!(rows[0].order_date_iso(), "2023-01-15");
        assert_eq!(report.skipped(SkipReason::UnknownProduct), 1);
        assert_eq!(report.skipped(SkipReason::InvalidQuantity), 1);
        assert_eq!(report.skipped(SkipReason::InvalidDate), 1);
        assert_eq!(report.skipped(SkipReason::UnknownCustomer), 1);
        assert_eq!(report.skipped(SkipReason::ShortLine), 1);
    }
}
