//! Region, Country and ProductCategory stages.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use sales_ingest::{Column, RawRecord};
use sales_model::{CountryRow, ProductCategoryRow, RegionRow, SkipReason, StageReport};
use sales_store::LookupIndex;

/// Checks the line length for the report's stage, counting a skip if short.
pub(crate) fn long_enough(record: &RawRecord, report: &mut StageReport) -> bool {
    if record.has_fields(report.table.min_fields()) {
        return true;
    }
    debug!(line = record.line(), fields = record.len(), table = %report.table, "short line skipped");
    report.skip(SkipReason::ShortLine);
    false
}

/// Distinct non-empty region names, sorted.
pub fn collect_regions(records: &[RawRecord], report: &mut StageReport) -> Vec<RegionRow> {
    let mut regions = BTreeSet::new();
    for record in records {
        if !long_enough(record, report) {
            continue;
        }
        match record.field(Column::Region) {
            Some(region) if !region.is_empty() => {
                regions.insert(region.to_string());
            }
            _ => report.skip(SkipReason::MissingValue),
        }
    }
    regions.into_iter().map(|name| RegionRow { name }).collect()
}

/// Distinct (country, region) pairs sorted by country name, region resolved
/// through `regions`.
///
/// A country listed under two regions yields two rows.
pub fn collect_countries(
    records: &[RawRecord],
    regions: &LookupIndex,
    report: &mut StageReport,
) -> Vec<CountryRow> {
    let mut pairs = BTreeSet::new();
    for record in records {
        if !long_enough(record, report) {
            continue;
        }
        let country = record.field(Column::Country).unwrap_or_default();
        let region = record.field(Column::Region).unwrap_or_default();
        if country.is_empty() || region.is_empty() {
            report.skip(SkipReason::MissingValue);
            continue;
        }
        pairs.insert((country.to_string(), region.to_string()));
    }

    let mut rows = Vec::with_capacity(pairs.len());
    for (country, region) in pairs {
        let Some(region_id) = regions.get(&region) else {
            debug!(country = %country, region = %region, "country with unknown region skipped");
            report.skip(SkipReason::UnknownRegion);
            continue;
        };
        rows.push(CountryRow {
            name: country,
            region_id,
        });
    }
    rows
}

/// Distinct categories sorted by name; the first description seen wins.
pub fn collect_categories(
    records: &[RawRecord],
    report: &mut StageReport,
) -> Vec<ProductCategoryRow> {
    let mut categories: BTreeMap<String, String> = BTreeMap::new();
    for record in records {
        if !long_enough(record, report) {
            continue;
        }
        for item in record.category_items() {
            if item.category.is_empty() {
                report.skip(SkipReason::MissingValue);
                continue;
            }
            categories
                .entry(item.category.to_string())
                .or_insert_with(|| item.description.to_string());
        }
    }
    categories
        .into_iter()
        .map(|(name, description)| ProductCategoryRow { name, description })
        .collect()
}
