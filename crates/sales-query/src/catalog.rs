//! Names and titles of the analytical queries.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::QueryError;

/// One of the eleven analytical queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QueryKind {
    CustomerOrderDetail,
    CustomerTotalSpend,
    AllCustomersRanked,
    RegionTotals,
    CountryTotals,
    CountriesRankedWithinRegion,
    TopCountryPerRegion,
    CustomerQuarterlyTotals,
    TopCustomersPerQuarter,
    MonthlySalesRanking,
    MaxGapBetweenOrders,
}

impl QueryKind {
    pub const ALL: [QueryKind; 11] = [
        QueryKind::CustomerOrderDetail,
        QueryKind::CustomerTotalSpend,
        QueryKind::AllCustomersRanked,
        QueryKind::RegionTotals,
        QueryKind::CountryTotals,
        QueryKind::CountriesRankedWithinRegion,
        QueryKind::TopCountryPerRegion,
        QueryKind::CustomerQuarterlyTotals,
        QueryKind::TopCustomersPerQuarter,
        QueryKind::MonthlySalesRanking,
        QueryKind::MaxGapBetweenOrders,
    ];

    /// Stable command-line name.
    pub fn name(self) -> &'static str {
        match self {
            Self::CustomerOrderDetail => "customer-order-detail",
            Self::CustomerTotalSpend => "customer-total-spend",
            Self::AllCustomersRanked => "customers-ranked",
            Self::RegionTotals => "region-totals",
            Self::CountryTotals => "country-totals",
            Self::CountriesRankedWithinRegion => "countries-ranked-in-region",
            Self::TopCountryPerRegion => "top-country-per-region",
            Self::CustomerQuarterlyTotals => "customer-quarterly-totals",
            Self::TopCustomersPerQuarter => "top-customers-per-quarter",
            Self::MonthlySalesRanking => "monthly-sales-ranking",
            Self::MaxGapBetweenOrders => "max-gap-between-orders",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::CustomerOrderDetail => "Customer order details with totals",
            Self::CustomerTotalSpend => "Total spend for one customer",
            Self::AllCustomersRanked => "All customers ranked by total spend",
            Self::RegionTotals => "Sales totals by region",
            Self::CountryTotals => "Sales totals by country",
            Self::CountriesRankedWithinRegion => "Countries ranked within each region",
            Self::TopCountryPerRegion => "Top country in each region",
            Self::CustomerQuarterlyTotals => "Customer totals by quarter and year",
            Self::TopCustomersPerQuarter => "Top five customers per quarter",
            Self::MonthlySalesRanking => "Monthly sales ranking",
            Self::MaxGapBetweenOrders => "Longest gap between orders per customer",
        }
    }

    /// Whether the query is scoped to one customer name.
    pub fn needs_customer(self) -> bool {
        matches!(self, Self::CustomerOrderDetail | Self::CustomerTotalSpend)
    }
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for QueryKind {
    type Err = QueryError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = value.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| QueryError::UnknownQuery {
                name: wanted.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for kind in QueryKind::ALL {
            assert_eq!(kind.name().parse::<QueryKind>().unwrap(), kind);
        }
        assert_eq!(
            " Region-Totals ".parse::<QueryKind>().unwrap(),
            QueryKind::RegionTotals
        );
    }

    #[test]
    fn test_unknown_name_is_rejected() {
        let error = "best-sellers".parse::<QueryKind>().unwrap_err();
        assert_eq!(error.to_string(), "unknown query: best-sellers");
    }

    #[test]
    fn test_only_two_queries_take_a_customer() {
        let scoped: Vec<&str> = QueryKind::ALL
            .into_iter()
            .filter(|kind| kind.needs_customer())
            .map(QueryKind::name)
            .collect();
        assert_eq!(scoped, vec!["customer-order-detail", "customer-total-spend"]);
    }
}
