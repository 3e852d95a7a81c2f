//! The analytical query builders.
//!
//! Line totals are `ProductUnitPrice * QuantityOrdered`. Customer-scoped
//! builders resolve the name against a freshly read Customer lookup and
//! bind the resulting `CustomerID` as `?1`.

use tracing::debug;

use sales_model::CustomerName;
use sales_store::{LookupIndex, LookupSpec, Store};

use crate::catalog::QueryKind;
use crate::error::{QueryError, Result};
use crate::query::Query;

const CUSTOMER_ORDER_DETAIL: &str = "\
SELECT
    Customer.FirstName || ' ' || Customer.LastName AS Name,
    Product.ProductName,
    OrderDetail.OrderDate,
    Product.ProductUnitPrice,
    OrderDetail.QuantityOrdered,
    ROUND(Product.ProductUnitPrice * OrderDetail.QuantityOrdered, 2) AS Total
FROM OrderDetail
JOIN Customer ON OrderDetail.CustomerID = Customer.CustomerID
JOIN Product ON OrderDetail.ProductID = Product.ProductID
WHERE Customer.CustomerID = ?1
ORDER BY OrderDetail.OrderID";

const CUSTOMER_TOTAL_SPEND: &str = "\
SELECT
    Customer.FirstName || ' ' || Customer.LastName AS Name,
    ROUND(SUM(Product.ProductUnitPrice * OrderDetail.QuantityOrdered), 2) AS Total
FROM OrderDetail
JOIN Customer ON OrderDetail.CustomerID = Customer.CustomerID
JOIN Product ON OrderDetail.ProductID = Product.ProductID
WHERE Customer.CustomerID = ?1
GROUP BY Customer.FirstName, Customer.LastName";

const ALL_CUSTOMERS_RANKED: &str = "\
SELECT
    Customer.FirstName || ' ' || Customer.LastName AS Name,
    ROUND(SUM(Product.ProductUnitPrice * OrderDetail.QuantityOrdered), 2) AS Total
FROM OrderDetail
JOIN Customer ON OrderDetail.CustomerID = Customer.CustomerID
JOIN Product ON OrderDetail.ProductID = Product.ProductID
GROUP BY Customer.CustomerID
ORDER BY Total DESC, Name ASC";

const REGION_TOTALS: &str = "\
SELECT
    Region.Region AS Region,
    ROUND(SUM(Product.ProductUnitPrice * OrderDetail.QuantityOrdered), 2) AS Total
FROM OrderDetail
JOIN Customer ON OrderDetail.CustomerID = Customer.CustomerID
JOIN Product ON OrderDetail.ProductID = Product.ProductID
JOIN Country ON Customer.CountryID = Country.CountryID
JOIN Region ON Country.RegionID = Region.RegionID
GROUP BY Region.Region
ORDER BY Total DESC, Region ASC";

// Whole-unit rounding here differs from the other totals and is kept as is.
const COUNTRY_TOTALS: &str = "\
SELECT
    Country.CountryName AS Country,
    ROUND(SUM(Product.ProductUnitPrice * OrderDetail.QuantityOrdered)) AS Total
FROM OrderDetail
JOIN Customer ON OrderDetail.CustomerID = Customer.CustomerID
JOIN Product ON OrderDetail.ProductID = Product.ProductID
JOIN Country ON Customer.CountryID = Country.CountryID
GROUP BY Country.CountryName
ORDER BY Total DESC, Country ASC";

// Ranked on the rounded total so equal displayed totals share a rank.
const COUNTRIES_RANKED_WITHIN_REGION: &str = "\
SELECT
    Region.Region AS Region,
    Country.CountryName AS Country,
    ROUND(SUM(Product.ProductUnitPrice * OrderDetail.QuantityOrdered)) AS CountryTotal,
    RANK() OVER (
        PARTITION BY Region.Region
        ORDER BY ROUND(SUM(Product.ProductUnitPrice * OrderDetail.QuantityOrdered)) DESC
    ) AS TotalRank
FROM OrderDetail
JOIN Customer ON OrderDetail.CustomerID = Customer.CustomerID
JOIN Product ON OrderDetail.ProductID = Product.ProductID
JOIN Country ON Customer.CountryID = Country.CountryID
JOIN Region ON Country.RegionID = Region.RegionID
GROUP BY Region.Region, Country.CountryName
ORDER BY Region.Region ASC, TotalRank ASC, Country ASC";

const TOP_COUNTRY_PER_REGION: &str = "\
WITH RankedCountries AS (
    SELECT
        Region.Region AS Region,
        Country.CountryName AS Country,
        ROUND(SUM(Product.ProductUnitPrice * OrderDetail.QuantityOrdered)) AS CountryTotal,
        RANK() OVER (
            PARTITION BY Region.Region
            ORDER BY ROUND(SUM(Product.ProductUnitPrice * OrderDetail.QuantityOrdered)) DESC
        ) AS CountryRegionalRank
    FROM OrderDetail
    JOIN Customer ON OrderDetail.CustomerID = Customer.CustomerID
    JOIN Product ON OrderDetail.ProductID = Product.ProductID
    JOIN Country ON Customer.CountryID = Country.CountryID
    JOIN Region ON Country.RegionID = Region.RegionID
    GROUP BY Region.Region, Country.CountryName
)
SELECT Region, Country, CountryTotal, CountryRegionalRank
FROM RankedCountries
WHERE CountryRegionalRank = 1
ORDER BY Region ASC, Country ASC";

const CUSTOMER_SALES_CTE: &str = "\
CustomerSales AS (
    SELECT
        CASE
            WHEN CAST(SUBSTR(OrderDetail.OrderDate, 6, 2) AS INTEGER) BETWEEN 1 AND 3 THEN 'Q1'
            WHEN CAST(SUBSTR(OrderDetail.OrderDate, 6, 2) AS INTEGER) BETWEEN 4 AND 6 THEN 'Q2'
            WHEN CAST(SUBSTR(OrderDetail.OrderDate, 6, 2) AS INTEGER) BETWEEN 7 AND 9 THEN 'Q3'
            ELSE 'Q4'
        END AS Quarter,
        CAST(SUBSTR(OrderDetail.OrderDate, 1, 4) AS INTEGER) AS Year,
        OrderDetail.CustomerID,
        ROUND(SUM(Product.ProductUnitPrice * OrderDetail.QuantityOrdered)) AS Total
    FROM OrderDetail
    JOIN Product ON OrderDetail.ProductID = Product.ProductID
    GROUP BY Quarter, Year, OrderDetail.CustomerID
)";

const MONTHLY_SALES_RANKING: &str = "\
WITH MonthlySales AS (
    SELECT
        CASE SUBSTR(OrderDetail.OrderDate, 6, 2)
            WHEN '01' THEN 'January'
            WHEN '02' THEN 'February'
            WHEN '03' THEN 'March'
            WHEN '04' THEN 'April'
            WHEN '05' THEN 'May'
            WHEN '06' THEN 'June'
            WHEN '07' THEN 'July'
            WHEN '08' THEN 'August'
            WHEN '09' THEN 'September'
            WHEN '10' THEN 'October'
            WHEN '11' THEN 'November'
            WHEN '12' THEN 'December'
        END AS Month,
        SUM(ROUND(Product.ProductUnitPrice * OrderDetail.QuantityOrdered)) AS MonthTotal
    FROM OrderDetail
    JOIN Product ON OrderDetail.ProductID = Product.ProductID
    GROUP BY Month
)
SELECT
    Month,
    ROUND(MonthTotal) AS Total,
    RANK() OVER (ORDER BY MonthTotal DESC) AS TotalRank
FROM MonthlySales
ORDER BY TotalRank ASC, Month ASC";

// Among equal maximum gaps the earliest occurrence represents the customer.
const MAX_GAP_BETWEEN_ORDERS: &str = "\
WITH CustomerOrders AS (
    SELECT
        Customer.CustomerID,
        Customer.FirstName,
        Customer.LastName,
        Country.CountryName AS Country,
        OrderDetail.OrderDate,
        LAG(OrderDetail.OrderDate) OVER (
            PARTITION BY Customer.CustomerID
            ORDER BY OrderDetail.OrderDate
        ) AS PreviousOrderDate
    FROM OrderDetail
    JOIN Customer ON OrderDetail.CustomerID = Customer.CustomerID
    JOIN Country ON Customer.CountryID = Country.CountryID
),
Gaps AS (
    SELECT
        CustomerID, FirstName, LastName, Country, OrderDate, PreviousOrderDate,
        JULIANDAY(OrderDate) - JULIANDAY(PreviousOrderDate) AS DaysWithoutOrder
    FROM CustomerOrders
    WHERE PreviousOrderDate IS NOT NULL
),
MaxGaps AS (
    SELECT CustomerID, MAX(DaysWithoutOrder) AS MaxDaysWithoutOrder
    FROM Gaps
    GROUP BY CustomerID
)
SELECT
    Gaps.CustomerID,
    Gaps.FirstName,
    Gaps.LastName,
    Gaps.Country,
    Gaps.OrderDate,
    Gaps.PreviousOrderDate,
    MaxGaps.MaxDaysWithoutOrder
FROM Gaps
JOIN MaxGaps
    ON Gaps.CustomerID = MaxGaps.CustomerID
    AND Gaps.DaysWithoutOrder = MaxGaps.MaxDaysWithoutOrder
WHERE Gaps.OrderDate = (
    SELECT MIN(Earlier.OrderDate)
    FROM Gaps AS Earlier
    JOIN MaxGaps AS EarlierMax
        ON Earlier.CustomerID = EarlierMax.CustomerID
        AND Earlier.DaysWithoutOrder = EarlierMax.MaxDaysWithoutOrder
    WHERE Earlier.CustomerID = Gaps.CustomerID
)
GROUP BY Gaps.CustomerID
ORDER BY MaxGaps.MaxDaysWithoutOrder DESC, Gaps.CustomerID DESC";

/// Resolves a "First Last" name to its `CustomerID`.
///
/// The Customer table is read on every call.
pub fn resolve_customer(store: &Store, name: &str) -> Result<i64> {
    let key = CustomerName::split(name).map_or_else(|| name.trim().to_string(), |n| n.key());
    let customers = LookupIndex::build(store, LookupSpec::CUSTOMER)?;
    let customer_id = customers
        .get(&key)
        .ok_or_else(|| QueryError::UnknownCustomer {
            name: name.to_string(),
        })?;
    debug!(customer_id, "resolved customer");
    Ok(customer_id)
}

/// Every order line of one customer with its rounded line total.
pub fn customer_order_detail(store: &Store, customer: &str) -> Result<Query> {
    let customer_id = resolve_customer(store, customer)?;
    Ok(Query::catalog(QueryKind::CustomerOrderDetail, CUSTOMER_ORDER_DETAIL).bind(customer_id))
}

/// One row: the customer's summed, then rounded, total.
pub fn customer_total_spend(store: &Store, customer: &str) -> Result<Query> {
    let customer_id = resolve_customer(store, customer)?;
    Ok(Query::catalog(QueryKind::CustomerTotalSpend, CUSTOMER_TOTAL_SPEND).bind(customer_id))
}

pub fn all_customers_ranked() -> Query {
    Query::catalog(QueryKind::AllCustomersRanked, ALL_CUSTOMERS_RANKED)
}

pub fn region_totals() -> Query {
    Query::catalog(QueryKind::RegionTotals, REGION_TOTALS)
}

/// Totals per country name, rounded to whole units.
pub fn country_totals() -> Query {
    Query::catalog(QueryKind::CountryTotals, COUNTRY_TOTALS)
}

/// Competition ranking (`RANK`) of countries inside each region.
pub fn countries_ranked_within_region() -> Query {
    Query::catalog(
        QueryKind::CountriesRankedWithinRegion,
        COUNTRIES_RANKED_WITHIN_REGION,
    )
}

/// Rank-1 rows of [`countries_ranked_within_region`]; ties yield several rows.
pub fn top_country_per_region() -> Query {
    Query::catalog(QueryKind::TopCountryPerRegion, TOP_COUNTRY_PER_REGION)
}

/// Totals grouped by (quarter, year, customer), ordered by year.
pub fn customer_quarterly_totals() -> Query {
    let sql = format!(
        "WITH {CUSTOMER_SALES_CTE}\n\
         SELECT Quarter, Year, CustomerID, Total\n\
         FROM CustomerSales\n\
         ORDER BY Year ASC, Quarter ASC, CustomerID ASC"
    );
    Query::catalog(QueryKind::CustomerQuarterlyTotals, sql)
}

/// Customers ranked within each (quarter, year), keeping ranks 1 to 5.
pub fn top_customers_per_quarter() -> Query {
    let sql = format!(
        "WITH {CUSTOMER_SALES_CTE},\n\
         RankedSales AS (\n    \
             SELECT Quarter, Year, CustomerID, Total,\n        \
             RANK() OVER (PARTITION BY Quarter, Year ORDER BY Total DESC) AS CustomerRank\n    \
             FROM CustomerSales\n\
         )\n\
         SELECT Quarter, Year, CustomerID, Total, CustomerRank\n\
         FROM RankedSales\n\
         WHERE CustomerRank <= 5\n\
         ORDER BY Year ASC, Quarter ASC, CustomerRank ASC, CustomerID ASC"
    );
    Query::catalog(QueryKind::TopCustomersPerQuarter, sql)
}

/// One global ranking over month names, all years combined.
pub fn monthly_sales_ranking() -> Query {
    Query::catalog(QueryKind::MonthlySalesRanking, MONTHLY_SALES_RANKING)
}

/// Largest gap in days between consecutive orders of each customer.
pub fn max_gap_between_orders() -> Query {
    Query::catalog(QueryKind::MaxGapBetweenOrders, MAX_GAP_BETWEEN_ORDERS)
}

/// Builds the query for `kind`.
///
/// `customer` is required by customer-scoped queries and ignored by the rest.
pub fn build(kind: QueryKind, store: &Store, customer: Option<&str>) -> Result<Query> {
    let required = || customer.ok_or(QueryError::MissingCustomer { query: kind.name() });
    match kind {
        QueryKind::CustomerOrderDetail => customer_order_detail(store, required()?),
        QueryKind::CustomerTotalSpend => customer_total_spend(store, required()?),
        QueryKind::AllCustomersRanked => Ok(all_customers_ranked()),
        QueryKind::RegionTotals => Ok(region_totals()),
        QueryKind::CountryTotals => Ok(country_totals()),
        QueryKind::CountriesRankedWithinRegion => Ok(countries_ranked_within_region()),
        QueryKind::TopCountryPerRegion => Ok(top_country_per_region()),
        QueryKind::CustomerQuarterlyTotals => Ok(customer_quarterly_totals()),
        QueryKind::TopCustomersPerQuarter => Ok(top_customers_per_quarter()),
        QueryKind::MonthlySalesRanking => Ok(monthly_sales_ranking()),
        QueryKind::MaxGapBetweenOrders => Ok(max_gap_between_orders()),
    }
}
