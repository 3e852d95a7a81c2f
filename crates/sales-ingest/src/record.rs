//! One line of the extract and its positional fields.

/// Field positions of the extract (0-indexed).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    CustomerName = 0,
    Address = 1,
    City = 2,
    Country = 3,
    Region = 4,
    /// Semicolon list.
    ProductNames = 5,
    /// Semicolon list.
    Categories = 6,
    /// Semicolon list.
    Descriptions = 7,
    /// Semicolon list.
    UnitPrices = 8,
    /// Semicolon list.
    Quantities = 9,
    /// Semicolon list of `YYYYMMDD` dates.
    OrderDates = 10,
}

impl Column {
    pub fn index(self) -> usize {
        self as usize
    }
}

/// A category with the description written next to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryItem<'a> {
    pub category: &'a str,
    pub description: &'a str,
}

/// A product with its category and unparsed unit price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductItem<'a> {
    pub name: &'a str,
    pub category: &'a str,
    pub unit_price: &'a str,
}

/// One ordered product with unparsed quantity and date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderItem<'a> {
    pub product: &'a str,
    pub quantity: &'a str,
    pub order_date: &'a str,
}

/// A data line split into trimmed fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    line: u64,
    fields: Vec<String>,
}

impl RawRecord {
    pub fn new(line: u64, fields: Vec<String>) -> Self {
        Self { line, fields }
    }

    /// 1-based line number in the source file.
    pub fn line(&self) -> u64 {
        self.line
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Whether the line carries at least `min` fields.
    pub fn has_fields(&self, min: usize) -> bool {
        self.fields.len() >= min
    }

    pub fn field(&self, column: Column) -> Option<&str> {
        self.fields.get(column.index()).map(String::as_str)
    }

    /// Elements of a semicolon-delimited field, trimmed. Missing field yields no elements.
    pub fn list(&self, column: Column) -> Vec<&str> {
        match self.field(column) {
            Some(value) => value.split(';').map(str::trim).collect(),
            None => Vec::new(),
        }
    }

    /// Categories zipped with descriptions.
    ///
    /// Like every list accessor, lists of unequal length are zipped to the
    /// shortest and trailing unmatched elements are dropped.
    pub fn category_items(&self) -> Vec<CategoryItem<'_>> {
        self.list(Column::Categories)
            .into_iter()
            .zip(self.list(Column::Descriptions))
            .map(|(category, description)| CategoryItem {
                category,
                description,
            })
            .collect()
    }

    /// Product names zipped with categories and unit prices.
    pub fn product_items(&self) -> Vec<ProductItem<'_>> {
        self.list(Column::ProductNames)
            .into_iter()
            .zip(self.list(Column::Categories))
            .zip(self.list(Column::UnitPrices))
            .map(|((name, category), unit_price)| ProductItem {
                name,
                category,
                unit_price,
            })
            .collect()
    }

    /// Product names zipped with quantities and order dates.
    pub fn order_items(&self) -> Vec<OrderItem<'_>> {
        self.list(Column::ProductNames)
            .into_iter()
            .zip(self.list(Column::Quantities))
            .zip(self.list(Column::OrderDates))
            .map(|((product, quantity), order_date)| OrderItem {
                product,
                quantity,
                order_date,
            })
            .collect()
    }
}
