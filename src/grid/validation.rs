//! Column semantics and cell validation
//!
//! Columns are identified by position: name, description, price, amount.
//! Every rule here is a pure function of `(value, column)`.

/// Number of columns in every row
pub const COLUMN_COUNT: usize = 4;

/// The fixed columns of the items grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Name,
    Description,
    Price,
    Amount,
}

impl Column {
    pub const ALL: [Column; COLUMN_COUNT] = [
        Column::Name,
        Column::Description,
        Column::Price,
        Column::Amount,
    ];

    pub fn from_index(col: usize) -> Option<Self> {
        Self::ALL.get(col).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Header label shown above the column
    pub fn header(self) -> &'static str {
        match self {
            Column::Name => "Name",
            Column::Description => "Description",
            Column::Price => "Price",
            Column::Amount => "Amount",
        }
    }

    /// Prompt text shown in the placeholder row
    pub fn placeholder(self) -> &'static str {
        match self {
            Column::Name => "Add Item...",
            Column::Description => "Enter description...",
            Column::Price => "0.00",
            Column::Amount => "0",
        }
    }
}

/// Strip one leading `$` from a price value
pub fn strip_price_prefix(value: &str) -> &str {
    value.strip_prefix('$').unwrap_or(value)
}

/// Normalize a raw cell value before it is stored
///
/// Price cells drop a leading `$`; every other column is stored as typed.
pub fn normalize(value: &str, col: usize) -> String {
    match Column::from_index(col) {
        Some(Column::Price) => strip_price_prefix(value).to_string(),
        _ => value.to_string(),
    }
}

/// Parse a price cell: trimmed, optional leading `$`, finite number
pub fn parse_price(value: &str) -> Option<f64> {
    let number = strip_price_prefix(value.trim()).trim();
    if number.is_empty() {
        return None;
    }
    number.parse::<f64>().ok().filter(|p| p.is_finite())
}

/// Check the amount rule: trimmed value is one or more ASCII digits
pub fn is_amount_text(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit())
}

/// Parse an amount cell into an integer quantity
///
/// Returns `None` for text that fails the amount rule or overflows.
pub fn parse_amount(value: &str) -> Option<u32> {
    if !is_amount_text(value) {
        return None;
    }
    value.trim().parse().ok()
}

/// Validate a cell value for its column
pub fn is_valid_cell(value: &str, col: usize) -> bool {
    match Column::from_index(col) {
        Some(Column::Name) => !value.trim().is_empty(),
        Some(Column::Description) => true,
        Some(Column::Price) => parse_price(value).is_some(),
        Some(Column::Amount) => parse_amount(value).is_some(),
        None => false,
    }
}

/// Render a stored price for display, e.g. `2.5` -> `$2.50`
///
/// Only a plain number is formatted; anything else is shown unchanged.
pub fn format_price(value: &str) -> String {
    let trimmed = value.trim();
    match trimmed.parse::<f64>() {
        Ok(price) if !trimmed.is_empty() && price.is_finite() => format!("${:.2}", price),
        _ => value.to_string(),
    }
}

/// Render a price number the way it is stored in a cell
pub fn price_to_text(price: f64) -> String {
    format!("{}", price)
}
