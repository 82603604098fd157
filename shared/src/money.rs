//! Minor-unit money helpers
//!
//! All amounts are integer minor currency units (cents). Arithmetic
//! stays in integers end to end; the two-decimal display string is
//! produced by fixed-point formatting, never by accumulating floats.

use crate::models::LineItem;

/// Currency symbol used by display formatting
pub const CURRENCY_SYMBOL: &str = "¥";

/// Line subtotal in minor units
pub fn line_subtotal(unit_price: i64, quantity: u32) -> i64 {
    unit_price * i64::from(quantity)
}

/// Exact integer total over cart lines, in minor units
pub fn cart_total<'a>(items: impl IntoIterator<Item = &'a LineItem>) -> i64 {
    items
        .into_iter()
        .map(|item| line_subtotal(item.unit_price, item.quantity))
        .sum()
}

/// Format a minor-unit amount as a two-decimal string ("28.00")
///
/// Exact fixed-point conversion; negative amounts keep a single
/// leading sign.
pub fn format_minor(amount: i64) -> String {
    let sign = if amount < 0 { "-" } else { "" };
    let abs = amount.unsigned_abs();
    format!("{}{}.{:02}", sign, abs / 100, abs % 100)
}

/// Format a minor-unit amount with the currency symbol ("¥28.00")
pub fn format_price(amount: i64) -> String {
    format!("{}{}", CURRENCY_SYMBOL, format_minor(amount))
}
