use rust_decimal::Decimal;
use rusty_money::{iso::Currency, Money};

/// Render an amount in the given currency, e.g. `$1,234.50`.
///
/// Display only; stored prices are never rounded.
pub fn format_price(price: Decimal, currency: &Currency) -> String {
    Money::from_decimal(price, currency).to_string()
}
