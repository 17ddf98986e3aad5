//! Currency codes and per-product price tables.
//!
//! Prices are merchant-entered per currency. There is no exchange-rate
//! system anywhere in LaunchPay: a [`PriceTable`] is a lookup table, and a
//! currency the merchant never priced falls back to `usd`, then to zero.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A lowercase currency code (e.g. `usd`, `eur`).
///
/// Construction normalizes: surrounding whitespace is trimmed and the code
/// is lowercased, so `"USD"` and `"usd "` compare equal. Deserialization
/// goes through the same normalization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Create a normalized currency code.
    #[must_use]
    pub fn new(code: &str) -> Self {
        Self(code.trim().to_lowercase())
    }

    /// The fallback currency.
    #[must_use]
    pub fn usd() -> Self {
        Self("usd".to_owned())
    }

    /// Get the normalized code.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Display symbol for well-known currencies.
    #[must_use]
    pub fn symbol(&self) -> Option<&'static str> {
        match self.0.as_str() {
            "usd" | "cad" | "aud" => Some("$"),
            "eur" => Some("\u{20ac}"),
            "gbp" => Some("\u{a3}"),
            _ => None,
        }
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self::usd()
    }
}

impl std::fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for CurrencyCode {
    fn from(code: String) -> Self {
        Self::new(&code)
    }
}

impl From<&str> for CurrencyCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.0
    }
}

/// Per-product map from currency code to merchant-entered price.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceTable(BTreeMap<CurrencyCode, Decimal>);

impl PriceTable {
    /// Create an empty price table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the price for a currency.
    pub fn set(&mut self, currency: CurrencyCode, amount: Decimal) {
        self.0.insert(currency, amount);
    }

    /// Get the exact entry for a currency, without fallback.
    #[must_use]
    pub fn get(&self, currency: &CurrencyCode) -> Option<Decimal> {
        self.0.get(currency).copied()
    }

    /// Whether the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Resolve the price for `currency`.
    ///
    /// A missing entry falls back to `usd`; a missing `usd` entry falls
    /// back to zero. Resolution never fails - zero means "not priced" and
    /// blocks publish downstream.
    #[must_use]
    pub fn resolve(&self, currency: &CurrencyCode) -> Decimal {
        self.0
            .get(currency)
            .or_else(|| self.0.get(&CurrencyCode::usd()))
            .copied()
            .unwrap_or(Decimal::ZERO)
    }
}

impl FromIterator<(CurrencyCode, Decimal)> for PriceTable {
    fn from_iter<I: IntoIterator<Item = (CurrencyCode, Decimal)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usd_only(cents: i64) -> PriceTable {
        PriceTable::from_iter([(CurrencyCode::usd(), Decimal::new(cents, 2))])
    }

    #[test]
    fn test_code_normalization() {
        assert_eq!(CurrencyCode::new(" USD "), CurrencyCode::usd());
        assert_eq!(CurrencyCode::new("Eur").as_str(), "eur");
    }

    #[test]
    fn test_deserialize_normalizes() {
        let code: CurrencyCode = serde_json::from_str("\"GBP\"").expect("deserialize");
        assert_eq!(code.as_str(), "gbp");
    }

    #[test]
    fn test_resolve_exact_match() {
        let mut table = usd_only(49_99);
        table.set(CurrencyCode::new("eur"), Decimal::new(45_00, 2));
        assert_eq!(
            table.resolve(&CurrencyCode::new("eur")),
            Decimal::new(45_00, 2)
        );
    }

    #[test]
    fn test_resolve_falls_back_to_usd() {
        // {usd: 49.99} with EUR requested resolves to the usd entry
        let table = usd_only(49_99);
        assert_eq!(
            table.resolve(&CurrencyCode::new("EUR")),
            Decimal::new(49_99, 2)
        );
    }

    #[test]
    fn test_resolve_empty_table_is_zero() {
        let table = PriceTable::new();
        assert_eq!(table.resolve(&CurrencyCode::new("eur")), Decimal::ZERO);
    }

    #[test]
    fn test_resolve_usd_exact() {
        let table = usd_only(12_34);
        assert_eq!(table.resolve(&CurrencyCode::usd()), Decimal::new(12_34, 2));
    }

    #[test]
    fn test_resolve_never_negative_for_entered_prices() {
        let table = usd_only(0);
        assert!(table.resolve(&CurrencyCode::new("jpy")) >= Decimal::ZERO);
    }
}
