//! Balance sheets: net wallet amount per currency within one legal entity.
//!
//! Aggregation runs in three steps over a snapshot of wallet entries:
//!
//! 1. keep the entries owned by the scope (unowned entries are dropped);
//! 2. group them by currency code, compared byte for byte;
//! 3. sum each group after truncating every amount to an integer.
//!
//! The truncation happens per entry, before the sum: `1.9 + 2.9` yields `3`,
//! not `4`. Fractional parts never reach a balance sheet.

use std::collections::BTreeMap;

use rust_decimal::{Decimal, prelude::ToPrimitive};

use crate::WalletEntry;

/// Net amount held in one currency.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Balance {
    pub currency_code: String,
    pub amount: Decimal,
}

/// One [`Balance`] per currency, ordered by currency code.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BalanceSheet {
    balances: Vec<Balance>,
}

impl BalanceSheet {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn balances(&self) -> &[Balance] {
        &self.balances
    }

    pub fn into_balances(self) -> Vec<Balance> {
        self.balances
    }

    pub fn is_empty(&self) -> bool {
        self.balances.is_empty()
    }

    pub fn len(&self) -> usize {
        self.balances.len()
    }

    /// Net amount for `currency_code`, if the sheet has a line for it.
    pub fn amount_of(&self, currency_code: &str) -> Option<Decimal> {
        self.balances
            .iter()
            .find(|balance| balance.currency_code == currency_code)
            .map(|balance| balance.amount)
    }
}

/// Drops the fractional part of `amount`, rounding toward zero.
///
/// Fractions of a negative unit give a plain zero, never `-0`.
pub fn truncate_to_integer(amount: Decimal) -> Decimal {
    let truncated = amount.trunc();
    if truncated.is_zero() {
        Decimal::ZERO
    } else {
        truncated
    }
}

/// Builds the balance sheet of `scope` from a snapshot of wallet entries.
///
/// Never fails: an empty snapshot, a scope nobody owns or a snapshot of
/// unowned entries all give an empty sheet. Currencies netting to zero keep
/// their line.
///
/// Truncated amounts are summed as `i128`, so the result does not depend on
/// the order of the entries. A total outside the `Decimal` range is clamped to
/// `Decimal::MAX` or `Decimal::MIN` with a warning.
pub fn aggregate(entries: &[WalletEntry], scope: &str) -> BalanceSheet {
    let mut totals: BTreeMap<&str, i128> = BTreeMap::new();

    for entry in entries {
        let Some(legal_entity) = entry.owner_legal_entity() else {
            tracing::debug!(wallet_id = %entry.id, "skipping wallet entry with unresolvable owner");
            continue;
        };
        if legal_entity != scope {
            continue;
        }

        // An integral Decimal always fits: its mantissa is 96 bits.
        let Some(units) = truncate_to_integer(entry.amount).to_i128() else {
            tracing::warn!(wallet_id = %entry.id, "skipping wallet entry with unrepresentable amount");
            continue;
        };
        let total = totals.entry(entry.currency_code.as_str()).or_insert(0);
        *total = total.saturating_add(units);
    }

    BalanceSheet {
        balances: totals
            .into_iter()
            .map(|(currency_code, total)| Balance {
                currency_code: currency_code.to_string(),
                amount: to_decimal(currency_code, total),
            })
            .collect(),
    }
}

fn to_decimal(currency_code: &str, total: i128) -> Decimal {
    Decimal::try_from_i128_with_scale(total, 0).unwrap_or_else(|_| {
        tracing::warn!(currency_code, "balance out of range, clamped");
        if total.is_negative() {
            Decimal::MIN
        } else {
            Decimal::MAX
        }
    })
}
