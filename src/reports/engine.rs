//! Report engine
//!
//! Pure aggregations over a snapshot of expense records. Nothing here touches
//! storage or mutates its input, so calling a function twice on the same
//! slice always gives the same answer.

use std::collections::BTreeMap;

use crate::models::{ExpenseRecord, Money, Month};

/// A category together with its summed spending
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Money,
}

/// Sum of all amounts; zero for an empty slice
pub fn total(records: &[ExpenseRecord]) -> Money {
    records.iter().map(|r| r.amount).sum()
}

/// Spending grouped by exact category string
///
/// Only categories present in `records` get an entry. Keys iterate in
/// lexicographic order.
pub fn by_category(records: &[ExpenseRecord]) -> BTreeMap<String, Money> {
    let mut totals: BTreeMap<String, Money> = BTreeMap::new();
    for record in records {
        *totals.entry(record.category.clone()).or_default() += record.amount;
    }
    totals
}

/// Spending grouped by calendar month, oldest month first
pub fn by_month(records: &[ExpenseRecord]) -> BTreeMap<Month, Money> {
    let mut totals: BTreeMap<Month, Money> = BTreeMap::new();
    for record in records {
        *totals.entry(Month::of(record.date)).or_default() += record.amount;
    }
    totals
}

/// The category with the highest summed spending
///
/// Returns `None` when there are no records. On a tie the first category
/// reaching the maximum in [`by_category`] order wins, which is the
/// lexicographically smallest name.
pub fn top_category(records: &[ExpenseRecord]) -> Option<CategoryTotal> {
    top_of(&by_category(records))
}

pub(crate) fn top_of(totals: &BTreeMap<String, Money>) -> Option<CategoryTotal> {
    let mut best: Option<(&String, Money)> = None;
    for (category, amount) in totals {
        match best {
            Some((_, max)) if *amount <= max => {}
            _ => best = Some((category, *amount)),
        }
    }
    best.map(|(category, total)| CategoryTotal {
        category: category.clone(),
        total,
    })
}
