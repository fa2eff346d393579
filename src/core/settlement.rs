//! Derived views over split company transactions and their partner payments.
//!
//! Everything here is pure: server-authoritative fields (`is_closed`,
//! `pending_balance`, the split aggregates) are read, never recomputed.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::core::models::{CompanyTransaction, Partner, PersonalTransaction};

/// Detail-view tabs partitioning settlements by the parent's closure flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SettlementTab {
    /// Parent transaction still collecting (`!is_closed`).
    New,
    /// Parent transaction fully collected (`is_closed`).
    Completed,
}

/// Resolve the display name of the party a transaction was paid by/to.
///
/// Resolution order is fixed: the denormalized `person_name`, then a partner
/// lookup by `person` id, then free-text `notes`, then `"Unknown"`. The API
/// may send a name, only an id, or neither; blank strings count as absent.
pub fn display_party(tx: &CompanyTransaction, partners: &[Partner]) -> String {
    if let Some(name) = non_blank(tx.person_name.as_deref()) {
        return name.to_string();
    }
    if let Some(person_id) = tx.person {
        if let Some(partner) = partners.iter().find(|p| p.id == person_id) {
            return partner.name.clone();
        }
    }
    if let Some(notes) = non_blank(tx.notes.as_deref()) {
        return notes.to_string();
    }
    "Unknown".to_string()
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Sum of partner payments recorded against a transaction.
///
/// Display only. Closure of the parent is decided by the server from its own
/// aggregates, never from this sum.
pub fn total_collected(entries: &[PersonalTransaction]) -> Decimal {
    entries.iter().map(|e| e.amount).sum()
}

/// The transactions that belong in a partner's settlement view: the partner
/// is the `person` and the amount is flagged for splitting. Entries not
/// flagged for splitting never appear, whatever their closure state.
pub fn partner_settlement_transactions<'a>(
    txs: &'a [CompanyTransaction],
    partner_id: i64,
) -> Vec<&'a CompanyTransaction> {
    txs.iter()
        .filter(|tx| tx.person == Some(partner_id) && tx.is_split())
        .collect()
}

/// Filter a partner's settlement transactions into one tab.
pub fn settlement_tab<'a>(
    txs: &'a [CompanyTransaction],
    partner_id: i64,
    tab: SettlementTab,
) -> Vec<&'a CompanyTransaction> {
    partner_settlement_transactions(txs, partner_id)
        .into_iter()
        .filter(|tx| match tab {
            SettlementTab::New => !tx.is_closed,
            SettlementTab::Completed => tx.is_closed,
        })
        .collect()
}

/// Partition partner payments by the closure flag of their parent transaction
/// into `(new, completed)`. The two sets are disjoint and cover every entry
/// whose parent is present in `parents`; orphans (no parent supplied) land in
/// the `new` set so a stale view errs toward showing work as outstanding.
pub fn partition_by_closure<'a>(
    entries: &'a [PersonalTransaction],
    parents: &HashMap<i64, CompanyTransaction>,
) -> (Vec<&'a PersonalTransaction>, Vec<&'a PersonalTransaction>) {
    entries.iter().partition(|entry| {
        parents
            .get(&entry.transaction)
            .map(|parent| !parent.is_closed)
            .unwrap_or(true)
    })
}

/// The balance warning to render for a payment entry, if any.
///
/// Absent or zero pending balance means no warning; a positive balance is
/// rendered distinctly from the paid amount, never merged into it.
pub fn pending_balance_display(entry: &PersonalTransaction) -> Option<Decimal> {
    entry
        .pending_balance
        .filter(|balance| *balance > Decimal::ZERO)
}
