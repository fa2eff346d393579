//! Pure settlement derivations: party resolution, tab partitioning, totals
//! and the pending-balance display rule.

use std::collections::HashMap;

use chrono::Utc;

use crate::api::payloads::{NewPersonalTransaction, PersonalTransactionPatch};
use crate::core::models::{Partner, PaymentMethod};
use crate::core::settlement::{
    SettlementTab, display_party, partition_by_closure, partner_settlement_transactions,
    pending_balance_display, settlement_tab, total_collected,
};
use crate::tests::{company_tx, dec, personal_tx};

fn partner(id: i64, name: &str) -> Partner {
    Partner {
        id,
        name: name.to_string(),
        email: None,
        transaction_count: 0,
        transaction_total_amount: None,
    }
}

#[test]
fn party_name_wins_over_partner_lookup() {
    let mut tx = company_tx(1, false, false);
    tx.person = Some(5);
    tx.person_name = Some("Acme".to_string());
    // Partner 5 exists under a different name; the denormalized name wins.
    let partners = vec![partner(5, "Bob")];
    assert_eq!(display_party(&tx, &partners), "Acme");
}

#[test]
fn party_falls_back_to_partner_lookup_by_id() {
    let mut tx = company_tx(1, false, false);
    tx.person = Some(5);
    let partners = vec![partner(4, "Alice"), partner(5, "Bob")];
    assert_eq!(display_party(&tx, &partners), "Bob");
}

#[test]
fn party_falls_back_to_notes_then_unknown() {
    let mut tx = company_tx(1, false, false);
    tx.notes = Some("office rent".to_string());
    assert_eq!(display_party(&tx, &[]), "office rent");

    tx.notes = None;
    assert_eq!(display_party(&tx, &[]), "Unknown");
}

#[test]
fn blank_person_name_is_treated_as_absent() {
    let mut tx = company_tx(1, false, false);
    tx.person = Some(5);
    tx.person_name = Some("   ".to_string());
    let partners = vec![partner(5, "Bob")];
    assert_eq!(display_party(&tx, &partners), "Bob");
}

#[test]
fn unknown_person_id_skips_to_notes() {
    let mut tx = company_tx(1, false, false);
    tx.person = Some(99);
    tx.notes = Some("consulting".to_string());
    assert_eq!(display_party(&tx, &[partner(5, "Bob")]), "consulting");
}

#[test]
fn settlement_view_excludes_unsplit_transactions() {
    let mut split_open = company_tx(1, true, false);
    split_open.person = Some(5);
    let mut split_closed = company_tx(2, true, true);
    split_closed.person = Some(5);
    let mut unsplit = company_tx(3, false, false);
    unsplit.person = Some(5);
    let mut other_partner = company_tx(4, true, false);
    other_partner.person = Some(6);

    let txs = vec![split_open, split_closed, unsplit, other_partner];
    let view = partner_settlement_transactions(&txs, 5);
    let ids: Vec<i64> = view.iter().map(|tx| tx.id).collect();
    assert_eq!(ids, vec![1, 2]);
}

#[test]
fn tabs_partition_partner_view_by_closure() {
    let mut open = company_tx(1, true, false);
    open.person = Some(5);
    let mut closed = company_tx(2, true, true);
    closed.person = Some(5);
    let txs = vec![open, closed];

    let new_tab = settlement_tab(&txs, 5, SettlementTab::New);
    let done_tab = settlement_tab(&txs, 5, SettlementTab::Completed);
    assert_eq!(new_tab.iter().map(|t| t.id).collect::<Vec<_>>(), vec![1]);
    assert_eq!(done_tab.iter().map(|t| t.id).collect::<Vec<_>>(), vec![2]);
}

#[test]
fn partition_is_disjoint_and_covers_input() {
    let parents: HashMap<i64, _> = [
        (10, company_tx(10, true, false)),
        (20, company_tx(20, true, true)),
        (30, company_tx(30, true, false)),
    ]
    .into_iter()
    .collect();

    let entries = vec![
        personal_tx(1, 10, "25.00"),
        personal_tx(2, 20, "40.00"),
        personal_tx(3, 30, "10.00"),
        personal_tx(4, 20, "60.00"),
        personal_tx(5, 10, "5.00"),
    ];

    let (new, completed) = partition_by_closure(&entries, &parents);

    let new_ids: Vec<i64> = new.iter().map(|e| e.id).collect();
    let done_ids: Vec<i64> = completed.iter().map(|e| e.id).collect();
    assert_eq!(new_ids, vec![1, 3, 5]);
    assert_eq!(done_ids, vec![2, 4]);
    assert_eq!(new.len() + completed.len(), entries.len());
    assert!(new_ids.iter().all(|id| !done_ids.contains(id)));
}

#[test]
fn orphaned_entries_count_as_outstanding() {
    let parents = HashMap::new();
    let entries = vec![personal_tx(1, 999, "25.00")];
    let (new, completed) = partition_by_closure(&entries, &parents);
    assert_eq!(new.len(), 1);
    assert!(completed.is_empty());
}

#[test]
fn total_collected_sums_decimal_amounts() {
    let entries = vec![
        personal_tx(1, 10, "25.50"),
        personal_tx(2, 10, "40.25"),
        personal_tx(3, 10, "0.25"),
    ];
    assert_eq!(total_collected(&entries), dec("66.00"));
    assert_eq!(total_collected(&[]), dec("0"));
}

#[test]
fn pending_balance_shown_only_when_positive() {
    let mut entry = personal_tx(1, 10, "25.00");
    assert_eq!(pending_balance_display(&entry), None);

    entry.pending_balance = Some(dec("0.00"));
    assert_eq!(pending_balance_display(&entry), None);

    entry.pending_balance = Some(dec("12.50"));
    assert_eq!(pending_balance_display(&entry), Some(dec("12.50")));
}

#[test]
fn new_payment_defaults_payment_date_to_now() {
    let before = Utc::now();
    let payload = NewPersonalTransaction::new(dec("40.00"), PaymentMethod::Online, None);
    let after = Utc::now();
    assert!(payload.payment_date >= before && payload.payment_date <= after);
}

#[test]
fn patch_without_payment_date_leaves_it_out_of_the_body() {
    let patch = PersonalTransactionPatch {
        amount: Some(dec("55.00")),
        notes: Some("second installment".to_string()),
        ..Default::default()
    };
    let body = serde_json::to_value(&patch).unwrap();
    let object = body.as_object().unwrap();
    assert!(!object.contains_key("payment_date"));
    assert!(!object.contains_key("payment_method"));
    // Amounts travel as strings, as everywhere else on the wire.
    assert_eq!(object["amount"], serde_json::json!("55.00"));
}
