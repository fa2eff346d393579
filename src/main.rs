use std::env;

use ledgerdesk::api::payloads::CompanyTransactionFilter;
use ledgerdesk::core::settlement;
use ledgerdesk::{ApiClient, Config};
use tracing::{info, warn};

/// Small end-to-end driver: restore or open a session, then print the partner
/// roster and the current month's ledger with resolved party names.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env();
    tracing_subscriber::fmt()
        .with_env_filter(config.log_level.clone())
        .init();

    let client = ApiClient::new(config);

    if client.restore_session().await? {
        info!("restored previous session");
    } else {
        let identifier = env::var("LEDGERDESK_IDENTIFIER")?;
        let password = env::var("LEDGERDESK_PASSWORD")?;
        let remember = env::var("LEDGERDESK_REMEMBER")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        let user = client.login(&identifier, &password, remember).await?;
        info!("logged in as {}", user.name);
    }

    let partner_list = client.list_partners().await?;
    println!("Partners ({}):", partner_list.partners.len());
    for partner in &partner_list.partners {
        println!(
            "  {:>4}  {:<24} {:>4} txs  total {}",
            partner.id,
            partner.name,
            partner.transaction_count,
            partner
                .transaction_total_amount
                .map(|a| a.to_string())
                .unwrap_or_else(|| "-".to_string()),
        );
    }

    let now = chrono::Utc::now();
    use chrono::Datelike;
    let filter = CompanyTransactionFilter {
        month: Some(now.month()),
        year: Some(now.year()),
        ..Default::default()
    };
    let page = client.list_company_transactions(&filter).await?;
    println!("\nCompany ledger, {}-{:02} ({} total):", now.year(), now.month(), page.count);
    for tx in &page.results {
        let party = settlement::display_party(tx, &partner_list.partners);
        let state = if !tx.is_split() {
            String::new()
        } else if tx.is_closed {
            "  [settled]".to_string()
        } else {
            match tx.remaining_amount {
                Some(remaining) => format!("  [open, {remaining} remaining]"),
                None => "  [open]".to_string(),
            }
        };
        println!(
            "  #{:<5} {:<8} {:>12}  {:<24}{}",
            tx.id,
            tx.transaction_type.as_str(),
            tx.amount,
            party,
            state,
        );
    }

    // Show the settlement breakdown for the first open split entry, the same
    // parent+children fetch a detail view refreshes after every payment write.
    if let Some(split_tx) = page.results.iter().find(|tx| tx.is_split() && !tx.is_closed) {
        match client.settlement_detail(split_tx.id).await {
            Ok(detail) => {
                println!("\nSettlement of #{}:", detail.details.id);
                for entry in &detail.data {
                    let pending = settlement::pending_balance_display(entry)
                        .map(|b| format!("  pending {b}"))
                        .unwrap_or_default();
                    println!(
                        "  {:<20} {:>10} via {}{}",
                        entry.user,
                        entry.amount,
                        entry.payment_method.as_str(),
                        pending,
                    );
                }
                println!("  collected: {}", settlement::total_collected(&detail.data));
            }
            Err(err) => warn!("could not fetch settlement detail: {err}"),
        }
    }

    Ok(())
}
