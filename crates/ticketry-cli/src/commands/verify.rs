//! Verify command implementation.

use super::{CliError, Context};
use serde_json::json;

/// Replays the ledger, which checks every transaction ID, the hash chain and
/// each call, then checks the venue index.
pub fn run(ctx: &Context) -> Result<(), CliError> {
    let ledger = ctx.open()?;
    let index = ledger.verify_index();

    if ctx.json {
        println!(
            "{}",
            json!({
                "transactions": ledger.height(),
                "head": ledger.head(),
                "users": ledger.users().len(),
                "venues": ledger.venue_count(),
                "index_ok": index.is_ok(),
            })
        );
    } else {
        println!("{:<14} {}", "TRANSACTIONS", ledger.height());
        println!("{:<14} {}", "USERS", ledger.users().len());
        println!("{:<14} {}", "VENUES", ledger.venue_count());
        println!(
            "{:<14} {}",
            "HEAD",
            ledger.head().map(|d| d.to_string()).unwrap_or_default()
        );
        println!("{:<14} {}", "VERDICT", if index.is_ok() { "ok" } else { "invalid" });
    }

    index.map_err(|e| CliError::Invalid(format!("venue index inconsistent: {}", e)))
}
