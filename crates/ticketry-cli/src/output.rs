//! Output formatting utilities.

use serde_json::Value;
use ticketry_store::Receipt;

/// Formats a value as JSON: compact for `--json`, pretty otherwise.
pub fn format_json(value: &Value, compact: bool) -> String {
    let text = if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    };
    text.unwrap_or_else(|_| "{}".to_string())
}

/// Prints a boolean query result.
pub fn print_bool(value: bool, json: bool) {
    if json {
        println!("{}", serde_json::json!({ "result": value }));
    } else {
        println!("{}", value);
    }
}

/// Prints the receipt of an accepted call.
pub fn print_receipt(receipt: &Receipt, json: bool) -> Result<(), serde_json::Error> {
    if json {
        println!("{}", serde_json::to_string(receipt)?);
    } else {
        println!(
            "{} accepted at height {} ({})",
            receipt.call, receipt.height, receipt.tx_id
        );
    }
    Ok(())
}

/// Formats a transaction entry as a table row.
pub fn format_table_row(entry: &Value) -> String {
    let tx_id = entry
        .get("tx_id")
        .and_then(|v| v.get("b64"))
        .and_then(|v| v.as_str())
        .unwrap_or("?");
    let height = entry
        .get("height")
        .and_then(|v| v.as_u64())
        .map(|h| h.to_string())
        .unwrap_or_else(|| "?".to_string());
    let call = entry
        .get("call")
        .and_then(|v| v.get("call"))
        .and_then(|v| v.as_str())
        .unwrap_or("?");
    let caller = entry.get("caller").and_then(|v| v.as_str()).unwrap_or("?");

    format!(
        "{:<8} {:<44} {:<14} {}",
        height,
        truncate(tx_id, 44),
        call,
        caller
    )
}

/// Prints table header.
#[allow(clippy::print_literal)]
pub fn print_table_header() {
    println!(
        "{:<8} {:<44} {:<14} {}",
        "HEIGHT", "TX_ID", "CALL", "CALLER"
    );
    println!("{}", "-".repeat(110));
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len.saturating_sub(3)])
    }
}
