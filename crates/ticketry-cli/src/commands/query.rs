//! Read-only commands. None of them write to the journal.

use super::{CliError, Context};
use crate::output;
use ticketry_canonical::{Bytes32, Identity};

pub fn user_exists(ctx: &Context, identity: Identity) -> Result<(), CliError> {
    output::print_bool(ctx.open()?.user_exists(&identity), ctx.json);
    Ok(())
}

pub fn promoter_exists(ctx: &Context, identity: Identity) -> Result<(), CliError> {
    output::print_bool(ctx.open()?.promoter_exists(&identity), ctx.json);
    Ok(())
}

pub fn user(ctx: &Context, identity: Identity) -> Result<(), CliError> {
    let ledger = ctx.open()?;
    let record = ledger
        .get_user(&identity)
        .ok_or_else(|| CliError::Invalid(format!("{} is not registered", identity)))?;
    println!("{}", output::format_json(&serde_json::to_value(record)?, ctx.json));
    Ok(())
}

pub fn venue_exists(ctx: &Context, name: Bytes32) -> Result<(), CliError> {
    output::print_bool(ctx.open()?.venue_exists(&name), ctx.json);
    Ok(())
}

pub fn venue(ctx: &Context, name: Bytes32) -> Result<(), CliError> {
    let ledger = ctx.open()?;
    let record = ledger.get_venue(&name).map_err(CliError::Query)?;
    println!("{}", output::format_json(&serde_json::to_value(record)?, ctx.json));
    Ok(())
}

pub fn venues(ctx: &Context) -> Result<(), CliError> {
    let ledger = ctx.open()?;
    if ctx.json {
        println!("{}", serde_json::to_string(&ledger.venue_records())?);
    } else {
        for name in ledger.get_venues() {
            println!("{}", name);
        }
    }
    Ok(())
}

pub fn challenge(ctx: &Context, identity: Identity) -> Result<(), CliError> {
    let ledger = ctx.open()?;
    let digest = ledger
        .login_challenge(&identity)
        .ok_or_else(|| CliError::Invalid(format!("{} is not registered", identity)))?;
    if ctx.json {
        println!(
            "{}",
            serde_json::json!({
                "identity": identity,
                "nonce_policy": ledger.nonce_policy(),
                "digest": digest,
            })
        );
    } else {
        println!("{}", digest);
    }
    Ok(())
}
