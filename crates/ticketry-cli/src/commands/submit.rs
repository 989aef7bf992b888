//! State-changing commands.

use super::{CliError, Context};
use crate::output;
use ticketry_canonical::{Bytes32, Hash32, Identity};
use ticketry_core::{NewPromoter, NewUser, NewVenue, NoncePolicy, RecoverableSignature};
use ticketry_store::{Call, Ledger, LedgerOptions};

pub fn init(ctx: &Context, admin: Identity, static_nonce: bool) -> Result<(), CliError> {
    let options = LedgerOptions {
        nonce_policy: if static_nonce {
            NoncePolicy::Static
        } else {
            NoncePolicy::PerAccount
        },
        ..ctx.options
    };
    let ledger = Ledger::create(&ctx.journal, admin, options)?;
    if ctx.json {
        println!(
            "{}",
            serde_json::json!({
                "admin": admin,
                "nonce_policy": ledger.nonce_policy(),
                "tx_id": ledger.head(),
            })
        );
    } else {
        println!("initialized {} (admin {})", ctx.journal.display(), admin);
    }
    ledger.close()?;
    Ok(())
}

fn submit(ctx: &Context, call: Call) -> Result<(), CliError> {
    let caller = ctx.caller()?;
    let mut ledger = ctx.open()?;
    let receipt = ledger.submit(caller, call)?;
    output::print_receipt(&receipt, ctx.json)?;
    ledger.close()?;
    Ok(())
}

pub fn add_user(ctx: &Context, user: NewUser) -> Result<(), CliError> {
    submit(ctx, Call::AddUser(user))
}

pub fn add_promoter(ctx: &Context, promoter: NewPromoter) -> Result<(), CliError> {
    submit(ctx, Call::AddPromoter(promoter))
}

pub fn login(
    ctx: &Context,
    claimed_slot: u64,
    signature: RecoverableSignature,
    digest: Hash32,
) -> Result<(), CliError> {
    submit(
        ctx,
        Call::Login {
            claimed_slot,
            signature,
            digest,
        },
    )
}

pub fn add_venue(ctx: &Context, venue: NewVenue) -> Result<(), CliError> {
    submit(ctx, Call::AddVenue(venue))
}

pub fn remove_venue(ctx: &Context, name: Bytes32) -> Result<(), CliError> {
    submit(ctx, Call::RemoveVenue { name })
}
