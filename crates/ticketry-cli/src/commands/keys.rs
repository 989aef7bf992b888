//! Key helpers for local testing. Built only with the `dev-tools` feature.

use super::{CliError, Context};
use ticketry_canonical::Hash32;
use ticketry_core::{identity_of, sign_message_digest, signing_key_from_bytes, signing_key_from_seed};

pub fn keygen(ctx: &Context, seed: String) -> Result<(), CliError> {
    let key = signing_key_from_seed(seed.as_bytes())?;
    let identity = identity_of(key.verifying_key());
    let secret = hex::encode(key.to_bytes());
    if ctx.json {
        println!(
            "{}",
            serde_json::json!({ "identity": identity, "secret": secret })
        );
    } else {
        println!("identity {}", identity);
        println!("secret   {}", secret);
    }
    Ok(())
}

pub fn sign(ctx: &Context, key: String, digest: Hash32) -> Result<(), CliError> {
    let secret = hex::decode(key.trim_start_matches("0x"))
        .map_err(|e| CliError::Invalid(format!("invalid key hex: {}", e)))?;
    let key = signing_key_from_bytes(&secret)?;
    let signature = sign_message_digest(&key, &digest)?;
    if ctx.json {
        println!("{}", serde_json::to_string(&signature)?);
    } else {
        println!("--v {} --r {} --s {}", signature.v, signature.r, signature.s);
    }
    Ok(())
}
