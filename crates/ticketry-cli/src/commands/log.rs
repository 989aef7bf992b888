//! Log command implementation.

use super::{CliError, Context};
use crate::output;
use ticketry_store::{
    AndFilter, CallKindFilter, CallerFilter, FilteredReader, JournalBackendReader, StoreReader,
    TxFilter, CALL_KINDS,
};

pub fn run(ctx: &Context, kind: Option<String>, max_events: Option<u64>) -> Result<(), CliError> {
    let mut filters: Vec<Box<dyn TxFilter>> = Vec::new();
    if let Some(kind) = kind {
        if !CALL_KINDS.contains(&kind.as_str()) {
            return Err(CliError::Invalid(format!(
                "unknown call kind '{}' (expected one of: {})",
                kind,
                CALL_KINDS.join(", ")
            )));
        }
        filters.push(Box::new(CallKindFilter { kind }));
    }
    if let Some(caller) = ctx.caller {
        filters.push(Box::new(CallerFilter { caller }));
    }

    let reader = JournalBackendReader::open(&ctx.journal, ctx.options.read_mode).map_err(|e| {
        CliError::Open {
            path: ctx.journal.display().to_string(),
            reason: e.to_string(),
        }
    })?;
    let mut reader = FilteredReader::new(reader, AndFilter { filters });

    if !ctx.json {
        output::print_table_header();
    }

    let mut count: u64 = 0;
    while let Some(entry) = reader.read_next()? {
        if let Some(max) = max_events {
            if count >= max {
                break;
            }
        }
        if ctx.json {
            println!("{}", serde_json::to_string(&entry)?);
        } else {
            println!("{}", output::format_table_row(&entry));
        }
        count += 1;
    }

    Ok(())
}
