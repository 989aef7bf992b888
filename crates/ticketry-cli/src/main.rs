//! Ticketry CLI - drive a registry ledger file from the command line.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use ticketry_canonical::{Bytes32, Hash32, Identity};
use ticketry_store::{LedgerOptions, ReadMode};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::{log, query, submit, verify, Context};

#[derive(Parser)]
#[command(name = "ticketry")]
#[command(about = "Ticketry identity and venue registry CLI")]
struct Cli {
    /// Path to the ledger journal
    #[arg(long, env = "TICKETRY_JOURNAL", global = true, default_value = "ticketry.tkj")]
    journal: PathBuf,
    /// Authenticated caller identity (0x-prefixed, 40 hex digits)
    #[arg(long, env = "TICKETRY_CALLER", global = true, value_parser = parse_identity)]
    caller: Option<Identity>,
    /// fsync after every appended transaction
    #[arg(long, global = true)]
    sync: bool,
    /// Ignore a truncated journal tail instead of failing
    #[arg(long, global = true)]
    permissive: bool,
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new ledger
    Init {
        /// Administrator identity
        #[arg(long, value_parser = parse_identity)]
        admin: Identity,
        /// Accept the bare login message and never consume nonces
        #[arg(long)]
        static_nonce: bool,
    },
    /// Register the caller as a user
    AddUser {
        /// Display name (at most 32 bytes)
        #[arg(long, value_parser = parse_label)]
        name: Bytes32,
        /// Age in years
        #[arg(long)]
        age: u32,
        /// Contact email (at most 32 bytes)
        #[arg(long, value_parser = parse_label)]
        email: Bytes32,
        /// Contact phone
        #[arg(long)]
        phone: String,
        /// Content hash of the profile photo
        #[arg(long)]
        photo_hash: String,
        /// Content hash of the voiceprint
        #[arg(long)]
        voiceprint_hash: String,
        /// Content hash of the faceprint
        #[arg(long)]
        faceprint_hash: String,
    },
    /// Register a promoter (administrator only)
    AddPromoter {
        /// Identity to register
        #[arg(value_parser = parse_identity)]
        identity: Identity,
        /// Display name (at most 32 bytes)
        #[arg(long, value_parser = parse_label)]
        name: Bytes32,
        /// Contact email (at most 32 bytes)
        #[arg(long, value_parser = parse_label)]
        email: Bytes32,
        /// Contact phone
        #[arg(long)]
        phone: String,
        /// Public website
        #[arg(long)]
        website: String,
        /// Content hash of the voiceprint
        #[arg(long)]
        voiceprint_hash: String,
        /// Content hash of the faceprint
        #[arg(long)]
        faceprint_hash: String,
    },
    /// Prove control of the caller identity with a signature
    Login {
        /// Identity slot named by the client (recorded, not checked)
        #[arg(long, default_value_t = 0)]
        slot: u64,
        /// Recovery id (0, 1, 27 or 28)
        #[arg(long)]
        v: u8,
        /// Signature r scalar (hex)
        #[arg(long, value_parser = parse_hash)]
        r: Hash32,
        /// Signature s scalar (hex)
        #[arg(long, value_parser = parse_hash)]
        s: Hash32,
        /// Message digest that was signed (hex)
        #[arg(long, value_parser = parse_hash)]
        digest: Hash32,
    },
    /// Register a venue (administrator only)
    AddVenue {
        /// Venue key (at most 32 bytes)
        #[arg(value_parser = parse_label)]
        name: Bytes32,
        /// Street address
        #[arg(long)]
        address: String,
        /// Seating capacity
        #[arg(long)]
        capacity: u32,
        /// Contact phone
        #[arg(long)]
        phone: String,
        /// Free-form description
        #[arg(long, default_value = "")]
        description: String,
        /// Public website
        #[arg(long, default_value = "")]
        website: String,
        /// Contact email
        #[arg(long, default_value = "")]
        email: String,
    },
    /// Remove a venue (administrator only)
    RemoveVenue {
        /// Venue key
        #[arg(value_parser = parse_label)]
        name: Bytes32,
    },
    /// Check whether an identity is registered
    UserExists {
        /// Identity to look up
        #[arg(value_parser = parse_identity)]
        identity: Identity,
    },
    /// Check whether an identity is a registered promoter
    PromoterExists {
        /// Identity to look up
        #[arg(value_parser = parse_identity)]
        identity: Identity,
    },
    /// Show the record of an identity
    User {
        /// Identity to look up
        #[arg(value_parser = parse_identity)]
        identity: Identity,
    },
    /// Check whether a venue exists
    VenueExists {
        /// Venue key
        #[arg(value_parser = parse_label)]
        name: Bytes32,
    },
    /// Show a venue
    Venue {
        /// Venue key
        #[arg(value_parser = parse_label)]
        name: Bytes32,
    },
    /// List live venues in index order
    Venues,
    /// Show the digest an identity must sign for its next login
    Challenge {
        /// Identity to look up
        #[arg(value_parser = parse_identity)]
        identity: Identity,
    },
    /// List journaled transactions (filtered by --caller when given)
    Log {
        /// Only show calls of this kind (e.g. add_venue)
        #[arg(long)]
        kind: Option<String>,
        /// Stop after N transactions (default: unlimited)
        #[arg(long)]
        max_events: Option<u64>,
    },
    /// Replay the ledger and check every transaction and the venue index
    Verify,
    /// Derive a deterministic key and print its identity
    #[cfg(feature = "dev-tools")]
    Keygen {
        /// Seed the secret key is derived from
        #[arg(long)]
        seed: String,
    },
    /// Sign a message digest with a secret key
    #[cfg(feature = "dev-tools")]
    Sign {
        /// Secret key (hex)
        #[arg(long)]
        key: String,
        /// Message digest (hex)
        #[arg(long, value_parser = parse_hash)]
        digest: Hash32,
    },
}

fn parse_identity(value: &str) -> Result<Identity, String> {
    Identity::parse(value).map_err(|e| e.to_string())
}

fn parse_label(value: &str) -> Result<Bytes32, String> {
    Bytes32::parse(value).map_err(|e| e.to_string())
}

fn parse_hash(value: &str) -> Result<Hash32, String> {
    Hash32::parse(value).map_err(|e| e.to_string())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    let ctx = Context {
        journal: cli.journal,
        caller: cli.caller,
        options: LedgerOptions {
            sync: cli.sync,
            read_mode: if cli.permissive {
                ReadMode::Permissive
            } else {
                ReadMode::Strict
            },
            ..LedgerOptions::default()
        },
        json: cli.json,
    };

    let result = match cli.command {
        Commands::Init {
            admin,
            static_nonce,
        } => submit::init(&ctx, admin, static_nonce),
        Commands::AddUser {
            name,
            age,
            email,
            phone,
            photo_hash,
            voiceprint_hash,
            faceprint_hash,
        } => submit::add_user(
            &ctx,
            ticketry_core::NewUser {
                display_name: name,
                age,
                email,
                phone,
                photo_hash,
                voiceprint_hash,
                faceprint_hash,
            },
        ),
        Commands::AddPromoter {
            identity,
            name,
            email,
            phone,
            website,
            voiceprint_hash,
            faceprint_hash,
        } => submit::add_promoter(
            &ctx,
            ticketry_core::NewPromoter {
                identity,
                display_name: name,
                email,
                phone,
                website,
                voiceprint_hash,
                faceprint_hash,
            },
        ),
        Commands::Login {
            slot,
            v,
            r,
            s,
            digest,
        } => submit::login(
            &ctx,
            slot,
            ticketry_core::RecoverableSignature { v, r, s },
            digest,
        ),
        Commands::AddVenue {
            name,
            address,
            capacity,
            phone,
            description,
            website,
            email,
        } => submit::add_venue(
            &ctx,
            ticketry_core::NewVenue {
                name,
                address,
                capacity,
                phone,
                description,
                website,
                email,
            },
        ),
        Commands::RemoveVenue { name } => submit::remove_venue(&ctx, name),
        Commands::UserExists { identity } => query::user_exists(&ctx, identity),
        Commands::PromoterExists { identity } => query::promoter_exists(&ctx, identity),
        Commands::User { identity } => query::user(&ctx, identity),
        Commands::VenueExists { name } => query::venue_exists(&ctx, name),
        Commands::Venue { name } => query::venue(&ctx, name),
        Commands::Venues => query::venues(&ctx),
        Commands::Challenge { identity } => query::challenge(&ctx, identity),
        Commands::Log { kind, max_events } => log::run(&ctx, kind, max_events),
        Commands::Verify => verify::run(&ctx),
        #[cfg(feature = "dev-tools")]
        Commands::Keygen { seed } => commands::keys::keygen(&ctx, seed),
        #[cfg(feature = "dev-tools")]
        Commands::Sign { key, digest } => commands::keys::sign(&ctx, key, digest),
    };

    if let Err(e) = result {
        match e.rejection() {
            Some(reason) => eprintln!("{}", reason),
            None => eprintln!("Error: {}", e),
        }
        std::process::exit(1);
    }
}
