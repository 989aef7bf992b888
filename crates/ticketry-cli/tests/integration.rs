//! Integration tests for CLI commands.

use std::path::Path;
use std::process::Command;
use tempfile::TempDir;
use ticketry_canonical::Identity;
use ticketry_core::{identity_of, sign_message_digest, signing_key_from_seed, SigningKey};

fn make_key(seed: &str) -> (SigningKey, Identity) {
    let key = signing_key_from_seed(seed.as_bytes()).unwrap();
    let identity = identity_of(key.verifying_key());
    (key, identity)
}

fn run_cli(journal: &Path, args: &[&str]) -> (bool, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_ticketry"))
        .arg("--journal")
        .arg(journal)
        .args(args)
        .env_remove("TICKETRY_CALLER")
        .env_remove("TICKETRY_JOURNAL")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute CLI");

    let stdout = String::from_utf8(output.stdout).unwrap();
    let stderr = String::from_utf8(output.stderr).unwrap();
    (output.status.success(), stdout, stderr)
}

fn init_ledger() -> (TempDir, std::path::PathBuf, String) {
    let temp_dir = TempDir::new().unwrap();
    let journal = temp_dir.path().join("registry.tkj");
    let admin = make_key("admin").1.to_string();
    let (success, stdout, _) = run_cli(&journal, &["init", "--admin", &admin]);
    assert!(success);
    assert!(stdout.contains("initialized"));
    (temp_dir, journal, admin)
}

fn add_user_args(caller: &str) -> Vec<String> {
    [
        "--caller",
        caller,
        "add-user",
        "--name",
        "Raul Ziranda Gonzalez",
        "--age",
        "29",
        "--email",
        "raulzi.dev@gmail.com",
        "--phone",
        "4341150678",
        "--photo-hash",
        "mtwirsqawjuoloq2gvtyug2tc3jbf5htm2zeo4rsknfiv3fdp46a",
        "--voiceprint-hash",
        "mtwirsqawjuoloq2gvtyug2tc3jbf5htm2zeo4rsknfiv3fdp46a",
        "--faceprint-hash",
        "QmTtDqWzo179ujTXU7pf2PodLNjpcpQQCXhkiQXi6wZvKd",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn add_venue_args<'a>(caller: &'a str, name: &'a str) -> Vec<&'a str> {
    vec![
        "--caller",
        caller,
        "add-venue",
        name,
        "--address",
        "Av. Paseo de la Reforma 50",
        "--capacity",
        "10000",
        "--phone",
        "5552809250",
    ]
}

fn as_strs(args: &[String]) -> Vec<&str> {
    args.iter().map(String::as_str).collect()
}

#[test]
fn test_init_refuses_existing_ledger() {
    let (_temp_dir, journal, admin) = init_ledger();
    let (success, _, stderr) = run_cli(&journal, &["init", "--admin", &admin]);
    assert!(!success);
    assert!(stderr.contains("already initialized"));
}

#[test]
fn test_user_registration_round_trip() {
    let (_temp_dir, journal, _) = init_ledger();
    let user = make_key("user").1.to_string();

    let (success, stdout, _) = run_cli(&journal, &as_strs(&add_user_args(&user)));
    assert!(success);
    assert!(stdout.contains("add_user accepted at height 1"));

    let (success, stdout, _) = run_cli(&journal, &["user-exists", &user]);
    assert!(success);
    assert_eq!(stdout.trim(), "true");

    let (success, stdout, _) = run_cli(&journal, &["promoter-exists", &user]);
    assert!(success);
    assert_eq!(stdout.trim(), "false");

    let (success, stdout, _) = run_cli(&journal, &["--json", "user", &user]);
    assert!(success);
    let record: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(record["display_name"], "Raul Ziranda Gonzalez");
    assert_eq!(record["role"], "user");

    let (success, _, stderr) = run_cli(&journal, &as_strs(&add_user_args(&user)));
    assert!(!success);
    assert_eq!(stderr.trim(), "User already registered");
}

#[test]
fn test_state_change_requires_caller() {
    let (_temp_dir, journal, _) = init_ledger();
    let (success, _, stderr) = run_cli(&journal, &["remove-venue", "Foro Sol"]);
    assert!(!success);
    assert!(stderr.contains("--caller"));
}

#[test]
fn test_venue_lifecycle() {
    let (_temp_dir, journal, admin) = init_ledger();
    let stranger = make_key("stranger").1.to_string();

    let (success, _, stderr) = run_cli(&journal, &["--caller", &admin, "remove-venue", "Foro Sol"]);
    assert!(!success);
    assert_eq!(stderr.trim(), "Empty list");

    let (success, _, stderr) = run_cli(&journal, &add_venue_args(&stranger, "Foro Sol"));
    assert!(!success);
    assert_eq!(stderr.trim(), "Caller is not admin");

    assert!(run_cli(&journal, &add_venue_args(&admin, "Auditorio Nacional")).0);
    assert!(run_cli(&journal, &add_venue_args(&admin, "Foro Sol")).0);

    let (success, _, stderr) = run_cli(&journal, &add_venue_args(&admin, "Foro Sol"));
    assert!(!success);
    assert_eq!(stderr.trim(), "Venue already exists");

    let (success, _, stderr) =
        run_cli(&journal, &["--caller", &admin, "remove-venue", "Arena CDMX"]);
    assert!(!success);
    assert_eq!(stderr.trim(), "Venue does not exists");

    assert!(run_cli(&journal, &["--caller", &admin, "remove-venue", "Auditorio Nacional"]).0);

    let (success, stdout, _) = run_cli(&journal, &["venues"]);
    assert!(success);
    assert_eq!(stdout.lines().collect::<Vec<_>>(), vec!["Foro Sol"]);

    let (success, stdout, _) = run_cli(&journal, &["venue-exists", "Auditorio Nacional"]);
    assert!(success);
    assert_eq!(stdout.trim(), "false");

    let (success, _, stderr) = run_cli(&journal, &["venue", "Auditorio Nacional"]);
    assert!(!success);
    assert_eq!(stderr.trim(), "Venue does not exists");

    let (success, stdout, _) = run_cli(&journal, &["--json", "venue", "Foro Sol"]);
    assert!(success);
    let record: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(record["capacity"], 10000);
    assert_eq!(record["exists"], true);
}

#[test]
fn test_login_with_challenge() {
    let (_temp_dir, journal, _) = init_ledger();
    let (user_key, user) = make_key("user");
    let user = user.to_string();
    assert!(run_cli(&journal, &as_strs(&add_user_args(&user))).0);

    let (success, stdout, _) = run_cli(&journal, &["challenge", &user]);
    assert!(success);
    let digest = ticketry_canonical::Hash32::parse(stdout.trim()).unwrap();
    let signature = sign_message_digest(&user_key, &digest).unwrap();
    let (v, r, s, d) = (
        signature.v.to_string(),
        signature.r.to_string(),
        signature.s.to_string(),
        digest.to_string(),
    );
    let login: [&str; 13] = [
        "--caller", &user, "login", "--slot", "1", "--v", &v, "--r", &r, "--s", &s, "--digest", &d,
    ];

    let (success, stdout, _) = run_cli(&journal, &login);
    assert!(success);
    assert!(stdout.contains("login accepted"));

    // The challenge was consumed.
    let (success, _, stderr) = run_cli(&journal, &login);
    assert!(!success);
    assert_eq!(stderr.trim(), "Login forbidden");
}

#[test]
fn test_log_and_verify() {
    let (_temp_dir, journal, admin) = init_ledger();
    let user = make_key("user").1.to_string();
    assert!(run_cli(&journal, &as_strs(&add_user_args(&user))).0);
    assert!(run_cli(&journal, &add_venue_args(&admin, "Foro Sol")).0);

    let (success, stdout, _) = run_cli(&journal, &["log"]);
    assert!(success);
    assert!(stdout.contains("HEIGHT"));
    assert!(stdout.contains("genesis"));
    assert!(stdout.contains("add_venue"));

    let (success, stdout, _) = run_cli(&journal, &["--json", "log", "--kind", "add_venue"]);
    assert!(success);
    let lines: Vec<&str> = stdout.lines().filter(|l| !l.is_empty()).collect();
    assert_eq!(lines.len(), 1);
    let entry: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(entry["height"], 2);

    let (success, stdout, _) = run_cli(&journal, &["--json", "--caller", &user, "log"]);
    assert!(success);
    assert_eq!(stdout.lines().count(), 1);

    let (success, _, stderr) = run_cli(&journal, &["log", "--kind", "burn"]);
    assert!(!success);
    assert!(stderr.contains("unknown call kind"));

    let (success, stdout, _) = run_cli(&journal, &["verify"]);
    assert!(success);
    assert!(stdout.contains("VERDICT"));

    let (success, stdout, _) = run_cli(&journal, &["--json", "verify"]);
    assert!(success);
    let summary: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(summary["transactions"], 3);
    assert_eq!(summary["index_ok"], true);
}

#[test]
fn test_missing_journal_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let journal = temp_dir.path().join("missing.tkj");
    let (success, _, stderr) = run_cli(&journal, &["venues"]);
    assert!(!success);
    assert!(stderr.contains("failed to open ledger"));
}

#[cfg(feature = "dev-tools")]
#[test]
fn test_keygen_and_sign() {
    let temp_dir = TempDir::new().unwrap();
    let journal = temp_dir.path().join("unused.tkj");

    let (success, stdout, _) = run_cli(&journal, &["--json", "keygen", "--seed", "user"]);
    assert!(success);
    let key: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(key["identity"], make_key("user").1.to_string());

    let digest = ticketry_core::static_login_digest().to_string();
    let secret = key["secret"].as_str().unwrap();
    let (success, stdout, _) = run_cli(
        &journal,
        &["--json", "sign", "--key", secret, "--digest", &digest],
    );
    assert!(success);
    let signature: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(signature["v"] == 27 || signature["v"] == 28);
}
