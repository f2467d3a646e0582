use std::process::Command;

use base64::Engine;

fn token() -> String {
    let engine = base64::engine::general_purpose::URL_SAFE_NO_PAD;
    format!(
        "{}.{}.{}",
        engine.encode(br#"{"alg":"HS256","typ":"JWT"}"#),
        engine.encode(br#"{"member_id":"314","tpacompany_id":"TPA","name":"Cli Tester"}"#),
        engine.encode(b"sig"),
    )
}

fn run(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_edenred-claims"))
        .args(["--config", "does/not/exist", "--token", &token()])
        .args(args)
        .env("RUST_LOG", "edenred_claims=debug,info")
        .output()
        .unwrap()
}

#[test]
fn json_batch_output_is_only_json_on_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = dir.path().join("empty.csv");
    std::fs::write(&manifest, "image_path,expense_date,merchant_name,expense_type\n").unwrap();

    let output = run(&["--format", "json", "csv", manifest.to_str().unwrap()]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let summary: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(summary["total"], 0);
    assert_eq!(summary["results"], serde_json::json!([]));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Authenticated as: Cli Tester"));
    assert!(stderr.contains("Batch complete"));
}

#[test]
fn json_whoami_is_only_json_on_stdout() {
    let output = run(&["--format", "json", "whoami"]);
    assert!(output.status.success());

    let identity: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(identity["member_id"], 314);
    assert_eq!(identity["display_name"], "Cli Tester");
}
