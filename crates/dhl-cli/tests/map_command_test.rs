use std::env;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output};

fn cargo_bin() -> PathBuf {
    if let Ok(path) = env::var("CARGO_BIN_EXE_dhl") {
        return PathBuf::from(path);
    }

    let target_dir = env::var("CARGO_TARGET_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| repo_root().join("target"));
    let executable_name = format!("dhl{}", std::env::consts::EXE_SUFFIX);
    let fallback = target_dir.join("debug").join(executable_name);

    if fallback.exists() {
        return fallback;
    }

    panic!(
        "CARGO_BIN_EXE_dhl is not set and fallback binary was not found at {}",
        fallback.display()
    );
}

fn repo_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
}

fn testdata(path: &str) -> String {
    repo_root()
        .join("testdata")
        .join(path)
        .to_string_lossy()
        .into_owned()
}

fn run_dhl(args: &[&str]) -> Output {
    Command::new(cargo_bin())
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("run dhl")
}

fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "expected success; stdout: {}; stderr: {}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
}

fn stdout_json(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

#[test]
fn map_command_outputs_order_json() {
    let output = run_dhl(&[
        "map",
        &testdata("requests/oneflow_example_fr.json"),
        "--reference",
        "poop",
    ]);
    assert_success(&output);

    let order = stdout_json(&output);
    assert_eq!(order["sequenceNumber"], "3334430");
    assert_eq!(order["shipment"]["shipmentDetails"]["product"], "V53WPAK");
    assert_eq!(order["shipment"]["shipmentDetails"]["customerReference"], "poop");
    assert_eq!(order["shipment"]["shipper"]["address"]["streetNumber"], "12");
    assert_eq!(
        order["shipment"]["receiver"]["address"]["type"],
        "unstructured"
    );
}

#[test]
fn map_command_applies_override_file() {
    let output = run_dhl(&[
        "map",
        &testdata("requests/oneflow_example.json"),
        "--override",
        &testdata("requests/shipper_override.json"),
    ]);
    assert_success(&output);

    let shipper = &stdout_json(&output)["shipment"]["shipper"];
    assert_eq!(shipper["name"]["name1"], "Rise and Fall");
    assert_eq!(shipper["address"]["city"], "Climthorpe");
    assert_eq!(shipper["communication"]["contactPerson"], "Reginald Perrin");
}

#[test]
fn map_command_reads_config_file() {
    let mut request: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(testdata("requests/oneflow_example_fr.json")).unwrap(),
    )
    .unwrap();
    request["ShipTo"]["IsoCountry"] = "AT".into();
    request["Carrier"]["Extra"] = r#"{"accountNumber":"22222222225301"}"#.into();

    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(file, "{request}").unwrap();

    let output = run_dhl(&[
        "map",
        file.path().to_str().unwrap(),
        "--config",
        &testdata("config/mapper.yaml"),
    ]);
    assert_success(&output);

    let shipment = &stdout_json(&output)["shipment"];
    assert_eq!(shipment["shipmentDetails"]["product"], "V01PAK");
    assert_eq!(shipment["receiver"]["address"]["type"], "native");
    assert_eq!(shipment["shipper"]["address"]["city"], "Climthorpe");
    assert_eq!(
        shipment["shipper"]["communication"]["contactPerson"],
        "Reginald Perrin"
    );
}

#[test]
fn map_command_outputs_xml() {
    let output = run_dhl(&[
        "map",
        &testdata("requests/oneflow_example.json"),
        "--format",
        "xml",
    ]);
    assert_success(&output);

    let stdout = String::from_utf8(output.stdout).expect("stdout should be UTF-8");
    assert!(stdout.starts_with("<?xml"));
    assert!(stdout.contains("<sequenceNumber>3334431</sequenceNumber>"));
    assert!(stdout.contains("<streetName>Charles-de-Gaulle-Str.</streetName>"));
}

#[test]
fn map_command_explains_decisions() {
    let output = run_dhl(&[
        "map",
        &testdata("requests/oneflow_example.json"),
        "--explain",
    ]);
    assert_success(&output);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("[info] receiver.native:"), "{stderr}");
    assert!(stderr.contains("packages.merged"), "{stderr}");
}

#[test]
fn map_command_fails_without_packages() {
    let mut request: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(testdata("requests/oneflow_example.json")).unwrap(),
    )
    .unwrap();
    request["Packages"] = serde_json::json!([]);

    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(file, "{request}").unwrap();

    let output = run_dhl(&["map", file.path().to_str().unwrap()]);

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Packages"), "{stderr}");
}
