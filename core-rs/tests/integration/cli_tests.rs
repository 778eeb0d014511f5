//! Integration tests for the fmu-proxy binary
//!
//! Run the built CLI against temporary settings files. A shell script stands
//! in for the Java runtime where a subcommand needs one.

use std::fs;
use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

fn fmu_proxy(config: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_fmu-proxy"))
        .arg("--config")
        .arg(config)
        .args(args)
        .output()
        .expect("Failed to run fmu-proxy")
}

fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect()
}

fn assert_success(output: &Output) {
    if !output.status.success() {
        eprintln!("STDOUT:\n{}", String::from_utf8_lossy(&output.stdout));
        eprintln!("STDERR:\n{}", String::from_utf8_lossy(&output.stderr));
    }
    assert!(output.status.success(), "fmu-proxy exited with {}", output.status);
}

/// Write a fake `java` that reports `version` and echoes launch arguments
#[cfg(unix)]
fn fake_java(dir: &Path, version: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("java");
    let script = format!(
        "#!/bin/sh\n\
         if [ \"$1\" = \"-version\" ]; then\n\
         \techo 'java version \"{}\"' >&2\n\
         \texit 0\n\
         fi\n\
         echo \"$@\"\n",
        version
    );
    fs::write(&path, script).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

#[test]
fn test_endpoint_prints_descriptor_and_json() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("fmu-proxy.yaml");

    let output = fmu_proxy(&config, &["endpoint", "h:9090?guid=g"]);
    assert_success(&output);

    let lines = stdout_lines(&output);
    assert_eq!(lines[0], "fmu-proxy://h:9090?guid=g");

    let json: serde_json::Value = serde_json::from_str(&lines[1]).unwrap();
    assert_eq!(json, serde_json::json!({"address": "h", "port": 9090}));
}

#[test]
fn test_endpoint_canonicalises_short_file_form() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("fmu-proxy.yaml");

    let output = fmu_proxy(&config, &["endpoint", "localhost?file=models/pump.fmu"]);
    assert_success(&output);

    let lines = stdout_lines(&output);
    assert_eq!(lines[0], "proxyfmu://localhost?file=models/pump.fmu");
    let json: serde_json::Value = serde_json::from_str(&lines[1]).unwrap();
    assert_eq!(json["port"], serde_json::Value::Null);
}

#[test]
fn test_malformed_descriptor_fails() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("fmu-proxy.yaml");

    let output = fmu_proxy(&config, &["endpoint", "localhost:9090"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Parsing descriptor"));
}

#[cfg(unix)]
#[test]
fn test_packaged_command_uses_config() {
    let temp_dir = TempDir::new().unwrap();
    let java = fake_java(temp_dir.path(), "1.8.0_200");
    let config = temp_dir.path().join("fmu-proxy.yaml");
    fs::write(
        &config,
        format!("installRoot: dist\nruntime: {}\ndefaultPort: 9400\n", java.display()),
    )
    .unwrap();

    let output = fmu_proxy(
        &config,
        &["command", "--package", "--fmu", "/models/pump.fmu", "localhost?guid=g"],
    );
    assert_success(&output);

    assert_eq!(
        stdout_lines(&output)[0],
        format!("{} -jar bin/fmu-proxy.jar -thrift/tcp 9400 pump.fmu", java.display())
    );
}

#[cfg(unix)]
#[test]
fn test_in_place_command_has_absolute_jar() {
    let temp_dir = TempDir::new().unwrap();
    let java = fake_java(temp_dir.path(), "1.8.0_200");
    let config = temp_dir.path().join("fmu-proxy.yaml");
    fs::write(&config, format!("runtime: {}\n", java.display())).unwrap();

    let output = fmu_proxy(
        &config,
        &["command", "--fmu", "/models/pump.fmu", "localhost:9191?guid=g"],
    );
    assert_success(&output);

    let line = stdout_lines(&output)[0].clone();
    let argv: Vec<&str> = line.split(' ').collect();
    assert!(Path::new(argv[2]).is_absolute(), "{} is relative", argv[2]);
    assert_eq!(argv[4], "9191");
}

/// Test: file-addressed descriptors are refused before any runtime check
#[test]
fn test_command_refuses_file_descriptor() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("fmu-proxy.yaml");
    fs::write(&config, "runtime: /nonexistent/fmu-proxy-cli/java\n").unwrap();

    let output = fmu_proxy(&config, &["command", "localhost:9090?file=/models/pump.fmu"]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Missing identifier"), "stderr was: {}", stderr);
}

#[cfg(unix)]
#[test]
fn test_run_without_wait_exits_after_spawn() {
    let temp_dir = TempDir::new().unwrap();
    let java = fake_java(temp_dir.path(), "1.8.0_281");
    let config = temp_dir.path().join("fmu-proxy.yaml");
    fs::write(&config, format!("runtime: {}\n", java.display())).unwrap();

    let output = fmu_proxy(&config, &["run", "--fmu", "/models/pump.fmu", "localhost?guid=g"]);
    assert_success(&output);

    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].parse::<u32>().is_ok(), "expected a PID, got {}", lines[0]);
}

#[cfg(unix)]
#[test]
fn test_run_with_wait_relays_proxy_output() {
    let temp_dir = TempDir::new().unwrap();
    let java = fake_java(temp_dir.path(), "1.8.0_281");
    let config = temp_dir.path().join("fmu-proxy.yaml");
    fs::write(&config, format!("runtime: {}\n", java.display())).unwrap();

    let output = fmu_proxy(
        &config,
        &["run", "--wait", "--fmu", "/models/pump.fmu", "localhost:9191?guid=g"],
    );
    assert_success(&output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("-thrift/tcp 9191 /models/pump.fmu"));
    assert!(stdout.contains("Proxy server exited with"));
}

#[test]
fn test_free_port_starts_at_configured_port() {
    let listener = TcpListener::bind(("127.0.0.1", 0)).unwrap();
    let busy = listener.local_addr().unwrap().port();

    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("fmu-proxy.yaml");
    fs::write(&config, format!("scanStartPort: {}\n", busy)).unwrap();

    let output = fmu_proxy(&config, &["free-port"]);
    assert_success(&output);

    let port: u16 = stdout_lines(&output)[0].parse().unwrap();
    assert!(port > busy);
}

#[test]
fn test_invalid_config_is_reported() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("fmu-proxy.yaml");
    fs::write(&config, "defaultPort: 0\n").unwrap();

    let output = fmu_proxy(&config, &["free-port"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Loading"));
}
