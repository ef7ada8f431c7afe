use assert_cmd::{assert::Assert, prelude::*};
use std::{
    io::{BufRead, BufReader, Cursor, Write},
    net::TcpListener,
    path::Path,
    process::Command,
};
use tempfile::TempDir;
use zip::{write::SimpleFileOptions, ZipWriter};

const BIN_NAME: &str = "atomup";
const PROXY_VARS: &[&str] = &[
    "HTTP_PROXY",
    "http_proxy",
    "HTTPS_PROXY",
    "https_proxy",
    "ALL_PROXY",
    "all_proxy",
];

fn create_empty_file(path: impl AsRef<Path>) {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, "").unwrap();
}

fn payload_zip(version: &str) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    zip.add_directory("Atom/", options).unwrap();
    zip.add_directory("Atom/resources/", options).unwrap();
    zip.start_file("Atom/atom.exe", options).unwrap();
    zip.write_all(version.as_bytes()).unwrap();
    zip.start_file("Atom/resources/app.asar", options).unwrap();
    zip.write_all(b"asar").unwrap();
    zip.finish().unwrap().into_inner()
}

/// Serves the release listing and archives over plain http on a local port.
/// Returns the base url.
fn serve_releases(version: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    std::thread::spawn(move || {
        for stream in listener.incoming() {
            let mut stream = match stream {
                Ok(stream) => stream,
                Err(_) => break,
            };
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut request_line = String::new();
            reader.read_line(&mut request_line).unwrap();
            loop {
                let mut line = String::new();
                if reader.read_line(&mut line).unwrap() == 0 || line == "\r\n" {
                    break;
                }
            }

            let path = request_line.split_whitespace().nth(1).unwrap_or("/");
            let (status, body) = if path == "/releases" {
                let listing = format!(r#"[{{"name": "{}"}}, {{"name": "0.0.1"}}]"#, version);
                ("200 OK", listing.into_bytes())
            } else if path == format!("/download/v{}/atom.zip", version) {
                ("200 OK", payload_zip(version))
            } else {
                ("404 Not Found", Vec::new())
            };
            let header = format!(
                "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                status,
                body.len()
            );
            let _ = stream.write_all(header.as_bytes());
            let _ = stream.write_all(&body);
        }
    });
    format!("http://{}", addr)
}

fn prepare_command(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin(BIN_NAME).unwrap();
    cmd.current_dir(dir.path());
    for var in PROXY_VARS {
        cmd.env_remove(var);
    }
    cmd
}

fn run_command(dir: &TempDir, base_url: &str, args: &str) -> Assert {
    let mut c = prepare_command(dir);
    c.arg("--yes")
        .arg("--releases-url")
        .arg(format!("{}/releases", base_url))
        .arg("--archive-url")
        .arg(format!("{}/download/v{{version}}/atom.zip", base_url));
    c.args(args.split_whitespace());
    c.assert()
}

#[test]
fn test_cli_help() {
    let dir = TempDir::new().unwrap();
    let assert = prepare_command(&dir).arg("--help").assert();

    let output = assert.success().get_output().clone();
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("--install-path"));
    assert!(stdout.contains("--download-path"));
}

#[test]
fn test_cli_update() {
    let dir = TempDir::new().unwrap();
    let base_url = serve_releases("9.9.9");

    let assert = run_command(&dir, &base_url, "");

    let output = assert.success().code(0).get_output().clone();
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Downloading atom-windows.zip"));
    assert!(stdout.contains("Done."));
    assert!(!dir.path().join("atom-windows.zip").exists());
    assert!(!dir.path().join("Atom").exists());
    assert!(!dir.path().join("atom.exe").exists());
}

#[test]
fn test_cli_update_and_install() {
    let dir = TempDir::new().unwrap();
    create_empty_file(dir.path().join("install/resources/stale.txt"));
    let base_url = serve_releases("1.2.3");

    run_command(&dir, &base_url, "--install --install-path install --download-path .")
        .success()
        .code(0);

    let install = dir.path().join("install");
    assert_eq!(
        "1.2.3",
        std::fs::read_to_string(install.join("atom.exe")).unwrap()
    );
    assert!(install.join("resources/app.asar").is_file());
    assert!(!install.join("resources/stale.txt").exists());
    assert!(!dir.path().join("Atom").exists());
}

#[test]
fn test_cli_invalid_install_path() {
    let dir = TempDir::new().unwrap();
    let base_url = serve_releases("9.9.9");

    let assert = run_command(&dir, &base_url, "--install-path missing");

    let output = assert.failure().code(1).get_output().clone();
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Terminating!"));
    assert!(!dir.path().join("atom-windows.zip").exists());
}

#[test]
fn test_cli_unknown_release_archive() {
    let dir = TempDir::new().unwrap();
    let base_url = serve_releases("9.9.9");

    let mut c = prepare_command(&dir);
    c.arg("--yes")
        .arg("--releases-url")
        .arg(format!("{}/releases", base_url))
        .arg("--archive-url")
        .arg(format!("{}/missing/{{version}}.zip", base_url));

    let output = c.assert().failure().get_output().clone();
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("404"));
}

fn piped_command(dir: &TempDir, base_url: &str, stdin: &str) -> Assert {
    let mut cmd = assert_cmd::Command::cargo_bin(BIN_NAME).unwrap();
    cmd.current_dir(dir.path());
    for var in PROXY_VARS {
        cmd.env_remove(var);
    }
    cmd.arg("--releases-url")
        .arg(format!("{}/releases", base_url))
        .arg("--archive-url")
        .arg(format!("{}/download/v{{version}}/atom.zip", base_url))
        .write_stdin(stdin);
    cmd.assert()
}

#[test]
fn test_cli_piped_answers() {
    let dir = TempDir::new().unwrap();
    let base_url = serve_releases("9.9.9");

    // proceed, accept the version, use the working directory, then ENTER
    let assert = piped_command(&dir, &base_url, "y\nY\ny\n\n");

    let output = assert.success().code(0).get_output().clone();
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("version 9.9.9"));
    assert!(stdout.contains("Using current working directory"));
    assert!(stdout.contains("Done."));
    assert!(!dir.path().join("atom-windows.zip").exists());
}

#[test]
fn test_cli_piped_decline() {
    let dir = TempDir::new().unwrap();
    let base_url = serve_releases("9.9.9");

    let assert = piped_command(&dir, &base_url, "n\n");

    let output = assert.success().code(0).get_output().clone();
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(!stdout.contains("Downloading"));
}
