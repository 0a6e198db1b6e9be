//! Tests de integración para el servidor Tiny
//! tests/integration_test.rs
//!
//! Cada test levanta el servidor en un puerto efímero con un document root
//! temporal y atiende exactamente las conexiones que envía.

use std::fs::{self, Permissions};
use std::io::{Read, Write};
use std::net::{Shutdown, SocketAddr, TcpStream};
use std::os::unix::fs::{symlink, PermissionsExt};
use std::process::Command;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tempfile::TempDir;
use tiny_server::config::Config;
use tiny_server::server::Server;

/// Helper: document root con home.html (120 bytes), una imagen, un archivo
/// sin permiso de lectura y un programa CGI
fn doc_root() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    fs::write(root.join("home.html"), vec![b'h'; 120]).unwrap();
    fs::set_permissions(root.join("home.html"), Permissions::from_mode(0o644)).unwrap();

    let png: Vec<u8> = (0..=255u8).cycle().take(300_000).collect();
    fs::write(root.join("big.png"), png).unwrap();

    fs::write(root.join("locked.html"), b"nope").unwrap();
    fs::set_permissions(root.join("locked.html"), Permissions::from_mode(0o000)).unwrap();

    fs::create_dir(root.join("cgi-bin")).unwrap();
    symlink("/usr/bin/env", root.join("cgi-bin/adder")).unwrap();

    dir
}

/// Helper: arranca un servidor que atiende `connections` conexiones
fn start(root: &TempDir, connections: usize) -> (SocketAddr, JoinHandle<()>) {
    let config = Config {
        port: 0,
        host: "127.0.0.1".to_string(),
        doc_root: root.path().to_str().unwrap().to_string(),
        timeout_secs: 5,
        ..Config::default()
    };
    let server = Server::bind(config).expect("bind");
    let addr = server.local_addr().unwrap();

    let handle = thread::spawn(move || {
        for _ in 0..connections {
            server.serve_next().expect("accept");
        }
    });
    (addr, handle)
}

/// Helper: envía un request HTTP y retorna la response completa
fn send_request(addr: SocketAddr, raw: &str) -> Vec<u8> {
    let mut stream = TcpStream::connect(addr).unwrap();
    stream.set_read_timeout(Some(Duration::from_secs(5))).unwrap();

    stream.write_all(raw.as_bytes()).unwrap();
    stream.flush().unwrap();

    let mut response = Vec::new();
    stream.read_to_end(&mut response).unwrap();
    response
}

/// Helper: separa cabecera y body
fn split_response(response: &[u8]) -> (String, &[u8]) {
    let pos = response
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .expect("response without blank line");
    (
        String::from_utf8_lossy(&response[..pos]).into_owned(),
        &response[pos + 4..],
    )
}

fn header<'a>(head: &'a str, name: &str) -> Option<&'a str> {
    head.lines()
        .find_map(|l| l.strip_prefix(name).and_then(|rest| rest.strip_prefix(": ")))
}

#[test]
fn test_home_html_scenario() {
    let root = doc_root();
    let (addr, server) = start(&root, 1);

    let response = send_request(addr, "GET /home.html HTTP/1.0\r\nUser-Agent: test\r\n\r\n");
    let (head, body) = split_response(&response);

    assert_eq!(
        head,
        "HTTP/1.0 200 OK\r\nContent-type: text/html\r\nContent-length: 120"
    );
    assert_eq!(body, &vec![b'h'; 120][..]);
    server.join().unwrap();
}

#[test]
fn test_large_binary_file_round_trip() {
    let root = doc_root();
    let (addr, server) = start(&root, 1);

    let response = send_request(addr, "GET /big.png HTTP/1.0\r\n\r\n");
    let (head, body) = split_response(&response);

    assert_eq!(header(&head, "Content-type"), Some("image/png"));
    assert_eq!(header(&head, "Content-length"), Some("300000"));
    assert_eq!(body, &fs::read(root.path().join("big.png")).unwrap()[..]);
    server.join().unwrap();
}

#[test]
fn test_not_found_length_matches_body() {
    let root = doc_root();
    let (addr, server) = start(&root, 1);

    let response = send_request(addr, "GET /nonexistent.html HTTP/1.0\r\n\r\n");
    let (head, body) = split_response(&response);

    assert!(head.starts_with("HTTP/1.0 404 Not Found\r\n"));
    assert_eq!(header(&head, "Content-type"), Some("text/html"));
    assert_eq!(header(&head, "Content-length"), Some(body.len().to_string().as_str()));
    assert!(String::from_utf8_lossy(body).contains("The Tiny Web server"));
    server.join().unwrap();
}

#[test]
fn test_locked_file_forbidden() {
    let root = doc_root();
    let (addr, server) = start(&root, 1);

    let response = send_request(addr, "GET /locked.html HTTP/1.0\r\n\r\n");
    let (head, _) = split_response(&response);

    assert!(head.starts_with("HTTP/1.0 403 Forbidden\r\n"));
    server.join().unwrap();
}

#[test]
fn test_post_not_implemented() {
    let root = doc_root();
    let (addr, server) = start(&root, 1);

    let response = send_request(addr, "POST /home.html HTTP/1.0\r\nContent-length: 3\r\n\r\nabc");
    let (head, body) = split_response(&response);

    assert!(head.starts_with("HTTP/1.0 501 Not Implemented\r\n"));
    assert!(String::from_utf8_lossy(body).contains("POST"));
    server.join().unwrap();
}

#[test]
fn test_cgi_adder_scenario() {
    let root = doc_root();
    let (addr, server) = start(&root, 1);

    let response = send_request(addr, "GET /cgi-bin/adder?2&3 HTTP/1.0\r\n\r\n");
    let text = String::from_utf8_lossy(&response);

    assert!(text.starts_with("HTTP/1.0 200 OK\r\n"));
    assert!(text.lines().any(|l| l == "QUERY_STRING=2&3"), "got: {}", text);
    server.join().unwrap();
}

#[test]
fn test_multiple_requests_sequentially() {
    let root = doc_root();
    let (addr, server) = start(&root, 5);

    for i in 0..5 {
        let response = send_request(addr, "GET /home.html HTTP/1.0\r\n\r\n");
        let (head, _) = split_response(&response);
        assert!(head.starts_with("HTTP/1.0 200 OK"), "Request {} failed", i);
    }
    server.join().unwrap();
}

#[test]
fn test_client_half_close_still_gets_response() {
    let root = doc_root();
    let (addr, server) = start(&root, 1);

    let mut stream = TcpStream::connect(addr).unwrap();
    stream.write_all(b"GET /home.html HTTP/1.0\r\n\r\n").unwrap();
    stream.shutdown(Shutdown::Write).unwrap();

    let mut response = Vec::new();
    stream.read_to_end(&mut response).unwrap();
    assert!(response.starts_with(b"HTTP/1.0 200 OK\r\n"));
    server.join().unwrap();
}

#[test]
fn test_truncated_last_header_at_close() {
    let root = doc_root();
    let (addr, server) = start(&root, 1);

    let mut stream = TcpStream::connect(addr).unwrap();
    stream.write_all(b"GET /home.html HTTP/1.0\r\nHost: x").unwrap();
    stream.shutdown(Shutdown::Write).unwrap();

    let mut response = Vec::new();
    stream.read_to_end(&mut response).unwrap();
    let (head, body) = split_response(&response);
    assert!(head.starts_with("HTTP/1.0 200 OK\r\n"));
    assert_eq!(body.len(), 120);
    server.join().unwrap();
}

// ==================== CLI ====================

#[test]
fn test_cli_missing_port_prints_usage() {
    let output = Command::new(env!("CARGO_BIN_EXE_tiny"))
        .env_remove("TINY_PORT")
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage"), "stderr: {}", stderr);
}

#[test]
fn test_cli_malformed_port() {
    let output = Command::new(env!("CARGO_BIN_EXE_tiny"))
        .arg("not-a-port")
        .output()
        .unwrap();

    assert!(!output.status.success());
}

#[test]
fn test_cli_invalid_config() {
    let output = Command::new(env!("CARGO_BIN_EXE_tiny"))
        .args(["0", "--root", ""])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Document root"));
}
