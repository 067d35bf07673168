use std::net::{SocketAddr, TcpListener};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use assert_cmd::Command;
use jks::{Identity, JksServer, Mode, NaiveThreadPool, ServerState, ThreadPool};
use predicates::prelude::*;
use predicates::str::contains;

fn start() -> (SocketAddr, SocketAddr, Arc<ServerState>) {
    let server = JksServer::bind(
        ServerState::new(Identity::Primary).unwrap(),
        NaiveThreadPool::new(0).unwrap(),
        "127.0.0.1:0".parse().unwrap(),
        "127.0.0.1:0".parse().unwrap(),
    )
    .unwrap();
    let addrs = (server.client_addr().unwrap(), server.admin_addr().unwrap(), server.state());
    thread::spawn(move || server.run());
    addrs
}

/// a port nothing listens on
fn closed_port() -> u16 {
    TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap().port()
}

#[test]
fn server_rejects_unknown_identity() {
    Command::cargo_bin("jks-server")
        .unwrap()
        .arg("tertiary")
        .assert()
        .failure();
}

#[test]
fn server_rejects_bad_host() {
    Command::cargo_bin("jks-server")
        .unwrap()
        .args(&["--host", "not-an-ip", "--client-port", "0", "--admin-port", "0"])
        .assert()
        .failure()
        .stderr(contains("could not parse not-an-ip"));
}

#[test]
fn server_fails_when_port_is_taken() {
    let taken = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = taken.local_addr().unwrap().port().to_string();

    Command::cargo_bin("jks-server")
        .unwrap()
        .args(&["secondary", "--host", "127.0.0.1", "--client-port", &port, "--admin-port", "0"])
        .timeout(Duration::from_secs(10))
        .assert()
        .failure()
        .stderr(contains("Bind"));
}

#[test]
fn client_prints_content_and_cycle_completion() {
    let (clients, _, _) = start();

    Command::cargo_bin("jks-client")
        .unwrap()
        .args(&["127.0.0.1", "--port", &clients.port().to_string()])
        .write_stdin("Alice\n\n\n\n\nquit\n")
        .timeout(Duration::from_secs(10))
        .assert()
        .success()
        .stdout(
            contains("Alice: ")
                .and(contains("JOKE CYCLE COMPLETED"))
                .and(contains("Cancelled by client.")),
        );
}

#[test]
fn client_switches_to_alternate_server() {
    let (primary, _, _) = start();
    let (secondary, _, secondary_state) = start();

    Command::cargo_bin("jks-client")
        .unwrap()
        .args(&[
            "127.0.0.1",
            "127.0.0.1",
            "--port",
            &primary.port().to_string(),
            "--alt-port",
            &secondary.port().to_string(),
        ])
        .write_stdin("Alice\ns\n\nquit\n")
        .timeout(Duration::from_secs(10))
        .assert()
        .success()
        .stdout(contains(format!(
            "Now communicating with: 127.0.0.1, port {}",
            secondary.port()
        )));

    assert_eq!(secondary_state.rotation(Mode::Joke).table().len(), 1);
}

#[test]
fn client_without_alternate_reports_it() {
    Command::cargo_bin("jks-client")
        .unwrap()
        .args(&["--port", &closed_port().to_string()])
        .write_stdin("Alice\ns\nquit\n")
        .timeout(Duration::from_secs(10))
        .assert()
        .success()
        .stdout(contains("No secondary server being used."));
}

#[test]
fn client_survives_unreachable_server() {
    Command::cargo_bin("jks-client")
        .unwrap()
        .args(&["127.0.0.1", "--port", &closed_port().to_string()])
        .write_stdin("Alice\n\nquit\n")
        .timeout(Duration::from_secs(10))
        .assert()
        .success()
        .stdout(contains("Socket error.").and(contains("Cancelled by client.")));
}

#[test]
fn admin_switches_mode() {
    let (_, admin, state) = start();

    Command::cargo_bin("jks-admin")
        .unwrap()
        .args(&["127.0.0.1", "--port", &admin.port().to_string()])
        .write_stdin("\nquit\n")
        .timeout(Duration::from_secs(10))
        .assert()
        .success()
        .stdout(
            contains("Server has switched into PROVERB mode.").and(contains("Cancelled by admin.")),
        );

    assert_eq!(state.mode(), Mode::Proverb);
}
