use std::collections::BTreeSet;
use std::io::{BufRead, BufReader, Write};
use std::net::{Shutdown, SocketAddr, TcpStream};
use std::sync::Arc;
use std::thread;

use crossbeam_utils::thread as scoped;
use jks::client::toggle_mode;
use jks::content::NOT_STARTED;
use jks::{Identity, JksClient, JksServer, Mode, NaiveThreadPool, ServerState, ThreadPool};

struct Running {
    clients: SocketAddr,
    admin: SocketAddr,
    state: Arc<ServerState>,
}

fn start(identity: Identity) -> Running {
    let state = ServerState::new(identity).unwrap();
    let server = JksServer::bind(
        state,
        NaiveThreadPool::new(0).unwrap(),
        "127.0.0.1:0".parse().unwrap(),
        "127.0.0.1:0".parse().unwrap(),
    )
    .unwrap();

    let running = Running {
        clients: server.client_addr().unwrap(),
        admin: server.admin_addr().unwrap(),
        state: server.state(),
    };
    thread::spawn(move || server.run());
    running
}

/// the item tag of a content line, e.g. "JA" for "JA alice: ..."
fn tag_of(line: &str) -> String {
    line.split_whitespace().next().unwrap().to_string()
}

#[test]
fn alice_walks_two_full_joke_cycles() {
    let server = start(Identity::Primary);
    let alice = JksClient::with_id("alice-id", "alice");

    for _ in 0..2 {
        let mut tags = BTreeSet::new();
        for i in 0..4 {
            let lines = alice.request(server.clients).unwrap();
            assert!(lines[0].contains(" alice: "), "unexpected line {:?}", lines[0]);
            tags.insert(tag_of(&lines[0]));

            if i < 3 {
                assert_eq!(lines.len(), 1);
            } else {
                assert_eq!(lines, vec![lines[0].clone(), "JOKE CYCLE COMPLETED".to_string()]);
            }
        }
        assert_eq!(tags, ["JA", "JB", "JC", "JD"].iter().map(|s| s.to_string()).collect());
    }

    let jokes = server.state.rotation(Mode::Joke).table();
    assert_eq!(jokes.index("alice-id"), Some(NOT_STARTED));
}

#[test]
fn mode_switch_keeps_joke_rotation() {
    let server = start(Identity::Primary);
    let bob = JksClient::with_id("bob-id", "bob");

    let mut jokes = BTreeSet::new();
    for _ in 0..2 {
        jokes.insert(tag_of(&bob.request(server.clients).unwrap()[0]));
    }
    assert_eq!(server.state.rotation(Mode::Joke).table().index("bob-id"), Some(1));

    assert_eq!(
        toggle_mode(server.admin).unwrap(),
        vec!["Server has switched into PROVERB mode."]
    );
    let proverb = bob.request(server.clients).unwrap();
    assert!(proverb[0].starts_with('P'));
    assert_eq!(server.state.rotation(Mode::Joke).table().index("bob-id"), Some(1));
    assert_eq!(server.state.rotation(Mode::Proverb).table().index("bob-id"), Some(0));

    assert_eq!(
        toggle_mode(server.admin).unwrap(),
        vec!["Server has switched into JOKE mode."]
    );
    let third = bob.request(server.clients).unwrap();
    assert_eq!(third.len(), 1);
    jokes.insert(tag_of(&third[0]));
    let fourth = bob.request(server.clients).unwrap();
    assert_eq!(fourth.len(), 2);
    jokes.insert(tag_of(&fourth[0]));
    assert_eq!(jokes.len(), 4);
}

#[test]
fn toggling_twice_restores_joke_mode() {
    let server = start(Identity::Primary);
    let first = toggle_mode(server.admin).unwrap();
    let second = toggle_mode(server.admin).unwrap();
    let third = toggle_mode(server.admin).unwrap();

    assert_eq!(second, vec!["Server has switched into JOKE mode."]);
    assert_eq!(first, third);
    assert_eq!(server.state.mode(), Mode::Proverb);
}

#[test]
fn secondary_tags_every_line() {
    let server = start(Identity::Secondary);
    let carol = JksClient::with_id("carol-id", "carol");

    let mut last = Vec::new();
    for _ in 0..4 {
        last = carol.request(server.clients).unwrap();
        assert!(last[0].starts_with("<S2> J"));
    }
    assert_eq!(last[1], "<S2> JOKE CYCLE COMPLETED");
    assert_eq!(
        toggle_mode(server.admin).unwrap(),
        vec!["<S2> Server has switched into PROVERB mode."]
    );
}

#[test]
fn incomplete_identity_gets_no_reply() {
    let server = start(Identity::Primary);

    let mut tcp = TcpStream::connect(server.clients).unwrap();
    tcp.write_all(b"dave-id\n").unwrap();
    tcp.shutdown(Shutdown::Write).unwrap();
    let mut reply = String::new();
    BufReader::new(&tcp).read_line(&mut reply).unwrap();
    assert!(reply.is_empty());
    assert!(!server.state.rotation(Mode::Joke).table().has("dave-id"));

    // the listener keeps serving
    let dave = JksClient::with_id("dave-id", "dave");
    assert_eq!(dave.request(server.clients).unwrap().len(), 1);
}

#[test]
fn new_clients_do_not_disturb_others() {
    let server = start(Identity::Primary);
    let erin = JksClient::with_id("erin-id", "erin");
    let frank = JksClient::with_id("frank-id", "frank");

    erin.request(server.clients).unwrap();
    erin.request(server.clients).unwrap();
    frank.request(server.clients).unwrap();

    let table = server.state.rotation(Mode::Joke).table();
    assert_eq!(table.index("erin-id"), Some(1));
    assert_eq!(table.index("frank-id"), Some(0));
    assert!(server.state.rotation(Mode::Proverb).table().is_empty());
}

#[test]
fn concurrent_requests_for_one_client_all_advance() {
    let server = start(Identity::Primary);
    let grace = JksClient::with_id("grace-id", "grace");

    let completions: usize = scoped::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                s.spawn(|_| {
                    (0..3)
                        .map(|_| grace.request(server.clients).unwrap())
                        .filter(|lines| lines.len() == 2)
                        .count()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).sum()
    })
    .unwrap();

    // 24 advances through a pool of 4 complete exactly 6 cycles
    assert_eq!(completions, 6);
    assert_eq!(
        server.state.rotation(Mode::Joke).table().index("grace-id"),
        Some(NOT_STARTED)
    );
}
