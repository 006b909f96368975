//! Integration tests for the Lupus server over real TCP sockets.

use std::net::SocketAddr;
use std::time::Duration;

use lupus::prelude::*;
use lupus_transport::{Connection, TcpConnection, FramedConnection};

// =========================================================================
// Helpers
// =========================================================================

fn fast_config() -> GameConfig {
    let json = serde_json::json!({
        "night_discussion_ms": 50,
        "day_discussion_ms": 50,
        "stale_drain_ms": 10,
    });
    GameConfig::from_json(&json.to_string()).expect("valid config")
}

async fn start(seed: u64) -> (SocketAddr, tokio::task::JoinHandle<Result<Outcome, LupusError>>) {
    let server = LupusServer::builder()
        .bind("127.0.0.1:0")
        .config(fast_config())
        .seed(seed)
        .build()
        .await
        .expect("server should bind");
    let addr = server.local_addr().unwrap();
    (addr, tokio::spawn(server.run()))
}

async fn connect(addr: SocketAddr) -> TcpConnection {
    let stream = tokio::net::TcpStream::connect(addr)
        .await
        .expect("client should connect");
    let (read, write) = stream.into_split();
    FramedConnection::new(read, write)
}

/// Pulls `(username, role)` out of a welcome block.
fn parse_welcome(welcome: &str) -> (String, String) {
    let field = |label: &str| {
        welcome
            .lines()
            .find_map(|line| line.strip_prefix(label))
            .unwrap_or_else(|| panic!("no {label:?} in {welcome:?}"))
            .to_string()
    };
    (
        field("The horror will start soon but for now. Your username will be: "),
        field("Your role is: "),
    )
}

// =========================================================================
// Tests
// =========================================================================

#[tokio::test]
async fn test_build_binds_an_os_assigned_port() {
    let server = LupusServer::builder()
        .bind("127.0.0.1:0")
        .build()
        .await
        .unwrap();
    assert_ne!(server.local_addr().unwrap().port(), 0);
}

#[tokio::test]
async fn test_bad_bind_address_is_a_transport_error() {
    let err = LupusServer::builder()
        .bind("not an address")
        .build()
        .await
        .err()
        .expect("bind should fail");
    assert!(matches!(err, LupusError::Transport(_)));
}

#[tokio::test]
async fn test_seven_players_get_distinct_names_and_the_full_deck() {
    let (addr, server) = start(11).await;

    let mut clients = Vec::new();
    let mut seats = Vec::new();
    for _ in 0..7 {
        let client = connect(addr).await;
        let welcome = client.recv().await.unwrap().expect("welcome");
        assert!(welcome.starts_with("Hello Player!\nWelcome to Werewolf!\n"));
        assert!(welcome.ends_with("The Game will start shortly!\n"));
        seats.push(parse_welcome(&welcome));
        clients.push(client);
    }

    let mut names: Vec<&str> = seats.iter().map(|(name, _)| name.as_str()).collect();
    names.sort_unstable();
    assert_eq!(
        names,
        ["Player 1", "Player 2", "Player 3", "Player 4", "Player 5", "Player 6", "Player 7"]
    );

    let mut roles: Vec<&str> = seats.iter().map(|(_, role)| role.as_str()).collect();
    roles.sort_unstable();
    let mut deck: Vec<&str> = Role::DECK.iter().map(|role| role.as_str()).collect();
    deck.sort_unstable();
    assert_eq!(roles, deck);

    // Everyone leaves; the referee plays on until nobody is left.
    drop(clients);
    let outcome = tokio::time::timeout(Duration::from_secs(10), server)
        .await
        .expect("game should end")
        .unwrap()
        .unwrap();
    assert_eq!(outcome, Outcome::AllDead);
}

#[tokio::test]
async fn test_same_seed_deals_the_same_roles() {
    let mut deals = Vec::new();
    for _ in 0..2 {
        let (addr, server) = start(99).await;
        let mut clients = Vec::new();
        let mut roles = Vec::new();
        for _ in 0..7 {
            let client = connect(addr).await;
            let (_, role) = parse_welcome(&client.recv().await.unwrap().unwrap());
            roles.push(role);
            clients.push(client);
        }
        deals.push(roles);
        drop(clients);
        let _ = tokio::time::timeout(Duration::from_secs(10), server).await;
    }
    assert_eq!(deals[0], deals[1]);
}

#[tokio::test]
async fn test_table_closes_after_the_seventh_player() {
    let (addr, server) = start(5).await;

    let mut clients = Vec::new();
    for _ in 0..7 {
        let client = connect(addr).await;
        client.recv().await.unwrap().expect("welcome");
        clients.push(client);
    }

    // The listener goes away right after the last welcome.
    let mut refused = false;
    for _ in 0..50 {
        if tokio::net::TcpStream::connect(addr).await.is_err() {
            refused = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert!(refused, "an eighth player should not get in");

    drop(clients);
    let _ = tokio::time::timeout(Duration::from_secs(10), server).await;
}
