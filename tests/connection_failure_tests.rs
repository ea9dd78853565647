use std::net::TcpListener;
use std::process::Command;
use std::time::Duration;
use warehouse_setup::{Console, DbConfig, SetupSession, WarehouseError, run_setup};

// Port 1 on loopback is closed on any sane host, so the connect is refused at once.
fn unreachable_config() -> DbConfig {
    DbConfig {
        host: Some("127.0.0.1".to_string()),
        port: 1,
        user: Some("nobody".to_string()),
        password: Some("nothing".to_string()),
        ..DbConfig::default()
    }
}

#[tokio::test]
async fn unreachable_host_is_a_connection_error() {
    let err = run_setup(&unreachable_config(), &Console::quiet())
        .await
        .expect_err("setup against a closed port must fail");

    assert!(err.is_connection_error(), "unexpected error kind: {err:?}");
    assert!(matches!(err, WarehouseError::Connection(_)));
    assert_eq!(err.exit_code(), 1);
}

#[tokio::test]
async fn session_is_not_created_when_connect_fails() {
    let result = SetupSession::connect(&unreachable_config(), &Console::quiet()).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn silent_server_hits_connect_timeout() {
    // Accepted by the kernel backlog but never answered, so no MySQL greeting arrives.
    let listener = TcpListener::bind("127.0.0.1:0").expect("failed to bind listener");
    let port = listener.local_addr().expect("listener has no address").port();
    let cfg = DbConfig {
        host: Some("127.0.0.1".to_string()),
        port,
        ..unreachable_config()
    };
    let limit = Duration::from_millis(300);

    let err = SetupSession::connect_with_timeout(&cfg, &Console::quiet(), limit)
        .await
        .err()
        .expect("connect to a silent server must fail");

    match &err {
        WarehouseError::ConnectTimeout(elapsed) => assert_eq!(*elapsed, limit),
        other => panic!("expected a connect timeout, got {other:?}"),
    }
    assert!(err.is_connection_error());
    assert_eq!(err.exit_code(), 1);
    drop(listener);
}

fn setup_binary() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_warehouse-setup"));
    // Keep a developer's .env out of the picture.
    cmd.current_dir(std::env::temp_dir())
        .env_remove("RUST_LOG")
        .env_remove("DB_SSL")
        .env("DB_NAME", "defaultdb");
    cmd
}

#[test]
fn binary_exits_with_status_one_on_connection_failure() {
    let output = setup_binary()
        .env("DB_HOST", "127.0.0.1")
        .env("DB_PORT", "1")
        .env("DB_USER", "nobody")
        .env("DB_PASSWORD", "nothing")
        .output()
        .expect("failed to run setup binary");

    assert_eq!(output.status.code(), Some(1));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("1. Connecting to MySQL..."));
    assert!(stdout.contains("❌ Connection failed"));
    assert!(stdout.contains("DB_HOST=your-host"));
    assert!(stdout.contains("DB_NAME=your-database"));
    assert!(!stdout.contains("DATABASE SETUP COMPLETE"));
    assert!(!stdout.contains("nothing"), "password leaked to stdout");
}

#[test]
fn binary_rejects_unparsable_port() {
    let output = setup_binary()
        .env("DB_HOST", "127.0.0.1")
        .env("DB_PORT", "not-a-port")
        .output()
        .expect("failed to run setup binary");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Configuration error"));
}
