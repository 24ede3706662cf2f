//! Tests for the backend bootstrap: settings translation, administrator
//! provisioning and readiness signalling.

use std::net::SocketAddr;

use actix_web::web;
use rstest::{fixture, rstest};

use quora_backend::domain::Username;
use quora_backend::domain::ports::UserRepository;
use quora_backend::inbound::http::health::HealthState;
use quora_backend::settings::AppSettings;
use quora_backend::test_support::{TEST_PASSWORD, TestContext, signup_details};

use super::build_server_config;
use super::server::{ServerConfig, create_server};

#[fixture]
fn health_state() -> web::Data<HealthState> {
    web::Data::new(HealthState::new())
}

#[fixture]
fn bind_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 0))
}

#[fixture]
fn settings(bind_addr: SocketAddr) -> AppSettings {
    AppSettings {
        bind_addr: Some(bind_addr),
        database_url: None,
        db_max_connections: None,
        db_min_idle: None,
        db_checkout_timeout_secs: None,
        session_ttl_hours: None,
        enforce_session_expiry: false,
        admin_username: None,
        admin_email: None,
        admin_password: None,
    }
}

#[rstest]
#[actix_web::test]
async fn missing_database_url_falls_back_to_memory(settings: AppSettings, bind_addr: SocketAddr) {
    let config = build_server_config(&settings)
        .await
        .expect("memory config should build");

    assert!(!config.is_persistent(), "expected the in-memory store");
    assert_eq!(config.bind_addr(), bind_addr);
    assert!(config.admin.is_none());
}

#[rstest]
#[actix_web::test]
async fn invalid_admin_settings_stop_start_up(mut settings: AppSettings) {
    settings.admin_username = Some("not a name".into());
    settings.admin_email = Some("root@example.com".into());
    settings.admin_password = Some("changeme".into());

    let Err(err) = build_server_config(&settings).await else {
        panic!("invalid administrator must be rejected");
    };
    assert!(err.to_string().contains("invalid administrator settings"));
}

#[rstest]
#[actix_web::test]
async fn create_server_marks_ready(health_state: web::Data<HealthState>, bind_addr: SocketAddr) {
    assert!(!health_state.is_ready(), "state should start unready");

    let _server = create_server(health_state.clone(), ServerConfig::new(bind_addr))
        .await
        .expect("server should build");

    assert!(
        health_state.is_ready(),
        "server creation should mark readiness"
    );
}

#[rstest]
#[actix_web::test]
async fn create_server_provisions_the_administrator(
    health_state: web::Data<HealthState>,
    bind_addr: SocketAddr,
) {
    let ctx = TestContext::new();
    let config = ServerConfig::new(bind_addr)
        .with_memory_store(ctx.store.clone())
        .with_admin(Some(signup_details("root", TEST_PASSWORD)));

    let _server = create_server(health_state, config)
        .await
        .expect("server should build");

    let root = ctx
        .store
        .find_by_username(&Username::new("root").expect("username"))
        .await
        .expect("lookup")
        .expect("administrator created");
    assert!(root.is_admin());
}

#[rstest]
#[actix_web::test]
async fn create_server_refuses_to_promote_an_existing_user(
    health_state: web::Data<HealthState>,
    bind_addr: SocketAddr,
) {
    let ctx = TestContext::new();
    ctx.signup("root").await;
    let config = ServerConfig::new(bind_addr)
        .with_memory_store(ctx.store.clone())
        .with_admin(Some(signup_details("root", TEST_PASSWORD)));

    let Err(err) = create_server(health_state.clone(), config).await else {
        panic!("a non-admin owner of the admin username must stop start-up");
    };
    assert!(err.to_string().contains("administrator bootstrap failed"));
    assert!(!health_state.is_ready(), "failed start-up must not mark ready");
}
