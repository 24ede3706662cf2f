//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use state_builders::{AppServices, build_services};

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;

use quora_backend::Trace;
#[cfg(debug_assertions)]
use quora_backend::doc::ApiDoc;
use quora_backend::inbound::http::api_scope;
use quora_backend::inbound::http::health::{HealthState, live, ready};
use quora_backend::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api_scope())
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// Creates the configured administrator before binding, so a bad admin
/// definition stops start-up instead of surfacing later.
///
/// # Errors
/// Propagates [`std::io::Error`] when the administrator cannot be created,
/// or when binding the socket fails.
pub async fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let AppServices {
        accounts,
        http_state,
    } = build_services(&config);
    if let Some(admin) = &config.admin {
        let user = accounts
            .ensure_admin(admin)
            .await
            .map_err(|err| std::io::Error::other(format!("administrator bootstrap failed: {err}")))?;
        info!(user_id = %user.id(), "administrator available");
    }

    let http_state = web::Data::new(http_state);
    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
        })
    })
    .bind(config.bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
