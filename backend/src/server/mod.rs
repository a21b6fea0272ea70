//! Server construction and middleware wiring.

mod config;
mod shutdown;
mod state_builders;

pub use config::{ServerConfig, ServerSettings};
pub use shutdown::{drain_on, shutdown_signal};

use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use users_backend::Trace;
#[cfg(debug_assertions)]
use users_backend::doc::ApiDoc;
use users_backend::inbound::http::health::{HealthState, live, ready};
use users_backend::inbound::http::state::HttpState;
use users_backend::inbound::http::users;
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
        .configure(users::configure)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Parameters
/// - `health_state`: shared readiness state updated once the server is bound.
/// - `config`: pre-built [`ServerConfig`] with the bind address and optional pool.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener. Signal
/// handling is left to [`drain_on`] so liveness fails before the drain.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config);
    let bind_addr = config.bind_addr();

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
        })
    })
    .disable_signals()
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::SocketAddr;

    use actix_web::http::StatusCode;
    use actix_web::test;
    use rstest::rstest;
    use serde_json::{Value, json};
    use users_backend::domain::TRACE_ID_HEADER;

    fn deps(is_ready: bool) -> AppDependencies {
        let health_state = web::Data::new(HealthState::new());
        if is_ready {
            health_state.mark_ready();
        }
        let config = ServerConfig::new(SocketAddr::from(([127, 0, 0, 1], 0)));
        AppDependencies {
            health_state,
            http_state: build_http_state(&config),
        }
    }

    #[rstest]
    #[case(false, StatusCode::SERVICE_UNAVAILABLE)]
    #[case(true, StatusCode::OK)]
    #[actix_web::test]
    async fn readiness_follows_health_state(
        #[case] is_ready: bool,
        #[case] expected: StatusCode,
    ) {
        let app = test::init_service(build_app(deps(is_ready))).await;
        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/health/ready").to_request(),
        )
        .await;
        assert_eq!(res.status(), expected);
    }

    #[actix_web::test]
    async fn user_routes_are_mounted_and_traced() {
        let app = test::init_service(build_app(deps(true))).await;

        let create = test::TestRequest::post()
            .uri("/users")
            .set_json(json!({ "username": "ada", "age": 36, "gender": "female" }))
            .to_request();
        let res = test::call_service(&app, create).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert!(res.headers().contains_key(TRACE_ID_HEADER));
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body, json!({ "id": 1 }));

        let res = test::call_service(&app, test::TestRequest::get().uri("/users/1").to_request())
            .await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[cfg(debug_assertions)]
    #[actix_web::test]
    async fn openapi_document_is_served_in_debug_builds() {
        let app = test::init_service(build_app(deps(true))).await;
        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api-docs/openapi.json")
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert!(body["paths"]["/users"].is_object());
    }
}
