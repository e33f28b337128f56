use std::sync::Arc;

use abacus_adapters::http::routes::{
    add, add_from_query, auth_health, calculator_health, divide, forgot_password, login, multiply,
    refresh_token, reset_password, signup, subtract,
};
use abacus_application::AuthOrchestrator;
use abacus_core::{NotificationGateway, PasswordHasher, TokenService, UserStore};
use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::tracing::{make_span_with_request_id, on_request, on_response};

/// HTTP surface of the application: auth routes under `/api/auth`,
/// calculator routes under `/api/calculator`.
pub struct AbacusService {
    router: Router,
}

impl AbacusService {
    pub fn new<U, T, H, N>(auth: AuthOrchestrator<U, T, H, N>) -> Self
    where
        U: UserStore + 'static,
        T: TokenService + 'static,
        H: PasswordHasher + 'static,
        N: NotificationGateway + 'static,
    {
        let auth_router = Router::new()
            .route("/signup", post(signup::<U, T, H, N>))
            .route("/login", post(login::<U, T, H, N>))
            .route("/refresh", post(refresh_token::<U, T, H, N>))
            .route("/forgot-password", post(forgot_password::<U, T, H, N>))
            .route("/reset-password", post(reset_password::<U, T, H, N>))
            .route("/health", get(auth_health))
            .with_state(Arc::new(auth));

        let calculator_router = Router::new()
            .route("/add", post(add).get(add_from_query))
            .route("/subtract", post(subtract))
            .route("/multiply", post(multiply))
            .route("/divide", post(divide))
            .route("/health", get(calculator_health));

        let router = Router::new()
            .nest("/api/auth", auth_router)
            .nest("/api/calculator", calculator_router);

        Self { router }
    }

    fn with_trace_layer(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id)
                .on_request(on_request)
                .on_response(on_response),
        );
        self
    }

    /// Finished router with CORS (when origins are given) and request tracing.
    pub fn into_router(mut self, allowed_origins: &[String]) -> Router {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::warn!(%origin, error = %e, "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect();

        if !origins.is_empty() {
            let cors = CorsLayer::new()
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
                .allow_origin(AllowOrigin::list(origins));

            self.router = self.router.layer(cors);
        }
        self.with_trace_layer().router
    }

    pub async fn run_standalone(
        self,
        listener: TcpListener,
        allowed_origins: &[String],
    ) -> Result<(), std::io::Error> {
        let router = self.into_router(allowed_origins);

        tracing::info!("Abacus listening on {}", listener.local_addr()?);

        axum::serve(listener, router).await
    }
}
