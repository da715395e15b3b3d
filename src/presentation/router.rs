use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, patch, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::ChatProvider;
use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    chat_handler, create_conversation_handler, delete_conversation_handler, health_handler,
    image_handler, list_conversations_handler, rename_conversation_handler, root_handler,
};
use crate::presentation::state::AppState;

pub fn create_router<P>(state: AppState<P>) -> Router
where
    P: ChatProvider + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let upload_limit = state.upload_limit_bytes;

    let api = Router::new()
        .route("/conversation", post(create_conversation_handler::<P>))
        .route("/conversations", get(list_conversations_handler::<P>))
        .route(
            "/conversation/{id}",
            patch(rename_conversation_handler::<P>).delete(delete_conversation_handler::<P>),
        )
        .route("/chat", post(chat_handler::<P>))
        .route("/image", post(image_handler::<P>));

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .nest("/api", api)
        .layer(DefaultBodyLimit::max(upload_limit))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
