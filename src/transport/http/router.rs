use crate::domain::{Book, BookPayload, FieldError, FieldProblem};
use crate::transport::http::handlers::{books, health};
use crate::transport::http::types::{AppState, ErrorBody, HealthBody, MessageBody};
use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(title = "Bookstore API", description = "CRUD service for books"),
    paths(
        health::healthcheck_handler,
        books::list_books_handler,
        books::get_book_handler,
        books::create_book_handler,
        books::update_book_handler,
        books::delete_book_handler
    ),
    components(schemas(
        Book,
        BookPayload,
        FieldError,
        FieldProblem,
        ErrorBody,
        MessageBody,
        HealthBody
    ))
)]
pub struct ApiDoc;

/// Bare routes, without docs or middleware.
pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .route(
            "/api/books",
            get(books::list_books_handler).post(books::create_book_handler),
        )
        .route(
            "/api/books/:id",
            get(books::get_book_handler)
                .put(books::update_book_handler)
                .delete(books::delete_book_handler),
        )
        .with_state(app_state)
}

/// The full service: routes, Swagger UI at `/swagger-ui`, permissive CORS and request tracing.
pub fn create_app(app_state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    create_router(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
