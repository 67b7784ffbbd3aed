//! OpenAPI document and Swagger UI.
//!
//! Mounted only in the development environment.

use crate::{error::ErrorResponse, routes, state::AppState};
use axum::{response::Redirect, routing::get, Router};
use ebookstore_application::dto::{
    AuthorDto, BookDto, CreateAuthorDto, CreateBookDto, ExternalBookDto, UpdateAuthorDto,
    UpdateBookDto,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

/// Path of the generated JSON document
pub const OPENAPI_JSON_PATH: &str = "/swagger/v1/swagger.json";

/// Mount point of the interactive UI
pub const SWAGGER_UI_PATH: &str = "/swagger-ui";

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Authorization: Bearer <token>"))
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "EBookStore API",
        version = "v1",
        description = "Bookstore API",
        contact(name = "EBookStore Support", email = "support@ebookstore.com")
    ),
    paths(
        routes::health::health,
        routes::health::ready,
        routes::books::list_books,
        routes::books::get_book,
        routes::books::create_book,
        routes::books::update_book,
        routes::books::delete_book,
        routes::books::lookup_external_book,
        routes::authors::list_authors,
        routes::authors::get_author,
        routes::authors::list_author_books,
        routes::authors::create_author,
        routes::authors::update_author,
        routes::authors::delete_author,
    ),
    components(schemas(
        BookDto,
        CreateBookDto,
        UpdateBookDto,
        AuthorDto,
        CreateAuthorDto,
        UpdateAuthorDto,
        ExternalBookDto,
        ErrorResponse,
        routes::health::HealthResponse,
        routes::health::ReadinessResponse,
        routes::health::ReadinessChecks,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Liveness and readiness probes"),
        (name = "books", description = "Book catalogue"),
        (name = "authors", description = "Authors"),
    )
)]
pub struct ApiDoc;

/// Swagger UI, the JSON document, and `/swagger` redirecting to the UI
pub fn swagger_routes() -> Router<AppState> {
    Router::new()
        .merge(SwaggerUi::new(SWAGGER_UI_PATH).url(OPENAPI_JSON_PATH, ApiDoc::openapi()))
        .route("/swagger", get(|| async { Redirect::temporary("/swagger-ui/") }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_metadata() {
        let doc = ApiDoc::openapi();

        assert_eq!(doc.info.title, "EBookStore API");
        assert_eq!(doc.info.version, "v1");
        assert_eq!(doc.info.description.as_deref(), Some("Bookstore API"));
        assert_eq!(
            doc.info.contact.and_then(|c| c.email).as_deref(),
            Some("support@ebookstore.com")
        );
    }

    #[test]
    fn test_document_lists_routes_and_bearer_scheme() {
        let doc = ApiDoc::openapi();

        assert!(doc.paths.paths.contains_key("/api/books"));
        assert!(doc.paths.paths.contains_key("/api/authors/{id}/books"));
        assert!(doc
            .components
            .map(|c| c.security_schemes.contains_key("bearer_auth"))
            .unwrap_or(false));
    }
}
