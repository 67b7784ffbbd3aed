//! Book endpoints.

use crate::{
    error::ApiResult,
    extractors::{ApiPath, ApiQuery, CurrentUser, ValidatedJson},
    state::AppState,
};
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use ebookstore_application::dto::{BookDto, BookQuery, CreateBookDto, ExternalBookDto, UpdateBookDto};
use ebookstore_domain::{AuthorId, BookId};
use tracing::info;
use uuid::Uuid;

/// Book routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/books", get(list_books).post(create_book))
        .route(
            "/api/books/:id",
            get(get_book).put(update_book).delete(delete_book),
        )
        .route("/api/books/external/:isbn", get(lookup_external_book))
}

/// List books
///
/// Optionally filtered by author.
#[utoipa::path(
    get,
    path = "/api/books",
    tag = "books",
    params(BookQuery),
    responses(
        (status = 200, description = "Books in the catalogue", body = Vec<BookDto>),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_books(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<BookQuery>,
) -> ApiResult<Json<Vec<BookDto>>> {
    let books = state.books().list(query.author_id.map(AuthorId::from_uuid)).await?;
    Ok(Json(books))
}

/// Get book by ID
#[utoipa::path(
    get,
    path = "/api/books/{id}",
    tag = "books",
    params(("id" = Uuid, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book details", body = BookDto),
        (status = 404, description = "Book not found"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_book(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Json<BookDto>> {
    let book = state.books().get(BookId::from_uuid(id)).await?;
    Ok(Json(book))
}

/// Create book
///
/// Requires the Admin role.
#[utoipa::path(
    post,
    path = "/api/books",
    tag = "books",
    request_body = CreateBookDto,
    responses(
        (status = 201, description = "Book created", body = BookDto),
        (status = 400, description = "Malformed JSON"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 409, description = "A book with this ISBN already exists"),
        (status = 422, description = "Validation failed"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_book(
    State(state): State<AppState>,
    user: CurrentUser,
    ValidatedJson(request): ValidatedJson<CreateBookDto>,
) -> ApiResult<impl IntoResponse> {
    let book = state.books().create(request).await?;
    info!(subject = %user.subject, book_id = %book.id, "Book added to catalogue");

    let location = format!("/api/books/{}", book.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(book)))
}

/// Replace book
#[utoipa::path(
    put,
    path = "/api/books/{id}",
    tag = "books",
    params(("id" = Uuid, Path, description = "Book ID")),
    request_body = UpdateBookDto,
    responses(
        (status = 200, description = "Book updated", body = BookDto),
        (status = 404, description = "Book not found"),
        (status = 409, description = "ISBN belongs to another book"),
        (status = 422, description = "Validation failed"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_book(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiPath(id): ApiPath<Uuid>,
    ValidatedJson(request): ValidatedJson<UpdateBookDto>,
) -> ApiResult<Json<BookDto>> {
    let book = state.books().update(BookId::from_uuid(id), request).await?;
    info!(subject = %user.subject, book_id = %book.id, "Book replaced");
    Ok(Json(book))
}

/// Delete book
#[utoipa::path(
    delete,
    path = "/api/books/{id}",
    tag = "books",
    params(("id" = Uuid, Path, description = "Book ID")),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 404, description = "Book not found"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_book(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<StatusCode> {
    state.books().delete(BookId::from_uuid(id)).await?;
    info!(subject = %user.subject, book_id = %id, "Book removed from catalogue");
    Ok(StatusCode::NO_CONTENT)
}

/// Look up a book in the external catalogue
#[utoipa::path(
    get,
    path = "/api/books/external/{isbn}",
    tag = "books",
    params(("isbn" = String, Path, description = "ISBN-10 or ISBN-13")),
    responses(
        (status = 200, description = "Catalogue record", body = ExternalBookDto),
        (status = 400, description = "Invalid ISBN"),
        (status = 404, description = "Unknown to the catalogue"),
        (status = 503, description = "Catalogue unavailable"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn lookup_external_book(
    State(state): State<AppState>,
    ApiPath(isbn): ApiPath<String>,
) -> ApiResult<Json<ExternalBookDto>> {
    let book = state.external_books.lookup(&isbn).await?;
    Ok(Json(book))
}
