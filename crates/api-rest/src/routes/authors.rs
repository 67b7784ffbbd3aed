//! Author endpoints.

use crate::{
    error::ApiResult,
    extractors::{ApiPath, CurrentUser, ValidatedJson},
    state::AppState,
};
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use ebookstore_application::dto::{AuthorDto, BookDto, CreateAuthorDto, UpdateAuthorDto};
use ebookstore_domain::AuthorId;
use tracing::info;
use uuid::Uuid;

/// Author routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/authors", get(list_authors).post(create_author))
        .route(
            "/api/authors/:id",
            get(get_author).put(update_author).delete(delete_author),
        )
        .route("/api/authors/:id/books", get(list_author_books))
}

/// List authors
#[utoipa::path(
    get,
    path = "/api/authors",
    tag = "authors",
    responses(
        (status = 200, description = "All authors with book counts", body = Vec<AuthorDto>),
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_authors(State(state): State<AppState>) -> ApiResult<Json<Vec<AuthorDto>>> {
    Ok(Json(state.authors().list().await?))
}

/// Get author by ID
#[utoipa::path(
    get,
    path = "/api/authors/{id}",
    tag = "authors",
    params(("id" = Uuid, Path, description = "Author ID")),
    responses(
        (status = 200, description = "Author details", body = AuthorDto),
        (status = 404, description = "Author not found"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_author(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Json<AuthorDto>> {
    Ok(Json(state.authors().get(AuthorId::from_uuid(id)).await?))
}

/// Books written by an author
#[utoipa::path(
    get,
    path = "/api/authors/{id}/books",
    tag = "authors",
    params(("id" = Uuid, Path, description = "Author ID")),
    responses(
        (status = 200, description = "The author's books", body = Vec<BookDto>),
        (status = 404, description = "Author not found"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_author_books(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Json<Vec<BookDto>>> {
    Ok(Json(state.books().list_by_author(AuthorId::from_uuid(id)).await?))
}

/// Create author
#[utoipa::path(
    post,
    path = "/api/authors",
    tag = "authors",
    request_body = CreateAuthorDto,
    responses(
        (status = 201, description = "Author created", body = AuthorDto),
        (status = 403, description = "Forbidden"),
        (status = 422, description = "Validation failed"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_author(
    State(state): State<AppState>,
    user: CurrentUser,
    ValidatedJson(request): ValidatedJson<CreateAuthorDto>,
) -> ApiResult<impl IntoResponse> {
    let author = state.authors().create(request).await?;
    info!(subject = %user.subject, author_id = %author.id, "Author added");

    let location = format!("/api/authors/{}", author.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(author)))
}

/// Replace author
#[utoipa::path(
    put,
    path = "/api/authors/{id}",
    tag = "authors",
    params(("id" = Uuid, Path, description = "Author ID")),
    request_body = UpdateAuthorDto,
    responses(
        (status = 200, description = "Author updated", body = AuthorDto),
        (status = 404, description = "Author not found"),
        (status = 422, description = "Validation failed"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_author(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiPath(id): ApiPath<Uuid>,
    ValidatedJson(request): ValidatedJson<UpdateAuthorDto>,
) -> ApiResult<Json<AuthorDto>> {
    let author = state.authors().update(AuthorId::from_uuid(id), request).await?;
    info!(subject = %user.subject, author_id = %author.id, "Author replaced");
    Ok(Json(author))
}

/// Delete author
///
/// Refused with 409 while the author still has books.
#[utoipa::path(
    delete,
    path = "/api/authors/{id}",
    tag = "authors",
    params(("id" = Uuid, Path, description = "Author ID")),
    responses(
        (status = 204, description = "Author deleted"),
        (status = 404, description = "Author not found"),
        (status = 409, description = "Author still has books"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_author(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<StatusCode> {
    state.authors().delete(AuthorId::from_uuid(id)).await?;
    info!(subject = %user.subject, author_id = %id, "Author removed");
    Ok(StatusCode::NO_CONTENT)
}
