//! Author service tests over the in-memory store

use ebookstore_application::dto::UpdateAuthorDto;
use ebookstore_application::{ApplicationError, AuthorService, BookService};
use ebookstore_domain::AuthorId;
use ebookstore_infrastructure::Database;
use ebookstore_testing::{AuthorBuilder, BookBuilder};

#[tokio::test]
async fn test_create_list_and_count_books() {
    let database = Database::in_memory();
    let authors = AuthorService::new(database.scope());

    let fowler = authors
        .create(AuthorBuilder::new().with_name("Martin Fowler").build_dto())
        .await
        .unwrap();
    authors
        .create(AuthorBuilder::new().with_name("Eric Evans").build_dto())
        .await
        .unwrap();
    assert_eq!(fowler.book_count, 0);

    BookService::new(database.scope())
        .create(
            BookBuilder::new()
                .with_author(AuthorId::from_uuid(fowler.id))
                .build_create_dto(),
        )
        .await
        .unwrap();

    let listed = authors.list().await.unwrap();
    let names: Vec<_> = listed.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["Eric Evans", "Martin Fowler"]);

    let fetched = authors.get(AuthorId::from_uuid(fowler.id)).await.unwrap();
    assert_eq!(fetched.book_count, 1);
}

#[tokio::test]
async fn test_update_author() {
    let database = Database::in_memory();
    let authors = AuthorService::new(database.scope());
    let created = authors.create(AuthorBuilder::new().build_dto()).await.unwrap();

    let updated = authors
        .update(
            AuthorId::from_uuid(created.id),
            UpdateAuthorDto {
                name: "Kent Beck".to_string(),
                biography: None,
                birth_year: Some(1961),
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.name, "Kent Beck");
    assert!(updated.biography.is_none());
    assert_eq!(updated.birth_year, Some(1961));
}

#[tokio::test]
async fn test_author_with_books_cannot_be_deleted() {
    let database = Database::in_memory();
    let authors = AuthorService::new(database.scope());
    let created = authors.create(AuthorBuilder::new().build_dto()).await.unwrap();
    let id = AuthorId::from_uuid(created.id);

    BookService::new(database.scope())
        .create(BookBuilder::new().with_author(id).build_create_dto())
        .await
        .unwrap();

    let err = authors.delete(id).await.unwrap_err();
    assert!(matches!(err, ApplicationError::Conflict(_)));
}

#[tokio::test]
async fn test_delete_author() {
    let database = Database::in_memory();
    let authors = AuthorService::new(database.scope());
    let created = authors.create(AuthorBuilder::new().build_dto()).await.unwrap();
    let id = AuthorId::from_uuid(created.id);

    authors.delete(id).await.unwrap();

    assert!(matches!(authors.get(id).await, Err(ApplicationError::NotFound(_))));
    assert!(matches!(authors.delete(id).await, Err(ApplicationError::NotFound(_))));
}
