//! Startup database seeding.
//!
//! The seeder runs once before the listener accepts traffic, inside its own
//! persistence scope. It creates the schema when the backend needs one and
//! inserts a small starter catalogue when the store has no authors yet.

use async_trait::async_trait;
use ebookstore_domain::{Author, Book, Isbn, NewAuthor, NewBook};
use tracing::{info, instrument};

use crate::database::Database;

/// Result of a seeding run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedOutcome {
    /// Starter data was inserted
    Seeded { authors: usize, books: usize },
    /// The store already had data
    Skipped,
    /// Seeding failed; startup continued
    Failed(String),
}

/// Initial-data strategy run at startup
#[async_trait]
pub trait DatabaseSeeder: Send + Sync {
    async fn seed(&self, database: &Database) -> anyhow::Result<SeedOutcome>;
}

struct SeedAuthor {
    name: &'static str,
    biography: &'static str,
    birth_year: i32,
    books: &'static [SeedBook],
}

struct SeedBook {
    title: &'static str,
    isbn: &'static str,
    published_year: i32,
    price_cents: i64,
    stock: i32,
}

const CATALOGUE: &[SeedAuthor] = &[
    SeedAuthor {
        name: "Robert C. Martin",
        biography: "Software engineer and author known for the SOLID principles.",
        birth_year: 1952,
        books: &[
            SeedBook {
                title: "Clean Code",
                isbn: "978-0-13-235088-4",
                published_year: 2008,
                price_cents: 3799,
                stock: 12,
            },
            SeedBook {
                title: "The Clean Coder",
                isbn: "978-0-13-708107-3",
                published_year: 2011,
                price_cents: 3250,
                stock: 7,
            },
        ],
    },
    SeedAuthor {
        name: "Martin Fowler",
        biography: "Author and speaker on software design and refactoring.",
        birth_year: 1963,
        books: &[
            SeedBook {
                title: "Refactoring",
                isbn: "978-0-13-475759-9",
                published_year: 2018,
                price_cents: 4799,
                stock: 5,
            },
            SeedBook {
                title: "Patterns of Enterprise Application Architecture",
                isbn: "978-0-321-12742-6",
                published_year: 2002,
                price_cents: 4999,
                stock: 3,
            },
        ],
    },
    SeedAuthor {
        name: "Eric Evans",
        biography: "Originator of domain-driven design.",
        birth_year: 1962,
        books: &[SeedBook {
            title: "Domain-Driven Design",
            isbn: "978-0-321-12521-7",
            published_year: 2003,
            price_cents: 5499,
            stock: 4,
        }],
    },
];

fn starter_catalogue() -> anyhow::Result<(Vec<Author>, Vec<Book>)> {
    let mut authors = Vec::with_capacity(CATALOGUE.len());
    let mut books = Vec::new();

    for seed in CATALOGUE {
        let author = Author::create(NewAuthor {
            name: seed.name.to_string(),
            biography: Some(seed.biography.to_string()),
            birth_year: Some(seed.birth_year),
        });

        for entry in seed.books {
            books.push(Book::create(NewBook {
                title: entry.title.to_string(),
                isbn: Isbn::parse(entry.isbn)?,
                published_year: entry.published_year,
                price_cents: entry.price_cents,
                stock: entry.stock,
                author_id: author.id,
            }));
        }
        authors.push(author);
    }

    Ok((authors, books))
}

/// Default seeder: ensures the schema, then inserts the starter catalogue
/// into an empty store in one all-or-nothing batch, so a failed run leaves
/// the store empty and the next startup seeds again.
#[derive(Debug, Clone, Copy, Default)]
pub struct DbInitializer;

#[async_trait]
impl DatabaseSeeder for DbInitializer {
    #[instrument(skip(self, database), fields(backend = database.backend()))]
    async fn seed(&self, database: &Database) -> anyhow::Result<SeedOutcome> {
        database.ensure_schema().await?;

        let ctx = database.scope();
        if ctx.authors.count().await? > 0 {
            info!("Database already contains data, skipping seed");
            return Ok(SeedOutcome::Skipped);
        }

        let (authors, books) = starter_catalogue()?;
        database.insert_catalogue(&authors, &books).await?;

        info!(authors = authors.len(), books = books.len(), "Database seeded");
        Ok(SeedOutcome::Seeded {
            authors: authors.len(),
            books: books.len(),
        })
    }
}
