//! In-memory backing store shared by the in-memory repositories.

use ebookstore_domain::{Author, AuthorId, Book, BookId};
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use crate::{Error, Result};

#[derive(Debug, Default)]
pub(crate) struct Tables {
    pub(crate) authors: BTreeMap<AuthorId, Author>,
    pub(crate) books: BTreeMap<BookId, Book>,
}

/// Thread-safe in-memory store; clones share the same tables
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn read<R>(&self, f: impl FnOnce(&Tables) -> R) -> R {
        f(&self.tables.read())
    }

    pub(crate) fn write<R>(&self, f: impl FnOnce(&mut Tables) -> R) -> R {
        f(&mut self.tables.write())
    }

    /// Insert authors and books under one write lock. Every book is checked
    /// against the existing rows and the batch before anything is stored, so
    /// a rejected batch leaves the tables untouched.
    pub(crate) fn insert_all(&self, authors: &[Author], books: &[Book]) -> Result<()> {
        self.write(|t| {
            {
                let new_authors: HashSet<AuthorId> = authors.iter().map(|a| a.id).collect();
                let mut isbns: HashSet<&str> =
                    t.books.values().map(|b| b.isbn.as_str()).collect();

                for book in books {
                    if !t.authors.contains_key(&book.author_id)
                        && !new_authors.contains(&book.author_id)
                    {
                        return Err(Error::Constraint(format!(
                            "author {} does not exist",
                            book.author_id
                        )));
                    }
                    if !isbns.insert(book.isbn.as_str()) {
                        return Err(Error::Constraint(format!("duplicate isbn {}", book.isbn)));
                    }
                }
            }

            for author in authors {
                t.authors.insert(author.id, author.clone());
            }
            for book in books {
                t.books.insert(book.id, book.clone());
            }
            Ok(())
        })
    }
}
