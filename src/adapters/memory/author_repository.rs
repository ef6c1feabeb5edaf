use crate::domain::{Author, AuthorId, IdentityFilter};
use crate::ports::author_repository::AuthorRepository as AuthorRepositoryTrait;
use crate::ports::{Result, StoreError};
use async_trait::async_trait;
use std::sync::Mutex;

use super::lock;

/// AuthorRepositoryのインメモリ実装
#[derive(Default)]
pub struct AuthorRepository {
    authors: Mutex<Vec<Author>>,
}

impl AuthorRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AuthorRepositoryTrait for AuthorRepository {
    async fn insert(&self, author: Author) -> Result<()> {
        let mut authors = lock(&self.authors)?;

        for filter in IdentityFilter::person_keys(&author.name, author.birthday, &author.email) {
            if authors.iter().any(|existing| filter.matches(existing)) {
                return Err(StoreError::Conflict(filter.key()));
            }
        }

        authors.push(author);
        Ok(())
    }

    async fn find_by_id(&self, author_id: AuthorId) -> Result<Option<Author>> {
        let authors = lock(&self.authors)?;
        Ok(authors.iter().find(|a| a.id == author_id).cloned())
    }

    async fn find_one(&self, filter: &IdentityFilter) -> Result<Option<Author>> {
        let authors = lock(&self.authors)?;
        Ok(authors.iter().find(|a| filter.matches(*a)).cloned())
    }
}
