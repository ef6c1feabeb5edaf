use crate::domain::{BookId, Borrower, BorrowerId, IdentityFilter};
use crate::ports::borrower_repository::{
    BorrowerRepository as BorrowerRepositoryTrait, HeldBookRemoval,
};
use crate::ports::{Result, StoreError};
use async_trait::async_trait;
use std::sync::Mutex;

use super::lock;

/// BorrowerRepositoryのインメモリ実装
///
/// 検索から更新までコレクションのロックを保持するので、
/// 借りている書籍のリストの更新は1件のドキュメント更新と同じく不可分になる。
#[derive(Default)]
pub struct BorrowerRepository {
    borrowers: Mutex<Vec<Borrower>>,
}

impl BorrowerRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BorrowerRepositoryTrait for BorrowerRepository {
    async fn insert(&self, borrower: Borrower) -> Result<()> {
        let mut borrowers = lock(&self.borrowers)?;

        for filter in
            IdentityFilter::person_keys(&borrower.name, borrower.birthday, &borrower.email)
        {
            if borrowers.iter().any(|existing| filter.matches(existing)) {
                return Err(StoreError::Conflict(filter.key()));
            }
        }

        borrowers.push(borrower);
        Ok(())
    }

    async fn find_by_id(&self, borrower_id: BorrowerId) -> Result<Option<Borrower>> {
        let borrowers = lock(&self.borrowers)?;
        Ok(borrowers.iter().find(|b| b.id == borrower_id).cloned())
    }

    async fn find_one(&self, filter: &IdentityFilter) -> Result<Option<Borrower>> {
        let borrowers = lock(&self.borrowers)?;
        Ok(borrowers.iter().find(|b| filter.matches(*b)).cloned())
    }

    async fn append_book(
        &self,
        borrower_id: BorrowerId,
        book_id: BookId,
    ) -> Result<Option<Borrower>> {
        let mut borrowers = lock(&self.borrowers)?;

        Ok(borrowers
            .iter_mut()
            .find(|b| b.id == borrower_id)
            .map(|borrower| {
                borrower.book_ids.push(book_id);
                borrower.clone()
            }))
    }

    async fn insert_book_at(
        &self,
        borrower_id: BorrowerId,
        book_id: BookId,
        position: usize,
    ) -> Result<Option<Borrower>> {
        let mut borrowers = lock(&self.borrowers)?;

        Ok(borrowers
            .iter_mut()
            .find(|b| b.id == borrower_id)
            .map(|borrower| {
                let position = position.min(borrower.book_ids.len());
                borrower.book_ids.insert(position, book_id);
                borrower.clone()
            }))
    }

    async fn remove_book(
        &self,
        borrower_id: BorrowerId,
        book_id: BookId,
    ) -> Result<HeldBookRemoval> {
        let mut borrowers = lock(&self.borrowers)?;

        let Some(borrower) = borrowers.iter_mut().find(|b| b.id == borrower_id) else {
            return Ok(HeldBookRemoval::BorrowerMissing);
        };

        let Some(position) = borrower.book_ids.iter().position(|id| *id == book_id) else {
            return Ok(HeldBookRemoval::NotHeld);
        };

        borrower.book_ids.remove(position);
        Ok(HeldBookRemoval::Removed {
            borrower: borrower.clone(),
            position,
        })
    }
}
