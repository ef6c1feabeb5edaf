use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{BookId, BorrowerId, deserialize_birthday, identity::Identity};

/// 借り手の登録リクエスト
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorrowerRequest {
    pub name: String,
    #[serde(deserialize_with = "deserialize_birthday")]
    pub birthday: NaiveDate,
    pub email: String,
}

/// 借り手
///
/// `book_ids`は現在借りている書籍の順序付きリスト。
/// 貸出で末尾に追加され、返却でのみ取り除かれる。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Borrower {
    pub id: BorrowerId,
    pub name: String,
    #[serde(deserialize_with = "deserialize_birthday")]
    pub birthday: NaiveDate,
    pub email: String,
    pub book_ids: Vec<BookId>,
}

impl Identity for Borrower {
    fn name(&self) -> &str {
        &self.name
    }

    fn birthday(&self) -> NaiveDate {
        self.birthday
    }

    fn email(&self) -> &str {
        &self.email
    }
}

/// 純粋関数：借り手を登録する
///
/// 登録直後の借り手は何も借りていない。
pub fn register_borrower(request: BorrowerRequest) -> Borrower {
    Borrower {
        id: BorrowerId::new(),
        name: request.name,
        birthday: request.birthday,
        email: request.email,
        book_ids: Vec::new(),
    }
}
