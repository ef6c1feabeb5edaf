use serde::{Deserialize, Serialize};

use super::{AuthorId, BookId};

/// 書籍の登録リクエスト
///
/// 貸出可否は受け付けない。登録直後の書籍は常に貸出可能。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub author_id: AuthorId,
    #[serde(default)]
    pub genres: Vec<String>,
}

/// 書籍
///
/// 不変条件：`available == false` ⇔ ちょうど1人の借り手のリストにこのIDがある
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub description: String,
    pub author_id: AuthorId,
    pub genres: Vec<String>,
    pub available: bool,
}

/// 純粋関数：書籍を登録する
///
/// 著者の存在確認と(タイトル, 著者)の一意性はアプリケーション層で行う。
pub fn register_book(request: BookRequest) -> Book {
    Book {
        id: BookId::new(),
        title: request.title,
        description: request.description,
        author_id: request.author_id,
        genres: request.genres,
        available: true,
    }
}
