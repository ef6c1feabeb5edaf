use crate::domain::BookId;
use crate::ports::StoreError;
use thiserror::Error;

/// エラーの原因による分類
///
/// API層はこの分類だけを見てステータスコードを決める。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 一意キーの衝突、または存在しない関連エンティティの参照
    Conflict,
    /// 操作の対象が存在しない
    NotFound,
    /// 前提条件違反（貸出不可の書籍など）
    Precondition,
    /// ストレージ障害
    Storage,
    /// ストレージに到達できない（死活監視の失敗）
    Unavailable,
}

/// 図書館アプリケーション層のエラー
///
/// `Display`の文言はクライアントにそのまま返される。
#[derive(Debug, Error)]
pub enum LibraryError {
    /// (名前, 生年月日)が既存の著者と衝突
    #[error("author already exists")]
    AuthorAlreadyExists,

    /// (名前, 生年月日)が既存の借り手と衝突
    #[error("borrower already exists")]
    BorrowerAlreadyExists,

    /// メールアドレスが既存と衝突
    #[error("email already exists")]
    EmailAlreadyExists,

    /// (タイトル, 著者)が既存の書籍と衝突
    #[error("book already exists")]
    BookAlreadyExists,

    /// 書籍が参照する著者が存在しない
    #[error("author doesn't exists")]
    AuthorNotFound,

    /// 書籍が存在しない
    #[error("book doesn't exist")]
    BookNotFound,

    /// 借り手が存在しない
    #[error("borrower doesn't exist")]
    BorrowerNotFound,

    /// 書籍が貸出中
    #[error("book isn't available")]
    BookNotAvailable,

    /// 返却しようとした書籍をその借り手が借りていない
    #[error("book isn't borrowed by this borrower")]
    BookNotHeld,

    /// 重複チェックの検索自体が失敗した
    #[error("uniqueness check failed")]
    IdentityCheckFailed(#[source] StoreError),

    /// 著者コレクションのエラー
    #[error("author store error")]
    AuthorStoreError(#[source] StoreError),

    /// 書籍コレクションのエラー
    #[error("book store error")]
    BookStoreError(#[source] StoreError),

    /// 借り手コレクションのエラー
    #[error("borrower store error")]
    BorrowerStoreError(#[source] StoreError),

    /// 2つ目の書き込みの失敗後、1つ目の書き込みの取り消しにも失敗した
    ///
    /// 書籍の貸出可否と借り手のリストが食い違ったままになっている。
    /// `source`が`None`なのは、取り消しの書き込み自体は成功したが
    /// 対象のレコードが消えていて反映できなかった場合。
    #[error("book {book_id} left in an inconsistent state: {cause}")]
    CompensationFailed {
        book_id: BookId,
        cause: Box<LibraryError>,
        #[source]
        source: Option<StoreError>,
    },

    /// 死活監視でストレージに到達できなかった
    #[error("storage is unreachable")]
    StorageUnavailable(#[source] StoreError),
}

impl LibraryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LibraryError::AuthorAlreadyExists
            | LibraryError::BorrowerAlreadyExists
            | LibraryError::EmailAlreadyExists
            | LibraryError::BookAlreadyExists
            | LibraryError::AuthorNotFound => ErrorKind::Conflict,
            LibraryError::BookNotFound | LibraryError::BorrowerNotFound => ErrorKind::NotFound,
            LibraryError::BookNotAvailable | LibraryError::BookNotHeld => ErrorKind::Precondition,
            LibraryError::IdentityCheckFailed(_)
            | LibraryError::AuthorStoreError(_)
            | LibraryError::BookStoreError(_)
            | LibraryError::BorrowerStoreError(_)
            | LibraryError::CompensationFailed { .. } => ErrorKind::Storage,
            LibraryError::StorageUnavailable(_) => ErrorKind::Unavailable,
        }
    }
}

/// アプリケーション層の Result型
pub type Result<T> = std::result::Result<T, LibraryError>;
