use chrono::NaiveDate;

use super::UniqueKey;

/// 人物レコード（著者・借り手）の識別情報
pub trait Identity {
    fn name(&self) -> &str;
    fn birthday(&self) -> NaiveDate;
    fn email(&self) -> &str;
}

/// 一意性キーによる検索条件
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityFilter {
    NameAndBirthday { name: String, birthday: NaiveDate },
    Email(String),
}

impl IdentityFilter {
    /// 人物レコードの検索条件を検査順に返す
    ///
    /// (名前, 生年月日)が先、メールアドレスが後。
    pub fn person_keys(name: &str, birthday: NaiveDate, email: &str) -> [IdentityFilter; 2] {
        [
            IdentityFilter::NameAndBirthday {
                name: name.to_string(),
                birthday,
            },
            IdentityFilter::Email(email.to_string()),
        ]
    }

    pub fn key(&self) -> UniqueKey {
        match self {
            IdentityFilter::NameAndBirthday { .. } => UniqueKey::NameAndBirthday,
            IdentityFilter::Email(_) => UniqueKey::Email,
        }
    }

    pub fn matches<T: Identity + ?Sized>(&self, record: &T) -> bool {
        match self {
            IdentityFilter::NameAndBirthday { name, birthday } => {
                record.name() == name && record.birthday() == *birthday
            }
            IdentityFilter::Email(email) => record.email() == email,
        }
    }
}
