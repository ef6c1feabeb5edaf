use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr};
use thiserror::Error;
use uuid::Uuid;

/// 境界を越える識別子の文字数（UUIDの16進表現、ハイフンなし）
pub const ID_HEX_LEN: usize = 32;

/// 識別子のパースエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseIdError {
    #[error("identifier must be 32 hexadecimal characters, got {0}")]
    InvalidLength(usize),
    #[error("identifier contains a non-hexadecimal character")]
    InvalidCharacter,
}

/// 固定長16進テキストから識別子をパースする
///
/// ハイフン付きUUIDや波括弧付きなど、他の表現はすべて拒否する。
pub fn parse_hex_id(s: &str) -> Result<Uuid, ParseIdError> {
    if s.len() != ID_HEX_LEN {
        return Err(ParseIdError::InvalidLength(s.len()));
    }
    if !s.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ParseIdError::InvalidCharacter);
    }
    Uuid::try_parse(s).map_err(|_| ParseIdError::InvalidCharacter)
}

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            pub fn value(&self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0.simple())
            }
        }

        impl FromStr for $name {
            type Err = ParseIdError;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                parse_hex_id(s).map(Self)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

define_id! {
    /// 著者ID
    AuthorId
}

define_id! {
    /// 書籍ID
    BookId
}

define_id! {
    /// 借り手ID
    BorrowerId
}

/// 一意性キーの種類
///
/// 重複チェックとストレージの一意制約違反の両方で、どのキーが衝突したかを表す。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UniqueKey {
    /// (名前, 生年月日)
    NameAndBirthday,
    /// メールアドレス
    Email,
    /// (タイトル, 著者ID)
    TitleAndAuthor,
}

impl UniqueKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            UniqueKey::NameAndBirthday => "name_birthday",
            UniqueKey::Email => "email",
            UniqueKey::TitleAndAuthor => "title_author",
        }
    }
}

impl fmt::Display for UniqueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 生年月日の表記（ゼロ埋めのISO 8601）
pub const BIRTHDAY_FORMAT: &str = "%Y-%m-%d";

/// 生年月日のパースエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("birthday must be a zero-padded YYYY-MM-DD date, got {0:?}")]
pub struct ParseBirthdayError(String);

/// 生年月日をパースする
///
/// 読み戻したときに送られた文字列と一致するよう、`BIRTHDAY_FORMAT`で
/// 書き直して同じ文字列になる表記だけを受け付ける（"1996-5-7"は拒否）。
pub fn parse_birthday(s: &str) -> Result<NaiveDate, ParseBirthdayError> {
    NaiveDate::parse_from_str(s, BIRTHDAY_FORMAT)
        .ok()
        .filter(|date| date.format(BIRTHDAY_FORMAT).to_string() == s)
        .ok_or_else(|| ParseBirthdayError(s.to_string()))
}

/// `#[serde(deserialize_with)]`用の生年月日デシリアライザ
pub fn deserialize_birthday<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_birthday(&s).map_err(serde::de::Error::custom)
}
