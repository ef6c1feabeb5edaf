use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{AuthorId, deserialize_birthday, identity::Identity};

/// 著者の登録リクエスト
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorRequest {
    pub name: String,
    #[serde(deserialize_with = "deserialize_birthday")]
    pub birthday: NaiveDate,
    pub email: String,
}

/// 著者
///
/// 作成後は変更されない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: AuthorId,
    pub name: String,
    #[serde(deserialize_with = "deserialize_birthday")]
    pub birthday: NaiveDate,
    pub email: String,
}

impl Identity for Author {
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

/// 純粋関数：著者を登録する
///
/// 新しいIDを採番し、リクエストの内容をそのまま保持した著者を返す。
/// 一意性の検証はアプリケーション層とストレージの責務。
pub fn register_author(request: AuthorRequest) -> Author {
    Author {
        id: AuthorId::new(),
        name: request.name,
        birthday: request.birthday,
        email: request.email,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_author_keeps_submitted_fields() {
        let request = AuthorRequest {
            name: "Bober".to_string(),
            birthday: NaiveDate::from_ymd_opt(1996, 5, 17).unwrap(),
            email: "bober@author.com".to_string(),
        };

        let author = register_author(request.clone());

        assert_eq!(author.name, request.name);
        assert_eq!(author.birthday, request.birthday);
        assert_eq!(author.email, request.email);
    }

    #[test]
    fn test_author_request_parses_iso_birthday() {
        let request: AuthorRequest = serde_json::from_str(
            r#"{"name":"Bober","birthday":"1996-05-17","email":"bober@author.com"}"#,
        )
        .unwrap();

        assert_eq!(
            request.birthday,
            NaiveDate::from_ymd_opt(1996, 5, 17).unwrap()
        );
    }

    #[test]
    fn test_author_birthday_reads_back_as_submitted() {
        let submitted = r#"{"name":"Bober","birthday":"1996-05-07","email":"bober@author.com"}"#;
        let request: AuthorRequest = serde_json::from_str(submitted).unwrap();

        let author = register_author(request);
        let json = serde_json::to_value(&author).unwrap();
        assert_eq!(json["birthday"], "1996-05-07");

        let unpadded = r#"{"name":"Bober","birthday":"1996-5-7","email":"bober@author.com"}"#;
        assert!(serde_json::from_str::<AuthorRequest>(unpadded).is_err());
    }
}
