//! # ユーザー
//!
//! チケットの所有者となるユーザーエンティティ。
//!
//! ユーザーの登録・認証はこのサービスの責務外で、ここでは
//! 認証済み ID に対応するレコードが存在するかの確認にのみ使う。

use chrono::{DateTime, Utc};

use crate::DomainError;

define_uuid_id! {
    /// ユーザー ID（一意識別子）
    ///
    /// チケットの `user`（所有者）フィールドにも格納される。
    pub struct UserId;
}

define_validated_string! {
    /// ユーザー名（値オブジェクト）
    pub struct UserName {
        label: "ユーザー名",
        max_length: 100,
    }
}

/// メールアドレス（値オブジェクト）
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Email(String);

impl Email {
    /// メールアドレスを作成する
    ///
    /// `local@domain` の形式で、いずれの部分も空でないこと。
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into().trim().to_lowercase();

        let Some((local, domain)) = value.split_once('@') else {
            return Err(DomainError::Validation(
                "メールアドレスの形式が不正です".to_string(),
            ));
        };

        if local.is_empty() || domain.is_empty() || value.chars().count() > 255 {
            return Err(DomainError::Validation(
                "メールアドレスの形式が不正です".to_string(),
            ));
        }

        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// ユーザーエンティティ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id:         UserId,
    name:       UserName,
    email:      Email,
    created_at: DateTime<Utc>,
}

impl User {
    pub fn new(id: UserId, name: UserName, email: Email, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name,
            email,
            created_at,
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn name(&self) -> &UserName {
        &self.name
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
