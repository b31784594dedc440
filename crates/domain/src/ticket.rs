//! # サポートチケット
//!
//! ユーザーが製品の不具合などを問い合わせるためのチケット。
//!
//! ## 所有者
//!
//! チケットは作成時の認証済みユーザーを `user`（所有者）として保持する。
//! 所有者と ID は作成後に変更されない。更新は [`TicketUpdate`] を経由し、
//! 変更可能なフィールド（製品・説明・ステータス）のみを受け付ける。
//!
//! ## ステータス
//!
//! 作成時は常に `"requested"`。それ以降の遷移ルールはこの層では強制せず、
//! 更新リクエストで指定された値をそのまま書き込む。

use chrono::{DateTime, Utc};

use crate::{DomainError, user::UserId};

define_uuid_id! {
    /// チケットの一意識別子
    pub struct TicketId;
}

define_validated_string! {
    /// 製品名（値オブジェクト）
    pub struct Product {
        label: "製品",
        max_length: 100,
    }
}

define_validated_string! {
    /// 問い合わせ内容（値オブジェクト）
    pub struct Description {
        label: "説明",
        max_length: 5000,
    }
}

define_validated_string! {
    /// チケットステータス（値オブジェクト）
    ///
    /// 遷移ルールを持たないため列挙型ではなく文字列で保持する。
    pub struct TicketStatus {
        label: "ステータス",
        max_length: 50,
    }
}

/// 作成直後のステータス
pub const REQUESTED_STATUS: &str = "requested";

impl TicketStatus {
    /// 作成直後のステータス（`"requested"`）
    pub fn requested() -> Self {
        Self(REQUESTED_STATUS.to_string())
    }
}

/// チケットの更新内容
///
/// 変更しないフィールドは `None`。所有者と ID は含まない。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketUpdate {
    pub product:     Option<Product>,
    pub description: Option<Description>,
    pub status:      Option<TicketStatus>,
}

impl TicketUpdate {
    /// 変更対象のフィールドが 1 つもないか
    pub fn is_empty(&self) -> bool {
        self.product.is_none() && self.description.is_none() && self.status.is_none()
    }
}

/// チケットエンティティ
///
/// # 不変条件
///
/// - `user` は作成時に設定され、以後変更されない
/// - `updated_at >= created_at`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    id:          TicketId,
    user:        UserId,
    product:     Product,
    description: Description,
    status:      TicketStatus,
    created_at:  DateTime<Utc>,
    updated_at:  DateTime<Utc>,
}

impl Ticket {
    /// 新しいチケットを作成する（ステータスは `"requested"`）
    pub fn new(
        id: TicketId,
        user: UserId,
        product: Product,
        description: Description,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user,
            product,
            description,
            status: TicketStatus::requested(),
            created_at: now,
            updated_at: now,
        }
    }

    /// データベースからチケットを復元する
    pub fn from_db(
        id: TicketId,
        user: UserId,
        product: Product,
        description: Description,
        status: TicketStatus,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user,
            product,
            description,
            status,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> &TicketId {
        &self.id
    }

    pub fn user(&self) -> &UserId {
        &self.user
    }

    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn description(&self) -> &Description {
        &self.description
    }

    pub fn status(&self) -> &TicketStatus {
        &self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// 指定ユーザーがこのチケットの所有者か
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        self.user == *user_id
    }

    /// 指定ユーザーが所有者であることを確認する
    ///
    /// 所有者でなければ `DomainError::Forbidden` を返す。
    pub fn ensure_owned_by(&self, user_id: &UserId) -> Result<(), DomainError> {
        if self.is_owned_by(user_id) {
            Ok(())
        } else {
            Err(DomainError::Forbidden(
                "このチケットにアクセスする権限がありません".to_string(),
            ))
        }
    }

    /// 更新内容を適用した新しいチケットを返す
    ///
    /// 指定されたフィールドのみ置き換え、`updated_at` を更新する。
    pub fn apply(self, update: TicketUpdate, now: DateTime<Utc>) -> Self {
        Self {
            product: update.product.unwrap_or(self.product),
            description: update.description.unwrap_or(self.description),
            status: update.status.unwrap_or(self.status),
            updated_at: now,
            ..self
        }
    }
}
