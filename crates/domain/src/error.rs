//! # ドメイン層エラー定義
//!
//! ビジネスルール違反やドメイン固有の例外状態を表現するエラー型。
//!
//! ## エラーの種類と HTTP ステータスの対応
//!
//! | エラー種別 | HTTP ステータス | 用途 |
//! |-----------|----------------|------|
//! | `Validation` | 400 Bad Request | 入力値の検証失敗 |
//! | `NotFound` | 404 Not Found | エンティティが存在しない |
//! | `Forbidden` | 401 Not Authorized | 他ユーザーのリソースへのアクセス |
//!
//! ステータスへの変換は ticket-service の `CoreError` が一箇所で行う。

use thiserror::Error;

/// ドメイン層で発生するエラー
#[derive(Debug, Error)]
pub enum DomainError {
    /// バリデーションエラー
    ///
    /// - 必須フィールドが未入力
    /// - 文字数制限の超過
    #[error("バリデーションエラー: {0}")]
    Validation(String),

    /// エンティティが見つからない
    #[error("{entity_type} が見つかりません: {id}")]
    NotFound {
        /// エンティティの種類（"Ticket" など）
        entity_type: &'static str,
        /// 検索に使用した識別子
        id:          String,
    },

    /// 権限エラー
    ///
    /// ユーザーは特定できたが、対象リソースの所有者ではない。
    #[error("権限がありません: {0}")]
    Forbidden(String),
}
