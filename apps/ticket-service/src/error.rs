//! # Ticket Service エラー定義
//!
//! ユースケースの失敗を表す `CoreError` と、HTTP レスポンスへの変換を定義する。
//! ステータスコードへの対応付けはこのファイルの `IntoResponse` 実装だけが行う。
//!
//! | エラー | ステータス |
//! |--------|-----------|
//! | `Unauthenticated` | 401 |
//! | `Forbidden` | 401（他ユーザーのチケット） |
//! | `NotFound` | 404 |
//! | `BadRequest` | 400 |
//! | `Database` | 500 |

use axum::{
   Json,
   http::StatusCode,
   response::{IntoResponse, Response},
};
use support_desk_domain::DomainError;
use support_desk_infra::InfraError;
use support_desk_shared::{ErrorResponse, ProblemKind};
use thiserror::Error;

/// Ticket Service で発生するエラー
#[derive(Debug, Error)]
pub enum CoreError {
   /// 認証済み ID に対応するユーザーが存在しない
   #[error("認証エラー: {0}")]
   Unauthenticated(String),

   /// リソースが見つからない
   #[error("リソースが見つかりません: {0}")]
   NotFound(String),

   /// 他ユーザーのリソースへのアクセス
   #[error("権限がありません: {0}")]
   Forbidden(String),

   /// 不正なリクエスト
   #[error("不正なリクエスト: {0}")]
   BadRequest(String),

   /// データベースエラー
   #[error("データベースエラー: {0}")]
   Database(#[from] InfraError),
}

impl From<DomainError> for CoreError {
   fn from(err: DomainError) -> Self {
      match err {
         DomainError::Validation(msg) => CoreError::BadRequest(msg),
         DomainError::NotFound { entity_type, id } => {
            CoreError::NotFound(format!("{entity_type} が見つかりません: {id}"))
         }
         DomainError::Forbidden(msg) => CoreError::Forbidden(msg),
      }
   }
}

impl CoreError {
   /// クライアントに返すエラーボディ
   fn to_error_response(&self) -> ErrorResponse {
      match self {
         CoreError::Unauthenticated(msg) => ErrorResponse::new(ProblemKind::Unauthorized, msg),
         CoreError::NotFound(msg) => ErrorResponse::new(ProblemKind::NotFound, msg),
         CoreError::Forbidden(msg) => ErrorResponse::new(ProblemKind::NotAuthorized, msg),
         CoreError::BadRequest(msg) => ErrorResponse::new(ProblemKind::BadRequest, msg),
         CoreError::Database(_) => ErrorResponse::internal_error(),
      }
   }
}

impl IntoResponse for CoreError {
   fn into_response(self) -> Response {
      if let CoreError::Database(e) = &self {
         tracing::error!(
            error = %e,
            span_trace = %e.span_trace(),
            "データベースエラー"
         );
      }

      let body = self.to_error_response();
      let status = StatusCode::from_u16(body.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

      (status, Json(body)).into_response()
   }
}
