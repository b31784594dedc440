//! # エラーレスポンス（RFC 9457 Problem Details）
//!
//! チケット API が返すエラーは [`ProblemKind`] の 5 種類に限られる。
//! 種類ごとに `type` URI・`title`・HTTP ステータスが決まり、
//! 呼び出し側が選ぶのは `detail` だけ。
//!
//! 所有者不一致（`NotAuthorized`）は未認証と同じ 401 だが、`type` で区別できる。

use serde::{Deserialize, Serialize};

const ERROR_TYPE_BASE: &str = "https://support-desk.example.com/errors";

/// 内部エラー時にクライアントへ返す固定メッセージ
pub const INTERNAL_ERROR_DETAIL: &str = "内部エラーが発生しました";

/// エラーの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProblemKind {
   BadRequest,
   /// 呼び出し元のユーザーが存在しない
   Unauthorized,
   /// 他ユーザーのチケット
   NotAuthorized,
   NotFound,
   Internal,
}

impl ProblemKind {
   fn slug(self) -> &'static str {
      match self {
         Self::BadRequest => "bad-request",
         Self::Unauthorized => "unauthorized",
         Self::NotAuthorized => "not-authorized",
         Self::NotFound => "not-found",
         Self::Internal => "internal-error",
      }
   }

   pub fn title(self) -> &'static str {
      match self {
         Self::BadRequest => "Bad Request",
         Self::Unauthorized => "Unauthorized",
         Self::NotAuthorized => "Not Authorized",
         Self::NotFound => "Not Found",
         Self::Internal => "Internal Server Error",
      }
   }

   pub fn status(self) -> u16 {
      match self {
         Self::BadRequest => 400,
         Self::Unauthorized | Self::NotAuthorized => 401,
         Self::NotFound => 404,
         Self::Internal => 500,
      }
   }
}

/// エラーレスポンスボディ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
   #[serde(rename = "type")]
   pub error_type: String,
   pub title:      String,
   pub status:     u16,
   pub detail:     String,
}

impl ErrorResponse {
   pub fn new(kind: ProblemKind, detail: impl Into<String>) -> Self {
      Self {
         error_type: format!("{ERROR_TYPE_BASE}/{}", kind.slug()),
         title:      kind.title().to_string(),
         status:     kind.status(),
         detail:     detail.into(),
      }
   }

   /// 500。detail は [`INTERNAL_ERROR_DETAIL`] 固定
   pub fn internal_error() -> Self {
      Self::new(ProblemKind::Internal, INTERNAL_ERROR_DETAIL)
   }
}
