//! # 認証済み ID ミドルウェア
//!
//! 上流（API ゲートウェイ / BFF）が認証済みユーザーの ID を `X-User-Id` ヘッダーで
//! 渡してくる前提で、それを [`AuthenticatedUser`] としてリクエスト extensions に格納する。
//!
//! トークン検証などの認証処理そのものはこのサービスの責務外。
//!
//! ## 使い方
//!
//! ```rust,ignore
//! use axum::middleware::from_fn;
//!
//! Router::new()
//!     .route("/tickets", get(list_tickets))
//!     .layer(from_fn(require_identity))
//! ```
//!
//! ハンドラでは `Extension<AuthenticatedUser>` で受け取る。

use axum::{
   extract::Request,
   middleware::Next,
   response::{IntoResponse, Response},
};
use support_desk_domain::user::UserId;
use uuid::Uuid;

use crate::error::CoreError;

/// 認証済みユーザー ID を運ぶヘッダー名
pub const USER_ID_HEADER: &str = "x-user-id";

/// 上流で認証されたリクエスト元ユーザー
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser(pub UserId);

impl AuthenticatedUser {
   pub fn user_id(&self) -> &UserId {
      &self.0
   }
}

/// `X-User-Id` ヘッダーから認証済みユーザーを取り出すミドルウェア
///
/// ヘッダーがない、または UUID として解釈できない場合は 401 を返し、
/// ハンドラは実行しない。
pub async fn require_identity(mut request: Request, next: Next) -> Response {
   let user_id = request
      .headers()
      .get(USER_ID_HEADER)
      .and_then(|v| v.to_str().ok())
      .and_then(|v| Uuid::parse_str(v.trim()).ok())
      .map(UserId::from_uuid);

   let Some(user_id) = user_id else {
      tracing::debug!("認証済みユーザー ID がないリクエストを拒否しました");
      return CoreError::Unauthenticated("認証が必要です".to_string()).into_response();
   };

   tracing::Span::current().record("user_id", tracing::field::display(&user_id));
   request.extensions_mut().insert(AuthenticatedUser(user_id));

   next.run(request).await
}
