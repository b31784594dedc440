//! # Support Desk 共有ユーティリティ
//!
//! チケット API のエラーボディ・ヘルスチェック応答と、
//! サーバー起動時のトレーシング設定（`observability` feature）。

pub mod error_response;
pub mod health;
pub mod observability;

pub use error_response::{ErrorResponse, INTERNAL_ERROR_DETAIL, ProblemKind};
pub use health::{CheckStatus, HealthResponse, ReadinessResponse, ReadinessStatus};
