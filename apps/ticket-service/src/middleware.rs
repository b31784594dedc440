//! # ミドルウェア
//!
//! ルーターに適用する axum ミドルウェアを定義する。

pub mod identity;

pub use identity::{AuthenticatedUser, USER_ID_HEADER, require_identity};
