//! # リポジトリ
//!
//! ユーザーとチケットの永続化トレイト、およびその PostgreSQL 実装。
//!
//! ## 設計方針
//!
//! - **依存性注入**: ユースケース層はトレイト経由でリポジトリを受け取る
//! - **データベース抽象化**: sqlx を使用し、PostgreSQL 固有の処理をカプセル化
//! - **テスタビリティ**: `mock` モジュールのインメモリ実装に差し替え可能

pub mod ticket_repository;
pub mod user_repository;

pub use ticket_repository::{PostgresTicketRepository, TicketRepository};
pub use user_repository::{PostgresUserRepository, UserRepository};
