//! # Support Desk ドメイン層
//!
//! サポートチケットの中核となるドメインモデルを定義する。
//!
//! ## 依存関係の方向
//!
//! ```text
//! ticket-service → infra → domain
//! ```
//!
//! ドメイン層はインフラ層（DB、外部サービス）には一切依存しない。
//!
//! ## モジュール構成
//!
//! - [`error`] - ドメイン層で発生するエラーの定義
//! - [`clock`] - 時刻プロバイダ
//! - [`user`] - ユーザー（チケットの所有者）
//! - [`ticket`] - サポートチケット
//!
//! ## 使用例
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use support_desk_domain::{
//!     ticket::{Description, Product, Ticket, TicketId},
//!     user::UserId,
//! };
//!
//! let owner = UserId::new();
//! let ticket = Ticket::new(
//!     TicketId::new(),
//!     owner.clone(),
//!     Product::new("Laptop")?,
//!     Description::new("Won't boot")?,
//!     chrono::Utc::now(),
//! );
//!
//! assert!(ticket.is_owned_by(&owner));
//! assert_eq!(ticket.status().as_str(), "requested");
//! # Ok(())
//! # }
//! ```

#[macro_use]
mod macros;

pub mod clock;
pub mod error;
pub mod ticket;
pub mod user;

pub use error::DomainError;
