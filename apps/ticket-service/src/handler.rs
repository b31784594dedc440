//! # HTTP ハンドラ
//!
//! - [`health`] - ヘルスチェック（Liveness / Readiness）
//! - [`ticket`] - チケット CRUD

pub mod health;
pub mod ticket;

pub use health::{ReadinessState, health_check, readiness_check};
pub use ticket::{
   TicketState,
   create_ticket,
   delete_ticket,
   get_ticket,
   list_tickets,
   update_ticket,
};
