//! # ユースケース層
//!
//! ハンドラから呼ばれるアプリケーションロジック。
//! リポジトリと時刻はコンストラクタで注入する。

pub mod ticket;

pub use ticket::{CreateTicketInput, TicketChanges, TicketUseCaseImpl, UpdateTicketInput};
