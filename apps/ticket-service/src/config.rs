//! # Ticket Service 設定
//!
//! 環境変数から Ticket Service サーバーの設定を読み込む。

use std::env;

use thiserror::Error;

/// 設定読み込みエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
   /// 必須の環境変数が未設定
   #[error("{0} が設定されていません")]
   Missing(&'static str),

   /// 値の形式が不正
   #[error("{name} の値が不正です: {value}")]
   Invalid { name: &'static str, value: String },
}

/// Ticket Service サーバーの設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketServiceConfig {
   /// バインドアドレス
   pub host:         String,
   /// ポート番号
   pub port:         u16,
   /// データベース接続 URL
   pub database_url: String,
}

impl TicketServiceConfig {
   /// 環境変数から設定を読み込む
   pub fn from_env() -> Result<Self, ConfigError> {
      Self::from_vars(|name| env::var(name).ok())
   }

   /// 変数の取得関数から設定を読み込む
   ///
   /// 取得方法を注入できる。
   pub fn from_vars(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
      let host = get("TICKET_SERVICE_HOST").unwrap_or_else(|| "0.0.0.0".to_string());

      let port_raw = get("TICKET_SERVICE_PORT").ok_or(ConfigError::Missing("TICKET_SERVICE_PORT"))?;
      let port = port_raw.parse().map_err(|_| ConfigError::Invalid {
         name:  "TICKET_SERVICE_PORT",
         value: port_raw.clone(),
      })?;

      let database_url = get("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

      Ok(Self {
         host,
         port,
         database_url,
      })
   }
}
