//! # Ticket Service ライブラリ
//!
//! 認証済みユーザーのサポートチケットを管理する API サーバー。
//!
//! ## モジュール構成
//!
//! - `app_builder`: ルーター構築
//! - `config`: 環境変数からの設定読み込み
//! - `error`: エラーと HTTP レスポンスへの変換
//! - `handler`: HTTP ハンドラ
//! - `middleware`: 呼び出し元 ID の抽出
//! - `usecase`: チケット管理ユースケース

pub mod app_builder;
pub mod config;
pub mod error;
pub mod handler;
pub mod middleware;
pub mod usecase;
