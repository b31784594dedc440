//! # 永続化エラー
//!
//! リポジトリが返すエラーは 2 種類しかない。
//!
//! - SQL の実行失敗（接続断、制約違反など）
//! - 読み出した行がドメインの値オブジェクトに変換できない
//!
//! どちらも生成した時点の [`SpanTrace`] を抱えるので、ログに出すと
//! どのリポジトリメソッド（`#[tracing::instrument]` のスパン）で起きたかが分かる。

use std::fmt;

use derive_more::Display;
use thiserror::Error;
use tracing_error::SpanTrace;
use uuid::Uuid;

/// リポジトリ操作の失敗
#[derive(Display)]
#[display("{kind}")]
pub struct InfraError {
    kind:       InfraErrorKind,
    span_trace: SpanTrace,
}

#[derive(Debug, Error)]
pub enum InfraErrorKind {
    #[error("データベースエラー: {0}")]
    Database(#[source] sqlx::Error),

    /// DB の値が値オブジェクトの制約（空文字、長さ上限）を満たさない
    #[error("{table} の行が不正です(id={id}): {reason}")]
    InvalidRow {
        table:  &'static str,
        id:     Uuid,
        reason: String,
    },
}

impl InfraError {
    pub fn kind(&self) -> &InfraErrorKind {
        &self.kind
    }

    pub fn span_trace(&self) -> &SpanTrace {
        &self.span_trace
    }

    /// 行の変換失敗
    pub fn invalid_row(table: &'static str, id: Uuid, reason: impl fmt::Display) -> Self {
        Self {
            kind:       InfraErrorKind::InvalidRow {
                table,
                id,
                reason: reason.to_string(),
            },
            span_trace: SpanTrace::capture(),
        }
    }
}

impl fmt::Debug for InfraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InfraError")
            .field("kind", &self.kind)
            .field("span_trace", &self.span_trace)
            .finish()
    }
}

impl std::error::Error for InfraError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(&self.kind)
    }
}

impl From<sqlx::Error> for InfraError {
    fn from(source: sqlx::Error) -> Self {
        Self {
            kind:       InfraErrorKind::Database(source),
            span_trace: SpanTrace::capture(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tracing_subscriber::layer::SubscriberExt as _;

    use super::*;

    fn in_span(name: &'static str, f: impl FnOnce()) {
        let subscriber = tracing_subscriber::registry().with(tracing_error::ErrorLayer::default());
        let _guard = tracing::subscriber::set_default(subscriber);
        let span = tracing::info_span!("repo", method = name);
        let _enter = span.enter();
        f();
    }

    #[test]
    fn test_sqlxエラーはリポジトリのスパンを記録する() {
        in_span("find_by_id", || {
            let err: InfraError = sqlx::Error::RowNotFound.into();

            assert!(matches!(err.kind(), InfraErrorKind::Database(_)));
            assert!(err.span_trace().to_string().contains("repo"));
        });
    }

    #[test]
    fn test_不正な行はテーブルとidを表示する() {
        let id = Uuid::nil();

        let err = InfraError::invalid_row("tickets", id, "製品は必須です");

        assert_eq!(
            err.to_string(),
            "tickets の行が不正です(id=00000000-0000-0000-0000-000000000000): 製品は必須です"
        );
        assert!(std::error::Error::source(&err).is_none());
    }

    #[test]
    fn test_sourceはsqlxエラーを返す() {
        let err: InfraError = sqlx::Error::RowNotFound.into();

        assert!(std::error::Error::source(&err).is_some());
    }
}
