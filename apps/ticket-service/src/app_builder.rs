//! # アプリケーション構築
//!
//! ルーター定義と共通レイヤーの適用を担当する。
//! `main.rs` はインフラ初期化とサーバー起動に集中する。

use std::sync::Arc;

use axum::{
    Router,
    middleware::from_fn,
    routing::get,
};
use support_desk_shared::observability::{MakeRequestUuidV7, make_request_span};
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::{
    handler::{
        ReadinessState,
        TicketState,
        create_ticket,
        delete_ticket,
        get_ticket,
        health_check,
        list_tickets,
        readiness_check,
        update_ticket,
    },
    middleware::require_identity,
};

/// `/health` とチケット API のルーター
///
/// `/api` 配下はすべて [`require_identity`] を通過したリクエストのみ受け付ける。
pub fn routes(ticket_state: Arc<TicketState>) -> Router {
    let api = Router::new()
        .route("/tickets", get(list_tickets).post(create_ticket))
        .route(
            "/tickets/{id}",
            get(get_ticket).put(update_ticket).delete(delete_ticket),
        )
        .with_state(ticket_state)
        .layer(from_fn(require_identity));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api)
}

/// `/health/ready` のルーター
pub fn readiness_routes(readiness_state: Arc<ReadinessState>) -> Router {
    Router::new()
        .route("/health/ready", get(readiness_check))
        .with_state(readiness_state)
}

/// Request ID とトレースのレイヤーを適用する
///
/// レイヤーは下から順に外側になる:
/// 1. SetRequestIdLayer（最外）: UUID v7 を生成（またはクライアント提供値を使用）
/// 2. TraceLayer: request_id を含むスパンを作成
/// 3. PropagateRequestIdLayer: レスポンスヘッダーに X-Request-Id をコピー
pub fn with_layers(router: Router) -> Router {
    router
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
}
