//! # チケットハンドラ
//!
//! 認証済みユーザー自身のサポートチケットを操作する API。
//!
//! ## エンドポイント
//!
//! - `GET /api/tickets` - 自分のチケット一覧
//! - `GET /api/tickets/{id}` - チケット詳細
//! - `POST /api/tickets` - チケット作成
//! - `PUT /api/tickets/{id}` - チケット更新
//! - `DELETE /api/tickets/{id}` - チケット削除
//!
//! 呼び出し元の ID は [`require_identity`](crate::middleware::require_identity)
//! が設定した [`AuthenticatedUser`] から取得する。

use std::sync::Arc;

use axum::{
    Extension,
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use support_desk_domain::ticket::Ticket;
use uuid::Uuid;

use crate::{
    error::CoreError,
    middleware::AuthenticatedUser,
    usecase::{CreateTicketInput, TicketChanges, TicketUseCaseImpl, UpdateTicketInput},
};

/// チケット API の共有状態
pub struct TicketState {
    pub usecase: TicketUseCaseImpl,
}

// --- リクエスト/レスポンス型 ---

/// チケット作成リクエスト
///
/// 未入力の判定はユースケースで行うため、どちらも省略可能として受け取る。
#[derive(Debug, Deserialize)]
pub struct CreateTicketRequest {
    pub product:     Option<String>,
    pub description: Option<String>,
}

/// チケット更新リクエスト
///
/// 所有者（`user`）や ID を含むリクエストは拒否する。
/// 解析エラーは所有者確認の後に 400 として返る。
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateTicketRequest {
    pub product:     Option<String>,
    pub description: Option<String>,
    pub status:      Option<String>,
}

impl From<UpdateTicketRequest> for TicketChanges {
    fn from(req: UpdateTicketRequest) -> Self {
        Self {
            product:     req.product,
            description: req.description,
            status:      req.status,
        }
    }
}

/// チケット DTO
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct TicketDto {
    pub id:          Uuid,
    pub user:        Uuid,
    pub product:     String,
    pub description: String,
    pub status:      String,
    pub created_at:  String,
    pub updated_at:  String,
}

impl From<&Ticket> for TicketDto {
    fn from(ticket: &Ticket) -> Self {
        Self {
            id:          *ticket.id().as_uuid(),
            user:        *ticket.user().as_uuid(),
            product:     ticket.product().as_str().to_string(),
            description: ticket.description().as_str().to_string(),
            status:      ticket.status().as_str().to_string(),
            created_at:  ticket.created_at().to_rfc3339(),
            updated_at:  ticket.updated_at().to_rfc3339(),
        }
    }
}

/// チケット削除レスポンス
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct DeleteTicketResponse {
    pub success: bool,
}

// --- ハンドラ ---

/// GET /api/tickets
///
/// 自分のチケットを作成順で取得する。
#[tracing::instrument(skip_all)]
pub async fn list_tickets(
    State(state): State<Arc<TicketState>>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<impl IntoResponse, CoreError> {
    let tickets = state.usecase.list_tickets(user.user_id()).await?;

    let items: Vec<TicketDto> = tickets.iter().map(TicketDto::from).collect();
    Ok((StatusCode::OK, Json(items)))
}

/// GET /api/tickets/{id}
///
/// ## レスポンス
///
/// - `200 OK`: チケット
/// - `401 Unauthorized`: ユーザーが存在しない、または他ユーザーのチケット
/// - `404 Not Found`: チケットが存在しない
#[tracing::instrument(skip_all, fields(ticket_id = %id))]
pub async fn get_ticket(
    State(state): State<Arc<TicketState>>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, CoreError> {
    let ticket = state.usecase.get_ticket(user.user_id(), &id).await?;

    Ok((StatusCode::OK, Json(TicketDto::from(&ticket))))
}

/// POST /api/tickets
///
/// ## レスポンス
///
/// - `201 Created`: 作成されたチケット（ステータス `"requested"`）
/// - `400 Bad Request`: 製品または説明が未入力、ボディが不正
/// - `401 Unauthorized`: ユーザーが存在しない
#[tracing::instrument(skip_all)]
pub async fn create_ticket(
    State(state): State<Arc<TicketState>>,
    Extension(user): Extension<AuthenticatedUser>,
    body: Result<Json<CreateTicketRequest>, JsonRejection>,
) -> Result<impl IntoResponse, CoreError> {
    let Json(req) = body.map_err(bad_body)?;

    let input = CreateTicketInput {
        user_id:     user.user_id().clone(),
        product:     req.product,
        description: req.description,
    };
    let ticket = state.usecase.create_ticket(input).await?;

    Ok((StatusCode::CREATED, Json(TicketDto::from(&ticket))))
}

/// PUT /api/tickets/{id}
///
/// 指定されたフィールドのみ更新する。
///
/// ## レスポンス
///
/// - `200 OK`: 更新後のチケット
/// - `400 Bad Request`: 値が不正、または更新できないフィールドを含む
/// - `401 Unauthorized`: ユーザーが存在しない、または他ユーザーのチケット
/// - `404 Not Found`: チケットが存在しない
#[tracing::instrument(skip_all, fields(ticket_id = %id))]
pub async fn update_ticket(
    State(state): State<Arc<TicketState>>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    body: Result<Json<UpdateTicketRequest>, JsonRejection>,
) -> Result<impl IntoResponse, CoreError> {
    let input = UpdateTicketInput {
        user_id:   user.user_id().clone(),
        ticket_id: id,
        changes:   body.map(|Json(req)| TicketChanges::from(req)).map_err(bad_body),
    };
    let ticket = state.usecase.update_ticket(input).await?;

    Ok((StatusCode::OK, Json(TicketDto::from(&ticket))))
}

/// DELETE /api/tickets/{id}
#[tracing::instrument(skip_all, fields(ticket_id = %id))]
pub async fn delete_ticket(
    State(state): State<Arc<TicketState>>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, CoreError> {
    state.usecase.delete_ticket(user.user_id(), &id).await?;

    Ok((StatusCode::OK, Json(DeleteTicketResponse { success: true })))
}

fn bad_body(rejection: JsonRejection) -> CoreError {
    CoreError::BadRequest(rejection.body_text())
}
