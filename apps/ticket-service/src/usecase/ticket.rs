//! チケット管理ユースケース
//!
//! 既存チケットに対する操作（取得・更新・削除）は次の順で判定し、
//! 最初に失敗したものを返す。
//!
//! 1. 呼び出し元のユーザーレコードがある（なければ Unauthenticated）
//! 2. チケットがある（なければ NotFound。UUID でない ID も含む）
//! 3. 呼び出し元が所有者（でなければ Forbidden）
//! 4. 更新内容が妥当（でなければ BadRequest）
//!
//! 作成だけは例外で、必須項目のチェックをユーザー確認より先に行う。

use std::{fmt, sync::Arc};

use support_desk_domain::{
   DomainError,
   clock::Clock,
   ticket::{Description, Product, Ticket, TicketId, TicketStatus, TicketUpdate},
   user::{User, UserId},
};
use support_desk_infra::repository::{TicketRepository, UserRepository};
use uuid::Uuid;

use crate::error::CoreError;

/// 製品・説明のいずれかが未入力のときのメッセージ
const MISSING_FIELDS_MESSAGE: &str = "製品を選択し、説明を入力してください";

/// チケット作成の入力
///
/// 必須チェックをユースケースで行うため、リクエストの値をそのまま受け取る。
pub struct CreateTicketInput {
   pub user_id:     UserId,
   pub product:     Option<String>,
   pub description: Option<String>,
}

/// 更新するフィールド（変更しないものは `None`）
#[derive(Debug, Default)]
pub struct TicketChanges {
   pub product:     Option<String>,
   pub description: Option<String>,
   pub status:      Option<String>,
}

/// チケット更新の入力
pub struct UpdateTicketInput {
   pub user_id:   UserId,
   /// パスに指定された ID（未検証）
   pub ticket_id: String,
   /// ボディの解析結果。解析エラーは所有者確認の後に返す
   pub changes:   Result<TicketChanges, CoreError>,
}

/// チケット管理ユースケース
pub struct TicketUseCaseImpl {
   user_repository:   Arc<dyn UserRepository>,
   ticket_repository: Arc<dyn TicketRepository>,
   clock:             Arc<dyn Clock>,
}

impl TicketUseCaseImpl {
   pub fn new(
      user_repository: Arc<dyn UserRepository>,
      ticket_repository: Arc<dyn TicketRepository>,
      clock: Arc<dyn Clock>,
   ) -> Self {
      Self {
         user_repository,
         ticket_repository,
         clock,
      }
   }

   /// 自分のチケット一覧を取得する（作成順）
   pub async fn list_tickets(&self, user_id: &UserId) -> Result<Vec<Ticket>, CoreError> {
      self.authenticate(user_id).await?;

      let tickets = self.ticket_repository.find_all_by_user(user_id).await?;
      Ok(tickets)
   }

   /// 自分のチケットを 1 件取得する
   pub async fn get_ticket(&self, user_id: &UserId, ticket_id: &str) -> Result<Ticket, CoreError> {
      self.authenticate(user_id).await?;

      self.find_owned_ticket(user_id, ticket_id).await
   }

   /// チケットを作成する
   ///
   /// 1. 製品・説明の必須チェック（ユーザー確認より先に行う）
   /// 2. ユーザーの存在確認
   /// 3. ステータス `"requested"`、所有者を呼び出し元として挿入
   pub async fn create_ticket(&self, input: CreateTicketInput) -> Result<Ticket, CoreError> {
      let (product, description) = match (non_blank(input.product), non_blank(input.description))
      {
         (Some(product), Some(description)) => (product, description),
         _ => return Err(CoreError::BadRequest(MISSING_FIELDS_MESSAGE.to_string())),
      };
      let product = Product::new(product)?;
      let description = Description::new(description)?;

      self.authenticate(&input.user_id).await?;

      let ticket = Ticket::new(
         TicketId::new(),
         input.user_id,
         product,
         description,
         self.clock.now(),
      );
      self.ticket_repository.insert(&ticket).await?;

      tracing::info!(
         ticket_id = %ticket.id(),
         user_id = %ticket.user(),
         "チケットを作成しました"
      );

      Ok(ticket)
   }

   /// チケットを更新する
   ///
   /// 所有者を確認した後でボディを検証し、指定されたフィールドのみを置き換える。
   pub async fn update_ticket(&self, input: UpdateTicketInput) -> Result<Ticket, CoreError> {
      self.authenticate(&input.user_id).await?;
      let ticket = self
         .find_owned_ticket(&input.user_id, &input.ticket_id)
         .await?;

      let changes = input.changes?;
      let update = TicketUpdate {
         product:     changes.product.map(Product::new).transpose()?,
         description: changes.description.map(Description::new).transpose()?,
         status:      changes.status.map(TicketStatus::new).transpose()?,
      };
      if update.is_empty() {
         tracing::debug!(ticket_id = %ticket.id(), "変更フィールドのない更新リクエスト");
      }

      let updated = ticket.apply(update, self.clock.now());
      if !self.ticket_repository.update(&updated).await? {
         // 所有者確認の後に削除された
         return Err(ticket_not_found(updated.id()));
      }

      tracing::info!(
         ticket_id = %updated.id(),
         status = %updated.status(),
         "チケットを更新しました"
      );

      Ok(updated)
   }

   /// チケットを削除する
   pub async fn delete_ticket(&self, user_id: &UserId, ticket_id: &str) -> Result<(), CoreError> {
      self.authenticate(user_id).await?;
      let ticket = self.find_owned_ticket(user_id, ticket_id).await?;

      if !self.ticket_repository.delete(ticket.id()).await? {
         return Err(ticket_not_found(ticket.id()));
      }

      tracing::info!(ticket_id = %ticket.id(), "チケットを削除しました");

      Ok(())
   }

   /// 認証済み ID に対応するユーザーを取得する
   ///
   /// 上流で認証済みでも、ユーザーが削除されている可能性があるため毎回確認する。
   async fn authenticate(&self, user_id: &UserId) -> Result<User, CoreError> {
      self
         .user_repository
         .find_by_id(user_id)
         .await?
         .ok_or_else(|| CoreError::Unauthenticated("ユーザーが見つかりません".to_string()))
   }

   /// チケットを取得し、所有者であることを確認する
   ///
   /// UUID として解釈できない ID に一致するチケットはないので NotFound。
   async fn find_owned_ticket(&self, user_id: &UserId, raw_id: &str) -> Result<Ticket, CoreError> {
      let ticket_id = Uuid::parse_str(raw_id)
         .map(TicketId::from_uuid)
         .map_err(|_| ticket_not_found(raw_id))?;

      let ticket = self
         .ticket_repository
         .find_by_id(&ticket_id)
         .await?
         .ok_or_else(|| ticket_not_found(&ticket_id))?;

      if let Err(e) = ticket.ensure_owned_by(user_id) {
         tracing::warn!(
            %ticket_id,
            %user_id,
            owner = %ticket.user(),
            "他ユーザーのチケットへのアクセスを拒否しました"
         );
         return Err(e.into());
      }

      Ok(ticket)
   }
}

fn ticket_not_found(ticket_id: impl fmt::Display) -> CoreError {
   DomainError::NotFound {
      entity_type: "Ticket",
      id:          ticket_id.to_string(),
   }
   .into()
}

/// 空白のみの値を未入力として扱う
fn non_blank(value: Option<String>) -> Option<String> {
   value.filter(|v| !v.trim().is_empty())
}
