//! # テスト用モックリポジトリ
//!
//! ユースケース・ハンドラのテストで使用するインメモリモックリポジトリ。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! support-desk-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use support_desk_domain::{
   ticket::{Ticket, TicketId},
   user::{User, UserId},
};

use crate::{
   error::InfraError,
   repository::{TicketRepository, UserRepository},
};

// ===== MockUserRepository =====

#[derive(Clone, Default)]
pub struct MockUserRepository {
   users: Arc<Mutex<Vec<User>>>,
}

impl MockUserRepository {
   pub fn new() -> Self {
      Self::default()
   }

   pub fn add_user(&self, user: User) {
      self.users.lock().unwrap().push(user);
   }
}

#[async_trait]
impl UserRepository for MockUserRepository {
   async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, InfraError> {
      Ok(self
         .users
         .lock()
         .unwrap()
         .iter()
         .find(|u| u.id() == id)
         .cloned())
   }
}

// ===== MockTicketRepository =====

/// 挿入順を保持するインメモリ実装
#[derive(Clone, Default)]
pub struct MockTicketRepository {
   tickets: Arc<Mutex<Vec<Ticket>>>,
}

impl MockTicketRepository {
   pub fn new() -> Self {
      Self::default()
   }

   /// 保存されている全チケット（所有者を問わない）
   pub fn all(&self) -> Vec<Ticket> {
      self.tickets.lock().unwrap().clone()
   }
}

#[async_trait]
impl TicketRepository for MockTicketRepository {
   async fn find_all_by_user(&self, user_id: &UserId) -> Result<Vec<Ticket>, InfraError> {
      Ok(self
         .tickets
         .lock()
         .unwrap()
         .iter()
         .filter(|t| t.user() == user_id)
         .cloned()
         .collect())
   }

   async fn find_by_id(&self, id: &TicketId) -> Result<Option<Ticket>, InfraError> {
      Ok(self
         .tickets
         .lock()
         .unwrap()
         .iter()
         .find(|t| t.id() == id)
         .cloned())
   }

   async fn insert(&self, ticket: &Ticket) -> Result<(), InfraError> {
      self.tickets.lock().unwrap().push(ticket.clone());
      Ok(())
   }

   async fn update(&self, ticket: &Ticket) -> Result<bool, InfraError> {
      let mut tickets = self.tickets.lock().unwrap();
      match tickets.iter_mut().find(|t| t.id() == ticket.id()) {
         Some(stored) => {
            *stored = ticket.clone();
            Ok(true)
         }
         None => Ok(false),
      }
   }

   async fn delete(&self, id: &TicketId) -> Result<bool, InfraError> {
      let mut tickets = self.tickets.lock().unwrap();
      let before = tickets.len();
      tickets.retain(|t| t.id() != id);
      Ok(tickets.len() < before)
   }
}
