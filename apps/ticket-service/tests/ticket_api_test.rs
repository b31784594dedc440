//! チケット API 統合テスト
//!
//! 実際のルーター（ミドルウェア・ハンドラ・ユースケース）を、インメモリの
//! リポジトリで組み立てて `oneshot` で呼び出す。
//!
//! ## 実行方法
//!
//! ```bash
//! cargo test -p support-desk-ticket-service --test ticket_api_test
//! ```
//!
//! ## テストケース
//!
//! - 所有者は取得・更新・削除でき、他ユーザーは 401
//! - 存在しない ID は取得・更新・削除とも 404
//! - 必須項目が欠けた作成は 400 でレコードを作らない
//! - 作成は 201、ステータス `requested`、所有者は呼び出し元
//! - 一覧は自分のチケットのみ
//! - 削除後の取得は 404
//! - U1 / U2 の一連のシナリオ
//! - X-User-Id がない、または存在しないユーザーは 401
//! - 所有者の付け替えを含む更新は 400
//! - 更新ボディの不備より、ユーザー・チケット・所有者の判定が優先される

use std::sync::Arc;

use axum::{
   Router,
   body::{Body, to_bytes},
   http::{Method, Request, StatusCode, header},
};
use chrono::Utc;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};
use support_desk_domain::{
   clock::SystemClock,
   user::{Email, User, UserId, UserName},
};
use support_desk_infra::mock::{MockTicketRepository, MockUserRepository};
use support_desk_shared::observability::REQUEST_ID_HEADER;
use support_desk_ticket_service::{
   app_builder,
   handler::TicketState,
   middleware::USER_ID_HEADER,
   usecase::TicketUseCaseImpl,
};
use tower::ServiceExt;
use uuid::Uuid;

struct TestApp {
   router:  Router,
   tickets: MockTicketRepository,
   u1:      UserId,
   u2:      UserId,
}

fn user(name: &str) -> User {
   User::new(
      UserId::new(),
      UserName::new(name).unwrap(),
      Email::new(format!("{name}@example.com")).unwrap(),
      Utc::now(),
   )
}

fn setup() -> TestApp {
   let users = MockUserRepository::new();
   let u1 = user("u1");
   let u2 = user("u2");
   let (u1_id, u2_id) = (u1.id().clone(), u2.id().clone());
   users.add_user(u1);
   users.add_user(u2);
   let tickets = MockTicketRepository::new();

   let usecase = TicketUseCaseImpl::new(
      Arc::new(users),
      Arc::new(tickets.clone()),
      Arc::new(SystemClock),
   );
   let router = app_builder::with_layers(app_builder::routes(Arc::new(TicketState { usecase })));

   TestApp {
      router,
      tickets,
      u1: u1_id,
      u2: u2_id,
   }
}

impl TestApp {
   async fn call(
      &self,
      method: Method,
      uri: &str,
      user: Option<&UserId>,
      body: Option<Value>,
   ) -> (StatusCode, Value) {
      let mut builder = Request::builder().method(method).uri(uri);
      if let Some(user) = user {
         builder = builder.header(USER_ID_HEADER, user.to_string());
      }
      let request = match body {
         Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
         None => builder.body(Body::empty()).unwrap(),
      };

      let response = self.router.clone().oneshot(request).await.unwrap();
      let status = response.status();
      let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
      let json = if bytes.is_empty() {
         Value::Null
      } else {
         serde_json::from_slice(&bytes).unwrap()
      };
      (status, json)
   }

   async fn create(&self, user: &UserId, product: &str, description: &str) -> Value {
      let (status, body) = self
         .call(
            Method::POST,
            "/api/tickets",
            Some(user),
            Some(json!({ "product": product, "description": description })),
         )
         .await;
      assert_eq!(status, StatusCode::CREATED);
      body
   }
}

fn ticket_uri(id: &Value) -> String {
   format!("/api/tickets/{}", id.as_str().unwrap())
}

#[tokio::test]
async fn test_u1とu2のシナリオ() {
   let app = setup();

   // U1 が作成
   let created = app.create(&app.u1, "Laptop", "Won't boot").await;
   assert_eq!(created["status"], "requested");
   assert_eq!(created["product"], "Laptop");
   assert_eq!(created["description"], "Won't boot");
   assert_eq!(created["user"], app.u1.to_string());
   let uri = ticket_uri(&created["id"]);

   // U2 は取得できない
   let (status, body) = app.call(Method::GET, &uri, Some(&app.u2), None).await;
   assert_eq!(status, StatusCode::UNAUTHORIZED);
   assert_eq!(body["title"], "Not Authorized");

   // U1 がステータスを更新
   let (status, body) = app
      .call(Method::PUT, &uri, Some(&app.u1), Some(json!({ "status": "open" })))
      .await;
   assert_eq!(status, StatusCode::OK);
   assert_eq!(body["status"], "open");
   assert_eq!(body["product"], "Laptop");

   // U1 が削除
   let (status, body) = app.call(Method::DELETE, &uri, Some(&app.u1), None).await;
   assert_eq!(status, StatusCode::OK);
   assert_eq!(body, json!({ "success": true }));

   // 削除後は 404
   let (status, body) = app.call(Method::GET, &uri, Some(&app.u1), None).await;
   assert_eq!(status, StatusCode::NOT_FOUND);
   assert_eq!(body["status"], 404);
}

#[tokio::test]
async fn test_所有者は取得更新削除でき他ユーザーは拒否される() {
   let app = setup();
   let created = app.create(&app.u1, "Phone", "Cracked screen").await;
   let uri = ticket_uri(&created["id"]);

   // 他ユーザー
   let (status, _) = app.call(Method::GET, &uri, Some(&app.u2), None).await;
   assert_eq!(status, StatusCode::UNAUTHORIZED);
   let (status, _) = app
      .call(Method::PUT, &uri, Some(&app.u2), Some(json!({ "status": "closed" })))
      .await;
   assert_eq!(status, StatusCode::UNAUTHORIZED);
   let (status, _) = app.call(Method::DELETE, &uri, Some(&app.u2), None).await;
   assert_eq!(status, StatusCode::UNAUTHORIZED);

   // 所有者
   let (status, body) = app.call(Method::GET, &uri, Some(&app.u1), None).await;
   assert_eq!(status, StatusCode::OK);
   assert_eq!(body, created);
   let (status, body) = app
      .call(
         Method::PUT,
         &uri,
         Some(&app.u1),
         Some(json!({ "description": "画面が割れた" })),
      )
      .await;
   assert_eq!(status, StatusCode::OK);
   assert_eq!(body["description"], "画面が割れた");
   assert_eq!(body["status"], "requested");
   let (status, _) = app.call(Method::DELETE, &uri, Some(&app.u1), None).await;
   assert_eq!(status, StatusCode::OK);
   assert!(app.tickets.all().is_empty());
}

#[rstest]
#[case::取得(Method::GET, None)]
#[case::更新(Method::PUT, Some(json!({ "status": "open" })))]
#[case::削除(Method::DELETE, None)]
#[tokio::test]
async fn test_存在しないチケットは404(#[case] method: Method, #[case] body: Option<Value>) {
   let app = setup();
   let uri = format!("/api/tickets/{}", Uuid::now_v7());

   let (status, response) = app.call(method, &uri, Some(&app.u1), body).await;

   assert_eq!(status, StatusCode::NOT_FOUND);
   assert_eq!(response["title"], "Not Found");
}

#[tokio::test]
async fn test_uuidでないidは404() {
   let app = setup();

   let (status, _) = app
      .call(Method::GET, "/api/tickets/not-a-ticket", Some(&app.u1), None)
      .await;

   assert_eq!(status, StatusCode::NOT_FOUND);
}

#[rstest]
#[case::製品なし(json!({ "description": "Won't boot" }))]
#[case::説明なし(json!({ "product": "Laptop" }))]
#[case::製品が空(json!({ "product": "", "description": "Won't boot" }))]
#[case::説明が空白(json!({ "product": "Laptop", "description": "  " }))]
#[case::空オブジェクト(json!({}))]
#[tokio::test]
async fn test_必須項目が欠けた作成は400でレコードを作らない(#[case] body: Value) {
   let app = setup();

   let (status, response) = app
      .call(Method::POST, "/api/tickets", Some(&app.u1), Some(body))
      .await;

   assert_eq!(status, StatusCode::BAD_REQUEST);
   assert_eq!(
      response["detail"],
      "製品を選択し、説明を入力してください"
   );
   assert!(app.tickets.all().is_empty());
}

#[tokio::test]
async fn test_jsonでないボディの作成は400() {
   let app = setup();
   let request = Request::builder()
      .method(Method::POST)
      .uri("/api/tickets")
      .header(USER_ID_HEADER, app.u1.to_string())
      .header(header::CONTENT_TYPE, "application/json")
      .body(Body::from("{not json"))
      .unwrap();

   let response = app.router.clone().oneshot(request).await.unwrap();

   assert_eq!(response.status(), StatusCode::BAD_REQUEST);
   assert!(app.tickets.all().is_empty());
}

#[tokio::test]
async fn test_作成はrequestedで所有者は呼び出し元() {
   let app = setup();

   let created = app.create(&app.u2, "Tablet", "Battery drains").await;

   assert_eq!(created["status"], "requested");
   assert_eq!(created["user"], app.u2.to_string());
   let stored = app.tickets.all();
   assert_eq!(stored.len(), 1);
   assert_eq!(stored[0].user(), &app.u2);
   assert_eq!(stored[0].id().to_string(), created["id"].as_str().unwrap());
}

#[tokio::test]
async fn test_一覧は自分のチケットのみを返す() {
   let app = setup();
   let first = app.create(&app.u1, "Laptop", "1").await;
   app.create(&app.u2, "Phone", "2").await;
   let second = app.create(&app.u1, "Tablet", "3").await;

   let (status, body) = app
      .call(Method::GET, "/api/tickets", Some(&app.u1), None)
      .await;
   assert_eq!(status, StatusCode::OK);
   assert_eq!(body, json!([first, second]));

   let (_, body) = app
      .call(Method::GET, "/api/tickets", Some(&app.u2), None)
      .await;
   let owners: Vec<&Value> = body.as_array().unwrap().iter().map(|t| &t["user"]).collect();
   assert_eq!(owners, vec![&json!(app.u2.to_string())]);
}

#[tokio::test]
async fn test_チケットがなければ一覧は空配列() {
   let app = setup();

   let (status, body) = app
      .call(Method::GET, "/api/tickets", Some(&app.u1), None)
      .await;

   assert_eq!(status, StatusCode::OK);
   assert_eq!(body, json!([]));
}

#[rstest]
#[case::所有者(json!({ "user": Uuid::now_v7().to_string() }))]
#[case::id(json!({ "id": Uuid::now_v7().to_string() }))]
#[case::アンダースコアid(json!({ "_id": "x", "status": "open" }))]
#[tokio::test]
async fn test_変更できないフィールドを含む更新は400(#[case] body: Value) {
   let app = setup();
   let created = app.create(&app.u1, "Laptop", "Won't boot").await;
   let uri = ticket_uri(&created["id"]);

   let (status, _) = app.call(Method::PUT, &uri, Some(&app.u1), Some(body)).await;

   assert_eq!(status, StatusCode::BAD_REQUEST);
   let (_, after) = app.call(Method::GET, &uri, Some(&app.u1), None).await;
   assert_eq!(after, created);
}

#[rstest]
#[case::空のステータス(json!({ "status": "" }))]
#[case::所有者の付け替え(json!({ "user": "00000000-0000-0000-0000-000000000002" }))]
#[case::未知のフィールド(json!({ "_id": "x" }))]
#[tokio::test]
async fn test_他ユーザーの不正な更新ボディは400ではなく401(#[case] body: Value) {
   let app = setup();
   let created = app.create(&app.u1, "Laptop", "Won't boot").await;
   let uri = ticket_uri(&created["id"]);

   let (status, response) = app.call(Method::PUT, &uri, Some(&app.u2), Some(body)).await;

   assert_eq!(status, StatusCode::UNAUTHORIZED);
   assert_eq!(response["title"], "Not Authorized");
   let (_, after) = app.call(Method::GET, &uri, Some(&app.u1), None).await;
   assert_eq!(after, created);
}

#[tokio::test]
async fn test_存在しないユーザーの不正な更新ボディは401() {
   let app = setup();
   let created = app.create(&app.u1, "Laptop", "Won't boot").await;
   let uri = ticket_uri(&created["id"]);
   let ghost = UserId::new();

   let (status, response) = app
      .call(Method::PUT, &uri, Some(&ghost), Some(json!({ "status": " " })))
      .await;

   assert_eq!(status, StatusCode::UNAUTHORIZED);
   assert_eq!(response["title"], "Unauthorized");
}

#[rstest]
#[case::空のステータス(json!({ "status": "" }))]
#[case::未知のフィールド(json!({ "user": "someone" }))]
#[tokio::test]
async fn test_存在しないチケットへの不正な更新ボディは404(#[case] body: Value) {
   let app = setup();
   let uri = format!("/api/tickets/{}", Uuid::now_v7());

   let (status, _) = app.call(Method::PUT, &uri, Some(&app.u1), Some(body)).await;

   assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_jsonでない更新ボディも所有者確認の後に判定する() {
   let app = setup();
   let created = app.create(&app.u1, "Laptop", "Won't boot").await;
   let uri = ticket_uri(&created["id"]);
   let request = |user: &UserId| {
      Request::builder()
         .method(Method::PUT)
         .uri(uri.as_str())
         .header(USER_ID_HEADER, user.to_string())
         .header(header::CONTENT_TYPE, "application/json")
         .body(Body::from("{not json"))
         .unwrap()
   };

   let other = app.router.clone().oneshot(request(&app.u2)).await.unwrap();
   let owner = app.router.clone().oneshot(request(&app.u1)).await.unwrap();

   assert_eq!(other.status(), StatusCode::UNAUTHORIZED);
   assert_eq!(owner.status(), StatusCode::BAD_REQUEST);
}

#[rstest]
#[case::取得(Method::GET)]
#[case::削除(Method::DELETE)]
#[tokio::test]
async fn test_存在しないユーザーはuuidでないidでも401(#[case] method: Method) {
   let app = setup();

   let (status, _) = app
      .call(method, "/api/tickets/not-a-ticket", Some(&UserId::new()), None)
      .await;

   assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_x_user_idがなければ401() {
   let app = setup();

   let (status, body) = app.call(Method::GET, "/api/tickets", None, None).await;

   assert_eq!(status, StatusCode::UNAUTHORIZED);
   assert_eq!(body["title"], "Unauthorized");
}

#[tokio::test]
async fn test_存在しないユーザーは401で何も作らない() {
   let app = setup();
   let ghost = UserId::new();

   let (status, _) = app
      .call(
         Method::POST,
         "/api/tickets",
         Some(&ghost),
         Some(json!({ "product": "Laptop", "description": "Won't boot" })),
      )
      .await;

   assert_eq!(status, StatusCode::UNAUTHORIZED);
   assert!(app.tickets.all().is_empty());
}

#[tokio::test]
async fn test_ヘルスチェックは認証なしで200() {
   let app = setup();

   let (status, body) = app.call(Method::GET, "/health", None, None).await;

   assert_eq!(status, StatusCode::OK);
   assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_レスポンスにリクエストidが付与される() {
   let app = setup();
   let request = Request::builder()
      .uri("/health")
      .body(Body::empty())
      .unwrap();

   let response = app.router.clone().oneshot(request).await.unwrap();

   let request_id = response
      .headers()
      .get(REQUEST_ID_HEADER)
      .and_then(|v| v.to_str().ok())
      .unwrap();
   assert!(Uuid::parse_str(request_id).is_ok());
}
