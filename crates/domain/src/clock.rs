//! # 時刻の供給
//!
//! チケットの `created_at` / `updated_at` はユースケースが [`Clock`] から
//! 受け取った時刻で埋める。本番は [`SystemClock`]、テストは [`FixedClock`]。

use std::sync::RwLock;

use chrono::{DateTime, Duration, Utc};

/// チケットのタイムスタンプに使う現在時刻
pub trait Clock: Send + Sync {
   fn now(&self) -> DateTime<Utc>;
}

/// システム時刻
pub struct SystemClock;

impl Clock for SystemClock {
   fn now(&self) -> DateTime<Utc> {
      Utc::now()
   }
}

/// 明示的に進めない限り止まっている時計
///
/// `Arc` で共有したまま [`advance`](Self::advance) できるので、
/// 作成と更新の間に時間が経過した状況を 1 つのユースケースで再現できる。
pub struct FixedClock {
   now: RwLock<DateTime<Utc>>,
}

impl FixedClock {
   pub fn new(now: DateTime<Utc>) -> Self {
      Self {
         now: RwLock::new(now),
      }
   }

   /// 時計を `by` だけ進める
   pub fn advance(&self, by: Duration) {
      let mut now = self.now.write().unwrap_or_else(|e| e.into_inner());
      *now += by;
   }
}

impl Clock for FixedClock {
   fn now(&self) -> DateTime<Utc> {
      *self.now.read().unwrap_or_else(|e| e.into_inner())
   }
}
