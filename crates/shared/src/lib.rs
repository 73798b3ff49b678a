//! # OrderMail 共有ユーティリティ
//!
//! このクレートは、OrderMail
//! プロジェクト全体で使用される共通ユーティリティを提供する。
//!
//! ## 設計方針
//!
//! - 他のすべてのクレート（domain, infra, notifier）から依存される
//! - ビジネスロジックを含まない純粋なユーティリティのみを配置
//! - 外部クレートへの依存は最小限に抑える（観測系は `observability` feature の背後に置く）

pub mod error_response;
pub mod event_log;
pub mod health;
pub mod observability;

#[cfg(feature = "observability")]
pub mod canonical_log;

pub use error_response::ErrorResponse;
pub use health::HealthResponse;
