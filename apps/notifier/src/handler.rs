//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! ## 設計方針
//!
//! - 各ハンドラはサブモジュールに配置
//! - 親モジュール（この `handler.rs`）で re-export し、フラットな API を提供
//! - ハンドラは薄く保ち、検証と送信はユースケース層に委譲

pub mod health;
pub mod order;

use crate::error::ApiError;
pub use health::health_check;
pub use order::{OrderNotificationState, SendOrderEmailsResponse, send_order_emails};

/// 存在しないルートへのフォールバック
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}
