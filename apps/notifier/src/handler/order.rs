//! # 注文通知ハンドラ
//!
//! フロントエンドから注文確定時に呼ばれ、顧客と営業チームに通知メールを送信する。
//!
//! ```text
//! POST /send-order-emails
//! ```
//!
//! | 結果 | ステータス |
//! |------|-----------|
//! | 2 通とも送信成功 | 200 `{"message": "Emails sent successfully"}` |
//! | JSON として読めない / 必須フィールド欠落 / 型不正 | 400 |
//! | 1 通以上の送信失敗 | 500 |
//!
//! 既存のフロントエンドが `message` / `error` キーを直接読むため、
//! このルートの成功レスポンスは `{ "data": ... }` で包まない。

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::Serialize;
use serde_json::Value;

use crate::{error::ApiError, usecase::OrderNotificationService};

/// 成功時のメッセージ
const SUCCESS_MESSAGE: &str = "Emails sent successfully";

/// 注文通知ハンドラの State
pub struct OrderNotificationState {
    pub service: OrderNotificationService,
}

/// 送信成功レスポンス
#[derive(Debug, Serialize)]
pub struct SendOrderEmailsResponse {
    pub message: String,
}

/// 注文通知メールを送信する
///
/// ボディは型を決めずに `Value` で受け取り、必須フィールドの確認から
/// ユースケース層で行う。
pub async fn send_order_emails(
    State(state): State<Arc<OrderNotificationState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<SendOrderEmailsResponse>, ApiError> {
    let Json(payload) = payload?;

    state.service.notify(payload).await?;

    Ok(Json(SendOrderEmailsResponse {
        message: SUCCESS_MESSAGE.to_string(),
    }))
}
