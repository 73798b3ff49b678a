//! # ヘルスチェックハンドラ
//!
//! Notifier の稼働状態を確認するためのエンドポイント。
//! ロードバランサーやコンテナの liveness probe から呼ばれる。
//!
//! ```text
//! GET /health
//! ```
//!
//! ## レスポンス例
//!
//! ```json
//! {
//!   "status": "healthy",
//!   "version": "0.1.0"
//! }
//! ```

use axum::Json;
use ordermail_shared::HealthResponse;

/// ヘルスチェックエンドポイント
///
/// メール配信プロバイダへの疎通は確認しない。
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy(env!("CARGO_PKG_VERSION")))
}
