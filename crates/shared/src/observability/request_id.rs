//! # リクエスト ID
//!
//! `X-Request-Id` ヘッダーの生成と、リクエストスパンへの付与を行う。
//!
//! ## レイヤー配置
//!
//! ```text
//! SetRequestIdLayer → TraceLayer(make_request_span) → PropagateRequestIdLayer → handler
//! ```
//!
//! クライアントが `X-Request-Id` を送ってきた場合はそれをそのまま使い、
//! なければ UUID v7 を生成する。

use http::{HeaderValue, Request};
use tower_http::request_id::{MakeRequestId, RequestId};
use tracing::Span;

/// リクエスト ID ヘッダー名
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// UUID v7 でリクエスト ID を生成する
///
/// v7 は時刻順にソート可能なため、ログの時系列調査に向く。
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = uuid::Uuid::now_v7().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// リクエストスパンを作成する
///
/// `TraceLayer::make_span_with` に渡す。`request_id` はスパンフィールドとして
/// 以降のすべてのログ（JSON の場合はトップレベル）に含まれる。
pub fn make_request_span<B>(request: &Request<B>) -> Span {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-");

    tracing::info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id,
    )
}
