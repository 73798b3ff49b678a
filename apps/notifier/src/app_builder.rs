//! # Notifier アプリケーション構築
//!
//! DI（送信バックエンド・State）の初期化とルーター構築を担当する。
//! `main.rs` は設定読み込みとサーバー起動に集中する。

use std::sync::Arc;

use axum::{
    Router,
    http::{HeaderName, HeaderValue, Method, header},
    routing::{get, post},
};
use ordermail_domain::notification::NotificationError;
use ordermail_infra::notification::{
    MailFrom,
    MailjetNotificationSender,
    NoopNotificationSender,
    NotificationSender,
    SmtpNotificationSender,
};
use ordermail_shared::{
    canonical_log::CanonicalLogLineLayer,
    observability::{MakeRequestUuidV7, REQUEST_ID_HEADER, make_request_span},
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::{
    config::{ConfigError, MailConfig, MailTransportConfig},
    error::handle_panic,
    handler::{OrderNotificationState, health_check, not_found, send_order_emails},
};

/// ルーターを構築する
///
/// ```text
/// SetRequestId → Trace → CanonicalLogLine → PropagateRequestId → CORS → CatchPanic → handler
/// ```
pub fn build_app(state: Arc<OrderNotificationState>, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/send-order-emails", post(send_order_emails))
        .with_state(state)
        .fallback(not_found)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(CanonicalLogLineLayer)
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
}

/// 設定に応じたメール送信バックエンドを構築する
pub fn build_sender(config: &MailConfig) -> Result<Arc<dyn NotificationSender>, NotificationError> {
    let from = MailFrom::new(&config.from_address, &config.store_name);

    let sender: Arc<dyn NotificationSender> = match &config.transport {
        MailTransportConfig::Mailjet {
            api_url,
            credentials,
        } => Arc::new(MailjetNotificationSender::new(
            api_url,
            credentials.clone(),
            from,
            config.timeout,
        )?),
        MailTransportConfig::Smtp(settings) => {
            Arc::new(SmtpNotificationSender::new(settings.clone(), from)?)
        }
        MailTransportConfig::Noop => Arc::new(NoopNotificationSender),
    };

    tracing::info!(
        backend = %config.transport.backend(),
        from = %config.from_address,
        "メール送信バックエンドを初期化しました"
    );
    Ok(sender)
}

/// CORS レイヤーを構築する
///
/// 許可オリジンが未指定の場合は任意のオリジンを許可する。
/// フロントエンドは別ホストから配信されるため、ブラウザから直接呼ばれる。
pub fn build_cors_layer(allowed_origins: Option<&[String]>) -> Result<CorsLayer, ConfigError> {
    let allow_origin = match allowed_origins {
        None => AllowOrigin::any(),
        Some(origins) if origins.iter().any(|origin| origin == "*") => AllowOrigin::any(),
        Some(origins) => {
            let origins = origins
                .iter()
                .map(|origin| {
                    HeaderValue::from_str(origin).map_err(|_| ConfigError::Invalid {
                        name:  "CORS_ALLOWED_ORIGINS",
                        value: origin.clone(),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            AllowOrigin::list(origins)
        }
    };

    Ok(CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static(REQUEST_ID_HEADER)])
        .expose_headers(Any))
}
