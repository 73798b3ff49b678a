//! # Notifier エラー定義
//!
//! HTTP 境界のエラーと、RFC 9457 Problem Details レスポンスへの変換を定義する。
//!
//! 500 系のレスポンスには内部情報（宛先、プロバイダのエラー文）を含めない。
//! 詳細はサーバー側のログにのみ出力する。

use std::any::Any;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use ordermail_domain::order::ValidationError;
use ordermail_shared::{ErrorResponse, event_log::error as log_error};
use thiserror::Error;

use crate::usecase::OrderNotificationError;

/// Notifier で発生するエラー
#[derive(Debug, Error)]
pub enum ApiError {
    /// JSON として受け取れないリクエストボディ（Content-Type 不正、構文エラー）
    #[error("不正なリクエストボディ: {0}")]
    InvalidBody(#[from] JsonRejection),

    /// 注文ペイロードの検証エラー
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// メール送信の失敗（1 通以上）
    #[error("メール送信に失敗しました")]
    DeliveryFailed,

    /// ルートが存在しない
    #[error("リソースが見つかりません")]
    NotFound,

    /// 内部エラー
    #[error("内部エラー: {0}")]
    Internal(String),
}

impl From<OrderNotificationError> for ApiError {
    fn from(err: OrderNotificationError) -> Self {
        match err {
            OrderNotificationError::Validation(e) => Self::Validation(e),
            OrderNotificationError::DispatchFailure => Self::DeliveryFailed,
            OrderNotificationError::Internal(msg) => Self::Internal(msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match &self {
            ApiError::InvalidBody(rejection) => {
                tracing::warn!(
                    error.category = log_error::category::CLIENT,
                    error.kind = log_error::kind::VALIDATION,
                    "リクエストボディを JSON として受け取れません: {}",
                    rejection.body_text()
                );
                ErrorResponse::bad_request(invalid_body_detail(rejection))
            }
            ApiError::Validation(e) => {
                match e {
                    ValidationError::MissingFields(fields) => tracing::warn!(
                        error.category = log_error::category::CLIENT,
                        error.kind = log_error::kind::VALIDATION,
                        missing_fields = ?fields,
                        "注文ペイロードの必須フィールドが欠けています"
                    ),
                    other => tracing::warn!(
                        error.category = log_error::category::CLIENT,
                        error.kind = log_error::kind::VALIDATION,
                        error = %other,
                        "注文ペイロードが不正です"
                    ),
                }
                ErrorResponse::validation_error(e.to_string())
            }
            ApiError::DeliveryFailed => {
                tracing::error!(
                    error.category = log_error::category::EXTERNAL_SERVICE,
                    error.kind = log_error::kind::EMAIL_DELIVERY,
                    "注文通知メールの送信に失敗しました"
                );
                ErrorResponse::delivery_failed()
            }
            ApiError::NotFound => ErrorResponse::not_found("The requested resource was not found"),
            ApiError::Internal(msg) => {
                tracing::error!(
                    error.category = log_error::category::INTERNAL,
                    error.kind = log_error::kind::INTERNAL,
                    "内部エラー: {}",
                    msg
                );
                ErrorResponse::internal_error()
            }
        };

        let status =
            StatusCode::from_u16(body.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(body)).into_response()
    }
}

/// ボディを受け取れなかった理由をクライアント向けの文言にする
///
/// axum 既定の 415 / 422 は使わず、どちらも 400 として返す。
fn invalid_body_detail(rejection: &JsonRejection) -> &'static str {
    match rejection {
        JsonRejection::MissingJsonContentType(_) => "Content-Type must be application/json",
        _ => "Request body must be valid JSON",
    }
}

/// ハンドラ内の panic を 500 レスポンスに変換する
///
/// `CatchPanicLayer::custom` に渡す。panic メッセージはログにのみ出力する。
pub fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "不明な panic".to_string()
    };

    ApiError::Internal(format!("panic: {message}")).into_response()
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    async fn into_parts(error: ApiError) -> (StatusCode, ErrorResponse) {
        let response = error.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[rstest]
    #[case::必須フィールド欠落(
        ValidationError::MissingFields(vec!["order_id".to_string()]),
        "Missing required fields"
    )]
    #[case::明細が配列でない(ValidationError::OrderDetailsNotList, "order_details must be a list")]
    #[tokio::test]
    async fn 検証エラーは400とメッセージを返す(
        #[case] error: ValidationError,
        #[case] expected_detail: &str,
    ) {
        let (status, body) = into_parts(ApiError::Validation(error)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.status, 400);
        assert_eq!(body.title, "Validation Error");
        assert_eq!(body.detail, expected_detail);
        assert_eq!(body.error, expected_detail);
    }

    #[tokio::test]
    async fn 送信失敗は500と固定メッセージを返す() {
        let (status, body) = into_parts(ApiError::DeliveryFailed).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.detail, "Failed to send one or both emails");
        assert_eq!(body.error, "Failed to send one or both emails");
    }

    #[tokio::test]
    async fn 内部エラーは詳細を返さない() {
        let (status, body) =
            into_parts(ApiError::Internal("tera: template not found".to_string())).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.detail, "Internal server error");
    }

    #[test]
    fn ユースケースのエラーが対応するapiエラーに変換される() {
        assert!(matches!(
            ApiError::from(OrderNotificationError::DispatchFailure),
            ApiError::DeliveryFailed
        ));
        assert!(matches!(
            ApiError::from(OrderNotificationError::Validation(
                ValidationError::OrderDetailsNotList
            )),
            ApiError::Validation(ValidationError::OrderDetailsNotList)
        ));
        assert!(matches!(
            ApiError::from(OrderNotificationError::Internal("x".to_string())),
            ApiError::Internal(_)
        ));
    }

    #[tokio::test]
    async fn panicは汎用の500レスポンスになる() {
        let response = handle_panic(Box::new("index out of bounds"));

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: ErrorResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.detail, "Internal server error");
    }
}
