//! # 注文通知サービス
//!
//! 注文ペイロードの検証 → テンプレートレンダリング → 2 通のメール送信を統合するサービス。
//!
//! ## 設計方針
//!
//! - **検証が先**: 検証に失敗した場合はメールを 1 通も送らない
//! - **独立した 2 回の送信**: 顧客宛てと営業チーム宛ては並行に送信し、
//!   片方の失敗がもう片方の送信を妨げない
//! - **結果の集約**: 両方成功した場合のみ成功。どちらが失敗したかは呼び出し元に返さない
//! - **再送しない**: 1 リクエストにつき各宛先 1 回まで。同じ注文 ID の重複排除もしない

use std::sync::Arc;

use ordermail_domain::{
    notification::{EmailMessage, NotificationError, OrderNotificationKind},
    order::{OrderPayload, ValidationError},
};
use ordermail_infra::notification::NotificationSender;
use ordermail_shared::{
    event_log::{error as log_error, event},
    log_business_event,
};
use serde_json::Value;
use thiserror::Error;

use super::{StoreContact, TemplateRenderer};

/// 注文通知ユースケースのエラー
#[derive(Debug, Error)]
pub enum OrderNotificationError {
    /// 入力検証エラー（クライアント起因）
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// 少なくとも 1 通の送信に失敗
    #[error("Failed to send one or both emails")]
    DispatchFailure,

    /// その他の内部エラー（テンプレート等）
    #[error("内部エラー: {0}")]
    Internal(String),
}

/// 注文通知サービス
///
/// 1 件の注文につき、顧客への注文確認と営業チームへの新規注文通知を送信する。
pub struct OrderNotificationService {
    sender:            Arc<dyn NotificationSender>,
    template_renderer: TemplateRenderer,
    store:             StoreContact,
}

impl OrderNotificationService {
    pub fn new(
        sender: Arc<dyn NotificationSender>,
        template_renderer: TemplateRenderer,
        store: StoreContact,
    ) -> Self {
        Self {
            sender,
            template_renderer,
            store,
        }
    }

    /// 注文の通知メールを送信する
    ///
    /// 両方の送信が成功した場合のみ `Ok(())` を返す。
    pub async fn notify(&self, payload: Value) -> Result<(), OrderNotificationError> {
        let order = OrderPayload::from_json(payload)?;

        let customer_email = self.render(OrderNotificationKind::CustomerConfirmation, &order)?;
        let sales_email = self.render(OrderNotificationKind::SalesNotification, &order)?;

        let (customer_result, sales_result) = tokio::join!(
            self.dispatch(
                OrderNotificationKind::CustomerConfirmation,
                &order.order_id,
                &customer_email
            ),
            self.dispatch(
                OrderNotificationKind::SalesNotification,
                &order.order_id,
                &sales_email
            ),
        );

        if customer_result.is_err() || sales_result.is_err() {
            return Err(OrderNotificationError::DispatchFailure);
        }

        log_business_event!(
            event.category = event::category::ORDER,
            event.action = event::action::ORDER_NOTIFIED,
            event.entity_type = event::entity_type::ORDER,
            event.entity_id = %order.order_id,
            event.result = event::result::SUCCESS,
            "注文通知メールをすべて送信"
        );
        Ok(())
    }

    fn render(
        &self,
        kind: OrderNotificationKind,
        order: &OrderPayload,
    ) -> Result<EmailMessage, OrderNotificationError> {
        self.template_renderer
            .render(kind, order, &self.store)
            .map_err(|e| {
                let kind_str: &str = kind.into();
                tracing::error!(
                    error.category = log_error::category::INTERNAL,
                    error.kind = log_error::kind::TEMPLATE,
                    notification.kind = kind_str,
                    error = %e,
                    "通知テンプレートのレンダリングに失敗"
                );
                OrderNotificationError::Internal(e.to_string())
            })
    }

    /// 1 通送信し、結果をビジネスイベントとして記録する
    async fn dispatch(
        &self,
        kind: OrderNotificationKind,
        order_id: &str,
        email: &EmailMessage,
    ) -> Result<(), NotificationError> {
        let kind_str: &str = kind.into();
        let result = self.sender.send_email(email).await;

        match &result {
            Ok(()) => {
                log_business_event!(
                    event.category = event::category::NOTIFICATION,
                    event.action = event::action::NOTIFICATION_SENT,
                    event.entity_type = event::entity_type::ORDER,
                    event.entity_id = %order_id,
                    event.result = event::result::SUCCESS,
                    notification.kind = kind_str,
                    notification.recipient = %email.to,
                    "通知メール送信成功"
                );
            }
            Err(e) => {
                log_business_event!(
                    event.category = event::category::NOTIFICATION,
                    event.action = event::action::NOTIFICATION_FAILED,
                    event.entity_type = event::entity_type::ORDER,
                    event.entity_id = %order_id,
                    event.result = event::result::FAILURE,
                    notification.kind = kind_str,
                    notification.recipient = %email.to,
                    error.category = log_error::category::EXTERNAL_SERVICE,
                    error.kind = log_error::kind::EMAIL_DELIVERY,
                    error = %e,
                    "通知メール送信失敗"
                );
            }
        }

        result
    }
}
