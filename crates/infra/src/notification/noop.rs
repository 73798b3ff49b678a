//! `MAIL_BACKEND=noop` の送信実装
//!
//! 注文通知メールを外部へ出さず、宛先と件名をログに残して成功扱いにする。
//! Mailjet の認証情報を持たないローカル環境や、ステージングで実在の顧客に
//! 確認メールが届かないようにしたいときに使う。
//!
//! 本文はログに出さない（顧客の住所・電話番号を含むため）。長さだけを出力し、
//! テンプレートが空でないことを確認できるようにする。

use async_trait::async_trait;
use ordermail_domain::notification::{EmailMessage, NotificationError};

use super::NotificationSender;

#[derive(Debug, Clone)]
pub struct NoopNotificationSender;

#[async_trait]
impl NotificationSender for NoopNotificationSender {
    async fn send_email(&self, email: &EmailMessage) -> Result<(), NotificationError> {
        tracing::info!(
            backend = "noop",
            notification.recipient = %email.to,
            subject = %email.subject,
            html_body.len = email.html_body.len(),
            text_body.len = email.text_body.len(),
            "MAIL_BACKEND=noop のため注文通知メールを送信しません"
        );
        Ok(())
    }
}
