//! # 通知送信
//!
//! メール通知の送信を担当するインフラストラクチャモジュール。
//!
//! ## 設計方針
//!
//! - **trait による抽象化**: `NotificationSender` trait でメール送信を抽象化
//! - **3 つの実装**: Mailjet HTTP API（本番）、SMTP（Mailjet SMTP リレー / Mailpit）、Noop（ログのみ）
//! - **環境変数切替**: `MAIL_BACKEND` でランタイム選択
//! - **失敗は値で返す**: トランスポートの失敗はすべて `NotificationError::SendFailed` に変換する

mod mailjet;
mod noop;
mod smtp;

use async_trait::async_trait;
pub use mailjet::{MAILJET_DEFAULT_API_URL, MailjetCredentials, MailjetNotificationSender};
pub use noop::NoopNotificationSender;
use ordermail_domain::notification::{EmailMessage, NotificationError};
pub use smtp::{SmtpNotificationSender, SmtpSettings};

/// メール送信トレイト
///
/// 通知基盤の中核。メール送信の具体的な方法を抽象化する。
/// Mailjet / SMTP / Noop の 3 実装を環境変数で切り替える。
#[async_trait]
pub trait NotificationSender: Send + Sync {
    /// メールを送信する
    async fn send_email(&self, email: &EmailMessage) -> Result<(), NotificationError>;
}

/// 送信元（From ヘッダー）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailFrom {
    /// 送信元メールアドレス（プロバイダで検証済みであること）
    pub address: String,
    /// 表示名（例: "Healthline Naturals"）
    pub name:    String,
}

impl MailFrom {
    pub fn new(address: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            name:    name.into(),
        }
    }
}
