//! # テスト用モック
//!
//! ユースケーステストで使用するインメモリモック。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! ordermail-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::{
    collections::HashSet,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use ordermail_domain::notification::{EmailMessage, NotificationError};

use crate::notification::NotificationSender;

// ===== MockNotificationSender =====

/// 送信内容を記録するモック送信
///
/// `fail_for` で指定した宛先への送信は `SendFailed` を返す。
/// 失敗した送信も試行として記録される。
#[derive(Clone, Default)]
pub struct MockNotificationSender {
    attempts:           Arc<Mutex<Vec<EmailMessage>>>,
    failing_recipients: Arc<Mutex<HashSet<String>>>,
}

impl MockNotificationSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// 指定した宛先への送信を失敗させる
    pub fn fail_for(&self, recipient: &str) {
        self.failing_recipients
            .lock()
            .unwrap()
            .insert(recipient.to_string());
    }

    /// 送信を試行したすべてのメール（失敗を含む、呼び出し順）
    pub fn attempted_emails(&self) -> Vec<EmailMessage> {
        self.attempts.lock().unwrap().clone()
    }

    /// 送信に成功したメール
    pub fn sent_emails(&self) -> Vec<EmailMessage> {
        let failing = self.failing_recipients.lock().unwrap();
        self.attempts
            .lock()
            .unwrap()
            .iter()
            .filter(|email| !failing.contains(&email.to))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl NotificationSender for MockNotificationSender {
    async fn send_email(&self, email: &EmailMessage) -> Result<(), NotificationError> {
        self.attempts.lock().unwrap().push(email.clone());

        if self.failing_recipients.lock().unwrap().contains(&email.to) {
            return Err(NotificationError::SendFailed(format!(
                "モック: {} への送信を失敗させました",
                email.to
            )));
        }
        Ok(())
    }
}
