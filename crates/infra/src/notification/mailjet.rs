//! Mailjet 通知送信実装
//!
//! Mailjet Send API v3.1 に HTTP で送信する。本番環境で使用する。
//!
//! ```text
//! POST {api_url}/v3.1/send
//! Authorization: Basic base64(api_key:secret_key)
//!
//! { "Messages": [ { "From": {...}, "To": [...], "Subject": ..., "HTMLPart": ..., "TextPart": ... } ] }
//! ```
//!
//! HTTP 200 のみを成功とみなす。

use std::time::Duration;

use async_trait::async_trait;
use ordermail_domain::notification::{EmailMessage, NotificationError};
use serde::Serialize;

use super::{MailFrom, NotificationSender};

/// Mailjet API のデフォルトベース URL
pub const MAILJET_DEFAULT_API_URL: &str = "https://api.mailjet.com";

/// Mailjet API 認証情報
#[derive(Clone)]
pub struct MailjetCredentials {
    pub api_key:    String,
    pub secret_key: String,
}

impl std::fmt::Debug for MailjetCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailjetCredentials")
            .field("api_key", &self.api_key)
            .field("secret_key", &"[REDACTED]")
            .finish()
    }
}

/// Send API v3.1 のリクエストボディ
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct SendRequest<'a> {
    messages: Vec<SendMessage<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct SendMessage<'a> {
    from:      Contact<'a>,
    to:        Vec<Contact<'a>>,
    subject:   &'a str,
    #[serde(rename = "HTMLPart")]
    html_part: &'a str,
    text_part: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct Contact<'a> {
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name:  Option<&'a str>,
}

/// Mailjet 通知送信
///
/// `reqwest::Client` をラップする。タイムアウトはクライアント構築時に設定する。
pub struct MailjetNotificationSender {
    client:      reqwest::Client,
    send_url:    String,
    credentials: MailjetCredentials,
    from:        MailFrom,
}

impl MailjetNotificationSender {
    /// 新しい Mailjet 送信インスタンスを作成
    ///
    /// # 引数
    ///
    /// - `api_url`: API のベース URL（通常は [`MAILJET_DEFAULT_API_URL`]、テストではスタブサーバー）
    /// - `credentials`: API キーとシークレットキー
    /// - `from`: 送信元（Mailjet で検証済みのアドレス）
    /// - `timeout`: 1 リクエストあたりのタイムアウト
    pub fn new(
        api_url: &str,
        credentials: MailjetCredentials,
        from: MailFrom,
        timeout: Duration,
    ) -> Result<Self, NotificationError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| NotificationError::SendFailed(format!("HTTP クライアント構築失敗: {e}")))?;

        Ok(Self {
            client,
            send_url: format!("{}/v3.1/send", api_url.trim_end_matches('/')),
            credentials,
            from,
        })
    }
}

#[async_trait]
impl NotificationSender for MailjetNotificationSender {
    async fn send_email(&self, email: &EmailMessage) -> Result<(), NotificationError> {
        let body = SendRequest {
            messages: vec![SendMessage {
                from:      Contact {
                    email: &self.from.address,
                    name:  Some(&self.from.name),
                },
                to:        vec![Contact {
                    email: &email.to,
                    name:  None,
                }],
                subject:   &email.subject,
                html_part: &email.html_body,
                text_part: &email.text_body,
            }],
        };

        let response = self
            .client
            .post(&self.send_url)
            .basic_auth(&self.credentials.api_key, Some(&self.credentials.secret_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| NotificationError::SendFailed(format!("Mailjet 通信失敗: {e}")))?;

        match response.status() {
            reqwest::StatusCode::OK => {
                tracing::debug!(to = %email.to, "Mailjet: メール送信を受け付けました");
                Ok(())
            }
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(NotificationError::SendFailed(format!(
                    "Mailjet 送信失敗 {status}: {body}"
                )))
            }
        }
    }
}
