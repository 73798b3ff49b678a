//! SMTP 通知送信実装
//!
//! lettre の `AsyncSmtpTransport` を使用してメールを送信する。
//! 本番では Mailjet の SMTP リレー（STARTTLS + 認証）、
//! 開発環境では Mailpit（TLS なしのローカル SMTP サーバー）に接続する。

use std::time::Duration;

use async_trait::async_trait;
use lettre::{
    Address,
    AsyncSmtpTransport,
    AsyncTransport,
    Tokio1Executor,
    message::{Mailbox, Message, MultiPart, SinglePart, header::ContentType},
    transport::smtp::authentication::Credentials,
};
use ordermail_domain::notification::{EmailMessage, NotificationError};

use super::{MailFrom, NotificationSender};

/// SMTP 接続設定
#[derive(Clone)]
pub struct SmtpSettings {
    /// SMTP サーバーのホスト名（例: "in-v3.mailjet.com"、"localhost"）
    pub host:        String,
    /// SMTP サーバーのポート番号（例: 587、Mailpit は 1025）
    pub port:        u16,
    /// 認証情報（ユーザー名, パスワード）。None の場合は認証しない
    pub credentials: Option<(String, String)>,
    /// STARTTLS を使用するか
    pub tls:         bool,
    /// コマンドごとのタイムアウト
    pub timeout:     Duration,
}

impl std::fmt::Debug for SmtpSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field(
                "credentials",
                &self.credentials.as_ref().map(|(user, _)| (user, "[REDACTED]")),
            )
            .field("tls", &self.tls)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// SMTP 通知送信
///
/// `lettre::AsyncSmtpTransport<Tokio1Executor>` をラップする。
/// 接続はメール送信時に確立されるため、構築時にはサーバーへ接続しない。
pub struct SmtpNotificationSender {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from:      Mailbox,
}

impl SmtpNotificationSender {
    /// 新しい SMTP 送信インスタンスを作成
    ///
    /// 送信元アドレスはここでパースし、不正な場合は起動時にエラーにする。
    pub fn new(settings: SmtpSettings, from: MailFrom) -> Result<Self, NotificationError> {
        let builder = if settings.tls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)
                .map_err(|e| NotificationError::SendFailed(format!("SMTP リレー設定失敗: {e}")))?
        } else {
            // builder_dangerous: TLS なしで接続（Mailpit 等のローカル SMTP 向け）
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&settings.host)
        };

        let mut builder = builder
            .port(settings.port)
            .timeout(Some(settings.timeout));
        if let Some((username, password)) = settings.credentials {
            builder = builder.credentials(Credentials::new(username, password));
        }

        let address: Address = from
            .address
            .parse()
            .map_err(|e| NotificationError::SendFailed(format!("送信元アドレス不正: {e}")))?;

        Ok(Self {
            transport: builder.build(),
            from:      Mailbox::new(Some(from.name), address),
        })
    }

    /// 送信するメッセージを組み立てる（HTML とプレーンテキストの multipart/alternative）
    fn build_message(&self, email: &EmailMessage) -> Result<Message, NotificationError> {
        let to: Mailbox = email
            .to
            .parse()
            .map_err(|e| NotificationError::SendFailed(format!("宛先アドレス不正: {e}")))?;

        Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(&email.subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(email.text_body.clone()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(email.html_body.clone()),
                    ),
            )
            .map_err(|e| NotificationError::SendFailed(format!("メッセージ構築失敗: {e}")))
    }
}

#[async_trait]
impl NotificationSender for SmtpNotificationSender {
    async fn send_email(&self, email: &EmailMessage) -> Result<(), NotificationError> {
        let message = self.build_message(email)?;

        self.transport
            .send(message)
            .await
            .map_err(|e| NotificationError::SendFailed(format!("SMTP 送信失敗: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_settings(tls: bool) -> SmtpSettings {
        SmtpSettings {
            host: "localhost".to_string(),
            port: 1025,
            credentials: Some(("user".to_string(), "password".to_string())),
            tls,
            timeout: Duration::from_secs(5),
        }
    }

    fn make_email(to: &str) -> EmailMessage {
        EmailMessage {
            to:        to.to_string(),
            subject:   "New Order Notification - Order #HN-1001".to_string(),
            html_body: "<strong>New order received!</strong>".to_string(),
            text_body: "New order received!".to_string(),
        }
    }

    #[test]
    fn トレイトはsendとsyncを実装している() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SmtpNotificationSender>();
    }

    #[tokio::test]
    async fn tlsなしの設定で構築できる() {
        let sender = SmtpNotificationSender::new(
            make_settings(false),
            MailFrom::new("orders@healthline.example", "Healthline Naturals"),
        );
        assert!(sender.is_ok());
    }

    #[tokio::test]
    async fn 送信元アドレスが不正だと構築に失敗する() {
        let sender = SmtpNotificationSender::new(
            make_settings(false),
            MailFrom::new("not-an-address", "Healthline Naturals"),
        );
        assert!(matches!(sender, Err(NotificationError::SendFailed(_))));
    }

    #[tokio::test]
    async fn 宛先アドレスが不正だと送信前に失敗する() {
        let sender = SmtpNotificationSender::new(
            make_settings(false),
            MailFrom::new("orders@healthline.example", "Healthline Naturals"),
        )
        .unwrap();

        let result = sender.send_email(&make_email("not an address")).await;

        let Err(NotificationError::SendFailed(message)) = result else {
            panic!("SendFailed が返されること");
        };
        assert!(message.contains("宛先アドレス不正"));
    }

    #[tokio::test]
    async fn メッセージに送信元の表示名と件名が含まれる() {
        let sender = SmtpNotificationSender::new(
            make_settings(false),
            MailFrom::new("orders@healthline.example", "Healthline Naturals"),
        )
        .unwrap();

        let message = sender
            .build_message(&make_email("sales@healthline.example"))
            .unwrap();
        let formatted = String::from_utf8(message.formatted()).unwrap();

        assert!(formatted.contains("Healthline Naturals"));
        assert!(formatted.contains("orders@healthline.example"));
        assert!(formatted.contains("New Order Notification - Order #HN-1001"));
        assert!(formatted.contains("multipart/alternative"));
    }

    #[test]
    fn 設定のdebug出力にパスワードを含めない() {
        let settings = make_settings(true);
        assert!(!format!("{settings:?}").contains("password"));
    }
}
