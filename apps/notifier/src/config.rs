//! # Notifier 設定
//!
//! 環境変数から Notifier サーバーの設定を読み込む。
//! 設定はプロセス起動時に一度だけ読み込み、以降は変更しない。

use std::{env, str::FromStr, time::Duration};

use ordermail_infra::notification::{MAILJET_DEFAULT_API_URL, MailjetCredentials, SmtpSettings};
use thiserror::Error;

/// 設定読み込みエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// 必須の環境変数が未設定
    #[error("{0} が設定されていません")]
    Missing(&'static str),

    /// 値をパースできない
    #[error("{name} の値が不正です: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// メール送信バックエンド
///
/// `MAIL_BACKEND` 環境変数の値（小文字）に対応する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum MailBackend {
    /// Mailjet Send API v3.1（HTTP）
    Mailjet,
    /// SMTP（Mailjet SMTP リレー、Mailpit 等）
    Smtp,
    /// 送信しない（ログ出力のみ）
    Noop,
}

/// バックエンドごとの接続設定
#[derive(Debug, Clone)]
pub enum MailTransportConfig {
    Mailjet {
        api_url:     String,
        credentials: MailjetCredentials,
    },
    Smtp(SmtpSettings),
    Noop,
}

impl MailTransportConfig {
    /// バックエンド種別を返す
    pub fn backend(&self) -> MailBackend {
        match self {
            Self::Mailjet { .. } => MailBackend::Mailjet,
            Self::Smtp(_) => MailBackend::Smtp,
            Self::Noop => MailBackend::Noop,
        }
    }
}

/// メール通知の設定
#[derive(Debug, Clone)]
pub struct MailConfig {
    /// 送信元メールアドレス（顧客向けメールの問い合わせ先にも使う）
    pub from_address:  String,
    /// 新規注文通知を受け取る営業チームのアドレス
    pub sales_address: String,
    /// 店舗名（送信元の表示名とメール本文に使う）
    pub store_name:    String,
    /// 送信タイムアウト
    pub timeout:       Duration,
    /// 送信バックエンド
    pub transport:     MailTransportConfig,
}

/// Notifier サーバーの設定
#[derive(Debug, Clone)]
pub struct NotifierConfig {
    /// バインドアドレス
    pub host: String,
    /// ポート番号
    pub port: u16,
    /// CORS で許可するオリジン（None の場合はすべて許可）
    pub cors_allowed_origins: Option<Vec<String>>,
    /// メール通知設定
    pub mail: MailConfig,
}

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_STORE_NAME: &str = "Healthline Naturals";
const DEFAULT_SMTP_HOST: &str = "in-v3.mailjet.com";
const DEFAULT_SMTP_PORT: u16 = 587;
const DEFAULT_TIMEOUT_SECS: u64 = 10;

impl NotifierConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// 任意の参照関数から設定を読み込む
    ///
    /// 空文字列の値は未設定として扱う。
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Vars(lookup);

        Ok(Self {
            host: vars.get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: vars.parse_or("PORT", DEFAULT_PORT)?,
            cors_allowed_origins: vars.get("CORS_ALLOWED_ORIGINS").map(|origins| {
                origins
                    .split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(ToString::to_string)
                    .collect()
            }),
            mail: MailConfig::from_vars(&vars)?,
        })
    }
}

impl MailConfig {
    fn from_vars<F>(vars: &Vars<F>) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let timeout = Duration::from_secs(vars.parse_or("MAIL_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?);
        let backend = vars.parse_or("MAIL_BACKEND", MailBackend::Mailjet)?;

        let mailjet_credentials = match (
            vars.get("MAILJET_API_KEY"),
            vars.get("MAILJET_SECRET_KEY"),
        ) {
            (Some(api_key), Some(secret_key)) => Some(MailjetCredentials {
                api_key,
                secret_key,
            }),
            _ => None,
        };

        let transport = match backend {
            MailBackend::Mailjet => {
                let credentials = mailjet_credentials.ok_or_else(|| {
                    if vars.get("MAILJET_API_KEY").is_none() {
                        ConfigError::Missing("MAILJET_API_KEY")
                    } else {
                        ConfigError::Missing("MAILJET_SECRET_KEY")
                    }
                })?;
                MailTransportConfig::Mailjet {
                    api_url: vars
                        .get("MAILJET_API_URL")
                        .unwrap_or_else(|| MAILJET_DEFAULT_API_URL.to_string()),
                    credentials,
                }
            }
            MailBackend::Smtp => {
                // SMTP 専用の認証情報がなければ Mailjet の API キーで SMTP リレーに認証する
                let credentials = match (vars.get("SMTP_USERNAME"), vars.get("SMTP_PASSWORD")) {
                    (Some(username), Some(password)) => Some((username, password)),
                    _ => mailjet_credentials.map(|c| (c.api_key, c.secret_key)),
                };
                MailTransportConfig::Smtp(SmtpSettings {
                    host: vars
                        .get("SMTP_HOST")
                        .unwrap_or_else(|| DEFAULT_SMTP_HOST.to_string()),
                    port: vars.parse_or("SMTP_PORT", DEFAULT_SMTP_PORT)?,
                    credentials,
                    tls: vars.parse_or("SMTP_TLS", true)?,
                    timeout,
                })
            }
            MailBackend::Noop => MailTransportConfig::Noop,
        };

        Ok(Self {
            from_address: vars.require("FROM_EMAIL")?,
            sales_address: vars.require("SALES_EMAIL")?,
            store_name: vars
                .get("STORE_NAME")
                .unwrap_or_else(|| DEFAULT_STORE_NAME.to_string()),
            timeout,
            transport,
        })
    }
}

/// 環境変数の参照をまとめるヘルパー
struct Vars<F>(F);

impl<F> Vars<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn get(&self, name: &str) -> Option<String> {
        (self.0)(name).filter(|value| !value.trim().is_empty())
    }

    fn require(&self, name: &'static str) -> Result<String, ConfigError> {
        self.get(name).ok_or(ConfigError::Missing(name))
    }

    fn parse_or<T: FromStr>(&self, name: &'static str, default: T) -> Result<T, ConfigError> {
        match self.get(name) {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid { name, value }),
            None => Ok(default),
        }
    }
}
