//! # Observability 基盤
//!
//! notifier のログ出力を初期化する。
//!
//! 1 件の注文通知は、リクエストスパン（`request_id`）の中で宛先ごとの
//! `notification.sent` / `notification.failed`、続いて `order.notified` の業務イベント
//! （`event.entity_id` が注文 ID）として現れ、最後に canonical log line が出る。
//! 本番（`LOG_FORMAT=json`）では 1 行 1 JSON で出力され、`request_id` か
//! `event.entity_id` で 1 件の注文を追跡できる。
//!
//! メール送信まわりのクレート（`reqwest` / `hyper` / `lettre`）は既定で warn 以上に絞る。
//! SMTP の対話や HTTP 接続の詳細は `RUST_LOG` で明示的に上げたときだけ出す。

#[cfg(feature = "observability")]
mod request_id;

#[cfg(feature = "observability")]
pub use request_id::{MakeRequestUuidV7, REQUEST_ID_HEADER, make_request_span};

/// `RUST_LOG` 未設定時のフィルタ
pub const DEFAULT_LOG_FILTER: &str = "info,ordermail=debug,reqwest=warn,hyper=warn,lettre=warn";

/// ログ出力形式（`LOG_FORMAT`）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// 1 行 1 JSON。スパンのフィールドはトップレベルに展開される
    Json,
    /// ローカル開発用
    #[default]
    Pretty,
}

impl LogFormat {
    /// `LOG_FORMAT` の値を解釈する
    ///
    /// 大文字小文字と前後の空白は無視する。解釈できない値は Pretty にして
    /// stderr に警告を出す（subscriber はまだ無い）。
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Self::Json,
            "pretty" => Self::Pretty,
            _ => {
                eprintln!("WARNING: unknown LOG_FORMAT={s:?}, falling back to pretty");
                Self::Pretty
            }
        }
    }

    pub fn from_env() -> Self {
        std::env::var("LOG_FORMAT")
            .map(|val| Self::parse(&val))
            .unwrap_or_default()
    }
}

/// トレーシング初期化設定
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// 起動ログの `service` フィールド
    pub service_name:   String,
    pub log_format:     LogFormat,
    /// `RUST_LOG` が無いときに使うフィルタ
    pub default_filter: String,
}

impl TracingConfig {
    pub fn new(service_name: impl Into<String>, log_format: LogFormat) -> Self {
        Self {
            service_name: service_name.into(),
            log_format,
            default_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }

    pub fn from_env(service_name: impl Into<String>) -> Self {
        Self::new(service_name, LogFormat::from_env())
    }
}

/// グローバル subscriber を登録する
///
/// プロセスで 1 回だけ呼ぶ。`RUST_LOG` があればそちらを優先する。
#[cfg(feature = "observability")]
pub fn init_tracing(config: TracingConfig) {
    use tracing_subscriber::{Layer as _, layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.default_filter.as_str().into());

    let fmt_layer = match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_target(true)
            .with_current_span(true)
            .with_span_list(false)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer().boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    tracing::info!(
        service = %config.service_name,
        log_format = ?config.log_format,
        "トレーシングを初期化しました"
    );
}
