//! # OrderMail Notifier サーバー
//!
//! 注文確定時にフロントエンドから呼ばれ、顧客への注文確認メールと
//! 営業チームへの新規注文通知メールを送信する HTTP サーバー。
//!
//! ## 起動方法
//!
//! ```bash
//! FROM_EMAIL=orders@example.com SALES_EMAIL=sales@example.com \
//! MAIL_BACKEND=noop cargo run -p ordermail-notifier
//! ```
//!
//! 設定項目は [`ordermail_notifier::config`] を参照。

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context as _;
use ordermail_notifier::{
    app_builder::{build_app, build_cors_layer, build_sender},
    config::NotifierConfig,
    handler::OrderNotificationState,
    usecase::{OrderNotificationService, StoreContact, TemplateRenderer},
};
use ordermail_shared::observability::{TracingConfig, init_tracing};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    init_tracing(TracingConfig::from_env("ordermail-notifier"));
    let _tracing_guard = tracing::info_span!("app", service = "ordermail-notifier").entered();

    let config = NotifierConfig::from_env().context("設定の読み込みに失敗しました")?;

    tracing::info!(
        "Notifier サーバーを起動します: {}:{}",
        config.host,
        config.port
    );

    let sender =
        build_sender(&config.mail).context("メール送信バックエンドの初期化に失敗しました")?;
    let template_renderer =
        TemplateRenderer::new().context("メールテンプレートの読み込みに失敗しました")?;
    let store = StoreContact {
        store_name:      config.mail.store_name.clone(),
        contact_address: config.mail.from_address.clone(),
        sales_address:   config.mail.sales_address.clone(),
    };
    let state = Arc::new(OrderNotificationState {
        service: OrderNotificationService::new(sender, template_renderer, store),
    });

    let cors = build_cors_layer(config.cors_allowed_origins.as_deref())?;
    let app = build_app(state, cors);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("アドレスのパースに失敗しました")?;

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Notifier サーバーが起動しました: {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Ctrl+C または SIGTERM を待つ
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Ctrl+C ハンドラの登録に失敗しました: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("SIGTERM ハンドラの登録に失敗しました: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("シャットダウンシグナルを受信しました");
}
