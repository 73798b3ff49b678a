//! # OrderMail Notifier ライブラリ
//!
//! 注文通知メール送信サービスの設定・ユースケース・ハンドラを公開する。
//! `main.rs` と結合テスト（`tests/`）の両方から利用する。

pub mod app_builder;
pub mod config;
pub mod error;
pub mod handler;
pub mod usecase;
