//! # OrderMail インフラ層
//!
//! 外部のメール配信サービスとの通信を担当するインフラストラクチャ層。
//!
//! ## 設計方針
//!
//! このクレートはメール送信の抽象（[`notification::NotificationSender`]）と、
//! その具体的な実装を提供する。配信プロバイダの詳細をカプセル化し、
//! 注文通知のユースケースをトランスポートの違いから保護する。
//!
//! ## 責務
//!
//! - **HTTP API 送信**: Mailjet Send API v3.1
//! - **SMTP 送信**: lettre の非同期 SMTP トランスポート
//! - **テスト支援**: 送信内容を記録するモック（`test-utils` feature）
//!
//! ## 依存関係
//!
//! ```text
//! notifier → infra → domain
//! ```

pub mod notification;

#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
