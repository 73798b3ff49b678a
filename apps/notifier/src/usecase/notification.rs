//! # 注文通知ユースケース
//!
//! 注文ペイロードの検証・メール生成・送信を統合する。
//!
//! ## モジュール構成
//!
//! - [`template_renderer`] - tera テンプレートエンジンによるメール生成
//! - [`service`] - 検証 + レンダリング + 2 通の送信 + 結果集約の統合サービス

pub mod service;
pub mod template_renderer;

pub use service::{OrderNotificationError, OrderNotificationService};
pub use template_renderer::{StoreContact, TemplateRenderer};
