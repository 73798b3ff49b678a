//! # OrderMail ドメイン層
//!
//! 注文通知メールの中核となるドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! - **信頼しない入力**: 外部から届く注文ペイロードは必ず [`order::OrderPayload::from_json`]
//!   を経由して検証する
//! - **純粋な整形ロジック**: 明細行・配送情報・金額の整形はここに集約し、I/O を持たない
//! - **永続化なし**: すべてのエンティティは 1 リクエストの間だけ存在する
//!
//! ## 依存関係の方向
//!
//! ```text
//! notifier → infra → domain
//! ```
//!
//! ドメイン層はインフラ層（SMTP、HTTP API）には一切依存しない。
//!
//! ## モジュール構成
//!
//! - [`order`] - 注文ペイロード、明細行、入力検証と整形ルール
//! - [`notification`] - 送信するメールメッセージと送信エラー
//!
//! ## 使用例
//!
//! ```rust
//! use ordermail_domain::order::OrderPayload;
//!
//! let payload = serde_json::json!({ "order_id": "A-1" });
//! let result = OrderPayload::from_json(payload);
//!
//! // 必須フィールドが揃っていないため検証エラーになる
//! assert!(result.is_err());
//! ```

pub mod notification;
pub mod order;
