//! # 通知
//!
//! 注文通知メールに関するドメインモデルを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 送信先 |
//! |---|------------|------|
//! | [`OrderNotificationKind::CustomerConfirmation`] | 注文確認メール | 注文した顧客 |
//! | [`OrderNotificationKind::SalesNotification`] | 新規注文通知 | 営業チーム（固定アドレス） |
//!
//! ## 設計方針
//!
//! - **送信とテンプレートの分離**: メール生成は notifier のテンプレートレンダラー、
//!   送信は infra の `NotificationSender` が担う
//! - **エラーは値で返す**: 送信失敗は [`NotificationError`] として呼び出し元に返し、
//!   panic で境界を越えない

use strum::IntoStaticStr;
use thiserror::Error;

/// 通知送信エラー
#[derive(Debug, Error)]
pub enum NotificationError {
    /// メール送信に失敗
    #[error("メール送信に失敗: {0}")]
    SendFailed(String),

    /// テンプレートレンダリングに失敗
    #[error("テンプレートレンダリングに失敗: {0}")]
    TemplateFailed(String),
}

/// 注文通知の種別
///
/// `&'static str`（snake_case）に変換して、テンプレート名とログの
/// `notification.kind` フィールドに使う。外部から受け取ることはない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum OrderNotificationKind {
    /// 注文確認: 顧客に送信
    CustomerConfirmation,
    /// 新規注文通知: 営業チームに送信
    SalesNotification,
}

/// メールメッセージ
///
/// テンプレートレンダリングの出力。NotificationSender に渡される。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    /// 送信先メールアドレス
    pub to:        String,
    /// 件名
    pub subject:   String,
    /// HTML 本文
    pub html_body: String,
    /// プレーンテキスト本文
    pub text_body: String,
}
