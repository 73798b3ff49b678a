//! # ユースケース層
//!
//! ハンドラから呼ばれるアプリケーションロジック。HTTP の詳細には依存しない。

pub mod notification;

pub use notification::{
    OrderNotificationError,
    OrderNotificationService,
    StoreContact,
    TemplateRenderer,
};
