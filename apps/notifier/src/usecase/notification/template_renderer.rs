//! # テンプレートレンダラー
//!
//! tera テンプレートエンジンで注文通知メールを HTML/plaintext 両形式で生成する。
//!
//! ## 設計方針
//!
//! - **`include_str!` によるコンパイル時埋め込み**: テンプレートはバイナリに埋め込まれる
//! - **件名パターン**: `Order Confirmation - Order #{order_id}` / `New Order Notification - Order #{order_id}`
//! - **HTML は自動エスケープ**: `.html` テンプレートでは顧客が入力した文字列をエスケープする。
//!   `.txt` テンプレートはエスケープしない
//! - **整形済みの値を渡す**: 金額・明細行・配送情報はドメイン層で整形し、テンプレートは埋め込むだけ

use ordermail_domain::{
    notification::{EmailMessage, NotificationError, OrderNotificationKind},
    order::{CURRENCY_LABEL, OrderPayload, format_amount},
};
use tera::{Context, Tera};

/// 店舗の連絡先
///
/// メール本文の署名・問い合わせ先と、営業チーム宛ての送信先に使う。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreContact {
    /// 店舗名（署名と感謝文に使う）
    pub store_name:      String,
    /// 顧客向けメールに記載する問い合わせ先
    pub contact_address: String,
    /// 新規注文通知の送信先
    pub sales_address:   String,
}

/// テンプレートレンダラー
///
/// tera テンプレートエンジンをラップし、`OrderPayload` から
/// `EmailMessage` を生成する。
pub struct TemplateRenderer {
    engine: Tera,
}

impl TemplateRenderer {
    /// 新しいレンダラーインスタンスを作成
    ///
    /// `include_str!` で埋め込んだテンプレートを tera に登録する。
    pub fn new() -> Result<Self, NotificationError> {
        let mut engine = Tera::default();

        engine
            .add_raw_templates(vec![
                (
                    "customer_confirmation.html",
                    include_str!("../../../templates/notifications/customer_confirmation.html"),
                ),
                (
                    "customer_confirmation.txt",
                    include_str!("../../../templates/notifications/customer_confirmation.txt"),
                ),
                (
                    "sales_notification.html",
                    include_str!("../../../templates/notifications/sales_notification.html"),
                ),
                (
                    "sales_notification.txt",
                    include_str!("../../../templates/notifications/sales_notification.txt"),
                ),
            ])
            .map_err(|e| NotificationError::TemplateFailed(e.to_string()))?;

        Ok(Self { engine })
    }

    /// 注文からメールメッセージを生成する
    ///
    /// 送信先は種別で決まる: 注文確認は顧客、新規注文通知は営業チーム。
    pub fn render(
        &self,
        kind: OrderNotificationKind,
        order: &OrderPayload,
        store: &StoreContact,
    ) -> Result<EmailMessage, NotificationError> {
        let template_name: &str = kind.into();
        let context = Self::build_context(order, store);

        let html_body = self
            .engine
            .render(&format!("{template_name}.html"), &context)
            .map_err(|e| NotificationError::TemplateFailed(e.to_string()))?;

        let text_body = self
            .engine
            .render(&format!("{template_name}.txt"), &context)
            .map_err(|e| NotificationError::TemplateFailed(e.to_string()))?;

        let (to, subject) = match kind {
            OrderNotificationKind::CustomerConfirmation => (
                order.customer_email.clone(),
                format!("Order Confirmation - Order #{}", order.order_id),
            ),
            OrderNotificationKind::SalesNotification => (
                store.sales_address.clone(),
                format!("New Order Notification - Order #{}", order.order_id),
            ),
        };

        Ok(EmailMessage {
            to,
            subject,
            html_body,
            text_body,
        })
    }

    /// 両テンプレート共通のコンテキストを構築する
    fn build_context(order: &OrderPayload, store: &StoreContact) -> Context {
        let mut context = Context::new();
        context.insert("order_id", &order.order_id);
        context.insert("customer_name", &order.customer_name);
        context.insert("customer_email", &order.customer_email);
        context.insert("customer_phone", &order.customer_phone);
        context.insert("shipping_info", &order.shipping_info());
        context.insert("payment_method", &order.payment_method);
        context.insert("item_lines", &order.item_lines());
        context.insert("items_text", &order.formatted_items());

        context.insert("currency", CURRENCY_LABEL);
        context.insert("subtotal", &format_amount(order.subtotal));
        context.insert("delivery_fee", &format_amount(order.delivery_fee));
        context.insert("tax", &format_amount(order.tax));
        context.insert("order_total", &format_amount(order.order_total));

        context.insert("store_name", &store.store_name);
        context.insert("contact_address", &store.contact_address);
        context
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn make_store() -> StoreContact {
        StoreContact {
            store_name:      "Healthline Naturals".to_string(),
            contact_address: "orders@healthline.example".to_string(),
            sales_address:   "sales@healthline.example".to_string(),
        }
    }

    fn make_order() -> OrderPayload {
        OrderPayload::from_json(json!({
            "order_id": "HN-1001",
            "customer_email": "wanjiku@example.com",
            "customer_name": "Wanjiku Kamau",
            "customer_phone": "+254700000001",
            "shipping_option": "delivery",
            "shipping_address": "123 Main St",
            "payment_method": "M-Pesa",
            "order_details": [
                {"name": "Vitamin C", "quantity": 2, "price": 500.0, "total": 1000.0},
                {"name": "Moringa Powder", "quantity": 1, "price": 750, "total": 750}
            ],
            "subtotal": 1750,
            "delivery_fee": 200,
            "tax": 280,
            "order_total": 2230
        }))
        .unwrap()
    }

    #[test]
    fn newが正常に初期化される() {
        let renderer = TemplateRenderer::new();
        assert!(renderer.is_ok());
    }

    #[test]
    fn 注文確認メールは顧客宛てに生成される() {
        let renderer = TemplateRenderer::new().unwrap();

        let email = renderer
            .render(
                OrderNotificationKind::CustomerConfirmation,
                &make_order(),
                &make_store(),
            )
            .unwrap();

        assert_eq!(email.to, "wanjiku@example.com");
        assert_eq!(email.subject, "Order Confirmation - Order #HN-1001");
        assert!(email.html_body.contains("Dear Wanjiku Kamau,"));
        assert!(
            email
                .html_body
                .contains("Thank you for your order with Healthline Naturals!")
        );
        assert!(
            email
                .html_body
                .contains("For any queries, contact us at orders@healthline.example.")
        );
        assert!(!email.html_body.contains("Please process the order promptly."));
    }

    #[test]
    fn 新規注文通知は営業チーム宛てに生成される() {
        let renderer = TemplateRenderer::new().unwrap();

        let email = renderer
            .render(
                OrderNotificationKind::SalesNotification,
                &make_order(),
                &make_store(),
            )
            .unwrap();

        assert_eq!(email.to, "sales@healthline.example");
        assert_eq!(email.subject, "New Order Notification - Order #HN-1001");
        assert!(email.html_body.contains("<strong>New order received!</strong>"));
        assert!(email.html_body.contains("Please process the order promptly."));
        assert!(!email.html_body.contains("Dear "));
    }

    #[test]
    fn html本文の明細行はbrで区切られる() {
        let renderer = TemplateRenderer::new().unwrap();

        let email = renderer
            .render(
                OrderNotificationKind::SalesNotification,
                &make_order(),
                &make_store(),
            )
            .unwrap();

        assert!(email.html_body.contains(
            "Vitamin C x 2 @ Ksh 500.00 = Ksh 1000.00<br>Moringa Powder x 1 @ Ksh 750.00 = Ksh 750.00<br><br>"
        ));
    }

    #[test]
    fn 金額は小数点以下2桁で税率ラベルは固定される() {
        let renderer = TemplateRenderer::new().unwrap();

        let email = renderer
            .render(
                OrderNotificationKind::CustomerConfirmation,
                &make_order(),
                &make_store(),
            )
            .unwrap();

        for body in [&email.html_body, &email.text_body] {
            assert!(body.contains("- Subtotal: Ksh 1750.00"));
            assert!(body.contains("- Delivery Fee: Ksh 200.00"));
            assert!(body.contains("- Tax (16%): Ksh 280.00"));
            assert!(body.contains("- Total: Ksh 2230.00"));
        }
    }

    #[test]
    fn 配送情報が本文に含まれる() {
        let renderer = TemplateRenderer::new().unwrap();

        let email = renderer
            .render(
                OrderNotificationKind::CustomerConfirmation,
                &make_order(),
                &make_store(),
            )
            .unwrap();

        assert!(
            email
                .html_body
                .contains("<strong>Shipping: Delivery (123 Main St)</strong>")
        );
        assert!(email.text_body.contains("Shipping: Delivery (123 Main St)"));
    }

    #[test]
    fn テキスト本文の明細行は改行で区切られる() {
        let renderer = TemplateRenderer::new().unwrap();

        let email = renderer
            .render(
                OrderNotificationKind::CustomerConfirmation,
                &make_order(),
                &make_store(),
            )
            .unwrap();

        assert!(email.text_body.contains(
            "Order Items:\nVitamin C x 2 @ Ksh 500.00 = Ksh 1000.00\nMoringa Powder x 1 @ Ksh 750.00 = Ksh 750.00\n"
        ));
        assert!(!email.text_body.contains("<br>"));
    }

    #[test]
    fn html本文では顧客の入力がエスケープされる() {
        let renderer = TemplateRenderer::new().unwrap();
        let mut order = make_order();
        order.customer_name = "<script>alert(1)</script>".to_string();

        let email = renderer
            .render(
                OrderNotificationKind::SalesNotification,
                &order,
                &make_store(),
            )
            .unwrap();

        assert!(!email.html_body.contains("<script>"));
        assert!(email.html_body.contains("&lt;script&gt;"));
        assert!(email.text_body.contains("<script>alert(1)</script>"));
    }

    #[test]
    fn 明細が空でも生成できる() {
        let renderer = TemplateRenderer::new().unwrap();
        let mut order = make_order();
        order.order_details.clear();

        let email = renderer
            .render(
                OrderNotificationKind::CustomerConfirmation,
                &order,
                &make_store(),
            )
            .unwrap();

        assert!(email.html_body.contains("<strong>Order Items:</strong><br>\n<br><br>"));
    }
}
