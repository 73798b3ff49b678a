//! # 注文の表示整形
//!
//! メール本文に埋め込む文字列（明細行、配送情報、金額）を生成する。
//! 出力は入力だけで決まり、同じ注文からは常に同じ文字列が得られる。

use itertools::Itertools;
use rust_decimal::Decimal;

use super::{LineItem, OrderPayload};

/// 配送先住所が未指定のときの既定値
pub const STORE_PICKUP: &str = "Store Pickup";

/// 金額に付ける通貨ラベル
pub const CURRENCY_LABEL: &str = "Ksh";

/// 配送先住所を表示する配送オプション
const DELIVERY_OPTION: &str = "delivery";

/// 金額を小数点以下 2 桁の文字列にする
///
/// 丸めは受け取った値に対して行う。JSON の小数は二進値で保持されているため、
/// `2.675` のように十進でちょうど中間に見える値も `2.67` になる。
/// 十進でちょうど中間の値（数値文字列で届いたもの）は偶数丸め。
pub fn format_amount(amount: Decimal) -> String {
    let mut rounded = amount.round_dp(2);
    rounded.rescale(2);
    rounded.to_string()
}

/// 英字の連続ごとに先頭を大文字、残りを小文字にする
///
/// 英字以外の文字は単語の区切りとして扱う（`"home-delivery"` → `"Home-Delivery"`）。
pub fn title_case(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut previous_is_alphabetic = false;

    for c in value.chars() {
        if c.is_alphabetic() {
            if previous_is_alphabetic {
                result.extend(c.to_lowercase());
            } else {
                result.extend(c.to_uppercase());
            }
        } else {
            result.push(c);
        }
        previous_is_alphabetic = c.is_alphabetic();
    }

    result
}

impl LineItem {
    /// `"<name> x <quantity> @ Ksh <price> = Ksh <total>"` 形式の 1 行
    pub fn formatted(&self) -> String {
        format!(
            "{} x {} @ {CURRENCY_LABEL} {} = {CURRENCY_LABEL} {}",
            self.name,
            self.quantity,
            format_amount(self.price),
            format_amount(self.total)
        )
    }
}

impl OrderPayload {
    /// 明細行を注文順に整形したもの
    pub fn item_lines(&self) -> Vec<String> {
        self.order_details.iter().map(LineItem::formatted).collect()
    }

    /// 明細行を改行で連結したもの
    pub fn formatted_items(&self) -> String {
        self.order_details.iter().map(LineItem::formatted).join("\n")
    }

    /// 配送情報の行
    ///
    /// 住所を表示するのは `"delivery"` かつ住所が既定値でない場合のみ。
    /// それ以外（`"pickup"` など）は住所の指定に関わらず `(Store Pickup)` になる。
    pub fn shipping_info(&self) -> String {
        let option = title_case(&self.shipping_option);
        let address = self.shipping_address();

        if self.shipping_option == DELIVERY_OPTION && address != STORE_PICKUP {
            format!("Shipping: {option} ({address})")
        } else {
            format!("Shipping: {option} ({STORE_PICKUP})")
        }
    }
}
