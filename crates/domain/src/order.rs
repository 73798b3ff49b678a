//! # 注文
//!
//! 外部から届く注文ペイロードと、その入力検証を定義する。
//!
//! ## 検証の順序
//!
//! 1. 必須フィールドの存在確認（値の型は問わない）
//! 2. `order_details` が配列であることの確認
//! 3. 型付きデコード（文字列・数値・明細行の形）
//!
//! 1 と 2 は明細の整形より前に行い、失敗した場合はメールを一切送らない。
//!
//! ## 金額の扱い
//!
//! 小計・配送料・税・合計はクライアントの計算をそのまま信頼する。
//! 明細行からの再計算や整合性チェックは行わない。
//!
//! JSON の小数は f64 の二進値をそのまま [`Decimal`] に写す（`2.675` は
//! `2.67499999…` として保持され、表示は `2.67` になる）。
//! 十進の文字列で届いた金額は書かれたとおりの値として扱う。

mod formatting;

pub use formatting::{CURRENCY_LABEL, STORE_PICKUP, format_amount, title_case};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, de};
use serde_json::Value;
use thiserror::Error;

/// 注文ペイロードの必須フィールド
///
/// `shipping_address` のみ任意（未指定時は [`STORE_PICKUP`]）。
pub const REQUIRED_FIELDS: [&str; 11] = [
    "order_id",
    "customer_email",
    "customer_name",
    "customer_phone",
    "shipping_option",
    "payment_method",
    "order_details",
    "subtotal",
    "delivery_fee",
    "tax",
    "order_total",
];

/// 注文ペイロードの検証エラー
///
/// いずれもクライアント起因のエラーで、HTTP 400 として返される。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// 必須フィールドの欠落（欠落したフィールド名を保持する。レスポンスには含めない）
    #[error("Missing required fields")]
    MissingFields(Vec<String>),

    /// `order_details` が配列ではない
    #[error("order_details must be a list")]
    OrderDetailsNotList,

    /// フィールドの型や明細行の形が不正
    #[error("Malformed order payload: {0}")]
    Malformed(String),
}

/// 注文の明細行
///
/// `quantity × price` と `total` の整合性は検証しない。
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LineItem {
    #[serde(deserialize_with = "string_or_number")]
    pub name:     String,
    /// 数量（受け取った表記のまま表示する: `2` → `2`、`2.5` → `2.5`、`"2"` → `2`）
    #[serde(deserialize_with = "string_or_number")]
    pub quantity: String,
    #[serde(deserialize_with = "decimal_amount")]
    pub price:    Decimal,
    #[serde(deserialize_with = "decimal_amount")]
    pub total:    Decimal,
}

/// 注文ペイロード
///
/// [`OrderPayload::from_json`] で検証済みのもののみが生成される。
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OrderPayload {
    #[serde(deserialize_with = "string_or_number")]
    pub order_id:         String,
    pub customer_email:   String,
    pub customer_name:    String,
    #[serde(deserialize_with = "string_or_number")]
    pub customer_phone:   String,
    pub shipping_option:  String,
    #[serde(default)]
    pub shipping_address: Option<String>,
    pub payment_method:   String,
    pub order_details:    Vec<LineItem>,
    #[serde(deserialize_with = "decimal_amount")]
    pub subtotal:         Decimal,
    #[serde(deserialize_with = "decimal_amount")]
    pub delivery_fee:     Decimal,
    #[serde(deserialize_with = "decimal_amount")]
    pub tax:              Decimal,
    #[serde(deserialize_with = "decimal_amount")]
    pub order_total:      Decimal,
}

impl OrderPayload {
    /// デコード済みの JSON から注文ペイロードを検証・構築する
    ///
    /// JSON オブジェクトでない値は、すべての必須フィールドが欠落しているものとして扱う。
    pub fn from_json(value: Value) -> Result<Self, ValidationError> {
        let Some(object) = value.as_object() else {
            return Err(ValidationError::MissingFields(
                REQUIRED_FIELDS.iter().map(ToString::to_string).collect(),
            ));
        };

        let missing: Vec<String> = REQUIRED_FIELDS
            .iter()
            .filter(|field| !object.contains_key(**field))
            .map(ToString::to_string)
            .collect();
        if !missing.is_empty() {
            return Err(ValidationError::MissingFields(missing));
        }

        if !object.get("order_details").is_some_and(Value::is_array) {
            return Err(ValidationError::OrderDetailsNotList);
        }

        serde_json::from_value(value).map_err(|e| ValidationError::Malformed(e.to_string()))
    }

    /// 配送先住所（未指定時は `"Store Pickup"`）
    pub fn shipping_address(&self) -> &str {
        self.shipping_address.as_deref().unwrap_or(STORE_PICKUP)
    }
}

/// 文字列または数値を文字列として受け取る
///
/// フロントエンドによっては注文 ID や電話番号、明細の数量を数値と文字列のどちらでも送ってくる。
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(de::Error::custom(format!(
            "expected a string or number, found {other}"
        ))),
    }
}

/// 金額を [`Decimal`] として受け取る
///
/// 整数はそのまま、小数は f64 の二進値を丸めずに写す。数値文字列も受け付ける。
fn decimal_amount<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Decimal::from(i))
            } else if let Some(u) = n.as_u64() {
                Ok(Decimal::from(u))
            } else {
                n.as_f64()
                    .and_then(Decimal::from_f64_retain)
                    .ok_or_else(|| de::Error::custom(format!("amount out of range: {n}")))
            }
        }
        Value::String(s) => s
            .trim()
            .parse::<Decimal>()
            .map_err(|e| de::Error::custom(format!("invalid amount {s:?}: {e}"))),
        other => Err(de::Error::custom(format!(
            "expected a numeric amount, found {other}"
        ))),
    }
}
