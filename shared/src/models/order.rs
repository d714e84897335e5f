//! Order Model (comandas and their line items)

use serde::{Deserialize, Serialize};

/// Order status. `Closed` means paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum OrderStatus {
    New,
    Sent,
    Preparing,
    Ready,
    Closed,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::New => "NEW",
            OrderStatus::Sent => "SENT",
            OrderStatus::Preparing => "PREPARING",
            OrderStatus::Ready => "READY",
            OrderStatus::Closed => "CLOSED",
        }
    }

    /// Statuses shown on the kitchen board by default
    pub const ACTIVE_KITCHEN: [OrderStatus; 3] =
        [OrderStatus::Sent, OrderStatus::Preparing, OrderStatus::Ready];
}

/// Per-item preparation status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum ItemStatus {
    Pending,
    Sent,
    Preparing,
    Ready,
    Delivered,
}

/// Payment method, fixed once at checkout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum PaymentMethod {
    #[serde(rename = "efectivo")]
    Cash,
    #[serde(rename = "tarjeta")]
    Card,
    /// Yape and Plin wallets
    #[serde(rename = "yape")]
    Yape,
    #[serde(rename = "izipay")]
    Izipay,
}

impl PaymentMethod {
    /// Map a free-text tag from the payment screen to a method.
    ///
    /// First match wins: izipay, then yape/plin, then tarjeta/card.
    /// Anything else is cash.
    pub fn classify(tag: &str) -> Self {
        let tag = tag.trim().to_lowercase();
        if tag.contains("izipay") {
            PaymentMethod::Izipay
        } else if tag.contains("yape") || tag.contains("plin") {
            PaymentMethod::Yape
        } else if tag.contains("tarjeta") || tag.contains("card") {
            PaymentMethod::Card
        } else {
            // "efectivo", "cash" and unknown tags
            PaymentMethod::Cash
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "efectivo",
            PaymentMethod::Card => "tarjeta",
            PaymentMethod::Yape => "yape",
            PaymentMethod::Izipay => "izipay",
        }
    }
}

/// Document type used when none is given at checkout
pub const DEFAULT_DOC_TYPE: &str = "sin_comprobante";

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub id: i64,
    pub table_id: i64,
    pub waiter_id: i64,
    pub status: OrderStatus,
    /// Set at checkout
    pub payment_method: Option<PaymentMethod>,
    pub tip: f64,
    pub total_received: f64,
    pub doc_type: Option<String>,
    pub notes: Option<String>,
    pub customer_email: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
    pub closed_at: Option<i64>,
}

/// Line item with product and cook names joined in
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub product_id: i64,
    pub product_name: String,
    pub quantity: i64,
    /// Product price when the round was submitted
    pub unit_price: f64,
    pub status: ItemStatus,
    pub note: Option<String>,
    pub cook_id: Option<i64>,
    pub cook_name: Option<String>,
    pub prep_started_at: Option<i64>,
    pub ready_at: Option<i64>,
    pub created_at: i64,
}

/// Order with table, waiter and items
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    pub table_number: i64,
    pub waiter_name: Option<String>,
    pub items: Vec<OrderItem>,
    /// Σ quantity × unit_price
    pub subtotal: f64,
}

/// One product line in a submitted round
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemInput {
    pub product_id: i64,
    pub quantity: i64,
    pub note: Option<String>,
}

/// Submit a round for a table (creates the order or appends to it)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderSubmit {
    pub table_id: i64,
    pub waiter_id: i64,
    pub items: Vec<OrderItemInput>,
}

/// Update order status payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderStatusUpdate {
    pub status: OrderStatus,
}

/// Update line item payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderItemUpdate {
    pub status: Option<ItemStatus>,
    pub quantity: Option<i64>,
    pub cook_id: Option<i64>,
}

/// Query for the order list
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderListQuery {
    pub status: Option<OrderStatus>,
}

/// Checkout payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckoutRequest {
    /// Free-text tag, classified into [`PaymentMethod`]
    pub payment_method: Option<String>,
    pub doc_type: Option<String>,
    pub total_received: Option<f64>,
    pub tip: Option<f64>,
    pub notes: Option<String>,
    pub email: Option<String>,
}

/// Checkout response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutReceipt {
    #[serde(flatten)]
    pub order: Order,
    pub subtotal: f64,
    /// subtotal + tip
    pub total: f64,
    pub message: String,
}

/// Kitchen queue entry (one line item)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct KitchenTicket {
    pub item_id: i64,
    pub order_id: i64,
    pub table_id: i64,
    pub table_number: i64,
    pub product_id: i64,
    pub product_name: String,
    pub quantity: i64,
    pub status: ItemStatus,
    pub note: Option<String>,
    pub cook_id: Option<i64>,
    pub cook_name: Option<String>,
    pub prep_started_at: Option<i64>,
    pub ready_at: Option<i64>,
    pub created_at: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_precedence() {
        assert_eq!(PaymentMethod::classify("izipay"), PaymentMethod::Izipay);
        assert_eq!(PaymentMethod::classify("Yape"), PaymentMethod::Yape);
        assert_eq!(PaymentMethod::classify("plin"), PaymentMethod::Yape);
        assert_eq!(PaymentMethod::classify("tarjeta"), PaymentMethod::Card);
        assert_eq!(PaymentMethod::classify("Card"), PaymentMethod::Card);
        assert_eq!(PaymentMethod::classify("efectivo"), PaymentMethod::Cash);
        // izipay wins over card when both appear
        assert_eq!(
            PaymentMethod::classify("tarjeta izipay"),
            PaymentMethod::Izipay
        );
        assert_eq!(PaymentMethod::classify("yape/tarjeta"), PaymentMethod::Yape);
    }

    #[test]
    fn test_classify_unknown_is_cash() {
        assert_eq!(PaymentMethod::classify(""), PaymentMethod::Cash);
        assert_eq!(PaymentMethod::classify("  cupón  "), PaymentMethod::Cash);
        assert_eq!(PaymentMethod::classify("transferencia"), PaymentMethod::Cash);
    }

    #[test]
    fn test_payment_method_wire_name() {
        assert_eq!(
            serde_json::to_string(&PaymentMethod::Card).unwrap(),
            "\"tarjeta\""
        );
        assert_eq!(PaymentMethod::Yape.as_str(), "yape");
    }

    #[test]
    fn test_order_status_wire_name() {
        let s: OrderStatus = serde_json::from_str("\"PREPARING\"").unwrap();
        assert_eq!(s, OrderStatus::Preparing);
        assert_eq!(OrderStatus::Closed.as_str(), "CLOSED");
    }
}
