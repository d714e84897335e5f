//! Response assembly shared by several handlers

use std::collections::HashMap;

use rust_decimal::Decimal;
use shared::models::{Order, OrderDetail, OrderItem};
use sqlx::SqlitePool;

use crate::db::repository::{dining_table, order, staff};
use crate::utils::AppResult;
use crate::utils::money::{line_total, to_f64};

/// Σ quantity × unit price
pub fn subtotal(items: &[OrderItem]) -> f64 {
    to_f64(
        items
            .iter()
            .map(|i| line_total(i.quantity, i.unit_price))
            .sum::<Decimal>(),
    )
}

/// Attach items, table number and waiter name to each order (order preserved)
pub async fn order_details(pool: &SqlitePool, orders: Vec<Order>) -> AppResult<Vec<OrderDetail>> {
    if orders.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<i64> = orders.iter().map(|o| o.id).collect();
    let mut items_by_order: HashMap<i64, Vec<OrderItem>> = HashMap::new();
    for item in order::find_items_for_orders(pool, &ids).await? {
        items_by_order.entry(item.order_id).or_default().push(item);
    }

    let table_numbers: HashMap<i64, i64> = dining_table::find_all(pool)
        .await?
        .into_iter()
        .map(|t| (t.id, t.number))
        .collect();
    let waiter_names: HashMap<i64, String> = staff::find_all(pool, None)
        .await?
        .into_iter()
        .map(|s| (s.id, s.name))
        .collect();

    Ok(orders
        .into_iter()
        .map(|o| {
            let items = items_by_order.remove(&o.id).unwrap_or_default();
            OrderDetail {
                table_number: table_numbers.get(&o.table_id).copied().unwrap_or_default(),
                waiter_name: waiter_names.get(&o.waiter_id).cloned(),
                subtotal: subtotal(&items),
                items,
                order: o,
            }
        })
        .collect())
}

/// Single-order variant of [`order_details`]
pub async fn order_detail(pool: &SqlitePool, order: Order) -> AppResult<OrderDetail> {
    let id = order.id;
    order_details(pool, vec![order])
        .await?
        .pop()
        .ok_or_else(|| crate::utils::AppError::internal(format!("Order {id} lost while loading")))
}
