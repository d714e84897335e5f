//! Order Repository (orders + order_item)

use super::{RepoError, RepoResult, placeholders};
use shared::models::{
    KitchenTicket, Order, OrderItem, OrderItemUpdate, OrderStatus, OrderSubmit, PaymentMethod,
};
use sqlx::{SqliteConnection, SqlitePool};

const ORDER_COLUMNS: &str = "id, table_id, waiter_id, status, payment_method, tip, total_received, doc_type, notes, customer_email, created_at, updated_at, closed_at";

const ITEM_SELECT: &str = "SELECT oi.id, oi.order_id, oi.product_id, p.name AS product_name, oi.quantity, oi.unit_price, oi.status, oi.note, oi.cook_id, s.name AS cook_name, oi.prep_started_at, oi.ready_at, oi.created_at FROM order_item oi JOIN product p ON p.id = oi.product_id LEFT JOIN staff s ON s.id = oi.cook_id";

// =============================================================================
// Orders
// =============================================================================

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Order>> {
    let sql = format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = ?");
    let order = sqlx::query_as::<_, Order>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(order)
}

pub(crate) async fn find_by_id_conn(
    conn: &mut SqliteConnection,
    id: i64,
) -> RepoResult<Option<Order>> {
    let sql = format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = ?");
    let order = sqlx::query_as::<_, Order>(&sql)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(order)
}

/// Active (non-closed) order of a table
pub async fn find_active_by_table(pool: &SqlitePool, table_id: i64) -> RepoResult<Option<Order>> {
    let sql = format!("SELECT {ORDER_COLUMNS} FROM orders WHERE table_id = ? AND status <> 'CLOSED'");
    let order = sqlx::query_as::<_, Order>(&sql)
        .bind(table_id)
        .fetch_optional(pool)
        .await?;
    Ok(order)
}

pub(crate) async fn find_active_by_table_conn(
    conn: &mut SqliteConnection,
    table_id: i64,
) -> RepoResult<Option<Order>> {
    let sql = format!("SELECT {ORDER_COLUMNS} FROM orders WHERE table_id = ? AND status <> 'CLOSED'");
    let order = sqlx::query_as::<_, Order>(&sql)
        .bind(table_id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(order)
}

/// Every non-closed order
pub async fn find_active(pool: &SqlitePool) -> RepoResult<Vec<Order>> {
    let sql = format!("SELECT {ORDER_COLUMNS} FROM orders WHERE status <> 'CLOSED' ORDER BY created_at, id");
    let orders = sqlx::query_as::<_, Order>(&sql).fetch_all(pool).await?;
    Ok(orders)
}

/// Orders in any of `statuses`, oldest first
pub async fn find_by_statuses(
    pool: &SqlitePool,
    statuses: &[OrderStatus],
) -> RepoResult<Vec<Order>> {
    if statuses.is_empty() {
        return Ok(Vec::new());
    }
    let sql = format!(
        "SELECT {ORDER_COLUMNS} FROM orders WHERE status IN ({}) ORDER BY created_at, id",
        placeholders(statuses.len())
    );
    let mut query = sqlx::query_as::<_, Order>(&sql);
    for status in statuses {
        query = query.bind(*status);
    }
    Ok(query.fetch_all(pool).await?)
}

/// Number of orders not yet closed
pub async fn count_pending(conn: &mut SqliteConnection) -> RepoResult<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders WHERE status <> 'CLOSED'")
        .fetch_one(&mut *conn)
        .await?;
    Ok(count)
}

/// Submit a round for a table.
///
/// Creates the order (SENT) and occupies the table when the table has no
/// active order, otherwise appends to it. A note-less line merges into an
/// existing PENDING note-less line of the same product. Unit prices are
/// copied from the product. Returns the order and whether it was created.
pub async fn submit_round(pool: &SqlitePool, data: &OrderSubmit) -> RepoResult<(Order, bool)> {
    let now = shared::util::now_millis();
    let mut tx = pool.begin().await?;

    let (order, created) = match find_active_by_table_conn(&mut tx, data.table_id).await? {
        Some(order) => (order, false),
        None => {
            let sql = format!(
                "INSERT INTO orders (table_id, waiter_id, status, tip, total_received, created_at, updated_at) VALUES (?1, ?2, 'SENT', 0, 0, ?3, ?3) RETURNING {ORDER_COLUMNS}"
            );
            let order = sqlx::query_as::<_, Order>(&sql)
                .bind(data.table_id)
                .bind(data.waiter_id)
                .bind(now)
                .fetch_one(&mut *tx)
                .await?;

            sqlx::query("UPDATE dining_table SET status = 'OCCUPIED', updated_at = ? WHERE id = ?")
                .bind(now)
                .bind(data.table_id)
                .execute(&mut *tx)
                .await?;
            (order, true)
        }
    };

    for item in &data.items {
        let price: Option<f64> = sqlx::query_scalar(
            "SELECT p.price FROM product p JOIN category c ON c.id = p.category_id WHERE p.id = ? AND p.is_active = 1 AND p.is_deleted = 0 AND c.is_deleted = 0",
        )
        .bind(item.product_id)
        .fetch_optional(&mut *tx)
        .await?;
        let price = price.ok_or_else(|| {
            RepoError::Validation(format!("Product {} is not available", item.product_id))
        })?;

        let merge_into: Option<i64> = if item.note.is_none() {
            sqlx::query_scalar(
                "SELECT id FROM order_item WHERE order_id = ? AND product_id = ? AND status = 'PENDING' AND note IS NULL ORDER BY id LIMIT 1",
            )
            .bind(order.id)
            .bind(item.product_id)
            .fetch_optional(&mut *tx)
            .await?
        } else {
            None
        };

        match merge_into {
            Some(item_id) => {
                sqlx::query("UPDATE order_item SET quantity = quantity + ? WHERE id = ?")
                    .bind(item.quantity)
                    .bind(item_id)
                    .execute(&mut *tx)
                    .await?;
            }
            None => {
                sqlx::query(
                    "INSERT INTO order_item (order_id, product_id, quantity, unit_price, status, note, created_at) VALUES (?, ?, ?, ?, 'PENDING', ?, ?)",
                )
                .bind(order.id)
                .bind(item.product_id)
                .bind(item.quantity)
                .bind(price)
                .bind(&item.note)
                .bind(now)
                .execute(&mut *tx)
                .await?;
            }
        }
    }

    sqlx::query("UPDATE orders SET updated_at = ? WHERE id = ?")
        .bind(now)
        .bind(order.id)
        .execute(&mut *tx)
        .await?;

    let order = find_by_id_conn(&mut tx, order.id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to load submitted order".into()))?;

    tx.commit().await?;
    Ok((order, created))
}

/// Change status of an order that is not closed
pub async fn update_status(pool: &SqlitePool, id: i64, status: OrderStatus) -> RepoResult<Order> {
    let now = shared::util::now_millis();
    let sql = format!(
        "UPDATE orders SET status = ?1, updated_at = ?2 WHERE id = ?3 AND status <> 'CLOSED' RETURNING {ORDER_COLUMNS}"
    );
    sqlx::query_as::<_, Order>(&sql)
        .bind(status)
        .bind(now)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| RepoError::Conflict(format!("Order {id} not found or already closed")))
}

/// Payment data written at checkout
#[derive(Debug, Clone)]
pub struct CheckoutData {
    pub payment_method: PaymentMethod,
    pub doc_type: String,
    pub total_received: f64,
    pub tip: f64,
    pub notes: Option<String>,
    pub customer_email: Option<String>,
}

/// Close the active order of a table and free the table.
///
/// Returns `None` when the table has no active order.
pub async fn checkout(
    pool: &SqlitePool,
    table_id: i64,
    data: CheckoutData,
) -> RepoResult<Option<Order>> {
    let now = shared::util::now_millis();
    let mut tx = pool.begin().await?;

    let Some(active) = find_active_by_table_conn(&mut tx, table_id).await? else {
        return Ok(None);
    };

    let sql = format!(
        "UPDATE orders SET status = 'CLOSED', payment_method = ?1, doc_type = ?2, total_received = ?3, tip = ?4, notes = ?5, customer_email = ?6, closed_at = ?7, updated_at = ?7 WHERE id = ?8 AND status <> 'CLOSED' RETURNING {ORDER_COLUMNS}"
    );
    let closed = sqlx::query_as::<_, Order>(&sql)
        .bind(data.payment_method)
        .bind(&data.doc_type)
        .bind(data.total_received)
        .bind(data.tip)
        .bind(&data.notes)
        .bind(&data.customer_email)
        .bind(now)
        .bind(active.id)
        .fetch_one(&mut *tx)
        .await?;

    sqlx::query("UPDATE dining_table SET status = 'FREE', updated_at = ? WHERE id = ?")
        .bind(now)
        .bind(table_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(Some(closed))
}

// =============================================================================
// Line items
// =============================================================================

pub async fn find_items(pool: &SqlitePool, order_id: i64) -> RepoResult<Vec<OrderItem>> {
    let sql = format!("{ITEM_SELECT} WHERE oi.order_id = ? ORDER BY oi.id");
    let items = sqlx::query_as::<_, OrderItem>(&sql)
        .bind(order_id)
        .fetch_all(pool)
        .await?;
    Ok(items)
}

/// Items of every order in `order_ids`
pub async fn find_items_for_orders(
    pool: &SqlitePool,
    order_ids: &[i64],
) -> RepoResult<Vec<OrderItem>> {
    if order_ids.is_empty() {
        return Ok(Vec::new());
    }
    let sql = format!(
        "{ITEM_SELECT} WHERE oi.order_id IN ({}) ORDER BY oi.id",
        placeholders(order_ids.len())
    );
    let mut query = sqlx::query_as::<_, OrderItem>(&sql);
    for id in order_ids {
        query = query.bind(*id);
    }
    Ok(query.fetch_all(pool).await?)
}

pub async fn find_item(pool: &SqlitePool, item_id: i64) -> RepoResult<Option<OrderItem>> {
    let sql = format!("{ITEM_SELECT} WHERE oi.id = ?");
    let item = sqlx::query_as::<_, OrderItem>(&sql)
        .bind(item_id)
        .fetch_optional(pool)
        .await?;
    Ok(item)
}

/// Update status, quantity or cook of a line item of an open order.
///
/// Entering PREPARING stamps `prep_started_at`, entering READY stamps `ready_at`.
pub async fn update_item(
    pool: &SqlitePool,
    item_id: i64,
    data: &OrderItemUpdate,
) -> RepoResult<OrderItem> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE order_item SET status = COALESCE(?1, status), quantity = COALESCE(?2, quantity), cook_id = COALESCE(?3, cook_id), prep_started_at = CASE WHEN ?1 = 'PREPARING' THEN ?4 ELSE prep_started_at END, ready_at = CASE WHEN ?1 = 'READY' THEN ?4 ELSE ready_at END WHERE id = ?5 AND order_id IN (SELECT id FROM orders WHERE status <> 'CLOSED')",
    )
    .bind(data.status)
    .bind(data.quantity)
    .bind(data.cook_id)
    .bind(now)
    .bind(item_id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::Conflict(format!(
            "Order item {item_id} not found or its order is closed"
        )));
    }
    find_item(pool, item_id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Order item {item_id} not found")))
}

/// Delete a line item of an open order
pub async fn delete_item(pool: &SqlitePool, item_id: i64) -> RepoResult<bool> {
    let rows = sqlx::query(
        "DELETE FROM order_item WHERE id = ? AND order_id IN (SELECT id FROM orders WHERE status <> 'CLOSED')",
    )
    .bind(item_id)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected() > 0)
}

/// Items waiting in the kitchen: not delivered, order open, kitchen category. FIFO.
pub async fn kitchen_queue(pool: &SqlitePool) -> RepoResult<Vec<KitchenTicket>> {
    let tickets = sqlx::query_as::<_, KitchenTicket>(
        "SELECT oi.id AS item_id, o.id AS order_id, t.id AS table_id, t.number AS table_number, p.id AS product_id, p.name AS product_name, oi.quantity, oi.status, oi.note, oi.cook_id, s.name AS cook_name, oi.prep_started_at, oi.ready_at, oi.created_at FROM order_item oi JOIN orders o ON o.id = oi.order_id JOIN dining_table t ON t.id = o.table_id JOIN product p ON p.id = oi.product_id JOIN category c ON c.id = p.category_id LEFT JOIN staff s ON s.id = oi.cook_id WHERE oi.status <> 'DELIVERED' AND o.status <> 'CLOSED' AND c.send_to_kitchen = 1 ORDER BY oi.id",
    )
    .fetch_all(pool)
    .await?;
    Ok(tickets)
}

// =============================================================================
// Sales ledger reads (cash shift balance)
// =============================================================================

/// Closed order header inside a balance window
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SaleRow {
    pub id: i64,
    pub created_at: i64,
    pub tip: f64,
    pub payment_method: Option<PaymentMethod>,
    pub doc_type: Option<String>,
    pub waiter_id: i64,
    pub waiter_name: Option<String>,
}

/// Priced line of an order
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SaleLine {
    pub order_id: i64,
    pub product_name: String,
    pub quantity: i64,
    pub unit_price: f64,
}

/// Closed orders created in `[start, end)`
pub async fn find_closed_in_window(
    pool: &SqlitePool,
    start: i64,
    end: i64,
) -> RepoResult<Vec<SaleRow>> {
    let rows = sqlx::query_as::<_, SaleRow>(
        "SELECT o.id, o.created_at, o.tip, o.payment_method, o.doc_type, o.waiter_id, s.name AS waiter_name FROM orders o LEFT JOIN staff s ON s.id = o.waiter_id WHERE o.status = 'CLOSED' AND o.created_at >= ? AND o.created_at < ? ORDER BY o.created_at, o.id",
    )
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Lines of the closed orders created in `[start, end)`
pub async fn find_closed_lines_in_window(
    pool: &SqlitePool,
    start: i64,
    end: i64,
) -> RepoResult<Vec<SaleLine>> {
    let rows = sqlx::query_as::<_, SaleLine>(
        "SELECT oi.order_id, p.name AS product_name, oi.quantity, oi.unit_price FROM order_item oi JOIN orders o ON o.id = oi.order_id JOIN product p ON p.id = oi.product_id WHERE o.status = 'CLOSED' AND o.created_at >= ? AND o.created_at < ? ORDER BY oi.id",
    )
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Lines of every order that is not closed
pub async fn find_pending_lines(pool: &SqlitePool) -> RepoResult<Vec<SaleLine>> {
    let rows = sqlx::query_as::<_, SaleLine>(
        "SELECT oi.order_id, p.name AS product_name, oi.quantity, oi.unit_price FROM order_item oi JOIN orders o ON o.id = oi.order_id JOIN product p ON p.id = oi.product_id WHERE o.status <> 'CLOSED' ORDER BY oi.id",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::{dining_table, test_support};
    use shared::models::{ItemStatus, OrderItemInput, StaffRole, TableStatus};

    struct Fixture {
        pool: SqlitePool,
        waiter_id: i64,
        table_id: i64,
        ceviche: i64,
        chicha: i64,
    }

    async fn fixture() -> Fixture {
        let pool = test_support::pool().await;
        let waiter = test_support::staff(&pool, "ana", StaffRole::Waiter).await;
        let table = test_support::table(&pool, 1).await;
        let food = test_support::category(&pool, "Entradas", true).await;
        let drinks = test_support::category(&pool, "Bebidas", false).await;
        let ceviche = test_support::product(&pool, "Ceviche", 25.0, food.id).await;
        let chicha = test_support::product(&pool, "Chicha morada", 6.5, drinks.id).await;
        Fixture {
            pool,
            waiter_id: waiter.id,
            table_id: table.id,
            ceviche: ceviche.id,
            chicha: chicha.id,
        }
    }

    fn round(f: &Fixture, items: Vec<(i64, i64, Option<&str>)>) -> OrderSubmit {
        OrderSubmit {
            table_id: f.table_id,
            waiter_id: f.waiter_id,
            items: items
                .into_iter()
                .map(|(product_id, quantity, note)| OrderItemInput {
                    product_id,
                    quantity,
                    note: note.map(String::from),
                })
                .collect(),
        }
    }

    #[tokio::test]
    async fn test_first_round_creates_order_and_occupies_table() {
        let f = fixture().await;
        let (order, created) = submit_round(&f.pool, &round(&f, vec![(f.ceviche, 2, None)]))
            .await
            .unwrap();
        assert!(created);
        assert_eq!(order.status, OrderStatus::Sent);

        let table = dining_table::find_by_id(&f.pool, f.table_id).await.unwrap().unwrap();
        assert_eq!(table.status, TableStatus::Occupied);

        let items = find_items(&f.pool, order.id).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].status, ItemStatus::Pending);
        assert_eq!(items[0].unit_price, 25.0);
        assert_eq!(items[0].product_name, "Ceviche");
    }

    #[tokio::test]
    async fn test_append_merges_pending_lines_without_note() {
        let f = fixture().await;
        let (order, _) = submit_round(&f.pool, &round(&f, vec![(f.ceviche, 1, None)]))
            .await
            .unwrap();
        let (again, created) = submit_round(
            &f.pool,
            &round(&f, vec![(f.ceviche, 2, None), (f.ceviche, 1, Some("sin ají"))]),
        )
        .await
        .unwrap();
        assert!(!created);
        assert_eq!(again.id, order.id);

        let items = find_items(&f.pool, order.id).await.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].quantity, 3);
        assert!(items[0].note.is_none());
        assert_eq!(items[1].quantity, 1);
        assert_eq!(items[1].note.as_deref(), Some("sin ají"));
    }

    #[tokio::test]
    async fn test_no_merge_once_item_left_pending() {
        let f = fixture().await;
        let (order, _) = submit_round(&f.pool, &round(&f, vec![(f.ceviche, 1, None)]))
            .await
            .unwrap();
        let first = find_items(&f.pool, order.id).await.unwrap()[0].id;
        update_item(
            &f.pool,
            first,
            &OrderItemUpdate {
                status: Some(ItemStatus::Preparing),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        submit_round(&f.pool, &round(&f, vec![(f.ceviche, 1, None)]))
            .await
            .unwrap();
        assert_eq!(find_items(&f.pool, order.id).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_unit_price_is_snapshotted() {
        let f = fixture().await;
        let (order, _) = submit_round(&f.pool, &round(&f, vec![(f.ceviche, 1, None)]))
            .await
            .unwrap();
        sqlx::query("UPDATE product SET price = 99 WHERE id = ?")
            .bind(f.ceviche)
            .execute(&f.pool)
            .await
            .unwrap();
        let items = find_items(&f.pool, order.id).await.unwrap();
        assert_eq!(items[0].unit_price, 25.0);
    }

    #[tokio::test]
    async fn test_unavailable_product_rolls_back_round() {
        let f = fixture().await;
        let result = submit_round(&f.pool, &round(&f, vec![(f.ceviche, 1, None), (9999, 1, None)])).await;
        assert!(matches!(result, Err(RepoError::Validation(_))));

        assert!(find_active_by_table(&f.pool, f.table_id).await.unwrap().is_none());
        let table = dining_table::find_by_id(&f.pool, f.table_id).await.unwrap().unwrap();
        assert_eq!(table.status, TableStatus::Free);
    }

    #[tokio::test]
    async fn test_item_timestamps_follow_status() {
        let f = fixture().await;
        let (order, _) = submit_round(&f.pool, &round(&f, vec![(f.ceviche, 1, None)]))
            .await
            .unwrap();
        let cook = test_support::staff(&f.pool, "luis", StaffRole::Cook).await;
        let item_id = find_items(&f.pool, order.id).await.unwrap()[0].id;

        let preparing = update_item(
            &f.pool,
            item_id,
            &OrderItemUpdate {
                status: Some(ItemStatus::Preparing),
                quantity: None,
                cook_id: Some(cook.id),
            },
        )
        .await
        .unwrap();
        assert!(preparing.prep_started_at.is_some());
        assert!(preparing.ready_at.is_none());
        assert_eq!(preparing.cook_name.as_deref(), Some("LUIS"));

        let ready = update_item(
            &f.pool,
            item_id,
            &OrderItemUpdate {
                status: Some(ItemStatus::Ready),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(ready.prep_started_at, preparing.prep_started_at);
        assert!(ready.ready_at.is_some());
        assert_eq!(ready.cook_id, Some(cook.id));
    }

    #[tokio::test]
    async fn test_checkout_closes_order_and_freezes_items() {
        let f = fixture().await;
        let (order, _) = submit_round(&f.pool, &round(&f, vec![(f.ceviche, 2, None)]))
            .await
            .unwrap();
        let item_id = find_items(&f.pool, order.id).await.unwrap()[0].id;

        let closed = checkout(
            &f.pool,
            f.table_id,
            CheckoutData {
                payment_method: PaymentMethod::Yape,
                doc_type: "boleta".into(),
                total_received: 50.0,
                tip: 5.0,
                notes: None,
                customer_email: None,
            },
        )
        .await
        .unwrap()
        .unwrap();
        assert_eq!(closed.status, OrderStatus::Closed);
        assert_eq!(closed.payment_method, Some(PaymentMethod::Yape));
        assert!(closed.closed_at.is_some());

        let table = dining_table::find_by_id(&f.pool, f.table_id).await.unwrap().unwrap();
        assert_eq!(table.status, TableStatus::Free);

        let update = update_item(
            &f.pool,
            item_id,
            &OrderItemUpdate {
                quantity: Some(5),
                ..Default::default()
            },
        )
        .await;
        assert!(matches!(update, Err(RepoError::Conflict(_))));
        assert!(!delete_item(&f.pool, item_id).await.unwrap());

        // nothing left to check out
        let again = checkout(
            &f.pool,
            f.table_id,
            CheckoutData {
                payment_method: PaymentMethod::Cash,
                doc_type: "sin_comprobante".into(),
                total_received: 0.0,
                tip: 0.0,
                notes: None,
                customer_email: None,
            },
        )
        .await
        .unwrap();
        assert!(again.is_none());
    }

    #[tokio::test]
    async fn test_kitchen_queue_filters_by_category_and_status() {
        let f = fixture().await;
        let (order, _) = submit_round(
            &f.pool,
            &round(&f, vec![(f.ceviche, 1, None), (f.chicha, 2, None)]),
        )
        .await
        .unwrap();

        let queue = kitchen_queue(&f.pool).await.unwrap();
        assert_eq!(queue.len(), 1);
        assert_eq!(queue[0].product_name, "Ceviche");
        assert_eq!(queue[0].table_number, 1);

        update_item(
            &f.pool,
            queue[0].item_id,
            &OrderItemUpdate {
                status: Some(ItemStatus::Delivered),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert!(kitchen_queue(&f.pool).await.unwrap().is_empty());
        assert_eq!(find_items(&f.pool, order.id).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_find_by_statuses() {
        let f = fixture().await;
        let (order, _) = submit_round(&f.pool, &round(&f, vec![(f.ceviche, 1, None)]))
            .await
            .unwrap();
        let found = find_by_statuses(&f.pool, &OrderStatus::ACTIVE_KITCHEN)
            .await
            .unwrap();
        assert_eq!(found.len(), 1);

        update_status(&f.pool, order.id, OrderStatus::Ready).await.unwrap();
        let ready = find_by_statuses(&f.pool, &[OrderStatus::Ready]).await.unwrap();
        assert_eq!(ready[0].id, order.id);
        assert!(find_by_statuses(&f.pool, &[OrderStatus::New]).await.unwrap().is_empty());
    }
}
