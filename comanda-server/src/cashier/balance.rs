//! Balance aggregation
//!
//! A snapshot is derived from the order ledger on every read. Nothing here
//! writes; the same ledger always yields the same snapshot.

use std::collections::HashMap;

use rust_decimal::Decimal;
use shared::models::{
    BalanceSnapshot, PaymentBreakdown, PaymentMethod, SaleDetail, SaleItem, Shift, WaiterRef,
    DEFAULT_DOC_TYPE,
};
use sqlx::SqlitePool;

use crate::db::repository::order::{self, SaleLine, SaleRow};
use crate::db::repository::RepoResult;
use crate::utils::money::{line_total, round_money, to_decimal, to_f64};

/// Recorded expenses. Expenses are not tracked yet.
const EXPENSES: Decimal = Decimal::ZERO;

/// `[start, end)` window of a shift; an open shift runs until `now`
pub fn window(shift: &Shift, now: i64) -> (i64, i64) {
    let end = match shift.end_time {
        Some(end) if !shift.is_open() => end,
        _ => now,
    };
    (shift.start_time, end)
}

/// Load the ledger rows for `shift` and aggregate them
pub async fn compute_balance(pool: &SqlitePool, shift: &Shift, now: i64) -> RepoResult<BalanceSnapshot> {
    let (start, end) = window(shift, now);
    let sales = order::find_closed_in_window(pool, start, end).await?;
    let lines = order::find_closed_lines_in_window(pool, start, end).await?;
    let pending = order::find_pending_lines(pool).await?;
    Ok(aggregate(shift, &sales, &lines, &pending))
}

#[derive(Default)]
struct Buckets {
    efectivo: Decimal,
    tarjeta: Decimal,
    yape: Decimal,
    izipay: Decimal,
}

impl Buckets {
    fn add(&mut self, method: PaymentMethod, amount: Decimal) {
        match method {
            PaymentMethod::Cash => self.efectivo += amount,
            PaymentMethod::Card => self.tarjeta += amount,
            PaymentMethod::Yape => self.yape += amount,
            PaymentMethod::Izipay => self.izipay += amount,
        }
    }

    fn total(&self) -> Decimal {
        self.efectivo + self.tarjeta + self.yape + self.izipay
    }

    fn to_breakdown(&self) -> PaymentBreakdown {
        PaymentBreakdown {
            efectivo: to_f64(self.efectivo),
            tarjeta: to_f64(self.tarjeta),
            yape: to_f64(self.yape),
            izipay: to_f64(self.izipay),
        }
    }
}

/// Pure aggregation over already loaded rows.
///
/// `lines` must belong to `sales`; lines of unknown orders are ignored.
pub fn aggregate(
    shift: &Shift,
    sales: &[SaleRow],
    lines: &[SaleLine],
    pending: &[SaleLine],
) -> BalanceSnapshot {
    let mut lines_by_order: HashMap<i64, Vec<&SaleLine>> = HashMap::new();
    for line in lines {
        lines_by_order.entry(line.order_id).or_default().push(line);
    }

    let mut buckets = Buckets::default();
    let mut ventas = Vec::with_capacity(sales.len());

    for sale in sales {
        let order_lines = lines_by_order.get(&sale.id).map(Vec::as_slice).unwrap_or(&[]);

        let mut subtotal = Decimal::ZERO;
        let items = order_lines
            .iter()
            .map(|line| {
                let total = line_total(line.quantity, line.unit_price);
                subtotal += total;
                SaleItem {
                    cantidad: line.quantity,
                    descripcion: line.product_name.clone(),
                    precio: line.unit_price,
                    total: to_f64(total),
                }
            })
            .collect();

        let tip = to_decimal(sale.tip);
        // buckets hold whole cents so they always add up to the gross
        let order_total = round_money(subtotal + tip);
        // closed without a recorded method: cash bucket
        let method = sale.payment_method.unwrap_or(PaymentMethod::Cash);
        buckets.add(method, order_total);

        ventas.push(SaleDetail {
            id: sale.id,
            hora: sale.created_at,
            items,
            subtotal: to_f64(subtotal),
            propina: to_f64(tip),
            total: to_f64(order_total),
            metodo: method,
            doc: sale
                .doc_type
                .clone()
                .unwrap_or_else(|| DEFAULT_DOC_TYPE.to_string()),
            mozo: sale.waiter_name.as_ref().map(|name| WaiterRef {
                id: sale.waiter_id,
                nombre: name.clone(),
            }),
        });
    }

    let pending_total: Decimal = pending
        .iter()
        .map(|line| line_total(line.quantity, line.unit_price))
        .sum();

    let opening = to_decimal(shift.opening_float);
    let cash_drawer = opening + buckets.efectivo - EXPENSES;

    BalanceSnapshot {
        id: Some(shift.id),
        estado: shift.status,
        fecha_inicio: Some(shift.start_time),
        fecha_fin: shift.end_time,
        inicio: to_f64(opening),
        egresos: to_f64(EXPENSES),
        ingresos: buckets.to_breakdown(),
        total_caja: to_f64(cash_drawer),
        total_bruto: to_f64(buckets.total()),
        total_pendiente: to_f64(pending_total),
        ventas,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::ShiftStatus;

    fn shift(opening: f64, status: ShiftStatus, end: Option<i64>) -> Shift {
        Shift {
            id: 1,
            opening_float: opening,
            status,
            start_time: 1_000,
            end_time: end,
            created_at: 1_000,
            updated_at: 1_000,
        }
    }

    fn sale(id: i64, method: Option<PaymentMethod>, tip: f64) -> SaleRow {
        SaleRow {
            id,
            created_at: 1_500,
            tip,
            payment_method: method,
            doc_type: None,
            waiter_id: 7,
            waiter_name: Some("Ana".into()),
        }
    }

    fn line(order_id: i64, quantity: i64, unit_price: f64) -> SaleLine {
        SaleLine {
            order_id,
            product_name: "Ceviche".into(),
            quantity,
            unit_price,
        }
    }

    #[test]
    fn test_window_of_open_and_closed_shift() {
        assert_eq!(window(&shift(0.0, ShiftStatus::Open, None), 9_000), (1_000, 9_000));
        assert_eq!(
            window(&shift(0.0, ShiftStatus::Closed, Some(5_000)), 9_000),
            (1_000, 5_000)
        );
    }

    #[test]
    fn test_cash_sale_feeds_drawer() {
        let snap = aggregate(
            &shift(100.0, ShiftStatus::Open, None),
            &[sale(1, Some(PaymentMethod::Cash), 0.0)],
            &[line(1, 2, 25.0)],
            &[],
        );
        assert_eq!(snap.ingresos.efectivo, 50.0);
        assert_eq!(snap.total_caja, 150.0);
        assert_eq!(snap.total_bruto, 50.0);
        assert_eq!(snap.inicio, 100.0);
        assert_eq!(snap.egresos, 0.0);
    }

    #[test]
    fn test_buckets_sum_to_gross() {
        let sales = [
            sale(1, Some(PaymentMethod::Yape), 0.0),
            sale(2, Some(PaymentMethod::Card), 2.5),
            sale(3, None, 0.0),
            sale(4, Some(PaymentMethod::Izipay), 0.1),
        ];
        let lines = [line(1, 1, 20.0), line(2, 3, 9.9), line(3, 1, 0.2), line(4, 1, 0.2)];
        let snap = aggregate(&shift(0.0, ShiftStatus::Closed, Some(2_000)), &sales, &lines, &[]);

        assert_eq!(snap.ingresos.yape, 20.0);
        assert_eq!(snap.ingresos.tarjeta, 32.2);
        assert_eq!(snap.ingresos.efectivo, 0.2);
        assert_eq!(snap.ingresos.izipay, 0.3);
        let sum = snap.ingresos.efectivo + snap.ingresos.tarjeta + snap.ingresos.yape + snap.ingresos.izipay;
        assert_eq!(to_f64(to_decimal(sum)), snap.total_bruto);
        assert_eq!(snap.total_bruto, 52.7);
    }

    #[test]
    fn test_sub_cent_sales_still_sum_to_gross() {
        let sales = [
            sale(1, Some(PaymentMethod::Cash), 0.0),
            sale(2, Some(PaymentMethod::Card), 0.0),
        ];
        let lines = [line(1, 1, 0.005), line(2, 1, 0.005)];
        let snap = aggregate(&shift(0.0, ShiftStatus::Closed, Some(2_000)), &sales, &lines, &[]);

        assert_eq!(snap.ingresos.efectivo, 0.01);
        assert_eq!(snap.ingresos.tarjeta, 0.01);
        assert_eq!(snap.total_bruto, 0.02);
        assert_eq!(snap.ventas[0].total, 0.01);
    }

    #[test]
    fn test_sale_detail_includes_tip_and_waiter() {
        let snap = aggregate(
            &shift(0.0, ShiftStatus::Open, None),
            &[sale(9, Some(PaymentMethod::Card), 4.0)],
            &[line(9, 2, 18.0), line(9, 1, 6.5)],
            &[],
        );
        let detail = &snap.ventas[0];
        assert_eq!(detail.subtotal, 42.5);
        assert_eq!(detail.propina, 4.0);
        assert_eq!(detail.total, 46.5);
        assert_eq!(detail.items.len(), 2);
        assert_eq!(detail.items[0].total, 36.0);
        assert_eq!(detail.doc, DEFAULT_DOC_TYPE);
        assert_eq!(detail.mozo.as_ref().map(|m| m.id), Some(7));
        assert_eq!(detail.metodo, PaymentMethod::Card);
    }

    #[test]
    fn test_pending_excludes_tips_and_ignores_window() {
        let snap = aggregate(
            &shift(10.0, ShiftStatus::Closed, Some(2_000)),
            &[],
            &[],
            &[line(20, 1, 12.0), line(21, 2, 3.35)],
        );
        assert_eq!(snap.total_pendiente, 18.7);
        assert_eq!(snap.total_bruto, 0.0);
        assert_eq!(snap.total_caja, 10.0);
        assert!(snap.ventas.is_empty());
    }
}
