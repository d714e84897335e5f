//! Cash Shift Model (arqueo de caja)
//!
//! Shift records and the balance snapshot keep the field names the cashier
//! screen reads (`estado`, `inicio`, `ingresos`, `totalCaja`, ...).

use serde::{Deserialize, Serialize};

use super::order::PaymentMethod;
use crate::serde_helpers::{rfc3339_millis, rfc3339_millis_opt};

/// Shift status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
pub enum ShiftStatus {
    #[serde(rename = "abierto")]
    #[cfg_attr(feature = "db", sqlx(rename = "OPEN"))]
    Open,
    #[default]
    #[serde(rename = "cerrado")]
    #[cfg_attr(feature = "db", sqlx(rename = "CLOSED"))]
    Closed,
}

/// Shift record - one cash-drawer session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Shift {
    pub id: i64,
    /// Opening float entered by the operator
    #[serde(rename = "montoInicial")]
    pub opening_float: f64,
    #[serde(rename = "estado")]
    pub status: ShiftStatus,
    /// Unix millis, ISO string on the wire
    #[serde(rename = "fechaInicio", with = "rfc3339_millis")]
    pub start_time: i64,
    /// Null while open
    #[serde(rename = "fechaFin", default, with = "rfc3339_millis_opt")]
    pub end_time: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Shift {
    pub fn is_open(&self) -> bool {
        self.status == ShiftStatus::Open
    }
}

/// Toggle payload. The float only matters when a new shift opens.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShiftToggle {
    #[serde(default, rename = "openingFloat", alias = "montoInicial")]
    pub opening_float: Option<f64>,
}

/// Toggle response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftToggleResult {
    /// "Caja Abierta" or "Caja Cerrada"
    pub message: String,
    pub arqueo: Shift,
}

/// Sales per payment method
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentBreakdown {
    pub efectivo: f64,
    pub tarjeta: f64,
    pub yape: f64,
    pub izipay: f64,
}

/// One line on a sale detail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleItem {
    pub cantidad: i64,
    pub descripcion: String,
    pub precio: f64,
    pub total: f64,
}

/// Waiter who served a sale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaiterRef {
    pub id: i64,
    pub nombre: String,
}

/// One closed order inside a shift window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleDetail {
    pub id: i64,
    /// Order creation time
    #[serde(with = "rfc3339_millis")]
    pub hora: i64,
    pub items: Vec<SaleItem>,
    pub subtotal: f64,
    pub propina: f64,
    /// subtotal + propina
    pub total: f64,
    pub metodo: PaymentMethod,
    pub doc: String,
    pub mozo: Option<WaiterRef>,
}

/// Balance snapshot of a shift, recomputed from the order ledger on every read
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSnapshot {
    /// None for the synthetic snapshot returned before any shift exists
    pub id: Option<i64>,
    pub estado: ShiftStatus,
    #[serde(default, with = "rfc3339_millis_opt")]
    pub fecha_inicio: Option<i64>,
    #[serde(default, with = "rfc3339_millis_opt")]
    pub fecha_fin: Option<i64>,
    /// Opening float
    pub inicio: f64,
    /// Recorded expenses (always zero for now)
    pub egresos: f64,
    pub ingresos: PaymentBreakdown,
    /// inicio + ingresos.efectivo - egresos
    pub total_caja: f64,
    pub total_bruto: f64,
    /// Subtotal of every order that is not closed yet
    pub total_pendiente: f64,
    pub ventas: Vec<SaleDetail>,
}

impl BalanceSnapshot {
    /// Closed, all-zero snapshot used when no shift was ever opened
    pub fn empty() -> Self {
        Self {
            id: None,
            estado: ShiftStatus::Closed,
            fecha_inicio: None,
            fecha_fin: None,
            inicio: 0.0,
            egresos: 0.0,
            ingresos: PaymentBreakdown::default(),
            total_caja: 0.0,
            total_bruto: 0.0,
            total_pendiente: 0.0,
            ventas: Vec::new(),
        }
    }
}

/// Pagination metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub total: i64,
    pub page: i64,
    pub total_pages: i64,
}

/// Paginated shift history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftHistoryPage {
    pub data: Vec<BalanceSnapshot>,
    pub meta: PageMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shift_wire_names() {
        let shift = Shift {
            id: 3,
            opening_float: 100.0,
            status: ShiftStatus::Open,
            start_time: 1_700_000_000_000,
            end_time: None,
            created_at: 1_700_000_000_000,
            updated_at: 1_700_000_000_000,
        };
        let json = serde_json::to_value(&shift).unwrap();
        assert_eq!(json["estado"], "abierto");
        assert_eq!(json["montoInicial"], 100.0);
        assert_eq!(json["fechaInicio"], "2023-11-14T22:13:20.000Z");
        assert!(json["fechaFin"].is_null());
        assert!(json.get("createdAt").is_some());
    }

    #[test]
    fn test_toggle_accepts_both_field_names() {
        let a: ShiftToggle = serde_json::from_str(r#"{"openingFloat": 50}"#).unwrap();
        let b: ShiftToggle = serde_json::from_str(r#"{"montoInicial": 75.5}"#).unwrap();
        let c: ShiftToggle = serde_json::from_str("{}").unwrap();
        assert_eq!(a.opening_float, Some(50.0));
        assert_eq!(b.opening_float, Some(75.5));
        assert_eq!(c.opening_float, None);
    }

    #[test]
    fn test_empty_snapshot_shape() {
        let json = serde_json::to_value(BalanceSnapshot::empty()).unwrap();
        assert_eq!(json["estado"], "cerrado");
        assert!(json["fechaInicio"].is_null());
        assert_eq!(json["inicio"], 0.0);
        assert_eq!(json["ingresos"]["izipay"], 0.0);
        assert_eq!(json["totalCaja"], 0.0);
        assert_eq!(json["totalBruto"], 0.0);
        assert_eq!(json["totalPendiente"], 0.0);
        assert_eq!(json["ventas"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn test_page_meta_camel_case() {
        let meta = PageMeta {
            total: 0,
            page: 1,
            total_pages: 0,
        };
        let json = serde_json::to_value(meta).unwrap();
        assert_eq!(json["totalPages"], 0);
    }
}
