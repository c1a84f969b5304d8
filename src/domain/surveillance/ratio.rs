use crate::domain::orders::OrderRecord;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Serialize};

/// Quantities measured over one window.
///
/// Sums are held in `u128`, wide enough for any window of `u64` quantities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowTotals {
    pub orders: usize,
    pub total_quantity: u128,
    pub cancel_quantity: u128,
}

impl WindowTotals {
    pub fn measure(window: &[&OrderRecord]) -> Self {
        window.iter().fold(
            Self {
                orders: 0,
                total_quantity: 0,
                cancel_quantity: 0,
            },
            |acc, order| Self {
                orders: acc.orders + 1,
                total_quantity: acc.total_quantity + u128::from(order.quantity),
                cancel_quantity: if order.is_cancel() {
                    acc.cancel_quantity + u128::from(order.quantity)
                } else {
                    acc.cancel_quantity
                },
            },
        )
    }

    /// `cancel / total`, or `None` when the window carries no quantity
    pub fn cancel_ratio(&self) -> Option<Decimal> {
        if self.total_quantity == 0 {
            return None;
        }
        let cancel = Decimal::from_u128(self.cancel_quantity)?;
        let total = Decimal::from_u128(self.total_quantity)?;
        cancel.checked_div(total)
    }

    pub fn is_excessive(&self, max_cancel_ratio: Decimal) -> bool {
        if self.orders <= 1 {
            return false;
        }
        self.cancel_ratio()
            .is_some_and(|ratio| ratio > max_cancel_ratio)
    }
}

/// True when the window's cancelled share of quantity is strictly above `max_cancel_ratio`.
///
/// A single-order window and a zero-quantity window are never excessive.
pub fn evaluate(window: &[&OrderRecord], max_cancel_ratio: Decimal) -> bool {
    WindowTotals::measure(window).is_excessive(max_cancel_ratio)
}

/// Details of a window that was evaluated for a company
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowStats {
    pub company: String,
    pub anchor_index: usize,
    pub window_len: usize,
    pub total_quantity: u128,
    pub cancel_quantity: u128,
    pub cancel_ratio: Option<Decimal>,
    pub company_order_count: usize,
}

impl WindowStats {
    pub fn new(
        company: &str,
        anchor_index: usize,
        totals: WindowTotals,
        company_order_count: usize,
    ) -> Self {
        Self {
            company: company.to_string(),
            anchor_index,
            window_len: totals.orders,
            total_quantity: totals.total_quantity,
            cancel_quantity: totals.cancel_quantity,
            cancel_ratio: totals.cancel_ratio(),
            company_order_count,
        }
    }
}
