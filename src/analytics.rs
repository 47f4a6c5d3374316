// Order aggregation. Pure functions over normalized gateway output:
// results are freshly allocated and input is never mutated. Sub-fields are
// defaulted, not trusted; an order with junk in `items` contributes zero
// items rather than poisoning the whole computation.

use std::collections::HashMap;

use serde::Serialize;

use crate::models::{Order, OrderItem};

/// Derived revenue metrics, recomputed on every call.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderTotals {
    pub total_revenue: f64,
    pub average_order_value: f64,
    pub total_items: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatistics {
    pub total_orders: usize,
    /// Occurrence count per status string, keyed verbatim.
    pub status_counts: HashMap<String, usize>,
}

fn order_items(order: &Order) -> &[OrderItem] {
    order.items.as_deref().unwrap_or(&[])
}

/// Revenue totals across `orders`.
///
/// Revenue sums `price * quantity` per item with no rounding; negative
/// contributions (refunds) reduce it. The average divides by the order
/// count, not the item count. `total_items` counts item records, so a
/// zero-quantity item still counts as one.
pub fn totals(orders: &[Order]) -> OrderTotals {
    if orders.is_empty() {
        return OrderTotals::default();
    }

    let total_revenue: f64 = orders
        .iter()
        .flat_map(|order| order_items(order))
        .map(|item| item.price * item.quantity as f64)
        .sum();

    let average_order_value = total_revenue / orders.len() as f64;

    let total_items = orders.iter().map(|order| order_items(order).len()).sum();

    OrderTotals {
        total_revenue,
        average_order_value,
        total_items,
    }
}

/// Status distribution across `orders`.
pub fn statistics(orders: &[Order]) -> OrderStatistics {
    let mut status_counts: HashMap<String, usize> = HashMap::new();
    for order in orders {
        *status_counts.entry(order.status.clone()).or_insert(0) += 1;
    }

    OrderStatistics {
        total_orders: orders.len(),
        status_counts,
    }
}
