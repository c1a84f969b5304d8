//! Time-window selection around an anchor order.
//!
//! A window is the anchor plus its neighbours whose timestamps fall inside
//! `[anchor.time - window, anchor.time + window]` (inclusive on both ends).

use crate::domain::orders::OrderRecord;
use crate::domain::surveillance::detector_config::ScanPolicy;
use chrono::{Duration, NaiveDateTime};

/// Inclusive time bound centred on an anchor timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeBound {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl TimeBound {
    pub fn around(anchor: NaiveDateTime, window: Duration) -> Self {
        Self {
            start: anchor
                .checked_sub_signed(window)
                .unwrap_or(NaiveDateTime::MIN),
            end: anchor
                .checked_add_signed(window)
                .unwrap_or(NaiveDateTime::MAX),
        }
    }

    pub fn contains(&self, time: NaiveDateTime) -> bool {
        time >= self.start && time <= self.end
    }
}

/// True if the timestamps never decrease along `orders`.
pub fn is_time_ordered(orders: &[OrderRecord]) -> bool {
    orders.windows(2).all(|pair| pair[0].time <= pair[1].time)
}

/// Returns the window of `orders[anchor_index]`, in original positional order.
///
/// The result always includes the anchor. An out-of-range index yields an empty window.
pub fn window_around(
    orders: &[OrderRecord],
    anchor_index: usize,
    window: Duration,
    scan: ScanPolicy,
) -> Vec<&OrderRecord> {
    let Some(anchor) = orders.get(anchor_index) else {
        return Vec::new();
    };
    let bound = TimeBound::around(anchor.time, window);

    match scan {
        ScanPolicy::Contiguous => {
            let before = orders[..anchor_index]
                .iter()
                .rev()
                .take_while(|order| bound.contains(order.time))
                .count();
            let after = orders[anchor_index + 1..]
                .iter()
                .take_while(|order| bound.contains(order.time))
                .count();

            orders[anchor_index - before..=anchor_index + after]
                .iter()
                .collect()
        }
        ScanPolicy::Exhaustive => orders
            .iter()
            .enumerate()
            .filter(|(index, order)| *index == anchor_index || bound.contains(order.time))
            .map(|(_, order)| order)
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::orders::OrderType;
    use chrono::NaiveDate;

    fn at(hms: (u32, u32, u32), quantity: u64) -> OrderRecord {
        let time = NaiveDate::from_ymd_opt(2015, 5, 21)
            .unwrap()
            .and_hms_opt(hms.0, hms.1, hms.2)
            .unwrap();
        OrderRecord::new(time, "Acme", OrderType::NewOrder, quantity)
    }

    fn quantities(window: &[&OrderRecord]) -> Vec<u64> {
        window.iter().map(|r| r.quantity).collect()
    }

    fn minute() -> Duration {
        Duration::seconds(60)
    }

    #[test]
    fn test_lone_order_is_its_own_window() {
        let orders = vec![at((10, 0, 0), 1)];
        let window = window_around(&orders, 0, minute(), ScanPolicy::Contiguous);
        assert_eq!(quantities(&window), vec![1]);
    }

    #[test]
    fn test_window_keeps_positional_order() {
        let orders = vec![
            at((10, 0, 0), 1),
            at((10, 0, 30), 2),
            at((10, 0, 45), 3),
            at((10, 1, 10), 4),
        ];

        let window = window_around(&orders, 2, minute(), ScanPolicy::Contiguous);
        assert_eq!(quantities(&window), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let orders = vec![at((10, 0, 0), 1), at((10, 1, 0), 2), at((10, 2, 0), 3)];

        let window = window_around(&orders, 1, minute(), ScanPolicy::Contiguous);
        assert_eq!(quantities(&window), vec![1, 2, 3]);

        // 60s + 1s away is out
        let orders = vec![at((10, 0, 0), 1), at((10, 1, 1), 2)];
        let window = window_around(&orders, 0, minute(), ScanPolicy::Contiguous);
        assert_eq!(quantities(&window), vec![1]);
    }

    #[test]
    fn test_isolated_orders_get_singleton_windows() {
        let orders = vec![at((10, 0, 0), 1), at((10, 2, 0), 2), at((10, 4, 0), 3)];

        for index in 0..orders.len() {
            let window = window_around(&orders, index, minute(), ScanPolicy::Contiguous);
            assert_eq!(window.len(), 1, "anchor {} should be alone", index);
        }
    }

    #[test]
    fn test_contiguous_scan_stops_at_first_miss() {
        // Unsorted: the record at 10:05 blocks the scan from reaching 10:00:10
        let orders = vec![at((10, 0, 0), 1), at((10, 5, 0), 2), at((10, 0, 10), 3)];

        let contiguous = window_around(&orders, 0, minute(), ScanPolicy::Contiguous);
        assert_eq!(quantities(&contiguous), vec![1]);

        let exhaustive = window_around(&orders, 0, minute(), ScanPolicy::Exhaustive);
        assert_eq!(quantities(&exhaustive), vec![1, 3]);
    }

    #[test]
    fn test_policies_agree_on_sorted_input() {
        let orders = vec![
            at((10, 0, 0), 1),
            at((10, 0, 50), 2),
            at((10, 1, 40), 3),
            at((10, 3, 0), 4),
        ];

        for index in 0..orders.len() {
            assert_eq!(
                window_around(&orders, index, minute(), ScanPolicy::Contiguous),
                window_around(&orders, index, minute(), ScanPolicy::Exhaustive),
            );
        }
    }

    #[test]
    fn test_time_order_check() {
        assert!(is_time_ordered(&[]));
        assert!(is_time_ordered(&[at((10, 0, 0), 1), at((10, 0, 0), 2), at((10, 0, 5), 3)]));
        assert!(!is_time_ordered(&[at((10, 0, 5), 1), at((10, 0, 0), 2)]));
    }

    #[test]
    fn test_out_of_range_anchor() {
        let orders = vec![at((10, 0, 0), 1)];
        assert!(window_around(&orders, 5, minute(), ScanPolicy::Contiguous).is_empty());
    }

    #[test]
    fn test_zero_window_only_matches_same_second() {
        let orders = vec![at((10, 0, 0), 1), at((10, 0, 0), 2), at((10, 0, 1), 3)];
        let window = window_around(&orders, 0, Duration::zero(), ScanPolicy::Contiguous);
        assert_eq!(quantities(&window), vec![1, 2]);
    }
}
