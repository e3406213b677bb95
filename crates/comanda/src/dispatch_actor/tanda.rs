use super::route::{RouteStop, RouteTree};
use crate::geo::Zone;
use crate::model::{CourierId, Order, TandaId};

/// Why a tanda was cut from its zone queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CutReason {
    /// The queue reached the batch size.
    Full,
    /// The oldest queued order waited past the limit.
    Aged,
}

/// A batch of orders for one zone that leaves the restaurant together.
///
/// The route is planned once at cut time and confirmed stop by stop,
/// nearest first. `next_stop` points at the stop the courier must confirm
/// next.
#[derive(Debug, Clone)]
pub struct Tanda {
    pub id: TandaId,
    pub zone: Zone,
    pub cut: CutReason,
    pub orders: Vec<Order>,
    pub route: RouteTree,
    pub courier: Option<CourierId>,
    stops: Vec<RouteStop>,
    next_stop: usize,
}

impl Tanda {
    pub fn new(id: TandaId, zone: Zone, cut: CutReason, orders: Vec<Order>) -> Self {
        let route = RouteTree::plan(&orders);
        let stops = route.in_order();
        Self {
            id,
            zone,
            cut,
            orders,
            route,
            courier: None,
            stops,
            next_stop: 0,
        }
    }

    /// The stop to confirm next, or `None` once every stop is delivered.
    pub fn current_stop(&self) -> Option<&RouteStop> {
        self.stops.get(self.next_stop)
    }

    /// Marks the current stop delivered.
    pub fn advance(&mut self) {
        if self.next_stop < self.stops.len() {
            self.next_stop += 1;
        }
    }

    /// Stops not yet delivered.
    pub fn remaining(&self) -> usize {
        self.stops.len() - self.next_stop
    }

    pub fn is_complete(&self) -> bool {
        self.next_stop >= self.stops.len()
    }

    /// The full delivery sequence, nearest stop first.
    pub fn stops(&self) -> &[RouteStop] {
        &self.stops
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::GeoPoint;
    use crate::model::OrderCode;
    use chrono::Utc;
    use std::time::Instant;

    fn order(code: &str, distance_km: f64) -> Order {
        Order {
            code: OrderCode(code.to_string()),
            customer: "59899000001".to_string(),
            lines: Vec::new(),
            total: 0.0,
            location: GeoPoint::new(-34.88, -56.15),
            zone: Zone::SE,
            distance_km,
            eta_minutes: 1,
            placed_at: Utc::now(),
            queued_at: Instant::now(),
        }
    }

    #[test]
    fn stops_follow_route_order_not_arrival_order() {
        let tanda = Tanda::new(
            TandaId(1),
            Zone::SE,
            CutReason::Full,
            vec![order("FAR001", 9.0), order("NEAR01", 1.0), order("MID001", 4.0)],
        );

        let codes: Vec<String> = tanda.stops().iter().map(|s| s.code.0.clone()).collect();
        assert_eq!(codes, vec!["NEAR01", "MID001", "FAR001"]);
    }

    #[test]
    fn advancing_through_every_stop_completes_the_tanda() {
        let mut tanda = Tanda::new(
            TandaId(2),
            Zone::SE,
            CutReason::Aged,
            vec![order("AAAAAA", 1.0), order("BBBBBB", 2.0)],
        );

        assert_eq!(tanda.remaining(), 2);
        assert_eq!(tanda.current_stop().map(|s| s.code.0.clone()), Some("AAAAAA".to_string()));

        tanda.advance();
        assert_eq!(tanda.remaining(), 1);
        assert!(!tanda.is_complete());
        assert_eq!(tanda.current_stop().map(|s| s.code.0.clone()), Some("BBBBBB".to_string()));

        tanda.advance();
        assert_eq!(tanda.remaining(), 0);
        assert!(tanda.is_complete());
        assert!(tanda.current_stop().is_none());
    }
}
