use super::error::DispatchError;
use super::messages::{DispatchRequest, StopOutcome, ZoneStatus};
use super::tanda::{CutReason, Tanda};
use crate::clients::DispatchClient;
use crate::config::DispatchConfig;
use crate::geo::{self, GeoPoint, Zone};
use crate::model::{Courier, CourierId, Order, OrderCode, OrderDraft, OrderReceipt, TandaId};
use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Fleet fuel burn: one litre rides ten kilometers.
const KM_PER_LITRE: f64 = 10.0;

/// Owns the zone queues, the tandas and the fleet. One task, no locks.
///
/// Orders arrive from session actors, queue per compass zone and leave in
/// tandas. A tanda is cut when its queue fills up or when the oldest order
/// in it has waited too long; the periodic sweep enforces the age rule.
pub struct DispatchActor {
    receiver: mpsc::Receiver<DispatchRequest>,
    restaurant: GeoPoint,
    tanda_size: usize,
    max_queue_wait: Duration,
    sweep_every: Duration,
    /// One FIFO per zone, indexed by `Zone::index`.
    queues: [VecDeque<Order>; 4],
    /// Tandas cut but not yet in a courier's hands.
    pending: VecDeque<Tanda>,
    /// Tandas currently out for delivery.
    active: HashMap<TandaId, Tanda>,
    /// BTreeMap so "first idle courier" is deterministic (lowest id).
    couriers: BTreeMap<CourierId, Courier>,
    next_courier_id: u32,
    next_tanda_id: u32,
    /// Codes of orders queued or out for delivery; retired on confirmation.
    live_codes: HashSet<OrderCode>,
    rng: StdRng,
}

impl DispatchActor {
    /// Creates the dispatcher and a client for it. Call `run` to start.
    pub fn new(restaurant: GeoPoint, config: &DispatchConfig) -> (Self, DispatchClient) {
        let (sender, receiver) = mpsc::channel(config.buffer);
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let actor = Self {
            receiver,
            restaurant,
            tanda_size: config.tanda_size,
            max_queue_wait: config.max_queue_wait,
            sweep_every: config.sweep_every,
            queues: Default::default(),
            pending: VecDeque::new(),
            active: HashMap::new(),
            couriers: BTreeMap::new(),
            next_courier_id: 1,
            next_tanda_id: 1,
            live_codes: HashSet::new(),
            rng,
        };
        (actor, DispatchClient::new(sender))
    }

    /// Processes requests until every client is dropped, sweeping aged
    /// queues on a timer in between.
    pub async fn run(mut self) {
        info!(tanda_size = self.tanda_size, "Dispatcher started");
        let mut sweep = tokio::time::interval(self.sweep_every);
        sweep.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                maybe = self.receiver.recv() => match maybe {
                    Some(request) => self.handle(request),
                    None => break,
                },
                _ = sweep.tick() => self.sweep_aged(),
            }
        }

        info!(
            couriers = self.couriers.len(),
            pending = self.pending.len(),
            active = self.active.len(),
            "Dispatcher shutdown"
        );
    }

    fn handle(&mut self, request: DispatchRequest) {
        match request {
            DispatchRequest::PlaceOrder { draft, respond_to } => {
                debug!(customer = %draft.customer, lines = draft.lines.len(), "PlaceOrder");
                let _ = respond_to.send(self.place_order(draft));
            }
            DispatchRequest::RegisterCourier { name, respond_to } => {
                let _ = respond_to.send(Ok(self.register_courier(name)));
            }
            DispatchRequest::ConfirmStop {
                courier,
                code,
                respond_to,
            } => {
                debug!(%courier, code, "ConfirmStop");
                let _ = respond_to.send(self.confirm_stop(courier, &code));
            }
            DispatchRequest::ZoneReport { respond_to } => {
                let _ = respond_to.send(Ok(self.zone_report()));
            }
            DispatchRequest::Couriers { respond_to } => {
                let _ = respond_to.send(Ok(self.couriers.values().cloned().collect()));
            }
        }
    }

    fn place_order(&mut self, draft: OrderDraft) -> Result<OrderReceipt, DispatchError> {
        if draft.lines.is_empty() {
            warn!(customer = %draft.customer, "Rejected order with empty cart");
            return Err(DispatchError::EmptyCart);
        }

        let distance_km = geo::haversine_km(self.restaurant, draft.location);
        let eta_minutes = geo::estimate_minutes(distance_km);
        let zone = Zone::classify(self.restaurant, draft.location);
        let code = self.fresh_code();
        let total = geo::round2(draft.lines.iter().map(|l| l.subtotal).sum());

        let order = Order {
            code: code.clone(),
            customer: draft.customer,
            lines: draft.lines,
            total,
            location: draft.location,
            zone,
            distance_km,
            eta_minutes,
            placed_at: Utc::now(),
            queued_at: Instant::now(),
        };
        let receipt = OrderReceipt {
            code: code.clone(),
            zone,
            distance_km,
            eta_minutes,
        };

        self.live_codes.insert(code);
        let queue = &mut self.queues[zone.index()];
        queue.push_back(order);
        info!(%zone, queued = queue.len(), code = %receipt.code, distance_km, "Order queued");

        if self.queues[zone.index()].len() >= self.tanda_size {
            self.cut_tanda(zone, CutReason::Full);
        }

        Ok(receipt)
    }

    /// Codes must be unique among live orders; with 36^6 possibilities a
    /// collision is a re-roll, not a failure.
    fn fresh_code(&mut self) -> OrderCode {
        loop {
            let code = OrderCode::generate(&mut self.rng);
            if !self.live_codes.contains(&code) {
                return code;
            }
        }
    }

    /// Cuts up to `tanda_size` orders off one zone queue and hands the
    /// tanda out.
    fn cut_tanda(&mut self, zone: Zone, cut: CutReason) {
        let queue = &mut self.queues[zone.index()];
        let take = queue.len().min(self.tanda_size);
        if take == 0 {
            return;
        }
        let orders: Vec<Order> = queue.drain(..take).collect();

        let id = TandaId(self.next_tanda_id);
        self.next_tanda_id += 1;
        let tanda = Tanda::new(id, zone, cut, orders);
        info!(
            %id,
            %zone,
            orders = tanda.len(),
            route_depth = tanda.route.depth(),
            ?cut,
            "Tanda cut"
        );
        self.hand_out(tanda);
    }

    /// Gives the tanda to the first idle courier, or parks it.
    fn hand_out(&mut self, mut tanda: Tanda) {
        match self.couriers.values_mut().find(|c| c.is_idle()) {
            Some(courier) => {
                courier.assignment = Some(tanda.id);
                tanda.courier = Some(courier.id);
                info!(tanda = %tanda.id, courier = %courier.id, name = %courier.name, "Tanda assigned");
                self.active.insert(tanda.id, tanda);
            }
            None => {
                info!(tanda = %tanda.id, parked = self.pending.len() + 1, "No idle courier, tanda parked");
                self.pending.push_back(tanda);
            }
        }
    }

    /// Cuts any zone whose oldest order has waited past the limit, full
    /// tanda or not.
    fn sweep_aged(&mut self) {
        for zone in Zone::ALL {
            let front_age = self.queues[zone.index()]
                .front()
                .map(|order| order.queued_at.elapsed());
            if let Some(age) = front_age {
                if age >= self.max_queue_wait {
                    debug!(%zone, waited_secs = age.as_secs(), "Queue aged past limit");
                    self.cut_tanda(zone, CutReason::Aged);
                }
            }
        }
    }

    fn register_courier(&mut self, name: String) -> CourierId {
        let id = CourierId(self.next_courier_id);
        self.next_courier_id += 1;
        info!(%id, %name, "Courier registered");
        self.couriers.insert(id, Courier::new(id, name));
        self.assign_pending();
        id
    }

    /// Drains parked tandas onto whatever couriers are now idle.
    fn assign_pending(&mut self) {
        while !self.pending.is_empty() {
            if !self.couriers.values().any(|c| c.is_idle()) {
                break;
            }
            if let Some(tanda) = self.pending.pop_front() {
                self.hand_out(tanda);
            }
        }
    }

    fn confirm_stop(
        &mut self,
        courier_id: CourierId,
        code: &str,
    ) -> Result<StopOutcome, DispatchError> {
        let courier = self
            .couriers
            .get(&courier_id)
            .ok_or(DispatchError::UnknownCourier(courier_id))?;
        let tanda_id = courier
            .assignment
            .ok_or(DispatchError::NothingToDeliver(courier_id))?;
        let tanda = self
            .active
            .get_mut(&tanda_id)
            .ok_or(DispatchError::NothingToDeliver(courier_id))?;

        let delivered = match tanda.current_stop() {
            Some(stop) if stop.code.as_str() == code => stop.code.clone(),
            Some(stop) => {
                warn!(
                    courier = %courier_id,
                    got = code,
                    expected = %stop.code,
                    "Verification code mismatch"
                );
                return Err(DispatchError::CodeMismatch {
                    got: code.to_string(),
                });
            }
            None => return Err(DispatchError::NothingToDeliver(courier_id)),
        };

        tanda.advance();
        let remaining = tanda.remaining();
        let completed = tanda.is_complete();

        self.live_codes.remove(&delivered);
        info!(courier = %courier_id, tanda = %tanda_id, code = %delivered, remaining, "Stop delivered");

        if completed {
            if let Some(done) = self.active.remove(&tanda_id) {
                self.settle_tanda(courier_id, &done);
            }
            self.assign_pending();
        }

        Ok(StopOutcome {
            code: delivered,
            remaining,
            completed,
        })
    }

    /// Credits a finished tanda to its courier: orders delivered, kilometers
    /// actually ridden (restaurant to first stop, then stop to stop), fuel
    /// at `KM_PER_LITRE`.
    fn settle_tanda(&mut self, courier_id: CourierId, tanda: &Tanda) {
        let mut route_km = 0.0;
        let mut from = self.restaurant;
        for stop in tanda.stops() {
            route_km += geo::haversine_km(from, stop.location);
            from = stop.location;
        }
        let route_km = geo::round2(route_km);

        if let Some(courier) = self.couriers.get_mut(&courier_id) {
            courier.assignment = None;
            courier.stats.orders_delivered += tanda.len() as u32;
            courier.stats.distance_km = geo::round2(courier.stats.distance_km + route_km);
            courier.stats.fuel_litres =
                geo::round2(courier.stats.fuel_litres + route_km / KM_PER_LITRE);
            info!(
                courier = %courier_id,
                tanda = %tanda.id,
                route_km,
                delivered_total = courier.stats.orders_delivered,
                "Tanda completed"
            );
        }
    }

    fn zone_report(&self) -> Vec<ZoneStatus> {
        Zone::ALL
            .iter()
            .map(|&zone| ZoneStatus {
                zone,
                queued: self.queues[zone.index()].len(),
                pending_tandas: self.pending.iter().filter(|t| t.zone == zone).count(),
                active_tandas: self.active.values().filter(|t| t.zone == zone).count(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::model::Cart;

    const RESTAURANT: GeoPoint = GeoPoint {
        lat: -34.9011,
        lon: -56.1645,
    };

    fn test_actor(config: &DispatchConfig) -> DispatchActor {
        let (actor, _client) = DispatchActor::new(RESTAURANT, config);
        actor
    }

    /// One-line cart at the given point, northeast of the restaurant when
    /// both offsets are positive.
    fn draft(customer: &str, lat: f64, lon: f64) -> OrderDraft {
        let catalog = Catalog::house_menu();
        let mut cart = Cart::default();
        let product = catalog.get(1).unwrap();
        cart.add(product, 2, "");
        OrderDraft {
            customer: customer.to_string(),
            lines: cart.lines().to_vec(),
            location: GeoPoint::new(lat, lon),
        }
    }

    #[test]
    fn empty_cart_is_rejected() {
        let mut actor = test_actor(&DispatchConfig::default());
        let result = actor.place_order(OrderDraft {
            customer: "59899000001".to_string(),
            lines: Vec::new(),
            location: GeoPoint::new(-34.88, -56.15),
        });
        assert!(matches!(result, Err(DispatchError::EmptyCart)));
    }

    #[test]
    fn receipt_carries_zone_distance_and_eta() {
        let mut actor = test_actor(&DispatchConfig::default());
        let receipt = actor
            .place_order(draft("59899000001", -34.88, -56.15))
            .unwrap();

        assert_eq!(receipt.zone, Zone::NE);
        assert!((receipt.distance_km - 2.69).abs() < 0.05);
        assert_eq!(receipt.eta_minutes, geo::estimate_minutes(receipt.distance_km));
        assert_eq!(receipt.code.as_str().len(), 6);
    }

    #[test]
    fn seventh_order_cuts_a_full_tanda() {
        let mut actor = test_actor(&DispatchConfig::default());

        for i in 0..6 {
            let lon = -56.15 + 0.001 * i as f64;
            actor
                .place_order(draft(&format!("5989900000{i}"), -34.88, lon))
                .unwrap();
        }
        assert_eq!(actor.queues[Zone::NE.index()].len(), 6);
        assert!(actor.pending.is_empty());

        actor
            .place_order(draft("59899000007", -34.88, -56.14))
            .unwrap();

        assert_eq!(actor.queues[Zone::NE.index()].len(), 0);
        assert_eq!(actor.pending.len(), 1);
        let tanda = &actor.pending[0];
        assert_eq!(tanda.len(), 7);
        assert_eq!(tanda.cut, CutReason::Full);
        assert_eq!(tanda.zone, Zone::NE);
    }

    #[test]
    fn tanda_route_is_sorted_by_distance() {
        let mut actor = test_actor(&DispatchConfig::default());

        // Farther east means farther from the restaurant; feed them shuffled.
        for lon in [-56.10, -56.15, -56.12, -56.16, -56.11, -56.14, -56.13] {
            actor.place_order(draft("59899000001", -34.88, lon)).unwrap();
        }

        let tanda = &actor.pending[0];
        let distances: Vec<f64> = tanda.stops().iter().map(|s| s.distance_km).collect();
        let mut sorted = distances.clone();
        sorted.sort_by(|a, b| a.total_cmp(b));
        assert_eq!(distances, sorted);
    }

    #[test]
    fn zero_wait_sweep_cuts_a_partial_tanda() {
        let config = DispatchConfig {
            max_queue_wait: Duration::ZERO,
            ..DispatchConfig::default()
        };
        let mut actor = test_actor(&config);

        actor.place_order(draft("59899000001", -34.88, -56.15)).unwrap();
        actor.place_order(draft("59899000002", -34.88, -56.14)).unwrap();
        actor.sweep_aged();

        assert_eq!(actor.pending.len(), 1);
        assert_eq!(actor.pending[0].len(), 2);
        assert_eq!(actor.pending[0].cut, CutReason::Aged);
        assert_eq!(actor.queues[Zone::NE.index()].len(), 0);
    }

    #[test]
    fn sweep_leaves_fresh_queues_alone() {
        let mut actor = test_actor(&DispatchConfig::default());
        actor.place_order(draft("59899000001", -34.88, -56.15)).unwrap();
        actor.sweep_aged();

        assert!(actor.pending.is_empty());
        assert_eq!(actor.queues[Zone::NE.index()].len(), 1);
    }

    #[test]
    fn registering_a_courier_picks_up_a_parked_tanda() {
        let mut actor = test_actor(&DispatchConfig::default());
        for i in 0..7 {
            let lon = -56.15 + 0.001 * i as f64;
            actor.place_order(draft("59899000001", -34.88, lon)).unwrap();
        }
        assert_eq!(actor.pending.len(), 1);

        let id = actor.register_courier("Carlos".to_string());

        assert_eq!(id, CourierId(1));
        assert!(actor.pending.is_empty());
        assert_eq!(actor.active.len(), 1);
        let courier = &actor.couriers[&id];
        assert!(!courier.is_idle());
    }

    #[test]
    fn idle_courier_gets_the_tanda_at_cut_time() {
        let mut actor = test_actor(&DispatchConfig::default());
        let carlos = actor.register_courier("Carlos".to_string());
        let ana = actor.register_courier("Ana".to_string());

        for i in 0..7 {
            let lon = -56.15 + 0.001 * i as f64;
            actor.place_order(draft("59899000001", -34.88, lon)).unwrap();
        }

        // Lowest id first.
        assert!(!actor.couriers[&carlos].is_idle());
        assert!(actor.couriers[&ana].is_idle());
    }

    #[test]
    fn stops_confirm_in_route_order_only() {
        let config = DispatchConfig {
            rng_seed: Some(7),
            ..DispatchConfig::default()
        };
        let mut actor = test_actor(&config);
        let courier = actor.register_courier("Pedro".to_string());

        for i in 0..7 {
            let lon = -56.15 + 0.001 * i as f64;
            actor.place_order(draft("59899000001", -34.88, lon)).unwrap();
        }

        let stops: Vec<OrderCode> = actor
            .active
            .values()
            .next()
            .unwrap()
            .stops()
            .iter()
            .map(|s| s.code.clone())
            .collect();

        // The last stop's code is valid for the tanda but not current.
        let err = actor.confirm_stop(courier, stops[6].as_str());
        assert!(matches!(err, Err(DispatchError::CodeMismatch { .. })));

        for (i, code) in stops.iter().enumerate() {
            let outcome = actor.confirm_stop(courier, code.as_str()).unwrap();
            assert_eq!(outcome.remaining, 6 - i);
            assert_eq!(outcome.completed, i == 6);
        }

        let courier = &actor.couriers[&courier];
        assert!(courier.is_idle());
        assert_eq!(courier.stats.orders_delivered, 7);
        assert!(courier.stats.distance_km > 0.0);
        let expected_fuel = geo::round2(courier.stats.distance_km / 10.0);
        assert!((courier.stats.fuel_litres - expected_fuel).abs() < 0.011);
    }

    #[test]
    fn confirm_for_unknown_or_idle_courier_fails() {
        let mut actor = test_actor(&DispatchConfig::default());
        let idle = actor.register_courier("Maria".to_string());

        let unknown = actor.confirm_stop(CourierId(99), "ABC123");
        assert!(matches!(unknown, Err(DispatchError::UnknownCourier(CourierId(99)))));

        let nothing = actor.confirm_stop(idle, "ABC123");
        assert!(matches!(nothing, Err(DispatchError::NothingToDeliver(_))));
    }

    #[test]
    fn delivered_codes_are_retired_and_can_recur() {
        let config = DispatchConfig {
            rng_seed: Some(3),
            ..DispatchConfig::default()
        };
        let mut actor = test_actor(&config);
        let courier = actor.register_courier("Ana".to_string());

        for i in 0..7 {
            let lon = -56.15 + 0.001 * i as f64;
            actor.place_order(draft("59899000001", -34.88, lon)).unwrap();
        }
        assert_eq!(actor.live_codes.len(), 7);

        let stops: Vec<OrderCode> = actor
            .active
            .values()
            .next()
            .unwrap()
            .stops()
            .iter()
            .map(|s| s.code.clone())
            .collect();
        for code in &stops {
            actor.confirm_stop(courier, code.as_str()).unwrap();
        }

        assert!(actor.live_codes.is_empty());
    }

    #[test]
    fn zone_report_counts_queues_pending_and_active() {
        let mut actor = test_actor(&DispatchConfig::default());
        actor.register_courier("Carlos".to_string());

        // Seven NE orders become an active tanda, one SO order stays queued.
        for i in 0..7 {
            let lon = -56.15 + 0.001 * i as f64;
            actor.place_order(draft("59899000001", -34.88, lon)).unwrap();
        }
        actor.place_order(draft("59899000002", -34.91, -56.17)).unwrap();

        let report = actor.zone_report();
        let ne = report.iter().find(|s| s.zone == Zone::NE).unwrap();
        let so = report.iter().find(|s| s.zone == Zone::SO).unwrap();

        assert_eq!(ne.queued, 0);
        assert_eq!(ne.active_tandas, 1);
        assert_eq!(ne.pending_tandas, 0);
        assert_eq!(so.queued, 1);
        assert_eq!(so.active_tandas, 0);
    }
}
