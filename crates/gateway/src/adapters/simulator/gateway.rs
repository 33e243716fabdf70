//! In-memory connector
//!
//! Keeps instruments, orders, positions and option chains in process and
//! answers the gateway contract from them. Order commands go through the
//! same gate and order-sender stream a broker connector would use.

use async_trait::async_trait;
use hermes_core::{
    Account, Action, BarSeries, Instrument, InstrumentId, Mode, OptionInstrument, Order,
    OrderMessage, OrderStatus, Point, Position, Price, TimeSeries, Timestamp, TransactionMessage,
};
use hermes_ports::RuleSet;
use hermes_rules::OptionValidation;
use log::{debug, info, warn};
use parking_lot::Mutex;
use std::collections::HashSet;

use super::book::InstrumentBook;
use crate::config::GatewayConfig;
use crate::contract::Gateway;
use crate::error::{GatewayError, GatewayResult};
use crate::query::{OptionQuery, OrderQuery, PointQuery, PositionQuery};
use crate::session::GatewaySession;

#[derive(Debug, Default)]
struct SimulatorState {
    book: InstrumentBook,
    orders: Vec<Order>,
    positions: Vec<Position>,
    options: Vec<OptionInstrument>,
}

impl SimulatorState {
    fn order_index(&self, order: &Order) -> GatewayResult<usize> {
        self.orders
            .iter()
            .position(|stored| stored.id == order.id)
            .ok_or_else(|| GatewayError::NotFound(format!("order {}", order.id)))
    }

    /// Reject ids already stored or repeated within the batch
    fn ensure_new(&self, orders: &[Order]) -> GatewayResult<()> {
        let mut seen = HashSet::with_capacity(orders.len());
        for order in orders {
            if !seen.insert(order.id) || self.orders.iter().any(|stored| stored.id == order.id) {
                return Err(GatewayError::Exchange(format!("order {} already exists", order.id)));
            }
        }
        Ok(())
    }
}

fn set_status(order: &mut Order, status: OrderStatus) {
    order.status = status;
    for child in &mut order.orders {
        set_status(child, status);
    }
}

/// Simulated broker connector
///
/// Only runs in [`Mode::Sandbox`]. State sits behind one mutex that is
/// released before anything is published, so stream handlers may read back
/// from the simulator.
pub struct SimulatorGateway {
    session: GatewaySession,
    state: Mutex<SimulatorState>,
}

impl SimulatorGateway {
    pub fn new(session: GatewaySession) -> GatewayResult<Self> {
        if session.mode() == Mode::Production {
            return Err(GatewayError::InvalidMode(format!(
                "simulator {} cannot run in {} mode",
                session.name(),
                session.mode()
            )));
        }
        for failure in session.validate() {
            warn!("Simulator session failed validation: {}", failure);
        }

        Ok(Self {
            session,
            state: Mutex::new(SimulatorState::default()),
        })
    }

    /// Build a simulator with the configured account and instruments
    pub fn from_config(config: &GatewayConfig) -> GatewayResult<Self> {
        config.validate()?;
        let gateway = Self::new(GatewaySession::new(config.name.as_str(), config.mode))?;

        if let Some(account) = &config.account {
            gateway.session.set_account(account.to_account());
        }
        for instrument in &config.instruments {
            gateway.add_instrument(instrument.to_instrument());
        }

        info!(
            "Simulator {} loaded with {} instrument(s)",
            config.name,
            config.instruments.len()
        );
        Ok(gateway)
    }

    pub fn add_instrument(&self, instrument: Instrument) {
        debug!("Simulator instrument added: {}", instrument.id);
        self.state.lock().book.insert(instrument);
    }

    pub fn add_position(&self, position: Position) {
        self.state.lock().positions.push(position);
    }

    /// Add an option contract; incomplete contracts are kept and logged
    pub fn add_option(&self, option: OptionInstrument) {
        for failure in OptionValidation::new().validate(&option) {
            warn!("Option {} is incomplete: {}", option.name(), failure);
        }
        self.state.lock().options.push(option);
    }

    /// Snapshot of an instrument with its history
    pub fn instrument(&self, id: &InstrumentId) -> Option<Instrument> {
        self.state.lock().book.get(id).cloned()
    }

    /// Feed a tick through the ingestion pipeline of its instrument
    pub fn ingest(&self, point: Point) -> GatewayResult<Point> {
        let (point, message) = {
            let mut state = self.state.lock();
            let instrument = state.book.get_mut(&point.instrument_id).ok_or_else(|| {
                GatewayError::NotFound(format!("instrument {}", point.instrument_id))
            })?;
            self.session.append_point(instrument, point)
        };

        self.session.publish_point(&message);
        Ok(point)
    }

    fn gate(&self, state: &SimulatorState, orders: &[Order]) -> GatewayResult<()> {
        let failures = self.session.gate_orders(&state.book, orders);
        if failures.is_empty() {
            Ok(())
        } else {
            Err(GatewayError::ValidationRejected(failures))
        }
    }
}

fn history(instrument: &Instrument, query: &PointQuery) -> Vec<Point> {
    let series: Vec<Point> = match query.time_frame {
        None => instrument.points.as_slice().to_vec(),
        Some(time_frame) if instrument.time_frame == Some(time_frame) => {
            instrument.point_groups.as_slice().to_vec()
        }
        Some(time_frame) => {
            let mut bars = BarSeries::new(Some(time_frame));
            for point in instrument.points.iter() {
                bars.append(point.clone());
            }
            bars.as_slice().to_vec()
        }
    };

    series.into_iter().filter(|p| query.matches(p)).collect()
}

#[async_trait]
impl Gateway for SimulatorGateway {
    fn session(&self) -> &GatewaySession {
        &self.session
    }

    async fn get_account(&self, account: Account) -> GatewayResult<Account> {
        if let Some(current) = self.session.account().filter(|a| a.id == account.id) {
            return Ok(current);
        }
        self.session.set_account(account.clone());
        Ok(account)
    }

    async fn get_instrument(&self, instrument: Instrument) -> GatewayResult<Instrument> {
        self.instrument(&instrument.id)
            .ok_or_else(|| GatewayError::NotFound(format!("instrument {}", instrument.id)))
    }

    async fn get_points(&self, query: PointQuery) -> GatewayResult<Vec<Point>> {
        let state = self.state.lock();
        let mut points = match &query.instrument_id {
            Some(id) => {
                let instrument = state
                    .book
                    .get(id)
                    .ok_or_else(|| GatewayError::NotFound(format!("instrument {}", id)))?;
                history(instrument, &query)
            }
            None => {
                let mut points: Vec<Point> = state
                    .book
                    .iter()
                    .flat_map(|instrument| history(instrument, &query))
                    .collect();
                points.sort_by_key(|p| p.time);
                points
            }
        };

        if let Some(limit) = query.limit {
            let skip = points.len().saturating_sub(limit);
            points.drain(..skip);
        }
        Ok(points)
    }

    async fn get_orders(&self, query: OrderQuery) -> GatewayResult<Vec<Order>> {
        let state = self.state.lock();
        Ok(state
            .orders
            .iter()
            .filter(|o| query.matches(o))
            .cloned()
            .collect())
    }

    async fn get_positions(&self, query: PositionQuery) -> GatewayResult<Vec<Position>> {
        let state = self.state.lock();
        Ok(state
            .positions
            .iter()
            .filter(|p| query.matches(p))
            .cloned()
            .collect())
    }

    async fn get_option_strikes(&self, query: OptionQuery) -> GatewayResult<Vec<Price>> {
        let state = self.state.lock();
        let mut strikes: Vec<Price> = state
            .options
            .iter()
            .filter(|o| query.matches(o))
            .filter_map(|o| o.strike)
            .collect();
        strikes.sort();
        strikes.dedup();
        Ok(strikes)
    }

    async fn get_option_expirations(&self, query: OptionQuery) -> GatewayResult<Vec<Timestamp>> {
        let state = self.state.lock();
        let mut expirations: Vec<Timestamp> = state
            .options
            .iter()
            .filter(|o| query.matches(o))
            .filter_map(|o| o.expiration_date)
            .collect();
        expirations.sort();
        expirations.dedup();
        Ok(expirations)
    }

    async fn get_option_chains(&self, query: OptionQuery) -> GatewayResult<Vec<OptionInstrument>> {
        let state = self.state.lock();
        Ok(state
            .options
            .iter()
            .filter(|o| query.matches(o))
            .cloned()
            .collect())
    }

    async fn create_orders(&self, mut orders: Vec<Order>) -> GatewayResult<Vec<Order>> {
        {
            let mut state = self.state.lock();
            state.ensure_new(&orders)?;
            self.gate(&state, &orders)?;

            for order in &mut orders {
                set_status(order, OrderStatus::Placed);
            }
            state.orders.extend(orders.iter().cloned());
        }
        self.session.publish_orders(Action::Create, &orders);

        info!("Simulator placed {} order(s)", orders.len());
        Ok(orders)
    }

    async fn update_orders(&self, orders: Vec<Order>) -> GatewayResult<Vec<Order>> {
        let messages: Vec<OrderMessage> = {
            let mut state = self.state.lock();
            let indices = orders
                .iter()
                .map(|order| state.order_index(order))
                .collect::<GatewayResult<Vec<_>>>()?;
            self.gate(&state, &orders)?;

            indices
                .into_iter()
                .zip(&orders)
                .map(|(index, order)| {
                    let previous = std::mem::replace(&mut state.orders[index], order.clone());
                    TransactionMessage::update(Some(previous), order.clone())
                })
                .collect()
        };
        self.session.publish_order_messages(&messages);

        info!("Simulator updated {} order(s)", orders.len());
        Ok(orders)
    }

    async fn delete_orders(&self, orders: Vec<Order>) -> GatewayResult<Vec<Order>> {
        let canceled = {
            let mut state = self.state.lock();
            let indices = orders
                .iter()
                .map(|order| state.order_index(order))
                .collect::<GatewayResult<Vec<_>>>()?;

            let mut canceled = Vec::with_capacity(indices.len());
            for index in indices {
                let order = &mut state.orders[index];
                set_status(order, OrderStatus::Canceled);
                canceled.push(order.clone());
            }
            canceled
        };
        self.session.publish_orders(Action::Delete, &canceled);

        info!("Simulator canceled {} order(s)", canceled.len());
        Ok(canceled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use hermes_core::{OptionSide, PositionSide, Side};
    use rust_decimal_macros::dec;
    use std::sync::{Arc, mpsc};
    use std::thread;
    use std::time::Duration;

    fn at(minute: u32, second: u32) -> Timestamp {
        Utc.with_ymd_and_hms(2024, 1, 2, 10, minute, second).unwrap()
    }

    fn make_simulator() -> SimulatorGateway {
        let simulator = SimulatorGateway::new(GatewaySession::new("sim", Mode::Sandbox)).unwrap();
        simulator.add_instrument(Instrument::new("SPY").with_time_frame(Duration::from_secs(60)));
        simulator
    }

    #[test]
    fn test_production_refused() {
        let result = SimulatorGateway::new(GatewaySession::new("sim", Mode::Production));
        assert!(matches!(result, Err(GatewayError::InvalidMode(_))));
    }

    #[test]
    fn test_ingest_unknown_instrument() {
        let simulator = make_simulator();
        let result = simulator.ingest(Point::new("QQQ", at(0, 0)).with_last(dec!(400)));
        assert!(matches!(result, Err(GatewayError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_points_limit_and_reaggregation() {
        let simulator = make_simulator();
        for (minute, second, price) in [(0, 0, dec!(500)), (0, 30, dec!(501)), (1, 0, dec!(502)), (2, 10, dec!(503))] {
            simulator
                .ingest(Point::new("SPY", at(minute, second)).with_last(price))
                .unwrap();
        }

        let ticks = simulator.get_points(PointQuery::for_instrument("SPY")).await.unwrap();
        assert_eq!(ticks.len(), 4);

        let last_two = simulator
            .get_points(PointQuery::for_instrument("SPY").with_limit(2))
            .await
            .unwrap();
        assert_eq!(last_two.iter().map(|p| p.time).collect::<Vec<_>>(), vec![at(1, 0), at(2, 10)]);

        let minute_bars = simulator
            .get_points(PointQuery::for_instrument("SPY").with_time_frame(Duration::from_secs(60)))
            .await
            .unwrap();
        assert_eq!(minute_bars.len(), 3);

        let five_minute_bars = simulator
            .get_points(PointQuery::for_instrument("SPY").with_time_frame(Duration::from_secs(300)))
            .await
            .unwrap();
        assert_eq!(five_minute_bars.len(), 1);
    }

    #[tokio::test]
    async fn test_account_echo() {
        let simulator = make_simulator();
        let stored = simulator
            .get_account(Account::new("acc").with_balance(dec!(100)))
            .await
            .unwrap();
        assert_eq!(stored.balance, Some(dec!(100)));

        // Same id answers with the session account
        let again = simulator.get_account(Account::new("acc")).await.unwrap();
        assert_eq!(again.balance, Some(dec!(100)));
    }

    #[tokio::test]
    async fn test_option_lookups_dedup_and_sort() {
        let simulator = make_simulator();
        let expiry = Utc.with_ymd_and_hms(2024, 3, 15, 20, 0, 0).unwrap();
        let later = Utc.with_ymd_and_hms(2024, 4, 19, 20, 0, 0).unwrap();
        for (side, strike, date) in [
            (OptionSide::Call, dec!(510), expiry),
            (OptionSide::Put, dec!(500), expiry),
            (OptionSide::Call, dec!(500), later),
        ] {
            simulator.add_option(OptionInstrument::contract(
                Instrument::new(format!("SPY{}{}{}", date.format("%y%m%d"), side, strike)),
                "SPY",
                side,
                strike,
                date,
            ));
        }

        let query = OptionQuery::for_symbol("SPY");
        assert_eq!(
            simulator.get_option_strikes(query.clone()).await.unwrap(),
            vec![dec!(500), dec!(510)]
        );
        assert_eq!(
            simulator.get_option_expirations(query.clone()).await.unwrap(),
            vec![expiry, later]
        );
        let calls = simulator
            .get_option_chains(query.with_side(OptionSide::Call))
            .await
            .unwrap();
        assert_eq!(calls.len(), 2);
    }

    #[tokio::test]
    async fn test_positions_filtered() {
        let simulator = make_simulator();
        simulator.add_position(Position::new("SPY", PositionSide::Long, dec!(1), dec!(500)));
        simulator.add_position(Position::new("QQQ", PositionSide::Short, dec!(2), dec!(400)));

        let spy = simulator.get_positions(PositionQuery::for_instrument("SPY")).await.unwrap();
        assert_eq!(spy.len(), 1);
        assert_eq!(simulator.get_positions(PositionQuery::default()).await.unwrap().len(), 2);
    }

    #[test]
    fn test_data_stream_handler_reads_back_from_simulator() {
        let simulator = Arc::new(make_simulator());
        let reader = Arc::downgrade(&simulator);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let _sub = simulator.session().data_stream().subscribe(move |_: &hermes_core::PointMessage| {
            let ticks = reader
                .upgrade()
                .and_then(|simulator| simulator.instrument(&InstrumentId::new("SPY")))
                .map(|spy| spy.points.len());
            sink.lock().push(ticks);
        });

        let (done_tx, done_rx) = mpsc::channel();
        let feeder = Arc::clone(&simulator);
        thread::spawn(move || {
            let result = feeder.ingest(Point::new("SPY", at(0, 0)).with_last(dec!(500)));
            let _ = done_tx.send(result.is_ok());
        });

        assert_eq!(done_rx.recv_timeout(Duration::from_secs(3)), Ok(true));
        assert_eq!(*seen.lock(), vec![Some(1)]);
    }

    #[tokio::test]
    async fn test_order_stream_handler_reads_back_from_simulator() {
        let simulator = Arc::new(make_simulator());
        simulator.ingest(Point::new("SPY", at(0, 0)).with_last(dec!(500))).unwrap();

        let reader = Arc::downgrade(&simulator);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let _sub = simulator.session().order_sender_stream().subscribe(move |msg: &OrderMessage| {
            let readable = reader
                .upgrade()
                .and_then(|simulator| simulator.instrument(&InstrumentId::new("SPY")))
                .is_some();
            sink.lock().push((msg.action, readable));
        });

        let order = Order::limit("SPY", Side::Buy, dec!(1), dec!(499));
        let placed = simulator.create_orders(vec![order]).await.unwrap();
        simulator.update_orders(placed.clone()).await.unwrap();
        simulator.delete_orders(placed).await.unwrap();

        assert_eq!(
            *seen.lock(),
            vec![(Action::Create, true), (Action::Update, true), (Action::Delete, true)]
        );
    }

    #[tokio::test]
    async fn test_create_rejects_existing_order_ids() {
        let simulator = make_simulator();
        simulator.ingest(Point::new("SPY", at(0, 0)).with_last(dec!(500))).unwrap();

        let order = Order::limit("SPY", Side::Buy, dec!(1), dec!(499));
        simulator.create_orders(vec![order.clone()]).await.unwrap();

        assert!(matches!(
            simulator.create_orders(vec![order.clone()]).await,
            Err(GatewayError::Exchange(_))
        ));
        let fresh = Order::limit("SPY", Side::Buy, dec!(2), dec!(498));
        assert!(matches!(
            simulator.create_orders(vec![fresh.clone(), fresh]).await,
            Err(GatewayError::Exchange(_))
        ));
        assert_eq!(simulator.get_orders(OrderQuery::default()).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_rejection_carries_gate_failures() {
        let simulator = make_simulator();
        let unpriced = Order::new("SPY", Side::Buy, hermes_core::OrderType::Limit, dec!(1));

        match simulator.create_orders(vec![unpriced]).await {
            Err(GatewayError::ValidationRejected(failures)) => assert_eq!(
                failures,
                vec![
                    hermes_ports::ValidationFailure::new("price", "No price"),
                    hermes_ports::ValidationFailure::new("points", "No points"),
                    hermes_ports::ValidationFailure::new("point_groups", "No point groups"),
                ]
            ),
            other => panic!("expected validation rejection, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_update_requires_known_order() {
        let simulator = make_simulator();
        simulator.ingest(Point::new("SPY", at(0, 0)).with_last(dec!(500))).unwrap();

        let unknown = Order::limit("SPY", Side::Buy, dec!(1), dec!(499));
        let result = simulator.update_orders(vec![unknown.clone()]).await;
        assert!(matches!(result, Err(GatewayError::NotFound(_))));
        assert!(matches!(
            simulator.delete_orders(vec![unknown]).await,
            Err(GatewayError::NotFound(_))
        ));
    }
}
