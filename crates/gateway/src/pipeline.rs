//! Point ingestion and the pre-transmission order gate
//!
//! Free functions so that any connector can run them against its own state;
//! [`GatewaySession`](crate::GatewaySession) wraps them with the session's
//! account, streams and rule sets.

use hermes_core::{
    Account, Action, Instrument, Order, OrderId, Point, PointMessage, TimeSeries,
    TransactionMessage,
};
use hermes_ports::{InstrumentLookup, RuleSet, ValidationFailure};
use log::{debug, error};

use crate::transport::Subject;

/// Stamp a tick and record it on its instrument
///
/// The point is stamped with the account, the instrument's name, chart style
/// and time frame and appended to both of the instrument's series. Returns
/// the stamped point and the `Create` message carrying the last aggregated
/// bar, for the caller to publish once it has released the instrument.
pub fn append_point(
    account: Option<&Account>,
    instrument: &mut Instrument,
    mut point: Point,
) -> (Point, PointMessage) {
    point.account = account.map(|a| a.id.clone());
    point.name = Some(instrument.id.clone());
    point.chart_data = Some(instrument.chart_data.clone());
    point.time_frame = instrument.time_frame;

    instrument.append(point.clone());
    debug!(
        "Point {} at {} ingested, {} bar(s)",
        instrument.id,
        point.time,
        instrument.point_groups.len()
    );

    let message = TransactionMessage::new(Action::Create, instrument.last_bar().cloned());
    (point, message)
}

/// Announce a bar update on `data_stream`; returns the number of handlers run
pub fn publish_point(data_stream: &Subject<PointMessage>, message: &PointMessage) -> usize {
    let delivered = data_stream.publish(message);
    debug!("Bar update delivered to {} subscriber(s)", delivered);
    delivered
}

/// Stamp a tick, record it on its instrument and announce the latest bar
pub fn update_point_props(
    account: Option<&Account>,
    instrument: &mut Instrument,
    point: Point,
    data_stream: &Subject<PointMessage>,
) -> Point {
    let (point, message) = append_point(account, instrument, point);
    publish_point(data_stream, &message);
    point
}

fn visit_order<L: InstrumentLookup + ?Sized>(
    order: &Order,
    order_rules: &dyn RuleSet<Order>,
    instrument_rules: &dyn RuleSet<Instrument>,
    lookup: &L,
    failures: &mut Vec<(OrderId, ValidationFailure)>,
) {
    failures.extend(
        order_rules
            .validate(order)
            .into_iter()
            .map(|failure| (order.id, failure)),
    );

    match lookup.instrument(&order.instrument_id) {
        Some(instrument) => failures.extend(
            instrument_rules
                .validate(instrument)
                .into_iter()
                .map(|failure| (order.id, failure)),
        ),
        None => failures.push((order.id, ValidationFailure::new("instrument", "No instrument"))),
    }

    for child in &order.orders {
        visit_order(child, order_rules, instrument_rules, lookup, failures);
    }
}

fn order_failures<L: InstrumentLookup + ?Sized>(
    order_rules: &dyn RuleSet<Order>,
    instrument_rules: &dyn RuleSet<Instrument>,
    lookup: &L,
    orders: &[Order],
) -> Vec<(OrderId, ValidationFailure)> {
    let mut failures = Vec::new();
    for order in orders {
        visit_order(order, order_rules, instrument_rules, lookup, &mut failures);
    }
    failures
}

/// Every failure of the batch: each order, its instrument, then its children
/// recursively
pub fn collect_order_failures<L: InstrumentLookup + ?Sized>(
    order_rules: &dyn RuleSet<Order>,
    instrument_rules: &dyn RuleSet<Instrument>,
    lookup: &L,
    orders: &[Order],
) -> Vec<ValidationFailure> {
    order_failures(order_rules, instrument_rules, lookup, orders)
        .into_iter()
        .map(|(_, failure)| failure)
        .collect()
}

/// Run the gate over a batch and log every failure
///
/// Returns the failures in visiting order; an empty result clears the batch
/// for transmission.
pub fn gate_orders<L: InstrumentLookup + ?Sized>(
    order_rules: &dyn RuleSet<Order>,
    instrument_rules: &dyn RuleSet<Instrument>,
    lookup: &L,
    orders: &[Order],
) -> Vec<ValidationFailure> {
    order_failures(order_rules, instrument_rules, lookup, orders)
        .into_iter()
        .map(|(order_id, failure)| {
            error!("Order {} failed validation: {}", order_id, failure);
            failure
        })
        .collect()
}

/// Gate run before transmitting orders
///
/// Logs every failure of the batch and returns `true` only if there are
/// none. Connectors must not transmit anything when it returns `false`.
pub fn ensure_order_props<L: InstrumentLookup + ?Sized>(
    order_rules: &dyn RuleSet<Order>,
    instrument_rules: &dyn RuleSet<Instrument>,
    lookup: &L,
    orders: &[Order],
) -> bool {
    gate_orders(order_rules, instrument_rules, lookup, orders).is_empty()
}
