//! Gateway session: the state every connector shares

use hermes_core::{
    Account, Action, Instrument, Mode, Order, OrderMessage, Point, PointMessage,
    TransactionMessage,
};
use hermes_ports::{InstrumentLookup, RuleSet, ValidationFailure};
use hermes_rules::{InstrumentCollectionsValidation, OrderPriceValidation, Rules};
use log::info;
use parking_lot::RwLock;

use crate::pipeline;
use crate::transport::Subject;

/// Per-session gateway state
///
/// Created once per connector. The data and order-sender streams live as
/// long as the session; the account is set once the connector has logged in.
pub struct GatewaySession {
    name: String,
    mode: Mode,
    account: RwLock<Option<Account>>,
    data_stream: Subject<PointMessage>,
    order_sender_stream: Subject<OrderMessage>,
    order_rules: Box<dyn RuleSet<Order>>,
    instrument_rules: Box<dyn RuleSet<Instrument>>,
}

impl GatewaySession {
    pub fn new(name: impl Into<String>, mode: Mode) -> Self {
        Self {
            name: name.into(),
            mode,
            account: RwLock::new(None),
            data_stream: Subject::new(),
            order_sender_stream: Subject::new(),
            order_rules: Box::new(OrderPriceValidation::new()),
            instrument_rules: Box::new(InstrumentCollectionsValidation::new()),
        }
    }

    /// Replace the default order price/size rules with broker-specific ones
    pub fn with_order_rules(mut self, rules: impl RuleSet<Order> + 'static) -> Self {
        self.order_rules = Box::new(rules);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn account(&self) -> Option<Account> {
        self.account.read().clone()
    }

    pub fn set_account(&self, account: Account) {
        info!("Gateway {} running under account {}", self.name, account.id);
        *self.account.write() = Some(account);
    }

    /// Tick and bar updates
    pub fn data_stream(&self) -> &Subject<PointMessage> {
        &self.data_stream
    }

    /// Orders about to be transmitted
    pub fn order_sender_stream(&self) -> &Subject<OrderMessage> {
        &self.order_sender_stream
    }

    pub fn validate(&self) -> Vec<ValidationFailure> {
        GatewayValidation::new().validate(self)
    }

    /// Stamp and record a tick without publishing it
    ///
    /// Connectors that guard their instruments with a lock call this under
    /// the lock and [`publish_point`](Self::publish_point) after releasing it.
    pub fn append_point(&self, instrument: &mut Instrument, point: Point) -> (Point, PointMessage) {
        let account = self.account();
        pipeline::append_point(account.as_ref(), instrument, point)
    }

    pub fn publish_point(&self, message: &PointMessage) -> usize {
        pipeline::publish_point(&self.data_stream, message)
    }

    /// Run the ingestion pipeline for a tick of `instrument`
    pub fn update_point_props(&self, instrument: &mut Instrument, point: Point) -> Point {
        // Lock must not be held while publishing: handlers may call set_account
        let account = self.account();
        pipeline::update_point_props(account.as_ref(), instrument, point, &self.data_stream)
    }

    /// Gate orders before transmission; logs and returns every failure
    pub fn gate_orders<L: InstrumentLookup + ?Sized>(
        &self,
        instruments: &L,
        orders: &[Order],
    ) -> Vec<ValidationFailure> {
        pipeline::gate_orders(
            self.order_rules.as_ref(),
            self.instrument_rules.as_ref(),
            instruments,
            orders,
        )
    }

    /// Gate orders before transmission; logs every failure
    pub fn ensure_order_props<L: InstrumentLookup + ?Sized>(
        &self,
        instruments: &L,
        orders: &[Order],
    ) -> bool {
        pipeline::ensure_order_props(
            self.order_rules.as_ref(),
            self.instrument_rules.as_ref(),
            instruments,
            orders,
        )
    }

    /// The failures the gate would log, without logging them
    pub fn collect_order_failures<L: InstrumentLookup + ?Sized>(
        &self,
        instruments: &L,
        orders: &[Order],
    ) -> Vec<ValidationFailure> {
        pipeline::collect_order_failures(
            self.order_rules.as_ref(),
            self.instrument_rules.as_ref(),
            instruments,
            orders,
        )
    }

    /// Announce one message per order on the order-sender stream
    pub fn publish_orders(&self, action: Action, orders: &[Order]) {
        for order in orders {
            self.order_sender_stream
                .publish(&TransactionMessage::new(action, Some(order.clone())));
        }
    }

    /// Announce prepared order messages, such as updates carrying the
    /// previous state
    pub fn publish_order_messages(&self, messages: &[OrderMessage]) {
        for message in messages {
            self.order_sender_stream.publish(message);
        }
    }
}

impl std::fmt::Debug for GatewaySession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewaySession")
            .field("name", &self.name)
            .field("mode", &self.mode)
            .field("account", &*self.account.read())
            .field("data_stream", &self.data_stream)
            .field("order_sender_stream", &self.order_sender_stream)
            .finish()
    }
}

/// Rules a gateway session must satisfy
pub struct GatewayValidation {
    rules: Rules<GatewaySession>,
}

impl GatewayValidation {
    pub fn new() -> Self {
        let rules = Rules::new().rule("name", "No name", |g: &GatewaySession| {
            !g.name().trim().is_empty()
        });

        Self { rules }
    }
}

impl Default for GatewayValidation {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleSet<GatewaySession> for GatewayValidation {
    fn validate(&self, entity: &GatewaySession) -> Vec<ValidationFailure> {
        self.rules.validate(entity)
    }
}
