use hermes_core::{Instrument, InstrumentId};
use std::collections::{BTreeMap, HashMap};

/// Port for resolving the instrument an order or point refers to
///
/// Orders and points hold an `InstrumentId`; whoever owns the instruments
/// (usually the connector) provides this lookup.
pub trait InstrumentLookup {
    fn instrument(&self, id: &InstrumentId) -> Option<&Instrument>;
}

impl InstrumentLookup for HashMap<InstrumentId, Instrument> {
    fn instrument(&self, id: &InstrumentId) -> Option<&Instrument> {
        self.get(id)
    }
}

impl InstrumentLookup for BTreeMap<InstrumentId, Instrument> {
    fn instrument(&self, id: &InstrumentId) -> Option<&Instrument> {
        self.get(id)
    }
}

impl InstrumentLookup for [Instrument] {
    fn instrument(&self, id: &InstrumentId) -> Option<&Instrument> {
        self.iter().find(|i| &i.id == id)
    }
}

impl InstrumentLookup for Vec<Instrument> {
    fn instrument(&self, id: &InstrumentId) -> Option<&Instrument> {
        self.as_slice().instrument(id)
    }
}

impl<L: InstrumentLookup + ?Sized> InstrumentLookup for &L {
    fn instrument(&self, id: &InstrumentId) -> Option<&Instrument> {
        (**self).instrument(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_id() {
        let instruments = vec![Instrument::new("EURUSD"), Instrument::new("GBPUSD")];

        let found = instruments.instrument(&InstrumentId::new("GBPUSD"));
        assert_eq!(found.map(|i| i.name()), Some("GBPUSD"));
        assert!(instruments.instrument(&InstrumentId::new("USDJPY")).is_none());
    }

    #[test]
    fn test_map_lookup() {
        let map: HashMap<_, _> = [Instrument::new("EURUSD")]
            .into_iter()
            .map(|i| (i.id.clone(), i))
            .collect();

        assert!(map.instrument(&InstrumentId::new("EURUSD")).is_some());
    }
}
