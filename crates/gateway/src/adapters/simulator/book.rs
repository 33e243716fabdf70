use hermes_core::{Instrument, InstrumentId};
use hermes_ports::InstrumentLookup;
use std::collections::HashMap;

/// Instruments known to the simulator, keyed by id
#[derive(Debug, Default)]
pub struct InstrumentBook {
    instruments: HashMap<InstrumentId, Instrument>,
}

impl InstrumentBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an instrument, returning the one it replaced
    pub fn insert(&mut self, instrument: Instrument) -> Option<Instrument> {
        self.instruments.insert(instrument.id.clone(), instrument)
    }

    pub fn get(&self, id: &InstrumentId) -> Option<&Instrument> {
        self.instruments.get(id)
    }

    pub fn get_mut(&mut self, id: &InstrumentId) -> Option<&mut Instrument> {
        self.instruments.get_mut(id)
    }

    pub fn contains(&self, id: &InstrumentId) -> bool {
        self.instruments.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.instruments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instruments.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Instrument> {
        self.instruments.values()
    }
}

impl InstrumentLookup for InstrumentBook {
    fn instrument(&self, id: &InstrumentId) -> Option<&Instrument> {
        self.get(id)
    }
}

impl FromIterator<Instrument> for InstrumentBook {
    fn from_iter<I: IntoIterator<Item = Instrument>>(iter: I) -> Self {
        let mut book = Self::new();
        for instrument in iter {
            book.insert(instrument);
        }
        book
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_insert_replaces_by_id() {
        let mut book = InstrumentBook::new();
        assert!(book.insert(Instrument::new("SPY")).is_none());

        let replaced = book.insert(Instrument::new("SPY").with_commission(dec!(1)));
        assert_eq!(replaced.map(|i| i.commission), Some(Some(dec!(0))));
        assert_eq!(book.len(), 1);
    }

    #[test]
    fn test_lookup() {
        let book: InstrumentBook = [Instrument::new("SPY"), Instrument::new("QQQ")]
            .into_iter()
            .collect();

        let id = InstrumentId::new("QQQ");
        assert!(book.contains(&id));
        assert_eq!(book.instrument(&id).map(|i| i.name()), Some("QQQ"));
        assert!(book.instrument(&InstrumentId::new("IWM")).is_none());
    }
}
