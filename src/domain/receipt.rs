//! Transaction receipts as ordered sequences of decoded events.

use alloy_primitives::{Address, TxHash};

use super::abi::AbiValue;

/// A decoded log entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRecord {
    pub name: String,
    pub emitter: Address,
    pub fields: Vec<(String, AbiValue)>,
}

impl EventRecord {
    pub fn new(name: impl Into<String>, emitter: Address) -> Self {
        Self {
            name: name.into(),
            emitter,
            fields: Vec::new(),
        }
    }

    /// Append a named field.
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<AbiValue>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&AbiValue> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }
}

/// Confirmed record of a submitted transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub tx_hash: TxHash,
    /// False when the transaction was mined but reverted.
    pub success: bool,
    pub events: Vec<EventRecord>,
}

/// How many times an event name occurs in a receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventMatch<'a> {
    None,
    One(&'a EventRecord),
    Many(usize),
}

impl Receipt {
    /// Find the events named `name`, distinguishing zero, one and many.
    #[must_use]
    pub fn find_event(&self, name: &str) -> EventMatch<'_> {
        let mut matches = self.events.iter().filter(|e| e.name == name);
        match (matches.next(), matches.next()) {
            (None, _) => EventMatch::None,
            (Some(event), None) => EventMatch::One(event),
            (Some(_), Some(_)) => EventMatch::Many(2 + matches.count()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::U256;

    fn receipt(events: Vec<EventRecord>) -> Receipt {
        Receipt {
            tx_hash: TxHash::ZERO,
            success: true,
            events,
        }
    }

    #[test]
    fn find_event_ignores_unrelated_events() {
        let r = receipt(vec![
            EventRecord::new("Transfer", Address::ZERO).with_field("value", U256::from(1u64)),
            EventRecord::new("OutcomeTokenPurchase", Address::ZERO)
                .with_field("cost", U256::from(105u64)),
        ]);

        match r.find_event("OutcomeTokenPurchase") {
            EventMatch::One(event) => {
                assert_eq!(event.field("cost"), Some(&AbiValue::Uint(U256::from(105u64))));
            }
            other => panic!("expected one match, got {other:?}"),
        }
    }

    #[test]
    fn find_event_reports_absence() {
        let r = receipt(vec![EventRecord::new("Transfer", Address::ZERO)]);
        assert_eq!(r.find_event("Approval"), EventMatch::None);
    }

    #[test]
    fn find_event_counts_duplicates() {
        let r = receipt(vec![
            EventRecord::new("Approval", Address::ZERO),
            EventRecord::new("Approval", Address::ZERO),
            EventRecord::new("Approval", Address::ZERO),
        ]);
        assert_eq!(r.find_event("Approval"), EventMatch::Many(3));
    }
}
