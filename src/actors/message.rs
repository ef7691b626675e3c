use super::address::Address;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Bound satisfied by every message payload type.
///
/// Payloads are expected to be a closed enum owned by the embedder, so that an
/// actor dispatches with a `match` on the variant rather than by parsing text.
pub trait Payload: fmt::Debug + Send + 'static {}

impl<T> Payload for T where T: fmt::Debug + Send + 'static {}

/// Immutable addressed envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message<P> {
    source: Address,
    dest: Address,
    payload: P,
}

impl<P> Message<P> {
    pub fn new(source: impl Into<Address>, dest: impl Into<Address>, payload: P) -> Self {
        Self {
            source: source.into(),
            dest: dest.into(),
            payload,
        }
    }

    pub fn source(&self) -> &Address {
        &self.source
    }

    pub fn dest(&self) -> &Address {
        &self.dest
    }

    pub fn payload(&self) -> &P {
        &self.payload
    }

    /// Build a message travelling back to this message's source
    pub fn reply(&self, payload: P) -> Self {
        Self {
            source: self.dest.clone(),
            dest: self.source.clone(),
            payload,
        }
    }

    pub fn into_payload(self) -> P {
        self.payload
    }

    pub fn into_parts(self) -> (Address, Address, P) {
        (self.source, self.dest, self.payload)
    }
}
