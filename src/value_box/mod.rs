mod slot;

use std::fmt;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{id::{IdAllocator, InstanceId}, value::Value};

pub use self::slot::Slot;

#[derive(Debug, Error)]
pub enum BoxError {
    #[error("Box {id} has been drained by a move and has no slot to copy from")]
    DrainedSource {
        id: InstanceId,
    },
}

/// What an assignment actually did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOutcome {
    /// Value and slot content were transferred.
    Applied,
    /// Target and source were the same box, nothing was touched.
    SelfAssignment,
    /// The source was drained: only the value was copied, the target's slot is untouched.
    ValueOnly,
}

/// A single integer together with an exclusively owned backing slot and a fixed identity.
///
/// `value` lives in the box itself, so it stays readable after the slot has
/// been moved away.
#[derive(Debug)]
pub struct ValueBox {
    value: Value,
    slot: Slot,
    id: InstanceId,
}

impl ValueBox {
    pub fn value(&self) -> Value { self.value }

    pub fn id(&self) -> InstanceId { self.id }

    pub fn slot(&self) -> &Slot { &self.slot }

    pub fn slot_mut(&mut self) -> &mut Slot { &mut self.slot }

    pub fn is_drained(&self) -> bool { self.slot.is_drained() }

    /// Move construction. The new box adopts both the identity and the slot
    /// allocation of `source`, which is left drained but still valid.
    pub fn moved_from(source: &mut ValueBox) -> ValueBox {
        info!("using move constructor, from {source}");

        ValueBox {
            value: source.value,
            slot: source.slot.take(),
            id: source.id,
        }
    }

    /// Copy assignment from a distinct box. The slot is written in place.
    pub fn copy_assign(&mut self, src: &ValueBox) -> AssignOutcome {
        info!("copying {src} into {}", self);

        self.value = src.value;
        match src.slot.get() {
            Some(x) => {
                self.slot.store(x);
                AssignOutcome::Applied
            },
            None => {
                warn!("tried to copy invalid data from drained box {}", src.id);
                AssignOutcome::ValueOnly
            },
        }
    }

    /// Move assignment from a distinct box. The current slot is released and
    /// `src`'s allocation is adopted as is.
    pub fn move_assign(&mut self, src: &mut ValueBox) -> AssignOutcome {
        info!("moving {src} into {}", self);

        self.value = src.value;
        self.slot.replace(src.slot.take());
        debug!("box {} now owns {}, box {} is drained", self.id, self.slot, src.id);

        AssignOutcome::Applied
    }
}

impl Drop for ValueBox {
    fn drop(&mut self) {
        info!("deleting {}", self);
    }
}

impl fmt::Display for ValueBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ValueBox with val= {}, id={} and data_add={}", self.value, self.id, self.slot)
    }
}

/// Creates boxes, each with a fresh identity from its own [`IdAllocator`].
#[derive(Debug, Default)]
pub struct BoxFactory {
    ids: IdAllocator,
}

impl BoxFactory {
    pub fn new() -> Self { Self::default() }

    /// Number of boxes created so far, over all construction paths.
    pub fn created(&self) -> u64 { self.ids.issued() }

    fn build(&self, value: Value, stored: Value) -> ValueBox {
        ValueBox {
            value,
            slot: Slot::allocate(stored),
            id: self.ids.next(),
        }
    }

    pub fn new_default(&self) -> ValueBox {
        let b = self.build(Value(0), Value(0));
        info!("using default constructor: {b}");

        b
    }

    pub fn from_integer(&self, value: impl Into<Value>) -> ValueBox {
        let value = value.into();
        let b = self.build(value, value);
        info!("using from-integer constructor: {b}");

        b
    }

    /// Uses the code point of the first character of `s`. An empty string
    /// reads as the terminator, i.e. 0.
    pub fn from_code_string(&self, s: &str) -> ValueBox {
        let value = s.chars().next().map_or(Value(0), Value::from_code_point);
        let b = self.build(value, value);
        info!("using explicit from-code-string constructor: {b}");

        b
    }

    /// The box value is the code point shifted by 2, the slot keeps the raw code point.
    pub fn from_character(&self, c: char) -> ValueBox {
        let raw = Value::from_code_point(c);
        let b = self.build(raw.shifted(2), raw);
        info!("using from-character constructor: {b}");

        b
    }

    /// Copy construction: same value, a new independent slot and a new identity.
    pub fn copy_of(&self, source: &ValueBox) -> Result<ValueBox, BoxError> {
        let stored = source.slot.get()
            .ok_or(BoxError::DrainedSource { id: source.id })?;

        let b = self.build(source.value, stored);
        info!("using copy constructor, from {source} to {b}");

        Ok(b)
    }
}
