use std::fmt;

use tracing::trace;

use crate::value::Value;

/// Exclusively owned backing storage for a single [`Value`].
///
/// A slot is either *allocated* or *drained*. A drained slot holds nothing and
/// releasing it does nothing. Ownership of the allocation only ever moves
/// through [`Slot::take`] and [`Slot::replace`], never gets duplicated.
#[derive(Debug)]
pub struct Slot(Option<Box<Value>>);

impl Slot {
    pub fn allocate(value: Value) -> Self {
        let slot = Slot(Some(Box::new(value)));
        trace!("allocated {value} at {slot}");

        slot
    }

    pub fn drained() -> Self { Slot(None) }

    pub fn is_drained(&self) -> bool { self.0.is_none() }

    pub fn get(&self) -> Option<Value> {
        self.0.as_deref().copied()
    }

    /// Overwrites the stored value in place. A drained slot gets a fresh allocation.
    pub fn store(&mut self, value: Value) {
        match self.0.as_deref_mut() {
            Some(x) => *x = value,
            None => *self = Slot::allocate(value),
        }
    }

    /// Hands the allocation over to the caller, leaving `self` drained.
    pub fn take(&mut self) -> Slot {
        Slot(self.0.take())
    }

    /// Releases the current allocation, then adopts the one owned by `other`.
    pub fn replace(&mut self, other: Slot) {
        self.release();
        *self = other;
    }

    pub fn release(&mut self) {
        if let Some(x) = self.0.take() {
            trace!("released {x} at {:p}", &*x);
        }
    }

    /// Storage identity of the allocation, if any.
    pub fn address(&self) -> Option<*const Value> {
        self.0.as_deref().map(|x| x as *const Value)
    }
}

impl Drop for Slot {
    fn drop(&mut self) { self.release() }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.address() {
            Some(addr) => write!(f, "{addr:p}"),
            None => write!(f, "0x0"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_keeps_storage_identity() {
        let mut src = Slot::allocate(Value(7));
        let addr = src.address();

        let dst = src.take();

        assert!(src.is_drained());
        assert_eq!(src.get(), None);
        assert_eq!(dst.address(), addr);
        assert_eq!(dst.get(), Some(Value(7)));
    }

    #[test]
    fn store_overwrites_in_place() {
        let mut slot = Slot::allocate(Value(1));
        let addr = slot.address();

        slot.store(Value(5));

        assert_eq!(slot.address(), addr);
        assert_eq!(slot.get(), Some(Value(5)));
    }

    #[test]
    fn store_into_drained_allocates() {
        let mut slot = Slot::drained();
        slot.store(Value(3));

        assert!(!slot.is_drained());
        assert_eq!(slot.get(), Some(Value(3)));
    }

    #[test]
    fn releasing_drained_is_noop() {
        let mut slot = Slot::drained();
        slot.release();
        slot.release();

        assert!(slot.is_drained());
        assert_eq!(slot.to_string(), "0x0");
    }

    #[test]
    fn replace_adopts_other_allocation() {
        let mut dst = Slot::allocate(Value(1));
        let mut src = Slot::allocate(Value(2));
        let src_addr = src.address();

        dst.replace(src.take());

        assert_eq!(dst.address(), src_addr);
        assert_eq!(dst.get(), Some(Value(2)));
        assert!(src.is_drained());
    }
}
