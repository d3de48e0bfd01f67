use std::{fmt, sync::atomic::{AtomicU64, Ordering}};

/// Identity of a box, fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct InstanceId(pub u64);

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Hands out monotonically increasing ids, starting from 0.
#[derive(Debug, Default)]
pub struct IdAllocator {
    counter: AtomicU64,
}

impl IdAllocator {
    pub fn new() -> Self { Self::default() }

    pub fn next(&self) -> InstanceId {
        InstanceId(self.counter.fetch_add(1, Ordering::Relaxed))
    }

    pub fn issued(&self) -> u64 {
        self.counter.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn starts_at_zero() {
        let ids = IdAllocator::new();
        assert_eq!(ids.issued(), 0);
        assert_eq!(ids.next(), InstanceId(0));
        assert_eq!(ids.next(), InstanceId(1));
        assert_eq!(ids.issued(), 2);
    }

    proptest! {
        #[test]
        fn ids_strictly_increase(count in 1usize..256) {
            let ids = IdAllocator::new();
            let issued: Vec<_> = (0..count).map(|_| ids.next()).collect();

            prop_assert!(issued.windows(2).all(|w| w[0] < w[1]));
            prop_assert_eq!(ids.issued(), count as u64);
        }
    }
}
