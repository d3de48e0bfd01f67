use std::fmt;

/// The integer carried by a [`ValueBox`](crate::value_box::ValueBox) and its slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Value(pub i32);

impl Value {
    pub fn from_code_point(c: char) -> Self { Self(c as i32) }

    pub fn shifted(self, by: i32) -> Self { Self(self.0 + by) }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self { Self(value) }
}
