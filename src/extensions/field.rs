//! Presence-tracked scalar fields.
//!
//! Optional attributes must round-trip exactly: a reader has to distinguish
//! `readOnly="false"` from an absent `readOnly`, and the serializer re-emits
//! an attribute based on that distinction, not on the current value. The
//! wrapper keeps the invariant in one place: the flag flips only through
//! [`ExtensionField::set`], and there is no other mutation path.

/// An attribute-backed value that remembers whether it was ever assigned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionField<T> {
    value: T,
    explicit: bool,
}

impl<T: Default> ExtensionField<T> {
    /// Create an unset field holding the type's zero value.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T> ExtensionField<T> {
    /// Assign a value, marking the field as explicitly set.
    pub fn set(&mut self, value: T) {
        self.value = value;
        self.explicit = true;
    }

    /// Borrow the current value, meaningful only if [`is_set`](Self::is_set).
    pub fn get(&self) -> &T {
        &self.value
    }

    /// Whether the field was assigned from the document or a setter.
    pub fn is_set(&self) -> bool {
        self.explicit
    }
}

impl<T: Copy> ExtensionField<T> {
    /// The current value by copy.
    pub fn value(&self) -> T {
        self.value
    }
}
