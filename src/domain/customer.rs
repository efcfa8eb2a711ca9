use std::{fmt, num::NonZeroUsize};

/// A generated customer identifier, such as `CUS1`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CustomerId(String);

impl CustomerId {
    pub(crate) fn generate(prefix: &str, ordinal: NonZeroUsize) -> Self {
        Self(format!("{prefix}{ordinal}"))
    }

    /// Returns the string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(&self.0)
    }
}

/// Someone who has rented a unit.
///
/// Two customers are equal when their identifiers are, regardless of name.
#[derive(Debug, Clone)]
pub struct Customer {
    id: CustomerId,
    name: String,
}

impl Customer {
    pub(crate) const fn new(id: CustomerId, name: String) -> Self {
        Self { id, name }
    }

    /// The customer's generated identifier.
    #[must_use]
    pub const fn id(&self) -> &CustomerId {
        &self.id
    }

    /// The display name given at rental time. May be empty.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl PartialEq for Customer {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Customer {}
