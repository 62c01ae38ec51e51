/// Positional id of a car inside the store.
///
/// Ids are indexes: removing a car shifts every later car one slot to the
/// left, so a previously fetched id may point at a different car afterwards.
pub type CarId = usize;

/// A single car insurance entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Car {
    pub title: String,
}

impl Car {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}
