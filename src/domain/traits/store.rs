use crate::application::errors::StorageError;
use crate::domain::entities::{Car, CarId};

/// CarStore trait - ordered, positionally indexed car records
///
/// Ids are positions: `remove` compacts the sequence, so every car after the
/// removed one moves one id down.
pub trait CarStore: Send + Sync {
    /// Fetch the car at `id`
    fn describe(&self, id: CarId) -> Result<Car, StorageError>;

    /// Up to `limit` cars starting at `cursor`; empty when `cursor` is past the end
    fn list(&self, cursor: usize, limit: usize) -> Result<Vec<Car>, StorageError>;

    /// Append a car and return its id
    fn create(&self, car: Car) -> Result<CarId, StorageError>;

    /// Replace the car at `id`
    fn update(&self, id: CarId, car: Car) -> Result<(), StorageError>;

    /// Remove the car at `id`, shifting later cars left
    fn remove(&self, id: CarId) -> Result<bool, StorageError>;

    /// Number of stored cars
    fn count(&self) -> Result<usize, StorageError>;
}
