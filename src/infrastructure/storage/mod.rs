//! In-memory car storage

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::traits::CarStore;
use crate::domain::entities::{Car, CarId};
use crate::application::errors::StorageError;

/// Vec-backed store. Lives for the process lifetime, nothing is persisted.
#[derive(Default)]
pub struct MemoryCarStore {
    cars: RwLock<Vec<Car>>,
}

impl MemoryCarStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store seeded with the given titles, ids assigned in order
    pub fn with_titles<I, S>(titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let cars = titles.into_iter().map(Car::new).collect();
        Self {
            cars: RwLock::new(cars),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<Car>>, StorageError> {
        self.cars.read().map_err(|_| StorageError::Poisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<Car>>, StorageError> {
        self.cars.write().map_err(|_| StorageError::Poisoned)
    }
}

impl CarStore for MemoryCarStore {
    fn describe(&self, id: CarId) -> Result<Car, StorageError> {
        let cars = self.read()?;
        cars.get(id).cloned().ok_or(StorageError::NotFound(id))
    }

    fn list(&self, cursor: usize, limit: usize) -> Result<Vec<Car>, StorageError> {
        let cars = self.read()?;
        Ok(cars.iter().skip(cursor).take(limit).cloned().collect())
    }

    fn create(&self, car: Car) -> Result<CarId, StorageError> {
        let mut cars = self.write()?;
        cars.push(car);
        Ok(cars.len() - 1)
    }

    fn update(&self, id: CarId, car: Car) -> Result<(), StorageError> {
        let mut cars = self.write()?;
        let slot = cars.get_mut(id).ok_or(StorageError::NotFound(id))?;
        *slot = car;
        Ok(())
    }

    fn remove(&self, id: CarId) -> Result<bool, StorageError> {
        let mut cars = self.write()?;
        if id >= cars.len() {
            return Err(StorageError::NotFound(id));
        }
        cars.remove(id);
        tracing::debug!("Removed car {}, {} left", id, cars.len());
        Ok(true)
    }

    fn count(&self) -> Result<usize, StorageError> {
        Ok(self.read()?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(cars: &[Car]) -> Vec<&str> {
        cars.iter().map(|c| c.title.as_str()).collect()
    }

    fn seeded() -> MemoryCarStore {
        MemoryCarStore::with_titles([
            "Toyota", "Nissan", "Infinity", "Mazda", "Honda", "Subaru",
            "Lexus", "Kia", "Hyundai", "Volvo", "Skoda",
        ])
    }

    #[test]
    fn test_describe_in_and_out_of_range() {
        let store = seeded();
        assert_eq!(store.describe(0).unwrap().title, "Toyota");
        assert_eq!(store.describe(10).unwrap().title, "Skoda");
        assert_eq!(store.describe(11), Err(StorageError::NotFound(11)));
        assert_eq!(store.describe(999), Err(StorageError::NotFound(999)));
    }

    #[test]
    fn test_create_then_describe() {
        let store = seeded();
        let id = store.create(Car::new("Audi A4")).unwrap();
        assert_eq!(id, 11);
        assert_eq!(store.describe(id).unwrap(), Car::new("Audi A4"));
        assert_eq!(store.count().unwrap(), 12);

        let empty = MemoryCarStore::new();
        assert_eq!(empty.create(Car::new("first")).unwrap(), 0);
    }

    #[test]
    fn test_consecutive_pages_are_contiguous() {
        let store = seeded();
        let first = store.list(0, 3).unwrap();
        let second = store.list(3, 3).unwrap();
        assert_eq!(titles(&first), vec!["Toyota", "Nissan", "Infinity"]);
        assert_eq!(titles(&second), vec!["Mazda", "Honda", "Subaru"]);

        let whole = store.list(0, 6).unwrap();
        let joined: Vec<Car> = first.into_iter().chain(second).collect();
        assert_eq!(joined, whole);
    }

    #[test]
    fn test_list_tail_and_past_end() {
        let store = seeded();
        assert_eq!(titles(&store.list(9, 3).unwrap()), vec!["Volvo", "Skoda"]);
        assert!(store.list(11, 3).unwrap().is_empty());
        assert!(store.list(500, 3).unwrap().is_empty());
        assert!(store.list(0, 0).unwrap().is_empty());
    }

    #[test]
    fn test_update_replaces_in_place() {
        let store = seeded();
        store.update(2, Car::new("Mazda6")).unwrap();
        assert_eq!(store.describe(2).unwrap().title, "Mazda6");
        assert_eq!(store.count().unwrap(), 11);
        assert_eq!(store.update(11, Car::new("x")), Err(StorageError::NotFound(11)));
    }

    #[test]
    fn test_remove_shifts_later_ids() {
        let store = seeded();
        let old_third = store.describe(3).unwrap();
        assert_eq!(store.remove(2), Ok(true));
        assert_eq!(store.describe(2).unwrap(), old_third);
        assert_eq!(store.count().unwrap(), 10);
    }

    #[test]
    fn test_remove_last_leaves_slot_empty() {
        let store = MemoryCarStore::with_titles(["A", "B"]);
        assert_eq!(store.remove(1), Ok(true));
        assert_eq!(store.describe(1), Err(StorageError::NotFound(1)));
        assert_eq!(store.remove(5), Err(StorageError::NotFound(5)));
    }
}
