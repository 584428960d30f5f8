use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::{
    CandidateRepository, CityRepository, FileRepository, RepositoryError, VacancyRepository,
};
use crate::board::domain::{Candidate, City, Identified, StoredFile, Vacancy};

/// Thread-safe keyed store holding at most one record per id.
///
/// Ids come from an atomic counter and are never reused, even after a delete.
#[derive(Debug)]
pub struct MemoryStore<T> {
    next_id: AtomicI32,
    records: RwLock<BTreeMap<i32, T>>,
}

impl<T> Default for MemoryStore<T> {
    fn default() -> Self {
        Self {
            next_id: AtomicI32::new(0),
            records: RwLock::new(BTreeMap::new()),
        }
    }
}

impl<T: Identified> MemoryStore<T> {
    pub fn save(&self, mut record: T) -> Result<T, RepositoryError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        record.set_id(id);
        let mut records = self.write()?;
        Ok(records.entry(id).or_insert(record).clone())
    }

    /// Replace the record stored under `record.id()`, keeping the stored id.
    pub fn update(&self, record: T) -> Result<bool, RepositoryError> {
        let mut records = self.write()?;
        match records.get_mut(&record.id()) {
            Some(slot) => {
                let id = slot.id();
                *slot = record;
                slot.set_id(id);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn delete_by_id(&self, id: i32) -> Result<bool, RepositoryError> {
        Ok(self.write()?.remove(&id).is_some())
    }

    pub fn find_by_id(&self, id: i32) -> Result<Option<T>, RepositoryError> {
        Ok(self.read()?.get(&id).cloned())
    }

    /// All records in id order.
    pub fn find_all(&self) -> Result<Vec<T>, RepositoryError> {
        Ok(self.read()?.values().cloned().collect())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, BTreeMap<i32, T>>, RepositoryError> {
        self.records
            .read()
            .map_err(|_| RepositoryError::Unavailable("store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, BTreeMap<i32, T>>, RepositoryError> {
        self.records
            .write()
            .map_err(|_| RepositoryError::Unavailable("store lock poisoned".to_string()))
    }
}

#[derive(Debug, Default)]
pub struct MemoryCandidateRepository {
    store: MemoryStore<Candidate>,
}

impl MemoryCandidateRepository {
    pub fn with_demo_data() -> Result<Self, RepositoryError> {
        let repository = Self::default();
        repository.save(Candidate::new("Petrov", "Intern", 1))?;
        repository.save(Candidate::new("Sidorov", "Pro", 2))?;
        repository.save(Candidate::new("Ivanov", "Insane", 3))?;
        Ok(repository)
    }
}

impl CandidateRepository for MemoryCandidateRepository {
    fn save(&self, candidate: Candidate) -> Result<Candidate, RepositoryError> {
        self.store.save(candidate)
    }

    fn update(&self, candidate: Candidate) -> Result<bool, RepositoryError> {
        self.store.update(candidate)
    }

    fn delete_by_id(&self, id: i32) -> Result<bool, RepositoryError> {
        self.store.delete_by_id(id)
    }

    fn find_by_id(&self, id: i32) -> Result<Option<Candidate>, RepositoryError> {
        self.store.find_by_id(id)
    }

    fn find_all(&self) -> Result<Vec<Candidate>, RepositoryError> {
        self.store.find_all()
    }
}

#[derive(Debug, Default)]
pub struct MemoryVacancyRepository {
    store: MemoryStore<Vacancy>,
}

impl MemoryVacancyRepository {
    pub fn with_demo_data() -> Result<Self, RepositoryError> {
        let repository = Self::default();
        for (title, description) in [
            ("Intern Java Developer", "beginner"),
            ("Junior Java Developer", "base"),
            ("Junior+ Java Developer", "base1"),
            ("Middle Java Developer", "normal"),
            ("Middle+ Java Developer", "normal1"),
            ("Senior Java Developer", "ok"),
        ] {
            repository.save(Vacancy::new(title, description, 1))?;
        }
        Ok(repository)
    }
}

impl VacancyRepository for MemoryVacancyRepository {
    fn save(&self, vacancy: Vacancy) -> Result<Vacancy, RepositoryError> {
        self.store.save(vacancy)
    }

    fn update(&self, vacancy: Vacancy) -> Result<bool, RepositoryError> {
        self.store.update(vacancy)
    }

    fn delete_by_id(&self, id: i32) -> Result<bool, RepositoryError> {
        self.store.delete_by_id(id)
    }

    fn find_by_id(&self, id: i32) -> Result<Option<Vacancy>, RepositoryError> {
        self.store.find_by_id(id)
    }

    fn find_all(&self) -> Result<Vec<Vacancy>, RepositoryError> {
        self.store.find_all()
    }
}

/// Cities are reference data: fixed at construction, read-only afterwards.
#[derive(Debug)]
pub struct MemoryCityRepository {
    cities: BTreeMap<i32, City>,
}

impl MemoryCityRepository {
    pub fn new(cities: impl IntoIterator<Item = City>) -> Self {
        Self {
            cities: cities.into_iter().map(|city| (city.id, city)).collect(),
        }
    }
}

impl Default for MemoryCityRepository {
    fn default() -> Self {
        Self::new([
            City::new(1, "Москва"),
            City::new(2, "Санкт-Петербург"),
            City::new(3, "Екатеринбург"),
        ])
    }
}

impl CityRepository for MemoryCityRepository {
    fn find_by_id(&self, id: i32) -> Result<Option<City>, RepositoryError> {
        Ok(self.cities.get(&id).cloned())
    }

    fn find_all(&self) -> Result<Vec<City>, RepositoryError> {
        Ok(self.cities.values().cloned().collect())
    }
}

#[derive(Debug, Default)]
pub struct MemoryFileRepository {
    store: MemoryStore<StoredFile>,
}

impl FileRepository for MemoryFileRepository {
    fn save(&self, file: StoredFile) -> Result<StoredFile, RepositoryError> {
        self.store.save(file)
    }

    fn find_by_id(&self, id: i32) -> Result<Option<StoredFile>, RepositoryError> {
        self.store.find_by_id(id)
    }

    fn delete_by_id(&self, id: i32) -> Result<bool, RepositoryError> {
        self.store.delete_by_id(id)
    }
}
