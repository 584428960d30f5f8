use std::sync::Arc;

use super::{CityService, ServiceError};
use crate::board::domain::City;
use crate::board::repository::CityRepository;

pub struct SimpleCityService<R> {
    repository: Arc<R>,
}

impl<R: CityRepository> SimpleCityService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

impl<R: CityRepository> CityService for SimpleCityService<R> {
    fn find_by_id(&self, id: i32) -> Result<Option<City>, ServiceError> {
        Ok(self.repository.find_by_id(id)?)
    }

    fn find_all(&self) -> Result<Vec<City>, ServiceError> {
        Ok(self.repository.find_all()?)
    }
}
