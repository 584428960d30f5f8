use std::sync::Arc;

use tracing::debug;

use super::candidates::release_file;
use super::{FileService, ServiceError, VacancyService};
use crate::board::domain::{FileDto, Vacancy};
use crate::board::repository::VacancyRepository;

pub struct SimpleVacancyService<R> {
    repository: Arc<R>,
    files: Arc<dyn FileService>,
}

impl<R: VacancyRepository> SimpleVacancyService<R> {
    pub fn new(repository: Arc<R>, files: Arc<dyn FileService>) -> Self {
        Self { repository, files }
    }
}

impl<R: VacancyRepository> VacancyService for SimpleVacancyService<R> {
    fn save(&self, mut vacancy: Vacancy, image: FileDto) -> Result<Vacancy, ServiceError> {
        if !image.is_empty() {
            vacancy.file_id = self.files.save(image)?.id;
        }
        let saved = self.repository.save(vacancy)?;
        debug!(vacancy_id = saved.id, visible = saved.visible, "vacancy saved");
        Ok(saved)
    }

    fn update(&self, mut vacancy: Vacancy, image: FileDto) -> Result<bool, ServiceError> {
        if image.is_empty() {
            return Ok(self.repository.update(vacancy)?);
        }

        let Some(previous) = self.repository.find_by_id(vacancy.id)? else {
            return Ok(false);
        };
        let replacement = self.files.save(image)?.id;
        vacancy.file_id = replacement;
        let updated = self.repository.update(vacancy)?;
        // Removed between lookup and update: the fresh attachment has no owner.
        let released = if updated { previous.file_id } else { replacement };
        release_file(self.files.as_ref(), released)?;
        Ok(updated)
    }

    fn delete_by_id(&self, id: i32) -> Result<bool, ServiceError> {
        let Some(vacancy) = self.repository.find_by_id(id)? else {
            return Ok(false);
        };
        let deleted = self.repository.delete_by_id(id)?;
        if deleted {
            release_file(self.files.as_ref(), vacancy.file_id)?;
        }
        Ok(deleted)
    }

    fn find_by_id(&self, id: i32) -> Result<Option<Vacancy>, ServiceError> {
        Ok(self.repository.find_by_id(id)?)
    }

    fn find_all(&self) -> Result<Vec<Vacancy>, ServiceError> {
        Ok(self.repository.find_all()?)
    }
}
