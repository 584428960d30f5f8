use std::sync::Arc;

use tracing::{debug, warn};

use super::{CandidateService, FileService, ServiceError};
use crate::board::domain::{Candidate, FileDto, NO_FILE};
use crate::board::repository::CandidateRepository;

/// Candidate bookkeeping, including the photo each profile points at.
pub struct SimpleCandidateService<R> {
    repository: Arc<R>,
    files: Arc<dyn FileService>,
}

impl<R: CandidateRepository> SimpleCandidateService<R> {
    pub fn new(repository: Arc<R>, files: Arc<dyn FileService>) -> Self {
        Self { repository, files }
    }
}

impl<R: CandidateRepository> CandidateService for SimpleCandidateService<R> {
    fn save(&self, mut candidate: Candidate, image: FileDto) -> Result<Candidate, ServiceError> {
        if !image.is_empty() {
            candidate.file_id = self.files.save(image)?.id;
        }
        let saved = self.repository.save(candidate)?;
        debug!(candidate_id = saved.id, "candidate saved");
        Ok(saved)
    }

    fn update(&self, mut candidate: Candidate, image: FileDto) -> Result<bool, ServiceError> {
        if image.is_empty() {
            return Ok(self.repository.update(candidate)?);
        }

        let Some(previous) = self.repository.find_by_id(candidate.id)? else {
            return Ok(false);
        };
        let replacement = self.files.save(image)?.id;
        candidate.file_id = replacement;
        let updated = self.repository.update(candidate)?;
        // Removed between lookup and update: the fresh attachment has no owner.
        let released = if updated { previous.file_id } else { replacement };
        release_file(self.files.as_ref(), released)?;
        Ok(updated)
    }

    fn delete_by_id(&self, id: i32) -> Result<bool, ServiceError> {
        let Some(candidate) = self.repository.find_by_id(id)? else {
            return Ok(false);
        };
        let deleted = self.repository.delete_by_id(id)?;
        if deleted {
            release_file(self.files.as_ref(), candidate.file_id)?;
        }
        Ok(deleted)
    }

    fn find_by_id(&self, id: i32) -> Result<Option<Candidate>, ServiceError> {
        Ok(self.repository.find_by_id(id)?)
    }

    fn find_all(&self) -> Result<Vec<Candidate>, ServiceError> {
        Ok(self.repository.find_all()?)
    }
}

pub(super) fn release_file(files: &dyn FileService, file_id: i32) -> Result<(), ServiceError> {
    if file_id == NO_FILE {
        return Ok(());
    }
    if !files.delete_by_id(file_id)? {
        warn!(file_id, "attachment already missing");
    }
    Ok(())
}
