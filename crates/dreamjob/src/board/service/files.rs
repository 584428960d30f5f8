use std::sync::Arc;

use tracing::debug;

use super::{FileService, ServiceError};
use crate::board::domain::{FileDto, StoredFile};
use crate::board::repository::FileRepository;

pub struct SimpleFileService<R> {
    repository: Arc<R>,
}

impl<R: FileRepository> SimpleFileService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

impl<R: FileRepository> FileService for SimpleFileService<R> {
    fn save(&self, file: FileDto) -> Result<StoredFile, ServiceError> {
        let stored = self.repository.save(StoredFile::from(file))?;
        debug!(file_id = stored.id, name = %stored.name, size = stored.content.len(), "file stored");
        Ok(stored)
    }

    fn get_file_by_id(&self, id: i32) -> Result<Option<FileDto>, ServiceError> {
        Ok(self.repository.find_by_id(id)?.map(FileDto::from))
    }

    fn delete_by_id(&self, id: i32) -> Result<bool, ServiceError> {
        Ok(self.repository.delete_by_id(id)?)
    }
}
