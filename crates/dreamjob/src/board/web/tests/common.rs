use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request};
use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::board::domain::{Candidate, City, FileDto, StoredFile, User, Vacancy};
use crate::board::repository::{
    MemoryCandidateRepository, MemoryCityRepository, MemoryFileRepository,
    MemoryVacancyRepository, RepositoryError, SqlUserRepository,
};
use crate::board::service::{
    CandidateService, CityService, FileService, ServiceError, SimpleCandidateService,
    SimpleCityService, SimpleFileService, SimpleUserService, SimpleVacancyService, UserService,
    VacancyService,
};
use crate::board::web::{session_store, WebState};
use crate::config::{DatabaseConfig, IN_MEMORY_DATABASE};

pub(super) const BOUNDARY: &str = "dreamjob-test-boundary";

pub(super) fn created_at() -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, 20)
        .and_then(|date| date.and_hms_opt(9, 30, 0))
        .expect("valid timestamp")
}

pub(super) fn candidate(id: i32, name: &str) -> Candidate {
    Candidate {
        id,
        name: name.to_string(),
        description: format!("{name} description"),
        creation_date: created_at(),
        city_id: 1,
        file_id: id,
    }
}

pub(super) fn vacancy(id: i32, title: &str, visible: bool) -> Vacancy {
    Vacancy {
        id,
        title: title.to_string(),
        description: format!("{title} description"),
        creation_date: created_at(),
        visible,
        city_id: 2,
        file_id: id,
    }
}

pub(super) fn cities() -> Vec<City> {
    vec![City::new(1, "Москва"), City::new(2, "Санкт-Петербург")]
}

pub(super) fn test_file() -> FileDto {
    FileDto::new("testFile.img", vec![1, 2, 3])
}

pub(super) fn unavailable(message: &str) -> ServiceError {
    ServiceError::Repository(RepositoryError::Unavailable(message.to_string()))
}

/// Records service stub that answers from a fixed list and captures writes.
pub(super) struct StubRecords<T> {
    pub(super) records: Vec<T>,
    pub(super) saved: Mutex<Vec<(T, FileDto)>>,
    pub(super) updated: Mutex<Vec<(T, FileDto)>>,
    pub(super) update_result: bool,
    pub(super) delete_result: bool,
    pub(super) failure: Option<&'static str>,
}

impl<T> StubRecords<T> {
    pub(super) fn with(records: Vec<T>) -> Self {
        Self {
            records,
            saved: Mutex::new(Vec::new()),
            updated: Mutex::new(Vec::new()),
            update_result: true,
            delete_result: true,
            failure: None,
        }
    }

    pub(super) fn failing(message: &'static str) -> Self {
        Self {
            failure: Some(message),
            ..Self::with(Vec::new())
        }
    }

    fn check(&self) -> Result<(), ServiceError> {
        match self.failure {
            Some(message) => Err(unavailable(message)),
            None => Ok(()),
        }
    }
}

macro_rules! stub_records_service {
    ($service:ident, $record:ty) => {
        impl $service for StubRecords<$record> {
            fn save(&self, record: $record, image: FileDto) -> Result<$record, ServiceError> {
                self.check()?;
                self.saved
                    .lock()
                    .expect("stub mutex poisoned")
                    .push((record.clone(), image));
                Ok(record)
            }

            fn update(&self, record: $record, image: FileDto) -> Result<bool, ServiceError> {
                self.check()?;
                self.updated
                    .lock()
                    .expect("stub mutex poisoned")
                    .push((record, image));
                Ok(self.update_result)
            }

            fn delete_by_id(&self, _id: i32) -> Result<bool, ServiceError> {
                self.check()?;
                Ok(self.delete_result)
            }

            fn find_by_id(&self, id: i32) -> Result<Option<$record>, ServiceError> {
                self.check()?;
                Ok(self.records.iter().find(|record| record.id == id).cloned())
            }

            fn find_all(&self) -> Result<Vec<$record>, ServiceError> {
                self.check()?;
                Ok(self.records.clone())
            }
        }
    };
}

stub_records_service!(CandidateService, Candidate);
stub_records_service!(VacancyService, Vacancy);

pub(super) struct StubCities(pub(super) Vec<City>);

impl CityService for StubCities {
    fn find_by_id(&self, id: i32) -> Result<Option<City>, ServiceError> {
        Ok(self.0.iter().find(|city| city.id == id).cloned())
    }

    fn find_all(&self) -> Result<Vec<City>, ServiceError> {
        Ok(self.0.clone())
    }
}

#[derive(Default)]
pub(super) struct StubFiles(pub(super) Option<FileDto>);

impl FileService for StubFiles {
    fn save(&self, file: FileDto) -> Result<StoredFile, ServiceError> {
        Ok(StoredFile::from(file))
    }

    fn get_file_by_id(&self, _id: i32) -> Result<Option<FileDto>, ServiceError> {
        Ok(self.0.clone())
    }

    fn delete_by_id(&self, _id: i32) -> Result<bool, ServiceError> {
        Ok(self.0.is_some())
    }
}

#[derive(Default)]
pub(super) struct StubUsers {
    pub(super) known: Vec<User>,
    pub(super) saved: Mutex<Vec<User>>,
    pub(super) reject_save: bool,
}

#[async_trait]
impl UserService for StubUsers {
    async fn save(&self, user: User) -> Option<User> {
        if self.reject_save {
            return None;
        }
        self.saved
            .lock()
            .expect("stub mutex poisoned")
            .push(user.clone());
        Some(user)
    }

    async fn find_by_email_and_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<User>, ServiceError> {
        Ok(self
            .known
            .iter()
            .find(|user| user.email == email && user.password == password)
            .cloned())
    }
}

/// State backed by the real in-memory stores and an in-memory SQLite users table.
pub(super) async fn memory_state(seed_data: bool) -> WebState {
    let files: Arc<dyn FileService> = Arc::new(SimpleFileService::new(Arc::new(
        MemoryFileRepository::default(),
    )));
    let (candidates, vacancies) = if seed_data {
        (
            MemoryCandidateRepository::with_demo_data().expect("seed candidates"),
            MemoryVacancyRepository::with_demo_data().expect("seed vacancies"),
        )
    } else {
        (
            MemoryCandidateRepository::default(),
            MemoryVacancyRepository::default(),
        )
    };
    let users = SqlUserRepository::connect(&DatabaseConfig {
        url: IN_MEMORY_DATABASE.to_string(),
        max_connections: 1,
    })
    .await
    .expect("in-memory database opens");

    let sessions = session_store(users.pool().clone())
        .await
        .expect("session schema ready");

    WebState::new(
        Arc::new(SimpleCandidateService::new(Arc::new(candidates), files.clone())),
        Arc::new(SimpleVacancyService::new(Arc::new(vacancies), files.clone())),
        Arc::new(SimpleCityService::new(Arc::new(MemoryCityRepository::default()))),
        files,
        Arc::new(SimpleUserService::new(Arc::new(users))),
        sessions,
    )
}

pub(super) fn multipart_request(
    uri: &str,
    fields: &[(&str, &str)],
    file: Option<(&str, &[u8])>,
) -> Request<Body> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((file_name, content)) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(content);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::post(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .expect("valid request")
}

pub(super) fn form_request(uri: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::post(uri).header(
        header::CONTENT_TYPE,
        "application/x-www-form-urlencoded",
    );
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("valid request")
}

pub(super) fn get_request(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::get(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).expect("valid request")
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn location(response: &Response) -> Option<&str> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
}

/// `name=value` pair from the first `Set-Cookie` header.
pub(super) fn session_cookie(response: &Response) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(str::to_string)
}
