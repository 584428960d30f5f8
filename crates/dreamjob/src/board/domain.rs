use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// File reference meaning "no attachment".
pub const NO_FILE: i32 = 0;

/// Records owned by a keyed store. The store assigns the id on save.
pub trait Identified: Clone + Send + Sync {
    fn id(&self) -> i32;
    fn set_id(&mut self, id: i32);
}

/// Job seeker profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub creation_date: NaiveDateTime,
    pub city_id: i32,
    pub file_id: i32,
}

impl Candidate {
    pub fn new(name: impl Into<String>, description: impl Into<String>, city_id: i32) -> Self {
        Self {
            id: 0,
            name: name.into(),
            description: description.into(),
            creation_date: now(),
            city_id,
            file_id: NO_FILE,
        }
    }
}

/// Published job opening.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vacancy {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub creation_date: NaiveDateTime,
    pub visible: bool,
    pub city_id: i32,
    pub file_id: i32,
}

impl Vacancy {
    pub fn new(title: impl Into<String>, description: impl Into<String>, city_id: i32) -> Self {
        Self {
            id: 0,
            title: title.into(),
            description: description.into(),
            creation_date: now(),
            visible: true,
            city_id,
            file_id: NO_FILE,
        }
    }
}

/// Registered account. The password never reaches a view model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub name: String,
    #[serde(skip_serializing, default)]
    pub password: String,
}

impl User {
    pub fn new(
        email: impl Into<String>,
        name: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            email: email.into(),
            name: name.into(),
            password: password.into(),
        }
    }

    /// Placeholder shown to visitors without a session.
    pub fn guest() -> Self {
        Self::new("", "Guest", "")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    pub id: i32,
    pub name: String,
}

impl City {
    pub fn new(id: i32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// An attachment as uploaded by a browser or served back to one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FileDto {
    pub name: String,
    pub content: Vec<u8>,
}

impl FileDto {
    pub fn new(name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Forms without a chosen file still submit an empty part.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Attachment as kept by the file repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    pub id: i32,
    pub name: String,
    pub content: Vec<u8>,
}

impl From<FileDto> for StoredFile {
    fn from(value: FileDto) -> Self {
        Self {
            id: 0,
            name: value.name,
            content: value.content,
        }
    }
}

impl From<StoredFile> for FileDto {
    fn from(value: StoredFile) -> Self {
        Self {
            name: value.name,
            content: value.content,
        }
    }
}

macro_rules! identified {
    ($($record:ty),+ $(,)?) => {
        $(
            impl Identified for $record {
                fn id(&self) -> i32 {
                    self.id
                }

                fn set_id(&mut self, id: i32) {
                    self.id = id;
                }
            }
        )+
    };
}

identified!(Candidate, Vacancy, User, City, StoredFile);

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}
