use std::collections::HashMap;

use axum::extract::multipart::MultipartError;
use axum::extract::Multipart;
use chrono::{Local, NaiveDateTime};
use serde::Deserialize;

use crate::board::domain::{Candidate, FileDto, User, Vacancy, NO_FILE};

/// Name of the multipart part carrying the attachment.
pub const FILE_PART: &str = "file";

const DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

#[derive(Debug, thiserror::Error)]
pub enum FormError {
    #[error("malformed multipart body: {0}")]
    Multipart(#[from] MultipartError),
    #[error("missing form field '{0}'")]
    Missing(&'static str),
    #[error("form field '{field}' has invalid value '{value}'")]
    Invalid { field: &'static str, value: String },
}

/// Text fields and the optional attachment of a `multipart/form-data` submission.
#[derive(Debug, Clone, Default)]
pub struct MultipartForm {
    fields: HashMap<String, String>,
    file: FileDto,
}

impl MultipartForm {
    pub async fn read(mut multipart: Multipart) -> Result<Self, FormError> {
        let mut form = Self::default();
        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();
            if name == FILE_PART {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content = field.bytes().await?;
                form.file = FileDto::new(file_name, content.to_vec());
            } else {
                let value = field.text().await?;
                form.fields.insert(name, value);
            }
        }
        Ok(form)
    }

    pub fn from_parts<'a>(fields: impl IntoIterator<Item = (&'a str, &'a str)>, file: FileDto) -> Self {
        Self {
            fields: fields
                .into_iter()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
            file,
        }
    }

    fn text(&self, field: &'static str) -> Result<String, FormError> {
        self.fields
            .get(field)
            .map(|value| value.trim().to_string())
            .ok_or(FormError::Missing(field))
    }

    fn number(&self, field: &'static str, default: i32) -> Result<i32, FormError> {
        match self.fields.get(field).map(|value| value.trim()) {
            None | Some("") => Ok(default),
            Some(raw) => raw.parse().map_err(|_| FormError::Invalid {
                field,
                value: raw.to_string(),
            }),
        }
    }

    /// Unchecked checkboxes are not submitted at all.
    fn flag(&self, field: &'static str) -> bool {
        self.fields
            .get(field)
            .map(|value| matches!(value.trim(), "on" | "true" | "1"))
            .unwrap_or(false)
    }

    fn date_time(&self, field: &'static str) -> Result<NaiveDateTime, FormError> {
        let raw = match self.fields.get(field).map(|value| value.trim()) {
            None | Some("") => return Ok(Local::now().naive_local()),
            Some(raw) => raw,
        };
        DATE_TIME_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
            .ok_or_else(|| FormError::Invalid {
                field,
                value: raw.to_string(),
            })
    }

    pub fn candidate(&self) -> Result<Candidate, FormError> {
        Ok(Candidate {
            id: self.number("id", 0)?,
            name: self.text("name")?,
            description: self.text("description")?,
            creation_date: self.date_time("creation_date")?,
            city_id: self.number("city_id", 0)?,
            file_id: self.number("file_id", NO_FILE)?,
        })
    }

    pub fn vacancy(&self) -> Result<Vacancy, FormError> {
        Ok(Vacancy {
            id: self.number("id", 0)?,
            title: self.text("title")?,
            description: self.text("description")?,
            creation_date: self.date_time("creation_date")?,
            visible: self.flag("visible"),
            city_id: self.number("city_id", 0)?,
            file_id: self.number("file_id", NO_FILE)?,
        })
    }

    pub fn into_file(self) -> FileDto {
        self.file
    }
}

/// Read a multipart submission into a record plus its attachment.
pub async fn read_with_file<T>(
    multipart: Multipart,
    parse: fn(&MultipartForm) -> Result<T, FormError>,
) -> Result<(T, FileDto), FormError> {
    let form = MultipartForm::read(multipart).await?;
    let record = parse(&form)?;
    Ok((record, form.into_file()))
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegistrationForm {
    pub email: String,
    pub name: String,
    pub password: String,
}

impl From<RegistrationForm> for User {
    fn from(value: RegistrationForm) -> Self {
        User::new(normalize_email(&value.email), value.name.trim(), value.password)
    }
}

/// E-mail as stored and looked up: surrounding whitespace removed.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}
