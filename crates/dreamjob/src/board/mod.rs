pub mod domain;
pub mod repository;
pub mod service;
pub mod web;

pub use domain::{Candidate, City, FileDto, Identified, StoredFile, User, Vacancy, NO_FILE};
