use std::sync::Arc;

use axum::extract::{Multipart, Path, State};
use axum::response::Response;
use axum::routing::{get, post};
use axum::Router;

use super::form::{read_with_file, MultipartForm};
use super::view::{bad_request, error_page, render, Model, View};
use super::session::{Session, SessionHandle};
use super::WebState;
use crate::board::domain::{FileDto, Vacancy};
use crate::board::service::{CityService, VacancyService};

pub const VACANCY_NOT_FOUND: &str = "Vacancy with the specified id was not found";

const LIST: View = View::Template("vacancies/list");
const CREATE: View = View::Template("vacancies/create");
const ONE: View = View::Template("vacancies/one");
const TO_LIST: View = View::Redirect("/vacancies");

/// Vacancy pages. Hidden vacancies are listed too; `visible` is left to the template.
pub struct VacancyController {
    vacancies: Arc<dyn VacancyService>,
    cities: Arc<dyn CityService>,
}

impl VacancyController {
    pub fn new(vacancies: Arc<dyn VacancyService>, cities: Arc<dyn CityService>) -> Self {
        Self { vacancies, cities }
    }

    pub fn get_all(&self, model: &mut Model) -> View {
        match self.vacancies.find_all() {
            Ok(vacancies) => {
                model.add_attribute("vacancies", &vacancies);
                LIST
            }
            Err(err) => error_page(model, err),
        }
    }

    pub fn get_creation_page(&self, model: &mut Model) -> View {
        match self.cities.find_all() {
            Ok(cities) => {
                model.add_attribute("cities", &cities);
                CREATE
            }
            Err(err) => error_page(model, err),
        }
    }

    pub fn create(&self, vacancy: Vacancy, image: FileDto, model: &mut Model) -> View {
        match self.vacancies.save(vacancy, image) {
            Ok(_) => TO_LIST,
            Err(err) => error_page(model, err),
        }
    }

    pub fn get_by_id(&self, model: &mut Model, id: i32) -> View {
        let vacancy = match self.vacancies.find_by_id(id) {
            Ok(Some(vacancy)) => vacancy,
            Ok(None) => return error_page(model, VACANCY_NOT_FOUND),
            Err(err) => return error_page(model, err),
        };
        match self.cities.find_all() {
            Ok(cities) => {
                model.add_attribute("cities", &cities);
                model.add_attribute("vacancy", &vacancy);
                ONE
            }
            Err(err) => error_page(model, err),
        }
    }

    pub fn update(&self, vacancy: Vacancy, image: FileDto, model: &mut Model) -> View {
        match self.vacancies.update(vacancy, image) {
            Ok(true) => TO_LIST,
            Ok(false) => error_page(model, VACANCY_NOT_FOUND),
            Err(err) => error_page(model, err),
        }
    }

    pub fn delete(&self, model: &mut Model, id: i32) -> View {
        match self.vacancies.delete_by_id(id) {
            Ok(true) => TO_LIST,
            Ok(false) => error_page(model, VACANCY_NOT_FOUND),
            Err(err) => error_page(model, err),
        }
    }
}

pub(crate) fn routes() -> Router<WebState> {
    Router::new()
        .route("/vacancies", get(list_handler))
        .route(
            "/vacancies/create",
            get(creation_page_handler).post(create_handler),
        )
        .route("/vacancies/update", post(update_handler))
        .route("/vacancies/delete/{id}", get(delete_handler))
        .route("/vacancies/{id}", get(one_handler))
}

pub(crate) async fn list_handler(State(state): State<WebState>, handle: SessionHandle) -> Response {
    let session = Session::load(&handle).await;
    let mut model = Model::new();
    let view = state.vacancies.get_all(&mut model);
    render(view, model, &session)
}

pub(crate) async fn creation_page_handler(
    State(state): State<WebState>,
    handle: SessionHandle,
) -> Response {
    let session = Session::load(&handle).await;
    let mut model = Model::new();
    let view = state.vacancies.get_creation_page(&mut model);
    render(view, model, &session)
}

pub(crate) async fn create_handler(
    State(state): State<WebState>,
    handle: SessionHandle,
    multipart: Multipart,
) -> Response {
    let session = Session::load(&handle).await;
    let (vacancy, image) = match read_with_file(multipart, MultipartForm::vacancy).await {
        Ok(parts) => parts,
        Err(err) => return bad_request(err, &session),
    };
    let mut model = Model::new();
    let view = state.vacancies.create(vacancy, image, &mut model);
    render(view, model, &session)
}

pub(crate) async fn one_handler(
    State(state): State<WebState>,
    handle: SessionHandle,
    Path(id): Path<i32>,
) -> Response {
    let session = Session::load(&handle).await;
    let mut model = Model::new();
    let view = state.vacancies.get_by_id(&mut model, id);
    render(view, model, &session)
}

pub(crate) async fn update_handler(
    State(state): State<WebState>,
    handle: SessionHandle,
    multipart: Multipart,
) -> Response {
    let session = Session::load(&handle).await;
    let (vacancy, image) = match read_with_file(multipart, MultipartForm::vacancy).await {
        Ok(parts) => parts,
        Err(err) => return bad_request(err, &session),
    };
    let mut model = Model::new();
    let view = state.vacancies.update(vacancy, image, &mut model);
    render(view, model, &session)
}

pub(crate) async fn delete_handler(
    State(state): State<WebState>,
    handle: SessionHandle,
    Path(id): Path<i32>,
) -> Response {
    let session = Session::load(&handle).await;
    let mut model = Model::new();
    let view = state.vacancies.delete(&mut model, id);
    render(view, model, &session)
}
