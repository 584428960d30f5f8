use std::sync::Arc;

use axum::extract::{Multipart, Path, State};
use axum::response::Response;
use axum::routing::{get, post};
use axum::Router;

use super::form::{read_with_file, MultipartForm};
use super::view::{bad_request, error_page, render, Model, View};
use super::session::{Session, SessionHandle};
use super::WebState;
use crate::board::domain::{Candidate, FileDto};
use crate::board::service::{CandidateService, CityService};

pub const CANDIDATE_NOT_FOUND: &str = "Candidate with the specified id was not found";

const LIST: View = View::Template("candidates/list");
const CREATE: View = View::Template("candidates/create");
const ONE: View = View::Template("candidates/one");
const TO_LIST: View = View::Redirect("/candidates");

pub struct CandidateController {
    candidates: Arc<dyn CandidateService>,
    cities: Arc<dyn CityService>,
}

impl CandidateController {
    pub fn new(candidates: Arc<dyn CandidateService>, cities: Arc<dyn CityService>) -> Self {
        Self { candidates, cities }
    }

    pub fn get_all(&self, model: &mut Model) -> View {
        match self.candidates.find_all() {
            Ok(candidates) => {
                model.add_attribute("candidates", &candidates);
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

    pub fn create(&self, candidate: Candidate, image: FileDto, model: &mut Model) -> View {
        match self.candidates.save(candidate, image) {
            Ok(_) => TO_LIST,
            Err(err) => error_page(model, err),
        }
    }

    pub fn get_by_id(&self, model: &mut Model, id: i32) -> View {
        let candidate = match self.candidates.find_by_id(id) {
            Ok(Some(candidate)) => candidate,
            Ok(None) => return error_page(model, CANDIDATE_NOT_FOUND),
            Err(err) => return error_page(model, err),
        };
        match self.cities.find_all() {
            Ok(cities) => {
                model.add_attribute("cities", &cities);
                model.add_attribute("candidate", &candidate);
                ONE
            }
            Err(err) => error_page(model, err),
        }
    }

    pub fn update(&self, candidate: Candidate, image: FileDto, model: &mut Model) -> View {
        match self.candidates.update(candidate, image) {
            Ok(true) => TO_LIST,
            Ok(false) => error_page(model, CANDIDATE_NOT_FOUND),
            Err(err) => error_page(model, err),
        }
    }

    pub fn delete(&self, model: &mut Model, id: i32) -> View {
        match self.candidates.delete_by_id(id) {
            Ok(true) => TO_LIST,
            Ok(false) => error_page(model, CANDIDATE_NOT_FOUND),
            Err(err) => error_page(model, err),
        }
    }
}

pub(crate) fn routes() -> Router<WebState> {
    Router::new()
        .route("/candidates", get(list_handler))
        .route(
            "/candidates/create",
            get(creation_page_handler).post(create_handler),
        )
        .route("/candidates/update", post(update_handler))
        .route("/candidates/delete/{id}", get(delete_handler))
        .route("/candidates/{id}", get(one_handler))
}

pub(crate) async fn list_handler(State(state): State<WebState>, handle: SessionHandle) -> Response {
    let session = Session::load(&handle).await;
    let mut model = Model::new();
    let view = state.candidates.get_all(&mut model);
    render(view, model, &session)
}

pub(crate) async fn creation_page_handler(
    State(state): State<WebState>,
    handle: SessionHandle,
) -> Response {
    let session = Session::load(&handle).await;
    let mut model = Model::new();
    let view = state.candidates.get_creation_page(&mut model);
    render(view, model, &session)
}

pub(crate) async fn create_handler(
    State(state): State<WebState>,
    handle: SessionHandle,
    multipart: Multipart,
) -> Response {
    let session = Session::load(&handle).await;
    let (candidate, image) = match read_with_file(multipart, MultipartForm::candidate).await {
        Ok(parts) => parts,
        Err(err) => return bad_request(err, &session),
    };
    let mut model = Model::new();
    let view = state.candidates.create(candidate, image, &mut model);
    render(view, model, &session)
}

pub(crate) async fn one_handler(
    State(state): State<WebState>,
    handle: SessionHandle,
    Path(id): Path<i32>,
) -> Response {
    let session = Session::load(&handle).await;
    let mut model = Model::new();
    let view = state.candidates.get_by_id(&mut model, id);
    render(view, model, &session)
}

pub(crate) async fn update_handler(
    State(state): State<WebState>,
    handle: SessionHandle,
    multipart: Multipart,
) -> Response {
    let session = Session::load(&handle).await;
    let (candidate, image) = match read_with_file(multipart, MultipartForm::candidate).await {
        Ok(parts) => parts,
        Err(err) => return bad_request(err, &session),
    };
    let mut model = Model::new();
    let view = state.candidates.update(candidate, image, &mut model);
    render(view, model, &session)
}

pub(crate) async fn delete_handler(
    State(state): State<WebState>,
    handle: SessionHandle,
    Path(id): Path<i32>,
) -> Response {
    let session = Session::load(&handle).await;
    let mut model = Model::new();
    let view = state.candidates.delete(&mut model, id);
    render(view, model, &session)
}
