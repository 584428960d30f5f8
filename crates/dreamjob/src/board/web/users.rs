use std::sync::Arc;

use axum::extract::rejection::FormRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use axum::routing::get;
use axum::{Form, Router};
use tracing::{error, info};

use super::form::{normalize_email, LoginForm, RegistrationForm};
use super::session::{Session, SessionHandle};
use super::view::{bad_request, error_page, render, render_with_status, Model, View};
use super::WebState;
use crate::board::domain::User;
use crate::board::service::UserService;

pub const DUPLICATE_EMAIL: &str = "User with this email already exists";
pub const BAD_CREDENTIALS: &str = "Email or password is incorrect";

const REGISTER: View = View::Template("users/register");
const LOGIN: View = View::Template("users/login");
const TO_VACANCIES: View = View::Redirect("/vacancies");
const TO_LOGIN: View = View::Redirect("/users/login");

/// Registration, login and logout.
pub struct UserController {
    users: Arc<dyn UserService>,
}

impl UserController {
    pub fn new(users: Arc<dyn UserService>) -> Self {
        Self { users }
    }

    pub fn get_registration_page(&self) -> View {
        REGISTER
    }

    pub async fn register(&self, user: User, model: &mut Model) -> View {
        match self.users.save(user).await {
            Some(saved) => {
                info!(user_id = saved.id, "user registered");
                TO_VACANCIES
            }
            None => error_page(model, DUPLICATE_EMAIL),
        }
    }

    pub fn get_login_page(&self) -> View {
        LOGIN
    }

    /// On success the user is bound to the session; otherwise the login page comes back
    /// with an `error` attribute.
    pub async fn login(&self, form: LoginForm, model: &mut Model, session: &mut Session) -> View {
        match self
            .users
            .find_by_email_and_password(&normalize_email(&form.email), &form.password)
            .await
        {
            Ok(Some(user)) => {
                session.set_user(user);
                TO_VACANCIES
            }
            Ok(None) => {
                model.add_attribute("error", BAD_CREDENTIALS);
                LOGIN
            }
            Err(err) => error_page(model, err),
        }
    }

    pub fn logout(&self, session: &mut Session) -> View {
        session.invalidate();
        TO_LOGIN
    }
}

pub(crate) fn routes() -> Router<WebState> {
    Router::new()
        .route(
            "/users/register",
            get(registration_page_handler).post(register_handler),
        )
        .route("/users/login", get(login_page_handler).post(login_handler))
        .route("/users/logout", get(logout_handler))
}

pub(crate) async fn registration_page_handler(
    State(state): State<WebState>,
    handle: SessionHandle,
) -> Response {
    let session = Session::load(&handle).await;
    render(state.users.get_registration_page(), Model::new(), &session)
}

pub(crate) async fn register_handler(
    State(state): State<WebState>,
    handle: SessionHandle,
    form: Result<Form<RegistrationForm>, FormRejection>,
) -> Response {
    let session = Session::load(&handle).await;
    let Form(form) = match form {
        Ok(form) => form,
        Err(rejection) => return bad_request(rejection.body_text(), &session),
    };
    let mut model = Model::new();
    let view = state.users.register(User::from(form), &mut model).await;
    render(view, model, &session)
}

pub(crate) async fn login_page_handler(
    State(state): State<WebState>,
    handle: SessionHandle,
) -> Response {
    let session = Session::load(&handle).await;
    render(state.users.get_login_page(), Model::new(), &session)
}

pub(crate) async fn login_handler(
    State(state): State<WebState>,
    handle: SessionHandle,
    form: Result<Form<LoginForm>, FormRejection>,
) -> Response {
    let mut session = Session::load(&handle).await;
    let Form(form) = match form {
        Ok(form) => form,
        Err(rejection) => return bad_request(rejection.body_text(), &session),
    };
    let mut model = Model::new();
    let view = state.users.login(form, &mut model, &mut session).await;
    respond_with_session(&handle, view, model, &session).await
}

pub(crate) async fn logout_handler(State(state): State<WebState>, handle: SessionHandle) -> Response {
    let mut session = Session::load(&handle).await;
    let view = state.users.logout(&mut session);
    respond_with_session(&handle, view, Model::new(), &session).await
}

async fn respond_with_session(
    handle: &SessionHandle,
    view: View,
    model: Model,
    session: &Session,
) -> Response {
    if let Err(err) = session.commit(handle).await {
        error!(error = %err, "session could not be saved");
        let mut model = Model::new();
        let view = error_page(&mut model, "Session could not be saved");
        return render_with_status(StatusCode::INTERNAL_SERVER_ERROR, view, model, session);
    }
    render(view, model, session)
}
