use std::collections::BTreeMap;
use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::warn;

use super::session::Session;
use crate::board::domain::User;

/// Outcome of a controller call: a template to render or a location to redirect to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Template(&'static str),
    Redirect(&'static str),
}

/// Shared page for missing records and failed operations; expects a `message` attribute.
pub const ERROR_VIEW: View = View::Template("errors/404");

impl View {
    /// `candidates/list` for templates, `redirect:/candidates` for redirects.
    pub fn name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            View::Template(name) => f.write_str(name),
            View::Redirect(location) => write!(f, "redirect:{location}"),
        }
    }
}

/// Attributes handed to a template.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Model(BTreeMap<String, Value>);

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_attribute<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) {
        let value = serde_json::to_value(value).unwrap_or_else(|err| {
            warn!(attribute = key, error = %err, "model attribute not serializable");
            Value::Null
        });
        self.0.insert(key.to_string(), value);
    }

    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }
}

/// Put `message` on the model and route to the error page.
pub fn error_page(model: &mut Model, message: impl fmt::Display) -> View {
    let message = message.to_string();
    warn!(%message, "rendering error page");
    model.add_attribute("message", &message);
    ERROR_VIEW
}

/// Malformed submissions get the error page with a 400 status.
pub fn bad_request(message: impl fmt::Display, session: &Session) -> Response {
    let mut model = Model::new();
    let view = error_page(&mut model, message);
    render_with_status(StatusCode::BAD_REQUEST, view, model, session)
}

pub fn render(view: View, model: Model, session: &Session) -> Response {
    let status = if view == ERROR_VIEW {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::OK
    };
    render_with_status(status, view, model, session)
}

/// Templates become `{"view": ..., "model": ...}` with the session user (or a guest) under
/// `user`; redirects become `303 See Other`.
pub fn render_with_status(
    status: StatusCode,
    view: View,
    mut model: Model,
    session: &Session,
) -> Response {
    match view {
        View::Redirect(location) => Redirect::to(location).into_response(),
        View::Template(name) => {
            match session.user() {
                Some(user) => model.add_attribute("user", user),
                None => model.add_attribute("user", &User::guest()),
            }
            (status, Json(json!({ "view": name, "model": model }))).into_response()
        }
    }
}
