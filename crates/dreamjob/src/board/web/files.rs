use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use tracing::error;

use super::WebState;
use crate::board::service::FileService;

/// Serves stored attachments as raw bytes.
pub struct FileController {
    files: Arc<dyn FileService>,
}

impl FileController {
    pub fn new(files: Arc<dyn FileService>) -> Self {
        Self { files }
    }

    pub fn get_by_id(&self, id: i32) -> Response {
        match self.files.get_file_by_id(id) {
            Ok(Some(file)) => {
                let mime = mime_guess::from_path(&file.name).first_or_octet_stream();
                (
                    StatusCode::OK,
                    [(header::CONTENT_TYPE, mime.essence_str().to_string())],
                    file.content,
                )
                    .into_response()
            }
            Ok(None) => StatusCode::NOT_FOUND.into_response(),
            Err(err) => {
                error!(file_id = id, error = %err, "failed to load file");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

pub(crate) fn routes() -> Router<WebState> {
    Router::new().route("/files/{id}", get(file_handler))
}

pub(crate) async fn file_handler(State(state): State<WebState>, Path(id): Path<i32>) -> Response {
    state.files.get_by_id(id)
}
