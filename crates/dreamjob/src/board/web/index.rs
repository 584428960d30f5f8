use axum::response::Response;
use axum::routing::get;
use axum::Router;

use super::view::{render, Model, View};
use super::session::{Session, SessionHandle};
use super::WebState;

pub const INDEX: View = View::Template("index");

pub(crate) fn routes() -> Router<WebState> {
    Router::new()
        .route("/", get(index_handler))
        .route("/index", get(index_handler))
}

pub(crate) async fn index_handler(handle: SessionHandle) -> Response {
    let session = Session::load(&handle).await;
    render(INDEX, Model::new(), &session)
}
