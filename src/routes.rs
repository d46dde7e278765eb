use crate::{
    routes::students::{delete_student, get_student, get_students, post_student, put_student},
    state::DirectoryState,
};
use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

pub mod students;

pub fn router(state: DirectoryState) -> Router {
    Router::new()
        .route("/students", get(get_students).post(post_student))
        .route(
            "/student/{id}",
            get(get_student).put(put_student).delete(delete_student),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
