use crate::{
    data::{
        DataType,
        student::{Student, StudentForm},
    },
    error::{
        CreateStudentSnafu, DeleteStudentSnafu, DirectoryResult, FetchStudentSnafu,
        ListStudentsSnafu, StudentNotFoundSnafu, UpdateStudentSnafu,
    },
    extract::{JsonOrForm, StudentId},
    state::DirectoryState,
};
use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;
use snafu::{OptionExt, ResultExt, ensure};

#[derive(Serialize)]
pub struct CreatedResponse {
    message: &'static str,
    id: i64,
}

#[derive(Serialize)]
pub struct MessageResponse {
    message: String,
}

pub async fn get_students(
    State(state): State<DirectoryState>,
) -> DirectoryResult<Json<Vec<Student>>> {
    let mut conn = state.get_connection().await.context(ListStudentsSnafu)?;
    Ok(Json(Student::get_all(&mut conn).await?))
}

pub async fn post_student(
    State(state): State<DirectoryState>,
    JsonOrForm(form): JsonOrForm<StudentForm>,
) -> DirectoryResult<(StatusCode, Json<CreatedResponse>)> {
    let mut conn = state.get_connection().await.context(CreateStudentSnafu)?;
    let id = Student::insert_into_database(form, &mut conn).await?;
    info!(id, "Created student");

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            message: "Student created successfully.",
            id,
        }),
    ))
}

pub async fn get_student(
    State(state): State<DirectoryState>,
    StudentId(id): StudentId,
) -> DirectoryResult<Json<Student>> {
    let mut conn = state.get_connection().await.context(FetchStudentSnafu)?;
    let student = Student::get_from_db_by_id(&id, &mut conn)
        .await?
        .context(StudentNotFoundSnafu { id: &id })?;

    Ok(Json(student))
}

pub async fn put_student(
    State(state): State<DirectoryState>,
    StudentId(id): StudentId,
    JsonOrForm(form): JsonOrForm<StudentForm>,
) -> DirectoryResult<Json<MessageResponse>> {
    let mut conn = state.get_connection().await.context(UpdateStudentSnafu)?;
    let replaced = Student::replace_in_database(&id, form, &mut conn).await?;
    ensure!(replaced, StudentNotFoundSnafu { id });

    Ok(Json(MessageResponse {
        message: "Student updated successfully.".to_string(),
    }))
}

pub async fn delete_student(
    State(state): State<DirectoryState>,
    StudentId(id): StudentId,
) -> DirectoryResult<Json<MessageResponse>> {
    let mut conn = state.get_connection().await.context(DeleteStudentSnafu)?;
    let removed = Student::remove_from_database(&id, &mut conn).await?;
    ensure!(removed, StudentNotFoundSnafu { id: id.clone() });

    Ok(Json(MessageResponse {
        message: format!("Student with id {id} deleted successfully."),
    }))
}
