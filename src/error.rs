use axum::{
    Json,
    extract::rejection::{FormRejection, JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use snafu::Snafu;

pub type DirectoryResult<T> = Result<T, DirectoryError>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum DirectoryError {
    #[snafu(display("Error opening database"))]
    OpenDatabase { source: sqlx::Error },
    #[snafu(display("Error migrating DB schema"))]
    MigrateError { source: sqlx::migrate::MigrateError },
    #[snafu(display("Unable to retrieve env var `{}`", name))]
    BadEnvVar {
        source: dotenvy::Error,
        name: &'static str,
    },
    #[snafu(display("Error fetching students."))]
    ListStudents { source: sqlx::Error },
    #[snafu(display("Error creating student."))]
    CreateStudent { source: sqlx::Error },
    #[snafu(display("Error fetching student."))]
    FetchStudent { source: sqlx::Error },
    #[snafu(display("Error updating student."))]
    UpdateStudent { source: sqlx::Error },
    #[snafu(display("Error deleting student."))]
    DeleteStudent { source: sqlx::Error },
    #[snafu(display("Student not found."))]
    StudentNotFound { id: String },
    #[snafu(display("Malformed request body."))]
    MalformedJson { source: JsonRejection },
    #[snafu(display("Malformed request body."))]
    MalformedForm { source: FormRejection },
}

impl DirectoryError {
    #[allow(clippy::match_same_arms)]
    pub const fn status_code(&self) -> StatusCode {
        const ISE: StatusCode = StatusCode::INTERNAL_SERVER_ERROR; //internal server error
        const NF: StatusCode = StatusCode::NOT_FOUND; //not found
        const BI: StatusCode = StatusCode::BAD_REQUEST; //bad input

        match self {
            Self::OpenDatabase { .. } | Self::MigrateError { .. } | Self::BadEnvVar { .. } => ISE,
            Self::ListStudents { .. }
            | Self::CreateStudent { .. }
            | Self::FetchStudent { .. }
            | Self::UpdateStudent { .. }
            | Self::DeleteStudent { .. } => ISE,
            Self::StudentNotFound { .. } => NF,
            Self::MalformedJson { .. } | Self::MalformedForm { .. } => BI,
        }
    }
}

impl IntoResponse for DirectoryError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        if status_code.is_server_error() {
            error!(?self, "Error!");
        } else {
            warn!(?self, "Request rejected");
        }

        //driver detail stays in the logs, clients only get the display text
        (status_code, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_failures_are_server_errors_with_operation_messages() {
        let cases = [
            (
                DirectoryError::ListStudents {
                    source: sqlx::Error::PoolClosed,
                },
                "Error fetching students.",
            ),
            (
                DirectoryError::CreateStudent {
                    source: sqlx::Error::PoolClosed,
                },
                "Error creating student.",
            ),
            (
                DirectoryError::FetchStudent {
                    source: sqlx::Error::PoolClosed,
                },
                "Error fetching student.",
            ),
            (
                DirectoryError::UpdateStudent {
                    source: sqlx::Error::PoolClosed,
                },
                "Error updating student.",
            ),
            (
                DirectoryError::DeleteStudent {
                    source: sqlx::Error::PoolClosed,
                },
                "Error deleting student.",
            ),
        ];

        for (error, message) in cases {
            assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(error.to_string(), message);
        }
    }

    #[test]
    fn missing_student_is_not_found() {
        let error = DirectoryError::StudentNotFound {
            id: "42".to_string(),
        };
        assert_eq!(error.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(error.to_string(), "Student not found.");
    }
}
