use crate::{
    data::{
        DataType,
        field::{FieldValue, bind_field},
    },
    error::{
        CreateStudentSnafu, DeleteStudentSnafu, DirectoryResult, FetchStudentSnafu,
        ListStudentsSnafu, UpdateStudentSnafu,
    },
};
use serde::{Deserialize, Serialize};
use snafu::ResultExt;
use sqlx::{FromRow, SqliteConnection};

#[derive(Serialize, FromRow, Debug, PartialEq)]
pub struct Student {
    pub id: i64,
    pub firstname: FieldValue,
    pub lastname: FieldValue,
    pub gender: FieldValue,
    pub age: FieldValue,
}

/// Body of a create or replace request.
///
/// Fields are taken as sent. Absent values are bound as `NULL` and rejected by the table's
/// `NOT NULL` constraints rather than by the extractor.
#[derive(Deserialize, Default, Debug)]
pub struct StudentForm {
    pub firstname: Option<FieldValue>,
    pub lastname: Option<FieldValue>,
    pub gender: Option<FieldValue>,
    pub age: Option<FieldValue>,
}

impl DataType for Student {
    type Id = i64;
    type FormForAdding = StudentForm;

    async fn get_from_db_by_id(
        id: &str,
        conn: &mut SqliteConnection,
    ) -> DirectoryResult<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM students WHERE id = ?")
            .bind(id)
            .fetch_optional(conn)
            .await
            .context(FetchStudentSnafu)
    }

    async fn get_all(conn: &mut SqliteConnection) -> DirectoryResult<Vec<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM students")
            .fetch_all(conn)
            .await
            .context(ListStudentsSnafu)
    }

    async fn insert_into_database(
        to_be_added: Self::FormForAdding,
        conn: &mut SqliteConnection,
    ) -> DirectoryResult<Self::Id> {
        let StudentForm {
            firstname,
            lastname,
            gender,
            age,
        } = to_be_added;

        let insert = sqlx::query(
            "INSERT INTO students (firstname, lastname, gender, age) VALUES (?, ?, ?, ?)",
        );
        let result = [firstname, lastname, gender, age]
            .into_iter()
            .fold(insert, bind_field)
            .execute(conn)
            .await
            .context(CreateStudentSnafu)?;

        Ok(result.last_insert_rowid())
    }

    async fn replace_in_database(
        id: &str,
        replacement: Self::FormForAdding,
        conn: &mut SqliteConnection,
    ) -> DirectoryResult<bool> {
        let StudentForm {
            firstname,
            lastname,
            gender,
            age,
        } = replacement;

        let update = sqlx::query(
            "UPDATE students SET firstname = ?, lastname = ?, gender = ?, age = ? WHERE id = ?",
        );
        let result = [firstname, lastname, gender, age]
            .into_iter()
            .fold(update, bind_field)
            .bind(id)
            .execute(conn)
            .await
            .context(UpdateStudentSnafu)?;

        Ok(result.rows_affected() > 0)
    }

    async fn remove_from_database(id: &str, conn: &mut SqliteConnection) -> DirectoryResult<bool> {
        let result = sqlx::query("DELETE FROM students WHERE id = ?")
            .bind(id)
            .execute(conn)
            .await
            .context(DeleteStudentSnafu)?;

        Ok(result.rows_affected() > 0)
    }
}
