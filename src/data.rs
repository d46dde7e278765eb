use crate::error::DirectoryResult;
use sqlx::SqliteConnection;

pub mod field;
pub mod student;

/// Lookups take the id as it arrived in the request, the column's affinity decides whether it
/// matches.
pub trait DataType: Sized {
    type Id;
    type FormForAdding;

    async fn get_from_db_by_id(
        id: &str,
        conn: &mut SqliteConnection,
    ) -> DirectoryResult<Option<Self>>;
    async fn get_all(conn: &mut SqliteConnection) -> DirectoryResult<Vec<Self>>;
    async fn insert_into_database(
        to_be_added: Self::FormForAdding,
        conn: &mut SqliteConnection,
    ) -> DirectoryResult<Self::Id>;
    /// Returns whether a row with `id` existed to be replaced.
    async fn replace_in_database(
        id: &str,
        replacement: Self::FormForAdding,
        conn: &mut SqliteConnection,
    ) -> DirectoryResult<bool>;
    /// Returns whether a row with `id` existed to be removed.
    async fn remove_from_database(id: &str, conn: &mut SqliteConnection) -> DirectoryResult<bool>;
}
