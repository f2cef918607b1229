//! Trait definitions for query builders.

use std::future::Future;
use std::panic::Location;

use crate::compiler::{CompiledQuery, QueryCompiler, YdbQueryCompiler};
use crate::connection::{self, DatabaseConnection};
use crate::error::YdbResult;
use crate::row::FromRow;
use crate::sql::Sql;

/// Base trait for all query builders.
///
/// Provides methods for building SQL and executing queries.
pub trait SqlQb {
    /// Build the statement as a [`Sql`] fragment.
    ///
    /// Fails when the builder state is invalid (bad identifiers, empty SET, ...).
    fn build(&self) -> YdbResult<Sql>;

    /// Build and compile with the given compiler.
    fn compile_with(&self, compiler: &impl QueryCompiler) -> YdbResult<CompiledQuery> {
        compiler.compile(&self.build()?)
    }

    /// Build and compile for YDB.
    fn compile(&self) -> YdbResult<CompiledQuery> {
        self.compile_with(&YdbQueryCompiler)
    }

    /// Debug helper to get the SQL string.
    fn to_sql(&self) -> String {
        match self.compile() {
            Ok(query) => query.sql().to_string(),
            Err(e) => format!("<invalid: {e}>"),
        }
    }

    /// Execute query and map all rows to `T`.
    #[track_caller]
    fn fetch_all<T: FromRow>(
        &self,
        conn: &impl DatabaseConnection,
    ) -> impl Future<Output = YdbResult<Vec<T>>> + Send {
        connection::fetch_all_at(conn, self.compile(), Location::caller())
    }

    /// Execute query and map exactly one row to `T`.
    #[track_caller]
    fn fetch_one<T: FromRow>(
        &self,
        conn: &impl DatabaseConnection,
    ) -> impl Future<Output = YdbResult<T>> + Send {
        connection::fetch_one_at(conn, self.compile(), Location::caller())
    }

    /// Execute query and map at most one row to `T`.
    #[track_caller]
    fn fetch_opt<T: FromRow>(
        &self,
        conn: &impl DatabaseConnection,
    ) -> impl Future<Output = YdbResult<Option<T>>> + Send {
        connection::fetch_opt_at(conn, self.compile(), Location::caller())
    }
}

/// Trait for mutation builders (INSERT, UPDATE, DELETE).
pub trait MutationQb: SqlQb {
    /// Execute the statement, discarding any rows.
    #[track_caller]
    fn execute(&self, conn: &impl DatabaseConnection) -> impl Future<Output = YdbResult<()>> + Send {
        connection::execute_at(conn, self.compile(), Location::caller())
    }
}
