//! Schema introspection.
//!
//! YDB exposes its scheme through a separate service that this crate does not
//! talk to, so the introspector reports no schemas and refuses table listing.

use crate::error::{YdbError, YdbResult};
use crate::types::PrimitiveType;
use serde::{Deserialize, Serialize};
use std::future::Future;

/// Options for table listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseMetadataOptions {
    /// Include the query builder's own bookkeeping tables.
    pub with_internal_tables: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaMetadata {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnMetadata {
    pub name: String,
    /// Declaration keyword of the column type, e.g. `Utf8`.
    pub data_type: String,
    pub is_nullable: bool,
}

impl ColumnMetadata {
    pub fn new(name: impl Into<String>, ty: PrimitiveType, is_nullable: bool) -> Self {
        Self {
            name: name.into(),
            data_type: ty.keyword().to_string(),
            is_nullable,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableMetadata {
    pub name: String,
    pub schema: Option<String>,
    pub columns: Vec<ColumnMetadata>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatabaseMetadata {
    pub tables: Vec<TableMetadata>,
}

/// Database structure discovery.
pub trait DatabaseIntrospector: Send + Sync {
    fn get_schemas(&self) -> impl Future<Output = YdbResult<Vec<SchemaMetadata>>> + Send;

    fn get_tables(
        &self,
        options: DatabaseMetadataOptions,
    ) -> impl Future<Output = YdbResult<Vec<TableMetadata>>> + Send;

    /// All tables, gathered through [`get_tables`](Self::get_tables).
    fn get_metadata(
        &self,
        options: DatabaseMetadataOptions,
    ) -> impl Future<Output = YdbResult<DatabaseMetadata>> + Send {
        let tables = self.get_tables(options);
        async move {
            Ok(DatabaseMetadata {
                tables: tables.await?,
            })
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct YdbIntrospector;

impl DatabaseIntrospector for YdbIntrospector {
    fn get_schemas(&self) -> impl Future<Output = YdbResult<Vec<SchemaMetadata>>> + Send {
        std::future::ready(Ok(Vec::new()))
    }

    fn get_tables(
        &self,
        options: DatabaseMetadataOptions,
    ) -> impl Future<Output = YdbResult<Vec<TableMetadata>>> + Send {
        tracing::debug!(
            target: "ydb_dialect.introspector",
            with_internal_tables = options.with_internal_tables,
            "table listing requested"
        );
        std::future::ready(Err(YdbError::NotImplemented("table introspection")))
    }
}
