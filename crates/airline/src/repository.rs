//! Generic CRUD over a single-id table.
//!
//! A [`Repository`] is built once per entity kind from the descriptors the
//! [`Entity`] supplies. Every statement is derived from those descriptors, so
//! no entity-specific SQL lives here beyond the table name and the optional
//! display join.
//!
//! ```text
//! Entity::columns() ──► TableSchema ──► INSERT / UPDATE / SELECT / DELETE
//! Entity::view_query() ─────────────────► get_all / get / delete_and_return
//! ```

use std::marker::PhantomData;

use catalog::TableSchema;
use common::{DbError, DbResult, RecordBatch};
use rusqlite::{params, params_from_iter};
use storage::Store;
use types::{EntityKind, RowId};

use crate::entity::Entity;

/// Typed repository for one entity kind, borrowing the shared store.
pub struct Repository<'c, E: Entity> {
    store: &'c Store,
    schema: TableSchema,
    id_column: &'static str,
    returning: String,
    select_raw: String,
    select_view: String,
    insert_sql: String,
    exists_sql: String,
    _entity: PhantomData<fn() -> E>,
}

impl<'c, E: Entity> Repository<'c, E> {
    pub fn new(store: &'c Store) -> DbResult<Self> {
        let schema = TableSchema::try_new(E::KIND, E::columns())?;
        let table = schema.table_name();
        let id_column = schema
            .columns()
            .next()
            .map(|(_, column)| column.bare_name())
            .ok_or_else(|| DbError::Catalog(format!("table '{table}' has no identity column")))?;

        let returning = schema
            .columns()
            .map(|(_, column)| column.bare_name())
            .collect::<Vec<_>>()
            .join(", ");
        let qualified = schema
            .columns()
            .map(|(_, column)| column.name)
            .collect::<Vec<_>>()
            .join(", ");
        let select_raw = format!("SELECT {qualified} FROM {table}");
        let select_view = E::view_query()
            .map(str::to_owned)
            .unwrap_or_else(|| select_raw.clone());

        let settable = schema
            .settable_columns()
            .map(|(_, column)| column.bare_name())
            .collect::<Vec<_>>();
        let placeholders = (1..=settable.len())
            .map(|idx| format!("?{idx}"))
            .collect::<Vec<_>>()
            .join(", ");
        let insert_sql = format!(
            "INSERT INTO {table} ({}) VALUES ({placeholders}) RETURNING {returning}",
            settable.join(", ")
        );
        let exists_sql = format!("SELECT EXISTS(SELECT 1 FROM {table} WHERE {id_column} = ?1)");

        Ok(Self {
            store,
            schema,
            id_column,
            returning,
            select_raw,
            select_view,
            insert_sql,
            exists_sql,
            _entity: PhantomData,
        })
    }

    pub fn schema(&self) -> &TableSchema {
        &self.schema
    }

    fn table(&self) -> &'static str {
        self.schema.table_name()
    }

    /// Create the table if it is missing.
    pub fn create_table(&self) -> DbResult<()> {
        self.store
            .execute_batch(E::DDL, &format!("create the {} table", self.table()))
    }

    /// Insert one row from raw text, one value per settable column in
    /// declared order, and return it with its assigned id.
    ///
    /// Values are expected to have passed their column validators already.
    pub fn insert(&self, values: &[&str]) -> DbResult<E> {
        let expected = self.schema.settable_count();
        if values.len() != expected {
            return Err(DbError::Catalog(format!(
                "{} expects {expected} values but {} were given",
                self.table(),
                values.len()
            )));
        }
        self.store.query_one(
            &self.insert_sql,
            params_from_iter(values.iter()),
            &format!("insert into {}", self.table()),
            E::from_row,
        )
    }

    /// Set one column of the row with this id and return the updated row.
    ///
    /// A missing id is a storage error; callers check [`Repository::exists`]
    /// first.
    pub fn update(&self, id: RowId, label: &str, value: &str) -> DbResult<E> {
        let column = self.schema.settable_column(label)?;
        let sql = format!(
            "UPDATE {} SET {} = ?1 WHERE {} = ?2 RETURNING {}",
            self.table(),
            column.bare_name(),
            self.id_column,
            self.returning
        );
        self.store.query_one(
            &sql,
            params![value, id],
            &format!("update {} in {}", column.bare_name(), self.table()),
            E::from_row,
        )
    }

    /// Every row in its display shape.
    pub fn get_all(&self) -> DbResult<Vec<E::View>> {
        self.store.query_rows(
            &self.select_view,
            [],
            &format!("read {}", self.table()),
            E::view_from_row,
        )
    }

    /// Display rows whose labelled column equals `value`.
    pub fn get(&self, label: &str, value: &str) -> DbResult<Vec<E::View>> {
        let column = self.schema.column(label)?;
        let sql = format!("{} WHERE {} = ?1", self.select_view, column.name);
        self.store.query_rows(
            &sql,
            [value],
            &format!("search {}", self.table()),
            E::view_from_row,
        )
    }

    /// Stored row by id.
    pub fn get_by_id(&self, id: RowId) -> DbResult<Option<E>> {
        let sql = format!("{} WHERE {} = ?1", self.select_raw, self.id_column);
        self.store.query_optional(
            &sql,
            [id],
            &format!("read {}", self.table()),
            E::from_row,
        )
    }

    /// Delete every row whose labelled column equals `value`, then read the
    /// table afresh. Cascades may have removed rows elsewhere too.
    pub fn delete_and_return(&self, label: &str, value: &str) -> DbResult<Vec<E::View>> {
        let column = self.schema.column(label)?;
        let sql = format!("DELETE FROM {} WHERE {} = ?1", self.table(), column.name);
        let removed = self.store.execute(
            &sql,
            [value],
            &format!("delete from {}", self.table()),
        )?;
        tracing::debug!(table = self.table(), removed, "deleted rows");
        self.get_all()
    }

    pub fn exists(&self, id: RowId) -> DbResult<bool> {
        self.store.exists(
            &self.exists_sql,
            [id],
            &format!("check {} existence", E::KIND.noun()),
        )
    }
}

/// Object-safe face of a repository, so callers can address any table by
/// [`EntityKind`] and get display rows back as a [`RecordBatch`].
pub trait AnyRepository {
    fn kind(&self) -> EntityKind;

    fn schema(&self) -> &TableSchema;

    fn create_table(&self) -> DbResult<()>;

    fn exists(&self, id: RowId) -> DbResult<bool>;

    /// Inserted row in its stored shape.
    fn insert_batch(&self, values: &[&str]) -> DbResult<RecordBatch>;

    /// Updated row in its stored shape.
    fn update_batch(&self, id: RowId, label: &str, value: &str) -> DbResult<RecordBatch>;

    fn get_all_batch(&self) -> DbResult<RecordBatch>;

    fn get_batch(&self, label: &str, value: &str) -> DbResult<RecordBatch>;

    fn delete_and_return_batch(&self, label: &str, value: &str) -> DbResult<RecordBatch>;
}

impl<E: Entity> AnyRepository for Repository<'_, E> {
    fn kind(&self) -> EntityKind {
        E::KIND
    }

    fn schema(&self) -> &TableSchema {
        &self.schema
    }

    fn create_table(&self) -> DbResult<()> {
        Repository::create_table(self)
    }

    fn exists(&self, id: RowId) -> DbResult<bool> {
        Repository::exists(self, id)
    }

    fn insert_batch(&self, values: &[&str]) -> DbResult<RecordBatch> {
        let row = self.insert(values)?;
        Ok(RecordBatch::from_records(&[row]))
    }

    fn update_batch(&self, id: RowId, label: &str, value: &str) -> DbResult<RecordBatch> {
        let row = self.update(id, label, value)?;
        Ok(RecordBatch::from_records(&[row]))
    }

    fn get_all_batch(&self) -> DbResult<RecordBatch> {
        Ok(RecordBatch::from_records(&self.get_all()?))
    }

    fn get_batch(&self, label: &str, value: &str) -> DbResult<RecordBatch> {
        Ok(RecordBatch::from_records(&self.get(label, value)?))
    }

    fn delete_and_return_batch(&self, label: &str, value: &str) -> DbResult<RecordBatch> {
        Ok(RecordBatch::from_records(&self.delete_and_return(label, value)?))
    }
}
