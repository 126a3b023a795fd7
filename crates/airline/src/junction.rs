//! Association tables keyed by `(flight_id, member_id)`.

use std::marker::PhantomData;

use catalog::TableSchema;
use common::{DbError, DbResult};
use rusqlite::{params, params_from_iter};
use storage::Store;
use types::RowId;

use crate::entity::{Entity, Junction};

pub struct JunctionRepository<'c, J: Junction> {
    pub(crate) store: &'c Store,
    schema: TableSchema,
    pub(crate) flight_column: &'static str,
    member_column: &'static str,
    insert_sql: String,
    select_rows: String,
    select_members: String,
    _junction: PhantomData<fn() -> J>,
}

impl<'c, J: Junction> JunctionRepository<'c, J> {
    pub fn new(store: &'c Store) -> DbResult<Self> {
        let schema = TableSchema::try_new(J::KIND, J::columns())?;
        let table = schema.table_name();
        let bare = schema
            .columns()
            .map(|(_, column)| column.bare_name())
            .collect::<Vec<_>>();
        let (flight_column, member_column) = match bare.as_slice() {
            [flight, member, ..] => (*flight, *member),
            _ => {
                return Err(DbError::Catalog(format!(
                    "junction '{table}' needs a flight key and a member key"
                )));
            }
        };
        let placeholders = (1..=bare.len())
            .map(|idx| format!("?{idx}"))
            .collect::<Vec<_>>()
            .join(", ");
        let insert_sql = format!(
            "INSERT INTO {table} ({cols}) VALUES ({placeholders}) RETURNING {cols}",
            cols = bare.join(", ")
        );
        let select_rows = format!(
            "SELECT {} FROM {table}",
            schema
                .columns()
                .map(|(_, column)| column.name)
                .collect::<Vec<_>>()
                .join(", ")
        );

        let member_table = J::Member::KIND.table_name();
        let member_columns = J::Member::columns();
        let member_id = member_columns
            .first()
            .map(|(_, column)| column.name)
            .ok_or_else(|| DbError::Catalog(format!("table '{member_table}' has no columns")))?;
        let select_members = format!(
            "SELECT {} FROM {table} JOIN {member_table} ON {table}.{member_column} = {member_id} WHERE {table}.{flight_column} = ?1",
            member_columns
                .iter()
                .map(|(_, column)| column.name)
                .collect::<Vec<_>>()
                .join(", ")
        );

        Ok(Self {
            store,
            schema,
            flight_column,
            member_column,
            insert_sql,
            select_rows,
            select_members,
            _junction: PhantomData,
        })
    }

    pub fn schema(&self) -> &TableSchema {
        &self.schema
    }

    pub(crate) fn table(&self) -> &'static str {
        self.schema.table_name()
    }

    pub fn create_table(&self) -> DbResult<()> {
        self.store
            .execute_batch(J::DDL, &format!("create the {} table", self.table()))
    }

    /// Store one association.
    ///
    /// Duplicate pairs are not guarded here; callers check
    /// [`JunctionRepository::exists`] first and a duplicate surfaces as a
    /// storage error.
    pub fn insert(&self, row: &J) -> DbResult<J> {
        self.store.query_one(
            &self.insert_sql,
            params_from_iter(row.values()),
            &format!("insert into {}", self.table()),
            J::from_row,
        )
    }

    pub fn exists(&self, flight_id: RowId, member_id: RowId) -> DbResult<bool> {
        let sql = format!(
            "SELECT EXISTS(SELECT 1 FROM {} WHERE {} = ?1 AND {} = ?2)",
            self.table(),
            self.flight_column,
            self.member_column
        );
        self.store.exists(
            &sql,
            params![flight_id, member_id],
            &format!("check {} existence", J::KIND.noun()),
        )
    }

    /// Every association row.
    pub fn get_all(&self) -> DbResult<Vec<J>> {
        self.store.query_rows(
            &self.select_rows,
            [],
            &format!("read {}", self.table()),
            J::from_row,
        )
    }

    /// Association rows for one flight.
    pub fn memberships(&self, flight_id: RowId) -> DbResult<Vec<J>> {
        let sql = format!(
            "{} WHERE {}.{} = ?1",
            self.select_rows,
            self.table(),
            self.flight_column
        );
        self.store.query_rows(
            &sql,
            [flight_id],
            &format!("read {}", self.table()),
            J::from_row,
        )
    }

    /// The pilots or customers on a flight.
    pub fn get(&self, flight_id: RowId) -> DbResult<Vec<J::Member>> {
        self.store.query_rows(
            &self.select_members,
            [flight_id],
            &format!("read {}", self.table()),
            J::Member::from_row,
        )
    }

    /// Remove one association and return who is left on the flight.
    pub fn delete_and_return(&self, flight_id: RowId, member_id: RowId) -> DbResult<Vec<J::Member>> {
        let sql = format!(
            "DELETE FROM {} WHERE {} = ?1 AND {} = ?2",
            self.table(),
            self.flight_column,
            self.member_column
        );
        let removed = self.store.execute(
            &sql,
            params![flight_id, member_id],
            &format!("delete from {}", self.table()),
        )?;
        tracing::debug!(table = self.table(), flight_id, member_id, removed, "deleted association");
        self.get(flight_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FlightPassenger, FlightPilot};

    #[test]
    fn keys_come_from_the_first_two_columns() {
        let store = Store::open_in_memory().unwrap();

        let pilots = JunctionRepository::<FlightPilot>::new(&store).unwrap();
        assert_eq!(pilots.flight_column, "flight_id");
        assert_eq!(pilots.member_column, "pilot_id");
        assert_eq!(pilots.table(), "flight_pilots");

        let passengers = JunctionRepository::<FlightPassenger>::new(&store).unwrap();
        assert_eq!(passengers.member_column, "customer_id");
        assert!(passengers
            .insert_sql
            .starts_with("INSERT INTO flight_passengers (flight_id, customer_id, seat_number)"));
    }
}
