//! SQLite-backed employee store
//!
//! `EmployeeStore` owns the single connection used by a process. Every read
//! and write goes through it; nothing holds a connection globally.

use std::path::Path as StdPath;

use chrono::NaiveDate;
use log::{debug, info};
use rusqlite::{params, Connection, Statement};

use crate::bench::{self, QueryOutcome};
use crate::config::StoreOptions;
use crate::core::dates::{self, DateStrategy};
use crate::core::errors::{Result, StoreError};
use crate::core::record::{AgedEmployee, Employee, Gender};
use crate::storage::query::QueryPlan;

/// Name of the composite index created by `apply_optimizations`
pub const OPTIMIZATION_INDEX: &str = "idx_employees_gender_full_name";

const CREATE_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS employees (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    full_name TEXT NOT NULL,
    birth_date TEXT NOT NULL,
    gender TEXT NOT NULL
)";

const INSERT_SQL: &str = "INSERT INTO employees (full_name, birth_date, gender) VALUES (?1, ?2, ?3)";

const LIST_DISTINCT_SQL: &str = "SELECT DISTINCT full_name, birth_date, gender
    FROM employees
    ORDER BY full_name, birth_date, gender";

/// The storage gateway: one SQLite connection plus the operations on it
pub struct EmployeeStore {
    conn: Connection,
    options: StoreOptions,
    /// `cache_size` as found when the connection was opened
    initial_cache_size: i64,
}

impl EmployeeStore {
    /// Open (or create) the database file at `path`
    pub fn open<P: AsRef<StdPath>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Opening employee database at {}", path.display());
        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        let initial_cache_size: i64 = conn.pragma_query_value(None, "cache_size", |row| row.get(0))?;
        Ok(EmployeeStore {
            conn,
            options: StoreOptions::default(),
            initial_cache_size,
        })
    }

    /// Replace the store options
    pub fn with_options(mut self, options: StoreOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> StoreOptions {
        self.options
    }

    /// Close the connection, reporting any error SQLite raises while closing
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| StoreError::Storage(e))
    }

    /// Create the `employees` table if it does not exist yet
    pub fn create_schema(&self) -> Result<()> {
        self.conn.execute_batch(CREATE_TABLE_SQL)?;
        info!("Employees table is ready");
        Ok(())
    }

    /// Insert one employee in its own implicit transaction and return its id
    pub fn insert_one(&self, employee: &Employee) -> Result<i64> {
        self.conn.execute(
            INSERT_SQL,
            params![
                employee.full_name(),
                employee.birth_date_iso(),
                employee.gender().as_str()
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        debug!("Inserted employee {} as id {}", employee.full_name(), id);
        Ok(id)
    }

    /// Validate raw input and insert it.
    ///
    /// Nothing is written when validation fails.
    pub fn add_employee(&self, full_name: &str, birth_date: &str, gender: &str) -> Result<Employee> {
        let employee = Employee::parse(full_name, birth_date, gender).map_err(|e| {
            log::warn!("Rejected employee input: {}", e);
            e
        })?;
        self.insert_one(&employee)?;
        Ok(employee)
    }

    /// Insert all `employees` inside exactly one transaction.
    ///
    /// Either every row is committed or, on the first failure, the whole batch
    /// is rolled back and the error returned.
    pub fn insert_batch(&mut self, employees: &[Employee]) -> Result<usize> {
        if employees.is_empty() {
            return Ok(0);
        }

        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare_cached(INSERT_SQL)?;
            for employee in employees {
                stmt.execute(params![
                    employee.full_name(),
                    employee.birth_date_iso(),
                    employee.gender().as_str()
                ])?;
            }
        }
        tx.commit()?;

        debug!("Committed batch of {} employees", employees.len());
        Ok(employees.len())
    }

    /// Every distinct (name, birth date, gender), ordered by name, with ages
    pub fn list_all(&self) -> Result<Vec<AgedEmployee>> {
        let mut stmt = self.conn.prepare(LIST_DISTINCT_SQL)?;
        read_rows(&mut stmt, DateStrategy::Parser, dates::today())
    }

    /// Male employees with an "F" surname via `LIKE` and the general date parser
    pub fn query_filtered_naive(&self) -> Result<QueryOutcome> {
        self.query_filtered(QueryPlan::naive())
    }

    /// The same selection via `GLOB` and the fixed-format date splitter
    pub fn query_filtered_optimized(&self) -> Result<QueryOutcome> {
        self.query_filtered(QueryPlan::optimized())
    }

    /// Run the benchmark filter with `plan`, timing statement preparation,
    /// execution and row materialization
    pub fn query_filtered(&self, plan: QueryPlan) -> Result<QueryOutcome> {
        let today = dates::today();
        let outcome = bench::time_query(|| self.fetch_filtered(plan, today))?;
        debug!(
            "Plan {} matched {} rows in {:?}",
            plan,
            outcome.value.len(),
            outcome.elapsed
        );
        Ok(outcome)
    }

    fn fetch_filtered(&self, plan: QueryPlan, today: NaiveDate) -> Result<Vec<AgedEmployee>> {
        let mut stmt = self.conn.prepare(&plan.sql())?;
        read_rows(&mut stmt, plan.dates, today)
    }

    /// Raise the page cache and create the (gender, full_name) index.
    ///
    /// Safe to call repeatedly; rows are left untouched.
    pub fn apply_optimizations(&self) -> Result<()> {
        self.conn
            .pragma_update(None, "cache_size", self.options.cache_size_pages)?;
        self.conn.execute_batch(&format!(
            "CREATE INDEX IF NOT EXISTS {} ON employees(gender, full_name)",
            OPTIMIZATION_INDEX
        ))?;
        info!(
            "Applied optimizations: cache_size={} pages, index {}",
            self.options.cache_size_pages, OPTIMIZATION_INDEX
        );
        Ok(())
    }

    /// Drop the optimization index and restore the cache size found at open
    pub fn drop_optimizations(&self) -> Result<()> {
        self.conn
            .execute_batch(&format!("DROP INDEX IF EXISTS {}", OPTIMIZATION_INDEX))?;
        self.conn
            .pragma_update(None, "cache_size", self.initial_cache_size)?;
        info!("Removed optimizations");
        Ok(())
    }

    /// Whether the optimization index exists
    pub fn has_index(&self) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'index' AND name = ?1",
            [OPTIMIZATION_INDEX],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Current `PRAGMA cache_size` of the connection
    pub fn cache_size(&self) -> Result<i64> {
        Ok(self
            .conn
            .pragma_query_value(None, "cache_size", |row| row.get(0))?)
    }

    /// Number of stored rows, duplicates included
    pub fn count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM employees", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

/// Decode (full_name, birth_date, gender) rows, attaching ages as of `today`
fn read_rows(stmt: &mut Statement<'_>, dates: DateStrategy, today: NaiveDate) -> Result<Vec<AgedEmployee>> {
    let mut rows = stmt.query([])?;

    let mut employees = Vec::new();
    while let Some(row) = rows.next()? {
        employees.push(decode_row(
            row.get(0)?,
            &row.get::<_, String>(1)?,
            &row.get::<_, String>(2)?,
            dates,
            today,
        )?);
    }

    Ok(employees)
}

fn decode_row(
    full_name: String,
    birth_date: &str,
    gender: &str,
    dates: DateStrategy,
    today: NaiveDate,
) -> Result<AgedEmployee> {
    let corrupt = |what: String| StoreError::CorruptRow(format!("{} for '{}'", what, full_name));

    let birth_date = dates
        .parse(birth_date)
        .map_err(|_| corrupt(format!("birth_date '{}'", birth_date)))?;
    let gender = gender
        .parse::<Gender>()
        .map_err(|_| corrupt(format!("gender '{}'", gender)))?;
    let employee = Employee::new(full_name.clone(), birth_date, gender)
        .map_err(|_| corrupt("empty full_name".to_string()))?;

    Ok(employee.with_age_on(today))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn store() -> EmployeeStore {
        let store = EmployeeStore::open_in_memory().unwrap();
        store.create_schema().unwrap();
        store
    }

    fn employee(name: &str, date: &str, gender: &str) -> Employee {
        Employee::parse(name, date, gender).unwrap()
    }

    #[test]
    fn test_create_schema_is_idempotent() {
        let store = store();
        store.create_schema().unwrap();
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_insert_one_and_list() {
        let store = store();
        let id = store
            .insert_one(&employee("Smith John Robert", "1990-05-15", "Male"))
            .unwrap();
        assert_eq!(id, 1);

        let listed = store.list_all().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].full_name(), "Smith John Robert");
        assert_eq!(listed[0].employee.birth_date_iso(), "1990-05-15");
        assert_eq!(listed[0].age, listed[0].employee.age());
    }

    #[test]
    fn test_add_employee_rejects_invalid_input_without_writing() {
        let store = store();
        let err = store.add_employee("Smith John Robert", "1990-02-31", "Male").unwrap_err();
        assert!(err.is_validation());
        let err = store.add_employee("Smith John Robert", "1990-02-01", "Other").unwrap_err();
        assert!(err.is_validation());
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_add_employee_normalizes_gender() {
        let store = store();
        store.add_employee("Fox Ian Lee", "1970-06-30", "male").unwrap();

        let outcome = store.query_filtered_optimized().unwrap();
        assert_eq!(outcome.value.len(), 1);
        assert_eq!(outcome.value[0].employee.gender(), Gender::Male);
    }

    #[test]
    fn test_list_all_deduplicates_and_sorts() {
        let mut store = store();
        let rows = vec![
            employee("Zimmer Otto Karl", "1970-01-01", "Male"),
            employee("Adams Mary Jane", "1980-02-02", "Female"),
            employee("Zimmer Otto Karl", "1970-01-01", "Male"),
            employee("Adams Mary Jane", "1980-02-02", "Female"),
            employee("Adams Mary Jane", "1981-03-03", "Female"),
        ];
        assert_eq!(store.insert_batch(&rows).unwrap(), 5);
        assert_eq!(store.count().unwrap(), 5);

        let listed = store.list_all().unwrap();
        let names: Vec<_> = listed
            .iter()
            .map(|e| (e.full_name().to_string(), e.employee.birth_date_iso()))
            .collect();
        assert_eq!(
            names,
            vec![
                ("Adams Mary Jane".to_string(), "1980-02-02".to_string()),
                ("Adams Mary Jane".to_string(), "1981-03-03".to_string()),
                ("Zimmer Otto Karl".to_string(), "1970-01-01".to_string()),
            ]
        );
    }

    #[test]
    fn test_list_all_orders_by_raw_bytes() {
        let mut store = store();
        store
            .insert_batch(&[
                employee("adams lower case", "1980-01-01", "Male"),
                employee("Zed Upper Case", "1980-01-01", "Male"),
            ])
            .unwrap();

        let listed = store.list_all().unwrap();
        assert_eq!(listed[0].full_name(), "Zed Upper Case");
        assert_eq!(listed[1].full_name(), "adams lower case");
    }

    #[test]
    fn test_insert_batch_empty_is_noop() {
        let mut store = store();
        assert_eq!(store.insert_batch(&[]).unwrap(), 0);
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_insert_batch_is_atomic() {
        let mut store = store();
        store
            .insert_one(&employee("Existing Row Here", "1990-01-01", "Female"))
            .unwrap();
        store
            .conn
            .execute_batch(
                "CREATE TRIGGER reject_bad BEFORE INSERT ON employees
                 WHEN NEW.full_name = 'Bad Row Here'
                 BEGIN SELECT RAISE(ABORT, 'rejected'); END;",
            )
            .unwrap();

        let batch = vec![
            employee("Good Row One", "1990-01-01", "Male"),
            employee("Bad Row Here", "1990-01-01", "Male"),
            employee("Good Row Two", "1990-01-01", "Male"),
        ];
        let err = store.insert_batch(&batch).unwrap_err();
        assert!(matches!(err, StoreError::Storage(_)));
        assert_eq!(store.count().unwrap(), 1);

        // The connection is still usable after the rollback
        store
            .insert_batch(&[employee("Good Row Three", "1990-01-01", "Male")])
            .unwrap();
        assert_eq!(store.count().unwrap(), 2);
    }

    #[test]
    fn test_insert_without_schema_is_storage_error() {
        let mut store = EmployeeStore::open_in_memory().unwrap();
        let err = store
            .insert_batch(&[employee("Smith John Robert", "1990-05-15", "Male")])
            .unwrap_err();
        assert!(matches!(err, StoreError::Storage(_)));
        assert!(!err.is_validation());
    }

    #[test]
    fn test_naive_and_optimized_return_same_set() {
        let mut store = store();
        store
            .insert_batch(&[
                employee("Ferguson Mark Allan", "1985-01-01", "Male"),
                employee("Ferguson Mark Allan", "1985-01-01", "Male"),
                employee("Fisher Paul Andrew", "1979-07-04", "Male"),
                employee("Foster Anna Maria", "1992-03-12", "Female"),
                employee("Gordon Frank Ellis", "1966-11-30", "Male"),
                employee("Smith John Robert", "1990-05-15", "Male"),
            ])
            .unwrap();

        let naive = store.query_filtered_naive().unwrap();
        let optimized = store.query_filtered_optimized().unwrap();

        // Not deduplicated
        assert_eq!(naive.value.len(), 3);
        let a: HashSet<_> = naive.value.iter().map(AgedEmployee::key).collect();
        let b: HashSet<_> = optimized.value.iter().map(AgedEmployee::key).collect();
        assert_eq!(a, b);
        assert_eq!(a.len(), 2);
    }

    #[test]
    fn test_like_is_case_insensitive_glob_is_not() {
        let store = store();
        store.add_employee("ferguson mark allan", "1985-01-01", "Male").unwrap();

        assert_eq!(store.query_filtered_naive().unwrap().value.len(), 1);
        assert!(store.query_filtered_optimized().unwrap().value.is_empty());
    }

    #[test]
    fn test_apply_optimizations_is_idempotent() {
        let mut store = store();
        store
            .insert_batch(&[employee("Ferguson Mark Allan", "1985-01-01", "Male")])
            .unwrap();
        assert!(!store.has_index().unwrap());

        store.apply_optimizations().unwrap();
        store.apply_optimizations().unwrap();

        assert!(store.has_index().unwrap());
        assert_eq!(store.cache_size().unwrap(), 20_000);
        assert_eq!(store.count().unwrap(), 1);
        assert_eq!(store.query_filtered_optimized().unwrap().value.len(), 1);
    }

    #[test]
    fn test_drop_optimizations_restores_state() {
        let store = store();
        let before = store.cache_size().unwrap();

        store.apply_optimizations().unwrap();
        store.drop_optimizations().unwrap();

        assert!(!store.has_index().unwrap());
        assert_eq!(store.cache_size().unwrap(), before);
    }

    #[test]
    fn test_custom_cache_size() {
        let store = store().with_options(StoreOptions {
            cache_size_pages: 4_096,
        });
        store.apply_optimizations().unwrap();
        assert_eq!(store.cache_size().unwrap(), 4_096);
    }

    #[test]
    fn test_corrupt_row_is_reported() {
        let store = store();
        store
            .conn
            .execute(
                "INSERT INTO employees (full_name, birth_date, gender) VALUES ('Fox Ian Lee', '1990-99-01', 'Male')",
                [],
            )
            .unwrap();

        for outcome in [store.query_filtered_naive(), store.query_filtered_optimized()] {
            assert!(matches!(outcome, Err(StoreError::CorruptRow(_))));
        }
        assert!(matches!(store.list_all(), Err(StoreError::CorruptRow(_))));
    }

    #[test]
    fn test_close_releases_connection() {
        let store = store();
        store.close().unwrap();
    }
}
