//! [`Repository`]: generic CRUD over one [`Record`] table.

use std::marker::PhantomData;

use lodge_core::{BlockStore, RecordId};
use rusqlite::types::Value;

use crate::{
  Error, Result, Store,
  encode::{decode_row, fields_of, select_list},
  engine::Row,
  record::{Fields, Mutable, Record},
};

/// CRUD façade for the table behind `R`.
///
/// Every call goes through [`Store::execute`], so writes are durable when the
/// call returns. There are no cascades: deleting a row leaves rows that
/// reference it untouched.
///
/// `update` and `delete` exist only for [`Mutable`] tables. The activity log
/// is append-only:
///
/// ```compile_fail
/// # use lodge_core::activity::ActivityLog;
/// # use lodge_store::{MemoryBlockStore, Repository, Store, StoreConfig};
/// # async fn f() {
/// let store = Store::open(MemoryBlockStore::default(), StoreConfig::default());
/// Repository::<ActivityLog, _>::new(store).delete(1).await;
/// # }
/// ```
pub struct Repository<R, B> {
  store:   Store<B>,
  columns: String,
  _record: PhantomData<fn() -> R>,
}

impl<R, B> Clone for Repository<R, B> {
  fn clone(&self) -> Self {
    Self {
      store:   self.store.clone(),
      columns: self.columns.clone(),
      _record: PhantomData,
    }
  }
}

impl<R: Record, B: BlockStore> Repository<R, B> {
  pub fn new(store: Store<B>) -> Self {
    Self { store, columns: select_list::<R>(), _record: PhantomData }
  }

  pub async fn get_all(&self) -> Result<Vec<R>> {
    let sql = format!("SELECT {} FROM {} ORDER BY id", self.columns, R::TABLE);
    self
      .store
      .execute(&sql, vec![])
      .await?
      .into_iter()
      .map(decode_row)
      .collect()
  }

  pub async fn get_by_id(&self, id: RecordId) -> Result<Option<R>> {
    let sql = format!("SELECT {} FROM {} WHERE id = ?1", self.columns, R::TABLE);
    let rows = self.store.execute(&sql, vec![Value::Integer(id)]).await?;
    first(rows).map(decode_row).transpose()
  }

  /// Insert a row and return it as stored, with its new id and any column
  /// defaults filled in.
  pub async fn create(&self, draft: R::Draft) -> Result<R> {
    let mut fields = fields_of::<R, _>(&draft)?;
    R::prepare_write(&mut fields)?;

    let sql = if fields.is_empty() {
      format!("INSERT INTO {} DEFAULT VALUES RETURNING {}", R::TABLE, self.columns)
    } else {
      let names = fields.iter().map(|(c, _)| c.name).collect::<Vec<_>>().join(", ");
      let slots = (1..=fields.len()).map(|i| format!("?{i}")).collect::<Vec<_>>().join(", ");
      format!(
        "INSERT INTO {} ({names}) VALUES ({slots}) RETURNING {}",
        R::TABLE,
        self.columns
      )
    };

    let rows = self.store.execute(&sql, values(fields)).await?;
    first(rows)
      .map(decode_row)
      .transpose()?
      .ok_or(Error::NoRowReturned { table: R::TABLE })
  }
}

impl<R: Mutable, B: BlockStore> Repository<R, B> {
  /// Write only the fields present in `patch` and return the updated row.
  ///
  /// An empty patch writes nothing. Fails with [`Error::NotFound`] if no row
  /// has this id.
  pub async fn update(&self, id: RecordId, patch: R::Patch) -> Result<R> {
    let mut fields = fields_of::<R, _>(&patch)?;
    R::prepare_write(&mut fields)?;

    if fields.is_empty() {
      return self
        .get_by_id(id)
        .await?
        .ok_or(Error::NotFound { table: R::TABLE, id });
    }

    let assignments = fields
      .iter()
      .enumerate()
      .map(|(i, (c, _))| format!("{} = ?{}", c.name, i + 1))
      .collect::<Vec<_>>()
      .join(", ");
    let sql = format!(
      "UPDATE {} SET {assignments} WHERE id = ?{} RETURNING {}",
      R::TABLE,
      fields.len() + 1,
      self.columns
    );

    let mut params = values(fields);
    params.push(Value::Integer(id));

    let rows = self.store.execute(&sql, params).await?;
    first(rows)
      .map(decode_row)
      .transpose()?
      .ok_or(Error::NotFound { table: R::TABLE, id })
  }

  /// Remove the row unconditionally. Deleting a missing id is a no-op.
  pub async fn delete(&self, id: RecordId) -> Result<()> {
    let sql = format!("DELETE FROM {} WHERE id = ?1", R::TABLE);
    self.store.execute(&sql, vec![Value::Integer(id)]).await?;
    Ok(())
  }
}

fn first(rows: Vec<Row>) -> Option<Row> { rows.into_iter().next() }

fn values(fields: Fields) -> Vec<Value> { fields.into_iter().map(|(_, v)| v).collect() }
