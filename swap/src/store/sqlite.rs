//! SQLite storage implementation.
//!
//! Members live in `users`; each side of a collection has its own table
//! keyed by `(user_name, sticker_number)`.

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::{Sqlite, Transaction};
use std::collections::BTreeSet;
use std::str::FromStr;

use super::CollectionStore;
use crate::config::RuntimeConfig;
use crate::engine::data::Snapshot;
use crate::engine::entry::{Collection, ItemId, Member};
use crate::error::{Result, SwapError};

const NEEDS: &str = "needs";
const DUPLICATES: &str = "duplicates";

pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Opens (creating if needed) the database named in the config
    pub async fn connect(config: &RuntimeConfig) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(&config.database_url)?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(config.busy_timeout());
        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.run_migrations().await?;
        log::info!("collection store ready at {}", config.database_url);
        Ok(store)
    }

    /// Create an in-memory store (for testing).
    ///
    /// Every SQLite connection gets its own in-memory database, so the pool
    /// is pinned to one connection that never expires.
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.run_migrations().await?;
        Ok(store)
    }

    async fn run_migrations(&self) -> Result<()> {
        sqlx::query("CREATE TABLE IF NOT EXISTS users (name TEXT PRIMARY KEY)")
            .execute(&self.pool)
            .await?;

        for table in [NEEDS, DUPLICATES] {
            sqlx::query(&format!(
                r#"
                CREATE TABLE IF NOT EXISTS {table} (
                    user_name TEXT NOT NULL,
                    sticker_number INTEGER NOT NULL,
                    FOREIGN KEY(user_name) REFERENCES users(name),
                    PRIMARY KEY (user_name, sticker_number)
                )
                "#
            ))
            .execute(&self.pool)
            .await?;
        }
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn load_items(&self, table: &str, member: &Member) -> Result<BTreeSet<ItemId>> {
        let rows: Vec<(i64,)> = sqlx::query_as(&format!(
            "SELECT sticker_number FROM {table} WHERE user_name = ?"
        ))
        .bind(member.name())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|(value,)| to_item(member.name(), value))
            .collect()
    }

    async fn load_all_items(&self, table: &str) -> Result<Vec<(String, ItemId)>> {
        let rows: Vec<(String, i64)> = sqlx::query_as(&format!(
            "SELECT user_name, sticker_number FROM {table}"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|(name, value)| {
                let item = to_item(&name, value)?;
                Ok((name, item))
            })
            .collect()
    }
}

fn to_item(member: &str, value: i64) -> Result<ItemId> {
    ItemId::try_from(value).map_err(|_| SwapError::InvalidStoredItem {
        member: member.to_string(),
        value,
    })
}

async fn replace_items(
    tx: &mut Transaction<'_, Sqlite>,
    table: &str,
    member: &Member,
    items: &BTreeSet<ItemId>,
) -> Result<()> {
    sqlx::query(&format!("DELETE FROM {table} WHERE user_name = ?"))
        .bind(member.name())
        .execute(&mut **tx)
        .await?;

    let insert = format!("INSERT OR IGNORE INTO {table} (user_name, sticker_number) VALUES (?, ?)");
    for item in items {
        let value = i64::try_from(*item).map_err(|_| SwapError::ItemOutOfRange {
            member: member.name().to_string(),
            value: *item,
        })?;
        sqlx::query(&insert)
            .bind(member.name())
            .bind(value)
            .execute(&mut **tx)
            .await?;
    }
    Ok(())
}

#[async_trait]
impl CollectionStore for SqliteStore {
    async fn add_member(&self, member: &Member) -> Result<()> {
        sqlx::query("INSERT OR IGNORE INTO users (name) VALUES (?)")
            .bind(member.name())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn list_members(&self) -> Result<Vec<Member>> {
        let rows: Vec<(String,)> = sqlx::query_as("SELECT name FROM users ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows
            .into_iter()
            .map(|(name,)| Member::from_stored(name))
            .collect())
    }

    async fn get_collection(&self, member: &Member) -> Result<Collection> {
        Ok(Collection {
            needs: self.load_items(NEEDS, member).await?,
            duplicates: self.load_items(DUPLICATES, member).await?,
        })
    }

    async fn save_collection(&self, member: &Member, collection: &Collection) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("INSERT OR IGNORE INTO users (name) VALUES (?)")
            .bind(member.name())
            .execute(&mut *tx)
            .await?;
        replace_items(&mut tx, NEEDS, member, &collection.needs).await?;
        replace_items(&mut tx, DUPLICATES, member, &collection.duplicates).await?;

        tx.commit().await?;
        log::debug!(
            "saved {} needs and {} duplicates for {}",
            collection.needs.len(),
            collection.duplicates.len(),
            member
        );
        Ok(())
    }

    async fn get_all_data(&self) -> Result<Snapshot> {
        let mut snapshot: Snapshot = self
            .list_members()
            .await?
            .into_iter()
            .map(|member| (member, Collection::default()))
            .collect();

        for (name, item) in self.load_all_items(NEEDS).await? {
            snapshot
                .collection_mut(Member::from_stored(name))
                .needs
                .insert(item);
        }
        for (name, item) in self.load_all_items(DUPLICATES).await? {
            snapshot
                .collection_mut(Member::from_stored(name))
                .duplicates
                .insert(item);
        }
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(name: &str) -> Member {
        Member::new(name).unwrap()
    }

    #[tokio::test]
    async fn test_save_and_load_collection() {
        let store = SqliteStore::in_memory().await.unwrap();
        let alice = member("alice");

        store
            .save_collection(&alice, &Collection::new([4, 10, 55], [7]))
            .await
            .unwrap();

        let loaded = store.get_collection(&alice).await.unwrap();
        assert_eq!(loaded, Collection::new([4, 10, 55], [7]));
        assert_eq!(store.list_members().await.unwrap(), vec![alice]);
    }

    #[tokio::test]
    async fn test_save_replaces_wholesale() {
        let store = SqliteStore::in_memory().await.unwrap();
        let alice = member("alice");

        store
            .save_collection(&alice, &Collection::new([1, 2, 3], [9]))
            .await
            .unwrap();
        store
            .save_collection(&alice, &Collection::new([2], []))
            .await
            .unwrap();

        assert_eq!(
            store.get_collection(&alice).await.unwrap(),
            Collection::new([2], [])
        );
    }

    #[tokio::test]
    async fn test_out_of_range_item_keeps_previous_collection() {
        let store = SqliteStore::in_memory().await.unwrap();
        let alice = member("alice");
        store
            .save_collection(&alice, &Collection::new([1], [2]))
            .await
            .unwrap();

        let result = store
            .save_collection(&alice, &Collection::new([3], [u64::MAX]))
            .await;
        assert!(matches!(
            result,
            Err(SwapError::ItemOutOfRange { value: u64::MAX, .. })
        ));
        assert_eq!(
            store.get_collection(&alice).await.unwrap(),
            Collection::new([1], [2])
        );
    }

    #[tokio::test]
    async fn test_large_item_numbers_round_trip() {
        let store = SqliteStore::in_memory().await.unwrap();
        let alice = member("alice");
        let big = Collection::new([99_999_999_999], [crate::engine::entry::MAX_ITEM_ID]);
        store.save_collection(&alice, &big).await.unwrap();
        assert_eq!(store.get_collection(&alice).await.unwrap(), big);
    }

    #[tokio::test]
    async fn test_unknown_member_has_empty_collection() {
        let store = SqliteStore::in_memory().await.unwrap();
        let collection = store.get_collection(&member("nobody")).await.unwrap();
        assert!(collection.is_empty());
    }

    #[tokio::test]
    async fn test_add_member_is_idempotent() {
        let store = SqliteStore::in_memory().await.unwrap();
        store.add_member(&member("bob")).await.unwrap();
        store.add_member(&member("bob")).await.unwrap();
        assert_eq!(store.list_members().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_get_all_data_includes_empty_members() {
        let store = SqliteStore::in_memory().await.unwrap();
        store.add_member(&member("carol")).await.unwrap();
        store
            .save_collection(&member("alice"), &Collection::new([1, 2], [3]))
            .await
            .unwrap();
        store
            .save_collection(&member("bob"), &Collection::new([3], [1]))
            .await
            .unwrap();

        let snapshot = store.get_all_data().await.unwrap();
        assert_eq!(snapshot.len(), 3);
        assert_eq!(
            snapshot.get(&member("alice")),
            Some(&Collection::new([1, 2], [3]))
        );
        assert_eq!(snapshot.get(&member("bob")), Some(&Collection::new([3], [1])));
        assert_eq!(snapshot.get(&member("carol")), Some(&Collection::default()));
    }

    #[tokio::test]
    async fn test_connect_creates_database_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stickers.db");
        let config = RuntimeConfig {
            database_url: format!("sqlite://{}", path.display()),
            ..RuntimeConfig::new()
        };

        {
            let store = SqliteStore::connect(&config).await.unwrap();
            store
                .save_collection(&member("dave"), &Collection::new([8], [9]))
                .await
                .unwrap();
            store.pool().close().await;
        }

        let reopened = SqliteStore::connect(&config).await.unwrap();
        assert_eq!(
            reopened.get_collection(&member("dave")).await.unwrap(),
            Collection::new([8], [9])
        );
    }
}
