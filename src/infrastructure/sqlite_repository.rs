// SQLite repository implementation
use crate::application::royalty_repository::RoyaltyRepository;
use crate::domain::contract::{Contract, ContractInput};
use crate::domain::royalty::{Royalty, RoyaltyInput};
use crate::domain::user::User;
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use rusqlite::{params, Connection};
use std::sync::{Mutex, MutexGuard};

pub struct SqliteRepository {
    conn: Mutex<Connection>,
}

impl SqliteRepository {
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("failed to open database at {}", path))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        Ok(Self {
            conn: Mutex::new(Connection::open_in_memory()?),
        })
    }

    /// Create the three tables if absent and seed default users into an
    /// empty users table.
    pub fn init(&self) -> Result<()> {
        let conn = self.lock()?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                username TEXT NOT NULL UNIQUE,
                password TEXT NOT NULL,
                role TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS royalties (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                amount REAL NOT NULL,
                date TEXT NOT NULL,
                recipient TEXT NOT NULL,
                status TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS contracts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                description TEXT NOT NULL,
                partyA TEXT NOT NULL,
                partyB TEXT NOT NULL,
                startDate TEXT NOT NULL,
                endDate TEXT NOT NULL
            );",
        )?;

        let user_count: i64 = conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
        if user_count == 0 {
            // Plaintext by historical accident of the schema; see DESIGN.md.
            conn.execute(
                "INSERT INTO users (username, password, role) VALUES (?1, ?2, ?3)",
                params!["admin", "password123", "admin"],
            )?;
            conn.execute(
                "INSERT INTO users (username, password, role) VALUES (?1, ?2, ?3)",
                params!["user", "password123", "user"],
            )?;
            tracing::debug!("seeded default users");
        }
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow!("database connection lock poisoned"))
    }
}

fn royalty_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Royalty> {
    Ok(Royalty {
        id: row.get(0)?,
        title: row.get(1)?,
        amount: row.get(2)?,
        date: row.get(3)?,
        recipient: row.get(4)?,
        status: row.get(5)?,
    })
}

fn contract_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Contract> {
    Ok(Contract {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        party_a: row.get(3)?,
        party_b: row.get(4)?,
        start_date: row.get(5)?,
        end_date: row.get(6)?,
    })
}

#[async_trait]
impl RoyaltyRepository for SqliteRepository {
    async fn find_user(&self, username: &str, password: &str) -> Result<Option<User>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT id, username, role FROM users WHERE username = ?1 AND password = ?2",
        )?;
        let mut rows = stmt.query_map(params![username, password], |row| {
            Ok(User {
                id: row.get(0)?,
                username: row.get(1)?,
                role: row.get(2)?,
            })
        })?;
        rows.next().transpose().map_err(Into::into)
    }

    async fn list_royalties(&self) -> Result<Vec<Royalty>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT id, title, amount, date, recipient, status FROM royalties ORDER BY id",
        )?;
        let rows = stmt.query_map([], royalty_from_row)?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(Into::into)
    }

    async fn insert_royalty(&self, input: &RoyaltyInput) -> Result<Royalty> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO royalties (title, amount, date, recipient, status)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![input.title, input.amount, input.date, input.recipient, input.status],
        )?;
        let id = conn.last_insert_rowid();
        Ok(Royalty {
            id,
            title: input.title.clone(),
            amount: input.amount,
            date: input.date.clone(),
            recipient: input.recipient.clone(),
            status: input.status.clone(),
        })
    }

    async fn update_royalty(&self, id: i64, input: &RoyaltyInput) -> Result<Option<Royalty>> {
        let conn = self.lock()?;
        let changed = conn.execute(
            "UPDATE royalties SET title = ?1, amount = ?2, date = ?3, recipient = ?4, status = ?5
             WHERE id = ?6",
            params![input.title, input.amount, input.date, input.recipient, input.status, id],
        )?;
        if changed == 0 {
            return Ok(None);
        }
        Ok(Some(Royalty {
            id,
            title: input.title.clone(),
            amount: input.amount,
            date: input.date.clone(),
            recipient: input.recipient.clone(),
            status: input.status.clone(),
        }))
    }

    async fn delete_royalty(&self, id: i64) -> Result<bool> {
        let conn = self.lock()?;
        let changed = conn.execute("DELETE FROM royalties WHERE id = ?1", params![id])?;
        Ok(changed > 0)
    }

    async fn list_contracts(&self) -> Result<Vec<Contract>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT id, title, description, partyA, partyB, startDate, endDate
             FROM contracts ORDER BY id",
        )?;
        let rows = stmt.query_map([], contract_from_row)?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(Into::into)
    }

    async fn insert_contract(&self, input: &ContractInput) -> Result<Contract> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO contracts (title, description, partyA, partyB, startDate, endDate)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                input.title,
                input.description,
                input.party_a,
                input.party_b,
                input.start_date,
                input.end_date
            ],
        )?;
        let id = conn.last_insert_rowid();
        Ok(Contract {
            id,
            title: input.title.clone(),
            description: input.description.clone(),
            party_a: input.party_a.clone(),
            party_b: input.party_b.clone(),
            start_date: input.start_date.clone(),
            end_date: input.end_date.clone(),
        })
    }

    async fn update_contract(&self, id: i64, input: &ContractInput) -> Result<Option<Contract>> {
        let conn = self.lock()?;
        let changed = conn.execute(
            "UPDATE contracts SET title = ?1, description = ?2, partyA = ?3, partyB = ?4,
             startDate = ?5, endDate = ?6 WHERE id = ?7",
            params![
                input.title,
                input.description,
                input.party_a,
                input.party_b,
                input.start_date,
                input.end_date,
                id
            ],
        )?;
        if changed == 0 {
            return Ok(None);
        }
        Ok(Some(Contract {
            id,
            title: input.title.clone(),
            description: input.description.clone(),
            party_a: input.party_a.clone(),
            party_b: input.party_b.clone(),
            start_date: input.start_date.clone(),
            end_date: input.end_date.clone(),
        }))
    }

    async fn delete_contract(&self, id: i64) -> Result<bool> {
        let conn = self.lock()?;
        let changed = conn.execute("DELETE FROM contracts WHERE id = ?1", params![id])?;
        Ok(changed > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo() -> SqliteRepository {
        let repo = SqliteRepository::open_in_memory().unwrap();
        repo.init().unwrap();
        repo
    }

    #[tokio::test]
    async fn test_init_seeds_default_users_once() {
        let repo = repo();
        // Re-running init must not duplicate the seed.
        repo.init().unwrap();

        let admin = repo.find_user("admin", "password123").await.unwrap();
        assert_eq!(admin.unwrap().role, "admin");

        let wrong = repo.find_user("admin", "admin123").await.unwrap();
        assert!(wrong.is_none());
    }

    #[tokio::test]
    async fn test_royalty_crud_round_trip() {
        let repo = repo();
        let input = RoyaltyInput {
            title: "Q1 coal royalty".to_string(),
            amount: 38400.0,
            date: "2026-03-31".to_string(),
            recipient: "Maloma Colliery".to_string(),
            status: "Pending".to_string(),
        };

        let created = repo.insert_royalty(&input).await.unwrap();
        assert_eq!(repo.list_royalties().await.unwrap().len(), 1);

        let updated = repo
            .update_royalty(
                created.id,
                &RoyaltyInput {
                    status: "Paid".to_string(),
                    ..input.clone()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.status, "Paid");

        assert!(repo.delete_royalty(created.id).await.unwrap());
        assert!(!repo.delete_royalty(created.id).await.unwrap());
        assert!(repo.list_royalties().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_missing_royalty_returns_none() {
        let repo = repo();
        let input = RoyaltyInput {
            title: "x".to_string(),
            amount: 1.0,
            date: "2026-01-01".to_string(),
            recipient: "y".to_string(),
            status: "Pending".to_string(),
        };
        assert!(repo.update_royalty(999, &input).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_contract_crud_round_trip() {
        let repo = repo();
        let input = ContractInput {
            title: "Ngwenya extraction".to_string(),
            description: "Iron ore extraction agreement".to_string(),
            party_a: "Ministry of Natural Resources".to_string(),
            party_b: "Ngwenya Mine".to_string(),
            start_date: "2025-01-01".to_string(),
            end_date: "2027-12-31".to_string(),
        };

        let created = repo.insert_contract(&input).await.unwrap();
        let listed = repo.list_contracts().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].party_b, "Ngwenya Mine");

        assert!(repo.delete_contract(created.id).await.unwrap());
        assert!(repo.list_contracts().await.unwrap().is_empty());
    }
}
