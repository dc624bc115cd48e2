use std::path::Path;

use rusqlite::{Connection, OptionalExtension, params};

use lnv_core::{CrawlHistory, Favorites, ItinerarySession, Rating, Visit};

use crate::error::{Result, StoreError};
use crate::schema;

const SESSION_KEY: &str = "itinerary_session";

pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn open(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "opening store");
        Self::with_connection(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        schema::initialize(&conn)?;
        Ok(Self { conn })
    }

    // --- Metadata ---

    pub fn get_metadata(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM metadata WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    pub fn set_metadata(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO metadata (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    // --- Favorites ---

    pub fn load_favorites(&self) -> Result<Favorites> {
        let mut stmt = self
            .conn
            .prepare("SELECT name FROM favorites ORDER BY rowid")?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<std::result::Result<Favorites, _>>()?;
        Ok(names)
    }

    /// Add or remove a favorite; returns whether it is saved afterwards.
    pub fn toggle_favorite(&self, name: &str, now: &str) -> Result<bool> {
        let removed = self
            .conn
            .execute("DELETE FROM favorites WHERE name = ?1", [name])?;
        if removed > 0 {
            tracing::debug!(name, "favorite removed");
            return Ok(false);
        }
        self.conn.execute(
            "INSERT INTO favorites (name, added_at) VALUES (?1, ?2)",
            params![name, now],
        )?;
        tracing::debug!(name, "favorite added");
        Ok(true)
    }

    // --- Crawl history ---

    pub fn load_history(&self) -> Result<CrawlHistory> {
        let mut stmt = self
            .conn
            .prepare("SELECT name, rating, visited_at FROM visits ORDER BY rowid")?;
        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, i8>(1)?,
                    row.get::<_, String>(2)?,
                ))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(name, rating, visited_at)| {
                let rating = Rating::try_from(rating).map_err(StoreError::InvalidData)?;
                Ok((name, Visit { rating, visited_at }))
            })
            .collect()
    }

    /// Replace the stored history with `history`.
    pub fn save_history(&self, history: &CrawlHistory) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM visits", [])?;
        {
            let mut insert =
                tx.prepare("INSERT INTO visits (name, rating, visited_at) VALUES (?1, ?2, ?3)")?;
            for (name, visit) in history.iter() {
                insert.execute(params![name, i8::from(visit.rating), visit.visited_at])?;
            }
        }
        tx.commit()?;
        tracing::debug!(visits = history.len(), "history saved");
        Ok(())
    }

    /// Update the rating of an already visited venue.
    pub fn set_rating(&self, name: &str, rating: Rating) -> Result<()> {
        let updated = self.conn.execute(
            "UPDATE visits SET rating = ?1 WHERE name = ?2",
            params![i8::from(rating), name],
        )?;
        if updated == 0 {
            return Err(StoreError::InvalidData(format!(
                "cannot rate {name}: not visited"
            )));
        }
        Ok(())
    }

    // --- Planner session ---

    pub fn save_session(&self, session: &ItinerarySession) -> Result<()> {
        let json = serde_json::to_string(session)?;
        self.set_metadata(SESSION_KEY, &json)?;
        tracing::info!(
            stops = session.plan().map_or(0, |p| p.stop_count()),
            locked = session.locked().len(),
            "planner session saved"
        );
        Ok(())
    }

    pub fn load_session(&self) -> Result<Option<ItinerarySession>> {
        let Some(json) = self.get_metadata(SESSION_KEY)? else {
            return Ok(None);
        };
        let session = serde_json::from_str(&json)?;
        tracing::debug!("planner session loaded");
        Ok(Some(session))
    }

    pub fn clear_session(&self) -> Result<()> {
        self.conn
            .execute("DELETE FROM metadata WHERE key = ?1", [SESSION_KEY])?;
        Ok(())
    }
}
