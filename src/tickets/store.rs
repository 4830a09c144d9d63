//! File-backed ticket storage.
//!
//! The whole collection is rewritten on every mutation; writes go through a
//! temp file and an atomic rename so a crash mid-persist never leaves a
//! truncated store behind. All mutation is serialized behind a mutex.

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::sync::Mutex;

use super::{CreateTicketRequest, Ticket, TriageLog, UpdateTicketRequest};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Ticket not found: {0}")]
    NotFound(i64),
    #[error("Storage I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Storage encoding error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub struct TicketStore {
    path: PathBuf,
    tickets: Mutex<Vec<Ticket>>,
}

impl TicketStore {
    /// Loads the ticket collection from disk. A missing file is an empty
    /// store, not an error.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let tickets = load_collection(&path)?;
        Ok(Self {
            path,
            tickets: Mutex::new(tickets),
        })
    }

    /// Snapshot of all tickets in creation order.
    pub async fn all(&self) -> Vec<Ticket> {
        self.tickets.lock().await.clone()
    }

    pub async fn find(&self, id: i64) -> Option<Ticket> {
        self.tickets
            .lock()
            .await
            .iter()
            .find(|ticket| ticket.id == id)
            .cloned()
    }

    /// Completes a ticket from the submitted fields and appends it. The id
    /// is assigned under the same lock as the push, so concurrent creates
    /// cannot collide; tickets are never deleted, so len + 1 stays gap-free.
    pub async fn append(
        &self,
        req: CreateTicketRequest,
        ai_analysis: String,
    ) -> Result<Ticket, StoreError> {
        let mut tickets = self.tickets.lock().await;
        let now = Utc::now();
        let ticket = Ticket {
            id: tickets.len() as i64 + 1,
            title: req.title,
            description: req.description,
            user_email: req.user_email,
            priority: req.priority,
            status: "new".to_string(),
            assigned_to: None,
            created_at: now,
            updated_at: now,
            resolution: None,
            ai_analysis: Some(ai_analysis),
        };
        tickets.push(ticket.clone());
        persist(&self.path, &tickets)?;
        Ok(ticket)
    }

    /// Partial update of the mutable fields. Absent or empty patch fields
    /// are no-ops; `updated_at` is refreshed regardless.
    pub async fn update(
        &self,
        id: i64,
        patch: UpdateTicketRequest,
    ) -> Result<Ticket, StoreError> {
        let mut tickets = self.tickets.lock().await;
        let ticket = tickets
            .iter_mut()
            .find(|ticket| ticket.id == id)
            .ok_or(StoreError::NotFound(id))?;

        if let Some(status) = patch.status.filter(|s| !s.is_empty()) {
            ticket.status = status;
        }
        if let Some(assigned_to) = patch.assigned_to.filter(|s| !s.is_empty()) {
            ticket.assigned_to = Some(assigned_to);
        }
        if let Some(resolution) = patch.resolution.filter(|s| !s.is_empty()) {
            ticket.resolution = Some(resolution);
        }
        ticket.updated_at = Utc::now();

        let updated = ticket.clone();
        persist(&self.path, &tickets)?;
        Ok(updated)
    }
}

/// Append-only log of triage reasoning records, one file per deployment.
pub struct TriageLogStore {
    path: PathBuf,
    records: Mutex<Vec<TriageLog>>,
}

impl TriageLogStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let records = load_collection(&path)?;
        Ok(Self {
            path,
            records: Mutex::new(records),
        })
    }

    pub async fn append(&self, record: TriageLog) -> Result<(), StoreError> {
        let mut records = self.records.lock().await;
        records.push(record);
        persist(&self.path, &records)?;
        Ok(())
    }

    pub async fn for_ticket(&self, ticket_id: i64) -> Vec<TriageLog> {
        self.records
            .lock()
            .await
            .iter()
            .filter(|record| record.ticket_id == ticket_id)
            .cloned()
            .collect()
    }
}

fn load_collection<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, StoreError> {
    match fs::read_to_string(path) {
        Ok(raw) => Ok(serde_json::from_str(&raw)?),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(e.into()),
    }
}

fn persist<T: Serialize>(path: &Path, items: &[T]) -> Result<(), StoreError> {
    let raw = serde_json::to_string_pretty(items)?;
    atomic_write(path, raw.as_bytes())?;
    Ok(())
}

/// Write via temp file + rename so the store file is never half-written.
fn atomic_write(path: &Path, data: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let temp_path = path.with_extension("tmp");
    let mut file = File::create(&temp_path)?;
    file.write_all(data)?;
    file.sync_all()?;
    fs::rename(&temp_path, path)?;
    Ok(())
}
