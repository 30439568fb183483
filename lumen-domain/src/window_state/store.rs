//! SQLite-backed window-state store.

use super::error::WindowStateError;
use lumen_core::types::{RectInt, WindowState};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Condvar, Mutex};
use std::thread::JoinHandle;
use tracing::{debug, warn};

/// A write queued for the background worker.
enum WriteOp {
    State { window_id: String, state: WindowState },
    Geometry { window_id: String, rect: RectInt },
    Stage { app_id: String, stage: i32 },
}

/// State shared between callers and the background writer.
///
/// One mutex guards the connection for all three tables. SQLite would allow
/// more concurrency, but a single lock rules out store-level corruption from
/// concurrent access at the cost of serializing all window-state I/O.
struct Shared {
    conn: Mutex<Connection>,
    /// Writes accepted but not yet executed by the worker.
    pending: Mutex<usize>,
    drained: Condvar,
}

/// Durable mapping from window/app identifier to last-known state, geometry,
/// and stage, surviving shell restarts.
///
/// Writes are dispatched to a background worker and are fire-and-forget;
/// reads are synchronous, drain pending writes first, and return the
/// caller-supplied default on any failure. Entries are only ever inserted or
/// overwritten, never implicitly deleted.
///
/// Reads must not be issued from the worker thread itself (they wait for the
/// write queue to drain).
pub struct WindowStateStore {
    shared: Arc<Shared>,
    sender: Option<Sender<WriteOp>>,
    worker: Option<JoinHandle<()>>,
}

impl WindowStateStore {
    /// Opens (or creates) the store at the given path, creating parent
    /// directories and the schema as needed.
    pub fn open(path: &Path) -> Result<Self, WindowStateError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                lumen_core::utils::fs::ensure_dir_exists(parent)?;
            }
        }
        let conn = Connection::open(path).map_err(|source| WindowStateError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Self::with_connection(conn)
    }

    /// Opens an in-memory store. Used by tests; the data does not survive
    /// the store.
    pub fn open_in_memory() -> Result<Self, WindowStateError> {
        let conn = Connection::open_in_memory().map_err(WindowStateError::Schema)?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self, WindowStateError> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS geometry (window_id TEXT UNIQUE, x INTEGER, y INTEGER, width INTEGER, height INTEGER);
             CREATE TABLE IF NOT EXISTS state (window_id TEXT UNIQUE, state INTEGER);
             CREATE TABLE IF NOT EXISTS stage (app_id TEXT UNIQUE, stage INTEGER);",
        )
        .map_err(WindowStateError::Schema)?;

        let shared = Arc::new(Shared {
            conn: Mutex::new(conn),
            pending: Mutex::new(0),
            drained: Condvar::new(),
        });
        let (sender, receiver): (Sender<WriteOp>, Receiver<WriteOp>) = channel();
        let worker_shared = Arc::clone(&shared);
        let worker = std::thread::Builder::new()
            .name("window-state-store".to_string())
            .spawn(move || {
                for op in receiver {
                    execute_write(&worker_shared, op);
                }
            })
            .map_err(WindowStateError::Worker)?;

        Ok(WindowStateStore {
            shared,
            sender: Some(sender),
            worker: Some(worker),
        })
    }

    /// Persists the window state for `window_id`. Fire-and-forget.
    pub fn save_state(&self, window_id: &str, state: WindowState) {
        self.enqueue(WriteOp::State {
            window_id: window_id.to_string(),
            state,
        });
    }

    /// Returns the stored window state for `window_id`, or `default` when
    /// absent, unreadable, or not a recognized single state.
    pub fn get_state(&self, window_id: &str, default: WindowState) -> WindowState {
        self.flush();
        let conn = self.lock_conn();
        let raw: Option<i64> = match conn
            .query_row(
                "SELECT state FROM state WHERE window_id = ?1",
                params![window_id],
                |row| row.get(0),
            )
            .optional()
        {
            Ok(value) => value,
            Err(e) => {
                warn!(window_id, error = %e, "Failed to read window state");
                return default;
            }
        };
        match raw {
            None => default,
            Some(raw) => match u32::try_from(raw).ok().and_then(WindowState::from_raw) {
                Some(state) => state,
                None => {
                    warn!(window_id, raw, "Stored window state is not a recognized value");
                    default
                }
            },
        }
    }

    /// Persists the window geometry for `window_id`. Fire-and-forget.
    pub fn save_geometry(&self, window_id: &str, rect: RectInt) {
        self.enqueue(WriteOp::Geometry {
            window_id: window_id.to_string(),
            rect,
        });
    }

    /// Returns the stored geometry for `window_id`, or `default` when
    /// absent, unreadable, or not a valid rectangle.
    pub fn get_geometry(&self, window_id: &str, default: RectInt) -> RectInt {
        self.flush();
        let conn = self.lock_conn();
        let row: Option<(i64, i64, i64, i64)> = match conn
            .query_row(
                "SELECT x, y, width, height FROM geometry WHERE window_id = ?1",
                params![window_id],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)),
            )
            .optional()
        {
            Ok(value) => value,
            Err(e) => {
                warn!(window_id, error = %e, "Failed to read window geometry");
                return default;
            }
        };
        match row {
            None => default,
            Some((x, y, width, height)) => {
                let rect = match (
                    i32::try_from(x),
                    i32::try_from(y),
                    u32::try_from(width),
                    u32::try_from(height),
                ) {
                    (Ok(x), Ok(y), Ok(width), Ok(height)) => {
                        RectInt::from_coords(x, y, width, height)
                    }
                    _ => {
                        warn!(window_id, "Stored window geometry is out of range");
                        return default;
                    }
                };
                if rect.is_valid() {
                    rect
                } else {
                    default
                }
            }
        }
    }

    /// Persists the stage for `app_id`. Fire-and-forget.
    pub fn save_stage(&self, app_id: &str, stage: i32) {
        self.enqueue(WriteOp::Stage {
            app_id: app_id.to_string(),
            stage,
        });
    }

    /// Returns the stored stage for `app_id`, or `default` when absent or
    /// unreadable.
    pub fn get_stage(&self, app_id: &str, default: i32) -> i32 {
        self.flush();
        let conn = self.lock_conn();
        match conn
            .query_row(
                "SELECT stage FROM stage WHERE app_id = ?1",
                params![app_id],
                |row| row.get::<_, i32>(0),
            )
            .optional()
        {
            Ok(Some(stage)) => stage,
            Ok(None) => default,
            Err(e) => {
                warn!(app_id, error = %e, "Failed to read stage");
                default
            }
        }
    }

    /// Blocks until every accepted write has been executed.
    ///
    /// Reads call this internally so that a read issued after a save on the
    /// same key observes the written value.
    pub fn flush(&self) {
        let mut pending = self
            .shared
            .pending
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        while *pending > 0 {
            pending = self
                .shared
                .drained
                .wait(pending)
                .unwrap_or_else(|poisoned| poisoned.into_inner());
        }
    }

    fn enqueue(&self, op: WriteOp) {
        let sender = match self.sender.as_ref() {
            Some(sender) => sender,
            // Only absent mid-drop; nothing left to write to.
            None => return,
        };
        {
            let mut pending = self
                .shared
                .pending
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            *pending += 1;
        }
        if sender.send(op).is_err() {
            warn!("Window-state writer is gone; dropping write");
            let mut pending = self
                .shared
                .pending
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            *pending -= 1;
            self.shared.drained.notify_all();
        }
    }

    fn lock_conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.shared
            .conn
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Drop for WindowStateStore {
    /// Flushes outstanding writes before closing the database, mirroring
    /// the synchronous teardown callers expect from a state store.
    fn drop(&mut self) {
        drop(self.sender.take());
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                warn!("Window-state writer panicked during shutdown");
            }
        }
    }
}

fn execute_write(shared: &Shared, op: WriteOp) {
    let result = {
        let conn = shared
            .conn
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        match &op {
            WriteOp::State { window_id, state } => conn.execute(
                "INSERT OR REPLACE INTO state (window_id, state) VALUES (?1, ?2)",
                params![window_id, state.to_raw() as i64],
            ),
            WriteOp::Geometry { window_id, rect } => conn.execute(
                "INSERT OR REPLACE INTO geometry (window_id, x, y, width, height) VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    window_id,
                    rect.x(),
                    rect.y(),
                    rect.width() as i64,
                    rect.height() as i64
                ],
            ),
            WriteOp::Stage { app_id, stage } => conn.execute(
                "INSERT OR REPLACE INTO stage (app_id, stage) VALUES (?1, ?2)",
                params![app_id, stage],
            ),
        }
    };
    match result {
        Ok(_) => debug!("Window-state write executed"),
        Err(e) => warn!(error = %e, "Window-state write failed"),
    }

    let mut pending = shared
        .pending
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *pending -= 1;
    if *pending == 0 {
        shared.drained.notify_all();
    }
}
