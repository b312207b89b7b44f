//! [`FaultyGateway`]: wraps a gateway and fails chosen calls.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bundle_fs::{ConfigPath, ConfigStorageGateway, Error, Result, StoredFile};
use tokio::sync::Notify;

/// A call seen by a [`FaultyGateway`], recorded before any fault applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Read(String),
    Write(String),
}

#[derive(Debug, Clone)]
struct WriteFault {
    /// 1-based attempt number; `None` fails every attempt
    attempt: Option<usize>,
    message: String,
}

/// Handle on a write parked by [`FaultyGateway::hold_first_write`].
#[derive(Debug, Clone)]
pub struct WriteHold {
    entered: Arc<Notify>,
    release: Arc<Notify>,
}

impl WriteHold {
    /// Resolves once the held write has been called and is parked.
    pub async fn entered(&self) {
        self.entered.notified().await;
    }

    /// Let the parked write proceed.
    pub fn release(&self) {
        self.release.notify_one();
    }
}

#[derive(Debug)]
struct HeldWrite {
    path: String,
    taken: AtomicBool,
    hold: WriteHold,
}

/// Delegates to an inner gateway, failing the calls it was told to fail.
///
/// # Example
///
/// ```rust,no_run
/// use bundle_fs::MemoryGateway;
/// use bundle_test_utils::gateway::FaultyGateway;
///
/// let gateway = FaultyGateway::new(MemoryGateway::new())
///     .fail_read("converter/alias_mapping.toml", "disk error")
///     .fail_write_attempt("config.toml", 2, "disk full");
/// ```
pub struct FaultyGateway<G> {
    inner: G,
    read_faults: HashMap<String, String>,
    write_faults: HashMap<String, WriteFault>,
    resolve_overrides: HashMap<String, String>,
    held_write: Option<HeldWrite>,
    write_attempts: Mutex<HashMap<String, usize>>,
    calls: Mutex<Vec<Call>>,
}

impl<G> FaultyGateway<G> {
    pub fn new(inner: G) -> Self {
        Self {
            inner,
            read_faults: HashMap::new(),
            write_faults: HashMap::new(),
            resolve_overrides: HashMap::new(),
            held_write: None,
            write_attempts: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Every read of `path` fails with `message`.
    pub fn fail_read(mut self, path: &str, message: &str) -> Self {
        self.read_faults.insert(path.to_string(), message.to_string());
        self
    }

    /// Every write of `path` fails with `message`.
    pub fn fail_write(mut self, path: &str, message: &str) -> Self {
        self.write_faults.insert(
            path.to_string(),
            WriteFault {
                attempt: None,
                message: message.to_string(),
            },
        );
        self
    }

    /// Only the `attempt`-th write (1-based) of `path` fails.
    pub fn fail_write_attempt(mut self, path: &str, attempt: usize, message: &str) -> Self {
        self.write_faults.insert(
            path.to_string(),
            WriteFault {
                attempt: Some(attempt),
                message: message.to_string(),
            },
        );
        self
    }

    /// Reads of `path` report `resolved` as the served path.
    pub fn resolve_as(mut self, path: &str, resolved: &str) -> Self {
        self.resolve_overrides
            .insert(path.to_string(), resolved.to_string());
        self
    }

    /// The first write of `path` parks until [`WriteHold::release`].
    pub fn hold_first_write(mut self, path: &str) -> (Self, WriteHold) {
        let hold = WriteHold {
            entered: Arc::new(Notify::new()),
            release: Arc::new(Notify::new()),
        };
        self.held_write = Some(HeldWrite {
            path: path.to_string(),
            taken: AtomicBool::new(false),
            hold: hold.clone(),
        });
        (self, hold)
    }

    pub fn inner(&self) -> &G {
        &self.inner
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Paths passed to `write`, in call order, including failed attempts.
    pub fn writes(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Write(path) => Some(path),
                Call::Read(_) => None,
            })
            .collect()
    }
}

#[async_trait]
impl<G: ConfigStorageGateway> ConfigStorageGateway for FaultyGateway<G> {
    async fn read(&self, path: &ConfigPath) -> Result<StoredFile> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Read(path.to_string()));

        if let Some(message) = self.read_faults.get(path.as_str()) {
            return Err(Error::storage(message.clone()));
        }

        let mut stored = self.inner.read(path).await?;
        if let Some(resolved) = self.resolve_overrides.get(path.as_str()) {
            stored.resolved_path = resolved.clone();
        }
        Ok(stored)
    }

    async fn write(&self, path: &ConfigPath, content: &str) -> Result<String> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Write(path.to_string()));

        let attempt = {
            let mut attempts = self.write_attempts.lock().unwrap();
            let count = attempts.entry(path.to_string()).or_insert(0);
            *count += 1;
            *count
        };

        if let Some(held) = &self.held_write {
            if held.path == path.as_str() && !held.taken.swap(true, Ordering::SeqCst) {
                held.hold.entered.notify_one();
                held.hold.release.notified().await;
            }
        }

        if let Some(fault) = self.write_faults.get(path.as_str()) {
            if fault.attempt.is_none_or(|n| n == attempt) {
                return Err(Error::storage(fault.message.clone()));
            }
        }

        self.inner.write(path, content).await
    }
}
