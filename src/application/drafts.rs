use crate::domain::ports::{Confirm, KeyValueStore, KeyValueStoreBox};
use crate::domain::record::ServiceRecord;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, warn};

/// Storage key of the single local draft.
pub const DRAFT_KEY: &str = "rpaFormData";

pub const RESTORE_PROMPT: &str = "Encontramos um rascunho salvo. Deseja carregá-lo?";
pub const CLEAR_PROMPT: &str = "Tem certeza que deseja limpar todos os campos?";

pub const AUTOSAVE_INTERVAL: Duration = Duration::from_secs(30);

/// Saves and restores the form draft.
///
/// Storage and serialization failures never escape: they are logged and the
/// operation degrades to "nothing saved" or "nothing found".
#[derive(Clone)]
pub struct DraftService {
    store: Arc<dyn KeyValueStore>,
}

impl DraftService {
    pub fn new(store: KeyValueStoreBox) -> Self {
        Self {
            store: Arc::from(store),
        }
    }

    /// Returns whether the draft was written.
    pub async fn save(&self, record: &ServiceRecord) -> bool {
        let bytes = match serde_json::to_vec(record) {
            Ok(bytes) => bytes,
            Err(e) => {
                error!(error = %e, "Error saving form data");
                return false;
            }
        };
        match self.store.put(DRAFT_KEY, bytes).await {
            Ok(()) => {
                info!("draft saved");
                true
            }
            Err(e) => {
                error!(error = %e, "Error saving form data");
                false
            }
        }
    }

    pub async fn load(&self) -> Option<ServiceRecord> {
        let bytes = match self.store.get(DRAFT_KEY).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return None,
            Err(e) => {
                error!(error = %e, "Error loading form data");
                return None;
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(record) => Some(record),
            Err(e) => {
                error!(error = %e, "Error loading form data");
                None
            }
        }
    }

    pub async fn clear(&self) {
        match self.store.remove(DRAFT_KEY).await {
            Ok(()) => info!("draft cleared"),
            Err(e) => error!(error = %e, "Error clearing form data"),
        }
    }

    pub async fn exists(&self) -> bool {
        self.store.contains(DRAFT_KEY).await.unwrap_or_else(|e| {
            warn!(error = %e, "could not check for a saved draft");
            false
        })
    }

    /// Loads the saved draft if there is one and the user agrees to restore it.
    pub async fn restore(&self, confirm: &impl Confirm) -> Option<ServiceRecord> {
        if !self.exists().await {
            return None;
        }
        if !confirm.confirm(RESTORE_PROMPT) {
            debug!("saved draft left untouched");
            return None;
        }
        self.load().await
    }

    /// Clears the draft once the user confirms. Returns whether it was cleared.
    pub async fn clear_confirmed(&self, confirm: &impl Confirm) -> bool {
        if !confirm.confirm(CLEAR_PROMPT) {
            return false;
        }
        self.clear().await;
        true
    }
}

/// Periodically saves the latest form state.
///
/// The caller publishes the form into a `watch` channel; on every tick the
/// current value is saved when it has any content. The first save happens one
/// full period after spawning. A zero period falls back to
/// [`AUTOSAVE_INTERVAL`].
pub struct Autosaver {
    handle: JoinHandle<()>,
    stop: oneshot::Sender<()>,
}

impl Autosaver {
    pub fn spawn(
        drafts: DraftService,
        records: watch::Receiver<ServiceRecord>,
        period: Duration,
    ) -> Self {
        let period = if period.is_zero() {
            warn!("autosave period must be positive, using the default");
            AUTOSAVE_INTERVAL
        } else {
            period
        };
        let (stop, mut stopped) = oneshot::channel();
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = &mut stopped => break,
                    _ = ticker.tick() => {
                        let record = records.borrow().clone();
                        if record.has_content() {
                            drafts.save(&record).await;
                        } else {
                            debug!("autosave skipped, form is empty");
                        }
                    }
                }
            }
        });
        Self { handle, stop }
    }

    /// Stops the task and waits for an in-flight save to finish.
    pub async fn stop(self) {
        let _ = self.stop.send(());
        if let Err(e) = self.handle.await {
            warn!(error = %e, "autosave task ended abnormally");
        }
    }
}
