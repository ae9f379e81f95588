use super::dto::PincodeLookupView;
use super::policy::{LookupConfig, ManualOverridePolicy};
use crate::domain::geo::{
    GeoError, GeoState, LookupError, PINCODE_LEN, Pincode, PostalAddress, PostalLookup, Region,
};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

/// Resolves pincodes to state and city for one form session and arbitrates
/// between looked-up and manually entered values.
///
/// Every `set_pincode` call issues a new sequence number. A lookup result is
/// applied only if it carries the latest number and the resolver has not been
/// shut down, so a slow response can never overwrite a newer pincode.
///
/// State and city can be edited only while [`GeoState::is_editable`] holds.
/// Editing a locked field is rejected with [`GeoError::Locked`].
pub struct PincodeResolver {
    lookup: Arc<dyn PostalLookup>,
    config: LookupConfig,
    shared: Arc<Shared>,
    in_flight: Mutex<Option<JoinHandle<()>>>,
    runtime: Handle,
}

/// State shared with resolution tasks. `latest` and `closed` are only written
/// inside the watch channel's modify closures, which serializes them with
/// every read-check-write of the geo state.
struct Shared {
    geo: watch::Sender<GeoState>,
    latest: AtomicU64,
    closed: AtomicBool,
}

enum PincodeChange {
    Unchanged,
    Cleared,
    Resolve(u64),
}

impl PincodeResolver {
    /// # Errors
    ///
    /// `NoRuntime` when called outside a tokio runtime.
    pub fn new(lookup: Arc<dyn PostalLookup>, config: LookupConfig) -> Result<Self, GeoError> {
        let runtime = Handle::try_current().map_err(|_| GeoError::NoRuntime)?;
        let (geo, _) = watch::channel(GeoState::default());

        Ok(Self {
            lookup,
            config,
            shared: Arc::new(Shared {
                geo,
                latest: AtomicU64::new(0),
                closed: AtomicBool::new(false),
            }),
            in_flight: Mutex::new(None),
            runtime,
        })
    }

    pub fn state(&self) -> GeoState {
        self.shared.geo.borrow().clone()
    }

    pub fn snapshot(&self) -> PincodeLookupView {
        PincodeLookupView::from(&*self.shared.geo.borrow())
    }

    /// Change feed for presentation layers that redraw on update.
    pub fn subscribe(&self) -> watch::Receiver<GeoState> {
        self.shared.geo.subscribe()
    }

    /// Waits until no resolution is in flight and returns the view at that point.
    pub async fn settled(&self) -> PincodeLookupView {
        let mut rx = self.shared.geo.subscribe();
        match rx.wait_for(|geo| !geo.is_loading).await {
            Ok(geo) => PincodeLookupView::from(&*geo),
            Err(_) => self.snapshot(),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.shared.closed.load(Ordering::Acquire)
    }

    /// Accepts the sanitized pincode input (at most six ASCII digits).
    ///
    /// Fewer than six digits clears state, city, error and the manual flag and
    /// cancels any lookup. Six digits starts a new lookup. Repeating the
    /// current value is a no-op.
    ///
    /// # Errors
    ///
    /// `InvalidPincode` for anything but up to six digits, `Closed` after
    /// [`shutdown`](Self::shutdown).
    #[instrument(skip(self))]
    pub fn set_pincode(&self, value: &str) -> Result<(), GeoError> {
        if value.len() > PINCODE_LEN || !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(GeoError::InvalidPincode(value.to_string()));
        }
        let complete = if value.len() == PINCODE_LEN {
            let pincode =
                Pincode::new(value).map_err(|_| GeoError::InvalidPincode(value.to_string()))?;
            Some(pincode)
        } else {
            None
        };

        // Held until the new task is stored, so concurrent callers swap
        // handles in the same order they took sequence numbers.
        let mut in_flight = self.lock_in_flight();

        let mut change = Err(GeoError::Closed);
        self.shared.geo.send_if_modified(|geo| {
            if self.shared.closed.load(Ordering::Acquire) {
                return false;
            }
            if geo.pincode == value {
                change = Ok(PincodeChange::Unchanged);
                return false;
            }

            let seq = self.shared.latest.fetch_add(1, Ordering::AcqRel) + 1;
            geo.pincode = value.to_string();
            geo.error = None;
            if complete.is_some() {
                geo.is_loading = true;
                change = Ok(PincodeChange::Resolve(seq));
            } else {
                geo.state = None;
                geo.city.clear();
                geo.is_loading = false;
                geo.is_manual = false;
                change = Ok(PincodeChange::Cleared);
            }
            true
        });

        let next = match change? {
            PincodeChange::Unchanged => return Ok(()),
            PincodeChange::Cleared => None,
            PincodeChange::Resolve(seq) => {
                complete.map(|pincode| self.spawn_resolution(pincode, seq))
            }
        };
        if let Some(previous) = std::mem::replace(&mut *in_flight, next) {
            previous.abort();
        }
        Ok(())
    }

    /// Manual state override.
    ///
    /// # Errors
    ///
    /// `Locked` unless the fields are editable, `Closed` after shutdown.
    pub fn set_state(&self, region: Region) -> Result<(), GeoError> {
        self.edit(|geo| geo.state = Some(region))
    }

    /// Manual city override.
    ///
    /// # Errors
    ///
    /// `Locked` unless the fields are editable, `Closed` after shutdown.
    pub fn set_city(&self, city: &str) -> Result<(), GeoError> {
        let city = city.to_string();
        self.edit(move |geo| geo.city = city)
    }

    /// Ends the session: the in-flight lookup is aborted and no later result
    /// or command changes the state.
    pub fn shutdown(&self) {
        let closed_now = self.shared.geo.send_if_modified(|geo| {
            if self.shared.closed.swap(true, Ordering::AcqRel) {
                return false;
            }
            geo.is_loading = false;
            true
        });
        self.cancel_in_flight();
        if closed_now {
            debug!("pincode resolver shut down");
        }
    }

    fn edit(&self, apply: impl FnOnce(&mut GeoState)) -> Result<(), GeoError> {
        let mut result = Err(GeoError::Closed);
        self.shared.geo.send_if_modified(|geo| {
            if self.shared.closed.load(Ordering::Acquire) {
                return false;
            }
            if !geo.is_editable() {
                result = Err(GeoError::Locked);
                return false;
            }
            apply(geo);
            geo.is_manual = true;
            result = Ok(());
            true
        });
        result
    }

    fn spawn_resolution(&self, pincode: Pincode, seq: u64) -> JoinHandle<()> {
        let policy = self.config.manual_override;
        let lookup = Arc::clone(&self.lookup);
        let shared = Arc::clone(&self.shared);
        let config = self.config;
        self.runtime.spawn(async move {
            let outcome = resolve_with_retry(lookup.as_ref(), &pincode, &config).await;
            let failure = outcome.as_ref().err().map(ToString::to_string);
            if !shared.complete(seq, outcome, policy) {
                debug!(%pincode, seq, "discarded stale pincode resolution");
            } else if let Some(error) = failure {
                warn!(%pincode, %error, "pincode resolution failed");
            } else {
                info!(%pincode, "pincode resolved");
            }
        })
    }

    fn cancel_in_flight(&self) {
        if let Some(handle) = self.lock_in_flight().take() {
            handle.abort();
        }
    }

    fn lock_in_flight(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.in_flight.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for PincodeResolver {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl Shared {
    /// Applies a finished lookup. Returns false and leaves the state alone if
    /// `seq` is not the latest issued request or the resolver is closed.
    fn complete(
        &self,
        seq: u64,
        outcome: Result<PostalAddress, LookupError>,
        policy: ManualOverridePolicy,
    ) -> bool {
        self.geo.send_if_modified(|geo| {
            if self.closed.load(Ordering::Acquire) || self.latest.load(Ordering::Acquire) != seq {
                return false;
            }

            geo.is_loading = false;
            match outcome {
                Ok(_) if geo.is_manual && policy == ManualOverridePolicy::Preserve => {
                    geo.error = None;
                }
                Ok(address) => {
                    geo.state = Some(address.state);
                    geo.city = address.city;
                    geo.error = None;
                    geo.is_manual = false;
                }
                Err(err) => {
                    if !geo.is_manual {
                        geo.state = None;
                        geo.city.clear();
                    }
                    geo.error = Some(err.to_string());
                }
            }
            true
        })
    }
}

/// One lookup under the configured timeout and retry policy.
async fn resolve_with_retry(
    lookup: &dyn PostalLookup,
    pincode: &Pincode,
    config: &LookupConfig,
) -> Result<PostalAddress, LookupError> {
    let timeout_ms = u64::try_from(config.timeout.as_millis()).unwrap_or(u64::MAX);
    let mut attempt = 0;

    loop {
        let outcome = tokio::time::timeout(config.timeout, lookup.resolve(pincode))
            .await
            .unwrap_or(Err(LookupError::Timeout(timeout_ms)));

        match outcome {
            Err(err) if err.is_retryable() && attempt < config.retry.max_retries => {
                let delay = config.retry.backoff_for(attempt);
                warn!(%pincode, attempt = attempt + 1, ?delay, error = %err, "retrying pincode lookup");
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            other => return other,
        }
    }
}
