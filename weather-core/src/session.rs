//! Session orchestration: turns search and location intents into provider
//! calls and publishes every resulting [`SessionState`] transition.

use std::sync::{
    Arc,
    atomic::{AtomicBool, AtomicU64, Ordering},
};

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::{
    Config,
    geolocation::Geolocator,
    model::{Coordinates, Location, SessionState},
    provider::WeatherProvider,
};

/// Owns the state of one interactive session.
///
/// Requests may overlap. Each one is stamped with a generation number and
/// only the latest generation is allowed to write its results, so an older
/// response that arrives late is dropped instead of overwriting newer data.
#[derive(Debug)]
pub struct WeatherSession {
    provider: Arc<dyn WeatherProvider>,
    default_city: String,
    state: watch::Sender<SessionState>,
    generation: AtomicU64,
    initialized: AtomicBool,
}

impl WeatherSession {
    pub fn new(provider: Arc<dyn WeatherProvider>, default_city: impl Into<String>) -> Self {
        let default_city = default_city.into();
        let (state, _) = watch::channel(SessionState::new(default_city.clone()));

        Self {
            provider,
            default_city,
            state,
            generation: AtomicU64::new(0),
            initialized: AtomicBool::new(false),
        }
    }

    pub fn from_config(provider: Arc<dyn WeatherProvider>, config: &Config) -> Self {
        Self::new(provider, config.default_city.clone())
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state transition.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Loads the default city. Only the first call does anything.
    pub async fn initialize(&self) {
        if self.initialized.swap(true, Ordering::SeqCst) {
            warn!("session already initialized, ignoring");
            return;
        }
        self.request_by_city_name(&self.default_city).await;
    }

    /// Replaces the search box contents.
    pub fn set_query(&self, text: impl Into<String>) {
        let text = text.into();
        self.state.send_modify(|s| s.current_query = text);
    }

    /// Submits the search box: a non-empty query is cleared and searched for.
    pub async fn submit_query(&self) {
        let query = self.state.borrow().current_query.trim().to_string();
        if query.is_empty() {
            return;
        }

        self.state.send_modify(|s| s.current_query.clear());
        self.request_by_city_name(&query).await;
    }

    pub async fn request_by_city_name(&self, name: &str) {
        let name = name.trim();
        if name.is_empty() {
            debug!("ignoring empty city query");
            return;
        }
        self.request(Location::City(name.to_string())).await;
    }

    pub async fn request_by_coordinates(&self, lat: f64, lon: f64) {
        self.request(Location::Coordinates(Coordinates::new(lat, lon)))
            .await;
    }

    /// Asks `geolocator` for a position once and loads weather for it.
    ///
    /// A denied or unsupported lookup sets the error without touching the
    /// weather already on display.
    pub async fn request_current_location(&self, geolocator: &dyn Geolocator) {
        match geolocator.locate().await {
            Ok(coords) => self.request_by_coordinates(coords.lat, coords.lon).await,
            Err(err) => {
                warn!(%err, "geolocation failed");
                let message = err.to_string();
                self.state.send_modify(|s| {
                    // Supersedes whatever is still in flight.
                    self.generation.fetch_add(1, Ordering::SeqCst);
                    s.loading = false;
                    s.error = Some(message);
                });
            }
        }
    }

    async fn request(&self, location: Location) {
        let generation = self.begin();
        let _loading = LoadingGuard { session: self, generation };
        info!(%location, generation, "weather request started");

        let current = match self.provider.current(&location).await {
            Ok(current) => current,
            Err(err) => {
                warn!(%location, %err, "current weather request failed");
                let message = err.to_string();
                self.apply(generation, |s| {
                    s.loading = false;
                    s.error = Some(message);
                    s.current = None;
                    s.forecast = None;
                });
                return;
            }
        };

        let forecast = match self.provider.forecast(&location).await {
            Ok(forecast) => Some(forecast),
            Err(err) => {
                debug!(%location, %err, "forecast unavailable");
                None
            }
        };

        let applied = self.apply(generation, |s| {
            s.loading = false;
            s.error = None;
            s.active_city_label = current.city_name.clone();
            s.current = Some(current);
            s.forecast = forecast;
        });

        if applied {
            info!(%location, generation, "weather request finished");
        } else {
            debug!(%location, generation, "discarding superseded response");
        }
    }

    fn begin(&self) -> u64 {
        let mut generation = 0;
        self.state.send_modify(|s| {
            generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            s.loading = true;
            s.error = None;
        });
        generation
    }

    /// Applies `update` if `generation` is still the latest request.
    fn apply(&self, generation: u64, update: impl FnOnce(&mut SessionState)) -> bool {
        self.state.send_if_modified(|s| {
            if self.generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            update(s);
            true
        })
    }
}

/// Clears `loading` when a request ends on any path, including cancellation.
struct LoadingGuard<'a> {
    session: &'a WeatherSession,
    generation: u64,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        let session = self.session;
        let generation = self.generation;
        session.state.send_if_modified(|s| {
            if session.generation.load(Ordering::SeqCst) != generation || !s.loading {
                return false;
            }
            s.loading = false;
            true
        });
    }
}
