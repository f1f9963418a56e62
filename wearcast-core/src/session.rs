//! Session state: the fetch lifecycle, the bounded city history, and the
//! theme. Mutation happens only through the transitions defined here; the
//! fields stay private so no caller can put the state into an inconsistent
//! shape (e.g. an error message outside the failed status).

use crate::{
    error::UpstreamError,
    model::{CurrentWeather, WeatherObservation},
    provider::WeatherProvider,
    storage::{HISTORY_KEY, LocalStore, THEME_KEY},
};

const HISTORY_MAX: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStatus {
    Idle,
    Loading,
    Succeeded,
    Failed,
}

/// One weather-fetch lifecycle. `error()` is `Some` exactly when the status
/// is [`FetchStatus::Failed`]; the last successful observation is kept while
/// a new fetch is loading so the UI can keep rendering it.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchSession {
    data: Option<WeatherObservation>,
    status: FetchStatus,
    error: Option<String>,
}

impl Default for FetchSession {
    fn default() -> Self {
        Self { data: None, status: FetchStatus::Idle, error: None }
    }
}

impl FetchSession {
    pub fn data(&self) -> Option<&WeatherObservation> {
        self.data.as_ref()
    }

    pub fn status(&self) -> FetchStatus {
        self.status
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// A fetch was issued.
    pub fn pending(&mut self) {
        self.status = FetchStatus::Loading;
        self.error = None;
    }

    /// The fetch landed with an observation.
    pub fn fulfilled(&mut self, observation: WeatherObservation) {
        self.status = FetchStatus::Succeeded;
        self.data = Some(observation);
        self.error = None;
    }

    /// The fetch failed with a user-facing message.
    pub fn rejected(&mut self, message: impl Into<String>) {
        self.status = FetchStatus::Failed;
        self.error = Some(message.into());
    }

    /// Back to the initial state.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Most-recent-first list of searched cities, at most five, deduplicated
/// case-insensitively (the most recent casing wins).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CityHistory {
    items: Vec<String>,
}

impl CityHistory {
    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Push a city to the front, dropping any case-insensitive duplicate and
    /// trimming to the capacity. Blank input is ignored.
    pub fn add(&mut self, city: &str) {
        let city = city.trim();
        if city.is_empty() {
            return;
        }

        let lower = city.to_lowercase();
        self.items.retain(|c| c.to_lowercase() != lower);
        self.items.insert(0, city.to_string());
        self.items.truncate(HISTORY_MAX);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Read the persisted list; corrupt or absent stored JSON reads as empty.
    pub fn load(store: &LocalStore) -> Self {
        let items = store
            .get(HISTORY_KEY)
            .and_then(|raw| serde_json::from_str::<Vec<String>>(&raw).ok())
            .unwrap_or_default();

        Self { items }
    }

    pub fn save(&self, store: &LocalStore) -> anyhow::Result<()> {
        if self.items.is_empty() {
            return store.remove(HISTORY_KEY);
        }
        let raw = serde_json::to_string(&self.items)?;
        store.set(HISTORY_KEY, &raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Stored value first, then the system preference.
    pub fn initial(stored: Option<&str>, prefers_dark: bool) -> Self {
        stored
            .and_then(Theme::parse)
            .unwrap_or(if prefers_dark { Theme::Dark } else { Theme::Light })
    }

    pub fn load(store: &LocalStore, prefers_dark: bool) -> Self {
        Self::initial(store.get(THEME_KEY).as_deref(), prefers_dark)
    }

    pub fn save(self, store: &LocalStore) -> anyhow::Result<()> {
        store.set(THEME_KEY, self.as_str())
    }
}

/// The whole per-session state container handed to a presentation layer.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    pub weather: FetchSession,
    pub history: CityHistory,
    pub theme: Theme,
}

impl SessionStore {
    /// Restore history and theme from local persistence.
    pub fn restore(store: &LocalStore, prefers_dark: bool) -> Self {
        Self {
            weather: FetchSession::default(),
            history: CityHistory::load(store),
            theme: Theme::load(store, prefers_dark),
        }
    }

    /// Drive one weather-fetch lifecycle: pending, then fulfilled with the
    /// normalized observation or rejected with the error message. Weather
    /// fetches are not debounced and not cancelled; whichever terminal event
    /// arrives last is the one that sticks.
    pub async fn fetch_weather(&mut self, provider: &dyn WeatherProvider, city: &str) {
        self.weather.pending();

        match provider.current_weather(city).await {
            Ok(payload) => {
                let observation = CurrentWeather::from_value(&payload).observation();
                self.weather.fulfilled(observation);
            }
            Err(err) => self.weather.rejected(err.to_string()),
        }
    }

    /// User picked a city: record it in the history, then fetch. The history
    /// entry is added regardless of the fetch outcome.
    pub async fn select_city(&mut self, provider: &dyn WeatherProvider, city: &str) {
        self.history.add(city);
        self.fetch_weather(provider, city).await;
    }
}
