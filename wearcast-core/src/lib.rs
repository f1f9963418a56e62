//! Core library for the `wearcast` outfit recommender.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The upstream weather/geocoding client (proxy layer)
//! - The pure recommendation engine (comfort, badges, outfit text, accents)
//! - Session state (fetch lifecycle, city history, theme) and its persistence
//!
//! It is used by `wearcast-server` and `wearcast-cli`, but can also be reused
//! by other binaries or services.

pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod provider;
pub mod session;
pub mod storage;
pub mod suggest;

pub use config::Config;
pub use engine::{Accent, Badge, BadgeIcon, Condition, badges, comfort_score, outfit_text};
pub use error::UpstreamError;
pub use model::{CitySuggestion, CurrentWeather, WeatherObservation};
pub use provider::{OpenWeatherClient, WeatherProvider};
pub use session::{CityHistory, FetchSession, FetchStatus, SessionStore, Theme};
pub use storage::LocalStore;
pub use suggest::{SuggestOutcome, SuggestionFeed};
