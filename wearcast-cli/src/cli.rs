use anyhow::Result;
use clap::{Parser, Subcommand};
use wearcast_core::{
    Config, LocalStore, Theme, WeatherObservation, WeatherProvider,
    engine::{self, Accent, Condition},
    provider::{OpenWeatherClient, provider_from_config},
    session::{FetchStatus, SessionStore},
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "wearcast", version, about = "Weather-based outfit recommender")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key.
    Configure,

    /// Show current weather and an outfit tip for a city.
    Show {
        /// City name, e.g. "Mumbai".
        city: String,
    },

    /// Look up city suggestions for a query, pick one, then show it.
    Search {
        /// Free-text city query, e.g. "spring".
        query: String,
    },

    /// Print recent searches (most recent first).
    History {
        /// Forget all recent searches.
        #[arg(long)]
        clear: bool,
    },

    /// Toggle between the light and dark theme.
    Theme,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city } => {
                let client = client()?;
                show(&client, &city).await
            }
            Command::Search { query } => search(&query).await,
            Command::History { clear } => history(clear),
            Command::Theme => toggle_theme(),
        }
    }
}

fn client() -> Result<OpenWeatherClient> {
    let config = Config::load()?;
    provider_from_config(&config)
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let api_key =
        inquire::Password::new("OpenWeather API key:").without_confirmation().prompt()?;
    config.set_api_key(api_key.trim().to_string());
    config.save()?;

    println!("Saved to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn show(provider: &dyn WeatherProvider, city: &str) -> Result<()> {
    let store = LocalStore::open()?;
    let mut session = SessionStore::restore(&store, false);

    session.select_city(provider, city).await;
    session.history.save(&store)?;

    if session.weather.status() == FetchStatus::Failed {
        // inline failure text, same as the UI banner
        println!("{}", session.weather.error().unwrap_or("Something went wrong"));
        return Ok(());
    }

    if let Some(observation) = session.weather.data() {
        print_card(observation, session.theme);
    }
    Ok(())
}

async fn search(query: &str) -> Result<()> {
    let client = client()?;

    let suggestions = client.suggest_cities(query).await?;
    if suggestions.is_empty() {
        println!("No results found");
        return Ok(());
    }

    let options: Vec<String> = suggestions.iter().map(|s| s.display()).collect();
    let picked = inquire::Select::new("Pick a city:", options).prompt()?;

    show(&client, &picked).await
}

fn history(clear: bool) -> Result<()> {
    let store = LocalStore::open()?;
    let mut session = SessionStore::restore(&store, false);

    if clear {
        session.history.clear();
        session.history.save(&store)?;
        println!("History cleared");
        return Ok(());
    }

    if session.history.is_empty() {
        println!("No recent searches");
        return Ok(());
    }
    for city in session.history.items() {
        println!("{city}");
    }
    Ok(())
}

fn toggle_theme() -> Result<()> {
    let store = LocalStore::open()?;
    let theme = Theme::load(&store, false).toggle();
    theme.save(&store)?;

    println!("Theme: {}", theme.as_str());
    Ok(())
}

fn print_card(observation: &WeatherObservation, theme: Theme) {
    let condition = Condition::classify(&observation.condition);
    let score = engine::comfort_score(
        observation.temperature_c,
        observation.humidity_pct,
        observation.wind_speed_ms,
    );

    println!("{} — {}", observation.city, observation.condition);
    println!(
        "  {:.1}°C (feels like {:.1}°C) · humidity {:.0}% · wind {:.0} m/s",
        observation.temperature_c,
        observation.feels_like_c,
        observation.humidity_pct,
        observation.wind_speed_ms
    );
    println!("  Comfort: {score}% [{}]", meter(score));
    println!("  Outfit tip: {}", engine::outfit_text(observation.temperature_c, condition));

    let labels: Vec<&str> =
        engine::badges(observation.temperature_c, condition).iter().map(|b| b.label).collect();
    println!("  Badges: {}", labels.join(" · "));

    let gradients = Accent::for_condition(condition).gradients();
    let background = match theme {
        Theme::Dark => gradients.dark,
        Theme::Light => gradients.light,
    };
    println!("  Background: {background}");
}

fn meter(score: u8) -> String {
    const WIDTH: usize = 20;
    let filled = (usize::from(score) * WIDTH) / 100;
    format!("{}{}", "#".repeat(filled), "-".repeat(WIDTH - filled))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meter_spans_the_whole_range() {
        assert_eq!(meter(0), "-".repeat(20));
        assert_eq!(meter(100), "#".repeat(20));
        assert_eq!(meter(50), format!("{}{}", "#".repeat(10), "-".repeat(10)));
    }
}
