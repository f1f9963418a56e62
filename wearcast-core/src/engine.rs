//! The recommendation engine: pure heuristics from a weather observation to
//! a comfort score, advisory badges, outfit guidance, and a visual accent.
//!
//! Every function here is total and does no I/O. Out-of-range input is
//! clamped or defaulted, never rejected; upstream does no validation.

/// Coarse bucket for a free-text weather description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Condition {
    Snow,
    Precipitation,
    Clear,
    Cloud,
    Other,
}

impl Condition {
    /// Classify by case-insensitive substring, first match wins:
    /// snow, then rain/drizzle/thunder, then clear/sun, then cloud.
    /// Anything else (including empty input) is `Other`.
    pub fn classify(text: &str) -> Self {
        let c = text.to_lowercase();
        if c.contains("snow") {
            Condition::Snow
        } else if c.contains("rain") || c.contains("drizzle") || c.contains("thunder") {
            Condition::Precipitation
        } else if c.contains("clear") || c.contains("sun") {
            Condition::Clear
        } else if c.contains("cloud") {
            Condition::Cloud
        } else {
            Condition::Other
        }
    }
}

/// Heuristic comfort rating in [0, 100]; higher is more comfortable.
///
/// Starts at 100 and applies independent penalties for cold, heat, humidity
/// and wind. The final clamp bounds the result for any input magnitude, so
/// negative temperatures and zero or negative wind are fine.
pub fn comfort_score(temp_c: f64, humidity_pct: f64, wind_ms: f64) -> u8 {
    let mut score = 100.0;
    if temp_c < 10.0 {
        score -= (10.0 - temp_c) * 3.0;
    }
    if temp_c > 26.0 {
        score -= (temp_c - 26.0) * 3.0;
    }
    if humidity_pct > 65.0 {
        score -= (humidity_pct - 65.0) * 0.6;
    }
    score -= (wind_ms - 7.0).max(0.0) * 2.0;
    score.round().clamp(0.0, 100.0) as u8
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BadgeIcon {
    Umbrella,
    Glasses,
    Snowflake,
    Shirt,
    Wind,
}

/// One advisory chip shown next to the outfit tip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Badge {
    pub label: &'static str,
    pub icon: BadgeIcon,
}

impl Badge {
    const fn new(label: &'static str, icon: BadgeIcon) -> Self {
        Badge { label, icon }
    }
}

/// Advisory badges, gated independently and emitted in fixed check order.
/// When no gate triggers, the single fallback badge "Layer Up" is emitted.
pub fn badges(temp_c: f64, condition: Condition) -> Vec<Badge> {
    let mut out = Vec::new();
    if condition == Condition::Precipitation {
        out.push(Badge::new("Umbrella", BadgeIcon::Umbrella));
    }
    if condition == Condition::Clear {
        out.push(Badge::new("Sunglasses", BadgeIcon::Glasses));
    }
    if condition == Condition::Snow || temp_c < 12.0 {
        out.push(Badge::new("Warm Layer", BadgeIcon::Snowflake));
    }
    if temp_c >= 28.0 {
        out.push(Badge::new("Lightwear", BadgeIcon::Shirt));
    }
    if out.is_empty() {
        out.push(Badge::new("Layer Up", BadgeIcon::Wind));
    }
    out
}

/// Free-text outfit guidance. Decision table, top to bottom, first match wins.
pub fn outfit_text(temp_c: f64, condition: Condition) -> &'static str {
    match condition {
        Condition::Precipitation => {
            if temp_c < 15.0 {
                "Raincoat + warm layers. Take an umbrella."
            } else {
                "Light rain jacket. Take an umbrella."
            }
        }
        Condition::Snow => "Heavy jacket, gloves, beanie, and boots.",
        Condition::Clear => {
            if temp_c >= 30.0 {
                "T-shirt & shorts. Sunglasses and hydrate."
            } else if temp_c >= 22.0 {
                "Light shirt & jeans. Sunglasses suggested."
            } else {
                "Long sleeves or light jacket for comfort."
            }
        }
        Condition::Cloud => {
            if temp_c >= 25.0 {
                "T-shirt, breathable fabrics."
            } else if temp_c >= 18.0 {
                "Light jacket/cardigan."
            } else {
                "Sweater or jacket—could feel cool."
            }
        }
        Condition::Other => {
            if temp_c < 5.0 {
                "Thermals, coat, gloves."
            } else if temp_c < 15.0 {
                "Jacket or hoodie recommended."
            } else {
                "Comfortable casual wear."
            }
        }
    }
}

/// Visual theme accent, one-to-one with the condition bucket. Presentation
/// only; carries the gradient pairs the UI paints with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Accent {
    Frost,
    Storm,
    Sunny,
    Overcast,
    Meadow,
}

/// Background gradient pair for the two themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gradients {
    pub light: &'static str,
    pub dark: &'static str,
}

impl Accent {
    pub fn for_condition(condition: Condition) -> Self {
        match condition {
            Condition::Snow => Accent::Frost,
            Condition::Precipitation => Accent::Storm,
            Condition::Clear => Accent::Sunny,
            Condition::Cloud => Accent::Overcast,
            Condition::Other => Accent::Meadow,
        }
    }

    /// Tailwind gradient stops for the accent border/meter.
    pub fn css_class(self) -> &'static str {
        match self {
            Accent::Frost => "from-cyan-300 to-blue-500",
            Accent::Storm => "from-sky-500 to-indigo-600",
            Accent::Sunny => "from-amber-400 to-pink-500",
            Accent::Overcast => "from-slate-400 to-slate-600",
            Accent::Meadow => "from-emerald-400 to-teal-500",
        }
    }

    /// Page background gradients per theme.
    pub fn gradients(self) -> Gradients {
        match self {
            Accent::Frost => Gradients {
                light: "linear-gradient(to bottom right, #e0f2fe, #60a5fa)",
                dark: "linear-gradient(to bottom right, #0ea5e9, #1e40af)",
            },
            Accent::Storm => Gradients {
                light: "linear-gradient(to bottom right, #93c5fd, #6366f1)",
                dark: "linear-gradient(to bottom right, #1d4ed8, #4f46e5)",
            },
            Accent::Sunny => Gradients {
                light: "linear-gradient(to bottom right, #fde68a, #fb923c, #f472b6)",
                dark: "linear-gradient(to bottom right, #f59e0b, #ea580c, #9d174d)",
            },
            Accent::Overcast => Gradients {
                light: "linear-gradient(to bottom right, #cbd5e1, #64748b)",
                dark: "linear-gradient(to bottom right, #334155, #0f172a)",
            },
            Accent::Meadow => Gradients {
                light: "linear-gradient(to bottom right, #a7f3d0, #60a5fa)",
                dark: "linear-gradient(to bottom right, #0f766e, #1e3a8a)",
            },
        }
    }
}

/// Icon for the card header, picked off the raw description the way the
/// card does it: rain, then clear/sun, then snow, wind otherwise.
pub fn header_icon(condition_text: &str) -> BadgeIcon {
    let c = condition_text.to_lowercase();
    if c.contains("rain") {
        BadgeIcon::Umbrella
    } else if c.contains("clear") || c.contains("sun") {
        BadgeIcon::Glasses
    } else if c.contains("snow") {
        BadgeIcon::Snowflake
    } else {
        BadgeIcon::Wind
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comfort_baseline_has_no_penalty() {
        assert_eq!(comfort_score(26.0, 65.0, 7.0), 100);
    }

    #[test]
    fn comfort_cold_penalty_only() {
        // 100 - (10 - 5) * 3 = 85
        assert_eq!(comfort_score(5.0, 65.0, 7.0), 85);
    }

    #[test]
    fn comfort_heat_humidity_and_wind_stack() {
        // heat: (30-26)*3 = 12, humidity: (80-65)*0.6 = 9, wind: (12-7)*2 = 10
        assert_eq!(comfort_score(30.0, 80.0, 12.0), 69);
    }

    #[test]
    fn comfort_rounds_to_nearest() {
        // humidity penalty alone: (66-65)*0.6 = 0.6 -> 99.4 rounds to 99
        assert_eq!(comfort_score(20.0, 66.0, 0.0), 99);
    }

    #[test]
    fn comfort_is_bounded_for_extreme_input() {
        assert_eq!(comfort_score(-60.0, 100.0, 45.0), 0);
        assert_eq!(comfort_score(1000.0, 0.0, 0.0), 0);
        assert_eq!(comfort_score(20.0, 0.0, -3.0), 100);
        for temp in [-80.0, -10.0, 0.0, 18.0, 26.0, 40.0, 300.0] {
            for humidity in [-5.0, 0.0, 65.0, 100.0, 250.0] {
                for wind in [-1.0, 0.0, 7.0, 40.0] {
                    let s = comfort_score(temp, humidity, wind);
                    assert!(s <= 100, "score {s} out of range for ({temp}, {humidity}, {wind})");
                }
            }
        }
    }

    #[test]
    fn classify_priority_order() {
        assert_eq!(Condition::classify("Heavy Thunderstorms"), Condition::Precipitation);
        assert_eq!(Condition::classify("light snow"), Condition::Snow);
        // snow wins over rain when both appear
        assert_eq!(Condition::classify("snow and rain mix"), Condition::Snow);
        assert_eq!(Condition::classify("clear sky"), Condition::Clear);
        assert_eq!(Condition::classify("Sunny"), Condition::Clear);
        assert_eq!(Condition::classify("overcast clouds"), Condition::Cloud);
        assert_eq!(Condition::classify("haze"), Condition::Other);
        assert_eq!(Condition::classify(""), Condition::Other);
    }

    #[test]
    fn badges_for_cold_snow() {
        let labels: Vec<_> = badges(5.0, Condition::Snow).iter().map(|b| b.label).collect();
        assert!(labels.contains(&"Warm Layer"));
        assert!(!labels.contains(&"Umbrella"));
    }

    #[test]
    fn badges_for_hot_clear_day() {
        let labels: Vec<_> = badges(30.0, Condition::Clear).iter().map(|b| b.label).collect();
        assert_eq!(labels, vec!["Sunglasses", "Lightwear"]);
    }

    #[test]
    fn badges_follow_check_order_not_severity() {
        let labels: Vec<_> = badges(8.0, Condition::Precipitation).iter().map(|b| b.label).collect();
        assert_eq!(labels, vec!["Umbrella", "Warm Layer"]);
    }

    #[test]
    fn badges_fall_back_to_layer_up() {
        let out = badges(18.0, Condition::Other);
        assert_eq!(out, vec![Badge::new("Layer Up", BadgeIcon::Wind)]);
    }

    #[test]
    fn outfit_text_precipitation_split_at_15() {
        assert_eq!(outfit_text(10.0, Condition::Precipitation), "Raincoat + warm layers. Take an umbrella.");
        assert_eq!(outfit_text(16.0, Condition::Precipitation), "Light rain jacket. Take an umbrella.");
        // boundary: 15 is not < 15
        assert_eq!(outfit_text(15.0, Condition::Precipitation), "Light rain jacket. Take an umbrella.");
    }

    #[test]
    fn outfit_text_clear_bands() {
        assert_eq!(outfit_text(31.0, Condition::Clear), "T-shirt & shorts. Sunglasses and hydrate.");
        assert_eq!(outfit_text(25.0, Condition::Clear), "Light shirt & jeans. Sunglasses suggested.");
        assert_eq!(outfit_text(18.0, Condition::Clear), "Long sleeves or light jacket for comfort.");
    }

    #[test]
    fn outfit_text_cloud_bands() {
        assert_eq!(outfit_text(26.0, Condition::Cloud), "T-shirt, breathable fabrics.");
        assert_eq!(outfit_text(20.0, Condition::Cloud), "Light jacket/cardigan.");
        assert_eq!(outfit_text(10.0, Condition::Cloud), "Sweater or jacket—could feel cool.");
    }

    #[test]
    fn outfit_text_default_bands() {
        assert_eq!(outfit_text(2.0, Condition::Other), "Thermals, coat, gloves.");
        assert_eq!(outfit_text(10.0, Condition::Other), "Jacket or hoodie recommended.");
        assert_eq!(outfit_text(20.0, Condition::Other), "Comfortable casual wear.");
    }

    #[test]
    fn outfit_text_snow_ignores_temperature() {
        assert_eq!(outfit_text(-20.0, Condition::Snow), outfit_text(3.0, Condition::Snow));
    }

    #[test]
    fn accent_is_one_to_one_with_condition() {
        use Condition::*;
        let accents: Vec<_> = [Snow, Precipitation, Clear, Cloud, Other]
            .into_iter()
            .map(Accent::for_condition)
            .collect();
        assert_eq!(accents, vec![Accent::Frost, Accent::Storm, Accent::Sunny, Accent::Overcast, Accent::Meadow]);
    }

    #[test]
    fn accent_gradients_differ_per_theme() {
        for accent in [Accent::Frost, Accent::Storm, Accent::Sunny, Accent::Overcast, Accent::Meadow] {
            let g = accent.gradients();
            assert_ne!(g.light, g.dark);
        }
    }

    #[test]
    fn header_icon_matches_description() {
        assert_eq!(header_icon("light rain"), BadgeIcon::Umbrella);
        assert_eq!(header_icon("clear sky"), BadgeIcon::Glasses);
        assert_eq!(header_icon("snow"), BadgeIcon::Snowflake);
        assert_eq!(header_icon("mist"), BadgeIcon::Wind);
    }
}
