//! Type-ahead search driven from simulated keystrokes
//!
//! This example demonstrates:
//! - Building a configuration and mounting a controller
//! - Debounced fetching (only the last keystroke of a burst is sent)
//! - Selecting a suggestion and the recent-search list it updates
//!
//! By default an in-memory source is used so the example runs offline. Set
//! `GEOAHEAD_PROVIDER` (e.g. `openstreetmap`, or `mapbox` together with
//! `GEOAHEAD_API_KEY`) to query a real geocoding backend instead.

use std::{env, time::Duration};

use geoahead::{
    AutocompleteConfig, AutocompleteController, DisplayMode, LocationSuggestion, ProviderConfig,
    SuggestionSource,
};

const CITIES: &[(&str, &str, &str)] = &[
    ("London, England, United Kingdom", "51.5074", "-0.1278"),
    ("Londonderry, Northern Ireland, United Kingdom", "54.9966", "-7.3086"),
    ("Los Angeles, California, United States", "34.0522", "-118.2437"),
    ("Lisbon, Portugal", "38.7223", "-9.1393"),
];

fn offline_source() -> SuggestionSource {
    SuggestionSource::custom(|query: String| async move {
        let needle = query.to_lowercase();
        Ok(CITIES
            .iter()
            .enumerate()
            .filter(|(_, (name, _, _))| name.to_lowercase().starts_with(&needle))
            .map(|(i, (name, lat, lon))| {
                LocationSuggestion::new(format!("offline-{i}"), *name)
                    .with_coordinates(*lat, *lon)
                    .with_kind("city")
            })
            .collect())
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = geoahead::init_logging(tracing::Level::INFO);

    let mut builder = AutocompleteConfig::builder()
        .debounce_ms(200)
        .recent_searches(["Paris"]);
    builder = match env::var("GEOAHEAD_PROVIDER") {
        Ok(name) => builder
            .provider(name.parse()?)
            .provider_config(ProviderConfig::from_env()),
        Err(_) => builder.fetch_suggestions(offline_source()),
    };
    let config = builder.try_build()?;

    let controller = AutocompleteController::builder(config)
        .on_query_change(|query| println!("query -> {query:?}"))
        .on_location_select(|s| println!("selected {} ({}, {})", s.display_name, s.lat, s.lon))
        .on_recent_searches_change(|recent| println!("recent -> {recent:?}"))
        .on_error(|err| eprintln!("error: {err}"))
        .mount()?;

    controller.handle_focus();
    println!("panel on focus: {:?}", controller.display_mode());

    // A burst of keystrokes; only "Lon" is fetched
    for text in ["L", "Lo", "Lon"] {
        controller.handle_input_change(text);
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    tokio::time::sleep(Duration::from_secs(2)).await;

    let state = controller.snapshot();
    println!("{} suggestions for {:?}:", state.suggestions.len(), state.query);
    for suggestion in &state.suggestions {
        println!(
            "  {:<20} {}",
            suggestion.primary_label(),
            suggestion.secondary_label()
        );
    }

    if let Some(first) = state.suggestions.first() {
        controller.select_suggestion(first);
    }
    assert_ne!(controller.display_mode(), DisplayMode::Suggestions);
    println!("final query: {:?}", controller.handle().get_query());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_ahead_example() {
        assert!(main().is_ok(), "Type-ahead example should run successfully");
    }
}
