//! Plain-text rendering of a weather report.

use std::fmt::Write;

use skycast_core::{
    CurrentConditions, DailySummary, ForecastEntry, format_day_label, icon_url,
    translate_description,
};

/// Whole degrees, halves rounded up and `-0` shown as `0`.
fn degrees(temp: f64) -> String {
    let rounded = (temp + 0.5).floor() + 0.0;
    format!("{rounded}°C")
}

pub fn current(current: &CurrentConditions, localize: bool) -> String {
    let description = if localize {
        translate_description(&current.description)
    } else {
        current.description.as_str()
    };

    let mut out = String::new();
    let _ = writeln!(out, "{}", current.city);
    let _ = writeln!(out, "  {}  {}", degrees(current.temperature_c), description);
    let _ = writeln!(out, "  Humidity: {}%", current.humidity_pct);
    let _ = writeln!(out, "  Wind:     {} m/s", current.wind_speed_mps);
    let _ = writeln!(out, "  Pressure: {} hPa", current.pressure_hpa);
    let _ = writeln!(out, "  Icon:     {}", icon_url(&current.icon));
    out
}

pub fn daily(days: &[DailySummary]) -> String {
    let mut out = String::from("\nForecast\n");
    for day in days {
        let _ = writeln!(
            out,
            "  {:<10}  {:>6}  {}",
            format_day_label(&day.date),
            degrees(day.temperature_c),
            icon_url(&day.icon)
        );
    }
    out
}

pub fn hourly(day: &str, entries: &[&ForecastEntry]) -> String {
    let mut out = format!("\nWeather on {}\n", format_day_label(day));

    if entries.is_empty() {
        out.push_str("  no forecast data for this day\n");
        return out;
    }

    for entry in entries {
        let _ = writeln!(
            out,
            "  {}  {:>6}  {}",
            entry.time_of_day(),
            degrees(entry.temperature_c),
            icon_url(&entry.icon)
        );
    }
    out
}
