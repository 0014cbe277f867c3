//! Output formatting for command results.

use std::io::{self, Write};

use clap::ValueEnum;
use serde::Serialize;

use flightpath_lib::{Location, RouteSummary};

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Render a route summary to stdout.
pub fn render_route(summary: &RouteSummary, format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Text => {
            print!("{}", summary.render_text());
            Ok(())
        }
        OutputFormat::Json => render_json(summary),
    }
}

/// Render airport details to stdout.
pub fn render_airport(location: &Location, format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Text => {
            print!("{}", airport_text(location));
            Ok(())
        }
        OutputFormat::Json => render_json(location),
    }
}

/// Text block describing one airport.
pub fn airport_text(location: &Location) -> String {
    let mut lines = vec![format!("{} {}", location.display_code(), location.name)];
    if !location.city.is_empty() || !location.country.is_empty() {
        lines.push(format!("  location: {}, {}", location.city, location.country));
    }
    if let Some(iata) = &location.iata {
        lines.push(format!("  iata: {iata}"));
    }
    if let Some(icao) = &location.icao {
        lines.push(format!("  icao: {icao}"));
    }
    lines.push(format!(
        "  coordinates: {:.4}, {:.4}",
        location.coordinate.latitude, location.coordinate.longitude
    ));
    let mut text = lines.join("\n");
    text.push('\n');
    text
}

fn render_json<T: Serialize + ?Sized>(value: &T) -> io::Result<()> {
    let mut stdout = io::stdout();
    serde_json::to_writer_pretty(&mut stdout, value).map_err(io::Error::other)?;
    stdout.write_all(b"\n")?;
    Ok(())
}
