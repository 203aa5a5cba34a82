//! Output formatting for computed cyno maps.
//!
//! Maps render as SVG (standalone or fragment) or as a JSON report; routes
//! and presence are listed as plain text.

use std::fmt::Write;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;

use cynomap_lib::{CynoMap, CynoPresence, CynoRoute, JumpRange, Scene, SvgMode};

/// Output format for the render command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Standalone SVG document.
    Svg,
    /// Bare `<svg>` element for embedding.
    Fragment,
    /// JSON report with presence, routes and the scene.
    Json,
}

#[derive(Debug, Serialize)]
struct MapReport<'a> {
    jump_range_ly: JumpRange,
    presence: &'a CynoPresence,
    routes: &'a [CynoRoute],
    scene: Scene,
}

/// Render a computed map in the requested format.
pub fn render_document(map: &CynoMap, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Svg => Ok(map.svg(SvgMode::Standalone)),
        OutputFormat::Fragment => Ok(map.svg(SvgMode::Fragment)),
        OutputFormat::Json => {
            let report = MapReport {
                jump_range_ly: map.jump_range(),
                presence: map.presence(),
                routes: map.routes(),
                scene: map.scene(),
            };
            let mut json =
                serde_json::to_string_pretty(&report).context("failed to serialize map report")?;
            json.push('\n');
            Ok(json)
        }
    }
}

/// List routes as `origin -> destination: distance` lines.
pub fn format_routes(map: &CynoMap) -> String {
    let mut buffer = String::new();
    let routes = map.routes();
    if routes.is_empty() {
        let _ = writeln!(buffer, "No cyno routes within {} ly.", map.jump_range());
        return buffer;
    }

    let _ = writeln!(
        buffer,
        "Cyno routes within {} ly ({}):",
        map.jump_range(),
        routes.len()
    );
    for route in routes {
        let _ = writeln!(
            buffer,
            "- {} ({}) -> {} ({}): {:.2} ly",
            system_label(map, route.from),
            route.from,
            system_label(map, route.to),
            route.to,
            route.distance_ly
        );
    }
    buffer
}

/// List presence systems with their security and members.
pub fn format_presence(map: &CynoMap) -> String {
    let mut buffer = String::new();
    let presence = map.presence();
    if presence.is_empty() {
        buffer.push_str("No tracked members resolved to known space.\n");
        return buffer;
    }

    let _ = writeln!(buffer, "Cyno presence ({} systems):", presence.len());
    for (system_id, members) in presence.iter() {
        let security = map
            .starmap()
            .system(system_id)
            .map(|system| format!("{:.2}", system.security))
            .unwrap_or_else(|| "?".to_string());
        let _ = writeln!(
            buffer,
            "- {} ({}, sec {}): {}",
            system_label(map, system_id),
            system_id,
            security,
            members.join(", ")
        );
    }
    buffer
}

fn system_label(map: &CynoMap, system_id: i64) -> &str {
    map.starmap().system_name(system_id).unwrap_or("<unknown>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{sample_dataset, StaticTracker};
    use cynomap_lib::{Credentials, LocationRecord, MapConfig};

    fn map_with_members(members: Vec<LocationRecord>, range: f64) -> CynoMap {
        let tracker = StaticTracker::new(members);
        let config = MapConfig::default()
            .with_credentials(Some(Credentials::new(1, "code").expect("valid")))
            .with_jump_range(JumpRange::new(range).expect("valid"));
        CynoMap::compute(&sample_dataset(), &tracker, config).expect("computes")
    }

    #[test]
    fn routes_are_listed_with_names_and_distances() {
        let map = map_with_members(
            vec![
                LocationRecord::new("Alt One", Some(1)),
                LocationRecord::new("Alt Two", Some(2)),
            ],
            5.0,
        );

        let text = format_routes(&map);
        assert!(text.starts_with("Cyno routes within 5 ly (2):"));
        assert!(text.contains("- Amamake (1) -> Vard (2): 4.00 ly"));
        assert!(text.contains("- Vard (2) -> Amamake (1): 4.00 ly"));
    }

    #[test]
    fn empty_routes_say_so() {
        let map = map_with_members(Vec::new(), 13.0);
        assert_eq!(format_routes(&map), "No cyno routes within 13 ly.\n");
        assert_eq!(
            format_presence(&map),
            "No tracked members resolved to known space.\n"
        );
    }

    #[test]
    fn presence_lists_members_per_system() {
        let map = map_with_members(
            vec![
                LocationRecord::new("Scout", Some(3)),
                LocationRecord::new("Hauler", Some(3)),
            ],
            13.0,
        );

        assert_eq!(
            format_presence(&map),
            "Cyno presence (1 systems):\n- Jita (3, sec 0.95): Scout, Hauler\n"
        );
    }

    #[test]
    fn json_report_carries_routes_and_scene() {
        let map = map_with_members(
            vec![
                LocationRecord::new("Alt One", Some(1)),
                LocationRecord::new("Alt Two", Some(2)),
            ],
            5.0,
        );

        let json = render_document(&map, OutputFormat::Json).expect("json");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(value["jump_range_ly"], 5.0);
        assert_eq!(value["routes"].as_array().expect("routes").len(), 2);
        assert_eq!(value["presence"]["1"][0], "Alt One");
        assert_eq!(value["scene"]["systems"].as_array().expect("systems").len(), 3);
    }

    #[test]
    fn svg_formats_differ_only_in_wrapping() {
        let map = map_with_members(Vec::new(), 13.0);
        let document = render_document(&map, OutputFormat::Svg).expect("svg");
        let fragment = render_document(&map, OutputFormat::Fragment).expect("fragment");

        assert!(document.starts_with("<?xml"));
        assert!(fragment.starts_with("<svg"));
        assert!(document.ends_with(&fragment));
    }
}
