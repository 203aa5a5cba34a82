//! Renderable scene assembled from a computed cyno map.
//!
//! The scene is a flat set of typed drawables in display coordinates: the
//! projected `cx` becomes `x` and the projected `cz`, negated, becomes `y`, so
//! north points up once drawn. Drawables are kept in three layers, drawn in
//! order: jumps, then systems, then cyno routes.

use std::time::Instant;

use serde::Serialize;
use tracing::debug;

use crate::distance::light_years_between;
use crate::presence::CynoPresence;
use crate::routes::{is_low_security, CynoRoute};
use crate::starmap::{ProjectedPosition, Starmap, System, SystemId};

/// Radius of systems that have tracked members in them.
pub const ACTIVE_RADIUS: f64 = 5.0;

/// Radius of every other system.
pub const SYSTEM_RADIUS: f64 = 2.0;

/// Padding added around the bounds when sizing the viewport.
pub const DEFAULT_PADDING: f64 = 50.0;

/// Visual classification of a system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SystemStyle {
    /// Members present in a low-security system.
    ActiveHostile,
    /// Members present in a high-security system.
    ActiveSafe,
    /// Within jump range of a presence system.
    Reachable,
    Neutral,
}

impl SystemStyle {
    pub fn fill(self) -> &'static str {
        match self {
            SystemStyle::ActiveHostile => "red",
            SystemStyle::ActiveSafe => "green",
            SystemStyle::Reachable => "blue",
            SystemStyle::Neutral => "gray",
        }
    }

    pub fn class_name(self) -> &'static str {
        match self {
            SystemStyle::ActiveHostile => "active-hostile",
            SystemStyle::ActiveSafe => "active-safe",
            SystemStyle::Reachable => "reachable",
            SystemStyle::Neutral => "neutral",
        }
    }

    pub fn is_active(self) -> bool {
        matches!(self, SystemStyle::ActiveHostile | SystemStyle::ActiveSafe)
    }
}

/// Visual classification of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineStyle {
    Jump,
    Cyno,
}

impl LineStyle {
    pub fn stroke(self) -> &'static str {
        match self {
            LineStyle::Jump => "lightgray",
            LineStyle::Cyno => "red",
        }
    }

    pub fn stroke_width(self) -> f64 {
        match self {
            LineStyle::Jump => 1.0,
            LineStyle::Cyno => 2.0,
        }
    }

    pub fn class_name(self) -> &'static str {
        match self {
            LineStyle::Jump => "jump",
            LineStyle::Cyno => "cyno",
        }
    }
}

/// Point in display coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    fn from_projected(projected: &ProjectedPosition) -> Self {
        Self {
            x: projected.cx,
            y: -projected.cz,
        }
    }
}

/// A system drawn as a circle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Circle {
    pub id: String,
    pub system_id: SystemId,
    pub center: Point,
    pub radius: f64,
    pub style: SystemStyle,
    pub title: String,
}

/// A jump or cyno route drawn as a line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Line {
    pub id: String,
    pub from: Point,
    pub to: Point,
    pub style: LineStyle,
}

/// Borrowed drawable, yielded in draw order by [`Scene::primitives`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive<'a> {
    Circle(&'a Circle),
    Line(&'a Line),
}

/// Extent of the projected map on the `cx`/`cz` plane.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_z: f64,
    pub max_x: f64,
    pub max_z: f64,
}

impl Bounds {
    /// Smallest bounds containing every position, or `None` when empty.
    pub fn enclosing<'a>(positions: impl IntoIterator<Item = &'a ProjectedPosition>) -> Option<Self> {
        positions.into_iter().fold(None, |bounds, position| {
            Some(match bounds {
                None => Bounds {
                    min_x: position.cx,
                    min_z: position.cz,
                    max_x: position.cx,
                    max_z: position.cz,
                },
                Some(bounds) => Bounds {
                    min_x: bounds.min_x.min(position.cx),
                    min_z: bounds.min_z.min(position.cz),
                    max_x: bounds.max_x.max(position.cx),
                    max_z: bounds.max_z.max(position.cz),
                },
            })
        })
    }

    /// Display-space viewport covering the bounds with `padding` on each side.
    pub fn viewport(&self, padding: f64) -> Viewport {
        Viewport {
            x: self.min_x - padding,
            y: -self.max_z - padding,
            width: (self.max_x - self.min_x) + 2.0 * padding,
            height: (self.max_z - self.min_z) + 2.0 * padding,
        }
    }
}

/// Rectangle in display coordinates used as the drawing's view box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Immutable drawable representation of a cyno map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub jumps: Vec<Line>,
    pub systems: Vec<Circle>,
    pub routes: Vec<Line>,
    pub bounds: Bounds,
    pub viewport: Viewport,
}

impl Scene {
    /// Every drawable, jumps first, then systems, then cyno routes.
    pub fn primitives(&self) -> Vec<Primitive<'_>> {
        self.jumps
            .iter()
            .map(Primitive::Line)
            .chain(self.systems.iter().map(Primitive::Circle))
            .chain(self.routes.iter().map(Primitive::Line))
            .collect()
    }

    pub fn system(&self, id: SystemId) -> Option<&Circle> {
        self.systems.iter().find(|circle| circle.system_id == id)
    }
}

/// Classify every system and lay out jumps and routes into a scene.
///
/// Systems with members present are active (red in low-security space, green
/// otherwise). Remaining systems strictly closer than `jump_range_ly` to any
/// presence system are reachable; all others are neutral.
pub fn build_scene(
    starmap: &Starmap,
    presence: &CynoPresence,
    routes: &[CynoRoute],
    jump_range_ly: f64,
    padding: f64,
) -> Scene {
    let started = Instant::now();
    let presence_systems: Vec<&System> = presence
        .systems()
        .filter_map(|id| starmap.system(id))
        .collect();

    let ordered = starmap.systems_by_id();
    let systems: Vec<Circle> = ordered
        .iter()
        .map(|system| system_circle(system, presence, &presence_systems, jump_range_ly))
        .collect();

    let jumps: Vec<Line> = starmap
        .jumps
        .iter()
        .filter_map(|jump| {
            let from = starmap.system(jump.from)?;
            let to = starmap.system(jump.to)?;
            Some(edge_line(
                format!("jump-{}-{}", jump.from, jump.to),
                from,
                to,
                LineStyle::Jump,
            ))
        })
        .collect();

    let route_lines: Vec<Line> = routes
        .iter()
        .filter_map(|route| {
            let from = starmap.system(route.from)?;
            let to = starmap.system(route.to)?;
            Some(edge_line(
                format!("cyno-{}-{}", route.from, route.to),
                from,
                to,
                LineStyle::Cyno,
            ))
        })
        .collect();

    let bounds = Bounds::enclosing(ordered.iter().copied().map(|system| &system.projected))
        .unwrap_or_default();

    debug!(
        systems = systems.len(),
        jumps = jumps.len(),
        routes = route_lines.len(),
        elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
        "scene built"
    );

    Scene {
        jumps,
        systems,
        routes: route_lines,
        bounds,
        viewport: bounds.viewport(padding),
    }
}

fn system_circle(
    system: &System,
    presence: &CynoPresence,
    presence_systems: &[&System],
    jump_range_ly: f64,
) -> Circle {
    let (style, radius, title) = match presence.members(system.id) {
        Some(members) => {
            let style = if is_low_security(system) {
                SystemStyle::ActiveHostile
            } else {
                SystemStyle::ActiveSafe
            };
            let title = format!(
                "{} - {} ({})",
                system.name,
                round_security(system.security),
                members.join(", ")
            );
            (style, ACTIVE_RADIUS, title)
        }
        None => {
            let reachable = presence_systems
                .iter()
                .any(|other| light_years_between(system, other) < jump_range_ly);
            let style = if reachable {
                SystemStyle::Reachable
            } else {
                SystemStyle::Neutral
            };
            (style, SYSTEM_RADIUS, system.name.clone())
        }
    };

    Circle {
        id: format!("system-{}", system.id),
        system_id: system.id,
        center: Point::from_projected(&system.projected),
        radius,
        style,
        title,
    }
}

fn edge_line(id: String, from: &System, to: &System, style: LineStyle) -> Line {
    Line {
        id,
        from: Point::from_projected(&from.projected),
        to: Point::from_projected(&to.projected),
        style,
    }
}

fn round_security(security: f64) -> f64 {
    (security * 100.0).round() / 100.0
}
