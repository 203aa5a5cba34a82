use std::collections::BTreeSet;
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info};

use crate::distance::light_years_between;
use crate::presence::CynoPresence;
use crate::starmap::{Starmap, System, SystemId};

/// Systems with a security status strictly below this value allow cynos.
pub const LOW_SECURITY_THRESHOLD: f64 = 0.5;

/// A usable cyno jump between two presence-bearing low-security systems.
///
/// Routes are directed as emitted: a pair of systems in range of each other
/// yields one route in each direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CynoRoute {
    pub from: SystemId,
    pub to: SystemId,
    pub distance_ly: f64,
}

impl CynoRoute {
    /// Whether `other` connects the same systems in the opposite direction.
    pub fn is_reverse_of(&self, other: &CynoRoute) -> bool {
        self.from == other.to && self.to == other.from
    }

    /// The two endpoints ordered by identifier.
    pub fn canonical_pair(&self) -> (SystemId, SystemId) {
        if self.from <= self.to {
            (self.from, self.to)
        } else {
            (self.to, self.from)
        }
    }
}

pub fn is_low_security(system: &System) -> bool {
    system.security < LOW_SECURITY_THRESHOLD
}

/// Find every ordered pair of presence systems that forms a cyno route.
///
/// A pair qualifies when the systems differ, both are low-security, and they
/// are at most `jump_range_ly` light-years apart. The full product of presence
/// systems is walked, so both directions of a qualifying pair are returned.
/// Presence entries for systems missing from `starmap` are ignored.
pub fn find_cyno_routes(
    presence: &CynoPresence,
    starmap: &Starmap,
    jump_range_ly: f64,
) -> Vec<CynoRoute> {
    let started = Instant::now();
    let mut routes = Vec::new();

    for from in presence.systems() {
        let Some(origin) = starmap.system(from) else {
            continue;
        };
        if !is_low_security(origin) {
            continue;
        }

        for to in presence.systems() {
            if from == to {
                continue;
            }
            let Some(destination) = starmap.system(to) else {
                continue;
            };
            if !is_low_security(destination) {
                continue;
            }

            let distance_ly = light_years_between(origin, destination);
            if distance_ly <= jump_range_ly {
                info!(
                    from = %origin.name,
                    to = %destination.name,
                    distance_ly,
                    "cyno route found"
                );
                routes.push(CynoRoute {
                    from,
                    to,
                    distance_ly,
                });
            }
        }
    }

    debug!(
        routes = routes.len(),
        elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
        "cyno routes computed"
    );
    routes
}

/// Collapse directed routes into unordered system pairs.
pub fn unique_route_pairs(routes: &[CynoRoute]) -> BTreeSet<(SystemId, SystemId)> {
    routes.iter().map(CynoRoute::canonical_pair).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryDataset;
    use crate::starmap::{load_starmap, Projection, KNOWN_SPACE_REGION_BOUND};
    use crate::test_helpers::system_at_ly;

    const A: SystemId = 1;
    const B: SystemId = 2;
    const C: SystemId = 3;

    fn triangle() -> Starmap {
        let dataset = MemoryDataset::new()
            .with_system(system_at_ly(A, "A", 0.3, 0.0, 0.0))
            .with_system(system_at_ly(B, "B", 0.2, 2.0, 0.0))
            .with_system(system_at_ly(C, "C", 0.8, 0.0, 1.0));
        load_starmap(&dataset, KNOWN_SPACE_REGION_BOUND, &Projection::default()).expect("loads")
    }

    fn pairs(routes: &[CynoRoute]) -> Vec<(SystemId, SystemId)> {
        routes.iter().map(|route| (route.from, route.to)).collect()
    }

    #[test]
    fn both_directions_between_low_security_systems_in_range() {
        let starmap = triangle();
        let presence: CynoPresence = [(A, "a"), (B, "b"), (C, "c")].into_iter().collect();

        let routes = find_cyno_routes(&presence, &starmap, 3.0);

        assert_eq!(pairs(&routes), vec![(A, B), (B, A)]);
        assert!(routes[0].is_reverse_of(&routes[1]));
        assert!((routes[0].distance_ly - 2.0).abs() < 1e-9);
    }

    #[test]
    fn high_security_systems_never_route_even_when_close() {
        let starmap = triangle();
        let presence: CynoPresence = [(A, "a"), (C, "c")].into_iter().collect();

        assert!(find_cyno_routes(&presence, &starmap, 10.0).is_empty());
    }

    #[test]
    fn range_bound_is_inclusive() {
        let starmap = triangle();
        let presence: CynoPresence = [(A, "a"), (B, "b")].into_iter().collect();

        assert_eq!(find_cyno_routes(&presence, &starmap, 2.0).len(), 2);
        assert!(find_cyno_routes(&presence, &starmap, 1.999).is_empty());
    }

    #[test]
    fn single_presence_system_has_no_routes() {
        let starmap = triangle();
        let presence: CynoPresence = [(A, "a"), (A, "b")].into_iter().collect();

        assert!(find_cyno_routes(&presence, &starmap, 100.0).is_empty());
    }

    #[test]
    fn unique_pairs_collapse_directions() {
        let starmap = triangle();
        let presence: CynoPresence = [(B, "b"), (A, "a")].into_iter().collect();
        let routes = find_cyno_routes(&presence, &starmap, 3.0);

        let unique = unique_route_pairs(&routes);
        assert_eq!(unique.into_iter().collect::<Vec<_>>(), vec![(A, B)]);
    }
}
