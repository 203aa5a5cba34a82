use std::fmt::Write;
use std::time::Instant;

use tracing::debug;

use crate::scene::{Circle, Line, Scene};

const XML_PROLOG: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"no\"?>\n\
<!DOCTYPE svg PUBLIC \"-//W3C//DTD SVG 1.1//EN\" \"http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd\">\n";

/// How a scene is wrapped when written as SVG.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SvgMode {
    /// A bare `<svg>` element, for embedding in an HTML page.
    Fragment,
    /// A complete XML document with prolog and doctype.
    Standalone,
}

/// Write a scene as SVG.
///
/// Both modes carry the same `<svg>` element; the standalone document only
/// adds the XML prolog in front of it.
pub fn render_svg(scene: &Scene, mode: SvgMode) -> String {
    let started = Instant::now();
    let mut buffer = String::new();

    if mode == SvgMode::Standalone {
        buffer.push_str(XML_PROLOG);
    }

    let viewport = scene.viewport;
    let _ = writeln!(
        buffer,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\" viewBox=\"{} {} {} {}\" width=\"{}\" height=\"{}\">",
        coord(viewport.x),
        coord(viewport.y),
        coord(viewport.width),
        coord(viewport.height),
        coord(viewport.width),
        coord(viewport.height)
    );

    buffer.push_str("  <g id=\"jumps\">\n");
    for line in &scene.jumps {
        write_line(&mut buffer, line);
    }
    buffer.push_str("  </g>\n");

    buffer.push_str("  <g id=\"systems\">\n");
    for circle in &scene.systems {
        write_circle(&mut buffer, circle);
    }
    buffer.push_str("  </g>\n");

    buffer.push_str("  <g id=\"cynos\">\n");
    for line in &scene.routes {
        write_line(&mut buffer, line);
    }
    buffer.push_str("  </g>\n");
    buffer.push_str("</svg>\n");

    debug!(
        bytes = buffer.len(),
        elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
        "SVG generated"
    );
    buffer
}

fn write_line(buffer: &mut String, line: &Line) {
    let _ = writeln!(
        buffer,
        "    <line id=\"{}\" class=\"{}\" x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"{}\" stroke-width=\"{}\"/>",
        escape_xml(&line.id),
        line.style.class_name(),
        coord(line.from.x),
        coord(line.from.y),
        coord(line.to.x),
        coord(line.to.y),
        line.style.stroke(),
        line.style.stroke_width()
    );
}

fn write_circle(buffer: &mut String, circle: &Circle) {
    let _ = writeln!(
        buffer,
        "    <circle id=\"{}\" class=\"system {}\" cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"{}\" stroke-width=\"0\"><title>{}</title></circle>",
        escape_xml(&circle.id),
        circle.style.class_name(),
        coord(circle.center.x),
        coord(circle.center.y),
        circle.radius,
        circle.style.fill(),
        escape_xml(&circle.title)
    );
}

fn coord(value: f64) -> String {
    let formatted = format!("{value:.3}");
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" | "" => "0".to_string(),
        other => other.to_string(),
    }
}

fn escape_xml(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryDataset;
    use crate::presence::CynoPresence;
    use crate::routes::find_cyno_routes;
    use crate::scene::{build_scene, DEFAULT_PADDING};
    use crate::starmap::{load_starmap, Projection, KNOWN_SPACE_REGION_BOUND};
    use crate::test_helpers::system_at_ly;

    fn scene() -> Scene {
        let dataset = MemoryDataset::new()
            .with_system(system_at_ly(1, "Old Man Star", 0.3, 0.0, 0.0))
            .with_system(system_at_ly(2, "Tama", 0.3, 3.0, 0.0))
            .with_system(system_at_ly(3, "Nourvukaiken", 0.8, 0.0, 5.0))
            .with_jump(1, 2)
            .with_jump(1, 3);
        let starmap =
            load_starmap(&dataset, KNOWN_SPACE_REGION_BOUND, &Projection::default()).expect("loads");
        let presence: CynoPresence = [(1, "Alt <One>"), (2, "Alt & Two")].into_iter().collect();
        let routes = find_cyno_routes(&presence, &starmap, 5.0);
        build_scene(&starmap, &presence, &routes, 5.0, DEFAULT_PADDING)
    }

    #[test]
    fn standalone_only_adds_the_prolog() {
        let scene = scene();
        let fragment = render_svg(&scene, SvgMode::Fragment);
        let standalone = render_svg(&scene, SvgMode::Standalone);

        assert!(fragment.starts_with("<svg "));
        assert!(standalone.starts_with("<?xml"));
        assert!(standalone.contains("<!DOCTYPE svg"));
        assert!(standalone.ends_with(&fragment));
    }

    #[test]
    fn groups_follow_draw_order() {
        let svg = render_svg(&scene(), SvgMode::Fragment);
        let jumps = svg.find("<g id=\"jumps\">").expect("jumps group");
        let systems = svg.find("<g id=\"systems\">").expect("systems group");
        let cynos = svg.find("<g id=\"cynos\">").expect("cynos group");

        assert!(jumps < systems && systems < cynos);
        assert_eq!(svg.matches("<circle ").count(), 3);
        assert_eq!(svg.matches("class=\"jump\"").count(), 2);
        assert_eq!(svg.matches("class=\"cyno\"").count(), 2);
        assert!(svg.contains("id=\"cyno-1-2\""));
        assert!(svg.contains("id=\"system-3\""));
    }

    #[test]
    fn member_names_are_escaped_in_titles() {
        let svg = render_svg(&scene(), SvgMode::Fragment);
        assert!(svg.contains("Alt &lt;One&gt;"));
        assert!(svg.contains("Alt &amp; Two"));
        assert!(!svg.contains("Alt <One>"));
    }

    #[test]
    fn coordinates_are_trimmed() {
        assert_eq!(coord(100.0), "100");
        assert_eq!(coord(-12.5), "-12.5");
        assert_eq!(coord(1.23456), "1.235");
        assert_eq!(coord(-0.0001), "0");
    }
}
