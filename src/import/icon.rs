use egui::{Color32, Pos2};
use kurbo::BezPath;

use crate::element::{Icon, ObjectStyle};
use crate::error::{ImportError, ImportResult};
use crate::geometry::{Placement, VectorPath, union_rects};

/// Sub-paths pulled out of an SVG document
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedIcon {
    pub paths: Vec<VectorPath>,
    /// False for line icons drawn with `fill="none"`
    pub filled: bool,
}

/// Collect every `<path d="...">` of an SVG document.
///
/// Only path elements are read; transforms, groups and other primitives are
/// ignored.
pub fn parse_svg_paths(svg: &str) -> ImportResult<ParsedIcon> {
    let root_unfilled = find_tag(svg, "svg")
        .and_then(|(tag, _)| attribute(tag, "fill"))
        .is_some_and(|fill| fill == "none");

    let mut paths = Vec::new();
    let mut filled = false;
    let mut rest = svg;
    while let Some((tag, end)) = find_tag(rest, "path") {
        rest = &rest[end..];

        let Some(data) = attribute(tag, "d") else {
            continue;
        };
        let bez = BezPath::from_svg(data).map_err(|e| ImportError::PathData(e.to_string()))?;
        let path = VectorPath::from_bez_path(&bez);
        if path.is_empty() {
            continue;
        }
        filled |= match attribute(tag, "fill") {
            Some(fill) => fill != "none",
            None => !root_unfilled,
        };
        paths.push(path);
    }

    if paths.is_empty() {
        return Err(ImportError::NoPaths);
    }
    Ok(ParsedIcon { paths, filled })
}

/// Group the parsed paths into one icon scaled to `target_width` and centered
/// on `center`
pub fn build_icon(
    source: &str,
    parsed: ParsedIcon,
    color: Color32,
    stroke_width: f32,
    center: Pos2,
    target_width: f32,
) -> ImportResult<Icon> {
    let bounds = union_rects(parsed.paths.iter().map(VectorPath::bounds));
    if !bounds.is_finite() || bounds.width() <= 0.0 {
        return Err(ImportError::DegenerateBounds);
    }
    let placement = Placement::centered(bounds, target_width / bounds.width(), center);
    let style = if parsed.filled {
        ObjectStyle::solid(color)
    } else {
        ObjectStyle::outline(stroke_width, color)
    };
    log::debug!(
        "Built icon {source} from {} paths (scale {:.3})",
        parsed.paths.len(),
        placement.scale
    );
    Ok(Icon::new(source, parsed.paths, placement, style))
}

/// Body of the first `<name ...>` tag without the angle brackets, and the
/// byte offset just past its closing `>`
fn find_tag<'a>(text: &'a str, name: &str) -> Option<(&'a str, usize)> {
    let open = format!("<{name}");
    let mut from = 0;
    loop {
        let start = from + text[from..].find(&open)? + open.len();
        let after = &text[start..];
        // Reject longer names such as <pathology>
        if after.starts_with(|c: char| c.is_ascii_whitespace() || c == '/' || c == '>') {
            let end = after.find('>')?;
            return Some((&after[..end], start + end + 1));
        }
        from = start;
    }
}

/// Value of attribute `name` inside a tag body, single or double quoted
fn attribute<'a>(tag: &'a str, name: &str) -> Option<&'a str> {
    let mut search = tag;
    loop {
        let start = search.find(name)?;
        let preceded_by_space = search[..start]
            .chars()
            .next_back()
            .is_some_and(|c| c.is_ascii_whitespace());
        let after = search[start + name.len()..].trim_start();
        search = &search[start + name.len()..];
        if !preceded_by_space {
            continue;
        }
        let Some(value) = after.strip_prefix('=') else {
            continue;
        };
        let value = value.trim_start();
        let quote = value.chars().next()?;
        if quote != '"' && quote != '\'' {
            continue;
        }
        let value = &value[1..];
        let end = value.find(quote)?;
        return Some(&value[..end]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Element;
    use egui::pos2;

    const HOUSE: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24">
        <path id="roof" d="M2 12 L12 2 L22 12 Z"/>
        <path d='M5 12 L5 22 L19 22 L19 12 Z' />
    </svg>"#;

    const OUTLINE: &str = r#"<svg viewBox="0 0 24 24" fill="none" stroke="currentColor">
        <path d="M4 4 L20 20"/><path d="M20 4 L4 20"/>
    </svg>"#;

    #[test]
    fn test_parses_every_path() {
        let parsed = parse_svg_paths(HOUSE).unwrap();
        assert_eq!(parsed.paths.len(), 2);
        assert!(parsed.filled);
    }

    #[test]
    fn test_root_fill_none_makes_outline_icon() {
        let parsed = parse_svg_paths(OUTLINE).unwrap();
        assert_eq!(parsed.paths.len(), 2);
        assert!(!parsed.filled);
    }

    #[test]
    fn test_no_paths_is_an_error() {
        let err = parse_svg_paths(r#"<svg><circle cx="5" cy="5" r="4"/></svg>"#).unwrap_err();
        assert!(matches!(err, ImportError::NoPaths));
    }

    #[test]
    fn test_icon_is_scaled_and_centered() {
        let parsed = parse_svg_paths(HOUSE).unwrap();
        let icon = build_icon("house.svg", parsed, Color32::BLACK, 2.0, pos2(200.0, 200.0), 120.0)
            .unwrap();
        let placed = icon.placement().apply_rect(icon.local_bounds());
        assert!((placed.width() - 120.0).abs() < 1e-3);
        assert!((placed.center() - pos2(200.0, 200.0)).length() < 1e-3);
        assert_eq!(icon.element_type(), "icon");
    }

    #[test]
    fn test_attribute_ignores_suffix_matches() {
        assert_eq!(attribute(r#" id="x" d="M0 0""#, "d"), Some("M0 0"));
        assert_eq!(attribute(r#" data-d="1""#, "d"), None);
    }
}
