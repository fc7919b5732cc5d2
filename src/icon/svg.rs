//! Vector back-end: emits the composition as an SVG document.

use tracing::{debug, info};

use super::{check_size, Composition, IconSpec, Item, Role, Shape, PROPORTIONS};
use crate::error::{Error, Result};

/// The plate outline is a little heavier in the vector form.
const MIN_STROKE: u32 = 2;

/// Render the icon for `size` as SVG text. Same size, same bytes.
pub fn render_vector(size: u32) -> Result<String> {
    check_size(size)?;
    let composition = Composition::for_size(size);
    let stroke_width = PROPORTIONS.outline_width(size, MIN_STROKE);

    let mut doc = String::with_capacity(2048);
    doc.push_str(&format!(
        "<svg width=\"{size}\" height=\"{size}\" viewBox=\"0 0 {size} {size}\" \
         xmlns=\"http://www.w3.org/2000/svg\">\n"
    ));

    let mut current: Option<Role> = None;
    for item in &composition.items {
        if current != Some(item.role) {
            if current.is_some() {
                doc.push('\n');
            }
            if item.role.is_food() && !current.is_some_and(Role::is_food) {
                doc.push_str("  <!-- Food items -->\n");
            }
            doc.push_str(&format!("  <!-- {} -->\n", item.role.label()));
            current = Some(item.role);
        }
        doc.push_str(&format!("  {}\n", element(item, stroke_width)));
    }

    doc.push_str("</svg>");
    debug!("Vector document for size {}: {} bytes", composition.size, doc.len());
    Ok(doc)
}

fn element(item: &Item, stroke_width: u32) -> String {
    let fill = item.fill.hex();
    let stroke = match item.stroke {
        Some(color) => format!(r#" stroke="{}" stroke-width="{}""#, color.hex(), stroke_width),
        None => String::new(),
    };
    match item.shape {
        Shape::RoundedRect { x, y, width, height, radius } => format!(
            r#"<rect x="{x}" y="{y}" width="{width}" height="{height}" rx="{radius}" fill="{fill}"{stroke}/>"#
        ),
        Shape::Circle { cx, cy, r } => {
            format!(r#"<circle cx="{cx}" cy="{cy}" r="{r}" fill="{fill}"{stroke}/>"#)
        }
        Shape::Ellipse { cx, cy, rx, ry } => format!(
            r#"<ellipse cx="{cx}" cy="{cy}" rx="{rx}" ry="{ry}" fill="{fill}"{stroke}/>"#
        ),
    }
}

/// Render `spec.size` and write the document to `spec.output_path`.
/// The parent directory must already exist.
pub fn write_vector(spec: &IconSpec) -> Result<()> {
    let doc = render_vector(spec.size)?;
    std::fs::write(&spec.output_path, doc).map_err(|e| Error::io(&spec.output_path, e))?;
    info!("Created {}", spec.output_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icon::PALETTE;

    #[test]
    fn test_declares_size() {
        for size in [1, 20, 256, 1024] {
            let doc = render_vector(size).unwrap();
            let head = format!(
                r#"<svg width="{0}" height="{0}" viewBox="0 0 {0} {0}""#,
                size
            );
            assert!(doc.starts_with(&head), "bad header for {}: {}", size, doc);
            assert!(doc.ends_with("</svg>"));
        }
    }

    #[test]
    fn test_app_icon_1024() {
        let doc = render_vector(1024).unwrap();

        let plates = doc
            .lines()
            .filter(|l| l.contains("<circle") && l.contains(&format!("fill=\"{}\"", PALETTE.plate.hex())))
            .count();
        assert_eq!(plates, 1);
        assert!(doc.contains(
            r##"<circle cx="512" cy="512" r="341" fill="#FFFFFF" stroke="#1976D2" stroke-width="8"/>"##
        ));
        assert!(doc.contains(
            r##"<rect x="0" y="0" width="1024" height="1024" rx="170" fill="#2196F3"/>"##
        ));

        for group in ["Green vegetables", "Red vegetables", "Yellow protein", "Brown carbs"] {
            assert_eq!(doc.matches(&format!("<!-- {} -->", group)).count(), 1, "{}", group);
        }
        assert_eq!(doc.matches("<!-- Food items -->").count(), 1);
        assert_eq!(doc.matches("<ellipse").count(), 5);
        assert_eq!(doc.matches("<circle").count(), 4);
        assert_eq!(doc.matches("<rect").count(), 2);
    }

    #[test]
    fn test_small_stroke_floor() {
        let doc = render_vector(64).unwrap();
        assert!(doc.contains(r#"stroke-width="2""#));
    }

    #[test]
    fn test_sizes_beyond_bitmap_range() {
        let doc = render_vector(20_000).unwrap();
        assert!(doc.starts_with(
            r#"<svg width="20000" height="20000" viewBox="0 0 20000 20000" xmlns="#
        ));
        assert!(doc.contains(r#"r="6666""#));
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(render_vector(512).unwrap(), render_vector(512).unwrap());
    }

    #[test]
    fn test_zero_size_rejected() {
        assert!(matches!(render_vector(0), Err(Error::InvalidSize(0))));
    }

    #[test]
    fn test_write_vector() {
        let dir = tempfile::tempdir().unwrap();
        let spec = IconSpec::new(256, dir.path().join("app_icon_256.svg")).unwrap();
        write_vector(&spec).unwrap();
        let written = std::fs::read_to_string(&spec.output_path).unwrap();
        assert_eq!(written, render_vector(256).unwrap());
    }

    #[test]
    fn test_write_vector_missing_parent() {
        let dir = tempfile::tempdir().unwrap();
        let spec = IconSpec::new(256, dir.path().join("missing/app_icon.svg")).unwrap();
        let err = write_vector(&spec).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
