//! SVG rendering of a normalized layout.
//!
//! A panel is a square of `panel_size` pixels. The unit square is mapped
//! into it with `padding` pixels of margin on every side:
//!
//! ```text
//! pixel = value × (panel_size − 2 × padding) + padding
//! ```
//!
//! Edges are drawn first, then nodes with their labels, then the title.

use log::debug;
use svg::{
    Document,
    node::element::{self as svg_element, Circle, Group, Line, Rectangle},
};

use tether_core::{color::Color, geometry::Point, graph::Edge};

use super::{Error, text::measure_width};
use crate::{config::StyleConfig, layout::Positions};

/// Distance kept between a clamped label and the right panel border.
const LABEL_MARGIN: f64 = 5.0;

/// Top offset of the panel title.
const TITLE_TOP: f64 = 5.0;

/// Renders layouts with a resolved [`StyleConfig`].
#[derive(Debug, Clone)]
pub struct SvgRenderer<'a> {
    style: &'a StyleConfig,
    node_color: Color,
    edge_color: Color,
    label_color: Color,
    background_color: Option<Color>,
}

impl<'a> SvgRenderer<'a> {
    /// Resolves the colors of `style` and checks the panel geometry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Color`] for an unparsable color and
    /// [`Error::InvalidStyle`] when the padding leaves no drawing area.
    pub fn new(style: &'a StyleConfig) -> Result<Self, Error> {
        if !(style.panel_size() > 2.0 * style.padding()) || style.padding() < 0.0 {
            return Err(Error::InvalidStyle(format!(
                "panel_size ({}) must exceed twice the padding ({})",
                style.panel_size(),
                style.padding()
            )));
        }

        Ok(Self {
            style,
            node_color: style.node_color()?,
            edge_color: style.edge_color()?,
            label_color: style.label_color()?,
            background_color: style.background_color()?,
        })
    }

    /// Renders a single panel document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingPosition`] if an edge endpoint has no position.
    pub fn render(
        &self,
        positions: &Positions,
        edges: &[Edge],
        title: Option<&str>,
    ) -> Result<Document, Error> {
        let size = self.style.panel_size();
        let panel = self.render_panel(positions, edges, title, 0.0)?;
        Ok(self.document(size, size).add(panel))
    }

    /// Renders two panels side by side, `before` on the left and `after` on the right.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingPosition`] if an edge endpoint has no position
    /// in either mapping.
    pub fn render_comparison(
        &self,
        before: (&Positions, &str),
        after: (&Positions, &str),
        edges: &[Edge],
    ) -> Result<Document, Error> {
        let size = self.style.panel_size();
        let left = self.render_panel(before.0, edges, Some(before.1), 0.0)?;
        let right = self.render_panel(after.0, edges, Some(after.1), size)?;
        Ok(self.document(2.0 * size, size).add(left).add(right))
    }

    fn document(&self, width: f64, height: f64) -> Document {
        let doc = Document::new()
            .set("viewBox", format!("0 0 {width} {height}"))
            .set("width", width)
            .set("height", height);

        match self.background_color {
            Some(color) => doc.add(
                Rectangle::new()
                    .set("x", 0)
                    .set("y", 0)
                    .set("width", width)
                    .set("height", height)
                    .set("fill", color.to_string())
                    .set("fill-opacity", color.alpha()),
            ),
            None => doc,
        }
    }

    fn render_panel(
        &self,
        positions: &Positions,
        edges: &[Edge],
        title: Option<&str>,
        offset_x: f64,
    ) -> Result<Group, Error> {
        debug!(
            node_count = positions.len(),
            edge_count = edges.len(),
            offset_x;
            "Rendering layout panel"
        );

        let mut group = Group::new();
        if offset_x != 0.0 {
            group = group.set("transform", format!("translate({offset_x},0)"));
        }

        let mut edge_group = Group::new()
            .set("stroke", self.edge_color.to_string())
            .set("stroke-opacity", self.edge_color.alpha())
            .set("stroke-width", self.style.edge_width());
        for edge in edges {
            let source = self.to_pixels(lookup(positions, edge.source())?);
            let target = self.to_pixels(lookup(positions, edge.target())?);
            edge_group = edge_group.add(
                Line::new()
                    .set("x1", source.x())
                    .set("y1", source.y())
                    .set("x2", target.x())
                    .set("y2", target.y()),
            );
        }
        group = group.add(edge_group);

        for (id, &position) in positions {
            let center = self.to_pixels(position);
            group = group
                .add(
                    Circle::new()
                        .set("cx", center.x())
                        .set("cy", center.y())
                        .set("r", self.style.node_radius())
                        .set("fill", self.node_color.to_string())
                        .set("fill-opacity", self.node_color.alpha()),
                )
                .add(self.render_label(id, center));
        }

        if let Some(title) = title {
            group = group.add(
                svg_element::Text::new(title)
                    .set("x", self.style.panel_size() / 2.0)
                    .set("y", TITLE_TOP)
                    .set("text-anchor", "middle")
                    .set("dominant-baseline", "hanging")
                    .set("font-family", self.style.font_family())
                    .set("font-size", self.style.title_font_size())
                    .set("fill", self.label_color.to_string()),
            );
        }

        Ok(group)
    }

    fn render_label(&self, id: &str, center: Point) -> svg_element::Text {
        let width = measure_width(id, self.style.font_family(), self.style.label_font_size());
        let x = label_x(
            center.x(),
            self.style.label_offset(),
            width,
            self.style.panel_size(),
        );

        svg_element::Text::new(id)
            .set("x", x)
            .set("y", center.y())
            .set("text-anchor", "start")
            .set("dominant-baseline", "middle")
            .set("font-family", self.style.font_family())
            .set("font-size", self.style.label_font_size())
            .set("fill", self.label_color.to_string())
            .set("fill-opacity", self.label_color.alpha())
    }

    fn to_pixels(&self, position: Point) -> Point {
        let padding = self.style.padding();
        let draw_size = self.style.panel_size() - 2.0 * padding;
        Point::new(
            position.x() * draw_size + padding,
            position.y() * draw_size + padding,
        )
    }
}

/// Places a label right of its node without letting it run past the panel edge.
fn label_x(node_x: f64, offset: f64, label_width: f64, panel_size: f64) -> f64 {
    (node_x + offset).min(panel_size - label_width - LABEL_MARGIN)
}

fn lookup(positions: &Positions, id: &str) -> Result<Point, Error> {
    positions
        .get(id)
        .copied()
        .ok_or_else(|| Error::MissingPosition(id.to_string()))
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    fn positions() -> Positions {
        [
            ("A".to_string(), Point::new(0.0, 0.0)),
            ("B".to_string(), Point::new(1.0, 0.5)),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_to_pixels_applies_padding() {
        let style = StyleConfig::default();
        let renderer = SvgRenderer::new(&style).unwrap();

        let origin = renderer.to_pixels(Point::new(0.0, 0.0));
        assert_approx_eq!(f64, origin.x(), 30.0);
        assert_approx_eq!(f64, origin.y(), 30.0);

        let corner = renderer.to_pixels(Point::new(1.0, 0.5));
        assert_approx_eq!(f64, corner.x(), 470.0);
        assert_approx_eq!(f64, corner.y(), 250.0);
    }

    #[test]
    fn test_label_x_clamped_at_right_edge() {
        assert_approx_eq!(f64, label_x(100.0, 5.0, 40.0, 500.0), 105.0);
        assert_approx_eq!(f64, label_x(470.0, 5.0, 40.0, 500.0), 455.0);
    }

    #[test]
    fn test_render_contains_nodes_edges_and_title() {
        let style = StyleConfig::default();
        let renderer = SvgRenderer::new(&style).unwrap();
        let edges = vec![Edge::new("A", "B")];

        let svg = renderer
            .render(&positions(), &edges, Some("Optimized Layout"))
            .unwrap()
            .to_string();

        assert!(svg.contains("<svg"));
        assert_eq!(svg.matches("<circle").count(), 2);
        assert_eq!(svg.matches("<line").count(), 1);
        assert!(svg.contains("Optimized Layout"));
        assert_eq!(svg.matches("<text").count(), 3);
    }

    #[test]
    fn test_render_comparison_has_two_panels() {
        let style = StyleConfig::default();
        let renderer = SvgRenderer::new(&style).unwrap();
        let edges = vec![Edge::new("A", "B")];
        let layout = positions();

        let svg = renderer
            .render_comparison(
                (&layout, "Original Layout"),
                (&layout, "Optimized Layout"),
                &edges,
            )
            .unwrap()
            .to_string();

        assert_eq!(svg.matches("<circle").count(), 4);
        assert!(svg.contains("translate(500,0)"));
        assert!(svg.contains("width=\"1000\""));
    }

    #[test]
    fn test_missing_edge_endpoint_is_error() {
        let style = StyleConfig::default();
        let renderer = SvgRenderer::new(&style).unwrap();
        let edges = vec![Edge::new("A", "Z")];

        let err = renderer.render(&positions(), &edges, None).unwrap_err();
        assert!(matches!(err, Error::MissingPosition(id) if id == "Z"));
    }

    #[test]
    fn test_no_background_by_default() {
        let style = StyleConfig::default();
        let renderer = SvgRenderer::new(&style).unwrap();
        let svg = renderer.render(&positions(), &[], None).unwrap().to_string();
        assert!(!svg.contains("<rect"));
        assert_eq!(svg.matches("<text").count(), 2);
    }
}
