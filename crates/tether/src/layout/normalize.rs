use tether_core::geometry::{Bounds, Point};

/// Rescales positions into the unit square `[0, 1] × [0, 1]`.
///
/// Each axis is mapped with `(value − min) / range`. An axis where every node
/// shares the same coordinate has a range of zero; it is divided by 1 instead,
/// which puts every node at 0 on that axis. Empty input is left untouched.
///
/// # Examples
///
/// ```
/// # use tether::{geometry::Point, layout::normalize};
/// let mut positions = vec![Point::new(-1.0, 3.0), Point::new(1.0, 3.0), Point::new(0.0, 3.0)];
/// normalize(&mut positions);
///
/// assert_eq!(positions[0], Point::new(0.0, 0.0));
/// assert_eq!(positions[1], Point::new(1.0, 0.0));
/// assert_eq!(positions[2], Point::new(0.5, 0.0));
/// ```
pub fn normalize(positions: &mut [Point]) {
    let Some(bounds) = Bounds::from_points(positions.iter().copied()) else {
        return;
    };

    let range_x = non_degenerate(bounds.width());
    let range_y = non_degenerate(bounds.height());
    let origin = bounds.min_point();

    for position in positions.iter_mut() {
        let offset = position.sub_point(origin);
        *position = Point::new(offset.x() / range_x, offset.y() / range_y);
    }
}

fn non_degenerate(range: f64) -> f64 {
    if range == 0.0 { 1.0 } else { range }
}
