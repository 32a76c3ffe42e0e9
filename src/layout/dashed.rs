use super::document::{LineOp, Point};

/// Dash pattern for a stroked outline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashPattern {
    pub dash: f32,
    pub gap: f32,
}

/// Traces the segment `from -> to` as dashes of `pattern.dash` separated by
/// `pattern.gap`. The last dash is cut at `to` so it never overshoots.
pub fn dashed_segment(from: Point, to: Point, pattern: DashPattern, width: f32) -> Vec<LineOp> {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let length = dx.hypot(dy);
    let step = pattern.dash + pattern.gap;
    if length <= 0.0 || pattern.dash <= 0.0 || step <= 0.0 {
        return Vec::new();
    }
    let (ux, uy) = (dx / length, dy / length);

    let mut dashes = Vec::new();
    let mut offset = 0.0_f32;
    while offset < length {
        let end = (offset + pattern.dash).min(length);
        dashes.push(LineOp {
            from: Point::new(from.x + ux * offset, from.y + uy * offset),
            to: Point::new(from.x + ux * end, from.y + uy * end),
            width,
        });
        offset += step;
    }
    dashes
}

/// Dashes for all four edges of the rectangle at `origin` (top-left).
pub fn dashed_rect(
    origin: Point,
    width: f32,
    height: f32,
    pattern: DashPattern,
    line_width: f32,
) -> Vec<LineOp> {
    let top_left = origin;
    let top_right = Point::new(origin.x + width, origin.y);
    let bottom_right = Point::new(origin.x + width, origin.y + height);
    let bottom_left = Point::new(origin.x, origin.y + height);

    [
        (top_left, top_right),
        (top_right, bottom_right),
        (bottom_right, bottom_left),
        (bottom_left, top_left),
    ]
    .into_iter()
    .flat_map(|(from, to)| dashed_segment(from, to, pattern, line_width))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PATTERN: DashPattern = DashPattern { dash: 2.0, gap: 1.5 };

    #[test]
    fn test_last_dash_is_capped() {
        // 10mm edge: dashes start at 0, 3.5 and 7
        let dashes = dashed_segment(Point::new(0.0, 0.0), Point::new(10.0, 0.0), PATTERN, 0.2);
        assert_eq!(dashes.len(), 3);
        assert_eq!(dashes[0].from, Point::new(0.0, 0.0));
        assert_eq!(dashes[0].to, Point::new(2.0, 0.0));
        assert_eq!(dashes[2].from.x, 7.0);
        assert_eq!(dashes[2].to.x, 9.0);

        let dashes = dashed_segment(Point::new(0.0, 0.0), Point::new(8.0, 0.0), PATTERN, 0.2);
        assert_eq!(dashes.last().unwrap().to.x, 8.0);
    }

    #[test]
    fn test_vertical_and_reversed_edges() {
        let dashes = dashed_segment(Point::new(5.0, 10.0), Point::new(5.0, 0.0), PATTERN, 0.2);
        for dash in &dashes {
            assert_eq!(dash.from.x, 5.0);
            assert!(dash.to.y < dash.from.y);
            assert!(dash.to.y >= 0.0);
        }
    }

    #[test]
    fn test_rect_stays_inside_bounds() {
        let dashes = dashed_rect(Point::new(20.0, 100.0), 170.0, 30.0, PATTERN, 0.2);
        assert!(!dashes.is_empty());
        for dash in &dashes {
            for point in [dash.from, dash.to] {
                assert!((20.0..=190.0).contains(&point.x));
                assert!((100.0..=130.0).contains(&point.y));
            }
        }
    }

    #[test]
    fn test_degenerate_edge() {
        assert!(dashed_segment(Point::new(1.0, 1.0), Point::new(1.0, 1.0), PATTERN, 0.2).is_empty());
    }
}
