//! Hand geometry: rotation math and the battery gauge polygons
//!
//! All hands are quadrilaterals defined in a local coordinate system whose
//! origin is the rotation pivot; they are rotated to the current angle and
//! translated to the screen center each redraw.
//!
//! Angles use a binary unit of 1/65536 of a full turn. Both dials carry a
//! built-in half-rotation bias (+30 minutes, +6 hours): the hand points
//! opposite the literal value, an intentional "offset dial" design.

/// Angle units per full turn
pub const ANGLE_FULL_TURN: i32 = 0x10000;

/// Number of battery gauge increments (the gauge has `BATTERY_STEPS + 1` lengths)
pub const BATTERY_STEPS: usize = 20;

/// A point in hand-local or screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// The fixed hour/minute hand, pivot at the origin
pub const HOUR_HAND: [Point; 4] = [
    Point::new(-3, 30),
    Point::new(2, 30),
    Point::new(2, 70),
    Point::new(-3, 70),
];

/// Width variant of the battery gauge polygon
///
/// Two widths exist solely to dodge a sub-pixel seam the rasterizer
/// produces at certain rotation angles; `use_wide_hand` picks one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HandWidth {
    /// 8 pixels wide, x in [-4, 3]
    Wide,
    /// 6 pixels wide, x in [-3, 2]
    Narrow,
}

/// Gauge index for a charge percentage: `min(percent * 20 / 100, 20)`
///
/// The clamp guards high readings; a percent above 100 (bad reading)
/// still lands on the last entry instead of out of bounds.
pub fn battery_hand_index(percent: u8) -> usize {
    (percent as usize * BATTERY_STEPS / 100).min(BATTERY_STEPS)
}

/// Battery gauge polygon for a gauge index, pivot at the origin
///
/// The polygon grows downward from y = 30 by two pixels per index step,
/// collapsing to a degenerate sliver at index 0 (empty battery).
pub fn battery_polygon(index: usize, width: HandWidth) -> [Point; 4] {
    let index = index.min(BATTERY_STEPS);
    let (x0, x1) = match width {
        HandWidth::Wide => (-4, 3),
        HandWidth::Narrow => (-3, 2),
    };
    let y1 = 30 + 2 * index as i32;
    [
        Point::new(x0, 30),
        Point::new(x1, 30),
        Point::new(x1, y1),
        Point::new(x0, y1),
    ]
}

/// Rotation angle for the minute dial (half-rotation bias included)
pub fn minute_angle(minute: u8) -> i32 {
    ANGLE_FULL_TURN / 60 * (minute as i32 + 30)
}

/// Rotation angle for the hour dial (half-rotation bias included)
pub fn hour_angle(hour: u8) -> i32 {
    ANGLE_FULL_TURN / 12 * ((hour as i32 % 12) + 6)
}

/// Whether the wide battery polygon must be used at this angle
///
/// Three angular windows (near 0°, near 180°, near 360° of the biased
/// dial) make the rasterizer drop a seam pixel off the narrow polygon;
/// the wide one covers it. The predicate operates on raw biased angles,
/// which range over [half turn, 1.5 turns).
pub fn use_wide_hand(angle: i32) -> bool {
    const TURN: i32 = ANGLE_FULL_TURN;
    angle - TURN / 2 < TURN / 16
        || angle + TURN / 8 > 3 * TURN / 2
        || (angle + TURN / 8 > TURN && angle < TURN + TURN / 16)
}

/// Rotate a polygon around the origin and translate it to `center`
pub fn place_polygon(points: &[Point; 4], angle: i32, center: Point) -> [Point; 4] {
    let radians = angle as f32 / ANGLE_FULL_TURN as f32 * core::f32::consts::TAU;
    let sin = libm::sinf(radians);
    let cos = libm::cosf(radians);

    let mut placed = [Point::default(); 4];
    for (out, p) in placed.iter_mut().zip(points.iter()) {
        let (x, y) = (p.x as f32, p.y as f32);
        out.x = libm::roundf(x * cos - y * sin) as i32 + center.x;
        out.y = libm::roundf(x * sin + y * cos) as i32 + center.y;
    }
    placed
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn index_at_known_percentages() {
        assert_eq!(battery_hand_index(0), 0);
        assert_eq!(battery_hand_index(4), 0);
        assert_eq!(battery_hand_index(5), 1);
        assert_eq!(battery_hand_index(45), 9);
        assert_eq!(battery_hand_index(50), 10);
        assert_eq!(battery_hand_index(95), 19);
        assert_eq!(battery_hand_index(99), 19);
        assert_eq!(battery_hand_index(100), 20);
    }

    #[test]
    fn index_clamps_bad_readings() {
        assert_eq!(battery_hand_index(101), 20);
        assert_eq!(battery_hand_index(255), 20);
    }

    proptest! {
        #[test]
        fn index_formula_and_bounds(percent in 0u8..=100) {
            let index = battery_hand_index(percent);
            prop_assert_eq!(index, (percent as usize * 20 / 100).min(20));
            prop_assert!(index <= BATTERY_STEPS);
        }

        #[test]
        fn minute_angle_formula(minute in 0u8..60) {
            let step = ANGLE_FULL_TURN / 60;
            prop_assert_eq!(minute_angle(minute), step * (minute as i32 + 30));
        }

        #[test]
        fn hour_angle_period_is_twelve(hour in 0u8..12) {
            prop_assert_eq!(hour_angle(hour), hour_angle(hour + 12));
        }

        #[test]
        fn biased_angles_stay_in_dial_range(minute in 0u8..60, hour in 0u8..24) {
            // Both dials emit raw biased angles in [half turn, 1.5 turns)
            for angle in [minute_angle(minute), hour_angle(hour)] {
                prop_assert!(angle >= ANGLE_FULL_TURN / 2);
                prop_assert!(angle < 3 * ANGLE_FULL_TURN / 2);
            }
        }
    }

    #[test]
    fn hour_angle_formula() {
        let step = ANGLE_FULL_TURN / 12;
        assert_eq!(hour_angle(0), step * 6);
        assert_eq!(hour_angle(3), step * 9);
        assert_eq!(hour_angle(15), step * 9);
        assert_eq!(hour_angle(23), step * 17);
    }

    #[test]
    fn wide_hand_windows() {
        // Near 180° (the low end of the biased range)
        assert!(use_wide_hand(ANGLE_FULL_TURN / 2));
        // Just past the 180° window
        assert!(!use_wide_hand(ANGLE_FULL_TURN * 6 / 10));
        // Near a full turn
        assert!(use_wide_hand(ANGLE_FULL_TURN));
        // Near 180° approached from above (1.5 turns)
        assert!(use_wide_hand(ANGLE_FULL_TURN * 3 / 2 - 1));
    }

    #[test]
    fn battery_polygon_matches_gauge_table() {
        // Index 9 (45%), wide variant: bottom edge at y = 48
        let poly = battery_polygon(9, HandWidth::Wide);
        assert_eq!(
            poly,
            [
                Point::new(-4, 30),
                Point::new(3, 30),
                Point::new(3, 48),
                Point::new(-4, 48),
            ]
        );

        // Full battery, narrow variant: same outline as the hour hand
        let poly = battery_polygon(20, HandWidth::Narrow);
        assert_eq!(
            poly,
            [
                Point::new(-3, 30),
                Point::new(2, 30),
                Point::new(2, 70),
                Point::new(-3, 70),
            ]
        );
    }

    #[test]
    fn battery_polygon_clamps_index() {
        assert_eq!(
            battery_polygon(99, HandWidth::Wide),
            battery_polygon(BATTERY_STEPS, HandWidth::Wide)
        );
    }

    #[test]
    fn place_polygon_at_zero_angle_translates_only() {
        let center = Point::new(72, 84);
        let placed = place_polygon(&HOUR_HAND, 0, center);
        for (out, p) in placed.iter().zip(HOUR_HAND.iter()) {
            assert_eq!(out.x, p.x + center.x);
            assert_eq!(out.y, p.y + center.y);
        }
    }

    #[test]
    fn place_polygon_quarter_turn() {
        let center = Point::new(0, 0);
        let placed = place_polygon(&[Point::new(0, 70); 4], ANGLE_FULL_TURN / 4, center);
        // (0, 70) rotated a quarter turn lands on (-70, 0)
        assert_eq!(placed[0], Point::new(-70, 0));
    }

    #[test]
    fn place_polygon_half_turn_flips() {
        let placed = place_polygon(&HOUR_HAND, ANGLE_FULL_TURN / 2, Point::new(0, 0));
        assert_eq!(placed[0], Point::new(3, -30));
        assert_eq!(placed[2], Point::new(-2, -70));
    }
}
