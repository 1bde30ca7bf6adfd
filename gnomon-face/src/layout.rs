//! Screen layout
//!
//! Fixed regions derived from the display bounds: the centered number
//! box, the date text in the bottom-left corner and the weekday text in
//! the bottom-right. The center point is the origin of all hand
//! rotations.

use embedded_graphics::geometry::{Point, Size};
use embedded_graphics::primitives::Rectangle;

pub const SCREEN_WIDTH: u32 = 144;
pub const SCREEN_HEIGHT: u32 = 168;

/// Full-screen bounds
pub fn screen_bounds() -> Rectangle {
    Rectangle::new(Point::zero(), Size::new(SCREEN_WIDTH, SCREEN_HEIGHT))
}

/// Center of the given bounds, the hand rotation origin
pub fn center(bounds: &Rectangle) -> Point {
    bounds.center()
}

/// Bounding box of the centered number, 50x50 around the center
pub fn number_box(bounds: &Rectangle) -> Rectangle {
    let size = bounds.size;
    Rectangle::new(
        Point::new(
            (size.width as i32 - 50) / 2,
            (size.height as i32 - 50) / 2,
        ),
        Size::new(50, 50),
    )
}

/// Bounding box of the date text, bottom-left
pub fn date_box(bounds: &Rectangle) -> Rectangle {
    Rectangle::new(
        Point::new(2, bounds.size.height as i32 - 18),
        Size::new(60, 18),
    )
}

/// Bounding box of the weekday text, bottom-right
pub fn weekday_box(bounds: &Rectangle) -> Rectangle {
    Rectangle::new(
        Point::new(bounds.size.width as i32 - 36, bounds.size.height as i32 - 18),
        Size::new(34, 18),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_of_screen() {
        let c = center(&screen_bounds());
        assert_eq!(c, Point::new(71, 83));
    }

    #[test]
    fn number_box_is_centered() {
        let b = number_box(&screen_bounds());
        assert_eq!(b.top_left, Point::new(47, 59));
        assert_eq!(b.size, Size::new(50, 50));
    }

    #[test]
    fn corner_boxes_hug_the_bottom_edge() {
        let bounds = screen_bounds();
        let date = date_box(&bounds);
        let weekday = weekday_box(&bounds);
        assert_eq!(date.top_left, Point::new(2, 150));
        assert_eq!(weekday.top_left, Point::new(108, 150));
        // Neither box extends past the screen
        assert!(date.top_left.y + date.size.height as i32 <= SCREEN_HEIGHT as i32);
        assert!(weekday.top_left.x + weekday.size.width as i32 <= SCREEN_WIDTH as i32);
    }
}
