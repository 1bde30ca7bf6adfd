//! Rasterizing a redraw plan
//!
//! Quadrilaterals are filled as two triangles sharing a diagonal and
//! outlined as four one-pixel lines. The hour-hand outline is drawn over
//! whichever fill was used, so the hand silhouette stays visible when the
//! battery gauge is short.

use embedded_graphics::draw_target::DrawTarget;
use embedded_graphics::geometry::{Dimensions, Point};
use embedded_graphics::mono_font::ascii::{FONT_10X20, FONT_6X10};
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::PixelColor;
use embedded_graphics::primitives::{Line, Primitive, PrimitiveStyle, Triangle};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};
use embedded_graphics::Drawable;

use gnomon_core::clock::WallClock;
use gnomon_core::face::{HandFill, Palette, RedrawPlan};
use gnomon_core::hands::{
    self, battery_polygon, place_polygon, use_wide_hand, HandWidth, HOUR_HAND,
};

use crate::{calendar, layout};

/// Background/foreground color pair for one palette
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme<C> {
    pub background: C,
    pub foreground: C,
}

impl<C: PixelColor> Theme<C> {
    pub fn new(background: C, foreground: C) -> Self {
        Self {
            background,
            foreground,
        }
    }

    /// Map a palette onto concrete colors: `Normal` is light-on-dark
    pub fn from_palette(palette: Palette, dark: C, light: C) -> Self {
        match palette {
            Palette::Normal => Self::new(dark, light),
            Palette::Inverted => Self::new(light, dark),
        }
    }
}

/// Draw one full frame from a plan
///
/// Text is always drawn; `skip_hands` only blanks the hand so the
/// charge blink never hides the number or calendar.
pub fn draw_face<D>(
    target: &mut D,
    plan: &RedrawPlan,
    clock: &WallClock,
    theme: &Theme<D::Color>,
) -> Result<(), D::Error>
where
    D: DrawTarget,
{
    let bounds = target.bounding_box();
    target.clear(theme.background)?;

    let number_style = MonoTextStyle::new(&FONT_10X20, theme.foreground);
    let text_style = MonoTextStyle::new(&FONT_6X10, theme.foreground);

    let centered = TextStyleBuilder::new()
        .alignment(Alignment::Center)
        .baseline(Baseline::Middle)
        .build();
    let number = calendar::format_number(plan.number);
    Text::with_text_style(
        number.as_str(),
        layout::number_box(&bounds).center(),
        number_style,
        centered,
    )
    .draw(target)?;

    let top_left = TextStyleBuilder::new()
        .alignment(Alignment::Left)
        .baseline(Baseline::Top)
        .build();
    let date = calendar::format_date(clock);
    Text::with_text_style(
        date.as_str(),
        layout::date_box(&bounds).top_left,
        text_style,
        top_left,
    )
    .draw(target)?;

    let top_right = TextStyleBuilder::new()
        .alignment(Alignment::Right)
        .baseline(Baseline::Top)
        .build();
    let weekday_box = layout::weekday_box(&bounds);
    let weekday_anchor = Point::new(
        weekday_box.top_left.x + weekday_box.size.width as i32,
        weekday_box.top_left.y,
    );
    Text::with_text_style(
        calendar::format_weekday(clock),
        weekday_anchor,
        text_style,
        top_right,
    )
    .draw(target)?;

    if plan.skip_hands {
        return Ok(());
    }

    let center = layout::center(&bounds);
    let center = hands::Point::new(center.x, center.y);

    let fill = match plan.fill {
        HandFill::Battery { index } => {
            let width = if use_wide_hand(plan.angle) {
                HandWidth::Wide
            } else {
                HandWidth::Narrow
            };
            place_polygon(&battery_polygon(index, width), plan.angle, center)
        }
        HandFill::Hour => place_polygon(&HOUR_HAND, plan.angle, center),
    };
    fill_polygon(target, &fill, theme.foreground)?;

    let outline = place_polygon(&HOUR_HAND, plan.angle, center);
    outline_polygon(target, &outline, theme.foreground)?;

    Ok(())
}

/// Fill a quadrilateral as two triangles
pub fn fill_polygon<D>(
    target: &mut D,
    quad: &[hands::Point; 4],
    color: D::Color,
) -> Result<(), D::Error>
where
    D: DrawTarget,
{
    let style = PrimitiveStyle::with_fill(color);
    let [a, b, c, d] = quad.map(to_screen);
    Triangle::new(a, b, c).into_styled(style).draw(target)?;
    Triangle::new(a, c, d).into_styled(style).draw(target)?;
    Ok(())
}

/// Outline a quadrilateral as four one-pixel lines
pub fn outline_polygon<D>(
    target: &mut D,
    quad: &[hands::Point; 4],
    color: D::Color,
) -> Result<(), D::Error>
where
    D: DrawTarget,
{
    let style = PrimitiveStyle::with_stroke(color, 1);
    let points = quad.map(to_screen);
    for i in 0..4 {
        Line::new(points[i], points[(i + 1) % 4])
            .into_styled(style)
            .draw(target)?;
    }
    Ok(())
}

fn to_screen(p: hands::Point) -> Point {
    Point::new(p.x, p.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::mock_display::MockDisplay;
    use embedded_graphics::pixelcolor::BinaryColor;
    use embedded_graphics::primitives::Rectangle;

    fn quad(x0: i32, y0: i32, x1: i32, y1: i32) -> [hands::Point; 4] {
        [
            hands::Point::new(x0, y0),
            hands::Point::new(x1, y0),
            hands::Point::new(x1, y1),
            hands::Point::new(x0, y1),
        ]
    }

    #[test]
    fn filled_quad_covers_the_rectangle() {
        let mut display = MockDisplay::new();
        display.set_allow_overdraw(true);
        fill_polygon(&mut display, &quad(2, 2, 10, 8), BinaryColor::On).unwrap();

        let mut expected = MockDisplay::new();
        Rectangle::with_corners(Point::new(2, 2), Point::new(10, 8))
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(&mut expected)
            .unwrap();

        display.assert_eq(&expected);
    }

    #[test]
    fn outlined_quad_matches_rectangle_border() {
        let mut display = MockDisplay::new();
        display.set_allow_overdraw(true);
        outline_polygon(&mut display, &quad(2, 2, 10, 8), BinaryColor::On).unwrap();

        let mut expected = MockDisplay::new();
        Rectangle::with_corners(Point::new(2, 2), Point::new(10, 8))
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
            .draw(&mut expected)
            .unwrap();

        display.assert_eq(&expected);
    }

    #[test]
    fn degenerate_battery_sliver_draws() {
        // Index 0 collapses the gauge to a zero-height quad
        let mut display = MockDisplay::new();
        display.set_allow_overdraw(true);
        let sliver = battery_polygon(0, HandWidth::Narrow);
        let placed = place_polygon(&sliver, 0, hands::Point::new(32, 0));
        fill_polygon(&mut display, &placed, BinaryColor::On).unwrap();
    }

    fn plan(skip_hands: bool) -> RedrawPlan {
        RedrawPlan {
            skip_hands,
            palette: Palette::Normal,
            number: 37,
            angle: hands::hour_angle(14),
            fill: HandFill::Battery { index: 9 },
        }
    }

    fn noon() -> WallClock {
        WallClock {
            hour: 14,
            minute: 37,
            second: 0,
            day: 14,
            month: 5,
            weekday: 0,
        }
    }

    fn loose_display() -> MockDisplay<BinaryColor> {
        let mut display = MockDisplay::new();
        display.set_allow_overdraw(true);
        display.set_allow_out_of_bounds_drawing(true);
        display
    }

    #[test]
    fn full_frame_draws_without_error() {
        let theme = Theme::from_palette(Palette::Normal, BinaryColor::Off, BinaryColor::On);
        let mut display = loose_display();
        draw_face(&mut display, &plan(false), &noon(), &theme).unwrap();
    }

    #[test]
    fn blanked_frame_still_draws_text() {
        let theme = Theme::from_palette(Palette::Normal, BinaryColor::Off, BinaryColor::On);

        let mut blanked = loose_display();
        draw_face(&mut blanked, &plan(true), &noon(), &theme).unwrap();

        // A blanked frame must differ from a full frame only by the hand
        let mut full = loose_display();
        draw_face(&mut full, &plan(false), &noon(), &theme).unwrap();
        assert_ne!(blanked.affected_area(), Rectangle::zero());
        assert_ne!(blanked, full);
    }

    #[test]
    fn hour_fill_draws_without_error() {
        let theme = Theme::from_palette(Palette::Inverted, BinaryColor::Off, BinaryColor::On);
        let mut display = loose_display();
        let mut plan = plan(false);
        plan.fill = HandFill::Hour;
        draw_face(&mut display, &plan, &noon(), &theme).unwrap();
    }
}
