use embedded_graphics::{
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{Line, PrimitiveStyle, Rectangle},
};
use u8g2_fonts::types::{FontColor, HorizontalAlignment, VerticalPosition};

use crate::{
    config::{
        FOOTER_Y, MENU_FIRST_Y, MENU_LINE_STEP, MENU_VISIBLE_ROWS, SCREEN_WIDTH, TEXT_FONT,
        TITLE_RULE_Y, TITLE_Y,
    },
    setup::{Menu, MenuItem},
};

const MENU_MARKER_X: i32 = 0;
const MENU_LABEL_X: i32 = 10;
const CHOICE_BASELINE_Y: i32 = 50;
const CHOICE_BOX_WIDTH: u32 = 40;
const CHOICE_BOX_HEIGHT: u32 = 14;
pub(super) const YES_BOX_X: i32 = 10;
pub(super) const NO_BOX_X: i32 = 70;
pub(super) const CHOICE_BOX_TOP: i32 = CHOICE_BASELINE_Y - 10;

pub(super) fn draw_text<D>(display: &mut D, text: &str, x: i32, baseline_y: i32)
where
    D: DrawTarget<Color = BinaryColor>,
{
    draw_text_colored(display, text, x, baseline_y, BinaryColor::On);
}

fn draw_text_colored<D>(display: &mut D, text: &str, x: i32, baseline_y: i32, color: BinaryColor)
where
    D: DrawTarget<Color = BinaryColor>,
{
    let _ = TEXT_FONT.render_aligned(
        text,
        Point::new(x, baseline_y),
        VerticalPosition::Baseline,
        HorizontalAlignment::Left,
        FontColor::Transparent(color),
        display,
    );
}

pub(super) fn draw_title<D>(display: &mut D, title: &str)
where
    D: DrawTarget<Color = BinaryColor>,
{
    draw_text(display, title, 0, TITLE_Y);
    let _ = Line::new(Point::new(0, TITLE_RULE_Y), Point::new(SCREEN_WIDTH - 1, TITLE_RULE_Y))
        .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
        .draw(display);
}

pub(super) fn draw_footer<D>(display: &mut D, text: &str)
where
    D: DrawTarget<Color = BinaryColor>,
{
    draw_text(display, text, 0, FOOTER_Y);
}

/// Three visible rows with a `>` marker on the selection.
pub(super) fn draw_menu<D, T>(display: &mut D, menu: &Menu<T>)
where
    D: DrawTarget<Color = BinaryColor>,
    T: MenuItem,
{
    let offset = menu.scroll_offset(MENU_VISIBLE_ROWS);
    let rows = T::ITEMS.iter().enumerate().skip(offset).take(MENU_VISIBLE_ROWS);
    let mut y = MENU_FIRST_Y;
    for (index, item) in rows {
        if index == menu.index() {
            draw_text(display, ">", MENU_MARKER_X, y);
        }
        draw_text(display, item.label(), MENU_LABEL_X, y);
        y += MENU_LINE_STEP;
    }
}

/// YES/NO pair; the selected side is a filled box with inverted text.
pub(super) fn draw_choice<D>(display: &mut D, yes_selected: bool)
where
    D: DrawTarget<Color = BinaryColor>,
{
    for (label, box_x, selected) in [
        ("YES", YES_BOX_X, yes_selected),
        ("NO", NO_BOX_X, !yes_selected),
    ] {
        let text_color = if selected {
            let _ = Rectangle::new(
                Point::new(box_x, CHOICE_BOX_TOP),
                Size::new(CHOICE_BOX_WIDTH, CHOICE_BOX_HEIGHT),
            )
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(display);
            BinaryColor::Off
        } else {
            BinaryColor::On
        };
        draw_text_colored(display, label, box_x + 10, CHOICE_BASELINE_Y, text_color);
    }
}

/// Outlined bar filled to `filled / total`.
pub(super) fn draw_level_bar<D>(
    display: &mut D,
    top_left: Point,
    size: Size,
    filled: u32,
    total: u32,
) where
    D: DrawTarget<Color = BinaryColor>,
{
    let _ = Rectangle::new(top_left, size)
        .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
        .draw(display);
    let inner = size.width.saturating_sub(4);
    let width = inner * filled.min(total) / total.max(1);
    if width > 0 {
        let _ = Rectangle::new(
            top_left + Point::new(2, 2),
            Size::new(width, size.height.saturating_sub(4)),
        )
        .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
        .draw(display);
    }
}
