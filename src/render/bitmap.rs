// File: ./src/render/bitmap.rs
//! Monochrome drawing with embedded-graphics.
//!
//! The drawing routines are generic over `DrawTarget`, so the same layout can
//! go straight to an e-paper driver's frame buffer. `Canvas` is the in-memory
//! target used for PNG output.
use crate::layout::{Body, NO_TASKS, Snapshot, truncate};
use crate::model::{Glyph, TodoLine};
use anyhow::{Result, anyhow};
use embedded_graphics::mono_font::iso_8859_1::{
    FONT_7X13, FONT_9X15, FONT_9X15_BOLD, FONT_9X18_BOLD,
};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Polyline, PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};
use std::convert::Infallible;
use std::io::Cursor;

pub const MARGIN_X: i32 = 10;
pub const TITLE_Y: i32 = 10;
pub const LIST_TOP: i32 = 50;
pub const TASK_PITCH: i32 = 30;
const DETAIL_OFFSET: i32 = 20;
const DETAIL_PITCH: i32 = 16;
const GROUP_PITCH: i32 = 26;
const MORE_PITCH: i32 = 20;
const CHECKBOX_SIZE: u32 = 13;
const GLYPH_GAP: i32 = 7;

const TITLE_FONT: &MonoFont = &FONT_9X18_BOLD;
const TASK_FONT: &MonoFont = &FONT_9X15;
const STRONG_FONT: &MonoFont = &FONT_9X15_BOLD;
const DETAIL_FONT: &MonoFont = &FONT_7X13;

/// 1-bit frame buffer; `On` is ink, `Off` is paper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<BinaryColor>,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![BinaryColor::Off; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<BinaryColor> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Inked pixels inside the given row band `[top, bottom)`.
    pub fn ink_in_rows(&self, top: u32, bottom: u32) -> usize {
        let bottom = bottom.min(self.height);
        (top..bottom)
            .flat_map(|y| (0..self.width).map(move |x| (x, y)))
            .filter(|&(x, y)| self.pixel(x, y) == Some(BinaryColor::On))
            .count()
    }

    pub fn to_png(&self) -> Result<Vec<u8>> {
        let luma: Vec<u8> = self
            .pixels
            .iter()
            .map(|p| if p.is_on() { 0 } else { 255 })
            .collect();
        let img = image::GrayImage::from_raw(self.width, self.height, luma)
            .ok_or_else(|| anyhow!("Canvas buffer does not match {}x{}", self.width, self.height))?;
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png)?;
        Ok(out.into_inner())
    }
}

impl OriginDimensions for Canvas {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl DrawTarget for Canvas {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x < 0 || point.y < 0 {
                continue;
            }
            let (x, y) = (point.x as u32, point.y as u32);
            if x < self.width && y < self.height {
                self.pixels[y as usize * self.width as usize + x as usize] = color;
            }
        }
        Ok(())
    }
}

/// Draws `snapshot` onto a fresh canvas. Returns the canvas and how many
/// task lines were left out for lack of room.
pub fn render(snapshot: &Snapshot, width: u32, height: u32) -> (Canvas, usize) {
    let mut canvas = Canvas::new(width, height);
    let hidden = match draw_snapshot(&mut canvas, snapshot) {
        Ok(hidden) => hidden,
        Err(never) => match never {},
    };
    (canvas, hidden)
}

fn max_chars(font: &MonoFont, x: i32, width: u32) -> usize {
    let advance = (font.character_size.width + font.character_spacing).max(1) as i32;
    ((width as i32 - x - MARGIN_X).max(0) / advance) as usize
}

fn advance_of(font: &MonoFont, text: &str) -> i32 {
    (font.character_size.width + font.character_spacing) as i32 * text.chars().count() as i32
}

fn draw_text<D>(target: &mut D, text: &str, at: Point, font: &MonoFont) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let width = target.bounding_box().size.width;
    let fitted = truncate(text, max_chars(font, at.x, width));
    Text::with_baseline(
        &fitted,
        at,
        MonoTextStyle::new(font, BinaryColor::On),
        Baseline::Top,
    )
    .draw(target)?;
    Ok(())
}

/// Draws the glyph at `at` and returns the x where the task text starts.
fn draw_glyph<D>(target: &mut D, glyph: Glyph, at: Point) -> Result<i32, D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let stroke = PrimitiveStyle::with_stroke(BinaryColor::On, 1);
    match glyph {
        Glyph::Unchecked | Glyph::Checked => {
            let origin = at + Point::new(0, 1);
            Rectangle::new(origin, Size::new(CHECKBOX_SIZE, CHECKBOX_SIZE))
                .into_styled(stroke)
                .draw(target)?;
            if glyph == Glyph::Checked {
                let tick = [
                    origin + Point::new(3, 6),
                    origin + Point::new(5, 9),
                    origin + Point::new(10, 3),
                ];
                Polyline::new(&tick)
                    .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 2))
                    .draw(target)?;
            }
            Ok(at.x + CHECKBOX_SIZE as i32 + GLYPH_GAP)
        }
        Glyph::Priority(p) => {
            Text::with_baseline(
                p.label(),
                at,
                MonoTextStyle::new(STRONG_FONT, BinaryColor::On),
                Baseline::Top,
            )
            .draw(target)?;
            Ok(at.x + advance_of(STRONG_FONT, p.label()) + GLYPH_GAP)
        }
    }
}

fn line_height(line: &TodoLine) -> i32 {
    TASK_PITCH + DETAIL_PITCH * line.details.len() as i32
}

pub fn draw_snapshot<D>(target: &mut D, snapshot: &Snapshot) -> Result<usize, D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    target.clear(BinaryColor::Off)?;
    let height = target.bounding_box().size.height as i32;

    draw_text(
        target,
        &snapshot.title,
        Point::new(MARGIN_X, TITLE_Y),
        TITLE_FONT,
    )?;

    let lines = match &snapshot.body {
        Body::Tasks(lines) => lines,
        Body::Empty => {
            draw_text(target, NO_TASKS, Point::new(MARGIN_X, LIST_TOP), TASK_FONT)?;
            return Ok(0);
        }
        Body::Prompt(msg) => {
            draw_text(target, msg, Point::new(MARGIN_X, LIST_TOP), TASK_FONT)?;
            return Ok(0);
        }
        Body::Error(msg) => {
            draw_text(target, msg, Point::new(MARGIN_X, height / 2), TASK_FONT)?;
            return Ok(0);
        }
    };

    let mut y = LIST_TOP;
    let mut group: Option<&str> = None;
    for (i, line) in lines.iter().enumerate() {
        let heading = line.group.as_deref().filter(|g| Some(*g) != group);
        let needed = line_height(line) + if heading.is_some() { GROUP_PITCH } else { 0 };
        let reserve = if i + 1 < lines.len() { MORE_PITCH } else { 0 };
        if y + needed + reserve > height {
            let hidden = lines.len() - i;
            draw_text(
                target,
                &format!("+{} more", hidden),
                Point::new(MARGIN_X, y),
                DETAIL_FONT,
            )?;
            return Ok(hidden);
        }

        if let Some(name) = heading {
            draw_text(target, name, Point::new(MARGIN_X, y), STRONG_FONT)?;
            group = Some(name);
            y += GROUP_PITCH;
        }

        let text_x = draw_glyph(target, line.glyph, Point::new(MARGIN_X, y))?;
        draw_text(target, &line.text, Point::new(text_x, y), TASK_FONT)?;
        for (n, detail) in line.details.iter().enumerate() {
            let dy = y + DETAIL_OFFSET + DETAIL_PITCH * n as i32;
            draw_text(target, detail, Point::new(text_x, dy), DETAIL_FONT)?;
        }
        y += line_height(line);
    }
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Priority;

    fn line(glyph: Glyph, text: &str) -> TodoLine {
        TodoLine {
            glyph,
            text: text.to_string(),
            details: vec![],
            group: None,
        }
    }

    fn tasks(lines: Vec<TodoLine>) -> Snapshot {
        Snapshot {
            title: "My Todo List".to_string(),
            body: Body::Tasks(lines),
        }
    }

    #[test]
    fn test_canvas_clips_out_of_bounds() {
        let mut canvas = Canvas::new(4, 4);
        canvas
            .draw_iter([
                Pixel(Point::new(-1, 0), BinaryColor::On),
                Pixel(Point::new(9, 9), BinaryColor::On),
                Pixel(Point::new(2, 3), BinaryColor::On),
            ])
            .unwrap();
        assert_eq!(canvas.pixel(2, 3), Some(BinaryColor::On));
        assert_eq!(canvas.ink_in_rows(0, 4), 1);
        assert_eq!(canvas.pixel(4, 0), None);
    }

    #[test]
    fn test_rows_are_inked_per_task() {
        let snap = tasks(vec![
            line(Glyph::Unchecked, "Buy milk"),
            line(Glyph::Checked, "Pay rent"),
        ]);
        let (canvas, hidden) = render(&snap, 400, 300);
        assert_eq!(hidden, 0);
        assert!(canvas.ink_in_rows(TITLE_Y as u32, LIST_TOP as u32) > 0);
        let first = LIST_TOP as u32;
        let second = first + TASK_PITCH as u32;
        assert!(canvas.ink_in_rows(first, second) > 0);
        assert!(canvas.ink_in_rows(second, second + TASK_PITCH as u32) > 0);
        assert_eq!(canvas.ink_in_rows(second + TASK_PITCH as u32, 300), 0);
    }

    #[test]
    fn test_checked_box_has_more_ink_than_empty_box() {
        let (open, _) = render(&tasks(vec![line(Glyph::Unchecked, "")]), 100, 100);
        let (done, _) = render(&tasks(vec![line(Glyph::Checked, "")]), 100, 100);
        let band = (LIST_TOP as u32, (LIST_TOP + TASK_PITCH) as u32);
        assert!(done.ink_in_rows(band.0, band.1) > open.ink_in_rows(band.0, band.1));
    }

    #[test]
    fn test_overflow_reports_hidden_lines() {
        let lines = (0..20)
            .map(|i| line(Glyph::Priority(Priority::P3), &format!("Task {}", i)))
            .collect();
        let (_, hidden) = render(&tasks(lines), 300, 200);
        // 200px leaves room below the list top for four rows plus the marker.
        assert_eq!(hidden, 16);
    }

    #[test]
    fn test_error_is_drawn_mid_height() {
        let snap = Snapshot {
            title: "T".to_string(),
            body: Body::Error("Error: boom".to_string()),
        };
        let (canvas, _) = render(&snap, 200, 200);
        assert_eq!(canvas.ink_in_rows(LIST_TOP as u32, 100), 0);
        assert!(canvas.ink_in_rows(100, 120) > 0);
    }

    #[test]
    fn test_png_header() {
        let (canvas, _) = render(&tasks(vec![]), 32, 16);
        let png = canvas.to_png().unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }
}
