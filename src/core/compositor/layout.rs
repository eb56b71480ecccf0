//! Template geometry
//!
//! Pure "contain" fit of a source rectangle inside the template canvas.

use super::{TEMPLATE_HEIGHT, TEMPLATE_WIDTH};

/// Where and how large the source is drawn on the canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemplateLayout {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub scaled_width: f64,
    pub scaled_height: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

/// Integer draw rectangle after rounding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawRect {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

impl TemplateLayout {
    /// Fit a `width`×`height` source into the 1280×720 template.
    ///
    /// Returns `None` when the source has no pixels.
    pub fn fit(width: u32, height: u32) -> Option<Self> {
        Self::fit_within(width, height, TEMPLATE_WIDTH, TEMPLATE_HEIGHT)
    }

    /// Fit a source into an arbitrary canvas
    pub fn fit_within(width: u32, height: u32, canvas_width: u32, canvas_height: u32) -> Option<Self> {
        if width == 0 || height == 0 || canvas_width == 0 || canvas_height == 0 {
            return None;
        }

        let canvas_w = canvas_width as f64;
        let canvas_h = canvas_height as f64;
        let target_ratio = canvas_w / canvas_h;
        let source_ratio = width as f64 / height as f64;

        let (scaled_width, scaled_height) = if source_ratio > target_ratio {
            (canvas_w, canvas_w / source_ratio)
        } else {
            (canvas_h * source_ratio, canvas_h)
        };

        Some(Self {
            canvas_width,
            canvas_height,
            scaled_width,
            scaled_height,
            offset_x: (canvas_w - scaled_width) / 2.0,
            offset_y: (canvas_h - scaled_height) / 2.0,
        })
    }

    /// Round to whole pixels. Sizes are clamped to `1..=canvas`.
    pub fn draw_rect(&self) -> DrawRect {
        let width = (self.scaled_width.round() as u32).clamp(1, self.canvas_width);
        let height = (self.scaled_height.round() as u32).clamp(1, self.canvas_height);

        DrawRect {
            x: self.offset_x.round() as i64,
            y: self.offset_y.round() as i64,
            width,
            height,
        }
    }

    /// True when the source already has the canvas aspect ratio
    pub fn fills_canvas(&self) -> bool {
        let rect = self.draw_rect();
        rect.width == self.canvas_width && rect.height == self.canvas_height
    }
}
