use crate::config::FrameConfig;

/// Pixel geometry of a framed photo.
///
/// The canvas is the photo plus a border on all four sides plus the caption
/// strip underneath. Without a frame the border collapses to zero and the
/// captions are inset by `pad` instead, so they do not touch the canvas edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameLayout {
    pub photo_width: u32,
    pub photo_height: u32,
    pub border: u32,
    pub pad: u32,
    pub canvas_width: u32,
    pub canvas_height: u32,
}

impl FrameLayout {
    pub fn new(photo_width: u32, photo_height: u32, frame: &FrameConfig) -> Self {
        let (border, pad) = if frame.no_frame {
            (0, frame.border)
        } else {
            (frame.border, 0)
        };

        Self {
            photo_width,
            photo_height,
            border,
            pad,
            canvas_width: photo_width + border * 2,
            canvas_height: photo_height + border * 2 + frame.caption_height + pad,
        }
    }

    /// Top-left corner of the photo on the canvas.
    pub fn photo_origin(&self) -> (u32, u32) {
        (self.border, self.border)
    }

    /// X where left-aligned caption lines start.
    pub fn left_x(&self) -> i32 {
        (self.border + self.pad) as i32
    }

    /// X where right-aligned caption lines end.
    pub fn right_x(&self) -> i32 {
        self.photo_width as i32 + self.border as i32 - self.pad as i32
    }

    /// Baseline of caption line `line` (1-based), given the height of one line.
    pub fn baseline(&self, line: u32, line_height: u32) -> i32 {
        (self.photo_height + self.border * 2 + line_height * line + self.pad) as i32
    }
}
