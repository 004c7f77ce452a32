use crate::core::Viewport;
use crate::error::ChartResult;
use crate::render::{RenderFrame, Renderer};

/// No-op renderer used by tests and headless engine usage.
///
/// It still validates frame content so tests can catch invalid geometry before
/// a real backend is involved, and keeps the last presented frame for
/// inspection.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub size: Viewport,
    pub render_count: usize,
    pub last_line_count: usize,
    pub last_rect_count: usize,
    pub last_marker_count: usize,
    pub last_text_count: usize,
    pub last_frame: Option<RenderFrame>,
}

impl NullRenderer {
    #[must_use]
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            size: Viewport::new(width, height),
            ..Self::default()
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.size = Viewport::new(width, height);
    }
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.render_count += 1;
        self.last_line_count = frame.lines.len();
        self.last_rect_count = frame.rects.len();
        self.last_marker_count = frame.markers.len();
        self.last_text_count = frame.texts.len();
        self.last_frame = Some(frame.clone());
        Ok(())
    }

    fn surface_size(&self) -> Viewport {
        self.size
    }
}
