use super::Canvas;

/// How a canvas is split into animation frames.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FrameKind {
    #[default]
    Whole,
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameRegion {
    pub width: usize,
    pub height: usize,
    /// Index of the region's top-left pixel in the canvas.
    pub start: usize,
}

impl FrameKind {
    /// Region of the 1-based `frame` of `canvas`.
    pub fn region(self, canvas: &Canvas, frame: usize) -> FrameRegion {
        let index = frame.saturating_sub(1);
        match self {
            Self::Whole => FrameRegion {
                width: canvas.width(),
                height: canvas.height(),
                start: 0,
            },
            Self::Horizontal => {
                let width = canvas.width() / canvas.frames();
                FrameRegion {
                    width,
                    height: canvas.height(),
                    start: index * width,
                }
            }
            Self::Vertical => {
                let height = canvas.height() / canvas.frames();
                FrameRegion {
                    width: canvas.width(),
                    height,
                    start: index * canvas.width() * height,
                }
            }
        }
    }
}
