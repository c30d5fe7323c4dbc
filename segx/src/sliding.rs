use super::SegmenterError;
use tracing::debug;

const SLIDING_WINDOW_DEFAULT_SIZE: usize = 1500;
const SLIDING_WINDOW_DEFAULT_OVERLAP: usize = 200;

/// A single window produced by [SlidingWindow::windows].
///
/// `start` is the byte offset of the window in the original input,
/// stable across runs for identical inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window<'a> {
    pub start: usize,
    pub text: &'a str,
}

/// The most basic of segmenters, used when a document has no detectable
/// structure.
///
/// Walks the input with windows of `size` bytes, each window starting
/// `size - overlap` bytes after the previous one, so any two adjacent
/// windows share exactly `overlap` bytes (except possibly the final,
/// shorter window).
#[derive(Debug, Clone)]
pub struct SlidingWindow {
    pub size: usize,
    pub overlap: usize,
}

impl SlidingWindow {
    /// Create a new `SlidingWindow` segmenter.
    /// Errors if `overlap` is not less than `size`.
    pub fn new(size: usize, overlap: usize) -> Result<Self, SegmenterError> {
        if overlap >= size {
            return Err(SegmenterError::Config(
                "overlap must be less than size".to_string(),
            ));
        }
        Ok(Self { size, overlap })
    }
}

impl Default for SlidingWindow {
    fn default() -> Self {
        Self::new(SLIDING_WINDOW_DEFAULT_SIZE, SLIDING_WINDOW_DEFAULT_OVERLAP)
            .expect("overlap is greater than size")
    }
}

impl SlidingWindow {
    pub fn windows<'a>(&self, input: &'a str) -> Result<Vec<Window<'a>>, SegmenterError> {
        let SlidingWindow { size, overlap } = *self;

        if input.is_empty() {
            return Ok(vec![]);
        }

        // Return whole input if it fits
        if input.len() <= size {
            return Ok(vec![Window {
                start: 0,
                text: input,
            }]);
        }

        let step = size - overlap;
        let input_size = input.len();

        let mut windows = vec![];
        let mut start = 0;

        loop {
            // Snap to first char boundary
            let mut window_start = start;
            while !input.is_char_boundary(window_start) {
                window_start -= 1;
            }

            // Snap to last char boundary
            let mut window_end = window_start + size;
            while window_end < input_size && !input.is_char_boundary(window_end) {
                window_end += 1;
            }

            if window_end >= input_size {
                windows.push(Window {
                    start: window_start,
                    text: &input[window_start..],
                });
                break;
            }

            windows.push(Window {
                start: window_start,
                text: &input[window_start..window_end],
            });

            start = window_start + step;
        }

        debug!(
            "Segmented {} windows, avg window size: {}",
            windows.len(),
            windows.iter().fold(0, |acc, el| acc + el.text.len()) / windows.len()
        );

        Ok(windows)
    }
}
