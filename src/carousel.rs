use crate::models::display_record::DisplayRecord;
use crate::opt::*;

fn log(s: String) {
    log_if(s.as_str(), DbgFlg::Carousel);
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CarouselError {
    #[error("index {index} is out of range for a carousel of {count} item(s)")]
    IndexOutOfRange { index: usize, count: usize },
}

/// Focus state over an ordered, possibly empty, list of search results.
///
/// When `items` is non-empty `focused` is always a valid index into it; when
/// empty there is no focus and `next`/`previous` do nothing.
#[derive(Debug, Clone, Default)]
pub struct Carousel {
    items: Vec<DisplayRecord>,
    focused: Option<usize>,
}

impl Carousel {
    pub fn new(items: Vec<DisplayRecord>) -> Self {
        let mut carousel = Carousel::default();
        carousel.reinitialize(items);
        carousel
    }

    /// Replaces the items and resets focus to the first one, whatever the
    /// previous state was.
    pub fn reinitialize(&mut self, items: Vec<DisplayRecord>) {
        self.focused = if items.is_empty() { None } else { Some(0) };
        self.items = items;
        log(format!("Carousel reset with {} item(s)", self.items.len()));
    }

    pub fn next(&mut self) {
        if let Some(index) = self.focused {
            self.focused = Some((index + 1) % self.items.len());
        }
    }

    pub fn previous(&mut self) {
        if let Some(index) = self.focused {
            let count = self.items.len();
            self.focused = Some((index + count - 1) % count);
        }
    }

    pub fn jump_to(&mut self, index: usize) -> Result<(), CarouselError> {
        if index >= self.items.len() {
            return Err(CarouselError::IndexOutOfRange {
                index,
                count: self.items.len(),
            });
        }
        self.focused = Some(index);
        Ok(())
    }

    /// Follows a swipe: focus moves to the page nearest to `offset`.
    pub fn sync_to_offset(&mut self, offset: f64, page_width: f64) {
        if self.items.is_empty() || page_width.is_nan() || page_width <= 0.0 || !offset.is_finite() {
            return;
        }
        let page = (offset / page_width).round().max(0.0) as usize;
        let index = page.min(self.items.len() - 1);
        log(format!("Scroll offset {} synced to slide {}", offset, index));
        self.focused = Some(index);
    }

    /// Scroll offset that brings slide `index` into view.
    pub fn offset_for(index: usize, page_width: f64) -> f64 {
        index as f64 * page_width
    }

    pub fn current_index(&self) -> Option<usize> {
        self.focused
    }

    pub fn current_item(&self) -> Option<&DisplayRecord> {
        self.focused.and_then(|index| self.items.get(index))
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn items(&self) -> &[DisplayRecord] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Prev/next controls are only shown when there is something to move to.
    pub fn navigation_enabled(&self) -> bool {
        self.items.len() > 1
    }
}
