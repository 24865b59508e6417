//! Pagination driver
//!
//! Flows a renderer tree through a sequence of identical page content
//! rectangles: lay out on the current page, keep the split part, carry the
//! overflow to the next page, repeat until a `Full` result. Each finished
//! page holds the fragment that landed on it, so the concatenation of all
//! page fragments reproduces the original content.

use crate::draw::{DrawContext, DrawingSink};
use crate::error::Result;
use crate::geometry::Rect;
use crate::layout::{LayoutArea, LayoutContext, LayoutStatus};
use crate::renderer::Renderer;

/// Upper bound on pages emitted by [`paginate`], guarding against content
/// that never reports progress
const MAX_PAGES: u32 = 10_000;

/// One finished page: the content fragment placed on it
pub struct PageLayout {
  pub page: u32,
  /// The page content rectangle this fragment was laid out in
  pub area: Rect,
  pub root: Box<dyn Renderer>,
}

impl PageLayout {
  /// Draws this page's fragment into the sink
  pub fn draw(&mut self, sink: &mut dyn DrawingSink) -> Result<()> {
    self.root.draw(&mut DrawContext::new(sink))
  }
}

/// Flows `content` through consecutive pages with the same content
/// rectangle, up to [`MAX_PAGES`] of them.
///
/// # Examples
///
/// ```
/// use pageflow::geometry::Rect;
/// use pageflow::pagination::paginate;
/// use pageflow::renderer::{BlockRenderer, LineStackRenderer};
///
/// let root = BlockRenderer::new()
///   .child(Box::new(LineStackRenderer::new(30, 12.0, 100.0)));
/// let pages = paginate(Box::new(root), Rect::from_xywh(0.0, 0.0, 200.0, 120.0));
/// assert_eq!(pages.len(), 3);
/// ```
pub fn paginate(content: Box<dyn Renderer>, page_rect: Rect) -> Vec<PageLayout> {
  paginate_into(content, std::iter::repeat(page_rect).take(MAX_PAGES as usize))
}

/// Flows `content` through an explicit sequence of page content rectangles
/// (pages may differ, e.g. a distinct first page).
///
/// A `Nothing` result on a fresh page means the content cannot make
/// progress; the driver retries once with forced placement so the document
/// always terminates, logging what happened. An exhausted page sequence
/// stops the flow with the placed pages.
pub fn paginate_into(
  content: Box<dyn Renderer>,
  page_rects: impl IntoIterator<Item = Rect>,
) -> Vec<PageLayout> {
  let mut pages = Vec::new();
  let mut rects = page_rects.into_iter();
  let Some(mut rect) = rects.next() else {
    return pages;
  };
  let mut pending = Some(content);
  let mut page = 1u32;

  while let Some(mut current) = pending.take() {
    let mut floats = Vec::new();
    let mut ctx = LayoutContext::new(LayoutArea::new(page, rect), &mut floats);
    ctx.flow_bottom = Some(rect.max_y());
    let result = current.layout(&mut ctx);
    match result.status {
      LayoutStatus::Full => {
        pages.push(PageLayout {
          page,
          area: rect,
          root: result.split.unwrap_or(current),
        });
      }
      LayoutStatus::Partial => {
        let placed = result.split.unwrap_or(current);
        pages.push(PageLayout {
          page,
          area: rect,
          root: placed,
        });
        pending = result.overflow;
        page += 1;
        match rects.next() {
          Some(next) => rect = next,
          None => {
            log::warn!("page sequence exhausted with content remaining");
            break;
          }
        }
      }
      LayoutStatus::Nothing => {
        let mut retry = result.overflow.unwrap_or(current);
        if retry.properties().forced_placement {
          log::warn!(
            "content made no progress on page {page} even with forced placement; stopping"
          );
          break;
        }
        log::warn!(
          "content fit nowhere on page {page} (cause: {:?}); forcing placement",
          result.cause_of_nothing
        );
        retry.properties_mut().forced_placement = true;
        pending = Some(retry);
      }
    }
  }
  pages
}
