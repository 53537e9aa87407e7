//! # Pagination Controller
//!
//! Drives a [`Surface`] page by page. For every page, in document order:
//! size the surface, place every item at the page origin, paint the
//! placements, commit. Pages share no layout state.

use log::debug;

use crate::error::FolioError;
use crate::layout::place_page;
use crate::surface::Surface;
use crate::tree::Layout;
use crate::units::to_points;

/// Render every page of `layout` onto `surface`. Returns the number of
/// pages committed.
pub fn paginate<S: Surface + ?Sized>(layout: &Layout, surface: &mut S) -> Result<usize, FolioError> {
    for (page_idx, page) in layout.pages.iter().enumerate() {
        let (width, height) = (to_points(page.width), to_points(page.height));
        surface.begin_page(width, height)?;

        let placements = place_page(&page.items);
        debug!(
            target: "folio::paginate",
            "page {}: {:.2} x {:.2} pt, {} placements",
            page_idx + 1,
            width,
            height,
            placements.len()
        );
        for placement in &placements {
            surface.paint(placement)?;
        }

        surface.commit_page()?;
    }
    Ok(layout.pages.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FontStyle, FontWeight, Metadata};
    use crate::surface::RecordingSurface;
    use crate::tree::{LayoutNode, PageLayout, TextBox};

    fn text(x_shift: f64) -> LayoutNode {
        LayoutNode::TextBox(TextBox {
            text: "a".to_string(),
            font_family: "Helvetica".to_string(),
            font_size: 16.0,
            font_weight: FontWeight::Normal,
            font_style: FontStyle::Normal,
            text_direction: None,
            shift_x: x_shift,
            shift_y: 0.0,
            width: 10.0,
            height: 10.0,
        })
    }

    fn layout(pages: Vec<PageLayout>) -> Layout {
        Layout {
            pages,
            metadata: Metadata::default(),
        }
    }

    #[test]
    fn each_page_is_sized_in_points() {
        let l = layout(vec![
            PageLayout { width: 100.0, height: 100.0, items: vec![] },
            PageLayout { width: 50.0, height: 50.0, items: vec![] },
        ]);
        let mut surface = RecordingSurface::new();
        assert_eq!(paginate(&l, &mut surface).unwrap(), 2);
        let pages = surface.pages();
        assert_eq!((pages[0].width, pages[0].height), (75.0, 75.0));
        assert_eq!((pages[1].width, pages[1].height), (37.5, 37.5));
    }

    #[test]
    fn origin_resets_on_every_page() {
        let l = layout(vec![
            PageLayout { width: 100.0, height: 100.0, items: vec![text(40.0)] },
            PageLayout { width: 100.0, height: 100.0, items: vec![text(0.0)] },
        ]);
        let mut surface = RecordingSurface::new();
        paginate(&l, &mut surface).unwrap();
        assert_eq!(surface.pages()[0].placements[0].x, 30.0);
        assert_eq!(surface.pages()[1].placements[0].x, 0.0);
    }

    #[test]
    fn page_items_all_start_at_origin() {
        let l = layout(vec![PageLayout {
            width: 100.0,
            height: 100.0,
            items: vec![text(0.0), text(0.0)],
        }]);
        let mut surface = RecordingSurface::new();
        paginate(&l, &mut surface).unwrap();
        let xs: Vec<f64> = surface.pages()[0].placements.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![0.0, 0.0]);
    }
}
