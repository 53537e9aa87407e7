//! # Surfaces
//!
//! A surface is whatever the pagination controller paints on. It is driven
//! strictly in order: `begin_page`, any number of `paint`s, `commit_page`,
//! repeat. Sizes and coordinates are in points, top-left origin.

use serde::Serialize;

use crate::error::FolioError;
use crate::layout::Placement;

pub trait Surface {
    /// Open a new page of the given size.
    fn begin_page(&mut self, width: f64, height: f64) -> Result<(), FolioError>;

    /// Draw one run on the open page.
    fn paint(&mut self, placement: &Placement) -> Result<(), FolioError>;

    /// Close the open page and emit a page boundary.
    fn commit_page(&mut self) -> Result<(), FolioError>;
}

/// One committed page as seen by a [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageRecord {
    pub width: f64,
    pub height: f64,
    pub placements: Vec<Placement>,
}

/// A surface that keeps every placement in memory. Serializes to JSON for
/// inspection.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pages: Vec<PageRecord>,
    open: Option<PageRecord>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Committed pages, in order.
    pub fn pages(&self) -> &[PageRecord] {
        &self.pages
    }

    pub fn into_pages(self) -> Vec<PageRecord> {
        self.pages
    }
}

impl Surface for RecordingSurface {
    fn begin_page(&mut self, width: f64, height: f64) -> Result<(), FolioError> {
        if self.open.is_some() {
            return Err(FolioError::Render(
                "begin_page called while a page is still open".to_string(),
            ));
        }
        self.open = Some(PageRecord {
            width,
            height,
            placements: Vec::new(),
        });
        Ok(())
    }

    fn paint(&mut self, placement: &Placement) -> Result<(), FolioError> {
        let page = self
            .open
            .as_mut()
            .ok_or_else(|| FolioError::Render("paint called with no open page".to_string()))?;
        page.placements.push(placement.clone());
        Ok(())
    }

    fn commit_page(&mut self) -> Result<(), FolioError> {
        let page = self
            .open
            .take()
            .ok_or_else(|| FolioError::Render("commit_page called with no open page".to_string()))?;
        self.pages.push(page);
        Ok(())
    }
}
