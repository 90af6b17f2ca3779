//! Lightbox navigation over an ordered gallery.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryImage {
    pub src: String,
    pub alt: String,
}

impl GalleryImage {
    pub fn new(src: impl Into<String>, alt: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            alt: alt.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GalleryError {
    #[error("gallery has no images")]
    Empty,

    #[error("image {index} out of range (gallery has {len} images)")]
    OutOfRange { index: usize, len: usize },
}

/// Overlay showing one enlarged image at a time.
///
/// The current index is owned here; navigation wraps in both directions.
#[derive(Debug, Clone)]
pub struct Lightbox {
    images: Vec<GalleryImage>,
    index: usize,
    open: bool,
}

impl Lightbox {
    pub fn new(images: Vec<GalleryImage>) -> Self {
        Self {
            images,
            index: 0,
            open: false,
        }
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Show the image at `index`
    pub fn open(&mut self, index: usize) -> Result<&GalleryImage, GalleryError> {
        self.jump_to(index)?;
        self.open = true;
        tracing::debug!(index, "lightbox opened");
        Ok(&self.images[self.index])
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Move to `index` without changing visibility
    pub fn jump_to(&mut self, index: usize) -> Result<&GalleryImage, GalleryError> {
        if self.images.is_empty() {
            return Err(GalleryError::Empty);
        }
        if index >= self.images.len() {
            return Err(GalleryError::OutOfRange {
                index,
                len: self.images.len(),
            });
        }
        self.index = index;
        Ok(&self.images[index])
    }

    /// Advance one image, wrapping to the first. No-op while closed.
    pub fn next(&mut self) -> Option<&GalleryImage> {
        self.step(1)
    }

    /// Go back one image, wrapping to the last. No-op while closed.
    pub fn previous(&mut self) -> Option<&GalleryImage> {
        self.step(-1)
    }

    fn step(&mut self, direction: isize) -> Option<&GalleryImage> {
        if !self.open || self.images.is_empty() {
            return None;
        }
        let len = self.images.len() as isize;
        self.index = (self.index as isize + direction).rem_euclid(len) as usize;
        self.images.get(self.index)
    }

    /// Image on screen, if the lightbox is open
    pub fn current(&self) -> Option<&GalleryImage> {
        if self.open {
            self.images.get(self.index)
        } else {
            None
        }
    }

    /// Position label such as `2 / 5`
    pub fn counter(&self) -> Option<String> {
        self.current()
            .map(|_| format!("{} / {}", self.index + 1, self.images.len()))
    }
}
