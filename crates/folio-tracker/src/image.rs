#![forbid(unsafe_code)]

//! Image with a one-shot placeholder fallback.
//!
//! The first load error swaps the source to the placeholder. Later errors
//! (including a broken placeholder) are ignored, so a missing asset can
//! never turn into a retry loop.

/// An image source plus its fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSlot {
    src: String,
    placeholder: String,
    fell_back: bool,
}

impl ImageSlot {
    /// An image that will fall back to `placeholder` on error.
    #[must_use]
    pub fn new(src: impl Into<String>, placeholder: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            placeholder: placeholder.into(),
            fell_back: false,
        }
    }

    /// Source the `<img>` should currently point at.
    #[must_use]
    pub fn current_src(&self) -> &str {
        if self.fell_back {
            &self.placeholder
        } else {
            &self.src
        }
    }

    /// Handle a load error. Returns `true` if the source changed.
    pub fn on_error(&mut self) -> bool {
        if self.fell_back {
            return false;
        }
        self.fell_back = true;
        tracing::debug!(src = %self.src, "image failed, using placeholder");
        true
    }

    /// Whether the placeholder is in use.
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.fell_back
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_error_swaps_to_placeholder() {
        let mut img = ImageSlot::new("/me.jpg", "/placeholder.svg");
        assert_eq!(img.current_src(), "/me.jpg");
        assert!(img.on_error());
        assert_eq!(img.current_src(), "/placeholder.svg");
        assert!(img.is_fallback());
    }

    #[test]
    fn later_errors_are_ignored() {
        let mut img = ImageSlot::new("/me.jpg", "/placeholder.svg");
        img.on_error();
        assert!(!img.on_error());
        assert!(!img.on_error());
        assert_eq!(img.current_src(), "/placeholder.svg");
    }
}
