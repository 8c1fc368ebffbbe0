//! Inline image descriptors.
//!
//! Decoding and scaling bitmaps is the host's job. The core only keeps an
//! opaque [`Bitmap`] handle next to the image's [`ImageSource`], and hands out
//! [`ImageRequest`] tickets so a late load result for a superseded request can
//! be recognized and dropped.

use std::any::Any;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Character that stands in for an inline image in the text buffer.
pub const OBJECT_REPLACEMENT: char = '\u{FFFC}';

/// Where an image comes from.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ImageSource {
    /// Local file path.
    File(PathBuf),
    /// Content or network URI.
    Uri(String),
}

impl ImageSource {
    /// Build a source from a markup `src` attribute.
    ///
    /// Anything with a URI scheme is kept as a URI, the rest is a file path.
    #[must_use]
    pub fn from_locator(locator: &str) -> Self {
        if locator.contains("://") || locator.starts_with("data:") {
            Self::Uri(locator.to_string())
        } else {
            Self::File(PathBuf::from(locator))
        }
    }

    /// Locator string as written to markup.
    #[must_use]
    pub fn locator(&self) -> String {
        match self {
            Self::File(path) => path.to_string_lossy().into_owned(),
            Self::Uri(uri) => uri.clone(),
        }
    }
}

/// Opaque handle to a decoded bitmap.
///
/// Two handles are equal only if they point at the same decoded image.
#[derive(Clone)]
pub struct Bitmap(Arc<dyn Any + Send + Sync>);

impl Bitmap {
    /// Wrap a host-side decoded image.
    #[must_use]
    pub fn new<T: Any + Send + Sync>(image: T) -> Self {
        Self(Arc::new(image))
    }

    /// Borrow the host-side image back.
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }
}

impl PartialEq for Bitmap {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Bitmap").field(&Arc::as_ptr(&self.0)).finish()
    }
}

/// Payload of an image span: the source plus its bitmap, if one was resolved.
#[derive(Clone, Debug, PartialEq)]
pub struct InlineImage {
    pub source: ImageSource,
    pub bitmap: Option<Bitmap>,
}

impl InlineImage {
    #[must_use]
    pub fn new(source: ImageSource, bitmap: Option<Bitmap>) -> Self {
        Self { source, bitmap }
    }
}

/// Ticket for an asynchronous image load.
///
/// Only the most recent ticket handed out by an editor can complete; older
/// ones are superseded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageRequest {
    pub(crate) id: u64,
    /// What to load.
    pub source: ImageSource,
    /// Width the host should scale the decoded bitmap to.
    pub max_width: u32,
}

impl ImageRequest {
    /// Request sequence number (monotonic per editor).
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }
}

/// Maps an image reference found in markup to a displayable bitmap.
pub trait ImageResolver {
    fn resolve(&mut self, locator: &str) -> Option<Bitmap>;
}

impl<F> ImageResolver for F
where
    F: FnMut(&str) -> Option<Bitmap>,
{
    fn resolve(&mut self, locator: &str) -> Option<Bitmap> {
        self(locator)
    }
}

/// Resolver that never produces a bitmap. Images keep their source only.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoImages;

impl ImageResolver for NoImages {
    fn resolve(&mut self, _locator: &str) -> Option<Bitmap> {
        None
    }
}
