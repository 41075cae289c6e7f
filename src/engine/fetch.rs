// src/engine/fetch.rs
//
// Image acquisition seam. Network I/O belongs to the embedding application;
// the engine only needs something that turns a location into a decoded image.

use crate::engine::decoder::decode_image;
use crate::engine::limits::InputLimits;
use crate::error::{CollageError, Result};
use image::DynamicImage;
use tracing::{debug, warn};

/// Turns an image location into a decoded image.
pub trait ImageFetcher {
    fn fetch(&self, url: &str) -> Result<DynamicImage>;
}

impl<F> ImageFetcher for F
where
    F: Fn(&str) -> Result<DynamicImage>,
{
    fn fetch(&self, url: &str) -> Result<DynamicImage> {
        self(url)
    }
}

/// Adapts a byte loader (HTTP client, object store, filesystem) into an
/// [`ImageFetcher`] by decoding what it returns under `limits`.
pub struct DecodingFetcher<L> {
    loader: L,
    limits: InputLimits,
}

impl<L> DecodingFetcher<L>
where
    L: Fn(&str) -> Result<Vec<u8>>,
{
    pub fn new(loader: L, limits: InputLimits) -> Self {
        Self { loader, limits }
    }
}

impl<L> ImageFetcher for DecodingFetcher<L>
where
    L: Fn(&str) -> Result<Vec<u8>>,
{
    fn fetch(&self, url: &str) -> Result<DynamicImage> {
        let bytes = (self.loader)(url)?;
        decode_image(&bytes, &self.limits).map_err(|e| match e {
            CollageError::DecodeFailed { message } => CollageError::fetch_failed(url.to_string(), message),
            other => other,
        })
    }
}

/// Fetch every url in order. Failures are logged and skipped; if nothing
/// succeeds the result is `NoValidImages`.
pub fn collect_images<F>(fetcher: &F, urls: &[String], limits: &InputLimits) -> Result<Vec<DynamicImage>>
where
    F: ImageFetcher + ?Sized,
{
    limits.enforce_image_count(urls.len())?;

    let mut images = Vec::with_capacity(urls.len());
    for url in urls {
        match fetcher.fetch(url) {
            Ok(img) => {
                debug!(target: "collage::fetch", %url, width = img.width(), height = img.height(), "fetched");
                images.push(img);
            }
            Err(err) => {
                warn!(target: "collage::fetch", %url, error = %err, "skipping image");
            }
        }
    }

    if images.is_empty() {
        return Err(CollageError::no_valid_images());
    }
    Ok(images)
}
