use serde::Deserialize;

pub use brikke_geometry::*;

pub mod sampler;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub enum PixelFormat {
    Alpha,
    Lumi,
    Lumia,
    Rgb,
    Rgba,
}

/// A texture resident in some rendering context, used as the backing page
/// for atlas regions.
///
/// The atlas never creates or decodes textures. All it requires from the
/// rendering runtime is the page size and a way to release the pixel data
/// when ownership ends.
pub trait TexturePage {
    /// Size of the page in pixels.
    fn size(&self) -> Size<u32>;

    /// Releases the pixel data held by the rendering context.
    /// Called exactly once per distinct page when an atlas is disposed.
    fn dispose(&self);
}
