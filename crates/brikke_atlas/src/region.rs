use std::rc::Rc;

use brikke_geometry::{Rect, Size};
use derive_more::Constructor;
use nalgebra::Vector2;

/// A rectangular view into a texture page.
#[derive(Debug)]
pub struct TextureRegion<T> {
    pub texture: Rc<T>,
    /// Pixel rectangle within the page, (0; 0) being the top-left corner.
    pub bounds: Rect<u32>,
}

impl<T> TextureRegion<T> {
    pub fn new(texture: Rc<T>, bounds: impl Into<Rect<u32>>) -> Self {
        Self {
            texture,
            bounds: bounds.into(),
        }
    }
}

// The page is shared through Rc, so cloning a view never requires T: Clone.
impl<T> Clone for TextureRegion<T> {
    fn clone(&self) -> Self {
        Self {
            texture: self.texture.clone(),
            bounds: self.bounds.clone(),
        }
    }
}

/// Packer metadata needed to reconstruct a sprite whose transparent padding
/// was stripped at pack time.
#[derive(Constructor, Debug, Clone, PartialEq)]
pub struct PackInfo {
    /// Offset of the packed pixels from the corner of the original frame.
    pub offset: Vector2<f32>,
    /// Size of the frame before whitespace was stripped.
    pub original_size: Size<u32>,
    /// Whether the pixels are stored rotated by 90 degrees on the page.
    pub rotated: bool,
}

impl PackInfo {
    /// Metadata for a region that was packed without trimming.
    pub fn full(size: Size<u32>) -> Self {
        Self::new(Vector2::zeros(), size, false)
    }
}

/// A named, indexed region of a texture atlas. Identity is (name, index);
/// a region is immutable once the atlas has created it.
#[derive(Debug)]
pub struct AtlasRegion<T> {
    pub region: TextureRegion<T>,
    pub name: String,
    /// Position of this region within its name group, contiguous from 0.
    pub index: usize,
    pub pack: PackInfo,
}

impl<T> AtlasRegion<T> {
    pub fn texture(&self) -> &Rc<T> {
        &self.region.texture
    }

    pub fn bounds(&self) -> &Rect<u32> {
        &self.region.bounds
    }

    /// Size of the packed pixels as stored on the page.
    pub fn packed_size(&self) -> Size<u32> {
        self.region.bounds.size()
    }

    /// True when whitespace was stripped from this region at pack time.
    pub fn is_trimmed(&self) -> bool {
        self.packed_size() != self.pack.original_size
    }
}

impl<T> Clone for AtlasRegion<T> {
    fn clone(&self) -> Self {
        Self {
            region: self.region.clone(),
            name: self.name.clone(),
            index: self.index,
            pack: self.pack.clone(),
        }
    }
}

/// A region read from an atlas description before grouping has assigned
/// final indices.
///
/// `index` is advisory: regions sharing a name are ordered by it on import,
/// and -1 conventionally marks an unindexed region.
#[derive(Debug)]
pub struct SourceRegion<T> {
    pub name: String,
    pub index: i32,
    pub region: TextureRegion<T>,
    pub pack: PackInfo,
}

impl<T> SourceRegion<T> {
    pub fn new(
        name: impl Into<String>,
        index: i32,
        region: TextureRegion<T>,
        pack: PackInfo,
    ) -> Self {
        Self {
            name: name.into(),
            index,
            region,
            pack,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Tex;

    #[test]
    fn test_untrimmed_region_metadata() {
        let pack = PackInfo::full(Size::new(16, 24));
        assert_eq!(pack.offset, Vector2::zeros());
        assert_eq!(pack.original_size, Size::new(16, 24));
        assert!(!pack.rotated);
    }

    #[test]
    fn test_trim_detection_compares_sizes() {
        let region = TextureRegion::new(Rc::new(Tex), (0, 0, 16, 16));

        let full = AtlasRegion {
            region: region.clone(),
            name: "a".into(),
            index: 0,
            pack: PackInfo::full(Size::new(16, 16)),
        };
        assert!(!full.is_trimmed());

        let trimmed = AtlasRegion {
            region,
            name: "a".into(),
            index: 1,
            pack: PackInfo::new(Vector2::new(2.0, 4.0), Size::new(20, 20), false),
        };
        assert!(trimmed.is_trimmed());
    }
}
