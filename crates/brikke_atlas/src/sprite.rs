use std::rc::Rc;

use brikke_geometry::Rect;

use crate::region::AtlasRegion;

/// A drawable view built from an atlas region.
///
/// Regions packed without trimming become `Plain` sprites: the pixels cover
/// the whole bounds, pre-rotated by 90 degrees when the packer stored them
/// rotated. Regions with stripped whitespace become `Trimmed` sprites, which
/// keep the original frame as their bounds and reposition the drawable
/// inside it. The decision is made once, at construction.
#[derive(Debug)]
pub enum Sprite<T> {
    Plain {
        region: AtlasRegion<T>,
        bounds: Rect<f32>,
        /// The drawable is rotated 90 degrees, and `bounds` is already
        /// sized height-by-width.
        rotated: bool,
    },
    Trimmed {
        region: AtlasRegion<T>,
        /// Footprint of the original, untrimmed frame.
        bounds: Rect<f32>,
        /// Where the packed pixels land within `bounds`.
        draw: Rect<f32>,
    },
}

impl<T> Sprite<T> {
    /// Builds a sprite from a region, choosing the variant by whether the
    /// packed size still equals the original size.
    pub fn from_region(region: &AtlasRegion<T>) -> Self {
        let packed = region.packed_size();
        let (w, h) = match region.pack.rotated {
            true => (packed.h as f32, packed.w as f32),
            false => (packed.w as f32, packed.h as f32),
        };

        if !region.is_trimmed() {
            return Self::Plain {
                region: region.clone(),
                bounds: Rect::new(0.0, 0.0, w, h),
                rotated: region.pack.rotated,
            };
        }

        let original = region.pack.original_size;
        let offset = region.pack.offset;
        Self::Trimmed {
            region: region.clone(),
            bounds: Rect::new(0.0, 0.0, original.w as f32, original.h as f32),
            draw: Rect::new(offset.x, offset.y, w, h),
        }
    }

    pub fn region(&self) -> &AtlasRegion<T> {
        match self {
            Self::Plain { region, .. } | Self::Trimmed { region, .. } => region,
        }
    }

    pub fn texture(&self) -> &Rc<T> {
        self.region().texture()
    }

    pub fn bounds(&self) -> &Rect<f32> {
        match self {
            Self::Plain { bounds, .. } | Self::Trimmed { bounds, .. } => bounds,
        }
    }

    /// Rectangle actually covered by the packed pixels. For plain sprites
    /// this is the whole bounds.
    pub fn draw_rect(&self) -> &Rect<f32> {
        match self {
            Self::Plain { bounds, .. } => bounds,
            Self::Trimmed { draw, .. } => draw,
        }
    }

    pub fn rotated(&self) -> bool {
        match self {
            Self::Plain { rotated, .. } => *rotated,
            Self::Trimmed { region, .. } => region.pack.rotated,
        }
    }

    /// Repositions and resizes the sprite. A trimmed drawable keeps its
    /// relative position within the frame: trim offsets and the packed size
    /// scale with the new bounds.
    pub fn set_bounds(&mut self, x: f32, y: f32, w: f32, h: f32) {
        match self {
            Self::Plain { bounds, .. } => *bounds = Rect::new(x, y, w, h),
            Self::Trimmed {
                region,
                bounds,
                draw,
            } => {
                let original = region.pack.original_size;
                let sx = w / original.w as f32;
                let sy = h / original.h as f32;

                let packed = region.packed_size();
                let (pw, ph) = match region.pack.rotated {
                    true => (packed.h as f32, packed.w as f32),
                    false => (packed.w as f32, packed.h as f32),
                };

                let offset = region.pack.offset;
                *draw = Rect::new(x + offset.x * sx, y + offset.y * sy, pw * sx, ph * sy);
                *bounds = Rect::new(x, y, w, h);
            }
        }
    }
}

impl<T> Clone for Sprite<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Plain {
                region,
                bounds,
                rotated,
            } => Self::Plain {
                region: region.clone(),
                bounds: bounds.clone(),
                rotated: *rotated,
            },
            Self::Trimmed {
                region,
                bounds,
                draw,
            } => Self::Trimmed {
                region: region.clone(),
                bounds: bounds.clone(),
                draw: draw.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use brikke_geometry::Size;
    use nalgebra::Vector2;

    use super::*;
    use crate::region::{PackInfo, TextureRegion};

    struct Tex;

    fn region(bounds: (u32, u32, u32, u32), pack: PackInfo) -> AtlasRegion<Tex> {
        AtlasRegion {
            region: TextureRegion::new(Rc::new(Tex), bounds),
            name: "r".into(),
            index: 0,
            pack,
        }
    }

    #[test]
    fn test_plain_sprite_covers_packed_bounds() {
        let region = region((4, 4, 16, 24), PackInfo::full(Size::new(16, 24)));
        let sprite = Sprite::from_region(&region);

        assert!(matches!(sprite, Sprite::Plain { .. }));
        assert!(!sprite.rotated());
        assert_eq!(sprite.bounds(), &Rect::new(0.0, 0.0, 16.0, 24.0));
        assert_eq!(sprite.draw_rect(), sprite.bounds());
    }

    #[test]
    fn test_rotated_plain_sprite_swaps_bounds() {
        let pack = PackInfo::new(Vector2::zeros(), Size::new(16, 24), true);
        let region = region((0, 0, 16, 24), pack);
        let sprite = Sprite::from_region(&region);

        assert!(sprite.rotated());
        assert_eq!(sprite.bounds(), &Rect::new(0.0, 0.0, 24.0, 16.0));
    }

    #[test]
    fn test_trimmed_sprite_repositions_drawable() {
        let pack = PackInfo::new(Vector2::new(2.0, 4.0), Size::new(20, 24), false);
        let region = region((0, 0, 16, 16), pack);
        let sprite = Sprite::from_region(&region);

        assert!(matches!(sprite, Sprite::Trimmed { .. }));
        assert_eq!(sprite.bounds(), &Rect::new(0.0, 0.0, 20.0, 24.0));
        assert_eq!(sprite.draw_rect(), &Rect::new(2.0, 4.0, 16.0, 16.0));
    }

    #[test]
    fn test_set_bounds_scales_trim_offsets() {
        let pack = PackInfo::new(Vector2::new(2.0, 4.0), Size::new(20, 24), false);
        let region = region((0, 0, 16, 16), pack);
        let mut sprite = Sprite::from_region(&region);

        // Double the width, double the height.
        sprite.set_bounds(10.0, 10.0, 40.0, 48.0);

        assert_eq!(sprite.bounds(), &Rect::new(10.0, 10.0, 40.0, 48.0));
        assert_eq!(sprite.draw_rect(), &Rect::new(14.0, 18.0, 32.0, 32.0));
    }

    #[test]
    fn test_set_bounds_moves_plain_sprite() {
        let region = region((0, 0, 16, 16), PackInfo::full(Size::new(16, 16)));
        let mut sprite = Sprite::from_region(&region);

        sprite.set_bounds(5.0, 6.0, 32.0, 32.0);
        assert_eq!(sprite.draw_rect(), &Rect::new(5.0, 6.0, 32.0, 32.0));
    }
}
