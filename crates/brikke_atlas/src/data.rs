//! Pre-parsed atlas descriptions: texture pages, region descriptors, and
//! assembly into an [`Atlas`] through a caller-supplied page loader.
//!
//! The descriptor format is consumed here as JSON; parsing any packer's own
//! text format is the concern of an external tool.

use std::{collections::HashMap, rc::Rc};

use anyhow::Result;
use brikke_geometry::{Rect as GRect, Size as GSize};
use brikke_graphics::{sampler::SamplerState, PixelFormat};
use log::debug;
use nalgebra::vector;
use serde::Deserialize;
use smart_default::SmartDefault;
use thiserror::Error;

use crate::{
    region::{PackInfo, SourceRegion, TextureRegion},
    Atlas,
};

#[derive(Debug, Error)]
pub enum AtlasError {
    #[error("region `{region}` references unknown page `{page}`")]
    UnknownPage { region: String, page: String },

    #[error("unable to load page `{page}`: {cause}")]
    PageLoad { page: String, cause: anyhow::Error },
}

/// A complete atlas description: every texture page and every region packed
/// onto them, as produced by an external descriptor parser.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AtlasFile {
    pub pages: Vec<Page>,
    pub regions: Vec<RegionDescriptor>,
}

/// A single page of the atlas: one backing texture image and the sampler
/// state it was packed for.
#[derive(Deserialize, Debug, Clone, SmartDefault)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// Name of the image file backing this page.
    pub name: String,
    pub size: Size,
    #[serde(default = "default_format")]
    #[default(PixelFormat::Rgba)]
    pub format: PixelFormat,
    #[serde(default = "SamplerState::nearest")]
    #[default(SamplerState::nearest())]
    pub sampler: SamplerState,
    #[serde(default)]
    pub premultiplied_alpha: bool,
}

impl Page {
    /// True when the page's minification filter samples mipmaps.
    pub fn is_mip_map(&self) -> bool {
        self.sampler.min_filter.is_mip_map()
    }
}

fn default_format() -> PixelFormat {
    PixelFormat::Rgba
}

/// A single region within a page.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RegionDescriptor {
    pub name: String,
    /// Name of the page the region is packed on.
    pub page: String,
    /// Advisory index; -1 (the default) marks an unindexed region.
    #[serde(default = "no_index")]
    pub index: i32,
    pub bounds: Rect,
    /// Offset of the packed pixels inside the original frame, non-zero when
    /// whitespace was trimmed.
    #[serde(default)]
    pub offset: Point,
    /// Size of the frame before trimming. Defaults to the packed size.
    #[serde(default)]
    pub source_size: Option<Size>,
    #[serde(default)]
    pub rotated: bool,
}

fn no_index() -> i32 {
    -1
}

#[derive(Deserialize, Debug, Clone, Copy, Default)]
pub struct Size {
    pub w: u32,
    pub h: u32,
}

#[derive(Deserialize, Debug, Clone, Copy, Default)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

#[derive(Deserialize, Debug, Clone, Copy, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl From<Size> for GSize<u32> {
    fn from(value: Size) -> Self {
        GSize::new(value.w, value.h)
    }
}

impl From<Rect> for GRect<u32> {
    fn from(value: Rect) -> Self {
        GRect::new(value.x, value.y, value.w, value.h)
    }
}

impl AtlasFile {
    /// Decodes the JSON form of an atlas description.
    pub fn decode(json: &str) -> Result<AtlasFile> {
        Ok(serde_json::from_str(json)?)
    }

    /// Resolves every page through `load` and imports all regions, grouping
    /// and renumbering them per name.
    ///
    /// Textures returned by `load` are owned by the atlas and released when
    /// it is disposed.
    pub fn into_atlas<T, F>(self, mut load: F) -> Result<Atlas<T>, AtlasError>
    where
        F: FnMut(&Page) -> Result<Rc<T>>,
    {
        let mut pages = HashMap::with_capacity(self.pages.len());
        for page in &self.pages {
            let texture = load(page).map_err(|cause| AtlasError::PageLoad {
                page: page.name.clone(),
                cause,
            })?;
            pages.insert(page.name.as_str(), texture);
        }

        let mut sources = Vec::with_capacity(self.regions.len());
        for descriptor in self.regions {
            let texture = pages
                .get(descriptor.page.as_str())
                .ok_or_else(|| AtlasError::UnknownPage {
                    region: descriptor.name.clone(),
                    page: descriptor.page.clone(),
                })?;

            let bounds: GRect<u32> = descriptor.bounds.into();
            let original = match descriptor.source_size {
                Some(size) => size.into(),
                None => bounds.size(),
            };
            let pack = PackInfo::new(
                vector![descriptor.offset.x, descriptor.offset.y],
                original,
                descriptor.rotated,
            );

            sources.push(SourceRegion::new(
                descriptor.name,
                descriptor.index,
                TextureRegion::new(texture.clone(), bounds),
                pack,
            ));
        }

        debug!(
            "assembled {} regions over {} pages",
            sources.len(),
            pages.len()
        );
        Ok(Atlas::from_regions(sources))
    }
}

#[cfg(test)]
mod tests {
    use brikke_graphics::sampler::{Filter, MinFilter, WrapFunction};

    use super::*;

    struct Tex(GSize<u32>);

    impl brikke_graphics::TexturePage for Tex {
        fn size(&self) -> GSize<u32> {
            self.0
        }

        fn dispose(&self) {}
    }

    const TWO_PAGES: &str = r#"{
        "pages": [
            {"name": "chars.png", "size": {"w": 256, "h": 128}},
            {"name": "tiles.png", "size": {"w": 64, "h": 64}}
        ],
        "regions": [
            {"name": "hero", "page": "chars.png", "index": 1, "bounds": {"x": 16, "y": 0, "w": 16, "h": 16}},
            {"name": "hero", "page": "chars.png", "index": 0, "bounds": {"x": 0, "y": 0, "w": 16, "h": 16}},
            {"name": "grass", "page": "tiles.png", "bounds": {"x": 0, "y": 0, "w": 8, "h": 8}}
        ]
    }"#;

    #[test]
    fn test_page_defaults() {
        let file = AtlasFile::decode(TWO_PAGES).unwrap();
        let page = &file.pages[0];

        assert_eq!(page.format, PixelFormat::Rgba);
        assert_eq!(page.sampler, SamplerState::nearest());
        assert!(!page.premultiplied_alpha);
        assert!(!page.is_mip_map());
    }

    #[test]
    fn test_missing_index_is_unindexed() {
        let file = AtlasFile::decode(TWO_PAGES).unwrap();
        assert_eq!(file.regions[0].index, 1);
        assert_eq!(file.regions[2].index, -1);
    }

    #[test]
    fn test_explicit_sampler_state() {
        let json = r#"{
            "pages": [{
                "name": "a.png",
                "size": {"w": 8, "h": 8},
                "sampler": {
                    "uWrap": "Clamp",
                    "vWrap": "Repeat",
                    "minFilter": {"Mipmap": {"mipmap": "Linear", "texel": "Nearest"}},
                    "magFilter": "Linear"
                }
            }],
            "regions": []
        }"#;

        let file = AtlasFile::decode(json).unwrap();
        let sampler = file.pages[0].sampler;
        assert_eq!(sampler.v_wrap, WrapFunction::Repeat);
        assert_eq!(sampler.mag_filter, Filter::Linear);
        assert!(matches!(sampler.min_filter, MinFilter::Mipmap { .. }));
        assert!(file.pages[0].is_mip_map());
    }

    #[test]
    fn test_assembly_groups_and_sorts() {
        let file = AtlasFile::decode(TWO_PAGES).unwrap();
        let atlas = file
            .into_atlas(|page| Ok(Rc::new(Tex(page.size.into()))))
            .unwrap();

        let hero = atlas.find_regions("hero").unwrap();
        assert_eq!(hero.len(), 2);
        // The descriptor with advisory index 0 (bounds at x=0) comes first.
        assert_eq!(hero[0].bounds().x, 0);
        assert_eq!(hero[1].bounds().x, 16);

        assert!(atlas.find_region("grass").is_some());
        assert_eq!(atlas.textures().count(), 2);

        // Both hero frames share one page texture.
        let shared = Rc::ptr_eq(hero[0].texture(), hero[1].texture());
        assert!(shared);
    }

    #[test]
    fn test_unknown_page_is_an_error() {
        let json = r#"{
            "pages": [{"name": "a.png", "size": {"w": 8, "h": 8}}],
            "regions": [{"name": "r", "page": "b.png", "bounds": {"x": 0, "y": 0, "w": 1, "h": 1}}]
        }"#;

        let file = AtlasFile::decode(json).unwrap();
        let error = file
            .into_atlas(|page| Ok(Rc::new(Tex(page.size.into()))))
            .unwrap_err();

        assert!(matches!(error, AtlasError::UnknownPage { .. }));
    }

    #[test]
    fn test_failing_loader_is_reported_per_page() {
        let file = AtlasFile::decode(TWO_PAGES).unwrap();
        let error = file
            .into_atlas::<Tex, _>(|page| match page.name.as_str() {
                "tiles.png" => Err(anyhow::anyhow!("missing file")),
                _ => Ok(Rc::new(Tex(page.size.into()))),
            })
            .unwrap_err();

        match error {
            AtlasError::PageLoad { page, .. } => assert_eq!(page, "tiles.png"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_trimmed_descriptor_becomes_trimmed_region() {
        let json = r#"{
            "pages": [{"name": "a.png", "size": {"w": 64, "h": 64}}],
            "regions": [{
                "name": "crate",
                "page": "a.png",
                "bounds": {"x": 0, "y": 0, "w": 16, "h": 16},
                "offset": {"x": 2.0, "y": 4.0},
                "sourceSize": {"w": 20, "h": 24}
            }]
        }"#;

        let file = AtlasFile::decode(json).unwrap();
        let atlas = file
            .into_atlas(|page| Ok(Rc::new(Tex(page.size.into()))))
            .unwrap();

        let region = atlas.find_region("crate").unwrap();
        assert!(region.is_trimmed());
        assert_eq!(region.pack.original_size, GSize::new(20, 24));
        assert_eq!(region.pack.offset, vector![2.0, 4.0]);
    }
}
