//! Named, indexed regions of texture pages, with lookup by name and index
//! and on-demand construction of drawable sprites.

use std::{collections::HashSet, fmt, rc::Rc};

use by_address::ByAddress;
use brikke_geometry::Rect;
use brikke_graphics::TexturePage;
use indexmap::IndexMap;
use log::{debug, trace};

pub mod data;
pub mod region;
pub mod sprite;

pub use region::{AtlasRegion, PackInfo, SourceRegion, TextureRegion};
pub use sprite::Sprite;

/// Maintains named groups of [`AtlasRegion`]s and the set of distinct
/// texture pages they reference.
///
/// Groups keep the order their names were first encountered in. Within a
/// group, regions are sorted ascending by index and indices are contiguous
/// from 0. Appending to a group replaces the group slice instead of mutating
/// it, so a group handle obtained earlier always observes a stable snapshot.
///
/// Every texture handed to the atlas, directly or through a region, is owned
/// by it and released exactly once by [`Atlas::dispose`].
pub struct Atlas<T> {
    regions: IndexMap<String, Rc<[AtlasRegion<T>]>>,
    textures: HashSet<ByAddress<Rc<T>>>,
}

impl<T> Default for Atlas<T> {
    fn default() -> Self {
        Self {
            regions: IndexMap::new(),
            textures: HashSet::new(),
        }
    }
}

// Textures are opaque, so debug output shows group names and sizes only.
impl<T> fmt::Debug for Atlas<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.regions.iter().map(|(name, group)| (name, group.len())))
            .finish()
    }
}

impl<T> Atlas<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an atlas from a flat list of externally constructed regions.
    ///
    /// Regions are grouped by name in first-encountered order. Each group is
    /// sorted by its advisory index, ties keeping their input order, and
    /// then renumbered from 0, so the result has no index gaps.
    pub fn from_regions<I>(regions: I) -> Self
    where
        I: IntoIterator<Item = SourceRegion<T>>,
    {
        let mut grouped = IndexMap::<String, Vec<SourceRegion<T>>>::new();
        for region in regions {
            grouped
                .entry(region.name.clone())
                .or_default()
                .push(region);
        }

        let mut atlas = Self::new();
        let mut total = 0;
        for (name, mut sources) in grouped {
            sources.sort_by_key(|source| source.index);
            total += sources.len();

            let group: Vec<AtlasRegion<T>> = sources
                .into_iter()
                .enumerate()
                .map(|(index, source)| {
                    atlas
                        .textures
                        .insert(ByAddress(source.region.texture.clone()));
                    AtlasRegion {
                        region: source.region,
                        name: name.clone(),
                        index,
                        pack: source.pack,
                    }
                })
                .collect();
            atlas.regions.insert(name, group.into());
        }

        debug!(
            "imported {total} regions into {} groups",
            atlas.regions.len()
        );
        atlas
    }

    /// Adds a region viewing `bounds` of `texture`. The texture will be
    /// released when the atlas is disposed.
    ///
    /// The new region's index is 0 if no existing regions had this name, or
    /// one greater than the group's current highest index otherwise.
    pub fn add_region(
        &mut self,
        name: impl Into<String>,
        texture: Rc<T>,
        bounds: impl Into<Rect<u32>>,
    ) -> &AtlasRegion<T> {
        let bounds = bounds.into();
        let pack = PackInfo::full(bounds.size());
        self.push(name.into(), TextureRegion { texture, bounds }, pack)
    }

    /// Adds a region from an existing texture view, sharing its page. Index
    /// assignment is the same as for [`Atlas::add_region`].
    pub fn add_region_view(
        &mut self,
        name: impl Into<String>,
        view: &TextureRegion<T>,
    ) -> &AtlasRegion<T> {
        let pack = PackInfo::full(view.bounds.size());
        self.push(name.into(), view.clone(), pack)
    }

    fn push(&mut self, name: String, region: TextureRegion<T>, pack: PackInfo) -> &AtlasRegion<T> {
        self.textures.insert(ByAddress(region.texture.clone()));

        let group = self
            .regions
            .entry(name.clone())
            .or_insert_with(|| Vec::new().into());
        let index = group.len();
        trace!("appending region `{name}` with index {index}");

        // Replace the slice rather than mutating it, so group handles
        // obtained earlier keep observing their snapshot.
        let mut next = Vec::with_capacity(index + 1);
        next.extend(group.iter().cloned());
        next.push(AtlasRegion {
            region,
            name,
            index,
            pack,
        });
        *group = next.into();

        &group[index]
    }

    /// Returns the first region with the given name, the one with index 0.
    pub fn find_region(&self, name: &str) -> Option<&AtlasRegion<T>> {
        self.regions.get(name)?.first()
    }

    /// Returns the region with the given name and index.
    ///
    /// A negative index is treated as 0, for compatibility with descriptors
    /// that use -1 for unindexed regions. An index past the end of the group
    /// is a miss, not an error.
    pub fn find_region_at(&self, name: &str, index: i32) -> Option<&AtlasRegion<T>> {
        let index = index.max(0) as usize;
        self.regions.get(name)?.get(index)
    }

    /// Returns all regions with the given name, ascending by index, or
    /// `None` when the name is unknown. The slice aliases atlas storage.
    pub fn find_regions(&self, name: &str) -> Option<&[AtlasRegion<T>]> {
        self.regions
            .get(name)
            .map(|group| &group[..])
            .filter(|group| !group.is_empty())
    }

    /// Appends the plain texture views of all regions with the given name
    /// into `out`. Does nothing when the name is unknown.
    pub fn append_regions_into(&self, name: &str, out: &mut Vec<TextureRegion<T>>) {
        if let Some(group) = self.find_regions(name) {
            out.extend(group.iter().map(|region| region.region.clone()));
        }
    }

    /// Builds a sprite from the first region with the given name.
    ///
    /// If whitespace was stripped from the region when it was packed, the
    /// sprite is positioned as if it had not been.
    pub fn create_sprite(&self, name: &str) -> Option<Sprite<T>> {
        self.find_region(name).map(Sprite::from_region)
    }

    /// Builds a sprite from the region with the given name and index, with
    /// the same index handling as [`Atlas::find_region_at`].
    pub fn create_sprite_at(&self, name: &str, index: i32) -> Option<Sprite<T>> {
        self.find_region_at(name, index).map(Sprite::from_region)
    }

    /// Builds sprites from every region with the given name, ascending by
    /// index. An unknown name yields an empty vector, never an error.
    pub fn create_sprites(&self, name: &str) -> Vec<Sprite<T>> {
        let mut sprites = Vec::new();
        self.append_sprites_into(name, &mut sprites);
        sprites
    }

    /// Appends sprites built from every region with the given name into
    /// `out`. Does nothing when the name is unknown.
    pub fn append_sprites_into(&self, name: &str, out: &mut Vec<Sprite<T>>) {
        if let Some(group) = self.find_regions(name) {
            out.extend(group.iter().map(Sprite::from_region));
        }
    }

    /// Groups in name insertion order.
    pub fn groups(&self) -> impl Iterator<Item = (&str, &[AtlasRegion<T>])> {
        self.regions
            .iter()
            .map(|(name, group)| (name.as_str(), &group[..]))
    }

    /// Distinct texture pages registered with this atlas, unordered.
    pub fn textures(&self) -> impl Iterator<Item = &Rc<T>> {
        self.textures.iter().map(|texture| &texture.0)
    }

    /// Number of distinct region names.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

impl<T: TexturePage> Atlas<T> {
    /// Consumes the atlas, releasing every distinct texture exactly once,
    /// no matter how many regions shared it.
    ///
    /// Taking the atlas by value makes the hand-off final: neither a second
    /// dispose nor a post-dispose lookup will compile.
    pub fn dispose(self) {
        debug!("disposing atlas holding {} textures", self.textures.len());
        for texture in &self.textures {
            texture.dispose();
        }
    }
}
