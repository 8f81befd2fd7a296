use std::rc::Rc;

use brikke_atlas::{data::AtlasFile, Atlas};
use brikke_geometry::Size;
use brikke_graphics::TexturePage;

const ATLAS_JSON: &str = r#"{
    "pages": [
        {"name": "characters.png", "size": {"w": 256, "h": 128}}
    ],
    "regions": [
        {"name": "hero_run", "page": "characters.png", "index": 1, "bounds": {"x": 16, "y": 0, "w": 16, "h": 24}},
        {"name": "hero_run", "page": "characters.png", "index": 0, "bounds": {"x": 0, "y": 0, "w": 16, "h": 24}},
        {"name": "hero_idle", "page": "characters.png", "bounds": {"x": 32, "y": 0, "w": 16, "h": 16},
         "offset": {"x": 0.0, "y": 4.0}, "sourceSize": {"w": 16, "h": 24}}
    ]
}"#;

/// Stands in for a texture owned by a real rendering context.
struct StubTexture {
    name: String,
    size: Size<u32>,
}

impl TexturePage for StubTexture {
    fn size(&self) -> Size<u32> {
        self.size
    }

    fn dispose(&self) {
        println!("released {} ({}x{})", self.name, self.size.w, self.size.h);
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let file = AtlasFile::decode(ATLAS_JSON)?;
    let atlas: Atlas<StubTexture> = file.into_atlas(|page| {
        Ok(Rc::new(StubTexture {
            name: page.name.clone(),
            size: page.size.into(),
        }))
    })?;

    for (name, group) in atlas.groups() {
        println!("{name}: {} frame(s)", group.len());
    }

    let run = atlas.create_sprites("hero_run");
    for sprite in &run {
        println!(
            "hero_run #{} covers {:?}",
            sprite.region().index,
            sprite.bounds()
        );
    }

    let mut idle = atlas
        .create_sprite("hero_idle")
        .expect("hero_idle is in the atlas");
    println!(
        "hero_idle draws {:?} within {:?}",
        idle.draw_rect(),
        idle.bounds()
    );
    idle.set_bounds(0.0, 0.0, 32.0, 48.0);
    println!("scaled up, it draws {:?}", idle.draw_rect());

    atlas.dispose();
    Ok(())
}
