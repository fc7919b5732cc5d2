//! Fixed icon tables for each packaging target and the loops that fill them.

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use tracing::info;

use crate::error::{Error, Result};
use crate::icon::{raster, svg, IconSpec};

/// Flutter iOS runner icon set.
const IOS_DIR: &str = "ios/Runner/Assets.xcassets/AppIcon.appiconset";

const IOS_ICONS: [(u32, &str); 15] = [
    (20, "Icon-App-20x20@1x.png"),
    (40, "Icon-App-20x20@2x.png"),
    (60, "Icon-App-20x20@3x.png"),
    (29, "Icon-App-29x29@1x.png"),
    (58, "Icon-App-29x29@2x.png"),
    (87, "Icon-App-29x29@3x.png"),
    (40, "Icon-App-40x40@1x.png"),
    (80, "Icon-App-40x40@2x.png"),
    (120, "Icon-App-40x40@3x.png"),
    (120, "Icon-App-60x60@2x.png"),
    (180, "Icon-App-60x60@3x.png"),
    (76, "Icon-App-76x76@1x.png"),
    (152, "Icon-App-76x76@2x.png"),
    (167, "Icon-App-83.5x83.5@2x.png"),
    (1024, "Icon-App-1024x1024@1x.png"),
];

const ANDROID_RES_DIR: &str = "android/app/src/main/res";
const ANDROID_ICON: &str = "ic_launcher.png";

/// Density bucket and launcher icon edge length.
const ANDROID_ICONS: [(u32, &str); 6] = [
    (36, "mipmap-ldpi"),
    (48, "mipmap-mdpi"),
    (72, "mipmap-hdpi"),
    (96, "mipmap-xhdpi"),
    (144, "mipmap-xxhdpi"),
    (192, "mipmap-xxxhdpi"),
];

/// Standalone SVG documents, written into one directory.
const VECTOR_ICONS: [(u32, &str); 3] = [
    (1024, "app_icon.svg"),
    (512, "app_icon_512.svg"),
    (256, "app_icon_256.svg"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Platform {
    Ios,
    Android,
}

impl Platform {
    pub fn name(self) -> &'static str {
        match self {
            Platform::Ios => "iOS",
            Platform::Android => "Android",
        }
    }

    /// `(size, path relative to the project root)` in declaration order.
    pub fn targets(self) -> Vec<(u32, PathBuf)> {
        match self {
            Platform::Ios => IOS_ICONS
                .iter()
                .map(|&(size, file)| (size, Path::new(IOS_DIR).join(file)))
                .collect(),
            Platform::Android => ANDROID_ICONS
                .iter()
                .map(|&(size, bucket)| {
                    (size, Path::new(ANDROID_RES_DIR).join(bucket).join(ANDROID_ICON))
                })
                .collect(),
        }
    }
}

/// Create the parent directory of `path` if needed.
fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    Ok(())
}

/// Render every raster icon of `platform` under `root`, in table order.
///
/// Stops at the first failure; files already written are left in place.
pub fn generate_platform_set(platform: Platform, root: &Path) -> Result<Vec<PathBuf>> {
    info!("Generating {} app icons...", platform.name());
    let mut written = Vec::new();
    for (size, rel) in platform.targets() {
        let spec = IconSpec::new(size, root.join(rel))?;
        ensure_parent(&spec.output_path)?;
        raster::write_raster(&spec)?;
        written.push(spec.output_path);
    }
    Ok(written)
}

/// Write the SVG set into `dir`, creating it if needed.
pub fn generate_vector_set(dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;
    let mut written = Vec::new();
    for (size, file) in VECTOR_ICONS {
        let spec = IconSpec::new(size, dir.join(file))?;
        svg::write_vector(&spec)?;
        written.push(spec.output_path);
    }
    Ok(written)
}
