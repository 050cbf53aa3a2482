use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::layout::Layout;
use crate::tree::arena::{FileNode, FileTree};
use crate::tree::category::Category;
use crate::tree::extensions::{categorize_extension, extension_of, FileKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColorMode {
    /// Leaf file type, from the name's extension
    #[default]
    #[serde(rename = "type")]
    FileType,
    /// First-level ancestor's category, shaded by depth
    #[serde(rename = "category")]
    Category,
    /// Warmer for larger nodes relative to the current view
    #[serde(rename = "size")]
    SizeHeat,
}

impl ColorMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ColorMode::FileType => "type",
            ColorMode::Category => "category",
            ColorMode::SizeHeat => "size",
        }
    }
}

impl Display for ColorMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorMode {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "type" | "filetype" => Ok(Self::FileType),
            "category" => Ok(Self::Category),
            "size" | "heat" => Ok(Self::SizeHeat),
            other => Err(ConfigError::ColorMode(other.to_string())),
        }
    }
}

/// An sRGB color with components in 0..=1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AppColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl AppColor {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// From a packed `0xRRGGBB` value.
    pub fn from_hex(rgb: u32) -> Self {
        Self::new(
            ((rgb >> 16) & 0xFF) as f32 / 255.0,
            ((rgb >> 8) & 0xFF) as f32 / 255.0,
            (rgb & 0xFF) as f32 / 255.0,
        )
    }

    /// CSS hex notation, e.g. `#e94560`.
    pub fn to_hex(self) -> String {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02x}{:02x}{:02x}",
            channel(self.r),
            channel(self.g),
            channel(self.b)
        )
    }
}

/// Color for directories, extensionless files and unknown types.
pub const DEFAULT_COLOR: u32 = 0x636e72;

/// Five shades per category, cycled by depth.
pub fn category_palette(category: Category) -> [u32; 5] {
    match category {
        Category::Files => [0xe94560, 0xc0392b, 0xe74c3c, 0xff6b6b, 0xd63031],
        Category::Recycle => [0xf39c12, 0xe67e22, 0xd35400, 0xf0932b, 0xe58e26],
        Category::Logs => [0x2ecc71, 0x27ae60, 0x1abc9c, 0x0abde3, 0x10ac84],
        Category::Duplicates => [0x9b59b6, 0x8e44ad, 0x6c5ce7, 0xa29bfe, 0xfd79a8],
    }
}

/// Hand-picked colors for common extensions.
fn known_extension_color(ext: &str) -> Option<u32> {
    let rgb = match ext {
        "jpg" | "jpeg" => 0xe94560,
        "png" => 0xff6b6b,
        "gif" => 0xd63031,
        "bmp" => 0xc0392b,
        "svg" => 0xe74c3c,
        "webp" => 0xff7675,
        "ico" => 0xfab1a0,
        "mp4" => 0x0984e3,
        "mkv" => 0x74b9ff,
        "avi" => 0x0652dd,
        "mov" => 0x1e90ff,
        "wmv" => 0x4834d4,
        "mp3" => 0x6c5ce7,
        "flac" => 0xa29bfe,
        "wav" => 0x5f27cd,
        "aac" => 0x8854d0,
        "ogg" => 0x9b59b6,
        "pdf" => 0xd63031,
        "doc" | "docx" => 0x2d98da,
        "xls" | "xlsx" => 0x20bf6b,
        "ppt" | "pptx" => 0xf7b731,
        "txt" => 0x95a5a6,
        "csv" => 0x26de81,
        "md" => 0x778ca3,
        "zip" => 0xf39c12,
        "tar" => 0xe67e22,
        "gz" => 0xd35400,
        "bz2" => 0xe58e26,
        "7z" => 0xf0932b,
        "rar" => 0xfa8231,
        "xz" => 0xfd9644,
        "py" => 0x3498db,
        "js" => 0xf1c40f,
        "ts" => 0x2980b9,
        "html" => 0xe44d26,
        "css" => 0x264de4,
        "java" => 0xb07219,
        "go" => 0x00add8,
        "rs" => 0xdea584,
        "c" => 0x555555,
        "cpp" => 0xf34b7d,
        "sh" => 0x4eaa25,
        "json" => 0x292929,
        "xml" => 0xe37933,
        "yaml" | "yml" => 0xcb171e,
        "db" | "sqlite" => 0x1abc9c,
        "sql" => 0xe67e22,
        "log" => 0x2ecc71,
        "vmdk" => 0xe94560,
        "qcow2" => 0xc0392b,
        "iso" => 0xd63031,
        "img" => 0xff6b6b,
        _ => return None,
    };
    Some(rgb)
}

/// Base color of a file kind, for extensions without a hand-picked color.
fn kind_color(kind: FileKind) -> Option<AppColor> {
    let color = match kind {
        FileKind::Image => hsv_to_rgb(355.0 / 360.0, 0.65, 0.90),
        FileKind::Video => hsv_to_rgb(210.0 / 360.0, 0.75, 0.90),
        FileKind::Audio => hsv_to_rgb(260.0 / 360.0, 0.55, 0.85),
        FileKind::Document => hsv_to_rgb(205.0 / 360.0, 0.70, 0.85),
        FileKind::Archive => hsv_to_rgb(30.0 / 360.0, 0.85, 0.92),
        FileKind::Code => hsv_to_rgb(200.0 / 360.0, 0.70, 0.80),
        FileKind::Config => hsv_to_rgb(20.0 / 360.0, 0.70, 0.85),
        FileKind::Database => hsv_to_rgb(168.0 / 360.0, 0.86, 0.74),
        FileKind::DiskImage => hsv_to_rgb(0.0, 0.75, 0.80),
        FileKind::Log => hsv_to_rgb(145.0 / 360.0, 0.78, 0.80),
        FileKind::Backup => hsv_to_rgb(25.0 / 360.0, 0.40, 0.70),
        FileKind::Other => return None,
    };
    Some(color)
}

/// File-type color of a name: a hand-picked color, else its kind's color with a
/// small per-extension hue shift, else the default gray.
pub fn extension_color(ext: &str) -> AppColor {
    if let Some(rgb) = known_extension_color(ext) {
        return AppColor::from_hex(rgb);
    }
    match kind_color(categorize_extension(ext)) {
        Some(base) => shift_hue(base, hash01(ext) * 0.08 - 0.04),
        None => AppColor::from_hex(DEFAULT_COLOR),
    }
}

/// Color of `node` drawn at `depth` (0 = first level of the current view).
/// `view_max` is the size the heat ramp saturates at, usually the current node's size.
pub fn node_color(node: &FileNode, mode: ColorMode, depth: u16, view_max: u64) -> AppColor {
    match mode {
        ColorMode::FileType => extension_color(&extension_of(&node.name)),
        ColorMode::Category => {
            let palette = category_palette(node.category.unwrap_or(Category::Files));
            AppColor::from_hex(palette[depth as usize % palette.len()])
        }
        ColorMode::SizeHeat => {
            let max = view_max.max(1) as f64;
            let ratio = (node.size as f64 / max).min(1.0);
            hsl_to_rgb(((1.0 - ratio) * 200.0) as f32, 0.70, 0.45)
        }
    }
}

/// One color per rectangle of `layout`, in the same order.
pub fn paint_layout(tree: &FileTree, layout: &Layout, mode: ColorMode, view_max: u64) -> Vec<AppColor> {
    layout
        .rects
        .iter()
        .map(|r| node_color(tree.get(r.node), mode, r.depth.saturating_sub(1), view_max))
        .collect()
}

fn shift_hue(color: AppColor, hue_delta: f32) -> AppColor {
    let (h, s, v) = rgb_to_hsv(color);
    hsv_to_rgb((h + hue_delta).rem_euclid(1.0), s, v)
}

/// `h` in degrees, `s` and `l` in 0..=1.
fn hsl_to_rgb(h: f32, s: f32, l: f32) -> AppColor {
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let h6 = (h / 60.0).rem_euclid(6.0);
    let x = c * (1.0 - (h6.rem_euclid(2.0) - 1.0).abs());
    let (r, g, b) = match h6.floor() as i32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = l - c / 2.0;
    AppColor::new(r + m, g + m, b + m)
}

fn rgb_to_hsv(c: AppColor) -> (f32, f32, f32) {
    let max = c.r.max(c.g.max(c.b));
    let min = c.r.min(c.g.min(c.b));
    let d = max - min;
    let h = if d <= 1e-6 {
        0.0
    } else if (max - c.r).abs() <= 1e-6 {
        ((c.g - c.b) / d).rem_euclid(6.0) / 6.0
    } else if (max - c.g).abs() <= 1e-6 {
        (((c.b - c.r) / d) + 2.0) / 6.0
    } else {
        (((c.r - c.g) / d) + 4.0) / 6.0
    };
    let s = if max <= 1e-6 { 0.0 } else { d / max };
    (h, s, max)
}

fn hsv_to_rgb(h: f32, s: f32, v: f32) -> AppColor {
    let h6 = (h * 6.0).rem_euclid(6.0);
    let i = h6.floor() as i32;
    let f = h6 - i as f32;
    let p = v * (1.0 - s);
    let q = v * (1.0 - f * s);
    let t = v * (1.0 - (1.0 - f) * s);
    let (r, g, b) = match i {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    AppColor::new(r, g, b)
}

fn hash01(s: &str) -> f32 {
    let mut h: u32 = 2166136261;
    for &b in s.as_bytes() {
        h ^= b as u32;
        h = h.wrapping_mul(16777619);
    }
    ((h >> 8) as f32) / ((u32::MAX >> 8) as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(name: &str, size: u64, category: Option<Category>) -> FileNode {
        FileNode {
            category,
            ..FileNode::leaf(name, size, None, None)
        }
    }

    #[test]
    fn hex_round_trips_through_css_notation() {
        assert_eq!(AppColor::from_hex(0xe94560).to_hex(), "#e94560");
        assert_eq!(AppColor::from_hex(DEFAULT_COLOR).to_hex(), "#636e72");
    }

    #[test]
    fn file_type_mode_uses_extension() {
        let movie = leaf("Holiday.MKV", 10, None);
        assert_eq!(node_color(&movie, ColorMode::FileType, 0, 10).to_hex(), "#74b9ff");

        let dir = FileNode::group("volume1");
        assert_eq!(node_color(&dir, ColorMode::FileType, 0, 10).to_hex(), "#636e72");

        // Known kind without a hand-picked color stays near its kind's hue
        let heic = node_color(&leaf("IMG_0001.heic", 1, None), ColorMode::FileType, 0, 1);
        assert_ne!(heic.to_hex(), "#636e72");
        assert_eq!(heic, extension_color("heic"));
        // Unclassified extensions fall back to the default gray
        assert_eq!(extension_color("xyz").to_hex(), "#636e72");
    }

    #[test]
    fn category_mode_cycles_palette_by_depth() {
        let node = leaf("x.log", 1, Some(Category::Logs));
        assert_eq!(node_color(&node, ColorMode::Category, 0, 1).to_hex(), "#2ecc71");
        assert_eq!(node_color(&node, ColorMode::Category, 1, 1).to_hex(), "#27ae60");
        assert_eq!(node_color(&node, ColorMode::Category, 5, 1).to_hex(), "#2ecc71");

        let untagged = leaf("x", 1, None);
        assert_eq!(node_color(&untagged, ColorMode::Category, 0, 1).to_hex(), "#e94560");
    }

    #[test]
    fn size_heat_runs_from_cool_to_red() {
        let big = node_color(&leaf("a", 100, None), ColorMode::SizeHeat, 0, 100);
        let small = node_color(&leaf("b", 0, None), ColorMode::SizeHeat, 0, 100);

        // hsl(0, 70%, 45%) and hsl(200, 70%, 45%)
        assert_eq!(big.to_hex(), "#c32222");
        assert_eq!(small.to_hex(), "#228ec3");

        // Oversized nodes clamp, zero max does not divide by zero
        assert_eq!(node_color(&leaf("c", 500, None), ColorMode::SizeHeat, 0, 100), big);
        let zero = node_color(&leaf("d", 0, None), ColorMode::SizeHeat, 0, 0);
        assert!(zero.r.is_finite());
    }

    #[test]
    fn mode_parses_from_names() {
        assert_eq!("type".parse::<ColorMode>().unwrap(), ColorMode::FileType);
        assert_eq!("Size".parse::<ColorMode>().unwrap(), ColorMode::SizeHeat);
        assert!("rainbow".parse::<ColorMode>().is_err());
    }
}
