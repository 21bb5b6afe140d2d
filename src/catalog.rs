//! Exhibition level catalog
//!
//! Static configuration records consumed by the game: one descriptor per
//! room, read by index. The built-in catalog covers the five rooms of the
//! exhibition; a JSON file with the same shape can replace it wholesale.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Solid fallback colors for pillar segments, one per room
pub const PILLAR_COLORS: [[u8; 3]; 5] = [
    [0x3a, 0x5f, 0x0b],
    [0x4e, 0x9f, 0x3d],
    [0x2c, 0x7b, 0xb6],
    [0xd9, 0x5f, 0x02],
    [0xa5, 0x0f, 0x15],
];

/// Fallback pillar color for arcade mode and rooms past the palette
pub const DEFAULT_PILLAR_COLOR: [u8; 3] = [0x2e, 0xcc, 0x71];

/// Pillar color for a room, or the default when out of range / arcade
pub fn pillar_color(index: Option<u32>) -> [u8; 3] {
    index
        .and_then(|i| PILLAR_COLORS.get(i as usize))
        .copied()
        .unwrap_or(DEFAULT_PILLAR_COLOR)
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read level catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse level catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One room of the exhibition
///
/// Image fields are references, resolved lazily by `assets`; any of them may
/// point at a file that does not exist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelSpec {
    pub name: String,
    /// Background image reference
    #[serde(default)]
    pub background: Option<String>,
    /// One image reused for both pillar segments
    #[serde(default)]
    pub pillar: Option<String>,
    /// Dedicated art for the top segment; wins over `pillar`
    #[serde(default)]
    pub pillar_top: Option<String>,
    /// Dedicated art for the bottom segment; wins over `pillar`
    #[serde(default)]
    pub pillar_bottom: Option<String>,
    /// Artwork shown on the milestone panel
    #[serde(default)]
    pub milestone_image: Option<String>,
    /// Narrative unlocked by completing the room
    pub milestone_text: String,
}

/// Ordered set of rooms
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelCatalog {
    pub levels: Vec<LevelSpec>,
}

impl LevelCatalog {
    /// The five built-in exhibition rooms
    pub fn builtin() -> Self {
        let room = |name: &str,
                    background: &str,
                    pillar: Option<&str>,
                    top: Option<&str>,
                    bottom: Option<&str>,
                    image: &str,
                    text: &str| LevelSpec {
            name: name.to_string(),
            background: Some(background.to_string()),
            pillar: pillar.map(str::to_string),
            pillar_top: top.map(str::to_string),
            pillar_bottom: bottom.map(str::to_string),
            milestone_image: Some(image.to_string()),
            milestone_text: text.to_string(),
        };

        Self {
            levels: vec![
                room(
                    "Room I - 1900",
                    "assets/images/room-1900.jpg",
                    Some("assets/images/pillar.png"),
                    None,
                    None,
                    "assets/images/exhibit-1.jpg",
                    "Exhibit 1:\nAn eclectic sculpture by a contemporary local \
                     artist, worked in a style that echoes the votive statuary \
                     of the early Imperial age.",
                ),
                room(
                    "Room II - Renaissance",
                    "assets/images/room-renaissance.jpg",
                    None,
                    Some("assets/images/pillar.png"),
                    Some("assets/images/pillar.png"),
                    "assets/images/exhibit-2.jpg",
                    "Exhibit 2:\nThe collection still holds the original \
                     preparatory drawings attributed to a Renaissance master's \
                     workshop.",
                ),
                room(
                    "Room III - Baroque",
                    "assets/images/room-baroque.jpg",
                    None,
                    Some("assets/images/room3-up.jpg"),
                    Some("assets/images/room3-down.jpg"),
                    "assets/images/exhibit-3.jpg",
                    "Exhibit 3:\nA baroque crucifix carved entirely from \
                     painted wood in the late eighteenth century.",
                ),
                room(
                    "Room IV - 1800",
                    "assets/images/room-1800.jpg",
                    None,
                    Some("assets/images/tower-up.png"),
                    Some("assets/images/tower-down.png"),
                    "assets/images/exhibit-4.jpg",
                    "Exhibit 4:\nA chalice of the 1800s by an unknown maker; \
                     the gilded under-cup carries two cherubs and effigies of \
                     the parish's patron saints.",
                ),
                room(
                    "Room V - Today",
                    "assets/images/room-2000.jpg",
                    None,
                    Some("assets/images/room5.png"),
                    Some("assets/images/room5.png"),
                    "assets/images/exhibit-5.jpg",
                    "Exhibit 5:\nA living artist closes the walk by painting \
                     the church's original furnishings, returning the \
                     exhibition to the place it started.",
                ),
            ],
        }
    }

    /// Load a replacement catalog from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Descriptor for a room, if it exists
    pub fn level(&self, index: usize) -> Option<&LevelSpec> {
        self.levels.get(index)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

impl Default for LevelCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
