use serde::{Deserialize, Serialize};

/// Stable helix identifier assigned by the design (`num` in cadnano files).
///
/// Links between bases always reference helices by id, never by position in
/// the helix list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct HelixId(pub i64);

impl std::fmt::Display for HelixId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Position of a helix inside [`DesignGraph::helices`](crate::core::design::DesignGraph).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HelixIndex(pub usize);

/// A single base slot: helix id plus base position along that helix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BasePos {
    pub helix: HelixId,
    pub pos: usize,
}

impl BasePos {
    pub fn new(helix: HelixId, pos: usize) -> Self {
        Self { helix, pos }
    }
}

/// Formats as `helix[pos]`, the locus notation used in reports
impl std::fmt::Display for BasePos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[{}]", self.helix, self.pos)
    }
}

/// Connectivity of one strand at one base: where it comes from and where it goes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Link {
    pub prev: Option<BasePos>,
    pub next: Option<BasePos>,
}

impl Link {
    pub const EMPTY: Link = Link {
        prev: None,
        next: None,
    };

    /// No strand passes through this base
    pub fn is_empty(&self) -> bool {
        self.prev.is_none() && self.next.is_none()
    }

    /// Build a link from the on-disk 4-tuple, where a helix of `-1` means "no link"
    pub fn from_tuple(raw: [i64; 4]) -> Self {
        let side = |helix: i64, pos: i64| {
            if helix < 0 || pos < 0 {
                None
            } else {
                usize::try_from(pos)
                    .ok()
                    .map(|pos| BasePos::new(HelixId(helix), pos))
            }
        };
        Self {
            prev: side(raw[0], raw[1]),
            next: side(raw[2], raw[3]),
        }
    }

    pub fn to_tuple(self) -> [i64; 4] {
        let side = |b: Option<BasePos>| match b {
            Some(b) => (b.helix.0, b.pos as i64),
            None => (-1, -1),
        };
        let (ph, pp) = side(self.prev);
        let (nh, np) = side(self.next);
        [ph, pp, nh, np]
    }
}

/// 24-bit RGB color as stored in `stap_colors`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color(pub u32);

impl Color {
    /// Reserved: the strand is pinned and must not be reclassified or mutated
    pub const PINNED: Color = Color(0xFF_FF_FF);
    pub const OPTIMAL: Color = Color(0x00_00_FF);
    pub const ACCEPTABLE: Color = Color(0x00_FF_FF);
    pub const WEAK: Color = Color(0xFF_00_00);
    pub const TOO_SHORT: Color = Color(0xFF_FF_00);
    pub const TOO_LONG: Color = Color(0xFF_00_FF);
    /// Marks a strand created by an automatic break
    pub const BROKEN: Color = Color(0x00_FF_00);

    pub fn is_pinned(self) -> bool {
        self == Self::PINNED
    }

    /// Parse `#RRGGBB` or `RRGGBB`
    pub fn from_hex(s: &str) -> Option<Self> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        if digits.is_empty() || digits.len() > 6 {
            return None;
        }
        u32::from_str_radix(digits, 16).ok().map(Color)
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:06X}", self.0)
    }
}

/// Per-strand color marker attached to a strand's first base
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorMarker {
    pub pos: usize,
    pub color: Color,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_tuple_round_trip() {
        let raw = [2, 10, 3, 11];
        let link = Link::from_tuple(raw);
        assert_eq!(link.prev, Some(BasePos::new(HelixId(2), 10)));
        assert_eq!(link.next, Some(BasePos::new(HelixId(3), 11)));
        assert_eq!(link.to_tuple(), raw);
    }

    #[test]
    fn test_empty_link() {
        let link = Link::from_tuple([-1, -1, -1, -1]);
        assert!(link.is_empty());
        assert_eq!(link.to_tuple(), [-1, -1, -1, -1]);
    }

    #[test]
    fn test_color_hex() {
        assert_eq!(Color::from_hex("#FFFFFF"), Some(Color::PINNED));
        assert_eq!(Color::from_hex("0000ff"), Some(Color::OPTIMAL));
        assert_eq!(Color::from_hex("nothex"), None);
        assert_eq!(Color::from_hex("#1234567"), None);
        assert_eq!(Color::BROKEN.to_string(), "#00FF00");
    }

    #[test]
    fn test_base_pos_display() {
        assert_eq!(BasePos::new(HelixId(4), 21).to_string(), "4[21]");
    }
}
