use mapviz_common::Rgba;

/// Elevation band used to color terrain from a height map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HeightBand {
    Water,
    Grass,
    Forest,
    Mountain,
    Peak,
}

impl HeightBand {
    pub const ALL: [HeightBand; 5] = [
        HeightBand::Water,
        HeightBand::Grass,
        HeightBand::Forest,
        HeightBand::Mountain,
        HeightBand::Peak,
    ];

    /// Ascending thresholds; each is the inclusive top of its band.
    const WATER_MAX: u32 = 25;
    const GRASS_MAX: u32 = 75;
    const FOREST_MAX: u32 = 155;
    const MOUNTAIN_MAX: u32 = 240;

    pub fn classify(height: u32) -> Self {
        if height <= Self::WATER_MAX {
            HeightBand::Water
        } else if height <= Self::GRASS_MAX {
            HeightBand::Grass
        } else if height <= Self::FOREST_MAX {
            HeightBand::Forest
        } else if height <= Self::MOUNTAIN_MAX {
            HeightBand::Mountain
        } else {
            HeightBand::Peak
        }
    }

    /// Inclusive upper bound, `None` for the open top band.
    pub fn upper_bound(self) -> Option<u32> {
        match self {
            HeightBand::Water => Some(Self::WATER_MAX),
            HeightBand::Grass => Some(Self::GRASS_MAX),
            HeightBand::Forest => Some(Self::FOREST_MAX),
            HeightBand::Mountain => Some(Self::MOUNTAIN_MAX),
            HeightBand::Peak => None,
        }
    }

    pub fn color(self) -> Rgba {
        match self {
            HeightBand::Water => Rgba::rgb(19, 19, 220),
            HeightBand::Grass => Rgba::rgb(17, 163, 17),
            HeightBand::Forest => Rgba::rgb(13, 91, 13),
            HeightBand::Mountain => Rgba::rgb(50, 30, 20),
            HeightBand::Peak => Rgba::rgb(145, 17, 17),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            HeightBand::Water => "water",
            HeightBand::Grass => "grass",
            HeightBand::Forest => "forest",
            HeightBand::Mountain => "mountain",
            HeightBand::Peak => "peak",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_belong_to_the_lower_band() {
        let cases = [
            (0, HeightBand::Water),
            (25, HeightBand::Water),
            (26, HeightBand::Grass),
            (75, HeightBand::Grass),
            (76, HeightBand::Forest),
            (155, HeightBand::Forest),
            (156, HeightBand::Mountain),
            (240, HeightBand::Mountain),
            (241, HeightBand::Peak),
            (u32::MAX, HeightBand::Peak),
        ];
        for (height, band) in cases {
            assert_eq!(HeightBand::classify(height), band, "height {height}");
        }
    }

    #[test]
    fn band_colors() {
        assert_eq!(HeightBand::classify(0).color(), Rgba::rgb(19, 19, 220));
        assert_eq!(HeightBand::classify(50).color(), Rgba::rgb(17, 163, 17));
        assert_eq!(HeightBand::classify(100).color(), Rgba::rgb(13, 91, 13));
        assert_eq!(HeightBand::classify(200).color(), Rgba::rgb(50, 30, 20));
        assert_eq!(HeightBand::classify(300).color(), Rgba::rgb(145, 17, 17));
    }

    #[test]
    fn upper_bounds_ascend() {
        let bounds: Vec<u32> = HeightBand::ALL.iter().filter_map(|b| b.upper_bound()).collect();
        assert_eq!(bounds, vec![25, 75, 155, 240]);
        for band in HeightBand::ALL {
            if let Some(top) = band.upper_bound() {
                assert_eq!(HeightBand::classify(top), band);
            }
        }
    }

    #[test]
    fn index_matches_order() {
        for (i, band) in HeightBand::ALL.iter().enumerate() {
            assert_eq!(band.index(), i);
        }
    }
}
