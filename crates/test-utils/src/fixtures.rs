//! Common test fixtures for colormap and pyramid tests.

/// Colormap texts in the line format.
pub mod colormaps {
    /// Small three-entry map from the format documentation.
    pub const SIMPLE: &str = "# units: meters\n\n0,120,50,50\n10,0,50,50\n";

    /// Temperature map with a doc comment, a no-data entry and partial alpha.
    pub const TEMPERATURE: &str = "\
# Two meter temperature.
#
# Hues run from violet (cold) to red (hot).
# units: °C

nv,0,0,0,0
-30,270,60,40
-10,220,70,50
0,180,60,50,200
10,120,50,50
25,40,90,50
40,0,80,45
";

    /// Precipitation map with large values to exercise grouped labels.
    pub const PRECIPITATION: &str = "\
# units: mm
nv,0,0,0,0
0,200,0,100,0
1,200,60,80
10,210,70,60
100,230,80,45
1000,270,90,35
";

    /// Data before any units line.
    pub const MISSING_UNITS: &str = "# just a note\n0,120,50,50\n";

    /// Hue out of range on line 3.
    pub const BAD_HUE: &str = "# units: K\n0,120,50,50\n1,361,50,50\n";

    /// Three fields on line 2.
    pub const SHORT_LINE: &str = "# units: K\n0,120,50\n";
}

/// Windy-style JSON color scales.
pub mod windy {
    pub const TEMPERATURE: &str =
        "[[203.15,[115,70,105,255]],[273.15,[255,255,255,255]],[318.15,[255,0,0,128]]]";
}

/// Bounding boxes used across tests.
pub mod bbox {
    use tile_common::BoundingBox;

    pub fn global() -> BoundingBox {
        BoundingBox::global()
    }

    /// Scotland, the region several production layers are cut to.
    pub fn scotland() -> BoundingBox {
        BoundingBox::new(-8.0, 54.5, -0.5, 61.0)
    }

    /// The ICON-EU model domain.
    pub fn icon_eu() -> BoundingBox {
        BoundingBox::new(-23.5, 29.5, 45.0, 70.5)
    }

    /// Degenerate box at Greenwich on the equator.
    pub fn null_island() -> BoundingBox {
        BoundingBox::point(0.0, 0.0)
    }

    /// Crosses the antimeridian.
    pub fn pacific() -> BoundingBox {
        BoundingBox::new(160.0, -50.0, -140.0, 50.0)
    }
}
