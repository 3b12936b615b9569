//! The built-in map of Verdantia.
//!
//! Ten named places on a 1000 x 1500 canvas. The hero sets out from the
//! coral marshes (`BG1`) toward the twilight tower (`BST`).

use verdantia_core::params::RouteEnds;
use verdantia_core::types::Location;

pub const DEFAULT_START: &str = "BG1";
pub const DEFAULT_GOAL: &str = "BST";

/// All locations of the built-in map, in their canonical order.
pub fn verdantia_map() -> Vec<Location> {
    vec![
        Location::new("MR1", "Najwyższe Mrowisko", 150.0, 350.0),
        Location::new("BG1", "Bagna Koralowe", 180.0, 1250.0),
        Location::new("RC1", "Rzeka Dwóch Cieni", 450.0, 800.0),
        Location::new("LB1", "Labirynt Pięciu Dolin", 500.0, 700.0),
        Location::new("BST", "Baszta Zmierzchu", 870.0, 240.0),
        Location::new("CT1", "Zamek Główny", 830.0, 1370.0),
        Location::new("FV1", "Fioletowy Wąwóz", 300.0, 600.0),
        Location::new("JG1", "Jezioro Głębokiej Ciszy", 620.0, 1000.0),
        Location::new("MG1", "Mglista Grota", 700.0, 500.0),
        Location::new("KL1", "Kwietna Łąka Elfów", 400.0, 1200.0),
    ]
}

/// Start and goal of the built-in map.
pub fn default_ends() -> RouteEnds {
    RouteEnds {
        start: DEFAULT_START.into(),
        goal: DEFAULT_GOAL.into(),
    }
}
