//! Station matcher.
//!
//! Turns what a user typed into a place on the map. A station is matched by
//! name only when the query says it wants one ("LRT KLCC", "Pasar Seni
//! station"); bare place names go to the geocoder, so "KLCC" means the
//! shopping centre rather than the platform.

mod intent;
mod matcher;
mod resolve;
mod similarity;

pub use intent::{STRIPPED_KEYWORDS, TRANSIT_KEYWORDS, has_transit_intent, strip_keywords};
pub use matcher::{MATCH_THRESHOLD, StationMatch, find_station_by_name};
pub use resolve::{Resolution, ResolutionSource, parse_coordinate_pair, resolve_query};
pub use similarity::{levenshtein, similarity};
