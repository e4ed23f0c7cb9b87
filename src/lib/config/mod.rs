//! Configuration file handling.
//!
//! - [`ini`]: the `.ini` document model shared by every GeoMx utility
//! - [`geomx`]: typed views over GeoMx pipeline configurations

pub mod geomx;
pub mod ini;

pub use geomx::{GeomxConfig, WellMap, AOI_LIST, PROCESSING, TARGETS};
pub use ini::{IniDocument, IniSection};
