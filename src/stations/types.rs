#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// A docking station as reported by the upstream feed, normalized across the
/// JSON and XML feed shapes.
#[derive(Debug, Clone, PartialEq)]
pub struct StationRecord {
    pub id: String,
    pub name: String,
    pub location: Coordinate,
    pub installed: bool,
    pub locked: bool,
    pub total_bikes_available: u32,
    pub standard_bikes_available: u32,
    pub e_bikes_available: u32,
    pub empty_docks_available: u32,
    pub total_docks: u32,
}

impl StationRecord {
    /// Installed and not locked.
    pub fn is_usable(&self) -> bool {
        self.installed && !self.locked
    }

    pub fn has_bikes(&self) -> bool {
        self.standard_bikes_available > 0
    }

    pub fn has_docks(&self) -> bool {
        self.empty_docks_available > 0
    }

    /// Name up to the first comma, e.g. "River Street" for
    /// "River Street , Clerkenwell".
    pub fn short_name(&self) -> &str {
        self.name.split(',').next().unwrap_or("").trim()
    }
}
