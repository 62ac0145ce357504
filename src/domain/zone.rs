// Zone domain model
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub id: i64,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Static zone reference set shown on the map
const REFERENCE_ZONES: [(i64, &str, f64, f64); 10] = [
    (1, "Downtown Pike St", 47.6105, -122.3380),
    (2, "Downtown 1st Ave", 47.6050, -122.3350),
    (3, "Downtown 3rd Ave", 47.6080, -122.3310),
    (4, "Capitol Hill - Broadway", 47.6240, -122.3210),
    (5, "University District - University Way", 47.6650, -122.3130),
    (6, "Stadium District - Occidental", 47.5920, -122.3330),
    (7, "Stadium District - 1st Ave S", 47.5970, -122.3280),
    (8, "Capitol Hill - Pike St", 47.6180, -122.3150),
    (9, "University District - 45th St", 47.6590, -122.3080),
    (10, "Fremont - Fremont Ave", 47.6505, -122.3493),
];

pub fn reference_zones() -> Vec<Zone> {
    REFERENCE_ZONES
        .iter()
        .map(|&(id, name, lat, lng)| Zone {
            id,
            name: name.to_string(),
            lat,
            lng,
            description: None,
        })
        .collect()
}

pub fn find_reference_zone(id: i64) -> Option<Zone> {
    reference_zones().into_iter().find(|z| z.id == id)
}

/// Display label for a zone id, falling back to `Zone {id}` when unknown
pub fn zone_label(id: i64) -> String {
    find_reference_zone(id)
        .map(|z| z.name)
        .unwrap_or_else(|| format!("Zone {}", id))
}
