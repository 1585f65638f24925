use serde::{Deserialize, Serialize};

/// The sensor keys in their declared order. The feature-vector builder
/// iterates readings in exactly this order so overlap resolution is
/// deterministic (last write wins).
pub const SENSOR_KEYS: [&str; 8] = [
    "Iron_Feed",
    "Silica_Feed",
    "Starch_Flow",
    "Amina_Flow",
    "Ore_Pulp_Flow",
    "Ore_Pulp_pH",
    "Ore_Pulp_Density",
    "Iron_Concentrate",
];

/// One snapshot of the operator-supplied sensor values. Serialized names
/// match the plant dataset column names. Domain bounds are enforced by the
/// dashboard sliders, not here.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SensorReadings {
    #[serde(rename = "Iron_Feed")]
    pub iron_feed: f64,
    #[serde(rename = "Silica_Feed")]
    pub silica_feed: f64,
    #[serde(rename = "Starch_Flow")]
    pub starch_flow: f64,
    #[serde(rename = "Amina_Flow")]
    pub amina_flow: f64,
    #[serde(rename = "Ore_Pulp_Flow")]
    pub ore_pulp_flow: f64,
    #[serde(rename = "Ore_Pulp_pH")]
    pub ore_pulp_ph: f64,
    #[serde(rename = "Ore_Pulp_Density")]
    pub ore_pulp_density: f64,
    #[serde(rename = "Iron_Concentrate")]
    pub iron_concentrate: f64,
}

impl SensorReadings {
    /// The readings as `(key, value)` pairs in the [`SENSOR_KEYS`] order.
    pub fn named_values(&self) -> [(&'static str, f64); 8] {
        [
            (SENSOR_KEYS[0], self.iron_feed),
            (SENSOR_KEYS[1], self.silica_feed),
            (SENSOR_KEYS[2], self.starch_flow),
            (SENSOR_KEYS[3], self.amina_flow),
            (SENSOR_KEYS[4], self.ore_pulp_flow),
            (SENSOR_KEYS[5], self.ore_pulp_ph),
            (SENSOR_KEYS[6], self.ore_pulp_density),
            (SENSOR_KEYS[7], self.iron_concentrate),
        ]
    }
}

impl Default for SensorReadings {
    /// Dataset means, the same values the dashboard seeds its sliders with.
    fn default() -> Self {
        Self {
            iron_feed: 55.0,
            silica_feed: 15.0,
            starch_flow: 3000.0,
            amina_flow: 450.0,
            ore_pulp_flow: 400.0,
            ore_pulp_ph: 9.8,
            ore_pulp_density: 1.7,
            iron_concentrate: 65.0,
        }
    }
}
