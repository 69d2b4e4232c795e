//! Bundled drone models and their hotspot lists.

use crate::error::ViewerError;
use crate::hotspot::{Hotspot, HotspotRegistry};
use crate::viewer::ViewerConfig;
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DroneModel {
    Shahed136,
    Mq9Reaper,
    Rq170Sentinel,
    UsntHawk,
}

impl DroneModel {
    pub const ALL: [DroneModel; 4] = [
        DroneModel::Shahed136,
        DroneModel::Mq9Reaper,
        DroneModel::Rq170Sentinel,
        DroneModel::UsntHawk,
    ];

    pub fn asset_path(self) -> &'static str {
        match self {
            DroneModel::Shahed136 => "/3D/Shahed.glb",
            DroneModel::Mq9Reaper => "/3D/MQ-9.glb",
            DroneModel::Rq170Sentinel => "/3D/RQ-170.glb",
            DroneModel::UsntHawk => "/3D/USNT-Hawk.glb",
        }
    }

    pub fn hotspots(self) -> Vec<Hotspot> {
        match self {
            DroneModel::Shahed136 => shahed_136(),
            DroneModel::Mq9Reaper => mq9_reaper(),
            DroneModel::Rq170Sentinel => rq170_sentinel(),
            DroneModel::UsntHawk => usnt_hawk(),
        }
    }

    pub fn config(self) -> Result<ViewerConfig, ViewerError> {
        let registry = HotspotRegistry::new(self.hotspots())?;
        Ok(ViewerConfig::new(self.asset_path(), registry))
    }
}

impl fmt::Display for DroneModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DroneModel::Shahed136 => "shahed",
            DroneModel::Mq9Reaper => "mq9",
            DroneModel::Rq170Sentinel => "rq170",
            DroneModel::UsntHawk => "usnt-hawk",
        };
        f.write_str(name)
    }
}

impl FromStr for DroneModel {
    type Err = ViewerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "shahed" | "shahed-136" | "shahed136" => Ok(DroneModel::Shahed136),
            "mq9" | "mq-9" | "reaper" => Ok(DroneModel::Mq9Reaper),
            "rq170" | "rq-170" | "sentinel" => Ok(DroneModel::Rq170Sentinel),
            "usnt-hawk" | "usnthawk" | "hawk" => Ok(DroneModel::UsntHawk),
            _ => Err(ViewerError::UnknownModel(s.to_string())),
        }
    }
}

pub fn shahed_136() -> Vec<Hotspot> {
    vec![
        Hotspot::new("warhead", [0.0, 0.0, 0.8], 0x00ffff, "Shahed-136")
            .overview(
                "The Shahed-136 is an Iranian-made loitering munition (kamikaze drone) designed for long-range strikes. It's a delta-wing unmanned aerial vehicle with a distinctive profile.",
            )
            .spec("Range", "Approximately 2,500 km")
            .spec("Warhead", "40-50 kg explosive payload")
            .spec("Speed", "~185 km/h (cruise speed)")
            .spec("Guidance", "GPS/INS navigation system")
            .characteristics(
                "Features a small radar cross-section, relatively low cost compared to traditional missiles, and can be launched from ground platforms. The drone operates autonomously after launch.",
            ),
        Hotspot::new("engine", [0.0, 0.0, -0.9], 0xff6600, "Engine System")
            .overview(
                "The Shahed-136 uses a piston engine that provides efficient long-range cruise capability. The engine is mounted in a pusher configuration at the rear of the fuselage.",
            )
            .spec("Type", "Piston engine")
            .spec("Configuration", "Pusher propeller")
            .spec("Fuel", "Standard aviation fuel")
            .spec("Endurance", "Several hours of flight time")
            .characteristics(
                "The engine produces a distinctive buzzing sound during flight, leading to the drone being nicknamed \"moped\" by some observers. The design prioritizes fuel efficiency over speed.",
            ),
        Hotspot::new("wings", [0.7, 0.0, 0.56], 0x00ff00, "Wing Structure")
            .overview(
                "The Shahed-136 features a distinctive delta-wing design that provides stability and lift during long-range missions. The wings are collapsible for transport and storage.",
            )
            .spec("Design", "Delta wing configuration")
            .spec("Material", "Lightweight composite")
            .spec("Span", "Approximately 2.5 meters")
            .spec("Features", "Foldable for transport")
            .characteristics(
                "The delta wing provides excellent stability and control during cruise flight. The design allows for compact storage and easy transport in launch containers.",
            ),
    ]
}

pub fn mq9_reaper() -> Vec<Hotspot> {
    vec![Hotspot::new("mq9", [0.0, 0.0, 0.0], 0x00ffff, "MQ-9 Reaper")
        .overview(
            "The MQ-9 Reaper is a U.S. remotely piloted aircraft designed for long-endurance intelligence, surveillance, and reconnaissance (ISR) missions, as well as precision strike roles. It is larger and more capable than the MQ-1 Predator, with greater payload, range, and operational ceiling.",
        )
        .spec("Range", "Over 1,800 km (operational radius up to 1,000+ km)")
        .spec("Endurance", "Up to 27 hours")
        .spec("Speed", "Approx. 300–370 km/h (cruise speed)")
        .spec("Ceiling", "~50,000 feet")
        .spec("Payload", "Up to 1,700 kg (external + internal)")
        .spec("Sensors", "EO/IR camera, synthetic aperture radar, targeting systems")
        .characteristics(
            "Features long-endurance flight, high payload capacity, multi-mission sensor integration, and satellite-linked remote operation. The MQ-9 is widely used for ISR, precision engagement, and persistent surveillance in complex operational environments.",
        )]
}

pub fn rq170_sentinel() -> Vec<Hotspot> {
    vec![Hotspot::new("rq170", [0.0, 1.2, 0.0], 0x00ffff, "RQ-170 Sentinel")
        .overview(
            "The RQ-170 Sentinel is a U.S. stealth unmanned aerial vehicle (UAV) developed for high-altitude intelligence, surveillance, and reconnaissance (ISR) missions. Known as the “Beast of Kandahar,” it features a flying-wing design optimized for low observability.",
        )
        .spec("Range", "Estimated 2,400+ km")
        .spec("Endurance", "Estimated 6+ hours")
        .spec("Wingspan", "~20 meters (approx.)")
        .spec("Speed", "High subsonic (exact speed classified)")
        .spec("Role", "ISR / Electronic intelligence (ELINT)")
        .characteristics(
            "Features stealth shaping, radar-absorbent materials, and advanced sensor payloads. Its exact capabilities remain classified, but it is believed to support deep-penetration surveillance missions in contested airspace with minimal radar signature.",
        )]
}

pub fn usnt_hawk() -> Vec<Hotspot> {
    vec![Hotspot::new("usntHawk", [0.0, 0.0, 0.0], 0x00ffff, "USNT-Hawk")
        .overview(
            "The USNT-Hawk is a U.S.-developed small tactical unmanned aircraft system (UAS) designed for battlefield reconnaissance, surveillance, and target acquisition. It is optimized for rapid deployment, low acoustic signature, and high-precision sensor payloads.",
        )
        .spec("Range", "10–20 km operational radius")
        .spec("Endurance", "60–120 minutes depending on payload")
        .spec("Speed", "55–90 km/h (cruise speed)")
        .spec("Payload", "Electro-optical/IR camera; optional laser designator")
        .spec("Launch Method", "Hand-launch or portable rail launcher")
        .spec("Recovery", "Autonomous belly landing or net recovery")
        .characteristics(
            "Features modular sensors, encrypted communication links, GPS/INS navigation, and quiet electric propulsion. The USNT-Hawk is primarily used for platoon-level ISR missions and is engineered for rapid setup by a two-person team.",
        )]
}
