//! The galaxy scenario: fixed initial bodies and their orbital parameters.
//!
//! All entities are constructed once from these tables at engine startup
//! and persist for the process lifetime; destruction is a state flip, not
//! a removal.

use glam::Vec3;

use helios_core::colors::ColorName;

/// An armed (or scanning-only) fire-control site attached to a moon slot.
#[derive(Debug, Clone, Copy)]
pub struct EmplacementDef {
    pub detection_radius: f32,
    pub missile_stock: u32,
    /// Lifetime granted to each round this site fires.
    pub round_lives: u32,
}

/// A moon owned by a planet.
#[derive(Debug, Clone, Copy)]
pub struct MoonDef {
    pub name: &'static str,
    pub radius: f32,
    pub degrees_per_tick: f32,
    /// Local position relative to the parent planet.
    pub position: Vec3,
    pub color: ColorName,
    pub emplacement: Option<EmplacementDef>,
}

/// A planet orbiting the sun.
#[derive(Debug, Clone, Copy)]
pub struct PlanetDef {
    pub name: &'static str,
    pub radius: f32,
    pub degrees_per_tick: f32,
    pub position: Vec3,
    pub color: ColorName,
    pub moons: &'static [MoonDef],
}

/// A free-orbiting scanning site (never fires, never targeted).
#[derive(Debug, Clone, Copy)]
pub struct OracleDef {
    pub name: &'static str,
    pub radius: f32,
    pub degrees_per_tick: f32,
    pub position: Vec3,
    pub color: ColorName,
    pub detection_radius: f32,
}

/// A stationary ring obstacle.
#[derive(Debug, Clone, Copy)]
pub struct RingDef {
    pub name: &'static str,
    pub tube_radius: f32,
    pub position: Vec3,
    pub color: ColorName,
}

pub const SUN_NAME: &str = "Helios";
pub const SUN_RADIUS: f32 = 2000.0;

pub const SHIP_NAME: &str = "Warbird";
pub const SHIP_POSITION: Vec3 = Vec3::new(5000.0, 1000.0, -5000.0);
pub const SHIP_SPEED: f32 = 50.0;

/// Wingman formation offsets from the ship.
pub const ESCORT_OFFSETS: [Vec3; 3] = [
    Vec3::new(200.0, 0.0, -500.0),
    Vec3::new(-200.0, 0.0, -500.0),
    Vec3::new(0.0, 0.0, -500.0),
];

/// Hover offset above each planet used by the warp command, indexed in
/// planet order.
pub const WARP_OFFSETS: [Vec3; 4] = [
    Vec3::new(0.0, 2000.0, 0.0),
    Vec3::new(0.0, 2000.0, 0.0),
    Vec3::new(0.0, 5000.0, 0.0),
    Vec3::new(0.0, 3000.0, 0.0),
];

const UNUM_DETECTION: f32 = 3000.0;
const TRES_DETECTION: f32 = 5000.0;

/// Ticks of flight granted to rounds from the near site.
const UNUM_ROUND_LIVES: u32 = 600;

/// The far site's rounds chase twice as long.
const TRES_ROUND_LIVES: u32 = 1200;

pub const PLANETS: [PlanetDef; 4] = [
    PlanetDef {
        name: "Unum",
        radius: 300.0,
        degrees_per_tick: 0.45,
        position: Vec3::new(4000.0, 0.0, 0.0),
        color: ColorName::White,
        moons: &[
            MoonDef {
                name: "U.Primun",
                radius: 50.0,
                degrees_per_tick: 1.13,
                position: Vec3::new(800.0, 0.0, 0.0),
                color: ColorName::Brown,
                emplacement: None,
            },
            MoonDef {
                name: "U.Secundo",
                radius: 50.0,
                degrees_per_tick: 0.75,
                position: Vec3::new(1000.0, 0.0, 0.0),
                color: ColorName::CornflowerBlue,
                emplacement: None,
            },
            MoonDef {
                name: "U.Missile",
                radius: 50.0,
                degrees_per_tick: 0.0,
                position: Vec3::new(325.0, 0.0, 0.0),
                color: ColorName::White,
                emplacement: Some(EmplacementDef {
                    detection_radius: UNUM_DETECTION,
                    missile_stock: helios_core::constants::EMPLACEMENT_MISSILE_STOCK,
                    round_lives: UNUM_ROUND_LIVES,
                }),
            },
        ],
    },
    PlanetDef {
        name: "Duo",
        radius: 400.0,
        degrees_per_tick: 0.23,
        position: Vec3::new(-7000.0, 0.0, 0.0),
        color: ColorName::White,
        moons: &[],
    },
    PlanetDef {
        name: "Tres",
        radius: 800.0,
        degrees_per_tick: 0.11,
        position: Vec3::new(0.0, 0.0, 12000.0),
        color: ColorName::White,
        moons: &[
            MoonDef {
                name: "T.Primun",
                radius: 50.0,
                degrees_per_tick: 0.75,
                position: Vec3::new(0.0, 0.0, 1800.0),
                color: ColorName::Blue,
                emplacement: None,
            },
            MoonDef {
                name: "T.Secundo",
                radius: 50.0,
                degrees_per_tick: 0.56,
                position: Vec3::new(0.0, 0.0, 2000.0),
                color: ColorName::Magenta,
                emplacement: None,
            },
            MoonDef {
                name: "T.Tertia",
                radius: 80.0,
                degrees_per_tick: 0.45,
                position: Vec3::new(0.0, 0.0, 2300.0),
                color: ColorName::Orange,
                emplacement: None,
            },
            MoonDef {
                name: "T.Quartum",
                radius: 100.0,
                degrees_per_tick: 0.32,
                position: Vec3::new(0.0, 0.0, 2700.0),
                color: ColorName::Cyan,
                emplacement: None,
            },
            MoonDef {
                name: "T.Missile",
                radius: 50.0,
                degrees_per_tick: 0.0,
                position: Vec3::new(0.0, 0.0, 3005.0),
                color: ColorName::Green,
                emplacement: Some(EmplacementDef {
                    detection_radius: TRES_DETECTION,
                    missile_stock: helios_core::constants::EMPLACEMENT_MISSILE_STOCK,
                    round_lives: TRES_ROUND_LIVES,
                }),
            },
        ],
    },
    PlanetDef {
        name: "Quattuor",
        radius: 500.0,
        degrees_per_tick: 0.08,
        position: Vec3::new(0.0, 0.0, -20000.0),
        color: ColorName::White,
        moons: &[MoonDef {
            name: "Q.Primun",
            radius: 100.0,
            degrees_per_tick: 0.45,
            position: Vec3::new(0.0, 0.0, -1000.0),
            color: ColorName::Green,
            emplacement: None,
        }],
    },
];

pub const ORACLES: [OracleDef; 1] = [OracleDef {
    name: "Helion",
    radius: 500.0,
    degrees_per_tick: 0.01,
    position: Vec3::new(15000.0, 0.0, 0.0),
    color: ColorName::FireBrick,
    detection_radius: 5000.0,
}];

pub const RINGS: [RingDef; 4] = [
    RingDef {
        name: "one",
        tube_radius: 500.0,
        position: Vec3::new(-5000.0, 7000.0, 0.0),
        color: ColorName::CadetBlue,
    },
    RingDef {
        name: "two",
        tube_radius: 500.0,
        position: Vec3::new(0.0, 7000.0, 0.0),
        color: ColorName::Aquamarine,
    },
    RingDef {
        name: "three",
        tube_radius: 500.0,
        position: Vec3::new(5000.0, 7000.0, 0.0),
        color: ColorName::LightWood,
    },
    RingDef {
        name: "four",
        tube_radius: 500.0,
        position: Vec3::new(10000.0, 7000.0, 0.0),
        color: ColorName::Magenta,
    },
];
