//! Pixel type ids and the static property table

use serde::{Deserialize, Serialize};

use crate::Pixel;

/// Pixel type id
///
/// A transparent newtype rather than a closed enum, so ids written by a
/// newer build still load and fall back to inert behaviour.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PixelType(pub u8);

impl PixelType {
    pub const NONE: PixelType = PixelType(0);
    pub const SAND: PixelType = PixelType(1);
    pub const COAL: PixelType = PixelType(2);
    pub const DIRT: PixelType = PixelType(3);
    pub const ROCK: PixelType = PixelType(4);

    // Liquids
    pub const WATER: PixelType = PixelType(5);
    pub const LAVA: PixelType = PixelType(6);
    pub const ACID: PixelType = PixelType(7);

    // Gases
    pub const STEAM: PixelType = PixelType(8);

    pub const TITANIUM: PixelType = PixelType(9);

    // Fire
    pub const FUSE: PixelType = PixelType(10);
    pub const EMBER: PixelType = PixelType(11);
    pub const OIL: PixelType = PixelType(12);
    pub const GUNPOWDER: PixelType = PixelType(13);
    pub const METHANE: PixelType = PixelType(14);

    // Electricity
    pub const BATTERY: PixelType = PixelType(15);
    pub const SOLDER: PixelType = PixelType(16);
    pub const DIODE_IN: PixelType = PixelType(17);
    pub const DIODE_OUT: PixelType = PixelType(18);
    pub const SPARK: PixelType = PixelType(19);
    pub const C4: PixelType = PixelType(20);
    pub const RELAY: PixelType = PixelType(21);

    /// Every known type, in id order
    pub const ALL: [PixelType; 22] = [
        Self::NONE,
        Self::SAND,
        Self::COAL,
        Self::DIRT,
        Self::ROCK,
        Self::WATER,
        Self::LAVA,
        Self::ACID,
        Self::STEAM,
        Self::TITANIUM,
        Self::FUSE,
        Self::EMBER,
        Self::OIL,
        Self::GUNPOWDER,
        Self::METHANE,
        Self::BATTERY,
        Self::SOLDER,
        Self::DIODE_IN,
        Self::DIODE_OUT,
        Self::SPARK,
        Self::C4,
        Self::RELAY,
    ];

    pub fn is_known(self) -> bool {
        (self.0 as usize) < Self::ALL.len()
    }

    /// Display name, as shown by the host
    pub fn name(self) -> &'static str {
        match self {
            Self::NONE => "air",
            Self::SAND => "sand",
            Self::COAL => "coal",
            Self::DIRT => "dirt",
            Self::ROCK => "rock",
            Self::WATER => "water",
            Self::LAVA => "lava",
            Self::ACID => "acid",
            Self::STEAM => "steam",
            Self::TITANIUM => "titanium",
            Self::FUSE => "fuse",
            Self::EMBER => "ember",
            Self::OIL => "oil",
            Self::GUNPOWDER => "gunpowder",
            Self::METHANE => "methane",
            Self::BATTERY => "battery",
            Self::SOLDER => "solder",
            Self::DIODE_IN => "diode_in",
            Self::DIODE_OUT => "diode_out",
            Self::SPARK => "spark",
            Self::C4 => "c4",
            Self::RELAY => "relay",
            _ => "unknown",
        }
    }

    /// Parse a display name back into a type id
    pub fn from_name(name: &str) -> Option<PixelType> {
        Self::ALL.iter().copied().find(|kind| kind.name() == name)
    }

    /// Static properties for this type
    ///
    /// Unknown ids log an error and resolve to the inert default record.
    pub fn properties(self) -> &'static PixelProperties {
        match self {
            Self::NONE => &NONE,
            Self::SAND => &SAND,
            Self::COAL => &COAL,
            Self::DIRT => &DIRT,
            Self::ROCK => &ROCK,
            Self::WATER => &WATER,
            Self::LAVA => &LAVA,
            Self::ACID => &ACID,
            Self::STEAM => &STEAM,
            Self::TITANIUM => &TITANIUM,
            Self::FUSE => &FUSE,
            Self::EMBER => &EMBER,
            Self::OIL => &OIL,
            Self::GUNPOWDER => &GUNPOWDER,
            Self::METHANE => &METHANE,
            Self::BATTERY => &BATTERY,
            Self::SOLDER => &SOLDER,
            Self::DIODE_IN => &DIODE_IN,
            Self::DIODE_OUT => &DIODE_OUT,
            Self::SPARK => &SPARK,
            Self::C4 => &C4,
            Self::RELAY => &RELAY,
            unknown => {
                log::error!("Unknown pixel type {}, using inert properties", unknown.0);
                &PixelProperties::DEFAULT
            }
        }
    }
}

/// Displacement class of a pixel type
///
/// Ordered so that a "heavier" phase compares greater: a pixel may only push
/// into a cell holding a strictly lighter phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Phase {
    Gas,
    Liquid,
    Solid,
}

/// Electrical role of a pixel type
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerType {
    None,
    /// Charges itself up to `power_max`
    Source,
    /// Carries power from neighbours and decays every tick
    Conductor,
}

/// Physical constants of a pixel type
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PixelProperties {
    // Movement
    pub phase: Phase,
    pub can_move_diagonally: bool,
    /// Multiplier on global gravity (negative rises)
    pub gravity_factor: f32,
    /// Resting pixels with resistance stay put until disturbed
    pub inertial_resistance: f32,
    /// Horizontal spread distance per tick
    pub dispersion_rate: i32,

    // Misc
    pub always_awake: bool,
    /// Per-tick chance of vanishing
    pub spontaneous_destroy: f32,

    // Acid & water
    pub can_boil_water: bool,
    pub corrosion_resist: f32,
    pub is_corrosion_source: bool,

    // Fire
    pub flammability: f32,
    /// Put-out chance when every neighbour is occupied
    pub put_out_surrounded: f32,
    pub put_out: f32,
    pub burn_out_chance: f32,
    pub explosion_chance: f32,
    pub is_burn_source: bool,
    pub is_ember_source: bool,

    // Electricity
    pub explodes_on_power: bool,
    pub power_type: PowerType,
    pub power_max: u8,
}

impl PixelProperties {
    /// Inert record every type starts from
    pub const DEFAULT: PixelProperties = PixelProperties {
        phase: Phase::Solid,
        can_move_diagonally: false,
        gravity_factor: 0.0,
        inertial_resistance: 0.0,
        dispersion_rate: 0,
        always_awake: false,
        spontaneous_destroy: 0.0,
        can_boil_water: false,
        corrosion_resist: 0.8,
        is_corrosion_source: false,
        flammability: 0.0,
        put_out_surrounded: 0.0,
        put_out: 0.0,
        burn_out_chance: 0.0,
        explosion_chance: 0.0,
        is_burn_source: false,
        is_ember_source: false,
        explodes_on_power: false,
        power_type: PowerType::None,
        power_max: 0,
    };
}

impl Default for PixelProperties {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Properties of the pixel's type (O(1) constant lookup)
pub fn properties(pixel: &Pixel) -> &'static PixelProperties {
    pixel.kind.properties()
}

/// A power source at full charge
pub fn is_active_power_source(pixel: &Pixel) -> bool {
    let props = properties(pixel);
    props.power_type == PowerType::Source && pixel.power == props.power_max
}

const NONE: PixelProperties = PixelProperties {
    phase: Phase::Gas,
    corrosion_resist: 1.0,
    ..PixelProperties::DEFAULT
};

const SAND: PixelProperties = PixelProperties {
    can_move_diagonally: true,
    gravity_factor: 1.0,
    inertial_resistance: 0.1,
    corrosion_resist: 0.3,
    ..PixelProperties::DEFAULT
};

const COAL: PixelProperties = PixelProperties {
    can_move_diagonally: true,
    gravity_factor: 1.0,
    inertial_resistance: 0.95,
    corrosion_resist: 0.8,
    flammability: 0.02,
    put_out_surrounded: 0.15,
    put_out: 0.02,
    burn_out_chance: 0.005,
    ..PixelProperties::DEFAULT
};

const DIRT: PixelProperties = PixelProperties {
    can_move_diagonally: true,
    gravity_factor: 1.0,
    inertial_resistance: 0.4,
    corrosion_resist: 0.5,
    ..PixelProperties::DEFAULT
};

const ROCK: PixelProperties = PixelProperties {
    corrosion_resist: 0.95,
    ..PixelProperties::DEFAULT
};

const WATER: PixelProperties = PixelProperties {
    phase: Phase::Liquid,
    can_move_diagonally: true,
    gravity_factor: 1.0,
    dispersion_rate: 5,
    corrosion_resist: 1.0,
    ..PixelProperties::DEFAULT
};

const LAVA: PixelProperties = PixelProperties {
    phase: Phase::Liquid,
    can_move_diagonally: true,
    gravity_factor: 1.0,
    dispersion_rate: 1,
    can_boil_water: true,
    corrosion_resist: 1.0,
    is_burn_source: true,
    is_ember_source: true,
    ..PixelProperties::DEFAULT
};

const ACID: PixelProperties = PixelProperties {
    phase: Phase::Liquid,
    can_move_diagonally: true,
    gravity_factor: 1.0,
    dispersion_rate: 1,
    corrosion_resist: 1.0,
    is_corrosion_source: true,
    ..PixelProperties::DEFAULT
};

const STEAM: PixelProperties = PixelProperties {
    phase: Phase::Gas,
    can_move_diagonally: true,
    gravity_factor: -1.0,
    dispersion_rate: 9,
    corrosion_resist: 0.0,
    ..PixelProperties::DEFAULT
};

const TITANIUM: PixelProperties = PixelProperties {
    corrosion_resist: 1.0,
    power_type: PowerType::Conductor,
    power_max: 25,
    ..PixelProperties::DEFAULT
};

const FUSE: PixelProperties = PixelProperties {
    corrosion_resist: 0.1,
    flammability: 0.25,
    burn_out_chance: 0.1,
    ..PixelProperties::DEFAULT
};

const EMBER: PixelProperties = PixelProperties {
    phase: Phase::Gas,
    can_move_diagonally: true,
    gravity_factor: -1.0,
    always_awake: true,
    corrosion_resist: 0.1,
    flammability: 1.0,
    burn_out_chance: 0.2,
    ..PixelProperties::DEFAULT
};

const OIL: PixelProperties = PixelProperties {
    phase: Phase::Liquid,
    can_move_diagonally: true,
    gravity_factor: 1.0,
    dispersion_rate: 2,
    corrosion_resist: 0.1,
    flammability: 0.05,
    put_out_surrounded: 0.3,
    put_out: 0.02,
    burn_out_chance: 0.005,
    ..PixelProperties::DEFAULT
};

const GUNPOWDER: PixelProperties = PixelProperties {
    can_move_diagonally: true,
    gravity_factor: 1.0,
    inertial_resistance: 0.1,
    corrosion_resist: 0.1,
    flammability: 0.25,
    burn_out_chance: 0.1,
    explosion_chance: 0.001,
    ..PixelProperties::DEFAULT
};

const METHANE: PixelProperties = PixelProperties {
    phase: Phase::Gas,
    can_move_diagonally: true,
    gravity_factor: -1.0,
    dispersion_rate: 4,
    corrosion_resist: 0.0,
    flammability: 0.25,
    burn_out_chance: 0.1,
    ..PixelProperties::DEFAULT
};

const BATTERY: PixelProperties = PixelProperties {
    always_awake: true,
    corrosion_resist: 1.0,
    power_type: PowerType::Source,
    power_max: 5,
    ..PixelProperties::DEFAULT
};

const SOLDER: PixelProperties = PixelProperties {
    can_move_diagonally: true,
    gravity_factor: 1.0,
    inertial_resistance: 0.05,
    corrosion_resist: 1.0,
    power_type: PowerType::Conductor,
    power_max: 24,
    ..PixelProperties::DEFAULT
};

const DIODE_IN: PixelProperties = PixelProperties {
    corrosion_resist: 1.0,
    power_type: PowerType::Conductor,
    power_max: 25,
    ..PixelProperties::DEFAULT
};

const DIODE_OUT: PixelProperties = PixelProperties {
    corrosion_resist: 1.0,
    power_type: PowerType::Conductor,
    power_max: 25,
    ..PixelProperties::DEFAULT
};

const SPARK: PixelProperties = PixelProperties {
    always_awake: true,
    spontaneous_destroy: 0.3,
    corrosion_resist: 0.1,
    power_type: PowerType::Source,
    power_max: 100,
    ..PixelProperties::DEFAULT
};

const C4: PixelProperties = PixelProperties {
    corrosion_resist: 0.95,
    explodes_on_power: true,
    power_type: PowerType::Conductor,
    power_max: 10,
    ..PixelProperties::DEFAULT
};

const RELAY: PixelProperties = PixelProperties {
    corrosion_resist: 1.0,
    ..PixelProperties::DEFAULT
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_known_type_has_a_name() {
        for kind in PixelType::ALL {
            assert_ne!(kind.name(), "unknown");
            assert_eq!(PixelType::from_name(kind.name()), Some(kind));
        }
    }

    #[test]
    fn test_unknown_type_is_inert() {
        let unknown = PixelType(200);
        assert!(!unknown.is_known());
        assert_eq!(unknown.name(), "unknown");
        assert_eq!(*unknown.properties(), PixelProperties::DEFAULT);
    }

    #[test]
    fn test_air_is_gas_and_incorrodible() {
        let props = PixelType::NONE.properties();
        assert_eq!(props.phase, Phase::Gas);
        assert_eq!(props.corrosion_resist, 1.0);
        assert_eq!(props.flammability, 0.0);
    }

    #[test]
    fn test_phase_ranking() {
        assert!(Phase::Solid > Phase::Liquid);
        assert!(Phase::Liquid > Phase::Gas);
    }

    #[test]
    fn test_rising_types_have_negative_gravity() {
        for kind in [PixelType::STEAM, PixelType::EMBER, PixelType::METHANE] {
            let props = kind.properties();
            assert_eq!(props.phase, Phase::Gas);
            assert!(props.gravity_factor < 0.0, "{} should rise", kind.name());
        }
    }

    #[test]
    fn test_electrical_roles() {
        assert_eq!(PixelType::BATTERY.properties().power_type, PowerType::Source);
        assert_eq!(PixelType::BATTERY.properties().power_max, 5);
        assert_eq!(PixelType::SOLDER.properties().power_type, PowerType::Conductor);
        assert_eq!(PixelType::SOLDER.properties().power_max, 24);
        assert_eq!(PixelType::RELAY.properties().power_type, PowerType::None);
        assert!(PixelType::C4.properties().explodes_on_power);
    }

    #[test]
    fn test_active_power_source_requires_full_charge() {
        let mut battery = Pixel::air();
        battery.kind = PixelType::BATTERY;

        battery.power = 4;
        assert!(!is_active_power_source(&battery));

        battery.power = 5;
        assert!(is_active_power_source(&battery));

        let mut solder = battery;
        solder.kind = PixelType::SOLDER;
        solder.power = 24;
        assert!(!is_active_power_source(&solder));
    }
}
