// Gas species ejected from the vent, and the policy used to pick one per particle

use crate::color::Color;
use rand::Rng;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GasKind {
    SO2,
    CO2,
    H2S,
    H2O,
}

impl GasKind {
    pub const ALL: [GasKind; 4] = [GasKind::SO2, GasKind::CO2, GasKind::H2S, GasKind::H2O];

    pub fn color(self) -> Color {
        match self {
            GasKind::SO2 => Color::LT_GRAY,
            GasKind::CO2 => Color::GRAY,
            GasKind::H2S => Color::DK_GRAY,
            GasKind::H2O => Color::WHITE,
        }
    }

    /// Ejection speed relative to SO2, from the ratio of molecular weights.
    pub fn vel_scalar(self) -> f64 {
        match self {
            GasKind::SO2 => 1.0,
            GasKind::CO2 => 1.45,
            GasKind::H2S => 1.9,
            GasKind::H2O => 3.6,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GasKind::SO2 => "SO2",
            GasKind::CO2 => "CO2",
            GasKind::H2S => "H2S",
            GasKind::H2O => "H2O",
        }
    }
}

/// How a newly spawned particle chooses its gas.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GasPolicy {
    Fixed(GasKind),
    Uniform,
}

impl Default for GasPolicy {
    fn default() -> Self {
        GasPolicy::Fixed(GasKind::H2O)
    }
}

impl GasPolicy {
    pub fn pick<R: Rng + ?Sized>(self, rng: &mut R) -> GasKind {
        match self {
            GasPolicy::Fixed(gas) => gas,
            GasPolicy::Uniform => GasKind::ALL[rng.gen_range(0, GasKind::ALL.len())],
        }
    }
}
