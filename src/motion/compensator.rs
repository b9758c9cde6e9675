//! Bus-voltage and back-EMF amplitude compensation.
//!
//! The drive amplitude answers "what duty fraction puts the target current
//! through the winding at this supply voltage". The static term covers the
//! resistive drop; the speed-proportional term covers the back-EMF the
//! spinning rotor adds on top of it. Both are computed once per move from a
//! single bus-voltage sample.

use crate::config::units::Amplitude;
use crate::config::DriveParameters;

/// Amplitude law for one move at a sampled bus voltage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BusCompensation {
    amplitude: Amplitude,
    gain: u32,
}

impl BusCompensation {
    /// Derive the amplitude law from a bus-voltage sample in millivolts.
    ///
    /// A reading of zero means the supply measurement is absent or broken
    /// and the only safe duty is zero. A reading at or below the winding
    /// drop cannot reach the target current at any duty, so the drive goes
    /// to full scale. Otherwise the static term is the voltage ratio and
    /// the gain divides the back-EMF numerator by the bus voltage.
    pub fn from_bus_voltage(vbus_mv: u16, params: &DriveParameters) -> Self {
        if vbus_mv == 0 {
            return Self {
                amplitude: Amplitude::ZERO,
                gain: 0,
            };
        }
        let vbus = vbus_mv as f32;
        if vbus <= params.winding_voltage_mv() {
            return Self {
                amplitude: Amplitude::FULL,
                gain: Amplitude::MAX_RAW as u32,
            };
        }
        Self {
            amplitude: Amplitude::from_fraction(params.winding_voltage_mv() / vbus),
            gain: (params.speed_compensation() / vbus) as u32,
        }
    }

    /// Static amplitude (standstill and idle hold).
    #[inline]
    pub const fn amplitude(&self) -> Amplitude {
        self.amplitude
    }

    /// Back-EMF gain applied per speed unit, in Q16.16.
    #[inline]
    pub const fn gain(&self) -> u32 {
        self.gain
    }

    /// Amplitude at a given DDA speed.
    ///
    /// Widens to u64 for the gain product so a high gain at low bus voltage
    /// cannot wrap; the sum clamps at full scale.
    pub fn dynamic_amplitude(&self, speed: u16) -> Amplitude {
        let boost = (self.gain as u64 * speed as u64) >> 16;
        let total = self.amplitude.raw() as u64 + boost;
        if total >= Amplitude::MAX_RAW as u64 {
            Amplitude::FULL
        } else {
            Amplitude::from_raw(total as u16)
        }
    }
}
