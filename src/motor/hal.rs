//! Hardware abstraction for the drive output, control tick and bus sense.
//!
//! The driver is generic over three seams: where the four duty fractions
//! go, what paces the control loop, and where the bus-voltage sample comes
//! from. Firmware binds these to timer compare registers, a periodic
//! interrupt and an ADC channel; tests bind them to mocks.

use core::sync::atomic::{AtomicBool, Ordering};

use crate::config::units::DriveVector;
use crate::error::DriveError;

/// Sink for the four-channel drive vector.
///
/// Implementations must commit all four channels as one group so a step
/// transition never exposes a half-updated coil pattern (buffered compare
/// registers on timer hardware give this for free).
pub trait WaveOutput {
    /// Output error type.
    type Error;

    /// Write all four duty fractions (Q1.15, 32768 = 100%).
    fn apply(&mut self, drive: DriveVector) -> Result<(), Self::Error>;
}

/// Paces the control loop at the configured tick interval.
pub trait TickSource {
    /// Block until the next control tick has elapsed.
    ///
    /// If several ticks elapsed since the last call they collapse into one;
    /// the rate generator tolerates lost ticks but never queued ones.
    fn wait_for_tick(&mut self);
}

/// Source of bus-voltage samples.
pub trait BusVoltageSense {
    /// Read the motor supply voltage in millivolts.
    fn read_bus_voltage_mv(&mut self) -> u16;
}

/// Interrupt-to-loop tick flag.
///
/// The periodic timer ISR calls [`notify`](TickFlag::notify); the control
/// loop side consumes ticks through a [`TickWaiter`]. A set flag absorbs
/// any further notifications until consumed, so missed ticks collapse.
#[derive(Debug, Default)]
pub struct TickFlag {
    pending: AtomicBool,
}

impl TickFlag {
    /// Create a flag with no tick pending.
    pub const fn new() -> Self {
        Self {
            pending: AtomicBool::new(false),
        }
    }

    /// Mark a tick as elapsed (ISR side).
    #[inline]
    pub fn notify(&self) {
        self.pending.store(true, Ordering::Release);
    }

    /// Borrow the consuming side of the flag.
    pub fn waiter(&self) -> TickWaiter<'_> {
        TickWaiter { flag: self }
    }
}

/// Consuming side of a [`TickFlag`].
#[derive(Debug)]
pub struct TickWaiter<'a> {
    flag: &'a TickFlag,
}

impl TickSource for TickWaiter<'_> {
    fn wait_for_tick(&mut self) {
        while !self.flag.pending.swap(false, Ordering::Acquire) {
            core::hint::spin_loop();
        }
    }
}

/// [`WaveOutput`] over four `embedded-hal` PWM channels.
///
/// Maps each Q1.15 magnitude to the channel's duty range through
/// `set_duty_cycle_fraction`. Channel errors collapse to
/// [`DriveError::OutputFault`]; per-channel atomicity is as good as the
/// underlying HAL provides.
#[derive(Debug)]
pub struct PwmQuad<A, B, C, D> {
    a: A,
    b: B,
    c: C,
    d: D,
}

impl<A, B, C, D> PwmQuad<A, B, C, D>
where
    A: embedded_hal::pwm::SetDutyCycle,
    B: embedded_hal::pwm::SetDutyCycle,
    C: embedded_hal::pwm::SetDutyCycle,
    D: embedded_hal::pwm::SetDutyCycle,
{
    /// Wrap four PWM channels in coil order A, B, C, D.
    pub fn new(a: A, b: B, c: C, d: D) -> Self {
        Self { a, b, c, d }
    }

    /// Release the wrapped channels.
    pub fn free(self) -> (A, B, C, D) {
        (self.a, self.b, self.c, self.d)
    }
}

impl<A, B, C, D> WaveOutput for PwmQuad<A, B, C, D>
where
    A: embedded_hal::pwm::SetDutyCycle,
    B: embedded_hal::pwm::SetDutyCycle,
    C: embedded_hal::pwm::SetDutyCycle,
    D: embedded_hal::pwm::SetDutyCycle,
{
    type Error = DriveError;

    fn apply(&mut self, drive: DriveVector) -> Result<(), Self::Error> {
        self.a
            .set_duty_cycle_fraction(drive.a, 32768)
            .map_err(|_| DriveError::OutputFault)?;
        self.b
            .set_duty_cycle_fraction(drive.b, 32768)
            .map_err(|_| DriveError::OutputFault)?;
        self.c
            .set_duty_cycle_fraction(drive.c, 32768)
            .map_err(|_| DriveError::OutputFault)?;
        self.d
            .set_duty_cycle_fraction(drive.d, 32768)
            .map_err(|_| DriveError::OutputFault)?;
        Ok(())
    }
}
