//! Sampling capabilities: how a key reads its raw pressed/released level.
//!
//! See [`Sample`] for details.

use core::convert::Infallible;

use embedded_hal::digital::InputPin;

// ============================================================================
// Sample - Read the raw key level
// ============================================================================

/// Reads whether a key is currently pressed.
///
/// Called once per scan tick from the scanning context (often an interrupt), so
/// implementations must return promptly and must not block. The raw level may bounce;
/// debouncing is the state machine's job.
///
/// Implemented for any `FnMut() -> bool` and by [`PinSample`]. Plain `fn() -> bool`
/// readers and `&mut dyn FnMut() -> bool` both qualify, which lets keys read in different
/// ways share one registry.
pub trait Sample {
    /// Returns `true` while the key is pressed.
    fn is_pressed(&mut self) -> bool;
}

impl<F> Sample for F
where
    F: FnMut() -> bool,
{
    #[inline]
    fn is_pressed(&mut self) -> bool {
        self()
    }
}

// ============================================================================
// PressedTo - How the key is wired
// ============================================================================

/// Describes how the key is physically wired.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PressedTo {
    /// Key connects the pin to voltage (3.3V) when pressed.
    /// Pin reads HIGH when pressed; needs a pull-down.
    ///
    /// Note: The original Pico 2 (RP2350) has a known silicon bug with pull-down resistors
    /// that can cause pins to stay HIGH after release. Use `Ground` instead.
    Voltage,

    /// Key connects the pin to ground (GND) when pressed.
    /// Pin reads LOW when pressed; needs a pull-up.
    Ground,
}

// ============================================================================
// PinSample - Sample an embedded-hal input pin
// ============================================================================

/// Samples any [`embedded_hal`] input pin whose reads cannot fail.
///
/// Pull resistors are configured by whoever creates the pin; [`PressedTo`] only says
/// which level means "pressed".
///
/// # Example
///
/// ```rust,ignore
/// use embassy_rp::gpio::{Input, Pull};
/// use key_envoy::key::{KeyDevice, KeyTiming, PinSample, PressedTo};
///
/// let input = Input::new(p.PIN_13, Pull::Up);
/// let key = KeyDevice::new(0, KeyTiming::DEFAULT, PinSample::new(input, PressedTo::Ground));
/// ```
#[derive(Debug)]
pub struct PinSample<P> {
    pin: P,
    pressed_to: PressedTo,
}

impl<P> PinSample<P>
where
    P: InputPin<Error = Infallible>,
{
    /// Wraps `pin`, reading it according to `pressed_to`.
    #[must_use]
    pub const fn new(pin: P, pressed_to: PressedTo) -> Self {
        Self { pin, pressed_to }
    }

    /// How the key is wired.
    #[must_use]
    pub const fn pressed_to(&self) -> PressedTo {
        self.pressed_to
    }

    /// Gives the pin back.
    #[must_use]
    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P> Sample for PinSample<P>
where
    P: InputPin<Error = Infallible>,
{
    fn is_pressed(&mut self) -> bool {
        let level = match self.pressed_to {
            PressedTo::Voltage => self.pin.is_high(),
            PressedTo::Ground => self.pin.is_low(),
        };
        match level {
            Ok(pressed) => pressed,
            Err(never) => match never {},
        }
    }
}
