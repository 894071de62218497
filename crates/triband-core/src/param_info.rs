//! Parameter introspection for UI and host binding.
//!
//! The equalizer core never references a UI layer; instead it exposes
//! its parameters through [`ParameterInfo`] so a widget toolkit, host
//! automation lane, or hardware controller can discover ranges and bind
//! get/set accessors without knowing the core's internals.

/// Unit type for parameter display and formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamUnit {
    /// Decibels (dB) - for gain parameters.
    Decibels,
    /// Hertz (Hz) - for frequency parameters.
    Hertz,
    /// No unit - for dimensionless parameters like Q.
    None,
}

impl ParamUnit {
    /// Returns the unit suffix string for display.
    pub const fn suffix(&self) -> &'static str {
        match self {
            ParamUnit::Decibels => " dB",
            ParamUnit::Hertz => " Hz",
            ParamUnit::None => "",
        }
    }
}

/// Describes a single parameter's metadata for display and validation.
///
/// The range and step are part of the UI-binding contract: a control
/// widget bound to a parameter uses `min`/`max` for its travel and
/// `step` for its granularity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Full parameter name for display (e.g., "Bass").
    pub name: &'static str,
    /// Short name for hardware displays, max 8 characters.
    pub short_name: &'static str,
    /// Unit type for formatting the parameter value.
    pub unit: ParamUnit,
    /// Minimum allowed value.
    pub min: f32,
    /// Maximum allowed value.
    pub max: f32,
    /// Default value on initialization or reset.
    pub default: f32,
    /// Recommended increment for encoder-based control.
    pub step: f32,
}

impl ParamDescriptor {
    /// Gain parameter in decibels.
    pub const fn gain_db(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
        step: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::Decibels,
            min,
            max,
            default,
            step,
        }
    }

    /// Clamps a value to this parameter's valid range.
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }

    /// Converts a plain value to normalized \[0.0, 1.0\] range.
    #[inline]
    pub fn normalize(&self, value: f32) -> f32 {
        let range = self.max - self.min;
        if range == 0.0 {
            return 0.0;
        }
        (value - self.min) / range
    }

    /// Converts a normalized \[0.0, 1.0\] value to the plain range.
    #[inline]
    pub fn denormalize(&self, normalized: f32) -> f32 {
        self.min + normalized * (self.max - self.min)
    }
}

/// Trait for processors that expose introspectable parameters.
///
/// Parameters are accessed by zero-based index, stable for the lifetime
/// of the instance. Out-of-bounds reads return `0.0`; out-of-bounds
/// writes are ignored.
pub trait ParameterInfo {
    /// Number of parameters exposed. Valid indices are `0..param_count()`.
    fn param_count(&self) -> usize;

    /// Descriptor for the parameter at `index`, or `None` when out of
    /// range.
    fn param_info(&self, index: usize) -> Option<ParamDescriptor>;

    /// Current target value of the parameter at `index`.
    fn get_param(&self, index: usize) -> f32;

    /// Set the parameter at `index`, clamping to the descriptor range.
    fn set_param(&mut self, index: usize, value: f32);

    /// Find a parameter index by name (case-insensitive), matching both
    /// the full and short names.
    fn find_param_by_name(&self, name: &str) -> Option<usize> {
        (0..self.param_count()).find(|&i| {
            self.param_info(i).is_some_and(|desc| {
                desc.name.eq_ignore_ascii_case(name) || desc.short_name.eq_ignore_ascii_case(name)
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TwoKnobs {
        gain: f32,
        q: f32,
    }

    impl ParameterInfo for TwoKnobs {
        fn param_count(&self) -> usize {
            2
        }

        fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
            match index {
                0 => Some(ParamDescriptor::gain_db("Gain", "Gain", -12.0, 12.0, 0.0, 0.01)),
                1 => Some(ParamDescriptor {
                    name: "Quality",
                    short_name: "Q",
                    unit: ParamUnit::None,
                    min: 0.1,
                    max: 10.0,
                    default: 0.707,
                    step: 0.01,
                }),
                _ => None,
            }
        }

        fn get_param(&self, index: usize) -> f32 {
            match index {
                0 => self.gain,
                1 => self.q,
                _ => 0.0,
            }
        }

        fn set_param(&mut self, index: usize, value: f32) {
            let Some(desc) = self.param_info(index) else {
                return;
            };
            match index {
                0 => self.gain = desc.clamp(value),
                1 => self.q = desc.clamp(value),
                _ => {}
            }
        }
    }

    #[test]
    fn clamping_and_lookup() {
        let mut knobs = TwoKnobs { gain: 0.0, q: 0.707 };

        knobs.set_param(0, 99.0);
        assert_eq!(knobs.get_param(0), 12.0);

        knobs.set_param(99, 1.0); // ignored
        assert_eq!(knobs.get_param(99), 0.0);

        assert_eq!(knobs.find_param_by_name("gain"), Some(0));
        assert_eq!(knobs.find_param_by_name("q"), Some(1));
        assert_eq!(knobs.find_param_by_name("resonance"), None);
    }

    #[test]
    fn normalize_round_trip() {
        let desc = ParamDescriptor::gain_db("Gain", "Gain", -12.0, 12.0, 0.0, 0.01);
        assert_eq!(desc.normalize(0.0), 0.5);
        assert_eq!(desc.denormalize(0.5), 0.0);
        assert_eq!(desc.denormalize(desc.normalize(-7.5)), -7.5);
    }

    #[test]
    fn unit_suffixes() {
        assert_eq!(ParamUnit::Decibels.suffix(), " dB");
        assert_eq!(ParamUnit::Hertz.suffix(), " Hz");
        assert_eq!(ParamUnit::None.suffix(), "");
    }
}
