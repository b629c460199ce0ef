//! Runtime option protocol shared by all geometries.
//!
//! Options travel as `(tag, value)` pairs where the tag is a single
//! character, matching the `M665`-style parameter words the planner
//! forwards. Recognized tags are enumerated in [`ArmOption`] so a geometry
//! matches on a closed set instead of raw characters.

/// Options recognized by at least one geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ArmOption {
    /// `R`: bypass the geometry and drive actuators in raw units.
    RawMode,
}

impl ArmOption {
    pub const ALL: [ArmOption; 1] = [ArmOption::RawMode];

    /// Values strictly above this enable a boolean option.
    pub const BOOL_THRESHOLD: f64 = 0.5;

    pub const fn tag(self) -> char {
        match self {
            ArmOption::RawMode => 'R',
        }
    }

    pub fn from_tag(tag: char) -> Option<Self> {
        Self::ALL.into_iter().find(|option| option.tag() == tag)
    }

    pub fn as_bool(value: f64) -> bool {
        value > Self::BOOL_THRESHOLD
    }

    pub fn from_bool(enabled: bool) -> f64 {
        if enabled { 1.0 } else { 0.0 }
    }

    const fn index(self) -> usize {
        match self {
            ArmOption::RawMode => 0,
        }
    }
}

/// Fixed-capacity set of option values, one slot per [`ArmOption`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ArmOptions {
    values: [Option<f64>; ArmOption::ALL.len()],
}

impl ArmOptions {
    pub const fn new() -> Self {
        Self {
            values: [None; ArmOption::ALL.len()],
        }
    }

    pub fn insert(&mut self, option: ArmOption, value: f64) {
        self.values[option.index()] = Some(value);
    }

    pub fn with(mut self, option: ArmOption, value: f64) -> Self {
        self.insert(option, value);
        self
    }

    pub fn get(&self, option: ArmOption) -> Option<f64> {
        self.values[option.index()]
    }

    /// Look up a value by its wire tag; unknown tags are simply absent.
    pub fn get_tag(&self, tag: char) -> Option<f64> {
        ArmOption::from_tag(tag).and_then(|option| self.get(option))
    }

    pub fn len(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate `(tag, value)` pairs in tag order.
    pub fn iter(&self) -> impl Iterator<Item = (char, f64)> + '_ {
        ArmOption::ALL
            .into_iter()
            .filter_map(|option| self.get(option).map(|value| (option.tag(), value)))
    }
}
