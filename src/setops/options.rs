//! Options controlling the set operations.

use crate::value::{deep_equal, Value};
use bitflags::bitflags;

bitflags! {
    /// Options is a set of flags passed to the set operations.
    ///
    /// The union and topological-intersection families choose what survives
    /// at a conflicting leaf; see [`Resolution`] for how several set flags
    /// are ranked. The must-subtract flags turn unremovable subtrahend
    /// content into an error.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Options: u32 {
        /// Union keeps the first operand's value on conflict.
        const UNION_RESOLVE_FIRST = 1 << 0;
        /// Union keeps the second operand's value on conflict.
        const UNION_RESOLVE_SECOND = 1 << 1;
        /// Union pairs conflicting values as `[first, second]`.
        const UNION_PAIR_ALWAYS = 1 << 2;
        /// Union pairs conflicting values only when they differ.
        const UNION_PAIR_IF_UNEQUAL = 1 << 3;

        const TOPO_INTERSECTION_RESOLVE_FIRST = 1 << 4;
        const TOPO_INTERSECTION_RESOLVE_SECOND = 1 << 5;
        const TOPO_INTERSECTION_PAIR_ALWAYS = 1 << 6;
        const TOPO_INTERSECTION_PAIR_IF_UNEQUAL = 1 << 7;

        /// Difference fails when the subtrahend holds something the
        /// minuend does not.
        const DIFFERENCE_MUST_SUBTRACT = 1 << 8;
        /// Topological difference fails when the subtrahend holds
        /// something the minuend does not.
        const TOPO_DIFFERENCE_MUST_SUBTRACT = 1 << 9;

        const MUST_SUBTRACT = Self::DIFFERENCE_MUST_SUBTRACT.bits() | Self::TOPO_DIFFERENCE_MUST_SUBTRACT.bits();
        const RESOLVE_FIRST = Self::UNION_RESOLVE_FIRST.bits() | Self::TOPO_INTERSECTION_RESOLVE_FIRST.bits();
        const RESOLVE_SECOND = Self::UNION_RESOLVE_SECOND.bits() | Self::TOPO_INTERSECTION_RESOLVE_SECOND.bits();
        const PAIR_ALWAYS = Self::UNION_PAIR_ALWAYS.bits() | Self::TOPO_INTERSECTION_PAIR_ALWAYS.bits();
        const PAIR_IF_UNEQUAL = Self::UNION_PAIR_IF_UNEQUAL.bits() | Self::TOPO_INTERSECTION_PAIR_IF_UNEQUAL.bits();
    }
}

impl Default for Options {
    fn default() -> Self {
        Options::empty()
    }
}

impl Options {
    /// Returns the conflict policy used by union.
    pub fn union_resolution(self) -> Resolution {
        Resolution::select(
            self,
            [
                Options::UNION_RESOLVE_FIRST,
                Options::UNION_RESOLVE_SECOND,
                Options::UNION_PAIR_ALWAYS,
                Options::UNION_PAIR_IF_UNEQUAL,
            ],
        )
    }

    /// Returns the conflict policy used by topological intersection.
    pub fn topo_intersection_resolution(self) -> Resolution {
        Resolution::select(
            self,
            [
                Options::TOPO_INTERSECTION_RESOLVE_FIRST,
                Options::TOPO_INTERSECTION_RESOLVE_SECOND,
                Options::TOPO_INTERSECTION_PAIR_ALWAYS,
                Options::TOPO_INTERSECTION_PAIR_IF_UNEQUAL,
            ],
        )
    }

    pub fn difference_must_subtract(self) -> bool {
        self.contains(Options::DIFFERENCE_MUST_SUBTRACT)
    }

    pub fn topo_difference_must_subtract(self) -> bool {
        self.contains(Options::TOPO_DIFFERENCE_MUST_SUBTRACT)
    }
}

/// Resolution decides what survives where two leaves conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Resolution {
    KeepFirst,
    KeepSecond,
    /// Produce `[first, second]`.
    #[default]
    PairAlways,
    /// Produce `[first, second]` unless the values are deeply equal, in
    /// which case the shared value survives.
    PairIfUnequal,
}

impl Resolution {
    // The first flag set wins, in the order KeepFirst, KeepSecond,
    // PairAlways, PairIfUnequal.
    fn select(options: Options, family: [Options; 4]) -> Resolution {
        let [first, second, always, if_unequal] = family;
        if options.contains(first) {
            Resolution::KeepFirst
        } else if options.contains(second) {
            Resolution::KeepSecond
        } else if options.contains(always) {
            Resolution::PairAlways
        } else if options.contains(if_unequal) {
            Resolution::PairIfUnequal
        } else {
            Resolution::default()
        }
    }

    /// Resolves the conflict between `a` and `b`.
    pub fn resolve(self, a: &Value, b: &Value) -> Value {
        match self {
            Resolution::KeepFirst => a.clone(),
            Resolution::KeepSecond => b.clone(),
            Resolution::PairIfUnequal if deep_equal(a, b) => a.clone(),
            Resolution::PairAlways | Resolution::PairIfUnequal => {
                Value::Array(vec![a.clone(), b.clone()])
            }
        }
    }
}
