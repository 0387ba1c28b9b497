//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.  The inner integer is `pub` to allow
//! direct indexing into dense `Vec`s via `id.0 as usize`.
//!
//! Unlike typical index types, the sentinel here is `0`, not `MAX`: the host
//! registries reserve slot 0 as "no building / no citizen", and the schedule
//! records rely on zero-valued defaults meaning "unset".

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no entity" — id 0 is reserved by the host.
            pub const NONE: $name = $name(0);

            /// `true` if this is the "no entity" sentinel.
            #[inline(always)]
            pub fn is_none(self) -> bool {
                self.0 == 0
            }

            /// `true` if this refers to an actual entity.
            #[inline(always)]
            pub fn is_some(self) -> bool {
                self.0 != 0
            }

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }
    };
}

typed_id! {
    /// Index of a citizen in the host's citizen registry.
    pub struct CitizenId(u32);
}

typed_id! {
    /// Index of a building in the host's building registry.
    /// `u16` matches the host's building-id width.
    pub struct BuildingId(u16);
}
