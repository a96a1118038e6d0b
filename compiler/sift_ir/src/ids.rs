//! Opaque host handles carried through compiled cases.
//!
//! The engine never looks inside these. A `GuardId` is handed back to the
//! host's guard evaluator; a `BodyId` is reported in the match outcome so the
//! host knows which body to run.

use std::fmt;

macro_rules! define_handle {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Sentinel for "no handle".
            pub const INVALID: $name = $name(u32::MAX);

            /// Create a handle from a host index.
            #[inline]
            pub const fn new(index: u32) -> Self {
                $name(index)
            }

            /// Index as usize, for hosts that keep handles in a `Vec`.
            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }

            /// Get the raw u32 value.
            #[inline]
            pub const fn raw(self) -> u32 {
                self.0
            }

            /// Check if this is a valid handle.
            #[inline]
            pub const fn is_valid(self) -> bool {
                self.0 != u32::MAX
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.is_valid() {
                    write!(f, "{}({})", stringify!($name), self.0)
                } else {
                    write!(f, "{}(INVALID)", stringify!($name))
                }
            }
        }
    };
}

define_handle!(
    /// Handle for a guard condition owned by the host.
    GuardId
);

define_handle!(
    /// Handle for a case body owned by the host.
    BodyId
);
