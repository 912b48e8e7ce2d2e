//! Logging shims.
//!
//! With the `defmt` feature the macros forward to `defmt`. With `std` alone,
//! warnings are written to stderr. Otherwise they expand to nothing but still
//! borrow their arguments so callers don't trip unused-variable lints.

#![allow(unused_macros)]

macro_rules! debug {
    ($s:literal $(, $x:expr)* $(,)?) => {
        {
            #[cfg(feature = "defmt")]
            ::defmt::debug!($s $(, $x)*);
            #[cfg(not(feature = "defmt"))]
            let _ = ($( & $x ),*);
        }
    };
}

macro_rules! warn {
    ($s:literal $(, $x:expr)* $(,)?) => {
        {
            #[cfg(feature = "defmt")]
            ::defmt::warn!($s $(, $x)*);
            #[cfg(all(feature = "std", not(feature = "defmt")))]
            ::std::eprintln!($s $(, $x)*);
            #[cfg(not(any(feature = "std", feature = "defmt")))]
            let _ = ($( & $x ),*);
        }
    };
}
