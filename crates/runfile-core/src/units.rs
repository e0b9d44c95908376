// Dweve Runfile - Scenario Description Language Engine
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Physical quantities.
//!
//! Scenario text never carries unit labels. A quantity is read as a plain
//! number and the unit comes from the accessor the caller uses:
//!
//! ```
//! use runfile_core::units::{Length, LengthUnit, Quantity};
//!
//! let altitude = Length::from_unit(35_000.0, LengthUnit::Feet);
//! assert!((altitude.in_unit(LengthUnit::Meters) - 10_668.0).abs() < 1e-9);
//! ```
//!
//! Values are stored in SI units.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// A physical quantity with a family of units.
pub trait Quantity: Sized + Copy {
    /// Units this quantity can be expressed in.
    type Unit: Copy + fmt::Debug;

    /// Build from a value expressed in `unit`.
    fn from_unit(value: f64, unit: Self::Unit) -> Self;

    /// The value expressed in `unit`.
    fn in_unit(&self, unit: Self::Unit) -> f64;
}

macro_rules! quantity {
    (
        $(#[$meta:meta])*
        $name:ident, $unit:ident {
            $($variant:ident => $factor:expr),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name {
            si: f64,
        }

        #[doc = concat!("Units a [`", stringify!($name), "`] can be expressed in.")]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $unit {
            $($variant),+
        }

        impl $unit {
            /// Size of one of this unit in SI.
            pub fn factor(self) -> f64 {
                match self {
                    $($unit::$variant => $factor),+
                }
            }
        }

        impl $name {
            /// Build from a value already in SI.
            pub const fn from_si(si: f64) -> Self {
                Self { si }
            }

            pub fn si(self) -> f64 {
                self.si
            }
        }

        impl Quantity for $name {
            type Unit = $unit;

            fn from_unit(value: f64, unit: $unit) -> Self {
                Self { si: value * unit.factor() }
            }

            fn in_unit(&self, unit: $unit) -> f64 {
                self.si / unit.factor()
            }
        }

        impl Add for $name {
            type Output = Self;
            fn add(self, rhs: Self) -> Self {
                Self { si: self.si + rhs.si }
            }
        }

        impl Sub for $name {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self {
                Self { si: self.si - rhs.si }
            }
        }

        impl Neg for $name {
            type Output = Self;
            fn neg(self) -> Self {
                Self { si: -self.si }
            }
        }

        impl Mul<f64> for $name {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self {
                Self { si: self.si * rhs }
            }
        }
    };
}

const FOOT: f64 = 0.3048;
const NAUTICAL_MILE: f64 = 1852.0;
const POUND: f64 = 0.453_592_37;
const HOUR: f64 = 3600.0;

quantity! {
    /// Distance, stored in meters.
    Length, LengthUnit {
        Meters => 1.0,
        Kilometers => 1000.0,
        Feet => FOOT,
        NauticalMiles => NAUTICAL_MILE,
    }
}

quantity! {
    /// Speed, stored in meters per second.
    Speed, SpeedUnit {
        MetersPerSecond => 1.0,
        Knots => NAUTICAL_MILE / HOUR,
        FeetPerSecond => FOOT,
        FeetPerMinute => FOOT / 60.0,
        KilometersPerHour => 1000.0 / HOUR,
    }
}

quantity! {
    /// Duration, stored in seconds.
    Time, TimeUnit {
        Seconds => 1.0,
        Minutes => 60.0,
        Hours => HOUR,
    }
}

quantity! {
    /// Plane angle, stored in radians.
    Angle, AngleUnit {
        Radians => 1.0,
        Degrees => std::f64::consts::PI / 180.0,
    }
}

quantity! {
    /// Mass, stored in kilograms.
    Mass, MassUnit {
        Kilograms => 1.0,
        Pounds => POUND,
    }
}

quantity! {
    /// Area, stored in square meters.
    Area, AreaUnit {
        SquareMeters => 1.0,
        SquareFeet => FOOT * FOOT,
    }
}

quantity! {
    /// Mass flow, stored in kilograms per second.
    MassFlowRate, MassFlowRateUnit {
        KilogramsPerSecond => 1.0,
        KilogramsPerHour => 1.0 / HOUR,
        PoundsPerHour => POUND / HOUR,
    }
}

quantity! {
    /// Rate, stored in hertz.
    Frequency, FrequencyUnit {
        Hertz => 1.0,
        PerMinute => 1.0 / 60.0,
    }
}

quantity! {
    /// Pace (time per distance), stored in seconds per meter.
    InvertedSpeed, InvertedSpeedUnit {
        SecondsPerMeter => 1.0,
        SecondsPerFoot => 1.0 / FOOT,
        SecondsPerNauticalMile => 1.0 / NAUTICAL_MILE,
    }
}

quantity! {
    /// Dimensionless length ratio, stored in meters per meter.
    LengthGain, LengthGainUnit {
        MetersPerMeter => 1.0,
        FeetPerNauticalMile => FOOT / NAUTICAL_MILE,
    }
}
