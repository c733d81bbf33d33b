// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! The sexagenary cycle (干支) and the zodiac.
//!
//! Ten heavenly stems and twelve earthly branches advance together, so a
//! pair recurs every 60 steps.  Years are counted from an epoch year whose
//! label is 甲子; days are counted continuously from the Julian Day Number.
//!
//! ```
//! use lunisolar::sexagenary::{year_label, ZodiacAnimal};
//!
//! let (label, animal) = year_label(2024, 4);
//! assert_eq!(label.to_string(), "甲辰");
//! assert_eq!(animal, ZodiacAnimal::Dragon);
//! ```

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::date::GregorianDate;

/// `(jdn + DAY_CYCLE_OFFSET) mod 60` is the 0-based day index (0 = 甲子).
const DAY_CYCLE_OFFSET: i64 = 49;

macro_rules! named_cycle {
    (
        $(#[$meta:meta])*
        $name:ident, $len:literal {
            $($variant:ident => $chinese:literal, $english:literal;)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
        pub enum $name {
            $($variant,)+
        }

        impl $name {
            /// Every value, in cycle order.
            pub const ALL: [$name; $len] = [$($name::$variant,)+];

            /// 0-based position in the cycle.
            pub fn index(self) -> usize {
                self as usize
            }

            /// Value at `index`, taken modulo the cycle length.
            pub fn from_index(index: usize) -> Self {
                Self::ALL[index % $len]
            }

            pub fn chinese(self) -> &'static str {
                match self {
                    $($name::$variant => $chinese,)+
                }
            }

            pub fn english(self) -> &'static str {
                match self {
                    $($name::$variant => $english,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.chinese())
            }
        }
    };
}

named_cycle! {
    /// Heavenly stem (天干).
    HeavenlyStem, 10 {
        Jia => "甲", "Jia";
        Yi => "乙", "Yi";
        Bing => "丙", "Bing";
        Ding => "丁", "Ding";
        Wu => "戊", "Wu";
        Ji => "己", "Ji";
        Geng => "庚", "Geng";
        Xin => "辛", "Xin";
        Ren => "壬", "Ren";
        Gui => "癸", "Gui";
    }
}

named_cycle! {
    /// Earthly branch (地支).
    EarthlyBranch, 12 {
        Zi => "子", "Zi";
        Chou => "丑", "Chou";
        Yin => "寅", "Yin";
        Mao => "卯", "Mao";
        Chen => "辰", "Chen";
        Si => "巳", "Si";
        Wu => "午", "Wu";
        Wei => "未", "Wei";
        Shen => "申", "Shen";
        You => "酉", "You";
        Xu => "戌", "Xu";
        Hai => "亥", "Hai";
    }
}

named_cycle! {
    /// Zodiac animal (生肖), one per earthly branch.
    ZodiacAnimal, 12 {
        Rat => "鼠", "Rat";
        Ox => "牛", "Ox";
        Tiger => "虎", "Tiger";
        Rabbit => "兔", "Rabbit";
        Dragon => "龙", "Dragon";
        Snake => "蛇", "Snake";
        Horse => "马", "Horse";
        Goat => "羊", "Goat";
        Monkey => "猴", "Monkey";
        Rooster => "鸡", "Rooster";
        Dog => "狗", "Dog";
        Pig => "猪", "Pig";
    }
}

impl EarthlyBranch {
    /// The animal this branch stands for.
    pub fn animal(self) -> ZodiacAnimal {
        ZodiacAnimal::from_index(self.index())
    }
}

impl ZodiacAnimal {
    pub fn branch(self) -> EarthlyBranch {
        EarthlyBranch::from_index(self.index())
    }
}

/// A stem-branch pair of the sexagenary cycle.
///
/// Only the 60 pairs whose stem and branch share parity exist, so the label
/// is stored as its position in the cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SexagenaryLabel(u8);

impl SexagenaryLabel {
    /// Label at 0-based `offset` from 甲子, taken modulo 60.
    pub fn from_offset(offset: i64) -> Self {
        Self(offset.rem_euclid(60) as u8)
    }

    /// Label with the given 1-based cycle number, `1` being 甲子.
    pub fn from_number(number: u32) -> Option<Self> {
        (1..=60)
            .contains(&number)
            .then(|| Self((number - 1) as u8))
    }

    /// The label of a stem and a branch, `None` when their parities differ.
    pub fn from_parts(stem: HeavenlyStem, branch: EarthlyBranch) -> Option<Self> {
        (0..60u8)
            .map(Self)
            .find(|label| label.stem() == stem && label.branch() == branch)
    }

    /// 1-based position in the cycle, `1..=60`.
    pub fn number(self) -> u32 {
        u32::from(self.0) + 1
    }

    pub fn stem(self) -> HeavenlyStem {
        HeavenlyStem::from_index(usize::from(self.0))
    }

    pub fn branch(self) -> EarthlyBranch {
        EarthlyBranch::from_index(usize::from(self.0))
    }

    /// The label `steps` later in the cycle.
    pub fn advance(self, steps: i64) -> Self {
        Self::from_offset(i64::from(self.0) + steps)
    }
}

impl fmt::Display for SexagenaryLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.stem(), self.branch())
    }
}

/// Stem-branch label and zodiac animal of lunisolar `year`, counted from
/// `epoch`, a year labelled 甲子.
pub fn year_label(year: i32, epoch: i32) -> (SexagenaryLabel, ZodiacAnimal) {
    let label = SexagenaryLabel::from_offset(i64::from(year) - i64::from(epoch));
    (label, label.branch().animal())
}

/// Stem-branch label of a civil day.
pub fn day_label(date: GregorianDate) -> SexagenaryLabel {
    SexagenaryLabel::from_offset(date.jdn() + DAY_CYCLE_OFFSET)
}
