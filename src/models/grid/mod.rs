// Grid module
// Fixed 24h day grid: 96 slots of 15 minutes split into four 6-hour sections

use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use super::task::TaskError;

/// Minutes covered by one slot
pub const SLOT_MINUTES: u32 = 15;
/// Slots in one day (24h * 4)
pub const DAY_SLOTS: u32 = 96;
/// Slots in one section (6 hours)
pub const SECTION_SLOTS: u32 = 24;
/// Duration given to tasks that have never been resized (1 hour)
pub const DEFAULT_DURATION_SLOTS: u32 = 4;

/// One of the four fixed, contiguous partitions of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Section {
    Night,
    Morning,
    Midday,
    Evening,
}

impl Section {
    /// All sections in day order
    pub const ALL: [Section; 4] = [
        Section::Night,
        Section::Morning,
        Section::Midday,
        Section::Evening,
    ];

    /// First slot of the section (inclusive)
    pub fn start(self) -> u32 {
        match self {
            Section::Night => 0,
            Section::Morning => SECTION_SLOTS,
            Section::Midday => SECTION_SLOTS * 2,
            Section::Evening => SECTION_SLOTS * 3,
        }
    }

    /// One past the last slot of the section (exclusive)
    pub fn end(self) -> u32 {
        self.start() + SECTION_SLOTS
    }

    /// Half-open slot range of the section
    pub fn bounds(self) -> Range<u32> {
        self.start()..self.end()
    }

    pub fn contains(self, index: u32) -> bool {
        self.bounds().contains(&index)
    }

    /// Lower-case identifier used on the command line and in logs
    pub fn id(self) -> &'static str {
        match self {
            Section::Night => "night",
            Section::Morning => "morning",
            Section::Midday => "midday",
            Section::Evening => "evening",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Section::Night => "Night",
            Section::Morning => "Morning",
            Section::Midday => "Midday",
            Section::Evening => "Evening",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Section {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "night" | "sec-night" => Ok(Section::Night),
            "morning" | "sec-morning" => Ok(Section::Morning),
            "midday" | "sec-midday" => Ok(Section::Midday),
            "evening" | "sec-evening" => Ok(Section::Evening),
            other => Err(TaskError::UnknownSection(other.to_string())),
        }
    }
}

/// Wall-clock `HH:MM` (24h, zero padded) for a slot index.
///
/// Accepts `DAY_SLOTS` itself so that end times of tasks finishing at
/// midnight render as `24:00`.
pub fn slot_to_time(index: u32) -> String {
    let minutes = index * SLOT_MINUTES;
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// The section containing `index`, or `None` when outside `[0, 96)`.
pub fn section_of(index: u32) -> Option<Section> {
    Section::ALL.into_iter().find(|section| section.contains(index))
}

/// Half-open slot range of `section`.
pub fn section_bounds(section: Section) -> Range<u32> {
    section.bounds()
}
