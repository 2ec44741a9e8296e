//! Discordian date sampler

use anyhow::{bail, Result};
use chrono::{Datelike, NaiveDate};
use statline_core::{
    BoxedSampler, Fragment, ModuleConfig, ModuleInstance, Sampler, SamplerMetadata, TickContext,
};
use statline_types::source_configs::DdateConfig;

static METADATA: SamplerMetadata = SamplerMetadata {
    id: "ddate",
    name: "Discordian Date",
    tokens: &[],
};

const DAYS_PER_SEASON: u32 = 73;

/// Offset between the Gregorian year and the Year of Our Lady of Discord
const YOLD_OFFSET: i32 = 1166;

const SEASONS: [&str; 5] = ["Chaos", "Discord", "Confusion", "Bureaucracy", "The Aftermath"];
const SEASONS_SHORT: [&str; 5] = ["Chs", "Dsc", "Cfn", "Bcy", "Afm"];

const WEEKDAYS: [&str; 5] = [
    "Sweetmorn",
    "Boomtime",
    "Pungenday",
    "Prickle-Prickle",
    "Setting Orange",
];
const WEEKDAYS_SHORT: [&str; 5] = ["SM", "BT", "PD", "PP", "SO"];

/// Apostle holydays fall on the 5th of each season
const APOSTLE_HOLYDAYS: [&str; 5] = ["Mungday", "Mojoday", "Syaday", "Zaraday", "Maladay"];
/// Season holydays fall on the 50th
const SEASON_HOLYDAYS: [&str; 5] = ["Chaoflux", "Discoflux", "Confuflux", "Bureflux", "Afflux"];

const ST_TIBS_DAY: &str = "St. Tib's Day";

/// A day of the Discordian calendar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscordianDate {
    /// The leap day, outside of any season and week
    StTibs { year: i32 },
    Day {
        year: i32,
        /// 0-based season index
        season: usize,
        /// 1-based day of the season
        day: u32,
        /// 0-based weekday index
        weekday: usize,
    },
}

impl DiscordianDate {
    pub fn from_gregorian(date: NaiveDate) -> Self {
        let year = date.year() + YOLD_OFFSET;
        let mut yday = date.ordinal0();

        if NaiveDate::from_ymd_opt(date.year(), 2, 29).is_some() {
            match yday {
                59 => return Self::StTibs { year },
                d if d > 59 => yday -= 1,
                _ => {}
            }
        }

        Self::Day {
            year,
            season: (yday / DAYS_PER_SEASON) as usize,
            day: yday % DAYS_PER_SEASON + 1,
            weekday: (yday % 5) as usize,
        }
    }

    pub fn year(&self) -> i32 {
        match self {
            Self::StTibs { year } | Self::Day { year, .. } => *year,
        }
    }

    /// Name of today's holyday, if any
    pub fn holyday(&self) -> Option<&'static str> {
        match *self {
            Self::Day { season, day: 5, .. } => Some(APOSTLE_HOLYDAYS[season]),
            Self::Day { season, day: 50, .. } => Some(SEASON_HOLYDAYS[season]),
            _ => None,
        }
    }

    /// Render a ddate(1)-style format string
    pub fn format(&self, format: &str) -> String {
        let mut out = String::new();
        let mut chars = format.chars();

        while let Some(c) = chars.next() {
            if c != '%' {
                out.push(c);
                continue;
            }
            let Some(spec) = chars.next() else {
                out.push('%');
                break;
            };

            match (spec, self) {
                ('{', Self::StTibs { .. }) => {
                    out.push_str(ST_TIBS_DAY);
                    skip_past_close(&mut chars);
                }
                ('{' | '}', _) => {}
                ('N', _) if self.holyday().is_none() => break,
                ('N', _) => {}
                ('H', _) => out.push_str(self.holyday().unwrap_or_default()),
                ('Y', _) => out.push_str(&self.year().to_string()),
                ('n', _) => out.push('\n'),
                ('t', _) => out.push('\t'),
                ('%', _) => out.push('%'),
                ('A', Self::Day { weekday, .. }) => out.push_str(WEEKDAYS[*weekday]),
                ('a', Self::Day { weekday, .. }) => out.push_str(WEEKDAYS_SHORT[*weekday]),
                ('B', Self::Day { season, .. }) => out.push_str(SEASONS[*season]),
                ('b', Self::Day { season, .. }) => out.push_str(SEASONS_SHORT[*season]),
                ('d', Self::Day { day, .. }) => out.push_str(&day.to_string()),
                ('e', Self::Day { day, .. }) => out.push_str(&ordinal(*day)),
                // Day-of-season specifiers outside %{ %} on St. Tib's Day
                ('A' | 'a' | 'B' | 'b' | 'd' | 'e', Self::StTibs { .. }) => {}
                (other, _) => {
                    out.push('%');
                    out.push(other);
                }
            }
        }

        out
    }
}

/// Advance past the next `%}`, or to the end of the format
fn skip_past_close(chars: &mut std::str::Chars<'_>) {
    while let Some(c) = chars.next() {
        if c == '%' && chars.next() == Some('}') {
            return;
        }
    }
}

/// `1st`, `2nd`, `3rd`, `4th`, `11th`, `22nd`, ...
fn ordinal(day: u32) -> String {
    let suffix = match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", day, suffix)
}

/// Discordian date sampler
pub struct DdateSampler {
    config: DdateConfig,
}

impl DdateSampler {
    pub fn new(config: DdateConfig) -> Self {
        Self { config }
    }

    pub fn create(instance: &ModuleInstance) -> Result<BoxedSampler> {
        let ModuleConfig::Ddate(config) = &instance.config else {
            bail!("ddate sampler created for '{}'", instance.section);
        };
        Ok(Box::new(Self::new(config.clone())))
    }
}

impl Sampler for DdateSampler {
    fn metadata(&self) -> &SamplerMetadata {
        &METADATA
    }

    fn sample(&mut self, tick: &TickContext) -> Result<Fragment> {
        let Some(now) = &tick.now else {
            return Ok(Fragment::empty());
        };
        let date = DiscordianDate::from_gregorian(now.date_naive());
        Ok(Fragment::neutral(date.format(&self.config.format)))
    }
}
