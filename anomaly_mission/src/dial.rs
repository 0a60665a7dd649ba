use serde::Serialize;

/// Year span the dial sweeps over and the step it clicks through.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DialRange {
    pub min_year: i32,
    pub max_year: i32,
    pub step: i32,
}

impl Default for DialRange {
    fn default() -> Self {
        DialRange {
            min_year: -2000,
            max_year: 2000,
            step: 100,
        }
    }
}

/// Maps the pull handle's normalized extension onto a target year.
/// Reports a change only when the rounded year actually moves, so the
/// host can cue feedback on each click rather than every frame.
#[derive(Debug, Clone, Serialize)]
pub struct TimelineDial {
    range: DialRange,
    current_year: i32,
}

impl TimelineDial {
    pub fn new(range: DialRange) -> Self {
        TimelineDial {
            range,
            current_year: 0,
        }
    }

    pub fn current_year(&self) -> i32 {
        self.current_year
    }

    /// Feeds a new extension sample in (clamped to 0..=1) and returns the
    /// new year when this sample moved the dial to a different step.
    pub fn set_extension(&mut self, extension: f32) -> Option<i32> {
        let normalized = extension.clamp(0.0, 1.0);
        let span = (self.range.max_year - self.range.min_year) as f32;
        let raw_year = self.range.min_year as f32 + span * normalized;
        let step = self.range.step.max(1) as f32;
        let rounded = ((raw_year / step).round() * step) as i32;
        if rounded == self.current_year {
            return None;
        }
        self.current_year = rounded;
        Some(rounded)
    }

    pub fn era_label(&self) -> String {
        format_year(self.current_year)
    }
}

/// BC for negative years, AC for everything else. Downstream voice lines
/// were written against the AC suffix, so it stays.
pub fn format_year(year: i32) -> String {
    if year < 0 {
        format!("{} BC", year.abs())
    } else {
        format!("{} AC", year)
    }
}

#[cfg(test)]
mod tests {
    use super::{format_year, DialRange, TimelineDial};

    #[test]
    fn extension_extremes_hit_the_range_bounds() {
        let mut dial = TimelineDial::new(DialRange::default());
        assert_eq!(dial.set_extension(0.0), Some(-2000));
        assert_eq!(dial.set_extension(1.0), Some(2000));
    }

    #[test]
    fn extension_is_clamped() {
        let mut dial = TimelineDial::new(DialRange::default());
        assert_eq!(dial.set_extension(-0.4), Some(-2000));
        assert_eq!(dial.set_extension(7.0), Some(2000));
    }

    #[test]
    fn repeated_samples_on_the_same_step_stay_silent() {
        let mut dial = TimelineDial::new(DialRange::default());
        assert_eq!(dial.set_extension(0.5), None);
        assert_eq!(dial.set_extension(0.505), None);
        assert_eq!(dial.set_extension(0.55), Some(200));
        assert_eq!(dial.set_extension(0.55), None);
    }

    #[test]
    fn years_round_to_the_nearest_step() {
        let mut dial = TimelineDial::new(DialRange::default());
        assert_eq!(dial.set_extension(0.26), Some(-1000));
        assert_eq!(dial.set_extension(0.74), Some(1000));
    }

    #[test]
    fn era_labels_use_bc_and_ac_suffixes() {
        assert_eq!(format_year(-2000), "2000 BC");
        assert_eq!(format_year(0), "0 AC");
        assert_eq!(format_year(1200), "1200 AC");
    }
}
