//! Shared wind field, sampled once per frame.
//!
//! Amplitude and direction vary on independent slow sine combinations of
//! elapsed time. The plant animator and the dust field read the same
//! sample, so both drift coherently.

/// One frame's wind sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Wind {
    /// Signed gust amplitude, slowly oscillating around zero.
    pub strength: f32,
    /// Horizontal direction component along x.
    pub dir_x: f32,
    /// Horizontal direction component along z.
    pub dir_z: f32,
}

impl Wind {
    /// Samples the wind field at `time` seconds.
    ///
    /// The amplitude layers a slow swell with a faster flutter at half
    /// weight; the direction components rotate on their own, slower
    /// clocks so gusts never repeat exactly.
    pub fn at(time: f32) -> Self {
        let gust = time * 0.5;
        Self {
            strength: (gust.sin() + (gust * 3.0).sin() * 0.5) * 0.05,
            dir_x: (time * 0.3).sin(),
            dir_z: (time * 0.2).cos(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calm_at_time_zero() {
        let wind = Wind::at(0.0);
        assert_eq!(wind.strength, 0.0);
        assert_eq!(wind.dir_x, 0.0);
        assert_eq!(wind.dir_z, 1.0);
    }

    #[test]
    fn amplitude_stays_bounded() {
        for i in 0..2_000 {
            let wind = Wind::at(i as f32 * 0.1);
            assert!(wind.strength.abs() <= 0.075);
            assert!(wind.dir_x.abs() <= 1.0);
            assert!(wind.dir_z.abs() <= 1.0);
        }
    }

    #[test]
    fn samples_are_pure() {
        assert_eq!(Wind::at(12.34), Wind::at(12.34));
    }
}
