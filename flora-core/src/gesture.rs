//! Care gestures and the rule that classifies them.
//!
//! The classifier consumes abstract hand observations: which side each
//! detected hand is, plus its index-fingertip x coordinate in the detector
//! frame. Where the observations come from is the caller's business; the
//! viewer synthesizes them from keyboard and pointer input, and a camera
//! pipeline could substitute real detections without touching this module.

/// The care action currently being performed, if any.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Gesture {
    #[default]
    None,
    Watering,
    Sunlight,
    Weeding,
}

impl Gesture {
    /// Short label for status displays.
    pub fn label(self) -> &'static str {
        match self {
            Self::None => "Idle",
            Self::Watering => "Watering",
            Self::Sunlight => "Sunlight",
            Self::Weeding => "Weeding",
        }
    }
}

/// Which of the caretaker's hands an observation belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HandSide {
    Left,
    Right,
}

/// One detected hand at a classification tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandObservation {
    pub side: HandSide,
    /// Index-fingertip x position, in pixels of the detector frame.
    pub index_tip_x: f32,
}

/// Lateral fingertip speed, in pixels per tick, that reads as waving.
const WAVE_THRESHOLD: f32 = 12.0;

/// Stateful gesture classifier.
///
/// Remembers the previous tick's fingertip position so a fast side-to-side
/// wave can be told apart from a steady hand.
#[derive(Debug, Default)]
pub struct GestureClassifier {
    previous_tip_x: Option<f32>,
}

impl GestureClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classifies one tick of observations. Rules, first match wins:
    ///
    /// 1. No hands: [`Gesture::None`]. History is left untouched, so a
    ///    dropped detection tick cannot fake a wave on the next one.
    /// 2. The primary (first) hand moving laterally faster than the wave
    ///    threshold: [`Gesture::Weeding`], regardless of handedness.
    /// 3. Any right hand present: [`Gesture::Watering`].
    /// 4. Otherwise only left hands remain: [`Gesture::Sunlight`].
    pub fn classify(&mut self, hands: &[HandObservation]) -> Gesture {
        let Some(primary) = hands.first() else {
            return Gesture::None;
        };

        let speed = self
            .previous_tip_x
            .map(|prev| primary.index_tip_x - prev)
            .unwrap_or(0.0);
        self.previous_tip_x = Some(primary.index_tip_x);

        if speed.abs() > WAVE_THRESHOLD {
            return Gesture::Weeding;
        }

        if hands.iter().any(|hand| hand.side == HandSide::Right) {
            Gesture::Watering
        } else {
            Gesture::Sunlight
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hand(side: HandSide, x: f32) -> HandObservation {
        HandObservation {
            side,
            index_tip_x: x,
        }
    }

    #[test]
    fn no_hands_means_no_gesture() {
        let mut classifier = GestureClassifier::new();
        assert_eq!(classifier.classify(&[]), Gesture::None);
    }

    #[test]
    fn right_hand_waters() {
        let mut classifier = GestureClassifier::new();
        assert_eq!(
            classifier.classify(&[hand(HandSide::Right, 320.0)]),
            Gesture::Watering
        );
    }

    #[test]
    fn left_hand_gives_sunlight() {
        let mut classifier = GestureClassifier::new();
        assert_eq!(
            classifier.classify(&[hand(HandSide::Left, 320.0)]),
            Gesture::Sunlight
        );
    }

    #[test]
    fn right_hand_wins_when_both_are_up() {
        let mut classifier = GestureClassifier::new();
        let both = [hand(HandSide::Left, 100.0), hand(HandSide::Right, 500.0)];
        assert_eq!(classifier.classify(&both), Gesture::Watering);
    }

    #[test]
    fn fast_wave_reads_as_weeding_either_direction() {
        let mut classifier = GestureClassifier::new();
        classifier.classify(&[hand(HandSide::Left, 100.0)]);
        assert_eq!(
            classifier.classify(&[hand(HandSide::Left, 140.0)]),
            Gesture::Weeding
        );
        assert_eq!(
            classifier.classify(&[hand(HandSide::Left, 100.0)]),
            Gesture::Weeding
        );
    }

    #[test]
    fn slow_drift_does_not_read_as_weeding() {
        let mut classifier = GestureClassifier::new();
        classifier.classify(&[hand(HandSide::Right, 100.0)]);
        assert_eq!(
            classifier.classify(&[hand(HandSide::Right, 108.0)]),
            Gesture::Watering
        );
    }

    #[test]
    fn first_sighting_is_never_a_wave() {
        let mut classifier = GestureClassifier::new();
        // No history yet, so even a far-off first position is calm.
        assert_eq!(
            classifier.classify(&[hand(HandSide::Right, 640.0)]),
            Gesture::Watering
        );
    }

    #[test]
    fn dropped_ticks_do_not_fake_waves() {
        let mut classifier = GestureClassifier::new();
        classifier.classify(&[hand(HandSide::Right, 100.0)]);
        assert_eq!(classifier.classify(&[]), Gesture::None);
        // Same position after the gap: still calm.
        assert_eq!(
            classifier.classify(&[hand(HandSide::Right, 100.0)]),
            Gesture::Watering
        );
    }

    #[test]
    fn exact_threshold_speed_is_not_a_wave() {
        let mut classifier = GestureClassifier::new();
        classifier.classify(&[hand(HandSide::Left, 0.0)]);
        assert_eq!(
            classifier.classify(&[hand(HandSide::Left, WAVE_THRESHOLD)]),
            Gesture::Sunlight
        );
    }
}
