//! Keyframe track: time-sorted states for one animated object.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::blend::BlendOptions;
use crate::config::AnimationConfig;
use crate::easing::Easing;
use crate::error::AnimationError;
use crate::morph::{CacheStats, Morpher};
use crate::schema::{EasingMap, Field};
use crate::state::State;

/// A state anchored at a time, with optional easing overrides for the
/// segment that starts here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    time: f64,
    state: State,
    #[serde(default, skip_serializing_if = "EasingMap::is_empty")]
    easing: EasingMap,
}

impl Keyframe {
    pub fn new(time: f64, state: impl Into<State>) -> Self {
        Self {
            time,
            state: state.into(),
            easing: EasingMap::new(),
        }
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn segment_easing(&self) -> &EasingMap {
        &self.easing
    }

    pub fn with_segment_easing(self, field: Field, easing: Easing) -> Self {
        Self {
            easing: self.easing.with(field, easing),
            ..self
        }
    }
}

/// Ordered keyframes plus per-segment morphers for path fields.
#[derive(Debug)]
pub struct KeyframeTrack {
    config: AnimationConfig,
    keyframes: Vec<Keyframe>,
    property_easing: EasingMap,
    /// Keyed by the bit pattern of the segment's start time
    morphers: HashMap<u64, Morpher>,
}

impl KeyframeTrack {
    /// Create an empty track. Fails if `config` does not validate.
    pub fn new(config: AnimationConfig) -> Result<Self, AnimationError> {
        config.validate()?;
        Ok(Self {
            config,
            keyframes: Vec::new(),
            property_easing: EasingMap::new(),
            morphers: HashMap::new(),
        })
    }

    /// Build a track from deserialized keyframes in any order.
    pub fn from_keyframes(
        config: AnimationConfig,
        keyframes: impl IntoIterator<Item = Keyframe>,
    ) -> Result<Self, AnimationError> {
        let mut track = Self::new(config)?;
        for keyframe in keyframes {
            track.insert(keyframe)?;
        }
        Ok(track)
    }

    pub fn with_property_easing(mut self, field: Field, easing: Easing) -> Self {
        self.property_easing.set(field, easing);
        self
    }

    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    pub fn property_easing(&self) -> &EasingMap {
        &self.property_easing
    }

    pub fn keyframes(&self) -> &[Keyframe] {
        &self.keyframes
    }

    pub fn len(&self) -> usize {
        self.keyframes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keyframes.is_empty()
    }

    /// Time between the first and last keyframe.
    pub fn duration(&self) -> f64 {
        match (self.keyframes.first(), self.keyframes.last()) {
            (Some(first), Some(last)) => last.time - first.time,
            _ => 0.0,
        }
    }

    pub fn add_keyframe(&mut self, time: f64, state: impl Into<State>) -> Result<(), AnimationError> {
        self.insert(Keyframe::new(time, state))
    }

    /// Insert in time order. Equal times are rejected.
    pub fn insert(&mut self, keyframe: Keyframe) -> Result<(), AnimationError> {
        if !keyframe.time.is_finite() {
            return Err(AnimationError::invalid_parameter(
                "time",
                format!("keyframe time must be finite, got {}", keyframe.time),
            ));
        }
        match self
            .keyframes
            .binary_search_by(|k| k.time.total_cmp(&keyframe.time))
        {
            Ok(_) => Err(AnimationError::DuplicateKeyframe { time: keyframe.time }),
            Err(pos) => {
                // Segment boundaries moved, so cached morphs may be stale.
                self.morphers.clear();
                self.keyframes.insert(pos, keyframe);
                Ok(())
            }
        }
    }

    /// Interpolated state at `time`, clamped to the first and last keyframe.
    pub fn sample(&mut self, time: f64) -> Result<State, AnimationError> {
        if !time.is_finite() {
            return Err(AnimationError::type_error(format!(
                "sample time must be a finite number, got {time}"
            )));
        }
        let (first, last) = match (self.keyframes.first(), self.keyframes.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => {
                return Err(AnimationError::invalid_parameter(
                    "keyframes",
                    "cannot sample an empty track",
                ))
            }
        };
        if time <= first.time {
            return Ok(first.state.clone());
        }
        if time >= last.time {
            return Ok(last.state.clone());
        }

        let next = self.keyframes.partition_point(|k| k.time <= time);
        let (a, b) = (&self.keyframes[next - 1], &self.keyframes[next]);
        let progress = (time - a.time) / (b.time - a.time);
        let options = BlendOptions::new(&self.config)
            .with_segment_easing(&a.easing)
            .with_property_easing(&self.property_easing);

        match (&a.state, &b.state) {
            (State::Path(pa), State::Path(pb)) => {
                let morpher = self.morphers.entry(a.time.to_bits()).or_insert_with(|| {
                    Morpher::with_config(pa.data().clone(), pb.data().clone(), &self.config)
                        .with_method(pa.morph_method())
                });
                a.state.blend_with_morpher(&b.state, progress, &options, morpher)
            }
            _ => a.state.blend_or_step(&b.state, progress, &options),
        }
    }

    /// Cache statistics per path segment, ordered by segment start time.
    pub fn morph_stats(&self) -> Vec<(f64, CacheStats)> {
        let mut stats: Vec<(f64, CacheStats)> = self
            .morphers
            .iter()
            .map(|(bits, m)| (f64::from_bits(*bits), m.cache_stats()))
            .collect();
        stats.sort_by(|x, y| x.0.total_cmp(&y.0));
        stats
    }

    /// Release every segment morpher. Safe to call repeatedly.
    pub fn dispose(&mut self) {
        for morpher in self.morphers.values_mut() {
            morpher.dispose();
        }
        self.morphers.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Appearance, CircleState, PathState, TextState};
    use approx::assert_abs_diff_eq;

    fn circle(radius: f64) -> CircleState {
        CircleState::new(radius)
    }

    fn radius_of(state: &State) -> f64 {
        match state {
            State::Circle(c) => c.radius(),
            other => panic!("expected circle, got {other:?}"),
        }
    }

    #[test]
    fn keyframes_stay_sorted() {
        let mut track = KeyframeTrack::new(AnimationConfig::default()).unwrap();
        track.add_keyframe(2.0, circle(30.0)).unwrap();
        track.add_keyframe(0.0, circle(10.0)).unwrap();
        track.add_keyframe(1.0, circle(20.0)).unwrap();
        let times: Vec<f64> = track.keyframes().iter().map(Keyframe::time).collect();
        assert_eq!(times, vec![0.0, 1.0, 2.0]);
        assert_abs_diff_eq!(track.duration(), 2.0);
    }

    #[test]
    fn duplicate_and_non_finite_times_rejected() {
        let mut track = KeyframeTrack::new(AnimationConfig::default()).unwrap();
        track.add_keyframe(1.0, circle(10.0)).unwrap();
        assert_eq!(
            track.add_keyframe(1.0, circle(20.0)).unwrap_err(),
            AnimationError::DuplicateKeyframe { time: 1.0 }
        );
        assert!(matches!(
            track.add_keyframe(f64::INFINITY, circle(1.0)),
            Err(AnimationError::InvalidParameter { .. })
        ));
        assert_eq!(track.len(), 1);
    }

    #[test]
    fn sample_clamps_and_interpolates() {
        let mut track = KeyframeTrack::new(AnimationConfig::default())
            .unwrap()
            .with_property_easing(Field::Radius, Easing::Linear);
        track.add_keyframe(1.0, circle(10.0)).unwrap();
        track.add_keyframe(3.0, circle(30.0)).unwrap();

        assert_abs_diff_eq!(radius_of(&track.sample(0.0).unwrap()), 10.0);
        assert_abs_diff_eq!(radius_of(&track.sample(2.0).unwrap()), 20.0);
        assert_abs_diff_eq!(radius_of(&track.sample(9.0).unwrap()), 30.0);
    }

    #[test]
    fn segment_easing_beats_property_easing() {
        let mut track = KeyframeTrack::new(AnimationConfig::default())
            .unwrap()
            .with_property_easing(Field::Radius, Easing::Linear);
        track
            .insert(Keyframe::new(0.0, circle(0.0)).with_segment_easing(Field::Radius, Easing::Step))
            .unwrap();
        track.add_keyframe(1.0, circle(100.0)).unwrap();
        track.add_keyframe(2.0, circle(0.0)).unwrap();

        assert_abs_diff_eq!(radius_of(&track.sample(0.4).unwrap()), 0.0);
        assert_abs_diff_eq!(radius_of(&track.sample(1.4).unwrap()), 60.0, epsilon = 1e-9);
    }

    #[test]
    fn mixed_kinds_step() {
        let mut track = KeyframeTrack::new(AnimationConfig::default()).unwrap();
        track.add_keyframe(0.0, circle(5.0)).unwrap();
        track.add_keyframe(1.0, TextState::new("hello")).unwrap();
        assert!(matches!(track.sample(0.49).unwrap(), State::Circle(_)));
        assert!(matches!(track.sample(0.51).unwrap(), State::Text(_)));
    }

    #[test]
    fn path_segments_reuse_morpher() {
        let mut track = KeyframeTrack::new(AnimationConfig::default()).unwrap();
        track
            .add_keyframe(0.0, PathState::parse("M0 0 L10 0 L10 10 L0 10 Z").unwrap())
            .unwrap();
        track
            .add_keyframe(1.0, PathState::parse("M5 0 L10 10 L0 10 Z").unwrap())
            .unwrap();

        let first = track.sample(0.5).unwrap();
        let second = track.sample(0.5).unwrap();
        assert_eq!(first, second);

        let stats = track.morph_stats();
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].1.misses, 1);
        assert_eq!(stats[0].1.hits, 1);

        track.dispose();
        track.dispose();
        assert!(track.morph_stats().is_empty());
    }

    #[test]
    fn empty_track_cannot_sample() {
        let mut track = KeyframeTrack::new(AnimationConfig::default()).unwrap();
        assert!(track.sample(0.0).is_err());
        let mut one = KeyframeTrack::new(AnimationConfig::default()).unwrap();
        one.add_keyframe(0.0, circle(1.0).with_appearance(Appearance::new().with_x(3.0)))
            .unwrap();
        assert_eq!(one.sample(42.0).unwrap().appearance().x(), 3.0);
    }
}
