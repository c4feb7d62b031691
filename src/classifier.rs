use rand::Rng;
use rand::distributions::{Distribution, WeightedError, WeightedIndex};
use rand::thread_rng;

// OUTCOME
// ================================================================================================

/// The three ways a payment attempt can be classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
    Suspicious,
}

impl Outcome {
    /// All outcomes, in the order their weights are configured.
    const ALL: [Outcome; 3] = [Outcome::Success, Outcome::Failure, Outcome::Suspicious];

    /// The application-level code reported for this outcome, distinct from the HTTP status.
    pub fn code(self) -> u16 {
        match self {
            Outcome::Success => 100,
            Outcome::Failure => 101,
            Outcome::Suspicious => 102,
        }
    }

    /// The status flag stored with a persisted transaction row.
    ///
    /// Only meaningful for outcomes that reach the store; failures are never persisted.
    pub fn persisted_status(self) -> bool {
        matches!(self, Outcome::Success)
    }
}

// OUTCOME CLASSIFIER
// ================================================================================================

/// Relative weights of the outcome draw.
///
/// A zero weight removes that outcome from the draw entirely; at least one weight must be
/// non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutcomeWeights {
    pub success: u32,
    pub failure: u32,
    pub suspicious: u32,
}

impl Default for OutcomeWeights {
    /// The success-heavy 8:1:1 distribution.
    fn default() -> Self {
        Self { success: 8, failure: 1, suspicious: 1 }
    }
}

/// Classifies payment attempts by drawing an outcome at random.
///
/// Each draw is independent; no state carries across requests.
#[derive(Debug, Clone)]
pub struct OutcomeClassifier {
    distribution: WeightedIndex<u32>,
}

impl OutcomeClassifier {
    /// Creates a classifier for the given weights.
    ///
    /// Fails if every weight is zero.
    pub fn new(weights: OutcomeWeights) -> Result<Self, WeightedError> {
        let distribution =
            WeightedIndex::new([weights.success, weights.failure, weights.suspicious])?;
        Ok(Self { distribution })
    }

    /// Draws a single outcome using the thread-local RNG.
    pub fn draw(&self) -> Outcome {
        self.draw_with(&mut thread_rng())
    }

    /// Draws a single outcome from the provided RNG.
    pub fn draw_with(&self, rng: &mut impl Rng) -> Outcome {
        Outcome::ALL[self.distribution.sample(rng)]
    }
}

// TESTS
// ================================================================================================
