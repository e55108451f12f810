use rand::Rng;

use crate::{Error, Result, algo::tour::Tour};

/// Pulls a tour toward a brighter one by swapping positions into agreement.
///
/// Positions are visited left to right on a working copy of the source. A
/// mismatched position `i` is fixed, with probability `probability`, by
/// swapping it with whichever position currently holds `target[i]`. Later
/// positions see the effect of earlier swaps.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AttractionMove {
    probability: f64,
}

impl AttractionMove {
    pub fn new(probability: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(Error::InvalidProbability(probability));
        }
        Ok(Self { probability })
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }

    /// # Panics
    ///
    /// Panics if `target` is shorter than `source`, or if either is not a
    /// permutation of `0..source.len()`. Tours held by a [`Population`]
    /// always satisfy this.
    ///
    /// [`Population`]: crate::Population
    pub fn apply<R: Rng + ?Sized>(&self, source: &Tour, target: &Tour, rng: &mut R) -> Tour {
        debug_assert_eq!(source.len(), target.len());

        let mut working = source.clone();
        let order = working.order_mut();

        // value -> position in `order`, kept in sync with every swap
        let mut position = vec![0; order.len()];
        for (pos, &value) in order.iter().enumerate() {
            position[value] = pos;
        }

        for i in 0..order.len() {
            let wanted = target[i];
            if order[i] == wanted {
                continue;
            }
            if rng.random::<f64>() >= self.probability {
                continue;
            }
            let j = position[wanted];
            let displaced = order[i];
            order.swap(i, j);
            position[displaced] = j;
            position[wanted] = i;
        }

        working
    }
}
