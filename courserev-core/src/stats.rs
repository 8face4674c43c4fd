//! Rating tallies: the unit every rollup folds over.

use std::iter::Sum;
use std::ops::Add;

use crate::model::Rating;

/// Count and sum of a set of ratings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RatingTally {
    count: u64,
    sum: u64,
}

impl RatingTally {
    pub const EMPTY: Self = Self { count: 0, sum: 0 };

    /// Tally with one more rating folded in
    #[must_use]
    pub fn with(self, rating: Rating) -> Self {
        Self {
            count: self.count + 1,
            sum: self.sum + u64::from(rating.get()),
        }
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn sum(&self) -> u64 {
        self.sum
    }

    /// Arithmetic mean, or `None` when nothing has been tallied.
    pub fn average(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum as f64 / self.count as f64)
    }
}

impl Add for RatingTally {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            count: self.count + other.count,
            sum: self.sum + other.sum,
        }
    }
}

impl Sum for RatingTally {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::EMPTY, Add::add)
    }
}

impl<'a> Sum<&'a RatingTally> for RatingTally {
    fn sum<I: Iterator<Item = &'a RatingTally>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl FromIterator<Rating> for RatingTally {
    fn from_iter<I: IntoIterator<Item = Rating>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, Self::with)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ratings(values: &[u8]) -> Vec<Rating> {
        values
            .iter()
            .map(|&v| Rating::try_from(v).unwrap())
            .collect()
    }

    #[test]
    fn empty_has_no_average() {
        assert_eq!(RatingTally::EMPTY.average(), None);
        assert_eq!(RatingTally::default(), RatingTally::EMPTY);
    }

    #[test]
    fn average_of_ratings() {
        let tally: RatingTally = ratings(&[5, 4]).into_iter().collect();
        assert_eq!(tally.count(), 2);
        assert_eq!(tally.sum(), 9);
        assert_eq!(tally.average(), Some(4.5));
    }

    #[test]
    fn sum_of_tallies_is_mean_of_all_ratings() {
        let a: RatingTally = ratings(&[5, 4]).into_iter().collect();
        let b: RatingTally = ratings(&[3]).into_iter().collect();
        let empty = RatingTally::EMPTY;

        let total: RatingTally = [a, empty, b].iter().sum();
        assert_eq!(total.count(), 3);
        assert_eq!(total.average(), Some(4.0));
    }
}
