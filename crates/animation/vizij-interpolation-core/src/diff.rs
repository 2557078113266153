//! Diff calculator: per-segment component deltas between consecutive keyframes.

use vizij_api_core::VectorizedValue;

use crate::InterpolationError;

/// `len() == keyframes - 1` rows of `arity` deltas each;
/// `row[i][j] = keyframes[i + 1][j] - keyframes[i][j]`.
#[derive(Clone, Debug, PartialEq)]
pub struct DiffTable {
    arity: usize,
    rows: Vec<Vec<f64>>,
}

impl DiffTable {
    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Component count shared by every row.
    #[inline]
    pub fn arity(&self) -> usize {
        self.arity
    }

    #[inline]
    pub fn segment(&self, index: usize) -> Option<&[f64]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// Row accessor for indices already known to be in range.
    #[inline]
    pub(crate) fn row(&self, index: usize) -> &[f64] {
        &self.rows[index]
    }

    pub fn iter(&self) -> impl Iterator<Item = &[f64]> {
        self.rows.iter().map(Vec::as_slice)
    }
}

/// Compute the diff table for an ordered keyframe sequence.
///
/// The sequence must hold at least two values, all of the same kind.
pub fn diff(sequence: &[VectorizedValue]) -> Result<DiffTable, InterpolationError> {
    let Some(first) = sequence.first() else {
        return Err(InterpolationError::InvalidKeyframeSequence {
            reason: "empty sequence".to_string(),
        });
    };
    if sequence.len() < 2 {
        return Err(InterpolationError::InvalidKeyframeSequence {
            reason: "a single keyframe cannot be interpolated".to_string(),
        });
    }
    if let Some((index, odd)) = sequence
        .iter()
        .enumerate()
        .find(|(_, v)| !v.same_shape(first))
    {
        return Err(InterpolationError::InvalidKeyframeSequence {
            reason: format!("element {index} is {}, expected {}", odd.kind(), first.kind()),
        });
    }

    let rows = sequence
        .windows(2)
        .map(|pair| {
            pair[1]
                .components()
                .iter()
                .zip(pair[0].components())
                .map(|(b, a)| b - a)
                .collect()
        })
        .collect();

    Ok(DiffTable {
        arity: first.arity(),
        rows,
    })
}
