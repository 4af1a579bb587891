//! Pairwise position swaps for reordering a tender's questions.

use serde::Deserialize;

use crate::error::CoreError;
use crate::question::Question;
use crate::types::DbId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

/// Two position writes that must be applied together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Swap {
    pub first_id: DbId,
    pub first_position: i32,
    pub second_id: DbId,
    pub second_position: i32,
}

/// Plan moving `question_id` one step in `direction`.
///
/// `ordered` must already be in display order. Returns `Ok(None)` when the
/// question is already at that boundary; the move is then a no-op.
pub fn plan_move(
    ordered: &[Question],
    question_id: DbId,
    direction: Direction,
) -> Result<Option<Swap>, CoreError> {
    let idx = ordered
        .iter()
        .position(|q| q.id == question_id)
        .ok_or(CoreError::NotFound {
            entity: "Question",
            id: question_id,
        })?;

    let neighbour = match direction {
        Direction::Up => idx.checked_sub(1),
        Direction::Down => Some(idx + 1).filter(|&n| n < ordered.len()),
    };
    let Some(neighbour) = neighbour else {
        return Ok(None);
    };

    let current = &ordered[idx];
    let other = &ordered[neighbour];
    Ok(Some(Swap {
        first_id: current.id,
        first_position: other.position,
        second_id: other.id,
        second_position: current.position,
    }))
}

/// Dense positions `0..n` for `ordered`, or `None` when every position is
/// already distinct. A swap between two equal positions would not change
/// the order, so colliding positions are spread out first.
pub fn renumber(ordered: &[Question]) -> Option<Vec<(DbId, i32)>> {
    let distinct = ordered.windows(2).all(|w| w[0].position != w[1].position);
    if distinct {
        return None;
    }
    Some(
        ordered
            .iter()
            .zip(0..)
            .map(|(q, position)| (q.id, position))
            .collect(),
    )
}
