//! Ordering algorithms shared by the optimistic apply in the state store and
//! the local fallback backend.
//!
//! Every function validates before it mutates, so an error leaves the
//! columns untouched.

use std::collections::HashSet;

use kanban_core::{KanbanError, KanbanResult};

use crate::column::Column;
use crate::ids::{CardId, ColumnId};

fn column_position(columns: &[Column], column_id: &ColumnId) -> KanbanResult<usize> {
    columns
        .iter()
        .position(|c| &c.id == column_id)
        .ok_or_else(|| KanbanError::not_found("Column", column_id))
}

/// Find the column position and in-column index of a card.
pub fn locate_card(columns: &[Column], card_id: &CardId) -> Option<(usize, usize)> {
    columns.iter().enumerate().find_map(|(col_pos, column)| {
        column
            .card_index(card_id)
            .map(|card_pos| (col_pos, card_pos))
    })
}

/// Move the card at `from_index` of `from` into `to` at `to_index`.
///
/// The card is removed before it is inserted, so for same-column moves
/// `to_index` addresses the sequence with the card already taken out.
/// An index past the end of the destination appends. Returns the index the
/// card landed at.
pub fn relocate_card(
    columns: &mut [Column],
    from: &ColumnId,
    to: &ColumnId,
    from_index: usize,
    to_index: usize,
) -> KanbanResult<usize> {
    let from_pos = column_position(columns, from)?;
    let to_pos = column_position(columns, to)?;
    if from_index >= columns[from_pos].cards.len() {
        return Err(KanbanError::NotFound(format!(
            "Card at index {} in column {}",
            from_index, from
        )));
    }

    let mut card = columns[from_pos].cards.remove(from_index);
    card.move_to_column(to.clone());

    let destination = &mut columns[to_pos].cards;
    let index = to_index.min(destination.len());
    destination.insert(index, card);
    Ok(index)
}

/// Rearrange columns to follow `ordered_ids` and rewrite `order` to `0..n`.
///
/// Columns missing from `ordered_ids` keep their relative order after the
/// named ones.
pub fn reorder_columns(columns: &mut Vec<Column>, ordered_ids: &[ColumnId]) -> KanbanResult<()> {
    let mut seen = HashSet::with_capacity(ordered_ids.len());
    for id in ordered_ids {
        if !seen.insert(id) {
            return Err(KanbanError::Validation(format!(
                "Column {} listed more than once",
                id
            )));
        }
        column_position(columns, id)?;
    }

    let mut remaining = std::mem::take(columns);
    for id in ordered_ids {
        if let Some(pos) = remaining.iter().position(|c| &c.id == id) {
            columns.push(remaining.remove(pos));
        }
    }
    columns.append(&mut remaining);
    renumber_columns(columns);
    Ok(())
}

/// Rewrite column `order` values to match their positions.
pub fn renumber_columns(columns: &mut [Column]) {
    for (position, column) in columns.iter_mut().enumerate() {
        column.order = position as i32;
    }
}
