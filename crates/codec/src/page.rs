//! Page records and the lock/clear/rise/mirror commit step

use serde::{Deserialize, Serialize};

use fumen_core::{Field, FieldLine, QuizOperation};

use crate::action::Action;

/// One decoded page
///
/// `field` and `block_up` are the state shown on this page, before its
/// action is committed. Every page owns its own copies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub index: usize,
    #[serde(default)]
    pub action: Action,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Index of the page whose comment is in effect here
    #[serde(default)]
    pub comment_ref: usize,
    /// Row 23 is not on the wire; the encoder ignores it and the decoder
    /// rebuilds it from the previous page
    #[serde(default)]
    pub field: Field,
    #[serde(default)]
    pub block_up: FieldLine,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quiz_operation: Option<QuizOperation>,
    #[serde(default)]
    pub is_last_page: bool,
}

impl Page {
    /// An empty page at `index` showing `field`
    pub fn new(index: usize, field: Field) -> Self {
        Self {
            index,
            action: Action::default(),
            comment: None,
            comment_ref: 0,
            field,
            block_up: FieldLine::new(),
            quiz_operation: None,
            is_last_page: false,
        }
    }

    /// Set the comment and mark it for writing
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self.action.is_comment = true;
        self
    }

    /// Field and block-up line after this page's action
    pub fn committed(&self) -> (Field, FieldLine) {
        commit(&self.field, &self.block_up, &self.action)
    }

    /// The page that follows this one, starting from the committed field
    pub fn next_page(&self, action: Action) -> Page {
        let (field, block_up) = self.committed();
        Page {
            index: self.index + 1,
            action,
            comment: None,
            comment_ref: self.comment_ref,
            field,
            block_up,
            quiz_operation: None,
            is_last_page: false,
        }
    }
}

/// Apply an action to a field
///
/// Non-locking actions leave both untouched. Otherwise the piece is placed,
/// full rows are cleared, the field rises by `block_up` (which is then
/// emptied) and finally the field is mirrored, each step only when flagged.
pub fn commit(field: &Field, block_up: &FieldLine, action: &Action) -> (Field, FieldLine) {
    let mut field = field.snapshot();
    let mut block_up = *block_up;
    if !action.is_lock {
        return (field, block_up);
    }

    field.place(action.piece, action.rotation, action.coordinate);
    field.clear_filled_rows();

    if action.is_block_up {
        field.up(&block_up);
        block_up.clear();
    }
    if action.is_mirror {
        field.mirror();
    }

    (field, block_up)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fumen_core::types::{Coordinate, Piece, Rotation};

    #[test]
    fn commit_places_then_clears() {
        let field = Field::from_rows(&["IIII_IIIII"]).unwrap();
        let action = Action::place(Piece::I, Rotation::Right, Coordinate::new(4, 2));
        let (next, _) = commit(&field, &FieldLine::new(), &action);
        assert_eq!(next.block_count(), 3);
        assert_eq!(next.get(4, 0), Some(Piece::I));
        assert_eq!(next.get(4, 2), Some(Piece::I));
    }

    #[test]
    fn commit_rises_after_clear_then_mirrors() {
        let block_up = FieldLine::from_row("XXXXXXXXX_").unwrap();
        let action = Action {
            is_block_up: true,
            is_mirror: true,
            ..Action::default()
        };
        let (next, line) = commit(&Field::new(), &block_up, &action);
        assert!(line.is_empty());
        assert_eq!(next.row(0).map(|r| r[0]), Some(Piece::Empty));
        assert_eq!(next.row(0).map(|r| r[9]), Some(Piece::Gray));
    }

    #[test]
    fn non_locking_action_keeps_state() {
        let field = Field::from_rows(&["T_________"]).unwrap();
        let block_up = FieldLine::from_row("X_________").unwrap();
        let action = Action {
            piece: Piece::O,
            is_lock: false,
            is_block_up: true,
            ..Action::default()
        };
        assert_eq!(commit(&field, &block_up, &action), (field, block_up));
    }

    #[test]
    fn next_page_starts_from_committed_field() {
        let first = Page::new(0, Field::new());
        let second = first.next_page(Action::place(
            Piece::O,
            Rotation::Spawn,
            Coordinate::new(0, 0),
        ));
        let third = second.next_page(Action::default());
        assert_eq!(third.index, 2);
        assert_eq!(third.field.block_count(), 4);
        assert_eq!(second.field.block_count(), 0);
    }
}
