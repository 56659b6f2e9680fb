//! Fumen string to pages

use tracing::{debug, trace};

use fumen_core::{is_quiz_comment, Field, FieldLine, FumenError, Quiz, Result};

use crate::action::read_action;
use crate::comment::read_comment;
use crate::field_diff::read_field_diff;
use crate::page::{commit, Page};
use crate::values::Values;

/// Accepted version headers, newest first
pub const VERSION_HEADERS: [&str; 3] = ["v115", "m115", "d115"];

/// Pages without their own comment after which an active quiz is repeated
pub const QUIZ_CARRY_PAGES: usize = 30;

/// Strip the version header and any `?` or whitespace from a fumen string
///
/// Anything before the header (such as a viewer URL ending in `?`) is ignored.
pub fn extract_payload(fumen: &str) -> Result<String> {
    let trimmed = fumen.trim();
    let unsupported = || {
        let header = trimmed.split('@').next().unwrap_or(trimmed);
        FumenError::UnsupportedVersion(header.to_string())
    };

    let (head, payload) = trimmed.split_once('@').ok_or_else(unsupported)?;
    if !VERSION_HEADERS.iter().any(|v| head.ends_with(v)) {
        return Err(unsupported());
    }

    Ok(payload
        .chars()
        .filter(|&c| c != '?' && !c.is_ascii_whitespace())
        .collect())
}

/// Decode every page of a fumen string
///
/// # Examples
///
/// ```
/// use fumen_codec::decode;
///
/// let pages = decode("v115@vhAAgH").unwrap();
/// assert_eq!(pages.len(), 1);
/// assert_eq!(pages[0].comment.as_deref(), Some(""));
/// assert!(pages[0].is_last_page);
/// ```
pub fn decode(fumen: &str) -> Result<Vec<Page>> {
    let payload = extract_payload(fumen)?;
    let mut decoder = PageDecoder::new(Values::parse(&payload)?);

    let mut pages = Vec::new();
    while !decoder.is_done() {
        pages.push(decoder.decode_page()?);
    }
    debug!(pages = pages.len(), "decoded fumen");
    Ok(pages)
}

/// State carried between pages of one decode pass
struct PageDecoder {
    values: Values,
    prev_field: Field,
    block_up: FieldLine,
    /// Pages left that reuse the previous field; -1 before any repeat block
    repeat_count: i32,
    last_comment_index: usize,
    quiz: Option<Quiz>,
    index: usize,
}

impl PageDecoder {
    fn new(values: Values) -> Self {
        Self {
            values,
            prev_field: Field::new(),
            block_up: FieldLine::new(),
            repeat_count: -1,
            last_comment_index: 0,
            quiz: None,
            index: 0,
        }
    }

    fn is_done(&self) -> bool {
        self.values.is_empty()
    }

    fn decode_page(&mut self) -> Result<Page> {
        let field = self.read_field()?;
        let action = read_action(&mut self.values)?;
        let comment = self.read_page_comment(action.is_comment)?;

        let mut page = Page {
            index: self.index,
            action,
            comment,
            comment_ref: self.last_comment_index,
            field,
            block_up: self.block_up,
            quiz_operation: None,
            is_last_page: self.values.is_empty(),
        };

        if action.locks_mino() {
            if let Some(quiz) = self.quiz.as_ref().filter(|q| q.can_operate()) {
                let operation = quiz.get_operation(action.piece)?;
                let next = quiz.operate(operation);
                trace!(page = self.index, ?operation, quiz = %next, "quiz advanced");
                self.quiz = Some(next);
                page.quiz_operation = Some(operation);
            }
        }

        (self.prev_field, self.block_up) = commit(&page.field, &self.block_up, &action);

        debug!(
            page = self.index,
            piece = ?action.piece,
            rotation = ?action.rotation,
            x = action.coordinate.x,
            y = action.coordinate.y,
            lock = action.is_lock,
            "decoded page"
        );
        self.index += 1;
        Ok(page)
    }

    fn read_field(&mut self) -> Result<Field> {
        let mut field = self.prev_field.clone();
        if self.repeat_count > 0 {
            self.repeat_count -= 1;
            return Ok(field);
        }

        let unchanged = read_field_diff(&mut self.values, &mut field, &mut self.block_up)?;
        if unchanged {
            self.repeat_count = self.values.poll(1)? as i32;
            trace!(page = self.index, repeat = self.repeat_count, "repeat block");
        }
        Ok(field)
    }

    fn read_page_comment(&mut self, has_comment: bool) -> Result<Option<String>> {
        if has_comment {
            let text = read_comment(&mut self.values)?;
            self.last_comment_index = self.index;
            self.quiz = if is_quiz_comment(&text) {
                Some(Quiz::parse(&text)?)
            } else {
                None
            };
            return Ok(Some(text));
        }

        if let Some(quiz) = &self.quiz {
            if self.last_comment_index + QUIZ_CARRY_PAGES <= self.index {
                return Ok(Some(quiz.to_string()));
            }
        }
        Ok((self.index == 0).then(String::new))
    }
}
