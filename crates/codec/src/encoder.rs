//! Pages to fumen string

use tracing::{debug, trace, warn};

use fumen_core::types::FIELD_TOP;
use fumen_core::{Field, FieldLine, Result};

use crate::action::write_action;
use crate::comment::{write_comment, MAX_COMMENT_LENGTH};
use crate::config::CodecConfig;
use crate::field_diff::{diff_runs, is_unchanged, write_field_diff};
use crate::page::{commit, Page};
use crate::values::{ValueWriter, TABLE_LENGTH};

/// Header written by the encoder
pub const VERSION_PREFIX: &str = "v115@";

/// Payload chars before the first `?`
pub const FIRST_LINE_WIDTH: usize = 42;

/// Payload chars between later `?` markers
pub const LINE_WIDTH: usize = 47;

/// Encode pages with the default configuration
///
/// # Examples
///
/// ```
/// use fumen_codec::{encode, Page};
/// use fumen_core::Field;
///
/// let pages = vec![Page::new(0, Field::new()), Page::new(1, Field::new())];
/// assert_eq!(encode(&pages).unwrap(), "v115@vhBAgHAgH");
/// ```
pub fn encode(pages: &[Page]) -> Result<String> {
    encode_with(pages, &CodecConfig::default())
}

/// Encode pages
///
/// Each page's field is written as a diff against the previous page after
/// its action was committed. Only rows 0..=22 are diffed: the ceiling row is
/// always rebuilt from the previous page, and differences there are logged
/// and dropped. Runs of unchanged fields share one repeat counter of up to
/// 63 extra pages.
pub fn encode_with(pages: &[Page], config: &CodecConfig) -> Result<String> {
    let mut writer = ValueWriter::new();
    let mut prev_field = Field::new();
    let mut prev_block_up = FieldLine::new();
    // Position of the open repeat counter symbol
    let mut repeat_at: Option<usize> = None;

    for page in pages {
        if page.field.row(FIELD_TOP) != prev_field.row(FIELD_TOP) {
            warn!(page = page.index, "ceiling row is not encoded; its blocks are dropped");
        }
        let runs = diff_runs(&prev_field, &prev_block_up, &page.field, &page.block_up);

        if !is_unchanged(&runs) {
            write_field_diff(&mut writer, &runs);
            repeat_at = None;
        } else {
            match repeat_at.and_then(|at| writer.get(at).map(|count| (at, count))) {
                Some((at, count)) if count + 1 < TABLE_LENGTH => {
                    writer.set(at, count + 1);
                }
                _ => {
                    write_field_diff(&mut writer, &runs);
                    writer.push(0, 1);
                    repeat_at = Some(writer.len() - 1);
                    trace!(page = page.index, "repeat block opened");
                }
            }
        }

        write_action(&mut writer, &page.action)?;

        if page.action.is_comment {
            let comment = page.comment.as_deref().unwrap_or("");
            if write_comment(&mut writer, comment)? {
                warn!(
                    page = page.index,
                    limit = MAX_COMMENT_LENGTH,
                    "comment truncated"
                );
            }
        }

        (prev_field, prev_block_up) = commit(&page.field, &page.block_up, &page.action);
    }

    let payload = writer.to_payload();
    debug!(pages = pages.len(), symbols = payload.len(), "encoded fumen");

    let body = if config.wrap_lines {
        wrap_payload(&payload)
    } else {
        payload
    };
    Ok(format!("{VERSION_PREFIX}{body}"))
}

/// Insert `?` after the first 42 chars and every 47 after that
pub fn wrap_payload(payload: &str) -> String {
    let mut out = String::with_capacity(payload.len() + payload.len() / LINE_WIDTH + 1);
    for (i, ch) in payload.chars().enumerate() {
        if i >= FIRST_LINE_WIDTH && (i - FIRST_LINE_WIDTH) % LINE_WIDTH == 0 {
            out.push('?');
        }
        out.push(ch);
    }
    out
}
