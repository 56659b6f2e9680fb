//! PageView: maps a decoded page into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::codec::Page;
use crate::core::pieces::absolute_cells;
use crate::core::{is_quiz_comment, Quiz, QuizOperation};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Piece, FIELD_TOP, FIELD_WIDTH};

/// Side panel width in columns.
const PANEL_W: u16 = 18;

/// Gap between the field frame and the side panel.
const PANEL_GAP: u16 = 2;

/// Queue entries shown under NEXT.
const NEXT_SHOWN: usize = 5;

const FIELD_BG: Rgb = Rgb::new(30, 30, 40);

/// A terminal preview of one page.
///
/// Layout, top to bottom: the framed field (rows 22..0) with the page's
/// piece drawn over it, the block-up line, then the comment. Page details
/// and the quiz hold/next queue sit in a panel to the right.
pub struct PageView {
    /// Field cell width in terminal columns.
    cell_w: u16,
    /// Field cell height in terminal rows.
    cell_h: u16,
}

impl Default for PageView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

impl PageView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    fn frame_size(&self) -> (u16, u16) {
        (
            FIELD_WIDTH as u16 * self.cell_w + 2,
            FIELD_TOP as u16 * self.cell_h + 2,
        )
    }

    /// Total width of a rendered page.
    pub fn width(&self) -> u16 {
        self.frame_size().0 + PANEL_GAP + PANEL_W
    }

    /// Render a page into a new framebuffer sized to fit it.
    pub fn render(&self, page: &Page) -> FrameBuffer {
        let (frame_w, frame_h) = self.frame_size();
        let width = self.width();
        let comment_lines = wrap_text(page.comment.as_deref().unwrap_or(""), width as usize);
        let block_up_y = frame_h;
        let comment_y = block_up_y + self.cell_h;
        let height = comment_y + comment_lines.len() as u16;

        let mut fb = FrameBuffer::new(width, height);

        let border = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        draw_border(&mut fb, 0, 0, frame_w, frame_h, border);
        self.draw_field(&mut fb, page);
        self.draw_block_up(&mut fb, page, block_up_y);
        self.draw_panel(&mut fb, page, frame_w + PANEL_GAP);

        let text = CellStyle::default();
        for (i, line) in comment_lines.iter().enumerate() {
            fb.put_str(0, comment_y + i as u16, line, text);
        }
        fb
    }

    fn draw_field(&self, fb: &mut FrameBuffer, page: &Page) {
        for y in 0..FIELD_TOP {
            for x in 0..FIELD_WIDTH {
                let piece = page.field.get(x as i8, y as i8).unwrap_or_default();
                let (px, py) = self.cell_origin(x as u16, y as u16);
                draw_cell(fb, px, py, self.cell_w, self.cell_h, piece, false);
            }
        }

        let action = &page.action;
        let Some(cells) = absolute_cells(action.piece, action.rotation, action.coordinate) else {
            return;
        };
        for c in cells {
            if (0..FIELD_WIDTH as i8).contains(&c.x) && (0..FIELD_TOP as i8).contains(&c.y) {
                let (px, py) = self.cell_origin(c.x as u16, c.y as u16);
                draw_cell(fb, px, py, self.cell_w, self.cell_h, action.piece, true);
            }
        }
    }

    fn draw_block_up(&self, fb: &mut FrameBuffer, page: &Page, row: u16) {
        for (x, &piece) in page.block_up.cells().iter().enumerate() {
            let px = 1 + x as u16 * self.cell_w;
            if piece == Piece::Empty {
                continue;
            }
            let style = piece_style(piece, false).dim();
            fb.fill_rect(px, row, self.cell_w, self.cell_h, '▒', style);
        }
    }

    /// Screen position of the top-left corner of field cell (x, y).
    fn cell_origin(&self, x: u16, y: u16) -> (u16, u16) {
        let row_from_top = FIELD_TOP as u16 - 1 - y;
        (1 + x * self.cell_w, 1 + row_from_top * self.cell_h)
    }

    fn draw_panel(&self, fb: &mut FrameBuffer, page: &Page, panel_x: u16) {
        let label = CellStyle::default().bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        let dim = value.dim();

        let mut y = 0;
        fb.put_str(panel_x, y, "PAGE", label);
        y += 1;
        let end = fb.put_str(panel_x, y, &(page.index + 1).to_string(), value);
        if page.is_last_page {
            fb.put_str(end + 1, y, "(last)", dim);
        }
        y += 2;

        let action = &page.action;
        fb.put_str(panel_x, y, "PIECE", label);
        y += 1;
        if action.piece.is_mino() {
            let end = fb.put_str(panel_x, y, &action.piece.as_char().to_string(), piece_style(action.piece, true));
            fb.put_str(end + 1, y, action.rotation.as_str(), value);
            y += 1;
            let at = format!("({}, {})", action.coordinate.x, action.coordinate.y);
            fb.put_str(panel_x, y, &at, value);
        } else {
            fb.put_str(panel_x, y, "-", value);
        }
        y += 1;

        let flags: Vec<&str> = [
            (action.is_lock, "lock"),
            (action.is_block_up, "rise"),
            (action.is_mirror, "mirror"),
        ]
        .iter()
        .filter(|(set, _)| *set)
        .map(|&(_, name)| name)
        .collect();
        fb.put_str(panel_x, y, &flags.join(" "), dim);
        y += 2;

        let quiz = page
            .comment
            .as_deref()
            .filter(|c| is_quiz_comment(c))
            .and_then(|c| Quiz::parse(c).ok());
        let Some(quiz) = quiz else {
            return;
        };

        fb.put_str(panel_x, y, "HOLD", label);
        y += 1;
        draw_piece_letter(fb, panel_x, y, quiz.hold_piece(), value);
        y += 2;

        fb.put_str(panel_x, y, "NEXT", label);
        y += 1;
        let mut x = panel_x;
        for piece in quiz.next_pieces(NEXT_SHOWN) {
            if piece == Piece::Empty {
                break;
            }
            x = draw_piece_letter(fb, x, y, piece, value) + 1;
        }
        y += 2;

        if let Some(operation) = page.quiz_operation {
            fb.put_str(panel_x, y, "QUIZ", label);
            fb.put_str(panel_x + 5, y, operation_name(operation), value);
        }
    }
}

fn operation_name(operation: QuizOperation) -> &'static str {
    match operation {
        QuizOperation::Direct => "direct",
        QuizOperation::Swap => "swap",
        QuizOperation::Stock => "stock",
    }
}

fn draw_piece_letter(fb: &mut FrameBuffer, x: u16, y: u16, piece: Piece, blank: CellStyle) -> u16 {
    if piece == Piece::Empty {
        fb.put_str(x, y, "-", blank)
    } else {
        fb.put_str(x, y, &piece.as_char().to_string(), piece_style(piece, true))
    }
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

fn draw_cell(fb: &mut FrameBuffer, px: u16, py: u16, w: u16, h: u16, piece: Piece, active: bool) {
    if piece == Piece::Empty {
        let style = CellStyle::new(Rgb::new(90, 90, 100), FIELD_BG).dim();
        fb.fill_rect(px, py, w, h, '·', style);
    } else {
        fb.fill_rect(px, py, w, h, '█', piece_style(piece, active));
    }
}

/// Field color for a piece.
pub fn piece_color(piece: Piece) -> Rgb {
    match piece {
        Piece::I => Rgb::new(80, 220, 220),
        Piece::O => Rgb::new(240, 220, 80),
        Piece::T => Rgb::new(200, 120, 220),
        Piece::S => Rgb::new(100, 220, 120),
        Piece::Z => Rgb::new(220, 80, 80),
        Piece::J => Rgb::new(80, 120, 220),
        Piece::L => Rgb::new(255, 165, 0),
        Piece::Gray => Rgb::new(150, 150, 150),
        Piece::Empty => Rgb::new(90, 90, 100),
    }
}

fn piece_style(piece: Piece, bold: bool) -> CellStyle {
    CellStyle {
        fg: piece_color(piece),
        bg: FIELD_BG,
        bold,
        dim: false,
    }
}

/// Split text into lines of at most `width` chars, honoring newlines.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return Vec::new();
    }
    let mut lines = Vec::new();
    for line in text.lines() {
        let chars: Vec<char> = line.chars().collect();
        if chars.is_empty() {
            lines.push(String::new());
        }
        lines.extend(chars.chunks(width).map(|chunk| chunk.iter().collect()));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_splits_long_lines() {
        assert_eq!(wrap_text("abcdef", 4), vec!["abcd", "ef"]);
        assert_eq!(wrap_text("a\n\nb", 4), vec!["a", "", "b"]);
        assert!(wrap_text("", 4).is_empty());
    }

    #[test]
    fn cell_origin_puts_row_zero_at_bottom() {
        let view = PageView::default();
        assert_eq!(view.cell_origin(0, 22), (1, 1));
        assert_eq!(view.cell_origin(9, 0), (19, 23));
    }

    #[test]
    fn every_piece_has_distinct_color() {
        let mut colors: Vec<Rgb> = Piece::MINOS.iter().map(|&p| piece_color(p)).collect();
        colors.push(piece_color(Piece::Gray));
        for (i, a) in colors.iter().enumerate() {
            assert!(colors[i + 1..].iter().all(|b| b != a), "{a:?}");
        }
    }
}
