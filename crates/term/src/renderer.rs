//! Framebuffer output through crossterm.
//!
//! Previews are printed inline (no alternate screen, no raw mode), so a
//! rendered page stays in the scrollback like any other command output.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    QueueableCommand,
};

use crate::fb::{CellStyle, FrameBuffer, Rgb};

/// Encode every row of `fb` as styled text into `out`.
///
/// Each row ends with a style reset and a newline. This builds a sequence of
/// crossterm commands without writing to stdout.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    for y in 0..fb.height() {
        let mut current_style: Option<CellStyle> = None;
        for x in 0..fb.width() {
            let cell = fb.get(x, y).unwrap_or_default();
            if current_style != Some(cell.style) {
                apply_style_into(out, cell.style)?;
                current_style = Some(cell.style);
            }
            out.queue(Print(cell.ch))?;
        }
        out.queue(ResetColor)?;
        out.queue(SetAttribute(Attribute::Reset))?;
        out.queue(Print('\n'))?;
    }
    Ok(())
}

/// Encode `fb` as plain text, one line per row.
pub fn encode_plain_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    for y in 0..fb.height() {
        writeln!(out, "{}", fb.row_text(y))?;
    }
    Ok(())
}

/// Print a framebuffer to stdout, styled or plain.
pub fn print_frame(fb: &FrameBuffer, styled: bool) -> Result<()> {
    let mut buf = Vec::with_capacity(fb.width() as usize * fb.height() as usize * 8);
    if styled {
        encode_full_into(fb, &mut buf)?;
    } else {
        encode_plain_into(fb, &mut buf)?;
    }

    let mut stdout = io::stdout().lock();
    stdout.write_all(&buf)?;
    stdout.flush()?;
    Ok(())
}

fn apply_style_into(out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
    out.queue(SetForegroundColor(rgb_to_color(style.fg)))?;
    out.queue(SetBackgroundColor(rgb_to_color(style.bg)))?;
    out.queue(SetAttribute(Attribute::Reset))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        out.queue(SetAttribute(Attribute::Dim))?;
    }
    Ok(())
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}
