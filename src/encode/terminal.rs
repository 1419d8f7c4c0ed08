use std::io::{self, Write};

use crossterm::style::{Color as TermColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::{QueueableCommand, cursor, terminal};
use serde::{Deserialize, Serialize};

use crate::encode::sink::{DisplaySink, SinkConfig};
use crate::foundation::error::ComposerResult;
use crate::render::buffer::PixelBuffer;

const UPPER_HALF: &str = "\u{2580}";

/// How pixels map onto terminal cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalSinkOpts {
    /// Pack two pixel rows into one cell with an upper-half block.
    pub half_blocks: bool,
    /// Use two cells per pixel so pixels look square. Ignored in half-block mode.
    pub square_pixels: bool,
}

impl Default for TerminalSinkOpts {
    fn default() -> Self {
        Self {
            half_blocks: false,
            square_pixels: true,
        }
    }
}

impl TerminalSinkOpts {
    /// Terminal cells needed for a `width x height` frame.
    pub fn cell_size(&self, width: u32, height: u32) -> (u32, u32) {
        if self.half_blocks {
            (width, height.div_ceil(2))
        } else if self.square_pixels {
            (width * 2, height)
        } else {
            (width, height)
        }
    }
}

/// Paints frames with 24-bit ANSI colours on an alternate screen.
pub struct TerminalSink<W: Write = io::Stdout> {
    out: W,
    opts: TerminalSinkOpts,
    buf: Vec<u8>,
    raw_mode: bool,
    active: bool,
    config: Option<SinkConfig>,
}

impl TerminalSink<io::Stdout> {
    /// Sink on stdout that also switches the terminal to raw mode while active.
    pub fn stdout(opts: TerminalSinkOpts) -> Self {
        let mut sink = Self::with_writer(io::stdout(), opts);
        sink.raw_mode = true;
        sink
    }
}

impl<W: Write> TerminalSink<W> {
    /// Sink on an arbitrary writer. Raw mode is left alone.
    pub fn with_writer(out: W, opts: TerminalSinkOpts) -> Self {
        Self {
            out,
            opts,
            buf: Vec::with_capacity(64 * 1024),
            raw_mode: false,
            active: false,
            config: None,
        }
    }

    pub fn opts(&self) -> TerminalSinkOpts {
        self.opts
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    fn flush_buf(&mut self) -> io::Result<()> {
        self.out.write_all(&self.buf)?;
        self.out.flush()
    }

    fn leave(&mut self) -> io::Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        if self.raw_mode {
            terminal::disable_raw_mode()?;
        }
        self.active = false;
        Ok(())
    }
}

impl<W: Write> DisplaySink for TerminalSink<W> {
    fn begin(&mut self, config: SinkConfig) -> ComposerResult<()> {
        config.validate()?;
        if self.raw_mode {
            terminal::enable_raw_mode()?;
        }
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.buf.queue(terminal::Clear(terminal::ClearType::All))?;
        self.flush_buf()?;
        self.active = true;
        self.config = Some(config);
        Ok(())
    }

    fn present(&mut self, frame: &PixelBuffer) -> ComposerResult<()> {
        if let Some(cfg) = &self.config {
            cfg.check_frame(frame)?;
        }
        self.buf.clear();
        encode_frame_into(frame, self.opts, &mut self.buf)?;
        self.flush_buf()?;
        Ok(())
    }

    fn end(&mut self) -> ComposerResult<()> {
        if self.active {
            self.leave()?;
        }
        Ok(())
    }
}

impl<W: Write> Drop for TerminalSink<W> {
    fn drop(&mut self) {
        if self.active {
            let _ = self.leave();
        }
    }
}

impl<W: Write> std::fmt::Debug for TerminalSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerminalSink")
            .field("opts", &self.opts)
            .field("raw_mode", &self.raw_mode)
            .field("active", &self.active)
            .finish_non_exhaustive()
    }
}

/// Terminal colour for a pixel. Fully transparent pixels show as black.
pub fn term_color(px: [u8; 4]) -> TermColor {
    if px[3] == 0 {
        TermColor::Rgb { r: 0, g: 0, b: 0 }
    } else {
        TermColor::Rgb {
            r: px[0],
            g: px[1],
            b: px[2],
        }
    }
}

/// Encode a full-frame redraw into `out` without touching the terminal.
pub fn encode_frame_into(frame: &PixelBuffer, opts: TerminalSinkOpts, out: &mut Vec<u8>) -> io::Result<()> {
    out.queue(cursor::MoveTo(0, 0))?;
    let (w, h) = (frame.width() as i32, frame.height() as i32);
    let mut fg: Option<TermColor> = None;
    let mut bg: Option<TermColor> = None;

    if opts.half_blocks {
        let rows = (h + 1) / 2;
        for row in 0..rows {
            let y = row * 2;
            for x in 0..w {
                let top = term_color(frame.get_pixel(x, y));
                let bottom = if y + 1 < h {
                    term_color(frame.get_pixel(x, y + 1))
                } else {
                    TermColor::Rgb { r: 0, g: 0, b: 0 }
                };
                if fg != Some(top) {
                    out.queue(SetForegroundColor(top))?;
                    fg = Some(top);
                }
                if bg != Some(bottom) {
                    out.queue(SetBackgroundColor(bottom))?;
                    bg = Some(bottom);
                }
                out.queue(Print(UPPER_HALF))?;
            }
            if row + 1 < rows {
                out.queue(ResetColor)?;
                (fg, bg) = (None, None);
                out.queue(Print("\r\n"))?;
            }
        }
    } else {
        let cell = if opts.square_pixels { "  " } else { " " };
        for y in 0..h {
            for x in 0..w {
                let color = term_color(frame.get_pixel(x, y));
                if bg != Some(color) {
                    out.queue(SetBackgroundColor(color))?;
                    bg = Some(color);
                }
                out.queue(Print(cell))?;
            }
            if y + 1 < h {
                out.queue(ResetColor)?;
                bg = None;
                out.queue(Print("\r\n"))?;
            }
        }
    }

    out.queue(ResetColor)?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/terminal.rs"]
mod tests;
