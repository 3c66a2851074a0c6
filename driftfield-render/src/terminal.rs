// Terminal surface guard
//
// Owns the alternate-screen lifetime: validates that stdout is a usable
// surface, switches to the alternate screen with the cursor hidden, and
// restores the terminal unconditionally on drop, error paths included.

use std::io::{self, Write};

use log::{debug, warn};

use crate::error::{RenderError, RenderResult};

const ENTER_ALT_SCREEN: &str = "\x1b[?1049h";
const LEAVE_ALT_SCREEN: &str = "\x1b[?1049l";
const HIDE_CURSOR: &str = "\x1b[?25l";
const SHOW_CURSOR: &str = "\x1b[?25h";
const CLEAR_SCREEN: &str = "\x1b[2J";

/// RAII handle over the terminal acting as the drawing surface.
pub struct TerminalSurface {
    out: io::Stdout,
}

impl TerminalSurface {
    /// Take over stdout as the drawing surface.
    ///
    /// Fails once, at startup, when stdout is not a terminal. There is no
    /// recovery or retry path for a missing surface.
    pub fn acquire() -> RenderResult<Self> {
        if unsafe { libc::isatty(libc::STDOUT_FILENO) } != 1 {
            return Err(RenderError::SurfaceUnavailable(
                "stdout is not a terminal".to_string(),
            ));
        }
        let mut out = io::stdout();
        write!(out, "{}{}{}", ENTER_ALT_SCREEN, CLEAR_SCREEN, HIDE_CURSOR)?;
        out.flush()?;
        debug!("Driftfield: terminal surface acquired");
        Ok(Self { out })
    }

    /// Current terminal size in character cells.
    pub fn size(&self) -> RenderResult<(u16, u16)> {
        let mut winsize = libc::winsize {
            ws_row: 0,
            ws_col: 0,
            ws_xpixel: 0,
            ws_ypixel: 0,
        };
        let rc = unsafe { libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, &mut winsize) };
        if rc != 0 {
            return Err(RenderError::SizeUnavailable(
                io::Error::last_os_error().to_string(),
            ));
        }
        if winsize.ws_col == 0 || winsize.ws_row == 0 {
            return Err(RenderError::SizeUnavailable(
                "terminal reports a zero-sized window".to_string(),
            ));
        }
        Ok((winsize.ws_col, winsize.ws_row))
    }
}

impl Write for TerminalSurface {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.out.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

impl Drop for TerminalSurface {
    fn drop(&mut self) {
        // Restore even when the frame loop bailed out mid-paint.
        if write!(self.out, "{}{}", SHOW_CURSOR, LEAVE_ALT_SCREEN)
            .and_then(|_| self.out.flush())
            .is_err()
        {
            warn!("Driftfield: failed to restore terminal state on exit");
        }
    }
}
