//! The host loop that connects a [`Program`] to a real terminal.
//!
//! Wall-clock time drives the program's virtual clock: each turn of the loop
//! advances it to the time elapsed since start, redraws if the frame
//! changed, then sleeps until either input arrives or the next timer is due.

use super::messages::Msg;
use super::runtime::{Model, Program};
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEventKind,
};
use crossterm::style::Print;
use crossterm::terminal::{
    self, disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
    LeaveAlternateScreen, SetTitle,
};
use crossterm::{execute, queue};
use futures::StreamExt;
use std::io::{self, Stdout, Write};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Upper bound on a single wait so a quiet session still notices the
/// clock moving.
const MAX_WAIT: Duration = Duration::from_secs(1);

/// Raw mode, alternate screen and mouse capture for as long as it lives.
pub struct Terminal {
    stdout: Stdout,
    last_frame: Option<String>,
}

impl Terminal {
    pub fn new() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture, Hide)?;
        Ok(Self {
            stdout,
            last_frame: None,
        })
    }

    /// Run `program` until it asks to quit or input ends.
    pub async fn run<M: Model>(&mut self, program: &mut Program<M>) -> io::Result<()> {
        let started = Instant::now();
        let mut events = EventStream::new();

        program.start();
        let (cols, rows) = terminal::size()?;
        program.send(Msg::resize(usize::from(cols), usize::from(rows)));
        info!(cols, rows, "session started");

        loop {
            program.advance_to(started.elapsed());
            if let Some(title) = program.take_title() {
                execute!(self.stdout, SetTitle(&title))?;
            }
            if program.quit_requested() {
                break;
            }
            self.draw(&program.view())?;

            let wait = program
                .next_deadline()
                .map(|due| due.saturating_sub(started.elapsed()))
                .unwrap_or(MAX_WAIT)
                .min(MAX_WAIT);

            tokio::select! {
                event = events.next() => match event {
                    Some(Ok(event)) => {
                        // Render before any timer can fire so one-shot
                        // output from this input reaches the screen.
                        if let Some(msg) = translate(event) {
                            program.send(msg);
                            if !program.quit_requested() {
                                self.draw(&program.view())?;
                            }
                        }
                    }
                    Some(Err(err)) => {
                        warn!(error = %err, "terminal event error");
                        return Err(err);
                    }
                    None => {
                        debug!("input stream closed");
                        break;
                    }
                },
                _ = tokio::time::sleep(wait) => {}
            }
        }

        info!(elapsed_secs = started.elapsed().as_secs(), "session ended");
        Ok(())
    }

    fn draw(&mut self, frame: &str) -> io::Result<()> {
        if self.last_frame.as_deref() == Some(frame) {
            return Ok(());
        }
        let mut rows = 0u16;
        for (i, line) in frame.split('\n').enumerate() {
            let row = u16::try_from(i).unwrap_or(u16::MAX);
            queue!(self.stdout, MoveTo(0, row), Print(line), Clear(ClearType::UntilNewLine))?;
            rows = row.saturating_add(1);
        }
        queue!(self.stdout, MoveTo(0, rows), Clear(ClearType::FromCursorDown))?;
        self.stdout.flush()?;
        self.last_frame = Some(frame.to_string());
        Ok(())
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.stdout, DisableMouseCapture, LeaveAlternateScreen, Show);
    }
}

/// Map a crossterm event to an engine message. Key releases are dropped.
fn translate(event: Event) -> Option<Msg> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Release => None,
        Event::Key(key) => Some(Msg::Key(key)),
        Event::Mouse(mouse) => Some(Msg::Mouse(mouse)),
        Event::Resize(cols, rows) => Some(Msg::resize(usize::from(cols), usize::from(rows))),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyEventState, KeyModifiers};

    #[test]
    fn releases_are_dropped() {
        let release = KeyEvent {
            code: KeyCode::Char('j'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(translate(Event::Key(release)), None);
        let press = KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE);
        assert_eq!(translate(Event::Key(press)), Some(Msg::char('j')));
    }

    #[test]
    fn resize_becomes_message() {
        assert_eq!(translate(Event::Resize(80, 24)), Some(Msg::resize(80, 24)));
        assert_eq!(translate(Event::FocusGained), None);
    }
}
