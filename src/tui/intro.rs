//! The boot-log intro played once at the start of a session.
//!
//! Lines appear one per tick, with a longer pause before the last. The last
//! line arrives scrambled and settles while a cursor blinks beside it, then
//! the intro signals `Msg::IntroDone`. Any key finishes it on the spot.

use super::animation::{Cursor, Glitch, Timings};
use super::messages::{AnimId, Msg};
use super::runtime::Cmd;
use super::style::paint;
use super::theme::Theme;
use ratatui::style::Style;

/// Steps the closing glitch takes to settle.
const GLITCH_STEPS: u32 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootKind {
    System,
    Info,
    Success,
    Accent,
}

#[derive(Debug, Clone, Copy)]
pub struct BootLine {
    pub text: &'static str,
    pub kind: BootKind,
}

const fn line(text: &'static str, kind: BootKind) -> BootLine {
    BootLine { text, kind }
}

pub const BOOT_LINES: [BootLine; 14] = [
    line("POST: System initialization...", BootKind::System),
    line("BIOS v1.0.0 — terminal-portfolio", BootKind::System),
    line("Memory test: 128GB OK", BootKind::Info),
    line("Detecting hardware... AMD Ryzen AI MAX+ 395", BootKind::Info),
    line("GPU: Radeon 8060S (gfx1151) — 124GB VRAM allocated", BootKind::Info),
    line("Loading content modules...", BootKind::System),
    line("  [OK] about.json", BootKind::Success),
    line("  [OK] work.json", BootKind::Success),
    line("  [OK] cv.json", BootKind::Success),
    line("  [OK] links.json", BootKind::Success),
    line("  [OK] meta.json", BootKind::Success),
    line("Initializing theme engine... warm-minimalist loaded", BootKind::Info),
    line("Starting SSH listener on :2222...", BootKind::System),
    line("All systems nominal. Welcome.", BootKind::Accent),
];

pub struct Intro {
    id: AnimId,
    lines: &'static [BootLine],
    revealed: usize,
    holding: bool,
    done: bool,
    cursor: Cursor,
    glitch: Glitch,
    theme: Theme,
    timings: Timings,
}

impl Intro {
    pub fn new(theme: &Theme, timings: Timings) -> Self {
        Self {
            id: AnimId::next(),
            lines: &BOOT_LINES,
            revealed: 0,
            holding: false,
            done: false,
            cursor: Cursor::new(theme).with_interval(timings.cursor_blink),
            glitch: Glitch::new(GLITCH_STEPS, timings.glitch),
            theme: *theme,
            timings,
        }
    }

    pub fn init(&mut self) -> Cmd {
        Cmd::after(self.timings.intro_line, Msg::Tick(self.id))
    }

    pub fn update(&mut self, msg: &Msg) -> Cmd {
        if self.done {
            return Cmd::none();
        }
        match msg {
            Msg::Key(_) => self.finish(),
            Msg::Tick(id) if *id == self.id => self.step(),
            Msg::Tick(_) => Cmd::batch([self.cursor.update(msg), self.glitch.update(msg)]),
            _ => Cmd::none(),
        }
    }

    fn step(&mut self) -> Cmd {
        if self.holding {
            return self.finish();
        }
        self.revealed += 1;
        let total = self.lines.len();
        if self.revealed >= total {
            self.revealed = total;
            self.holding = true;
            return Cmd::batch([
                self.glitch.start(),
                self.cursor.start(),
                Cmd::after(self.timings.intro_hold, Msg::Tick(self.id)),
            ]);
        }
        let delay = if self.revealed + 1 == total {
            self.timings.intro_final
        } else {
            self.timings.intro_line
        };
        Cmd::after(delay, Msg::Tick(self.id))
    }

    fn finish(&mut self) -> Cmd {
        self.revealed = self.lines.len();
        self.done = true;
        self.holding = false;
        self.cursor.stop();
        Cmd::emit(Msg::IntroDone)
    }

    pub fn done(&self) -> bool {
        self.done
    }

    pub fn revealed(&self) -> usize {
        self.revealed
    }

    pub fn total(&self) -> usize {
        self.lines.len()
    }

    pub fn set_theme(&mut self, theme: &Theme) {
        self.theme = *theme;
        self.cursor.set_theme(theme);
    }

    pub fn view(&self) -> String {
        let last = self.lines.len().saturating_sub(1);
        let mut rows: Vec<String> = self.lines[..self.revealed]
            .iter()
            .enumerate()
            .map(|(i, boot)| {
                if i == last {
                    paint(self.style(boot.kind), &self.glitch.render(boot.text))
                } else {
                    paint(self.style(boot.kind), boot.text)
                }
            })
            .collect();
        if self.holding {
            if let Some(row) = rows.last_mut() {
                row.push(' ');
                row.push_str(&self.cursor.view());
            }
        }
        rows.join("\n")
    }

    fn style(&self, kind: BootKind) -> Style {
        match kind {
            BootKind::System => self.theme.body(),
            BootKind::Info => self.theme.muted(),
            BootKind::Success => self.theme.accent(),
            BootKind::Accent => self.theme.accent_bold(),
        }
    }
}
