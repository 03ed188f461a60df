//! Command palette
//!
//! `:` opens a one-line prompt. Enter runs the typed command, matched
//! exactly after trimming; an unknown name shows an error and keeps the
//! palette open. Escape, or Enter on an empty prompt, closes it with no
//! action.

use super::borders::{BOTTOM_LEFT, BOTTOM_RIGHT, HORIZONTAL, TOP_LEFT, TOP_RIGHT, VERTICAL};
use super::messages::{Msg, Section};
use super::runtime::Cmd;
use super::style::paint;
use super::text;
use super::theme::Theme;
use crossterm::event::{KeyCode, KeyModifiers};
use std::fmt;
use tracing::debug;

/// Below this width the palette is a bare prompt with no frame.
const MIN_FRAMED_WIDTH: usize = 20;
/// Below this width the hint line is dropped.
const MIN_HINT_WIDTH: usize = 40;

/// What a palette command asks the root controller to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteAction {
    /// Dismissed without a command.
    None,
    Navigate(Section),
    ToggleTheme,
    Quit,
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteCommand {
    Home,
    Work,
    Cv,
    Links,
    Theme,
    Quit,
    Help,
}

impl PaletteCommand {
    pub fn all() -> &'static [PaletteCommand] {
        &[
            PaletteCommand::Home,
            PaletteCommand::Work,
            PaletteCommand::Cv,
            PaletteCommand::Links,
            PaletteCommand::Theme,
            PaletteCommand::Quit,
            PaletteCommand::Help,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            PaletteCommand::Home => "home",
            PaletteCommand::Work => "work",
            PaletteCommand::Cv => "cv",
            PaletteCommand::Links => "links",
            PaletteCommand::Theme => "theme",
            PaletteCommand::Quit => "quit",
            PaletteCommand::Help => "help",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            PaletteCommand::Home => "Go to home",
            PaletteCommand::Work => "Go to work",
            PaletteCommand::Cv => "Go to cv",
            PaletteCommand::Links => "Go to links",
            PaletteCommand::Theme => "Toggle dark/light theme",
            PaletteCommand::Quit => "End the session",
            PaletteCommand::Help => "Show keyboard shortcuts",
        }
    }

    pub fn action(&self) -> PaletteAction {
        match self {
            PaletteCommand::Home => PaletteAction::Navigate(Section::Home),
            PaletteCommand::Work => PaletteAction::Navigate(Section::Work),
            PaletteCommand::Cv => PaletteAction::Navigate(Section::Cv),
            PaletteCommand::Links => PaletteAction::Navigate(Section::Links),
            PaletteCommand::Theme => PaletteAction::ToggleTheme,
            PaletteCommand::Quit => PaletteAction::Quit,
            PaletteCommand::Help => PaletteAction::Help,
        }
    }

    /// Exact, case-sensitive lookup. `q` is kept as a short alias for quit.
    pub fn parse(name: &str) -> Option<PaletteCommand> {
        if name == "q" {
            return Some(PaletteCommand::Quit);
        }
        Self::all().iter().find(|cmd| cmd.name() == name).copied()
    }

    pub fn matches(prefix: &str) -> Vec<PaletteCommand> {
        Self::all()
            .iter()
            .filter(|cmd| cmd.name().starts_with(prefix))
            .copied()
            .collect()
    }
}

impl fmt::Display for PaletteCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ":{}", self.name())
    }
}

#[derive(Debug, Clone)]
pub struct Palette {
    visible: bool,
    input: String,
    error: Option<String>,
    theme: Theme,
    width: usize,
}

impl Palette {
    pub fn new(theme: &Theme) -> Self {
        Self {
            visible: false,
            input: String::new(),
            error: None,
            theme: *theme,
            width: 0,
        }
    }

    pub fn open(&mut self) {
        self.visible = true;
        self.input.clear();
        self.error = None;
    }

    pub fn close(&mut self) {
        self.visible = false;
        self.input.clear();
        self.error = None;
    }

    pub fn is_open(&self) -> bool {
        self.visible
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_theme(&mut self, theme: &Theme) {
        self.theme = *theme;
    }

    pub fn set_width(&mut self, width: usize) {
        self.width = width;
    }

    /// Handle a key while open. Results arrive as `Msg::PaletteResult`.
    pub fn update(&mut self, msg: &Msg) -> Cmd {
        if !self.visible {
            return Cmd::none();
        }
        let Msg::Key(key) = msg else {
            return Cmd::none();
        };

        match key.code {
            KeyCode::Esc => self.dismiss(),
            KeyCode::Enter if self.input.is_empty() => self.dismiss(),
            KeyCode::Enter => self.execute(),
            KeyCode::Backspace => {
                if self.input.pop().is_some() {
                    self.error = None;
                }
                Cmd::none()
            }
            KeyCode::Char(c) if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
                self.input.push(c);
                self.error = None;
                Cmd::none()
            }
            _ => Cmd::none(),
        }
    }

    fn dismiss(&mut self) -> Cmd {
        self.close();
        Cmd::emit(Msg::PaletteResult(PaletteAction::None))
    }

    fn execute(&mut self) -> Cmd {
        let typed = self.input.trim().to_string();
        match PaletteCommand::parse(&typed) {
            Some(cmd) => {
                debug!(command = cmd.name(), "palette command");
                self.close();
                Cmd::emit(Msg::PaletteResult(cmd.action()))
            }
            None => {
                debug!(input = %typed, "unknown palette command");
                self.error = Some(format!("unknown: {typed}"));
                self.input.clear();
                Cmd::none()
            }
        }
    }

    fn hint(&self) -> String {
        let prefix = self.input.trim();
        let matches = PaletteCommand::matches(prefix);
        if matches.is_empty() {
            return String::new();
        }
        matches.iter().map(PaletteCommand::name).collect::<Vec<_>>().join(" ")
    }

    /// The palette block, `width` columns wide. Empty while closed.
    pub fn view(&self) -> String {
        if !self.visible {
            return String::new();
        }

        let accent = self.theme.accent();
        let prompt = format!(
            "{}{}{}",
            paint(accent, ":"),
            paint(self.theme.body(), &self.input),
            paint(accent, "█")
        );

        let width = self.width.max(1);
        if width < MIN_FRAMED_WIDTH {
            return prompt;
        }

        let border = self.theme.border();
        let inner = width - 4;
        let side = paint(border, VERTICAL);
        let row = |content: &str| format!("{side} {} {side}", text::fit(content, inner));

        let mut lines = vec![
            paint(border, &format!("{TOP_LEFT}{}{TOP_RIGHT}", HORIZONTAL.repeat(inner + 2))),
            row(&prompt),
        ];
        if width >= MIN_HINT_WIDTH {
            let info = match &self.error {
                Some(err) => paint(accent, err),
                None => paint(self.theme.muted(), &self.hint()),
            };
            lines.push(row(&info));
        }
        lines.push(paint(border, &format!("{BOTTOM_LEFT}{}{BOTTOM_RIGHT}", HORIZONTAL.repeat(inner + 2))));
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn typed(palette: &mut Palette, s: &str) {
        for c in s.chars() {
            palette.update(&Msg::char(c));
        }
    }

    fn open(width: usize) -> Palette {
        let mut palette = Palette::new(&Theme::dark());
        palette.set_width(width);
        palette.open();
        palette
    }

    #[test]
    fn parse_is_exact() {
        assert_eq!(PaletteCommand::parse("work"), Some(PaletteCommand::Work));
        assert_eq!(PaletteCommand::parse("q"), Some(PaletteCommand::Quit));
        assert_eq!(PaletteCommand::parse("Work"), None);
        assert_eq!(PaletteCommand::parse("wor"), None);
    }

    #[test]
    fn enter_runs_command_and_closes() {
        let mut palette = open(60);
        typed(&mut palette, "  work ");
        let cmd = palette.update(&Msg::key(KeyCode::Enter));
        assert_eq!(cmd, Cmd::emit(Msg::PaletteResult(PaletteAction::Navigate(Section::Work))));
        assert!(!palette.is_open());
    }

    #[test]
    fn unknown_command_stays_open() {
        let mut palette = open(60);
        typed(&mut palette, "nope");
        assert!(palette.update(&Msg::key(KeyCode::Enter)).is_none());
        assert!(palette.is_open());
        assert_eq!(palette.error(), Some("unknown: nope"));
        assert_eq!(palette.input(), "");
        assert!(text::strip_ansi(&palette.view()).contains("unknown: nope"));

        typed(&mut palette, "t");
        assert_eq!(palette.error(), None);
    }

    #[test]
    fn empty_enter_and_escape_dismiss() {
        let mut palette = open(60);
        assert_eq!(
            palette.update(&Msg::key(KeyCode::Enter)),
            Cmd::emit(Msg::PaletteResult(PaletteAction::None))
        );
        assert!(!palette.is_open());

        palette.open();
        typed(&mut palette, "he");
        assert_eq!(
            palette.update(&Msg::key(KeyCode::Esc)),
            Cmd::emit(Msg::PaletteResult(PaletteAction::None))
        );
        assert!(!palette.is_open());
    }

    #[test]
    fn backspace_edits() {
        let mut palette = open(60);
        typed(&mut palette, "cvx");
        palette.update(&Msg::key(KeyCode::Backspace));
        assert_eq!(palette.input(), "cv");
        assert_eq!(
            palette.update(&Msg::key(KeyCode::Enter)),
            Cmd::emit(Msg::PaletteResult(PaletteAction::Navigate(Section::Cv)))
        );
    }

    #[test]
    fn closed_palette_ignores_keys() {
        let mut palette = Palette::new(&Theme::dark());
        assert!(palette.update(&Msg::char('w')).is_none());
        assert_eq!(palette.view(), "");
    }

    #[test]
    fn view_sizes() {
        let wide = open(60).view();
        assert_eq!(wide.split('\n').count(), 4);
        for line in wide.split('\n') {
            assert_eq!(text::width(line), 60);
        }
        assert!(text::strip_ansi(&wide).contains("home work cv links theme quit help"));

        assert_eq!(open(30).view().split('\n').count(), 3);
        assert_eq!(text::strip_ansi(&open(10).view()), ":█");
    }

    #[test]
    fn hint_filters_by_prefix() {
        let mut palette = open(60);
        typed(&mut palette, "h");
        let plain = text::strip_ansi(&palette.view()).into_owned();
        assert!(plain.contains("home help"));
        assert!(!plain.contains("work"));
    }
}
