//! Main TUI application
//!
//! [`App`] is the root controller. It owns the four sections and the chrome
//! around them (navbar, status bar, palette, help, idle warning, intro) and
//! routes every message to whichever of them should see it.

use super::animation::{Timings, Transition};
use super::help;
use super::idle::{Clock, IdleTracker, SystemClock};
use super::intro::Intro;
use super::keys::GlobalKey;
use super::messages::{Msg, Section};
use super::navbar::NavBar;
use super::palette::{Palette, PaletteAction};
use super::runtime::{Cmd, Model};
use super::sections::{CvSection, HomeSection, LinksSection, SectionView, WorkSection};
use super::statusbar::StatusBar;
use super::style::paint;
use super::text;
use super::theme::Theme;
use crate::content::Content;
use crossterm::event::{KeyEvent, MouseEvent};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Navbar, the blank row under it, and the status bar.
pub const CHROME_HEIGHT: usize = 3;
pub const MIN_WIDTH: usize = 20;
pub const MIN_HEIGHT: usize = 8;

/// Everything the host decides about a session before it starts.
pub struct AppOptions {
    pub theme: Theme,
    pub timings: Timings,
    /// Zero disables idle tracking.
    pub idle_timeout: Duration,
    pub show_intro: bool,
    pub clock: Box<dyn Clock>,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            theme: Theme::dark(),
            timings: Timings::default(),
            idle_timeout: Duration::from_secs(30 * 60),
            show_intro: true,
            clock: Box::new(SystemClock),
        }
    }
}

pub struct App {
    content: Arc<Content>,
    theme: Theme,
    width: usize,
    height: usize,
    active: Section,
    sections: Vec<Box<dyn SectionView>>,
    transition: Transition,
    navbar: NavBar,
    statusbar: StatusBar,
    palette: Palette,
    intro: Intro,
    idle: IdleTracker,
    show_intro: bool,
    show_help: bool,
}

impl App {
    pub fn new(content: Arc<Content>, options: AppOptions) -> Self {
        let AppOptions {
            theme,
            timings,
            idle_timeout,
            show_intro,
            clock,
        } = options;

        let sections: Vec<Box<dyn SectionView>> = vec![
            Box::new(HomeSection::new(content.clone(), &theme, &timings)),
            Box::new(WorkSection::new(content.clone(), &theme, &timings)),
            Box::new(CvSection::new(content.clone(), &theme)),
            Box::new(LinksSection::new(content.clone(), &theme, &timings)),
        ];

        Self {
            content,
            theme,
            width: 0,
            height: 0,
            active: Section::Home,
            sections,
            transition: Transition::new(timings.frame),
            navbar: NavBar::new(&theme, &timings),
            statusbar: StatusBar::new(&theme),
            palette: Palette::new(&theme),
            intro: Intro::new(&theme, timings),
            idle: IdleTracker::new(
                idle_timeout,
                timings.idle_warning,
                timings.idle_check,
                clock,
            ),
            show_intro,
            show_help: false,
        }
    }

    pub fn active(&self) -> Section {
        self.active
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn intro_showing(&self) -> bool {
        self.show_intro
    }

    pub fn help_showing(&self) -> bool {
        self.show_help
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn transitioning(&self) -> bool {
        self.transition.is_active()
    }

    pub fn transition(&self) -> &Transition {
        &self.transition
    }

    pub fn idle_warning_visible(&self) -> bool {
        self.idle.warning_visible()
    }

    pub fn idle_warning(&self) -> Option<Duration> {
        self.idle.warning()
    }

    fn section(&self, section: Section) -> &dyn SectionView {
        self.sections[section.ordinal()].as_ref()
    }

    fn section_mut(&mut self, section: Section) -> &mut dyn SectionView {
        self.sections[section.ordinal()].as_mut()
    }

    fn section_height(&self) -> usize {
        self.height.saturating_sub(CHROME_HEIGHT).max(1)
    }

    fn broadcast(&mut self, msg: &Msg) -> Cmd {
        Cmd::batch(self.sections.iter_mut().map(|s| s.update(msg)))
    }

    fn focus_active(&mut self) -> Cmd {
        let active = self.active;
        self.section_mut(active).update(&Msg::Focus)
    }

    fn handle_resize(&mut self, width: usize, height: usize) -> Cmd {
        self.width = width;
        self.height = height;
        self.navbar.set_width(width);
        self.statusbar.set_width(width);
        self.palette.set_width(width);
        let inner = Msg::resize(width, self.section_height());
        self.broadcast(&inner)
    }

    fn handle_tick(&mut self, msg: &Msg) -> Cmd {
        let mut cmds = vec![self.transition.update(msg), self.navbar.update(msg)];
        if self.show_intro {
            cmds.push(self.intro.update(msg));
        }
        cmds.push(self.broadcast(msg));
        Cmd::batch(cmds)
    }

    fn handle_intro_done(&mut self) -> Cmd {
        if !self.show_intro {
            return Cmd::none();
        }
        self.show_intro = false;
        debug!("intro finished");
        let active = self.active;
        let init = self.section_mut(active).init();
        Cmd::batch([init, self.focus_active()])
    }

    /// Switch to `target` with a transition. The new section is focused
    /// once the transition reports done.
    fn navigate_to(&mut self, target: Section) -> Cmd {
        if target == self.active || self.transition.is_active() {
            return Cmd::none();
        }
        debug!(from = %self.active, to = %target, "navigate");

        let from = self.active;
        let blur = self.section_mut(from).update(&Msg::Blur);
        let transition = self.transition.start(from, target);
        self.active = target;
        let glow = self.navbar.set_active(target);
        Cmd::batch([blur, transition, glow])
    }

    fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        self.navbar.set_theme(&theme);
        self.statusbar.set_theme(&theme);
        self.palette.set_theme(&theme);
        self.intro.set_theme(&theme);
        for section in &mut self.sections {
            section.set_theme(&theme);
        }
    }

    fn handle_palette_result(&mut self, action: PaletteAction) -> Cmd {
        self.palette.close();
        match action {
            PaletteAction::None => Cmd::none(),
            PaletteAction::Navigate(section) => self.navigate_to(section),
            PaletteAction::Quit => Cmd::Quit,
            PaletteAction::Help => {
                self.show_help = true;
                Cmd::none()
            }
            PaletteAction::ToggleTheme => {
                let theme = self.theme.toggled();
                info!(dark = theme.is_dark(), "theme toggled");
                self.set_theme(theme);
                Cmd::none()
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Cmd {
        self.idle.reset();
        let msg = Msg::Key(key);

        if self.show_intro {
            return self.intro.update(&msg);
        }
        if self.transition.is_active() {
            return Cmd::none();
        }
        if self.palette.is_open() {
            return self.palette.update(&msg);
        }
        if self.show_help {
            self.show_help = false;
            return Cmd::none();
        }

        match GlobalKey::from_key(&key) {
            Some(GlobalKey::Quit) => Cmd::Quit,
            Some(GlobalKey::Help) => {
                self.show_help = true;
                Cmd::none()
            }
            Some(GlobalKey::Palette) => {
                self.palette.open();
                Cmd::none()
            }
            Some(GlobalKey::Next) => self.navigate_to(self.active.next()),
            Some(GlobalKey::Prev) => self.navigate_to(self.active.prev()),
            Some(GlobalKey::Jump(section)) => self.navigate_to(section),
            None => {
                let active = self.active;
                self.section_mut(active).update(&msg)
            }
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> Cmd {
        self.idle.reset();
        if self.show_intro || self.transition.is_active() || self.palette.is_open() || self.show_help {
            return Cmd::none();
        }
        let active = self.active;
        self.section_mut(active).update(&Msg::Mouse(mouse))
    }

    fn too_small_view(&self) -> String {
        let title = paint(self.theme.accent(), "Terminal too small");
        let body = paint(
            self.theme.body(),
            &format!("Please resize to at least {MIN_WIDTH}\u{d7}{MIN_HEIGHT}"),
        );
        text::place(&format!("{title}\n{body}"), self.width, self.height)
    }

    fn status_view(&self) -> String {
        let section = self.section(self.active);
        let hints = section.key_hinter().map(|h| h.key_hints());
        let scroll = section
            .scroll_reporter()
            .map(|r| r.scroll_info())
            .unwrap_or_default();
        self.statusbar.render(self.active, hints.as_deref(), scroll)
    }

    fn section_rows(&self) -> Vec<String> {
        let height = self.section_height();
        let body = if self.transition.is_active() {
            let from = self.section(self.transition.from()).view();
            let to = self.section(self.transition.to()).view();
            self.transition.view(&from, &to, self.width)
        } else {
            self.section(self.active).view()
        };

        let mut rows: Vec<String> = body.split('\n').take(height).map(str::to_string).collect();
        rows.resize(height, String::new());

        // Overlays cover the bottom of the section area, palette lowest.
        let mut bottom = height;
        if self.palette.is_open() {
            let palette = self.palette.view();
            let lines: Vec<&str> = palette.split('\n').collect();
            let shown = &lines[lines.len().saturating_sub(bottom)..];
            let start = bottom - shown.len();
            for (row, line) in rows[start..bottom].iter_mut().zip(shown) {
                *row = (*line).to_string();
            }
            bottom = start;
        }
        if let Some(warning) = self.idle.view(&self.theme, self.width) {
            if bottom > 0 {
                rows[bottom - 1] = warning;
            }
        }
        rows
    }

    fn normal_view(&self) -> String {
        let mut rows = Vec::with_capacity(self.height);
        rows.push(self.navbar.view());
        rows.push(String::new());
        rows.extend(self.section_rows());
        rows.push(self.status_view());
        text::fit_block(&rows.join("\n"), self.width, self.height)
    }
}

impl Model for App {
    fn init(&mut self) -> Cmd {
        let meta = &self.content.meta;
        let title = Cmd::SetTitle(format!("{} — {}", meta.name, meta.title));
        let start = if self.show_intro {
            self.intro.init()
        } else {
            let active = self.active;
            let init = self.section_mut(active).init();
            Cmd::batch([init, self.focus_active()])
        };
        Cmd::batch([title, start, self.idle.start()])
    }

    fn update(&mut self, msg: Msg) -> Cmd {
        match msg {
            Msg::IdleCheck => self.idle.check(),
            Msg::Resize { width, height } => self.handle_resize(width, height),
            Msg::IntroDone => self.handle_intro_done(),
            Msg::TransitionDone => self.focus_active(),
            Msg::Tick(_) | Msg::TypewriterDone(_) => self.handle_tick(&msg),
            Msg::PaletteResult(action) => self.handle_palette_result(action),
            Msg::Navigate(section) => self.navigate_to(section),
            Msg::Mouse(mouse) => self.handle_mouse(mouse),
            Msg::Key(key) => self.handle_key(key),
            other => {
                if self.show_intro {
                    self.intro.update(&other)
                } else {
                    let active = self.active;
                    self.section_mut(active).update(&other)
                }
            }
        }
    }

    fn view(&self) -> String {
        if self.width < MIN_WIDTH || self.height < MIN_HEIGHT {
            return self.too_small_view();
        }
        if self.show_intro {
            return text::fit_block(&self.intro.view(), self.width, self.height);
        }
        if self.show_help {
            return help::render(&self.theme, self.width, self.height);
        }
        self.normal_view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::idle::ManualClock;
    use crate::tui::runtime::Program;
    use crossterm::event::KeyCode;
    use pretty_assertions::assert_eq;

    fn app(show_intro: bool) -> App {
        App::new(
            Arc::new(Content::fixture()),
            AppOptions {
                show_intro,
                clock: Box::new(ManualClock::new()),
                ..AppOptions::default()
            },
        )
    }

    fn running(width: usize, height: usize) -> Program<App> {
        let mut program = Program::new(app(false));
        program.start();
        program.send(Msg::resize(width, height));
        program
    }

    fn settle(program: &mut Program<App>) {
        while program.model().transitioning() {
            let Some(deadline) = program.next_deadline() else {
                break;
            };
            program.advance_to(deadline);
        }
    }

    #[test]
    fn init_sets_title_from_meta() {
        let mut program = Program::new(app(false));
        program.start();
        let content = Content::fixture();
        assert_eq!(
            program.take_title(),
            Some(format!("{} — {}", content.meta.name, content.meta.title))
        );
        assert_eq!(program.take_title(), None);
    }

    #[test]
    fn navigating_to_active_section_is_noop() {
        let mut app = app(false);
        app.init();
        app.update(Msg::resize(80, 24));
        let cmd = app.navigate_to(Section::Home);
        assert!(cmd.is_none());
        assert!(!app.transitioning());
        assert_eq!(app.active(), Section::Home);
    }

    #[test]
    fn navigation_ignored_during_transition() {
        let mut app = app(false);
        app.init();
        app.update(Msg::resize(80, 24));
        assert!(!app.update(Msg::char('2')).is_none());
        assert!(app.transitioning());
        assert_eq!(app.active(), Section::Work);

        assert!(app.navigate_to(Section::Links).is_none());
        assert!(app.update(Msg::Navigate(Section::Cv)).is_none());
        assert_eq!(app.active(), Section::Work);
        assert_eq!(app.transition().to(), Section::Work);
    }

    #[test]
    fn keys_swallowed_while_transitioning() {
        let mut program = running(80, 24);
        program.send(Msg::char('3'));
        program.send(Msg::char('q'));
        assert!(!program.quit_requested());
        settle(&mut program);
        program.send(Msg::char('q'));
        assert!(program.quit_requested());
    }

    #[test]
    fn tab_cycles_sections() {
        let mut program = running(80, 24);
        program.send(Msg::key(KeyCode::Tab));
        settle(&mut program);
        assert_eq!(program.model().active(), Section::Work);
        program.send(Msg::key(KeyCode::BackTab));
        settle(&mut program);
        program.send(Msg::key(KeyCode::BackTab));
        settle(&mut program);
        assert_eq!(program.model().active(), Section::Links);
    }

    #[test]
    fn theme_toggle_reaches_every_component() {
        let mut program = running(80, 24);
        assert!(program.model().theme().is_dark());
        let before = program.view();
        program.send(Msg::PaletteResult(PaletteAction::ToggleTheme));
        assert!(!program.model().theme().is_dark());
        let after = program.view();
        assert_ne!(before, after);
        assert_eq!(text::strip_ansi(&before), text::strip_ansi(&after));
    }

    #[test]
    fn too_small_terminal() {
        let program = running(19, 24);
        let view = text::strip_ansi(&program.view()).into_owned();
        assert!(view.contains("Terminal too small"));
        assert!(view.contains("20×8"));
        assert!(!view.contains("~/home"));

        let program = running(80, 7);
        assert!(text::strip_ansi(&program.view()).contains("Terminal too small"));
    }

    #[test]
    fn frame_is_exactly_terminal_sized() {
        for (w, h) in [(20, 8), (40, 15), (80, 24), (120, 40)] {
            let mut program = running(w, h);
            let check = |view: String| {
                let lines: Vec<&str> = view.split('\n').collect();
                assert_eq!(lines.len(), h, "{w}x{h}");
                assert!(lines.iter().all(|l| text::width(l) == w), "{w}x{h}");
            };
            check(program.view());
            program.send(Msg::char(':'));
            check(program.view());
            program.send(Msg::key(KeyCode::Esc));
            program.send(Msg::char('4'));
            check(program.view());
            settle(&mut program);
            check(program.view());
        }
    }

    #[test]
    fn navbar_and_status_frame_the_section() {
        let program = running(80, 24);
        let view = text::strip_ansi(&program.view()).into_owned();
        let lines: Vec<&str> = view.split('\n').collect();
        assert!(lines[0].contains("[1:home]"));
        assert_eq!(lines[1].trim(), "");
        assert!(lines[23].contains("~/home"));
    }

    #[test]
    fn help_toggles_and_any_key_dismisses() {
        let mut program = running(80, 24);
        program.send(Msg::char('?'));
        assert!(program.model().help_showing());
        assert!(text::strip_ansi(&program.view()).contains("Keyboard Shortcuts"));
        program.send(Msg::char('2'));
        assert!(!program.model().help_showing());
        assert_eq!(program.model().active(), Section::Home);
    }

    #[test]
    fn palette_overlays_bottom_of_section() {
        let mut program = running(80, 24);
        program.send(Msg::char(':'));
        assert!(program.model().palette().is_open());
        let view = text::strip_ansi(&program.view()).into_owned();
        let lines: Vec<&str> = view.split('\n').collect();
        assert!(lines[22].starts_with('└'));
        assert!(lines[23].contains("~/home"));
    }

    #[test]
    fn palette_help_command_shows_help() {
        let mut program = running(80, 24);
        program.send(Msg::char(':'));
        for c in "help".chars() {
            program.send(Msg::char(c));
        }
        program.send(Msg::key(KeyCode::Enter));
        assert!(!program.model().palette().is_open());
        assert!(program.model().help_showing());
    }

    #[test]
    fn mouse_ignored_under_overlays() {
        let mut program = running(80, 10);
        program.send(Msg::char('3'));
        settle(&mut program);
        program.send(Msg::char('?'));
        program.send(Msg::wheel(false));
        program.send(Msg::key(KeyCode::Esc));
        let top = text::strip_ansi(&program.view()).into_owned();
        assert!(top.contains("CV TOP"));
    }

    #[test]
    fn sections_get_height_minus_chrome() {
        let mut app = app(false);
        app.update(Msg::resize(80, 24));
        assert_eq!(app.section_height(), 21);
        app.update(Msg::resize(80, 2));
        assert_eq!(app.section_height(), 1);
    }

    #[test]
    fn intro_view_fills_screen() {
        let mut program = Program::new(app(true));
        program.start();
        program.send(Msg::resize(60, 20));
        assert!(program.model().intro_showing());
        let view = program.view();
        assert_eq!(view.split('\n').count(), 20);
        program.send(Msg::char('x'));
        assert!(!program.model().intro_showing());
    }
}
