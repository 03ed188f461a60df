//! Home: portrait, name, one-liner, bio and contact details.
//!
//! ```text
//! ⣿⣿⣿⢿⣿⣿⣿⠿⠿⣟⡻⢿⣿⡿⢿⣿⣽⣻⣿⣻⢬⣹    Ada Example
//! ⣿⡟⡼⢠⣈⡵⣉⠔⡒⠂⠡⢨⡉⣛⢫⡛⢷⣯⢿⡝⡧⢸    Systems engineer...
//! ...                             Status Open to work
//! ```
//!
//! Wide terminals get the portrait beside the text; narrow ones a stacked
//! column without it. The first time the section is focused its lines stream
//! in one per tick; any input finishes the reveal at once and it never plays
//! again.

use super::{scroll_hints, scroll_viewport, wheel, KeyHinter, ScrollReporter, SectionView};
use crate::content::Content;
use crate::tui::animation::{GradientAnim, Shimmer, Timings, Typewriter};
use crate::tui::borders::render_divider;
use crate::tui::density::Density;
use crate::tui::keys::NavKey;
use crate::tui::messages::{AnimId, Msg};
use crate::tui::runtime::Cmd;
use crate::tui::statusbar::ScrollInfo;
use crate::tui::style::paint;
use crate::tui::text;
use crate::tui::theme::Theme;
use crate::tui::viewport::Viewport;
use std::sync::Arc;
use std::time::Duration;

/// Content width from which the portrait sits beside the text.
const PORTRAIT_MIN_WIDTH: usize = 80;
/// Rows moved per line-scroll key or wheel notch.
const SCROLL_STEP: usize = 3;
/// Narrowest the text column beside the portrait gets.
const MIN_RIGHT_COLUMN: usize = 20;

/// Braille halftone portrait, 20 columns by 14 rows.
pub const PORTRAIT: &str = "\
⣿⣿⣿⢿⣿⣿⣿⠿⠿⣟⡻⢿⣿⡿⢿⣿⣽⣻⣿⣻⢬⣹
⣿⡟⡼⢠⣈⡵⣉⠔⡒⠂⠡⢨⡉⣛⢫⡛⢷⣯⢿⡝⡧⢸
⣿⣎⡝⣻⠿⡖⠉⣄⣤⣤⣤⣄⣁⣙⠠⠽⢾⣯⣿⠗⡡⢻
⣿⣿⣞⡴⣾⠁⣰⣿⡿⣛⢿⡿⠟⣿⣷⡄⠺⣿⣯⡝⡆⢹
⣿⣿⣿⣿⣿⡆⣿⣻⣵⣼⣫⣾⡵⣌⣿⣷⣸⣿⣳⢿⡌⣹
⢸⣿⣿⣿⣿⠇⢛⡉⠙⡒⠿⠯⠙⢉⠉⣛⠿⢿⣿⣯⡓⢸
⢘⣿⣿⣿⣏⡀⣿⣭⠁⡘⣰⣆⠁⠉⣽⣿⠀⣿⡟⢦⠁⢸
⠈⣿⢷⣻⣿⠄⣮⣙⣉⢥⡟⣿⡮⡙⣛⣵⣀⣿⡿⢎⠛⠺
⢠⢻⡷⣎⡿⠷⣼⣿⡧⠜⠣⠞⢣⢈⣿⣿⠘⣿⠆⢤⣷⢒
⢰⣿⣿⠟⡡⠂⢸⣯⢀⣴⣤⣤⣦⠀⢻⡏⢀⣿⡧⠘⣿⣯
⢹⣿⢩⢾⠀⢀⡈⡷⢾⢿⣉⣩⣿⣥⠟⠀⣰⡏⢉⢉⠛⠿
⣺⡏⢱⣻⣀⠈⢧⣿⣮⡟⣁⠇⠛⣣⠆⡀⠹⣿⣦⣄⡉⠒
⡷⠌⠀⣹⡻⣦⡈⣿⢽⣿⢷⣖⣾⠟⠁⢀⣼⡿⢏⡛⠻⣷
⣴⣾⡟⠁⣷⣌⠻⠌⠛⢿⠟⠚⢋⣐⣿⠿⡏⣀⠘⢿⡳⢮";

pub struct HomeSection {
    content: Arc<Content>,
    theme: Theme,
    viewport: Viewport,
    shimmer: Shimmer,
    name: GradientAnim,
    tagline: Typewriter,
    reveal_id: AnimId,
    reveal_interval: Duration,
    height: usize,
    focused: bool,
    /// Lines shown so far while the reveal runs.
    reveal_lines: usize,
    reveal_done: bool,
    /// Set once the first reveal has finished, so it never replays.
    has_revealed: bool,
}

impl HomeSection {
    pub fn new(content: Arc<Content>, theme: &Theme, timings: &Timings) -> Self {
        let tagline = Typewriter::new(&content.meta.one_liner, 1).with_interval(timings.typewriter);
        Self {
            theme: *theme,
            viewport: Viewport::new(0, 0),
            shimmer: Shimmer::new(theme).with_interval(timings.frame),
            name: GradientAnim::new(theme).with_interval(timings.gradient),
            tagline,
            reveal_id: AnimId::next(),
            reveal_interval: timings.reveal,
            height: 0,
            focused: false,
            reveal_lines: 0,
            reveal_done: true,
            has_revealed: false,
            content,
        }
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn revealing(&self) -> bool {
        !self.reveal_done
    }

    pub fn shimmering(&self) -> bool {
        self.shimmer.is_active()
    }

    fn focus(&mut self) -> Cmd {
        self.focused = true;
        self.viewport.scroll_to_top();
        let mut cmds = vec![self.shimmer.start(), self.name.start()];
        if !self.has_revealed {
            self.reveal_lines = 1;
            self.reveal_done = false;
            self.viewport.set_content(&self.build_content());
            cmds.push(self.tagline.start());
            cmds.push(Cmd::after(self.reveal_interval, Msg::Tick(self.reveal_id)));
        } else {
            self.refresh();
        }
        Cmd::batch(cmds)
    }

    fn blur(&mut self) {
        self.focused = false;
        self.shimmer.stop();
        self.name.stop();
        self.complete_reveal();
    }

    fn reveal_step(&mut self) -> Cmd {
        if self.reveal_done {
            return Cmd::none();
        }
        self.reveal_lines += 1;
        let full = self.build_full_content();
        if self.reveal_lines >= full.split('\n').count() {
            self.reveal_done = true;
            self.has_revealed = true;
            self.viewport.set_content_preserve_scroll(&full);
            return Cmd::none();
        }
        self.refresh();
        Cmd::after(self.reveal_interval, Msg::Tick(self.reveal_id))
    }

    /// Finish the reveal and the typing on the spot.
    fn complete_reveal(&mut self) {
        self.tagline.skip();
        if self.reveal_done {
            self.refresh();
            return;
        }
        self.reveal_done = true;
        self.has_revealed = true;
        self.refresh();
    }

    fn refresh(&mut self) {
        let content = self.build_content();
        self.viewport.set_content_preserve_scroll(&content);
    }

    fn handle_input(&mut self, msg: &Msg) {
        self.complete_reveal();
        match msg {
            Msg::Key(key) => {
                if let Some(nav) = NavKey::from_key(key) {
                    scroll_viewport(&mut self.viewport, nav, SCROLL_STEP);
                }
            }
            _ => match wheel(msg) {
                Some(true) => self.viewport.scroll_up(SCROLL_STEP),
                Some(false) => self.viewport.scroll_down(SCROLL_STEP),
                None => {}
            },
        }
    }

    /// The visible part of the content while the reveal runs.
    fn build_content(&self) -> String {
        let full = self.build_full_content();
        if self.reveal_done {
            return full;
        }
        full.split('\n').take(self.reveal_lines).collect::<Vec<_>>().join("\n")
    }

    fn build_full_content(&self) -> String {
        let width = self.viewport.content_width().max(1);
        if width >= PORTRAIT_MIN_WIDTH {
            self.render_side_by_side(width)
        } else {
            self.render_stacked(width)
        }
    }

    fn styled_portrait(&self) -> String {
        if self.shimmer.is_active() {
            let width = PORTRAIT.lines().next().map(text::width).unwrap_or(0);
            self.shimmer.render(PORTRAIT, width)
        } else {
            PORTRAIT
                .split('\n')
                .map(|line| paint(self.theme.muted(), line))
                .collect::<Vec<_>>()
                .join("\n")
        }
    }

    fn render_side_by_side(&self, width: usize) -> String {
        let portrait = self.styled_portrait();
        let portrait_width = text::width(PORTRAIT.lines().next().unwrap_or(""));

        let remaining = width as isize - portrait_width as isize - 30;
        let gap = if remaining > 12 {
            6
        } else if remaining < 6 {
            2
        } else {
            4
        };
        let column = width
            .saturating_sub(portrait_width + gap)
            .max(MIN_RIGHT_COLUMN);

        let mut lines = self.header_lines(column);
        lines.push(String::new());
        let bio = &self.content.about.bio;
        if !bio.is_empty() {
            lines.extend(text::wrap(bio, column.max(10)).iter().map(|l| paint(self.theme.body(), l)));
        }
        lines.push(String::new());
        let info = self.render_info();
        if !info.is_empty() {
            lines.push(info);
        }

        let right = lines.join("\n");
        text::join_horizontal(&[&portrait, &" ".repeat(gap), &right])
    }

    fn render_stacked(&self, width: usize) -> String {
        let sep = Density::for_height(self.height).separator();
        let mut header = self.header_lines(width);
        header.push(render_divider(&self.theme, width.min(40)));

        let mut blocks = vec![header.join("\n")];
        let bio = &self.content.about.bio;
        if !bio.is_empty() {
            let wrapped = text::wrap(bio, width);
            blocks.push(paint(self.theme.body(), &wrapped.join("\n")));
        }
        let info = self.render_info();
        if !info.is_empty() {
            blocks.push(info);
        }
        text::pad_lines(&blocks.join(sep), width)
    }

    /// Gradient name plus the typed one-liner. The one-liner keeps its full
    /// wrapped height while typing so the layout never jumps.
    fn header_lines(&self, width: usize) -> Vec<String> {
        let mut lines = vec![self.name.render(&self.content.meta.name)];
        let tagline = &self.content.meta.one_liner;
        if !tagline.is_empty() {
            let mut shown = self.tagline.position();
            for line in text::wrap(tagline, width.max(10)) {
                let n = line.chars().count();
                let typed: String = line.chars().take(shown).collect();
                shown = shown.saturating_sub(n + 1);
                lines.push(paint(self.theme.muted(), &typed));
            }
        }
        lines
    }

    fn render_info(&self) -> String {
        let about = &self.content.about;
        let site = self.content.meta.site_url.trim_start_matches("https://");
        [("Status", about.status.as_str()), ("Email", about.email.as_str()), ("Web", site)]
            .into_iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(label, value)| {
                format!("{} {}", paint(self.theme.accent(), label), paint(self.theme.body(), value))
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl SectionView for HomeSection {
    fn update(&mut self, msg: &Msg) -> Cmd {
        match msg {
            Msg::Resize { width, height } => {
                self.height = *height;
                self.viewport.set_size(*width, *height);
                self.refresh();
                Cmd::none()
            }
            Msg::Focus => self.focus(),
            Msg::Blur => {
                self.blur();
                Cmd::none()
            }
            Msg::Tick(id) if *id == self.reveal_id => self.reveal_step(),
            Msg::Tick(_) | Msg::TypewriterDone(_) => {
                let cmd = Cmd::batch([
                    self.shimmer.update(msg),
                    self.name.update(msg),
                    self.tagline.update(msg),
                ]);
                if !cmd.is_none() {
                    self.refresh();
                }
                cmd
            }
            Msg::Key(_) | Msg::Mouse(_) if self.focused => {
                self.handle_input(msg);
                Cmd::none()
            }
            _ => Cmd::none(),
        }
    }

    fn view(&self) -> String {
        self.viewport.view_with_scrollbar(&self.theme)
    }

    fn set_theme(&mut self, theme: &Theme) {
        self.theme = *theme;
        self.shimmer.set_theme(theme);
        self.name.set_theme(theme);
        self.refresh();
    }

    fn key_hinter(&self) -> Option<&dyn KeyHinter> {
        Some(self)
    }

    fn scroll_reporter(&self) -> Option<&dyn ScrollReporter> {
        Some(self)
    }
}

impl KeyHinter for HomeSection {
    fn key_hints(&self) -> String {
        scroll_hints()
    }
}

impl ScrollReporter for HomeSection {
    fn scroll_info(&self) -> ScrollInfo {
        self.viewport.scroll_info()
    }
}
