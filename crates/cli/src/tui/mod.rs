pub mod actions;

use std::io::{self, stdout, Write};
use std::time::Duration;

use crossterm::{
    event::{self, Event},
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};

use sheetlens_config::{Settings, ThemePreference};
use sheetlens_core::{PageView, TableStore};

use crate::util;
use actions::Action;

/// Terminal colors for one theme. The pair mirrors the persisted
/// dark/light preference.
struct Palette {
    title_fg: Color,
    title_bg: Color,
    header_fg: Color,
    text_fg: Color,
    dim_fg: Color,
    status_fg: Color,
    status_bg: Color,
    popup_fg: Color,
    popup_bg: Color,
}

impl Palette {
    fn dark() -> Self {
        Self {
            title_fg: Color::Black,
            title_bg: Color::Cyan,
            header_fg: Color::Cyan,
            text_fg: Color::Gray,
            dim_fg: Color::DarkGray,
            status_fg: Color::Black,
            status_bg: Color::DarkGray,
            popup_fg: Color::White,
            popup_bg: Color::Black,
        }
    }

    fn light() -> Self {
        Self {
            title_fg: Color::White,
            title_bg: Color::Blue,
            header_fg: Color::Blue,
            text_fg: Color::Black,
            dim_fg: Color::DarkGray,
            status_fg: Color::White,
            status_bg: Color::DarkGray,
            popup_fg: Color::Black,
            popup_bg: Color::White,
        }
    }

    fn for_preference(theme: ThemePreference) -> Self {
        if theme.is_dark() {
            Self::dark()
        } else {
            Self::light()
        }
    }
}

/// Interactive viewer state. All behavior flows through `apply`; the event
/// loop only translates keys and redraws.
pub struct ViewerApp {
    store: TableStore,
    /// Cached view of the current page; refreshed whenever the page changes
    view: PageView,
    /// Column widths for the current page (display columns, clamped to [3, 40])
    col_widths: Vec<usize>,
    file_name: String,
    theme: ThemePreference,
    theme_dirty: bool,
    /// Scroll offset within the current page, in rows
    scroll_row: usize,
    /// First visible column index
    scroll_col: usize,
    should_quit: bool,
    show_help: bool,
}

impl ViewerApp {
    pub fn new(store: TableStore, file_name: String, theme: ThemePreference) -> Self {
        let view = store.current_view();
        let col_widths = compute_widths(&view);
        Self {
            store,
            view,
            col_widths,
            file_name,
            theme,
            theme_dirty: false,
            scroll_row: 0,
            scroll_col: 0,
            should_quit: false,
            show_help: false,
        }
    }

    pub fn view(&self) -> &PageView {
        &self.view
    }

    pub fn theme(&self) -> ThemePreference {
        self.theme
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// True once after each theme toggle; the caller persists the
    /// preference at that point.
    pub fn take_theme_dirty(&mut self) -> bool {
        std::mem::take(&mut self.theme_dirty)
    }

    fn refresh_view(&mut self) {
        self.view = self.store.current_view();
        self.col_widths = compute_widths(&self.view);
        self.scroll_row = 0;
        self.scroll_col = 0;
    }

    pub fn apply(&mut self, action: Action) {
        if self.show_help {
            // Any action dismisses help
            self.show_help = false;
            return;
        }

        match action {
            Action::Quit => self.should_quit = true,
            Action::ToggleHelp => self.show_help = true,
            Action::NextPage => {
                let before = self.store.current_page();
                self.store.next_page();
                if self.store.current_page() != before {
                    self.refresh_view();
                }
            }
            Action::PrevPage => {
                let before = self.store.current_page();
                self.store.prev_page();
                if self.store.current_page() != before {
                    self.refresh_view();
                }
            }
            Action::ScrollUp => self.scroll_row = self.scroll_row.saturating_sub(1),
            Action::ScrollDown => {
                if !self.view.rows.is_empty() {
                    self.scroll_row = (self.scroll_row + 1).min(self.view.rows.len() - 1);
                }
            }
            Action::ScrollLeft => self.scroll_col = self.scroll_col.saturating_sub(1),
            Action::ScrollRight => {
                if self.view.total_cols > 0 {
                    self.scroll_col = (self.scroll_col + 1).min(self.view.total_cols - 1);
                }
            }
            Action::JumpTop => self.scroll_row = 0,
            Action::JumpBottom => {
                if !self.view.rows.is_empty() {
                    self.scroll_row = self.view.rows.len() - 1;
                }
            }
            Action::ToggleTheme => {
                self.theme = self.theme.toggled();
                self.theme_dirty = true;
            }
        }
    }

    /// Width of the row-number gutter, from the largest row ordinal shown.
    fn row_num_width(&self) -> usize {
        let max_ordinal = self.view.range_end.max(1);
        let digits = (max_ordinal as f64).log10().floor() as usize + 1;
        digits.max(3) + 1
    }

    /// Which columns fit in `available` display columns, starting at `start_col`.
    fn visible_columns(&self, start_col: usize, available: usize) -> Vec<usize> {
        let mut cols = Vec::new();
        let mut used = 0usize;
        for c in start_col..self.view.total_cols {
            let w = self.col_widths.get(c).copied().unwrap_or(3) + 1;
            if used + w > available && !cols.is_empty() {
                break;
            }
            used += w;
            cols.push(c);
        }
        cols
    }

    fn draw(&self, frame: &mut Frame) {
        let palette = Palette::for_preference(self.theme);
        let area = frame.area();
        let chunks = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);

        self.draw_title(frame, chunks[0], &palette);
        self.draw_grid(frame, chunks[1], &palette);
        self.draw_status(frame, chunks[2], &palette);

        if self.show_help {
            self.draw_help(frame, area, &palette);
        }
    }

    fn draw_title(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let title = format!(
            " slens: {} | {} rows x {} cols ",
            self.file_name, self.view.total_rows, self.view.total_cols
        );
        let para = Paragraph::new(Line::from(vec![Span::styled(
            title,
            Style::default()
                .fg(palette.title_fg)
                .bg(palette.title_bg)
                .add_modifier(Modifier::BOLD),
        )]))
        .style(Style::default().bg(palette.title_bg));
        frame.render_widget(para, area);
    }

    fn draw_grid(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        if self.view.is_empty() {
            let msg = Paragraph::new("No data available yet.")
                .style(Style::default().fg(palette.dim_fg));
            frame.render_widget(msg, area);
            return;
        }

        let row_num_width = self.row_num_width();
        let grid_available = (area.width as usize).saturating_sub(row_num_width + 1);
        let vis_cols = self.visible_columns(self.scroll_col, grid_available);

        let header_height: u16 = 1;
        let data_height = area.height.saturating_sub(header_height);

        // Header line
        let gutter_blank = " ".repeat(row_num_width);
        let mut header_spans = vec![Span::styled(
            format!("{} ", gutter_blank),
            Style::default().fg(palette.dim_fg),
        )];
        for &c in &vis_cols {
            let name = util::column_label(c, &self.view.headers);
            let w = self.col_widths.get(c).copied().unwrap_or(3);
            let display = util::pad_right(&util::truncate_display(&name, w), w);
            header_spans.push(Span::styled(
                format!("{} ", display),
                Style::default()
                    .fg(palette.header_fg)
                    .add_modifier(Modifier::BOLD),
            ));
        }

        // Data lines
        let visible_rows = data_height as usize;
        let end_row = (self.scroll_row + visible_rows).min(self.view.rows.len());

        let mut lines: Vec<Line> = Vec::with_capacity(visible_rows + 1);
        lines.push(Line::from(header_spans));

        for r in self.scroll_row..end_row {
            let row_data = &self.view.rows[r];
            // 1-based data-row ordinal across the whole sheet
            let ordinal = self.view.range_start + r + 1;

            let mut spans = vec![Span::styled(
                format!("{:>width$} ", ordinal, width = row_num_width),
                Style::default().fg(palette.dim_fg),
            )];

            for &c in &vis_cols {
                let value = row_data.get(c).map(|s| s.as_str()).unwrap_or("");
                let w = self.col_widths.get(c).copied().unwrap_or(3);
                let display = util::pad_right(&util::truncate_display(value, w), w);
                spans.push(Span::styled(
                    format!("{} ", display),
                    Style::default().fg(palette.text_fg),
                ));
            }

            lines.push(Line::from(spans));
        }

        let para = Paragraph::new(lines);
        frame.render_widget(para, area);
    }

    fn draw_status(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let left = if self.view.is_empty() {
            " Page 0/0".to_string()
        } else {
            format!(
                " Page {}/{}  Showing {}-{} of {}",
                self.view.current_page,
                self.view.total_pages,
                if self.view.range_end == 0 { 0 } else { self.view.range_start + 1 },
                self.view.range_end,
                self.view.total_rows,
            )
        };
        let right = format!("theme: {}  n/p: page  t: theme  ?: help ", self.theme.as_str());

        let padding = (area.width as usize)
            .saturating_sub(left.chars().count() + right.chars().count());
        let status = format!("{}{:pad$}{}", left, "", right, pad = padding);

        let para = Paragraph::new(Line::from(vec![Span::styled(
            status,
            Style::default().fg(palette.status_fg).bg(palette.status_bg),
        )]))
        .style(Style::default().bg(palette.status_bg));
        frame.render_widget(para, area);
    }

    fn draw_help(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let help_lines = [
            "",
            "  Pages",
            "  -----",
            "  n / PgDn          Next page",
            "  p / PgUp          Previous page",
            "",
            "  Within a page",
            "  -------------",
            "  arrows / hjkl     Scroll",
            "  Home / g          Top of page",
            "  End  / G          Bottom of page",
            "",
            "  General",
            "  -------",
            "  t                 Toggle dark/light theme",
            "  q / Esc           Quit",
            "  ?                 Toggle this help",
            "",
        ];
        let help_width: u16 = 44;
        let help_height: u16 = help_lines.len() as u16;

        let x = area.width.saturating_sub(help_width) / 2;
        let y = area.height.saturating_sub(help_height) / 2;
        let popup = Rect::new(
            area.x + x,
            area.y + y,
            help_width.min(area.width),
            help_height.min(area.height),
        );

        let lines: Vec<Line> = help_lines
            .iter()
            .map(|s| Line::from(Span::styled(*s, Style::default().fg(palette.popup_fg))))
            .collect();

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.header_fg))
            .title(" Keybindings ")
            .title_style(
                Style::default()
                    .fg(palette.header_fg)
                    .add_modifier(Modifier::BOLD),
            )
            .style(Style::default().bg(palette.popup_bg));

        frame.render_widget(Clear, popup);
        let para = Paragraph::new(lines).block(block);
        frame.render_widget(para, popup);
    }
}

/// Column widths from the header labels and the rows of the current page,
/// clamped to [3, 40] display columns.
fn compute_widths(view: &PageView) -> Vec<usize> {
    (0..view.total_cols)
        .map(|c| {
            let header_w = util::display_width(&util::column_label(c, &view.headers));
            let max_cell = view
                .rows
                .iter()
                .map(|row| row.get(c).map(|s| util::display_width(s)).unwrap_or(0))
                .max()
                .unwrap_or(0);
            header_w.max(max_cell).clamp(3, 40)
        })
        .collect()
}

/// Run the interactive viewer. Takes ownership of the settings so the
/// theme preference can be written back on toggle.
pub fn run(store: TableStore, file_name: String, mut settings: Settings) -> Result<(), String> {
    let mut app = ViewerApp::new(store, file_name, settings.theme);

    terminal::enable_raw_mode().map_err(|e| format!("failed to enable raw mode: {}", e))?;
    stdout()
        .execute(EnterAlternateScreen)
        .map_err(|e| format!("failed to enter alternate screen: {}", e))?;

    struct Cleanup;
    impl Drop for Cleanup {
        fn drop(&mut self) {
            let _ = stdout().execute(LeaveAlternateScreen);
            let _ = terminal::disable_raw_mode();
        }
    }
    let _cleanup = Cleanup;

    let backend = CrosstermBackend::new(stdout());
    let mut terminal =
        Terminal::new(backend).map_err(|e| format!("failed to create terminal: {}", e))?;

    loop {
        terminal
            .draw(|frame| app.draw(frame))
            .map_err(|e| format!("draw error: {}", e))?;

        if event::poll(Duration::from_millis(100))
            .map_err(|e| format!("event poll error: {}", e))?
        {
            if let Event::Key(key) =
                event::read().map_err(|e| format!("event read error: {}", e))?
            {
                if let Some(action) = actions::action_for(key) {
                    app.apply(action);
                    if app.take_theme_dirty() {
                        // Persisting the preference is best-effort; the
                        // store may be unavailable
                        settings.theme = app.theme();
                        let _ = settings.save();
                    }
                }
            }
        }

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}

/// Print one page as a plain text table to stdout (no TUI, no raw mode).
pub fn print_plain(view: &PageView) -> Result<(), String> {
    let out = io::stdout();
    let mut w = out.lock();

    if view.is_empty() {
        writeln!(w, "No data available yet.").map_err(|e| e.to_string())?;
        return Ok(());
    }

    let col_widths = compute_widths(view);
    let row_num_width = 6;

    // Header
    write!(w, "{:>width$} ", "", width = row_num_width).map_err(|e| e.to_string())?;
    for c in 0..view.total_cols {
        let name = util::column_label(c, &view.headers);
        let cw = col_widths.get(c).copied().unwrap_or(3);
        write!(w, "{} ", util::pad_right(&util::truncate_display(&name, cw), cw))
            .map_err(|e| e.to_string())?;
    }
    writeln!(w).map_err(|e| e.to_string())?;

    // Separator
    write!(w, "{:->width$}-", "", width = row_num_width).map_err(|e| e.to_string())?;
    for c in 0..view.total_cols {
        let cw = col_widths.get(c).copied().unwrap_or(3);
        write!(w, "{}-", "-".repeat(cw)).map_err(|e| e.to_string())?;
    }
    writeln!(w).map_err(|e| e.to_string())?;

    // Rows
    for (r, row_data) in view.rows.iter().enumerate() {
        let ordinal = view.range_start + r + 1;
        write!(w, "{:>width$} ", ordinal, width = row_num_width).map_err(|e| e.to_string())?;
        for c in 0..view.total_cols {
            let value = row_data.get(c).map(|s| s.as_str()).unwrap_or("");
            let cw = col_widths.get(c).copied().unwrap_or(3);
            write!(w, "{} ", util::pad_right(&util::truncate_display(value, cw), cw))
                .map_err(|e| e.to_string())?;
        }
        writeln!(w).map_err(|e| e.to_string())?;
    }

    writeln!(w).map_err(|e| e.to_string())?;
    writeln!(
        w,
        "Page {}/{}  Showing {}-{} of {}",
        view.current_page,
        view.total_pages,
        if view.range_end == 0 { 0 } else { view.range_start + 1 },
        view.range_end,
        view.total_rows,
    )
    .map_err(|e| e.to_string())?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheetlens_core::Sheet;

    fn app_with_data_rows(n: usize) -> ViewerApp {
        let mut rows = vec![vec!["id".to_string(), "value".to_string()]];
        for i in 0..n {
            rows.push(vec![i.to_string(), (i * 10).to_string()]);
        }
        let mut store = TableStore::new();
        store.load(Sheet::new(rows));
        ViewerApp::new(store, "test.csv".into(), ThemePreference::Light)
    }

    #[test]
    fn next_page_action_advances_and_refreshes_view() {
        let mut app = app_with_data_rows(450);
        assert_eq!(app.view().current_page, 1);

        app.apply(Action::NextPage);
        assert_eq!(app.view().current_page, 2);
        assert_eq!(app.view().rows[0][0], "200");
    }

    #[test]
    fn page_actions_clamp_at_boundaries() {
        let mut app = app_with_data_rows(450);
        app.apply(Action::PrevPage);
        assert_eq!(app.view().current_page, 1);

        app.apply(Action::NextPage);
        app.apply(Action::NextPage);
        app.apply(Action::NextPage);
        app.apply(Action::NextPage);
        assert_eq!(app.view().current_page, 3);
    }

    #[test]
    fn page_change_resets_scroll() {
        let mut app = app_with_data_rows(450);
        app.apply(Action::ScrollDown);
        app.apply(Action::ScrollDown);
        assert_eq!(app.scroll_row, 2);

        app.apply(Action::NextPage);
        assert_eq!(app.scroll_row, 0);
    }

    #[test]
    fn scroll_stays_within_page() {
        let mut app = app_with_data_rows(3);
        app.apply(Action::ScrollUp);
        assert_eq!(app.scroll_row, 0);
        app.apply(Action::JumpBottom);
        assert_eq!(app.scroll_row, 2);
        app.apply(Action::ScrollDown);
        assert_eq!(app.scroll_row, 2);
        app.apply(Action::JumpTop);
        assert_eq!(app.scroll_row, 0);
    }

    #[test]
    fn theme_toggle_marks_dirty_once() {
        let mut app = app_with_data_rows(1);
        assert!(!app.take_theme_dirty());

        app.apply(Action::ToggleTheme);
        assert!(app.theme().is_dark());
        assert!(app.take_theme_dirty());
        assert!(!app.take_theme_dirty());
    }

    #[test]
    fn help_swallows_next_action() {
        let mut app = app_with_data_rows(450);
        app.apply(Action::ToggleHelp);
        // Next action only dismisses help, page stays put
        app.apply(Action::NextPage);
        assert_eq!(app.view().current_page, 1);
        app.apply(Action::NextPage);
        assert_eq!(app.view().current_page, 2);
    }

    #[test]
    fn quit_action_sets_flag() {
        let mut app = app_with_data_rows(1);
        assert!(!app.should_quit());
        app.apply(Action::Quit);
        assert!(app.should_quit());
    }

    #[test]
    fn widths_cover_headers_and_cells() {
        let mut store = TableStore::new();
        store.load(Sheet::new(vec![
            vec!["ab".to_string(), "a-very-long-header-label".to_string()],
            vec!["x".to_string(), "y".to_string()],
        ]));
        let widths = compute_widths(&store.current_view());
        assert_eq!(widths[0], 3); // clamped up to the minimum
        assert_eq!(widths[1], 24);
    }
}
