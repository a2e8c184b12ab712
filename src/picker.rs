use crate::calendar::{self, CalendarCursor, CalendarGrid};
use crate::page::{InputId, Page, Rect};
use chrono::{Local, NaiveDate};
use tracing::info;

pub const PANEL_MIN_WIDTH: f64 = 280.0;
pub const PANEL_GAP: f64 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub top: f64,
    pub left: f64,
    pub min_width: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    Outside,
    Input(InputId),
    Panel(InputId),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PanelView {
    pub grid: CalendarGrid,
    pub placement: Placement,
}

#[derive(Debug)]
struct DatePicker {
    input: InputId,
    cursor: CalendarCursor,
    open: bool,
    placement: Option<Placement>,
}

#[derive(Debug)]
pub struct DatePickers {
    pickers: Vec<DatePicker>,
    today: NaiveDate,
}

impl DatePickers {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            pickers: Vec::new(),
            today,
        }
    }

    pub fn new_now() -> Self {
        Self::new(Local::now().date_naive())
    }

    pub fn init(&mut self, page: &mut Page) -> usize {
        let mut bound = 0;
        for id in page.input_ids() {
            if self.attach(page, id) {
                bound += 1;
            }
        }
        info!("date picker init: {bound} inputs bound");
        bound
    }

    /// Idempotent; wrapping turns the input read-only, suppressing the
    /// native picker affordance.
    pub fn attach(&mut self, page: &mut Page, input: InputId) -> bool {
        if self.pickers.iter().any(|picker| picker.input == input) {
            return false;
        }
        let Some(element) = page.input_mut(input) else {
            return false;
        };
        if !element.date_picker {
            return false;
        }
        element.read_only = true;
        element.wrapped = true;
        self.pickers.push(DatePicker {
            input,
            cursor: CalendarCursor::from_date(self.today),
            open: false,
            placement: None,
        });
        true
    }

    pub fn pointer_down(&mut self, page: &Page, input: InputId) {
        self.open_for(page, input);
    }

    pub fn focus(&mut self, page: &Page, input: InputId) {
        self.open_for(page, input);
    }

    pub fn click(&mut self, page: &Page, input: InputId) {
        self.open_for(page, input);
    }

    // All three open triggers share this body.
    fn open_for(&mut self, page: &Page, input: InputId) {
        let Some(picker) = self.pickers.iter_mut().find(|p| p.input == input) else {
            return;
        };
        let Some(element) = page.input(input) else {
            return;
        };
        if let Some(parsed) = CalendarCursor::parse(&element.value) {
            picker.cursor = parsed;
        }
        picker.placement = Some(place_below(element.rect));
        picker.open = true;
    }

    pub fn document_click(&mut self, target: ClickTarget) {
        for picker in &mut self.pickers {
            let inside = match target {
                ClickTarget::Input(id) | ClickTarget::Panel(id) => id == picker.input,
                ClickTarget::Outside => false,
            };
            if !inside {
                picker.open = false;
            }
        }
    }

    pub fn select_day(&mut self, page: &mut Page, input: InputId, day: u32) {
        let Some(picker) = self.pickers.iter_mut().find(|p| p.input == input) else {
            return;
        };
        if !picker.open {
            return;
        }
        if day == 0 || day > calendar::days_in_month(picker.cursor.year, picker.cursor.month) {
            return;
        }
        picker.cursor = CalendarCursor::new(picker.cursor.year, picker.cursor.month, day);
        page.commit_value(input, picker.cursor.formatted());
        picker.open = false;
    }

    pub fn prev_year(&mut self, input: InputId) {
        self.shift_year(input, -1);
    }

    pub fn next_year(&mut self, input: InputId) {
        self.shift_year(input, 1);
    }

    // Keeps the preferred day; short months clamp at render/commit time
    // only, so navigating away and back restores the original date.
    fn shift_year(&mut self, input: InputId, delta: i32) {
        let Some(picker) = self.pickers.iter_mut().find(|p| p.input == input) else {
            return;
        };
        if !picker.open {
            return;
        }
        picker.cursor.year += delta;
    }

    pub fn select_month(&mut self, input: InputId, month: u32) {
        let Some(picker) = self.pickers.iter_mut().find(|p| p.input == input) else {
            return;
        };
        if !picker.open {
            return;
        }
        picker.cursor = CalendarCursor::new(picker.cursor.year, month, 1);
    }

    pub fn is_open(&self, input: InputId) -> bool {
        self.pickers
            .iter()
            .any(|picker| picker.input == input && picker.open)
    }

    pub fn cursor(&self, input: InputId) -> Option<CalendarCursor> {
        self.pickers
            .iter()
            .find(|picker| picker.input == input)
            .map(|picker| picker.cursor)
    }

    pub fn panel(&self, input: InputId) -> Option<PanelView> {
        let picker = self.pickers.iter().find(|p| p.input == input)?;
        if !picker.open {
            return None;
        }
        let placement = picker.placement?;
        let cursor = picker.cursor;
        Some(PanelView {
            grid: calendar::month_grid(cursor.year, cursor.month, Some(cursor.effective_day())),
            placement,
        })
    }

    pub fn dispose(&mut self, page: &mut Page, input: InputId) -> bool {
        let before = self.pickers.len();
        self.pickers.retain(|picker| picker.input != input);
        if self.pickers.len() == before {
            return false;
        }
        if let Some(element) = page.input_mut(input) {
            element.read_only = false;
            element.wrapped = false;
        }
        true
    }

    pub fn bound(&self) -> usize {
        self.pickers.len()
    }
}

fn place_below(rect: Rect) -> Placement {
    Placement {
        top: rect.top + rect.height + PANEL_GAP,
        left: rect.left,
        min_width: rect.width.max(PANEL_MIN_WIDTH),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::Input;

    fn fixed_today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 22).unwrap()
    }

    fn page_with_input(value: &str) -> (Page, InputId) {
        let mut page = Page::new();
        let id = page.add_input(
            Input::new(value, Rect::new(10.0, 20.0, 200.0, 30.0)).with_date_picker(),
        );
        (page, id)
    }

    #[test]
    fn attach_is_idempotent_and_requires_marker() {
        let (mut page, id) = page_with_input("");
        let unmarked = page.add_input(Input::new("", Rect::default()));
        let mut pickers = DatePickers::new(fixed_today());

        assert!(pickers.attach(&mut page, id));
        assert!(!pickers.attach(&mut page, id));
        assert!(!pickers.attach(&mut page, unmarked));
        assert_eq!(pickers.bound(), 1);
        let element = page.input(id).unwrap();
        assert!(element.read_only);
        assert!(element.wrapped);
    }

    #[test]
    fn init_scans_marked_inputs() {
        let mut page = Page::new();
        page.add_input(Input::new("", Rect::default()));
        let a = page.add_input(Input::new("", Rect::default()).with_date_picker());
        let b = page.add_input(Input::new("", Rect::default()).with_date_picker());
        let mut pickers = DatePickers::new(fixed_today());

        assert_eq!(pickers.init(&mut page), 2);
        pickers.pointer_down(&page, a);
        assert!(pickers.is_open(a));
        assert!(!pickers.is_open(b));
    }

    #[test]
    fn opening_with_valid_value_syncs_cursor() {
        let (mut page, id) = page_with_input("2024-02-29");
        let mut pickers = DatePickers::new(fixed_today());
        pickers.attach(&mut page, id);

        pickers.pointer_down(&page, id);

        assert!(pickers.is_open(id));
        assert_eq!(pickers.cursor(id), Some(CalendarCursor::new(2024, 2, 29)));
        let panel = pickers.panel(id).unwrap();
        assert_eq!(panel.grid.year, 2024);
        assert_eq!(panel.grid.month, 2);
        let active: Vec<u32> = panel
            .grid
            .days
            .iter()
            .filter(|cell| cell.active)
            .map(|cell| cell.day)
            .collect();
        assert_eq!(active, vec![29]);
    }

    #[test]
    fn opening_with_malformed_value_falls_back_to_construction_date() {
        for value in ["", "no es fecha", "2026-13-01", "2025-02-31"] {
            let (mut page, id) = page_with_input(value);
            let mut pickers = DatePickers::new(fixed_today());
            pickers.attach(&mut page, id);

            pickers.focus(&page, id);

            assert!(pickers.is_open(id), "value {value:?}");
            assert_eq!(
                pickers.cursor(id),
                Some(CalendarCursor::from_date(fixed_today())),
                "value {value:?}"
            );
        }
    }

    #[test]
    fn day_less_value_defaults_to_first_of_month() {
        let (mut page, id) = page_with_input("2026-03");
        let mut pickers = DatePickers::new(fixed_today());
        pickers.attach(&mut page, id);
        pickers.click(&page, id);
        assert_eq!(pickers.cursor(id), Some(CalendarCursor::new(2026, 3, 1)));
    }

    #[test]
    fn selecting_day_writes_value_and_notifies_once() {
        let (mut page, id) = page_with_input("2026-08-22");
        let mut pickers = DatePickers::new(fixed_today());
        pickers.attach(&mut page, id);
        pickers.pointer_down(&page, id);

        pickers.select_day(&mut page, id, 7);

        assert_eq!(page.input(id).unwrap().value, "2026-08-07");
        let changes = page.take_changes();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].input, id);
        assert_eq!(changes[0].value, "2026-08-07");
        assert!(!pickers.is_open(id));
        assert!(page.take_changes().is_empty());
    }

    #[test]
    fn programmatic_value_write_does_not_notify() {
        let (mut page, id) = page_with_input("");
        page.set_value(id, "2026-01-01");
        assert!(page.take_changes().is_empty());
    }

    #[test]
    fn out_of_range_day_is_ignored() {
        let (mut page, id) = page_with_input("2026-04-10");
        let mut pickers = DatePickers::new(fixed_today());
        pickers.attach(&mut page, id);
        pickers.pointer_down(&page, id);

        pickers.select_day(&mut page, id, 31);

        assert_eq!(page.input(id).unwrap().value, "2026-04-10");
        assert!(page.take_changes().is_empty());
        assert!(pickers.is_open(id));
    }

    #[test]
    fn year_navigation_round_trips_including_leap_day() {
        let (mut page, id) = page_with_input("2024-02-29");
        let mut pickers = DatePickers::new(fixed_today());
        pickers.attach(&mut page, id);
        pickers.pointer_down(&page, id);

        pickers.next_year(id);
        let panel = pickers.panel(id).unwrap();
        assert_eq!(panel.grid.year, 2025);
        let active: Vec<u32> = panel
            .grid
            .days
            .iter()
            .filter(|cell| cell.active)
            .map(|cell| cell.day)
            .collect();
        assert_eq!(active, vec![28]);

        pickers.prev_year(id);
        assert_eq!(pickers.cursor(id), Some(CalendarCursor::new(2024, 2, 29)));
        assert!(pickers.is_open(id));
        assert!(page.take_changes().is_empty());
    }

    #[test]
    fn committing_after_clamp_writes_effective_day() {
        let (mut page, id) = page_with_input("2024-02-29");
        let mut pickers = DatePickers::new(fixed_today());
        pickers.attach(&mut page, id);
        pickers.pointer_down(&page, id);

        pickers.next_year(id);
        pickers.select_day(&mut page, id, 28);

        assert_eq!(page.input(id).unwrap().value, "2025-02-28");
    }

    #[test]
    fn month_select_resets_day_and_stays_open() {
        let (mut page, id) = page_with_input("2026-08-22");
        let mut pickers = DatePickers::new(fixed_today());
        pickers.attach(&mut page, id);
        pickers.pointer_down(&page, id);

        pickers.select_month(id, 2);

        assert!(pickers.is_open(id));
        assert_eq!(pickers.cursor(id), Some(CalendarCursor::new(2026, 2, 1)));
        assert!(page.take_changes().is_empty());
    }

    #[test]
    fn panel_is_placed_below_the_input() {
        let (mut page, id) = page_with_input("");
        let mut pickers = DatePickers::new(fixed_today());
        pickers.attach(&mut page, id);
        pickers.pointer_down(&page, id);

        let placement = pickers.panel(id).unwrap().placement;
        assert_eq!(placement.top, 54.0);
        assert_eq!(placement.left, 10.0);
        assert_eq!(placement.min_width, PANEL_MIN_WIDTH);

        let wide = page.add_input(
            Input::new("", Rect::new(0.0, 0.0, 400.0, 30.0)).with_date_picker(),
        );
        pickers.attach(&mut page, wide);
        pickers.pointer_down(&page, wide);
        assert_eq!(pickers.panel(wide).unwrap().placement.min_width, 400.0);
    }

    #[test]
    fn outside_click_hides_every_open_panel() {
        let mut page = Page::new();
        let a = page.add_input(Input::new("", Rect::default()).with_date_picker());
        let b = page.add_input(Input::new("", Rect::default()).with_date_picker());
        let mut pickers = DatePickers::new(fixed_today());
        pickers.init(&mut page);
        pickers.pointer_down(&page, a);
        pickers.pointer_down(&page, b);

        pickers.document_click(ClickTarget::Outside);

        assert!(!pickers.is_open(a));
        assert!(!pickers.is_open(b));
    }

    #[test]
    fn clicks_inside_own_panel_or_input_keep_it_open() {
        let mut page = Page::new();
        let a = page.add_input(Input::new("", Rect::default()).with_date_picker());
        let b = page.add_input(Input::new("", Rect::default()).with_date_picker());
        let mut pickers = DatePickers::new(fixed_today());
        pickers.init(&mut page);
        pickers.pointer_down(&page, a);
        pickers.pointer_down(&page, b);

        pickers.document_click(ClickTarget::Panel(a));
        assert!(pickers.is_open(a));
        assert!(!pickers.is_open(b));

        pickers.document_click(ClickTarget::Input(a));
        assert!(pickers.is_open(a));
    }

    #[test]
    fn pickers_track_independent_inputs() {
        let mut page = Page::new();
        let a = page.add_input(
            Input::new("2026-01-10", Rect::default()).with_date_picker(),
        );
        let b = page.add_input(
            Input::new("2024-06-05", Rect::default()).with_date_picker(),
        );
        let mut pickers = DatePickers::new(fixed_today());
        pickers.init(&mut page);

        pickers.pointer_down(&page, a);
        pickers.pointer_down(&page, b);
        pickers.next_year(b);

        assert_eq!(pickers.cursor(a), Some(CalendarCursor::new(2026, 1, 10)));
        assert_eq!(pickers.cursor(b), Some(CalendarCursor::new(2025, 6, 5)));
    }

    #[test]
    fn dispose_releases_registration_and_unwraps() {
        let (mut page, id) = page_with_input("");
        let mut pickers = DatePickers::new(fixed_today());
        pickers.attach(&mut page, id);
        pickers.pointer_down(&page, id);

        assert!(pickers.dispose(&mut page, id));
        assert!(!pickers.dispose(&mut page, id));
        assert_eq!(pickers.bound(), 0);
        assert!(!pickers.is_open(id));
        let element = page.input(id).unwrap();
        assert!(!element.read_only);
        assert!(!element.wrapped);

        pickers.pointer_down(&page, id);
        assert!(!pickers.is_open(id));
    }

    #[test]
    fn reopening_resyncs_from_committed_value() {
        let (mut page, id) = page_with_input("2026-08-22");
        let mut pickers = DatePickers::new(fixed_today());
        pickers.attach(&mut page, id);

        pickers.pointer_down(&page, id);
        pickers.select_month(id, 3);
        pickers.select_day(&mut page, id, 9);
        pickers.pointer_down(&page, id);

        assert_eq!(pickers.cursor(id), Some(CalendarCursor::new(2026, 3, 9)));
    }
}
