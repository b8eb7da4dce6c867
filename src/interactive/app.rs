use std::cell::RefCell;
use std::rc::Rc;

use crossterm::event::KeyCode;
use ratatui::layout::Rect;

use super::feed::UserFeed;
use crate::error::ScrollResult;
use crate::lifecycle::{ComponentScope, ElementRef};
use crate::logging::{log_debug, log_info};
use crate::models::{NormalizedUser, UserListResponse};
use crate::observer::{ElementId, ObserverOptions, Page, PageObserver};
use crate::trigger::{use_viewport_trigger_with_options, TriggerState, ViewportTrigger};

fn to_row(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}

/// Scrollable user list whose last row loads the next page when it comes into view.
pub struct UserBrowser {
    feed: Rc<RefCell<UserFeed>>,
    page: Page,
    sentinel: ElementRef<ElementId>,
    scope: ComponentScope,
    trigger: ViewportTrigger<ElementId, PageObserver>,
    list_width: u16,
    pub viewport_rows: u16,
    pub selected_index: usize,
    pub scroll_offset: usize,
    pub should_quit: bool,
    pub status_message: Option<String>,
}

impl UserBrowser {
    pub fn new(source: UserListResponse, page_size: usize, options: ObserverOptions) -> ScrollResult<Self> {
        let feed = Rc::new(RefCell::new(UserFeed::new(source, page_size)));
        feed.borrow_mut().load_next_page();

        let page = Page::new(Rect::default());
        let sentinel = ElementRef::new();
        let mut scope = ComponentScope::new("user-list");

        let loader = feed.clone();
        let trigger = use_viewport_trigger_with_options(
            &mut scope,
            &page,
            sentinel.clone(),
            move || {
                let mut feed = loader.borrow_mut();
                let added = feed.load_next_page();
                log_debug(&format!("Sentinel visible: loaded {} user(s), {} of {}", added, feed.len(), feed.total()));
            },
            options,
        );

        let loaded = feed.borrow().len();
        sentinel.set(page.create_element(Rect::new(0, to_row(loaded), 1, 1)));
        scope.mount()?;
        log_info(&format!("User browser mounted with {} of {} users", loaded, feed.borrow().total()));

        Ok(Self {
            feed,
            page,
            sentinel,
            scope,
            trigger,
            list_width: 1,
            viewport_rows: 0,
            selected_index: 0,
            scroll_offset: 0,
            should_quit: false,
            status_message: None,
        })
    }

    pub fn users(&self) -> Vec<NormalizedUser> {
        self.feed.borrow().users().to_vec()
    }

    pub fn loaded(&self) -> usize {
        self.feed.borrow().len()
    }

    pub fn total(&self) -> usize {
        self.feed.borrow().total()
    }

    pub fn is_exhausted(&self) -> bool {
        self.feed.borrow().is_exhausted()
    }

    pub fn trigger_state(&self) -> TriggerState {
        self.trigger.state()
    }

    pub fn trigger_invocations(&self) -> usize {
        self.trigger.invocations()
    }

    pub fn selected_user(&self) -> Option<NormalizedUser> {
        self.feed.borrow().users().get(self.selected_index).cloned()
    }

    /// Index of the sentinel row, one past the last user.
    pub fn sentinel_index(&self) -> usize {
        self.loaded()
    }

    /// Record the list's drawable rows and push geometry to the page.
    pub fn sync_layout(&mut self, rows: Rect) {
        self.list_width = rows.width.max(1);
        self.viewport_rows = rows.height;
        self.ensure_visible();
        self.sync_page();
    }

    fn sync_page(&self) {
        self.page.set_viewport(Rect::new(0, to_row(self.scroll_offset), self.list_width, self.viewport_rows));
        if let Some(sentinel) = self.sentinel.get() {
            self.page.set_bounds(sentinel, Rect::new(0, to_row(self.sentinel_index()), self.list_width, 1));
        }
    }

    /// Deliver pending visibility changes; returns how many users were added.
    pub fn tick(&mut self) -> usize {
        let before = self.loaded();
        self.page.render_frame();
        let added = self.loaded() - before;
        if added > 0 {
            self.status_message = Some(format!("Loaded {} more users ({}/{})", added, self.loaded(), self.total()));
            self.sync_page();
        }
        added
    }

    pub fn handle_key(&mut self, key: KeyCode) {
        let last = self.sentinel_index();
        let page_rows = usize::from(self.viewport_rows.max(1));
        match key {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('j') | KeyCode::Down => {
                self.selected_index = (self.selected_index + 1).min(last);
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.selected_index = self.selected_index.saturating_sub(1);
            }
            KeyCode::PageDown => {
                self.selected_index = (self.selected_index + page_rows).min(last);
            }
            KeyCode::PageUp => {
                self.selected_index = self.selected_index.saturating_sub(page_rows);
            }
            KeyCode::Char('g') | KeyCode::Home => self.selected_index = 0,
            KeyCode::Char('G') | KeyCode::End => self.selected_index = last,
            KeyCode::Char('m') => {
                let added = self.feed.borrow_mut().load_next_page();
                self.status_message = Some(if added > 0 {
                    format!("Loaded {} more users ({}/{})", added, self.loaded(), self.total())
                } else {
                    "No more users".to_string()
                });
            }
            _ => {}
        }
        self.ensure_visible();
        self.sync_page();
    }

    fn ensure_visible(&mut self) {
        let rows = usize::from(self.viewport_rows);
        if rows == 0 {
            return;
        }
        if self.selected_index < self.scroll_offset {
            self.scroll_offset = self.selected_index;
        } else if self.selected_index >= self.scroll_offset + rows {
            self.scroll_offset = self.selected_index + 1 - rows;
        }
    }

    /// Unmount the list, stopping observation.
    pub fn shutdown(&mut self) -> ScrollResult<()> {
        self.scope.unmount()?;
        if let Some(sentinel) = self.sentinel.clear() {
            self.page.remove_element(sentinel);
        }
        log_info(&format!(
            "User browser unmounted after {} load-more call(s)",
            self.trigger.invocations()
        ));
        Ok(())
    }
}
