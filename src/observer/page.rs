use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::{Rc, Weak};

use ratatui::layout::Rect;

use super::entry::{compute_intersection, IntersectionEntry, ObserverOptions};
use super::{EntryCallback, IntersectionObserver, ObserverFactory};
use crate::logging::log_debug;

/// Handle to a rectangle laid out on a [`Page`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(u64);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "element#{}", self.0)
    }
}

/// Last reported (threshold index, intersecting) per target; `None` until first frame.
type TargetState = Option<(usize, bool)>;

struct ObserverState {
    options: ObserverOptions,
    targets: BTreeMap<ElementId, TargetState>,
    pending: Vec<IntersectionEntry<ElementId>>,
}

struct ObserverInner {
    state: RefCell<ObserverState>,
    callback: RefCell<EntryCallback<ElementId>>,
}

struct PageState {
    next_id: u64,
    elements: BTreeMap<ElementId, Rect>,
    viewport: Rect,
    frame: u64,
    observers: Vec<Weak<ObserverInner>>,
}

/// Scrollable content with a viewport window over it.
///
/// Element rectangles are in content coordinates. The viewport is the
/// visible window into that content, so scrolling moves the viewport and
/// leaves elements in place. Observers created from the page are notified
/// only from [`Page::render_frame`].
#[derive(Clone)]
pub struct Page {
    inner: Rc<RefCell<PageState>>,
}

impl Page {
    pub fn new(viewport: Rect) -> Self {
        Self {
            inner: Rc::new(RefCell::new(PageState {
                next_id: 0,
                elements: BTreeMap::new(),
                viewport,
                frame: 0,
                observers: Vec::new(),
            })),
        }
    }

    pub fn create_element(&self, bounds: Rect) -> ElementId {
        let mut state = self.inner.borrow_mut();
        let id = ElementId(state.next_id);
        state.next_id += 1;
        state.elements.insert(id, bounds);
        id
    }

    /// Returns false when the element is not on the page.
    pub fn set_bounds(&self, id: ElementId, bounds: Rect) -> bool {
        match self.inner.borrow_mut().elements.get_mut(&id) {
            Some(rect) => {
                *rect = bounds;
                true
            }
            None => false,
        }
    }

    pub fn remove_element(&self, id: ElementId) -> bool {
        self.inner.borrow_mut().elements.remove(&id).is_some()
    }

    pub fn set_viewport(&self, viewport: Rect) {
        self.inner.borrow_mut().viewport = viewport;
    }

    pub fn scroll_to(&self, y: u16) {
        self.inner.borrow_mut().viewport.y = y;
    }

    /// Vertical scroll; negative deltas scroll up and stop at zero.
    pub fn scroll_by(&self, delta: i32) {
        let mut state = self.inner.borrow_mut();
        let y = (i32::from(state.viewport.y) + delta).clamp(0, i32::from(u16::MAX));
        state.viewport.y = y as u16;
    }

    pub fn observer_count(&self) -> usize {
        self.inner
            .borrow()
            .observers
            .iter()
            .filter(|o| o.strong_count() > 0)
            .count()
    }

    /// Run one observation pass and deliver the queued batches.
    ///
    /// Every live observer's records are queued first and delivered second,
    /// so a callback that disconnects another observer drops that observer's
    /// batch before it is delivered. A batch for an observer whose callback
    /// is already running (a re-entrant call) stays queued for the next
    /// frame. Returns the number of batches delivered.
    pub fn render_frame(&self) -> usize {
        let (observers, elements, viewport, frame) = {
            let mut state = self.inner.borrow_mut();
            state.frame += 1;
            state.observers.retain(|o| o.strong_count() > 0);
            let observers: Vec<Rc<ObserverInner>> =
                state.observers.iter().filter_map(Weak::upgrade).collect();
            (observers, state.elements.clone(), state.viewport, state.frame)
        };

        for observer in &observers {
            queue_records(observer, &elements, viewport, frame);
        }

        let mut delivered = 0;
        for observer in &observers {
            let batch = std::mem::take(&mut observer.state.borrow_mut().pending);
            if batch.is_empty() {
                continue;
            }
            match observer.callback.try_borrow_mut() {
                Ok(mut callback) => {
                    (&mut *callback)(&batch);
                    delivered += 1;
                }
                Err(_) => {
                    log_debug(&format!(
                        "Deferring re-entrant delivery of {} record(s) on frame {}",
                        batch.len(),
                        frame
                    ));
                    let mut state = observer.state.borrow_mut();
                    let newer = std::mem::replace(&mut state.pending, batch);
                    state.pending.extend(newer);
                }
            }
        }
        delivered
    }
}

fn queue_records(
    observer: &ObserverInner,
    elements: &BTreeMap<ElementId, Rect>,
    viewport: Rect,
    frame: u64,
) {
    let mut state = observer.state.borrow_mut();
    let root = state.options.root_margin.expand(viewport);
    let ObserverState { options, targets, pending } = &mut *state;

    for (id, previous) in targets.iter_mut() {
        let entry = match elements.get(id) {
            Some(bounds) => {
                let hit = compute_intersection(*bounds, root);
                let index = options.threshold_index(hit.is_intersecting, hit.ratio);
                if *previous == Some((index, hit.is_intersecting)) {
                    continue;
                }
                *previous = Some((index, hit.is_intersecting));
                IntersectionEntry {
                    target: *id,
                    is_intersecting: hit.is_intersecting,
                    intersection_ratio: hit.ratio,
                    bounding_rect: Some(*bounds),
                    intersection_rect: hit.rect,
                    root_bounds: root,
                    frame,
                }
            }
            None => {
                if *previous == Some((0, false)) {
                    continue;
                }
                *previous = Some((0, false));
                IntersectionEntry {
                    target: *id,
                    is_intersecting: false,
                    intersection_ratio: 0.0,
                    bounding_rect: None,
                    intersection_rect: Rect::default(),
                    root_bounds: root,
                    frame,
                }
            }
        };
        pending.push(entry);
    }
}

impl ObserverFactory<ElementId> for Page {
    type Observer = PageObserver;

    fn create(&self, callback: EntryCallback<ElementId>, options: ObserverOptions) -> PageObserver {
        let inner = Rc::new(ObserverInner {
            state: RefCell::new(ObserverState {
                options,
                targets: BTreeMap::new(),
                pending: Vec::new(),
            }),
            callback: RefCell::new(callback),
        });
        self.inner.borrow_mut().observers.push(Rc::downgrade(&inner));
        PageObserver { inner }
    }
}

/// Observer registered with a [`Page`]. Dropping it deregisters it.
pub struct PageObserver {
    inner: Rc<ObserverInner>,
}

impl IntersectionObserver<ElementId> for PageObserver {
    fn observe(&mut self, target: ElementId) {
        self.inner.state.borrow_mut().targets.entry(target).or_insert(None);
    }

    fn unobserve(&mut self, target: &ElementId) {
        let mut state = self.inner.state.borrow_mut();
        state.targets.remove(target);
        state.pending.retain(|entry| entry.target != *target);
    }

    fn disconnect(&mut self) {
        let mut state = self.inner.state.borrow_mut();
        state.targets.clear();
        state.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::RootMargin;
    use std::cell::Cell;

    type Log = Rc<RefCell<Vec<Vec<(ElementId, bool)>>>>;

    fn recording(page: &Page, options: ObserverOptions) -> (PageObserver, Log) {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        let observer = page.create(
            Box::new(move |entries: &[IntersectionEntry<ElementId>]| {
                sink.borrow_mut()
                    .push(entries.iter().map(|e| (e.target, e.is_intersecting)).collect());
            }),
            options,
        );
        (observer, log)
    }

    #[test]
    fn test_first_frame_always_reports() {
        let page = Page::new(Rect::new(0, 0, 20, 10));
        let inside = page.create_element(Rect::new(0, 2, 20, 1));
        let below = page.create_element(Rect::new(0, 30, 20, 1));
        let (mut observer, log) = recording(&page, ObserverOptions::default());
        observer.observe(inside);
        observer.observe(below);

        assert_eq!(page.render_frame(), 1);
        assert_eq!(log.borrow()[0], vec![(inside, true), (below, false)]);

        // Nothing changed, nothing delivered
        assert_eq!(page.render_frame(), 0);
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn test_scrolling_reports_transitions() {
        let page = Page::new(Rect::new(0, 0, 20, 10));
        let sentinel = page.create_element(Rect::new(0, 15, 20, 1));
        let (mut observer, log) = recording(&page, ObserverOptions::default());
        observer.observe(sentinel);
        page.render_frame();

        page.scroll_by(8);
        page.render_frame();
        page.scroll_by(-8);
        page.render_frame();

        let log = log.borrow();
        assert_eq!(log.len(), 3);
        assert_eq!(log[1], vec![(sentinel, true)]);
        assert_eq!(log[2], vec![(sentinel, false)]);
    }

    #[test]
    fn test_threshold_crossing_reports_while_intersecting() {
        let page = Page::new(Rect::new(0, 0, 10, 10));
        let target = page.create_element(Rect::new(0, 9, 10, 4));
        let options = ObserverOptions::with_thresholds(vec![0.0, 1.0]).unwrap();
        let (mut observer, log) = recording(&page, options);
        observer.observe(target);
        page.render_frame();

        page.scroll_to(3);
        page.render_frame();

        let log = log.borrow();
        assert_eq!(log.len(), 2);
        assert_eq!(log[0], vec![(target, true)]);
        assert_eq!(log[1], vec![(target, true)]);
    }

    #[test]
    fn test_root_margin_reports_early() {
        let page = Page::new(Rect::new(0, 0, 10, 10));
        let target = page.create_element(Rect::new(0, 12, 10, 1));
        let options = ObserverOptions::default().root_margin(RootMargin {
            bottom: 5,
            ..Default::default()
        });
        let (mut observer, log) = recording(&page, options);
        observer.observe(target);
        page.render_frame();
        assert_eq!(log.borrow()[0], vec![(target, true)]);
    }

    #[test]
    fn test_removed_element_reports_once() {
        let page = Page::new(Rect::new(0, 0, 10, 10));
        let target = page.create_element(Rect::new(0, 0, 10, 1));
        let (mut observer, log) = recording(&page, ObserverOptions::default());
        observer.observe(target);
        page.render_frame();

        assert!(page.remove_element(target));
        page.render_frame();
        page.render_frame();

        let log = log.borrow();
        assert_eq!(log.len(), 2);
        assert_eq!(log[1], vec![(target, false)]);
    }

    #[test]
    fn test_disconnect_stops_delivery() {
        let page = Page::new(Rect::new(0, 0, 10, 10));
        let target = page.create_element(Rect::new(0, 0, 10, 1));
        let (mut observer, log) = recording(&page, ObserverOptions::default());
        observer.observe(target);
        observer.disconnect();
        observer.disconnect();

        assert_eq!(page.render_frame(), 0);
        page.scroll_to(5);
        assert_eq!(page.render_frame(), 0);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_reobserve_after_disconnect_reports_again() {
        let page = Page::new(Rect::new(0, 0, 10, 10));
        let target = page.create_element(Rect::new(0, 0, 10, 1));
        let (mut observer, log) = recording(&page, ObserverOptions::default());
        observer.observe(target);
        page.render_frame();
        observer.disconnect();
        observer.observe(target);
        page.render_frame();
        assert_eq!(log.borrow().len(), 2);
    }

    #[test]
    fn test_dropped_observer_is_deregistered() {
        let page = Page::new(Rect::new(0, 0, 10, 10));
        let (observer, _log) = recording(&page, ObserverOptions::default());
        assert_eq!(page.observer_count(), 1);
        drop(observer);
        assert_eq!(page.observer_count(), 0);
        assert_eq!(page.render_frame(), 0);
    }

    #[test]
    fn test_callback_disconnecting_peer_drops_its_batch() {
        let page = Page::new(Rect::new(0, 0, 10, 10));
        let target = page.create_element(Rect::new(0, 0, 10, 1));

        let peer_slot: Rc<RefCell<Option<PageObserver>>> = Rc::new(RefCell::new(None));
        let handle = peer_slot.clone();
        let mut killer = page.create(
            Box::new(move |_: &[IntersectionEntry<ElementId>]| {
                if let Some(peer) = handle.borrow_mut().as_mut() {
                    peer.disconnect();
                }
            }),
            ObserverOptions::default(),
        );
        let (mut peer, peer_log) = recording(&page, ObserverOptions::default());

        killer.observe(target);
        peer.observe(target);
        *peer_slot.borrow_mut() = Some(peer);

        // Both batches are queued, the first delivery cancels the second
        assert_eq!(page.render_frame(), 1);
        assert!(peer_log.borrow().is_empty());
    }

    #[test]
    fn test_reentrant_render_keeps_batch_for_next_frame() {
        let page = Page::new(Rect::new(0, 0, 10, 10));
        let target = page.create_element(Rect::new(0, 0, 10, 1));

        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        let nested = page.clone();
        let moved = Rc::new(Cell::new(false));
        let mut observer = page.create(
            Box::new(move |entries: &[IntersectionEntry<ElementId>]| {
                sink.borrow_mut()
                    .push(entries.iter().map(|e| (e.target, e.is_intersecting)).collect());
                if !moved.replace(true) {
                    nested.set_bounds(target, Rect::new(0, 40, 10, 1));
                    assert_eq!(nested.render_frame(), 0);
                }
            }),
            ObserverOptions::default(),
        );
        observer.observe(target);

        assert_eq!(page.render_frame(), 1);
        assert_eq!(log.borrow().len(), 1);

        // The transition computed inside the callback arrives on the next frame
        assert_eq!(page.render_frame(), 1);
        assert_eq!(log.borrow()[1], vec![(target, false)]);
        assert_eq!(page.render_frame(), 0);
    }
}
