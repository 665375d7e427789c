use std::cell::RefCell;
use std::rc::Rc;

use listnav::api::{ListNavigator, NavigationPhase, NavigatorConfig};
use listnav::core::ItemId;
use listnav::extensions::{
    NavigationOutcome, NavigatorContext, NavigatorEvent, NavigatorObserver,
};
use listnav::interaction::NavigationTarget;
use listnav::source::PagedSource;
use listnav::surface::StackedSurface;

const FRAME: f64 = 1.0 / 60.0;

type EventLog = Rc<RefCell<Vec<(NavigatorEvent, NavigatorContext)>>>;

struct RecordingObserver {
    id: String,
    log: EventLog,
}

impl RecordingObserver {
    fn new(id: &str) -> (Self, EventLog) {
        let log = EventLog::default();
        (
            Self {
                id: id.to_owned(),
                log: Rc::clone(&log),
            },
            log,
        )
    }
}

impl NavigatorObserver for RecordingObserver {
    fn id(&self) -> &str {
        &self.id
    }

    fn on_event(&mut self, event: &NavigatorEvent, context: &NavigatorContext) {
        self.log.borrow_mut().push((event.clone(), context.clone()));
    }
}

fn navigator(rows: usize) -> ListNavigator<StackedSurface, PagedSource> {
    let surface = StackedSurface::uniform(600.0, "row", rows, 50.0);
    let source = PagedSource::new(surface.items().clone(), Vec::new());
    ListNavigator::new(surface, source, NavigatorConfig::default().with_auto_fetch(false))
        .expect("navigator init")
}

#[test]
fn observer_registry_rejects_duplicate_and_empty_ids() {
    let mut nav = navigator(10);
    let (first, _) = RecordingObserver::new("recorder");
    let (duplicate, _) = RecordingObserver::new("recorder");
    let (anonymous, _) = RecordingObserver::new("");

    nav.register_observer(Box::new(first)).expect("register");
    assert!(nav.register_observer(Box::new(duplicate)).is_err());
    assert!(nav.register_observer(Box::new(anonymous)).is_err());
    assert_eq!(nav.observer_count(), 1);
    assert!(nav.has_observer("recorder"));

    assert!(nav.unregister_observer("recorder"));
    assert!(!nav.unregister_observer("recorder"));
    assert_eq!(nav.observer_count(), 0);
}

#[test]
fn observer_sees_navigation_lifecycle_in_order() {
    let mut nav = navigator(100);
    let (observer, log) = RecordingObserver::new("recorder");
    nav.register_observer(Box::new(observer)).expect("register");

    let token = nav.select_item("row-40", "Question 40").expect("select");
    nav.run_navigations(FRAME, 1_000).expect("run");

    let log = log.borrow();
    assert_eq!(log.len(), 3);
    assert_eq!(
        log[0].0,
        NavigatorEvent::ActiveItemChanged {
            id: Some(ItemId::new("row-40"))
        }
    );
    assert_eq!(
        log[1].0,
        NavigatorEvent::NavigationStarted {
            token,
            id: ItemId::new("row-40")
        }
    );
    assert!(log[1].1.is_navigating);
    assert_eq!(log[1].1.auto_fetch_pause_count, 1);

    let (finished, context) = &log[2];
    assert_eq!(
        *finished,
        NavigatorEvent::NavigationFinished {
            token,
            id: ItemId::new("row-40"),
            outcome: NavigationOutcome::Completed,
        }
    );
    assert!(!context.is_navigating);
    assert_eq!(context.auto_fetch_pause_count, 0);
    assert!((context.metrics.scroll_top - 1_880.0).abs() <= 1e-9);
}

#[test]
fn observer_sees_zoom_and_restore_events() {
    let mut nav = navigator(100);
    let (observer, log) = RecordingObserver::new("recorder");
    nav.register_observer(Box::new(observer)).expect("register");

    nav.zoom_to(2.0).expect("zoom");
    nav.on_layout_committed();

    let log = log.borrow();
    assert_eq!(log[0].0, NavigatorEvent::ZoomChanged { scale: 2.0 });
    assert!(matches!(log[1].0, NavigatorEvent::AnchorRestored { .. }));
    assert!((log[1].1.zoom_scale - 2.0).abs() <= 1e-9);
}

#[test]
fn handle_requests_run_on_next_frame() {
    let mut nav = navigator(100);
    let handle = nav.register_navigation_handler();
    let sidebar = handle.clone();

    sidebar.navigate_to("row-40", "Question 40");
    assert_eq!(handle.pending(), 1);
    assert!(!nav.is_navigating());

    nav.advance_frame(FRAME).expect("frame");
    assert_eq!(handle.pending(), 0);
    assert!(nav.is_navigating());
    assert_eq!(
        nav.navigation_target(),
        Some(&NavigationTarget::new("row-40", "Question 40"))
    );

    nav.run_navigations(FRAME, 1_000).expect("run");
    assert_eq!(nav.active_item_id(), Some(&ItemId::new("row-40")));
}

fn frames_until_idle(nav: &mut ListNavigator<StackedSurface, PagedSource>) -> u32 {
    let mut frames = 0;
    while nav.is_navigating() {
        nav.advance_frame(FRAME).expect("frame");
        frames += 1;
    }
    frames
}

fn direct_phase_after_select() -> Option<NavigationPhase> {
    let mut nav = navigator(100);
    nav.select_item("row-40", "Question 40").expect("select");
    nav.navigation_phases().values().next().copied()
}

#[test]
fn drained_request_is_not_stepped_twice_in_one_frame() {
    let mut direct = navigator(100);
    direct.select_item("row-40", "Question 40").expect("select");
    let direct_frames = frames_until_idle(&mut direct);

    let mut queued = navigator(100);
    let handle = queued.register_navigation_handler();
    handle.navigate_to("row-40", "Question 40");
    queued.advance_frame(FRAME).expect("frame");
    assert_eq!(
        queued.navigation_phases().values().next(),
        direct_phase_after_select().as_ref()
    );
    let queued_frames = frames_until_idle(&mut queued);

    assert_eq!(queued_frames, direct_frames);
    assert!((queued.surface().scroll_top() - direct.surface().scroll_top()).abs() <= 1e-9);
}

#[test]
fn invalid_handle_requests_are_dropped() {
    let mut nav = navigator(100);
    let handle = nav.register_navigation_handler();
    handle.navigate_to("", "Broken link");
    handle.navigate_to("row-10", "Valid");

    assert_eq!(nav.process_navigation_requests(), 1);
    assert_eq!(handle.pending(), 0);
    assert_eq!(nav.active_item_id(), Some(&ItemId::new("row-10")));
}

#[test]
fn queued_requests_supersede_in_order() {
    let mut nav = navigator(100);
    let handle = nav.register_navigation_handler();
    handle.navigate_to("row-70", "First");
    handle.navigate_to("row-12", "Second");

    let records = nav.run_navigations(FRAME, 1_000).expect("run");
    let outcomes: Vec<_> = records
        .iter()
        .map(|record| (record.id.as_str().to_owned(), record.outcome.clone()))
        .collect();
    assert_eq!(
        outcomes,
        vec![
            ("row-70".to_owned(), NavigationOutcome::Superseded),
            ("row-12".to_owned(), NavigationOutcome::Completed),
        ]
    );
    assert_eq!(nav.active_item_id(), Some(&ItemId::new("row-12")));
}
