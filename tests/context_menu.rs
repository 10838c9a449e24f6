//! End-to-end behavior of menus opened through shared services.
use icy_context_menu::core::element::{self, Tag, Target};
use icy_context_menu::core::event::Status;
use icy_context_menu::core::keyboard::{self, Named};
use icy_context_menu::core::{Condition, Event, LayoutDirection, Point, Rectangle, Size, mouse};
use icy_context_menu::menu::MenuLevel;
use icy_context_menu::overlay::{Headless, Origin, Overlay, Probe};
use icy_context_menu::{
    ContextMenu, ContextMenuTrigger, Execute, HoverTrigger, MenuItem, Services, Settings,
};

use std::cell::{Cell, RefCell};
use std::rc::Rc;

type Value = &'static str;

struct App {
    overlay: Rc<RefCell<Headless>>,
    services: Services<Value>,
}

impl App {
    fn new() -> Self {
        let overlay = Rc::new(RefCell::new(Headless::new(Size::new(240.0, 160.0))));
        let shared: Rc<RefCell<dyn Overlay>> = overlay.clone();

        Self {
            services: Services::shared(shared, Settings::default()),
            overlay,
        }
    }

    fn probe(&self, index: usize) -> Probe {
        self.overlay.borrow().surfaces()[index].clone()
    }

    fn level(&self, index: usize) -> MenuLevel<Value> {
        self.services.stack().levels()[index].clone()
    }

    fn press(&self, named: Named) -> Status {
        self.services.update(&key(named))
    }

    fn click(&self, position: Point, target: Option<element::Id>) -> Status {
        self.services.update(&Event::Mouse(mouse::Event::Click {
            button: mouse::Button::Left,
            position,
            target: target.map(Target::new),
        }))
    }
}

fn key(named: Named) -> Event {
    Event::Keyboard(keyboard::Event::pressed(
        named,
        Some(Target::new(element::Id::unique())),
    ))
}

fn count_closes(menu: &ContextMenu<Value>) -> Rc<Cell<usize>> {
    let closed = Rc::new(Cell::new(0));

    menu.on_close({
        let closed = Rc::clone(&closed);
        move || closed.set(closed.get() + 1)
    })
    .forget();

    closed
}

fn record_executions(item: MenuItem<Value>) -> (MenuItem<Value>, Rc<RefCell<Vec<Execute<Value>>>>) {
    let executed = Rc::new(RefCell::new(Vec::new()));

    let item = item.on_execute({
        let executed = Rc::clone(&executed);
        move |execute| executed.borrow_mut().push(execute.clone())
    });

    (item, executed)
}

#[test]
fn test_visible_items_keep_declaration_order() {
    let app = App::new();

    let items = [
        MenuItem::new("Item 1").visible(false),
        MenuItem::new("Item 2"),
        MenuItem::new("Item 3").visible(Condition::predicate(|value: Option<&Value>| {
            value != Some(&"report.pdf")
        })),
        MenuItem::new("Item 4"),
    ];

    let menu = ContextMenu::new(&app.services, items.clone());

    app.services.show(&menu, Point::new(10.0, 10.0), Some("report.pdf"));

    let expected = vec![items[1].clone(), items[3].clone()];

    assert_eq!(menu.visible_items(), expected);
    assert_eq!(app.level(0).items(), expected);
    assert_eq!(app.services.stack().size(), 1);
}

#[test]
fn test_execute_closes_every_level() {
    let app = App::new();
    let (delete, executed) = record_executions(MenuItem::new("Delete"));

    let share = ContextMenu::new(&app.services, [MenuItem::new("Mail"), delete]);
    let root = ContextMenu::new(
        &app.services,
        [MenuItem::new("Open"), MenuItem::new("Share").sub_menu(share.clone())],
    );

    let root_closed = count_closes(&root);
    let share_closed = count_closes(&share);

    app.services.show(&root, Point::ORIGIN, Some("report.pdf"));

    assert_eq!(app.press(Named::ArrowUp), Status::Captured);
    assert_eq!(app.press(Named::Enter), Status::Captured);
    assert_eq!(app.services.stack().size(), 2);

    let _ = app.press(Named::ArrowUp);
    let enter = key(Named::Enter);

    assert_eq!(app.services.update(&enter), Status::Captured);

    assert_eq!(
        *executed.borrow(),
        vec![Execute {
            event: enter,
            value: Some("report.pdf"),
        }]
    );
    assert!(app.services.stack().is_empty());
    assert_eq!(root_closed.get(), 1);
    assert_eq!(share_closed.get(), 1);

    for index in 0..2 {
        let probe = app.probe(index);

        assert_eq!(probe.detach_count(), 1);
        assert_eq!(probe.dispose_count(), 1);
    }
}

#[test]
fn test_enter_opens_sub_menu_next_to_active_row() {
    let app = App::new();
    let details = ContextMenu::new(&app.services, [MenuItem::new("Size")]);
    let root = ContextMenu::new(
        &app.services,
        [
            MenuItem::new("A"),
            MenuItem::new("B"),
            MenuItem::new("C"),
            MenuItem::new("D").sub_menu(details),
        ],
    );

    app.services.show(&root, Point::ORIGIN, None);

    let parent = app.level(0);

    let _ = app.press(Named::ArrowUp);
    assert_eq!(parent.active_item_index(), Some(3));

    assert_eq!(app.press(Named::Enter), Status::Captured);

    assert!(!parent.is_leaf());
    assert_eq!(app.services.stack().size(), 2);

    let child = app.level(1);

    assert!(child.is_leaf());
    assert_eq!(
        app.probe(1).config().position_strategy.origin(),
        Origin::Element(parent.row_element(3).expect("row of D"))
    );
}

#[test]
fn test_arrow_right_opens_sub_menu_unless_typing() {
    let app = App::new();
    let more = ContextMenu::new(&app.services, [MenuItem::new("Nested")]);
    let root = ContextMenu::new(
        &app.services,
        [MenuItem::new("More").sub_menu(more)],
    )
    .dir(LayoutDirection::Ltr);

    app.services.show(&root, Point::ORIGIN, None);
    let _ = app.press(Named::ArrowDown);

    let typing = Event::Keyboard(keyboard::Event::pressed(
        Named::ArrowRight,
        Some(Target::tagged(element::Id::unique(), Tag::Input)),
    ));

    assert_eq!(app.services.update(&typing), Status::Ignored);
    assert_eq!(app.services.stack().size(), 1);
    assert!(app.level(0).is_leaf());

    assert_eq!(app.press(Named::ArrowRight), Status::Captured);
    assert_eq!(app.services.stack().size(), 2);
}

#[test]
fn test_arrow_back_closes_sub_menu_only() {
    let app = App::new();
    let more = ContextMenu::new(&app.services, [MenuItem::new("Nested")]);
    let root = ContextMenu::new(
        &app.services,
        [MenuItem::new("Copy"), MenuItem::new("More").sub_menu(more.clone())],
    );

    let more_closed = count_closes(&more);

    app.services.show(&root, Point::ORIGIN, None);

    let _ = app.press(Named::ArrowUp);
    let _ = app.press(Named::ArrowRight);
    assert_eq!(app.services.stack().size(), 2);

    assert_eq!(app.press(Named::ArrowLeft), Status::Ignored);
    assert_eq!(app.services.stack().size(), 2);

    let _ = app.press(Named::ArrowDown);
    assert_eq!(app.press(Named::ArrowLeft), Status::Captured);

    assert_eq!(app.services.stack().size(), 1);
    assert!(app.level(0).is_leaf());
    assert!(app.probe(1).is_disposed());
    assert_eq!(more_closed.get(), 1);

    let _ = app.press(Named::ArrowUp);
    assert_eq!(app.level(0).active_item_index(), Some(0));
}

#[test]
fn test_rtl_swaps_arrow_keys() {
    let app = App::new();
    let more = ContextMenu::new(&app.services, [MenuItem::new("Nested")]);
    let root = ContextMenu::new(&app.services, [MenuItem::new("More").sub_menu(more)])
        .dir(LayoutDirection::Rtl);

    app.services.show(&root, Point::ORIGIN, None);
    let _ = app.press(Named::ArrowDown);

    let _ = app.press(Named::ArrowRight);
    assert_eq!(app.services.stack().size(), 1);

    let _ = app.press(Named::ArrowLeft);
    assert_eq!(app.services.stack().size(), 2);
    assert_eq!(app.level(1).dir(), Some(LayoutDirection::Rtl));

    let _ = app.press(Named::ArrowDown);
    let _ = app.press(Named::ArrowRight);
    assert_eq!(app.services.stack().size(), 1);
}

#[test]
fn test_escape_closes_root_menu() {
    let app = App::new();
    let menu = ContextMenu::new(&app.services, [MenuItem::new("Copy")]);
    let closed = count_closes(&menu);

    app.services.show(&menu, Point::ORIGIN, None);

    assert_eq!(app.press(Named::Escape), Status::Captured);
    assert!(app.services.stack().is_empty());
    assert_eq!(closed.get(), 2);
}

#[test]
fn test_escape_from_sub_menu_returns_to_root() {
    let app = App::new();
    let more = ContextMenu::new(&app.services, [MenuItem::new("Nested")]);
    let root = ContextMenu::new(
        &app.services,
        [MenuItem::new("Copy"), MenuItem::new("More").sub_menu(more)],
    );

    app.services.show(&root, Point::ORIGIN, None);

    let _ = app.press(Named::ArrowUp);
    let _ = app.press(Named::ArrowRight);
    assert_eq!(app.services.stack().size(), 2);

    assert_eq!(app.press(Named::Escape), Status::Captured);

    assert_eq!(app.services.stack().size(), 1);
    assert!(app.level(0).is_leaf());
    assert!(app.probe(1).is_disposed());

    assert_eq!(app.press(Named::ArrowDown), Status::Captured);
    assert_eq!(app.level(0).active_item_index(), Some(0));

    assert_eq!(app.press(Named::Escape), Status::Captured);
    assert!(app.services.stack().is_empty());
}

#[test]
fn test_hover_opens_and_closes_sub_menus() {
    let app = App::new();
    let more = ContextMenu::new(&app.services, [MenuItem::new("Nested")]);
    let root = ContextMenu::new(
        &app.services,
        [MenuItem::new("Copy"), MenuItem::new("More").sub_menu(more)],
    );

    app.services.show(&root, Point::ORIGIN, None);

    let parent = app.level(0);
    let copy_row = parent.row_element(0).expect("copy row");
    let more_row = parent.row_element(1).expect("more row");

    app.overlay.borrow_mut().place(
        more_row,
        Rectangle::new(Point::new(0.0, 20.0), Size::new(240.0, 20.0)),
    );

    let enter = |position, row| {
        Event::Mouse(mouse::Event::Entered {
            position,
            target: Some(Target::new(row)),
        })
    };

    assert_eq!(
        app.services.update(&enter(Point::new(10.0, 30.0), more_row)),
        Status::Ignored
    );
    assert_eq!(app.services.stack().size(), 2);
    assert!(!parent.is_leaf());
    assert_eq!(
        app.probe(1).config().position_strategy.origin(),
        Origin::Element(more_row)
    );

    let _ = app.services.update(&enter(Point::new(10.0, 10.0), copy_row));

    assert_eq!(app.services.stack().size(), 1);
    assert!(parent.is_leaf());
    assert!(app.probe(1).is_disposed());
    assert_eq!(parent.active_item_index(), Some(0));
}

#[test]
fn test_pointer_opens_sub_menu_and_executes() {
    let app = App::new();
    let (mail, executed) = record_executions(MenuItem::new("Mail"));
    let share = ContextMenu::new(&app.services, [mail]);
    let root = ContextMenu::new(
        &app.services,
        [MenuItem::new("Open"), MenuItem::new("Share").sub_menu(share)],
    );

    app.services.show(&root, Point::ORIGIN, Some("photo.png"));

    let parent = app.level(0);
    let share_row = parent.row_element(1).expect("share row");

    app.overlay.borrow_mut().place(
        share_row,
        Rectangle::new(Point::new(0.0, 20.0), Size::new(240.0, 20.0)),
    );

    assert_eq!(
        app.click(Point::new(10.0, 30.0), Some(share_row)),
        Status::Captured
    );
    assert_eq!(app.services.stack().size(), 2);
    assert!(!parent.is_leaf());

    let child = app.level(1);

    assert_eq!(
        child.bounds(),
        Rectangle::new(Point::new(240.0, 20.0), Size::new(240.0, 160.0))
    );

    let _ = app.click(Point::new(250.0, 30.0), child.row_element(0));

    assert_eq!(executed.borrow().len(), 1);
    assert_eq!(executed.borrow()[0].value, Some("photo.png"));
    assert!(app.services.stack().is_empty());
}

#[test]
fn test_outside_click_closes_every_level() {
    let app = App::new();
    let more = ContextMenu::new(&app.services, [MenuItem::new("Nested")]);
    let root = ContextMenu::new(&app.services, [MenuItem::new("More").sub_menu(more.clone())]);

    let root_closed = count_closes(&root);
    let more_closed = count_closes(&more);

    app.services.show(&root, Point::ORIGIN, None);
    let _ = app.press(Named::ArrowDown);
    let _ = app.press(Named::Enter);

    assert_eq!(app.click(Point::new(10.0, 10.0), None), Status::Ignored);
    assert_eq!(app.services.stack().size(), 2);

    let _ = app.click(Point::new(1000.0, 1000.0), None);

    assert!(app.services.stack().is_empty());
    assert_eq!(root_closed.get(), 1);
    assert_eq!(more_closed.get(), 1);
}

#[test]
fn test_right_click_trigger_replaces_open_chain() {
    let app = App::new();
    let menu = ContextMenu::new(&app.services, [MenuItem::new("Copy")]);
    let trigger = ContextMenuTrigger::new(&app.services)
        .context_menu(menu.clone())
        .value("cell B2");

    let right_click = |position| {
        Event::Mouse(mouse::Event::ContextMenu {
            position,
            target: None,
        })
    };

    assert_eq!(
        trigger.handle_event(&right_click(Point::new(5.0, 5.0))),
        Status::Captured
    );
    assert_eq!(
        trigger.handle_event(&right_click(Point::new(50.0, 50.0))),
        Status::Captured
    );

    assert_eq!(app.services.stack().size(), 1);
    assert!(app.probe(0).is_disposed());
    assert_eq!(menu.value(), Some("cell B2"));
}

#[test]
fn test_hover_trigger_opens_next_to_element() {
    let app = App::new();
    let element = element::Id::unique();
    let menu = ContextMenu::new(&app.services, [MenuItem::new("Preview")]);
    let trigger = HoverTrigger::new(&app.services, element).context_menu(menu);

    let status = trigger.handle_event(&Event::Mouse(mouse::Event::Entered {
        position: Point::ORIGIN,
        target: Some(Target::new(element)),
    }));

    assert_eq!(status, Status::Ignored);
    assert_eq!(app.services.stack().size(), 1);
    assert_eq!(
        app.probe(0).config().position_strategy.origin(),
        Origin::Element(element)
    );
}
