//! Browser sessions driven through JSON-encoded DOM events.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use fab_core::config::WidgetConfig;
use fab_core::geometry::{Point, Size};
use fab_core::listener::ListenerSet;
use fab_web::input_parser::InputParseError;
use fab_web::{DocumentEvents, HostEffects, WebWidgetHost};
use fab_widget::{FloatingAssistantWidget, NoChat};
use pretty_assertions::assert_eq;

#[derive(Debug, Default)]
struct Document {
    live: RefCell<Vec<&'static str>>,
}

impl DocumentEvents for Document {
    fn add_listeners(&self, set: ListenerSet) {
        self.live.borrow_mut().extend(set.event_names());
    }

    fn remove_listeners(&self, set: ListenerSet) {
        let names = set.event_names();
        self.live.borrow_mut().retain(|n| !names.contains(n));
    }
}

fn session() -> (WebWidgetHost<NoChat, Document>, Rc<Document>) {
    let doc = Rc::new(Document::default());
    let widget =
        FloatingAssistantWidget::new(WidgetConfig::default(), Size::new(1280.0, 800.0), NoChat);
    (WebWidgetHost::new(widget, Rc::clone(&doc)), doc)
}

fn send(host: &mut WebWidgetHost<NoChat, Document>, json: &str) -> HostEffects {
    host.dispatch_json(json).expect("well-formed event")
}

#[test]
fn drag_release_click_then_click_after_cooldown() {
    let (mut host, doc) = session();

    send(&mut host, r#"{"kind":"mousedown","x":50,"y":50}"#);
    assert_eq!(
        *doc.live.borrow(),
        vec!["mousemove", "mouseup", "touchmove", "touchend"]
    );

    host.advance(Duration::from_millis(16));
    let fx = send(&mut host, r#"{"kind":"mousemove","x":80,"y":50}"#);
    assert_eq!(fx.moved, Some(Point::new(1170.0, 650.0)));
    assert!(!fx.prevent_default);

    send(&mut host, r#"{"kind":"mouseup"}"#);
    assert!(doc.live.borrow().is_empty());

    let fx = send(&mut host, r#"{"kind":"click"}"#);
    assert!(!fx.modal_opened);

    assert_eq!(host.next_timeout(), Some(Duration::from_millis(200)));
    host.advance(Duration::from_millis(250));
    let fx = send(&mut host, r#"{"kind":"click"}"#);
    assert!(fx.modal_opened);
    assert!(host.view().modal.open);

    let fx = send(&mut host, r#"{"kind":"dismiss"}"#);
    assert!(fx.modal_closed);
}

#[test]
fn touch_drag_blocks_scrolling() {
    let (mut host, _doc) = session();
    send(
        &mut host,
        r#"{"kind":"touchstart","touches":[{"id":0,"x":1150,"y":660}]}"#,
    );
    let fx = send(
        &mut host,
        r#"{"kind":"touchmove","touches":[{"id":0,"x":600,"y":400}]}"#,
    );
    assert_eq!(
        fx,
        HostEffects {
            prevent_default: true,
            modal_opened: false,
            modal_closed: false,
            moved: Some(Point::new(590.0, 390.0)),
        }
    );
}

#[test]
fn hover_greeting_types_out_between_timeouts() {
    let (mut host, _doc) = session();
    send(&mut host, r#"{"kind":"mouseenter"}"#);
    for _ in 0..4 {
        let wait = host.next_timeout().expect("ticker armed");
        assert!(host.advance(wait));
    }
    assert_eq!(host.view().bubble.map(|b| b.text), Some("你好，我"));

    send(&mut host, r#"{"kind":"mouseleave"}"#);
    assert_eq!(host.view().bubble, None);
    assert_eq!(host.next_timeout(), None);
}

#[test]
fn ignored_and_bad_events() {
    let (mut host, _doc) = session();
    assert_eq!(
        host.dispatch_json(r#"{"kind":"wheel"}"#),
        Ok(HostEffects::default())
    );
    assert_eq!(
        host.dispatch_json(r#"{"kind":"mousedown"}"#),
        Err(InputParseError::MissingField("x"))
    );
    assert!(!host.listening());
}

#[test]
fn dropping_host_mid_drag_cleans_up_document() {
    let (mut host, doc) = session();
    send(&mut host, r#"{"kind":"mousedown","x":1150,"y":660}"#);
    send(&mut host, r#"{"kind":"mousemove","x":900,"y":500}"#);
    assert_eq!(doc.live.borrow().len(), 4);
    drop(host);
    assert!(doc.live.borrow().is_empty());
}
