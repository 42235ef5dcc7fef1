//! Gesture routing and distribution

use std::cmp::Reverse;

use indexmap::IndexMap;
use tracing::trace;

use crate::gesture::{GestureEmitter, GestureEvent, GestureKind};
use crate::session::TouchSession;

use super::events::TouchPhase;
use super::handler::GestureHandler;

/// Maximum number of gesture summaries kept for debugging
const DEBUG_EVENT_LIMIT: usize = 64;

/// Handle returned by [`GestureRouter::bind`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BindingId(u64);

type Callback = Box<dyn FnMut(&GestureEvent)>;

struct Binding {
    kind: GestureKind,
    callback: Callback,
}

/// Routes classified gestures to handlers and per-kind callbacks
///
/// Handlers run first, in priority order. Bindings for the gesture's kind run
/// afterwards in registration order, unless a handler consumed the gesture.
pub struct GestureRouter {
    /// Registered handlers, sorted by priority (highest first)
    handlers: Vec<Box<dyn GestureHandler>>,
    bindings: IndexMap<BindingId, Binding>,
    next_binding: u64,
    /// Debug: summaries of recently routed gestures
    last_events: Vec<String>,
}

impl GestureRouter {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
            bindings: IndexMap::new(),
            next_binding: 0,
            last_events: Vec::new(),
        }
    }

    /// Register a gesture handler
    ///
    /// Handlers are kept sorted by priority (highest first). Equal
    /// priorities keep registration order.
    pub fn register_handler(&mut self, handler: Box<dyn GestureHandler>) {
        self.handlers.push(handler);
        self.handlers.sort_by_key(|h| Reverse(h.priority()));
    }

    /// Invoke `callback` for every gesture of `kind` that no handler consumed
    pub fn bind<F>(&mut self, kind: GestureKind, callback: F) -> BindingId
    where
        F: FnMut(&GestureEvent) + 'static,
    {
        let id = BindingId(self.next_binding);
        self.next_binding += 1;
        self.bindings.insert(
            id,
            Binding {
                kind,
                callback: Box::new(callback),
            },
        );
        id
    }

    /// Remove a binding; returns false if it was already gone
    pub fn unbind(&mut self, id: BindingId) -> bool {
        self.bindings.shift_remove(&id).is_some()
    }

    /// Route one gesture; returns true if a handler consumed it
    pub fn dispatch(&mut self, event: &GestureEvent) -> bool {
        self.last_events
            .push(format!("{} {}", event.kind, event.summary()));
        if self.last_events.len() > DEBUG_EVENT_LIMIT {
            self.last_events.remove(0);
        }

        for handler in &mut self.handlers {
            if handler.handle_gesture(event) {
                trace!(handler = handler.name(), kind = %event.kind, "gesture consumed");
                return true;
            }
        }

        for binding in self.bindings.values_mut() {
            if binding.kind == event.kind {
                (binding.callback)(event);
            }
        }
        false
    }

    /// Get number of registered handlers
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Get number of active bindings
    pub fn binding_count(&self) -> usize {
        self.bindings.len()
    }

    /// Get a mutable reference to a handler by name
    pub fn get_handler_mut(&mut self, name: &str) -> Option<&mut (dyn GestureHandler + '_)> {
        match self.handlers.iter_mut().find(|h| h.name() == name) {
            Some(boxed) => Some(boxed.as_mut()),
            None => None,
        }
    }

    /// Get debug information about all handlers
    pub fn debug_handlers(&self) -> Vec<(String, u32)> {
        self.handlers
            .iter()
            .map(|h| (h.name().to_string(), h.priority()))
            .collect()
    }

    /// Recently routed gestures, oldest first
    pub fn debug_last_events(&self) -> &[String] {
        &self.last_events
    }

    pub fn clear_debug_events(&mut self) {
        self.last_events.clear();
    }
}

impl Default for GestureRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureEmitter for GestureRouter {
    fn emit(&mut self, event: GestureEvent) {
        self.dispatch(&event);
    }

    fn observe(&mut self, phase: TouchPhase, session: &TouchSession) {
        for handler in &mut self.handlers {
            handler.on_touch(phase, session);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::gesture::GestureDetail;

    struct Recorder {
        name: &'static str,
        priority: u32,
        consume: bool,
        seen: Vec<GestureKind>,
        phases: Vec<TouchPhase>,
    }

    impl Recorder {
        fn boxed(name: &'static str, priority: u32, consume: bool) -> Box<Self> {
            Box::new(Self {
                name,
                priority,
                consume,
                seen: Vec::new(),
                phases: Vec::new(),
            })
        }
    }

    impl GestureHandler for Recorder {
        fn name(&self) -> &str {
            self.name
        }

        fn priority(&self) -> u32 {
            self.priority
        }

        fn handle_gesture(&mut self, event: &GestureEvent) -> bool {
            self.seen.push(event.kind);
            self.consume
        }

        fn on_touch(&mut self, phase: TouchPhase, _session: &TouchSession) {
            self.phases.push(phase);
        }

        fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
            self
        }
    }

    fn tap() -> GestureEvent {
        GestureEvent::new(
            GestureKind::Tap,
            None,
            50,
            GestureDetail::Tap {
                duration: 50,
                count: 1,
                repeat: 0,
            },
        )
    }

    fn seen(router: &mut GestureRouter, name: &str) -> Vec<GestureKind> {
        router
            .get_handler_mut(name)
            .and_then(|h| h.as_any_mut().downcast_mut::<Recorder>())
            .map(|r| r.seen.clone())
            .unwrap_or_default()
    }

    #[test]
    fn test_handlers_sorted_by_priority() {
        let mut router = GestureRouter::new();
        router.register_handler(Recorder::boxed("scene", 10, false));
        router.register_handler(Recorder::boxed("overlay", 250, false));
        router.register_handler(Recorder::boxed("button", 120, false));

        let names: Vec<String> = router.debug_handlers().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["overlay", "button", "scene"]);
    }

    #[test]
    fn test_consumed_gesture_stops_propagation() {
        let mut router = GestureRouter::new();
        router.register_handler(Recorder::boxed("button", 120, true));
        router.register_handler(Recorder::boxed("scene", 10, false));

        let hits = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&hits);
        router.bind(GestureKind::Tap, move |_| *counter.borrow_mut() += 1);

        assert!(router.dispatch(&tap()));
        assert_eq!(seen(&mut router, "button"), vec![GestureKind::Tap]);
        assert!(seen(&mut router, "scene").is_empty());
        assert_eq!(*hits.borrow(), 0);
    }

    #[test]
    fn test_bindings_filter_by_kind() {
        let mut router = GestureRouter::new();
        let taps = Rc::new(RefCell::new(0));
        let presses = Rc::new(RefCell::new(0));

        let t = Rc::clone(&taps);
        router.bind(GestureKind::Tap, move |_| *t.borrow_mut() += 1);
        let p = Rc::clone(&presses);
        router.bind(GestureKind::Press, move |_| *p.borrow_mut() += 1);

        router.emit(tap());
        router.emit(tap());

        assert_eq!(*taps.borrow(), 2);
        assert_eq!(*presses.borrow(), 0);
        assert_eq!(router.debug_last_events().len(), 2);
    }

    #[test]
    fn test_unbind() {
        let mut router = GestureRouter::new();
        let hits = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&hits);
        let id = router.bind(GestureKind::Tap, move |_| *counter.borrow_mut() += 1);

        router.dispatch(&tap());
        assert!(router.unbind(id));
        assert!(!router.unbind(id));
        router.dispatch(&tap());

        assert_eq!(*hits.borrow(), 1);
        assert_eq!(router.binding_count(), 0);
    }

    #[test]
    fn test_observe_reaches_every_handler() {
        let mut router = GestureRouter::new();
        router.register_handler(Recorder::boxed("button", 120, true));
        router.register_handler(Recorder::boxed("scene", 10, false));

        let session = TouchSession::new(None);
        router.observe(TouchPhase::Start, &session);
        router.observe(TouchPhase::Move, &session);

        for name in ["button", "scene"] {
            let phases = router
                .get_handler_mut(name)
                .and_then(|h| h.as_any_mut().downcast_mut::<Recorder>())
                .map(|r| r.phases.clone())
                .unwrap_or_default();
            assert_eq!(phases, vec![TouchPhase::Start, TouchPhase::Move]);
        }
    }

    #[test]
    fn test_debug_events_bounded() {
        let mut router = GestureRouter::new();
        for _ in 0..(DEBUG_EVENT_LIMIT + 10) {
            router.dispatch(&tap());
        }
        assert_eq!(router.debug_last_events().len(), DEBUG_EVENT_LIMIT);

        router.clear_debug_events();
        assert!(router.debug_last_events().is_empty());
    }
}
