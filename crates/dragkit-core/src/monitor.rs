//! Drag event listeners.
//!
//! [`Monitor`] is a cheap clonable handle to a shared listener list. Dispatch
//! works on a copy of the list taken before the first callback runs, so a
//! listener may subscribe or unsubscribe (itself or others) from inside a
//! callback. Changes made during a dispatch take effect from the next event.

use crate::operation::DragOperation;
use crate::registry::EntityId;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Events emitted by the drag manager, in tick order.
#[derive(Debug, Clone, Copy)]
pub enum DragEvent<'a> {
    /// A drag operation started.
    Start(&'a DragOperation),
    /// The transform or pointer position changed.
    Move(&'a DragOperation),
    /// The resolved target changed.
    Over {
        operation: &'a DragOperation,
        previous_target: Option<&'a EntityId>,
        target: Option<&'a EntityId>,
    },
    /// The operation ended; `operation.canceled` tells drop from cancel.
    End(&'a DragOperation),
}

impl<'a> DragEvent<'a> {
    /// Get the operation the event refers to.
    pub fn operation(&self) -> &'a DragOperation {
        match *self {
            DragEvent::Start(operation)
            | DragEvent::Move(operation)
            | DragEvent::End(operation)
            | DragEvent::Over { operation, .. } => operation,
        }
    }

    /// Short name, useful for logging.
    pub fn name(&self) -> &'static str {
        match self {
            DragEvent::Start(_) => "dragstart",
            DragEvent::Move(_) => "dragmove",
            DragEvent::Over { .. } => "dragover",
            DragEvent::End(_) => "dragend",
        }
    }
}

/// Handle returned by [`Monitor::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Rc<dyn Fn(&DragEvent<'_>)>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(ListenerId, Listener)>,
}

/// Shared list of drag event listeners.
#[derive(Clone, Default)]
pub struct Monitor {
    listeners: Rc<RefCell<Listeners>>,
}

impl fmt::Debug for Monitor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Monitor")
            .field("listeners", &self.len())
            .finish()
    }
}

impl Monitor {
    /// Create a monitor with no listeners.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for every subsequent event.
    pub fn subscribe(&self, listener: impl Fn(&DragEvent<'_>) + 'static) -> ListenerId {
        let listener: Listener = Rc::new(listener);
        let mut listeners = self.listeners.borrow_mut();
        let id = ListenerId(listeners.next_id);
        listeners.next_id += 1;
        listeners.entries.push((id, listener));
        id
    }

    /// Remove a listener. Returns `false` if it was not subscribed.
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.entries.len();
        listeners.entries.retain(|(other, _)| *other != id);
        listeners.entries.len() != before
    }

    /// Number of subscribed listeners.
    pub fn len(&self) -> usize {
        self.listeners.borrow().entries.len()
    }

    /// Check if no listener is subscribed.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Invoke every listener subscribed when dispatch begins.
    pub fn dispatch(&self, event: &DragEvent<'_>) {
        let snapshot: Vec<Listener> = self
            .listeners
            .borrow()
            .entries
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();

        for listener in snapshot {
            listener(event);
        }
    }
}
