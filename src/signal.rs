use std::{cell::RefCell, rc::Rc};

/// Handle returned by [`Signal::connect`], used to disconnect the handler later.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

type Handler<T> = Box<dyn FnMut(&T)>;

struct Slots<T> {
    next_id: u64,
    handlers: Vec<(HandlerId, Option<Handler<T>>)>,
}

/// A list of handlers notified, in connection order, each time a value is emitted.
///
/// Clones share the same handler list, so a handler can hold a clone of the signal it is connected
/// to and disconnect itself while it runs. Handlers connected during an emission are only notified
/// by the following emissions; handlers disconnected during an emission are not notified anymore,
/// even by the emission in progress.
pub struct Signal<T> {
    slots: Rc<RefCell<Slots<T>>>,
}

impl<T> Signal<T> {
    pub fn new() -> Self {
        Self { slots: Rc::new(RefCell::new(Slots { next_id: 0, handlers: Vec::new() })) }
    }

    /// Adds a handler at the end of the list.
    pub fn connect(&self, handler: impl FnMut(&T) + 'static) -> HandlerId {
        let mut slots = self.slots.borrow_mut();
        let id = HandlerId(slots.next_id);
        slots.next_id += 1;
        slots.handlers.push((id, Some(Box::new(handler))));
        id
    }

    /// Removes a handler. Returns false if it was not connected.
    pub fn disconnect(&self, id: HandlerId) -> bool {
        let mut slots = self.slots.borrow_mut();
        let before = slots.handlers.len();
        slots.handlers.retain(|(handler_id, _)| *handler_id != id);
        slots.handlers.len() != before
    }

    pub fn handler_count(&self) -> usize {
        self.slots.borrow().handlers.len()
    }

    /// Notifies every connected handler with `value`.
    pub fn emit(&self, value: &T) {
        let ids: Vec<HandlerId> = self.slots.borrow().handlers.iter().map(|(id, _)| *id).collect();

        for id in ids {
            // The handler is taken out of its slot while it runs so it can reach the signal again.
            let handler = self
                .slots
                .borrow_mut()
                .handlers
                .iter_mut()
                .find(|(handler_id, _)| *handler_id == id)
                .and_then(|(_, handler)| handler.take());

            let Some(mut handler) = handler else {
                continue;
            };
            handler(value);

            if let Some((_, slot)) =
                self.slots.borrow_mut().handlers.iter_mut().find(|(handler_id, _)| *handler_id == id)
            {
                *slot = Some(handler);
            }
        }
    }
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self { slots: Rc::clone(&self.slots) }
    }
}

impl<T> Default for Signal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Signal({} handlers)", self.handler_count())
    }
}
