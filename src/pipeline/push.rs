//! Push strategy - one effect per `{{name()}}` binding.

use std::cell::Cell;
use std::rc::Weak;

use tracing::{trace, warn};

use crate::component::TextSource;
use crate::dom::Dom;
use crate::reactive::effect;
use crate::types::NodeId;

/// Keep `anchor` in sync with `source`.
///
/// The effect reads `source` with tracking on, so every signal behind it
/// becomes a dependency. The first run only subscribes: the anchor already
/// holds the value written by the compiler. Later runs write unconditionally.
///
/// The effect holds the document and the component state weakly; once either
/// is gone a run is a no-op.
pub fn bind_text(dom: Weak<dyn Dom>, anchor: NodeId, source: TextSource) {
    let first = Cell::new(true);
    effect(move || {
        let Some(value) = source() else {
            return;
        };
        if first.replace(false) {
            return;
        }
        let Some(dom) = dom.upgrade() else {
            return;
        };
        trace!(anchor = anchor.index(), value = value.as_str(), "push write");
        if let Err(err) = dom.set_text_content(anchor, &value) {
            warn!(anchor = anchor.index(), %err, "push write failed");
        }
    });
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::dom::Document;
    use crate::reactive::signal;

    #[test]
    fn test_first_run_does_not_write() {
        let doc = Rc::new(Document::new());
        let anchor = doc.create_element("span");
        let value = signal(1);

        let source_value = value.clone();
        let dom: Rc<dyn Dom> = doc.clone();
        bind_text(
            Rc::downgrade(&dom),
            anchor,
            Rc::new(move || Some(source_value.get().to_string())),
        );

        assert_eq!(doc.writes_to(anchor), 0);
        assert_eq!(value.dependent_count(), 1);
    }

    #[test]
    fn test_every_set_writes() {
        let doc = Rc::new(Document::new());
        let anchor = doc.create_element("span");
        let value = signal(1);

        let source_value = value.clone();
        let dom: Rc<dyn Dom> = doc.clone();
        bind_text(
            Rc::downgrade(&dom),
            anchor,
            Rc::new(move || Some(source_value.get().to_string())),
        );

        value.set(2);
        assert_eq!(doc.text_content(anchor).unwrap(), "2");
        // No equality short-circuit
        value.set(2);
        assert_eq!(doc.writes_to(anchor), 2);
    }

    #[test]
    fn test_dropped_document_is_a_no_op() {
        let value = signal(1);
        let weak_dom = {
            let doc: Rc<dyn Dom> = Rc::new(Document::new());
            let anchor = doc.create_element("span");
            let source_value = value.clone();
            bind_text(
                Rc::downgrade(&doc),
                anchor,
                Rc::new(move || Some(source_value.get().to_string())),
            );
            Rc::downgrade(&doc)
        };

        assert!(weak_dom.upgrade().is_none());
        value.set(5);
        assert_eq!(value.peek(), 5);
        assert_eq!(value.dependent_count(), 1);
    }

    #[test]
    fn test_dropped_state_stops_writes() {
        let doc = Rc::new(Document::new());
        let anchor = doc.create_element("span");
        let value = signal(1);

        let state = Rc::new(value.clone());
        let weak_state = Rc::downgrade(&state);
        let dom: Rc<dyn Dom> = doc.clone();
        bind_text(
            Rc::downgrade(&dom),
            anchor,
            Rc::new(move || weak_state.upgrade().map(|v| v.get().to_string())),
        );

        value.set(2);
        assert_eq!(doc.writes_to(anchor), 1);

        drop(state);
        value.set(3);
        assert_eq!(doc.writes_to(anchor), 1);
        assert_eq!(doc.text_content(anchor).unwrap(), "2");
    }
}
