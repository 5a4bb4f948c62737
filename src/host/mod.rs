//! Terminal host.
//!
//! Draws a mounted [`Document`](crate::dom::Document) to the terminal and turns
//! key presses into clicks, so an app can be driven without a browser.
//!
//! ```ignore
//! let doc = Rc::new(Document::new());
//! let app = mount::<AppComponent>(doc.clone(), &registry, RenderOptions::default())?;
//! spark_dom::host::run(&app, &doc)?;
//! ```

mod focus;
mod input;
mod render;
mod terminal;

pub use focus::FocusRing;
pub use input::{convert_key_event, read_command, HostCommand};
pub use render::{render_lines, Line, Span};
pub use terminal::{run, TerminalView};
