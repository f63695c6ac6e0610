//! Order Board: a kanban board for restaurant orders.
//!
//! ## Overview
//!
//! Orders are cards on a board of four status columns. Users add orders
//! through an overlay form, click a card to edit or delete it, and drag it
//! onto another column to change its status. The page is modelled as an
//! in-memory [`dom::Document`]; the document is the single source of truth
//! for which orders exist and where they sit.
//!
//! ## Module Map
//!
//! ```text
//!   Gesture script ──lower()──> DomEvent ──dispatch()──> BoardController
//!   (gesture.rs)                (events.rs)              (controller.rs)
//!                                                          │
//!                   ┌──────────────┬───────────────────────┼──────────────┐
//!                   v              v                       v              v
//!              view.rs        render.rs                drag.rs      changes.rs
//!          (ViewBindings)  (order cards)          (DragTracker)  (BoardChange)
//!                   │              │
//!                   └──────┬───────┘
//!                          v
//!                       dom.rs  (Document, NodeId, Element)
//! ```
//!
//! | Module       | Responsibility                                          |
//! |--------------|---------------------------------------------------------|
//! | `models`     | `Order`, `Column`, `BoardView`                          |
//! | `state`      | `BoardState` (drag tracker, active order), settings     |
//! | `controller` | Help/add/edit/delete/move/drag handlers                 |
//! | `events`     | `DomEvent` routing to handlers                          |
//! | `gesture`    | Script format and lowering to events                    |

pub mod changes;
pub mod controller;
pub mod dom;
pub mod drag;
pub mod events;
pub mod gesture;
pub mod models;
pub mod render;
pub mod state;
pub mod view;

pub use changes::BoardChange;
pub use controller::BoardController;
pub use events::{DispatchOutcome, DomEvent};
pub use gesture::{Gesture, Script, StepReport, perform, run_script};
pub use models::{BoardView, Column, ColumnView, Order};
pub use state::{BoardSettings, BoardState, Overlay};
