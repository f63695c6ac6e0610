//! Document events and their routing to board handlers.
//!
//! Routing mirrors where listeners sit on the page: clicks are matched
//! against the bound controls on the event path, submits against the two
//! forms, dragstart/dragend against the column lists and dragover against
//! the drop areas. Events on anything else are ignored.

use tracing::{debug, warn};

use super::controller::BoardController;
use super::dom::NodeId;
use super::render::closest_order;
use super::state::Overlay;
use crate::errors::BoardError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomEvent {
    Load,
    Click { target: NodeId },
    /// Typing into a form field.
    Input { target: NodeId, value: String },
    Submit { target: NodeId },
    DragStart { target: NodeId },
    DragOver { target: NodeId },
    DragEnd { target: NodeId },
}

impl DomEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::Click { .. } => "click",
            Self::Input { .. } => "input",
            Self::Submit { .. } => "submit",
            Self::DragStart { .. } => "dragstart",
            Self::DragOver { .. } => "dragover",
            Self::DragEnd { .. } => "dragend",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DispatchOutcome {
    /// A handler was bound to the event's target.
    pub handled: bool,
    pub default_prevented: bool,
}

impl DispatchOutcome {
    fn ignored() -> Self {
        Self::default()
    }

    fn handled(default_prevented: bool) -> Self {
        Self {
            handled: true,
            default_prevented,
        }
    }
}

impl BoardController {
    /// Run the handler bound to `event`'s target. A failing handler leaves
    /// the board as it was before the failing step and reports the error;
    /// the board stays usable for later events.
    pub fn dispatch(&mut self, event: &DomEvent) -> Result<DispatchOutcome, BoardError> {
        let result = self.route(event);
        match &result {
            Ok(outcome) => debug!(event = event.name(), handled = outcome.handled, "dispatched"),
            Err(e) => warn!(event = event.name(), error = %e, "handler failed"),
        }
        result
    }

    fn route(&mut self, event: &DomEvent) -> Result<DispatchOutcome, BoardError> {
        match event {
            DomEvent::Load => {
                self.on_load()?;
                Ok(DispatchOutcome::handled(false))
            }
            DomEvent::Click { target } => self.route_click(*target),
            DomEvent::Input { target, value } => {
                self.set_field(*target, value)?;
                Ok(DispatchOutcome::handled(false))
            }
            DomEvent::Submit { target } => {
                if self.submit_form(*target)? {
                    Ok(DispatchOutcome::handled(true))
                } else {
                    Ok(DispatchOutcome::ignored())
                }
            }
            DomEvent::DragStart { target } => {
                if !self.on_column_list(*target) {
                    return Ok(DispatchOutcome::ignored());
                }
                if self.drag_start(*target)? {
                    Ok(DispatchOutcome::handled(false))
                } else {
                    Ok(DispatchOutcome::ignored())
                }
            }
            DomEvent::DragOver { target } => {
                let path = self.document().ancestors(*target);
                if !path.iter().any(|n| self.view().is_area(*n)) {
                    return Ok(DispatchOutcome::ignored());
                }
                self.drag_over(*target)?;
                Ok(DispatchOutcome::handled(true))
            }
            DomEvent::DragEnd { target } => {
                if !self.on_column_list(*target) {
                    return Ok(DispatchOutcome::ignored());
                }
                self.drag_end()?;
                Ok(DispatchOutcome::handled(false))
            }
        }
    }

    fn on_column_list(&self, target: NodeId) -> bool {
        self.document()
            .ancestors(target)
            .iter()
            .any(|n| self.view().is_column(*n))
    }

    fn route_click(&mut self, target: NodeId) -> Result<DispatchOutcome, BoardError> {
        let path = self.document().ancestors(target);
        let on = |node: NodeId| path.contains(&node);
        let view = self.view().clone();

        if on(view.other.add) || on(view.add.cancel) {
            if on(view.add.cancel) {
                self.close_add()?;
            } else {
                self.toggle_add()?;
            }
        } else if on(view.other.help) {
            self.toggle_help()?;
        } else if on(view.help.cancel) || on(view.help.close) {
            self.close_help()?;
        } else if on(view.edit.cancel) {
            self.close_edit()?;
        } else if on(view.edit.delete) {
            self.delete_active()?;
        } else if on(view.other.grid) {
            let Some(card) = closest_order(self.document(), target) else {
                return Ok(DispatchOutcome::ignored());
            };
            let Some(id) = self.document().attr(card, "data-id").map(str::to_string) else {
                return Ok(DispatchOutcome::ignored());
            };
            if self.is_overlay_open(Overlay::Edit) && self.active_order() == Some(id.as_str()) {
                self.close_edit()?;
            } else {
                self.open_edit(&id)?;
            }
        } else {
            return Ok(DispatchOutcome::ignored());
        }
        Ok(DispatchOutcome::handled(true))
    }
}
