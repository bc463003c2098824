//! Admin activity panel.
//!
//! The panel is a pure reducer over [`PanelState`] plus a [`Panel`] engine
//! that performs the effects it asks for: REST calls through an
//! [`activities_client::ActivityBackend`], confirmations and notices through
//! an [`Interaction`], and hide timers for transient messages. Rendering is a
//! separate pure function of the state.

pub mod engine;
pub mod event;
pub mod forms;
pub mod ids;
pub mod reducer;
pub mod state;
pub mod templates;
pub mod traits;

pub use engine::{Panel, DEFAULT_MESSAGE_HIDE};
pub use event::{Effect, Outcome, PanelEvent};
pub use forms::{parse_max_participants, CreateForm, EditForm};
pub use reducer::reduce;
pub use state::{Card, MessageKind, MessageSlot, MessageTarget, PanelState};
pub use templates::{render_activity_list, render_page};
pub use traits::Interaction;
