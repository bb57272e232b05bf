//! Application-Layer: Resolver, Zustandskanal, Dispatcher und Werkzeug.

pub mod channel;
pub mod dispatcher;
pub mod events;
pub mod executor;
pub mod overlay;
pub mod panel;
pub mod producer;
pub mod resolver;
pub mod snap;
pub mod state;
pub mod tool;

pub use channel::StateChannel;
pub use dispatcher::{DispatchOutcome, IgnoreReason};
pub use events::ToolInput;
pub use executor::{ActionQueue, ActionSender, DeferredAction, ExecutorError, MutationExecutor};
pub use overlay::build_overlay;
pub use panel::{LogPanel, NodePanel};
pub use producer::ControlPointProducer;
pub use resolver::ControlPointResolver;
pub use state::{PublishedState, SelectionState, ToolPhase};
pub use tool::NodeControllerTool;
