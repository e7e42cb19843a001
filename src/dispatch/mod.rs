pub mod coordinator;
pub mod state;

pub use coordinator::Dispatcher;
pub use state::{DispatchState, Uniqueness};
