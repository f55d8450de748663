pub mod deck;
pub mod history;
pub mod quiz;
pub mod share;
pub mod util;

mod app_state;
pub use app_state::{
    AppState, AuthStatus, FormError, HistoryState, PlaylistState, PreviewState, SessionState,
    WrapState,
};

mod logic;
pub use logic::{Logic, LogicArgs};

mod tokio_thread;

#[cfg(feature = "audio")]
mod preview_thread;

pub use wrapped_api as wa;
pub use wrapped_state;
