pub mod override_field;
pub mod session_event;
pub mod session_state;
pub mod work_record;

pub use override_field::{BreakPart, OverrideField};
pub use session_event::SessionEvent;
pub use session_state::SessionState;
pub use work_record::{BreakInterval, WorkRecord};
