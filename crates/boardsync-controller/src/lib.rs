pub mod controller;
pub mod events;
pub mod notify;
pub mod state;

pub use controller::BoardStateController;
pub use events::BoardEvent;
pub use notify::{report_outcome, Notice, NoticeLevel, NotificationSink};
pub use state::ViewKey;
