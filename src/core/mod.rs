pub mod amend;
pub mod clock;
pub mod dispatcher;
pub mod session;
pub mod summary;
