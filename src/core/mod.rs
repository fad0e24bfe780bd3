pub mod clock;
pub mod controller;
pub mod log;
pub mod sensor;
pub mod summary;
pub mod watch;
