pub mod down;
pub mod up;

pub use down::DownCommand;
pub use up::UpCommand;
