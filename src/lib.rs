pub mod console;
pub mod device;
pub mod menu;
