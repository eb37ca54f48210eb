mod play;
mod table;
mod verify;

pub use play::handle_play_command;
pub use table::{handle_table_command, render_table};
pub use verify::handle_verify_command;
