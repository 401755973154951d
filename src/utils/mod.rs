pub mod environment;
pub mod terminal;

pub use environment::default_data_dir;
pub use terminal::strip_ansi_codes;
