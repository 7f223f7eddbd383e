pub mod info;
pub mod settings;
