mod root;
mod list;
mod browse;
mod show;
mod render;

pub use root::Cli;
