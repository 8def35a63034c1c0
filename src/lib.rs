pub mod cli;
pub mod compositor;
pub mod config;
pub mod error;
pub mod items;
pub mod logging;
pub mod session;
pub mod toplevel;
pub mod wayland;

#[cfg(test)]
pub mod test_utils;
