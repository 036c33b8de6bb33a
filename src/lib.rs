//! mcinstall backs up a `.minecraft` directory and installs the contents of
//! an instance archive into it.

pub mod cli;
pub mod filesystem;
pub mod install;
pub mod models;
pub mod ui;
