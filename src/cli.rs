//! CLI domain: parse, route and output only.
//! No pipeline logic; the route table dispatches to the manifest builder.

mod output;
mod parse;
mod route;

pub use output::{format_scan_json, format_scan_text, map_error};
pub use parse::{Cli, Commands, ModuleArgs};
pub use route::RunContext;
