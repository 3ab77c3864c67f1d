mod formatters;
mod metrics;
mod table;

pub use table::render_table;
