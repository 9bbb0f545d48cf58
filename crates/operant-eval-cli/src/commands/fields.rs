//! Field catalog listing command.

use anyhow::Result;
use operant_eval::{AggKind, Field, FilterKind};

pub fn run() -> Result<()> {
    println!("{:<22} {:<10} {:<8}", "Column", "Kind", "Filter");
    println!("{:-<42}", "");
    for field in Field::ALL {
        let kind = match field.kind() {
            AggKind::Raw => "raw",
            AggKind::Index => "index",
            AggKind::Mean => "mean",
            AggKind::Sum => "sum",
            AggKind::Derived => "derived",
        };
        let filter = match field.filter_kind() {
            FilterKind::None => "-",
            FilterKind::List => "list",
            FilterKind::Range => "range",
        };
        println!("{:<22} {:<10} {:<8}", field.name(), kind, filter);
    }
    Ok(())
}
