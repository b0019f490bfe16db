use console::style;

use crate::{error::Result, structs::{file::FileKind, server::Server}};

use super::scan_world;

pub fn debug_files(server: &Server) -> Result<()> {
    let registry = scan_world(server)?;

    for kind in FileKind::ALL {
        let records = registry.get(kind);
        println!("{}", style(format!("{kind} ({})", records.len())).bold());
        for record in records {
            println!("{}", record.path.display());
        }
    }

    Ok(())
}
