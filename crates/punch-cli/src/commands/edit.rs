//! Edit command for rewriting the whole state in an editor.

use std::io::Write;

use anyhow::Result;
use punch_core::{Editor, edit_state};
use punch_store::Store;

pub fn run<W: Write, S: Store>(writer: &mut W, store: &mut S, editor: &dyn Editor) -> Result<()> {
    let state = store.load()?;
    let Some(updated) = edit_state(&state, editor)? else {
        writeln!(writer, "No changes.")?;
        return Ok(());
    };

    store.dump(&updated)?;
    writeln!(
        writer,
        "Saved edited state: {} logged, {} interrupted.",
        updated.work().count(),
        updated.depth()
    )?;
    Ok(())
}
