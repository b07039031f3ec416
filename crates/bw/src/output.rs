//! Progress reporting on stderr.
//!
//! Stdout is reserved for command results (`bw links` prints JSON there).

use std::path::Path;

use console::{Style, Term};

/// Terminal reporter for subnav generation.
pub(crate) struct Output {
    term: Term,
    dim: Style,
    green: Style,
    yellow: Style,
    red: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            dim: Style::new().dim(),
            green: Style::new().green(),
            yellow: Style::new().yellow(),
            red: Style::new().red(),
        }
    }

    /// Report the book being processed.
    pub(crate) fn book(&self, context_dir: &Path, check_all_links: bool) {
        let mode = if check_all_links { "strict" } else { "lenient" };
        let _ = self.term.write_line(&format!(
            "Book: {} {}",
            context_dir.display(),
            self.dim.apply_to(format!("({mode} link checking)"))
        ));
    }

    /// Report one product's subnav.
    pub(crate) fn product(&self, id: &str, top_level_entries: usize) {
        if top_level_entries == 0 {
            let msg = format!("  {id}: no navigation entries");
            let _ = self.term.write_line(&self.yellow.apply_to(msg).to_string());
        } else {
            let _ = self
                .term
                .write_line(&format!("  {id}: {top_level_entries} top-level entries"));
        }
    }

    /// Report completion.
    pub(crate) fn done(&self, subnavs: usize) {
        let msg = format!("Generated {subnavs} subnav(s)");
        let _ = self.term.write_line(&self.green.apply_to(msg).to_string());
    }

    /// Print an error message (red).
    pub(crate) fn error(&self, msg: &str) {
        let _ = self.term.write_line(&self.red.apply_to(msg).to_string());
    }
}
