//! Source pre‑filter applied before lexing.
//!
//! The lexer has no notion of comments or tabs; this pass removes `//`
//! comments up to the end of each line, collapses every run of tabs into a
//! single space, and trims trailing whitespace from the end of the text.
//! `//` inside a string literal is treated as a comment as well.

use log::debug;
use memchr::memmem;

pub fn filter(source: &str) -> String {
    let mut filtered = String::with_capacity(source.len());

    for (i, line) in source.split('\n').enumerate() {
        if i > 0 {
            filtered.push('\n');
        }

        let code: &str = match memmem::find(line.as_bytes(), b"//") {
            Some(pos) => &line[..pos],
            None => line,
        };

        let mut in_tabs = false;
        for c in code.chars() {
            if c == '\t' {
                if !in_tabs {
                    filtered.push(' ');
                }
                in_tabs = true;
            } else {
                filtered.push(c);
                in_tabs = false;
            }
        }
    }

    let kept = filtered.trim_end().len();
    filtered.truncate(kept);

    debug!("Pre-filter kept {} of {} bytes", filtered.len(), source.len());

    filtered
}
