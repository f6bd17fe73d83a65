//! Merging a note's link graph into a flat document
//!
//! Every link line in the input is replaced by the referenced note's
//! body. One invocation makes up to `max_depth` passes, stopping early
//! when a pass substitutes nothing; deeper unfolding is the caller's
//! loop (the output is plain text, made to be piped back in).

use std::path::Path;

use crate::error::{Result, ZetError};
use crate::meta;
use crate::note::NoteParser;

/// Expand link lines in `text` against the notes under `zet_dir`.
///
/// A link whose target directory has no note is left untouched.
pub fn merge(zet_dir: &Path, text: &str, max_depth: usize) -> Result<String> {
    let parser = NoteParser::new();
    let mut current = text.to_string();

    for _ in 0..max_depth {
        let (expanded, substitutions) = expand_once(&parser, zet_dir, &current)?;
        current = expanded;
        if substitutions == 0 {
            break;
        }
    }

    Ok(current)
}

/// Replace each link line with its target's body. Returns the new
/// text and the number of substitutions made.
fn expand_once(parser: &NoteParser, zet_dir: &Path, text: &str) -> Result<(String, usize)> {
    let mut out: Vec<String> = Vec::new();
    let mut substitutions = 0;

    for line in text.lines() {
        match parser.link_target(line) {
            Some(dir_name) => match meta::body(&zet_dir.join(&dir_name)) {
                Ok(body) => {
                    substitutions += 1;
                    out.push(body);
                }
                Err(ZetError::NotFound { .. }) => out.push(line.to_string()),
                Err(e) => return Err(e),
            },
            None => out.push(line.to_string()),
        }
    }

    Ok((out.join("\n"), substitutions))
}
