use crate::ingest::error::IngestError;
use glob::glob;
use std::path::PathBuf;

/// Input argument that reads standard input.
pub const STDIN_INPUT: &str = "-";

/// Expand input arguments into a list of files.
///
/// An argument naming an existing file is used as is. An argument containing
/// glob metacharacters is expanded, with matches sorted. Anything else is kept
/// so that opening it reports the real I/O error.
pub fn resolve_inputs(inputs: &[String]) -> Result<Vec<PathBuf>, IngestError> {
    let mut files = Vec::new();

    for input in inputs {
        let path = PathBuf::from(input);
        if input == STDIN_INPUT || path.is_file() || !is_pattern(input) {
            files.push(path);
            continue;
        }

        let mut matches: Vec<_> = glob(input)
            .map_err(|e| IngestError::Glob {
                pattern: input.clone(),
                source: e,
            })?
            .filter_map(Result::ok)
            .filter(|p| p.is_file())
            .collect();

        if matches.is_empty() {
            return Err(IngestError::NoMatches {
                pattern: input.clone(),
            });
        }

        matches.sort();
        files.extend(matches);
    }

    Ok(files)
}

fn is_pattern(input: &str) -> bool {
    input.contains(['*', '?', '['])
}
