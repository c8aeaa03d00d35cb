//! Loading command input: dictionaries, free-form arguments and errors.

use anyhow::{anyhow, Context, Result};
use dahdit_codec::{BackendError, Dictionary};

/// Loads the dictionary at `path`, or the standard one when `None`.
pub fn load_dictionary(path: Option<&str>) -> Result<Dictionary> {
    match path {
        Some(path) => Dictionary::from_path(path)
            .map_err(coded)
            .with_context(|| format!("Failed to load dictionary: {}", path)),
        None => Ok(Dictionary::standard()),
    }
}

/// Joins positional arguments into one input string.
pub fn join_args(args: &[String]) -> String {
    args.join(" ")
}

/// Wraps a library error so its stable code is shown to the user.
pub fn coded<E: BackendError>(err: E) -> anyhow::Error {
    anyhow!("[{}] {}", err.code(), err.message())
}
