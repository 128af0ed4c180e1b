use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::Error;

/// Create or truncate `path` and write `text` to it.
pub fn write_text(path: &Path, text: &str) -> Result<(), Error> {
    let name = path.display().to_string();
    let mut file = File::create(path).map_err(|e| Error::FileCreate(name.clone(), e))?;
    file.write_all(text.as_bytes())
        .map_err(|e| Error::FileWrite(name, e))
}
