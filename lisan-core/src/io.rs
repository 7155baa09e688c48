use std::fs::File;
use std::io::{BufReader, ErrorKind};
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::{LisanError, Result};

/// Reads and deserializes a whole JSON file.
///
/// - A missing file is reported as `MissingDataFile`
/// - Any other I/O failure is reported as `Io`
pub(crate) fn read_json<T, P>(path: P) -> Result<T>
where
	T: DeserializeOwned,
	P: AsRef<Path>,
{
	let path = path.as_ref();
	let file = File::open(path).map_err(|e| match e.kind() {
		ErrorKind::NotFound => LisanError::MissingDataFile(path.to_path_buf()),
		_ => LisanError::Io(e),
	})?;
	Ok(serde_json::from_reader(BufReader::new(file))?)
}
