use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use log::info;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::models::ConfigBox;

/// Magic bytes at the start of every file written by [`save_bin`]
pub const BINARY_MAGIC: &[u8; 4] = b"PUBN";
/// Bumped whenever the on-disk binary layout changes
pub const BINARY_FORMAT_VERSION: u16 = 1;

const BINARY_HEADER_LEN: usize = BINARY_MAGIC.len() + std::mem::size_of::<u16>();
const JSON_INDENT: &[u8] = b"    ";

/// Reads a YAML file into a [`ConfigBox`].
///
/// A document with no value (empty, only comments, or an explicit `null`)
/// is reported as [`Error::EmptyConfig`]. A top-level value that is not a
/// mapping, or a mapping keyed by a sequence or mapping, is a
/// [`Error::TypeMismatch`]. Merge keys (`<<: *anchor`) are expanded. Every
/// other failure is the underlying I/O or YAML error.
pub fn read_yaml<P: AsRef<Path>>(path: P) -> Result<ConfigBox> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;

    if is_blank_yaml(&content) {
        return Err(Error::EmptyConfig { path: path.to_path_buf() });
    }

    let mut value: serde_yaml::Value = serde_yaml::from_str(&content)?;
    if value.is_null() {
        return Err(Error::EmptyConfig { path: path.to_path_buf() });
    }
    value.apply_merge()?;

    // Only a key that is itself a sequence or mapping can fail to convert
    let value = serde_json::to_value(value).map_err(|_| Error::TypeMismatch {
        expected: "scalar mapping key",
        found: "non-scalar key",
    })?;
    let config = ConfigBox::try_from(value)?;
    info!("yaml file: {} loaded successfully", path.display());
    Ok(config)
}

fn is_blank_yaml(content: &str) -> bool {
    content.lines().map(str::trim).all(|line| {
        line.is_empty() || line.starts_with('#') || line == "---" || line == "..."
    })
}

/// Creates every directory in `paths`, parents included.
///
/// Directories that already exist are left alone. Creation stops at the
/// first failure; directories made before it stay on disk.
pub fn create_directories<I, P>(paths: I, verbose: bool) -> Result<()>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    for path in paths {
        let path = path.as_ref();
        fs::create_dir_all(path)?;
        if verbose {
            info!("created directory at: {}", path.display());
        }
    }
    Ok(())
}

/// Writes `data` as JSON with a four-space indent, replacing any existing file.
///
/// `data` must serialize to a JSON object; anything else is rejected before
/// the file is touched.
pub fn save_json<P, T>(path: P, data: &T) -> Result<()>
where
    P: AsRef<Path>,
    T: Serialize + ?Sized,
{
    let path = path.as_ref();
    let value = serde_json::to_value(data)?;
    if !value.is_object() {
        return Err(Error::type_mismatch("mapping", &value));
    }

    let mut writer = BufWriter::new(File::create(path)?);
    let formatter = serde_json::ser::PrettyFormatter::with_indent(JSON_INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
    value.serialize(&mut serializer)?;
    writer.flush()?;

    info!("json file saved at: {}", path.display());
    Ok(())
}

/// Reads a JSON object from `path` into a [`ConfigBox`].
pub fn load_json<P: AsRef<Path>>(path: P) -> Result<ConfigBox> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);
    let value: serde_json::Value = serde_json::from_reader(reader)?;
    let config = ConfigBox::try_from(value)?;

    info!("json file loaded successfully from: {}", path.display());
    Ok(config)
}

/// Reads a value previously written with [`save_bin`].
pub fn load_bin<T, P>(path: P) -> Result<T>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    let payload = check_binary_header(path, &bytes)?;
    let data = bincode::deserialize(payload)?;

    info!("binary file loaded from: {}", path.display());
    Ok(data)
}

/// Serializes `data` to `path`, replacing any existing file.
pub fn save_bin<T, P>(data: &T, path: P) -> Result<()>
where
    T: Serialize + ?Sized,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let payload = bincode::serialize(data)?;

    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(BINARY_MAGIC)?;
    writer.write_all(&BINARY_FORMAT_VERSION.to_le_bytes())?;
    writer.write_all(&payload)?;
    writer.flush()?;

    info!("binary file saved at: {}", path.display());
    Ok(())
}

fn check_binary_header<'a>(path: &Path, bytes: &'a [u8]) -> Result<&'a [u8]> {
    let incompatible = |reason: String| Error::IncompatibleFormat {
        path: path.to_path_buf(),
        reason,
    };

    if bytes.len() < BINARY_HEADER_LEN || &bytes[..BINARY_MAGIC.len()] != BINARY_MAGIC {
        return Err(incompatible("missing binary header".to_string()));
    }

    let version = u16::from_le_bytes([bytes[4], bytes[5]]);
    if version != BINARY_FORMAT_VERSION {
        return Err(incompatible(format!(
            "format version {} (expected {})",
            version, BINARY_FORMAT_VERSION
        )));
    }

    Ok(&bytes[BINARY_HEADER_LEN..])
}

/// Size of the file at `path` as `"~ N KB"`, rounded to the nearest
/// kilobyte with ties going to the even neighbour.
pub fn get_size<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    let bytes = fs::metadata(path)?.len();
    let size_in_kb = (bytes as f64 / 1024.0).round_ties_even() as u64;

    info!("size of {}: {} bytes", path.display(), bytes);
    Ok(format!("~ {} KB", size_in_kb))
}
