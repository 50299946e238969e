//! Byte loaders for message files.
//!
//! A [`Loader`] turns a path into the raw bytes of a message file. The
//! bundle builder only depends on the trait, so message files can live on
//! disk ([`FsLoader`]), inside the binary ([`EmbedLoader`]), or anywhere a
//! closure can reach.

use rust_embed::RustEmbed;
use std::fmt;
use std::fs;
use std::io;
use std::marker::PhantomData;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// Loads the raw contents of a message file
pub trait Loader: Send + Sync {
    /// Return the bytes stored at `path`
    fn load_message(&self, path: &Path) -> io::Result<Vec<u8>>;
}

impl<F> Loader for F
where
    F: Fn(&Path) -> io::Result<Vec<u8>> + Send + Sync,
{
    fn load_message(&self, path: &Path) -> io::Result<Vec<u8>> {
        self(path)
    }
}

/// Reads message files from the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FsLoader;

impl Loader for FsLoader {
    fn load_message(&self, path: &Path) -> io::Result<Vec<u8>> {
        debug!("Reading message file from disk: {:?}", path);
        fs::read(path)
    }
}

/// Reads message files compiled into the binary with `rust-embed`.
///
/// Paths are normalized before lookup: `.` components are dropped and
/// separators become `/`. With [`EmbedLoader::strip_prefix`] the same root
/// path can be used for the embedded and the on-disk layout.
///
/// ```ignore
/// #[derive(rust_embed::RustEmbed)]
/// #[folder = "localize/"]
/// struct Messages;
///
/// let loader = EmbedLoader::<Messages>::new().strip_prefix("localize");
/// ```
pub struct EmbedLoader<E> {
    prefix: Option<PathBuf>,
    _assets: PhantomData<fn() -> E>,
}

impl<E: RustEmbed> EmbedLoader<E> {
    /// Create a loader over the embedded asset folder `E`
    pub fn new() -> Self {
        Self {
            prefix: None,
            _assets: PhantomData,
        }
    }

    /// Remove `prefix` from requested paths before the lookup
    pub fn strip_prefix(mut self, prefix: impl Into<PathBuf>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Asset key for a requested path
    fn asset_key(&self, path: &Path) -> String {
        let parts: Vec<_> = normal_components(path).collect();
        let skip = match &self.prefix {
            Some(prefix) => {
                let prefix: Vec<_> = normal_components(prefix).collect();
                if parts.starts_with(&prefix) {
                    prefix.len()
                } else {
                    0
                }
            }
            None => 0,
        };
        parts[skip..].join("/")
    }
}

fn normal_components(path: &Path) -> impl Iterator<Item = String> + '_ {
    path.components().filter_map(|component| match component {
        Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
        _ => None,
    })
}

impl<E: RustEmbed> Default for EmbedLoader<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for EmbedLoader<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmbedLoader")
            .field("assets", &std::any::type_name::<E>())
            .field("prefix", &self.prefix)
            .finish()
    }
}

impl<E: RustEmbed> Loader for EmbedLoader<E> {
    fn load_message(&self, path: &Path) -> io::Result<Vec<u8>> {
        let key = self.asset_key(path);
        debug!("Reading embedded message file: {}", key);
        E::get(&key)
            .map(|file| file.data.into_owned())
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("embedded message file not found: {key}"),
                )
            })
    }
}
