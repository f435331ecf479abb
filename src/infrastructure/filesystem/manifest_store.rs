use fs2::FileExt;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::entities::manifest::{LocalManifest, ManifestElement};

/// Declaration written at the top of every saved manifest
pub const XML_HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Manifest store related errors
#[derive(Debug, Error)]
pub enum ManifestStoreError {
    #[error("XML parsing failed: {0}")]
    XmlParsingFailed(String),

    #[error("XML serialization failed: {0}")]
    XmlSerializationFailed(String),

    #[error("Manifest root must be <manifest>, found <{0}>")]
    UnexpectedRoot(String),

    #[error("Manifest document has no root element")]
    MissingRoot,

    #[error("Manifest file write failed for {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not lock manifest {path}: {source}")]
    LockFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory creation failed for {path}: {source}")]
    DirectoryCreationFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Parse a manifest document into an element tree.
///
/// Text content and comments are dropped; only elements and their attributes
/// survive.
pub fn parse_manifest(xml: &str) -> Result<LocalManifest, ManifestStoreError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<ManifestElement> = Vec::new();
    let mut root: Option<ManifestElement> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => stack.push(element_from(e)?),
            Ok(Event::Empty(ref e)) => {
                let element = element_from(e)?;
                attach(&mut stack, &mut root, element)?;
            }
            Ok(Event::End(_)) => {
                let element = stack.pop().ok_or_else(|| {
                    ManifestStoreError::XmlParsingFailed("unexpected closing tag".to_string())
                })?;
                attach(&mut stack, &mut root, element)?;
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ManifestStoreError::XmlParsingFailed(e.to_string())),
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(ManifestStoreError::XmlParsingFailed(format!(
            "element <{}> is never closed",
            open.name
        )));
    }

    let root = root.ok_or(ManifestStoreError::MissingRoot)?;
    let name = root.name.clone();
    LocalManifest::from_root(root).ok_or(ManifestStoreError::UnexpectedRoot(name))
}

/// Render a manifest with the XML declaration and two-space indentation.
pub fn render_manifest(manifest: &LocalManifest) -> Result<String, ManifestStoreError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(serialization_failed)?;
    write_element(&mut writer, manifest.root())?;

    let mut xml = String::from_utf8(writer.into_inner()).map_err(serialization_failed)?;
    xml.push('\n');
    Ok(xml)
}

fn serialization_failed<E: std::fmt::Display>(e: E) -> ManifestStoreError {
    ManifestStoreError::XmlSerializationFailed(e.to_string())
}

fn element_from(start: &BytesStart) -> Result<ManifestElement, ManifestStoreError> {
    let mut element = ManifestElement::new(String::from_utf8_lossy(start.name().as_ref()));
    for attr in start.attributes() {
        let attr = attr
            .map_err(|e| ManifestStoreError::XmlParsingFailed(format!("Invalid attribute: {}", e)))?;
        let value = attr.unescape_value().map_err(|e| {
            ManifestStoreError::XmlParsingFailed(format!("Invalid attribute value: {}", e))
        })?;
        element
            .attributes
            .push((String::from_utf8_lossy(attr.key.as_ref()).into_owned(), value.into_owned()));
    }
    Ok(element)
}

fn attach(
    stack: &mut [ManifestElement],
    root: &mut Option<ManifestElement>,
    element: ManifestElement,
) -> Result<(), ManifestStoreError> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
        return Ok(());
    }
    if root.is_some() {
        return Err(ManifestStoreError::XmlParsingFailed(
            "document has more than one root element".to_string(),
        ));
    }
    *root = Some(element);
    Ok(())
}

fn write_element(
    writer: &mut Writer<Vec<u8>>,
    element: &ManifestElement,
) -> Result<(), ManifestStoreError> {
    let mut start = BytesStart::new(element.name.as_str());
    for (key, value) in &element.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if element.children.is_empty() {
        writer.write_event(Event::Empty(start)).map_err(serialization_failed)?;
        return Ok(());
    }

    writer.write_event(Event::Start(start)).map_err(serialization_failed)?;
    for child in &element.children {
        write_element(writer, child)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new(element.name.as_str())))
        .map_err(serialization_failed)?;
    Ok(())
}

/// Loads and persists the local manifest file
#[derive(Debug, Clone)]
pub struct ManifestStore {
    /// Manifest file path
    path: PathBuf,
}

impl ManifestStore {
    /// Create a store for the manifest at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the manifest.
    ///
    /// A missing, unreadable or corrupt file yields an empty `<manifest>`.
    pub fn load(&self) -> LocalManifest {
        Self::load_from(&self.path)
    }

    /// Load any manifest file with the same empty-default recovery as [`Self::load`].
    pub fn load_from(path: &Path) -> LocalManifest {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                debug!("Manifest {} not readable ({}), starting empty", path.display(), e);
                return LocalManifest::new();
            }
        };

        match parse_manifest(&content) {
            Ok(manifest) => manifest,
            Err(e) => {
                warn!("Manifest {} is corrupt ({}), starting empty", path.display(), e);
                LocalManifest::new()
            }
        }
    }

    /// Write the whole manifest, replacing the file through a temporary sibling.
    pub fn save(&self, manifest: &LocalManifest) -> Result<(), ManifestStoreError> {
        let xml = render_manifest(manifest)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|source| {
                    ManifestStoreError::DirectoryCreationFailed {
                        path: parent.to_path_buf(),
                        source,
                    }
                })?;
            }
        }

        let temp_path = self.sibling(&format!(".{}.tmp", std::process::id()), true);
        let write_failed = |source| ManifestStoreError::WriteFailed {
            path: self.path.clone(),
            source,
        };

        let mut temp_file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)
            .map_err(write_failed)?;
        temp_file.write_all(xml.as_bytes()).map_err(write_failed)?;
        temp_file.sync_all().map_err(write_failed)?;
        drop(temp_file);

        fs::rename(&temp_path, &self.path).map_err(write_failed)?;
        debug!("Wrote manifest {}", self.path.display());
        Ok(())
    }

    /// Load, mutate and save the manifest while holding an exclusive lock.
    pub fn update<T, F>(&self, mutate: F) -> Result<T, ManifestStoreError>
    where
        F: FnOnce(&mut LocalManifest) -> T,
    {
        let lock_path = self.sibling(".lock", false);
        if let Some(parent) = lock_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| {
                    ManifestStoreError::DirectoryCreationFailed {
                        path: parent.to_path_buf(),
                        source,
                    }
                })?;
            }
        }

        let lock_failed = |source| ManifestStoreError::LockFailed {
            path: self.path.clone(),
            source,
        };
        let lock_file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(lock_failed)?;
        lock_file.lock_exclusive().map_err(lock_failed)?;

        let mut manifest = self.load();
        let outcome = mutate(&mut manifest);
        let saved = self.save(&manifest);

        // Released on drop as well; an unlock failure is not worth failing the run
        if let Err(e) = FileExt::unlock(&lock_file) {
            warn!("Failed to release manifest lock {}: {}", lock_path.display(), e);
        }

        saved.map(|_| outcome)
    }

    /// `<dir>/<file><suffix>`, optionally hidden with a leading dot
    fn sibling(&self, suffix: &str, hidden: bool) -> PathBuf {
        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let name = if hidden {
            format!(".{}{}", file_name, suffix)
        } else {
            format!("{}{}", file_name, suffix)
        };
        self.path.with_file_name(name)
    }
}
