use crate::error::CommonError;
use crate::result::CommonResult;
use apistudio_model::{parse, parse_json, parse_yaml, serialize, Document, SourceFormat};
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// File system abstraction for document storage and testing
pub trait FileSystem {
    /// Check if a file exists
    fn exists(&self, path: &Path) -> bool;

    fn read_to_string(&self, path: &Path) -> Result<String, std::io::Error>;

    fn write(&self, path: &Path, contents: &str) -> Result<(), std::io::Error>;
}

/// Real file system implementation
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read_to_string(&self, path: &Path) -> Result<String, std::io::Error> {
        std::fs::read_to_string(path)
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), std::io::Error> {
        std::fs::write(path, contents)
    }
}

/// In-memory file system for testing
#[derive(Default)]
pub struct MockFileSystem {
    files: RefCell<HashMap<PathBuf, String>>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_file(&mut self, path: impl Into<PathBuf>, contents: impl Into<String>) {
        self.files.get_mut().insert(path.into(), contents.into());
    }

    pub fn contents(&self, path: &Path) -> Option<String> {
        self.files.borrow().get(path).cloned()
    }
}

impl FileSystem for MockFileSystem {
    fn exists(&self, path: &Path) -> bool {
        self.files.borrow().contains_key(path)
    }

    fn read_to_string(&self, path: &Path) -> Result<String, std::io::Error> {
        self.contents(path).ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, path.display().to_string())
        })
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), std::io::Error> {
        self.files
            .borrow_mut()
            .insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }
}

/// Load a document, taking the format from the extension and falling back
/// to sniffing the content
pub fn read_document(fs: &dyn FileSystem, path: &Path) -> CommonResult<(Document, SourceFormat)> {
    if !fs.exists(path) {
        return Err(CommonError::NotFound(path.to_path_buf()));
    }
    let source = fs.read_to_string(path)?;
    let format = SourceFormat::from_path(path).unwrap_or_else(|| SourceFormat::detect(&source));
    let document = match format {
        SourceFormat::Json => parse_json(&source)?,
        SourceFormat::Yaml => parse_yaml(&source)?,
    };
    Ok((document, format))
}

pub fn write_document(
    fs: &dyn FileSystem,
    path: &Path,
    document: &Document,
    format: SourceFormat,
) -> CommonResult<()> {
    let source = serialize(document, format)?;
    fs.write(path, &source)?;
    Ok(())
}

/// Parse source text of unknown format
pub fn read_source(source: &str) -> CommonResult<Document> {
    Ok(parse(source)?)
}
