//! Named-image store with JSON state persistence.
//!
//! A [`PhotoLibrary`] is the ordered list of photos a command surface works
//! on. Each [`Photo`] pairs a display name and file path with an optional
//! decoded buffer. Commands address photos by 1-based id, run exactly one
//! engine operation, and store the returned buffer back on the photo.
//!
//! Only names and paths are persisted; buffers are reloaded from disk on
//! demand.
//!
//! # Example
//!
//! ```ignore
//! use photoedit_core::library::{PhotoLibrary, DEFAULT_STATE_FILE};
//! use photoedit_core::filters::apply_brightness;
//!
//! let mut library = PhotoLibrary::load_state(DEFAULT_STATE_FILE)?;
//! let id = library.add("holiday.png")?;
//! library.edit(id, |img| Ok(apply_brightness(img, 1.2)))?;
//! library.get_mut(id)?.save()?;
//! library.save_state(DEFAULT_STATE_FILE)?;
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::buffer::PixelBuffer;
use crate::codec::{self, CodecError};
use crate::collage::create_collage;
use crate::error::EditError;

/// File name used for library state when the caller has no preference.
pub const DEFAULT_STATE_FILE: &str = "app_state.json";

/// Errors raised by the photo library.
#[derive(Debug, Error)]
pub enum LibraryError {
    /// The image file does not exist.
    #[error("Image file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// No photo has the requested id.
    #[error("Invalid photo id {id}: library holds {len} photo(s)")]
    InvalidId { id: usize, len: usize },

    /// The engine rejected the operation.
    #[error(transparent)]
    Edit(#[from] EditError),

    /// Reading or writing the image file failed.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// Reading or writing the state file failed.
    #[error("State file I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The state file is not valid library JSON.
    #[error("Malformed state file {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// An image known to the library.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    name: String,
    file_path: PathBuf,
    #[serde(skip)]
    image: Option<PixelBuffer>,
}

impl Photo {
    /// Reference an existing image file without decoding it.
    ///
    /// The stored path is absolute and the display name is the file name.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, LibraryError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(LibraryError::NotFound(path.to_path_buf()));
        }

        let file_path = std::fs::canonicalize(path).map_err(|source| LibraryError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self {
            name: display_name(&file_path),
            file_path,
            image: None,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    pub fn is_loaded(&self) -> bool {
        self.image.is_some()
    }

    /// The decoded image.
    ///
    /// # Errors
    ///
    /// Returns `EditError::NullSource` if the image has not been loaded.
    pub fn image(&self) -> Result<&PixelBuffer, EditError> {
        self.image.as_ref().ok_or(EditError::NullSource)
    }

    /// Decode the image from disk, replacing any loaded buffer.
    pub fn load(&mut self) -> Result<(), LibraryError> {
        if !self.file_path.is_file() {
            return Err(LibraryError::NotFound(self.file_path.clone()));
        }
        self.image = Some(codec::load_image(&self.file_path)?);
        Ok(())
    }

    /// Load the image if needed and return it.
    pub fn ensure_loaded(&mut self) -> Result<&PixelBuffer, LibraryError> {
        if self.image.is_none() {
            self.load()?;
        }
        Ok(self.image()?)
    }

    /// Drop the decoded buffer; the photo stays in the library.
    pub fn unload(&mut self) {
        self.image = None;
    }

    /// Replace the decoded buffer with an engine result.
    pub fn set_image(&mut self, image: PixelBuffer) {
        self.image = Some(image);
    }

    /// Write the image to `path` and point this photo at the new file.
    pub fn save_as(&mut self, path: impl AsRef<Path>) -> Result<(), LibraryError> {
        let path = path.as_ref();
        codec::save_image(self.image()?, path)?;

        self.file_path = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        self.name = display_name(&self.file_path);
        Ok(())
    }

    /// Write the image back to its own file.
    pub fn save(&mut self) -> Result<(), LibraryError> {
        let path = self.file_path.clone();
        self.save_as(path)
    }
}

impl std::fmt::Display for Photo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.file_path.display())
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Ordered collection of photos addressed by 1-based id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhotoLibrary {
    photos: Vec<Photo>,
}

impl PhotoLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Photo> {
        self.photos.iter()
    }

    /// Open and decode an image file, append it, and return its id.
    pub fn add(&mut self, path: impl AsRef<Path>) -> Result<usize, LibraryError> {
        let mut photo = Photo::open(path)?;
        photo.load()?;
        tracing::info!(name = photo.name(), "added photo");
        Ok(self.push(photo))
    }

    /// Append a photo and return its id.
    pub fn push(&mut self, photo: Photo) -> usize {
        self.photos.push(photo);
        self.photos.len()
    }

    fn index(&self, id: usize) -> Result<usize, LibraryError> {
        if id == 0 || id > self.photos.len() {
            return Err(LibraryError::InvalidId {
                id,
                len: self.photos.len(),
            });
        }
        Ok(id - 1)
    }

    pub fn get(&self, id: usize) -> Result<&Photo, LibraryError> {
        let index = self.index(id)?;
        Ok(&self.photos[index])
    }

    pub fn get_mut(&mut self, id: usize) -> Result<&mut Photo, LibraryError> {
        let index = self.index(id)?;
        Ok(&mut self.photos[index])
    }

    /// Remove a photo; later ids shift down by one.
    pub fn remove(&mut self, id: usize) -> Result<Photo, LibraryError> {
        let index = self.index(id)?;
        Ok(self.photos.remove(index))
    }

    pub fn clear(&mut self) {
        self.photos.clear();
    }

    /// Run one engine operation on a photo and keep the result.
    ///
    /// The image is loaded first if needed. On error the photo keeps its
    /// previous buffer.
    pub fn edit<F>(&mut self, id: usize, op: F) -> Result<&Photo, LibraryError>
    where
        F: FnOnce(&PixelBuffer) -> Result<PixelBuffer, EditError>,
    {
        let photo = self.get_mut(id)?;
        let result = op(photo.ensure_loaded()?)?;
        photo.set_image(result);
        Ok(photo)
    }

    /// Mutate a photo's buffer directly, for in-place edits such as
    /// [`set_pixel_in_place`](crate::pixel::set_pixel_in_place).
    pub fn edit_in_place<F>(&mut self, id: usize, op: F) -> Result<&Photo, LibraryError>
    where
        F: FnOnce(&mut PixelBuffer) -> Result<(), EditError>,
    {
        let photo = self.get_mut(id)?;
        photo.ensure_loaded()?;
        let image = photo.image.as_mut().ok_or(EditError::NullSource)?;
        op(image)?;
        Ok(photo)
    }

    /// Compose the given photos, in order, into a grid collage.
    ///
    /// Ids may repeat. Photos are loaded on demand.
    pub fn collage(&mut self, ids: &[usize]) -> Result<PixelBuffer, LibraryError> {
        for &id in ids {
            self.get_mut(id)?.ensure_loaded()?;
        }

        let images = ids
            .iter()
            .map(|&id| Ok(self.get(id)?.image()?))
            .collect::<Result<Vec<_>, LibraryError>>()?;

        Ok(create_collage(&images)?)
    }

    /// Write names and paths as pretty-printed JSON.
    pub fn save_state(&self, path: impl AsRef<Path>) -> Result<(), LibraryError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).map_err(|source| LibraryError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, json).map_err(|source| LibraryError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::info!(count = self.len(), path = %path.display(), "saved library state");
        Ok(())
    }

    /// Read a library saved by [`save_state`](Self::save_state).
    ///
    /// A missing or blank file yields an empty library. Images are not
    /// loaded.
    pub fn load_state(path: impl AsRef<Path>) -> Result<Self, LibraryError> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!(path = %path.display(), "no state file, starting empty");
            return Ok(Self::new());
        }

        let json = std::fs::read_to_string(path).map_err(|source| LibraryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if json.trim().is_empty() {
            tracing::warn!(path = %path.display(), "state file is empty");
            return Ok(Self::new());
        }

        let library: Self = serde_json::from_str(&json).map_err(|source| LibraryError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(count = library.len(), path = %path.display(), "loaded library state");
        Ok(library)
    }

    /// Delete the state file. Returns whether a file was removed.
    pub fn delete_state(path: impl AsRef<Path>) -> Result<bool, LibraryError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(false);
        }
        std::fs::remove_file(path).map_err(|source| LibraryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(true)
    }

    pub fn state_exists(path: impl AsRef<Path>) -> bool {
        path.as_ref().exists()
    }
}
