use std::fmt;

use crate::error::CompileError;

/// Error returned by [`FontStore::load_font`].
#[derive(Debug, Clone)]
pub struct FontLoadError(pub String);

impl fmt::Display for FontLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "font load error: {}", self.0)
    }
}

impl std::error::Error for FontLoadError {}

/// Owns the fonts available to text primitives, looked up by family name.
///
/// Fonts are immutable after loading. The store is session-scoped: the
/// caller constructs it once and lends it to every compile so glyphs can be
/// rasterized on demand. The first loaded font doubles as the fallback for
/// unknown family names.
pub struct FontStore {
    fonts: Vec<(String, fontdue::Font)>,
}

impl FontStore {
    pub fn new() -> Self {
        Self { fonts: Vec::new() }
    }

    /// Parses and stores a TrueType or OpenType font from raw bytes under
    /// the given family name.
    pub fn load_font(&mut self, name: &str, bytes: &[u8]) -> Result<(), FontLoadError> {
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| FontLoadError(e.to_string()))?;
        self.fonts.push((name.to_owned(), font));
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    /// Looks up `name`, falling back to the default font.
    ///
    /// Returns the canonical family name alongside the font so glyph cache
    /// keys stay stable under fallback. An empty store is a compile error:
    /// text cannot be rasterized at all.
    pub(crate) fn resolve(&self, name: &str) -> Result<(&str, &fontdue::Font), CompileError> {
        if let Some((stored, font)) = self.fonts.iter().find(|(stored, _)| stored == name) {
            return Ok((stored.as_str(), font));
        }
        match self.fonts.first() {
            Some((stored, font)) => {
                log::warn!("font {name:?} not registered; falling back to {stored:?}");
                Ok((stored.as_str(), font))
            }
            None => Err(CompileError::UnknownFont { name: name.to_owned() }),
        }
    }
}

impl Default for FontStore {
    fn default() -> Self {
        Self::new()
    }
}
