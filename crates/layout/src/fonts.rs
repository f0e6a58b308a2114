//! Font metrics backed by TrueType/OpenType data.
//!
//! `FontLibrary` answers metric queries from fonts registered as raw bytes and, with the
//! `system-fonts` feature, from fonts installed on the machine. Families it can not resolve are
//! measured with [`MonospaceMetrics`] so layout never fails on a missing font.

use folio_style::{FontSpec, FontStyle, FontWeight};
use folio_traits::{FontError, FontMetrics, FontMetricsProvider, MonospaceMetrics};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Raw font bytes plus the face index inside a collection.
pub struct FontInstance {
    data: Arc<Vec<u8>>,
    index: u32,
}

impl std::fmt::Debug for FontInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontInstance")
            .field("data_len", &self.data.len())
            .field("index", &self.index)
            .finish()
    }
}

impl FontInstance {
    /// Parses the face header. Cheap enough to do on every query.
    fn face(&self, family: &str) -> Result<ttf_parser::Face<'_>, FontError> {
        ttf_parser::Face::parse(&self.data, self.index).map_err(|e| FontError::ParseFailed {
            family: family.to_string(),
            message: e.to_string(),
        })
    }
}

#[derive(Debug, Clone, Hash, PartialEq, Eq)]
struct FontKey {
    family: String,
    weight: u16,
    style: FontStyle,
}

impl FontKey {
    fn new(family: &str, weight: FontWeight, style: FontStyle) -> Self {
        Self {
            family: family.to_lowercase(),
            weight: weight.0,
            style,
        }
    }

    fn of(font: &FontSpec) -> Self {
        Self::new(&font.family, font.weight, font.style)
    }
}

#[derive(Clone)]
pub struct FontLibrary {
    registered: Arc<RwLock<HashMap<FontKey, Arc<FontInstance>>>>,
    /// Resolution results, including misses, so each family is looked up once.
    resolved: Arc<RwLock<HashMap<FontKey, Option<Arc<FontInstance>>>>>,
    fallback: MonospaceMetrics,
    #[cfg(feature = "system-fonts")]
    db: Arc<RwLock<fontdb::Database>>,
}

impl std::fmt::Debug for FontLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let registered = self.registered.read().map(|r| r.len()).unwrap_or(0);
        f.debug_struct("FontLibrary")
            .field("registered", &registered)
            .field("fallback", &self.fallback)
            .finish()
    }
}

impl Default for FontLibrary {
    fn default() -> Self {
        Self::new()
    }
}

impl FontLibrary {
    pub fn new() -> Self {
        Self {
            registered: Arc::new(RwLock::new(HashMap::new())),
            resolved: Arc::new(RwLock::new(HashMap::new())),
            fallback: MonospaceMetrics::default(),
            #[cfg(feature = "system-fonts")]
            db: Arc::new(RwLock::new(fontdb::Database::new())),
        }
    }

    /// Replaces the metrics used for families that can not be resolved.
    pub fn with_fallback(mut self, fallback: MonospaceMetrics) -> Self {
        self.fallback = fallback;
        self
    }

    /// Registers a font under an explicit family name, weight and style.
    ///
    /// The data is validated up front so a broken font is reported here rather than in the
    /// middle of a layout pass.
    pub fn register(
        &self,
        family: &str,
        weight: FontWeight,
        style: FontStyle,
        data: Vec<u8>,
    ) -> Result<(), FontError> {
        let instance = FontInstance {
            data: Arc::new(data),
            index: 0,
        };
        instance.face(family)?;
        let key = FontKey::new(family, weight, style);
        log::debug!("Registered font '{}' ({:?} {:?})", family, weight, style);
        if let Ok(mut registered) = self.registered.write() {
            registered.insert(key.clone(), Arc::new(instance));
        }
        if let Ok(mut resolved) = self.resolved.write() {
            resolved.remove(&key);
        }
        Ok(())
    }

    /// Loads the fonts installed on this machine.
    #[cfg(all(feature = "system-fonts", not(target_arch = "wasm32")))]
    pub fn with_system_fonts(self) -> Self {
        if let Ok(mut db) = self.db.write() {
            db.load_system_fonts();
            log::debug!("Loaded {} system font faces", db.len());
        }
        self
    }

    /// Adds every font found in `path`.
    #[cfg(all(feature = "system-fonts", not(target_arch = "wasm32")))]
    pub fn add_font_dir<P: AsRef<std::path::Path>>(&self, path: P) {
        if let Ok(mut db) = self.db.write() {
            db.load_fonts_dir(path);
        }
        if let Ok(mut resolved) = self.resolved.write() {
            resolved.clear();
        }
    }

    fn resolve(&self, font: &FontSpec) -> Option<Arc<FontInstance>> {
        let key = FontKey::of(font);
        if let Ok(resolved) = self.resolved.read()
            && let Some(hit) = resolved.get(&key)
        {
            return hit.clone();
        }

        let found = self
            .registered
            .read()
            .ok()
            .and_then(|registered| {
                registered.get(&key).cloned().or_else(|| {
                    // Same family in another weight or style beats the fallback.
                    registered
                        .iter()
                        .find(|(k, _)| k.family == key.family)
                        .map(|(_, v)| v.clone())
                })
            })
            .or_else(|| self.resolve_system(font));

        if found.is_none() {
            log::debug!(
                "Font '{}' not found, measuring with fallback metrics",
                font.family
            );
        }
        if let Ok(mut resolved) = self.resolved.write() {
            resolved.insert(key, found.clone());
        }
        found
    }

    #[cfg(feature = "system-fonts")]
    fn resolve_system(&self, font: &FontSpec) -> Option<Arc<FontInstance>> {
        let db = self.db.read().ok()?;
        let style = match font.style {
            FontStyle::Normal => fontdb::Style::Normal,
            FontStyle::Italic => fontdb::Style::Italic,
            FontStyle::Oblique => fontdb::Style::Oblique,
        };
        let id = db.query(&fontdb::Query {
            families: &[fontdb::Family::Name(&font.family)],
            weight: fontdb::Weight(font.weight.0),
            stretch: fontdb::Stretch::Normal,
            style,
        })?;
        db.with_face_data(id, |data, index| {
            Arc::new(FontInstance {
                data: Arc::new(data.to_vec()),
                index,
            })
        })
    }

    #[cfg(not(feature = "system-fonts"))]
    fn resolve_system(&self, _font: &FontSpec) -> Option<Arc<FontInstance>> {
        None
    }
}

impl FontMetricsProvider for FontLibrary {
    fn metrics(&self, font: &FontSpec) -> Result<FontMetrics, FontError> {
        let Some(instance) = self.resolve(font) else {
            return self.fallback.metrics(font);
        };
        let face = instance.face(&font.family)?;
        let scale = font.size / f32::from(face.units_per_em());
        let ascent = f32::from(face.ascender()) * scale;
        let descent = -f32::from(face.descender()) * scale;
        let gap = f32::from(face.line_gap()) * scale;
        let (underline_position, underline_thickness) = match face.underline_metrics() {
            Some(m) => (-f32::from(m.position) * scale, f32::from(m.thickness) * scale),
            None => (descent * 0.5, (font.size / 16.0).max(0.5)),
        };
        Ok(FontMetrics {
            ascent,
            descent,
            line_height: ascent + descent + gap,
            underline_position,
            underline_thickness,
        })
    }

    fn measure(&self, font: &FontSpec, text: &str) -> Result<f32, FontError> {
        let Some(instance) = self.resolve(font) else {
            return self.fallback.measure(font, text);
        };
        let face = instance.face(&font.family)?;
        let units = face.units_per_em();
        let missing = units / 2;
        let total: u32 = text
            .chars()
            .map(|c| {
                face.glyph_index(c)
                    .and_then(|g| face.glyph_hor_advance(g))
                    .unwrap_or(missing) as u32
            })
            .sum();
        Ok(total as f32 * font.size / f32::from(units))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_family_uses_fallback() {
        let library = FontLibrary::new().with_fallback(MonospaceMetrics::fixed(0.5));
        let font = FontSpec::new("No Such Family", 10.0);
        assert_eq!(library.measure(&font, "abc").unwrap(), 15.0);
        assert_eq!(library.metrics(&font).unwrap().line_height, 10.0);
    }

    #[test]
    fn invalid_font_data_is_rejected() {
        let library = FontLibrary::new();
        let err = library
            .register("Broken", FontWeight::REGULAR, FontStyle::Normal, vec![0, 1, 2, 3])
            .unwrap_err();
        assert!(matches!(err, FontError::ParseFailed { .. }));
    }
}
