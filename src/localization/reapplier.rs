/*!
 * Writing planned replacements back to the document.
 *
 * Fonts are acquired for the whole batch before the first node is touched,
 * so a font fault aborts the apply phase with no node mutated.
 */

use futures::future::try_join_all;
use log::{debug, info};

use crate::errors::{HostError, TranslationError};
use crate::host::StyleSink;
use crate::localization::planner::Replacement;
use crate::style::FontName;
use crate::text_utils::{TextRange, char_len};

/// Applies replacements through a `StyleSink`
pub struct StyleReapplier<'a, S: StyleSink + ?Sized> {
    sink: &'a S,
}

impl<'a, S: StyleSink + ?Sized> StyleReapplier<'a, S> {
    pub fn new(sink: &'a S) -> Self {
        Self { sink }
    }

    /// Load every font the replacements reference
    pub async fn ensure_fonts(&self, replacements: &[Replacement]) -> Result<(), TranslationError> {
        let mut fonts: Vec<FontName> = Vec::new();
        for replacement in replacements {
            for font in required_fonts(replacement) {
                if !fonts.contains(&font) {
                    fonts.push(font);
                }
            }
        }

        debug!("Loading {} font(s)", fonts.len());
        try_join_all(fonts.iter().map(|font| async move {
            self.sink
                .load_font(font)
                .await
                .map_err(|e| TranslationError::FontLoadFailure {
                    font: font.clone(),
                    message: e.to_string(),
                })
        }))
        .await?;
        Ok(())
    }

    /// Overwrite the node's text, then lay base and section styles over it
    pub async fn write(&self, replacement: &Replacement) -> Result<(), HostError> {
        let node = &replacement.node;
        self.sink.set_characters(node, &replacement.translation).await?;

        if replacement.sections.is_empty() {
            return Ok(());
        }

        let full = TextRange::full(char_len(&replacement.translation));
        self.sink
            .set_range_style(node, full, &replacement.base_style)
            .await?;
        for section in &replacement.sections {
            self.sink
                .set_range_style(node, section.range(), &section.style)
                .await?;
        }
        Ok(())
    }

    /// Apply one replacement: fonts first, then content and styles
    pub async fn apply(&self, replacement: &Replacement) -> Result<(), TranslationError> {
        self.ensure_fonts(std::slice::from_ref(replacement)).await?;
        self.write(replacement).await?;
        Ok(())
    }

    /// Apply a whole batch; nodes are disjoint so writes run concurrently
    pub async fn apply_all(&self, replacements: &[Replacement]) -> Result<(), TranslationError> {
        self.ensure_fonts(replacements).await?;
        try_join_all(replacements.iter().map(|replacement| self.write(replacement))).await?;
        info!("Applied {} replacement(s)", replacements.len());
        Ok(())
    }
}

/// Base font plus each distinct section font, in first-use order
pub fn required_fonts(replacement: &Replacement) -> Vec<FontName> {
    let mut fonts = vec![replacement.base_style.font_name.clone()];
    for section in &replacement.sections {
        if !fonts.contains(&section.style.font_name) {
            fonts.push(section.style.font_name.clone());
        }
    }
    fonts
}
