//! Localization boundary

/// Resolves translatable label keys to display text.
///
/// The widget translates column titles and static option labels through
/// this trait during rendering. The lookup itself belongs to the host; the
/// default [`NoopTranslator`] returns keys unchanged.
pub trait Translator {
    /// Translates a label key to its display text.
    fn translate(&self, key: &str) -> String;
}

/// A translator that returns every key unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTranslator;

impl Translator for NoopTranslator {
    fn translate(&self, key: &str) -> String {
        key.to_string()
    }
}

impl<F> Translator for F
where
    F: Fn(&str) -> String,
{
    fn translate(&self, key: &str) -> String {
        self(key)
    }
}
