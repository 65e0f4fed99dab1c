//! Unicode normalization ahead of word counting.
//!
//! Applying a normalization form before counting keeps visually
//! identical words from splitting their frequency mass across different
//! codepoint sequences.

use unicode_normalization::UnicodeNormalization;

/// Normalization form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NormalizationForm {
    /// Canonical composition
    #[default]
    Nfc,
    /// Canonical decomposition
    Nfd,
    /// Compatibility composition
    Nfkc,
    /// Compatibility decomposition
    Nfkd,
    /// No normalization
    None,
}

impl NormalizationForm {
    /// Stable name used in serialized models.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Nfc => "nfc",
            Self::Nfd => "nfd",
            Self::Nfkc => "nfkc",
            Self::Nfkd => "nfkd",
            Self::None => "none",
        }
    }

    /// Parse the serialized name back into a form.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "nfc" => Some(Self::Nfc),
            "nfd" => Some(Self::Nfd),
            "nfkc" => Some(Self::Nfkc),
            "nfkd" => Some(Self::Nfkd),
            "none" => Some(Self::None),
            _ => None,
        }
    }
}

/// Unicode normalizer.
#[derive(Debug, Clone, Copy, Default)]
pub struct Normalizer {
    form: NormalizationForm,
}

impl Normalizer {
    /// Create a normalizer applying the given form.
    pub fn new(form: NormalizationForm) -> Self {
        Self { form }
    }

    /// The form this normalizer applies.
    pub fn form(&self) -> NormalizationForm {
        self.form
    }

    /// Normalize text.
    pub fn normalize(&self, text: &str) -> String {
        match self.form {
            NormalizationForm::Nfc => text.nfc().collect(),
            NormalizationForm::Nfd => text.nfd().collect(),
            NormalizationForm::Nfkc => text.nfkc().collect(),
            NormalizationForm::Nfkd => text.nfkd().collect(),
            NormalizationForm::None => text.to_string(),
        }
    }

    /// Check if normalization is enabled.
    pub fn is_enabled(&self) -> bool {
        self.form != NormalizationForm::None
    }
}
