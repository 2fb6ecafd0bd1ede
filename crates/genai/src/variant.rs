use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::GenerationError;

/// Output modality the model is asked to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    Image,
    Text,
}

impl Modality {
    /// Name used in the Gemini `responseModalities` list.
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::Image => "IMAGE",
            Self::Text => "TEXT",
        }
    }
}

/// Opening instruction of the prompt. The composer appends the region
/// constraints to whichever template is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptTemplate {
    /// Edit the subject photo in place, keeping everything but the garment area.
    IdentityPreserving,
    /// Restyle the subject into a portrait wearing the garment.
    PortraitStyle,
}

impl PromptTemplate {
    pub fn lead(self) -> &'static str {
        match self {
            Self::IdentityPreserving => {
                "Edit the first image so the person is wearing the clothing item shown in the \
                 second image. Treat the first image as the canvas: the result must be the same \
                 photograph with only the clothing changed. Match the garment's color, fabric, \
                 pattern and cut, and fit it naturally to the person's body with consistent \
                 lighting and shadows."
            }
            Self::PortraitStyle => {
                "Take the person from the first image and dress them in the clothing item shown \
                 in the second image. Make it look realistic, natural, and professionally styled. \
                 Ensure the clothing fits naturally on the person's body, maintaining proper \
                 proportions and lighting. Generate a high-quality portrait-style image."
            }
        }
    }
}

/// One configuration of the generation call: which model, what it returns,
/// and how it is prompted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationVariant {
    pub name: String,
    pub model: String,
    pub modalities: Vec<Modality>,
    pub prompt: PromptTemplate,
    pub supports_aspect_ratio: bool,
    pub system_instruction: Option<String>,
}

impl GenerationVariant {
    /// Name of the default variant.
    pub const DEFAULT_NAME: &'static str = "flash-image";

    /// Image-only output from `gemini-2.5-flash-image` with aspect-ratio control.
    pub fn flash_image() -> Self {
        Self {
            name: Self::DEFAULT_NAME.to_owned(),
            model: "gemini-2.5-flash-image".to_owned(),
            modalities: vec![Modality::Image],
            prompt: PromptTemplate::IdentityPreserving,
            supports_aspect_ratio: true,
            system_instruction: None,
        }
    }

    /// The preview model, which answers with image and text and takes no
    /// aspect-ratio hint.
    pub fn flash_image_preview() -> Self {
        Self {
            name: "flash-image-preview".to_owned(),
            model: "gemini-2.5-flash-image-preview".to_owned(),
            modalities: vec![Modality::Image, Modality::Text],
            prompt: PromptTemplate::PortraitStyle,
            supports_aspect_ratio: false,
            system_instruction: Some(
                "You are an expert fashion AI that can virtually dress people in different \
                 outfits."
                    .to_owned(),
            ),
        }
    }

    /// All built-in variants.
    pub fn builtin() -> Vec<Self> {
        vec![Self::flash_image(), Self::flash_image_preview()]
    }

    /// Look up a built-in variant by name.
    pub fn by_name(name: &str) -> Result<Self, GenerationError> {
        Self::builtin()
            .into_iter()
            .find(|v| v.name == name)
            .ok_or_else(|| {
                GenerationError::Configuration(format!("unknown generation variant: {name}"))
            })
    }

    /// Replace the model identifier, keeping everything else.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

impl Default for GenerationVariant {
    fn default() -> Self {
        Self::flash_image()
    }
}

impl fmt::Display for GenerationVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.model)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn default_is_flash_image() {
        let variant = GenerationVariant::default();
        assert_eq!(variant.name, "flash-image");
        assert_eq!(variant.model, "gemini-2.5-flash-image");
        assert_eq!(variant.modalities, vec![Modality::Image]);
        assert!(variant.supports_aspect_ratio);
        assert!(variant.system_instruction.is_none());
    }

    #[test]
    fn preview_variant_requests_text_too() {
        let variant = GenerationVariant::by_name("flash-image-preview").unwrap();
        assert_eq!(variant.modalities, vec![Modality::Image, Modality::Text]);
        assert!(!variant.supports_aspect_ratio);
        assert!(
            variant
                .system_instruction
                .as_deref()
                .is_some_and(|s| s.contains("fashion"))
        );
    }

    #[test]
    fn unknown_variant_is_configuration_error() {
        let err = GenerationVariant::by_name("dall-e").unwrap_err();
        assert!(matches!(err, GenerationError::Configuration(_)));
        assert!(err.to_string().contains("dall-e"));
    }

    #[test]
    fn builtin_names_are_unique() {
        let builtin = GenerationVariant::builtin();
        let names: HashSet<_> = builtin.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names.len(), builtin.len());
    }

    #[test]
    fn model_override() {
        let variant = GenerationVariant::flash_image().with_model("gemini-3-pro-image");
        assert_eq!(variant.model, "gemini-3-pro-image");
        assert_eq!(variant.name, "flash-image");
    }
}
