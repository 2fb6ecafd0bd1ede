use tryon_core::{AspectRatio, ImageBlob};

use crate::request::{GenerationConfig, GenerationRequest, RequestPart};
use crate::variant::GenerationVariant;

/// Regions the model must leave untouched, and the one it may change.
const REGION_CONSTRAINTS: &str = "\
Keep unchanged from the first image: the person's facial identity and \
expression, hair, skin tone, body shape, pose, and the entire background, \
framing and camera angle. \
Change only the clothing area covered by the garment from the second image.";

/// Head-worn items are the only case where the head region may be edited.
const HEAD_WORN_EXCEPTION: &str = "\
Exception: if the garment is head-worn, such as a hat, cap or eyewear, you may \
edit the head region only as far as needed to place it, still keeping the face \
recognisably the same person.";

/// Build the full instruction text for a variant.
pub fn instruction(variant: &GenerationVariant) -> String {
    format!(
        "{}\n\n{REGION_CONSTRAINTS}\n{HEAD_WORN_EXCEPTION}",
        variant.prompt.lead()
    )
}

/// Build the generation request for one try-on.
///
/// Parts are always ordered subject image, garment image, instruction text.
/// The aspect ratio is only forwarded when the variant's model accepts it.
pub fn compose(
    variant: &GenerationVariant,
    subject: &ImageBlob,
    garment: &ImageBlob,
    aspect: AspectRatio,
) -> GenerationRequest {
    let parts = vec![
        RequestPart::Image {
            mime_type: subject.format().mime_type(),
            data: subject.data().clone(),
        },
        RequestPart::Image {
            mime_type: garment.format().mime_type(),
            data: garment.data().clone(),
        },
        RequestPart::Text(instruction(variant)),
    ];

    GenerationRequest {
        model: variant.model.clone(),
        system_instruction: variant.system_instruction.clone(),
        parts,
        config: GenerationConfig {
            modalities: variant.modalities.clone(),
            aspect_ratio: variant.supports_aspect_ratio.then_some(aspect),
        },
    }
}

#[cfg(test)]
mod tests {
    use tryon_core::ImageFormat;

    use super::*;
    use crate::variant::Modality;

    fn subject() -> ImageBlob {
        ImageBlob::sniff(vec![0xFF, 0xD8, 0xFF, 0xE0, 1])
    }

    fn garment() -> ImageBlob {
        ImageBlob::sniff(vec![0x89, b'P', b'N', b'G', 2])
    }

    #[test]
    fn parts_are_subject_garment_text() {
        let request = compose(
            &GenerationVariant::flash_image(),
            &subject(),
            &garment(),
            AspectRatio::Portrait3x4,
        );
        assert_eq!(request.parts.len(), 3);
        match &request.parts[0] {
            RequestPart::Image { mime_type, data } => {
                assert_eq!(*mime_type, ImageFormat::Jpeg.mime_type());
                assert_eq!(data.as_ref(), subject().data().as_ref());
            }
            RequestPart::Text(_) => panic!("first part must be the subject image"),
        }
        match &request.parts[1] {
            RequestPart::Image { mime_type, data } => {
                assert_eq!(*mime_type, "image/png");
                assert_eq!(data.as_ref(), garment().data().as_ref());
            }
            RequestPart::Text(_) => panic!("second part must be the garment image"),
        }
        assert!(request.parts[2].as_text().is_some());
    }

    #[test]
    fn instruction_lists_preserved_regions_and_head_exception() {
        let request = compose(
            &GenerationVariant::flash_image(),
            &subject(),
            &garment(),
            AspectRatio::Square,
        );
        let text = request.parts[2].as_text().unwrap();
        for needle in ["facial identity", "pose", "background", "hat", "eyewear"] {
            assert!(text.contains(needle), "instruction should mention {needle}");
        }
        assert!(text.contains("head region only"));
    }

    #[test]
    fn image_only_variant_forwards_aspect_ratio() {
        let request = compose(
            &GenerationVariant::flash_image(),
            &subject(),
            &garment(),
            AspectRatio::Landscape16x9,
        );
        assert_eq!(request.model, "gemini-2.5-flash-image");
        assert_eq!(request.config.modalities, vec![Modality::Image]);
        assert_eq!(request.config.aspect_ratio, Some(AspectRatio::Landscape16x9));
        assert!(request.system_instruction.is_none());
    }

    #[test]
    fn preview_variant_drops_aspect_ratio_and_adds_system_instruction() {
        let request = compose(
            &GenerationVariant::flash_image_preview(),
            &subject(),
            &garment(),
            AspectRatio::Portrait9x16,
        );
        assert_eq!(request.config.aspect_ratio, None);
        assert_eq!(
            request.config.modalities,
            vec![Modality::Image, Modality::Text]
        );
        assert!(request.system_instruction.is_some());
        let text = request.parts[2].as_text().unwrap();
        assert!(text.starts_with("Take the person from the first image"));
        assert!(text.contains("facial identity"));
    }
}
