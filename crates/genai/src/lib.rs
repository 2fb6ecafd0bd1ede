//! Image generation for the try-on service.
//!
//! A try-on is one multimodal call: [`compose`] turns the two input images and
//! the negotiated aspect ratio into a [`GenerationRequest`], a
//! [`GenerationClient`] sends it to the model, and [`extract`] pulls the first
//! returned image out of the [`ModelResponse`].
//!
//! Model choice and prompt wording are data, carried by a
//! [`GenerationVariant`]. The production client is [`GeminiClient`]; tests use
//! [`MockGenerationClient`] and [`FailingGenerationClient`].

pub mod client;
pub mod compose;
pub mod config;
pub mod error;
pub mod extract;
pub mod gemini;
pub mod mock;
pub mod request;
pub mod response;
pub mod variant;

pub use client::GenerationClient;
pub use compose::compose;
pub use config::GeminiConfig;
pub use error::{ExtractError, GenerationError};
pub use extract::{ExtractedImage, extract};
pub use gemini::GeminiClient;
pub use mock::{FailingGenerationClient, MockGenerationClient};
pub use request::{GenerationConfig, GenerationRequest, RequestPart};
pub use response::{InlinePayload, ModelResponse, Part};
pub use variant::{GenerationVariant, Modality, PromptTemplate};
