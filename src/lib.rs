//! # runway
//!
//! A comparison harness for hosted LLM completion APIs: dispatch one
//! prompt to many models across several vendors, collect every outcome
//! side by side, and optionally rerank the answers by semantic relevance
//! to the original query.
//!
//! The pieces:
//!
//! - [`registry::ModelRegistry`] — static catalog of short model keys and
//!   the vendor parameters behind them
//! - [`backends`] — one [`backends::CompletionProvider`] per vendor family
//!   (HuggingFace router, Azure OpenAI, Azure Foundry, Cohere)
//! - [`aggregator::Harness`] — serial dispatch over a selection of keys,
//!   producing a [`aggregator::ResultSet`] with one entry per model
//! - [`rerank::Reranker`] — relevance reordering of the successful answers
//! - [`report`] — markdown rendering and export
//!
//! ```no_run
//! use runway::{Harness, PromptRequest};
//! use secrecy::SecretString;
//!
//! # async fn demo() -> Result<(), runway::HarnessError> {
//! let cohere_key = SecretString::new("...".into());
//! let harness = Harness::builder().cohere(&cohere_key).build();
//! let results = harness
//!     .run(&PromptRequest::new("2+2=?"), &["command-a", "command-r7b"])
//!     .await?;
//! for result in results.iter() {
//!     println!("{}: {:?}", result.model_key, result.outcome);
//! }
//! # Ok(())
//! # }
//! ```

pub mod aggregator;
pub mod backends;
pub mod completion;
pub mod error;
pub mod registry;
pub mod report;
pub mod rerank;
pub mod secret_store;

pub use aggregator::{Harness, HarnessBuilder, ModelResult, Outcome, ResultSet};
pub use backends::CompletionProvider;
pub use completion::PromptRequest;
pub use error::HarnessError;
pub use registry::{ModelDescriptor, ModelRegistry, Vendor};
pub use rerank::{successful_texts, RankedDocument, RerankProvider, Reranker};
pub use secret_store::CredentialStore;
