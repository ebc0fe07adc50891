// Common test utilities and fixtures


// Re-export commonly used items
// Note: These may appear unused in some test binaries
#[allow(unused_imports)]
pub use fixtures::{numbered_tokens, DocTree};
#[allow(unused_imports)]
pub use helpers::{
    test_pipeline, test_pipeline_with_windows, CountingEmbedder, FixedEmbedder, FlakyEmbedder,
};
