pub mod client;
pub mod highlight;
pub mod ingest;
pub mod output;
pub mod stats;
pub mod summary;

// Re-export the highlight engine surface
pub use highlight::{
    classify, render_highlights, Annotation, Category, HighlightEngine, RenderNode, Rendering,
    Segment,
};

// Re-export boundary collaborators
pub use client::{AnalysisResponse, ClientConfig, ClientError, DetectionClient};
pub use ingest::{Document, DocumentReader, IngestConfig, IngestError, IngestedText, PageProgress};
pub use summary::{summarize, TechniqueSummary};
