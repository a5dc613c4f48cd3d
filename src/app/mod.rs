pub mod pipelines;

pub use pipelines::showcase_pipeline::ShowcasePipeline;
