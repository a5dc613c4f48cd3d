pub mod showcase_pipeline;
