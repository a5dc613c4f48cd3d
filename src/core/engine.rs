use crate::core::Pipeline;
use crate::utils::error::Result;
use std::time::Instant;

pub struct ShowcaseEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> ShowcaseEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        let started = Instant::now();
        tracing::info!("Starting showcase run");

        tracing::info!("Fetching repositories...");
        let raw = self.pipeline.extract().await?;
        tracing::info!("Fetched {} repositories", raw.len());

        tracing::info!("Ranking repositories...");
        let ranked = self.pipeline.transform(raw).await?;
        tracing::info!("Selected {} projects", ranked.len());

        tracing::info!("Writing output...");
        let output_path = self.pipeline.load(ranked).await?;
        tracing::info!(
            "Output saved to: {} ({:?})",
            output_path,
            started.elapsed()
        );

        Ok(output_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{EnrichedRepository, RepositorySummary};
    use crate::utils::error::ShowcaseError;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingPipeline {
        phases: Mutex<Vec<&'static str>>,
        fail_load: bool,
    }

    #[async_trait::async_trait]
    impl Pipeline for RecordingPipeline {
        async fn extract(&self) -> Result<Vec<RepositorySummary>> {
            self.phases.lock().unwrap().push("extract");
            Ok(Vec::new())
        }

        async fn transform(&self, data: Vec<RepositorySummary>) -> Result<Vec<EnrichedRepository>> {
            self.phases.lock().unwrap().push("transform");
            Ok(data
                .into_iter()
                .map(|s| EnrichedRepository::new(s, None))
                .collect())
        }

        async fn load(&self, _result: Vec<EnrichedRepository>) -> Result<String> {
            self.phases.lock().unwrap().push("load");
            if self.fail_load {
                return Err(ShowcaseError::IoError(std::io::Error::new(
                    std::io::ErrorKind::PermissionDenied,
                    "read-only",
                )));
            }
            Ok("out".to_string())
        }
    }

    #[test]
    fn test_run_calls_phases_in_order() {
        let engine = ShowcaseEngine::new(RecordingPipeline::default());
        let out = tokio_test::block_on(engine.run()).unwrap();
        assert_eq!(out, "out");
        assert_eq!(
            *engine.pipeline.phases.lock().unwrap(),
            vec!["extract", "transform", "load"]
        );
    }

    #[test]
    fn test_load_errors_propagate() {
        let engine = ShowcaseEngine::new(RecordingPipeline {
            fail_load: true,
            ..Default::default()
        });
        let err = tokio_test::block_on(engine.run()).unwrap_err();
        assert!(!err.is_network_failure());
    }
}
