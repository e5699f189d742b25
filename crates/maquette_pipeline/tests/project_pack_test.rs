//! End-to-end tests for the project pack flow.

mod test_utils;

use maquette_core::{JobStatus, ProjectPackRequest, metadata};
use maquette_pipeline::{GenerationPipeline, InMemoryLedger};
use std::sync::Arc;
use test_utils::MockImageDriver;

const SCRIPT: &str = "Mara crosses the flooded market at dawn.\n\
    The old temple leans over the river bend.\n\
    Joren rows against the storm wind all night.";

fn request(character: usize, environment: usize, nature: usize) -> ProjectPackRequest {
    ProjectPackRequest::builder()
        .project_name("Drowned Bells")
        .script(SCRIPT)
        .character_count(character)
        .environment_count(environment)
        .nature_count(nature)
        .build()
        .unwrap()
}

#[tokio::test]
async fn categories_fill_in_fixed_order() -> anyhow::Result<()> {
    let driver = Arc::new(MockImageDriver::new_success());
    let ledger = Arc::new(InMemoryLedger::new());
    let pipeline = GenerationPipeline::new(driver.clone(), ledger.clone());

    let outcome = pipeline.generate_project_pack(&request(2, 2, 1)).await?;

    assert_eq!(outcome.job.status, JobStatus::Succeeded);
    assert_eq!(outcome.characters.len(), 2);
    assert_eq!(outcome.environments.len(), 2);
    assert_eq!(outcome.nature.len(), 1);
    assert_eq!(driver.call_count(), 5);

    // Character prompts were issued before environment, environment before nature.
    let prompts = driver.prompts();
    assert!(prompts[0].contains("Character design sheet"));
    assert!(prompts[2].contains("Environment concept frame"));
    assert!(prompts[4].contains("Nature mood plate"));

    // Every asset is tagged with project and category.
    for asset in ledger.assets().await {
        assert_eq!(
            asset.metadata.get(metadata::PROJECT).and_then(|v| v.as_str()),
            Some("Drowned Bells")
        );
        assert!(asset.metadata.get(metadata::CATEGORY).is_some());
    }

    // Proportional progress over five units, reaching 100 at the end.
    let history = ledger.progress_history(outcome.job.id).await;
    assert_eq!(history, vec![20, 40, 60, 80, 100]);
    Ok(())
}

#[tokio::test]
async fn extraction_dry_scripts_fall_back_to_the_prefix() -> anyhow::Result<()> {
    let driver = Arc::new(MockImageDriver::new_success());
    let ledger = Arc::new(InMemoryLedger::new());
    let pipeline = GenerationPipeline::new(driver.clone(), ledger.clone());

    // No capitalized names, and every line too short to be a keyword candidate.
    let script = "a quiet tale\ntold in short\nlowercase lines\nwith no names";
    let request = ProjectPackRequest::builder()
        .project_name("Quiet Tale")
        .script(script)
        .character_count(1usize)
        .environment_count(1usize)
        .nature_count(1usize)
        .build()?;
    let outcome = pipeline.generate_project_pack(&request).await?;

    assert_eq!(ledger.asset_count().await, 3);
    assert_eq!(outcome.characters.len(), 1);
    assert_eq!(outcome.environments.len(), 1);
    assert_eq!(outcome.nature.len(), 1);

    for asset in ledger.assets().await {
        assert!(asset.title.as_deref().unwrap_or_default().starts_with("a quiet tale"));
    }
    Ok(())
}

#[tokio::test]
async fn mid_pack_failure_keeps_earlier_assets() {
    let driver = Arc::new(MockImageDriver::fail_after(2));
    let ledger = Arc::new(InMemoryLedger::new());
    let pipeline = GenerationPipeline::new(driver, ledger.clone());

    let err = pipeline
        .generate_project_pack(&request(2, 2, 2))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("No image data returned"));

    // The two assets persisted before the failure are not rolled back.
    assert_eq!(ledger.asset_count().await, 2);
    let job = ledger
        .jobs_snapshot()
        .await
        .into_iter()
        .next()
        .expect("job exists");
    assert_eq!(job.status, JobStatus::Failed);
    assert!(job.error_message.is_some());
}

#[tokio::test]
async fn category_counts_are_validated_first() {
    let driver = Arc::new(MockImageDriver::new_success());
    let ledger = Arc::new(InMemoryLedger::new());
    let pipeline = GenerationPipeline::new(driver, ledger.clone());

    let err = pipeline
        .generate_project_pack(&request(7, 1, 1))
        .await
        .unwrap_err();
    assert!(err.is_validation());
    assert_eq!(ledger.job_count().await, 0);
}
