//! End-to-end tests for the storyboard flow.

mod test_utils;

use maquette_core::{GenerationLedger, JobStatus, NewAsset, StoryboardRequest, metadata};
use maquette_pipeline::{GenerationPipeline, InMemoryLedger};
use maquette_script::CONTINUITY_LINE;
use serde_json::json;
use std::sync::Arc;
use test_utils::MockImageDriver;

const SCRIPT: &str = "MARA waits by the bell tower in the rain.\n\n\
    The market floods before dawn breaks.\n\n\
    JOREN rows across the drowned street.\n\n\
    The bells ring out over the water at night.";

fn request(scene_count: usize) -> StoryboardRequest {
    StoryboardRequest::builder()
        .script(SCRIPT)
        .scene_count(scene_count)
        .project_name("Drowned Bells")
        .build()
        .unwrap()
}

#[tokio::test]
async fn four_scenes_produce_four_frames_with_stepped_progress() -> anyhow::Result<()> {
    let driver = Arc::new(MockImageDriver::new_success());
    let ledger = Arc::new(InMemoryLedger::new());
    let pipeline = GenerationPipeline::new(driver.clone(), ledger.clone());

    let outcome = pipeline.generate_storyboard(&request(4)).await?;

    assert_eq!(outcome.job.status, JobStatus::Succeeded);
    assert_eq!(outcome.scenes.len(), 4);
    assert_eq!(ledger.asset_count().await, 4);
    assert_eq!(ledger.rendition_count().await, 4);
    assert_eq!(driver.call_count(), 4);

    let indices: Vec<usize> = outcome
        .scenes
        .iter()
        .map(|frame| *frame.scene.index())
        .collect();
    assert_eq!(indices, vec![1, 2, 3, 4]);

    assert_eq!(
        ledger.progress_history(outcome.job.id).await,
        vec![25, 50, 75, 100]
    );
    Ok(())
}

#[tokio::test]
async fn every_frame_prompt_ends_with_the_continuity_instruction() -> anyhow::Result<()> {
    let driver = Arc::new(MockImageDriver::new_success());
    let ledger = Arc::new(InMemoryLedger::new());
    let pipeline = GenerationPipeline::new(driver.clone(), ledger);

    pipeline.generate_storyboard(&request(3)).await?;

    let prompts = driver.prompts();
    assert_eq!(prompts.len(), 3);
    for prompt in &prompts {
        assert!(prompt.ends_with(CONTINUITY_LINE));
    }
    // The continuity instruction is byte-identical across frames.
    let tails: Vec<&str> = prompts
        .iter()
        .map(|p| p.lines().last().unwrap_or_default())
        .collect();
    assert!(tails.windows(2).all(|pair| pair[0] == pair[1]));
    Ok(())
}

#[tokio::test]
async fn committed_project_assets_feed_the_reference_line() -> anyhow::Result<()> {
    let driver = Arc::new(MockImageDriver::new_success());
    let ledger = Arc::new(InMemoryLedger::new());

    ledger
        .create_asset(NewAsset {
            job_id: None,
            title: Some("Mara design sheet".to_string()),
            prompt: None,
            metadata: json!({
                metadata::PROJECT: "Drowned Bells",
                metadata::CATEGORY: "character",
                metadata::PROVENANCE: "project_pack",
            }),
        })
        .await?;

    let pipeline = GenerationPipeline::new(driver.clone(), ledger);
    pipeline.generate_storyboard(&request(2)).await?;

    for prompt in driver.prompts() {
        assert!(prompt.contains("Reference assets: Mara design sheet"));
    }
    Ok(())
}

#[tokio::test]
async fn explicit_reference_ids_restrict_the_context() -> anyhow::Result<()> {
    let driver = Arc::new(MockImageDriver::new_success());
    let ledger = Arc::new(InMemoryLedger::new());

    let kept = ledger
        .create_asset(NewAsset {
            job_id: None,
            title: Some("Mara design sheet".to_string()),
            prompt: None,
            metadata: json!({
                metadata::PROJECT: "Drowned Bells",
                metadata::CATEGORY: "character",
            }),
        })
        .await?;
    ledger
        .create_asset(NewAsset {
            job_id: None,
            title: Some("Temple concept frame".to_string()),
            prompt: None,
            metadata: json!({
                metadata::PROJECT: "Drowned Bells",
                metadata::CATEGORY: "environment",
            }),
        })
        .await?;

    let request = StoryboardRequest::builder()
        .script(SCRIPT)
        .scene_count(2usize)
        .project_name("Drowned Bells")
        .reference_asset_ids(vec![kept.id])
        .build()?;

    let pipeline = GenerationPipeline::new(driver.clone(), ledger);
    pipeline.generate_storyboard(&request).await?;

    for prompt in driver.prompts() {
        assert!(prompt.contains("Mara design sheet"));
        assert!(!prompt.contains("Temple concept frame"));
    }
    Ok(())
}

#[tokio::test]
async fn scene_count_out_of_bounds_is_rejected_before_any_job() {
    let driver = Arc::new(MockImageDriver::new_success());
    let ledger = Arc::new(InMemoryLedger::new());
    let pipeline = GenerationPipeline::new(driver, ledger.clone());

    let err = pipeline.generate_storyboard(&request(9)).await.unwrap_err();
    assert!(err.is_validation());
    assert_eq!(ledger.job_count().await, 0);
}

#[tokio::test]
async fn mid_board_failure_aborts_and_fails_the_job() {
    let driver = Arc::new(MockImageDriver::fail_after(2));
    let ledger = Arc::new(InMemoryLedger::new());
    let pipeline = GenerationPipeline::new(driver.clone(), ledger.clone());

    let err = pipeline.generate_storyboard(&request(4)).await.unwrap_err();
    assert!(err.to_string().contains("Scene 3 failed"));

    // Frames one and two stay persisted; the job is terminally failed.
    assert_eq!(ledger.asset_count().await, 2);
    assert_eq!(driver.call_count(), 3);
    let job = ledger
        .jobs_snapshot()
        .await
        .into_iter()
        .next()
        .expect("job exists");
    assert_eq!(job.status, JobStatus::Failed);
    assert_eq!(ledger.progress_history(job.id).await, vec![25, 50]);
}

#[tokio::test]
async fn storyboard_assets_are_tagged_for_later_reference() -> anyhow::Result<()> {
    let driver = Arc::new(MockImageDriver::new_success());
    let ledger = Arc::new(InMemoryLedger::new());
    let pipeline = GenerationPipeline::new(driver, ledger.clone());

    pipeline.generate_storyboard(&request(2)).await?;

    let assets = ledger.assets().await;
    assert_eq!(assets.len(), 2);
    for (i, asset) in assets.iter().enumerate() {
        assert_eq!(
            asset.metadata.get(metadata::SCENE_INDEX).and_then(|v| v.as_u64()),
            Some(i as u64 + 1)
        );
        assert_eq!(
            asset.metadata.get(metadata::PROVENANCE).and_then(|v| v.as_str()),
            Some("storyboard")
        );
        assert!(asset.title.is_some());
    }
    Ok(())
}
