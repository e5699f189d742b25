//! The three generation flows.

use crate::{
    GeneratedAsset, ProjectPackOutcome, SceneFrame, SingleImageOutcome, StoryboardOutcome,
};
use maquette_core::{
    AssetCategory, AssetRecord, GenerationLedger, ImageSize, NewAsset, NewJob, NewRendition,
    ProjectPackRequest, RenditionRecord, SingleImageRequest, StoryboardRequest, metadata,
};
use maquette_error::{MaquetteResult, PipelineError, PipelineErrorKind};
use maquette_providers::{GeneratedImage, ImageDriver};
use maquette_script::{
    PromptContext, SceneNotes, asset_prompt, build_scene_descriptors, pack_descriptors,
    scene_prompt, single_prompt, truncate_chars,
};
use serde_json::json;
use std::sync::Arc;
use strum::IntoEnumIterator;
use tracing::{debug, error, instrument};
use uuid::Uuid;

/// Reference context never lists more than this many prior assets.
pub const REFERENCE_ASSET_CAP: usize = 12;

/// Job prompt summaries truncate to this many characters.
const SUMMARY_MAX: usize = 200;
/// Asset titles truncate to this many characters.
const ASSET_TITLE_MAX: usize = 64;

/// Sequences segmentation, extraction, prompt assembly, generation calls,
/// and ledger writes for the three flows.
///
/// Generation calls within one run are strictly sequential: storyboard
/// prompts embed a continuity instruction referencing prior frames, so call
/// ordering is a correctness requirement, not a convenience. Multiple
/// pipeline runs may execute concurrently against the same ledger; each run
/// only reads previously committed assets when building reference context.
pub struct GenerationPipeline<D: ImageDriver> {
    driver: D,
    ledger: Arc<dyn GenerationLedger>,
}

impl<D: ImageDriver> GenerationPipeline<D> {
    /// Create a pipeline over a driver and a ledger.
    pub fn new(driver: D, ledger: Arc<dyn GenerationLedger>) -> Self {
        Self { driver, ledger }
    }

    /// Generate one image from a prompt.
    ///
    /// # Errors
    ///
    /// Validation failures surface before any job is created. Provider and
    /// ledger failures mark the job `failed` and propagate.
    #[instrument(skip(self, request))]
    pub async fn generate_single_image(
        &self,
        request: &SingleImageRequest,
    ) -> MaquetteResult<SingleImageOutcome> {
        request.validate()?;
        let job = self
            .ledger
            .create_job(NewJob {
                prompt_summary: truncate_chars(request.prompt(), SUMMARY_MAX),
                negative_prompt: request.negative_prompt().clone(),
                style_preset: *request.style(),
                size: *request.size(),
            })
            .await?;
        let job_id = job.id;
        let result = self.run_single(job_id, request).await;
        self.reconcile(job_id, result).await
    }

    /// Generate a batch of category-tagged reference images for a project.
    ///
    /// Categories are processed in fixed character, environment, nature
    /// order. A category whose extractor finds nothing still generates one
    /// asset from the truncated script prefix.
    ///
    /// # Errors
    ///
    /// Validation failures surface before any job is created. A mid-pack
    /// failure marks the job `failed` and propagates without rolling back
    /// assets persisted by earlier steps.
    #[instrument(skip(self, request), fields(project = %request.project_name()))]
    pub async fn generate_project_pack(
        &self,
        request: &ProjectPackRequest,
    ) -> MaquetteResult<ProjectPackOutcome> {
        request.validate()?;
        let job = self
            .ledger
            .create_job(NewJob {
                prompt_summary: format!("Asset pack for {}", request.project_name()),
                negative_prompt: None,
                style_preset: *request.style(),
                size: *request.size(),
            })
            .await?;
        let job_id = job.id;
        let result = self.run_project_pack(job_id, request).await;
        self.reconcile(job_id, result).await
    }

    /// Generate an ordered storyboard of scene frames.
    ///
    /// # Errors
    ///
    /// Validation failures surface before any job is created. The run aborts
    /// at the first frame whose generation call fails, marking the job
    /// `failed`; frames persisted before the failure are kept.
    #[instrument(skip(self, request), fields(project = %request.project_name(), scenes = %request.scene_count()))]
    pub async fn generate_storyboard(
        &self,
        request: &StoryboardRequest,
    ) -> MaquetteResult<StoryboardOutcome> {
        request.validate()?;
        let job = self
            .ledger
            .create_job(NewJob {
                prompt_summary: format!(
                    "Storyboard ({} scenes) for {}",
                    request.scene_count(),
                    request.project_name()
                ),
                negative_prompt: None,
                style_preset: *request.style(),
                size: *request.size(),
            })
            .await?;
        let job_id = job.id;
        let result = self.run_storyboard(job_id, request).await;
        self.reconcile(job_id, result).await
    }

    /// Shared failure handler: any error after the job row exists marks the
    /// job `failed` with the captured error before propagating.
    async fn reconcile<T>(&self, job_id: Uuid, result: MaquetteResult<T>) -> MaquetteResult<T> {
        match result {
            Ok(value) => Ok(value),
            Err(err) => {
                error!(job_id = %job_id, error = %err, "Generation run failed");
                if let Err(mark_err) = self.ledger.fail_job(job_id, &err.to_string()).await {
                    error!(job_id = %job_id, error = %mark_err, "Failed to record job failure");
                }
                Err(err)
            }
        }
    }

    async fn run_single(
        &self,
        job_id: Uuid,
        request: &SingleImageRequest,
    ) -> MaquetteResult<SingleImageOutcome> {
        self.ledger.mark_job_running(job_id).await?;
        self.ledger.update_job_progress(job_id, 10).await?;

        let prompt = single_prompt(
            request.prompt(),
            request.negative_prompt().as_deref(),
            *request.style(),
        );
        let image = self.driver.generate_image(&prompt, *request.size()).await?;

        let asset = self
            .ledger
            .create_asset(NewAsset {
                job_id: Some(job_id),
                title: None,
                prompt: Some(request.prompt().clone()),
                metadata: json!({
                    metadata::PROVENANCE: "single",
                    "provider": self.driver.provider_name(),
                    "model": self.driver.model_name(),
                }),
            })
            .await?;
        let rendition = self
            .persist_rendition(&asset, &image, *request.size())
            .await?;
        let job = self.ledger.complete_job(job_id).await?;
        debug!(job_id = %job_id, asset_id = %asset.id, "Single image run complete");
        Ok(SingleImageOutcome {
            job,
            asset,
            rendition,
        })
    }

    async fn run_project_pack(
        &self,
        job_id: Uuid,
        request: &ProjectPackRequest,
    ) -> MaquetteResult<ProjectPackOutcome> {
        self.ledger.mark_job_running(job_id).await?;

        let ctx = PromptContext {
            project_name: Some(request.project_name().clone()),
            style: *request.style(),
            reference_summary: None,
        };

        // Plan the whole pack up front so progress is proportional to it.
        let mut planned = Vec::new();
        for category in AssetCategory::iter() {
            let count = match category {
                AssetCategory::Character => *request.character_count(),
                AssetCategory::Environment => *request.environment_count(),
                AssetCategory::Nature => *request.nature_count(),
            };
            planned.extend(pack_descriptors(request.script(), category, count));
        }
        let total = planned.len();
        debug!(job_id = %job_id, total, "Planned project pack");

        let mut characters = Vec::new();
        let mut environments = Vec::new();
        let mut nature = Vec::new();
        for (done, descriptor) in planned.into_iter().enumerate() {
            let prompt = asset_prompt(&descriptor, &ctx);
            let image = self.driver.generate_image(&prompt, *request.size()).await?;

            let asset = self
                .ledger
                .create_asset(NewAsset {
                    job_id: Some(job_id),
                    title: Some(truncate_chars(descriptor.descriptor(), ASSET_TITLE_MAX)),
                    prompt: Some(prompt),
                    metadata: json!({
                        metadata::PROJECT: request.project_name(),
                        metadata::CATEGORY: descriptor.category().as_str(),
                        metadata::PROVENANCE: "project_pack",
                    }),
                })
                .await?;
            let rendition = self
                .persist_rendition(&asset, &image, *request.size())
                .await?;

            let generated = GeneratedAsset { asset, rendition };
            match descriptor.category() {
                AssetCategory::Character => characters.push(generated),
                AssetCategory::Environment => environments.push(generated),
                AssetCategory::Nature => nature.push(generated),
            }
            self.ledger
                .update_job_progress(job_id, progress_for(done + 1, total))
                .await?;
        }

        let job = self.ledger.complete_job(job_id).await?;
        Ok(ProjectPackOutcome {
            job,
            characters,
            environments,
            nature,
        })
    }

    async fn run_storyboard(
        &self,
        job_id: Uuid,
        request: &StoryboardRequest,
    ) -> MaquetteResult<StoryboardOutcome> {
        self.ledger.mark_job_running(job_id).await?;

        let references = self
            .ledger
            .list_reference_assets(
                request.project_name(),
                request.reference_asset_ids().as_deref(),
                REFERENCE_ASSET_CAP,
            )
            .await?;
        let reference_summary = summarize_references(&references);

        let notes = SceneNotes {
            character: request.character_notes().clone(),
            environment: request.environment_notes().clone(),
            nature: request.nature_notes().clone(),
        };
        let scenes = build_scene_descriptors(request.script(), *request.scene_count(), &notes);
        let total = scenes.len();
        debug!(job_id = %job_id, total, references = references.len(), "Planned storyboard");

        let ctx = PromptContext {
            project_name: Some(request.project_name().clone()),
            style: *request.style(),
            reference_summary,
        };

        // Frames run strictly in order; each prompt carries the shared
        // continuity instruction referencing the frames before it.
        let mut frames: Vec<SceneFrame> = Vec::with_capacity(total);
        for scene in scenes {
            let index = *scene.index();
            let prompt = scene_prompt(&scene, &ctx);
            let image = self
                .driver
                .generate_image(&prompt, *request.size())
                .await
                .map_err(|e| {
                    PipelineError::new(PipelineErrorKind::SceneFrameFailed {
                        index,
                        message: e.to_string(),
                    })
                })?;

            let asset = self
                .ledger
                .create_asset(NewAsset {
                    job_id: Some(job_id),
                    title: Some(scene.title().clone()),
                    prompt: Some(prompt),
                    metadata: json!({
                        metadata::PROJECT: request.project_name(),
                        metadata::PROVENANCE: "storyboard",
                        metadata::SCENE_INDEX: index,
                        metadata::SCENE_TITLE: scene.title(),
                    }),
                })
                .await?;
            let rendition = self
                .persist_rendition(&asset, &image, *request.size())
                .await?;

            self.ledger
                .update_job_progress(job_id, progress_for(frames.len() + 1, total))
                .await?;
            frames.push(SceneFrame {
                scene,
                asset,
                rendition,
            });
        }

        let job = self.ledger.complete_job(job_id).await?;
        Ok(StoryboardOutcome { job, scenes: frames })
    }

    async fn persist_rendition(
        &self,
        asset: &AssetRecord,
        image: &GeneratedImage,
        size: ImageSize,
    ) -> MaquetteResult<RenditionRecord> {
        self.ledger
            .create_rendition(NewRendition {
                asset_id: asset.id,
                mime_type: image.mime_type().clone(),
                width: size.width(),
                height: size.height(),
                payload_base64: image.to_base64(),
            })
            .await
    }
}

fn progress_for(done: usize, total: usize) -> i32 {
    ((done * 100) / total.max(1)) as i32
}

/// One line summarizing prior assets, newest first, for the reference line.
fn summarize_references(assets: &[AssetRecord]) -> Option<String> {
    if assets.is_empty() {
        return None;
    }
    let labels: Vec<String> = assets
        .iter()
        .map(|asset| {
            asset
                .title
                .clone()
                .or_else(|| {
                    asset
                        .metadata
                        .get(metadata::CATEGORY)
                        .and_then(|v| v.as_str())
                        .map(str::to_string)
                })
                .unwrap_or_else(|| asset.id.to_string())
        })
        .collect();
    Some(labels.join(", "))
}
