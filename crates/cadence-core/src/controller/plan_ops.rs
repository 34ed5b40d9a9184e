//! Plan operations for the Controller.

use log::{debug, info, warn};

use super::{Controller, LoadingGuard};
use crate::{
    error::{CadenceError, Result},
    generation::GeneratedImage,
    models::{MarketingInput, MarketingPlan, PlanId, View},
    store::{StoreExt, StoreKey},
};

impl Controller {
    /// Generates a new plan from `input` and makes it current.
    ///
    /// Input is validated and the usage quota checked before anything is
    /// sent. On success the plan is prepended to history (trimmed to the
    /// cap), usage is incremented, form memo, history and usage are
    /// persisted and the view switches to the dashboard. On failure the
    /// session is left exactly as it was.
    ///
    /// The session lock is not held while waiting for the generator, so
    /// other operations proceed in the meantime.
    ///
    /// # Errors
    ///
    /// Returns `CadenceError::InvalidInput` when the industry is empty,
    /// `CadenceError::QuotaExhausted` when the quota is used up,
    /// `CadenceError::GenerationInProgress` when another generation is
    /// outstanding, and any error reported by the generator or the store.
    pub async fn generate_plan(&self, input: MarketingInput) -> Result<MarketingPlan> {
        input.validate()?;

        if let Some(limit) = self.settings.usage_quota {
            let used = self.session.lock().await.usage;
            if used >= limit {
                warn!("Generation refused: quota {used}/{limit} used");
                return Err(CadenceError::QuotaExhausted { used, limit });
            }
        }

        let _loading = LoadingGuard::acquire(&self.loading)?;

        info!("Generating plan for '{}'", input.display_name());
        let plan = self.plan_generator.generate_plan(&input).await?;

        self.commit_plan(input, plan.clone()).await?;
        Ok(plan)
    }

    async fn commit_plan(&self, input: MarketingInput, plan: MarketingPlan) -> Result<()> {
        let mut session = self.session.lock().await;

        session.current = Some(plan.clone());
        session.history.insert(0, plan);
        session.history.truncate(self.settings.history_cap);
        session.usage = session.usage.saturating_add(1);
        session.form = input;
        session.view = View::Dashboard;

        debug!(
            "History now holds {} plans, usage {}",
            session.history.len(),
            session.usage
        );

        self.store.save_json(StoreKey::FormMemo, &session.form).await?;
        self.store.save_json(StoreKey::History, &session.history).await?;
        self.store.save_json(StoreKey::Usage, &session.usage).await
    }

    /// Flips the completion flag of one post of the current plan.
    ///
    /// Indices are 0-based. The same change is applied to the history entry
    /// with the current plan's id, and history is persisted once. Returns
    /// the new flag, or `None` when no plan is current.
    ///
    /// # Panics
    ///
    /// Panics if `week_index` or `post_index` does not address a post of the
    /// current plan.
    pub async fn toggle_completion(
        &self,
        week_index: usize,
        post_index: usize,
    ) -> Result<Option<bool>> {
        let mut guard = self.session.lock().await;
        let session = &mut *guard;

        let Some(current) = session.current.as_mut() else {
            return Ok(None);
        };

        let completed = match current.post_mut(week_index, post_index) {
            Some(post) => post.toggle(),
            None => panic!("no post at week index {week_index}, post index {post_index}"),
        };

        if let Some(entry) = session.history.iter_mut().find(|p| p.id == current.id) {
            if let Some(post) = entry.post_mut(week_index, post_index) {
                post.is_completed = completed;
            }
        }

        self.store.save_json(StoreKey::History, &session.history).await?;

        debug!(
            "Post {post_index} of week index {week_index} in plan {} is now {}",
            current.id,
            if completed { "completed" } else { "pending" }
        );
        Ok(Some(completed))
    }

    /// Makes the history entry with `id` current and shows the dashboard.
    ///
    /// # Errors
    ///
    /// Returns `CadenceError::PlanNotFound` if no history entry has that id.
    pub async fn open_plan(&self, id: &PlanId) -> Result<MarketingPlan> {
        let mut session = self.session.lock().await;

        let plan = session
            .history
            .iter()
            .find(|plan| &plan.id == id)
            .cloned()
            .ok_or_else(|| CadenceError::PlanNotFound {
                id: id.to_string(),
            })?;

        session.current = Some(plan.clone());
        session.view = View::Dashboard;
        Ok(plan)
    }

    /// Opens the most recent history entry, if there is one.
    pub async fn open_latest(&self) -> Option<MarketingPlan> {
        let mut session = self.session.lock().await;

        let plan = session.history.first().cloned()?;
        session.current = Some(plan.clone());
        session.view = View::Dashboard;
        Some(plan)
    }

    /// Generates an illustration for one post of the current plan.
    ///
    /// Indices are 0-based. The image is returned to the caller and not
    /// stored anywhere.
    ///
    /// # Errors
    ///
    /// Returns `CadenceError::InvalidInput` if no plan is current or the
    /// indices do not address a post, and any error reported by the image
    /// generator.
    pub async fn generate_post_image(
        &self,
        week_index: usize,
        post_index: usize,
    ) -> Result<GeneratedImage> {
        let image_prompt = {
            let session = self.session.lock().await;
            let plan = session.current.as_ref().ok_or_else(|| {
                CadenceError::invalid_input("plan").with_reason("No plan is open")
            })?;
            plan.post(week_index, post_index)
                .map(|post| post.image_prompt.clone())
                .ok_or_else(|| {
                    CadenceError::invalid_input("post").with_reason(format!(
                        "No post at week index {week_index}, post index {post_index}"
                    ))
                })?
        };

        debug!("Generating image for week index {week_index}, post index {post_index}");
        self.image_generator.generate_image(&image_prompt).await
    }
}
