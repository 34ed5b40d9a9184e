//! Identity, form memo and view operations for the Controller.

use log::info;

use super::Controller;
use crate::{
    error::Result,
    models::{Identity, MarketingInput, MarketingPlan, View},
    store::{StoreExt, StoreKey},
};

impl Controller {
    /// Logs in under `nickname`.
    ///
    /// A nickname that trims to empty is ignored and `None` is returned.
    /// There is no uniqueness check and no password.
    pub async fn login(&self, nickname: &str) -> Result<Option<Identity>> {
        let username = nickname.trim();
        if username.is_empty() {
            return Ok(None);
        }

        let identity = Identity {
            username: username.to_string(),
        };

        let mut session = self.session.lock().await;
        session.user = Some(identity.clone());
        self.store.save_json(StoreKey::Identity, &identity).await?;

        info!("Logged in as {username}");
        Ok(Some(identity))
    }

    /// Forgets the identity. History and form memo are kept.
    pub async fn logout(&self) -> Result<()> {
        let mut session = self.session.lock().await;
        session.user = None;
        self.store.remove(StoreKey::Identity).await?;

        info!("Logged out");
        Ok(())
    }

    pub async fn user(&self) -> Option<Identity> {
        self.session.lock().await.user.clone()
    }

    /// Current form values (the memo).
    pub async fn form(&self) -> MarketingInput {
        self.session.lock().await.form.clone()
    }

    /// Replaces the form memo and persists it.
    pub async fn update_form(&self, input: MarketingInput) -> Result<()> {
        let mut session = self.session.lock().await;
        session.form = input;
        self.store.save_json(StoreKey::FormMemo, &session.form).await
    }

    /// Restores the compiled-in default form and persists it.
    pub async fn reset_form(&self) -> Result<MarketingInput> {
        let input = MarketingInput::default();
        self.update_form(input.clone()).await?;
        Ok(input)
    }

    pub async fn view(&self) -> View {
        self.session.lock().await.view
    }

    pub async fn set_view(&self, view: View) {
        self.session.lock().await.view = view;
    }

    /// The plan shown on the dashboard, if any.
    pub async fn current_plan(&self) -> Option<MarketingPlan> {
        self.session.lock().await.current.clone()
    }

    /// Past plans, most recent first.
    pub async fn history(&self) -> Vec<MarketingPlan> {
        self.session.lock().await.history.clone()
    }

    /// Number of successful generations so far.
    pub async fn usage(&self) -> u32 {
        self.session.lock().await.usage
    }
}
