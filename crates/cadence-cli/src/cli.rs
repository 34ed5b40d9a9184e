//! Command handlers.
//!
//! Each handler calls into the controller and renders the result as
//! markdown. Errors are returned to `main`, which prints them with the
//! matching hint and exits non-zero.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use cadence_core::{
    Audience, Controller, History, MarketingGoal, MarketingPlan, OperationStatus, StrategyFocus,
    Style,
};
use log::info;

use crate::{
    args::{
        Commands, ExportArgs, FormCommands, GenerateArgs, HistoryCommands, ImageArgs, PlanArgs,
        PostRef, ToggleArgs,
    },
    renderer::TerminalRenderer,
};

pub struct Cli {
    controller: Controller,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(controller: Controller, renderer: TerminalRenderer) -> Self {
        Self {
            controller,
            renderer,
        }
    }

    /// Runs one command; no command lists the history.
    pub async fn run(&self, command: Option<Commands>) -> Result<()> {
        let command = command.unwrap_or(Commands::History { command: None });

        if !command.allowed_logged_out() {
            self.require_login().await?;
        }

        match command {
            Commands::Login { nickname } => self.login(&nickname).await,
            Commands::Logout => self.logout().await,
            Commands::Whoami => self.whoami().await,
            Commands::Form { command } => self.handle_form_command(command).await,
            Commands::Generate(args) => self.generate(args).await,
            Commands::Show(args) => self.show(&args).await,
            Commands::History { command: None } => self.list_history().await,
            Commands::History {
                command: Some(HistoryCommands::Open { id }),
            } => {
                self.show(&PlanArgs { plan: Some(id) }).await
            }
            Commands::Toggle(args) => self.toggle(&args).await,
            Commands::Image(args) => self.image(args).await,
            Commands::Export(args) => self.export(args).await,
            Commands::Usage => self.usage().await,
        }
    }

    async fn require_login(&self) -> Result<()> {
        if self.controller.user().await.is_none() {
            bail!("Not logged in. Run `cadence login <nickname>` first.");
        }
        Ok(())
    }

    fn success(&self, message: String) -> Result<()> {
        self.renderer
            .render(&OperationStatus::success(message).to_string())
    }

    async fn login(&self, nickname: &str) -> Result<()> {
        match self.controller.login(nickname).await? {
            Some(identity) => self.success(format!("Logged in as {}", identity.username)),
            None => bail!("Nickname must not be empty"),
        }
    }

    async fn logout(&self) -> Result<()> {
        self.controller.logout().await?;
        self.success("Logged out".to_string())
    }

    async fn whoami(&self) -> Result<()> {
        match self.controller.user().await {
            Some(identity) => self.success(format!("Logged in as {}", identity.username)),
            None => self.renderer.render("Not logged in.\n"),
        }
    }

    async fn handle_form_command(&self, command: FormCommands) -> Result<()> {
        match command {
            FormCommands::Show => {
                let form = self.controller.form().await;
                self.renderer.render(&format!("# Form\n\n{form}"))
            }
            FormCommands::Set { field, value } => {
                let mut form = self.controller.form().await;
                form.set_field(&field, &value)?;
                self.controller.update_form(form).await?;
                self.success(format!("Set {field}"))
            }
            FormCommands::Reset => {
                self.controller.reset_form().await?;
                self.success("Form reset to defaults".to_string())
            }
            FormCommands::Options => self.renderer.render(&form_options()),
        }
    }

    async fn generate(&self, args: GenerateArgs) -> Result<()> {
        let mut form = self.controller.form().await;
        args.apply_to(&mut form);
        form.validate()?;
        self.controller.update_form(form.clone()).await?;

        info!("Requesting a 12-week plan for '{}'", form.display_name());
        let plan = self.controller.generate_plan(form).await?;

        self.renderer.render(&plan.to_string())?;
        self.success(format!("Generated plan {}", plan.id))
    }

    /// Opens the requested plan, or the most recent one.
    async fn open(&self, args: &PlanArgs) -> Result<MarketingPlan> {
        match args.plan_id() {
            Some(id) => Ok(self.controller.open_plan(&id).await?),
            None => self
                .controller
                .open_latest()
                .await
                .ok_or_else(|| anyhow!("No plans in history. Run `cadence generate` first.")),
        }
    }

    async fn show(&self, args: &PlanArgs) -> Result<()> {
        let plan = self.open(args).await?;
        self.renderer.render(&plan.to_string())
    }

    async fn list_history(&self) -> Result<()> {
        let history = History(self.controller.history().await);
        self.renderer.render(&history.to_string())
    }

    async fn toggle(&self, args: &ToggleArgs) -> Result<()> {
        let plan = self.open(&args.plan).await?;
        let (week_index, post_index) = post_indices(&plan, &args.target)?;

        let completed = self
            .controller
            .toggle_completion(week_index, post_index)
            .await?
            .context("No plan is open")?;

        let platform = plan.weeks[week_index].posts[post_index].platform;
        self.success(format!(
            "Week {} post {} ({platform}) marked as {}",
            args.target.week,
            args.target.post,
            if completed { "done" } else { "not done" }
        ))
    }

    async fn image(&self, args: ImageArgs) -> Result<()> {
        let plan = self.open(&args.plan).await?;
        let (week_index, post_index) = post_indices(&plan, &args.target)?;

        info!("Requesting image for week {} post {}", args.target.week, args.target.post);
        let image = self
            .controller
            .generate_post_image(week_index, post_index)
            .await?;

        let output = args.output.unwrap_or_else(|| {
            PathBuf::from(format!(
                "week{}-post{}.{}",
                args.target.week,
                args.target.post,
                image.extension()
            ))
        });
        write_file(&output, &image.bytes()?)?;
        self.success(format!("Image written to {}", output.display()))
    }

    async fn export(&self, args: ExportArgs) -> Result<()> {
        let plan = self.open(&args.plan).await?;
        let markdown = plan.to_string();

        match args.output {
            Some(output) => {
                write_file(&output, markdown.as_bytes())?;
                self.success(format!("Plan exported to {}", output.display()))
            }
            None => {
                print!("{markdown}");
                Ok(())
            }
        }
    }

    async fn usage(&self) -> Result<()> {
        let used = self.controller.usage().await;
        let message = match self.controller.settings().usage_quota {
            Some(limit) => format!("{used}/{limit} generations used"),
            None => format!("{used} generations used (no quota)"),
        };
        self.renderer.render(&format!("{message}\n"))
    }
}

/// Converts 1-based week and post numbers into indices of `plan`.
fn post_indices(plan: &MarketingPlan, target: &PostRef) -> Result<(usize, usize)> {
    let week = target
        .week
        .checked_sub(1)
        .and_then(|index| plan.weeks.get(index))
        .with_context(|| format!("Week {} does not exist (1-{})", target.week, plan.weeks.len()))?;

    if week.is_prep_week() {
        bail!("Week {} is the preparation week and has no posts", target.week);
    }
    if week.posts.is_empty() {
        bail!("Week {} has no posts", target.week);
    }
    if target.post == 0 || target.post > week.posts.len() {
        bail!(
            "Week {} has posts 1-{}, not {}",
            target.week,
            week.posts.len(),
            target.post
        );
    }

    Ok((target.week - 1, target.post - 1))
}

fn write_file(path: &Path, contents: &[u8]) -> Result<()> {
    std::fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))
}

fn form_options() -> String {
    fn section<T: std::fmt::Display>(
        out: &mut String,
        title: &str,
        choices: &[T],
        slug: fn(&T) -> &'static str,
    ) {
        out.push_str(&format!("## {title}\n\n"));
        for choice in choices {
            out.push_str(&format!("- {choice} (`{}`)\n", slug(choice)));
        }
        out.push('\n');
    }

    let mut out = String::from("# Form options\n\n");
    section(&mut out, "style", Style::ALL, Style::slug);
    section(&mut out, "audience", Audience::ALL, Audience::slug);
    section(&mut out, "marketingGoal", MarketingGoal::ALL, MarketingGoal::slug);
    section(&mut out, "strategyFocus", StrategyFocus::ALL, StrategyFocus::slug);
    out
}

#[cfg(test)]
mod tests {
    use cadence_core::{MarketingInput, Platform, PrepPhase, SocialPost, WeeklyPlan};

    use super::*;

    fn two_week_plan() -> MarketingPlan {
        let post = SocialPost {
            platform: Platform::Facebook,
            content: "早安咖啡".to_string(),
            image_prompt: "latte".to_string(),
            hashtags: Vec::new(),
            date: None,
            day_of_week: None,
            is_completed: false,
        };
        let weeks = vec![
            WeeklyPlan {
                week_number: 1,
                start_date: "2026-10-19".to_string(),
                prep_phase: Some(PrepPhase {
                    persona: "| 背景 |".to_string(),
                    brand_positioning: "街角咖啡".to_string(),
                }),
                posts: Vec::new(),
            },
            WeeklyPlan {
                week_number: 2,
                start_date: "2026-10-26".to_string(),
                prep_phase: None,
                posts: vec![post],
            },
        ];
        MarketingPlan::new(MarketingInput::default(), weeks)
    }

    #[test]
    fn test_post_indices_are_one_based() {
        let plan = two_week_plan();
        let target = PostRef { week: 2, post: 1 };
        assert_eq!(post_indices(&plan, &target).unwrap(), (1, 0));
    }

    #[test]
    fn test_post_indices_reject_prep_week_and_out_of_range() {
        let plan = two_week_plan();

        let prep = post_indices(&plan, &PostRef { week: 1, post: 1 }).unwrap_err();
        assert!(prep.to_string().contains("preparation week"));

        assert!(post_indices(&plan, &PostRef { week: 0, post: 1 }).is_err());
        assert!(post_indices(&plan, &PostRef { week: 3, post: 1 }).is_err());
        assert!(post_indices(&plan, &PostRef { week: 2, post: 2 }).is_err());
    }

    #[test]
    fn test_form_options_lists_labels_and_slugs() {
        let options = form_options();
        assert!(options.contains("## style"));
        assert!(options.contains("- 工業風 (`industrial`)"));
        assert!(options.contains("- B端中盤商 (`wholesalers`)"));
        assert!(options.contains("## strategyFocus"));
    }
}
