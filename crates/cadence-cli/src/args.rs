//! Command-line interface definitions using clap.
//!
//! Arguments stay clap-specific here and are converted into core types
//! (`MarketingInput` edits, 0-based indices, `PlanId`) before they reach the
//! controller.

use std::path::PathBuf;

use cadence_core::{Audience, MarketingGoal, MarketingInput, PlanId, StrategyFocus, Style};
use clap::{Args as ClapArgs, Parser, Subcommand};

/// Generate and track 12-week social content calendars
///
/// Cadence asks a generative model for a 12-week Facebook and Instagram
/// calendar tailored to a marketing brief, keeps the 15 most recent plans and
/// lets you tick posts off as you publish them.
#[derive(Parser)]
#[command(version, about, name = "cadence")]
pub struct Args {
    /// Path to the SQLite data file. Defaults to
    /// $XDG_DATA_HOME/cadence/cadence.db
    #[arg(long, global = true)]
    pub data_file: Option<PathBuf>,

    /// Path to the config file. Defaults to
    /// $XDG_CONFIG_HOME/cadence/config.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the Cadence CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Log in under a nickname
    Login {
        /// Name shown in the session; no password is involved
        nickname: String,
    },
    /// Forget the current nickname (history is kept)
    Logout,
    /// Show who is logged in
    Whoami,
    /// Inspect or change the remembered form
    #[command(alias = "f")]
    Form {
        #[command(subcommand)]
        command: FormCommands,
    },
    /// Generate a new 12-week plan from the form
    #[command(alias = "g")]
    Generate(GenerateArgs),
    /// Show a plan (the most recent one by default)
    Show(PlanArgs),
    /// List past plans
    #[command(alias = "h")]
    History {
        #[command(subcommand)]
        command: Option<HistoryCommands>,
    },
    /// Mark a post as done, or not done again
    #[command(alias = "t")]
    Toggle(ToggleArgs),
    /// Generate an illustration for a post
    Image(ImageArgs),
    /// Write a plan as markdown
    Export(ExportArgs),
    /// Show how many generations have been used
    Usage,
}

impl Commands {
    /// Whether the command works without a logged-in identity.
    pub fn allowed_logged_out(&self) -> bool {
        matches!(
            self,
            Commands::Login { .. }
                | Commands::Whoami
                | Commands::Form {
                    command: FormCommands::Options
                }
        )
    }
}

#[derive(Subcommand)]
pub enum FormCommands {
    /// Show the remembered form values
    Show,
    /// Change one form field
    Set {
        /// Field name, e.g. industry, brandName, style, contactInfo
        field: String,
        /// New value; choice fields accept the label or its slug
        value: String,
    },
    /// Restore the default form
    Reset,
    /// List the values accepted by the choice fields
    Options,
}

#[derive(Subcommand)]
pub enum HistoryCommands {
    /// Open a past plan by ID
    Open {
        /// Plan ID as shown by `cadence history`
        id: String,
    },
}

/// Generate a plan
///
/// Flags override the remembered form for this and future generations.
#[derive(ClapArgs)]
pub struct GenerateArgs {
    /// Industry the brand works in
    #[arg(long)]
    pub industry: Option<String>,
    /// Brand name
    #[arg(long)]
    pub brand: Option<String>,
    /// Creative style (label or slug, see `cadence form options`)
    #[arg(long)]
    pub style: Option<Style>,
    /// Target audience
    #[arg(long)]
    pub audience: Option<Audience>,
    /// Strategic goal
    #[arg(long)]
    pub goal: Option<MarketingGoal>,
    /// Strategy focus
    #[arg(long)]
    pub focus: Option<StrategyFocus>,
    /// Benchmark brand or account
    #[arg(long)]
    pub target_brand: Option<String>,
    #[arg(long)]
    pub target_brand_url: Option<String>,
    /// Creator whose style you like
    #[arg(long)]
    pub creator: Option<String>,
    #[arg(long)]
    pub creator_url: Option<String>,
    /// Contact block appended to every post
    #[arg(long)]
    pub contact: Option<String>,
}

impl GenerateArgs {
    /// Applies the given flags on top of `input`.
    pub fn apply_to(self, input: &mut MarketingInput) {
        if let Some(industry) = self.industry {
            input.industry = industry;
        }
        if let Some(brand) = self.brand {
            input.brand_name = brand;
        }
        if let Some(style) = self.style {
            input.style = style;
        }
        if let Some(audience) = self.audience {
            input.audience = audience;
        }
        if let Some(goal) = self.goal {
            input.marketing_goal = goal;
        }
        if let Some(focus) = self.focus {
            input.strategy_focus = focus;
        }
        if let Some(name) = self.target_brand {
            input.target_brand_name = name;
        }
        if let Some(url) = self.target_brand_url {
            input.target_brand_url = url;
        }
        if let Some(name) = self.creator {
            input.favorite_creator_name = name;
        }
        if let Some(url) = self.creator_url {
            input.favorite_creator_url = url;
        }
        if let Some(contact) = self.contact {
            input.contact_info = contact;
        }
    }
}

#[derive(ClapArgs)]
pub struct PlanArgs {
    /// Plan ID; defaults to the most recent plan
    #[arg(long)]
    pub plan: Option<String>,
}

impl PlanArgs {
    pub fn plan_id(&self) -> Option<PlanId> {
        self.plan.as_deref().map(PlanId::from)
    }
}

/// Week and post numbers as shown in `cadence show`, both starting at 1.
#[derive(ClapArgs)]
pub struct PostRef {
    /// Week number (2-12 carry posts)
    pub week: usize,
    /// Post number within the week
    pub post: usize,
}

#[derive(ClapArgs)]
pub struct ToggleArgs {
    #[command(flatten)]
    pub target: PostRef,
    #[command(flatten)]
    pub plan: PlanArgs,
}

#[derive(ClapArgs)]
pub struct ImageArgs {
    #[command(flatten)]
    pub target: PostRef,
    #[command(flatten)]
    pub plan: PlanArgs,
    /// File to write; defaults to week<W>-post<P>.<ext> in the current directory
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(ClapArgs)]
pub struct ExportArgs {
    #[command(flatten)]
    pub plan: PlanArgs,
    /// File to write; prints to stdout when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_command_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_generate_flags_override_form() {
        let args = Args::parse_from([
            "cadence",
            "generate",
            "--industry",
            "咖啡廳",
            "--style",
            "industrial",
            "--audience",
            "B端零售商",
        ]);
        let Some(Commands::Generate(generate)) = args.command else {
            panic!("expected generate command");
        };

        let mut input = MarketingInput {
            brand_name: "晨光".to_string(),
            ..MarketingInput::default()
        };
        generate.apply_to(&mut input);

        assert_eq!(input.industry, "咖啡廳");
        assert_eq!(input.brand_name, "晨光");
        assert_eq!(input.style, Style::Industrial);
        assert_eq!(input.audience, Audience::Retailers);
    }

    #[test]
    fn test_invalid_choice_is_rejected() {
        assert!(Args::try_parse_from(["cadence", "generate", "--style", "baroque"]).is_err());
    }

    fn command(argv: &[&str]) -> Commands {
        Args::parse_from(argv).command.expect("command should be present")
    }

    #[test]
    fn test_login_gate_exemptions() {
        assert!(command(&["cadence", "login", "小明"]).allowed_logged_out());
        assert!(command(&["cadence", "whoami"]).allowed_logged_out());
        assert!(command(&["cadence", "form", "options"]).allowed_logged_out());
        assert!(!command(&["cadence", "form", "show"]).allowed_logged_out());
        assert!(!command(&["cadence", "history"]).allowed_logged_out());
        assert!(!command(&["cadence", "toggle", "2", "1"]).allowed_logged_out());
    }
}
