//! Marketing form input.

use serde::{Deserialize, Serialize};

use super::{Audience, MarketingGoal, StrategyFocus, Style};
use crate::error::{CadenceError, Result};

/// Contact block used until the user writes their own.
pub const DEFAULT_CONTACT_INFO: &str = "您好，我們致力於提供最優質的服務與產品。\n如有任何需求或合作意願，歡迎隨時聯繫！\n官方LINE：@your_brand\n官方網站：https://example.com\n連絡電話：0900-000-000";

/// Configuration a user fills in before generating a plan.
///
/// Optional text fields use the empty string for "not provided", matching
/// how the form memo is stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MarketingInput {
    /// Industry the brand works in (required)
    pub industry: String,

    /// Brand name
    #[serde(default)]
    pub brand_name: String,

    pub style: Style,

    pub audience: Audience,

    pub marketing_goal: MarketingGoal,

    pub strategy_focus: StrategyFocus,

    /// Benchmark brand or account to look up to
    #[serde(default)]
    pub target_brand_name: String,

    #[serde(default)]
    pub target_brand_url: String,

    /// Creator whose style the user likes
    #[serde(default)]
    pub favorite_creator_name: String,

    #[serde(default)]
    pub favorite_creator_url: String,

    /// Call-to-action block appended verbatim to every post
    #[serde(default)]
    pub contact_info: String,
}

impl Default for MarketingInput {
    fn default() -> Self {
        Self {
            industry: String::new(),
            brand_name: String::new(),
            style: Style::default(),
            audience: Audience::default(),
            marketing_goal: MarketingGoal::default(),
            strategy_focus: StrategyFocus::default(),
            target_brand_name: String::new(),
            target_brand_url: String::new(),
            favorite_creator_name: String::new(),
            favorite_creator_url: String::new(),
            contact_info: DEFAULT_CONTACT_INFO.to_string(),
        }
    }
}

impl MarketingInput {
    /// Names accepted by [`MarketingInput::set_field`], in form order.
    pub const FIELDS: &'static [&'static str] = &[
        "industry",
        "brandName",
        "style",
        "audience",
        "marketingGoal",
        "strategyFocus",
        "targetBrandName",
        "targetBrandUrl",
        "favoriteCreatorName",
        "favoriteCreatorUrl",
        "contactInfo",
    ];

    /// Checks the input is complete enough to send to the model.
    pub fn validate(&self) -> Result<()> {
        if self.industry.trim().is_empty() {
            return Err(CadenceError::invalid_input("industry").with_reason("Industry is required"));
        }
        Ok(())
    }

    /// Replaces one field by its form name.
    ///
    /// Field names are the camelCase names used in storage; snake_case and
    /// kebab-case spellings are accepted as well. Choice fields parse from a
    /// label or a slug.
    pub fn set_field(&mut self, field: &str, value: &str) -> Result<()> {
        let normalized: String = field
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();

        let invalid = |reason: String| CadenceError::invalid_input(field).with_reason(reason);

        match normalized.as_str() {
            "industry" => self.industry = value.to_string(),
            "brandname" | "brand" => self.brand_name = value.to_string(),
            "style" => self.style = value.parse().map_err(invalid)?,
            "audience" => self.audience = value.parse().map_err(invalid)?,
            "marketinggoal" | "goal" => self.marketing_goal = value.parse().map_err(invalid)?,
            "strategyfocus" | "focus" => self.strategy_focus = value.parse().map_err(invalid)?,
            "targetbrandname" => self.target_brand_name = value.to_string(),
            "targetbrandurl" => self.target_brand_url = value.to_string(),
            "favoritecreatorname" => self.favorite_creator_name = value.to_string(),
            "favoritecreatorurl" => self.favorite_creator_url = value.to_string(),
            "contactinfo" | "contact" => self.contact_info = value.to_string(),
            _ => {
                return Err(invalid(format!(
                    "Unknown field, expected one of: {}",
                    Self::FIELDS.join(", ")
                )));
            }
        }
        Ok(())
    }

    /// Name shown for plans built from this input: the brand, else the industry.
    pub fn display_name(&self) -> &str {
        if self.brand_name.trim().is_empty() {
            &self.industry
        } else {
            &self.brand_name
        }
    }
}
