//! Display implementations for domain models.
//!
//! Every implementation writes markdown for the terminal renderer. The same
//! output is what `export` writes to disk, so it has to read well as a plain
//! document too.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::models::{MarketingInput, MarketingPlan, PrepPhase, SocialPost, WeeklyPlan};

fn or_dash(value: &str) -> &str {
    if value.trim().is_empty() {
        "-"
    } else {
        value
    }
}

fn reference(name: &str, url: &str) -> String {
    match (name.trim().is_empty(), url.trim().is_empty()) {
        (true, true) => "-".to_string(),
        (false, true) => name.to_string(),
        (true, false) => url.to_string(),
        (false, false) => format!("{name} ({url})"),
    }
}

impl fmt::Display for MarketingInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "- **Industry**: {}", or_dash(&self.industry))?;
        writeln!(f, "- **Brand**: {}", or_dash(&self.brand_name))?;
        writeln!(f, "- **Style**: {}", self.style)?;
        writeln!(f, "- **Audience**: {}", self.audience)?;
        writeln!(f, "- **Goal**: {}", self.marketing_goal)?;
        writeln!(f, "- **Focus**: {}", self.strategy_focus)?;
        writeln!(
            f,
            "- **Benchmark**: {}",
            reference(&self.target_brand_name, &self.target_brand_url)
        )?;
        writeln!(
            f,
            "- **Favorite creator**: {}",
            reference(&self.favorite_creator_name, &self.favorite_creator_url)
        )?;
        writeln!(f)?;
        writeln!(f, "**Contact**")?;
        writeln!(f)?;
        for line in self.contact_info.lines() {
            writeln!(f, "> {line}")?;
        }
        Ok(())
    }
}

impl fmt::Display for MarketingPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}", self.title())?;
        writeln!(f)?;

        let (done, total) = self.completion();
        writeln!(f, "- ID: {}", self.id)?;
        writeln!(f, "- Industry: {}", self.input.industry)?;
        writeln!(
            f,
            "- Style: {} / Audience: {}",
            self.input.style, self.input.audience
        )?;
        writeln!(
            f,
            "- Goal: {} / Focus: {}",
            self.input.marketing_goal, self.input.strategy_focus
        )?;
        writeln!(f, "- Generated: {}", LocalDateTime(&self.timestamp))?;
        writeln!(f, "- Progress: {done}/{total} posts")?;
        writeln!(f)?;

        for week in &self.weeks {
            write!(f, "{week}")?;
        }
        Ok(())
    }
}

impl fmt::Display for WeeklyPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.posts.is_empty() {
            writeln!(f, "## Week {} ({})", self.week_number, self.start_date)?;
        } else {
            writeln!(
                f,
                "## Week {} ({}) {}/{}",
                self.week_number,
                self.start_date,
                self.completed_posts(),
                self.posts.len()
            )?;
        }
        writeln!(f)?;

        if let Some(prep) = &self.prep_phase {
            write!(f, "{prep}")?;
        }

        for (index, post) in self.posts.iter().enumerate() {
            writeln!(f, "### {}. {}", index + 1, post.heading())?;
            writeln!(f)?;
            write!(f, "{post}")?;
        }

        if self.prep_phase.is_none() && self.posts.is_empty() {
            writeln!(f, "No posts this week.")?;
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Display for PrepPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "### Persona")?;
        writeln!(f)?;
        writeln!(f, "{}", self.persona.trim_end())?;
        writeln!(f)?;
        writeln!(f, "### Brand positioning")?;
        writeln!(f)?;
        writeln!(f, "{}", self.brand_positioning.trim_end())?;
        writeln!(f)
    }
}

impl SocialPost {
    fn icon(&self) -> &'static str {
        if self.is_completed {
            "✓"
        } else {
            "○"
        }
    }

    /// `✓ FB · 2026-10-27 星期二`
    fn heading(&self) -> String {
        let mut heading = format!("{} {}", self.icon(), self.platform);
        match (&self.date, &self.day_of_week) {
            (Some(date), Some(day)) => heading.push_str(&format!(" · {date} {day}")),
            (Some(date), None) => heading.push_str(&format!(" · {date}")),
            (None, Some(day)) => heading.push_str(&format!(" · {day}")),
            (None, None) => {}
        }
        heading
    }
}

impl fmt::Display for SocialPost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.content.trim_end())?;
        writeln!(f)?;

        if !self.hashtags.is_empty() {
            writeln!(f, "{}", self.hashtags.join(" "))?;
            writeln!(f)?;
        }

        writeln!(f, "*Image prompt*: {}", self.image_prompt)?;
        writeln!(f)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        models::Platform,
        test_support::{sample_plan, sample_post},
    };

    #[test]
    fn test_plan_markdown_layout() {
        let mut plan = sample_plan("咖啡廳");
        plan.weeks[1].posts[0].is_completed = true;
        let output = plan.to_string();

        assert!(output.starts_with("# 咖啡廳\n"));
        assert!(output.contains(&format!("- ID: {}", plan.id)));
        assert!(output.contains("- Progress: 1/22 posts"));
        assert!(output.contains("## Week 1 (2026-10-19)\n"));
        assert!(output.contains("### Persona"));
        assert!(output.contains("## Week 2 (week-2) 1/2"));
        assert!(output.contains("### 1. ✓ FB"));
        assert!(output.contains("### 2. ○ IG"));
        assert!(output.contains("## Week 12"));
    }

    #[test]
    fn test_post_heading_includes_schedule() {
        let mut post = sample_post(Platform::Instagram, 3);
        post.date = Some("2026-11-04".to_string());
        post.day_of_week = Some("星期三".to_string());
        assert_eq!(post.heading(), "○ IG · 2026-11-04 星期三");

        let rendered = post.to_string();
        assert!(rendered.contains("#coffee #taipei"));
        assert!(rendered.contains("*Image prompt*: latte art"));
    }

    #[test]
    fn test_input_listing() {
        let mut input = crate::test_support::sample_input("花店");
        input.target_brand_name = "好花".to_string();
        let output = input.to_string();

        assert!(output.contains("- **Industry**: 花店"));
        assert!(output.contains("- **Brand**: -"));
        assert!(output.contains("- **Benchmark**: 好花"));
        assert!(output.contains("> 官方LINE：@your_brand"));
    }
}
