//! Page renderer built on minijinja.
//!
//! Produces one HTML document. Every section carries its anchor id and reveal
//! threshold (`data-reveal`); every animated child carries its stagger delay as
//! a `--reveal-delay` custom property. The embedded script reads those
//! attributes back, so all timing decisions stay on the Rust side.

use std::collections::BTreeMap;
use std::time::Duration;

use anyhow::{Context, Result};
use minijinja::{Environment, context};
use serde::Serialize;
use tracing::debug;

use crate::content::{CaseStudy, Content, Education, Experience, Metric, Project, Skill};
use crate::core::invariants::is_css_color;
use crate::core::motion::Stagger;
use crate::core::types::SectionId;
use crate::io::config::SiteConfig;

const PAGE_TEMPLATE: &str = include_str!("../templates/page.html");
pub const SITE_CSS: &str = include_str!("../templates/site.css");
pub const SITE_JS: &str = include_str!("../templates/site.js");

/// Case-study cards list at most this many features.
const CASE_STUDY_FEATURES: usize = 3;

/// How the page talks to its interactive state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Static build: the script simulates submission locally.
    Static,
    /// Served by `portfolio-ui`: the script drives a server session.
    Live,
}

#[derive(Debug, Serialize)]
struct SocialView<'a> {
    label: &'static str,
    url: &'a str,
    external: bool,
}

#[derive(Debug, Serialize)]
struct CardView<'a> {
    id: u32,
    title: &'a str,
    description: &'a str,
    demo_url: &'a str,
    github_url: &'a str,
    tools: &'a [String],
    lessons: &'a [String],
    features: &'a [String],
    metrics: &'a [Metric],
    delay_ms: u128,
}

impl<'a> CardView<'a> {
    fn project(project: &'a Project, delay: Duration) -> Self {
        Self {
            id: project.id,
            title: &project.title,
            description: &project.description,
            demo_url: &project.demo_url,
            github_url: &project.github_url,
            tools: &project.tools,
            lessons: &project.lessons,
            features: &project.features,
            metrics: &[],
            delay_ms: delay.as_millis(),
        }
    }

    fn case_study(case_study: &'a CaseStudy, delay: Duration) -> Self {
        let features = &case_study.project.features;
        Self {
            features: &features[..features.len().min(CASE_STUDY_FEATURES)],
            metrics: &case_study.metrics,
            ..Self::project(&case_study.project, delay)
        }
    }
}

#[derive(Debug, Serialize)]
struct SkillView<'a> {
    #[serde(flatten)]
    skill: &'a Skill,
    /// The skill colour, only when it is a plain hex value or keyword.
    glow: Option<&'a str>,
    delay_ms: u128,
}

#[derive(Debug, Serialize)]
struct TimelineView<'a> {
    #[serde(flatten)]
    experience: &'a Experience,
    delay_ms: u128,
    side: &'static str,
    last: bool,
}

#[derive(Debug, Serialize)]
struct EducationView<'a> {
    #[serde(flatten)]
    education: &'a Education,
    delay_ms: u128,
}

fn delays(stagger: &Stagger, count: usize) -> Vec<u128> {
    stagger
        .delays(count)
        .into_iter()
        .map(|delay| delay.as_millis())
        .collect()
}

/// Template engine wrapper around minijinja.
pub struct PageRenderer {
    env: Environment<'static>,
}

impl PageRenderer {
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        env.add_template("page.html", PAGE_TEMPLATE)
            .context("load page template")?;
        Ok(Self { env })
    }

    pub fn render(
        &self,
        content: &Content,
        config: &SiteConfig,
        mode: RenderMode,
    ) -> Result<String> {
        let motion = config.motion_plan();
        let bio = motion.section.with_delay(Duration::from_millis(300));
        let thresholds = config.reveal_thresholds();

        let reveal: BTreeMap<&str, f64> = SectionId::ALL
            .into_iter()
            .map(|section| (section.anchor(), thresholds.amount_for(section)))
            .collect();

        let socials: Vec<SocialView> = content
            .profile
            .socials
            .iter()
            .map(|social| SocialView {
                label: social.kind.label(),
                url: &social.url,
                external: !social.url.starts_with("mailto:"),
            })
            .collect();

        let projects: Vec<CardView> = content
            .projects
            .iter()
            .zip(motion.cards.delays(content.projects.len()))
            .map(|(project, delay)| CardView::project(project, delay))
            .collect();

        let case_studies: Vec<CardView> = content
            .case_studies
            .iter()
            .zip(motion.cards.delays(content.case_studies.len()))
            .map(|(case_study, delay)| CardView::case_study(case_study, delay))
            .collect();

        let skills: Vec<SkillView> = content
            .skills
            .iter()
            .zip(motion.cards.delays(content.skills.len()))
            .map(|(skill, delay)| SkillView {
                skill,
                glow: skill.color.as_deref().filter(|color| is_css_color(color)),
                delay_ms: delay.as_millis(),
            })
            .collect();

        let last = content.experiences.len().saturating_sub(1);
        let experiences: Vec<TimelineView> = content
            .experiences
            .iter()
            .zip(motion.timeline.delays(content.experiences.len()))
            .enumerate()
            .map(|(index, (experience, delay))| TimelineView {
                experience,
                delay_ms: delay.as_millis(),
                side: if index % 2 == 0 { "left" } else { "right" },
                last: index == last,
            })
            .collect();

        let education: Vec<EducationView> = content
            .education
            .iter()
            .zip(motion.cards.delays(content.education.len()))
            .map(|(education, delay)| EducationView {
                education,
                delay_ms: delay.as_millis(),
            })
            .collect();

        debug!(
            projects = projects.len(),
            case_studies = case_studies.len(),
            skills = skills.len(),
            experiences = experiences.len(),
            "rendering page"
        );

        let template = self.env.get_template("page.html")?;
        let rendered = template
            .render(context! {
                live => mode == RenderMode::Live,
                profile => &content.profile,
                bio_delays => delays(&bio, content.profile.bio.len()),
                socials,
                section_delays => delays(&motion.section, 2),
                reveal,
                projects,
                case_studies,
                skills,
                experiences,
                education,
                contact => &config.contact,
                submission => &config.submission,
            })
            .context("render page template")?;
        Ok(rendered)
    }
}

/// Render the full page with a one-off renderer.
pub fn render_page(content: &Content, config: &SiteConfig, mode: RenderMode) -> Result<String> {
    PageRenderer::new()?.render(content, config, mode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::default_content;

    fn render_default(config: &SiteConfig) -> String {
        render_page(&default_content(), config, RenderMode::Static).expect("render")
    }

    #[test]
    fn every_section_has_its_anchor() {
        let html = render_default(&SiteConfig::default());
        for section in SectionId::ALL {
            assert!(
                html.contains(&format!("id=\"{}\"", section.anchor())),
                "missing section {section}"
            );
        }
    }

    #[test]
    fn calendar_toggle_switches_contact_card() {
        let mut config = SiteConfig::default();
        let html = render_default(&config);
        assert!(html.contains("Schedule Now"));
        assert!(!html.contains("name=\"message\""));

        config.contact.use_calendar = false;
        let html = render_default(&config);
        assert!(!html.contains("Schedule Now"));
        for field in ["name", "email", "message"] {
            assert!(html.contains(&format!("name=\"{field}\"")));
        }
        assert!(html.contains("mailto:hello@example.com"));
    }

    #[test]
    fn reveal_thresholds_and_delays_are_emitted() {
        let html = render_default(&SiteConfig::default());
        assert!(html.contains("data-reveal=\"0.2\""));
        assert!(html.contains("--reveal-delay: 100ms"));
        assert!(html.contains("--reveal-delay: 200ms"));
    }

    #[test]
    fn case_study_cards_show_three_features() {
        let html = render_default(&SiteConfig::default());
        assert!(html.contains("Responsive design across devices"));
        assert!(!html.contains("Accessibility compliance"));
    }

    #[test]
    fn text_is_escaped() {
        let mut content = default_content();
        content.profile.name = "<script>alert(1)</script>".to_string();
        let html =
            render_page(&content, &SiteConfig::default(), RenderMode::Static).expect("render");
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn live_mode_is_flagged_for_the_script() {
        let html = render_page(&default_content(), &SiteConfig::default(), RenderMode::Live)
            .expect("render");
        assert!(html.contains("data-live=\"true\""));
    }

    #[test]
    fn unsafe_skill_color_is_left_out_of_style() {
        let mut content = default_content();
        content.skills[1].color = Some("red) url(https://evil.example".to_string());
        let html =
            render_page(&content, &SiteConfig::default(), RenderMode::Static).expect("render");
        assert!(html.contains("drop-shadow(0 0 2px #61DAFB)"));
        assert!(!html.contains("evil.example"));
    }
}
