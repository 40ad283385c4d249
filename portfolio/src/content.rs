//! Portfolio content: the literal lists the page is rendered from.
//!
//! Content is stored as TOML (`.portfolio/content.toml`). When the file is
//! missing the placeholder returned by [`default_content`] is used. Only the
//! shape matters; the placeholder values carry no meaning.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    pub profile: Profile,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub case_studies: Vec<CaseStudy>,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub experiences: Vec<Experience>,
    #[serde(default)]
    pub education: Vec<Education>,
}

/// Hero section content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub tagline: String,
    #[serde(default)]
    pub bio: Vec<String>,
    #[serde(default)]
    pub hero_image: Option<String>,
    #[serde(default)]
    pub socials: Vec<SocialLink>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialKind {
    X,
    Linkedin,
    Github,
    Email,
}

impl SocialKind {
    pub fn label(self) -> &'static str {
        match self {
            SocialKind::X => "X",
            SocialKind::Linkedin => "LinkedIn",
            SocialKind::Github => "GitHub",
            SocialKind::Email => "Email",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    pub kind: SocialKind,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub demo_url: String,
    pub github_url: String,
    #[serde(default)]
    pub tools: Vec<String>,
    #[serde(default)]
    pub lessons: Vec<String>,
    #[serde(default)]
    pub features: Vec<String>,
}

/// A project with outcome metrics. Metrics keep their file order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseStudy {
    #[serde(flatten)]
    pub project: Project,
    #[serde(default)]
    pub metrics: Vec<Metric>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metric {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    pub icon: String,
    #[serde(default)]
    pub color: Option<String>,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    pub title: String,
    pub company: String,
    pub period: String,
    #[serde(default)]
    pub achievements: Vec<String>,
    #[serde(default)]
    pub tools: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Education {
    pub degree: String,
    pub institution: String,
    pub period: String,
    #[serde(default)]
    pub details: Vec<String>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

fn skill(name: &str, icon: &str, color: Option<&str>, category: &str) -> Skill {
    Skill {
        name: name.to_string(),
        icon: format!("https://cdn.jsdelivr.net/gh/devicons/devicon/icons/{icon}.svg"),
        color: color.map(str::to_string),
        category: category.to_string(),
    }
}

/// Placeholder content used by `portfolio init` and when no content file exists.
pub fn default_content() -> Content {
    Content {
        profile: Profile {
            name: "Your Name".to_string(),
            tagline: "Product-minded builder.".to_string(),
            bio: strings(&[
                "I blend design, code, and automation to turn ideas into clean, \
                 fast-moving products.",
                "I focus on systems that reduce noise and create leverage for users.",
            ]),
            hero_image: Some("/hero-image.png".to_string()),
            socials: vec![
                SocialLink {
                    kind: SocialKind::X,
                    url: "https://x.com/username".to_string(),
                },
                SocialLink {
                    kind: SocialKind::Linkedin,
                    url: "https://www.linkedin.com/in/username".to_string(),
                },
                SocialLink {
                    kind: SocialKind::Github,
                    url: "https://github.com/username".to_string(),
                },
                SocialLink {
                    kind: SocialKind::Email,
                    url: "mailto:hello@example.com".to_string(),
                },
            ],
        },
        projects: vec![
            Project {
                id: 1,
                title: "E-Commerce Dashboard".to_string(),
                description: "Analytics dashboard with real-time data visualization.".to_string(),
                demo_url: "https://www.loom.com/embed/dashboard-demo".to_string(),
                github_url: "https://github.com/username/ecommerce-dashboard".to_string(),
                tools: strings(&["React", "TypeScript", "Tailwind CSS", "Chart.js"]),
                lessons: strings(&[
                    "Keeping large tables responsive",
                    "Working with complex data structures",
                ]),
                features: strings(&[
                    "Real-time sales tracking",
                    "Customer behavior analytics",
                    "Inventory management",
                    "Revenue forecasting",
                ]),
            },
            Project {
                id: 2,
                title: "Content Generator".to_string(),
                description: "Tool that drafts marketing copy and social posts.".to_string(),
                demo_url: "https://www.loom.com/embed/generator-demo".to_string(),
                github_url: "https://github.com/username/content-generator".to_string(),
                tools: strings(&["Next.js", "Supabase"]),
                lessons: strings(&["State management for complex forms"]),
                features: strings(&[
                    "Generation for multiple platforms",
                    "Tone and style customization",
                    "Export to various formats",
                ]),
            },
        ],
        case_studies: vec![CaseStudy {
            project: Project {
                id: 1,
                title: "SaaS Dashboard Redesign".to_string(),
                description: "UX overhaul of a B2B analytics platform.".to_string(),
                demo_url: "https://www.loom.com/embed/casestudy1".to_string(),
                github_url: "https://github.com/username/saas-dashboard".to_string(),
                tools: strings(&["Figma", "React", "TypeScript"]),
                lessons: strings(&["User research surfaces the real pain points"]),
                features: strings(&[
                    "Intuitive navigation system",
                    "Advanced data visualization",
                    "Responsive design across devices",
                    "Accessibility compliance",
                ]),
            },
            metrics: vec![
                Metric {
                    label: "Engagement".to_string(),
                    value: "+40%".to_string(),
                },
                Metric {
                    label: "Support tickets".to_string(),
                    value: "-25%".to_string(),
                },
            ],
        }],
        skills: vec![
            skill("React", "react/react-original", Some("#61DAFB"), "Frontend"),
            skill("TypeScript", "typescript/typescript-original", Some("#3178C6"), "Language"),
            skill("Rust", "rust/rust-original", None, "Language"),
            skill("Figma", "figma/figma-original", None, "Design"),
        ],
        experiences: vec![Experience {
            title: "Product Engineer".to_string(),
            company: "Example Co".to_string(),
            period: "2022 - Present".to_string(),
            achievements: strings(&[
                "Shipped the self-serve onboarding flow",
                "Cut page load time in half",
            ]),
            tools: strings(&["React", "Rust", "PostgreSQL"]),
        }],
        education: vec![Education {
            degree: "B.Tech in Mechanical Engineering".to_string(),
            institution: "Example Institute of Technology".to_string(),
            period: "2014 - 2018".to_string(),
            details: Vec::new(),
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_content_survives_toml() {
        let content = default_content();
        let raw = toml::to_string_pretty(&content).expect("serialize");
        let parsed: Content = toml::from_str(&raw).expect("parse");
        assert_eq!(parsed, content);
    }
}
