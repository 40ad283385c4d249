//! Test-only helpers for constructing content.

use crate::content::{CaseStudy, Content, Metric, Profile, Project, Skill};

/// Content with a profile and nothing else.
pub fn empty_content(name: &str) -> Content {
    Content {
        profile: Profile {
            name: name.to_string(),
            tagline: format!("{name} tagline"),
            bio: Vec::new(),
            hero_image: None,
            socials: Vec::new(),
        },
        projects: Vec::new(),
        case_studies: Vec::new(),
        skills: Vec::new(),
        experiences: Vec::new(),
        education: Vec::new(),
    }
}

/// Create a deterministic project with valid links.
pub fn project(id: u32, title: &str) -> Project {
    Project {
        id,
        title: title.to_string(),
        description: format!("{title} description"),
        demo_url: format!("https://demo.example.com/{id}"),
        github_url: format!("https://github.com/example/{id}"),
        tools: Vec::new(),
        lessons: Vec::new(),
        features: Vec::new(),
    }
}

/// Create a case study with one metric.
pub fn case_study(id: u32, title: &str) -> CaseStudy {
    CaseStudy {
        project: project(id, title),
        metrics: vec![Metric {
            label: "Retention".to_string(),
            value: "60%".to_string(),
        }],
    }
}

pub fn skill(name: &str, category: &str) -> Skill {
    Skill {
        name: name.to_string(),
        icon: format!("https://icons.example.com/{name}.svg"),
        color: None,
        category: category.to_string(),
    }
}
