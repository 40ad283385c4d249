//! Content checks.
//!
//! Malformed content never stops rendering (a bad icon URL is just a broken
//! image). These checks exist so `portfolio check` can point at the problem.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::content::{Content, Project};

static LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(https?://[^\s/]+\S*|mailto:[^\s@]+@[^\s@]+|#[a-z0-9-]+)$")
        .expect("link pattern should compile")
});

// Hex (`#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`) or a bare keyword such as `teal`.
static COLOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(#([0-9a-fA-F]{3,4}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})|[a-zA-Z]+)$")
        .expect("color pattern should compile")
});

/// Whether `value` is safe to place in an inline `style` as a colour.
pub fn is_css_color(value: &str) -> bool {
    COLOR_RE.is_match(value)
}

/// Check content and return every problem found, in document order.
pub fn check_content(content: &Content) -> Vec<String> {
    let mut errors = Vec::new();

    let profile = &content.profile;
    if profile.name.trim().is_empty() {
        errors.push("profile: name must not be empty".to_string());
    }
    for (index, social) in profile.socials.iter().enumerate() {
        check_link(&mut errors, &format!("profile.socials[{index}]"), &social.url);
    }

    check_projects(
        &mut errors,
        "projects",
        content.projects.iter().collect::<Vec<_>>(),
    );
    check_projects(
        &mut errors,
        "case_studies",
        content.case_studies.iter().map(|c| &c.project).collect(),
    );

    for (index, skill) in content.skills.iter().enumerate() {
        let at = format!("skills[{index}]");
        if skill.name.trim().is_empty() {
            errors.push(format!("{at}: name must not be empty"));
        }
        if skill.icon.trim().is_empty() {
            errors.push(format!("{at}: icon must not be empty"));
        }
        if let Some(color) = &skill.color
            && !is_css_color(color)
        {
            errors.push(format!("{at}: unsupported color {color:?}"));
        }
    }

    for (index, experience) in content.experiences.iter().enumerate() {
        if experience.title.trim().is_empty() {
            errors.push(format!("experiences[{index}]: title must not be empty"));
        }
    }

    for (index, education) in content.education.iter().enumerate() {
        if education.degree.trim().is_empty() {
            errors.push(format!("education[{index}]: degree must not be empty"));
        }
    }

    errors
}

fn check_projects(errors: &mut Vec<String>, list: &str, projects: Vec<&Project>) {
    let mut seen = HashSet::new();
    for (index, project) in projects.into_iter().enumerate() {
        let at = format!("{list}[{index}]");
        if !seen.insert(project.id) {
            errors.push(format!("{at}: duplicate id {}", project.id));
        }
        if project.title.trim().is_empty() {
            errors.push(format!("{at}: title must not be empty"));
        }
        check_link(errors, &format!("{at}.demo_url"), &project.demo_url);
        check_link(errors, &format!("{at}.github_url"), &project.github_url);
    }
}

fn check_link(errors: &mut Vec<String>, at: &str, url: &str) {
    if !LINK_RE.is_match(url) {
        errors.push(format!("{at}: unsupported link {url:?}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::default_content;

    #[test]
    fn default_content_is_clean() {
        assert!(check_content(&default_content()).is_empty());
    }

    #[test]
    fn reports_duplicates_and_bad_links() {
        let mut content = default_content();
        content.projects[1].id = content.projects[0].id;
        content.projects[0].github_url = "github.com/username".to_string();
        content.profile.socials[3].url = "mailto:nobody".to_string();

        let errors = check_content(&content);
        assert!(errors.iter().any(|err| err.contains("duplicate id")));
        assert!(errors.iter().any(|err| err.contains("projects[0].github_url")));
        assert!(errors.iter().any(|err| err.contains("profile.socials[3]")));
    }

    #[test]
    fn case_study_ids_are_checked_separately() {
        let content = default_content();
        assert_eq!(content.projects[0].id, content.case_studies[0].project.id);
        assert!(check_content(&content).is_empty());
    }

    #[test]
    fn anchors_are_valid_links() {
        let mut content = default_content();
        content.projects[0].demo_url = "#contact".to_string();
        assert!(check_content(&content).is_empty());
    }

    #[test]
    fn skill_colors_must_be_hex_or_keyword() {
        assert!(is_css_color("#61DAFB"));
        assert!(is_css_color("#fff"));
        assert!(is_css_color("rebeccapurple"));
        assert!(!is_css_color("#12345"));
        assert!(!is_css_color("red; background: url(https://evil.example)"));

        let mut content = default_content();
        content.skills[1].color = Some("red;top:0".to_string());
        assert_eq!(
            check_content(&content),
            vec![r#"skills[1]: unsupported color "red;top:0""#.to_string()]
        );
    }
}
