//! Conversion of structured candidate profiles into embeddable text

use crate::matching::profile::CandidateProfile;

/// Render a candidate profile as one period-separated text blob suitable
/// for embedding or token comparison.
///
/// Sections appear in fixed order (Skills, Experience, Education) and empty
/// sections are omitted entirely. A profile with no data renders as an
/// empty string.
pub fn textualize(profile: &CandidateProfile) -> String {
    let mut sections = Vec::new();

    let skills: Vec<&str> = profile
        .skills
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();
    if !skills.is_empty() {
        sections.push(format!("Skills: {}", skills.join(", ")));
    }

    let experience: Vec<&str> = profile
        .experience
        .iter()
        .map(|e| e.trim())
        .filter(|e| !e.is_empty())
        .collect();
    if !experience.is_empty() {
        sections.push(format!("Experience: {}", experience.join(", ")));
    }

    let education = profile.education.as_text();
    if !education.is_empty() {
        sections.push(format!("Education: {}", education));
    }

    sections.join(". ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::profile::Education;

    fn profile(skills: &[&str], experience: &[&str], education: Education) -> CandidateProfile {
        CandidateProfile {
            skills: skills.iter().map(|s| s.to_string()).collect(),
            experience: experience.iter().map(|s| s.to_string()).collect(),
            education,
        }
    }

    #[test]
    fn test_full_profile() {
        let p = profile(
            &["Python", "SQL"],
            &["3 years experience"],
            Education::Text("BSc Computer Science".to_string()),
        );
        assert_eq!(
            textualize(&p),
            "Skills: Python, SQL. Experience: 3 years experience. Education: BSc Computer Science"
        );
    }

    #[test]
    fn test_empty_sections_omitted() {
        let p = profile(&["Rust"], &[], Education::default());
        assert_eq!(textualize(&p), "Skills: Rust");

        let p = profile(&[], &["5 years backend"], Education::default());
        assert_eq!(textualize(&p), "Experience: 5 years backend");
    }

    #[test]
    fn test_all_empty_gives_empty_string() {
        let p = profile(&[], &[], Education::default());
        assert_eq!(textualize(&p), "");
    }

    #[test]
    fn test_whitespace_only_entries_ignored() {
        let p = profile(&["  ", "Go"], &[" "], Education::Text("   ".to_string()));
        assert_eq!(textualize(&p), "Skills: Go");
    }

    #[test]
    fn test_list_education() {
        let p = profile(
            &[],
            &[],
            Education::Entries(vec!["BSc CS".to_string(), "MSc AI".to_string()]),
        );
        assert_eq!(textualize(&p), "Education: BSc CS, MSc AI");
    }

    #[test]
    fn test_no_pipes_in_output() {
        let p = profile(&["Python", "SQL"], &["2 years"], Education::Text("PhD".to_string()));
        assert!(!textualize(&p).contains('|'));
    }

    #[test]
    fn test_pure_function() {
        let p = profile(&["Python"], &["1 year"], Education::default());
        assert_eq!(textualize(&p), textualize(&p));
    }
}
