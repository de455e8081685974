#[cfg(test)]
#[path = "profile_test.rs"]
mod tests;

use anyhow::Result;
use serde_derive::Deserialize;
use serde_derive::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    pub title: String,
    pub company: String,
    pub location: String,
    pub period: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub technologies: Vec<String>,
    pub responsibilities: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub role: String,
    pub period: String,
    pub description: String,
    pub technologies: Vec<String>,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillCategory {
    pub name: String,
    pub skills: Vec<String>,
}

/// Résumé content shown in the About and Projects views, and the grounding
/// material for the assistant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    /// Name used in conversation. Falls back to the first word of `name`.
    #[serde(default)]
    pub short_name: String,
    pub headline: String,
    pub assistant_name: String,
    pub summary: String,
    pub contact: String,
    #[serde(default)]
    pub languages: String,
    pub education: String,
    #[serde(default)]
    pub skill_categories: Vec<SkillCategory>,
    #[serde(default)]
    pub experiences: Vec<Experience>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub suggested_questions: Vec<String>,
}

impl Profile {
    pub fn short_name(&self) -> &str {
        if !self.short_name.is_empty() {
            return &self.short_name;
        }
        return self.name.split_whitespace().next().unwrap_or(&self.name);
    }

    pub fn welcome_text(&self) -> String {
        return format!(
            "Hello! I'm {first}'s AI Assistant. Ask me anything about {first}'s experience, skills, or specific projects.",
            first = self.short_name()
        );
    }

    fn resume_summary(&self) -> String {
        let skills = self
            .skill_categories
            .iter()
            .map(|category| {
                return format!("- {}: {}", category.name, category.skills.join(", "));
            })
            .collect::<Vec<String>>()
            .join("\n");

        let mut summary = format!(
            "{summary}\nContact: {contact}\n\nSkills:\n{skills}",
            summary = self.summary,
            contact = self.contact
        );
        if !self.languages.is_empty() {
            summary += &format!("\n- Languages: {}", self.languages);
        }
        summary += &format!("\n\nEducation:\n- {}", self.education);

        return summary;
    }

    /// Builds the instruction sent with every generation request. Computed once
    /// per session by the caller.
    pub fn system_instruction(&self) -> Result<String> {
        let first = self.short_name();
        let instruction = format!(
            r#"You are an AI portfolio assistant for {name}, a {headline}.
Your goal is to impress potential employers by answering questions about {first}'s experience, skills, and projects.
Use the following context to answer questions accurately.
If you are asked about complex engineering topics, use your general software engineering knowledge to extrapolate a plausible, high-quality answer based on the technologies listed in the resume.
Always be professional, confident, and slightly enthusiastic.
Context:
{resume}
Detailed Experience:
{experiences}
Freelance Projects:
{projects}"#,
            name = self.name,
            headline = self.headline,
            resume = self.resume_summary(),
            experiences = serde_json::to_string(&self.experiences)?,
            projects = serde_json::to_string(&self.projects)?,
        );

        return Ok(instruction);
    }
}
