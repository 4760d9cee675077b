//! Typed content entities, one per store collection.
//!
//! Every entity is a flat record in `camelCase` on the wire. Optional fields
//! deserialize to `None` when absent — absence is "no value", never an
//! error. The store stamps `createdAt`/`updatedAt` at insert time, so both
//! are optional on the way in and populated on the way out.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::view::CardItem;

/// Binds an entity type to its collection name in the store.
///
/// This is the typed boundary: payloads read through [`crate::store::ContentStore::get`],
/// [`list`](crate::store::ContentStore::list) or [`watch`](crate::store::ContentStore::watch)
/// are validated against the entity's shape by serde instead of trusted
/// implicitly.
pub trait Entity: Serialize + DeserializeOwned + Send + 'static {
    const COLLECTION: &'static str;
}

// ============================================================================
// Public Site Entities
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live_url: Option<String>,
    #[serde(default)]
    pub order: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Entity for Project {
    const COLLECTION: &'static str = "projects";
}

impl CardItem for Project {
    fn category(&self) -> Option<&str> {
        None
    }

    fn tags(&self) -> &[String] {
        &self.technologies
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.title, &self.description]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image_url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published: Option<bool>,
    #[serde(default)]
    pub order: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Entity for BlogPost {
    const COLLECTION: &'static str = "blogPosts";
}

impl CardItem for BlogPost {
    /// Posts without an explicit category fall back to their first tag.
    fn category(&self) -> Option<&str> {
        self.category
            .as_deref()
            .or_else(|| self.tags.first().map(String::as_str))
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str()];
        if let Some(excerpt) = &self.excerpt {
            fields.push(excerpt);
        }
        fields
    }
}

/// Achievement categories as curated by the admin surface. Anything the
/// store hands back outside the known set decodes as `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AchievementCategory {
    Swimming,
    Guitar,
    Academic,
    #[serde(other)]
    Other,
}

impl AchievementCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            AchievementCategory::Swimming => "swimming",
            AchievementCategory::Guitar => "guitar",
            AchievementCategory::Academic => "academic",
            AchievementCategory::Other => "other",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub issuer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub category: AchievementCategory,
    #[serde(default)]
    pub order: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Entity for Achievement {
    const COLLECTION: &'static str = "achievements";
}

impl CardItem for Achievement {
    fn category(&self) -> Option<&str> {
        Some(self.category.as_str())
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.title, &self.description, &self.issuer]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillCategory {
    Swimming,
    Guitar,
    Coding,
    Academic,
    #[serde(other)]
    Other,
}

impl SkillCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            SkillCategory::Swimming => "swimming",
            SkillCategory::Guitar => "guitar",
            SkillCategory::Coding => "coding",
            SkillCategory::Academic => "academic",
            SkillCategory::Other => "other",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub name: String,
    pub category: SkillCategory,
    /// 1-5 scale
    pub proficiency: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub order: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Entity for Skill {
    const COLLECTION: &'static str = "skills";
}

impl CardItem for Skill {
    fn category(&self) -> Option<&str> {
        Some(self.category.as_str())
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        if let Some(description) = &self.description {
            fields.push(description);
        }
        fields
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Image,
    Document,
    #[serde(other)]
    Other,
}

/// Gallery file. `kind` distinguishes images from downloadable documents;
/// the gallery page shows images only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileItem {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: FileKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub order: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Entity for FileItem {
    const COLLECTION: &'static str = "files";
}

impl CardItem for FileItem {
    fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str()];
        if let Some(description) = &self.description {
            fields.push(description);
        }
        fields
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AboutSection {
    Intro,
    Bio,
    Interests,
    Goals,
    #[serde(other)]
    Other,
}

impl AboutSection {
    pub fn as_str(self) -> &'static str {
        match self {
            AboutSection::Intro => "intro",
            AboutSection::Bio => "bio",
            AboutSection::Interests => "interests",
            AboutSection::Goals => "goals",
            AboutSection::Other => "other",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutMeItem {
    pub title: String,
    pub content: String,
    pub section: AboutSection,
    #[serde(default)]
    pub order: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Entity for AboutMeItem {
    const COLLECTION: &'static str = "aboutMe";
}

impl CardItem for AboutMeItem {
    fn category(&self) -> Option<&str> {
        Some(self.section.as_str())
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.title, &self.content]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    pub name: String,
    pub role: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(default)]
    pub order: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Entity for Testimonial {
    const COLLECTION: &'static str = "testimonials";
}

impl CardItem for Testimonial {
    fn category(&self) -> Option<&str> {
        None
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name, &self.role, &self.content]
    }
}

/// An inbound contact-form message. Write-only from the public site;
/// `responded` is managed by the admin surface and never mutated here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub name: String,
    pub email: String,
    pub message: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub responded: bool,
    #[serde(default)]
    pub order: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Entity for Contact {
    const COLLECTION: &'static str = "contacts";
}

impl Contact {
    /// Build a new message with the creation-time defaults: `responded`
    /// false, `date` now, `order` set to epoch millis so messages sort by
    /// arrival under the default query.
    pub fn new(name: impl Into<String>, email: impl Into<String>, message: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
            date: now,
            responded: false,
            order: now.timestamp_millis() as f64,
            created_at: None,
            updated_at: None,
        }
    }
}

// ============================================================================
// Admin-Surface Entities
// ============================================================================
// Edited out-of-band by the admin tool; none of the public pages render
// these yet, but they share the store and the same conventions.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtracurricularCategory {
    Swimming,
    Guitar,
    Coding,
    Stem,
    #[serde(other)]
    Other,
}

impl ExtracurricularCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            ExtracurricularCategory::Swimming => "swimming",
            ExtracurricularCategory::Guitar => "guitar",
            ExtracurricularCategory::Coding => "coding",
            ExtracurricularCategory::Stem => "stem",
            ExtracurricularCategory::Other => "other",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Extracurricular {
    pub title: String,
    pub organization: String,
    pub role: String,
    pub description: String,
    pub start_date: DateTime<Utc>,
    /// Absent for ongoing activities
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub category: ExtracurricularCategory,
    #[serde(default)]
    pub order: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Entity for Extracurricular {
    const COLLECTION: &'static str = "extracurriculars";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collaboration {
    pub title: String,
    pub partner_id: String,
    pub partner_name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub start_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_url: Option<String>,
    #[serde(default)]
    pub order: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Entity for Collaboration {
    const COLLECTION: &'static str = "collaborations";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkExperience {
    pub company: String,
    pub position: String,
    pub description: String,
    pub start_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub order: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Entity for WorkExperience {
    const COLLECTION: &'static str = "workExperiences";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Volunteering {
    pub organization: String,
    pub role: String,
    pub description: String,
    pub start_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours: Option<f64>,
    #[serde(default)]
    pub order: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Entity for Volunteering {
    const COLLECTION: &'static str = "volunteering";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub institution: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub degree: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub start_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub achievements: Vec<String>,
    #[serde(default)]
    pub order: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Entity for Education {
    const COLLECTION: &'static str = "education";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Faq {
    pub question: String,
    pub answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub order: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Entity for Faq {
    const COLLECTION: &'static str = "faqs";
}

impl CardItem for Faq {
    fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.question, &self.answer]
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_entity_collection_names() {
        assert_eq!(Project::COLLECTION, "projects");
        assert_eq!(BlogPost::COLLECTION, "blogPosts");
        assert_eq!(AboutMeItem::COLLECTION, "aboutMe");
        assert_eq!(FileItem::COLLECTION, "files");
        assert_eq!(Contact::COLLECTION, "contacts");
    }

    #[test]
    fn test_project_wire_shape_is_camel_case() {
        let project = Project {
            title: "Reef Tracker".to_string(),
            description: "Citizen-science reef logging".to_string(),
            image_url: Some("https://img.example/reef.png".to_string()),
            technologies: vec!["rust".to_string()],
            github_url: None,
            live_url: None,
            order: 2.0,
            created_at: None,
            updated_at: None,
        };

        let value = serde_json::to_value(&project).unwrap();
        assert_eq!(value["imageUrl"], "https://img.example/reef.png");
        // Absent optionals are omitted, not serialized as null
        assert!(value.get("githubUrl").is_none());

        let back: Project = serde_json::from_value(value).unwrap();
        assert_eq!(back, project);
    }

    #[test]
    fn test_optional_fields_absent_is_no_value() {
        let post: BlogPost = serde_json::from_value(json!({
            "title": "Hello",
            "content": "First post",
            "date": "2024-03-01T00:00:00Z"
        }))
        .unwrap();
        assert_eq!(post.category, None);
        assert!(post.tags.is_empty());
        assert_eq!(post.order, 0.0);
    }

    #[test]
    fn test_unknown_category_decodes_as_other() {
        let achievement: Achievement = serde_json::from_value(json!({
            "title": "Regional medal",
            "description": "200m freestyle",
            "date": "2023-06-10T00:00:00Z",
            "issuer": "State swim board",
            "category": "chess"
        }))
        .unwrap();
        assert_eq!(achievement.category, AchievementCategory::Other);
    }

    #[test]
    fn test_file_kind_uses_type_field() {
        let file: FileItem = serde_json::from_value(json!({
            "title": "Meet photo",
            "url": "https://img.example/meet.jpg",
            "type": "image"
        }))
        .unwrap();
        assert_eq!(file.kind, FileKind::Image);

        let value = serde_json::to_value(&file).unwrap();
        assert_eq!(value["type"], "image");
    }

    #[test]
    fn test_blog_category_falls_back_to_first_tag() {
        let mut post: BlogPost = serde_json::from_value(json!({
            "title": "Training log",
            "content": "...",
            "date": "2024-03-01T00:00:00Z",
            "tags": ["swimming", "training"]
        }))
        .unwrap();
        assert_eq!(CardItem::category(&post), Some("swimming"));

        post.category = Some("sports".to_string());
        assert_eq!(CardItem::category(&post), Some("sports"));
    }

    #[test]
    fn test_extracurricular_category_is_curated() {
        let activity: Extracurricular = serde_json::from_value(json!({
            "title": "Robotics club",
            "organization": "School",
            "role": "Member",
            "description": "Weekly build sessions",
            "startDate": "2023-09-01T00:00:00Z",
            "category": "stem"
        }))
        .unwrap();
        assert_eq!(activity.category, ExtracurricularCategory::Stem);

        // Outside the curated set decodes as Other, like the other enums
        let odd: Extracurricular = serde_json::from_value(json!({
            "title": "Chess",
            "organization": "Club",
            "role": "Member",
            "description": "Tournaments",
            "startDate": "2023-09-01T00:00:00Z",
            "category": "chess"
        }))
        .unwrap();
        assert_eq!(odd.category, ExtracurricularCategory::Other);
    }

    #[test]
    fn test_contact_new_defaults() {
        let contact = Contact::new("Ada", "ada@example.com", "Hi there");
        assert!(!contact.responded);
        assert_eq!(contact.date.timestamp_millis() as f64, contact.order);
        assert!(contact.created_at.is_none());
    }
}
