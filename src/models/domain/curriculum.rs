use async_graphql::{Enum, SimpleObject};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Attribution for generated content, carried through from the model response.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
pub struct SourceRef {
    pub title: String,
    pub uri: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Enum, Copy)]
pub enum ChapterStatus {
    Locked,
    Available,
    Completed,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
pub struct Chapter {
    pub id: i32, // 1-based position, assigned at curriculum creation
    pub title: String,
    pub description: String,
    pub status: ChapterStatus,
    pub topics: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<SourceRef>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
pub struct Curriculum {
    pub id: String,
    pub owner_id: String,
    pub topic: String,
    pub chapters: Vec<Chapter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<SourceRef>>,
    pub demo: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,
}

impl Curriculum {
    /// Builds a fresh curriculum: chapters are renumbered sequentially and
    /// only the first one starts unlocked.
    pub fn new(
        owner_id: &str,
        topic: &str,
        chapters: Vec<Chapter>,
        sources: Option<Vec<SourceRef>>,
        demo: bool,
    ) -> Self {
        let chapters = chapters
            .into_iter()
            .enumerate()
            .map(|(index, mut chapter)| {
                chapter.id = index as i32 + 1;
                chapter.status = if index == 0 {
                    ChapterStatus::Available
                } else {
                    ChapterStatus::Locked
                };
                chapter
            })
            .collect();

        Curriculum {
            id: Uuid::new_v4().to_string(),
            owner_id: owner_id.to_string(),
            topic: topic.to_string(),
            chapters,
            sources,
            demo,
            created_at: Some(Utc::now()),
            modified_at: Some(Utc::now()),
        }
    }

    pub fn chapter(&self, chapter_id: i32) -> Option<&Chapter> {
        self.chapters.iter().find(|c| c.id == chapter_id)
    }

    /// Marks the chapter completed and promotes the next one out of Locked.
    /// Re-completing an already completed chapter is a no-op. Returns false
    /// when no chapter carries the id.
    pub fn complete_chapter(&mut self, chapter_id: i32) -> bool {
        let Some(index) = self.chapters.iter().position(|c| c.id == chapter_id) else {
            return false;
        };

        self.chapters[index].status = ChapterStatus::Completed;
        if let Some(next) = self.chapters.get_mut(index + 1) {
            if next.status == ChapterStatus::Locked {
                next.status = ChapterStatus::Available;
            }
        }
        self.modified_at = Some(Utc::now());
        true
    }

    pub fn is_finished(&self) -> bool {
        self.chapters
            .iter()
            .all(|c| c.status == ChapterStatus::Completed)
    }
}

#[cfg(test)]
impl Chapter {
    pub fn test_chapter(title: &str) -> Self {
        Chapter {
            id: 0,
            title: title.to_string(),
            description: format!("About {}", title),
            status: ChapterStatus::Locked,
            topics: vec!["topic".to_string()],
            sources: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_chapter_curriculum() -> Curriculum {
        Curriculum::new(
            "profile-1",
            "Cell Biology",
            vec![
                Chapter::test_chapter("Membranes"),
                Chapter::test_chapter("Organelles"),
                Chapter::test_chapter("Division"),
            ],
            None,
            false,
        )
    }

    #[test]
    fn test_new_curriculum_unlocks_only_first_chapter() {
        let curriculum = three_chapter_curriculum();

        assert_eq!(curriculum.chapters.len(), 3);
        assert_eq!(curriculum.chapters[0].id, 1);
        assert_eq!(curriculum.chapters[0].status, ChapterStatus::Available);
        assert_eq!(curriculum.chapters[1].status, ChapterStatus::Locked);
        assert_eq!(curriculum.chapters[2].status, ChapterStatus::Locked);
        assert!(curriculum.created_at.is_some());
    }

    #[test]
    fn test_complete_chapter_promotes_next() {
        let mut curriculum = three_chapter_curriculum();

        assert!(curriculum.complete_chapter(1));
        assert_eq!(curriculum.chapters[0].status, ChapterStatus::Completed);
        assert_eq!(curriculum.chapters[1].status, ChapterStatus::Available);
        assert_eq!(curriculum.chapters[2].status, ChapterStatus::Locked);
    }

    #[test]
    fn test_complete_chapter_is_idempotent() {
        let mut curriculum = three_chapter_curriculum();

        assert!(curriculum.complete_chapter(1));
        assert!(curriculum.complete_chapter(1));
        assert_eq!(curriculum.chapters[0].status, ChapterStatus::Completed);
        assert_eq!(curriculum.chapters[1].status, ChapterStatus::Available);
    }

    #[test]
    fn test_complete_last_chapter_finishes_curriculum() {
        let mut curriculum = three_chapter_curriculum();

        curriculum.complete_chapter(1);
        curriculum.complete_chapter(2);
        assert!(!curriculum.is_finished());
        curriculum.complete_chapter(3);
        assert!(curriculum.is_finished());
    }

    #[test]
    fn test_complete_unknown_chapter_returns_false() {
        let mut curriculum = three_chapter_curriculum();

        assert!(!curriculum.complete_chapter(99));
        assert_eq!(curriculum.chapters[0].status, ChapterStatus::Available);
    }
}
