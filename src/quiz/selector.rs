use crate::domain::{Question, QuestionId, QuestionPrompt, ValidationError};
use crate::quiz::QuizError;
use crate::store::{QuestionFilter, QuestionStore};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;
use std::sync::Arc;

/// Picks a random question the caller has not seen yet.
#[derive(Debug, Clone)]
pub struct QuestionSelector {
    store: Arc<dyn QuestionStore>,
}

impl QuestionSelector {
    pub fn new(store: Arc<dyn QuestionStore>) -> Self {
        Self { store }
    }

    /// Choose uniformly among the questions matching `filter`.
    ///
    /// # Errors
    /// `QuizError::NoMoreQuestions` when nothing matches.
    pub async fn get_question(&self, filter: &QuestionFilter) -> Result<QuestionPrompt, QuizError> {
        let candidates = self.store.list_questions(filter).await?;

        let chosen = choose_question(&candidates, &mut rand::thread_rng())
            .ok_or(QuizError::NoMoreQuestions)?;

        tracing::debug!(
            question_id = %chosen.id,
            candidates = candidates.len(),
            excluded = filter.exclude.len(),
            "Selected question"
        );
        Ok(chosen.prompt())
    }
}

pub fn choose_question<'a, R: Rng + ?Sized>(
    candidates: &'a [Question],
    rng: &mut R,
) -> Option<&'a Question> {
    candidates.choose(rng)
}

/// Parse a comma-separated id list such as `"1, 4,7,"`.
///
/// `None` and blank input give the empty set; blank entries are skipped.
pub fn parse_exclude(raw: Option<&str>) -> Result<HashSet<QuestionId>, ValidationError> {
    let Some(raw) = raw else {
        return Ok(HashSet::new());
    };

    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            entry
                .parse::<QuestionId>()
                .map_err(|_| ValidationError::InvalidExclude(entry.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CategoryId, NewQuestion};
    use crate::store::MemoryStore;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn bank(n: usize) -> Arc<MemoryStore> {
        let questions = (1..=n)
            .map(|i| {
                NewQuestion::new(
                    format!("/posters/{i}.png"),
                    format!("answer {i}"),
                    vec![format!("answer {i}"), "other".to_string()],
                    None,
                )
            })
            .collect();
        Arc::new(MemoryStore::new().with_questions(questions))
    }

    fn ids(raw: &[i64]) -> HashSet<QuestionId> {
        raw.iter().copied().map(QuestionId::new).collect()
    }

    #[test]
    fn test_parse_exclude_absent_or_blank() {
        assert!(parse_exclude(None).unwrap().is_empty());
        assert!(parse_exclude(Some("")).unwrap().is_empty());
        assert!(parse_exclude(Some(" , ,")).unwrap().is_empty());
    }

    #[test]
    fn test_parse_exclude_list() {
        assert_eq!(parse_exclude(Some("1,2,3")).unwrap(), ids(&[1, 2, 3]));
        assert_eq!(parse_exclude(Some(" 4 , 7,")).unwrap(), ids(&[4, 7]));
        assert_eq!(parse_exclude(Some("5,5")).unwrap(), ids(&[5]));
    }

    #[test]
    fn test_parse_exclude_rejects_non_integer() {
        assert_eq!(
            parse_exclude(Some("1,two,3")),
            Err(ValidationError::InvalidExclude("two".to_string()))
        );
        assert!(parse_exclude(Some("1.5")).is_err());
    }

    #[test]
    fn test_choose_question_empty() {
        let mut rng = StdRng::seed_from_u64(7);
        assert!(choose_question(&[], &mut rng).is_none());
    }

    #[tokio::test]
    async fn test_selection_visits_every_question() {
        let selector = QuestionSelector::new(bank(5));
        let mut seen = HashSet::new();

        for _ in 0..1000 {
            let prompt = selector.get_question(&QuestionFilter::all()).await.unwrap();
            assert!((1..=5).contains(&prompt.id.as_i64()));
            seen.insert(prompt.id);
        }

        assert_eq!(seen, ids(&[1, 2, 3, 4, 5]));
    }

    #[tokio::test]
    async fn test_selection_respects_exclusion() {
        let selector = QuestionSelector::new(bank(5));
        let filter = QuestionFilter::excluding(ids(&[1, 2, 4, 5]));

        for _ in 0..50 {
            let prompt = selector.get_question(&filter).await.unwrap();
            assert_eq!(prompt.id, QuestionId::new(3));
        }
    }

    #[tokio::test]
    async fn test_full_exclusion_exhausts_bank() {
        let selector = QuestionSelector::new(bank(5));
        let filter = QuestionFilter::excluding(ids(&[1, 2, 3, 4, 5]));

        let err = selector.get_question(&filter).await.unwrap_err();
        assert!(matches!(err, QuizError::NoMoreQuestions));
    }

    #[tokio::test]
    async fn test_empty_bank_has_no_questions() {
        let selector = QuestionSelector::new(Arc::new(MemoryStore::new()));
        let err = selector
            .get_question(&QuestionFilter::all())
            .await
            .unwrap_err();
        assert!(matches!(err, QuizError::NoMoreQuestions));
    }

    #[tokio::test]
    async fn test_unknown_exclude_ids_are_ignored() {
        let selector = QuestionSelector::new(bank(1));
        let prompt = selector
            .get_question(&QuestionFilter::excluding(ids(&[42, 43])))
            .await
            .unwrap();
        assert_eq!(prompt.id, QuestionId::new(1));
    }

    #[tokio::test]
    async fn test_category_restriction() {
        let store = MemoryStore::new()
            .with_question(NewQuestion::new(
                "/posters/1.png",
                "a",
                vec!["a".to_string(), "b".to_string()],
                Some(CategoryId::new(1)),
            ))
            .with_question(NewQuestion::new(
                "/posters/2.png",
                "a",
                vec!["a".to_string(), "b".to_string()],
                Some(CategoryId::new(2)),
            ));
        let selector = QuestionSelector::new(Arc::new(store));

        let filter = QuestionFilter::all().in_category(Some(CategoryId::new(2)));
        for _ in 0..20 {
            assert_eq!(
                selector.get_question(&filter).await.unwrap().id,
                QuestionId::new(2)
            );
        }

        let exhausted = QuestionFilter::excluding(ids(&[2])).in_category(Some(CategoryId::new(2)));
        assert!(matches!(
            selector.get_question(&exhausted).await,
            Err(QuizError::NoMoreQuestions)
        ));
    }
}
