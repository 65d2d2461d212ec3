//! Chat service - answers questions about events.
//!
//! Assembles a prompt from the current event list and tries the hosted
//! generative-language API over an ordered list of model candidates. Any
//! failure degrades to a local keyword match against the event list, so
//! the endpoint itself never fails on upstream trouble.

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::{CHAT_KEYWORD_MIN_LENGTH, CHAT_NO_MATCH_MESSAGE, GENAI_MODEL_CANDIDATES};
use crate::domain::Event;
use crate::errors::AppResult;
use crate::infra::{GenerativeClient, UnitOfWork};

/// Chat service trait for dependency injection.
#[async_trait]
pub trait ChatService: Send + Sync {
    /// Answer a visitor question about the listed events
    async fn answer(&self, message: &str) -> AppResult<String>;
}

/// Concrete implementation of ChatService.
pub struct Assistant<U: UnitOfWork> {
    uow: Arc<U>,
    client: Arc<dyn GenerativeClient>,
}

impl<U: UnitOfWork> Assistant<U> {
    /// Create a new assistant with Unit of Work and an API client
    pub fn new(uow: Arc<U>, client: Arc<dyn GenerativeClient>) -> Self {
        Self { uow, client }
    }
}

#[async_trait]
impl<U: UnitOfWork> ChatService for Assistant<U> {
    async fn answer(&self, message: &str) -> AppResult<String> {
        let events = self.uow.events().list().await?;
        let prompt = build_prompt(&events, message);

        for model in GENAI_MODEL_CANDIDATES {
            match self.client.generate(model, &prompt).await {
                Ok(text) => return Ok(text),
                Err(e) => {
                    tracing::warn!("Model {} unavailable: {}", model, e);
                }
            }
        }

        tracing::info!("All models unavailable, using keyword fallback");
        Ok(fallback_answer(message, &events))
    }
}

/// Build the prompt: assistant instructions, one line per event, then the
/// user message.
fn build_prompt(events: &[Event], message: &str) -> String {
    let mut prompt = String::from(
        "You are the assistant of a school event website. Answer briefly and \
         only from the event list below. If nothing matches, say so.\n\nEvents:\n",
    );

    if events.is_empty() {
        prompt.push_str("(no events are currently listed)\n");
    }

    for event in events {
        prompt.push_str(&format!(
            "- {} [{}] on {} at {}: {}\n",
            event.titre,
            event.categorie,
            event.date,
            event.lieu.as_deref().unwrap_or("unspecified location"),
            event.description.as_deref().unwrap_or("no description"),
        ));
    }

    prompt.push_str("\nQuestion: ");
    prompt.push_str(message);
    prompt
}

/// Local fallback: substring-match the message words against each event's
/// title, description, and category.
fn fallback_answer(message: &str, events: &[Event]) -> String {
    match find_matching_event(message, events) {
        Some(event) => format!(
            "\"{}\" ({}) takes place on {} at {}. {}",
            event.titre,
            event.categorie,
            event.date,
            event.lieu.as_deref().unwrap_or("an unspecified location"),
            event.description.as_deref().unwrap_or(""),
        )
        .trim_end()
        .to_string(),
        None => CHAT_NO_MATCH_MESSAGE.to_string(),
    }
}

/// First event whose title, description, or category contains one of the
/// message's keywords (case-insensitive).
fn find_matching_event<'a>(message: &str, events: &'a [Event]) -> Option<&'a Event> {
    let keywords: Vec<String> = message
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.len() >= CHAT_KEYWORD_MIN_LENGTH)
        .map(|w| w.to_string())
        .collect();

    if keywords.is_empty() {
        return None;
    }

    events.iter().find(|event| {
        let haystacks = [
            event.titre.to_lowercase(),
            event.description.clone().unwrap_or_default().to_lowercase(),
            event.categorie.to_string(),
        ];

        keywords.iter().any(|keyword| {
            haystacks.iter().any(|h| h.contains(keyword))
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Category;
    use crate::errors::AppError;
    use crate::infra::{
        EventRepository, MockEventRepository, MockGenerativeClient, MockParticipationRepository,
        MockUserRepository, ParticipationRepository, UserRepository,
    };
    use chrono::{NaiveDate, Utc};

    struct TestUow {
        events: Arc<MockEventRepository>,
    }

    impl UnitOfWork for TestUow {
        fn users(&self) -> Arc<dyn UserRepository> {
            Arc::new(MockUserRepository::new())
        }

        fn events(&self) -> Arc<dyn EventRepository> {
            self.events.clone()
        }

        fn participation(&self) -> Arc<dyn ParticipationRepository> {
            Arc::new(MockParticipationRepository::new())
        }
    }

    fn assistant_with(
        events: Vec<Event>,
        client: MockGenerativeClient,
    ) -> Assistant<TestUow> {
        let mut store = MockEventRepository::new();
        store.expect_list().returning(move || Ok(events.clone()));

        Assistant::new(
            Arc::new(TestUow {
                events: Arc::new(store),
            }),
            Arc::new(client),
        )
    }

    #[tokio::test]
    async fn first_responding_model_wins() {
        let mut client = MockGenerativeClient::new();
        client
            .expect_generate()
            .withf(|model, _| model == "gemini-pro")
            .returning(|_, _| Ok("The forum is on September 15th.".to_string()));

        let assistant = assistant_with(vec![], client);
        let answer = assistant.answer("Quand a lieu le forum ?").await.unwrap();
        assert_eq!(answer, "The forum is on September 15th.");
    }

    #[tokio::test]
    async fn all_models_failing_falls_back_to_keywords() {
        let mut client = MockGenerativeClient::new();
        client
            .expect_generate()
            .times(GENAI_MODEL_CANDIDATES.len())
            .returning(|model, _| Err(AppError::upstream(format!("{} unavailable", model))));

        let events = vec![sample_event(
            "Forum des entreprises",
            Some("Rencontre avec les recruteurs"),
            Category::Forum,
        )];

        let assistant = assistant_with(events, client);
        let answer = assistant.answer("parlez-moi du forum").await.unwrap();
        assert!(answer.contains("Forum des entreprises"));
    }

    fn sample_event(titre: &str, description: Option<&str>, categorie: Category) -> Event {
        Event {
            id: Event::generate_id(),
            titre: titre.to_string(),
            date: NaiveDate::from_ymd_opt(2026, 9, 15).unwrap(),
            lieu: Some("Amphi A".to_string()),
            categorie,
            description: description.map(|d| d.to_string()),
            adresse: String::new(),
            lat: None,
            lng: None,
            affiche: None,
            fiche: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn fallback_matches_on_title() {
        let events = vec![sample_event(
            "Forum des entreprises",
            Some("Rencontre avec les recruteurs"),
            Category::Forum,
        )];

        let answer = fallback_answer("Quand a lieu le forum ?", &events);
        assert!(answer.contains("Forum des entreprises"));
        assert!(answer.contains("2026-09-15"));
        assert!(answer.contains("Amphi A"));
    }

    #[test]
    fn fallback_matches_on_description() {
        let events = vec![sample_event(
            "Soirée d'intégration",
            Some("Concert et animations"),
            Category::Forum,
        )];

        let answer = fallback_answer("y a-t-il un concert ?", &events);
        assert!(answer.contains("Soirée d'intégration"));
    }

    #[test]
    fn fallback_matches_on_category() {
        let events = vec![sample_event("Initiation Rust", None, Category::Formation)];

        let answer = fallback_answer("je cherche une formation", &events);
        assert!(answer.contains("Initiation Rust"));
    }

    #[test]
    fn fallback_ignores_short_words() {
        let events = vec![sample_event("AI Day", None, Category::Conference)];

        // Only words of one or two characters; nothing to match on
        let answer = fallback_answer("ai ?", &events);
        assert_eq!(answer, CHAT_NO_MATCH_MESSAGE);
    }

    #[test]
    fn fallback_reports_no_match() {
        let events = vec![sample_event("Forum des entreprises", None, Category::Forum)];

        let answer = fallback_answer("parlez-moi du championnat de natation", &events);
        assert_eq!(answer, CHAT_NO_MATCH_MESSAGE);
    }

    #[test]
    fn fallback_with_no_events_reports_no_match() {
        let answer = fallback_answer("forum", &[]);
        assert_eq!(answer, CHAT_NO_MATCH_MESSAGE);
    }

    #[test]
    fn prompt_lists_every_event_and_the_question() {
        let events = vec![
            sample_event("Forum des entreprises", Some("Stands"), Category::Forum),
            sample_event("Conf IA", None, Category::Conference),
        ];

        let prompt = build_prompt(&events, "Quels sont les événements ?");
        assert!(prompt.contains("Forum des entreprises"));
        assert!(prompt.contains("Conf IA"));
        assert!(prompt.ends_with("Quels sont les événements ?"));
    }
}
