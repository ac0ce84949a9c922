//! Immutable tutorial catalog, loaded once at process start.
//!
//! Construction is the only fallible path (duplicate ids are a startup
//! misconfiguration); reads never fail and return the same data on every
//! call. There are no mutation operations.

use std::collections::HashSet;

use crate::error::CoreError;
use crate::tutorial::{QuizContent, QuizQuestion, Tutorial, TutorialContent};
use crate::types::TutorialId;

/// Ordered, immutable list of tutorial definitions.
#[derive(Debug, Clone)]
pub struct Catalog {
    tutorials: Vec<Tutorial>,
}

impl Catalog {
    /// Build a catalog from tutorial definitions.
    ///
    /// Sorts by `order` and rejects duplicate ids.
    pub fn new(mut tutorials: Vec<Tutorial>) -> Result<Self, CoreError> {
        tutorials.sort_by_key(|t| t.order);

        let mut seen = HashSet::new();
        for tutorial in &tutorials {
            if !seen.insert(tutorial.id) {
                return Err(CoreError::Validation(format!(
                    "Duplicate tutorial id {} in catalog",
                    tutorial.id
                )));
            }
        }

        Ok(Self { tutorials })
    }

    /// All tutorials in display order.
    pub fn list(&self) -> &[Tutorial] {
        &self.tutorials
    }

    /// Number of tutorials in the catalog.
    pub fn len(&self) -> usize {
        self.tutorials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tutorials.is_empty()
    }

    /// Tutorial ids in display order.
    pub fn ids(&self) -> impl Iterator<Item = TutorialId> + '_ {
        self.tutorials.iter().map(|t| t.id)
    }

    /// The built-in production catalog for delivery partner onboarding.
    pub fn builtin() -> Self {
        // Ids are unique and entries are listed in display order, so the
        // validating constructor is not needed here.
        Self {
            tutorials: vec![
                Tutorial {
                    id: 1,
                    title: "Welcome to Delivery Partner Training".to_string(),
                    description: "Get started with your onboarding journey".to_string(),
                    content: TutorialContent::Text(
                        "Welcome! This training will help you understand how to be a \
                         successful delivery partner. You'll learn about safety protocols, \
                         customer service, and using our delivery app effectively. This \
                         comprehensive training covers everything you need to know to start \
                         your journey as a delivery partner."
                            .to_string(),
                    ),
                    estimated_time: "2 minutes".to_string(),
                    order: 1,
                },
                Tutorial {
                    id: 2,
                    title: "Safety Guidelines".to_string(),
                    description: "Learn essential safety practices for delivery".to_string(),
                    content: TutorialContent::Video(
                        "https://www.youtube.com/watch?v=sUPKVN-okY0".to_string(),
                    ),
                    estimated_time: "5 minutes".to_string(),
                    order: 2,
                },
                Tutorial {
                    id: 3,
                    title: "App Navigation".to_string(),
                    description: "How to use the delivery app effectively".to_string(),
                    content: TutorialContent::Image(
                        "https://swiggyfood.netlify.app/static/media/dining.817a6301.jpeg"
                            .to_string(),
                    ),
                    estimated_time: "3 minutes".to_string(),
                    order: 3,
                },
                Tutorial {
                    id: 4,
                    title: "Customer Service Best Practices".to_string(),
                    description: "Tips for excellent customer interactions".to_string(),
                    content: TutorialContent::Text(
                        "Always greet customers with a smile and maintain a professional \
                         demeanor. Be punctual and communicate clearly about delivery \
                         times. Handle complaints gracefully and escalate issues when \
                         necessary. Remember, you are the face of our company to customers."
                            .to_string(),
                    ),
                    estimated_time: "4 minutes".to_string(),
                    order: 4,
                },
                Tutorial {
                    id: 5,
                    title: "Knowledge Check".to_string(),
                    description: "A short quiz to confirm what you've learned".to_string(),
                    content: TutorialContent::Quiz(QuizContent {
                        questions: vec![
                            QuizQuestion {
                                id: 1,
                                question: "What should you do when a customer raises a complaint?"
                                    .to_string(),
                                options: vec![
                                    "Ignore it and move on".to_string(),
                                    "Handle it gracefully and escalate when necessary".to_string(),
                                    "Cancel the delivery".to_string(),
                                    "Argue your side of the story".to_string(),
                                ],
                                correct_answer: 1,
                            },
                            QuizQuestion {
                                id: 2,
                                question: "Why is punctuality important on deliveries?".to_string(),
                                options: vec![
                                    "It isn't, customers don't notice".to_string(),
                                    "Late deliveries earn bonus pay".to_string(),
                                    "Customers rely on the delivery times we communicate"
                                        .to_string(),
                                    "The app stops working otherwise".to_string(),
                                ],
                                correct_answer: 2,
                            },
                            QuizQuestion {
                                id: 3,
                                question: "When should you review the safety guidelines?"
                                    .to_string(),
                                options: vec![
                                    "Only during onboarding".to_string(),
                                    "Before every shift until they are second nature".to_string(),
                                    "Never, they are optional".to_string(),
                                    "Only after an incident".to_string(),
                                ],
                                correct_answer: 1,
                            },
                        ],
                    }),
                    estimated_time: "3 minutes".to_string(),
                    order: 5,
                },
            ],
        }
    }
}
