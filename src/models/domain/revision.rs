use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{AppError, AppResult};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct RevisionCard {
    pub id: String,
    pub term: String,
    pub definition: String,
}

/// Flash cards kept in memory for a revision session.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct RevisionDeck {
    pub cards: Vec<RevisionCard>,
}

impl RevisionDeck {
    /// The three accounting cards every deck starts with.
    pub fn starter() -> Self {
        let card = |id: &str, term: &str, definition: &str| RevisionCard {
            id: id.to_string(),
            term: term.to_string(),
            definition: definition.to_string(),
        };

        Self {
            cards: vec![
                card(
                    "1",
                    "Bilan comptable",
                    "Un document qui représente l'état du patrimoine de l'entreprise à une date donnée, divisé en actif et passif.",
                ),
                card(
                    "2",
                    "Actif",
                    "Ce que l'entreprise possède (ex: bâtiments, machines, stocks).",
                ),
                card(
                    "3",
                    "Passif",
                    "Ce que l'entreprise doit (ex: dettes, capital social).",
                ),
            ],
        }
    }

    pub fn add(&mut self, term: &str, definition: &str) -> AppResult<&RevisionCard> {
        let term = term.trim();
        let definition = definition.trim();
        if term.is_empty() || definition.is_empty() {
            return Err(AppError::ValidationError(
                "A card needs both a term and a definition.".to_string(),
            ));
        }

        self.cards.push(RevisionCard {
            id: Uuid::new_v4().to_string(),
            term: term.to_string(),
            definition: definition.to_string(),
        });
        Ok(&self.cards[self.cards.len() - 1])
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starter_deck_has_accounting_basics() {
        let deck = RevisionDeck::starter();
        let terms: Vec<&str> = deck.cards.iter().map(|c| c.term.as_str()).collect();
        assert_eq!(terms, vec!["Bilan comptable", "Actif", "Passif"]);
    }

    #[test]
    fn add_trims_and_requires_both_fields() {
        let mut deck = RevisionDeck::starter();

        let card = deck
            .add("  Capital social ", " Apports des associés ")
            .expect("card should be added");
        assert_eq!(card.term, "Capital social");
        assert_eq!(card.definition, "Apports des associés");
        assert_eq!(deck.len(), 4);

        assert!(deck.add("Créance", "   ").is_err());
        assert_eq!(deck.len(), 4);
    }
}
