use crate::core::builtin_personas::load_builtin_personas;
use serde::{Deserialize, Serialize};

/// A character the user can talk to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Persona {
    pub id: String,
    pub display_name: String,
    pub description: String,
    /// Prepended to every user message sent while this persona is selected.
    pub instruction_prompt: String,
}

/// The fixed cast of personas, in display order.
#[derive(Debug, Clone)]
pub struct PersonaCatalog {
    personas: Vec<Persona>,
}

impl PersonaCatalog {
    /// Catalog of the personas embedded in the binary
    pub fn builtin() -> Self {
        Self::from_personas(load_builtin_personas())
    }

    pub fn from_personas(personas: Vec<Persona>) -> Self {
        Self { personas }
    }

    pub fn list(&self) -> &[Persona] {
        &self.personas
    }

    pub fn len(&self) -> usize {
        self.personas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.personas.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Persona> {
        self.personas.get(index)
    }

    /// Find a persona by its ID
    pub fn find_by_id(&self, id: &str) -> Option<&Persona> {
        self.personas.iter().find(|p| p.id == id)
    }

    /// Like [`find_by_id`](Self::find_by_id), with an error naming the valid IDs.
    pub fn require(&self, id: &str) -> Result<&Persona, String> {
        self.find_by_id(id).ok_or_else(|| {
            let available_ids: Vec<&str> = self.personas.iter().map(|p| p.id.as_str()).collect();
            format!(
                "Persona '{}' not found. Available personas: {}",
                id,
                available_ids.join(", ")
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_catalog() -> PersonaCatalog {
        PersonaCatalog::from_personas(vec![
            Persona {
                id: "sage".to_string(),
                display_name: "Sage".to_string(),
                description: "Calm and balanced.".to_string(),
                instruction_prompt: "You are Sage.".to_string(),
            },
            Persona {
                id: "jester".to_string(),
                display_name: "Jester".to_string(),
                description: "Always joking.".to_string(),
                instruction_prompt: "You are Jester.".to_string(),
            },
        ])
    }

    #[test]
    fn builtin_catalog_has_eight_personas() {
        let catalog = PersonaCatalog::builtin();
        assert_eq!(catalog.len(), 8);
        assert!(!catalog.is_empty());
        assert_eq!(catalog.get(0).map(|p| p.id.as_str()), Some("awafi"));
        assert!(catalog.find_by_id("qubtan").is_some());
    }

    #[test]
    fn find_by_id_matches_exactly() {
        let catalog = create_test_catalog();
        assert_eq!(
            catalog.find_by_id("jester").map(|p| p.display_name.as_str()),
            Some("Jester")
        );
        assert!(catalog.find_by_id("Jester").is_none());
        assert!(catalog.find_by_id("nonexistent").is_none());
    }

    #[test]
    fn require_lists_available_ids_on_miss() {
        let catalog = create_test_catalog();
        assert!(catalog.require("sage").is_ok());

        let error_msg = catalog.require("nonexistent").unwrap_err();
        assert!(error_msg.contains("Persona 'nonexistent' not found"));
        assert!(error_msg.contains("sage, jester"));
    }
}
