// Template catalog - Built-in templates plus any loaded from settings
use crate::domain::template::{Template, builtin_templates};

#[derive(Debug, Clone)]
pub struct TemplateCatalog {
    templates: Vec<Template>,
}

impl TemplateCatalog {
    pub fn builtin() -> Self {
        Self {
            templates: builtin_templates(),
        }
    }

    /// Built-ins followed by `extra`; an extra template with a built-in id replaces it in place
    pub fn with_extra(extra: Vec<Template>) -> Self {
        let mut catalog = Self::builtin();
        for template in extra {
            match catalog.templates.iter_mut().find(|t| t.id == template.id) {
                Some(existing) => {
                    tracing::debug!(id = %template.id, "Template overrides built-in");
                    *existing = template;
                }
                None => catalog.templates.push(template),
            }
        }
        catalog
    }

    pub fn all(&self) -> &[Template] {
        &self.templates
    }

    pub fn find(&self, id: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dashboard::Tab;

    fn template(id: &str, name: &str) -> Template {
        Template {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            category: "Custom".to_string(),
            thumbnail: None,
            tabs: vec![Tab::new("main", "Main")],
        }
    }

    #[test]
    fn test_find_builtin() {
        let catalog = TemplateCatalog::builtin();
        assert_eq!(catalog.all().len(), 3);
        assert_eq!(catalog.find("analytics-dashboard").unwrap().category, "Analytics");
        assert!(catalog.find("nope").is_none());
    }

    #[test]
    fn test_extra_templates_append_and_override() {
        let catalog = TemplateCatalog::with_extra(vec![
            template("ops", "Ops Board"),
            template("single-column", "Replaced"),
        ]);

        let ids: Vec<&str> = catalog.all().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["single-column", "executive-dashboard", "analytics-dashboard", "ops"]);
        assert_eq!(catalog.find("single-column").unwrap().name, "Replaced");
    }
}
