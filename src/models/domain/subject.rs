use serde::Serialize;

/// A curriculum subject of the Première G1 track (Enseignement Technique et Professionnel).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Subject {
    pub name: &'static str,
    pub slug: &'static str,
    pub icon: &'static str, // lucide icon name used by the front-end
    pub description: &'static str,
}

pub static SUBJECTS: &[Subject] = &[
    Subject {
        name: "Français",
        slug: "francais",
        icon: "BookOpen",
        description: "Étude de textes, grammaire et techniques d'expression.",
    },
    Subject {
        name: "Anglais",
        slug: "anglais",
        icon: "Languages",
        description: "Commercial English, vocabulary, and grammar.",
    },
    Subject {
        name: "Mathématiques Financières",
        slug: "math-financieres",
        icon: "Calculator",
        description: "Intérêts simples et composés, escomptes, annuités.",
    },
    Subject {
        name: "Économie Générale",
        slug: "economie-generale",
        icon: "Landmark",
        description: "Agents économiques, marchés, et circuits économiques.",
    },
    Subject {
        name: "Droit",
        slug: "droit",
        icon: "FileText",
        description: "Sources du droit, personnes, biens et obligations.",
    },
    Subject {
        name: "Comptabilité et Finance",
        slug: "comptabilite-finance",
        icon: "ClipboardEdit",
        description: "Comptabilité générale, travaux d'inventaire, analyse.",
    },
    Subject {
        name: "Organisation des Entreprises",
        slug: "organisation-entreprises",
        icon: "Briefcase",
        description: "Structures, fonctions et gestion des entreprises.",
    },
    Subject {
        name: "Techniques Quantitatives de Gestion",
        slug: "tqg",
        icon: "DraftingCompass",
        description: "Statistiques descriptives et analyse de données.",
    },
    Subject {
        name: "Informatique Appliquée",
        slug: "informatique-appliquee",
        icon: "Laptop",
        description: "Logiciels de bureautique (Word, Excel, PowerPoint) et SAGE.",
    },
];

impl Subject {
    pub fn all() -> &'static [Subject] {
        SUBJECTS
    }

    pub fn find_by_slug(slug: &str) -> Option<&'static Subject> {
        SUBJECTS.iter().find(|s| s.slug == slug)
    }

    pub fn find_by_name(name: &str) -> Option<&'static Subject> {
        SUBJECTS.iter().find(|s| s.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subjects_have_unique_slugs() {
        let mut slugs: Vec<&str> = SUBJECTS.iter().map(|s| s.slug).collect();
        let original_len = slugs.len();
        slugs.sort_unstable();
        slugs.dedup();

        assert_eq!(original_len, 9);
        assert_eq!(slugs.len(), original_len);
    }

    #[test]
    fn find_by_slug_and_name() {
        let droit = Subject::find_by_slug("droit").expect("droit should exist");
        assert_eq!(droit.name, "Droit");

        let tqg = Subject::find_by_name("Techniques Quantitatives de Gestion")
            .expect("tqg should exist");
        assert_eq!(tqg.slug, "tqg");

        assert!(Subject::find_by_slug("astronomie").is_none());
    }
}
