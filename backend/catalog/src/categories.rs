use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub count: u32,
}

pub const CATEGORIES: [Category; 10] = [
    category("cms", "Content Management", "CMS platforms and tools", 45),
    category("monitoring", "Monitoring", "System and application monitoring", 32),
    category("analytics", "Analytics", "Data and website analytics", 28),
    category("automation", "Automation", "Task and workflow automation", 35),
    category("backup", "Backup & Storage", "Data backup and storage solutions", 25),
    category("communication", "Communication", "Team chat and collaboration", 30),
    category("database", "Databases", "Database management systems", 22),
    category("development", "Development", "Development tools and IDEs", 40),
    category("documentation", "Documentation", "Wiki and knowledge bases", 18),
    category("security", "Security", "Security and access control", 33),
];

const fn category(
    id: &'static str,
    name: &'static str,
    description: &'static str,
    count: u32,
) -> Category {
    Category {
        id,
        name,
        description,
        count,
    }
}

pub fn find(id: &str) -> Option<&'static Category> {
    CATEGORIES.iter().find(|category| category.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_known() {
        let category = find("cms").unwrap();
        assert_eq!(category.name, "Content Management");
        assert_eq!(category.count, 45);
    }

    #[test]
    fn test_find_unknown() {
        assert!(find("games").is_none());
        assert!(find("CMS").is_none());
    }

    #[test]
    fn test_ids_unique() {
        for (index, category) in CATEGORIES.iter().enumerate() {
            assert!(
                CATEGORIES[index + 1..]
                    .iter()
                    .all(|other| other.id != category.id),
                "duplicate category id {}",
                category.id
            );
        }
    }
}
