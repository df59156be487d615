use super::item::{HexColor, ItemConfig};
use crate::locale::Localized;
use std::f64::consts::PI;

const CLOUD_STACK: &[(&str, &str, u32)] = &[
    ("react", "React", 0x61DAFB),
    ("typescript", "TypeScript", 0x3178C6),
    ("javascript", "JavaScript", 0xF7DF1E),
    ("nextjs", "Next.js", 0xFFFFFF),
    ("nodejs", "Node.js", 0x5FA04E),
    ("python", "Python", 0x3776AB),
    ("tailwind", "Tailwind", 0x06B6D4),
    ("git", "Git", 0xF05032),
    ("docker", "Docker", 0x2496ED),
    ("firebase", "Firebase", 0xFFCA28),
    ("figma", "Figma", 0xF24E1E),
    ("vercel", "Vercel", 0xFFFFFF),
    ("html5", "HTML5", 0xE34F26),
    ("css3", "CSS3", 0x1572B6),
    ("flutter", "Flutter", 0x02569B),
    ("mongodb", "MongoDB", 0x47A248),
    ("graphql", "GraphQL", 0xE10098),
    ("threejs", "Three.js", 0xFFFFFF),
];

/// Tiles of the icon cloud. Positions come from the sphere layout.
pub fn cloud_entries() -> Vec<ItemConfig> {
    CLOUD_STACK
        .iter()
        .map(|&(id, name, color)| {
            ItemConfig::new(id, Localized::same(name), HexColor::from_u32(color))
        })
        .collect()
}

/// The anchor and its satellites for the orbit scene.
pub fn orbit_entries() -> Vec<ItemConfig> {
    vec![
        ItemConfig::new("react", Localized::same("React"), HexColor::from_u32(0x61DAFB))
            .description(Localized::new(
                "Component-based UI development",
                "コンポーネントベースのUI開発",
            ))
            .at([0.0, 0.0, 0.0])
            .scale(1.2),
        ItemConfig::new(
            "javascript",
            Localized::same("JavaScript"),
            HexColor::from_u32(0xF7DF1E),
        )
        .description(Localized::new(
            "Core web development language",
            "Web開発の基盤言語",
        ))
        .orbiting(2.2, 0.3, 0.0)
        .scale(0.8),
        ItemConfig::new(
            "cloud",
            Localized::new("Cloud", "クラウド"),
            HexColor::from_u32(0xFF9900),
        )
        .description(Localized::new(
            "Scalable cloud-based systems",
            "スケーラブルなクラウドシステム",
        ))
        .orbiting(2.2, 0.3, PI * 0.66)
        .scale(0.8),
        ItemConfig::new("ai", Localized::same("AI"), HexColor::from_u32(0x10B981))
            .description(Localized::new(
                "Practical AI in business systems",
                "業務システムでのAI活用",
            ))
            .orbiting(2.2, 0.3, PI * 1.33)
            .scale(0.8),
        ItemConfig::new("crm", Localized::same("CRM"), HexColor::from_u32(0x00A1E0))
            .description(Localized::new("Customer & case management", "顧客・ケース管理"))
            .orbiting(3.2, 0.2, PI * 0.5)
            .scale(0.7),
        ItemConfig::new(
            "database",
            Localized::new("Data", "データ"),
            HexColor::from_u32(0x8B5CF6),
        )
        .description(Localized::new(
            "Structured data management",
            "構造化データ管理",
        ))
        .orbiting(3.2, 0.2, PI * 1.5)
        .scale(0.7),
    ]
}
