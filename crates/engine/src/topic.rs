use crate::Error;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// The lesson subjects offered to the user
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Topic {
    /// Object orientation: classes, constructors, properties, methods
    Oop,
    /// Virtual environments, files and APIs
    Api,
}

impl Topic {
    /// Every topic, in menu order
    pub const ALL: [Topic; 2] = [Topic::Oop, Topic::Api];

    /// The short identifier used in config files and on the command line
    pub fn id(&self) -> &'static str {
        match self {
            Topic::Oop => "oop",
            Topic::Api => "api",
        }
    }

    /// The menu entry presenting this topic
    pub fn menu_entry(&self) -> &'static MenuEntry {
        match self {
            Topic::Oop => &MENU[0],
            Topic::Api => &MENU[1],
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for Topic {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Topic::ALL
            .into_iter()
            .find(|topic| topic.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownTopic(s.to_string()))
    }
}

/// The symbolic icon shown beside a menu entry
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Icon {
    Box,
    Layers,
}

impl Icon {
    /// The terminal glyph used to draw the icon
    pub fn glyph(&self) -> &'static str {
        match self {
            Icon::Box => "▣",
            Icon::Layers => "≡",
        }
    }
}

/// A static navigation entry
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MenuEntry {
    pub id: Topic,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: Icon,
}

/// The fixed navigation menu
pub const MENU: [MenuEntry; 2] = [
    MenuEntry {
        id: Topic::Oop,
        title: "Orientação a Objetos",
        description: "Classes, construtores, métodos e boas práticas.",
        icon: Icon::Box,
    },
    MenuEntry {
        id: Topic::Api,
        title: "Ambientes e APIs",
        description: "Herança, venv, arquivos e sua primeira API.",
        icon: Icon::Layers,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_matches_topics() {
        for (entry, topic) in MENU.iter().zip(Topic::ALL) {
            assert_eq!(entry.id, topic);
            assert_eq!(topic.menu_entry(), entry);
        }
    }

    #[test]
    fn test_topic_from_str() {
        assert_eq!("oop".parse::<Topic>().unwrap(), Topic::Oop);
        assert_eq!(" API ".parse::<Topic>().unwrap(), Topic::Api);
        assert!(matches!(
            "rust".parse::<Topic>(),
            Err(Error::UnknownTopic(t)) if t == "rust"
        ));
    }

    #[test]
    fn test_topic_serde_ids() {
        assert_eq!(serde_json::to_string(&Topic::Api).unwrap(), "\"api\"");
        assert_eq!(
            serde_json::from_str::<Topic>("\"oop\"").unwrap(),
            Topic::Oop
        );
    }
}
