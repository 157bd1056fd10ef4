//! Static registry of USN reason codes and the categories used for filtering.
//!
//! Both tables describe the same reason vocabulary and must be updated
//! together when the dump format gains new codes.

/// Label returned for reason codes that are not in the registry.
pub const UNKNOWN_REASON: &str = "Неизвестная причина";

/// Name of the selector that matches every record.
pub const ALL_CATEGORIES: &str = "Все";

/// ASCII alias for [`ALL_CATEGORIES`].
pub const ALL_CATEGORIES_ALIAS: &str = "all";

/// Known reason codes with their descriptions, sorted by code.
static REASON_DESCRIPTIONS: &[(u32, &str)] = &[
    (0x0000_0100, "Создание файла"),
    (0x0000_0102, "Изменение данных | Создание файла"),
    (0x0000_1000, "Переименование: старое имя"),
    (0x0000_2000, "Переименование: новое имя"),
    (0x0000_8000, "Изменение основных сведений"),
    (0x0000_8800, "Изменение безопасности | Изменение основных сведений"),
    (
        0x0000_9800,
        "Изменение безопасности | Переименование: старое имя | Изменение основных сведений",
    ),
    (
        0x0000_a800,
        "Изменение безопасности | Переименование: новое имя | Изменение основных сведений",
    ),
    (0x8000_0102, "Изменение данных | Создание файла | Закрыть"),
    (0x8000_0200, "Удаление файла | Закрыть"),
    (0x8000_2000, "Переименование: новое имя | Закрыть"),
    (
        0x8000_a800,
        "Изменение безопасности | Переименование: новое имя | Изменение основных сведений | Закрыть",
    ),
];

/// A named group of reason codes.
///
/// Membership is by exact value: a record belongs to the category only if its
/// whole reason bitmask is one of `codes`. Bits are never tested individually.
#[derive(Debug, PartialEq, Eq)]
pub struct ReasonCategory {
    /// Display name of the category.
    pub name: &'static str,
    /// Exact reason values that belong to the category.
    pub codes: &'static [u32],
}

impl ReasonCategory {
    /// Returns true if `code` is one of the category's values.
    pub fn contains(&self, code: u32) -> bool {
        self.codes.contains(&code)
    }
}

static REASON_CATEGORIES: &[ReasonCategory] = &[
    ReasonCategory {
        name: "Удаление",
        codes: &[0x8000_0200],
    },
    ReasonCategory {
        name: "Создание",
        codes: &[0x0000_0100, 0x0000_0102, 0x8000_0102],
    },
    ReasonCategory {
        name: "Переименование",
        codes: &[
            0x0000_1000,
            0x0000_2000,
            0x0000_9800,
            0x0000_a800,
            0x8000_2000,
            0x8000_a800,
        ],
    },
    ReasonCategory {
        name: "Закрыто",
        codes: &[0x8000_0102, 0x8000_2000, 0x8000_a800, 0x8000_0200],
    },
    ReasonCategory {
        name: "Изменение данных",
        codes: &[0x0000_0102, 0x8000_0102, 0x0000_8000, 0x0000_8800],
    },
];

/// Returns the human label for a reason code, or [`UNKNOWN_REASON`].
pub fn describe_reason(code: u32) -> &'static str {
    REASON_DESCRIPTIONS
        .binary_search_by_key(&code, |(c, _)| *c)
        .map(|idx| REASON_DESCRIPTIONS[idx].1)
        .unwrap_or(UNKNOWN_REASON)
}

/// Returns true if the code has a registered description.
pub fn is_known_reason(code: u32) -> bool {
    describe_reason(code) != UNKNOWN_REASON
}

/// Iterates over registered codes and descriptions in ascending code order.
pub fn known_reasons() -> impl Iterator<Item = (u32, &'static str)> {
    REASON_DESCRIPTIONS.iter().copied()
}

/// All categories in display order.
pub fn categories() -> &'static [ReasonCategory] {
    REASON_CATEGORIES
}

/// Looks up a category by its exact name.
pub fn category(name: &str) -> Option<&'static ReasonCategory> {
    REASON_CATEGORIES.iter().find(|c| c.name == name)
}

/// Names of every category containing `code`.
pub fn categories_of(code: u32) -> Vec<&'static str> {
    REASON_CATEGORIES
        .iter()
        .filter(|c| c.contains(code))
        .map(|c| c.name)
        .collect()
}
