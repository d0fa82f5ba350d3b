// ============================================================
// Layer 3 — Menu Domain Types
// ============================================================
// A menu is plain data: a title, the command name used as the
// prompt, and an ordered table of (key, label, action) entries.
// It is built when the harness is set up and passed to a
// dispatcher by reference.

/// The three actions the self-test harness exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    ClassifyZeros,
    ClassifySample,
    GoldenTest,
}

/// One selectable line of a menu.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuItem {
    pub key:    char,
    pub label:  String,
    pub action: MenuAction,
}

impl MenuItem {
    pub fn new(key: char, label: impl Into<String>, action: MenuAction) -> Self {
        Self { key, label: label.into(), action }
    }
}

/// A titled group of menu items.
#[derive(Debug, Clone, PartialEq)]
pub struct Menu {
    pub title:   String,
    /// Short command name, shown as the prompt (`test> `)
    pub command: String,
    pub items:   Vec<MenuItem>,
}

impl Menu {
    pub fn new(title: impl Into<String>, command: impl Into<String>, items: Vec<MenuItem>) -> Self {
        Self { title: title.into(), command: command.into(), items }
    }

    /// The standard self-test menu for a model called `model_name`.
    pub fn self_test(model_name: &str) -> Self {
        Self::new(
            format!("Tests for {model_name} model"),
            "test",
            vec![
                MenuItem::new('1', "Run with zeros input", MenuAction::ClassifyZeros),
                MenuItem::new('2', "Run with random input", MenuAction::ClassifySample),
                MenuItem::new(
                    'g',
                    "Run golden tests (check for expected outputs)",
                    MenuAction::GoldenTest,
                ),
            ],
        )
    }

    /// Resolve a key to the action registered under it.
    pub fn lookup(&self, key: char) -> Option<MenuAction> {
        self.items.iter().find(|item| item.key == key).map(|item| item.action)
    }
}
