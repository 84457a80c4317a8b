//! Tool catalog and dialog host.
//!
//! Every tool the landing page advertises, including the two that are
//! listed but not built yet. [`open`] resolves a catalog id the way the
//! dialog host does: to a mounted tool or a "coming soon" placeholder.

use std::fmt;
use std::str::FromStr;

use super::ToolError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    Chatbot,
    Quiz,
    Homework,
    Voice,
    Learning,
    Grading,
    Handwriting,
    Summarizer,
    Code,
    Dashboard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolInfo {
    pub kind: ToolKind,
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub available: bool,
}

pub const CATALOG: [ToolInfo; 10] = [
    ToolInfo {
        kind: ToolKind::Chatbot,
        id: "chatbot",
        title: "AI Chatbot Assistant",
        description: "Get instant help with your studies through our intelligent virtual assistant.",
        available: true,
    },
    ToolInfo {
        kind: ToolKind::Quiz,
        id: "quiz",
        title: "AI Quiz Generator",
        description: "Create personalized quizzes from any text or topic instantly.",
        available: true,
    },
    ToolInfo {
        kind: ToolKind::Homework,
        id: "homework",
        title: "Homework Helper",
        description: "Get step-by-step solutions and explanations for your assignments.",
        available: true,
    },
    ToolInfo {
        kind: ToolKind::Voice,
        id: "voice",
        title: "Voice-to-Text & Text-to-Voice",
        description: "Convert speech to text and text to speech for better accessibility.",
        available: true,
    },
    ToolInfo {
        kind: ToolKind::Learning,
        id: "learning",
        title: "Personalized Learning Path",
        description: "Get customized learning recommendations based on your progress.",
        available: false,
    },
    ToolInfo {
        kind: ToolKind::Grading,
        id: "grading",
        title: "Essay Grading Assistant",
        description: "Receive detailed feedback and scores on your written assignments.",
        available: true,
    },
    ToolInfo {
        kind: ToolKind::Handwriting,
        id: "handwriting",
        title: "Handwriting Recognition",
        description: "Convert handwritten notes to digital text using image upload.",
        available: true,
    },
    ToolInfo {
        kind: ToolKind::Summarizer,
        id: "summarizer",
        title: "Content Summarizer",
        description: "Get concise summaries of articles, notes, and study materials.",
        available: true,
    },
    ToolInfo {
        kind: ToolKind::Code,
        id: "code",
        title: "Code Explainer AI",
        description: "Understand programming concepts with detailed code explanations.",
        available: true,
    },
    ToolInfo {
        kind: ToolKind::Dashboard,
        id: "dashboard",
        title: "Performance Dashboard",
        description: "Track your learning progress with detailed analytics and insights.",
        available: false,
    },
];

// Each entry sits at its kind's index; a reordered table fails to build.
const _: () = {
    let mut i = 0;
    while i < CATALOG.len() {
        assert!(CATALOG[i].kind.index() == i);
        i += 1;
    }
};

impl ToolKind {
    #[must_use]
    pub fn info(self) -> &'static ToolInfo {
        &CATALOG[self.index()]
    }

    /// Position of this kind's entry in [`CATALOG`].
    const fn index(self) -> usize {
        match self {
            Self::Chatbot => 0,
            Self::Quiz => 1,
            Self::Homework => 2,
            Self::Voice => 3,
            Self::Learning => 4,
            Self::Grading => 5,
            Self::Handwriting => 6,
            Self::Summarizer => 7,
            Self::Code => 8,
            Self::Dashboard => 9,
        }
    }

    #[must_use]
    pub fn id(self) -> &'static str {
        self.info().id
    }

    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        CATALOG.iter().find(|info| info.id == id).map(|info| info.kind)
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ToolKind {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_id(s.trim()).ok_or_else(|| ToolError::Invalid(format!("Unknown tool '{s}'.")))
    }
}

/// What the dialog host shows for a catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mounted {
    Tool(&'static ToolInfo),
    ComingSoon(&'static ToolInfo),
}

/// Resolve a catalog id to the widget the dialog should mount.
///
/// # Errors
///
/// [`ToolError::Invalid`] for an id that is not in the catalog.
pub fn open(id: &str) -> Result<Mounted, ToolError> {
    let info = id.parse::<ToolKind>()?.info();
    Ok(if info.available { Mounted::Tool(info) } else { Mounted::ComingSoon(info) })
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
