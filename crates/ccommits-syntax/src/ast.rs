use std::fmt;

/// The commit types accepted in a header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommitType {
    Feat,
    Fix,
    Chore,
    Ci,
    Docs,
    Refactor,
    Test,
}

impl CommitType {
    pub const ALL: [CommitType; 7] = [
        CommitType::Feat,
        CommitType::Fix,
        CommitType::Chore,
        CommitType::Ci,
        CommitType::Docs,
        CommitType::Refactor,
        CommitType::Test,
    ];

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == keyword)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CommitType::Feat => "feat",
            CommitType::Fix => "fix",
            CommitType::Chore => "chore",
            CommitType::Ci => "ci",
            CommitType::Docs => "docs",
            CommitType::Refactor => "refactor",
            CommitType::Test => "test",
        }
    }
}

impl fmt::Display for CommitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `type(scope)!: description`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitTitle {
    pub commit_type: CommitType,
    /// Scope without its parentheses; `Some("")` for `()`.
    pub scope: Option<String>,
    pub breaking: bool,
    /// Never empty.
    pub description: String,
}

impl fmt::Display for CommitTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.commit_type)?;
        if let Some(scope) = &self.scope {
            write!(f, "({})", scope)?;
        }
        if self.breaking {
            write!(f, "!")?;
        }
        write!(f, ": {}", self.description)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitMessage {
    pub title: CommitTitle,
    /// Raw body lines, blank lines between paragraphs included.
    pub body: Vec<String>,
    /// Raw `#` lines, including the leading `#`.
    pub comments: Vec<String>,
    /// The `diff --git` line when the buffer carried an appended diff.
    pub diff: Option<String>,
}

impl CommitMessage {
    pub fn is_breaking(&self) -> bool {
        self.title.breaking
    }

    pub fn has_body(&self) -> bool {
        !self.body.is_empty()
    }
}
