//! Invocation intent derived from requested build tasks

use serde::Serialize;

/// Marker that flags a task as release packaging
pub const RELEASE_MARKER: &str = "release";

/// Build type implied by the requested tasks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildType {
    Debug,
    Release,
}

impl std::fmt::Display for BuildType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Debug => write!(f, "debug"),
            Self::Release => write!(f, "release"),
        }
    }
}

/// What the current invocation asked the build driver to do
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationIntent {
    /// Requested task names, in order
    pub tasks: Vec<String>,
    pub is_release_build: bool,
}

impl InvocationIntent {
    /// Derive the intent from task names
    pub fn from_tasks<I, S>(tasks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tasks: Vec<String> = tasks.into_iter().map(|t| t.as_ref().to_string()).collect();
        let is_release_build = tasks.iter().any(|t| is_release_task(t));
        Self {
            tasks,
            is_release_build,
        }
    }

    pub fn build_type(&self) -> BuildType {
        if self.is_release_build {
            BuildType::Release
        } else {
            BuildType::Debug
        }
    }
}

/// Case-insensitive substring match on the release marker
pub fn is_release_task(task: &str) -> bool {
    task.to_lowercase().contains(RELEASE_MARKER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_tasks() {
        for task in [
            "assembleRelease",
            "bundleRelease",
            "performRelease",
            "RELEASE_BUILD",
            ":app:packageRelease",
        ] {
            assert!(is_release_task(task), "{} should be a release task", task);
        }
    }

    #[test]
    fn test_non_release_tasks() {
        for task in ["assembleDebug", "clean", "test", ":app:lint", ""] {
            assert!(!is_release_task(task), "{} should not be a release task", task);
        }
    }

    #[test]
    fn test_intent_any_release() {
        let intent = InvocationIntent::from_tasks(["clean", "bundleRelease"]);
        assert!(intent.is_release_build);
        assert_eq!(intent.build_type(), BuildType::Release);
        assert_eq!(intent.tasks, vec!["clean", "bundleRelease"]);
    }

    #[test]
    fn test_intent_no_tasks() {
        let intent = InvocationIntent::from_tasks(Vec::<String>::new());
        assert!(!intent.is_release_build);
        assert_eq!(intent.build_type(), BuildType::Debug);
    }
}
