//! Command lines forwarded to the native samples process

use bitflags::bitflags;
use thiserror::Error;

/// Verb selecting a single sample
pub const SAMPLE_VERB: &str = "sample";
/// Verb selecting a test
pub const TEST_VERB: &str = "test";
/// Verb selecting a batch run
pub const BATCH_VERB: &str = "batch";

const CATEGORY_FLAG: &str = "--category";
const TAG_FLAG: &str = "--tag";
const BENCHMARK_FLAG: &str = "--benchmark";
const HEADLESS_FLAG: &str = "--headless_surface";

bitflags! {
    /// Options appended to every launch
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct LaunchFlags: u8 {
        /// Run in benchmark mode
        const BENCHMARK = 1 << 0;
        /// Render to a headless surface
        const HEADLESS = 1 << 1;
    }
}

/// What the native process should run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchRequest {
    /// Run one sample
    Sample(String),
    /// Run one test
    Test(String),
    /// Run every sample of a category that carries one of the tags
    Batch {
        /// Category to run, or `all`
        category: String,
        /// Tags to match; empty matches everything
        tags: Vec<String>,
    },
}

/// A request plus its launch options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    /// What to run
    pub request: LaunchRequest,
    /// How to run it
    pub flags: LaunchFlags,
}

/// Errors produced while reading a command line
#[derive(Error, Debug, PartialEq, Eq)]
pub enum LaunchError {
    /// No verb was given
    #[error("Empty command line")]
    Empty,

    /// The verb is not one of sample, test or batch
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// The verb or a flag lacks its operand
    #[error("Missing value for {0}")]
    MissingValue(String),

    /// An argument that fits nowhere
    #[error("Unexpected argument: {0}")]
    UnexpectedArgument(String),
}

impl LaunchRequest {
    /// Batch request from a category and a tag filter
    pub fn batch<'a, I>(category: impl Into<String>, tags: I) -> Self
    where
        I: IntoIterator<Item = &'a String>,
    {
        Self::Batch {
            category: category.into(),
            tags: tags.into_iter().cloned().collect(),
        }
    }

    /// Serialize with launch options appended
    pub fn to_args(&self, flags: LaunchFlags) -> Vec<String> {
        let mut args = Vec::new();
        match self {
            Self::Sample(id) => {
                args.push(SAMPLE_VERB.to_string());
                args.push(id.clone());
            }
            Self::Test(id) => {
                args.push(TEST_VERB.to_string());
                args.push(id.clone());
            }
            Self::Batch { category, tags } => {
                args.push(BATCH_VERB.to_string());
                args.push(CATEGORY_FLAG.to_string());
                args.push(category.clone());
                if !tags.is_empty() {
                    args.push(TAG_FLAG.to_string());
                    args.extend(tags.iter().cloned());
                }
            }
        }
        if flags.contains(LaunchFlags::BENCHMARK) {
            args.push(BENCHMARK_FLAG.to_string());
        }
        if flags.contains(LaunchFlags::HEADLESS) {
            args.push(HEADLESS_FLAG.to_string());
        }
        args
    }

    /// Read a command line produced by [`LaunchRequest::to_args`]
    pub fn parse<S: AsRef<str>>(args: &[S]) -> Result<CommandLine, LaunchError> {
        let mut iter = args.iter().map(|arg| -> &str { arg.as_ref() }).peekable();
        let verb = iter.next().ok_or(LaunchError::Empty)?;

        let request = match verb {
            SAMPLE_VERB | TEST_VERB => {
                let id = iter
                    .next()
                    .filter(|id| !id.starts_with("--"))
                    .ok_or_else(|| LaunchError::MissingValue(verb.to_string()))?
                    .to_string();
                if verb == SAMPLE_VERB {
                    Self::Sample(id)
                } else {
                    Self::Test(id)
                }
            }
            BATCH_VERB => {
                let mut category = None;
                let mut tags = Vec::new();
                while let Some(flag) = iter.next_if(|arg| *arg == CATEGORY_FLAG || *arg == TAG_FLAG) {
                    if flag == CATEGORY_FLAG {
                        let value = iter
                            .next()
                            .filter(|v| !v.starts_with("--"))
                            .ok_or_else(|| LaunchError::MissingValue(CATEGORY_FLAG.to_string()))?;
                        category = Some(value.to_string());
                    } else {
                        while let Some(tag) = iter.next_if(|arg| !arg.starts_with("--")) {
                            tags.push(tag.to_string());
                        }
                    }
                }
                Self::Batch {
                    category: category.ok_or_else(|| LaunchError::MissingValue(CATEGORY_FLAG.to_string()))?,
                    tags,
                }
            }
            other => return Err(LaunchError::UnknownCommand(other.to_string())),
        };

        let mut flags = LaunchFlags::empty();
        for arg in iter {
            match arg {
                BENCHMARK_FLAG => flags |= LaunchFlags::BENCHMARK,
                HEADLESS_FLAG => flags |= LaunchFlags::HEADLESS,
                other => return Err(LaunchError::UnexpectedArgument(other.to_string())),
            }
        }

        Ok(CommandLine { request, flags })
    }
}

impl CommandLine {
    /// Serialize to arguments
    pub fn to_args(&self) -> Vec<String> {
        self.request.to_args(self.flags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_args() {
        let args = LaunchRequest::Sample("hello_triangle".into()).to_args(LaunchFlags::empty());
        assert_eq!(args, ["sample", "hello_triangle"]);
    }

    #[test]
    fn test_test_args_with_flags() {
        let args = LaunchRequest::Test("bonza".into()).to_args(LaunchFlags::BENCHMARK | LaunchFlags::HEADLESS);
        assert_eq!(args, ["test", "bonza", "--benchmark", "--headless_surface"]);
    }

    #[test]
    fn test_batch_args() {
        let tags = vec!["any".to_string(), "compute".to_string()];
        let args = LaunchRequest::batch("api", &tags).to_args(LaunchFlags::empty());
        assert_eq!(args, ["batch", "--category", "api", "--tag", "any", "compute"]);
    }

    #[test]
    fn test_batch_without_tags_omits_flag() {
        let args = LaunchRequest::batch("api", &Vec::<String>::new()).to_args(LaunchFlags::HEADLESS);
        assert_eq!(args, ["batch", "--category", "api", "--headless_surface"]);
    }

    #[test]
    fn test_parse_batch_with_flags() {
        let parsed = LaunchRequest::parse(&[
            "batch", "--category", "performance", "--tag", "compute", "any", "--benchmark",
        ])
        .unwrap();
        assert_eq!(parsed.flags, LaunchFlags::BENCHMARK);
        assert_eq!(
            parsed.request,
            LaunchRequest::Batch {
                category: "performance".into(),
                tags: vec!["compute".into(), "any".into()],
            }
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(LaunchRequest::parse::<&str>(&[]), Err(LaunchError::Empty));
        assert_eq!(
            LaunchRequest::parse(&["run", "x"]),
            Err(LaunchError::UnknownCommand("run".into()))
        );
        assert_eq!(
            LaunchRequest::parse(&["sample"]),
            Err(LaunchError::MissingValue("sample".into()))
        );
        assert_eq!(
            LaunchRequest::parse(&["sample", "--benchmark"]),
            Err(LaunchError::MissingValue("sample".into()))
        );
        assert_eq!(
            LaunchRequest::parse(&["batch", "--tag", "any"]),
            Err(LaunchError::MissingValue("--category".into()))
        );
        assert_eq!(
            LaunchRequest::parse(&["test", "x", "--width"]),
            Err(LaunchError::UnexpectedArgument("--width".into()))
        );
    }

    #[test]
    fn test_parse_reads_what_to_args_writes() {
        let line = CommandLine {
            request: LaunchRequest::batch("all", &["any".to_string()]),
            flags: LaunchFlags::HEADLESS,
        };
        assert_eq!(LaunchRequest::parse(&line.to_args()).unwrap(), line);
    }
}
